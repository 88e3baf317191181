//! Resource limits for image construction, decode and encode.
//!
//! [`ResourceLimits`] caps what an [`ImageContext`](crate::ImageContext) is
//! allowed to allocate. Checks run on the descriptor before any pixel memory
//! is touched, so an oversized request never reaches the allocator.

use crate::layout::ImageDesc;

/// Resource limits for image operations.
///
/// All fields are optional; `None` means no limit for that resource.
///
/// # Example
///
/// ```
/// use zentexture::ResourceLimits;
///
/// let limits = ResourceLimits::none()
///     .with_max_pixels(16_777_216)
///     .with_max_memory(256 * 1024 * 1024);
/// assert!(limits.has_any());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct ResourceLimits {
    /// Maximum base-level pixels (width x height).
    pub max_pixels: Option<u64>,
    /// Maximum pixel buffer size in bytes.
    pub max_memory_bytes: Option<u64>,
    /// Maximum encoded output size in bytes (encode only).
    pub max_output_bytes: Option<u64>,
    /// Maximum base-level width.
    pub max_width: Option<u32>,
    /// Maximum base-level height.
    pub max_height: Option<u32>,
    /// Maximum depth (3D) or stored array-layer count (cube faces included).
    pub max_depth_or_layers: Option<u32>,
    /// Maximum input size in bytes (decode only).
    pub max_file_size: Option<u64>,
}

impl ResourceLimits {
    /// No limits (all fields `None`).
    pub fn none() -> Self {
        Self::default()
    }

    /// Set maximum base-level pixels.
    pub fn with_max_pixels(mut self, max: u64) -> Self {
        self.max_pixels = Some(max);
        self
    }

    /// Set maximum pixel buffer size in bytes.
    pub fn with_max_memory(mut self, bytes: u64) -> Self {
        self.max_memory_bytes = Some(bytes);
        self
    }

    /// Set maximum encoded output size in bytes.
    pub fn with_max_output(mut self, bytes: u64) -> Self {
        self.max_output_bytes = Some(bytes);
        self
    }

    /// Set maximum base-level width.
    pub fn with_max_width(mut self, width: u32) -> Self {
        self.max_width = Some(width);
        self
    }

    /// Set maximum base-level height.
    pub fn with_max_height(mut self, height: u32) -> Self {
        self.max_height = Some(height);
        self
    }

    /// Set maximum depth or array-layer count.
    pub fn with_max_depth_or_layers(mut self, count: u32) -> Self {
        self.max_depth_or_layers = Some(count);
        self
    }

    /// Set maximum decode input size in bytes.
    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = Some(bytes);
        self
    }

    /// Whether any limits are set.
    pub fn has_any(&self) -> bool {
        self.max_pixels.is_some()
            || self.max_memory_bytes.is_some()
            || self.max_output_bytes.is_some()
            || self.max_width.is_some()
            || self.max_height.is_some()
            || self.max_depth_or_layers.is_some()
            || self.max_file_size.is_some()
    }

    // --- Validation methods ---

    /// Check base extents against `max_width`, `max_height`, and `max_pixels`.
    pub fn check_dimensions(&self, width: u32, height: u32) -> Result<(), LimitExceeded> {
        if let Some(max) = self.max_width
            && width > max
        {
            return Err(LimitExceeded::Width { actual: width, max });
        }
        if let Some(max) = self.max_height
            && height > max
        {
            return Err(LimitExceeded::Height {
                actual: height,
                max,
            });
        }
        if let Some(max) = self.max_pixels {
            let pixels = width as u64 * height as u64;
            if pixels > max {
                return Err(LimitExceeded::Pixels {
                    actual: pixels,
                    max,
                });
            }
        }
        Ok(())
    }

    /// Check a depth or stored layer count against `max_depth_or_layers`.
    pub fn check_depth_or_layers(&self, count: u32) -> Result<(), LimitExceeded> {
        if let Some(max) = self.max_depth_or_layers
            && count > max
        {
            return Err(LimitExceeded::DepthOrLayers { actual: count, max });
        }
        Ok(())
    }

    /// Check a pixel buffer size against `max_memory_bytes`.
    pub fn check_memory(&self, bytes: u64) -> Result<(), LimitExceeded> {
        if let Some(max) = self.max_memory_bytes
            && bytes > max
        {
            return Err(LimitExceeded::Memory { actual: bytes, max });
        }
        Ok(())
    }

    /// Check decode input size against `max_file_size`.
    pub fn check_file_size(&self, bytes: u64) -> Result<(), LimitExceeded> {
        if let Some(max) = self.max_file_size
            && bytes > max
        {
            return Err(LimitExceeded::FileSize { actual: bytes, max });
        }
        Ok(())
    }

    /// Check encoded output size against `max_output_bytes`.
    pub fn check_output_size(&self, bytes: u64) -> Result<(), LimitExceeded> {
        if let Some(max) = self.max_output_bytes
            && bytes > max
        {
            return Err(LimitExceeded::OutputSize { actual: bytes, max });
        }
        Ok(())
    }

    /// Check a resolved descriptor: extents and stored depth/layer count.
    ///
    /// The buffer size is checked separately with
    /// [`check_memory`](Self::check_memory) once the layout is known.
    pub fn check_desc(&self, desc: &ImageDesc) -> Result<(), LimitExceeded> {
        self.check_dimensions(desc.width, desc.height)?;
        self.check_depth_or_layers(desc.depth_or_array_layers)
    }
}

/// A resource limit was exceeded.
///
/// Each variant carries the actual value and the limit that was exceeded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LimitExceeded {
    /// Width exceeded `max_width`.
    Width { actual: u32, max: u32 },
    /// Height exceeded `max_height`.
    Height { actual: u32, max: u32 },
    /// Pixel count exceeded `max_pixels`.
    Pixels { actual: u64, max: u64 },
    /// Depth or layer count exceeded `max_depth_or_layers`.
    DepthOrLayers { actual: u32, max: u32 },
    /// Buffer size exceeded `max_memory_bytes`.
    Memory { actual: u64, max: u64 },
    /// Input size exceeded `max_file_size`.
    FileSize { actual: u64, max: u64 },
    /// Encoded output exceeded `max_output_bytes`.
    OutputSize { actual: u64, max: u64 },
}

impl core::fmt::Display for LimitExceeded {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Width { actual, max } => write!(f, "width {actual} exceeds limit {max}"),
            Self::Height { actual, max } => write!(f, "height {actual} exceeds limit {max}"),
            Self::Pixels { actual, max } => {
                write!(f, "pixel count {actual} exceeds limit {max}")
            }
            Self::DepthOrLayers { actual, max } => {
                write!(f, "depth or layer count {actual} exceeds limit {max}")
            }
            Self::Memory { actual, max } => {
                write!(f, "memory {actual} bytes exceeds limit {max}")
            }
            Self::FileSize { actual, max } => {
                write!(f, "file size {actual} bytes exceeds limit {max}")
            }
            Self::OutputSize { actual, max } => {
                write!(f, "output size {actual} bytes exceeds limit {max}")
            }
        }
    }
}

impl core::error::Error for LimitExceeded {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::ImageDimension;
    use crate::pixel::PixelFormat;

    #[test]
    fn default_has_no_limits() {
        let limits = ResourceLimits::none();
        assert!(!limits.has_any());
        assert!(limits.check_dimensions(u32::MAX, u32::MAX).is_ok());
        assert!(limits.check_memory(u64::MAX).is_ok());
    }

    #[test]
    fn builder_sets_limits() {
        let limits = ResourceLimits::none()
            .with_max_width(16_384)
            .with_max_depth_or_layers(2048);
        assert!(limits.has_any());
        assert_eq!(limits.max_width, Some(16_384));
        assert_eq!(limits.max_depth_or_layers, Some(2048));
        assert!(limits.max_memory_bytes.is_none());
    }

    #[test]
    fn base_extent_bounds() {
        let limits = ResourceLimits::none().with_max_width(4096).with_max_height(2048);
        assert!(limits.check_dimensions(4096, 2048).is_ok());
        assert_eq!(
            limits.check_dimensions(4097, 1),
            Err(LimitExceeded::Width {
                actual: 4097,
                max: 4096
            })
        );
        assert_eq!(
            limits.check_dimensions(1, 2049),
            Err(LimitExceeded::Height {
                actual: 2049,
                max: 2048
            })
        );
    }

    #[test]
    fn pixel_count_uses_the_base_level() {
        // 4096x4096 is 16 Mi pixels
        let limits = ResourceLimits::none().with_max_pixels(1 << 24);
        assert!(limits.check_dimensions(4096, 4096).is_ok());
        assert_eq!(
            limits.check_dimensions(4096, 4097),
            Err(LimitExceeded::Pixels {
                actual: 4096 * 4097,
                max: 1 << 24
            })
        );
    }

    #[test]
    fn check_desc_counts_stored_layers() {
        let limits = ResourceLimits::none().with_max_depth_or_layers(6);
        let mut desc = ImageDesc {
            dimension: ImageDimension::Cube,
            format: PixelFormat::RGBA8Unorm,
            width: 4,
            height: 4,
            depth_or_array_layers: 6,
            mip_level_count: 1,
        };
        assert!(limits.check_desc(&desc).is_ok());
        desc.depth_or_array_layers = 12;
        assert_eq!(
            limits.check_desc(&desc),
            Err(LimitExceeded::DepthOrLayers { actual: 12, max: 6 })
        );
    }

    #[test]
    fn memory_file_and_output() {
        let limits = ResourceLimits::none()
            .with_max_memory(100)
            .with_max_file_size(10)
            .with_max_output(20);
        assert!(limits.check_memory(100).is_ok());
        assert!(limits.check_memory(101).is_err());
        assert!(limits.check_file_size(11).is_err());
        assert_eq!(
            limits.check_output_size(21),
            Err(LimitExceeded::OutputSize {
                actual: 21,
                max: 20
            })
        );
    }

    #[test]
    fn display_messages() {
        let err = LimitExceeded::Memory {
            actual: 2048,
            max: 1024,
        };
        assert_eq!(err.to_string(), "memory 2048 bytes exceeds limit 1024");
        let err = LimitExceeded::DepthOrLayers { actual: 7, max: 6 };
        assert_eq!(err.to_string(), "depth or layer count 7 exceeds limit 6");
    }
}
