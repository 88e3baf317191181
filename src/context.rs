//! Allocation context for image construction, decode and encode.
//!
//! An [`ImageContext`] bundles the pixel allocator and the resource limits
//! every image operation runs under. There is no global state: callers pass
//! a context explicitly, or use the `Image::new_*` shortcuts, which run
//! under `ImageContext::default()`.

use std::sync::Arc;

use crate::codecs::DecoderRegistry;
use crate::error::ImageError;
use crate::format::EncodeFormat;
use crate::image::Image;
use crate::layout::{ImageDesc, ImageDimension, layout_image};
use crate::limits::ResourceLimits;
use crate::output::EncodeOutput;
use crate::pixel::PixelFormat;

/// Source of pixel buffers.
///
/// `allocate` must return a zero-filled vector of exactly `size` bytes, or
/// `None` if the memory is not available. A buffer of any other length is
/// treated as an allocation failure.
pub trait PixelAllocator: Send + Sync {
    fn allocate(&self, size: usize) -> Option<Vec<u8>>;
}

/// Allocator backed by the global heap, failing instead of aborting.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemAllocator;

impl PixelAllocator for SystemAllocator {
    fn allocate(&self, size: usize) -> Option<Vec<u8>> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(size).ok()?;
        buf.resize(size, 0);
        Some(buf)
    }
}

/// Allocator and limits for a family of image operations.
///
/// Cloning is cheap; clones share the allocator.
#[derive(Clone)]
pub struct ImageContext {
    allocator: Arc<dyn PixelAllocator>,
    limits: ResourceLimits,
}

impl Default for ImageContext {
    fn default() -> Self {
        Self {
            allocator: Arc::new(SystemAllocator),
            limits: ResourceLimits::none(),
        }
    }
}

impl core::fmt::Debug for ImageContext {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ImageContext")
            .field("limits", &self.limits)
            .finish_non_exhaustive()
    }
}

impl ImageContext {
    /// Context with the system allocator and no limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the pixel allocator.
    pub fn with_allocator(mut self, allocator: impl PixelAllocator + 'static) -> Self {
        self.allocator = Arc::new(allocator);
        self
    }

    /// Replace the resource limits.
    pub fn with_limits(mut self, limits: ResourceLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Resource limits applied by this context.
    pub fn limits(&self) -> &ResourceLimits {
        &self.limits
    }

    // --- construction ---

    /// Create a zero-filled image for `desc`.
    ///
    /// Validates the format and extents, resolves the mip count, checks the
    /// limits, lays out every region, and allocates one buffer covering them.
    pub fn create(&self, desc: &ImageDesc) -> Result<Image, ImageError> {
        let desc = desc.resolve()?;
        self.limits.check_desc(&desc)?;
        let layout = layout_image(&desc)?;
        self.limits.check_memory(layout.total_size as u64)?;

        let size = layout.total_size;
        let pixels = self
            .allocator
            .allocate(size)
            .filter(|buf| buf.len() == size)
            .ok_or(ImageError::Allocation { size })?;
        Ok(Image::from_layout(layout, pixels))
    }

    /// Create a 1D image (`height` is 1).
    pub fn create_1d(
        &self,
        format: PixelFormat,
        width: u32,
        array_layers: u32,
        mip_level_count: u32,
    ) -> Result<Image, ImageError> {
        self.create(&ImageDesc {
            dimension: ImageDimension::D1,
            format,
            width,
            height: 1,
            depth_or_array_layers: array_layers,
            mip_level_count,
        })
    }

    /// Create a 2D image or 2D array.
    pub fn create_2d(
        &self,
        format: PixelFormat,
        width: u32,
        height: u32,
        array_layers: u32,
        mip_level_count: u32,
    ) -> Result<Image, ImageError> {
        self.create(&ImageDesc {
            dimension: ImageDimension::D2,
            format,
            width,
            height,
            depth_or_array_layers: array_layers,
            mip_level_count,
        })
    }

    /// Create a 3D image; the mip chain shrinks the depth too.
    pub fn create_3d(
        &self,
        format: PixelFormat,
        width: u32,
        height: u32,
        depth: u32,
        mip_level_count: u32,
    ) -> Result<Image, ImageError> {
        self.create(&ImageDesc {
            dimension: ImageDimension::D3,
            format,
            width,
            height,
            depth_or_array_layers: depth,
            mip_level_count,
        })
    }

    /// Create a cube map or cube array with `6 * cube_count` layers.
    pub fn create_cube(
        &self,
        format: PixelFormat,
        width: u32,
        height: u32,
        cube_count: u32,
        mip_level_count: u32,
    ) -> Result<Image, ImageError> {
        let layers = cube_count.checked_mul(6).ok_or(ImageError::InvalidExtents {
            width,
            height,
            depth_or_array_layers: cube_count,
        })?;
        self.create(&ImageDesc {
            dimension: ImageDimension::Cube,
            format,
            width,
            height,
            depth_or_array_layers: layers,
            mip_level_count,
        })
    }

    /// Create a single-level 2D image holding a copy of `data`.
    ///
    /// `data` must be exactly the size of the surface.
    pub fn create_from_pixels(
        &self,
        format: PixelFormat,
        width: u32,
        height: u32,
        data: &[u8],
    ) -> Result<Image, ImageError> {
        let mut image = self.create_2d(format, width, height, 1, 1)?;
        let dst = image.pixels_mut();
        if dst.len() != data.len() {
            return Err(ImageError::Layout {
                reason: "pixel data does not match the surface size",
            });
        }
        dst.copy_from_slice(data);
        Ok(image)
    }

    // --- codecs ---

    /// Decode `data` with the standard decoder chain.
    ///
    /// Returns `None` if no decoder recognized and decoded the bytes.
    pub fn decode(&self, data: &[u8]) -> Option<Image> {
        DecoderRegistry::standard().decode(self, data)
    }

    /// Decode `data`, returning the last decoder error on failure.
    pub fn try_decode(&self, data: &[u8]) -> Result<Image, ImageError> {
        DecoderRegistry::standard().try_decode(self, data)
    }

    /// Encode the top level of `image` and check the output size limit.
    pub fn encode(
        &self,
        image: &Image,
        format: EncodeFormat,
        quality: u8,
    ) -> Result<EncodeOutput, ImageError> {
        let output = crate::encode::encode(image, format, quality)?;
        self.limits.check_output_size(output.len() as u64)?;
        Ok(output)
    }
}
