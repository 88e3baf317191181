//! Surface pitches, mip counts, and the array/mip layout walker.
//!
//! Every image lives in one contiguous buffer. [`layout_image`] enumerates
//! each (array layer or depth slice, mip level) region in storage order and
//! records its pitches and byte offset. Regions are packed with no padding,
//! so the slice pitches always sum to the buffer size.

use crate::error::ImageError;
use crate::pixel::{BLOCK_DIM, PixelFormat};

/// Dimension kind of an image.
///
/// For `D1`, `D2` and `Cube`, `depth_or_array_layers` counts array layers
/// (a cube stores six layers per cube). For `D3` it is a depth extent that
/// halves with each mip level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ImageDimension {
    D1,
    #[default]
    D2,
    D3,
    Cube,
}

impl ImageDimension {
    /// Whether `depth_or_array_layers` is a depth extent rather than a layer count.
    pub const fn is_volume(self) -> bool {
        matches!(self, Self::D3)
    }
}

/// Shape of an image: dimension, format, base extents and mip count.
///
/// A `mip_level_count` of 0 requests the full chain; [`ImageDesc::resolve`]
/// replaces it with the derived count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageDesc {
    pub dimension: ImageDimension,
    pub format: PixelFormat,
    pub width: u32,
    pub height: u32,
    pub depth_or_array_layers: u32,
    pub mip_level_count: u32,
}

impl ImageDesc {
    /// Single-layer 2D descriptor with a full mip chain requested.
    pub const fn new_2d(format: PixelFormat, width: u32, height: u32) -> Self {
        Self {
            dimension: ImageDimension::D2,
            format,
            width,
            height,
            depth_or_array_layers: 1,
            mip_level_count: 0,
        }
    }

    /// Set the dimension kind.
    pub const fn with_dimension(mut self, dimension: ImageDimension) -> Self {
        self.dimension = dimension;
        self
    }

    /// Set the depth (3D) or stored array-layer count.
    pub const fn with_depth_or_array_layers(mut self, count: u32) -> Self {
        self.depth_or_array_layers = count;
        self
    }

    /// Set the requested mip count (0 = full chain).
    pub const fn with_mip_level_count(mut self, count: u32) -> Self {
        self.mip_level_count = count;
        self
    }

    /// Validate format and extents, and resolve the mip count.
    pub fn resolve(mut self) -> Result<Self, ImageError> {
        if self.format == PixelFormat::Undefined {
            return Err(ImageError::InvalidFormat {
                format: self.format,
                reason: "format is undefined",
            });
        }
        if self.width == 0 || self.height == 0 || self.depth_or_array_layers == 0 {
            return Err(ImageError::InvalidExtents {
                width: self.width,
                height: self.height,
                depth_or_array_layers: self.depth_or_array_layers,
            });
        }
        // cube layers are whole sets of six faces
        if self.dimension == ImageDimension::Cube && self.depth_or_array_layers % 6 != 0 {
            return Err(ImageError::InvalidExtents {
                width: self.width,
                height: self.height,
                depth_or_array_layers: self.depth_or_array_layers,
            });
        }
        self.mip_level_count = resolve_mip_level_count(
            self.width,
            self.height,
            self.mip_depth(),
            self.mip_level_count,
        )?;
        Ok(self)
    }

    /// Depth term that participates in mip derivation (1 unless 3D).
    fn mip_depth(&self) -> u32 {
        if self.dimension.is_volume() {
            self.depth_or_array_layers
        } else {
            1
        }
    }

    /// Number of array layers (1 for 3D).
    pub fn array_layers(&self) -> u32 {
        if self.dimension.is_volume() {
            1
        } else {
            self.depth_or_array_layers
        }
    }

    /// Depth of mip level `mip` (1 unless 3D).
    pub fn depth_at(&self, mip: u32) -> u32 {
        if self.dimension.is_volume() {
            mip_extent(self.depth_or_array_layers, mip)
        } else {
            1
        }
    }

    /// Total number of level regions for a resolved descriptor.
    pub fn level_count(&self) -> Option<usize> {
        if self.dimension.is_volume() {
            let mut count = 0usize;
            for mip in 0..self.mip_level_count {
                count = count.checked_add(self.depth_at(mip) as usize)?;
            }
            Some(count)
        } else {
            (self.depth_or_array_layers as usize).checked_mul(self.mip_level_count as usize)
        }
    }

    /// Index of the region for (`mip`, `layer_or_slice`) in storage order.
    ///
    /// For 3D images `layer_or_slice` is the depth slice within that mip.
    pub fn level_index(&self, mip: u32, layer_or_slice: u32) -> Option<usize> {
        if mip >= self.mip_level_count {
            return None;
        }
        if self.dimension.is_volume() {
            if layer_or_slice >= self.depth_at(mip) {
                return None;
            }
            let earlier: usize = (0..mip).map(|m| self.depth_at(m) as usize).sum();
            Some(earlier + layer_or_slice as usize)
        } else {
            if layer_or_slice >= self.depth_or_array_layers {
                return None;
            }
            Some(layer_or_slice as usize * self.mip_level_count as usize + mip as usize)
        }
    }
}

/// Extent of mip level `mip` for a base extent: halved per level, min 1.
pub fn mip_extent(base: u32, mip: u32) -> u32 {
    base.checked_shr(mip).unwrap_or(0).max(1)
}

// ---------------------------------------------------------------------------
// Surface pitch
// ---------------------------------------------------------------------------

/// Pitches of one 2D surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceInfo {
    /// Bytes per row of pixels, or per row of 4x4 blocks.
    pub row_pitch: usize,
    /// Bytes for the whole surface.
    pub slice_pitch: usize,
    /// Pixel rows, or block rows for compressed formats.
    pub row_count: u32,
}

/// Compute row and slice pitch for a `width` x `height` surface.
///
/// Returns `None` for `Undefined`, a zero extent, or if a pitch overflows.
pub fn surface_info(format: PixelFormat, width: u32, height: u32) -> Option<SurfaceInfo> {
    if width == 0 || height == 0 {
        return None;
    }
    let (row_pitch, row_count) = if let Some(block_bytes) = format.bytes_per_block() {
        let blocks_wide = width.div_ceil(BLOCK_DIM).max(1) as u64;
        let blocks_high = height.div_ceil(BLOCK_DIM).max(1);
        (blocks_wide * block_bytes as u64, blocks_high)
    } else {
        let bpp = format.bits_per_pixel();
        if bpp == 0 {
            return None;
        }
        ((width as u64 * bpp as u64).div_ceil(8), height)
    };
    let slice_pitch = row_pitch.checked_mul(row_count as u64)?;
    Some(SurfaceInfo {
        row_pitch: usize::try_from(row_pitch).ok()?,
        slice_pitch: usize::try_from(slice_pitch).ok()?,
        row_count,
    })
}

// ---------------------------------------------------------------------------
// Mip count
// ---------------------------------------------------------------------------

/// Number of mip levels in the full chain of a 2D surface, base included.
pub fn count_mips(width: u32, height: u32) -> u32 {
    count_mips_3d(width, height, 1)
}

/// Number of mip levels in the full chain of a volume, base included.
///
/// Equal to `1 + floor(log2(max(width, height, depth)))`.
pub fn count_mips_3d(width: u32, height: u32, depth: u32) -> u32 {
    let largest = width.max(height).max(depth).max(1);
    u32::BITS - largest.leading_zeros()
}

/// Resolve a requested mip count against the base extents.
///
/// 0 selects the full chain. Anything above the full chain is an error.
pub fn resolve_mip_level_count(
    width: u32,
    height: u32,
    depth: u32,
    requested: u32,
) -> Result<u32, ImageError> {
    let max = count_mips_3d(width, height, depth);
    match requested {
        0 => Ok(max),
        1 => Ok(1),
        n if n > max => Err(ImageError::MipLevelOverflow { requested: n, max }),
        n => Ok(n),
    }
}

// ---------------------------------------------------------------------------
// Layout walker
// ---------------------------------------------------------------------------

/// One (layer or depth slice, mip) region inside an image buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageLevel {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub row_pitch: usize,
    pub slice_pitch: usize,
    /// Byte offset of the region in the owning buffer.
    pub offset: usize,
}

impl ImageLevel {
    /// Byte range of this region in the owning buffer.
    pub fn range(&self) -> core::ops::Range<usize> {
        self.offset..self.offset + self.slice_pitch
    }

    /// Number of pixel rows, or block rows for compressed formats.
    pub fn row_count(&self) -> u32 {
        if self.format.is_block_compressed() {
            self.height.div_ceil(BLOCK_DIM).max(1)
        } else {
            self.height
        }
    }
}

/// Result of [`layout_image`]: the resolved descriptor, every region, and
/// the exact buffer size they cover.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageLayout {
    pub desc: ImageDesc,
    pub levels: Vec<ImageLevel>,
    pub total_size: usize,
}

/// Enumerate every region of `desc` in storage order.
///
/// 1D, 2D and cube images are laid out layer-major: all mips of layer 0,
/// then all mips of layer 1. Volumes are mip-major: every depth slice of
/// mip 0, then every slice of mip 1 at half the depth.
pub fn layout_image(desc: &ImageDesc) -> Result<ImageLayout, ImageError> {
    let desc = desc.resolve()?;
    let count = desc.level_count().ok_or(ImageError::Layout {
        reason: "level count overflows",
    })?;

    let mut levels = Vec::new();
    levels
        .try_reserve_exact(count)
        .map_err(|_| ImageError::Allocation {
            size: count.saturating_mul(core::mem::size_of::<ImageLevel>()),
        })?;

    let mut offset = 0usize;
    let mut push = |mip: u32, levels: &mut Vec<ImageLevel>| -> Result<(), ImageError> {
        let width = mip_extent(desc.width, mip);
        let height = mip_extent(desc.height, mip);
        let surface = surface_info(desc.format, width, height).ok_or(ImageError::Layout {
            reason: "surface pitch could not be computed",
        })?;
        levels.push(ImageLevel {
            width,
            height,
            format: desc.format,
            row_pitch: surface.row_pitch,
            slice_pitch: surface.slice_pitch,
            offset,
        });
        offset = offset
            .checked_add(surface.slice_pitch)
            .ok_or(ImageError::Layout {
                reason: "image size overflows",
            })?;
        Ok(())
    };

    if desc.dimension.is_volume() {
        for mip in 0..desc.mip_level_count {
            for _slice in 0..desc.depth_at(mip) {
                push(mip, &mut levels)?;
            }
        }
    } else {
        for _layer in 0..desc.depth_or_array_layers {
            for mip in 0..desc.mip_level_count {
                push(mip, &mut levels)?;
            }
        }
    }

    let total_size = offset;
    log::trace!(
        "laid out {:?} {} {}x{}x{}: {} mips, {} regions, {} bytes",
        desc.dimension,
        desc.format,
        desc.width,
        desc.height,
        desc.depth_or_array_layers,
        desc.mip_level_count,
        levels.len(),
        total_size
    );
    Ok(ImageLayout {
        desc,
        levels,
        total_size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bc1_surface_pitch() {
        let s = surface_info(PixelFormat::BC1RGBAUnorm, 10, 10).unwrap();
        assert_eq!(s.row_pitch, 24);
        assert_eq!(s.slice_pitch, 72);
        assert_eq!(s.row_count, 3);
    }

    #[test]
    fn bc_surface_below_one_block() {
        let s = surface_info(PixelFormat::BC7RGBAUnorm, 1, 1).unwrap();
        assert_eq!(s.row_pitch, 16);
        assert_eq!(s.slice_pitch, 16);
        assert_eq!(s.row_count, 1);
    }

    #[test]
    fn rgba8_surface_pitch() {
        let s = surface_info(PixelFormat::RGBA8Unorm, 5, 3).unwrap();
        assert_eq!(s.row_pitch, 20);
        assert_eq!(s.slice_pitch, 60);
        assert_eq!(s.row_count, 3);
    }

    #[test]
    fn surface_rejects_undefined_and_zero() {
        assert!(surface_info(PixelFormat::Undefined, 4, 4).is_none());
        assert!(surface_info(PixelFormat::R8Unorm, 0, 4).is_none());
        assert!(surface_info(PixelFormat::R8Unorm, 4, 0).is_none());
    }

    #[test]
    fn surface_overflow_is_none() {
        assert!(surface_info(PixelFormat::RGBA32Float, u32::MAX, u32::MAX).is_none());
    }

    #[test]
    fn mip_counts() {
        assert_eq!(count_mips(1, 1), 1);
        assert_eq!(count_mips(256, 1), 9);
        assert_eq!(count_mips(300, 200), 9);
        assert_eq!(count_mips(u32::MAX, 1), 32);
        assert_eq!(count_mips_3d(4, 4, 16), 5);
    }

    #[test]
    fn mip_count_resolution() {
        assert_eq!(resolve_mip_level_count(256, 256, 1, 0).unwrap(), 9);
        assert_eq!(resolve_mip_level_count(256, 256, 1, 1).unwrap(), 1);
        assert_eq!(resolve_mip_level_count(256, 256, 1, 4).unwrap(), 4);
        assert!(matches!(
            resolve_mip_level_count(4, 4, 1, 4),
            Err(ImageError::MipLevelOverflow {
                requested: 4,
                max: 3
            })
        ));
    }

    #[test]
    fn layer_major_order() {
        let desc = ImageDesc::new_2d(PixelFormat::RGBA8Unorm, 4, 4).with_depth_or_array_layers(2);
        let layout = layout_image(&desc).unwrap();
        assert_eq!(layout.desc.mip_level_count, 3);
        let widths: Vec<u32> = layout.levels.iter().map(|l| l.width).collect();
        assert_eq!(widths, [4, 2, 1, 4, 2, 1]);
        // 64 + 16 + 4 per layer
        assert_eq!(layout.total_size, 168);
        assert_eq!(layout.levels[3].offset, 84);
    }

    #[test]
    fn volume_groups_by_mip() {
        let desc = ImageDesc::new_2d(PixelFormat::R8Unorm, 4, 4)
            .with_dimension(ImageDimension::D3)
            .with_depth_or_array_layers(4)
            .with_mip_level_count(3);
        let layout = layout_image(&desc).unwrap();
        let widths: Vec<u32> = layout.levels.iter().map(|l| l.width).collect();
        assert_eq!(widths, [4, 4, 4, 4, 2, 2, 1]);
        assert_eq!(layout.desc.depth_at(0), 4);
        assert_eq!(layout.desc.depth_at(1), 2);
        assert_eq!(layout.desc.depth_at(2), 1);
        assert_eq!(layout.total_size, 4 * 16 + 2 * 4 + 1);
    }

    #[test]
    fn volume_mip_count_includes_depth() {
        let desc = ImageDesc::new_2d(PixelFormat::R8Unorm, 2, 2)
            .with_dimension(ImageDimension::D3)
            .with_depth_or_array_layers(8);
        let layout = layout_image(&desc).unwrap();
        assert_eq!(layout.desc.mip_level_count, 4);
        assert_eq!(layout.levels.len(), 8 + 4 + 2 + 1);
    }

    #[test]
    fn slice_pitches_sum_to_total() {
        let descs = [
            ImageDesc::new_2d(PixelFormat::BC1RGBAUnorm, 10, 10).with_depth_or_array_layers(3),
            ImageDesc::new_2d(PixelFormat::RGBA16Float, 17, 5),
            ImageDesc::new_2d(PixelFormat::R8Unorm, 7, 9)
                .with_dimension(ImageDimension::D3)
                .with_depth_or_array_layers(5),
            ImageDesc::new_2d(PixelFormat::BC7RGBAUnormSrgb, 64, 64)
                .with_dimension(ImageDimension::Cube)
                .with_depth_or_array_layers(6),
        ];
        for desc in descs {
            let layout = layout_image(&desc).unwrap();
            let sum: usize = layout.levels.iter().map(|l| l.slice_pitch).sum();
            assert_eq!(sum, layout.total_size, "{desc:?}");
            let mut prev = 0;
            for level in &layout.levels {
                assert!(level.offset >= prev);
                assert!(level.range().end <= layout.total_size);
                prev = level.offset;
            }
        }
    }

    #[test]
    fn level_index_matches_storage_order() {
        let desc = ImageDesc::new_2d(PixelFormat::R8Unorm, 8, 8)
            .with_depth_or_array_layers(3)
            .resolve()
            .unwrap();
        assert_eq!(desc.level_index(0, 0), Some(0));
        assert_eq!(desc.level_index(2, 1), Some(4 + 2));
        assert_eq!(desc.level_index(4, 0), None);
        assert_eq!(desc.level_index(0, 3), None);

        let volume = ImageDesc::new_2d(PixelFormat::R8Unorm, 4, 4)
            .with_dimension(ImageDimension::D3)
            .with_depth_or_array_layers(4)
            .resolve()
            .unwrap();
        assert_eq!(volume.level_index(1, 1), Some(5));
        assert_eq!(volume.level_index(2, 0), Some(6));
        assert_eq!(volume.level_index(2, 1), None);
    }

    #[test]
    fn rejects_bad_descriptors() {
        let undefined = ImageDesc::new_2d(PixelFormat::Undefined, 4, 4);
        assert!(matches!(
            layout_image(&undefined),
            Err(ImageError::InvalidFormat { .. })
        ));
        let zero = ImageDesc::new_2d(PixelFormat::R8Unorm, 4, 0);
        assert!(matches!(
            layout_image(&zero),
            Err(ImageError::InvalidExtents { height: 0, .. })
        ));
        let no_layers = ImageDesc::new_2d(PixelFormat::R8Unorm, 4, 4).with_depth_or_array_layers(0);
        assert!(layout_image(&no_layers).is_err());
    }

    #[test]
    fn cube_needs_whole_face_sets() {
        let cube = |layers| {
            ImageDesc::new_2d(PixelFormat::RGBA8Unorm, 4, 4)
                .with_dimension(ImageDimension::Cube)
                .with_depth_or_array_layers(layers)
                .resolve()
        };
        assert!(matches!(
            cube(5),
            Err(ImageError::InvalidExtents {
                depth_or_array_layers: 5,
                ..
            })
        ));
        assert!(cube(7).is_err());
        assert_eq!(cube(12).unwrap().array_layers(), 12);
        assert!(crate::Image::new(&ImageDesc::new_2d(PixelFormat::R8Unorm, 2, 2)
            .with_dimension(ImageDimension::Cube)
            .with_depth_or_array_layers(5))
        .is_err());
    }
}
