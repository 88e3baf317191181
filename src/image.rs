//! The [`Image`] type and borrowed level views.

use imgref::{ImgRef, ImgVec};
use rgb::{FromSlice, Rgba};

use crate::context::ImageContext;
use crate::error::ImageError;
use crate::format::EncodeFormat;
use crate::layout::{ImageDesc, ImageDimension, ImageLayout, ImageLevel, mip_extent};
use crate::output::EncodeOutput;
use crate::pixel::PixelFormat;

/// A leveled image: one contiguous pixel buffer plus one [`ImageLevel`]
/// per (array layer or depth slice, mip level).
///
/// The buffer and the level array are owned together and dropped together.
/// Level views borrow from the image and never outlive it.
#[derive(Clone, PartialEq, Eq)]
pub struct Image {
    desc: ImageDesc,
    levels: Vec<ImageLevel>,
    pixels: Vec<u8>,
}

impl Image {
    pub(crate) fn from_layout(layout: ImageLayout, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(layout.total_size, pixels.len());
        Self {
            desc: layout.desc,
            levels: layout.levels,
            pixels,
        }
    }

    /// Create a zero-filled image under the default context.
    pub fn new(desc: &ImageDesc) -> Result<Self, ImageError> {
        ImageContext::default().create(desc)
    }

    /// Create a 1D image under the default context.
    pub fn new_1d(
        format: PixelFormat,
        width: u32,
        array_layers: u32,
        mip_level_count: u32,
    ) -> Result<Self, ImageError> {
        ImageContext::default().create_1d(format, width, array_layers, mip_level_count)
    }

    /// Create a 2D image under the default context.
    pub fn new_2d(
        format: PixelFormat,
        width: u32,
        height: u32,
        array_layers: u32,
        mip_level_count: u32,
    ) -> Result<Self, ImageError> {
        ImageContext::default().create_2d(format, width, height, array_layers, mip_level_count)
    }

    /// Create a 3D image under the default context.
    pub fn new_3d(
        format: PixelFormat,
        width: u32,
        height: u32,
        depth: u32,
        mip_level_count: u32,
    ) -> Result<Self, ImageError> {
        ImageContext::default().create_3d(format, width, height, depth, mip_level_count)
    }

    /// Create a cube map under the default context.
    pub fn new_cube(
        format: PixelFormat,
        width: u32,
        height: u32,
        cube_count: u32,
        mip_level_count: u32,
    ) -> Result<Self, ImageError> {
        ImageContext::default().create_cube(format, width, height, cube_count, mip_level_count)
    }

    /// Decode an encoded image with the standard decoder chain.
    pub fn from_memory(data: &[u8]) -> Option<Self> {
        ImageContext::default().decode(data)
    }

    /// Encode the top level (mip 0, layer 0).
    ///
    /// `quality` is clamped to 1..=100 and only affects JPEG.
    pub fn encode(&self, format: EncodeFormat, quality: u8) -> Result<EncodeOutput, ImageError> {
        crate::encode::encode(self, format, quality)
    }

    // --- accessors ---

    /// The resolved descriptor.
    pub fn desc(&self) -> &ImageDesc {
        &self.desc
    }

    pub fn dimension(&self) -> ImageDimension {
        self.desc.dimension
    }

    pub fn format(&self) -> PixelFormat {
        self.desc.format
    }

    /// Width of mip `level`, at least 1.
    pub fn width(&self, level: u32) -> u32 {
        mip_extent(self.desc.width, level)
    }

    /// Height of mip `level`, at least 1.
    pub fn height(&self, level: u32) -> u32 {
        mip_extent(self.desc.height, level)
    }

    /// Depth of mip `level`; 1 unless the image is 3D.
    pub fn depth(&self, level: u32) -> u32 {
        self.desc.depth_at(level)
    }

    /// Stored array layers (six per cube); 1 for 3D images.
    pub fn array_layers(&self) -> u32 {
        self.desc.array_layers()
    }

    pub fn mip_level_count(&self) -> u32 {
        self.desc.mip_level_count
    }

    /// Every region in storage order.
    pub fn levels(&self) -> &[ImageLevel] {
        &self.levels
    }

    /// Region for (`mip`, `layer_or_slice`), or `None` if out of range.
    ///
    /// For 3D images `layer_or_slice` is the depth slice within that mip.
    pub fn level(&self, mip: u32, layer_or_slice: u32) -> Option<LevelView<'_>> {
        let level = *self.levels.get(self.desc.level_index(mip, layer_or_slice)?)?;
        let data = self.pixels.get(level.range())?;
        Some(LevelView { level, data })
    }

    /// Mutable region for (`mip`, `layer_or_slice`).
    pub fn level_mut(&mut self, mip: u32, layer_or_slice: u32) -> Option<LevelViewMut<'_>> {
        let level = *self.levels.get(self.desc.level_index(mip, layer_or_slice)?)?;
        let data = self.pixels.get_mut(level.range())?;
        Some(LevelViewMut { level, data })
    }

    /// The whole pixel buffer.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Buffer size in bytes; equal to the sum of every region's slice pitch.
    pub fn size_in_bytes(&self) -> usize {
        self.pixels.len()
    }

    /// Take the pixel buffer, dropping the level array.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }
}

impl core::fmt::Debug for Image {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Image")
            .field("desc", &self.desc)
            .field("levels", &self.levels.len())
            .field("size_in_bytes", &self.pixels.len())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Level views
// ---------------------------------------------------------------------------

/// Borrowed view of one region.
#[derive(Clone, Copy)]
pub struct LevelView<'a> {
    level: ImageLevel,
    data: &'a [u8],
}

impl<'a> LevelView<'a> {
    /// Region metadata.
    pub fn level(&self) -> &ImageLevel {
        &self.level
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.level.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.level.height
    }

    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.level.format
    }

    #[inline]
    pub fn row_pitch(&self) -> usize {
        self.level.row_pitch
    }

    #[inline]
    pub fn slice_pitch(&self) -> usize {
        self.level.slice_pitch
    }

    /// Pixel rows, or block rows for compressed formats.
    #[inline]
    pub fn row_count(&self) -> u32 {
        self.level.row_count()
    }

    /// All bytes of the region.
    pub fn pixels(&self) -> &'a [u8] {
        self.data
    }

    /// Bytes of row `y` (a block row for compressed formats).
    ///
    /// # Panics
    ///
    /// Panics if `y >= row_count()`.
    pub fn row(&self, y: u32) -> &'a [u8] {
        assert!(
            y < self.row_count(),
            "row index {y} out of bounds (rows: {})",
            self.row_count()
        );
        let start = y as usize * self.level.row_pitch;
        &self.data[start..start + self.level.row_pitch]
    }

    /// Typed view of an RGBA8 (linear or sRGB) region.
    pub fn as_rgba8(&self) -> Option<ImgRef<'a, Rgba<u8>>> {
        if !matches!(
            self.level.format,
            PixelFormat::RGBA8Unorm | PixelFormat::RGBA8UnormSrgb
        ) {
            return None;
        }
        Some(ImgRef::new(
            self.data.as_rgba(),
            self.level.width as usize,
            self.level.height as usize,
        ))
    }

    /// Copy of an RGBA32Float region as typed pixels.
    pub fn to_rgba_f32(&self) -> Option<ImgVec<Rgba<f32>>> {
        if self.level.format != PixelFormat::RGBA32Float {
            return None;
        }
        let pixels = self
            .data
            .chunks_exact(16)
            .map(|px| {
                let [r, g, b, a] = bytemuck::pod_read_unaligned::<[f32; 4]>(px);
                Rgba { r, g, b, a }
            })
            .collect();
        Some(ImgVec::new(
            pixels,
            self.level.width as usize,
            self.level.height as usize,
        ))
    }
}

impl core::fmt::Debug for LevelView<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "LevelView({}x{}, {}, offset {})",
            self.level.width, self.level.height, self.level.format, self.level.offset
        )
    }
}

/// Mutable borrowed view of one region.
pub struct LevelViewMut<'a> {
    level: ImageLevel,
    data: &'a mut [u8],
}

impl LevelViewMut<'_> {
    /// Region metadata.
    pub fn level(&self) -> &ImageLevel {
        &self.level
    }

    pub fn pixels(&self) -> &[u8] {
        &*self.data
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut *self.data
    }

    /// Mutable bytes of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= row_count()`.
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let rows = self.level.row_count();
        assert!(y < rows, "row index {y} out of bounds (rows: {rows})");
        let start = y as usize * self.level.row_pitch;
        &mut self.data[start..start + self.level.row_pitch]
    }

    /// Copy `src` into the region; its length must equal the slice pitch.
    pub fn copy_from_slice(&mut self, src: &[u8]) -> Result<(), ImageError> {
        if src.len() != self.data.len() {
            return Err(ImageError::Layout {
                reason: "source does not match the region size",
            });
        }
        self.data.copy_from_slice(src);
        Ok(())
    }
}

impl core::fmt::Debug for LevelViewMut<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "LevelViewMut({}x{}, {}, offset {})",
            self.level.width, self.level.height, self.level.format, self.level.offset
        )
    }
}
