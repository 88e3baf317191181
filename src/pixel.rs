//! Pixel format table.
//!
//! Every [`PixelFormat`] maps to a fixed bit count per texel (uncompressed)
//! or a fixed byte count per 4x4 block (BC1-BC7). The lookups are total and
//! pure; [`PixelFormat::Undefined`] reports zero everywhere and must be
//! rejected by callers.

use core::fmt;

/// Texel storage format.
///
/// Names follow the WebGPU convention: channel order, bits per channel,
/// numeric interpretation. Discriminants are dense so that
/// [`PixelFormat::ALL`] can be checked for completeness.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PixelFormat {
    #[default]
    Undefined = 0,

    // 8-bit
    R8Unorm,
    R8Snorm,
    R8Uint,
    R8Sint,

    // 16-bit
    R16Unorm,
    R16Snorm,
    R16Uint,
    R16Sint,
    R16Float,
    RG8Unorm,
    RG8Snorm,
    RG8Uint,
    RG8Sint,

    // Packed 16-bit
    BGRA4Unorm,
    B5G6R5Unorm,
    BGR5A1Unorm,

    // 32-bit
    R32Uint,
    R32Sint,
    R32Float,
    RG16Unorm,
    RG16Snorm,
    RG16Uint,
    RG16Sint,
    RG16Float,
    RGBA8Unorm,
    RGBA8UnormSrgb,
    RGBA8Snorm,
    RGBA8Uint,
    RGBA8Sint,
    BGRA8Unorm,
    BGRA8UnormSrgb,

    // Packed 32-bit
    RGB10A2Unorm,
    RGB10A2Uint,
    RG11B10UFloat,
    RGB9E5UFloat,

    // 64-bit
    RG32Uint,
    RG32Sint,
    RG32Float,
    RGBA16Unorm,
    RGBA16Snorm,
    RGBA16Uint,
    RGBA16Sint,
    RGBA16Float,

    // 128-bit
    RGBA32Uint,
    RGBA32Sint,
    RGBA32Float,

    // Depth / stencil
    Depth16Unorm,
    Depth24UnormStencil8,
    Depth32Float,
    /// 32-bit float depth, 8-bit stencil, 24 bits of padding.
    Depth32FloatStencil8,

    // Block compressed (4x4 blocks)
    BC1RGBAUnorm,
    BC1RGBAUnormSrgb,
    BC2RGBAUnorm,
    BC2RGBAUnormSrgb,
    BC3RGBAUnorm,
    BC3RGBAUnormSrgb,
    BC4RUnorm,
    BC4RSnorm,
    BC5RGUnorm,
    BC5RGSnorm,
    BC6HRGBUfloat,
    BC6HRGBFloat,
    BC7RGBAUnorm,
    BC7RGBAUnormSrgb,
}

/// Edge length in texels of every block-compressed format in the table.
pub const BLOCK_DIM: u32 = 4;

impl PixelFormat {
    /// Every defined format, in discriminant order. Excludes
    /// [`Undefined`](PixelFormat::Undefined).
    pub const ALL: &'static [PixelFormat] = &[
        Self::R8Unorm,
        Self::R8Snorm,
        Self::R8Uint,
        Self::R8Sint,
        Self::R16Unorm,
        Self::R16Snorm,
        Self::R16Uint,
        Self::R16Sint,
        Self::R16Float,
        Self::RG8Unorm,
        Self::RG8Snorm,
        Self::RG8Uint,
        Self::RG8Sint,
        Self::BGRA4Unorm,
        Self::B5G6R5Unorm,
        Self::BGR5A1Unorm,
        Self::R32Uint,
        Self::R32Sint,
        Self::R32Float,
        Self::RG16Unorm,
        Self::RG16Snorm,
        Self::RG16Uint,
        Self::RG16Sint,
        Self::RG16Float,
        Self::RGBA8Unorm,
        Self::RGBA8UnormSrgb,
        Self::RGBA8Snorm,
        Self::RGBA8Uint,
        Self::RGBA8Sint,
        Self::BGRA8Unorm,
        Self::BGRA8UnormSrgb,
        Self::RGB10A2Unorm,
        Self::RGB10A2Uint,
        Self::RG11B10UFloat,
        Self::RGB9E5UFloat,
        Self::RG32Uint,
        Self::RG32Sint,
        Self::RG32Float,
        Self::RGBA16Unorm,
        Self::RGBA16Snorm,
        Self::RGBA16Uint,
        Self::RGBA16Sint,
        Self::RGBA16Float,
        Self::RGBA32Uint,
        Self::RGBA32Sint,
        Self::RGBA32Float,
        Self::Depth16Unorm,
        Self::Depth24UnormStencil8,
        Self::Depth32Float,
        Self::Depth32FloatStencil8,
        Self::BC1RGBAUnorm,
        Self::BC1RGBAUnormSrgb,
        Self::BC2RGBAUnorm,
        Self::BC2RGBAUnormSrgb,
        Self::BC3RGBAUnorm,
        Self::BC3RGBAUnormSrgb,
        Self::BC4RUnorm,
        Self::BC4RSnorm,
        Self::BC5RGUnorm,
        Self::BC5RGSnorm,
        Self::BC6HRGBUfloat,
        Self::BC6HRGBFloat,
        Self::BC7RGBAUnorm,
        Self::BC7RGBAUnormSrgb,
    ];

    /// Bits per texel.
    ///
    /// Block-compressed formats report the average over a 4x4 block
    /// (4 for BC1/BC4, 8 for the rest). Returns 0 for `Undefined`.
    pub const fn bits_per_pixel(self) -> u32 {
        match self {
            Self::RGBA32Uint | Self::RGBA32Sint | Self::RGBA32Float => 128,

            Self::RG32Uint
            | Self::RG32Sint
            | Self::RG32Float
            | Self::RGBA16Unorm
            | Self::RGBA16Snorm
            | Self::RGBA16Uint
            | Self::RGBA16Sint
            | Self::RGBA16Float
            | Self::Depth32FloatStencil8 => 64,

            Self::R32Uint
            | Self::R32Sint
            | Self::R32Float
            | Self::RG16Unorm
            | Self::RG16Snorm
            | Self::RG16Uint
            | Self::RG16Sint
            | Self::RG16Float
            | Self::RGBA8Unorm
            | Self::RGBA8UnormSrgb
            | Self::RGBA8Snorm
            | Self::RGBA8Uint
            | Self::RGBA8Sint
            | Self::BGRA8Unorm
            | Self::BGRA8UnormSrgb
            | Self::RGB10A2Unorm
            | Self::RGB10A2Uint
            | Self::RG11B10UFloat
            | Self::RGB9E5UFloat
            | Self::Depth24UnormStencil8
            | Self::Depth32Float => 32,

            Self::R16Unorm
            | Self::R16Snorm
            | Self::R16Uint
            | Self::R16Sint
            | Self::R16Float
            | Self::RG8Unorm
            | Self::RG8Snorm
            | Self::RG8Uint
            | Self::RG8Sint
            | Self::BGRA4Unorm
            | Self::B5G6R5Unorm
            | Self::BGR5A1Unorm
            | Self::Depth16Unorm => 16,

            Self::R8Unorm
            | Self::R8Snorm
            | Self::R8Uint
            | Self::R8Sint
            | Self::BC2RGBAUnorm
            | Self::BC2RGBAUnormSrgb
            | Self::BC3RGBAUnorm
            | Self::BC3RGBAUnormSrgb
            | Self::BC5RGUnorm
            | Self::BC5RGSnorm
            | Self::BC6HRGBUfloat
            | Self::BC6HRGBFloat
            | Self::BC7RGBAUnorm
            | Self::BC7RGBAUnormSrgb => 8,

            Self::BC1RGBAUnorm | Self::BC1RGBAUnormSrgb | Self::BC4RUnorm | Self::BC4RSnorm => 4,

            Self::Undefined => 0,
        }
    }

    /// Bytes per 4x4 block for BC formats, `None` for everything else.
    pub const fn bytes_per_block(self) -> Option<u32> {
        match self {
            Self::BC1RGBAUnorm | Self::BC1RGBAUnormSrgb | Self::BC4RUnorm | Self::BC4RSnorm => {
                Some(8)
            }
            Self::BC2RGBAUnorm
            | Self::BC2RGBAUnormSrgb
            | Self::BC3RGBAUnorm
            | Self::BC3RGBAUnormSrgb
            | Self::BC5RGUnorm
            | Self::BC5RGSnorm
            | Self::BC6HRGBUfloat
            | Self::BC6HRGBFloat
            | Self::BC7RGBAUnorm
            | Self::BC7RGBAUnormSrgb => Some(16),
            _ => None,
        }
    }

    /// Whether texels are stored in compressed 4x4 blocks.
    #[inline]
    pub const fn is_block_compressed(self) -> bool {
        self.bytes_per_block().is_some()
    }

    /// Block edge length in texels (4 for BC formats, 1 otherwise).
    #[inline]
    pub const fn block_size(self) -> u32 {
        if self.is_block_compressed() { BLOCK_DIM } else { 1 }
    }

    /// Whether the color channels are sRGB encoded.
    pub const fn is_srgb(self) -> bool {
        matches!(
            self,
            Self::RGBA8UnormSrgb
                | Self::BGRA8UnormSrgb
                | Self::BC1RGBAUnormSrgb
                | Self::BC2RGBAUnormSrgb
                | Self::BC3RGBAUnormSrgb
                | Self::BC7RGBAUnormSrgb
        )
    }

    /// Whether this is a depth and/or stencil format.
    pub const fn is_depth_stencil(self) -> bool {
        matches!(
            self,
            Self::Depth16Unorm
                | Self::Depth24UnormStencil8
                | Self::Depth32Float
                | Self::Depth32FloatStencil8
        )
    }

    /// Number of stored channels (0 for `Undefined`).
    pub const fn channel_count(self) -> u8 {
        match self {
            Self::Undefined => 0,
            Self::R8Unorm
            | Self::R8Snorm
            | Self::R8Uint
            | Self::R8Sint
            | Self::R16Unorm
            | Self::R16Snorm
            | Self::R16Uint
            | Self::R16Sint
            | Self::R16Float
            | Self::R32Uint
            | Self::R32Sint
            | Self::R32Float
            | Self::Depth16Unorm
            | Self::Depth32Float
            | Self::BC4RUnorm
            | Self::BC4RSnorm => 1,
            Self::RG8Unorm
            | Self::RG8Snorm
            | Self::RG8Uint
            | Self::RG8Sint
            | Self::RG16Unorm
            | Self::RG16Snorm
            | Self::RG16Uint
            | Self::RG16Sint
            | Self::RG16Float
            | Self::RG32Uint
            | Self::RG32Sint
            | Self::RG32Float
            | Self::Depth24UnormStencil8
            | Self::Depth32FloatStencil8
            | Self::BC5RGUnorm
            | Self::BC5RGSnorm => 2,
            Self::B5G6R5Unorm
            | Self::RG11B10UFloat
            | Self::RGB9E5UFloat
            | Self::BC6HRGBUfloat
            | Self::BC6HRGBFloat => 3,
            _ => 4,
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
