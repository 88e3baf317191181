//! Mip/array pixel-buffer layout for GPU-style textures, with container
//! decode and raster encode dispatch.
//!
//! The core of the crate is pure arithmetic over a pixel format table:
//!
//! - [`PixelFormat`]: bits per pixel, block compression and sRGB flags
//! - [`surface_info`]: row pitch, slice pitch and row count of one surface
//! - [`count_mips`] / [`count_mips_3d`]: full mip chain length
//! - [`layout_image`]: walks array layers (or depth slices) and mips into a
//!   flat list of [`ImageLevel`] regions over one tightly packed buffer
//!
//! [`Image`] owns that buffer. Images are built through an [`ImageContext`],
//! which carries the [`PixelAllocator`] and [`ResourceLimits`] for every
//! image it creates, including decoded ones.
//!
//! Decoding runs an ordered [`DecoderRegistry`]: DDS, ASTC, KTX2, HDR/EXR,
//! QOI, then a generic PNG/JPEG/BMP/GIF/TGA decoder. Encoding writes the top
//! level of an image as BMP, PNG, JPEG, TGA or Radiance HDR.
//!
//! ```
//! use zentexture::{ImageContext, PixelFormat};
//!
//! let ctx = ImageContext::new();
//! let image = ctx.create_2d(PixelFormat::RGBA8Unorm, 256, 128, 1, 0).unwrap();
//! assert_eq!(image.mip_level_count(), 9);
//! assert_eq!(image.level(1, 0).unwrap().width(), 128);
//! ```

#![forbid(unsafe_code)]

mod codecs;
mod context;
mod encode;
mod error;
mod format;
mod image;
mod layout;
mod limits;
mod output;
mod pixel;
mod sink;
mod traits;

pub use codecs::{
    AstcDecoder, DdsDecoder, DecoderRegistry, GenericDecoder, HdrDecoder, KtxDecoder, QoiDecoder,
};
pub use context::{ImageContext, PixelAllocator, SystemAllocator};
pub use error::ImageError;
pub use format::{EncodeFormat, FileFormat};
pub use crate::image::{Image, LevelView, LevelViewMut};
pub use layout::{
    ImageDesc, ImageDimension, ImageLayout, ImageLevel, SurfaceInfo, count_mips, count_mips_3d,
    layout_image, mip_extent, resolve_mip_level_count, surface_info,
};
pub use limits::{LimitExceeded, ResourceLimits};
pub use output::EncodeOutput;
pub use pixel::{BLOCK_DIM, PixelFormat};
pub use sink::{ChunkedSink, GROW_CHUNK};
pub use traits::ImageDecoder;

// Re-exports for typed pixel access.
pub use imgref::{Img, ImgRef, ImgVec};
pub use rgb;
pub use rgb::Rgba;
