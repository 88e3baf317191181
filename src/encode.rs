//! Encode dispatch for the top level of an [`Image`].
//!
//! Only mip 0 of layer (or slice) 0 is written. 8-bit targets take RGBA8
//! images, Radiance HDR takes RGBA32Float, and block-compressed images are
//! rejected outright.

use image::codecs::bmp::BmpEncoder;
use image::codecs::hdr::HdrEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::tga::TgaEncoder;
use image::{ExtendedColorType, ImageEncoder};

use crate::error::ImageError;
use crate::format::EncodeFormat;
use crate::image::{Image, LevelView};
use crate::output::EncodeOutput;
use crate::pixel::PixelFormat;
use crate::sink::ChunkedSink;

pub(crate) fn encode(
    img: &Image,
    format: EncodeFormat,
    quality: u8,
) -> Result<EncodeOutput, ImageError> {
    let pixel_format = img.format();
    if pixel_format.is_block_compressed() {
        return Err(ImageError::InvalidFormat {
            format: pixel_format,
            reason: "block-compressed pixels cannot be encoded",
        });
    }
    let expected_hdr = format == EncodeFormat::Hdr;
    let supported = if expected_hdr {
        pixel_format == PixelFormat::RGBA32Float
    } else {
        matches!(
            pixel_format,
            PixelFormat::RGBA8Unorm | PixelFormat::RGBA8UnormSrgb
        )
    };
    if !supported {
        return Err(ImageError::InvalidFormat {
            format: pixel_format,
            reason: if expected_hdr {
                "Radiance HDR needs RGBA32Float pixels"
            } else {
                "8-bit targets need RGBA8 pixels"
            },
        });
    }

    let top = img.level(0, 0).ok_or(ImageError::Layout {
        reason: "image has no top level",
    })?;
    let wrap = |source: image::ImageError| ImageError::Encode { format, source };
    let mut sink = ChunkedSink::new().map_err(|e| wrap(image::ImageError::IoError(e)))?;

    match format {
        EncodeFormat::Png => PngEncoder::new(&mut sink)
            .write_image(top.pixels(), top.width(), top.height(), ExtendedColorType::Rgba8)
            .map_err(wrap)?,
        EncodeFormat::Bmp => BmpEncoder::new(&mut sink)
            .write_image(top.pixels(), top.width(), top.height(), ExtendedColorType::Rgba8)
            .map_err(wrap)?,
        EncodeFormat::Tga => TgaEncoder::new(&mut sink)
            .write_image(top.pixels(), top.width(), top.height(), ExtendedColorType::Rgba8)
            .map_err(wrap)?,
        EncodeFormat::Jpg => {
            let rgb = drop_alpha(&top)?;
            JpegEncoder::new_with_quality(&mut sink, quality.clamp(1, 100))
                .write_image(&rgb, top.width(), top.height(), ExtendedColorType::Rgb8)
                .map_err(wrap)?
        }
        EncodeFormat::Hdr => {
            let pixels = rgb_f32(&top)?;
            HdrEncoder::new(&mut sink)
                .encode(&pixels, top.width() as usize, top.height() as usize)
                .map_err(wrap)?
        }
    }

    log::debug!(
        "encoded {}x{} {} as {format}: {} bytes",
        top.width(),
        top.height(),
        pixel_format,
        sink.len()
    );
    Ok(EncodeOutput::new(sink.into_vec(), format))
}

/// Tightly packed RGB8 copy of an RGBA8 level.
fn drop_alpha(level: &LevelView<'_>) -> Result<Vec<u8>, ImageError> {
    let img = level.as_rgba8().ok_or(ImageError::Layout {
        reason: "level is not RGBA8",
    })?;
    Ok(img.pixels().flat_map(|px| [px.r, px.g, px.b]).collect())
}

/// RGB float copy of an RGBA32Float level.
fn rgb_f32(level: &LevelView<'_>) -> Result<Vec<image::Rgb<f32>>, ImageError> {
    let img = level.to_rgba_f32().ok_or(ImageError::Layout {
        reason: "level is not RGBA32Float",
    })?;
    Ok(img.pixels().map(|px| image::Rgb([px.r, px.g, px.b])).collect())
}
