//! Last-resort decoder for everyday rasters: PNG, JPEG, BMP, GIF and TGA.
//!
//! 8-bit data of any channel count is expanded to `RGBA8Unorm`. 16-bit data
//! keeps its precision and maps by channel count; float data becomes
//! `RGBA32Float`.

use image::DynamicImage;

use super::load_raster;
use crate::{FileFormat, Image, ImageContext, ImageDecoder, ImageError, PixelFormat};

const NAME: &str = "generic";

/// Decodes PNG, JPEG, BMP and GIF by signature, then tries TGA.
#[derive(Clone, Copy, Debug, Default)]
pub struct GenericDecoder;

impl ImageDecoder for GenericDecoder {
    fn name(&self) -> &'static str {
        NAME
    }

    fn try_decode(&self, ctx: &ImageContext, data: &[u8]) -> Result<Option<Image>, ImageError> {
        if data.is_empty() {
            return Ok(None);
        }
        let decoded = match FileFormat::detect(data) {
            Some(FileFormat::Png) => load_raster(ctx, data, image::ImageFormat::Png, NAME)?,
            Some(FileFormat::Jpeg) => load_raster(ctx, data, image::ImageFormat::Jpeg, NAME)?,
            Some(FileFormat::Bmp) => load_raster(ctx, data, image::ImageFormat::Bmp, NAME)?,
            Some(FileFormat::Gif) => load_raster(ctx, data, image::ImageFormat::Gif, NAME)?,
            Some(_) => return Ok(None),
            // No signature: TGA or nothing at all.
            None => match load_raster(ctx, data, image::ImageFormat::Tga, NAME) {
                Ok(decoded) => decoded,
                Err(err) => {
                    log::trace!("not a TGA file: {err}");
                    return Ok(None);
                }
            },
        };
        into_image(ctx, decoded).map(Some)
    }
}

fn into_image(ctx: &ImageContext, decoded: DynamicImage) -> Result<Image, ImageError> {
    let (width, height) = (decoded.width(), decoded.height());
    match decoded {
        DynamicImage::ImageLuma16(buf) => ctx.create_from_pixels(
            PixelFormat::R16Uint,
            width,
            height,
            bytemuck::cast_slice(buf.as_raw()),
        ),
        DynamicImage::ImageLumaA16(buf) => ctx.create_from_pixels(
            PixelFormat::RG16Uint,
            width,
            height,
            bytemuck::cast_slice(buf.as_raw()),
        ),
        DynamicImage::ImageRgba16(buf) => ctx.create_from_pixels(
            PixelFormat::RGBA16Uint,
            width,
            height,
            bytemuck::cast_slice(buf.as_raw()),
        ),
        DynamicImage::ImageRgb16(_) => Err(ImageError::decode(
            NAME,
            "16-bit RGB has no matching pixel format",
        )),
        DynamicImage::ImageRgb32F(_) | DynamicImage::ImageRgba32F(_) => {
            let rgba = decoded.into_rgba32f();
            ctx.create_from_pixels(
                PixelFormat::RGBA32Float,
                width,
                height,
                bytemuck::cast_slice(rgba.as_raw()),
            )
        }
        other => {
            let rgba = other.into_rgba8();
            ctx.create_from_pixels(PixelFormat::RGBA8Unorm, width, height, rgba.as_raw())
        }
    }
}
