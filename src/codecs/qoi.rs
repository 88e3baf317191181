//! Quite OK Image (`.qoi`) decoder.

use super::load_raster;
use crate::{FileFormat, Image, ImageContext, ImageDecoder, ImageError, PixelFormat};

const NAME: &str = "QOI";

/// Decodes QOI files to a single `RGBA8Unorm` level.
#[derive(Clone, Copy, Debug, Default)]
pub struct QoiDecoder;

impl ImageDecoder for QoiDecoder {
    fn name(&self) -> &'static str {
        NAME
    }

    fn try_decode(&self, ctx: &ImageContext, data: &[u8]) -> Result<Option<Image>, ImageError> {
        if FileFormat::detect(data) != Some(FileFormat::Qoi) {
            return Ok(None);
        }
        let rgba = load_raster(ctx, data, image::ImageFormat::Qoi, NAME)?.into_rgba8();
        let (width, height) = rgba.dimensions();
        ctx.create_from_pixels(PixelFormat::RGBA8Unorm, width, height, rgba.as_raw())
            .map(Some)
    }
}
