//! High dynamic range rasters: OpenEXR and Radiance `.hdr`.

use super::load_raster;
use crate::{FileFormat, Image, ImageContext, ImageDecoder, ImageError, PixelFormat};

const NAME: &str = "HDR";

/// Decodes OpenEXR and Radiance files to a single `RGBA32Float` level.
#[derive(Clone, Copy, Debug, Default)]
pub struct HdrDecoder;

impl ImageDecoder for HdrDecoder {
    fn name(&self) -> &'static str {
        NAME
    }

    fn try_decode(&self, ctx: &ImageContext, data: &[u8]) -> Result<Option<Image>, ImageError> {
        let format = match FileFormat::detect(data) {
            Some(FileFormat::Exr) => image::ImageFormat::OpenExr,
            Some(FileFormat::Hdr) => image::ImageFormat::Hdr,
            _ => return Ok(None),
        };
        let rgba = load_raster(ctx, data, format, NAME)?.into_rgba32f();
        let (width, height) = rgba.dimensions();
        ctx.create_from_pixels(
            PixelFormat::RGBA32Float,
            width,
            height,
            bytemuck::cast_slice(rgba.as_raw()),
        )
        .map(Some)
    }
}
