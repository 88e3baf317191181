//! ASTC (`.astc`) container recognition.
//!
//! ASTC footprints range from 4x4 to 12x12 and none of them are in the
//! pixel format table, so a recognized file is reported as a decode error
//! carrying its footprint and extents rather than passed down the chain.

use super::HeaderReader;
use crate::format::ASTC_MAGIC;
use crate::{Image, ImageContext, ImageDecoder, ImageError};

const NAME: &str = "ASTC";

/// Recognizes ASTC files and rejects them with a descriptive error.
#[derive(Clone, Copy, Debug, Default)]
pub struct AstcDecoder;

impl ImageDecoder for AstcDecoder {
    fn name(&self) -> &'static str {
        NAME
    }

    fn try_decode(&self, _ctx: &ImageContext, data: &[u8]) -> Result<Option<Image>, ImageError> {
        if !data.starts_with(&ASTC_MAGIC) {
            return Ok(None);
        }
        let mut r = HeaderReader::new(NAME, data, ASTC_MAGIC.len());
        let (bx, by, _bz) = (r.u8()?, r.u8()?, r.u8()?);
        let (x, y, z) = (r.u24()?, r.u24()?, r.u24()?);
        Err(ImageError::decode(
            NAME,
            format!("{bx}x{by} block footprint has no pixel format ({x}x{y}x{z})"),
        ))
    }
}
