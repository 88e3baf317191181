//! Container decoders and the ordered registry that probes them.

mod astc;
mod dds;
mod generic;
mod hdr;
mod ktx;
mod qoi;

use std::io::{self, Cursor};
use std::sync::LazyLock;

use byteorder::{LittleEndian, ReadBytesExt};

pub use astc::AstcDecoder;
pub use dds::DdsDecoder;
pub use generic::GenericDecoder;
pub use hdr::HdrDecoder;
pub use ktx::KtxDecoder;
pub use qoi::QoiDecoder;

use crate::{
    Image, ImageContext, ImageDecoder, ImageDesc, ImageError, ImageLayout, ResourceLimits,
    layout_image,
};

/// An ordered chain of decoders.
///
/// Decoding asks each decoder in turn and returns the first image produced.
/// A decoder that recognizes the bytes but fails is logged and skipped.
pub struct DecoderRegistry {
    decoders: Vec<Box<dyn ImageDecoder>>,
}

static STANDARD: LazyLock<DecoderRegistry> = LazyLock::new(DecoderRegistry::new_standard);

impl DecoderRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            decoders: Vec::new(),
        }
    }

    /// A new registry with the standard chain: DDS, ASTC, KTX, HDR/EXR,
    /// QOI, then the generic PNG/JPEG/BMP/GIF/TGA decoder.
    pub fn new_standard() -> Self {
        Self::new()
            .with(DdsDecoder)
            .with(AstcDecoder)
            .with(KtxDecoder)
            .with(HdrDecoder)
            .with(QoiDecoder)
            .with(GenericDecoder)
    }

    /// The shared standard chain.
    pub fn standard() -> &'static Self {
        &STANDARD
    }

    /// Append a decoder to the end of the chain.
    pub fn with(mut self, decoder: impl ImageDecoder + 'static) -> Self {
        self.decoders.push(Box::new(decoder));
        self
    }

    /// Decoder names in probe order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.decoders.iter().map(|d| d.name())
    }

    /// Decode `data` with the first decoder that produces an image.
    pub fn decode(&self, ctx: &ImageContext, data: &[u8]) -> Option<Image> {
        self.try_decode(ctx, data).ok()
    }

    /// Like [`decode`](Self::decode), but returns the last error when no
    /// decoder produced an image.
    pub fn try_decode(&self, ctx: &ImageContext, data: &[u8]) -> Result<Image, ImageError> {
        ctx.limits().check_file_size(data.len() as u64)?;

        let mut last_error = None;
        for decoder in &self.decoders {
            match decoder.try_decode(ctx, data) {
                Ok(Some(image)) => {
                    log::debug!(
                        "{} decoded {}x{} {} ({} levels)",
                        decoder.name(),
                        image.width(0),
                        image.height(0),
                        image.format(),
                        image.levels().len()
                    );
                    return Ok(image);
                }
                Ok(None) => {
                    log::debug!("{} did not recognize the input", decoder.name());
                }
                Err(err) => {
                    log::warn!("{} failed: {err}", decoder.name());
                    last_error = Some(err);
                }
            }
        }
        Err(last_error.unwrap_or_else(|| {
            log::debug!("no decoder recognized {} bytes", data.len());
            ImageError::Decode {
                codec: "registry",
                reason: "no decoder recognized the input".into(),
            }
        }))
    }
}

impl Default for DecoderRegistry {
    fn default() -> Self {
        Self::new_standard()
    }
}

impl core::fmt::Debug for DecoderRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

// ---------------------------------------------------------------------------
// Container header reading
// ---------------------------------------------------------------------------

/// Little-endian field reader over an in-memory container header.
///
/// Running off the end of the data is reported as a truncated header.
pub(crate) struct HeaderReader<'a> {
    codec: &'static str,
    cursor: Cursor<&'a [u8]>,
}

impl<'a> HeaderReader<'a> {
    /// Start reading `data` at byte `offset`.
    pub(crate) fn new(codec: &'static str, data: &'a [u8], offset: usize) -> Self {
        let mut cursor = Cursor::new(data);
        cursor.set_position(offset as u64);
        Self { codec, cursor }
    }

    pub(crate) fn u8(&mut self) -> Result<u8, ImageError> {
        self.cursor.read_u8().map_err(|e| self.error(e))
    }

    pub(crate) fn u24(&mut self) -> Result<u32, ImageError> {
        self.cursor
            .read_u24::<LittleEndian>()
            .map_err(|e| self.error(e))
    }

    pub(crate) fn u32(&mut self) -> Result<u32, ImageError> {
        self.cursor
            .read_u32::<LittleEndian>()
            .map_err(|e| self.error(e))
    }

    pub(crate) fn u64(&mut self) -> Result<u64, ImageError> {
        self.cursor
            .read_u64::<LittleEndian>()
            .map_err(|e| self.error(e))
    }

    pub(crate) fn skip(&mut self, bytes: u64) {
        let pos = self.cursor.position().saturating_add(bytes);
        self.cursor.set_position(pos);
    }

    /// Bytes consumed from the start of the data.
    pub(crate) fn position(&self) -> u64 {
        self.cursor.position()
    }

    fn error(&self, err: io::Error) -> ImageError {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            truncated(self.codec)
        } else {
            ImageError::decode(self.codec, err.to_string())
        }
    }
}

fn truncated(codec: &'static str) -> ImageError {
    ImageError::decode(codec, "truncated header")
}

/// Check the limits and lay out `desc`, failing if the layout needs more
/// than `available` payload bytes. Runs before any pixel memory exists, so
/// a header cannot demand an allocation its file does not back.
pub(crate) fn layout_within(
    ctx: &ImageContext,
    codec: &'static str,
    desc: &ImageDesc,
    available: usize,
) -> Result<ImageLayout, ImageError> {
    let desc = desc.resolve()?;
    ctx.limits().check_desc(&desc)?;
    // every region holds at least one byte
    let regions = desc.level_count().unwrap_or(usize::MAX);
    if regions > available {
        return Err(ImageError::decode(
            codec,
            format!("{regions} regions cannot fit in {available} payload bytes"),
        ));
    }
    let layout = layout_image(&desc)?;
    if layout.total_size > available {
        return Err(ImageError::decode(
            codec,
            format!(
                "payload holds {available} bytes, the header describes {}",
                layout.total_size
            ),
        ));
    }
    Ok(layout)
}

// ---------------------------------------------------------------------------
// Raster backend
// ---------------------------------------------------------------------------

/// Decode `data` as `format` with the `image` crate, bounded by the
/// context's dimension and memory limits.
pub(crate) fn load_raster(
    ctx: &ImageContext,
    data: &[u8],
    format: image::ImageFormat,
    codec: &'static str,
) -> Result<image::DynamicImage, ImageError> {
    let mut reader = image::ImageReader::with_format(std::io::Cursor::new(data), format);
    reader.limits(raster_limits(ctx.limits()));
    reader
        .decode()
        .map_err(|err| ImageError::decode(codec, err.to_string()))
}

fn raster_limits(limits: &ResourceLimits) -> image::Limits {
    let mut out = image::Limits::default();
    out.max_image_width = limits.max_width;
    out.max_image_height = limits.max_height;
    if let Some(bytes) = limits.max_memory_bytes {
        out.max_alloc = Some(bytes);
    }
    out
}
