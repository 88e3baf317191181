//! The decoder trait.
//!
//! Every container decoder implements [`ImageDecoder`]. A decoder is a
//! stateless, shareable value; per-call state (allocator and limits) comes
//! from the [`ImageContext`] passed to each call.

use crate::{Image, ImageContext, ImageError};

/// One decoder in a [`DecoderRegistry`](crate::DecoderRegistry) chain.
///
/// `try_decode` has three outcomes:
///
/// - `Ok(None)`: the bytes are not this decoder's container; the chain
///   moves on.
/// - `Ok(Some(image))`: decoded.
/// - `Err(_)`: the container was recognized but could not be decoded.
///
/// Implementations allocate pixel memory only through `ctx`, so the
/// context's allocator and limits apply to decoded images too.
pub trait ImageDecoder: Send + Sync {
    /// Short name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Decode `data` if it is this decoder's container.
    fn try_decode(&self, ctx: &ImageContext, data: &[u8]) -> Result<Option<Image>, ImageError>;
}
