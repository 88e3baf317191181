//! Error taxonomy for layout, allocation, decode and encode.

use crate::format::EncodeFormat;
use crate::limits::LimitExceeded;
use crate::pixel::PixelFormat;

/// Errors returned by image construction, decode and encode.
///
/// Every error is terminal for the call that produced it. Decoding through
/// the registry folds [`Decode`](ImageError::Decode) failures into `None`,
/// since at that layer a wrong container and corrupt data look the same.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ImageError {
    /// The format is `Undefined`, or the requested operation does not
    /// support it.
    #[error("invalid pixel format {format}: {reason}")]
    InvalidFormat {
        format: PixelFormat,
        reason: &'static str,
    },

    /// A required extent is zero.
    #[error("invalid extents {width}x{height}x{depth_or_array_layers}")]
    InvalidExtents {
        width: u32,
        height: u32,
        depth_or_array_layers: u32,
    },

    /// More mip levels were requested than the base extents support.
    #[error("{requested} mip levels requested, extents support at most {max}")]
    MipLevelOverflow { requested: u32, max: u32 },

    /// A pitch or size could not be computed.
    #[error("layout failed: {reason}")]
    Layout { reason: &'static str },

    /// The pixel buffer or level array could not be allocated.
    #[error("failed to allocate {size} bytes")]
    Allocation { size: usize },

    /// A configured resource limit rejected the request.
    #[error(transparent)]
    LimitExceeded(#[from] LimitExceeded),

    /// A decoder recognized its container but could not decode it.
    #[error("{codec} decode failed: {reason}")]
    Decode { codec: &'static str, reason: String },

    /// The encoder backend failed.
    #[error("{format} encode failed")]
    Encode {
        format: EncodeFormat,
        #[source]
        source: image::ImageError,
    },
}

impl ImageError {
    pub(crate) fn decode(codec: &'static str, reason: impl Into<String>) -> Self {
        Self::Decode {
            codec,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let err = ImageError::MipLevelOverflow {
            requested: 12,
            max: 9,
        };
        assert_eq!(
            err.to_string(),
            "12 mip levels requested, extents support at most 9"
        );

        let err = ImageError::InvalidFormat {
            format: PixelFormat::BC1RGBAUnorm,
            reason: "block-compressed pixels cannot be encoded",
        };
        assert_eq!(
            err.to_string(),
            "invalid pixel format BC1RGBAUnorm: block-compressed pixels cannot be encoded"
        );

        let err = ImageError::decode("DDS", "truncated payload");
        assert_eq!(err.to_string(), "DDS decode failed: truncated payload");
    }

    #[test]
    fn limit_errors_convert() {
        let err: ImageError = LimitExceeded::Width {
            actual: 10,
            max: 5,
        }
        .into();
        assert!(matches!(err, ImageError::LimitExceeded(_)));
        assert_eq!(err.to_string(), "width 10 exceeds limit 5");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + 'static>() {}
        assert_send_sync::<ImageError>();
    }
}
