//! Container detection and encode targets.

/// Containers recognized by magic bytes.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FileFormat {
    Bmp,
    Png,
    Jpeg,
    Gif,
    Exr,
    Hdr,
    Qoi,
    Dds,
    Ktx1,
    Ktx2,
    Astc,
}

pub(crate) const DDS_MAGIC: [u8; 4] = *b"DDS ";
pub(crate) const ASTC_MAGIC: [u8; 4] = [0x13, 0xAB, 0xA1, 0x5C];
pub(crate) const KTX1_IDENTIFIER: [u8; 12] = [
    0xAB, b'K', b'T', b'X', b' ', b'1', b'1', 0xBB, b'\r', b'\n', 0x1A, b'\n',
];
pub(crate) const KTX2_IDENTIFIER: [u8; 12] = [
    0xAB, b'K', b'T', b'X', b' ', b'2', b'0', 0xBB, b'\r', b'\n', 0x1A, b'\n',
];
const EXR_MAGIC: [u8; 4] = [0x76, 0x2F, 0x31, 0x01];
const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

impl FileFormat {
    /// Detect format from magic bytes. Returns `None` if unrecognized.
    ///
    /// TGA has no signature and is never reported here; the generic decoder
    /// still tries it last.
    pub fn detect(data: &[u8]) -> Option<Self> {
        if data.starts_with(&DDS_MAGIC) {
            return Some(FileFormat::Dds);
        }
        if data.starts_with(&KTX2_IDENTIFIER) {
            return Some(FileFormat::Ktx2);
        }
        if data.starts_with(&KTX1_IDENTIFIER) {
            return Some(FileFormat::Ktx1);
        }
        if data.starts_with(&ASTC_MAGIC) {
            return Some(FileFormat::Astc);
        }
        if data.starts_with(&EXR_MAGIC) {
            return Some(FileFormat::Exr);
        }
        // Radiance: "#?RADIANCE" or "#?RGBE"
        if data.starts_with(b"#?RADIANCE") || data.starts_with(b"#?RGBE") {
            return Some(FileFormat::Hdr);
        }
        if data.starts_with(b"qoif") {
            return Some(FileFormat::Qoi);
        }
        if data.starts_with(&PNG_MAGIC) {
            return Some(FileFormat::Png);
        }
        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(FileFormat::Jpeg);
        }
        // GIF: "GIF87a" or "GIF89a"
        if data.len() >= 6
            && data[..3] == *b"GIF"
            && data[3] == b'8'
            && (data[4] == b'7' || data[4] == b'9')
            && data[5] == b'a'
        {
            return Some(FileFormat::Gif);
        }
        // BMP: "BM" followed by a 14-byte file header
        if data.len() >= 14 && data.starts_with(b"BM") {
            return Some(FileFormat::Bmp);
        }
        None
    }

    /// Detect format from file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        let lower = ext.to_ascii_lowercase();
        match lower.as_str() {
            "bmp" | "dib" => Some(FileFormat::Bmp),
            "png" => Some(FileFormat::Png),
            "jpg" | "jpeg" | "jpe" | "jfif" => Some(FileFormat::Jpeg),
            "gif" => Some(FileFormat::Gif),
            "exr" => Some(FileFormat::Exr),
            "hdr" | "rgbe" => Some(FileFormat::Hdr),
            "qoi" => Some(FileFormat::Qoi),
            "dds" => Some(FileFormat::Dds),
            "ktx" => Some(FileFormat::Ktx1),
            "ktx2" => Some(FileFormat::Ktx2),
            "astc" => Some(FileFormat::Astc),
            _ => None,
        }
    }

    /// MIME type string.
    pub fn mime_type(self) -> &'static str {
        match self {
            FileFormat::Bmp => "image/bmp",
            FileFormat::Png => "image/png",
            FileFormat::Jpeg => "image/jpeg",
            FileFormat::Gif => "image/gif",
            FileFormat::Exr => "image/x-exr",
            FileFormat::Hdr => "image/vnd.radiance",
            FileFormat::Qoi => "image/qoi",
            FileFormat::Dds => "image/vnd-ms.dds",
            FileFormat::Ktx1 => "image/ktx",
            FileFormat::Ktx2 => "image/ktx2",
            FileFormat::Astc => "image/astc",
        }
    }

    /// Common file extensions.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            FileFormat::Bmp => &["bmp", "dib"],
            FileFormat::Png => &["png"],
            FileFormat::Jpeg => &["jpg", "jpeg", "jpe", "jfif"],
            FileFormat::Gif => &["gif"],
            FileFormat::Exr => &["exr"],
            FileFormat::Hdr => &["hdr", "rgbe"],
            FileFormat::Qoi => &["qoi"],
            FileFormat::Dds => &["dds"],
            FileFormat::Ktx1 => &["ktx"],
            FileFormat::Ktx2 => &["ktx2"],
            FileFormat::Astc => &["astc"],
        }
    }

    /// Whether the container can hold mip chains and array layers.
    pub fn is_texture_container(self) -> bool {
        matches!(
            self,
            FileFormat::Dds | FileFormat::Ktx1 | FileFormat::Ktx2 | FileFormat::Astc
        )
    }
}

impl core::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            FileFormat::Bmp => "BMP",
            FileFormat::Png => "PNG",
            FileFormat::Jpeg => "JPEG",
            FileFormat::Gif => "GIF",
            FileFormat::Exr => "OpenEXR",
            FileFormat::Hdr => "Radiance HDR",
            FileFormat::Qoi => "QOI",
            FileFormat::Dds => "DDS",
            FileFormat::Ktx1 => "KTX",
            FileFormat::Ktx2 => "KTX2",
            FileFormat::Astc => "ASTC",
        })
    }
}

/// Targets accepted by [`Image::encode`](crate::Image::encode).
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EncodeFormat {
    Bmp,
    Png,
    Jpg,
    Tga,
    Hdr,
}

impl EncodeFormat {
    /// Preferred file extension.
    pub fn extension(self) -> &'static str {
        match self {
            EncodeFormat::Bmp => "bmp",
            EncodeFormat::Png => "png",
            EncodeFormat::Jpg => "jpg",
            EncodeFormat::Tga => "tga",
            EncodeFormat::Hdr => "hdr",
        }
    }

    /// Whether quality affects the output.
    pub fn supports_lossy(self) -> bool {
        matches!(self, EncodeFormat::Jpg)
    }

    /// Whether the alpha channel survives encoding.
    pub fn supports_alpha(self) -> bool {
        matches!(self, EncodeFormat::Bmp | EncodeFormat::Png | EncodeFormat::Tga)
    }

    /// The container [`FileFormat::detect`] reports for this target's output.
    ///
    /// TGA has no signature, so it has none.
    pub fn file_format(self) -> Option<FileFormat> {
        match self {
            EncodeFormat::Bmp => Some(FileFormat::Bmp),
            EncodeFormat::Png => Some(FileFormat::Png),
            EncodeFormat::Jpg => Some(FileFormat::Jpeg),
            EncodeFormat::Tga => None,
            EncodeFormat::Hdr => Some(FileFormat::Hdr),
        }
    }
}

impl core::fmt::Display for EncodeFormat {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            EncodeFormat::Bmp => "BMP",
            EncodeFormat::Png => "PNG",
            EncodeFormat::Jpg => "JPEG",
            EncodeFormat::Tga => "TGA",
            EncodeFormat::Hdr => "Radiance HDR",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_png() {
        assert_eq!(FileFormat::detect(&PNG_MAGIC), Some(FileFormat::Png));
    }

    #[test]
    fn detect_jpeg() {
        assert_eq!(
            FileFormat::detect(&[0xFF, 0xD8, 0xFF, 0xE0]),
            Some(FileFormat::Jpeg)
        );
    }

    #[test]
    fn detect_gif() {
        assert_eq!(FileFormat::detect(b"GIF89a\x00\x00"), Some(FileFormat::Gif));
        assert_eq!(FileFormat::detect(b"GIF88a"), None);
    }

    #[test]
    fn detect_bmp_needs_file_header() {
        assert_eq!(FileFormat::detect(b"BM"), None);
        assert_eq!(FileFormat::detect(&[b'B', b'M', 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]), Some(FileFormat::Bmp));
    }

    #[test]
    fn detect_texture_containers() {
        assert_eq!(FileFormat::detect(b"DDS \x7c\x00\x00\x00"), Some(FileFormat::Dds));
        assert_eq!(FileFormat::detect(&KTX1_IDENTIFIER), Some(FileFormat::Ktx1));
        assert_eq!(FileFormat::detect(&KTX2_IDENTIFIER), Some(FileFormat::Ktx2));
        assert_eq!(FileFormat::detect(&ASTC_MAGIC), Some(FileFormat::Astc));
    }

    #[test]
    fn detect_hdr_family() {
        assert_eq!(FileFormat::detect(&EXR_MAGIC), Some(FileFormat::Exr));
        assert_eq!(FileFormat::detect(b"#?RADIANCE\n"), Some(FileFormat::Hdr));
        assert_eq!(FileFormat::detect(b"#?RGBE\n"), Some(FileFormat::Hdr));
        assert_eq!(FileFormat::detect(b"qoif\x00\x00"), Some(FileFormat::Qoi));
    }

    #[test]
    fn detect_unknown() {
        assert_eq!(FileFormat::detect(b"nope"), None);
        assert_eq!(FileFormat::detect(&[]), None);
        // Truncated KTX2 identifier
        assert_eq!(FileFormat::detect(&KTX2_IDENTIFIER[..8]), None);
    }

    #[test]
    fn from_extension_case_insensitive() {
        assert_eq!(FileFormat::from_extension("DDS"), Some(FileFormat::Dds));
        assert_eq!(FileFormat::from_extension("Ktx2"), Some(FileFormat::Ktx2));
        assert_eq!(FileFormat::from_extension("JPEG"), Some(FileFormat::Jpeg));
        assert_eq!(FileFormat::from_extension(""), None);
        assert_eq!(FileFormat::from_extension("tga"), None);
    }

    #[test]
    fn extensions_round_trip() {
        for format in [
            FileFormat::Bmp,
            FileFormat::Png,
            FileFormat::Jpeg,
            FileFormat::Gif,
            FileFormat::Exr,
            FileFormat::Hdr,
            FileFormat::Qoi,
            FileFormat::Dds,
            FileFormat::Ktx1,
            FileFormat::Ktx2,
            FileFormat::Astc,
        ] {
            for ext in format.extensions() {
                assert_eq!(FileFormat::from_extension(ext), Some(format));
            }
        }
    }

    #[test]
    fn mime_types() {
        assert_eq!(FileFormat::Png.mime_type(), "image/png");
        assert_eq!(FileFormat::Ktx2.mime_type(), "image/ktx2");
    }

    #[test]
    fn display_format() {
        assert_eq!(FileFormat::Dds.to_string(), "DDS");
        assert_eq!(FileFormat::Exr.to_string(), "OpenEXR");
        assert_eq!(EncodeFormat::Jpg.to_string(), "JPEG");
    }

    #[test]
    fn encode_targets() {
        assert!(EncodeFormat::Jpg.supports_lossy());
        assert!(!EncodeFormat::Png.supports_lossy());
        assert!(!EncodeFormat::Jpg.supports_alpha());
        assert!(EncodeFormat::Tga.supports_alpha());
        assert_eq!(EncodeFormat::Hdr.extension(), "hdr");
        assert_eq!(EncodeFormat::Jpg.file_format(), Some(FileFormat::Jpeg));
        assert_eq!(EncodeFormat::Tga.file_format(), None);
        assert!(FileFormat::Dds.is_texture_container());
        assert!(!FileFormat::Png.is_texture_container());
    }
}
