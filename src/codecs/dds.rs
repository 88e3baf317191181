//! DirectDraw Surface (`.dds`) decoder.
//!
//! DDS stores surfaces in the same order [`layout_image`](crate::layout_image)
//! produces them: array layer (or cube face) major, then mip, with every
//! depth slice of a volume mip stored together. Pitches are tight, so the
//! payload is copied into the image buffer in one piece.
//!
//! Header reference:
//! <https://learn.microsoft.com/en-us/windows/win32/direct3ddds/dds-header>

use super::{HeaderReader, layout_within};
use crate::format::DDS_MAGIC;
use crate::{Image, ImageContext, ImageDecoder, ImageDesc, ImageDimension, ImageError, PixelFormat};

const NAME: &str = "DDS";
const HEADER_SIZE: u32 = 124;
const PIXEL_FORMAT_SIZE: u32 = 32;

// dwFlags
const FLAG_DEPTH: u32 = 0x80_0000;

// dwCaps2
const CAPS2_CUBEMAP: u32 = 0x200;
const CAPS2_CUBEMAP_ALL_FACES: u32 = 0xFC00;
const CAPS2_VOLUME: u32 = 0x20_0000;

// DDS_PIXELFORMAT.dwFlags
const PF_ALPHAPIXELS: u32 = 0x1;
const PF_FOURCC: u32 = 0x4;
const PF_RGB: u32 = 0x40;
const PF_LUMINANCE: u32 = 0x2_0000;

// DX10 resource dimensions and misc flags
const RESOURCE_DIMENSION_TEXTURE1D: u32 = 2;
const RESOURCE_DIMENSION_TEXTURE2D: u32 = 3;
const RESOURCE_DIMENSION_TEXTURE3D: u32 = 4;
const MISC_TEXTURECUBE: u32 = 0x4;

/// Decoder for DDS files, legacy and DX10 headers.
#[derive(Clone, Copy, Debug, Default)]
pub struct DdsDecoder;

impl ImageDecoder for DdsDecoder {
    fn name(&self) -> &'static str {
        NAME
    }

    fn try_decode(&self, ctx: &ImageContext, data: &[u8]) -> Result<Option<Image>, ImageError> {
        if !data.starts_with(&DDS_MAGIC) {
            return Ok(None);
        }
        let header = DdsHeader::parse(data)?;
        let payload = data.get(header.payload_offset..).unwrap_or_default();
        let layout = layout_within(ctx, NAME, &header.desc()?, payload.len())?;

        let mut image = ctx.create(&layout.desc)?;
        image
            .pixels_mut()
            .copy_from_slice(&payload[..layout.total_size]);
        Ok(Some(image))
    }
}

#[derive(Clone, Copy, Debug)]
struct LegacyPixelFormat {
    flags: u32,
    fourcc: [u8; 4],
    rgb_bit_count: u32,
    masks: [u32; 4],
}

#[derive(Clone, Copy, Debug)]
struct Dx10Header {
    dxgi_format: u32,
    resource_dimension: u32,
    misc_flag: u32,
    array_size: u32,
}

#[derive(Clone, Copy, Debug)]
struct DdsHeader {
    flags: u32,
    height: u32,
    width: u32,
    depth: u32,
    mipmap_count: u32,
    pixel_format: LegacyPixelFormat,
    caps2: u32,
    dx10: Option<Dx10Header>,
    payload_offset: usize,
}

impl DdsHeader {
    fn parse(data: &[u8]) -> Result<Self, ImageError> {
        let mut r = HeaderReader::new(NAME, data, DDS_MAGIC.len());

        let size = r.u32()?;
        if size != HEADER_SIZE {
            return Err(ImageError::decode(NAME, format!("header size {size}, expected 124")));
        }
        let flags = r.u32()?;
        let height = r.u32()?;
        let width = r.u32()?;
        let _pitch_or_linear_size = r.u32()?;
        let depth = r.u32()?;
        let mipmap_count = r.u32()?;
        // dwReserved1
        r.skip(11 * 4);

        let pf_size = r.u32()?;
        if pf_size != PIXEL_FORMAT_SIZE {
            return Err(ImageError::decode(
                NAME,
                format!("pixel format size {pf_size}, expected 32"),
            ));
        }
        let pf_flags = r.u32()?;
        let fourcc = r.u32()?.to_le_bytes();
        let pixel_format = LegacyPixelFormat {
            flags: pf_flags,
            fourcc,
            rgb_bit_count: r.u32()?,
            masks: [r.u32()?, r.u32()?, r.u32()?, r.u32()?],
        };

        let _caps = r.u32()?;
        let caps2 = r.u32()?;
        // dwCaps3, dwCaps4, dwReserved2
        r.skip(3 * 4);

        let dx10 = if pf_flags & PF_FOURCC != 0 && fourcc == *b"DX10" {
            let dx10 = Dx10Header {
                dxgi_format: r.u32()?,
                resource_dimension: r.u32()?,
                misc_flag: r.u32()?,
                array_size: r.u32()?,
            };
            // miscFlags2
            r.skip(4);
            Some(dx10)
        } else {
            None
        };

        Ok(Self {
            flags,
            height,
            width,
            depth,
            mipmap_count,
            pixel_format,
            caps2,
            dx10,
            payload_offset: r.position() as usize,
        })
    }

    fn desc(&self) -> Result<ImageDesc, ImageError> {
        // Writers disagree on whether DDSD_MIPMAPCOUNT is set, so trust the count.
        let mip_level_count = self.mipmap_count.max(1);
        let (dimension, depth_or_array_layers, format) = match self.dx10 {
            Some(dx10) => {
                let format = dxgi_format(dx10.dxgi_format).ok_or_else(|| {
                    ImageError::decode(NAME, format!("unsupported DXGI format {}", dx10.dxgi_format))
                })?;
                let layers = dx10.array_size.max(1);
                match dx10.resource_dimension {
                    RESOURCE_DIMENSION_TEXTURE1D => (ImageDimension::D1, layers, format),
                    RESOURCE_DIMENSION_TEXTURE2D if dx10.misc_flag & MISC_TEXTURECUBE != 0 => {
                        let faces = layers
                            .checked_mul(6)
                            .ok_or_else(|| ImageError::decode(NAME, "cube count overflows"))?;
                        (ImageDimension::Cube, faces, format)
                    }
                    RESOURCE_DIMENSION_TEXTURE2D => (ImageDimension::D2, layers, format),
                    RESOURCE_DIMENSION_TEXTURE3D => {
                        (ImageDimension::D3, self.depth.max(1), format)
                    }
                    other => {
                        return Err(ImageError::decode(
                            NAME,
                            format!("unsupported resource dimension {other}"),
                        ));
                    }
                }
            }
            None => {
                let format = legacy_format(&self.pixel_format).ok_or_else(|| {
                    ImageError::decode(NAME, "unsupported legacy pixel format")
                })?;
                if self.caps2 & CAPS2_CUBEMAP != 0 {
                    if self.caps2 & CAPS2_CUBEMAP_ALL_FACES != CAPS2_CUBEMAP_ALL_FACES {
                        return Err(ImageError::decode(NAME, "partial cube maps are not supported"));
                    }
                    (ImageDimension::Cube, 6, format)
                } else if self.caps2 & CAPS2_VOLUME != 0 && self.flags & FLAG_DEPTH != 0 {
                    (ImageDimension::D3, self.depth.max(1), format)
                } else {
                    (ImageDimension::D2, 1, format)
                }
            }
        };
        let height = if dimension == ImageDimension::D1 {
            1
        } else {
            self.height
        };

        Ok(ImageDesc {
            dimension,
            format,
            width: self.width,
            height,
            depth_or_array_layers,
            mip_level_count,
        })
    }
}

fn legacy_format(pf: &LegacyPixelFormat) -> Option<PixelFormat> {
    if pf.flags & PF_FOURCC != 0 {
        return match &pf.fourcc {
            b"DXT1" => Some(PixelFormat::BC1RGBAUnorm),
            b"DXT2" | b"DXT3" => Some(PixelFormat::BC2RGBAUnorm),
            b"DXT4" | b"DXT5" => Some(PixelFormat::BC3RGBAUnorm),
            b"ATI1" | b"BC4U" => Some(PixelFormat::BC4RUnorm),
            b"BC4S" => Some(PixelFormat::BC4RSnorm),
            b"ATI2" | b"BC5U" => Some(PixelFormat::BC5RGUnorm),
            b"BC5S" => Some(PixelFormat::BC5RGSnorm),
            // D3DFMT codes stored as a little-endian integer
            _ => match u32::from_le_bytes(pf.fourcc) {
                36 => Some(PixelFormat::RGBA16Unorm),
                110 => Some(PixelFormat::RGBA16Snorm),
                111 => Some(PixelFormat::R16Float),
                112 => Some(PixelFormat::RG16Float),
                113 => Some(PixelFormat::RGBA16Float),
                114 => Some(PixelFormat::R32Float),
                115 => Some(PixelFormat::RG32Float),
                116 => Some(PixelFormat::RGBA32Float),
                _ => None,
            },
        };
    }

    let [r, g, b, a] = pf.masks;
    let has_alpha = pf.flags & PF_ALPHAPIXELS != 0;
    if pf.flags & PF_RGB != 0 {
        return match (pf.rgb_bit_count, r, g, b, if has_alpha { a } else { 0 }) {
            (32, 0xFF, 0xFF00, 0xFF_0000, 0xFF00_0000) => Some(PixelFormat::RGBA8Unorm),
            (32, 0xFF_0000, 0xFF00, 0xFF, 0xFF00_0000) => Some(PixelFormat::BGRA8Unorm),
            (32, 0xFFFF, 0xFFFF_0000, 0, 0) => Some(PixelFormat::RG16Unorm),
            (32, 0x3FF, 0xF_FC00, 0x3FF0_0000, 0xC000_0000) => Some(PixelFormat::RGB10A2Unorm),
            (16, 0xF800, 0x7E0, 0x1F, 0) => Some(PixelFormat::B5G6R5Unorm),
            (16, 0x7C00, 0x3E0, 0x1F, 0x8000) => Some(PixelFormat::BGR5A1Unorm),
            (16, 0xF00, 0xF0, 0xF, 0xF000) => Some(PixelFormat::BGRA4Unorm),
            _ => None,
        };
    }
    if pf.flags & PF_LUMINANCE != 0 {
        return match (pf.rgb_bit_count, r, if has_alpha { a } else { 0 }) {
            (8, 0xFF, 0) => Some(PixelFormat::R8Unorm),
            (16, 0xFFFF, 0) => Some(PixelFormat::R16Unorm),
            (16, 0xFF, 0xFF00) => Some(PixelFormat::RG8Unorm),
            _ => None,
        };
    }
    None
}

fn dxgi_format(code: u32) -> Option<PixelFormat> {
    Some(match code {
        2 => PixelFormat::RGBA32Float,
        3 => PixelFormat::RGBA32Uint,
        4 => PixelFormat::RGBA32Sint,
        10 => PixelFormat::RGBA16Float,
        11 => PixelFormat::RGBA16Unorm,
        12 => PixelFormat::RGBA16Uint,
        13 => PixelFormat::RGBA16Snorm,
        14 => PixelFormat::RGBA16Sint,
        16 => PixelFormat::RG32Float,
        17 => PixelFormat::RG32Uint,
        18 => PixelFormat::RG32Sint,
        20 => PixelFormat::Depth32FloatStencil8,
        24 => PixelFormat::RGB10A2Unorm,
        25 => PixelFormat::RGB10A2Uint,
        26 => PixelFormat::RG11B10UFloat,
        28 => PixelFormat::RGBA8Unorm,
        29 => PixelFormat::RGBA8UnormSrgb,
        30 => PixelFormat::RGBA8Uint,
        31 => PixelFormat::RGBA8Snorm,
        32 => PixelFormat::RGBA8Sint,
        34 => PixelFormat::RG16Float,
        35 => PixelFormat::RG16Unorm,
        36 => PixelFormat::RG16Uint,
        37 => PixelFormat::RG16Snorm,
        38 => PixelFormat::RG16Sint,
        40 => PixelFormat::Depth32Float,
        41 => PixelFormat::R32Float,
        42 => PixelFormat::R32Uint,
        43 => PixelFormat::R32Sint,
        45 => PixelFormat::Depth24UnormStencil8,
        49 => PixelFormat::RG8Unorm,
        50 => PixelFormat::RG8Uint,
        51 => PixelFormat::RG8Snorm,
        52 => PixelFormat::RG8Sint,
        54 => PixelFormat::R16Float,
        55 => PixelFormat::Depth16Unorm,
        56 => PixelFormat::R16Unorm,
        57 => PixelFormat::R16Uint,
        58 => PixelFormat::R16Snorm,
        59 => PixelFormat::R16Sint,
        61 => PixelFormat::R8Unorm,
        62 => PixelFormat::R8Uint,
        63 => PixelFormat::R8Snorm,
        64 => PixelFormat::R8Sint,
        67 => PixelFormat::RGB9E5UFloat,
        71 => PixelFormat::BC1RGBAUnorm,
        72 => PixelFormat::BC1RGBAUnormSrgb,
        74 => PixelFormat::BC2RGBAUnorm,
        75 => PixelFormat::BC2RGBAUnormSrgb,
        77 => PixelFormat::BC3RGBAUnorm,
        78 => PixelFormat::BC3RGBAUnormSrgb,
        80 => PixelFormat::BC4RUnorm,
        81 => PixelFormat::BC4RSnorm,
        83 => PixelFormat::BC5RGUnorm,
        84 => PixelFormat::BC5RGSnorm,
        85 => PixelFormat::B5G6R5Unorm,
        86 => PixelFormat::BGR5A1Unorm,
        87 => PixelFormat::BGRA8Unorm,
        91 => PixelFormat::BGRA8UnormSrgb,
        95 => PixelFormat::BC6HRGBUfloat,
        96 => PixelFormat::BC6HRGBFloat,
        98 => PixelFormat::BC7RGBAUnorm,
        99 => PixelFormat::BC7RGBAUnormSrgb,
        115 => PixelFormat::BGRA4Unorm,
        _ => return None,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) struct DdsBuilder {
        flags: u32,
        width: u32,
        height: u32,
        depth: u32,
        mips: u32,
        pf_flags: u32,
        fourcc: [u8; 4],
        bit_count: u32,
        masks: [u32; 4],
        caps2: u32,
        dx10: Option<[u32; 5]>,
    }

    impl DdsBuilder {
        pub(crate) fn fourcc(code: &[u8; 4], width: u32, height: u32, mips: u32) -> Self {
            Self {
                flags: 0x1007,
                width,
                height,
                depth: 0,
                mips,
                pf_flags: PF_FOURCC,
                fourcc: *code,
                bit_count: 0,
                masks: [0; 4],
                caps2: 0,
                dx10: None,
            }
        }

        fn masks(bit_count: u32, pf_flags: u32, masks: [u32; 4], width: u32, height: u32) -> Self {
            Self {
                pf_flags,
                fourcc: [0; 4],
                bit_count,
                masks,
                ..Self::fourcc(b"\0\0\0\0", width, height, 1)
            }
        }

        fn dx10(dxgi: u32, dimension: u32, misc: u32, array: u32, w: u32, h: u32, mips: u32) -> Self {
            Self {
                dx10: Some([dxgi, dimension, misc, array, 0]),
                ..Self::fourcc(b"DX10", w, h, mips)
            }
        }

        pub(crate) fn build(&self, payload: &[u8]) -> Vec<u8> {
            let mut out = Vec::new();
            out.extend_from_slice(b"DDS ");
            let mut header = [0u32; 31];
            header[0] = HEADER_SIZE;
            header[1] = self.flags;
            header[2] = self.height;
            header[3] = self.width;
            header[5] = self.depth;
            header[6] = self.mips;
            header[18] = PIXEL_FORMAT_SIZE;
            header[19] = self.pf_flags;
            header[20] = u32::from_le_bytes(self.fourcc);
            header[21] = self.bit_count;
            header[22..26].copy_from_slice(&self.masks);
            header[26] = 0x1000;
            header[27] = self.caps2;
            for word in header {
                out.extend_from_slice(&word.to_le_bytes());
            }
            if let Some(dx10) = self.dx10 {
                for word in dx10 {
                    out.extend_from_slice(&word.to_le_bytes());
                }
            }
            out.extend_from_slice(payload);
            out
        }
    }

    fn ramp(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i * 31 % 251) as u8).collect()
    }

    fn decode(bytes: &[u8]) -> Result<Option<Image>, ImageError> {
        DdsDecoder.try_decode(&ImageContext::new(), bytes)
    }

    #[test]
    fn ignores_other_containers() {
        assert!(decode(b"\x89PNG\r\n\x1a\n").unwrap().is_none());
        assert!(decode(&[]).unwrap().is_none());
    }

    #[test]
    fn bc1_mip_chain() {
        // 8x8: 32 + 8 + 8 + 8 bytes
        let payload = ramp(56);
        let bytes = DdsBuilder::fourcc(b"DXT1", 8, 8, 4).build(&payload);
        let image = decode(&bytes).unwrap().unwrap();
        assert_eq!(image.format(), PixelFormat::BC1RGBAUnorm);
        assert_eq!(image.mip_level_count(), 4);
        assert_eq!(image.pixels(), &payload[..]);
        assert_eq!(image.level(1, 0).unwrap().pixels(), &payload[32..40]);
    }

    #[test]
    fn legacy_rgba_masks() {
        let payload = ramp(4 * 2 * 4);
        let bytes = DdsBuilder::masks(
            32,
            PF_RGB | PF_ALPHAPIXELS,
            [0xFF, 0xFF00, 0xFF_0000, 0xFF00_0000],
            4,
            2,
        )
        .build(&payload);
        let image = decode(&bytes).unwrap().unwrap();
        assert_eq!(image.format(), PixelFormat::RGBA8Unorm);
        assert_eq!(image.width(0), 4);
        assert_eq!(image.height(0), 2);
        assert_eq!(image.pixels(), &payload[..]);
    }

    #[test]
    fn legacy_bgra_and_luminance() {
        let bgra = DdsBuilder::masks(
            32,
            PF_RGB | PF_ALPHAPIXELS,
            [0xFF_0000, 0xFF00, 0xFF, 0xFF00_0000],
            1,
            1,
        )
        .build(&[1, 2, 3, 4]);
        assert_eq!(decode(&bgra).unwrap().unwrap().format(), PixelFormat::BGRA8Unorm);

        let lum = DdsBuilder::masks(8, PF_LUMINANCE, [0xFF, 0, 0, 0], 2, 2).build(&[9; 4]);
        assert_eq!(decode(&lum).unwrap().unwrap().format(), PixelFormat::R8Unorm);

        let rgb565 = DdsBuilder::masks(16, PF_RGB, [0xF800, 0x7E0, 0x1F, 0], 2, 1).build(&[0; 4]);
        assert_eq!(decode(&rgb565).unwrap().unwrap().format(), PixelFormat::B5G6R5Unorm);
    }

    #[test]
    fn legacy_float_fourcc() {
        let bytes = DdsBuilder::fourcc(&116u32.to_le_bytes(), 1, 1, 1).build(&[0; 16]);
        assert_eq!(decode(&bytes).unwrap().unwrap().format(), PixelFormat::RGBA32Float);
    }

    #[test]
    fn legacy_cube_map() {
        let mut builder = DdsBuilder::masks(
            32,
            PF_RGB | PF_ALPHAPIXELS,
            [0xFF, 0xFF00, 0xFF_0000, 0xFF00_0000],
            2,
            2,
        );
        builder.caps2 = CAPS2_CUBEMAP | CAPS2_CUBEMAP_ALL_FACES;
        let payload = ramp(6 * 16);
        let image = decode(&builder.build(&payload)).unwrap().unwrap();
        assert_eq!(image.dimension(), ImageDimension::Cube);
        assert_eq!(image.array_layers(), 6);
        assert_eq!(image.level(0, 5).unwrap().pixels(), &payload[80..96]);

        builder.caps2 = CAPS2_CUBEMAP | 0x400;
        assert!(decode(&builder.build(&payload)).is_err());
    }

    #[test]
    fn legacy_volume() {
        let mut builder = DdsBuilder::masks(8, PF_LUMINANCE, [0xFF, 0, 0, 0], 4, 4);
        builder.flags |= FLAG_DEPTH;
        builder.depth = 4;
        builder.mips = 3;
        builder.caps2 = CAPS2_VOLUME;
        let payload = ramp(73);
        let image = decode(&builder.build(&payload)).unwrap().unwrap();
        assert_eq!(image.dimension(), ImageDimension::D3);
        assert_eq!(image.depth(1), 2);
        assert_eq!(image.level(2, 0).unwrap().pixels(), &payload[72..73]);
    }

    #[test]
    fn dx10_texture_array() {
        // R16_FLOAT 4x4, 3 mips (32 + 8 + 2 bytes) per layer, 3 layers
        let payload = ramp(3 * 42);
        let bytes = DdsBuilder::dx10(54, RESOURCE_DIMENSION_TEXTURE2D, 0, 3, 4, 4, 3).build(&payload);
        let image = decode(&bytes).unwrap().unwrap();
        assert_eq!(image.format(), PixelFormat::R16Float);
        assert_eq!(image.array_layers(), 3);
        assert_eq!(image.levels().len(), 9);
        assert_eq!(image.level(0, 1).unwrap().pixels(), &payload[42..74]);
    }

    #[test]
    fn dx10_cube_array_and_srgb() {
        let payload = ramp(12 * 16);
        let bytes =
            DdsBuilder::dx10(72, RESOURCE_DIMENSION_TEXTURE2D, MISC_TEXTURECUBE, 2, 4, 4, 1)
                .build(&payload);
        let image = decode(&bytes).unwrap().unwrap();
        assert_eq!(image.format(), PixelFormat::BC1RGBAUnormSrgb);
        assert_eq!(image.dimension(), ImageDimension::Cube);
        assert_eq!(image.array_layers(), 12);
    }

    #[test]
    fn dx10_one_dimensional() {
        let bytes = DdsBuilder::dx10(61, RESOURCE_DIMENSION_TEXTURE1D, 0, 1, 8, 1, 0).build(&ramp(15));
        let image = decode(&bytes).unwrap();
        // mip count 0 in the header means a single level
        let image = image.unwrap();
        assert_eq!(image.dimension(), ImageDimension::D1);
        assert_eq!(image.mip_level_count(), 1);
        assert_eq!(image.height(0), 1);
    }

    #[test]
    fn header_only_file_never_reaches_the_allocator() {
        use crate::{PixelAllocator, SystemAllocator};
        use std::sync::{Arc, Mutex};

        #[derive(Default)]
        struct Recording(Mutex<Vec<usize>>);
        impl PixelAllocator for Arc<Recording> {
            fn allocate(&self, size: usize) -> Option<Vec<u8>> {
                self.0.lock().unwrap().push(size);
                SystemAllocator.allocate(size)
            }
        }

        let requests = Arc::new(Recording::default());
        let ctx = ImageContext::new().with_allocator(requests.clone());
        // RGBA32Float 16384x16384 would need 4 GiB
        let bytes = DdsBuilder::dx10(2, RESOURCE_DIMENSION_TEXTURE2D, 0, 1, 16_384, 16_384, 1)
            .build(&[]);
        assert_eq!(bytes.len(), 148);
        let err = DdsDecoder.try_decode(&ctx, &bytes).unwrap_err();
        assert!(matches!(err, ImageError::Decode { codec: "DDS", .. }));
        assert!(requests.0.lock().unwrap().is_empty());

        let bytes = DdsBuilder::dx10(2, RESOURCE_DIMENSION_TEXTURE2D, 0, 1, 2, 2, 1).build(&[0; 64]);
        assert!(DdsDecoder.try_decode(&ctx, &bytes).unwrap().is_some());
        assert_eq!(*requests.0.lock().unwrap(), [64]);
    }

    #[test]
    fn recognized_but_broken() {
        let truncated = DdsBuilder::fourcc(b"DXT5", 8, 8, 1).build(&[0; 10]);
        assert!(matches!(decode(&truncated), Err(ImageError::Decode { codec: "DDS", .. })));

        let unknown = DdsBuilder::fourcc(b"ETC2", 4, 4, 1).build(&[0; 16]);
        assert!(matches!(decode(&unknown), Err(ImageError::Decode { .. })));

        let unknown_dxgi = DdsBuilder::dx10(100, RESOURCE_DIMENSION_TEXTURE2D, 0, 1, 4, 4, 1)
            .build(&[0; 64]);
        assert!(decode(&unknown_dxgi).is_err());

        assert!(decode(b"DDS \x7c\x00").is_err());

        // a header-only legacy file must not reach the allocator
        let header_only = DdsBuilder::fourcc(&116u32.to_le_bytes(), 16_384, 16_384, 1).build(&[]);
        assert!(matches!(decode(&header_only), Err(ImageError::Decode { .. })));

        let too_many_mips = DdsBuilder::fourcc(b"DXT1", 4, 4, 5).build(&[0; 64]);
        assert!(matches!(
            decode(&too_many_mips),
            Err(ImageError::MipLevelOverflow { .. })
        ));
    }
}
