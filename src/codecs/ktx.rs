//! Khronos texture (`.ktx2`) decoder.
//!
//! Only payloads stored in a Vulkan format from the pixel format table are
//! accepted. Supercompressed and Basis Universal files would need a
//! transcoder and are reported as decode errors, as are KTX1 files.
//!
//! Each KTX2 mip level holds every layer, face and depth slice of that mip,
//! so levels are copied one region at a time into the image layout.

use std::ops::Range;

use super::{HeaderReader, layout_within};
use crate::format::{KTX1_IDENTIFIER, KTX2_IDENTIFIER};
use crate::{
    Image, ImageContext, ImageDecoder, ImageDesc, ImageDimension, ImageError, ImageLayout,
    PixelFormat,
};

const NAME: &str = "KTX";
const LEVEL_INDEX_OFFSET: usize = 80;

/// Decoder for uncompressed-container KTX2 files.
#[derive(Clone, Copy, Debug, Default)]
pub struct KtxDecoder;

impl ImageDecoder for KtxDecoder {
    fn name(&self) -> &'static str {
        NAME
    }

    fn try_decode(&self, ctx: &ImageContext, data: &[u8]) -> Result<Option<Image>, ImageError> {
        if data.starts_with(&KTX1_IDENTIFIER) {
            return Err(ImageError::decode(NAME, "KTX1 files are not supported"));
        }
        if !data.starts_with(&KTX2_IDENTIFIER) {
            return Ok(None);
        }
        let header = Ktx2Header::parse(data)?;
        // every level lives inside the file, so the file length bounds the layout
        let layout = layout_within(ctx, NAME, &header.desc()?, data.len())?;
        let ranges = level_ranges(data, &layout)?;

        let mut image = ctx.create(&layout.desc)?;
        let desc = layout.desc;
        for (mip, range) in (0..).zip(ranges) {
            let mut cursor = range.start;
            for region in 0..regions_in(&desc, mip) {
                let mut dst = image.level_mut(mip, region).ok_or(ImageError::Layout {
                    reason: "region missing from layout",
                })?;
                let end = cursor + dst.level().slice_pitch;
                let src = data.get(cursor..end).ok_or(ImageError::Layout {
                    reason: "region outside its level",
                })?;
                dst.copy_from_slice(src)?;
                cursor = end;
            }
        }
        Ok(Some(image))
    }
}

/// Regions stored per mip: every layer or face, or every depth slice.
fn regions_in(desc: &ImageDesc, mip: u32) -> u32 {
    if desc.dimension == ImageDimension::D3 {
        desc.depth_at(mip)
    } else {
        desc.depth_or_array_layers
    }
}

/// Read the level index and check every level against the file and the
/// layout, before any pixel memory is allocated.
fn level_ranges(data: &[u8], layout: &ImageLayout) -> Result<Vec<Range<usize>>, ImageError> {
    let desc = &layout.desc;
    let mut r = HeaderReader::new(NAME, data, LEVEL_INDEX_OFFSET);
    let mut ranges = Vec::with_capacity(desc.mip_level_count as usize);
    for mip in 0..desc.mip_level_count {
        let offset = r.u64()?;
        let length = r.u64()?;
        let _uncompressed_length = r.u64()?;

        let expected = desc
            .level_index(mip, 0)
            .and_then(|i| layout.levels.get(i))
            .map_or(0, |level| level.slice_pitch * regions_in(desc, mip) as usize);
        if length < expected as u64 {
            return Err(ImageError::decode(
                NAME,
                format!("level {mip} holds {length} bytes, its layout needs {expected}"),
            ));
        }
        let range = usize::try_from(offset)
            .ok()
            .and_then(|start| Some(start..start.checked_add(expected)?))
            .filter(|range| range.end <= data.len())
            .ok_or_else(|| {
                ImageError::decode(NAME, format!("level {mip} lies past the end of the file"))
            })?;
        ranges.push(range);
    }
    Ok(ranges)
}

#[derive(Clone, Copy, Debug)]
struct Ktx2Header {
    vk_format: u32,
    width: u32,
    height: u32,
    depth: u32,
    layer_count: u32,
    face_count: u32,
    level_count: u32,
    supercompression_scheme: u32,
}

impl Ktx2Header {
    fn parse(data: &[u8]) -> Result<Self, ImageError> {
        let mut r = HeaderReader::new(NAME, data, KTX2_IDENTIFIER.len());
        let vk_format = r.u32()?;
        let _type_size = r.u32()?;
        Ok(Self {
            vk_format,
            width: r.u32()?,
            height: r.u32()?,
            depth: r.u32()?,
            layer_count: r.u32()?,
            face_count: r.u32()?,
            level_count: r.u32()?,
            supercompression_scheme: r.u32()?,
        })
    }

    fn desc(&self) -> Result<ImageDesc, ImageError> {
        if self.supercompression_scheme != 0 || self.vk_format == 0 {
            return Err(ImageError::decode(NAME, "payload needs transcoding"));
        }
        let format = vk_format(self.vk_format).ok_or_else(|| {
            ImageError::decode(NAME, format!("unsupported Vulkan format {}", self.vk_format))
        })?;
        let layers = self.layer_count.max(1);
        let (dimension, height, depth_or_array_layers) = match (self.face_count, self.height, self.depth) {
            (6, _, _) => {
                let faces = layers
                    .checked_mul(6)
                    .ok_or_else(|| ImageError::decode(NAME, "cube count overflows"))?;
                (ImageDimension::Cube, self.height, faces)
            }
            (1, 0, _) => (ImageDimension::D1, 1, layers),
            (1, _, 0) => (ImageDimension::D2, self.height, layers),
            (1, _, depth) if self.layer_count == 0 => (ImageDimension::D3, self.height, depth),
            (1, _, _) => return Err(ImageError::decode(NAME, "3D array textures are not supported")),
            (faces, _, _) => {
                return Err(ImageError::decode(NAME, format!("invalid face count {faces}")));
            }
        };
        Ok(ImageDesc {
            dimension,
            format,
            width: self.width,
            height,
            depth_or_array_layers,
            // 0 asks the loader to generate mips; only the base level is stored
            mip_level_count: self.level_count.max(1),
        })
    }
}

fn vk_format(code: u32) -> Option<PixelFormat> {
    Some(match code {
        4 => PixelFormat::B5G6R5Unorm,
        8 => PixelFormat::BGR5A1Unorm,
        9 => PixelFormat::R8Unorm,
        10 => PixelFormat::R8Snorm,
        13 => PixelFormat::R8Uint,
        14 => PixelFormat::R8Sint,
        16 => PixelFormat::RG8Unorm,
        17 => PixelFormat::RG8Snorm,
        20 => PixelFormat::RG8Uint,
        21 => PixelFormat::RG8Sint,
        37 => PixelFormat::RGBA8Unorm,
        38 => PixelFormat::RGBA8Snorm,
        41 => PixelFormat::RGBA8Uint,
        42 => PixelFormat::RGBA8Sint,
        43 => PixelFormat::RGBA8UnormSrgb,
        44 => PixelFormat::BGRA8Unorm,
        50 => PixelFormat::BGRA8UnormSrgb,
        64 => PixelFormat::RGB10A2Unorm,
        68 => PixelFormat::RGB10A2Uint,
        70 => PixelFormat::R16Unorm,
        71 => PixelFormat::R16Snorm,
        74 => PixelFormat::R16Uint,
        75 => PixelFormat::R16Sint,
        76 => PixelFormat::R16Float,
        77 => PixelFormat::RG16Unorm,
        78 => PixelFormat::RG16Snorm,
        81 => PixelFormat::RG16Uint,
        82 => PixelFormat::RG16Sint,
        83 => PixelFormat::RG16Float,
        91 => PixelFormat::RGBA16Unorm,
        92 => PixelFormat::RGBA16Snorm,
        95 => PixelFormat::RGBA16Uint,
        96 => PixelFormat::RGBA16Sint,
        97 => PixelFormat::RGBA16Float,
        98 => PixelFormat::R32Uint,
        99 => PixelFormat::R32Sint,
        100 => PixelFormat::R32Float,
        101 => PixelFormat::RG32Uint,
        102 => PixelFormat::RG32Sint,
        103 => PixelFormat::RG32Float,
        107 => PixelFormat::RGBA32Uint,
        108 => PixelFormat::RGBA32Sint,
        109 => PixelFormat::RGBA32Float,
        122 => PixelFormat::RG11B10UFloat,
        123 => PixelFormat::RGB9E5UFloat,
        124 => PixelFormat::Depth16Unorm,
        126 => PixelFormat::Depth32Float,
        129 => PixelFormat::Depth24UnormStencil8,
        130 => PixelFormat::Depth32FloatStencil8,
        // BC1 RGB and RGBA share a block layout
        131 | 133 => PixelFormat::BC1RGBAUnorm,
        132 | 134 => PixelFormat::BC1RGBAUnormSrgb,
        135 => PixelFormat::BC2RGBAUnorm,
        136 => PixelFormat::BC2RGBAUnormSrgb,
        137 => PixelFormat::BC3RGBAUnorm,
        138 => PixelFormat::BC3RGBAUnormSrgb,
        139 => PixelFormat::BC4RUnorm,
        140 => PixelFormat::BC4RSnorm,
        141 => PixelFormat::BC5RGUnorm,
        142 => PixelFormat::BC5RGSnorm,
        143 => PixelFormat::BC6HRGBUfloat,
        144 => PixelFormat::BC6HRGBFloat,
        145 => PixelFormat::BC7RGBAUnorm,
        146 => PixelFormat::BC7RGBAUnormSrgb,
        _ => return None,
    })
}
