//! Texture objects: per-level metadata, sampler parameters and delegation
//! of the byte-level work to the device.

use crate::api::types::*;
use crate::device::Device;
use crate::errors::Result;

/// The five client formats of the legacy API. The base format of the level
/// 0 image selects the env-mode code path in synthesized shaders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TexFormat {
    Alpha,
    Rgb,
    Rgba,
    Luminance,
    LuminanceAlpha,
}

impl TexFormat {
    pub fn from_gl(v: GLenum) -> Option<TexFormat> {
        match v {
            ALPHA => Some(TexFormat::Alpha),
            RGB => Some(TexFormat::Rgb),
            RGBA => Some(TexFormat::Rgba),
            LUMINANCE => Some(TexFormat::Luminance),
            LUMINANCE_ALPHA => Some(TexFormat::LuminanceAlpha),
            _ => None,
        }
    }

    pub fn as_gl(self) -> GLenum {
        match self {
            TexFormat::Alpha => ALPHA,
            TexFormat::Rgb => RGB,
            TexFormat::Rgba => RGBA,
            TexFormat::Luminance => LUMINANCE,
            TexFormat::LuminanceAlpha => LUMINANCE_ALPHA,
        }
    }

    pub fn components(self) -> usize {
        match self {
            TexFormat::Alpha | TexFormat::Luminance => 1,
            TexFormat::LuminanceAlpha => 2,
            TexFormat::Rgb => 3,
            TexFormat::Rgba => 4,
        }
    }

    pub fn has_alpha(self) -> bool {
        match self {
            TexFormat::Alpha | TexFormat::Rgba | TexFormat::LuminanceAlpha => true,
            _ => false,
        }
    }
}

/// Texel storage type; the packed 16-bit types are only valid for the
/// format they were defined for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TexelType {
    UnsignedByte,
    UnsignedShort565,
    UnsignedShort4444,
    UnsignedShort5551,
}

impl TexelType {
    pub fn from_gl(v: GLenum) -> Option<TexelType> {
        match v {
            UNSIGNED_BYTE => Some(TexelType::UnsignedByte),
            UNSIGNED_SHORT_5_6_5 => Some(TexelType::UnsignedShort565),
            UNSIGNED_SHORT_4_4_4_4 => Some(TexelType::UnsignedShort4444),
            UNSIGNED_SHORT_5_5_5_1 => Some(TexelType::UnsignedShort5551),
            _ => None,
        }
    }

    /// The formats each type may legally carry.
    pub fn matches(self, format: TexFormat) -> bool {
        match self {
            TexelType::UnsignedByte => true,
            TexelType::UnsignedShort565 => format == TexFormat::Rgb,
            TexelType::UnsignedShort4444 | TexelType::UnsignedShort5551 => {
                format == TexFormat::Rgba
            }
        }
    }

    /// Bytes per texel for `format`.
    pub fn texel_size(self, format: TexFormat) -> usize {
        match self {
            TexelType::UnsignedByte => format.components(),
            _ => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureFilter {
    Nearest,
    Linear,
    NearestMipmapNearest,
    LinearMipmapNearest,
    NearestMipmapLinear,
    LinearMipmapLinear,
}

impl TextureFilter {
    pub fn from_gl_min(v: GLenum) -> Option<TextureFilter> {
        match v {
            NEAREST => Some(TextureFilter::Nearest),
            LINEAR => Some(TextureFilter::Linear),
            NEAREST_MIPMAP_NEAREST => Some(TextureFilter::NearestMipmapNearest),
            LINEAR_MIPMAP_NEAREST => Some(TextureFilter::LinearMipmapNearest),
            NEAREST_MIPMAP_LINEAR => Some(TextureFilter::NearestMipmapLinear),
            LINEAR_MIPMAP_LINEAR => Some(TextureFilter::LinearMipmapLinear),
            _ => None,
        }
    }

    pub fn from_gl_mag(v: GLenum) -> Option<TextureFilter> {
        match v {
            NEAREST => Some(TextureFilter::Nearest),
            LINEAR => Some(TextureFilter::Linear),
            _ => None,
        }
    }

    pub fn as_gl(self) -> GLenum {
        match self {
            TextureFilter::Nearest => NEAREST,
            TextureFilter::Linear => LINEAR,
            TextureFilter::NearestMipmapNearest => NEAREST_MIPMAP_NEAREST,
            TextureFilter::LinearMipmapNearest => LINEAR_MIPMAP_NEAREST,
            TextureFilter::NearestMipmapLinear => NEAREST_MIPMAP_LINEAR,
            TextureFilter::LinearMipmapLinear => LINEAR_MIPMAP_LINEAR,
        }
    }

    pub fn needs_mipmaps(self) -> bool {
        match self {
            TextureFilter::Nearest | TextureFilter::Linear => false,
            _ => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureWrap {
    Repeat,
    ClampToEdge,
}

impl TextureWrap {
    pub fn from_gl(v: GLenum) -> Option<TextureWrap> {
        match v {
            REPEAT => Some(TextureWrap::Repeat),
            CLAMP_TO_EDGE => Some(TextureWrap::ClampToEdge),
            _ => None,
        }
    }

    pub fn as_gl(self) -> GLenum {
        match self {
            TextureWrap::Repeat => REPEAT,
            TextureWrap::ClampToEdge => CLAMP_TO_EDGE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplerState {
    pub min_filter: TextureFilter,
    pub mag_filter: TextureFilter,
    pub wrap_s: TextureWrap,
    pub wrap_t: TextureWrap,
    pub generate_mipmap: bool,
}

impl Default for SamplerState {
    fn default() -> Self {
        SamplerState {
            min_filter: TextureFilter::NearestMipmapLinear,
            mag_filter: TextureFilter::Linear,
            wrap_s: TextureWrap::Repeat,
            wrap_t: TextureWrap::Repeat,
            generate_mipmap: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureLevel {
    pub width: i32,
    pub height: i32,
    pub format: TexFormat,
    pub ty: TexelType,
}

/// A texture object. Object 0 exists per context but never receives
/// levels, so a unit bound to it never samples.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Texture {
    pub sampler: SamplerState,
    levels: Vec<Option<TextureLevel>>,
}

impl Texture {
    pub fn level(&self, level: i32) -> Option<&TextureLevel> {
        self.levels
            .get(level as usize)
            .and_then(|slot| slot.as_ref())
    }

    /// The base format of the level 0 image, if one was specified.
    pub fn base_format(&self) -> Option<TexFormat> {
        self.level(0).map(|lvl| lvl.format)
    }

    /// Mipmap-complete enough to sample: a level 0 image exists, and the
    /// min filter either needs no mipmaps or the chain was generated.
    pub fn is_complete(&self) -> bool {
        match self.level(0) {
            None => false,
            Some(base) => {
                if !self.sampler.min_filter.needs_mipmaps() {
                    return true;
                }

                let expected = mip_levels(base.width, base.height);
                (0..expected).all(|lvl| self.levels.get(lvl).map_or(false, Option::is_some))
            }
        }
    }

    /// Specifies the image for one level, replacing any previous one.
    pub fn set_data(
        &mut self,
        handle: u32,
        level: i32,
        format: TexFormat,
        width: i32,
        height: i32,
        ty: TexelType,
        data: Option<&[u8]>,
        device: &mut dyn Device,
    ) -> Result<()> {
        device.texture_data(handle, level, format, width, height, ty, data)?;

        let slot = level as usize;
        if self.levels.len() <= slot {
            self.levels.resize(slot + 1, None);
        }
        self.levels[slot] = Some(TextureLevel {
            width,
            height,
            format,
            ty,
        });

        if level == 0 && self.sampler.generate_mipmap {
            self.generate_mipmaps(handle, device)?;
        }

        Ok(())
    }

    /// Replaces a sub-rectangle of an existing level image.
    pub fn set_sub_data(
        &mut self,
        handle: u32,
        level: i32,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        data: &[u8],
        device: &mut dyn Device,
    ) -> Result<()> {
        device.texture_sub_data(handle, level, x, y, width, height, data)
    }

    /// Derives the complete mipmap chain from the level 0 image.
    pub fn generate_mipmaps(&mut self, handle: u32, device: &mut dyn Device) -> Result<()> {
        let base = match self.level(0) {
            Some(lvl) => *lvl,
            None => return Ok(()),
        };

        device.generate_mipmaps(handle)?;

        let count = mip_levels(base.width, base.height);
        self.levels.resize(count, None);
        let mut w = base.width;
        let mut h = base.height;
        for slot in self.levels.iter_mut() {
            *slot = Some(TextureLevel {
                width: w,
                height: h,
                format: base.format,
                ty: base.ty,
            });
            w = (w / 2).max(1);
            h = (h / 2).max(1);
        }

        Ok(())
    }
}

/// Number of levels in a full chain for a `width` x `height` base image.
pub fn mip_levels(width: i32, height: i32) -> usize {
    let mut size = width.max(height).max(1);
    let mut count = 1;
    while size > 1 {
        size /= 2;
        count += 1;
    }
    count
}

/// Bytes one row occupies in client memory under `alignment`.
pub fn row_size(width: i32, format: TexFormat, ty: TexelType, alignment: i32) -> usize {
    let raw = width as usize * ty.texel_size(format);
    let alignment = alignment as usize;
    (raw + alignment - 1) / alignment * alignment
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn mip_chain_length() {
        assert_eq!(mip_levels(1, 1), 1);
        assert_eq!(mip_levels(16, 16), 5);
        assert_eq!(mip_levels(64, 4), 7);
    }

    #[test]
    fn row_alignment() {
        assert_eq!(row_size(3, TexFormat::Rgb, TexelType::UnsignedByte, 4), 12);
        assert_eq!(row_size(3, TexFormat::Rgb, TexelType::UnsignedByte, 1), 9);
        assert_eq!(
            row_size(5, TexFormat::Rgb, TexelType::UnsignedShort565, 4),
            12
        );
    }
}
