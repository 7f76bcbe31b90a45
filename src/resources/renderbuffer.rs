use crate::api::types::*;
use crate::device::Device;
use crate::errors::Result;

/// Renderable storage formats of `OES_framebuffer_object`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderbufferFormat {
    Rgba4,
    Rgb5A1,
    Rgb565,
    Depth16,
    Stencil8,
}

impl RenderbufferFormat {
    pub fn from_gl(v: GLenum) -> Option<RenderbufferFormat> {
        match v {
            RGBA4_OES => Some(RenderbufferFormat::Rgba4),
            RGB5_A1_OES => Some(RenderbufferFormat::Rgb5A1),
            RGB565_OES => Some(RenderbufferFormat::Rgb565),
            DEPTH_COMPONENT16_OES => Some(RenderbufferFormat::Depth16),
            STENCIL_INDEX8_OES => Some(RenderbufferFormat::Stencil8),
            _ => None,
        }
    }

    pub fn as_gl(self) -> GLenum {
        match self {
            RenderbufferFormat::Rgba4 => RGBA4_OES,
            RenderbufferFormat::Rgb5A1 => RGB5_A1_OES,
            RenderbufferFormat::Rgb565 => RGB565_OES,
            RenderbufferFormat::Depth16 => DEPTH_COMPONENT16_OES,
            RenderbufferFormat::Stencil8 => STENCIL_INDEX8_OES,
        }
    }

    pub fn is_color(self) -> bool {
        match self {
            RenderbufferFormat::Rgba4 | RenderbufferFormat::Rgb5A1 | RenderbufferFormat::Rgb565 => {
                true
            }
            _ => false,
        }
    }

    pub fn is_depth(self) -> bool {
        self == RenderbufferFormat::Depth16
    }

    pub fn is_stencil(self) -> bool {
        self == RenderbufferFormat::Stencil8
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Renderbuffer {
    storage: Option<(RenderbufferFormat, i32, i32)>,
}

impl Renderbuffer {
    pub fn storage(&self) -> Option<(RenderbufferFormat, i32, i32)> {
        self.storage
    }

    /// Establishes (or replaces) the data store.
    pub fn set_storage(
        &mut self,
        handle: u32,
        format: RenderbufferFormat,
        width: i32,
        height: i32,
        device: &mut dyn Device,
    ) -> Result<()> {
        device.renderbuffer_storage(handle, format, width, height)?;
        self.storage = Some((format, width, height));
        Ok(())
    }
}
