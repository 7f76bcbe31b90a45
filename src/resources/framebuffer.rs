use crate::api::types::*;
use crate::resources::ResourceGroup;

/// One attachment point of a framebuffer: nothing, a texture level, or a
/// renderbuffer. Attaching replaces the previous value atomically from the
/// caller's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attachment {
    None,
    Texture { handle: u32, level: i32 },
    Renderbuffer { handle: u32 },
}

impl Attachment {
    pub fn object_name(self) -> u32 {
        match self {
            Attachment::None => 0,
            Attachment::Texture { handle, .. } => handle,
            Attachment::Renderbuffer { handle } => handle,
        }
    }
}

/// A framebuffer object. Object 0 is the protected default (the
/// window-system-provided framebuffer) and always reports complete.
#[derive(Debug, Clone, PartialEq)]
pub struct Framebuffer {
    pub is_default: bool,
    pub color: Attachment,
    pub depth: Attachment,
    pub stencil: Attachment,
}

impl Framebuffer {
    pub fn new() -> Self {
        Framebuffer {
            is_default: false,
            color: Attachment::None,
            depth: Attachment::None,
            stencil: Attachment::None,
        }
    }

    pub fn default_framebuffer() -> Self {
        Framebuffer {
            is_default: true,
            color: Attachment::None,
            depth: Attachment::None,
            stencil: Attachment::None,
        }
    }

    pub fn attachment(&self, point: GLenum) -> Option<Attachment> {
        match point {
            COLOR_ATTACHMENT0_OES => Some(self.color),
            DEPTH_ATTACHMENT_OES => Some(self.depth),
            STENCIL_ATTACHMENT_OES => Some(self.stencil),
            _ => None,
        }
    }

    pub fn set_attachment(&mut self, point: GLenum, value: Attachment) {
        match point {
            COLOR_ATTACHMENT0_OES => self.color = value,
            DEPTH_ATTACHMENT_OES => self.depth = value,
            STENCIL_ATTACHMENT_OES => self.stencil = value,
            _ => unreachable!("attachment point validated by the dispatch layer"),
        }
    }

    /// Drops every attachment referencing the deleted texture.
    pub fn detach_texture(&mut self, texture: u32) {
        for slot in [&mut self.color, &mut self.depth, &mut self.stencil].iter_mut() {
            if let Attachment::Texture { handle, .. } = **slot {
                if handle == texture {
                    **slot = Attachment::None;
                }
            }
        }
    }

    /// Drops every attachment referencing the deleted renderbuffer.
    pub fn detach_renderbuffer(&mut self, renderbuffer: u32) {
        for slot in [&mut self.color, &mut self.depth, &mut self.stencil].iter_mut() {
            if let Attachment::Renderbuffer { handle } = **slot {
                if handle == renderbuffer {
                    **slot = Attachment::None;
                }
            }
        }
    }

    /// Completeness per the extension's rules. The answer depends on the
    /// attached objects, so the resource group is consulted live.
    pub fn status(&self, resources: &ResourceGroup) -> GLenum {
        if self.is_default {
            return FRAMEBUFFER_COMPLETE_OES;
        }

        let mut dimensions: Option<(i32, i32)> = None;
        let mut any = false;

        let slots = [
            (self.color, COLOR_ATTACHMENT0_OES),
            (self.depth, DEPTH_ATTACHMENT_OES),
            (self.stencil, STENCIL_ATTACHMENT_OES),
        ];

        for (attachment, point) in slots.iter() {
            let (w, h) = match *attachment {
                Attachment::None => continue,
                Attachment::Texture { handle, level } => {
                    let texture = match resources.textures.get(handle) {
                        Some(v) => v,
                        None => return FRAMEBUFFER_INCOMPLETE_ATTACHMENT_OES,
                    };

                    // Only color-renderable images may back a texture
                    // attachment, and only at the color point.
                    if *point != COLOR_ATTACHMENT0_OES {
                        return FRAMEBUFFER_INCOMPLETE_ATTACHMENT_OES;
                    }

                    match texture.level(level) {
                        Some(image) => (image.width, image.height),
                        None => return FRAMEBUFFER_INCOMPLETE_ATTACHMENT_OES,
                    }
                }
                Attachment::Renderbuffer { handle } => {
                    let renderbuffer = match resources.renderbuffers.get(handle) {
                        Some(v) => v,
                        None => return FRAMEBUFFER_INCOMPLETE_ATTACHMENT_OES,
                    };

                    let (format, w, h) = match renderbuffer.storage() {
                        Some(v) => v,
                        None => return FRAMEBUFFER_INCOMPLETE_ATTACHMENT_OES,
                    };

                    let compatible = match *point {
                        COLOR_ATTACHMENT0_OES => format.is_color(),
                        DEPTH_ATTACHMENT_OES => format.is_depth(),
                        _ => format.is_stencil(),
                    };
                    if !compatible {
                        return FRAMEBUFFER_INCOMPLETE_ATTACHMENT_OES;
                    }

                    (w, h)
                }
            };

            if w == 0 || h == 0 {
                return FRAMEBUFFER_INCOMPLETE_ATTACHMENT_OES;
            }

            if let Some(existing) = dimensions {
                if existing != (w, h) {
                    return FRAMEBUFFER_INCOMPLETE_DIMENSIONS_OES;
                }
            }
            dimensions = Some((w, h));
            any = true;
        }

        if !any {
            return FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT_OES;
        }

        FRAMEBUFFER_COMPLETE_OES
    }
}
