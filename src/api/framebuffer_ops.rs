//! `OES_framebuffer_object` entry points.

use crate::context::Context;
use crate::device::FramebufferSlot;
use crate::errors::{ErrorCode, GlResult};
use crate::resources::{Attachment, Framebuffer, Renderbuffer, RenderbufferFormat};

use super::texture_ops::check_gen_count;
use super::types::*;
use super::{from_bool, op, with};

fn slot_of(attachment: GLenum) -> GlResult<FramebufferSlot> {
    match attachment {
        COLOR_ATTACHMENT0_OES => Ok(FramebufferSlot::Color),
        DEPTH_ATTACHMENT_OES => Ok(FramebufferSlot::Depth),
        STENCIL_ATTACHMENT_OES => Ok(FramebufferSlot::Stencil),
        _ => Err(ErrorCode::InvalidEnum),
    }
}

pub fn gen_renderbuffers_oes(n: GLsizei, renderbuffers: &mut [GLuint]) {
    op(|ctx| {
        let n = check_gen_count(n, renderbuffers.len())?;
        let resources = ctx.resources.clone();
        let mut resources = resources.borrow_mut();

        for i in 0..n {
            let handle = resources
                .renderbuffers
                .allocate(Renderbuffer::default(), false);
            if let Err(err) = ctx.adapter.device_mut().create_renderbuffer(handle) {
                resources.renderbuffers.erase(handle);
                for created in &renderbuffers[..i] {
                    let _ = ctx.adapter.device_mut().delete_renderbuffer(*created);
                    resources.renderbuffers.erase(*created);
                }
                ctx.report_internal("gen_renderbuffers", &err);
                return Err(ErrorCode::OutOfMemory);
            }
            renderbuffers[i] = handle;
        }
        Ok(())
    })
}

pub fn delete_renderbuffers_oes(n: GLsizei, renderbuffers: &[GLuint]) {
    op(|ctx| {
        let n = check_gen_count(n, renderbuffers.len())?;

        for &handle in &renderbuffers[..n] {
            if handle == 0 {
                continue;
            }

            if ctx
                .resources
                .borrow_mut()
                .renderbuffers
                .erase(handle)
                .is_none()
            {
                continue;
            }

            if ctx.state.bindings.renderbuffer == handle {
                ctx.state.bindings.renderbuffer = 0;
            }
            for fb in ctx.framebuffers.handles() {
                if let Some(fb) = ctx.framebuffers.get_mut(fb) {
                    fb.detach_renderbuffer(handle);
                }
            }

            if let Err(err) = ctx.adapter.device_mut().delete_renderbuffer(handle) {
                ctx.report_internal("delete_renderbuffers", &err);
            }
        }
        Ok(())
    })
}

pub fn bind_renderbuffer_oes(target: GLenum, renderbuffer: GLuint) {
    op(|ctx| {
        if target != RENDERBUFFER_OES {
            return Err(ErrorCode::InvalidEnum);
        }

        if renderbuffer != 0 && !ctx.resources.borrow().renderbuffers.contains(renderbuffer) {
            ctx.resources
                .borrow_mut()
                .renderbuffers
                .insert(renderbuffer, Renderbuffer::default(), false);
            if let Err(err) = ctx.adapter.device_mut().create_renderbuffer(renderbuffer) {
                ctx.resources.borrow_mut().renderbuffers.erase(renderbuffer);
                ctx.report_internal("bind_renderbuffer", &err);
                return Err(ErrorCode::OutOfMemory);
            }
        }

        ctx.state.bindings.renderbuffer = renderbuffer;
        Ok(())
    })
}

pub fn is_renderbuffer_oes(renderbuffer: GLuint) -> GLboolean {
    with(GL_FALSE, |ctx| {
        Ok(from_bool(
            renderbuffer != 0 && ctx.resources.borrow().renderbuffers.contains(renderbuffer),
        ))
    })
}

pub fn renderbuffer_storage_oes(
    target: GLenum,
    internal_format: GLenum,
    width: GLsizei,
    height: GLsizei,
) {
    op(|ctx| {
        if target != RENDERBUFFER_OES {
            return Err(ErrorCode::InvalidEnum);
        }
        let format =
            RenderbufferFormat::from_gl(internal_format).ok_or(ErrorCode::InvalidEnum)?;
        if width < 0
            || height < 0
            || width > ctx.caps.max_renderbuffer_size as GLsizei
            || height > ctx.caps.max_renderbuffer_size as GLsizei
        {
            return Err(ErrorCode::InvalidValue);
        }

        let handle = ctx.state.bindings.renderbuffer;
        if handle == 0 {
            return Err(ErrorCode::InvalidOperation);
        }

        let resources = ctx.resources.clone();
        let mut resources = resources.borrow_mut();
        let entry = resources
            .renderbuffers
            .get_mut(handle)
            .ok_or(ErrorCode::InvalidOperation)?;

        if let Err(err) =
            entry.set_storage(handle, format, width, height, ctx.adapter.device_mut())
        {
            ctx.report_internal("renderbuffer_storage", &err);
            return Err(ErrorCode::OutOfMemory);
        }
        Ok(())
    })
}

pub fn get_renderbuffer_parameteriv_oes(target: GLenum, pname: GLenum, params: &mut [GLint]) {
    op(|ctx| {
        if target != RENDERBUFFER_OES {
            return Err(ErrorCode::InvalidEnum);
        }

        let handle = ctx.state.bindings.renderbuffer;
        let resources = ctx.resources.borrow();
        let entry = resources
            .renderbuffers
            .get(handle)
            .ok_or(ErrorCode::InvalidOperation)?;

        let (format, width, height) = match entry.storage() {
            Some(v) => v,
            None => (RenderbufferFormat::Rgba4, 0, 0),
        };

        let slot = params.first_mut().ok_or(ErrorCode::InvalidValue)?;
        *slot = match pname {
            RENDERBUFFER_WIDTH_OES => width,
            RENDERBUFFER_HEIGHT_OES => height,
            RENDERBUFFER_INTERNAL_FORMAT_OES => format.as_gl() as GLint,
            _ => return Err(ErrorCode::InvalidEnum),
        };
        Ok(())
    })
}

pub fn gen_framebuffers_oes(n: GLsizei, framebuffers: &mut [GLuint]) {
    op(|ctx| {
        let n = check_gen_count(n, framebuffers.len())?;

        for i in 0..n {
            let handle = ctx.framebuffers.allocate(Framebuffer::new(), false);
            if let Err(err) = ctx.adapter.device_mut().create_framebuffer(handle) {
                ctx.framebuffers.erase(handle);
                for created in &framebuffers[..i] {
                    let _ = ctx.adapter.device_mut().delete_framebuffer(*created);
                    ctx.framebuffers.erase(*created);
                }
                ctx.report_internal("gen_framebuffers", &err);
                return Err(ErrorCode::OutOfMemory);
            }
            framebuffers[i] = handle;
        }
        Ok(())
    })
}

pub fn delete_framebuffers_oes(n: GLsizei, framebuffers: &[GLuint]) {
    op(|ctx| {
        let n = check_gen_count(n, framebuffers.len())?;

        for &handle in &framebuffers[..n] {
            if handle == 0 || ctx.framebuffers.erase(handle).is_none() {
                continue;
            }

            // Deleting the bound framebuffer rebinds the default one.
            if ctx.state.bindings.framebuffer == handle {
                ctx.state.bindings.framebuffer = 0;
                if let Err(err) = ctx.adapter.device_mut().bind_framebuffer(0) {
                    ctx.report_internal("delete_framebuffers", &err);
                }
            }

            if let Err(err) = ctx.adapter.device_mut().delete_framebuffer(handle) {
                ctx.report_internal("delete_framebuffers", &err);
            }
        }
        Ok(())
    })
}

pub fn bind_framebuffer_oes(target: GLenum, framebuffer: GLuint) {
    op(|ctx| {
        if target != FRAMEBUFFER_OES {
            return Err(ErrorCode::InvalidEnum);
        }

        if framebuffer != 0 && !ctx.framebuffers.contains(framebuffer) {
            ctx.framebuffers
                .insert(framebuffer, Framebuffer::new(), false);
            if let Err(err) = ctx.adapter.device_mut().create_framebuffer(framebuffer) {
                ctx.framebuffers.erase(framebuffer);
                ctx.report_internal("bind_framebuffer", &err);
                return Err(ErrorCode::OutOfMemory);
            }
        }

        ctx.state.bindings.framebuffer = framebuffer;
        if let Err(err) = ctx.adapter.device_mut().bind_framebuffer(framebuffer) {
            ctx.report_internal("bind_framebuffer", &err);
        }
        Ok(())
    })
}

pub fn is_framebuffer_oes(framebuffer: GLuint) -> GLboolean {
    with(GL_FALSE, |ctx| {
        Ok(from_bool(
            framebuffer != 0 && ctx.framebuffers.contains(framebuffer),
        ))
    })
}

pub fn check_framebuffer_status_oes(target: GLenum) -> GLenum {
    with(0, |ctx| {
        if target != FRAMEBUFFER_OES {
            return Err(ErrorCode::InvalidEnum);
        }

        let binding = ctx.state.bindings.framebuffer;
        let status = ctx
            .framebuffers
            .get(binding)
            .map(|fb| fb.status(&ctx.resources.borrow()))
            .unwrap_or(FRAMEBUFFER_COMPLETE_OES);
        Ok(status)
    })
}

/// Shared preamble of the two attach calls: the bound, non-default
/// framebuffer this context may mutate.
fn attachable(ctx: &Context, target: GLenum) -> GlResult<u32> {
    if target != FRAMEBUFFER_OES {
        return Err(ErrorCode::InvalidEnum);
    }

    let binding = ctx.state.bindings.framebuffer;
    if binding == 0 {
        return Err(ErrorCode::InvalidOperation);
    }
    Ok(binding)
}

pub fn framebuffer_texture_2d_oes(
    target: GLenum,
    attachment: GLenum,
    textarget: GLenum,
    texture: GLuint,
    level: GLint,
) {
    op(|ctx| {
        let slot = slot_of(attachment)?;
        let binding = attachable(ctx, target)?;

        if texture != 0 {
            if textarget != TEXTURE_2D {
                return Err(ErrorCode::InvalidEnum);
            }
            // The extension only allows level 0 attachments.
            if level != 0 {
                return Err(ErrorCode::InvalidValue);
            }
            if !ctx.resources.borrow().textures.contains(texture) {
                return Err(ErrorCode::InvalidOperation);
            }
        }

        let value = if texture == 0 {
            Attachment::None
        } else {
            Attachment::Texture {
                handle: texture,
                level,
            }
        };

        if let Some(fb) = ctx.framebuffers.get_mut(binding) {
            fb.set_attachment(attachment, value);
        }
        if let Err(err) = ctx
            .adapter
            .device_mut()
            .set_framebuffer_attachment(binding, slot, value)
        {
            ctx.report_internal("framebuffer_texture_2d", &err);
        }
        Ok(())
    })
}

pub fn framebuffer_renderbuffer_oes(
    target: GLenum,
    attachment: GLenum,
    renderbuffertarget: GLenum,
    renderbuffer: GLuint,
) {
    op(|ctx| {
        let slot = slot_of(attachment)?;
        let binding = attachable(ctx, target)?;

        if renderbuffer != 0 {
            if renderbuffertarget != RENDERBUFFER_OES {
                return Err(ErrorCode::InvalidEnum);
            }
            if !ctx.resources.borrow().renderbuffers.contains(renderbuffer) {
                return Err(ErrorCode::InvalidOperation);
            }
        }

        let value = if renderbuffer == 0 {
            Attachment::None
        } else {
            Attachment::Renderbuffer {
                handle: renderbuffer,
            }
        };

        if let Some(fb) = ctx.framebuffers.get_mut(binding) {
            fb.set_attachment(attachment, value);
        }
        if let Err(err) = ctx
            .adapter
            .device_mut()
            .set_framebuffer_attachment(binding, slot, value)
        {
            ctx.report_internal("framebuffer_renderbuffer", &err);
        }
        Ok(())
    })
}

pub fn get_framebuffer_attachment_parameteriv_oes(
    target: GLenum,
    attachment: GLenum,
    pname: GLenum,
    params: &mut [GLint],
) {
    op(|ctx| {
        if target != FRAMEBUFFER_OES {
            return Err(ErrorCode::InvalidEnum);
        }

        let binding = ctx.state.bindings.framebuffer;
        if binding == 0 {
            return Err(ErrorCode::InvalidOperation);
        }

        let value = ctx
            .framebuffers
            .get(binding)
            .and_then(|fb| fb.attachment(attachment))
            .ok_or(ErrorCode::InvalidEnum)?;

        let slot = params.first_mut().ok_or(ErrorCode::InvalidValue)?;
        *slot = match pname {
            FRAMEBUFFER_ATTACHMENT_OBJECT_TYPE_OES => match value {
                Attachment::None => NONE as GLint,
                Attachment::Texture { .. } => TEXTURE as GLint,
                Attachment::Renderbuffer { .. } => RENDERBUFFER_OES as GLint,
            },
            FRAMEBUFFER_ATTACHMENT_OBJECT_NAME_OES => value.object_name() as GLint,
            FRAMEBUFFER_ATTACHMENT_TEXTURE_LEVEL_OES => match value {
                Attachment::Texture { level, .. } => level,
                _ => 0,
            },
            _ => return Err(ErrorCode::InvalidEnum),
        };
        Ok(())
    })
}
