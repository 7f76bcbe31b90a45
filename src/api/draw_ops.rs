//! Draw, clear and queue entry points, the only places the backend
//! adapter actually runs the pipeline.

use crate::context::Context;
use crate::device::adapter::DrawRange;
use crate::device::{ClearFlags, Primitive};
use crate::errors::{ErrorCode, GlResult};
use crate::state::ScalarType;

use super::types::*;
use super::op;

/// Rendering requires a complete draw surface.
fn check_framebuffer(ctx: &Context) -> GlResult<()> {
    let binding = ctx.state.bindings.framebuffer;
    let complete = ctx
        .framebuffers
        .get(binding)
        .map(|fb| fb.status(&ctx.resources.borrow()) == FRAMEBUFFER_COMPLETE_OES)
        .unwrap_or(true);

    if complete {
        Ok(())
    } else {
        Err(ErrorCode::InvalidFramebufferOperation)
    }
}

/// Per the legacy spec, geometry only flows when the vertex array is
/// enabled; a draw without it is a silent no-op. An enabled array whose
/// pointer was never backed by a buffer cannot be sourced on this surface.
fn check_arrays(ctx: &Context) -> GlResult<bool> {
    let arrays = &ctx.state.arrays;
    if !arrays.vertex.enabled {
        return Ok(false);
    }
    if arrays.vertex.buffer == 0 {
        return Err(ErrorCode::InvalidOperation);
    }

    for pointer in [&arrays.normal, &arrays.color, &arrays.point_size].iter() {
        if pointer.enabled && pointer.buffer == 0 {
            return Err(ErrorCode::InvalidOperation);
        }
    }
    for pointer in &arrays.tex_coords {
        if pointer.enabled && pointer.buffer == 0 {
            return Err(ErrorCode::InvalidOperation);
        }
    }

    Ok(true)
}

fn dispatch_draw(ctx: &mut Context, primitive: Primitive, range: DrawRange) -> GlResult<()> {
    check_framebuffer(ctx)?;
    if !check_arrays(ctx)? {
        return Ok(());
    }

    let resources = ctx.resources.clone();
    let resources = resources.borrow();
    if let Err(err) = ctx.adapter.draw(
        &ctx.state,
        &resources,
        &ctx.caps,
        &mut ctx.cache,
        primitive,
        range,
    ) {
        drop(resources);
        ctx.report_internal("draw", &err);
    }
    Ok(())
}

pub fn draw_arrays(mode: GLenum, first: GLint, count: GLsizei) {
    op(|ctx| {
        let primitive = Primitive::from_gl(mode).ok_or(ErrorCode::InvalidEnum)?;
        if first < 0 || count < 0 {
            return Err(ErrorCode::InvalidValue);
        }
        if count == 0 {
            return Ok(());
        }

        dispatch_draw(ctx, primitive, DrawRange::Arrays { first, count })
    })
}

pub fn draw_elements(mode: GLenum, count: GLsizei, ty: GLenum, offset: usize) {
    op(|ctx| {
        let primitive = Primitive::from_gl(mode).ok_or(ErrorCode::InvalidEnum)?;
        let index_type = match ScalarType::from_gl(ty) {
            Some(v @ ScalarType::UnsignedByte) | Some(v @ ScalarType::UnsignedShort) => v,
            _ => return Err(ErrorCode::InvalidEnum),
        };
        if count < 0 {
            return Err(ErrorCode::InvalidValue);
        }
        if count == 0 {
            return Ok(());
        }

        let buffer = ctx.state.arrays.element_buffer;
        if buffer == 0 {
            // Client-side index arrays are not representable here.
            return Err(ErrorCode::InvalidOperation);
        }

        let end = offset + count as usize * index_type.size();
        let in_bounds = ctx
            .resources
            .borrow()
            .buffers
            .get(buffer)
            .map_or(false, |entry| end <= entry.size());
        if !in_bounds {
            return Err(ErrorCode::InvalidOperation);
        }

        dispatch_draw(
            ctx,
            primitive,
            DrawRange::Elements {
                buffer,
                ty: index_type,
                offset,
                count,
            },
        )
    })
}

pub fn clear(mask: GLbitfield) {
    op(|ctx| {
        if mask & !(COLOR_BUFFER_BIT | DEPTH_BUFFER_BIT | STENCIL_BUFFER_BIT) != 0 {
            return Err(ErrorCode::InvalidValue);
        }
        check_framebuffer(ctx)?;

        let mut flags = ClearFlags::empty();
        if mask & COLOR_BUFFER_BIT != 0 {
            flags |= ClearFlags::COLOR;
        }
        if mask & DEPTH_BUFFER_BIT != 0 {
            flags |= ClearFlags::DEPTH;
        }
        if mask & STENCIL_BUFFER_BIT != 0 {
            flags |= ClearFlags::STENCIL;
        }

        if flags.is_empty() {
            return Ok(());
        }

        if let Err(err) = ctx.adapter.clear(&ctx.state, flags) {
            ctx.report_internal("clear", &err);
        }
        Ok(())
    })
}

pub fn flush() {
    op(|ctx| {
        if let Err(err) = ctx.adapter.flush() {
            ctx.report_internal("flush", &err);
        }
        Ok(())
    })
}

pub fn finish() {
    op(|ctx| {
        if let Err(err) = ctx.adapter.finish() {
            ctx.report_internal("finish", &err);
        }

        // All previously submitted work is now retired.
        for fence in ctx.fences.handles() {
            if let Some(fence) = ctx.fences.get_mut(fence) {
                fence.complete();
            }
        }
        Ok(())
    })
}
