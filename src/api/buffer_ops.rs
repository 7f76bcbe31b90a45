//! Buffer object and vertex-array entry points.

use crate::context::Context;
use crate::errors::{ErrorCode, GlResult};
use crate::resources::{Buffer, BufferUsage};
use crate::state::{ArrayPointer, ScalarType, VertexArraySet};

use super::texture_ops::check_gen_count;
use super::types::*;
use super::{from_bool, op, with};

fn check_buffer_target(target: GLenum) -> GlResult<()> {
    match target {
        ARRAY_BUFFER | ELEMENT_ARRAY_BUFFER => Ok(()),
        _ => Err(ErrorCode::InvalidEnum),
    }
}

pub fn gen_buffers(n: GLsizei, buffers: &mut [GLuint]) {
    op(|ctx| {
        let n = check_gen_count(n, buffers.len())?;
        let resources = ctx.resources.clone();
        let mut resources = resources.borrow_mut();

        for i in 0..n {
            let handle = resources.buffers.allocate(Buffer::default(), false);
            if let Err(err) = ctx.adapter.device_mut().create_buffer(handle) {
                resources.buffers.erase(handle);
                for created in &buffers[..i] {
                    let _ = ctx.adapter.device_mut().delete_buffer(*created);
                    resources.buffers.erase(*created);
                }
                ctx.report_internal("gen_buffers", &err);
                return Err(ErrorCode::OutOfMemory);
            }
            buffers[i] = handle;
        }
        Ok(())
    })
}

pub fn delete_buffers(n: GLsizei, buffers: &[GLuint]) {
    op(|ctx| {
        let n = check_gen_count(n, buffers.len())?;

        for &handle in &buffers[..n] {
            if handle == 0 {
                continue;
            }

            if ctx.resources.borrow_mut().buffers.erase(handle).is_none() {
                continue;
            }

            // Delete-while-bound: the name disappears from the binding
            // points, the array pointers, and every stored vertex-array
            // set of this context.
            ctx.state.detach_buffer(handle);
            for set in ctx.vertex_arrays.handles() {
                if let Some(set) = ctx.vertex_arrays.get_mut(set) {
                    set.detach_buffer(handle);
                }
            }

            if let Err(err) = ctx.adapter.device_mut().delete_buffer(handle) {
                ctx.report_internal("delete_buffers", &err);
            }
        }
        Ok(())
    })
}

pub fn bind_buffer(target: GLenum, buffer: GLuint) {
    op(|ctx| {
        check_buffer_target(target)?;

        if buffer != 0 && !ctx.resources.borrow().buffers.contains(buffer) {
            ctx.resources
                .borrow_mut()
                .buffers
                .insert(buffer, Buffer::default(), false);
            if let Err(err) = ctx.adapter.device_mut().create_buffer(buffer) {
                ctx.resources.borrow_mut().buffers.erase(buffer);
                ctx.report_internal("bind_buffer", &err);
                return Err(ErrorCode::OutOfMemory);
            }
        }

        ctx.state.set_bound_buffer(target, buffer);
        Ok(())
    })
}

pub fn is_buffer(buffer: GLuint) -> GLboolean {
    with(GL_FALSE, |ctx| {
        Ok(from_bool(
            buffer != 0 && ctx.resources.borrow().buffers.contains(buffer),
        ))
    })
}

pub fn buffer_data(target: GLenum, size: GLsizeiptr, data: Option<&[u8]>, usage: GLenum) {
    op(|ctx| {
        check_buffer_target(target)?;
        let usage = BufferUsage::from_gl(usage).ok_or(ErrorCode::InvalidEnum)?;

        if size < 0 {
            return Err(ErrorCode::InvalidValue);
        }
        if let Some(bytes) = data {
            if bytes.len() < size as usize {
                return Err(ErrorCode::InvalidValue);
            }
        }

        let handle = ctx
            .state
            .bound_buffer(target)
            .filter(|&v| v != 0)
            .ok_or(ErrorCode::InvalidOperation)?;

        let resources = ctx.resources.clone();
        let mut resources = resources.borrow_mut();
        let entry = resources
            .buffers
            .get_mut(handle)
            .ok_or(ErrorCode::InvalidOperation)?;

        if let Err(err) = entry.set_data(
            handle,
            size as usize,
            usage,
            data.map(|bytes| &bytes[..size as usize]),
            ctx.adapter.device_mut(),
        ) {
            ctx.report_internal("buffer_data", &err);
            return Err(ErrorCode::OutOfMemory);
        }
        Ok(())
    })
}

pub fn buffer_sub_data(target: GLenum, offset: GLintptr, data: &[u8]) {
    op(|ctx| {
        check_buffer_target(target)?;

        if offset < 0 {
            return Err(ErrorCode::InvalidValue);
        }

        let handle = ctx
            .state
            .bound_buffer(target)
            .filter(|&v| v != 0)
            .ok_or(ErrorCode::InvalidOperation)?;

        let resources = ctx.resources.clone();
        let mut resources = resources.borrow_mut();
        let entry = resources
            .buffers
            .get_mut(handle)
            .ok_or(ErrorCode::InvalidOperation)?;

        if offset as usize + data.len() > entry.size() {
            return Err(ErrorCode::InvalidValue);
        }

        if let Err(err) = entry.set_sub_data(handle, offset as usize, data, ctx.adapter.device_mut())
        {
            ctx.report_internal("buffer_sub_data", &err);
        }
        Ok(())
    })
}

pub fn get_buffer_parameteriv(target: GLenum, pname: GLenum, params: &mut [GLint]) {
    op(|ctx| {
        check_buffer_target(target)?;

        let handle = ctx
            .state
            .bound_buffer(target)
            .filter(|&v| v != 0)
            .ok_or(ErrorCode::InvalidOperation)?;

        let resources = ctx.resources.borrow();
        let entry = resources
            .buffers
            .get(handle)
            .ok_or(ErrorCode::InvalidOperation)?;

        let slot = params.first_mut().ok_or(ErrorCode::InvalidValue)?;
        *slot = match pname {
            BUFFER_SIZE => entry.size() as GLint,
            BUFFER_USAGE => entry.usage().as_gl() as GLint,
            _ => return Err(ErrorCode::InvalidEnum),
        };
        Ok(())
    })
}

/// Shared tail of the `*_pointer` family: captures the currently bound
/// `ARRAY_BUFFER` alongside the layout.
fn set_pointer(
    ctx: &mut Context,
    select: impl FnOnce(&mut Context) -> &mut ArrayPointer,
    size: GLint,
    ty: ScalarType,
    stride: GLsizei,
    offset: usize,
) -> GlResult<()> {
    if stride < 0 {
        return Err(ErrorCode::InvalidValue);
    }

    let buffer = ctx.state.bindings.array_buffer;
    let pointer = select(ctx);
    pointer.size = size;
    pointer.ty = ty;
    pointer.stride = stride;
    pointer.offset = offset;
    pointer.buffer = buffer;
    Ok(())
}

pub fn vertex_pointer(size: GLint, ty: GLenum, stride: GLsizei, offset: usize) {
    op(|ctx| {
        let ty = match ScalarType::from_gl(ty) {
            Some(v @ ScalarType::Byte)
            | Some(v @ ScalarType::Short)
            | Some(v @ ScalarType::Float)
            | Some(v @ ScalarType::Fixed) => v,
            _ => return Err(ErrorCode::InvalidEnum),
        };
        if size < 2 || size > 4 {
            return Err(ErrorCode::InvalidValue);
        }

        set_pointer(ctx, |ctx| &mut ctx.state.arrays.vertex, size, ty, stride, offset)
    })
}

pub fn normal_pointer(ty: GLenum, stride: GLsizei, offset: usize) {
    op(|ctx| {
        let ty = match ScalarType::from_gl(ty) {
            Some(v @ ScalarType::Byte)
            | Some(v @ ScalarType::Short)
            | Some(v @ ScalarType::Float)
            | Some(v @ ScalarType::Fixed) => v,
            _ => return Err(ErrorCode::InvalidEnum),
        };

        set_pointer(ctx, |ctx| &mut ctx.state.arrays.normal, 3, ty, stride, offset)
    })
}

pub fn color_pointer(size: GLint, ty: GLenum, stride: GLsizei, offset: usize) {
    op(|ctx| {
        let ty = match ScalarType::from_gl(ty) {
            Some(v @ ScalarType::UnsignedByte)
            | Some(v @ ScalarType::Float)
            | Some(v @ ScalarType::Fixed) => v,
            _ => return Err(ErrorCode::InvalidEnum),
        };
        if size != 4 {
            return Err(ErrorCode::InvalidValue);
        }

        set_pointer(ctx, |ctx| &mut ctx.state.arrays.color, size, ty, stride, offset)
    })
}

pub fn tex_coord_pointer(size: GLint, ty: GLenum, stride: GLsizei, offset: usize) {
    op(|ctx| {
        let ty = match ScalarType::from_gl(ty) {
            Some(v @ ScalarType::Byte)
            | Some(v @ ScalarType::Short)
            | Some(v @ ScalarType::Float)
            | Some(v @ ScalarType::Fixed) => v,
            _ => return Err(ErrorCode::InvalidEnum),
        };
        if size < 2 || size > 4 {
            return Err(ErrorCode::InvalidValue);
        }

        let unit = ctx.state.bindings.client_active_texture;
        set_pointer(
            ctx,
            move |ctx| &mut ctx.state.arrays.tex_coords[unit],
            size,
            ty,
            stride,
            offset,
        )
    })
}

pub fn point_size_pointer_oes(ty: GLenum, stride: GLsizei, offset: usize) {
    op(|ctx| {
        let ty = match ScalarType::from_gl(ty) {
            Some(v @ ScalarType::Float) | Some(v @ ScalarType::Fixed) => v,
            _ => return Err(ErrorCode::InvalidEnum),
        };

        set_pointer(ctx, |ctx| &mut ctx.state.arrays.point_size, 1, ty, stride, offset)
    })
}

pub fn color4f(red: GLfloat, green: GLfloat, blue: GLfloat, alpha: GLfloat) {
    op(|ctx| {
        ctx.state.current.color = [red, green, blue, alpha];
        Ok(())
    })
}

pub fn color4ub(red: GLubyte, green: GLubyte, blue: GLubyte, alpha: GLubyte) {
    color4f(
        f32::from(red) / 255.0,
        f32::from(green) / 255.0,
        f32::from(blue) / 255.0,
        f32::from(alpha) / 255.0,
    )
}

pub fn normal3f(nx: GLfloat, ny: GLfloat, nz: GLfloat) {
    op(|ctx| {
        ctx.state.current.normal = [nx, ny, nz];
        Ok(())
    })
}

pub fn multi_tex_coord4f(target: GLenum, s: GLfloat, t: GLfloat, r: GLfloat, q: GLfloat) {
    op(|ctx| {
        let max = ctx.caps.max_texture_units as GLenum;
        if target < TEXTURE0 || target >= TEXTURE0 + max {
            return Err(ErrorCode::InvalidEnum);
        }
        ctx.state.current.tex_coords[(target - TEXTURE0) as usize] = [s, t, r, q];
        Ok(())
    })
}

pub fn gen_vertex_arrays_oes(n: GLsizei, arrays: &mut [GLuint]) {
    op(|ctx| {
        let n = check_gen_count(n, arrays.len())?;
        for slot in arrays.iter_mut().take(n) {
            let set = VertexArraySet::new(&ctx.caps);
            *slot = ctx.vertex_arrays.allocate(set, false);
        }
        Ok(())
    })
}

pub fn delete_vertex_arrays_oes(n: GLsizei, arrays: &[GLuint]) {
    op(|ctx| {
        let n = check_gen_count(n, arrays.len())?;
        for &handle in &arrays[..n] {
            if handle == 0 {
                continue;
            }

            // Deleting the bound set rebinds the default one first.
            if ctx.state.bindings.vertex_array == handle {
                ctx.bind_vertex_array(0);
            }
            ctx.vertex_arrays.erase(handle);
        }
        Ok(())
    })
}

pub fn bind_vertex_array_oes(array: GLuint) {
    op(|ctx| {
        // The extension requires names from gen; binding an unknown name
        // is an operation error, not a conjuring point.
        if ctx.bind_vertex_array(array) {
            Ok(())
        } else {
            Err(ErrorCode::InvalidOperation)
        }
    })
}

pub fn is_vertex_array_oes(array: GLuint) -> GLboolean {
    with(GL_FALSE, |ctx| {
        Ok(from_bool(array != 0 && ctx.vertex_arrays.contains(array)))
    })
}
