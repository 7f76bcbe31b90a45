//! Capability toggles and the simple server-side state setters.

use crate::context::Context;
use crate::errors::{ErrorCode, GlResult};
use crate::state::{
    BlendFactor, Comparison, CullFace, FrontFaceOrder, Hint, LogicOp, ShadeModel, StencilAction,
};

use super::types::*;
use super::{clampf, op, to_bool, with};

fn set_capability(ctx: &mut Context, cap: GLenum, value: bool) -> GlResult<()> {
    let state = &mut ctx.state;

    match cap {
        ALPHA_TEST => state.alpha_test.enabled = value,
        BLEND => state.color_buffer.blend_enabled = value,
        COLOR_LOGIC_OP => state.color_buffer.logic_op_enabled = value,
        COLOR_MATERIAL => state.lighting.color_material = value,
        CULL_FACE => state.polygon.cull_enabled = value,
        DEPTH_TEST => state.depth_buffer.test_enabled = value,
        DITHER => state.color_buffer.dither = value,
        FOG => state.fog.enabled = value,
        LIGHTING => state.lighting.enabled = value,
        LINE_SMOOTH => state.line.smooth = value,
        MULTISAMPLE => state.multisample.enabled = value,
        NORMALIZE => state.lighting.normalize = value,
        POINT_SMOOTH => state.point.smooth = value,
        POINT_SPRITE_OES => state.point.sprite_enabled = value,
        POLYGON_OFFSET_FILL => state.polygon.offset_fill_enabled = value,
        RESCALE_NORMAL => state.lighting.rescale_normal = value,
        SAMPLE_ALPHA_TO_COVERAGE => state.multisample.alpha_to_coverage = value,
        SAMPLE_ALPHA_TO_ONE => state.multisample.alpha_to_one = value,
        SAMPLE_COVERAGE => state.multisample.coverage_enabled = value,
        SCISSOR_TEST => state.scissor.enabled = value,
        STENCIL_TEST => state.stencil_buffer.test_enabled = value,
        TEXTURE_2D => state.active_unit_mut().enabled = value,
        _ if cap >= LIGHT0 && cap < LIGHT0 + ctx.caps.max_lights as GLenum => {
            state.lighting.lights[(cap - LIGHT0) as usize].enabled = value;
        }
        _ if cap >= CLIP_PLANE0 && cap < CLIP_PLANE0 + ctx.caps.max_clip_planes as GLenum => {
            state.clip_planes[(cap - CLIP_PLANE0) as usize].enabled = value;
        }
        _ => return Err(ErrorCode::InvalidEnum),
    }

    Ok(())
}

fn capability(ctx: &Context, cap: GLenum) -> GlResult<bool> {
    let state = &ctx.state;

    let value = match cap {
        ALPHA_TEST => state.alpha_test.enabled,
        BLEND => state.color_buffer.blend_enabled,
        COLOR_LOGIC_OP => state.color_buffer.logic_op_enabled,
        COLOR_MATERIAL => state.lighting.color_material,
        CULL_FACE => state.polygon.cull_enabled,
        DEPTH_TEST => state.depth_buffer.test_enabled,
        DITHER => state.color_buffer.dither,
        FOG => state.fog.enabled,
        LIGHTING => state.lighting.enabled,
        LINE_SMOOTH => state.line.smooth,
        MULTISAMPLE => state.multisample.enabled,
        NORMALIZE => state.lighting.normalize,
        POINT_SMOOTH => state.point.smooth,
        POINT_SPRITE_OES => state.point.sprite_enabled,
        POLYGON_OFFSET_FILL => state.polygon.offset_fill_enabled,
        RESCALE_NORMAL => state.lighting.rescale_normal,
        SAMPLE_ALPHA_TO_COVERAGE => state.multisample.alpha_to_coverage,
        SAMPLE_ALPHA_TO_ONE => state.multisample.alpha_to_one,
        SAMPLE_COVERAGE => state.multisample.coverage_enabled,
        SCISSOR_TEST => state.scissor.enabled,
        STENCIL_TEST => state.stencil_buffer.test_enabled,
        TEXTURE_2D => state.active_unit().enabled,
        VERTEX_ARRAY => state.arrays.vertex.enabled,
        NORMAL_ARRAY => state.arrays.normal.enabled,
        COLOR_ARRAY => state.arrays.color.enabled,
        POINT_SIZE_ARRAY_OES => state.arrays.point_size.enabled,
        TEXTURE_COORD_ARRAY => {
            state.arrays.tex_coords[state.bindings.client_active_texture].enabled
        }
        _ if cap >= LIGHT0 && cap < LIGHT0 + ctx.caps.max_lights as GLenum => {
            state.lighting.lights[(cap - LIGHT0) as usize].enabled
        }
        _ if cap >= CLIP_PLANE0 && cap < CLIP_PLANE0 + ctx.caps.max_clip_planes as GLenum => {
            state.clip_planes[(cap - CLIP_PLANE0) as usize].enabled
        }
        _ => return Err(ErrorCode::InvalidEnum),
    };

    Ok(value)
}

pub fn enable(cap: GLenum) {
    op(|ctx| set_capability(ctx, cap, true))
}

pub fn disable(cap: GLenum) {
    op(|ctx| set_capability(ctx, cap, false))
}

pub fn is_enabled(cap: GLenum) -> GLboolean {
    with(GL_FALSE, |ctx| capability(ctx, cap).map(super::from_bool))
}

fn set_client_capability(ctx: &mut Context, array: GLenum, value: bool) -> GlResult<()> {
    let unit = ctx.state.bindings.client_active_texture;
    let arrays = &mut ctx.state.arrays;

    match array {
        VERTEX_ARRAY => arrays.vertex.enabled = value,
        NORMAL_ARRAY => arrays.normal.enabled = value,
        COLOR_ARRAY => arrays.color.enabled = value,
        POINT_SIZE_ARRAY_OES => arrays.point_size.enabled = value,
        TEXTURE_COORD_ARRAY => arrays.tex_coords[unit].enabled = value,
        _ => return Err(ErrorCode::InvalidEnum),
    }

    Ok(())
}

pub fn enable_client_state(array: GLenum) {
    op(|ctx| set_client_capability(ctx, array, true))
}

pub fn disable_client_state(array: GLenum) {
    op(|ctx| set_client_capability(ctx, array, false))
}

pub fn hint(target: GLenum, mode: GLenum) {
    op(|ctx| {
        let mode = Hint::from_gl(mode).ok_or(ErrorCode::InvalidEnum)?;
        let hints = &mut ctx.state.hint;
        match target {
            PERSPECTIVE_CORRECTION_HINT => hints.perspective_correction = mode,
            POINT_SMOOTH_HINT => hints.point_smooth = mode,
            LINE_SMOOTH_HINT => hints.line_smooth = mode,
            FOG_HINT => hints.fog = mode,
            GENERATE_MIPMAP_HINT => hints.generate_mipmap = mode,
            _ => return Err(ErrorCode::InvalidEnum),
        }
        Ok(())
    })
}

pub fn viewport(x: GLint, y: GLint, width: GLsizei, height: GLsizei) {
    op(|ctx| {
        if width < 0 || height < 0 {
            return Err(ErrorCode::InvalidValue);
        }

        let (max_w, max_h) = ctx.caps.max_viewport_dims;
        let v = &mut ctx.state.viewport;
        v.x = x;
        v.y = y;
        v.width = width.min(max_w as GLsizei);
        v.height = height.min(max_h as GLsizei);
        Ok(())
    })
}

pub fn scissor(x: GLint, y: GLint, width: GLsizei, height: GLsizei) {
    op(|ctx| {
        if width < 0 || height < 0 {
            return Err(ErrorCode::InvalidValue);
        }

        let s = &mut ctx.state.scissor;
        s.x = x;
        s.y = y;
        s.width = width;
        s.height = height;
        Ok(())
    })
}

pub fn depth_rangef(near: GLclampf, far: GLclampf) {
    op(|ctx| {
        ctx.state.viewport.depth_range = (clampf(near), clampf(far));
        Ok(())
    })
}

pub fn clear_colorf(red: GLclampf, green: GLclampf, blue: GLclampf, alpha: GLclampf) {
    op(|ctx| {
        ctx.state.color_buffer.clear_color = [clampf(red), clampf(green), clampf(blue), clampf(alpha)];
        Ok(())
    })
}

pub fn clear_depthf(depth: GLclampf) {
    op(|ctx| {
        ctx.state.depth_buffer.clear_depth = clampf(depth);
        Ok(())
    })
}

pub fn clear_stencil(s: GLint) {
    op(|ctx| {
        ctx.state.stencil_buffer.clear_stencil = s;
        Ok(())
    })
}

pub fn color_mask(red: GLboolean, green: GLboolean, blue: GLboolean, alpha: GLboolean) {
    op(|ctx| {
        ctx.state.color_buffer.write_mask =
            (to_bool(red), to_bool(green), to_bool(blue), to_bool(alpha));
        Ok(())
    })
}

pub fn depth_mask(flag: GLboolean) {
    op(|ctx| {
        ctx.state.depth_buffer.write_mask = to_bool(flag);
        Ok(())
    })
}

pub fn stencil_mask(mask: GLuint) {
    op(|ctx| {
        ctx.state.stencil_buffer.write_mask = mask;
        Ok(())
    })
}

pub fn depth_func(func: GLenum) {
    op(|ctx| {
        ctx.state.depth_buffer.func = Comparison::from_gl(func).ok_or(ErrorCode::InvalidEnum)?;
        Ok(())
    })
}

pub fn stencil_func(func: GLenum, reference: GLint, mask: GLuint) {
    op(|ctx| {
        let func = Comparison::from_gl(func).ok_or(ErrorCode::InvalidEnum)?;
        let stencil = &mut ctx.state.stencil_buffer;
        stencil.func = func;
        stencil.reference = reference;
        stencil.value_mask = mask;
        Ok(())
    })
}

pub fn stencil_op(fail: GLenum, zfail: GLenum, zpass: GLenum) {
    op(|ctx| {
        let fail = StencilAction::from_gl(fail).ok_or(ErrorCode::InvalidEnum)?;
        let zfail = StencilAction::from_gl(zfail).ok_or(ErrorCode::InvalidEnum)?;
        let zpass = StencilAction::from_gl(zpass).ok_or(ErrorCode::InvalidEnum)?;

        let stencil = &mut ctx.state.stencil_buffer;
        stencil.on_fail = fail;
        stencil.on_depth_fail = zfail;
        stencil.on_depth_pass = zpass;
        Ok(())
    })
}

pub fn alpha_funcf(func: GLenum, reference: GLclampf) {
    op(|ctx| {
        let func = Comparison::from_gl(func).ok_or(ErrorCode::InvalidEnum)?;
        ctx.state.alpha_test.func = func;
        ctx.state.alpha_test.reference = clampf(reference);
        Ok(())
    })
}

pub fn blend_func(sfactor: GLenum, dfactor: GLenum) {
    op(|ctx| {
        let src = BlendFactor::from_gl_src(sfactor).ok_or(ErrorCode::InvalidEnum)?;
        let dst = BlendFactor::from_gl_dst(dfactor).ok_or(ErrorCode::InvalidEnum)?;
        ctx.state.color_buffer.blend_src = src;
        ctx.state.color_buffer.blend_dst = dst;
        Ok(())
    })
}

pub fn logic_op(opcode: GLenum) {
    op(|ctx| {
        ctx.state.color_buffer.logic_op = LogicOp::from_gl(opcode).ok_or(ErrorCode::InvalidEnum)?;
        Ok(())
    })
}

pub fn cull_face(mode: GLenum) {
    op(|ctx| {
        ctx.state.polygon.cull_face = CullFace::from_gl(mode).ok_or(ErrorCode::InvalidEnum)?;
        Ok(())
    })
}

pub fn front_face(mode: GLenum) {
    op(|ctx| {
        ctx.state.polygon.front_face =
            FrontFaceOrder::from_gl(mode).ok_or(ErrorCode::InvalidEnum)?;
        Ok(())
    })
}

pub fn shade_model(mode: GLenum) {
    op(|ctx| {
        ctx.state.lighting.shade_model = ShadeModel::from_gl(mode).ok_or(ErrorCode::InvalidEnum)?;
        Ok(())
    })
}

pub fn line_widthf(width: GLfloat) {
    op(|ctx| {
        if width <= 0.0 {
            return Err(ErrorCode::InvalidValue);
        }
        ctx.state.line.width = width;
        Ok(())
    })
}

pub fn point_sizef(size: GLfloat) {
    op(|ctx| {
        if size <= 0.0 {
            return Err(ErrorCode::InvalidValue);
        }
        ctx.state.point.size = size;
        Ok(())
    })
}

pub fn point_parameterf(pname: GLenum, param: GLfloat) {
    op(|ctx| set_point_parameter(ctx, pname, &[param]))
}

pub fn point_parameterfv(pname: GLenum, params: &[GLfloat]) {
    op(|ctx| set_point_parameter(ctx, pname, params))
}

fn set_point_parameter(ctx: &mut Context, pname: GLenum, params: &[GLfloat]) -> GlResult<()> {
    let point = &mut ctx.state.point;

    match pname {
        POINT_SIZE_MIN | POINT_SIZE_MAX | POINT_FADE_THRESHOLD_SIZE => {
            let v = *params.first().ok_or(ErrorCode::InvalidValue)?;
            if v < 0.0 {
                return Err(ErrorCode::InvalidValue);
            }
            match pname {
                POINT_SIZE_MIN => point.size_min = v,
                POINT_SIZE_MAX => point.size_max = v,
                _ => point.fade_threshold = v,
            }
        }
        POINT_DISTANCE_ATTENUATION => {
            if params.len() < 3 {
                return Err(ErrorCode::InvalidValue);
            }
            point.distance_attenuation = [params[0], params[1], params[2]];
        }
        _ => return Err(ErrorCode::InvalidEnum),
    }

    Ok(())
}

pub fn polygon_offsetf(factor: GLfloat, units: GLfloat) {
    op(|ctx| {
        ctx.state.polygon.offset_factor = factor;
        ctx.state.polygon.offset_units = units;
        Ok(())
    })
}

pub fn sample_coveragef(value: GLclampf, invert: GLboolean) {
    op(|ctx| {
        ctx.state.multisample.coverage_value = clampf(value);
        ctx.state.multisample.coverage_invert = to_bool(invert);
        Ok(())
    })
}

pub fn pixel_storei(pname: GLenum, param: GLint) {
    op(|ctx| {
        match pname {
            PACK_ALIGNMENT | UNPACK_ALIGNMENT => {}
            _ => return Err(ErrorCode::InvalidEnum),
        }

        match param {
            1 | 2 | 4 | 8 => {}
            _ => return Err(ErrorCode::InvalidValue),
        }

        if pname == PACK_ALIGNMENT {
            ctx.state.pixel_store.pack_alignment = param;
        } else {
            ctx.state.pixel_store.unpack_alignment = param;
        }
        Ok(())
    })
}
