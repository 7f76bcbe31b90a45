//! The parameter getters and the sticky-error accessor.

use smallvec::SmallVec;

use crate::context::Context;
use crate::errors::{ErrorCode, GlResult};

use super::types::*;
use super::{float_to_fixed, op, with};

/// Reads the sticky error and clears it back to `NO_ERROR`. With no
/// current context this benignly reports `NO_ERROR`.
pub fn get_error() -> GLenum {
    with(NO_ERROR, |ctx| Ok(ctx.take_error().as_gl()))
}

/// The connection strings. An unknown `name` records `INVALID_ENUM` and
/// returns an empty string.
pub fn get_string(name: GLenum) -> String {
    with(String::new(), |ctx| match name {
        VENDOR => Ok(ctx.caps.vendor.clone()),
        RENDERER => Ok(ctx.caps.renderer.clone()),
        VERSION => Ok(ctx.caps.version.to_string()),
        EXTENSIONS => Ok(ctx.caps.extensions()),
        _ => Err(ErrorCode::InvalidEnum),
    })
}

enum Query {
    Ints(SmallVec<[GLint; 4]>),
    Floats(SmallVec<[GLfloat; 16]>),
    Bools(SmallVec<[bool; 4]>),
}

fn ints(values: &[GLint]) -> Query {
    Query::Ints(SmallVec::from_slice(values))
}

fn floats(values: &[GLfloat]) -> Query {
    Query::Floats(SmallVec::from_slice(values))
}

fn bools(values: &[bool]) -> Query {
    Query::Bools(SmallVec::from_slice(values))
}

fn query(ctx: &Context, pname: GLenum) -> GlResult<Query> {
    let state = &ctx.state;
    let caps = &ctx.caps;

    let value = match pname {
        // Limits.
        MAX_LIGHTS => ints(&[caps.max_lights as GLint]),
        MAX_CLIP_PLANES => ints(&[caps.max_clip_planes as GLint]),
        MAX_TEXTURE_UNITS => ints(&[caps.max_texture_units as GLint]),
        MAX_TEXTURE_SIZE => ints(&[caps.max_texture_size as GLint]),
        MAX_MODELVIEW_STACK_DEPTH => ints(&[caps.max_modelview_stack_depth as GLint]),
        MAX_PROJECTION_STACK_DEPTH => ints(&[caps.max_projection_stack_depth as GLint]),
        MAX_TEXTURE_STACK_DEPTH => ints(&[caps.max_texture_stack_depth as GLint]),
        MAX_VIEWPORT_DIMS => ints(&[
            caps.max_viewport_dims.0 as GLint,
            caps.max_viewport_dims.1 as GLint,
        ]),
        MAX_RENDERBUFFER_SIZE_OES => ints(&[caps.max_renderbuffer_size as GLint]),
        SMOOTH_POINT_SIZE_RANGE | ALIASED_POINT_SIZE_RANGE => {
            floats(&[caps.point_size_range.0, caps.point_size_range.1])
        }
        SMOOTH_LINE_WIDTH_RANGE | ALIASED_LINE_WIDTH_RANGE => {
            floats(&[caps.line_width_range.0, caps.line_width_range.1])
        }
        SUBPIXEL_BITS => ints(&[4]),

        // Transformation state.
        MATRIX_MODE => ints(&[state.matrices.mode.as_gl() as GLint]),
        MODELVIEW_STACK_DEPTH => ints(&[state.matrices.modelview.depth() as GLint]),
        PROJECTION_STACK_DEPTH => ints(&[state.matrices.projection.depth() as GLint]),
        TEXTURE_STACK_DEPTH => ints(&[
            state.matrices.texture[state.bindings.active_texture].depth() as GLint,
        ]),
        MODELVIEW_MATRIX => {
            let m: &[f32; 16] = state.matrices.modelview.top().as_ref();
            floats(m)
        }
        PROJECTION_MATRIX => {
            let m: &[f32; 16] = state.matrices.projection.top().as_ref();
            floats(m)
        }
        TEXTURE_MATRIX => {
            let stack = &state.matrices.texture[state.bindings.active_texture];
            let m: &[f32; 16] = stack.top().as_ref();
            floats(m)
        }
        VIEWPORT => ints(&[
            state.viewport.x,
            state.viewport.y,
            state.viewport.width,
            state.viewport.height,
        ]),
        DEPTH_RANGE => floats(&[state.viewport.depth_range.0, state.viewport.depth_range.1]),

        // Current values.
        CURRENT_COLOR => floats(&state.current.color),
        CURRENT_NORMAL => floats(&state.current.normal),
        CURRENT_TEXTURE_COORDS => {
            floats(&state.current.tex_coords[state.bindings.active_texture])
        }

        // Rasterization and per-fragment state.
        POINT_SIZE => floats(&[state.point.size]),
        POINT_SIZE_MIN => floats(&[state.point.size_min]),
        POINT_SIZE_MAX => floats(&[state.point.size_max]),
        POINT_FADE_THRESHOLD_SIZE => floats(&[state.point.fade_threshold]),
        POINT_DISTANCE_ATTENUATION => floats(&state.point.distance_attenuation),
        LINE_WIDTH => floats(&[state.line.width]),
        CULL_FACE_MODE => ints(&[state.polygon.cull_face.as_gl() as GLint]),
        FRONT_FACE => ints(&[state.polygon.front_face.as_gl() as GLint]),
        POLYGON_OFFSET_FACTOR => floats(&[state.polygon.offset_factor]),
        POLYGON_OFFSET_UNITS => floats(&[state.polygon.offset_units]),
        SHADE_MODEL => ints(&[state.lighting.shade_model.as_gl() as GLint]),
        LIGHT_MODEL_AMBIENT => floats(&state.lighting.model_ambient),
        LIGHT_MODEL_TWO_SIDE => bools(&[state.lighting.two_sided]),
        SCISSOR_BOX => ints(&[
            state.scissor.x,
            state.scissor.y,
            state.scissor.width,
            state.scissor.height,
        ]),
        COLOR_CLEAR_VALUE => floats(&state.color_buffer.clear_color),
        COLOR_WRITEMASK => {
            let (r, g, b, a) = state.color_buffer.write_mask;
            bools(&[r, g, b, a])
        }
        BLEND_SRC => ints(&[state.color_buffer.blend_src.as_gl() as GLint]),
        BLEND_DST => ints(&[state.color_buffer.blend_dst.as_gl() as GLint]),
        LOGIC_OP_MODE => ints(&[state.color_buffer.logic_op.as_gl() as GLint]),
        DEPTH_CLEAR_VALUE => floats(&[state.depth_buffer.clear_depth]),
        DEPTH_FUNC => ints(&[state.depth_buffer.func.as_gl() as GLint]),
        DEPTH_WRITEMASK => bools(&[state.depth_buffer.write_mask]),
        STENCIL_CLEAR_VALUE => ints(&[state.stencil_buffer.clear_stencil]),
        STENCIL_FUNC => ints(&[state.stencil_buffer.func.as_gl() as GLint]),
        STENCIL_REF => ints(&[state.stencil_buffer.reference]),
        STENCIL_VALUE_MASK => ints(&[state.stencil_buffer.value_mask as GLint]),
        STENCIL_WRITEMASK => ints(&[state.stencil_buffer.write_mask as GLint]),
        STENCIL_FAIL => ints(&[state.stencil_buffer.on_fail.as_gl() as GLint]),
        STENCIL_PASS_DEPTH_FAIL => ints(&[state.stencil_buffer.on_depth_fail.as_gl() as GLint]),
        STENCIL_PASS_DEPTH_PASS => ints(&[state.stencil_buffer.on_depth_pass.as_gl() as GLint]),
        ALPHA_TEST_FUNC => ints(&[state.alpha_test.func.as_gl() as GLint]),
        ALPHA_TEST_REF => floats(&[state.alpha_test.reference]),
        SAMPLE_COVERAGE_VALUE => floats(&[state.multisample.coverage_value]),
        SAMPLE_COVERAGE_INVERT => bools(&[state.multisample.coverage_invert]),

        // Fog.
        FOG_MODE => ints(&[state.fog.mode.as_gl() as GLint]),
        FOG_DENSITY => floats(&[state.fog.density]),
        FOG_START => floats(&[state.fog.start]),
        FOG_END => floats(&[state.fog.end]),
        FOG_COLOR => floats(&state.fog.color),

        // Hints.
        PERSPECTIVE_CORRECTION_HINT => ints(&[state.hint.perspective_correction.as_gl() as GLint]),
        POINT_SMOOTH_HINT => ints(&[state.hint.point_smooth.as_gl() as GLint]),
        LINE_SMOOTH_HINT => ints(&[state.hint.line_smooth.as_gl() as GLint]),
        FOG_HINT => ints(&[state.hint.fog.as_gl() as GLint]),
        GENERATE_MIPMAP_HINT => ints(&[state.hint.generate_mipmap.as_gl() as GLint]),

        // Pixel store.
        PACK_ALIGNMENT => ints(&[state.pixel_store.pack_alignment]),
        UNPACK_ALIGNMENT => ints(&[state.pixel_store.unpack_alignment]),

        // Bindings and selections.
        ACTIVE_TEXTURE => ints(&[TEXTURE0 as GLint + state.bindings.active_texture as GLint]),
        CLIENT_ACTIVE_TEXTURE => {
            ints(&[TEXTURE0 as GLint + state.bindings.client_active_texture as GLint])
        }
        TEXTURE_BINDING_2D => ints(&[state.active_unit().binding as GLint]),
        ARRAY_BUFFER_BINDING => ints(&[state.bindings.array_buffer as GLint]),
        ELEMENT_ARRAY_BUFFER_BINDING => ints(&[state.arrays.element_buffer as GLint]),
        FRAMEBUFFER_BINDING_OES => ints(&[state.bindings.framebuffer as GLint]),
        RENDERBUFFER_BINDING_OES => ints(&[state.bindings.renderbuffer as GLint]),
        VERTEX_ARRAY_BINDING_OES => ints(&[state.bindings.vertex_array as GLint]),

        // Vertex array layout.
        VERTEX_ARRAY_SIZE => ints(&[state.arrays.vertex.size]),
        VERTEX_ARRAY_TYPE => ints(&[state.arrays.vertex.ty.as_gl() as GLint]),
        VERTEX_ARRAY_STRIDE => ints(&[state.arrays.vertex.stride]),
        NORMAL_ARRAY_TYPE => ints(&[state.arrays.normal.ty.as_gl() as GLint]),
        NORMAL_ARRAY_STRIDE => ints(&[state.arrays.normal.stride]),
        COLOR_ARRAY_SIZE => ints(&[state.arrays.color.size]),
        COLOR_ARRAY_TYPE => ints(&[state.arrays.color.ty.as_gl() as GLint]),
        COLOR_ARRAY_STRIDE => ints(&[state.arrays.color.stride]),
        TEXTURE_COORD_ARRAY_SIZE => {
            ints(&[state.arrays.tex_coords[state.bindings.client_active_texture].size])
        }
        TEXTURE_COORD_ARRAY_TYPE => ints(&[
            state.arrays.tex_coords[state.bindings.client_active_texture]
                .ty
                .as_gl() as GLint,
        ]),
        TEXTURE_COORD_ARRAY_STRIDE => {
            ints(&[state.arrays.tex_coords[state.bindings.client_active_texture].stride])
        }

        _ => return Err(ErrorCode::InvalidEnum),
    };

    Ok(value)
}

fn write_out<T, F>(params: &mut [T], produced: usize, mut fill: F) -> GlResult<()>
where
    F: FnMut(usize) -> T,
{
    if params.len() < produced {
        return Err(ErrorCode::InvalidValue);
    }
    for (i, slot) in params.iter_mut().take(produced).enumerate() {
        *slot = fill(i);
    }
    Ok(())
}

pub fn get_booleanv(pname: GLenum, params: &mut [GLboolean]) {
    op(|ctx| match query(ctx, pname)? {
        Query::Ints(values) => write_out(params, values.len(), |i| super::from_bool(values[i] != 0)),
        Query::Floats(values) => {
            write_out(params, values.len(), |i| super::from_bool(values[i] != 0.0))
        }
        Query::Bools(values) => write_out(params, values.len(), |i| super::from_bool(values[i])),
    })
}

pub fn get_integerv(pname: GLenum, params: &mut [GLint]) {
    op(|ctx| match query(ctx, pname)? {
        Query::Ints(values) => write_out(params, values.len(), |i| values[i]),
        Query::Floats(values) => write_out(params, values.len(), |i| values[i].round() as GLint),
        Query::Bools(values) => write_out(params, values.len(), |i| GLint::from(values[i])),
    })
}

pub fn get_floatv(pname: GLenum, params: &mut [GLfloat]) {
    op(|ctx| match query(ctx, pname)? {
        Query::Ints(values) => write_out(params, values.len(), |i| values[i] as GLfloat),
        Query::Floats(values) => write_out(params, values.len(), |i| values[i]),
        Query::Bools(values) => {
            write_out(params, values.len(), |i| if values[i] { 1.0 } else { 0.0 })
        }
    })
}

pub fn get_fixedv(pname: GLenum, params: &mut [GLfixed]) {
    op(|ctx| match query(ctx, pname)? {
        Query::Ints(values) => write_out(params, values.len(), |i| values[i] << 16),
        Query::Floats(values) => write_out(params, values.len(), |i| float_to_fixed(values[i])),
        Query::Bools(values) => {
            write_out(params, values.len(), |i| GLfixed::from(values[i]) << 16)
        }
    })
}
