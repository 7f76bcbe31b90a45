//! Fog, lighting, material and clip-plane entry points.

use cgmath::{Matrix, Matrix4, SquareMatrix, Transform, Vector3, Vector4};

use crate::context::Context;
use crate::errors::{ErrorCode, GlResult};
use crate::state::FogMode;

use super::types::*;
use super::{clampf, op};

pub fn fogf(pname: GLenum, param: GLfloat) {
    op(|ctx| set_fog(ctx, pname, &[param]))
}

pub fn fogfv(pname: GLenum, params: &[GLfloat]) {
    op(|ctx| set_fog(ctx, pname, params))
}

fn set_fog(ctx: &mut Context, pname: GLenum, params: &[GLfloat]) -> GlResult<()> {
    let fog = &mut ctx.state.fog;
    let first = *params.first().ok_or(ErrorCode::InvalidValue)?;

    match pname {
        FOG_MODE => {
            fog.mode = FogMode::from_gl(first as GLenum).ok_or(ErrorCode::InvalidEnum)?;
        }
        FOG_DENSITY => {
            if first < 0.0 {
                return Err(ErrorCode::InvalidValue);
            }
            fog.density = first;
        }
        FOG_START => fog.start = first,
        FOG_END => fog.end = first,
        FOG_COLOR => {
            if params.len() < 4 {
                return Err(ErrorCode::InvalidValue);
            }
            fog.color = [
                clampf(params[0]),
                clampf(params[1]),
                clampf(params[2]),
                clampf(params[3]),
            ];
        }
        _ => return Err(ErrorCode::InvalidEnum),
    }

    Ok(())
}

pub fn light_modelf(pname: GLenum, param: GLfloat) {
    op(|ctx| set_light_model(ctx, pname, &[param]))
}

pub fn light_modelfv(pname: GLenum, params: &[GLfloat]) {
    op(|ctx| set_light_model(ctx, pname, params))
}

fn set_light_model(ctx: &mut Context, pname: GLenum, params: &[GLfloat]) -> GlResult<()> {
    match pname {
        LIGHT_MODEL_TWO_SIDE => {
            let v = *params.first().ok_or(ErrorCode::InvalidValue)?;
            ctx.state.lighting.two_sided = v != 0.0;
        }
        LIGHT_MODEL_AMBIENT => {
            if params.len() < 4 {
                return Err(ErrorCode::InvalidValue);
            }
            ctx.state.lighting.model_ambient = [params[0], params[1], params[2], params[3]];
        }
        _ => return Err(ErrorCode::InvalidEnum),
    }

    Ok(())
}

fn light_index(ctx: &Context, light: GLenum) -> GlResult<usize> {
    if light >= LIGHT0 && light < LIGHT0 + ctx.caps.max_lights as GLenum {
        Ok((light - LIGHT0) as usize)
    } else {
        Err(ErrorCode::InvalidEnum)
    }
}

pub fn lightf(light: GLenum, pname: GLenum, param: GLfloat) {
    op(|ctx| set_light(ctx, light, pname, &[param]))
}

pub fn lightfv(light: GLenum, pname: GLenum, params: &[GLfloat]) {
    op(|ctx| set_light(ctx, light, pname, params))
}

fn set_light(ctx: &mut Context, light: GLenum, pname: GLenum, params: &[GLfloat]) -> GlResult<()> {
    let index = light_index(ctx, light)?;
    let modelview = *ctx.state.matrices.modelview.top();
    let entry = &mut ctx.state.lighting.lights[index];

    let vec4 = |params: &[GLfloat]| -> GlResult<[f32; 4]> {
        if params.len() < 4 {
            return Err(ErrorCode::InvalidValue);
        }
        Ok([params[0], params[1], params[2], params[3]])
    };

    match pname {
        AMBIENT => entry.ambient = vec4(params)?,
        DIFFUSE => entry.diffuse = vec4(params)?,
        SPECULAR => entry.specular = vec4(params)?,
        POSITION => {
            // Stored in eye coordinates, transformed by the modelview top
            // at specification time.
            let p = vec4(params)?;
            let eye = modelview * Vector4::new(p[0], p[1], p[2], p[3]);
            entry.position = [eye.x, eye.y, eye.z, eye.w];
        }
        SPOT_DIRECTION => {
            if params.len() < 3 {
                return Err(ErrorCode::InvalidValue);
            }
            let eye =
                modelview.transform_vector(Vector3::new(params[0], params[1], params[2]));
            entry.spot_direction = [eye.x, eye.y, eye.z];
        }
        SPOT_EXPONENT => {
            let v = *params.first().ok_or(ErrorCode::InvalidValue)?;
            if v < 0.0 || v > 128.0 {
                return Err(ErrorCode::InvalidValue);
            }
            entry.spot_exponent = v;
        }
        SPOT_CUTOFF => {
            let v = *params.first().ok_or(ErrorCode::InvalidValue)?;
            if (v < 0.0 || v > 90.0) && v != 180.0 {
                return Err(ErrorCode::InvalidValue);
            }
            entry.spot_cutoff = v;
        }
        CONSTANT_ATTENUATION | LINEAR_ATTENUATION | QUADRATIC_ATTENUATION => {
            let v = *params.first().ok_or(ErrorCode::InvalidValue)?;
            if v < 0.0 {
                return Err(ErrorCode::InvalidValue);
            }
            entry.attenuation[(pname - CONSTANT_ATTENUATION) as usize] = v;
        }
        _ => return Err(ErrorCode::InvalidEnum),
    }

    Ok(())
}

pub fn get_lightfv(light: GLenum, pname: GLenum, params: &mut [GLfloat]) {
    op(|ctx| {
        let index = light_index(ctx, light)?;
        let entry = &ctx.state.lighting.lights[index];

        let out: &[f32] = match pname {
            AMBIENT => &entry.ambient,
            DIFFUSE => &entry.diffuse,
            SPECULAR => &entry.specular,
            POSITION => &entry.position,
            SPOT_DIRECTION => &entry.spot_direction,
            SPOT_EXPONENT => return write_scalar(params, entry.spot_exponent),
            SPOT_CUTOFF => return write_scalar(params, entry.spot_cutoff),
            CONSTANT_ATTENUATION => return write_scalar(params, entry.attenuation[0]),
            LINEAR_ATTENUATION => return write_scalar(params, entry.attenuation[1]),
            QUADRATIC_ATTENUATION => return write_scalar(params, entry.attenuation[2]),
            _ => return Err(ErrorCode::InvalidEnum),
        };

        write_vector(params, out)
    })
}

fn write_scalar(out: &mut [GLfloat], value: f32) -> GlResult<()> {
    match out.first_mut() {
        Some(slot) => {
            *slot = value;
            Ok(())
        }
        None => Err(ErrorCode::InvalidValue),
    }
}

fn write_vector(out: &mut [GLfloat], values: &[f32]) -> GlResult<()> {
    if out.len() < values.len() {
        return Err(ErrorCode::InvalidValue);
    }
    out[..values.len()].copy_from_slice(values);
    Ok(())
}

pub fn materialf(face: GLenum, pname: GLenum, param: GLfloat) {
    op(|ctx| set_material(ctx, face, pname, &[param]))
}

pub fn materialfv(face: GLenum, pname: GLenum, params: &[GLfloat]) {
    op(|ctx| set_material(ctx, face, pname, params))
}

fn set_material(ctx: &mut Context, face: GLenum, pname: GLenum, params: &[GLfloat]) -> GlResult<()> {
    // The legacy spec only accepts updating both faces at once.
    if face != FRONT_AND_BACK {
        return Err(ErrorCode::InvalidEnum);
    }

    let material = &mut ctx.state.lighting.material;
    let vec4 = |params: &[GLfloat]| -> GlResult<[f32; 4]> {
        if params.len() < 4 {
            return Err(ErrorCode::InvalidValue);
        }
        Ok([params[0], params[1], params[2], params[3]])
    };

    match pname {
        AMBIENT => material.ambient = vec4(params)?,
        DIFFUSE => material.diffuse = vec4(params)?,
        SPECULAR => material.specular = vec4(params)?,
        EMISSION => material.emission = vec4(params)?,
        AMBIENT_AND_DIFFUSE => {
            let v = vec4(params)?;
            material.ambient = v;
            material.diffuse = v;
        }
        SHININESS => {
            let v = *params.first().ok_or(ErrorCode::InvalidValue)?;
            if v < 0.0 || v > 128.0 {
                return Err(ErrorCode::InvalidValue);
            }
            material.shininess = v;
        }
        _ => return Err(ErrorCode::InvalidEnum),
    }

    Ok(())
}

pub fn get_materialfv(face: GLenum, pname: GLenum, params: &mut [GLfloat]) {
    op(|ctx| {
        if face != FRONT && face != BACK {
            return Err(ErrorCode::InvalidEnum);
        }

        let material = &ctx.state.lighting.material;
        match pname {
            AMBIENT => write_vector(params, &material.ambient),
            DIFFUSE => write_vector(params, &material.diffuse),
            SPECULAR => write_vector(params, &material.specular),
            EMISSION => write_vector(params, &material.emission),
            SHININESS => write_scalar(params, material.shininess),
            _ => Err(ErrorCode::InvalidEnum),
        }
    })
}

fn clip_plane_index(ctx: &Context, plane: GLenum) -> GlResult<usize> {
    if plane >= CLIP_PLANE0 && plane < CLIP_PLANE0 + ctx.caps.max_clip_planes as GLenum {
        Ok((plane - CLIP_PLANE0) as usize)
    } else {
        Err(ErrorCode::InvalidEnum)
    }
}

pub fn clip_planef(plane: GLenum, equation: &[GLfloat; 4]) {
    op(|ctx| {
        let index = clip_plane_index(ctx, plane)?;

        // The plane is specified in object coordinates and stored in eye
        // coordinates: p_eye = (M^-1)^T * p_object.
        let modelview = *ctx.state.matrices.modelview.top();
        let inverse = modelview.invert().unwrap_or_else(Matrix4::identity);
        let eye = inverse.transpose()
            * Vector4::new(equation[0], equation[1], equation[2], equation[3]);

        ctx.state.clip_planes[index].equation = [eye.x, eye.y, eye.z, eye.w];
        Ok(())
    })
}

pub fn get_clip_planef(plane: GLenum, equation: &mut [GLfloat]) {
    op(|ctx| {
        let index = clip_plane_index(ctx, plane)?;
        write_vector(equation, &ctx.state.clip_planes[index].equation)
    })
}
