//! Texture object, sampler and texture-environment entry points.

use crate::context::Context;
use crate::errors::{ErrorCode, GlResult};
use crate::resources::{texture, TexelType, TexFormat, Texture, TextureFilter, TextureWrap};
use crate::state::{CombineFunc, CombineOp, CombineSrc, TexEnvMode};

use super::types::*;
use super::{clampf, from_bool, op, with};

pub fn active_texture(texture: GLenum) {
    op(|ctx| {
        let max = ctx.caps.max_texture_units as GLenum;
        if texture < TEXTURE0 || texture >= TEXTURE0 + max {
            return Err(ErrorCode::InvalidEnum);
        }
        ctx.state.bindings.active_texture = (texture - TEXTURE0) as usize;
        Ok(())
    })
}

pub fn client_active_texture(texture: GLenum) {
    op(|ctx| {
        let max = ctx.caps.max_texture_units as GLenum;
        if texture < TEXTURE0 || texture >= TEXTURE0 + max {
            return Err(ErrorCode::InvalidEnum);
        }
        ctx.state.bindings.client_active_texture = (texture - TEXTURE0) as usize;
        Ok(())
    })
}

pub fn gen_textures(n: GLsizei, textures: &mut [GLuint]) {
    op(|ctx| {
        let n = check_gen_count(n, textures.len())?;
        let resources = ctx.resources.clone();
        let mut resources = resources.borrow_mut();

        for i in 0..n {
            let handle = resources.textures.allocate(Texture::default(), false);
            if let Err(err) = ctx.adapter.device_mut().create_texture(handle) {
                // Best-effort rollback of the partially created batch.
                resources.textures.erase(handle);
                for created in &textures[..i] {
                    let _ = ctx.adapter.device_mut().delete_texture(*created);
                    resources.textures.erase(*created);
                }
                ctx.report_internal("gen_textures", &err);
                return Err(ErrorCode::OutOfMemory);
            }
            textures[i] = handle;
        }
        Ok(())
    })
}

pub(crate) fn check_gen_count(n: GLsizei, available: usize) -> GlResult<usize> {
    if n < 0 || n as usize > available {
        return Err(ErrorCode::InvalidValue);
    }
    Ok(n as usize)
}

pub fn delete_textures(n: GLsizei, textures: &[GLuint]) {
    op(|ctx| {
        let n = check_gen_count(n, textures.len())?;

        for &handle in &textures[..n] {
            if handle == 0 {
                continue;
            }

            let erased = ctx.resources.borrow_mut().textures.erase(handle);
            if erased.is_none() {
                continue;
            }

            // Delete-while-bound: every binding point referencing the
            // object drops back to 0, uniformly.
            ctx.state.detach_texture(handle);
            for fb in ctx.framebuffers.handles() {
                if let Some(fb) = ctx.framebuffers.get_mut(fb) {
                    fb.detach_texture(handle);
                }
            }

            if let Err(err) = ctx.adapter.device_mut().delete_texture(handle) {
                ctx.report_internal("delete_textures", &err);
            }
        }
        Ok(())
    })
}

pub fn bind_texture(target: GLenum, texture: GLuint) {
    op(|ctx| {
        if target != TEXTURE_2D {
            return Err(ErrorCode::InvalidEnum);
        }

        if texture != 0 && !ctx.resources.borrow().textures.contains(texture) {
            // Binding an ungenerated name creates the object.
            ctx.resources
                .borrow_mut()
                .textures
                .insert(texture, Texture::default(), false);
            if let Err(err) = ctx.adapter.device_mut().create_texture(texture) {
                ctx.resources.borrow_mut().textures.erase(texture);
                ctx.report_internal("bind_texture", &err);
                return Err(ErrorCode::OutOfMemory);
            }
        }

        ctx.state.active_unit_mut().binding = texture;
        Ok(())
    })
}

pub fn is_texture(texture: GLuint) -> GLboolean {
    with(GL_FALSE, |ctx| {
        Ok(from_bool(
            texture != 0 && ctx.resources.borrow().textures.contains(texture),
        ))
    })
}

fn max_level(ctx: &Context) -> GLint {
    (32 - (ctx.caps.max_texture_size as u32).leading_zeros()) as GLint - 1
}

fn is_pot(v: GLsizei) -> bool {
    v > 0 && (v & (v - 1)) == 0
}

#[allow(clippy::too_many_arguments)]
pub fn tex_image_2d(
    target: GLenum,
    level: GLint,
    internal_format: GLint,
    width: GLsizei,
    height: GLsizei,
    border: GLint,
    format: GLenum,
    ty: GLenum,
    data: Option<&[u8]>,
) {
    op(|ctx| {
        if target != TEXTURE_2D {
            return Err(ErrorCode::InvalidEnum);
        }

        let parsed_format = TexFormat::from_gl(format).ok_or(ErrorCode::InvalidEnum)?;
        let parsed_ty = TexelType::from_gl(ty).ok_or(ErrorCode::InvalidEnum)?;

        if level < 0 || level > max_level(ctx) || border != 0 {
            return Err(ErrorCode::InvalidValue);
        }
        if width < 0
            || height < 0
            || width > ctx.caps.max_texture_size as GLsizei
            || height > ctx.caps.max_texture_size as GLsizei
        {
            return Err(ErrorCode::InvalidValue);
        }
        // The legacy spec requires power-of-two images.
        if width > 0 && height > 0 && (!is_pot(width) || !is_pot(height)) {
            return Err(ErrorCode::InvalidValue);
        }

        // internalformat must match format exactly.
        if internal_format as GLenum != format {
            return Err(ErrorCode::InvalidOperation);
        }
        if !parsed_ty.matches(parsed_format) {
            return Err(ErrorCode::InvalidOperation);
        }

        if let Some(bytes) = data {
            let expected = texture::row_size(
                width,
                parsed_format,
                parsed_ty,
                ctx.state.pixel_store.unpack_alignment,
            ) * height as usize;
            if bytes.len() < expected {
                return Err(ErrorCode::InvalidOperation);
            }
        }

        let handle = ctx.state.active_unit().binding;
        if handle == 0 {
            // The default texture is immutable here.
            return Err(ErrorCode::InvalidOperation);
        }

        let resources = ctx.resources.clone();
        let mut resources = resources.borrow_mut();
        let entry = resources
            .textures
            .get_mut(handle)
            .ok_or(ErrorCode::InvalidOperation)?;

        if let Err(err) = entry.set_data(
            handle,
            level,
            parsed_format,
            width,
            height,
            parsed_ty,
            data,
            ctx.adapter.device_mut(),
        ) {
            ctx.report_internal("tex_image_2d", &err);
            return Err(ErrorCode::OutOfMemory);
        }
        Ok(())
    })
}

#[allow(clippy::too_many_arguments)]
pub fn tex_sub_image_2d(
    target: GLenum,
    level: GLint,
    xoffset: GLint,
    yoffset: GLint,
    width: GLsizei,
    height: GLsizei,
    format: GLenum,
    ty: GLenum,
    data: &[u8],
) {
    op(|ctx| {
        if target != TEXTURE_2D {
            return Err(ErrorCode::InvalidEnum);
        }

        let parsed_format = TexFormat::from_gl(format).ok_or(ErrorCode::InvalidEnum)?;
        let parsed_ty = TexelType::from_gl(ty).ok_or(ErrorCode::InvalidEnum)?;

        if level < 0 || level > max_level(ctx) || width < 0 || height < 0 || xoffset < 0
            || yoffset < 0
        {
            return Err(ErrorCode::InvalidValue);
        }

        let handle = ctx.state.active_unit().binding;
        if handle == 0 {
            return Err(ErrorCode::InvalidOperation);
        }

        let resources = ctx.resources.clone();
        let mut resources = resources.borrow_mut();
        let entry = resources
            .textures
            .get_mut(handle)
            .ok_or(ErrorCode::InvalidOperation)?;

        let image = *entry.level(level).ok_or(ErrorCode::InvalidOperation)?;
        if image.format != parsed_format || image.ty != parsed_ty {
            return Err(ErrorCode::InvalidOperation);
        }
        if xoffset + width > image.width || yoffset + height > image.height {
            return Err(ErrorCode::InvalidValue);
        }

        let expected = texture::row_size(
            width,
            parsed_format,
            parsed_ty,
            ctx.state.pixel_store.unpack_alignment,
        ) * height as usize;
        if data.len() < expected {
            return Err(ErrorCode::InvalidOperation);
        }

        if let Err(err) = entry.set_sub_data(
            handle,
            level,
            xoffset,
            yoffset,
            width,
            height,
            data,
            ctx.adapter.device_mut(),
        ) {
            ctx.report_internal("tex_sub_image_2d", &err);
        }
        Ok(())
    })
}

pub fn tex_parameteri(target: GLenum, pname: GLenum, param: GLint) {
    op(|ctx| set_tex_parameter(ctx, target, pname, param as GLenum, param))
}

pub fn tex_parameterf(target: GLenum, pname: GLenum, param: GLfloat) {
    op(|ctx| set_tex_parameter(ctx, target, pname, param as GLenum, param as GLint))
}

pub fn tex_parameteriv(target: GLenum, pname: GLenum, params: &[GLint]) {
    op(|ctx| {
        let first = *params.first().ok_or(ErrorCode::InvalidValue)?;
        set_tex_parameter(ctx, target, pname, first as GLenum, first)
    })
}

pub fn tex_parameterfv(target: GLenum, pname: GLenum, params: &[GLfloat]) {
    op(|ctx| {
        let first = *params.first().ok_or(ErrorCode::InvalidValue)?;
        set_tex_parameter(ctx, target, pname, first as GLenum, first as GLint)
    })
}

fn set_tex_parameter(
    ctx: &mut Context,
    target: GLenum,
    pname: GLenum,
    value: GLenum,
    raw: GLint,
) -> GlResult<()> {
    if target != TEXTURE_2D {
        return Err(ErrorCode::InvalidEnum);
    }

    let handle = ctx.state.active_unit().binding;
    if handle == 0 {
        return Err(ErrorCode::InvalidOperation);
    }

    let resources = ctx.resources.clone();
    let mut resources = resources.borrow_mut();
    let entry = resources
        .textures
        .get_mut(handle)
        .ok_or(ErrorCode::InvalidOperation)?;

    let mut sampler = entry.sampler;
    match pname {
        TEXTURE_MIN_FILTER => {
            sampler.min_filter = TextureFilter::from_gl_min(value).ok_or(ErrorCode::InvalidEnum)?;
        }
        TEXTURE_MAG_FILTER => {
            sampler.mag_filter = TextureFilter::from_gl_mag(value).ok_or(ErrorCode::InvalidEnum)?;
        }
        TEXTURE_WRAP_S => {
            sampler.wrap_s = TextureWrap::from_gl(value).ok_or(ErrorCode::InvalidEnum)?;
        }
        TEXTURE_WRAP_T => {
            sampler.wrap_t = TextureWrap::from_gl(value).ok_or(ErrorCode::InvalidEnum)?;
        }
        GENERATE_MIPMAP => sampler.generate_mipmap = raw != 0,
        _ => return Err(ErrorCode::InvalidEnum),
    }

    entry.sampler = sampler;
    if let Err(err) = ctx.adapter.device_mut().set_sampler(handle, sampler) {
        ctx.report_internal("tex_parameter", &err);
    }
    Ok(())
}

pub fn get_tex_parameteriv(target: GLenum, pname: GLenum, params: &mut [GLint]) {
    op(|ctx| {
        if target != TEXTURE_2D {
            return Err(ErrorCode::InvalidEnum);
        }

        let handle = ctx.state.active_unit().binding;
        let resources = ctx.resources.borrow();
        let entry = resources
            .textures
            .get(handle)
            .ok_or(ErrorCode::InvalidOperation)?;

        let slot = params.first_mut().ok_or(ErrorCode::InvalidValue)?;
        *slot = match pname {
            TEXTURE_MIN_FILTER => entry.sampler.min_filter.as_gl() as GLint,
            TEXTURE_MAG_FILTER => entry.sampler.mag_filter.as_gl() as GLint,
            TEXTURE_WRAP_S => entry.sampler.wrap_s.as_gl() as GLint,
            TEXTURE_WRAP_T => entry.sampler.wrap_t.as_gl() as GLint,
            GENERATE_MIPMAP => GLint::from(entry.sampler.generate_mipmap),
            _ => return Err(ErrorCode::InvalidEnum),
        };
        Ok(())
    })
}

pub fn generate_mipmap_oes(target: GLenum) {
    op(|ctx| {
        if target != TEXTURE_2D {
            return Err(ErrorCode::InvalidEnum);
        }

        let handle = ctx.state.active_unit().binding;
        if handle == 0 {
            return Err(ErrorCode::InvalidOperation);
        }

        let resources = ctx.resources.clone();
        let mut resources = resources.borrow_mut();
        let entry = resources
            .textures
            .get_mut(handle)
            .ok_or(ErrorCode::InvalidOperation)?;

        if entry.level(0).is_none() {
            return Err(ErrorCode::InvalidOperation);
        }

        if let Err(err) = entry.generate_mipmaps(handle, ctx.adapter.device_mut()) {
            ctx.report_internal("generate_mipmap", &err);
        }
        Ok(())
    })
}

pub fn tex_envi(target: GLenum, pname: GLenum, param: GLint) {
    op(|ctx| set_tex_env(ctx, target, pname, &[param as GLfloat]))
}

pub fn tex_envf(target: GLenum, pname: GLenum, param: GLfloat) {
    op(|ctx| set_tex_env(ctx, target, pname, &[param]))
}

pub fn tex_enviv(target: GLenum, pname: GLenum, params: &[GLint]) {
    op(|ctx| {
        let floats: Vec<GLfloat> = params.iter().map(|&v| v as GLfloat).collect();
        set_tex_env(ctx, target, pname, &floats)
    })
}

pub fn tex_envfv(target: GLenum, pname: GLenum, params: &[GLfloat]) {
    op(|ctx| set_tex_env(ctx, target, pname, params))
}

fn set_tex_env(
    ctx: &mut Context,
    target: GLenum,
    pname: GLenum,
    params: &[GLfloat],
) -> GlResult<()> {
    let first = *params.first().ok_or(ErrorCode::InvalidValue)?;
    let as_enum = first as GLenum;
    let env = &mut ctx.state.active_unit_mut().env;

    match target {
        POINT_SPRITE_OES => {
            if pname != COORD_REPLACE_OES {
                return Err(ErrorCode::InvalidEnum);
            }
            env.coord_replace = first != 0.0;
            return Ok(());
        }
        TEXTURE_ENV => {}
        _ => return Err(ErrorCode::InvalidEnum),
    }

    match pname {
        TEXTURE_ENV_MODE => {
            env.mode = TexEnvMode::from_gl(as_enum).ok_or(ErrorCode::InvalidEnum)?;
        }
        TEXTURE_ENV_COLOR => {
            if params.len() < 4 {
                return Err(ErrorCode::InvalidValue);
            }
            env.color = [
                clampf(params[0]),
                clampf(params[1]),
                clampf(params[2]),
                clampf(params[3]),
            ];
        }
        COMBINE_RGB => {
            env.combine.rgb_func =
                CombineFunc::from_gl(as_enum, false).ok_or(ErrorCode::InvalidEnum)?;
        }
        COMBINE_ALPHA => {
            env.combine.alpha_func =
                CombineFunc::from_gl(as_enum, true).ok_or(ErrorCode::InvalidEnum)?;
        }
        SRC0_RGB | SRC1_RGB | SRC2_RGB => {
            let src = CombineSrc::from_gl(as_enum).ok_or(ErrorCode::InvalidEnum)?;
            env.combine.rgb_src[(pname - SRC0_RGB) as usize] = src;
        }
        SRC0_ALPHA | SRC1_ALPHA | SRC2_ALPHA => {
            let src = CombineSrc::from_gl(as_enum).ok_or(ErrorCode::InvalidEnum)?;
            env.combine.alpha_src[(pname - SRC0_ALPHA) as usize] = src;
        }
        OPERAND0_RGB | OPERAND1_RGB | OPERAND2_RGB => {
            let operand = CombineOp::from_gl(as_enum, false).ok_or(ErrorCode::InvalidEnum)?;
            env.combine.rgb_op[(pname - OPERAND0_RGB) as usize] = operand;
        }
        OPERAND0_ALPHA | OPERAND1_ALPHA | OPERAND2_ALPHA => {
            let operand = CombineOp::from_gl(as_enum, true).ok_or(ErrorCode::InvalidEnum)?;
            env.combine.alpha_op[(pname - OPERAND0_ALPHA) as usize] = operand;
        }
        RGB_SCALE | ALPHA_SCALE => {
            if first != 1.0 && first != 2.0 && first != 4.0 {
                return Err(ErrorCode::InvalidValue);
            }
            if pname == RGB_SCALE {
                env.combine.rgb_scale = first;
            } else {
                env.combine.alpha_scale = first;
            }
        }
        _ => return Err(ErrorCode::InvalidEnum),
    }

    Ok(())
}

pub fn get_tex_enviv(target: GLenum, pname: GLenum, params: &mut [GLint]) {
    op(|ctx| {
        let mut floats = [0.0f32; 4];
        let n = read_tex_env(ctx, target, pname, &mut floats)?;
        if params.len() < n {
            return Err(ErrorCode::InvalidValue);
        }
        for (slot, v) in params.iter_mut().zip(floats.iter().take(n)) {
            *slot = *v as GLint;
        }
        Ok(())
    })
}

pub fn get_tex_envfv(target: GLenum, pname: GLenum, params: &mut [GLfloat]) {
    op(|ctx| {
        let mut floats = [0.0f32; 4];
        let n = read_tex_env(ctx, target, pname, &mut floats)?;
        if params.len() < n {
            return Err(ErrorCode::InvalidValue);
        }
        params[..n].copy_from_slice(&floats[..n]);
        Ok(())
    })
}

fn read_tex_env(
    ctx: &Context,
    target: GLenum,
    pname: GLenum,
    out: &mut [GLfloat; 4],
) -> GlResult<usize> {
    let env = &ctx.state.active_unit().env;

    match target {
        POINT_SPRITE_OES => {
            if pname != COORD_REPLACE_OES {
                return Err(ErrorCode::InvalidEnum);
            }
            out[0] = if env.coord_replace { 1.0 } else { 0.0 };
            return Ok(1);
        }
        TEXTURE_ENV => {}
        _ => return Err(ErrorCode::InvalidEnum),
    }

    let scalar = |v: GLfloat, out: &mut [GLfloat; 4]| {
        out[0] = v;
        1
    };

    Ok(match pname {
        TEXTURE_ENV_MODE => scalar(env.mode.as_gl() as GLfloat, out),
        TEXTURE_ENV_COLOR => {
            out.copy_from_slice(&env.color);
            4
        }
        COMBINE_RGB => scalar(env.combine.rgb_func.as_gl() as GLfloat, out),
        COMBINE_ALPHA => scalar(env.combine.alpha_func.as_gl() as GLfloat, out),
        SRC0_RGB | SRC1_RGB | SRC2_RGB => scalar(
            env.combine.rgb_src[(pname - SRC0_RGB) as usize].as_gl() as GLfloat,
            out,
        ),
        SRC0_ALPHA | SRC1_ALPHA | SRC2_ALPHA => scalar(
            env.combine.alpha_src[(pname - SRC0_ALPHA) as usize].as_gl() as GLfloat,
            out,
        ),
        OPERAND0_RGB | OPERAND1_RGB | OPERAND2_RGB => scalar(
            env.combine.rgb_op[(pname - OPERAND0_RGB) as usize].as_gl() as GLfloat,
            out,
        ),
        OPERAND0_ALPHA | OPERAND1_ALPHA | OPERAND2_ALPHA => scalar(
            env.combine.alpha_op[(pname - OPERAND0_ALPHA) as usize].as_gl() as GLfloat,
            out,
        ),
        RGB_SCALE => scalar(env.combine.rgb_scale, out),
        ALPHA_SCALE => scalar(env.combine.alpha_scale, out),
        _ => return Err(ErrorCode::InvalidEnum),
    })
}
