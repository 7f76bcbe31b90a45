//! The 16.16 fixed-point (`x`-suffixed) entry points. Each converts and
//! delegates to its float body; parameters the legacy spec defines as
//! enumerations or booleans pass through unconverted.

use super::types::*;
use super::{fixed_to_float as x2f, *};

fn convert4(params: &[GLfixed; 4]) -> [GLfloat; 4] {
    [
        x2f(params[0]),
        x2f(params[1]),
        x2f(params[2]),
        x2f(params[3]),
    ]
}

fn convert16(m: &[GLfixed; 16]) -> [GLfloat; 16] {
    let mut out = [0.0; 16];
    for (slot, v) in out.iter_mut().zip(m.iter()) {
        *slot = x2f(*v);
    }
    out
}

pub fn load_matrixx(m: &[GLfixed; 16]) {
    load_matrixf(&convert16(m));
}

pub fn mult_matrixx(m: &[GLfixed; 16]) {
    mult_matrixf(&convert16(m));
}

pub fn translatex(x: GLfixed, y: GLfixed, z: GLfixed) {
    translatef(x2f(x), x2f(y), x2f(z));
}

pub fn rotatex(angle: GLfixed, x: GLfixed, y: GLfixed, z: GLfixed) {
    rotatef(x2f(angle), x2f(x), x2f(y), x2f(z));
}

pub fn scalex(x: GLfixed, y: GLfixed, z: GLfixed) {
    scalef(x2f(x), x2f(y), x2f(z));
}

pub fn frustumx(l: GLfixed, r: GLfixed, b: GLfixed, t: GLfixed, n: GLfixed, f: GLfixed) {
    frustumf(x2f(l), x2f(r), x2f(b), x2f(t), x2f(n), x2f(f));
}

pub fn orthox(l: GLfixed, r: GLfixed, b: GLfixed, t: GLfixed, n: GLfixed, f: GLfixed) {
    orthof(x2f(l), x2f(r), x2f(b), x2f(t), x2f(n), x2f(f));
}

pub fn clear_colorx(red: GLclampx, green: GLclampx, blue: GLclampx, alpha: GLclampx) {
    clear_colorf(x2f(red), x2f(green), x2f(blue), x2f(alpha));
}

pub fn clear_depthx(depth: GLclampx) {
    clear_depthf(x2f(depth));
}

pub fn depth_rangex(near: GLclampx, far: GLclampx) {
    depth_rangef(x2f(near), x2f(far));
}

pub fn line_widthx(width: GLfixed) {
    line_widthf(x2f(width));
}

pub fn point_sizex(size: GLfixed) {
    point_sizef(x2f(size));
}

pub fn point_parameterx(pname: GLenum, param: GLfixed) {
    point_parameterf(pname, x2f(param));
}

pub fn point_parameterxv(pname: GLenum, params: &[GLfixed]) {
    let floats: Vec<GLfloat> = params.iter().map(|&v| x2f(v)).collect();
    point_parameterfv(pname, &floats);
}

pub fn polygon_offsetx(factor: GLfixed, units: GLfixed) {
    polygon_offsetf(x2f(factor), x2f(units));
}

pub fn sample_coveragex(value: GLclampx, invert: GLboolean) {
    sample_coveragef(x2f(value), invert);
}

pub fn alpha_funcx(func: GLenum, reference: GLclampx) {
    alpha_funcf(func, x2f(reference));
}

/// `FOG_MODE` carries an enumeration; everything else converts.
pub fn fogx(pname: GLenum, param: GLfixed) {
    if pname == FOG_MODE {
        fogf(pname, param as GLfloat);
    } else {
        fogf(pname, x2f(param));
    }
}

pub fn fogxv(pname: GLenum, params: &[GLfixed]) {
    if pname == FOG_MODE {
        if let Some(&first) = params.first() {
            fogf(pname, first as GLfloat);
        }
        return;
    }

    let floats: Vec<GLfloat> = params.iter().map(|&v| x2f(v)).collect();
    fogfv(pname, &floats);
}

pub fn light_modelx(pname: GLenum, param: GLfixed) {
    light_modelf(pname, x2f(param));
}

pub fn light_modelxv(pname: GLenum, params: &[GLfixed]) {
    let floats: Vec<GLfloat> = params.iter().map(|&v| x2f(v)).collect();
    light_modelfv(pname, &floats);
}

pub fn lightx(light: GLenum, pname: GLenum, param: GLfixed) {
    lightf(light, pname, x2f(param));
}

pub fn lightxv(light: GLenum, pname: GLenum, params: &[GLfixed]) {
    let floats: Vec<GLfloat> = params.iter().map(|&v| x2f(v)).collect();
    lightfv(light, pname, &floats);
}

pub fn materialx(face: GLenum, pname: GLenum, param: GLfixed) {
    materialf(face, pname, x2f(param));
}

pub fn materialxv(face: GLenum, pname: GLenum, params: &[GLfixed]) {
    let floats: Vec<GLfloat> = params.iter().map(|&v| x2f(v)).collect();
    materialfv(face, pname, &floats);
}

pub fn clip_planex(plane: GLenum, equation: &[GLfixed; 4]) {
    clip_planef(plane, &convert4(equation));
}

/// The mode, combine and operand selectors carry enumerations; the scales
/// and color convert.
pub fn tex_envx(target: GLenum, pname: GLenum, param: GLfixed) {
    match pname {
        RGB_SCALE | ALPHA_SCALE => tex_envf(target, pname, x2f(param)),
        _ => tex_envf(target, pname, param as GLfloat),
    }
}

pub fn tex_envxv(target: GLenum, pname: GLenum, params: &[GLfixed]) {
    match pname {
        TEXTURE_ENV_COLOR | RGB_SCALE | ALPHA_SCALE => {
            let floats: Vec<GLfloat> = params.iter().map(|&v| x2f(v)).collect();
            tex_envfv(target, pname, &floats);
        }
        _ => {
            let floats: Vec<GLfloat> = params.iter().map(|&v| v as GLfloat).collect();
            tex_envfv(target, pname, &floats);
        }
    }
}

pub fn tex_parameterx(target: GLenum, pname: GLenum, param: GLfixed) {
    // Every accepted pname is symbolic.
    tex_parameteri(target, pname, param);
}

pub fn color4x(red: GLfixed, green: GLfixed, blue: GLfixed, alpha: GLfixed) {
    color4f(x2f(red), x2f(green), x2f(blue), x2f(alpha));
}

pub fn normal3x(nx: GLfixed, ny: GLfixed, nz: GLfixed) {
    normal3f(x2f(nx), x2f(ny), x2f(nz));
}

pub fn multi_tex_coord4x(target: GLenum, s: GLfixed, t: GLfixed, r: GLfixed, q: GLfixed) {
    multi_tex_coord4f(target, x2f(s), x2f(t), x2f(r), x2f(q));
}
