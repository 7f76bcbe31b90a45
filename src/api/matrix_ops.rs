//! Matrix mode and transformation entry points.

use cgmath::Matrix4;

use crate::errors::ErrorCode;
use crate::state::MatrixMode;

use super::op;
use super::types::*;

/// Column-major 4x4, the order the legacy API defines.
fn matrix_from_slice(m: &[GLfloat; 16]) -> Matrix4<f32> {
    Matrix4::new(
        m[0], m[1], m[2], m[3], m[4], m[5], m[6], m[7], m[8], m[9], m[10], m[11], m[12], m[13],
        m[14], m[15],
    )
}

pub fn matrix_mode(mode: GLenum) {
    op(|ctx| {
        ctx.state.matrices.mode = MatrixMode::from_gl(mode).ok_or(ErrorCode::InvalidEnum)?;
        Ok(())
    })
}

pub fn load_identity() {
    op(|ctx| {
        ctx.state.current_stack().load_identity();
        Ok(())
    })
}

pub fn load_matrixf(m: &[GLfloat; 16]) {
    op(|ctx| {
        ctx.state.current_stack().load(matrix_from_slice(m));
        Ok(())
    })
}

pub fn mult_matrixf(m: &[GLfloat; 16]) {
    op(|ctx| {
        ctx.state.current_stack().mult(matrix_from_slice(m));
        Ok(())
    })
}

pub fn push_matrix() {
    op(|ctx| ctx.state.current_stack().push())
}

pub fn pop_matrix() {
    op(|ctx| ctx.state.current_stack().pop())
}

pub fn translatef(x: GLfloat, y: GLfloat, z: GLfloat) {
    op(|ctx| {
        ctx.state.current_stack().translate(x, y, z);
        Ok(())
    })
}

pub fn rotatef(angle: GLfloat, x: GLfloat, y: GLfloat, z: GLfloat) {
    op(|ctx| {
        ctx.state.current_stack().rotate(angle, x, y, z);
        Ok(())
    })
}

pub fn scalef(x: GLfloat, y: GLfloat, z: GLfloat) {
    op(|ctx| {
        ctx.state.current_stack().scale(x, y, z);
        Ok(())
    })
}

pub fn frustumf(
    left: GLfloat,
    right: GLfloat,
    bottom: GLfloat,
    top: GLfloat,
    near: GLfloat,
    far: GLfloat,
) {
    op(|ctx| {
        if near <= 0.0 || far <= 0.0 || left == right || bottom == top || near == far {
            return Err(ErrorCode::InvalidValue);
        }

        ctx.state.current_stack().frustum(left, right, bottom, top, near, far);
        Ok(())
    })
}

pub fn orthof(
    left: GLfloat,
    right: GLfloat,
    bottom: GLfloat,
    top: GLfloat,
    near: GLfloat,
    far: GLfloat,
) {
    op(|ctx| {
        if left == right || bottom == top || near == far {
            return Err(ErrorCode::InvalidValue);
        }

        ctx.state.current_stack().ortho(left, right, bottom, top, near, far);
        Ok(())
    })
}
