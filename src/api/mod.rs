//! The spec-shaped entry-point surface.
//!
//! One Rust function per legacy API function, snake_case, parameter order
//! and types preserved, enumerant values bit-for-bit. Every operation
//! resolves the thread-current context, validates its arguments against
//! the legacy rules, and only then mutates state or asks the backend
//! adapter to act; a call that fails validation has no observable side
//! effect beyond the sticky error.
//!
//! With no context current an entry point logs a warning and returns a
//! benign default; it never panics.

pub mod types;

mod buffer_ops;
mod draw_ops;
mod fixed;
mod framebuffer_ops;
mod get_ops;
mod light_ops;
mod matrix_ops;
mod state_ops;
mod sync_ops;
mod texture_ops;

pub use self::buffer_ops::*;
pub use self::draw_ops::*;
pub use self::fixed::*;
pub use self::framebuffer_ops::*;
pub use self::get_ops::*;
pub use self::light_ops::*;
pub use self::matrix_ops::*;
pub use self::state_ops::*;
pub use self::sync_ops::*;
pub use self::texture_ops::*;

use crate::context::{self, Context};
use crate::errors::GlResult;

use self::types::*;

/// Dispatch shared by every entry point: resolve the current context, run
/// the validated operation, translate a validation failure into the sticky
/// error, and fall back benignly without a context.
pub(crate) fn with<R>(fallback: R, f: impl FnOnce(&mut Context) -> GlResult<R>) -> R {
    let outcome = context::with_current(|ctx| match f(ctx) {
        Ok(v) => Some(v),
        Err(code) => {
            ctx.record_error(code);
            None
        }
    });

    match outcome {
        Some(Some(v)) => v,
        Some(None) => fallback,
        None => {
            warn!("entry point called with no current context");
            fallback
        }
    }
}

/// [`with`] for the common no-return case.
#[inline]
pub(crate) fn op(f: impl FnOnce(&mut Context) -> GlResult<()>) {
    with((), f)
}

/// 16.16 fixed point to float.
#[inline]
pub fn fixed_to_float(v: GLfixed) -> GLfloat {
    v as f32 / 65536.0
}

/// Float to 16.16 fixed point.
#[inline]
pub fn float_to_fixed(v: GLfloat) -> GLfixed {
    (v * 65536.0) as GLfixed
}

#[inline]
pub(crate) fn to_bool(v: GLboolean) -> bool {
    v != GL_FALSE
}

#[inline]
pub(crate) fn from_bool(v: bool) -> GLboolean {
    if v {
        GL_TRUE
    } else {
        GL_FALSE
    }
}

#[inline]
pub(crate) fn clampf(v: GLfloat) -> GLfloat {
    v.max(0.0).min(1.0)
}
