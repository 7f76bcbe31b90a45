//! Fence entry points (`NV_fence` shape). The emulated queue retires all
//! submitted work on `finish`, so testing a fence drains the queue and
//! reports completion.

use crate::errors::ErrorCode;
use crate::resources::Fence;

use super::texture_ops::check_gen_count;
use super::types::*;
use super::{from_bool, op, with};

pub fn gen_fences(n: GLsizei, fences: &mut [GLuint]) {
    op(|ctx| {
        let n = check_gen_count(n, fences.len())?;
        for slot in fences.iter_mut().take(n) {
            *slot = ctx.fences.allocate(Fence::default(), false);
        }
        Ok(())
    })
}

pub fn delete_fences(n: GLsizei, fences: &[GLuint]) {
    op(|ctx| {
        let n = check_gen_count(n, fences.len())?;
        for &handle in &fences[..n] {
            ctx.fences.erase(handle);
        }
        Ok(())
    })
}

pub fn is_fence(fence: GLuint) -> GLboolean {
    with(GL_FALSE, |ctx| {
        Ok(from_bool(fence != 0 && ctx.fences.contains(fence)))
    })
}

pub fn set_fence(fence: GLuint, condition: GLenum) {
    op(|ctx| {
        if condition != ALL_COMPLETED_NV {
            return Err(ErrorCode::InvalidEnum);
        }

        match ctx.fences.get_mut(fence) {
            Some(entry) => {
                entry.set();
                Ok(())
            }
            None => Err(ErrorCode::InvalidOperation),
        }
    })
}

pub fn test_fence(fence: GLuint) -> GLboolean {
    with(GL_FALSE, |ctx| {
        if !ctx.fences.contains(fence) {
            return Err(ErrorCode::InvalidOperation);
        }

        // The device queue completes synchronously once drained.
        if let Err(err) = ctx.adapter.finish() {
            ctx.report_internal("test_fence", &err);
        }
        if let Some(entry) = ctx.fences.get_mut(fence) {
            entry.complete();
            Ok(from_bool(entry.signaled))
        } else {
            Err(ErrorCode::InvalidOperation)
        }
    })
}

pub fn finish_fence(fence: GLuint) {
    op(|ctx| {
        if !ctx.fences.contains(fence) {
            return Err(ErrorCode::InvalidOperation);
        }

        if let Err(err) = ctx.adapter.finish() {
            ctx.report_internal("finish_fence", &err);
        }
        if let Some(entry) = ctx.fences.get_mut(fence) {
            entry.complete();
        }
        Ok(())
    })
}
