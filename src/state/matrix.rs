//! Matrix mode and the bounded matrix stacks.

use cgmath::{Deg, Matrix4, SquareMatrix, Vector3};

use crate::api::types::*;
use crate::errors::{ErrorCode, GlResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatrixMode {
    ModelView,
    Projection,
    Texture,
}

impl MatrixMode {
    pub fn from_gl(v: GLenum) -> Option<MatrixMode> {
        match v {
            MODELVIEW => Some(MatrixMode::ModelView),
            PROJECTION => Some(MatrixMode::Projection),
            TEXTURE => Some(MatrixMode::Texture),
            _ => None,
        }
    }

    pub fn as_gl(self) -> GLenum {
        match self {
            MatrixMode::ModelView => MODELVIEW,
            MatrixMode::Projection => PROJECTION,
            MatrixMode::Texture => TEXTURE,
        }
    }
}

/// A matrix stack with the legacy depth discipline: size is always at least
/// 1 and at most `max_depth`; a failed push or pop leaves both the size and
/// the top value untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixStack {
    stack: Vec<Matrix4<f32>>,
    max_depth: usize,
}

impl MatrixStack {
    pub fn new(max_depth: usize) -> Self {
        debug_assert!(max_depth >= 1);
        MatrixStack {
            stack: vec![Matrix4::identity()],
            max_depth,
        }
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    #[inline]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    #[inline]
    pub fn top(&self) -> &Matrix4<f32> {
        self.stack.last().unwrap()
    }

    #[inline]
    pub fn top_mut(&mut self) -> &mut Matrix4<f32> {
        self.stack.last_mut().unwrap()
    }

    /// Duplicates the top entry. Fails with `STACK_OVERFLOW` once the stack
    /// holds `max_depth` entries.
    pub fn push(&mut self) -> GlResult<()> {
        if self.stack.len() >= self.max_depth {
            return Err(ErrorCode::StackOverflow);
        }

        let top = *self.top();
        self.stack.push(top);
        Ok(())
    }

    /// Discards the top entry. Fails with `STACK_UNDERFLOW` on a stack of
    /// size 1.
    pub fn pop(&mut self) -> GlResult<()> {
        if self.stack.len() <= 1 {
            return Err(ErrorCode::StackUnderflow);
        }

        self.stack.pop();
        Ok(())
    }

    #[inline]
    pub fn load_identity(&mut self) {
        *self.top_mut() = Matrix4::identity();
    }

    #[inline]
    pub fn load(&mut self, m: Matrix4<f32>) {
        *self.top_mut() = m;
    }

    /// Post-multiplies the top by `m`, matching the legacy convention that
    /// the most recent transform applies closest to the vertex.
    #[inline]
    pub fn mult(&mut self, m: Matrix4<f32>) {
        let top = *self.top();
        *self.top_mut() = top * m;
    }

    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        self.mult(Matrix4::from_translation(Vector3::new(x, y, z)));
    }

    pub fn rotate(&mut self, angle_degrees: f32, x: f32, y: f32, z: f32) {
        let axis = Vector3::new(x, y, z);
        let len = (x * x + y * y + z * z).sqrt();
        if len == 0.0 {
            return;
        }

        self.mult(Matrix4::from_axis_angle(axis / len, Deg(angle_degrees)));
    }

    pub fn scale(&mut self, x: f32, y: f32, z: f32) {
        self.mult(Matrix4::from_nonuniform_scale(x, y, z));
    }

    pub fn frustum(&mut self, l: f32, r: f32, b: f32, t: f32, n: f32, f: f32) {
        self.mult(cgmath::frustum(l, r, b, t, n, f));
    }

    pub fn ortho(&mut self, l: f32, r: f32, b: f32, t: f32, n: f32, f: f32) {
        self.mult(cgmath::ortho(l, r, b, t, n, f));
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn push_pop_limits() {
        let mut stack = MatrixStack::new(2);
        assert_eq!(stack.depth(), 1);

        assert!(stack.push().is_ok());
        assert_eq!(stack.push(), Err(ErrorCode::StackOverflow));
        assert_eq!(stack.depth(), 2);

        assert!(stack.pop().is_ok());
        assert_eq!(stack.pop(), Err(ErrorCode::StackUnderflow));
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn failed_pop_preserves_top() {
        let mut stack = MatrixStack::new(4);
        stack.translate(1.0, 2.0, 3.0);
        let top = *stack.top();

        assert!(stack.pop().is_err());
        assert_eq!(*stack.top(), top);
    }
}
