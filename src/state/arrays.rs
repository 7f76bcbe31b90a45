//! The fixed vertex attribute arrays. The whole block is what a
//! vertex-array-set object captures and restores on bind.

use crate::api::types::*;
use crate::caps::Capabilities;

/// Scalar type of an attribute array element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    Byte,
    UnsignedByte,
    Short,
    UnsignedShort,
    Float,
    Fixed,
}

impl ScalarType {
    pub fn from_gl(v: GLenum) -> Option<ScalarType> {
        match v {
            BYTE => Some(ScalarType::Byte),
            UNSIGNED_BYTE => Some(ScalarType::UnsignedByte),
            SHORT => Some(ScalarType::Short),
            UNSIGNED_SHORT => Some(ScalarType::UnsignedShort),
            FLOAT => Some(ScalarType::Float),
            FIXED => Some(ScalarType::Fixed),
            _ => None,
        }
    }

    pub fn as_gl(self) -> GLenum {
        match self {
            ScalarType::Byte => BYTE,
            ScalarType::UnsignedByte => UNSIGNED_BYTE,
            ScalarType::Short => SHORT,
            ScalarType::UnsignedShort => UNSIGNED_SHORT,
            ScalarType::Float => FLOAT,
            ScalarType::Fixed => FIXED,
        }
    }

    /// Size in bytes of one element.
    pub fn size(self) -> usize {
        match self {
            ScalarType::Byte | ScalarType::UnsignedByte => 1,
            ScalarType::Short | ScalarType::UnsignedShort => 2,
            ScalarType::Float | ScalarType::Fixed => 4,
        }
    }
}

/// One attribute array. Client-side (unbuffered) pointers are not
/// representable on this surface: the pointer is a byte offset into the
/// buffer object that was bound to `ARRAY_BUFFER` at specification time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrayPointer {
    pub enabled: bool,
    pub size: i32,
    pub ty: ScalarType,
    pub stride: i32,
    pub offset: usize,
    pub buffer: u32,
}

impl ArrayPointer {
    fn new(size: i32, ty: ScalarType) -> Self {
        ArrayPointer {
            enabled: false,
            size,
            ty,
            stride: 0,
            offset: 0,
            buffer: 0,
        }
    }
}

/// The complete client-array block; object 0 is the protected default
/// vertex-array set, and binding another set swaps the whole block.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexArraySet {
    pub vertex: ArrayPointer,
    pub normal: ArrayPointer,
    pub color: ArrayPointer,
    pub point_size: ArrayPointer,
    pub tex_coords: Vec<ArrayPointer>,
    /// The `ELEMENT_ARRAY_BUFFER` binding is part of the captured block.
    pub element_buffer: u32,
}

impl VertexArraySet {
    pub fn new(caps: &Capabilities) -> Self {
        VertexArraySet {
            vertex: ArrayPointer::new(4, ScalarType::Float),
            normal: ArrayPointer::new(3, ScalarType::Float),
            color: ArrayPointer::new(4, ScalarType::Float),
            point_size: ArrayPointer::new(1, ScalarType::Float),
            tex_coords: (0..caps.max_texture_units)
                .map(|_| ArrayPointer::new(4, ScalarType::Float))
                .collect(),
            element_buffer: 0,
        }
    }

    /// Drops every reference to `buffer`, part of the delete-while-bound
    /// policy: a deleted buffer disappears from all binding points at once.
    pub fn detach_buffer(&mut self, buffer: u32) {
        for pointer in self.pointers_mut() {
            if pointer.buffer == buffer {
                pointer.buffer = 0;
            }
        }

        if self.element_buffer == buffer {
            self.element_buffer = 0;
        }
    }

    fn pointers_mut(&mut self) -> impl Iterator<Item = &mut ArrayPointer> {
        vec![
            &mut self.vertex,
            &mut self.normal,
            &mut self.color,
            &mut self.point_size,
        ]
        .into_iter()
        .chain(self.tex_coords.iter_mut())
    }
}
