//! Buffer objects: front-end bookkeeping plus delegation to the device.

use crate::api::types::*;
use crate::device::Device;
use crate::errors::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferUsage {
    StaticDraw,
    DynamicDraw,
}

impl BufferUsage {
    pub fn from_gl(v: GLenum) -> Option<BufferUsage> {
        match v {
            STATIC_DRAW => Some(BufferUsage::StaticDraw),
            DYNAMIC_DRAW => Some(BufferUsage::DynamicDraw),
            _ => None,
        }
    }

    pub fn as_gl(self) -> GLenum {
        match self {
            BufferUsage::StaticDraw => STATIC_DRAW,
            BufferUsage::DynamicDraw => DYNAMIC_DRAW,
        }
    }
}

/// A buffer object. The byte store is mirrored front-end so size queries
/// and sub-range bounds checks never round-trip to the device.
#[derive(Debug, Clone, PartialEq)]
pub struct Buffer {
    usage: BufferUsage,
    size: usize,
}

impl Default for Buffer {
    fn default() -> Self {
        Buffer {
            usage: BufferUsage::StaticDraw,
            size: 0,
        }
    }
}

impl Buffer {
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn usage(&self) -> BufferUsage {
        self.usage
    }

    /// (Re)initializes the data store. `data` of `None` allocates
    /// uninitialized storage of `size` bytes.
    pub fn set_data(
        &mut self,
        handle: u32,
        size: usize,
        usage: BufferUsage,
        data: Option<&[u8]>,
        device: &mut dyn Device,
    ) -> Result<()> {
        device.buffer_data(handle, size, data, usage)?;
        self.usage = usage;
        self.size = size;
        Ok(())
    }

    /// Replaces a sub-range of the data store; bounds were validated by
    /// the dispatch layer against `self.size()`.
    pub fn set_sub_data(
        &mut self,
        handle: u32,
        offset: usize,
        data: &[u8],
        device: &mut dyn Device,
    ) -> Result<()> {
        device.buffer_sub_data(handle, offset, data)
    }
}
