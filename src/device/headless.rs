//! A device that renders nothing. It validates nothing and fails nothing;
//! it only records what was asked of it, which is exactly what headless
//! tests want to observe.

use std::cell::RefCell;
use std::rc::Rc;

use crate::caps::DeviceLimits;
use crate::errors::Result;
use crate::resources::{Attachment, BufferUsage, RenderbufferFormat, SamplerState, TexelType,
                       TexFormat};
use crate::state::ScalarType;

use super::{AttributeBinding, Device, FramebufferSlot, Primitive, ProgramId, RasterState,
            UniformValue};

/// Counters and transcripts of everything the device was asked to do.
#[derive(Debug, Default)]
pub struct HeadlessStats {
    pub programs: Vec<(ProgramId, String, String)>,
    pub programs_deleted: u32,
    pub buffers_created: u32,
    pub textures_created: u32,
    pub renderbuffers_created: u32,
    pub framebuffers_created: u32,
    pub uniforms_set: u32,
    pub draw_calls: u32,
    pub clears: u32,
    pub flushes: u32,
    pub finishes: u32,
}

pub struct HeadlessDevice {
    limits: DeviceLimits,
    stats: Rc<RefCell<HeadlessStats>>,
}

impl HeadlessDevice {
    pub fn new() -> Self {
        HeadlessDevice::with_limits(DeviceLimits {
            renderer: "headless".into(),
            ..Default::default()
        })
    }

    pub fn with_limits(limits: DeviceLimits) -> Self {
        HeadlessDevice {
            limits,
            stats: Rc::new(RefCell::new(HeadlessStats::default())),
        }
    }

    /// A shared view of the transcript, alive after the device is boxed
    /// into a context.
    pub fn stats(&self) -> Rc<RefCell<HeadlessStats>> {
        Rc::clone(&self.stats)
    }
}

impl Default for HeadlessDevice {
    fn default() -> Self {
        HeadlessDevice::new()
    }
}

impl Device for HeadlessDevice {
    fn limits(&self) -> DeviceLimits {
        self.limits.clone()
    }

    fn create_program(&mut self, program: ProgramId, vs: &str, fs: &str) -> Result<()> {
        self.stats
            .borrow_mut()
            .programs
            .push((program, vs.into(), fs.into()));
        Ok(())
    }

    fn delete_program(&mut self, _: ProgramId) -> Result<()> {
        self.stats.borrow_mut().programs_deleted += 1;
        Ok(())
    }

    fn bind_program(&mut self, _: ProgramId) -> Result<()> {
        Ok(())
    }

    fn set_uniform(&mut self, _: ProgramId, _: &str, _: UniformValue) -> Result<()> {
        self.stats.borrow_mut().uniforms_set += 1;
        Ok(())
    }

    fn create_buffer(&mut self, _: u32) -> Result<()> {
        self.stats.borrow_mut().buffers_created += 1;
        Ok(())
    }

    fn buffer_data(&mut self, _: u32, _: usize, _: Option<&[u8]>, _: BufferUsage) -> Result<()> {
        Ok(())
    }

    fn buffer_sub_data(&mut self, _: u32, _: usize, _: &[u8]) -> Result<()> {
        Ok(())
    }

    fn delete_buffer(&mut self, _: u32) -> Result<()> {
        Ok(())
    }

    fn create_texture(&mut self, _: u32) -> Result<()> {
        self.stats.borrow_mut().textures_created += 1;
        Ok(())
    }

    fn texture_data(
        &mut self,
        _: u32,
        _: i32,
        _: TexFormat,
        _: i32,
        _: i32,
        _: TexelType,
        _: Option<&[u8]>,
    ) -> Result<()> {
        Ok(())
    }

    fn texture_sub_data(
        &mut self,
        _: u32,
        _: i32,
        _: i32,
        _: i32,
        _: i32,
        _: i32,
        _: &[u8],
    ) -> Result<()> {
        Ok(())
    }

    fn set_sampler(&mut self, _: u32, _: SamplerState) -> Result<()> {
        Ok(())
    }

    fn generate_mipmaps(&mut self, _: u32) -> Result<()> {
        Ok(())
    }

    fn bind_texture(&mut self, _: usize, _: u32) -> Result<()> {
        Ok(())
    }

    fn delete_texture(&mut self, _: u32) -> Result<()> {
        Ok(())
    }

    fn create_renderbuffer(&mut self, _: u32) -> Result<()> {
        self.stats.borrow_mut().renderbuffers_created += 1;
        Ok(())
    }

    fn renderbuffer_storage(&mut self, _: u32, _: RenderbufferFormat, _: i32, _: i32) -> Result<()> {
        Ok(())
    }

    fn delete_renderbuffer(&mut self, _: u32) -> Result<()> {
        Ok(())
    }

    fn create_framebuffer(&mut self, _: u32) -> Result<()> {
        self.stats.borrow_mut().framebuffers_created += 1;
        Ok(())
    }

    fn set_framebuffer_attachment(
        &mut self,
        _: u32,
        _: FramebufferSlot,
        _: Attachment,
    ) -> Result<()> {
        Ok(())
    }

    fn bind_framebuffer(&mut self, _: u32) -> Result<()> {
        Ok(())
    }

    fn delete_framebuffer(&mut self, _: u32) -> Result<()> {
        Ok(())
    }

    fn apply_raster_state(&mut self, _: &RasterState) -> Result<()> {
        Ok(())
    }

    fn draw_arrays(
        &mut self,
        _: ProgramId,
        _: Primitive,
        _: &[AttributeBinding],
        _: i32,
        _: i32,
    ) -> Result<()> {
        self.stats.borrow_mut().draw_calls += 1;
        Ok(())
    }

    fn draw_elements(
        &mut self,
        _: ProgramId,
        _: Primitive,
        _: &[AttributeBinding],
        _: u32,
        _: ScalarType,
        _: usize,
        _: i32,
    ) -> Result<()> {
        self.stats.borrow_mut().draw_calls += 1;
        Ok(())
    }

    fn clear(&mut self, _: Option<[f32; 4]>, _: Option<f32>, _: Option<i32>) -> Result<()> {
        self.stats.borrow_mut().clears += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stats.borrow_mut().flushes += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.stats.borrow_mut().finishes += 1;
        Ok(())
    }
}
