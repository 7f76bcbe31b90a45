//! The backend of the emulator, which is responsible for only one thing:
//! executing resource and draw commands on a modern, shader-only native
//! API. Backends are peer implementations of the [`Device`] capability
//! set, selected at context construction.

pub mod adapter;
pub mod headless;

use crate::api::types::*;
use crate::caps::DeviceLimits;
use crate::errors::Result;
use crate::resources::{Attachment, BufferUsage, RenderbufferFormat, SamplerState, TexelType,
                       TexFormat};
use crate::state::{PipelineState, ScalarType};

/// Identifier of a synthesized, compiled-and-linked program on the device.
pub type ProgramId = u32;

bitflags! {
    /// Which planes of the draw surface a clear touches.
    pub struct ClearFlags: u32 {
        const COLOR = 0x1;
        const DEPTH = 0x2;
        const STENCIL = 0x4;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Points,
    Lines,
    LineLoop,
    LineStrip,
    Triangles,
    TriangleStrip,
    TriangleFan,
}

impl Primitive {
    pub fn from_gl(v: GLenum) -> Option<Primitive> {
        match v {
            POINTS => Some(Primitive::Points),
            LINES => Some(Primitive::Lines),
            LINE_LOOP => Some(Primitive::LineLoop),
            LINE_STRIP => Some(Primitive::LineStrip),
            TRIANGLES => Some(Primitive::Triangles),
            TRIANGLE_STRIP => Some(Primitive::TriangleStrip),
            TRIANGLE_FAN => Some(Primitive::TriangleFan),
            _ => None,
        }
    }
}

/// Attachment points of a device framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramebufferSlot {
    Color,
    Depth,
    Stencil,
}

/// A uniform value pushed into a bound program.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Int(i32),
    Float(f32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
    Matrix3([[f32; 3]; 3]),
    Matrix4([[f32; 4]; 4]),
}

/// Where one vertex attribute of a draw comes from: a buffer-backed array,
/// or a constant when the matching client array is disabled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttributeSource {
    Array {
        buffer: u32,
        size: i32,
        ty: ScalarType,
        normalized: bool,
        stride: i32,
        offset: usize,
    },
    Constant([f32; 4]),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttributeBinding {
    pub name: &'static str,
    pub source: AttributeSource,
}

/// The non-programmable raster state a draw runs under, snapshotted from
/// the front-end aggregate. Everything that became shader code is absent.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterState {
    pub viewport: (i32, i32, i32, i32),
    pub depth_range: (f32, f32),
    pub scissor: Option<(i32, i32, i32, i32)>,
    pub color_write: (bool, bool, bool, bool),
    pub blend: Option<(GLenum, GLenum)>,
    pub depth_test: Option<GLenum>,
    pub depth_write: bool,
    pub stencil: Option<(GLenum, i32, u32, GLenum, GLenum, GLenum)>,
    pub stencil_write: u32,
    pub cull: Option<GLenum>,
    pub front_face: GLenum,
    pub polygon_offset: Option<(f32, f32)>,
    pub dither: bool,
    pub line_width: f32,
    pub sample_coverage: Option<(f32, bool)>,
}

impl<'a> From<&'a PipelineState> for RasterState {
    fn from(state: &'a PipelineState) -> Self {
        let v = &state.viewport;
        let s = &state.scissor;
        let c = &state.color_buffer;
        let d = &state.depth_buffer;
        let st = &state.stencil_buffer;
        let p = &state.polygon;

        RasterState {
            viewport: (v.x, v.y, v.width, v.height),
            depth_range: v.depth_range,
            scissor: if s.enabled {
                Some((s.x, s.y, s.width, s.height))
            } else {
                None
            },
            color_write: c.write_mask,
            blend: if c.blend_enabled {
                Some((c.blend_src.as_gl(), c.blend_dst.as_gl()))
            } else {
                None
            },
            depth_test: if d.test_enabled {
                Some(d.func.as_gl())
            } else {
                None
            },
            depth_write: d.write_mask,
            stencil: if st.test_enabled {
                Some((
                    st.func.as_gl(),
                    st.reference,
                    st.value_mask,
                    st.on_fail.as_gl(),
                    st.on_depth_fail.as_gl(),
                    st.on_depth_pass.as_gl(),
                ))
            } else {
                None
            },
            stencil_write: st.write_mask,
            cull: if p.cull_enabled {
                Some(p.cull_face.as_gl())
            } else {
                None
            },
            front_face: p.front_face.as_gl(),
            polygon_offset: if p.offset_fill_enabled {
                Some((p.offset_factor, p.offset_units))
            } else {
                None
            },
            dither: c.dither,
            line_width: state.line.width,
            sample_coverage: if state.multisample.coverage_enabled {
                Some((
                    state.multisample.coverage_value,
                    state.multisample.coverage_invert,
                ))
            } else {
                None
            },
        }
    }
}

/// The capability set a native backend must provide. One implementation is
/// attached per context; the front end is backend-agnostic.
pub trait Device {
    fn limits(&self) -> DeviceLimits;

    fn create_program(&mut self, program: ProgramId, vs: &str, fs: &str) -> Result<()>;
    fn delete_program(&mut self, program: ProgramId) -> Result<()>;
    fn bind_program(&mut self, program: ProgramId) -> Result<()>;
    fn set_uniform(&mut self, program: ProgramId, name: &str, value: UniformValue) -> Result<()>;

    fn create_buffer(&mut self, handle: u32) -> Result<()>;
    fn buffer_data(
        &mut self,
        handle: u32,
        size: usize,
        data: Option<&[u8]>,
        usage: BufferUsage,
    ) -> Result<()>;
    fn buffer_sub_data(&mut self, handle: u32, offset: usize, data: &[u8]) -> Result<()>;
    fn delete_buffer(&mut self, handle: u32) -> Result<()>;

    fn create_texture(&mut self, handle: u32) -> Result<()>;
    fn texture_data(
        &mut self,
        handle: u32,
        level: i32,
        format: TexFormat,
        width: i32,
        height: i32,
        ty: TexelType,
        data: Option<&[u8]>,
    ) -> Result<()>;
    fn texture_sub_data(
        &mut self,
        handle: u32,
        level: i32,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        data: &[u8],
    ) -> Result<()>;
    fn set_sampler(&mut self, handle: u32, sampler: SamplerState) -> Result<()>;
    fn generate_mipmaps(&mut self, handle: u32) -> Result<()>;
    fn bind_texture(&mut self, unit: usize, handle: u32) -> Result<()>;
    fn delete_texture(&mut self, handle: u32) -> Result<()>;

    fn create_renderbuffer(&mut self, handle: u32) -> Result<()>;
    fn renderbuffer_storage(
        &mut self,
        handle: u32,
        format: RenderbufferFormat,
        width: i32,
        height: i32,
    ) -> Result<()>;
    fn delete_renderbuffer(&mut self, handle: u32) -> Result<()>;

    fn create_framebuffer(&mut self, handle: u32) -> Result<()>;
    fn set_framebuffer_attachment(
        &mut self,
        handle: u32,
        slot: FramebufferSlot,
        attachment: Attachment,
    ) -> Result<()>;
    fn bind_framebuffer(&mut self, handle: u32) -> Result<()>;
    fn delete_framebuffer(&mut self, handle: u32) -> Result<()>;

    fn apply_raster_state(&mut self, raster: &RasterState) -> Result<()>;
    fn draw_arrays(
        &mut self,
        program: ProgramId,
        primitive: Primitive,
        attributes: &[AttributeBinding],
        first: i32,
        count: i32,
    ) -> Result<()>;
    fn draw_elements(
        &mut self,
        program: ProgramId,
        primitive: Primitive,
        attributes: &[AttributeBinding],
        index_buffer: u32,
        index_type: ScalarType,
        offset: usize,
        count: i32,
    ) -> Result<()>;
    fn clear(
        &mut self,
        color: Option<[f32; 4]>,
        depth: Option<f32>,
        stencil: Option<i32>,
    ) -> Result<()>;

    /// Enqueues pending work without blocking.
    fn flush(&mut self) -> Result<()>;

    /// Blocks until all previously submitted work completes.
    fn finish(&mut self) -> Result<()>;
}
