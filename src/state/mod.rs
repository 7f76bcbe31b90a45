//! The complete mutable pipeline configuration of one context.
//!
//! Pure data plus accessors: the only logic living here is defaulting
//! (constructors seeded from [`Capabilities`]) and address resolution for
//! the "active" selections, resolving which matrix stack, texture
//! environment or buffer binding a call refers to.

pub mod arrays;
pub mod fog;
pub mod fragment;
pub mod lighting;
pub mod matrix;
pub mod raster;
pub mod texenv;

pub use self::arrays::{ArrayPointer, ScalarType, VertexArraySet};
pub use self::fog::{FogMode, FogState};
pub use self::fragment::{
    AlphaTestState, BlendFactor, ColorBufferState, Comparison, DepthBufferState, LogicOp,
    StencilAction, StencilBufferState,
};
pub use self::lighting::{Light, LightingState, Material, ShadeModel};
pub use self::matrix::{MatrixMode, MatrixStack};
pub use self::raster::{
    CullFace, FrontFaceOrder, LineState, MultisampleState, PointState, PolygonState, ScissorState,
    ViewportState,
};
pub use self::texenv::{
    CombineFunc, CombineOp, CombineSrc, CombineState, TexEnvMode, TexEnvState, TextureUnitState,
};

use crate::api::types::*;
use crate::caps::Capabilities;

/// Behavior hint for a quality/speed trade-off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hint {
    DontCare,
    Fastest,
    Nicest,
}

impl Hint {
    pub fn from_gl(v: GLenum) -> Option<Hint> {
        match v {
            DONT_CARE => Some(Hint::DontCare),
            FASTEST => Some(Hint::Fastest),
            NICEST => Some(Hint::Nicest),
            _ => None,
        }
    }

    pub fn as_gl(self) -> GLenum {
        match self {
            Hint::DontCare => DONT_CARE,
            Hint::Fastest => FASTEST,
            Hint::Nicest => NICEST,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HintState {
    pub perspective_correction: Hint,
    pub point_smooth: Hint,
    pub line_smooth: Hint,
    pub fog: Hint,
    pub generate_mipmap: Hint,
}

impl Default for HintState {
    fn default() -> Self {
        HintState {
            perspective_correction: Hint::DontCare,
            point_smooth: Hint::DontCare,
            line_smooth: Hint::DontCare,
            fog: Hint::DontCare,
            generate_mipmap: Hint::DontCare,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PixelStoreState {
    pub pack_alignment: i32,
    pub unpack_alignment: i32,
}

impl Default for PixelStoreState {
    fn default() -> Self {
        PixelStoreState {
            pack_alignment: 4,
            unpack_alignment: 4,
        }
    }
}

/// The current vertex attribute values, used whenever the matching array
/// is disabled at draw time.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentState {
    pub color: [f32; 4],
    pub normal: [f32; 3],
    pub tex_coords: Vec<[f32; 4]>,
}

impl CurrentState {
    fn new(caps: &Capabilities) -> Self {
        CurrentState {
            color: [1.0, 1.0, 1.0, 1.0],
            normal: [0.0, 0.0, 1.0],
            tex_coords: vec![[0.0, 0.0, 0.0, 1.0]; caps.max_texture_units],
        }
    }
}

/// Non-owning references to the currently selected resources. The handle
/// registries own the objects; a binding is just a name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BindingState {
    pub active_texture: usize,
    pub client_active_texture: usize,
    pub array_buffer: u32,
    pub framebuffer: u32,
    pub renderbuffer: u32,
    pub vertex_array: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClipPlane {
    pub enabled: bool,
    /// Plane equation in eye coordinates, transformed at specification
    /// time by the inverse of the modelview top.
    pub equation: [f32; 4],
}

impl Default for ClipPlane {
    fn default() -> Self {
        ClipPlane {
            enabled: false,
            equation: [0.0, 0.0, 0.0, 0.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatrixState {
    pub mode: MatrixMode,
    pub modelview: MatrixStack,
    pub projection: MatrixStack,
    pub texture: Vec<MatrixStack>,
}

impl MatrixState {
    fn new(caps: &Capabilities) -> Self {
        MatrixState {
            mode: MatrixMode::ModelView,
            modelview: MatrixStack::new(caps.max_modelview_stack_depth),
            projection: MatrixStack::new(caps.max_projection_stack_depth),
            texture: (0..caps.max_texture_units)
                .map(|_| MatrixStack::new(caps.max_texture_stack_depth))
                .collect(),
        }
    }
}

/// The full pipeline configuration. Every array-shaped field has exactly
/// `Capabilities.N` elements and every index addressing one must lie in
/// `[0, N)`; the dispatch layer guarantees the latter.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineState {
    pub viewport: ViewportState,
    pub scissor: ScissorState,
    pub color_buffer: ColorBufferState,
    pub depth_buffer: DepthBufferState,
    pub stencil_buffer: StencilBufferState,
    pub alpha_test: AlphaTestState,
    pub point: PointState,
    pub line: LineState,
    pub polygon: PolygonState,
    pub multisample: MultisampleState,
    pub fog: FogState,
    pub lighting: LightingState,
    pub hint: HintState,
    pub pixel_store: PixelStoreState,
    pub texture_units: Vec<TextureUnitState>,
    pub clip_planes: Vec<ClipPlane>,
    pub matrices: MatrixState,
    pub current: CurrentState,
    pub arrays: VertexArraySet,
    pub bindings: BindingState,
}

impl PipelineState {
    /// Spec-defined defaults, sized from `caps`.
    pub fn new(caps: &Capabilities) -> Self {
        PipelineState {
            viewport: ViewportState::default(),
            scissor: ScissorState::default(),
            color_buffer: ColorBufferState::default(),
            depth_buffer: DepthBufferState::default(),
            stencil_buffer: StencilBufferState::default(),
            alpha_test: AlphaTestState::default(),
            point: PointState::default(),
            line: LineState::default(),
            polygon: PolygonState::default(),
            multisample: MultisampleState::default(),
            fog: FogState::default(),
            lighting: LightingState::new(caps),
            hint: HintState::default(),
            pixel_store: PixelStoreState::default(),
            texture_units: (0..caps.max_texture_units)
                .map(|_| TextureUnitState::default())
                .collect(),
            clip_planes: vec![ClipPlane::default(); caps.max_clip_planes],
            matrices: MatrixState::new(caps),
            current: CurrentState::new(caps),
            arrays: VertexArraySet::new(caps),
            bindings: BindingState::default(),
        }
    }

    /// The stack addressed by the current matrix mode; `TEXTURE` resolves
    /// through the active texture unit.
    pub fn current_stack(&mut self) -> &mut MatrixStack {
        match self.matrices.mode {
            MatrixMode::ModelView => &mut self.matrices.modelview,
            MatrixMode::Projection => &mut self.matrices.projection,
            MatrixMode::Texture => &mut self.matrices.texture[self.bindings.active_texture],
        }
    }

    pub fn current_stack_ref(&self) -> &MatrixStack {
        match self.matrices.mode {
            MatrixMode::ModelView => &self.matrices.modelview,
            MatrixMode::Projection => &self.matrices.projection,
            MatrixMode::Texture => &self.matrices.texture[self.bindings.active_texture],
        }
    }

    #[inline]
    pub fn active_unit(&self) -> &TextureUnitState {
        &self.texture_units[self.bindings.active_texture]
    }

    #[inline]
    pub fn active_unit_mut(&mut self) -> &mut TextureUnitState {
        &mut self.texture_units[self.bindings.active_texture]
    }

    /// The buffer binding a target resolves to. `ELEMENT_ARRAY_BUFFER`
    /// lives inside the vertex-array block it is captured by.
    pub fn bound_buffer(&self, target: GLenum) -> Option<u32> {
        match target {
            ARRAY_BUFFER => Some(self.bindings.array_buffer),
            ELEMENT_ARRAY_BUFFER => Some(self.arrays.element_buffer),
            _ => None,
        }
    }

    pub fn set_bound_buffer(&mut self, target: GLenum, buffer: u32) {
        match target {
            ARRAY_BUFFER => self.bindings.array_buffer = buffer,
            ELEMENT_ARRAY_BUFFER => self.arrays.element_buffer = buffer,
            _ => unreachable!("buffer target validated by the dispatch layer"),
        }
    }

    /// Drops every binding-point reference to `texture` (all units), part
    /// of the uniform delete-while-bound policy.
    pub fn detach_texture(&mut self, texture: u32) {
        for unit in &mut self.texture_units {
            if unit.binding == texture {
                unit.binding = 0;
            }
        }
    }

    /// Drops every binding-point reference to `buffer`.
    pub fn detach_buffer(&mut self, buffer: u32) {
        if self.bindings.array_buffer == buffer {
            self.bindings.array_buffer = 0;
        }
        self.arrays.detach_buffer(buffer);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::caps::DeviceLimits;

    #[test]
    fn fresh_state_matches_spec_defaults() {
        let caps = Capabilities::from_limits(&DeviceLimits::default());
        let state = PipelineState::new(&caps);

        assert_eq!(state.color_buffer.clear_color, [0.0, 0.0, 0.0, 0.0]);
        assert_eq!(state.matrices.mode, MatrixMode::ModelView);
        assert_eq!(state.matrices.modelview.depth(), 1);
        assert_eq!(state.matrices.projection.depth(), 1);

        assert_eq!(state.lighting.lights[0].diffuse, [1.0, 1.0, 1.0, 1.0]);
        for light in &state.lighting.lights[1..] {
            assert_eq!(light.diffuse, [0.0, 0.0, 0.0, 1.0]);
        }

        assert_eq!(state.texture_units.len(), caps.max_texture_units);
        assert_eq!(state.clip_planes.len(), caps.max_clip_planes);
    }

    #[test]
    fn texture_stack_follows_active_unit() {
        let caps = Capabilities::from_limits(&DeviceLimits::default());
        let mut state = PipelineState::new(&caps);

        state.matrices.mode = MatrixMode::Texture;
        state.bindings.active_texture = 1;
        state.current_stack().translate(5.0, 0.0, 0.0);

        assert_eq!(state.matrices.texture[0].depth(), 1);
        assert!(state.matrices.texture[1].top() != state.matrices.texture[0].top());
    }
}
