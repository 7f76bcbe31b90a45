//! Rasterization state: points, lines, polygons and multisampling.

use crate::api::types::*;

/// Specify whether front- or back-facing polygons can be culled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CullFace {
    Front,
    Back,
    FrontAndBack,
}

impl CullFace {
    pub fn from_gl(v: GLenum) -> Option<CullFace> {
        match v {
            FRONT => Some(CullFace::Front),
            BACK => Some(CullFace::Back),
            FRONT_AND_BACK => Some(CullFace::FrontAndBack),
            _ => None,
        }
    }

    pub fn as_gl(self) -> GLenum {
        match self {
            CullFace::Front => FRONT,
            CullFace::Back => BACK,
            CullFace::FrontAndBack => FRONT_AND_BACK,
        }
    }
}

/// Define front- and back-facing polygons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrontFaceOrder {
    Clockwise,
    CounterClockwise,
}

impl FrontFaceOrder {
    pub fn from_gl(v: GLenum) -> Option<FrontFaceOrder> {
        match v {
            CW => Some(FrontFaceOrder::Clockwise),
            CCW => Some(FrontFaceOrder::CounterClockwise),
            _ => None,
        }
    }

    pub fn as_gl(self) -> GLenum {
        match self {
            FrontFaceOrder::Clockwise => CW,
            FrontFaceOrder::CounterClockwise => CCW,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointState {
    pub size: f32,
    pub smooth: bool,
    pub size_min: f32,
    pub size_max: f32,
    pub fade_threshold: f32,
    pub distance_attenuation: [f32; 3],
    pub sprite_enabled: bool,
}

impl Default for PointState {
    fn default() -> Self {
        PointState {
            size: 1.0,
            smooth: false,
            size_min: 0.0,
            size_max: 1.0,
            fade_threshold: 1.0,
            distance_attenuation: [1.0, 0.0, 0.0],
            sprite_enabled: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineState {
    pub width: f32,
    pub smooth: bool,
}

impl Default for LineState {
    fn default() -> Self {
        LineState {
            width: 1.0,
            smooth: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolygonState {
    pub cull_enabled: bool,
    pub cull_face: CullFace,
    pub front_face: FrontFaceOrder,
    pub offset_fill_enabled: bool,
    pub offset_factor: f32,
    pub offset_units: f32,
}

impl Default for PolygonState {
    fn default() -> Self {
        PolygonState {
            cull_enabled: false,
            cull_face: CullFace::Back,
            front_face: FrontFaceOrder::CounterClockwise,
            offset_fill_enabled: false,
            offset_factor: 0.0,
            offset_units: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MultisampleState {
    pub enabled: bool,
    pub alpha_to_coverage: bool,
    pub alpha_to_one: bool,
    pub coverage_enabled: bool,
    pub coverage_value: f32,
    pub coverage_invert: bool,
}

impl Default for MultisampleState {
    fn default() -> Self {
        MultisampleState {
            enabled: true,
            alpha_to_coverage: false,
            alpha_to_one: false,
            coverage_enabled: false,
            coverage_value: 1.0,
            coverage_invert: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewportState {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub depth_range: (f32, f32),
}

impl Default for ViewportState {
    fn default() -> Self {
        ViewportState {
            x: 0,
            y: 0,
            width: 0,
            height: 0,
            depth_range: (0.0, 1.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScissorState {
    pub enabled: bool,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Default for ScissorState {
    fn default() -> Self {
        ScissorState {
            enabled: false,
            x: 0,
            y: 0,
            width: 0,
            height: 0,
        }
    }
}
