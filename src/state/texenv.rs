//! Per-unit texture environment state, including the full COMBINE
//! source/operand/function matrix.

use crate::api::types::*;

/// How a unit folds its sample into the running fragment color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TexEnvMode {
    Replace,
    Modulate,
    Decal,
    Blend,
    Add,
    Combine,
}

impl TexEnvMode {
    pub fn from_gl(v: GLenum) -> Option<TexEnvMode> {
        match v {
            REPLACE => Some(TexEnvMode::Replace),
            MODULATE => Some(TexEnvMode::Modulate),
            DECAL => Some(TexEnvMode::Decal),
            BLEND => Some(TexEnvMode::Blend),
            ADD => Some(TexEnvMode::Add),
            COMBINE => Some(TexEnvMode::Combine),
            _ => None,
        }
    }

    pub fn as_gl(self) -> GLenum {
        match self {
            TexEnvMode::Replace => REPLACE,
            TexEnvMode::Modulate => MODULATE,
            TexEnvMode::Decal => DECAL,
            TexEnvMode::Blend => BLEND,
            TexEnvMode::Add => ADD,
            TexEnvMode::Combine => COMBINE,
        }
    }
}

/// COMBINE function, shared between the RGB and alpha halves (the DOT3
/// variants are RGB-only and rejected for alpha one layer up).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombineFunc {
    Replace,
    Modulate,
    Add,
    AddSigned,
    Interpolate,
    Subtract,
    Dot3Rgb,
    Dot3Rgba,
}

impl CombineFunc {
    pub fn from_gl(v: GLenum, alpha: bool) -> Option<CombineFunc> {
        match v {
            REPLACE => Some(CombineFunc::Replace),
            MODULATE => Some(CombineFunc::Modulate),
            ADD => Some(CombineFunc::Add),
            ADD_SIGNED => Some(CombineFunc::AddSigned),
            INTERPOLATE => Some(CombineFunc::Interpolate),
            SUBTRACT => Some(CombineFunc::Subtract),
            DOT3_RGB if !alpha => Some(CombineFunc::Dot3Rgb),
            DOT3_RGBA if !alpha => Some(CombineFunc::Dot3Rgba),
            _ => None,
        }
    }

    pub fn as_gl(self) -> GLenum {
        match self {
            CombineFunc::Replace => REPLACE,
            CombineFunc::Modulate => MODULATE,
            CombineFunc::Add => ADD,
            CombineFunc::AddSigned => ADD_SIGNED,
            CombineFunc::Interpolate => INTERPOLATE,
            CombineFunc::Subtract => SUBTRACT,
            CombineFunc::Dot3Rgb => DOT3_RGB,
            CombineFunc::Dot3Rgba => DOT3_RGBA,
        }
    }

    /// How many of the three arguments the function actually consumes.
    pub fn arity(self) -> usize {
        match self {
            CombineFunc::Replace => 1,
            CombineFunc::Interpolate => 3,
            _ => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombineSrc {
    Texture,
    Constant,
    PrimaryColor,
    Previous,
}

impl CombineSrc {
    pub fn from_gl(v: GLenum) -> Option<CombineSrc> {
        match v {
            TEXTURE => Some(CombineSrc::Texture),
            CONSTANT => Some(CombineSrc::Constant),
            PRIMARY_COLOR => Some(CombineSrc::PrimaryColor),
            PREVIOUS => Some(CombineSrc::Previous),
            _ => None,
        }
    }

    pub fn as_gl(self) -> GLenum {
        match self {
            CombineSrc::Texture => TEXTURE,
            CombineSrc::Constant => CONSTANT,
            CombineSrc::PrimaryColor => PRIMARY_COLOR,
            CombineSrc::Previous => PREVIOUS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombineOp {
    SrcColor,
    OneMinusSrcColor,
    SrcAlpha,
    OneMinusSrcAlpha,
}

impl CombineOp {
    pub fn from_gl(v: GLenum, alpha: bool) -> Option<CombineOp> {
        match v {
            SRC_COLOR if !alpha => Some(CombineOp::SrcColor),
            ONE_MINUS_SRC_COLOR if !alpha => Some(CombineOp::OneMinusSrcColor),
            SRC_ALPHA => Some(CombineOp::SrcAlpha),
            ONE_MINUS_SRC_ALPHA => Some(CombineOp::OneMinusSrcAlpha),
            _ => None,
        }
    }

    pub fn as_gl(self) -> GLenum {
        match self {
            CombineOp::SrcColor => SRC_COLOR,
            CombineOp::OneMinusSrcColor => ONE_MINUS_SRC_COLOR,
            CombineOp::SrcAlpha => SRC_ALPHA,
            CombineOp::OneMinusSrcAlpha => ONE_MINUS_SRC_ALPHA,
        }
    }
}

/// The COMBINE configuration of one unit. Scales are numeric state and
/// reach the shader as uniforms; everything else selects generated code.
#[derive(Debug, Clone, PartialEq)]
pub struct CombineState {
    pub rgb_func: CombineFunc,
    pub alpha_func: CombineFunc,
    pub rgb_src: [CombineSrc; 3],
    pub alpha_src: [CombineSrc; 3],
    pub rgb_op: [CombineOp; 3],
    pub alpha_op: [CombineOp; 3],
    pub rgb_scale: f32,
    pub alpha_scale: f32,
}

impl Default for CombineState {
    fn default() -> Self {
        CombineState {
            rgb_func: CombineFunc::Modulate,
            alpha_func: CombineFunc::Modulate,
            rgb_src: [
                CombineSrc::Texture,
                CombineSrc::Previous,
                CombineSrc::Constant,
            ],
            alpha_src: [
                CombineSrc::Texture,
                CombineSrc::Previous,
                CombineSrc::Constant,
            ],
            rgb_op: [
                CombineOp::SrcColor,
                CombineOp::SrcColor,
                CombineOp::SrcAlpha,
            ],
            alpha_op: [
                CombineOp::SrcAlpha,
                CombineOp::SrcAlpha,
                CombineOp::SrcAlpha,
            ],
            rgb_scale: 1.0,
            alpha_scale: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TexEnvState {
    pub mode: TexEnvMode,
    pub color: [f32; 4],
    pub combine: CombineState,
    /// `COORD_REPLACE_OES` for point sprites.
    pub coord_replace: bool,
}

impl Default for TexEnvState {
    fn default() -> Self {
        TexEnvState {
            mode: TexEnvMode::Modulate,
            color: [0.0, 0.0, 0.0, 0.0],
            combine: CombineState::default(),
            coord_replace: false,
        }
    }
}

/// One fixed-function texture unit: the `TEXTURE_2D` enable, the bound
/// texture name and the unit's environment.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextureUnitState {
    pub enabled: bool,
    pub binding: u32,
    pub env: TexEnvState,
}
