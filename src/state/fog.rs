use crate::api::types::*;

/// Fog blend factor curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FogMode {
    Exp,
    Exp2,
    Linear,
}

impl FogMode {
    pub fn from_gl(v: GLenum) -> Option<FogMode> {
        match v {
            EXP => Some(FogMode::Exp),
            EXP2 => Some(FogMode::Exp2),
            LINEAR => Some(FogMode::Linear),
            _ => None,
        }
    }

    pub fn as_gl(self) -> GLenum {
        match self {
            FogMode::Exp => EXP,
            FogMode::Exp2 => EXP2,
            FogMode::Linear => LINEAR,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FogState {
    pub enabled: bool,
    pub mode: FogMode,
    pub density: f32,
    pub start: f32,
    pub end: f32,
    pub color: [f32; 4],
}

impl Default for FogState {
    fn default() -> Self {
        FogState {
            enabled: false,
            mode: FogMode::Exp,
            density: 1.0,
            start: 0.0,
            end: 1.0,
            color: [0.0, 0.0, 0.0, 0.0],
        }
    }
}
