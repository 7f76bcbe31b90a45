//! Per-fragment pipeline state: alpha/depth/stencil tests, blending,
//! logical operation, dithering and the write masks.

use crate::api::types::*;

/// A pixel-wise comparison function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    Never,
    Less,
    Equal,
    LessOrEqual,
    Greater,
    NotEqual,
    GreaterOrEqual,
    Always,
}

impl Comparison {
    pub fn from_gl(v: GLenum) -> Option<Comparison> {
        match v {
            NEVER => Some(Comparison::Never),
            LESS => Some(Comparison::Less),
            EQUAL => Some(Comparison::Equal),
            LEQUAL => Some(Comparison::LessOrEqual),
            GREATER => Some(Comparison::Greater),
            NOTEQUAL => Some(Comparison::NotEqual),
            GEQUAL => Some(Comparison::GreaterOrEqual),
            ALWAYS => Some(Comparison::Always),
            _ => None,
        }
    }

    pub fn as_gl(self) -> GLenum {
        match self {
            Comparison::Never => NEVER,
            Comparison::Less => LESS,
            Comparison::Equal => EQUAL,
            Comparison::LessOrEqual => LEQUAL,
            Comparison::Greater => GREATER,
            Comparison::NotEqual => NOTEQUAL,
            Comparison::GreaterOrEqual => GEQUAL,
            Comparison::Always => ALWAYS,
        }
    }
}

/// Source / destination blend factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendFactor {
    Zero,
    One,
    SrcColor,
    OneMinusSrcColor,
    SrcAlpha,
    OneMinusSrcAlpha,
    DstAlpha,
    OneMinusDstAlpha,
    DstColor,
    OneMinusDstColor,
    SrcAlphaSaturate,
}

impl BlendFactor {
    /// The allow-list for the `sfactor` position of `blend_func`.
    pub fn from_gl_src(v: GLenum) -> Option<BlendFactor> {
        match v {
            ZERO => Some(BlendFactor::Zero),
            ONE => Some(BlendFactor::One),
            SRC_ALPHA => Some(BlendFactor::SrcAlpha),
            ONE_MINUS_SRC_ALPHA => Some(BlendFactor::OneMinusSrcAlpha),
            DST_ALPHA => Some(BlendFactor::DstAlpha),
            ONE_MINUS_DST_ALPHA => Some(BlendFactor::OneMinusDstAlpha),
            DST_COLOR => Some(BlendFactor::DstColor),
            ONE_MINUS_DST_COLOR => Some(BlendFactor::OneMinusDstColor),
            SRC_ALPHA_SATURATE => Some(BlendFactor::SrcAlphaSaturate),
            _ => None,
        }
    }

    /// The allow-list for the `dfactor` position of `blend_func`.
    pub fn from_gl_dst(v: GLenum) -> Option<BlendFactor> {
        match v {
            ZERO => Some(BlendFactor::Zero),
            ONE => Some(BlendFactor::One),
            SRC_COLOR => Some(BlendFactor::SrcColor),
            ONE_MINUS_SRC_COLOR => Some(BlendFactor::OneMinusSrcColor),
            SRC_ALPHA => Some(BlendFactor::SrcAlpha),
            ONE_MINUS_SRC_ALPHA => Some(BlendFactor::OneMinusSrcAlpha),
            DST_ALPHA => Some(BlendFactor::DstAlpha),
            ONE_MINUS_DST_ALPHA => Some(BlendFactor::OneMinusDstAlpha),
            _ => None,
        }
    }

    pub fn as_gl(self) -> GLenum {
        match self {
            BlendFactor::Zero => ZERO,
            BlendFactor::One => ONE,
            BlendFactor::SrcColor => SRC_COLOR,
            BlendFactor::OneMinusSrcColor => ONE_MINUS_SRC_COLOR,
            BlendFactor::SrcAlpha => SRC_ALPHA,
            BlendFactor::OneMinusSrcAlpha => ONE_MINUS_SRC_ALPHA,
            BlendFactor::DstAlpha => DST_ALPHA,
            BlendFactor::OneMinusDstAlpha => ONE_MINUS_DST_ALPHA,
            BlendFactor::DstColor => DST_COLOR,
            BlendFactor::OneMinusDstColor => ONE_MINUS_DST_COLOR,
            BlendFactor::SrcAlphaSaturate => SRC_ALPHA_SATURATE,
        }
    }
}

/// Framebuffer logical operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicOp {
    Clear,
    And,
    AndReverse,
    Copy,
    AndInverted,
    Noop,
    Xor,
    Or,
    Nor,
    Equiv,
    Invert,
    OrReverse,
    CopyInverted,
    OrInverted,
    Nand,
    Set,
}

impl LogicOp {
    pub fn from_gl(v: GLenum) -> Option<LogicOp> {
        match v {
            CLEAR => Some(LogicOp::Clear),
            AND => Some(LogicOp::And),
            AND_REVERSE => Some(LogicOp::AndReverse),
            COPY => Some(LogicOp::Copy),
            AND_INVERTED => Some(LogicOp::AndInverted),
            NOOP => Some(LogicOp::Noop),
            XOR => Some(LogicOp::Xor),
            OR => Some(LogicOp::Or),
            NOR => Some(LogicOp::Nor),
            EQUIV => Some(LogicOp::Equiv),
            INVERT => Some(LogicOp::Invert),
            OR_REVERSE => Some(LogicOp::OrReverse),
            COPY_INVERTED => Some(LogicOp::CopyInverted),
            OR_INVERTED => Some(LogicOp::OrInverted),
            NAND => Some(LogicOp::Nand),
            SET => Some(LogicOp::Set),
            _ => None,
        }
    }

    pub fn as_gl(self) -> GLenum {
        match self {
            LogicOp::Clear => CLEAR,
            LogicOp::And => AND,
            LogicOp::AndReverse => AND_REVERSE,
            LogicOp::Copy => COPY,
            LogicOp::AndInverted => AND_INVERTED,
            LogicOp::Noop => NOOP,
            LogicOp::Xor => XOR,
            LogicOp::Or => OR,
            LogicOp::Nor => NOR,
            LogicOp::Equiv => EQUIV,
            LogicOp::Invert => INVERT,
            LogicOp::OrReverse => OR_REVERSE,
            LogicOp::CopyInverted => COPY_INVERTED,
            LogicOp::OrInverted => OR_INVERTED,
            LogicOp::Nand => NAND,
            LogicOp::Set => SET,
        }
    }
}

/// Stencil update action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StencilAction {
    Keep,
    Zero,
    Replace,
    Increment,
    Decrement,
    Invert,
}

impl StencilAction {
    pub fn from_gl(v: GLenum) -> Option<StencilAction> {
        match v {
            KEEP => Some(StencilAction::Keep),
            ZERO => Some(StencilAction::Zero),
            REPLACE => Some(StencilAction::Replace),
            INCR => Some(StencilAction::Increment),
            DECR => Some(StencilAction::Decrement),
            INVERT => Some(StencilAction::Invert),
            _ => None,
        }
    }

    pub fn as_gl(self) -> GLenum {
        match self {
            StencilAction::Keep => KEEP,
            StencilAction::Zero => ZERO,
            StencilAction::Replace => REPLACE,
            StencilAction::Increment => INCR,
            StencilAction::Decrement => DECR,
            StencilAction::Invert => INVERT,
        }
    }
}

/// Clear color, blending, dithering, logic op and the color write mask.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorBufferState {
    pub clear_color: [f32; 4],
    pub write_mask: (bool, bool, bool, bool),
    pub blend_enabled: bool,
    pub blend_src: BlendFactor,
    pub blend_dst: BlendFactor,
    pub dither: bool,
    pub logic_op_enabled: bool,
    pub logic_op: LogicOp,
}

impl Default for ColorBufferState {
    fn default() -> Self {
        ColorBufferState {
            clear_color: [0.0, 0.0, 0.0, 0.0],
            write_mask: (true, true, true, true),
            blend_enabled: false,
            blend_src: BlendFactor::One,
            blend_dst: BlendFactor::Zero,
            dither: true,
            logic_op_enabled: false,
            logic_op: LogicOp::Copy,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DepthBufferState {
    pub test_enabled: bool,
    pub func: Comparison,
    pub write_mask: bool,
    pub clear_depth: f32,
}

impl Default for DepthBufferState {
    fn default() -> Self {
        DepthBufferState {
            test_enabled: false,
            func: Comparison::Less,
            write_mask: true,
            clear_depth: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StencilBufferState {
    pub test_enabled: bool,
    pub func: Comparison,
    pub reference: i32,
    pub value_mask: u32,
    pub write_mask: u32,
    pub clear_stencil: i32,
    pub on_fail: StencilAction,
    pub on_depth_fail: StencilAction,
    pub on_depth_pass: StencilAction,
}

impl Default for StencilBufferState {
    fn default() -> Self {
        StencilBufferState {
            test_enabled: false,
            func: Comparison::Always,
            reference: 0,
            value_mask: !0,
            write_mask: !0,
            clear_stencil: 0,
            on_fail: StencilAction::Keep,
            on_depth_fail: StencilAction::Keep,
            on_depth_pass: StencilAction::Keep,
        }
    }
}

/// The alpha test is a fragment-shader concern on a shader-only backend, so
/// its function participates in the shader fingerprint.
#[derive(Debug, Clone, PartialEq)]
pub struct AlphaTestState {
    pub enabled: bool,
    pub func: Comparison,
    pub reference: f32,
}

impl Default for AlphaTestState {
    fn default() -> Self {
        AlphaTestState {
            enabled: false,
            func: Comparison::Always,
            reference: 0.0,
        }
    }
}
