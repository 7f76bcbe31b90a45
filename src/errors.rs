use crate::api::types::*;

/// Crate-wide result type for backend-facing work. Rich errors never cross
/// the public surface; the dispatch layer translates them exactly once into
/// the sticky [`ErrorCode`] or a diagnostic log line.
pub type Result<T> = ::std::result::Result<T, ::failure::Error>;

/// The sticky error set of the legacy API. The first error raised since the
/// last read wins; reading through `api::get_error` clears the slot back to
/// `NoError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NoError,
    InvalidEnum,
    InvalidValue,
    InvalidOperation,
    StackOverflow,
    StackUnderflow,
    OutOfMemory,
    InvalidFramebufferOperation,
}

impl ErrorCode {
    pub fn as_gl(self) -> GLenum {
        match self {
            ErrorCode::NoError => NO_ERROR,
            ErrorCode::InvalidEnum => INVALID_ENUM,
            ErrorCode::InvalidValue => INVALID_VALUE,
            ErrorCode::InvalidOperation => INVALID_OPERATION,
            ErrorCode::StackOverflow => STACK_OVERFLOW,
            ErrorCode::StackUnderflow => STACK_UNDERFLOW,
            ErrorCode::OutOfMemory => OUT_OF_MEMORY,
            ErrorCode::InvalidFramebufferOperation => INVALID_FRAMEBUFFER_OPERATION_OES,
        }
    }
}

impl ::std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
        write!(f, "{:?} (0x{:04X})", self, self.as_gl())
    }
}

/// Validation result of a single entry point. `Err` aborts the call with no
/// state change and records the code if no earlier one is pending.
pub type GlResult<T> = ::std::result::Result<T, ErrorCode>;
