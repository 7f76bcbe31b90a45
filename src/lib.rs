//! `fixie` emulates the fixed-function OpenGL ES 1.1 pipeline (matrix
//! stacks, per-vertex lighting, texture environments, fixed vertex
//! attribute arrays) entirely on top of a modern, shader-only backend.
//!
//! Callers link against a stable, spec-shaped function surface in [`api`]:
//! every call is validated against the legacy rules, folded into a tracked
//! state machine, and at draw time translated into a dynamically synthesized
//! shader program that reproduces the fixed-function behaviour for the
//! exact combination of features currently enabled.
//!
//! ```rust
//! use fixie::prelude::*;
//!
//! let id = fixie::create_context(Box::new(HeadlessDevice::new()));
//! fixie::make_current(Some(id));
//!
//! api::clear_colorf(0.2, 0.2, 0.2, 1.0);
//! api::matrix_mode(MODELVIEW);
//! api::load_identity();
//! api::clear(COLOR_BUFFER_BIT | DEPTH_BUFFER_BIT);
//! assert_eq!(api::get_error(), NO_ERROR);
//!
//! fixie::terminate();
//! ```

#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;

pub mod api;
pub mod caps;
pub mod context;
pub mod device;
pub mod errors;
pub mod resources;
pub mod shader;
pub mod state;
pub mod utils;

pub use self::context::{
    create_context, create_shared_context, current_context, destroy_context, make_current,
    set_debug_callback, terminate, ContextId,
};

pub mod prelude {
    pub use crate::api;
    pub use crate::api::types::*;
    pub use crate::context::{
        create_context, create_shared_context, current_context, destroy_context, make_current,
        terminate, ContextId,
    };
    pub use crate::device::headless::HeadlessDevice;
    pub use crate::device::Device;
    pub use crate::errors::ErrorCode;
}
