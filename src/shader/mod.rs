//! The state-to-shader translation engine: fingerprint the pipeline state
//! into a cache key, synthesize shader source for the exact feature
//! combination, compile through the device, and feed per-draw uniforms.

pub mod cache;
pub mod descriptor;
pub mod source;

pub use self::cache::ProgramCache;
pub use self::descriptor::{CombineKey, ShaderKey, TexUnitKey};
