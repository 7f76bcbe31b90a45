//! Commonly used utilities: fast hash containers and the handle registry.

pub mod hash;
pub mod registry;

pub use self::hash::{FastHashMap, FastHashSet};
pub use self::registry::Registry;

pub mod prelude {
    pub use super::hash::{FastHashMap, FastHashSet};
    pub use super::registry::Registry;
}
