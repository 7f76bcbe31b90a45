//! Front-end resource objects and the registries that own them.
//!
//! Buffers, textures and renderbuffers live in a [`ResourceGroup`], which
//! contexts created with a parent share; framebuffers, vertex-array sets
//! and fences are container objects and stay per-context. Binding points
//! hold non-owning names; the registries own the objects.

pub mod buffer;
pub mod fence;
pub mod framebuffer;
pub mod renderbuffer;
pub mod texture;

pub use self::buffer::{Buffer, BufferUsage};
pub use self::fence::Fence;
pub use self::framebuffer::{Attachment, Framebuffer};
pub use self::renderbuffer::{Renderbuffer, RenderbufferFormat};
pub use self::texture::{
    SamplerState, TexelType, TexFormat, Texture, TextureFilter, TextureLevel, TextureWrap,
};

use crate::utils::registry::Registry;

/// The shareable resource namespace of one context (or one share group).
#[derive(Default)]
pub struct ResourceGroup {
    pub buffers: Registry<Buffer>,
    pub textures: Registry<Texture>,
    pub renderbuffers: Registry<Renderbuffer>,
}

impl ResourceGroup {
    pub fn new() -> Self {
        ResourceGroup::default()
    }
}

pub mod prelude {
    pub use super::buffer::{Buffer, BufferUsage};
    pub use super::fence::Fence;
    pub use super::framebuffer::{Attachment, Framebuffer};
    pub use super::renderbuffer::{Renderbuffer, RenderbufferFormat};
    pub use super::texture::{
        SamplerState, TexelType, TexFormat, Texture, TextureFilter, TextureLevel, TextureWrap,
    };
    pub use super::ResourceGroup;
}
