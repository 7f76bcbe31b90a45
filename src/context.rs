//! Contexts and the host-control surface.
//!
//! A context is the unit of isolation: it owns one state aggregate, one
//! set of handle registries, one program cache and one backend adapter.
//! The live-context table and the "current" selector are thread-local:
//! a context and everything it owns is touched by exactly one logical
//! caller at a time, so the core carries no locks. Using a context
//! from a thread other than its creator is out of contract.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::caps::Capabilities;
use crate::device::adapter::Adapter;
use crate::device::Device;
use crate::errors::ErrorCode;
use crate::resources::{Fence, Framebuffer, ResourceGroup};
use crate::shader::ProgramCache;
use crate::state::{PipelineState, VertexArraySet};
use crate::utils::hash::FastHashMap;
use crate::utils::registry::Registry;

/// Opaque identifier of a live context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextId(u32);

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Context({})", self.0)
    }
}

/// Sink for the debug-output surface: every recorded error and every
/// translated internal failure is reported here as well as the log.
pub type DebugCallback = Box<dyn Fn(ErrorCode, &str)>;

pub struct Context {
    pub id: ContextId,
    pub caps: Capabilities,
    pub state: PipelineState,
    /// Buffers, textures and renderbuffers, shared with the parent's
    /// group when the context was created sharing.
    pub resources: Rc<RefCell<ResourceGroup>>,
    /// Container objects are never shared.
    pub framebuffers: Registry<Framebuffer>,
    pub vertex_arrays: Registry<VertexArraySet>,
    pub fences: Registry<Fence>,
    pub cache: ProgramCache,
    pub adapter: Adapter,
    error: ErrorCode,
    debug_callback: Option<DebugCallback>,
}

impl Context {
    fn new(id: ContextId, device: Box<dyn Device>, shared: Option<Rc<RefCell<ResourceGroup>>>) -> Self {
        let adapter = Adapter::new(device);
        let caps = Capabilities::from_limits(&adapter.limits());
        info!(
            "{}: {} / {} / {} [{}]",
            id,
            caps.vendor,
            caps.renderer,
            caps.version,
            caps.extensions()
        );

        let state = PipelineState::new(&caps);

        let mut framebuffers = Registry::new();
        framebuffers.insert(0, Framebuffer::default_framebuffer(), true);

        let mut vertex_arrays = Registry::new();
        vertex_arrays.insert(0, VertexArraySet::new(&caps), true);

        Context {
            id,
            state,
            caps,
            resources: shared.unwrap_or_else(|| Rc::new(RefCell::new(ResourceGroup::new()))),
            framebuffers,
            vertex_arrays,
            fences: Registry::new(),
            cache: ProgramCache::new(),
            adapter,
            error: ErrorCode::NoError,
            debug_callback: None,
        }
    }

    /// Records `code` into the sticky slot; the first error since the last
    /// read wins. Always reported to the debug callback.
    pub fn record_error(&mut self, code: ErrorCode) {
        if code == ErrorCode::NoError {
            return;
        }

        if let Some(callback) = &self.debug_callback {
            callback(code, "entry point validation failed");
        }

        if self.error == ErrorCode::NoError {
            self.error = code;
        }
    }

    /// Reads and clears the sticky error.
    pub fn take_error(&mut self) -> ErrorCode {
        ::std::mem::replace(&mut self.error, ErrorCode::NoError)
    }

    /// Translates a rich internal failure into the diagnostic channel.
    /// Exactly one call site per entry point, at the dispatch layer.
    pub fn report_internal(&mut self, what: &str, err: &::failure::Error) {
        error!("{}: {} failed: {}", self.id, what, err);
        if let Some(callback) = &self.debug_callback {
            callback(ErrorCode::NoError, &format!("{} failed: {}", what, err));
        }
    }

    pub fn set_debug_callback(&mut self, callback: Option<DebugCallback>) {
        self.debug_callback = callback;
    }

    /// Rebinds the vertex-array block: the current block is written back
    /// to the set it came from, then the named set's block is loaded.
    /// Returns false when `handle` names no set.
    pub fn bind_vertex_array(&mut self, handle: u32) -> bool {
        let current = self.state.bindings.vertex_array;
        if current == handle {
            return self.vertex_arrays.contains(handle);
        }

        if !self.vertex_arrays.contains(handle) {
            return false;
        }

        let snapshot = self.state.arrays.clone();
        if let Some(slot) = self.vertex_arrays.get_mut(current) {
            *slot = snapshot;
        }

        if let Some(next) = self.vertex_arrays.get(handle) {
            self.state.arrays = next.clone();
        }
        self.state.bindings.vertex_array = handle;
        true
    }
}

thread_local! {
    static CONTEXTS: RefCell<FastHashMap<u32, Rc<RefCell<Context>>>> =
        RefCell::new(FastHashMap::default());
    static CURRENT: RefCell<Option<Rc<RefCell<Context>>>> = RefCell::new(None);
    static NEXT_ID: Cell<u32> = Cell::new(1);
}

/// Creates a context with a private resource namespace.
pub fn create_context(device: Box<dyn Device>) -> ContextId {
    register(device, None)
}

/// Creates a context that shares buffers, textures and renderbuffers with
/// `parent`. State is never shared. Returns `None` when `parent` is not a
/// live context of this thread.
pub fn create_shared_context(device: Box<dyn Device>, parent: ContextId) -> Option<ContextId> {
    let group = CONTEXTS.with(|contexts| {
        contexts
            .borrow()
            .get(&parent.0)
            .map(|ctx| Rc::clone(&ctx.borrow().resources))
    });

    match group {
        Some(group) => Some(register(device, Some(group))),
        None => {
            warn!("cannot share resources with unknown context {}", parent);
            None
        }
    }
}

fn register(device: Box<dyn Device>, shared: Option<Rc<RefCell<ResourceGroup>>>) -> ContextId {
    let id = ContextId(NEXT_ID.with(|next| {
        let v = next.get();
        next.set(v + 1);
        v
    }));

    let context = Rc::new(RefCell::new(Context::new(id, device, shared)));
    CONTEXTS.with(|contexts| contexts.borrow_mut().insert(id.0, context));
    id
}

/// Destroys a context, releasing its private resources; shared groups
/// survive as long as any sharing context does. A destroyed current
/// context leaves no context current.
pub fn destroy_context(id: ContextId) -> bool {
    let removed = CONTEXTS.with(|contexts| contexts.borrow_mut().remove(&id.0));

    match removed {
        Some(_) => {
            CURRENT.with(|current| {
                let is_current = current
                    .borrow()
                    .as_ref()
                    .map_or(false, |ctx| ctx.borrow().id == id);
                if is_current {
                    *current.borrow_mut() = None;
                }
            });
            info!("{} destroyed", id);
            true
        }
        None => false,
    }
}

/// Selects the context subsequent entry points operate on, or deselects
/// with `None`. Returns false when the id names no live context.
pub fn make_current(id: Option<ContextId>) -> bool {
    match id {
        None => {
            CURRENT.with(|current| *current.borrow_mut() = None);
            true
        }
        Some(id) => {
            let context = CONTEXTS.with(|contexts| contexts.borrow().get(&id.0).map(Rc::clone));
            match context {
                Some(context) => {
                    CURRENT.with(|current| *current.borrow_mut() = Some(context));
                    true
                }
                None => false,
            }
        }
    }
}

/// The id of the current context, if any.
pub fn current_context() -> Option<ContextId> {
    CURRENT.with(|current| current.borrow().as_ref().map(|ctx| ctx.borrow().id))
}

/// Destroys every live context of this thread.
pub fn terminate() {
    CURRENT.with(|current| *current.borrow_mut() = None);
    CONTEXTS.with(|contexts| contexts.borrow_mut().clear());
}

/// Installs (or clears) the debug-output callback of a context.
pub fn set_debug_callback(id: ContextId, callback: Option<DebugCallback>) -> bool {
    let context = CONTEXTS.with(|contexts| contexts.borrow().get(&id.0).map(Rc::clone));
    match context {
        Some(context) => {
            context.borrow_mut().set_debug_callback(callback);
            true
        }
        None => false,
    }
}

/// Runs `f` against the current context. Entry points go through this;
/// callers are responsible for the no-current-context fallback.
pub(crate) fn with_current<R>(f: impl FnOnce(&mut Context) -> R) -> Option<R> {
    CURRENT.with(|current| {
        let current = current.borrow();
        current.as_ref().map(|ctx| f(&mut ctx.borrow_mut()))
    })
}
