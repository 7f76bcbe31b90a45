//! Fence objects (`NV_fence` shape). The emulated device queue is
//! synchronous once finished, so a fence's life cycle is: set → pending
//! until the queue drains → signaled.

#[derive(Debug, Clone, PartialEq)]
pub struct Fence {
    pub pending: bool,
    pub signaled: bool,
}

impl Default for Fence {
    fn default() -> Self {
        Fence {
            pending: false,
            signaled: true,
        }
    }
}

impl Fence {
    /// Inserts the fence into the command stream.
    pub fn set(&mut self) {
        self.pending = true;
        self.signaled = false;
    }

    /// Marks all previously submitted work as complete.
    pub fn complete(&mut self) {
        if self.pending {
            self.pending = false;
            self.signaled = true;
        }
    }
}
