//! Registry of managers created over the C ABI.
//!
//! Handles come from a counter that starts at 1 and only moves forward, so
//! a handle is never issued twice. A handle kept by C code after
//! `memman_release` can only miss; it cannot reach a newer manager. Zero
//! is never issued and can serve as a null handle on the C side.

use std::collections::BTreeMap;
use std::sync::Arc;

use memman_engine::MemoryManager;

/// Live managers keyed by handle.
pub(crate) struct Registry {
    managers: BTreeMap<u64, Arc<MemoryManager>>,
    last_issued: u64,
}

impl Registry {
    /// An empty registry, usable in a `static`.
    pub const fn new() -> Self {
        Self {
            managers: BTreeMap::new(),
            last_issued: 0,
        }
    }

    /// Register a new uninitialized manager and return its handle.
    ///
    /// `None` once every `u64` handle has been issued.
    pub fn create(&mut self) -> Option<u64> {
        let handle = self.last_issued.checked_add(1)?;
        self.last_issued = handle;
        self.managers.insert(handle, Arc::new(MemoryManager::new()));
        Some(handle)
    }

    /// Shared reference to the manager behind `handle`.
    pub fn lookup(&self, handle: u64) -> Option<Arc<MemoryManager>> {
        self.managers.get(&handle).cloned()
    }

    /// Unregister `handle`. Callers still holding the `Arc` from an
    /// earlier lookup finish their operation on it.
    pub fn release(&mut self, handle: u64) -> Option<Arc<MemoryManager>> {
        self.managers.remove(&handle)
    }

    /// Number of registered managers.
    pub fn live(&self) -> usize {
        self.managers.len()
    }
}
