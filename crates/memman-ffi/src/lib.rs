//! C FFI bindings for the memman allocator.
//!
//! Managers live in a global registry and are addressed from C by an
//! opaque `u64` handle. Every exported function returns a [`MemmanStatus`]
//! code as `i32` and writes results through caller-provided out-pointers.
//! Panics never unwind across the boundary.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

/// Run `$body` under `catch_unwind`, mapping a panic to `Panicked`.
macro_rules! ffi_guard {
    ($body:block) => {
        ffi_guard_or!($crate::status::MemmanStatus::Panicked as i32, $body)
    };
}

/// Run `$body` under `catch_unwind`, returning `$fallback` on panic.
macro_rules! ffi_guard_or {
    ($fallback:expr, $body:block) => {
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| $body)) {
            Ok(value) => value,
            Err(_) => {
                log::error!("panic caught at the FFI boundary");
                $fallback
            }
        }
    };
}

/// Lock a mutex, returning `InternalError` from the enclosing closure if
/// it is poisoned.
macro_rules! ffi_lock {
    ($mutex:expr) => {
        match $mutex.lock() {
            Ok(guard) => guard,
            Err(_) => return $crate::status::MemmanStatus::InternalError as i32,
        }
    };
}

pub mod manager;
mod registry;
pub mod status;
pub mod types;

pub use manager::{
    memman_alloc, memman_alloc_bf, memman_alloc_ff, memman_alloc_wf, memman_allocated_bytes,
    memman_allocation_count, memman_create, memman_destroy, memman_fragment_count,
    memman_free, memman_free_bytes, memman_init, memman_release, memman_stats,
};
pub use status::MemmanStatus;
pub use types::{MemmanPlacement, MemmanStats};
