//! Manager lifecycle, allocation and statistics over the C ABI.
//!
//! Each handle names an `Arc<MemoryManager>` in the global `REGISTRY`.
//! The registry lock is held only for lookup; the manager's own mutex
//! serializes operations, so distinct managers never contend.

use std::sync::{Arc, Mutex};

use log::debug;
use memman_core::{Address, AllocError, Placement};
use memman_engine::MemoryManager;

use crate::registry::Registry;
use crate::status::MemmanStatus;
use crate::types::{MemmanPlacement, MemmanStats};

static REGISTRY: Mutex<Registry> = Mutex::new(Registry::new());

/// Clone the manager behind `handle`, briefly locking the registry.
///
/// Returns `None` if the handle is unknown or the registry is poisoned.
fn get_manager(handle: u64) -> Option<Arc<MemoryManager>> {
    REGISTRY.lock().ok()?.lookup(handle)
}

/// Run `query` on the manager behind `handle` and write its result to `out`.
#[allow(unsafe_code)]
fn write_query<T: Copy>(
    handle: u64,
    out: *mut T,
    query: impl FnOnce(&MemoryManager) -> Result<T, AllocError>,
) -> i32 {
    if out.is_null() {
        return MemmanStatus::InvalidArgument as i32;
    }
    let Some(manager) = get_manager(handle) else {
        return MemmanStatus::InvalidHandle as i32;
    };
    match query(&manager) {
        Ok(value) => {
            // SAFETY: out is non-null and valid per caller contract.
            unsafe { *out = value };
            MemmanStatus::Ok as i32
        }
        Err(e) => MemmanStatus::from(&e) as i32,
    }
}

/// Create an uninitialized manager and write its handle to `handle_out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn memman_create(handle_out: *mut u64) -> i32 {
    ffi_guard!({
        if handle_out.is_null() {
            return MemmanStatus::InvalidArgument as i32;
        }
        let Some(handle) = ffi_lock!(REGISTRY).create() else {
            return MemmanStatus::InternalError as i32;
        };
        debug!("memman-ffi: created manager handle {handle}");
        // SAFETY: handle_out is non-null and valid per caller contract.
        unsafe { *handle_out = handle };
        MemmanStatus::Ok as i32
    })
}

/// Release a manager and invalidate its handle.
///
/// Works in any lifecycle state. Later calls with the same handle return
/// `InvalidHandle`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn memman_release(handle: u64) -> i32 {
    ffi_guard!({
        let mut registry = ffi_lock!(REGISTRY);
        match registry.release(handle) {
            Some(_) => {
                debug!(
                    "memman-ffi: released handle {handle}, {} managers live",
                    registry.live()
                );
                MemmanStatus::Ok as i32
            }
            None => MemmanStatus::InvalidHandle as i32,
        }
    })
}

/// Start managing `total_size` bytes at `base_address`, discarding any
/// previous state.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn memman_init(handle: u64, base_address: usize, total_size: usize) -> i32 {
    ffi_guard!({
        match get_manager(handle) {
            Some(m) => MemmanStatus::from(m.init(Address(base_address), total_size)) as i32,
            None => MemmanStatus::InvalidHandle as i32,
        }
    })
}

/// Stop managing the region. The handle stays valid for a later init.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn memman_destroy(handle: u64) -> i32 {
    ffi_guard!({
        match get_manager(handle) {
            Some(m) => MemmanStatus::from(m.destroy()) as i32,
            None => MemmanStatus::InvalidHandle as i32,
        }
    })
}

fn alloc_into(handle: u64, placement: Placement, size: usize, addr_out: *mut usize) -> i32 {
    write_query(handle, addr_out, |m| m.allocate(placement, size).map(usize::from))
}

/// Allocate `size` bytes with the given strategy, writing the address to
/// `addr_out`. Nothing is written on failure.
///
/// `placement` is a [`MemmanPlacement`] value; anything else returns
/// `InvalidArgument`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn memman_alloc(
    handle: u64,
    placement: i32,
    size: usize,
    addr_out: *mut usize,
) -> i32 {
    ffi_guard!({
        let Some(placement) = MemmanPlacement::from_raw(placement) else {
            return MemmanStatus::InvalidArgument as i32;
        };
        alloc_into(handle, placement.into(), size, addr_out)
    })
}

/// First-fit allocation.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn memman_alloc_ff(handle: u64, size: usize, addr_out: *mut usize) -> i32 {
    ffi_guard!({ alloc_into(handle, Placement::FirstFit, size, addr_out) })
}

/// Worst-fit allocation.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn memman_alloc_wf(handle: u64, size: usize, addr_out: *mut usize) -> i32 {
    ffi_guard!({ alloc_into(handle, Placement::WorstFit, size, addr_out) })
}

/// Best-fit allocation.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn memman_alloc_bf(handle: u64, size: usize, addr_out: *mut usize) -> i32 {
    ffi_guard!({ alloc_into(handle, Placement::BestFit, size, addr_out) })
}

/// Free the allocation starting at `address`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn memman_free(handle: u64, address: usize) -> i32 {
    ffi_guard!({
        match get_manager(handle) {
            Some(m) => MemmanStatus::from(m.free(Address(address))) as i32,
            None => MemmanStatus::InvalidHandle as i32,
        }
    })
}

/// Bytes currently allocated.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn memman_allocated_bytes(handle: u64, out: *mut usize) -> i32 {
    ffi_guard!({ write_query(handle, out, MemoryManager::allocated_bytes) })
}

/// Bytes currently free.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn memman_free_bytes(handle: u64, out: *mut usize) -> i32 {
    ffi_guard!({ write_query(handle, out, MemoryManager::free_bytes) })
}

/// Number of free blocks.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn memman_fragment_count(handle: u64, out: *mut usize) -> i32 {
    ffi_guard!({ write_query(handle, out, MemoryManager::fragment_count) })
}

/// Successful allocations since the last init.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn memman_allocation_count(handle: u64, out: *mut u64) -> i32 {
    ffi_guard!({ write_query(handle, out, MemoryManager::allocation_count) })
}

/// All statistics captured at one instant.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn memman_stats(handle: u64, out: *mut MemmanStats) -> i32 {
    ffi_guard!({ write_query(handle, out, |m| m.stats().map(MemmanStats::from)) })
}
