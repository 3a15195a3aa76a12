//! Workload generation and replay for benchmarking placement strategies.
//!
//! - [`Trace::generate`]: deterministic alloc/free sequence from a seed
//! - [`replay`]: run a trace against a [`MemoryManager`] with one strategy
//!
//! The same trace replayed with different strategies shows how each one
//! fragments the region.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use memman_core::{Address, AllocError, Placement};
use memman_engine::MemoryManager;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Share of generated operations that are allocations, in percent.
const ALLOC_PERCENT: u32 = 60;

/// One step of a workload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraceOp {
    /// Allocate `size` bytes.
    Alloc {
        /// Requested size, at least 1.
        size: usize,
    },
    /// Free one live allocation, chosen as `slot` modulo the number of
    /// live allocations at replay time. Skipped when nothing is live.
    Free {
        /// Raw slot selector.
        slot: usize,
    },
}

/// A deterministic sequence of [`TraceOp`]s.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trace {
    ops: Vec<TraceOp>,
}

impl Trace {
    /// Generate `op_count` operations with request sizes in `1..=max_size`.
    ///
    /// Identical arguments always produce an identical trace.
    pub fn generate(seed: u64, op_count: usize, max_size: usize) -> Self {
        let max_size = max_size.max(1);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let ops = (0..op_count)
            .map(|_| {
                if rng.random_range(0..100) < ALLOC_PERCENT {
                    TraceOp::Alloc {
                        size: rng.random_range(1..=max_size),
                    }
                } else {
                    TraceOp::Free {
                        slot: rng.random_range(0..usize::MAX),
                    }
                }
            })
            .collect();
        Self { ops }
    }

    /// Build a trace from explicit operations.
    pub fn from_ops(ops: Vec<TraceOp>) -> Self {
        Self { ops }
    }

    /// The operations in order.
    pub fn ops(&self) -> &[TraceOp] {
        &self.ops
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Whether the trace has no operations.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// Outcome of [`replay`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReplayReport {
    /// Allocations that succeeded.
    pub allocations: u64,
    /// Allocations rejected with out-of-memory.
    pub out_of_memory: u64,
    /// Frees performed.
    pub frees: u64,
    /// Highest allocated byte count seen after any operation.
    pub peak_allocated_bytes: usize,
    /// Free blocks left when the trace ends.
    pub final_fragment_count: usize,
}

/// Replay `trace` against an active `manager` using `placement`.
///
/// Out-of-memory results are counted, not returned. Allocations still
/// live at the end are left in place.
///
/// # Errors
///
/// Any other [`AllocError`], such as `NotInitialized`.
pub fn replay(
    manager: &MemoryManager,
    placement: Placement,
    trace: &Trace,
) -> Result<ReplayReport, AllocError> {
    let mut report = ReplayReport::default();
    let mut live: Vec<Address> = Vec::new();
    let mut allocated = manager.allocated_bytes()?;
    report.peak_allocated_bytes = allocated;

    for op in trace.ops() {
        match *op {
            TraceOp::Alloc { size } => match manager.allocate(placement, size) {
                Ok(address) => {
                    live.push(address);
                    report.allocations += 1;
                    allocated = manager.allocated_bytes()?;
                    report.peak_allocated_bytes = report.peak_allocated_bytes.max(allocated);
                }
                Err(AllocError::OutOfMemory { .. }) => report.out_of_memory += 1,
                Err(e) => return Err(e),
            },
            TraceOp::Free { slot } => {
                if live.is_empty() {
                    continue;
                }
                let address = live.swap_remove(slot % live.len());
                manager.free(address)?;
                report.frees += 1;
            }
        }
    }

    report.final_fragment_count = manager.fragment_count()?;
    Ok(report)
}
