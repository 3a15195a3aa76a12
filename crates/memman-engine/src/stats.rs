//! Manager-level statistics.
//!
//! [`ManagerStats`] combines the ledger's byte and block counters with the
//! manager's operation counters. It is captured under a single lock
//! acquisition, so every field describes the same instant.

use memman_ledger::LedgerStats;

/// Counters describing an active manager at one instant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ManagerStats {
    /// Size of the managed region in bytes.
    pub total_size: usize,
    /// Bytes held by allocated blocks.
    pub allocated_bytes: usize,
    /// Bytes held by free blocks.
    pub free_bytes: usize,
    /// Number of free blocks.
    pub fragment_count: usize,
    /// Number of blocks, free and allocated.
    pub block_count: usize,
    /// Length of the largest free block, or 0 when the region is full.
    pub largest_free_block: usize,
    /// Successful allocations since the last `init`.
    pub allocation_count: u64,
    /// Successful frees since the last `init`.
    pub free_count: u64,
}

impl ManagerStats {
    pub(crate) fn new(ledger: LedgerStats, allocation_count: u64, free_count: u64) -> Self {
        Self {
            total_size: ledger.total_size,
            allocated_bytes: ledger.allocated_bytes,
            free_bytes: ledger.free_bytes,
            fragment_count: ledger.fragment_count,
            block_count: ledger.block_count,
            largest_free_block: ledger.largest_free,
            allocation_count,
            free_count,
        }
    }

    /// Allocations not yet freed.
    pub fn live_allocations(&self) -> u64 {
        self.allocation_count.saturating_sub(self.free_count)
    }
}
