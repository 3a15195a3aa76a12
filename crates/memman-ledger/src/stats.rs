//! Point-in-time ledger counters.

/// Byte and block counters computed in one pass over the ledger.
///
/// `allocated_bytes + free_bytes == total_size` for any sound ledger.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LedgerStats {
    /// Size of the managed span in bytes.
    pub total_size: usize,
    /// Sum of allocated block lengths.
    pub allocated_bytes: usize,
    /// Sum of free block lengths.
    pub free_bytes: usize,
    /// Number of free blocks.
    pub fragment_count: usize,
    /// Number of blocks, free and allocated.
    pub block_count: usize,
    /// Length of the largest free block, or 0.
    pub largest_free: usize,
}

impl LedgerStats {
    /// Fraction of free bytes outside the largest free block, in `[0, 1]`.
    ///
    /// 0.0 means all free space is one contiguous block (or there is none).
    pub fn external_fragmentation(&self) -> f64 {
        if self.free_bytes == 0 {
            return 0.0;
        }
        1.0 - self.largest_free as f64 / self.free_bytes as f64
    }
}
