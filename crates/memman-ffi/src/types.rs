//! `repr(C)` types shared with C callers.

use memman_core::Placement;
use memman_engine::ManagerStats;

/// Placement strategy selector for [`memman_alloc`](crate::memman_alloc).
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemmanPlacement {
    /// Lowest-addressed free block that fits.
    FirstFit = 0,
    /// Largest free block.
    WorstFit = 1,
    /// Smallest free block that fits.
    BestFit = 2,
}

impl MemmanPlacement {
    /// Decode a raw value from C, or `None` if out of range.
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(Self::FirstFit),
            1 => Some(Self::WorstFit),
            2 => Some(Self::BestFit),
            _ => None,
        }
    }
}

impl From<MemmanPlacement> for Placement {
    fn from(p: MemmanPlacement) -> Self {
        match p {
            MemmanPlacement::FirstFit => Placement::FirstFit,
            MemmanPlacement::WorstFit => Placement::WorstFit,
            MemmanPlacement::BestFit => Placement::BestFit,
        }
    }
}

/// Snapshot of a manager's statistics, filled by
/// [`memman_stats`](crate::memman_stats).
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemmanStats {
    /// Size of the managed region in bytes.
    pub total_size: usize,
    /// Bytes in allocated blocks.
    pub allocated_bytes: usize,
    /// Bytes in free blocks.
    pub free_bytes: usize,
    /// Number of free blocks.
    pub fragment_count: usize,
    /// Number of blocks of either state.
    pub block_count: usize,
    /// Length of the largest free block, 0 if none.
    pub largest_free_block: usize,
    /// Successful allocations since the last init.
    pub allocation_count: u64,
    /// Successful frees since the last init.
    pub free_count: u64,
}

impl From<ManagerStats> for MemmanStats {
    fn from(s: ManagerStats) -> Self {
        Self {
            total_size: s.total_size,
            allocated_bytes: s.allocated_bytes,
            free_bytes: s.free_bytes,
            fragment_count: s.fragment_count,
            block_count: s.block_count,
            largest_free_block: s.largest_free_block,
            allocation_count: s.allocation_count,
            free_count: s.free_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_placement_round_trips() {
        for raw in 0..3 {
            let p = MemmanPlacement::from_raw(raw).unwrap();
            assert_eq!(p as i32, raw);
        }
        assert_eq!(MemmanPlacement::from_raw(3), None);
        assert_eq!(MemmanPlacement::from_raw(-1), None);
    }

    #[test]
    fn maps_to_core_placement() {
        assert_eq!(Placement::from(MemmanPlacement::FirstFit), Placement::FirstFit);
        assert_eq!(Placement::from(MemmanPlacement::WorstFit), Placement::WorstFit);
        assert_eq!(Placement::from(MemmanPlacement::BestFit), Placement::BestFit);
    }
}
