//! Placement policies: which free block satisfies a request.
//!
//! A [`PlacementPolicy`] is a pure, read-only scan over the ledger's
//! ordered blocks. It returns the index of the chosen block and never
//! mutates anything; the ledger validates the choice and carves it.
//!
//! The three built-in policies are unit structs ([`FirstFit`],
//! [`BestFit`], [`WorstFit`]). The [`Placement`] selector from
//! `memman-core` implements the trait by dispatching to them.

use memman_core::Placement;

use crate::block::Block;

/// Chooses a free block for an allocation request.
///
/// Implementations receive the blocks in ascending-base order and must
/// return the index of a free block whose length is at least `size`, or
/// `None` when no such block exists. Selecting an ineligible block is
/// rejected by the ledger.
pub trait PlacementPolicy {
    /// Human-readable name, used in logs and error messages.
    fn name(&self) -> &str;

    /// Index of the chosen block, or `None` if nothing fits.
    fn select(&self, blocks: &[Block], size: usize) -> Option<usize>;
}

/// Lowest-addressed free block that is large enough.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstFit;

impl PlacementPolicy for FirstFit {
    fn name(&self) -> &str {
        "first-fit"
    }

    fn select(&self, blocks: &[Block], size: usize) -> Option<usize> {
        blocks.iter().position(|b| b.fits(size))
    }
}

/// Smallest free block that is large enough; ties go to the lowest base.
#[derive(Clone, Copy, Debug, Default)]
pub struct BestFit;

impl PlacementPolicy for BestFit {
    fn name(&self) -> &str {
        "best-fit"
    }

    fn select(&self, blocks: &[Block], size: usize) -> Option<usize> {
        let mut best: Option<(usize, usize)> = None;
        for (i, b) in blocks.iter().enumerate() {
            if !b.fits(size) {
                continue;
            }
            if b.len == size {
                return Some(i);
            }
            // Strict comparison keeps the earliest candidate on ties.
            if best.is_none_or(|(_, len)| b.len < len) {
                best = Some((i, b.len));
            }
        }
        best.map(|(i, _)| i)
    }
}

/// Largest free block; ties go to the lowest base.
#[derive(Clone, Copy, Debug, Default)]
pub struct WorstFit;

impl PlacementPolicy for WorstFit {
    fn name(&self) -> &str {
        "worst-fit"
    }

    fn select(&self, blocks: &[Block], size: usize) -> Option<usize> {
        let mut worst: Option<(usize, usize)> = None;
        for (i, b) in blocks.iter().enumerate() {
            if !b.fits(size) {
                continue;
            }
            if worst.is_none_or(|(_, len)| b.len > len) {
                worst = Some((i, b.len));
            }
        }
        worst.map(|(i, _)| i)
    }
}

impl PlacementPolicy for Placement {
    fn name(&self) -> &str {
        Placement::name(*self)
    }

    fn select(&self, blocks: &[Block], size: usize) -> Option<usize> {
        match self {
            Placement::FirstFit => FirstFit.select(blocks, size),
            Placement::WorstFit => WorstFit.select(blocks, size),
            Placement::BestFit => BestFit.select(blocks, size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockState::{Allocated, Free};

    /// Free 30 | used 10 | free 10 | used 10 | free 30 | used 10
    fn layout() -> Vec<Block> {
        let spans = [
            (30, Free),
            (10, Allocated),
            (10, Free),
            (10, Allocated),
            (30, Free),
            (10, Allocated),
        ];
        let mut base = 0;
        spans
            .iter()
            .map(|&(len, state)| {
                let b = Block::new(base, len, state);
                base += len;
                b
            })
            .collect()
    }

    #[test]
    fn first_fit_takes_lowest_base() {
        let blocks = layout();
        assert_eq!(FirstFit.select(&blocks, 5), Some(0));
        assert_eq!(FirstFit.select(&blocks, 30), Some(0));
        assert_eq!(FirstFit.select(&blocks, 31), None);
    }

    #[test]
    fn best_fit_takes_smallest_eligible() {
        let blocks = layout();
        assert_eq!(BestFit.select(&blocks, 5), Some(2));
        assert_eq!(BestFit.select(&blocks, 10), Some(2));
    }

    #[test]
    fn best_fit_ties_go_to_lowest_base() {
        let blocks = layout();
        // Both 30-byte holes qualify; index 0 wins.
        assert_eq!(BestFit.select(&blocks, 11), Some(0));
    }

    #[test]
    fn worst_fit_ties_go_to_lowest_base() {
        let blocks = layout();
        assert_eq!(WorstFit.select(&blocks, 1), Some(0));
    }

    #[test]
    fn worst_fit_takes_largest() {
        let mut blocks = layout();
        // Grow the last hole to 40 bytes by shrinking the trailing allocation.
        blocks[4].len = 35;
        blocks[5].base = 95;
        blocks[5].len = 5;
        assert_eq!(WorstFit.select(&blocks, 1), Some(4));
    }

    #[test]
    fn allocated_blocks_never_selected() {
        let blocks = vec![Block::new(0, 100, Allocated)];
        for p in Placement::ALL {
            assert_eq!(p.select(&blocks, 1), None);
        }
    }

    #[test]
    fn enum_dispatch_matches_structs() {
        let blocks = layout();
        for size in [1, 10, 11, 30, 31] {
            assert_eq!(
                Placement::FirstFit.select(&blocks, size),
                FirstFit.select(&blocks, size)
            );
            assert_eq!(
                Placement::BestFit.select(&blocks, size),
                BestFit.select(&blocks, size)
            );
            assert_eq!(
                Placement::WorstFit.select(&blocks, size),
                WorstFit.select(&blocks, size)
            );
        }
        assert_eq!(PlacementPolicy::name(&Placement::BestFit), "best-fit");
    }
}
