//! The ordered block ledger.
//!
//! A [`Ledger`] partitions the managed span `[0, total_size)` into
//! contiguous, non-overlapping [`Block`]s stored in a `Vec` ordered by
//! ascending base. Allocation carves a free block (convert in place or
//! split); freeing marks a block free and merges it with free neighbours.
//!
//! Invariants (hold after every public method returns):
//! 1. The blocks tile `[0, total_size)` with no gaps or overlaps.
//! 2. No two neighbouring blocks are both free.
//! 3. There is at least one block.

use log::trace;
use memman_core::{AllocError, FreeFault};

use crate::block::{Block, BlockState};
use crate::error::LedgerViolation;
use crate::placement::PlacementPolicy;
use crate::stats::LedgerStats;

/// Ordered partition of the managed span into blocks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ledger {
    /// Blocks in ascending-base order.
    blocks: Vec<Block>,
    total_size: usize,
}

impl Ledger {
    /// Create a ledger holding one free block over `[0, total_size)`.
    pub fn new(total_size: usize) -> Result<Self, AllocError> {
        if total_size == 0 {
            return Err(AllocError::invalid_argument("region size must be non-zero"));
        }
        Ok(Self {
            blocks: vec![Block::new(0, total_size, BlockState::Free)],
            total_size,
        })
    }

    /// Size of the managed span in bytes.
    pub fn total_size(&self) -> usize {
        self.total_size
    }

    /// All blocks in ascending-base order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Number of blocks (free and allocated).
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// The block starting exactly at `offset`, if any.
    pub fn block_at(&self, offset: usize) -> Option<&Block> {
        self.index_of(offset).map(|i| &self.blocks[i])
    }

    fn index_of(&self, offset: usize) -> Option<usize> {
        self.blocks.binary_search_by_key(&offset, |b| b.base).ok()
    }

    /// Carve `size` bytes out of the block chosen by `policy`.
    ///
    /// Returns the offset of the allocated block. On any error the ledger
    /// is unchanged.
    pub fn allocate<P>(&mut self, policy: &P, size: usize) -> Result<usize, AllocError>
    where
        P: PlacementPolicy + ?Sized,
    {
        if size == 0 {
            return Err(AllocError::invalid_argument("allocation size must be non-zero"));
        }
        let index = policy
            .select(&self.blocks, size)
            .ok_or_else(|| AllocError::OutOfMemory {
                requested: size,
                largest_free: self.largest_free(),
            })?;
        match self.blocks.get(index) {
            Some(b) if b.fits(size) => Ok(self.carve(index, size)),
            _ => Err(AllocError::invalid_argument(format!(
                "placement policy '{}' selected ineligible block {index} for {size} bytes",
                policy.name()
            ))),
        }
    }

    /// Allocate `size` bytes at the front of free block `index`.
    ///
    /// Caller guarantees `blocks[index].fits(size)`.
    fn carve(&mut self, index: usize, size: usize) -> usize {
        let block = self.blocks[index];
        if block.len == size {
            self.blocks[index].state = BlockState::Allocated;
            trace!("ledger: converted block {index} {block} in place");
        } else {
            let remainder = Block::new(block.base + size, block.len - size, BlockState::Free);
            self.blocks[index] = Block::new(block.base, size, BlockState::Allocated);
            self.blocks.insert(index + 1, remainder);
            trace!(
                "ledger: split block {index} {block} into {} + {remainder}",
                self.blocks[index]
            );
        }
        block.base
    }

    /// Free the allocated block starting at `offset` and coalesce it with
    /// free neighbours.
    ///
    /// Returns the resulting free block (after merging). On error the
    /// ledger is unchanged.
    pub fn release(&mut self, offset: usize) -> Result<Block, FreeFault> {
        let index = self.index_of(offset).ok_or(FreeFault::UnknownAddress)?;
        if self.blocks[index].is_free() {
            return Err(FreeFault::DoubleFree);
        }
        self.blocks[index].state = BlockState::Free;
        Ok(self.coalesce(index))
    }

    /// Merge free block `index` with a free successor and/or predecessor.
    fn coalesce(&mut self, mut index: usize) -> Block {
        if index + 1 < self.blocks.len() && self.blocks[index + 1].is_free() {
            let next = self.blocks.remove(index + 1);
            self.blocks[index].len += next.len;
            trace!("ledger: merged successor {next} into block {index}");
        }
        if index > 0 && self.blocks[index - 1].is_free() {
            let current = self.blocks.remove(index);
            index -= 1;
            self.blocks[index].len += current.len;
            trace!("ledger: merged {current} into predecessor block {index}");
        }
        self.blocks[index]
    }

    /// Sum of allocated block lengths.
    pub fn allocated_bytes(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| !b.is_free())
            .map(|b| b.len)
            .sum()
    }

    /// Sum of free block lengths.
    pub fn free_bytes(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_free()).map(|b| b.len).sum()
    }

    /// Number of free blocks.
    pub fn fragment_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_free()).count()
    }

    /// Length of the largest free block, or 0 if none.
    pub fn largest_free(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| b.is_free())
            .map(|b| b.len)
            .max()
            .unwrap_or(0)
    }

    /// All byte and block counters in one pass.
    pub fn stats(&self) -> LedgerStats {
        let mut stats = LedgerStats {
            total_size: self.total_size,
            block_count: self.blocks.len(),
            ..LedgerStats::default()
        };
        for b in &self.blocks {
            match b.state {
                BlockState::Free => {
                    stats.free_bytes += b.len;
                    stats.fragment_count += 1;
                    stats.largest_free = stats.largest_free.max(b.len);
                }
                BlockState::Allocated => stats.allocated_bytes += b.len,
            }
        }
        stats
    }

    /// Verify the partition and coalescing invariants.
    ///
    /// Returns the first violation found, scanning in ascending-base order.
    pub fn check_invariants(&self) -> Result<(), LedgerViolation> {
        if self.blocks.is_empty() {
            return Err(LedgerViolation::Empty);
        }
        let mut expected_base = 0;
        for (index, b) in self.blocks.iter().enumerate() {
            if b.len == 0 {
                return Err(LedgerViolation::ZeroLength { index });
            }
            if b.base != expected_base {
                return Err(LedgerViolation::Discontiguous {
                    index,
                    expected_base,
                    actual_base: b.base,
                });
            }
            expected_base = b.end();
        }
        if expected_base != self.total_size {
            return Err(LedgerViolation::CoverageMismatch {
                covered: expected_base,
                total_size: self.total_size,
            });
        }
        if let Some(index) = self
            .blocks
            .windows(2)
            .position(|w| w[0].is_free() && w[1].is_free())
        {
            return Err(LedgerViolation::UncoalescedFree { index });
        }
        Ok(())
    }
}
