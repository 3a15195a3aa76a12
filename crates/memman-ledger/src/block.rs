//! Block descriptors.
//!
//! A [`Block`] is a contiguous byte range of the managed span, tagged
//! [`BlockState::Free`] or [`BlockState::Allocated`]. Blocks are plain
//! values: the ledger owns them and callers only ever see copies.

use std::fmt;

/// Whether a block is available for placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockState {
    /// Available to satisfy allocation requests.
    Free,
    /// Handed out to a caller.
    Allocated,
}

impl fmt::Display for BlockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Free => f.write_str("free"),
            Self::Allocated => f.write_str("allocated"),
        }
    }
}

/// A contiguous range `[base, base + len)` of the managed span.
///
/// `base` is an offset from the start of the region, not an address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Block {
    pub(crate) base: usize,
    pub(crate) len: usize,
    pub(crate) state: BlockState,
}

impl Block {
    /// Describe the range `[base, base + len)` in the given state.
    pub fn new(base: usize, len: usize, state: BlockState) -> Self {
        Self { base, len, state }
    }

    /// Offset of the first byte.
    pub fn base(&self) -> usize {
        self.base
    }

    /// Length in bytes. Never zero inside a sound ledger.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether this is a zero-length block.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// One past the last byte.
    pub fn end(&self) -> usize {
        self.base + self.len
    }

    /// Free or allocated.
    pub fn state(&self) -> BlockState {
        self.state
    }

    /// Whether the block is free.
    pub fn is_free(&self) -> bool {
        self.state == BlockState::Free
    }

    /// Whether a free block can hold `size` bytes.
    pub fn fits(&self, size: usize) -> bool {
        self.is_free() && self.len >= size
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}) {}", self.base, self.end(), self.state)
    }
}
