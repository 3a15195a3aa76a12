//! Ledger soundness violations.

use std::error::Error;
use std::fmt;

/// A broken ledger invariant, as reported by
/// [`Ledger::check_invariants`](crate::Ledger::check_invariants).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LedgerViolation {
    /// The ledger holds no blocks.
    Empty,
    /// A block has zero length.
    ZeroLength {
        /// Index of the offending block.
        index: usize,
    },
    /// A block does not start where its predecessor ends.
    Discontiguous {
        /// Index of the offending block.
        index: usize,
        /// Where the block should have started.
        expected_base: usize,
        /// Where it actually starts.
        actual_base: usize,
    },
    /// The blocks do not cover exactly `[0, total_size)`.
    CoverageMismatch {
        /// Bytes covered by the blocks.
        covered: usize,
        /// Size of the managed span.
        total_size: usize,
    },
    /// Two neighbouring blocks are both free.
    UncoalescedFree {
        /// Index of the first of the two free blocks.
        index: usize,
    },
}

impl fmt::Display for LedgerViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "ledger has no blocks"),
            Self::ZeroLength { index } => write!(f, "block {index} has zero length"),
            Self::Discontiguous {
                index,
                expected_base,
                actual_base,
            } => {
                write!(
                    f,
                    "block {index} starts at {actual_base}, expected {expected_base}"
                )
            }
            Self::CoverageMismatch {
                covered,
                total_size,
            } => {
                write!(f, "blocks cover {covered} bytes of a {total_size}-byte span")
            }
            Self::UncoalescedFree { index } => {
                write!(f, "blocks {index} and {} are both free", index + 1)
            }
        }
    }
}

impl Error for LedgerViolation {}
