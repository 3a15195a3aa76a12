//! Error types for the memman allocator.
//!
//! Every manager operation reports failure through [`AllocError`]. There is
//! no fatal/recoverable split: callers decide what a failure means to them.
//! A failed operation never changes manager state.

use std::error::Error;
use std::fmt;

use crate::id::Address;

/// Why a `free` request was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FreeFault {
    /// The address does not start any block: it was never issued, lies
    /// outside the region, or points into the middle of an allocation.
    UnknownAddress,
    /// The address starts a block that is already free.
    DoubleFree,
}

impl fmt::Display for FreeFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownAddress => write!(f, "address does not start an allocated block"),
            Self::DoubleFree => write!(f, "block is already free"),
        }
    }
}

/// Errors returned by memory manager operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllocError {
    /// The manager is not active (never initialized, or destroyed).
    NotInitialized {
        /// Name of the lifecycle state the manager was in.
        lifecycle: &'static str,
    },
    /// An argument was out of range: zero region size, a region that
    /// overflows the address space, a zero-byte request, or a placement
    /// policy that selected an ineligible block.
    InvalidArgument {
        /// Human-readable description of the rejected argument.
        reason: String,
    },
    /// No free block is large enough for the request.
    OutOfMemory {
        /// Number of bytes requested.
        requested: usize,
        /// Length of the largest free block at the time of the request.
        largest_free: usize,
    },
    /// The address passed to `free` is not a live allocation.
    InvalidFree {
        /// The rejected address.
        address: Address,
        /// Why it was rejected.
        fault: FreeFault,
    },
}

impl AllocError {
    /// Shorthand for [`AllocError::InvalidArgument`].
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInitialized { lifecycle } => {
                write!(f, "memory manager is not initialized (state: {lifecycle})")
            }
            Self::InvalidArgument { reason } => write!(f, "invalid argument: {reason}"),
            Self::OutOfMemory {
                requested,
                largest_free,
            } => {
                write!(
                    f,
                    "out of memory: requested {requested} bytes, largest free block {largest_free} bytes"
                )
            }
            Self::InvalidFree { address, fault } => {
                write!(f, "invalid free of {address}: {fault}")
            }
        }
    }
}

impl Error for AllocError {}
