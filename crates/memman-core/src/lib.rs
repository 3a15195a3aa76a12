//! Core types for the memman allocator simulator.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by every other crate in the workspace:
//! caller-visible addresses, placement strategy selectors, and the
//! error contract returned by every manager operation.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod placement;

pub use error::{AllocError, FreeFault};
pub use id::Address;
pub use placement::{ParsePlacementError, Placement};
