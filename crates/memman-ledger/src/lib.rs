//! Block ledger and placement policies for the memman allocator.
//!
//! The ledger is the whole of the allocator's data structure: an ordered
//! partition of a fixed span into free and allocated blocks, carved by a
//! placement policy on allocation and coalesced on free.
//!
//! # Architecture
//!
//! ```text
//! Ledger (owns every Block, ascending base)
//! ├── allocate(policy, size) → PlacementPolicy::select → carve (convert | split)
//! ├── release(offset)        → binary search by base → mark free → coalesce
//! └── stats() / check_invariants()
//! ```
//!
//! The ledger works in offsets from the start of the span. Translating
//! offsets to caller-visible addresses is done by the manager using a
//! [`RegionConfig`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod block;
pub mod config;
pub mod error;
pub mod ledger;
pub mod placement;
pub mod stats;

pub use block::{Block, BlockState};
pub use config::RegionConfig;
pub use error::LedgerViolation;
pub use ledger::Ledger;
pub use placement::{BestFit, FirstFit, PlacementPolicy, WorstFit};
pub use stats::LedgerStats;
