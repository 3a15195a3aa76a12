//! Thread-safe simulated memory manager.
//!
//! [`MemoryManager`] accounts for a single fixed-size region of bytes
//! without touching the host allocator for the managed bytes. Requests
//! are placed with first-fit, worst-fit or best-fit (or any custom
//! [`PlacementPolicy`](memman_ledger::PlacementPolicy)), frees coalesce
//! adjacent free space, and bookkeeping queries report allocated bytes,
//! free bytes, fragment count and the number of successful allocations.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod lifecycle;
pub mod manager;
pub mod stats;

pub use lifecycle::Lifecycle;
pub use manager::MemoryManager;
pub use stats::ManagerStats;
