//! memman: a simulated memory manager over one fixed region.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the memman sub-crates. Adding `memman` as a single dependency is enough
//! for most users.
//!
//! # Quick start
//!
//! ```rust
//! use memman::prelude::*;
//!
//! let mm = MemoryManager::new();
//! mm.init(Address(0), 100).unwrap();
//!
//! let a = mm.allocate(Placement::FirstFit, 30).unwrap();
//! assert_eq!(a, Address(0));
//! let b = mm.allocate(Placement::BestFit, 70).unwrap();
//! assert_eq!(b, Address(30));
//! assert_eq!(mm.fragment_count().unwrap(), 0);
//!
//! assert!(matches!(
//!     mm.allocate(Placement::WorstFit, 1),
//!     Err(AllocError::OutOfMemory { .. })
//! ));
//!
//! mm.free(a).unwrap();
//! mm.free(b).unwrap();
//! let stats = mm.stats().unwrap();
//! assert_eq!(stats.free_bytes, 100);
//! assert_eq!(stats.fragment_count, 1);
//! assert_eq!(stats.allocation_count, 2);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `memman-core` | `Address`, `Placement`, error types |
//! | [`ledger`] | `memman-ledger` | Block list, placement policies, invariant checks |
//! | [`engine`] | `memman-engine` | `MemoryManager`, lifecycle, statistics |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core value and error types (`memman-core`).
pub use memman_core as types;

/// Block list and placement policies (`memman-ledger`).
///
/// Implement [`ledger::PlacementPolicy`] to plug a custom strategy into
/// [`engine::MemoryManager::allocate_with`].
pub use memman_ledger as ledger;

/// The thread-safe manager (`memman-engine`).
pub use memman_engine as engine;

/// Common imports for typical memman usage.
///
/// ```rust
/// use memman::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use memman_core::{Address, Placement};

    // Errors
    pub use memman_core::{AllocError, FreeFault};

    // Ledger
    pub use memman_ledger::{Block, BlockState, PlacementPolicy, RegionConfig};

    // Engine
    pub use memman_engine::{Lifecycle, ManagerStats, MemoryManager};
}
