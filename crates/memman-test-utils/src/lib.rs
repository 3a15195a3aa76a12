//! Test utilities for memman development.
//!
//! Provides an independent reference model of the allocator
//! ([`ShadowHeap`]) and ledger fixtures for building specific block
//! layouts without reaching into ledger internals.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod shadow;

pub use fixtures::{assert_sound, layout_ledger};
pub use shadow::ShadowHeap;
