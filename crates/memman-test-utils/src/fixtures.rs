//! Ledger layout fixtures.
//!
//! [`layout_ledger`] builds a ledger whose blocks match a given
//! `(len, state)` sequence by replaying allocations and frees through the
//! public API, so fixtures always go through the same code paths as real
//! callers.

use memman_core::Placement;
use memman_ledger::{BlockState, Ledger};

/// Build a ledger with exactly the given block layout.
///
/// The span size is the sum of the lengths. The layout must not contain
/// zero-length blocks or two consecutive free blocks, since neither can
/// exist in a sound ledger.
///
/// # Panics
///
/// Panics if the layout is empty or violates the rules above.
pub fn layout_ledger(layout: &[(usize, BlockState)]) -> Ledger {
    assert!(!layout.is_empty(), "layout must have at least one block");
    assert!(
        layout.iter().all(|&(len, _)| len > 0),
        "layout contains a zero-length block"
    );
    assert!(
        !layout
            .windows(2)
            .any(|w| w[0].1 == BlockState::Free && w[1].1 == BlockState::Free),
        "layout contains adjacent free blocks"
    );

    let total: usize = layout.iter().map(|&(len, _)| len).sum();
    let mut ledger = Ledger::new(total).expect("total is non-zero");
    let offsets: Vec<usize> = layout
        .iter()
        .map(|&(len, _)| {
            ledger
                .allocate(&Placement::FirstFit, len)
                .expect("sequential first-fit always fits")
        })
        .collect();
    for (&(_, state), &offset) in layout.iter().zip(&offsets) {
        if state == BlockState::Free {
            let freed = ledger.release(offset).expect("block was just allocated");
            assert!(freed.is_free());
        }
    }
    assert_sound(&ledger);
    ledger
}

/// Assert every ledger invariant plus byte conservation.
///
/// # Panics
///
/// Panics with the violation if the ledger is unsound.
pub fn assert_sound(ledger: &Ledger) {
    if let Err(v) = ledger.check_invariants() {
        panic!("ledger invariant violated: {v}\nblocks: {:?}", ledger.blocks());
    }
    assert_eq!(
        ledger.allocated_bytes() + ledger.free_bytes(),
        ledger.total_size(),
        "allocated + free must equal the span size"
    );
}
