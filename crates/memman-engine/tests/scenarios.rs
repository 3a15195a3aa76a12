//! End-to-end allocation scenarios against a 100-byte region.

use memman_core::{Address, AllocError, FreeFault, Placement};
use memman_engine::{Lifecycle, MemoryManager};
use memman_ledger::{Block, BlockState, PlacementPolicy};
use memman_test_utils::assert_sound;

fn manager(total: usize) -> MemoryManager {
    let mm = MemoryManager::new();
    mm.init(Address(0), total).unwrap();
    mm
}

fn check(mm: &MemoryManager) {
    let ledger = mm.ledger_snapshot().unwrap();
    assert_sound(&ledger);
    assert_eq!(
        mm.allocated_bytes().unwrap() + mm.free_bytes().unwrap(),
        ledger.total_size()
    );
}

#[test]
fn first_fit_then_exact_best_fit() {
    let mm = manager(100);

    let a = mm.allocate(Placement::FirstFit, 30).unwrap();
    assert_eq!(a, Address(0));
    assert_eq!(mm.free_bytes().unwrap(), 70);
    assert_eq!(mm.fragment_count().unwrap(), 1);
    assert_eq!(mm.allocation_count().unwrap(), 1);
    check(&mm);

    let b = mm.allocate(Placement::BestFit, 70).unwrap();
    assert_eq!(b, Address(30));
    assert_eq!(mm.free_bytes().unwrap(), 0);
    assert_eq!(mm.fragment_count().unwrap(), 0);
    assert_eq!(mm.allocated_bytes().unwrap(), 100);
    check(&mm);
}

#[test]
fn freeing_neighbours_coalesces_into_one_block() {
    let mm = manager(100);
    assert_eq!(mm.allocate(Placement::FirstFit, 20).unwrap(), Address(0));
    assert_eq!(mm.allocate(Placement::FirstFit, 20).unwrap(), Address(20));

    mm.free(Address(0)).unwrap();
    check(&mm);
    mm.free(Address(20)).unwrap();
    check(&mm);

    assert_eq!(mm.fragment_count().unwrap(), 1);
    assert_eq!(
        mm.blocks().unwrap(),
        vec![Block::new(0, 100, BlockState::Free)]
    );
}

#[test]
fn oversize_request_is_out_of_memory_and_no_op() {
    let mm = manager(100);
    mm.allocate(Placement::FirstFit, 40).unwrap();
    let before = mm.blocks().unwrap();

    for p in Placement::ALL {
        assert_eq!(
            mm.allocate(p, 61),
            Err(AllocError::OutOfMemory {
                requested: 61,
                largest_free: 60
            })
        );
    }
    assert_eq!(mm.blocks().unwrap(), before);
    assert_eq!(mm.allocation_count().unwrap(), 1);
}

#[test]
fn zero_byte_request_is_invalid_argument() {
    let mm = manager(100);
    for p in Placement::ALL {
        assert!(matches!(
            mm.allocate(p, 0),
            Err(AllocError::InvalidArgument { .. })
        ));
    }
    assert_eq!(mm.allocation_count().unwrap(), 0);
}

/// Builds free holes of 30, 10 and 20 bytes separated by 5-byte allocations:
/// `F30 A5 F10 A5 F20 A30`.
fn holes() -> MemoryManager {
    let mm = manager(100);
    let sizes = [30, 5, 10, 5, 20, 30];
    let addrs: Vec<Address> = sizes
        .iter()
        .map(|&s| mm.allocate(Placement::FirstFit, s).unwrap())
        .collect();
    for i in [0, 2, 4] {
        mm.free(addrs[i]).unwrap();
    }
    assert_eq!(mm.fragment_count().unwrap(), 3);
    mm
}

#[test]
fn first_fit_picks_lowest_eligible() {
    let mm = holes();
    assert_eq!(mm.allocate(Placement::FirstFit, 8).unwrap(), Address(0));
}

#[test]
fn best_fit_picks_smallest_eligible() {
    let mm = holes();
    assert_eq!(mm.allocate(Placement::BestFit, 8).unwrap(), Address(35));
    assert_eq!(mm.allocate(Placement::BestFit, 15).unwrap(), Address(50));
    check(&mm);
}

#[test]
fn worst_fit_picks_largest() {
    let mm = holes();
    assert_eq!(mm.allocate(Placement::WorstFit, 8).unwrap(), Address(0));
    // Remaining holes: 22 @ 8, 10 @ 35, 20 @ 50.
    assert_eq!(mm.allocate(Placement::WorstFit, 8).unwrap(), Address(8));
    check(&mm);
}

#[test]
fn exact_fit_does_not_add_blocks() {
    let mm = holes();
    let before = mm.stats().unwrap();
    assert_eq!(mm.allocate(Placement::BestFit, 10).unwrap(), Address(35));
    let after = mm.stats().unwrap();
    assert_eq!(after.block_count, before.block_count);
    assert_eq!(after.fragment_count, before.fragment_count - 1);
}

#[test]
fn round_trip_restores_statistics() {
    let mm = holes();
    for p in Placement::ALL {
        let before = mm.stats().unwrap();
        let a = mm.allocate(p, 7).unwrap();
        mm.free(a).unwrap();
        let after = mm.stats().unwrap();
        assert_eq!(after.free_bytes, before.free_bytes);
        assert_eq!(after.fragment_count, before.fragment_count);
        assert_eq!(after.block_count, before.block_count);
    }
}

#[test]
fn double_free_is_rejected_without_side_effects() {
    let mm = manager(100);
    let a = mm.allocate(Placement::FirstFit, 10).unwrap();
    mm.allocate(Placement::FirstFit, 10).unwrap();
    mm.free(a).unwrap();

    let before = mm.stats().unwrap();
    assert_eq!(
        mm.free(a),
        Err(AllocError::InvalidFree {
            address: a,
            fault: FreeFault::DoubleFree
        })
    );
    assert_eq!(mm.stats().unwrap(), before);
}

#[test]
fn interior_address_is_unknown() {
    let mm = manager(100);
    mm.allocate(Placement::FirstFit, 10).unwrap();
    assert_eq!(
        mm.free(Address(5)),
        Err(AllocError::InvalidFree {
            address: Address(5),
            fault: FreeFault::UnknownAddress
        })
    );
}

#[test]
fn reinit_discards_prior_allocations() {
    let mm = manager(100);
    let a = mm.allocate(Placement::FirstFit, 10).unwrap();
    mm.init(Address(0), 100).unwrap();
    assert_eq!(mm.allocation_count().unwrap(), 0);
    assert_eq!(mm.free_bytes().unwrap(), 100);
    // The old address now names the free block at offset 0.
    assert!(matches!(
        mm.free(a),
        Err(AllocError::InvalidFree {
            fault: FreeFault::DoubleFree,
            ..
        })
    ));
}

#[test]
fn full_lifecycle() {
    let mm = MemoryManager::default();
    assert_eq!(mm.lifecycle(), Lifecycle::Uninitialized);
    mm.init(Address(0x1000), 64).unwrap();
    assert_eq!(mm.lifecycle(), Lifecycle::Active);
    let a = mm.allocate(Placement::WorstFit, 64).unwrap();
    assert_eq!(a, Address(0x1000));
    mm.destroy().unwrap();
    assert_eq!(mm.lifecycle(), Lifecycle::Destroyed);
    assert!(matches!(
        mm.free(a),
        Err(AllocError::NotInitialized { .. })
    ));
    mm.init(Address(0x1000), 64).unwrap();
    assert_eq!(mm.allocate(Placement::FirstFit, 64).unwrap(), a);
}

#[test]
fn region_ending_at_top_of_address_space() {
    let base = Address(usize::MAX - 9);
    let mm = MemoryManager::new();
    mm.init(base, 10).unwrap();

    let a = mm.allocate(Placement::FirstFit, 4).unwrap();
    assert_eq!(a, base);
    let b = mm.allocate(Placement::FirstFit, 6).unwrap();
    assert_eq!(b, Address(usize::MAX - 5));
    assert_eq!(mm.free_bytes().unwrap(), 0);

    assert_eq!(
        mm.free(Address(usize::MAX)),
        Err(AllocError::InvalidFree {
            address: Address(usize::MAX),
            fault: FreeFault::UnknownAddress
        })
    );
    mm.free(b).unwrap();
    mm.free(a).unwrap();
    assert_eq!(mm.fragment_count().unwrap(), 1);
    check(&mm);

    mm.init(Address(usize::MAX), 1).unwrap();
    assert_eq!(
        mm.allocate(Placement::BestFit, 1).unwrap(),
        Address(usize::MAX)
    );
    assert!(matches!(
        mm.init(Address(usize::MAX), 2),
        Err(AllocError::InvalidArgument { .. })
    ));
}

#[test]
fn custom_policy_through_manager() {
    /// Picks the highest-addressed eligible block.
    struct LastFit;
    impl PlacementPolicy for LastFit {
        fn name(&self) -> &str {
            "last-fit"
        }
        fn select(&self, blocks: &[Block], size: usize) -> Option<usize> {
            blocks.iter().rposition(|b| b.fits(size))
        }
    }

    let mm = holes();
    assert_eq!(mm.allocate_with(&LastFit, 8).unwrap(), Address(50));
    let dyn_policy: &dyn PlacementPolicy = &LastFit;
    assert_eq!(mm.allocate_with(dyn_policy, 8).unwrap(), Address(58));
    check(&mm);
}
