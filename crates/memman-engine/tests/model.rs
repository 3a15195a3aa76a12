//! Randomized operation sequences checked against the reference model.
//!
//! Every allocation must return exactly the address the model predicts
//! for its strategy, every free must succeed or fail as the model expects,
//! and all statistics must agree after every step.

use memman_core::{Address, AllocError, FreeFault, Placement};
use memman_engine::MemoryManager;
use memman_test_utils::{assert_sound, ShadowHeap};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Alloc(Placement, usize),
    FreeLive(prop::sample::Index),
    FreeBogus(usize),
}

fn placement() -> impl Strategy<Value = Placement> {
    prop_oneof![
        Just(Placement::FirstFit),
        Just(Placement::WorstFit),
        Just(Placement::BestFit),
    ]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        5 => (placement(), 1usize..48).prop_map(|(p, s)| Op::Alloc(p, s)),
        4 => any::<prop::sample::Index>().prop_map(Op::FreeLive),
        1 => (0usize..300).prop_map(Op::FreeBogus),
    ]
}

fn check_against_model(mm: &MemoryManager, model: &ShadowHeap) -> Result<(), TestCaseError> {
    let stats = mm.stats().unwrap();
    prop_assert_eq!(stats.allocated_bytes, model.allocated_bytes());
    prop_assert_eq!(stats.free_bytes, model.free_bytes());
    prop_assert_eq!(stats.fragment_count, model.fragment_count());
    prop_assert_eq!(stats.allocation_count, model.allocation_count());
    prop_assert_eq!(mm.allocated_bytes().unwrap(), model.allocated_bytes());
    prop_assert_eq!(mm.free_bytes().unwrap(), model.free_bytes());
    prop_assert_eq!(mm.fragment_count().unwrap(), model.fragment_count());
    prop_assert_eq!(mm.allocation_count().unwrap(), model.allocation_count());
    assert_sound(&mm.ledger_snapshot().unwrap());
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn manager_matches_reference_model(
        base in 0usize..0x1_0000,
        total in 1usize..256,
        ops in proptest::collection::vec(op(), 1..80),
    ) {
        let base = Address(base);
        let mm = MemoryManager::new();
        mm.init(base, total).unwrap();
        let mut model = ShadowHeap::new(base, total);

        for op in ops {
            match op {
                Op::Alloc(p, size) => {
                    let expected = model.predict(p, size);
                    match (mm.allocate(p, size), expected) {
                        (Ok(addr), Some(want)) => {
                            prop_assert_eq!(addr, want, "{} placed {} bytes", p, size);
                            model.record_alloc(addr, size);
                        }
                        (Err(AllocError::OutOfMemory { requested, .. }), None) => {
                            prop_assert_eq!(requested, size);
                        }
                        (got, want) => {
                            prop_assert!(false, "{} {}: got {:?}, model {:?}", p, size, got, want);
                        }
                    }
                }
                Op::FreeLive(pick) => {
                    if model.live_count() == 0 {
                        continue;
                    }
                    let addr = model.live_at(pick.index(model.live_count())).unwrap();
                    prop_assert!(mm.free(addr).is_ok());
                    model.record_free(addr);
                    // Freeing again must be rejected.
                    let again = mm.free(addr);
                    prop_assert!(
                        matches!(again, Err(AllocError::InvalidFree { .. })),
                        "second free of {} returned {:?}", addr, again
                    );
                }
                Op::FreeBogus(offset) => {
                    let addr = Address(base.0 + offset);
                    if model.is_live(addr) {
                        continue;
                    }
                    let before = mm.stats().unwrap();
                    let result = mm.free(addr);
                    prop_assert!(
                        matches!(
                            result,
                            Err(AllocError::InvalidFree {
                                fault: FreeFault::UnknownAddress | FreeFault::DoubleFree,
                                ..
                            })
                        ),
                        "free of non-live {} returned {:?}", addr, result
                    );
                    prop_assert_eq!(mm.stats().unwrap(), before);
                }
            }
            check_against_model(&mm, &model)?;
        }
    }

    #[test]
    fn alloc_free_round_trip_restores_stats(
        total in 16usize..256,
        warmup in proptest::collection::vec((placement(), 1usize..32), 0..10),
        p in placement(),
        size in 1usize..64,
    ) {
        let mm = MemoryManager::new();
        mm.init(Address(0), total).unwrap();
        for (wp, ws) in warmup {
            let _ = mm.allocate(wp, ws);
        }
        let before = mm.stats().unwrap();
        if let Ok(addr) = mm.allocate(p, size) {
            mm.free(addr).unwrap();
            let after = mm.stats().unwrap();
            prop_assert_eq!(after.free_bytes, before.free_bytes);
            prop_assert_eq!(after.fragment_count, before.fragment_count);
            prop_assert_eq!(after.allocation_count, before.allocation_count + 1);
        } else {
            prop_assert_eq!(mm.stats().unwrap(), before);
        }
    }
}
