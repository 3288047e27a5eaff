/*!
 * Allocator Property Tests
 * Invariants over random operation sequences and bit patterns
 */

use proptest::prelude::*;
use vulcan_kernel::memory::{
    AllocatorConfig, FragmentationPolicy, MemoryError, MemoryManager, MemoryState, ScanContext,
    Strategy as Placement,
};

#[derive(Debug, Clone)]
enum Op {
    Declare { size: usize, strategy: usize },
    Dispatch,
    Free(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (1usize..12, 0usize..5).prop_map(|(size, strategy)| Op::Declare { size, strategy }),
        2 => Just(Op::Dispatch),
        2 => (0usize..24).prop_map(Op::Free),
    ]
}

fn check_invariants(mem: &MemoryManager) -> Result<(), TestCaseError> {
    let mut coverage = vec![0u8; mem.total_units()];
    let mut placed_units = 0;

    for record in mem.processes() {
        if let Some(range) = record.range() {
            placed_units += record.size;
            for unit in range {
                coverage[unit] += 1;
            }
        }
    }

    // no unit is claimed twice, and used units are exactly the claimed ones
    prop_assert!(coverage.iter().all(|&c| c <= 1));
    prop_assert_eq!(coverage.as_slice(), mem.memory_snapshot());
    prop_assert_eq!(mem.free_units() + placed_units, mem.total_units());
    Ok(())
}

proptest! {
    #[test]
    fn test_random_operations_keep_invariants(
        units in 1usize..48,
        keep_pending in any::<bool>(),
        ops in prop::collection::vec(op(), 1..64),
    ) {
        let policy = if keep_pending {
            FragmentationPolicy::KeepPending
        } else {
            FragmentationPolicy::Reject
        };
        let config = AllocatorConfig::with_units(units).with_fragmentation_policy(policy);
        let mut mem = MemoryManager::with_config(config).unwrap();
        let mut declared = 0usize;

        for op in ops {
            match op {
                Op::Declare { size, strategy } => {
                    mem.declare(&format!("p{}", declared), size, Placement::ALL[strategy])
                        .unwrap();
                    declared += 1;
                }
                Op::Dispatch => {
                    for report in mem.dispatch_all() {
                        if let Some(offset) = report.outcome.offset() {
                            prop_assert_eq!(mem.process(&report.name).unwrap().offset, Some(offset));
                        }
                    }
                }
                Op::Free(i) => {
                    let name = format!("p{}", i);
                    let placed = mem.process(&name).map(|r| r.is_placed()).unwrap_or(false);
                    let before = mem.memory_snapshot().to_vec();
                    match mem.free(&name) {
                        Ok(record) => prop_assert!(placed && record.name == name),
                        Err(e) => {
                            prop_assert!(!placed);
                            prop_assert_eq!(e, MemoryError::NotFound(name));
                            prop_assert_eq!(before.as_slice(), mem.memory_snapshot());
                        }
                    }
                }
            }
            check_invariants(&mem)?;
        }
    }

    #[test]
    fn test_best_fit_and_quick_fit_agree(
        bits in prop::collection::vec(0u8..=1, 1..96),
        size in 1usize..24,
    ) {
        let state = MemoryState::from_bits(&bits);
        let ctx = ScanContext::new(&state, 0);
        prop_assert_eq!(Placement::BestFit.find(&ctx, size), Placement::QuickFit.find(&ctx, size));
    }

    #[test]
    fn test_every_strategy_returns_a_free_run(
        bits in prop::collection::vec(0u8..=1, 1..96),
        size in 1usize..24,
        cursor in 0usize..96,
    ) {
        let state = MemoryState::from_bits(&bits);
        let ctx = ScanContext::new(&state, cursor.min(bits.len()));
        let fits = state.largest_free_run() >= size;

        for strategy in Placement::ALL {
            match strategy.find(&ctx, size) {
                Some(offset) => {
                    prop_assert!(offset + size <= state.len());
                    prop_assert!((offset..offset + size).all(|i| state.is_free(i)));
                }
                None => prop_assert!(!fits, "{} missed a fitting run", strategy),
            }
        }
    }
}
