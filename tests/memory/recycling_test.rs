/*!
 * Range Recycling Test
 * Verifies that freed ranges are reused by later placements
 */

use vulcan_kernel::memory::{MemoryManager, Strategy};

#[test]
fn test_range_recycling() {
    let mut mem = MemoryManager::new(16).unwrap();

    mem.declare("a", 4, Strategy::FirstFit).unwrap();
    mem.declare("b", 6, Strategy::FirstFit).unwrap();
    mem.declare("c", 2, Strategy::FirstFit).unwrap();
    mem.dispatch_all();

    assert_eq!(mem.process("a").unwrap().offset, Some(0));
    assert_eq!(mem.process("b").unwrap().offset, Some(4));
    assert_eq!(mem.process("c").unwrap().offset, Some(10));

    // Free the middle block and place something smaller into its hole
    mem.free("b").unwrap();
    mem.declare("d", 5, Strategy::BestFit).unwrap();
    mem.dispatch_all();

    assert_eq!(
        mem.process("d").unwrap().offset,
        Some(4),
        "Best Fit should reuse the freed hole"
    );
    assert_eq!(mem.free_units(), 16 - 4 - 5 - 2);

    // The leftover unit of the hole stays free and usable
    mem.declare("e", 1, Strategy::QuickFit).unwrap();
    mem.dispatch_all();
    assert_eq!(mem.process("e").unwrap().offset, Some(9));
}

#[test]
fn test_free_everything_restores_empty_memory() {
    let mut mem = MemoryManager::new(10).unwrap();
    let names = ["a", "b", "c", "d"];
    for (name, strategy) in names.iter().zip(Strategy::ALL) {
        mem.declare(name, 2, strategy).unwrap();
    }
    mem.dispatch_all();
    assert_eq!(mem.free_units(), 2);

    for name in names {
        mem.free(name).unwrap();
    }
    assert_eq!(mem.free_units(), 10);
    assert!(mem.memory_snapshot().iter().all(|&b| b == 0));
    assert!(mem.processes().is_empty());
}
