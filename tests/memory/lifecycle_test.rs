/*!
 * Process Lifecycle Tests
 * Declaration, dispatch, rejection and free through the manager
 */

use pretty_assertions::assert_eq;
use vulcan_kernel::memory::{
    AllocatorConfig, DispatchOutcome, FragmentationPolicy, MemoryError, MemoryManager,
    RejectReason, Strategy,
};

#[test]
fn test_memory_manager_initialization() {
    let mem = MemoryManager::new(32).unwrap();
    let (total, used, available) = mem.info();

    assert_eq!(total, 32);
    assert_eq!(used, 0);
    assert_eq!(available, 32);
    assert_eq!(mem.memory_snapshot(), vec![0u8; 32].as_slice());
    assert_eq!(mem.next_fit_cursor(), 0);
}

#[test]
fn test_zero_capacity_is_rejected() {
    assert_eq!(
        MemoryManager::new(0).unwrap_err(),
        MemoryError::InvalidCapacity(0)
    );
}

#[test]
fn test_duplicate_name_is_an_error() {
    let mut mem = MemoryManager::new(16).unwrap();
    mem.declare("editor", 4, Strategy::FirstFit).unwrap();

    let err = mem.declare("editor", 2, Strategy::BestFit).unwrap_err();
    assert_eq!(err, MemoryError::DuplicateName("editor".to_string()));
    assert_eq!(mem.pending().count(), 1);
}

#[test]
fn test_dispatch_reports_in_fifo_order() {
    let mut mem = MemoryManager::new(16).unwrap();
    mem.declare("c", 2, Strategy::WorstFit).unwrap();
    mem.declare("a", 4, Strategy::FirstFit).unwrap();
    mem.declare("b", 3, Strategy::BestFit).unwrap();

    let reports = mem.dispatch_all();
    let names: Vec<_> = reports.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["c", "a", "b"]);

    let offsets: Vec<_> = reports.iter().map(|r| r.outcome.offset()).collect();
    assert_eq!(offsets, vec![Some(0), Some(2), Some(6)]);
    assert!(mem.pending().next().is_none());
}

#[test]
fn test_placement_updates_record_and_memory() {
    let mut mem = MemoryManager::new(8).unwrap();
    let pid = mem.declare("init", 3, Strategy::FirstFit).unwrap();
    assert_eq!(mem.process("init").unwrap().offset, None);

    mem.dispatch_all();

    let record = mem.process("init").unwrap();
    assert_eq!(record.pid, pid);
    assert_eq!(record.offset, Some(0));
    assert_eq!(mem.memory_snapshot(), &[1, 1, 1, 0, 0, 0, 0, 0]);
    assert_eq!(mem.free_units(), 5);
}

#[test]
fn test_insufficient_total_memory_rejects_and_unregisters() {
    let mut mem = MemoryManager::new(8).unwrap();
    mem.declare("a", 6, Strategy::FirstFit).unwrap();
    mem.declare("b", 4, Strategy::FirstFit).unwrap();

    let reports = mem.dispatch_all();
    assert_eq!(
        reports[1].outcome,
        DispatchOutcome::Rejected {
            reason: RejectReason::InsufficientTotalMemory {
                requested: 4,
                available: 2
            }
        }
    );
    assert_eq!(
        mem.process("b").unwrap_err(),
        MemoryError::NotFound("b".to_string())
    );
    // a rejected name can be declared again
    assert!(mem.declare("b", 2, Strategy::FirstFit).is_ok());
}

#[test]
fn test_admission_check_skips_strategy_scan() {
    let mut mem = MemoryManager::new(8).unwrap();
    mem.declare("fits", 2, Strategy::QuickFit).unwrap();
    mem.declare("huge", 9, Strategy::QuickFit).unwrap();
    mem.dispatch_all();

    assert_eq!(mem.scan_count(), 1);
    assert_eq!(mem.stats().scans, 1);
}

#[test]
fn test_fragmentation_rejects_by_default() {
    let mut mem = MemoryManager::new(6).unwrap();
    for name in ["a", "b", "c"] {
        mem.declare(name, 2, Strategy::FirstFit).unwrap();
    }
    mem.dispatch_all();
    mem.free("a").unwrap();
    mem.free("c").unwrap();

    mem.declare("wide", 3, Strategy::FirstFit).unwrap();
    let reports = mem.dispatch_all();

    assert_eq!(
        reports[0].outcome,
        DispatchOutcome::Rejected {
            reason: RejectReason::NoFitFound {
                requested: 3,
                available: 4,
                largest_run: 2
            }
        }
    );
    assert!(mem.process("wide").is_err());
    assert_eq!(mem.free_units(), 4);
}

#[test]
fn test_fragmentation_keep_pending_retries_later() {
    let config =
        AllocatorConfig::with_units(8).with_fragmentation_policy(FragmentationPolicy::KeepPending);
    let mut mem = MemoryManager::with_config(config).unwrap();
    for name in ["a", "b", "c", "d"] {
        mem.declare(name, 2, Strategy::FirstFit).unwrap();
    }
    mem.dispatch_all();
    mem.free("a").unwrap();
    mem.free("c").unwrap();

    // 4 units free in two runs of 2
    mem.declare("wide", 4, Strategy::NextFit).unwrap();
    mem.declare("small", 1, Strategy::BestFit).unwrap();
    let reports = mem.dispatch_all();
    assert_eq!(
        reports[0].outcome,
        DispatchOutcome::Deferred {
            reason: RejectReason::NoFitFound {
                requested: 4,
                available: 4,
                largest_run: 2
            }
        }
    );
    assert_eq!(reports[1].outcome, DispatchOutcome::Placed { offset: 0 });
    assert_eq!(mem.stats().pending_processes, 1);
    assert_eq!(mem.pending().collect::<Vec<_>>(), vec!["wide"]);

    mem.free("b").unwrap();
    mem.free("small").unwrap();
    let reports = mem.dispatch_all();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].outcome, DispatchOutcome::Placed { offset: 0 });
    assert!(mem.process("wide").unwrap().is_placed());
}

fn keep_pending(units: usize) -> MemoryManager {
    let config = AllocatorConfig::with_units(units)
        .with_fragmentation_policy(FragmentationPolicy::KeepPending);
    MemoryManager::with_config(config).unwrap()
}

#[test]
fn test_admission_failure_rejects_under_keep_pending() {
    let mut mem = keep_pending(4);
    mem.declare("big", 5, Strategy::FirstFit).unwrap();

    let reports = mem.dispatch_all();
    assert_eq!(
        reports[0].outcome,
        DispatchOutcome::Rejected {
            reason: RejectReason::InsufficientTotalMemory {
                requested: 5,
                available: 4
            }
        }
    );
    assert_eq!(
        mem.process("big").unwrap_err(),
        MemoryError::NotFound("big".to_string())
    );
    assert!(mem.pending().next().is_none());
    assert!(mem.dispatch_all().is_empty());
}

#[test]
fn test_cancel_withdraws_deferred_request() {
    let mut mem = keep_pending(6);
    for name in ["a", "b", "c"] {
        mem.declare(name, 2, Strategy::FirstFit).unwrap();
    }
    mem.dispatch_all();
    mem.free("a").unwrap();
    mem.free("c").unwrap();

    mem.declare("wide", 4, Strategy::WorstFit).unwrap();
    let reports = mem.dispatch_all();
    assert!(matches!(reports[0].outcome, DispatchOutcome::Deferred { .. }));
    assert_eq!(mem.pending().collect::<Vec<_>>(), vec!["wide"]);

    let record = mem.cancel("wide").unwrap();
    assert_eq!(record.size, 4);
    assert!(mem.pending().next().is_none());
    assert!(mem.process("wide").is_err());
    assert!(mem.dispatch_all().is_empty());
    assert_eq!(mem.free_units(), 4);
}

#[test]
fn test_inverted_pressure_thresholds_are_rejected() {
    let mut config = AllocatorConfig::with_units(16);
    config.warning_threshold = 0.95;
    config.critical_threshold = 0.80;
    assert!(matches!(
        MemoryManager::with_config(config),
        Err(MemoryError::InvalidThresholds(_))
    ));
}

#[test]
fn test_free_unknown_or_twice_is_not_found() {
    let mut mem = MemoryManager::new(8).unwrap();
    mem.declare("a", 3, Strategy::BestFit).unwrap();
    mem.dispatch_all();

    let freed = mem.free("a").unwrap();
    assert_eq!(freed.size, 3);
    let snapshot = mem.memory_snapshot().to_vec();

    assert_eq!(mem.free("a"), Err(MemoryError::NotFound("a".to_string())));
    assert_eq!(mem.free("ghost"), Err(MemoryError::NotFound("ghost".to_string())));
    assert_eq!(mem.memory_snapshot(), snapshot.as_slice());
    assert_eq!(mem.free_units(), 8);
}

#[test]
fn test_free_of_unplaced_process_is_not_found() {
    let mut mem = MemoryManager::new(8).unwrap();
    mem.declare("queued", 2, Strategy::FirstFit).unwrap();

    assert_eq!(
        mem.free("queued"),
        Err(MemoryError::NotFound("queued".to_string()))
    );
    // still registered and still queued
    assert!(mem.process("queued").is_ok());
    assert_eq!(mem.dispatch_all().len(), 1);
}

#[test]
fn test_owner_map_tracks_pids() {
    let mut mem = MemoryManager::new(5).unwrap();
    let a = mem.declare("a", 2, Strategy::FirstFit).unwrap();
    let b = mem.declare("b", 1, Strategy::FirstFit).unwrap();
    mem.dispatch_all();

    assert_eq!(
        mem.owner_map(),
        vec![Some(a), Some(a), Some(b), None, None]
    );
}
