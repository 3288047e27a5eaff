/*!
 * Memory Management
 *
 * Single-address-space allocator placing named processes into a fixed
 * array of allocation units.
 *
 * ## Lifecycle
 *
 * - **Declare**: a process enters the registry and the request queue unplaced
 * - **Dispatch**: the queue is drained in FIFO order; each request passes a
 *   global admission check (size <= free units) and then its strategy scan
 * - **Free**: a placed process returns its range and leaves the registry
 *
 * ## Strategies
 *
 * First Fit, Next Fit, Best Fit, Quick Fit and Worst Fit are plain functions
 * selected by the `Strategy` tag on each record. Next Fit resumes from a
 * cursor owned by the manager instance, so separate managers never share
 * scan state. Quick Fit rebuilds its size-class index from memory on every
 * query.
 */

mod allocator;
mod free_list;
mod queue;
mod registry;
mod render;
mod state;
mod stats;
mod strategy;

pub use free_list::FreeBlockIndex;
pub use queue::AllocationQueue;
pub use registry::ProcessRegistry;
pub use state::{FreeRun, FreeRuns, MemoryState};
pub use strategy::{
    best_fit, first_fit, next_fit, quick_fit, worst_fit, PlacementFn, ScanContext,
};

use super::config::AllocatorConfig;
use super::traits::{MemoryInfo, ProcessAllocator};
use super::types::{
    DispatchReport, MemoryError, MemoryResult, MemoryStats, ProcessRecord, Strategy,
};
use crate::core::types::{Offset, Pid, Size};
use log::info;

/// Memory manager
///
/// Owns the unit array, the process registry, the request queue and the
/// Next Fit cursor. All operations run to completion; wrap it in
/// [`SharedMemoryManager`](crate::memory::SharedMemoryManager) to share it.
#[derive(Debug, Clone)]
pub struct MemoryManager {
    pub(super) state: MemoryState,
    pub(super) registry: ProcessRegistry,
    pub(super) queue: AllocationQueue,
    // End offset of the last First/Next Fit placement
    pub(super) last_fit: Offset,
    // Strategy scans invoked, admission rejections never scan
    pub(super) scans: u64,
    pub(super) config: AllocatorConfig,
}

impl MemoryManager {
    /// Create a manager with `total_units` units and default settings
    pub fn new(total_units: Size) -> MemoryResult<Self> {
        Self::with_config(AllocatorConfig::with_units(total_units))
    }

    pub fn with_config(config: AllocatorConfig) -> MemoryResult<Self> {
        config.validate()?;
        info!(
            "Memory manager initialized with {} units (fragmentation policy: {})",
            config.total_units, config.fragmentation_policy
        );
        Ok(Self {
            state: MemoryState::new(config.total_units),
            registry: ProcessRegistry::new(),
            queue: AllocationQueue::new(),
            last_fit: 0,
            scans: 0,
            config,
        })
    }

    pub fn config(&self) -> &AllocatorConfig {
        &self.config
    }

    pub fn state(&self) -> &MemoryState {
        &self.state
    }

    pub fn total_units(&self) -> Size {
        self.state.len()
    }

    pub fn free_units(&self) -> Size {
        self.state.free_count()
    }

    /// Unit occupancy, 1 = used
    pub fn memory_snapshot(&self) -> &[u8] {
        self.state.bits()
    }

    pub fn next_fit_cursor(&self) -> Offset {
        self.last_fit
    }

    /// Strategy scans invoked since creation
    pub fn scan_count(&self) -> u64 {
        self.scans
    }

    /// Look up a registered process
    pub fn process(&self, name: &str) -> MemoryResult<&ProcessRecord> {
        self.registry
            .get(name)
            .ok_or_else(|| MemoryError::NotFound(name.to_string()))
    }

    /// Registered processes in declaration order
    pub fn processes(&self) -> Vec<&ProcessRecord> {
        self.registry.sorted_by_pid()
    }

    /// Names waiting for the next dispatch, oldest first
    pub fn pending(&self) -> impl Iterator<Item = &str> {
        self.queue.iter()
    }

    /// Owning pid of every unit
    pub fn owner_map(&self) -> Vec<Option<Pid>> {
        let mut owners = vec![None; self.state.len()];
        for record in self.registry.placed() {
            if let Some(range) = record.range() {
                owners[range].fill(Some(record.pid));
            }
        }
        owners
    }
}

// Implement trait interfaces
impl ProcessAllocator for MemoryManager {
    fn declare(&mut self, name: &str, size: Size, strategy: Strategy) -> MemoryResult<Pid> {
        MemoryManager::declare(self, name, size, strategy)
    }

    fn dispatch_all(&mut self) -> Vec<DispatchReport> {
        MemoryManager::dispatch_all(self)
    }

    fn free(&mut self, name: &str) -> MemoryResult<ProcessRecord> {
        MemoryManager::free(self, name)
    }

    fn snapshot(&self) -> Vec<u8> {
        self.memory_snapshot().to_vec()
    }
}

impl MemoryInfo for MemoryManager {
    fn stats(&self) -> MemoryStats {
        MemoryManager::stats(self)
    }

    fn info(&self) -> (Size, Size, Size) {
        MemoryManager::info(self)
    }
}
