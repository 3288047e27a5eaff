/*!
 * Process Registry
 * Name-keyed process records and their lifecycle
 */

use crate::core::types::{Offset, Pid, Size};
use crate::memory::types::{MemoryError, MemoryResult, ProcessRecord, Strategy};
use ahash::RandomState;
use std::collections::HashMap;

/// Registered processes keyed by unique name
#[derive(Debug, Clone)]
pub struct ProcessRegistry {
    records: HashMap<String, ProcessRecord, RandomState>,
    next_pid: Pid,
}

impl ProcessRegistry {
    pub fn new() -> Self {
        Self {
            records: HashMap::with_hasher(RandomState::new()),
            next_pid: 1,
        }
    }

    /// Register an unplaced record and return its pid
    pub fn register(&mut self, name: &str, size: Size, strategy: Strategy) -> MemoryResult<Pid> {
        if self.records.contains_key(name) {
            return Err(MemoryError::DuplicateName(name.to_string()));
        }

        let pid = self.next_pid;
        self.next_pid += 1;
        self.records
            .insert(name.to_string(), ProcessRecord::new(pid, name, size, strategy));
        Ok(pid)
    }

    pub fn get(&self, name: &str) -> Option<&ProcessRecord> {
        self.records.get(name)
    }

    /// Record the placement offset. A record is placed at most once.
    pub fn set_offset(&mut self, name: &str, offset: Offset) -> MemoryResult<()> {
        let record = self
            .records
            .get_mut(name)
            .ok_or_else(|| MemoryError::NotFound(name.to_string()))?;
        debug_assert!(record.offset.is_none(), "process '{}' placed twice", name);
        record.offset = Some(offset);
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Option<ProcessRecord> {
        self.records.remove(name)
    }

    /// Number of registered records, placed or not
    pub fn count(&self) -> usize {
        self.records.len()
    }

    /// Records holding memory
    pub fn placed(&self) -> impl Iterator<Item = &ProcessRecord> {
        self.records.values().filter(|r| r.is_placed())
    }

    /// All records in declaration order
    pub fn sorted_by_pid(&self) -> Vec<&ProcessRecord> {
        let mut records: Vec<_> = self.records.values().collect();
        records.sort_by_key(|r| r.pid);
        records
    }
}

impl Default for ProcessRegistry {
    fn default() -> Self {
        Self::new()
    }
}
