/*!
 * Memory Statistics
 * Usage, fragmentation and pressure reporting
 */

use super::MemoryManager;
use crate::core::limits::MEDIUM_PRESSURE_THRESHOLD;
use crate::core::types::Size;
use crate::memory::types::{MemoryPressure, MemoryStats};
use log::warn;

impl MemoryManager {
    /// Get memory statistics
    pub fn stats(&self) -> MemoryStats {
        let total = self.state.len();
        let free = self.state.free_count();
        let used = total - free;

        let mut free_runs = 0;
        let mut largest_free_run = 0;
        for run in self.state.free_runs() {
            free_runs += 1;
            largest_free_run = largest_free_run.max(run.len);
        }

        let external_fragmentation = if free == 0 {
            0.0
        } else {
            1.0 - largest_free_run as f64 / free as f64
        };

        let placed_processes = self.registry.placed().count();

        MemoryStats {
            total_units: total,
            used_units: used,
            free_units: free,
            usage_percentage: used as f64 / total as f64 * 100.0,
            placed_processes,
            pending_processes: self.registry.count() - placed_processes,
            free_runs,
            largest_free_run,
            external_fragmentation,
            next_fit_cursor: self.last_fit,
            scans: self.scans,
            pressure: self.pressure_for(used),
        }
    }

    /// Get memory info as (total, used, available)
    pub fn info(&self) -> (Size, Size, Size) {
        let total = self.state.len();
        let free = self.state.free_count();
        (total, total - free, free)
    }

    pub fn pressure(&self) -> MemoryPressure {
        self.pressure_for(self.state.used_count())
    }

    fn pressure_for(&self, used: Size) -> MemoryPressure {
        let usage_ratio = used as f64 / self.state.len() as f64;

        if usage_ratio >= self.config.critical_threshold {
            MemoryPressure::Critical
        } else if usage_ratio >= self.config.warning_threshold {
            MemoryPressure::High
        } else if usage_ratio >= MEDIUM_PRESSURE_THRESHOLD {
            MemoryPressure::Medium
        } else {
            MemoryPressure::Low
        }
    }

    pub(super) fn warn_on_pressure(&self, name: &str) {
        let pressure = self.pressure();
        if pressure >= MemoryPressure::High {
            let (total, used, _) = self.info();
            warn!(
                "Memory pressure {} after placing {} ({:.1}% used: {} / {})",
                pressure,
                name,
                used as f64 / total as f64 * 100.0,
                used,
                total
            );
        }
    }
}
