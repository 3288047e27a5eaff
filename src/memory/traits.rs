/*!
 * Memory Traits
 * Allocator abstractions
 */

use super::types::*;
use crate::core::types::{Pid, Size};

/// Process placement interface
pub trait ProcessAllocator {
    /// Register a process and queue it for placement
    fn declare(&mut self, name: &str, size: Size, strategy: Strategy) -> MemoryResult<Pid>;

    /// Place every queued process, reporting outcomes in FIFO order
    fn dispatch_all(&mut self) -> Vec<DispatchReport>;

    /// Release a placed process
    fn free(&mut self, name: &str) -> MemoryResult<ProcessRecord>;

    /// Copy of unit occupancy, 1 = used
    fn snapshot(&self) -> Vec<u8>;
}

/// Memory statistics provider
pub trait MemoryInfo {
    /// Get overall memory statistics
    fn stats(&self) -> MemoryStats;

    /// Get memory info as (total, used, available)
    fn info(&self) -> (Size, Size, Size);

    /// Get memory pressure level
    fn pressure(&self) -> MemoryPressure {
        self.stats().pressure
    }
}
