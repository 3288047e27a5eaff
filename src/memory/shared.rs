/*!
 * Shared Memory Manager
 * Cloneable handle serializing access to one allocator
 */

use super::config::AllocatorConfig;
use super::manager::MemoryManager;
use super::traits::{MemoryInfo, ProcessAllocator};
use super::types::{DispatchReport, MemoryResult, MemoryStats, ProcessRecord, Strategy};
use crate::core::types::{Pid, Size};
use parking_lot::Mutex;
use std::sync::Arc;

/// Shared allocator handle
///
/// Every call locks the manager for its whole duration, so operations from
/// different threads never interleave.
#[derive(Debug, Clone)]
pub struct SharedMemoryManager {
    inner: Arc<Mutex<MemoryManager>>,
}

impl SharedMemoryManager {
    pub fn new(manager: MemoryManager) -> Self {
        Self {
            inner: Arc::new(Mutex::new(manager)),
        }
    }

    pub fn with_config(config: AllocatorConfig) -> MemoryResult<Self> {
        MemoryManager::with_config(config).map(Self::new)
    }

    /// Run `f` with exclusive access to the manager
    pub fn with<R>(&self, f: impl FnOnce(&mut MemoryManager) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Declare and immediately dispatch under one lock, returning the pass reports
    pub fn declare_and_dispatch(
        &self,
        name: &str,
        size: Size,
        strategy: Strategy,
    ) -> MemoryResult<Vec<DispatchReport>> {
        let mut manager = self.inner.lock();
        manager.declare(name, size, strategy)?;
        Ok(manager.dispatch_all())
    }

    pub fn cancel(&self, name: &str) -> MemoryResult<ProcessRecord> {
        self.inner.lock().cancel(name)
    }

    pub fn render(&self) -> String {
        self.inner.lock().render()
    }
}

impl ProcessAllocator for SharedMemoryManager {
    fn declare(&mut self, name: &str, size: Size, strategy: Strategy) -> MemoryResult<Pid> {
        self.inner.lock().declare(name, size, strategy)
    }

    fn dispatch_all(&mut self) -> Vec<DispatchReport> {
        self.inner.lock().dispatch_all()
    }

    fn free(&mut self, name: &str) -> MemoryResult<ProcessRecord> {
        self.inner.lock().free(name)
    }

    fn snapshot(&self) -> Vec<u8> {
        self.inner.lock().memory_snapshot().to_vec()
    }
}

impl MemoryInfo for SharedMemoryManager {
    fn stats(&self) -> MemoryStats {
        self.inner.lock().stats()
    }

    fn info(&self) -> (Size, Size, Size) {
        self.inner.lock().info()
    }
}
