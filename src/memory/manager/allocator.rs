/*!
 * Memory Allocator Implementation
 * Declaration, dispatch and free logic
 */

use super::strategy::ScanContext;
use super::MemoryManager;
use crate::core::types::{Offset, Pid, Size};
use crate::memory::config::FragmentationPolicy;
use crate::memory::types::{
    DispatchOutcome, DispatchReport, MemoryError, MemoryResult, ProcessRecord, RejectReason,
    Strategy,
};
use log::{debug, info, warn};

impl MemoryManager {
    /// Register a process and queue it for the next dispatch
    pub fn declare(&mut self, name: &str, size: Size, strategy: Strategy) -> MemoryResult<Pid> {
        if size == 0 {
            return Err(MemoryError::InvalidSize(size));
        }

        let pid = self.registry.register(name, size, strategy)?;
        self.queue.push(name);
        debug!(
            "Declared process '{}' (PID {}) requesting {} units with {}",
            name, pid, size, strategy
        );
        Ok(pid)
    }

    /// Drain the request queue, placing each process in FIFO order.
    ///
    /// Reports are returned in queue order. Requests larger than the free
    /// total are rejected before any scan. Strategy failures follow the
    /// configured [`FragmentationPolicy`]: rejected, or kept registered and
    /// re-queued behind everything dispatched in this pass.
    pub fn dispatch_all(&mut self) -> Vec<DispatchReport> {
        let pending = self.queue.drain();
        let mut reports = Vec::with_capacity(pending.len());
        let mut deferred = Vec::new();

        for name in pending {
            let Some(record) = self.registry.get(&name) else {
                warn!("Queued process '{}' is no longer registered, skipping", name);
                continue;
            };
            let (pid, size, strategy) = (record.pid, record.size, record.strategy);

            info!(
                "Now trying to allocate {} units for {} using {}",
                size, name, strategy
            );
            let outcome = match self.dispatch_one(&name, size, strategy) {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!("Dropping request for {}: {}", name, e);
                    continue;
                }
            };

            match outcome {
                DispatchOutcome::Placed { offset } => {
                    info!(
                        "Placed {} at [{}, {}) ({} units remaining)",
                        name,
                        offset,
                        offset + size,
                        self.state.free_count()
                    );
                    self.warn_on_pressure(&name);
                }
                DispatchOutcome::Rejected { reason } => {
                    warn!("No memory available for {}: {}", name, reason);
                }
                DispatchOutcome::Deferred { reason } => {
                    warn!("Deferring {}: {}", name, reason);
                    deferred.push(name.clone());
                }
            }

            reports.push(DispatchReport {
                pid,
                name,
                size,
                strategy,
                outcome,
            });
        }

        for name in deferred {
            self.queue.push(name);
        }

        reports
    }

    fn dispatch_one(
        &mut self,
        name: &str,
        size: Size,
        strategy: Strategy,
    ) -> MemoryResult<DispatchOutcome> {
        let available = self.state.free_count();
        if size > available {
            self.registry.remove(name);
            return Ok(DispatchOutcome::Rejected {
                reason: RejectReason::InsufficientTotalMemory {
                    requested: size,
                    available,
                },
            });
        }

        let outcome = match self.find_placement(size, strategy) {
            Some(offset) => {
                self.place(name, offset, size, strategy)?;
                DispatchOutcome::Placed { offset }
            }
            None => {
                let reason = RejectReason::NoFitFound {
                    requested: size,
                    available,
                    largest_run: self.state.largest_free_run(),
                };
                match self.config.fragmentation_policy {
                    FragmentationPolicy::Reject => {
                        self.registry.remove(name);
                        DispatchOutcome::Rejected { reason }
                    }
                    FragmentationPolicy::KeepPending => DispatchOutcome::Deferred { reason },
                }
            }
        };
        Ok(outcome)
    }

    fn find_placement(&mut self, size: Size, strategy: Strategy) -> Option<Offset> {
        self.scans += 1;
        let ctx = ScanContext::new(&self.state, self.last_fit);
        let offset = strategy.find(&ctx, size);
        debug!(
            "{} scan for {} units (cursor {}) -> {:?}",
            strategy, size, self.last_fit, offset
        );
        offset
    }

    /// Claim `[offset, offset + size)` for `name`. The record is updated
    /// first so a failure leaves memory and the cursor untouched.
    fn place(
        &mut self,
        name: &str,
        offset: Offset,
        size: Size,
        strategy: Strategy,
    ) -> MemoryResult<()> {
        self.registry.set_offset(name, offset)?;
        self.state.mark(offset, size);
        if strategy.advances_cursor() {
            self.last_fit = offset + size;
        }
        Ok(())
    }

    /// Free a placed process and return its record
    pub fn free(&mut self, name: &str) -> MemoryResult<ProcessRecord> {
        let range = self
            .registry
            .get(name)
            .and_then(ProcessRecord::range)
            .ok_or_else(|| {
                warn!("Attempted to free unknown or unplaced process '{}'", name);
                MemoryError::NotFound(name.to_string())
            })?;

        let record = self
            .registry
            .remove(name)
            .ok_or_else(|| MemoryError::NotFound(name.to_string()))?;
        self.state.clear(range.start, record.size);

        info!(
            "Freed {} units at [{}, {}) from {} ({} units now available)",
            record.size,
            range.start,
            range.end,
            name,
            self.state.free_count()
        );
        Ok(record)
    }

    /// Withdraw a declared process that has not been placed yet
    pub fn cancel(&mut self, name: &str) -> MemoryResult<ProcessRecord> {
        match self.registry.get(name) {
            Some(record) if !record.is_placed() => {}
            _ => return Err(MemoryError::NotFound(name.to_string())),
        }

        self.queue.remove(name);
        let record = self
            .registry
            .remove(name)
            .ok_or_else(|| MemoryError::NotFound(name.to_string()))?;
        info!("Cancelled pending process '{}'", name);
        Ok(record)
    }
}
