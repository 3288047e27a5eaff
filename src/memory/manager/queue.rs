/*!
 * Allocation Request Queue
 * FIFO of declared processes awaiting placement
 */

use std::collections::VecDeque;

/// Pending placement requests, by process name
#[derive(Debug, Clone, Default)]
pub struct AllocationQueue {
    pending: VecDeque<String>,
}

impl AllocationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>) {
        self.pending.push_back(name.into());
    }

    /// Take every pending request, oldest first
    pub fn drain(&mut self) -> Vec<String> {
        self.pending.drain(..).collect()
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.pending.len();
        self.pending.retain(|pending| pending != name);
        self.pending.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.pending.iter().map(String::as_str)
    }
}
