/*!
 * Free Block Index
 * Size-classed view of free runs used by Quick Fit
 */

use super::state::MemoryState;
use crate::core::types::{Offset, Size};
use std::collections::{BTreeMap, VecDeque};

/// Free runs keyed by exact length
///
/// Each size class keeps its start offsets in scan order. The index is a
/// snapshot: it is rebuilt from `MemoryState` for every query and never
/// maintained across placements or frees.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FreeBlockIndex {
    classes: BTreeMap<Size, VecDeque<Offset>>,
}

impl FreeBlockIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index with one left-to-right scan of `state`
    pub fn build(state: &MemoryState) -> Self {
        let mut index = Self::new();
        for run in state.free_runs() {
            index.insert(run.len, run.offset);
        }
        index
    }

    pub fn insert(&mut self, len: Size, offset: Offset) {
        self.classes.entry(len).or_default().push_back(offset);
    }

    /// Take the first offset of the smallest class at least `size` long.
    ///
    /// Classes are visited in ascending length, offsets within a class in
    /// insertion order. A class emptied by the take is dropped.
    pub fn take_smallest_fit(&mut self, size: Size) -> Option<(Size, Offset)> {
        let (&len, offsets) = self
            .classes
            .range_mut(size..)
            .find(|(_, offsets)| !offsets.is_empty())?;
        let offset = offsets.pop_front()?;
        if offsets.is_empty() {
            self.classes.remove(&len);
        }
        Some((len, offset))
    }

    /// Offsets recorded for one exact length
    pub fn offsets(&self, len: Size) -> impl Iterator<Item = Offset> + '_ {
        self.classes.get(&len).into_iter().flatten().copied()
    }

    /// Distinct run lengths, ascending
    pub fn sizes(&self) -> impl Iterator<Item = Size> + '_ {
        self.classes.keys().copied()
    }

    /// Number of recorded runs across all classes
    pub fn len(&self) -> usize {
        self.classes.values().map(|v| v.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
