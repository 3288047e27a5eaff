/*!
 * Placement Strategies
 *
 * Five pure placement functions over a `MemoryState`. None of them mutate
 * memory: each returns the start offset of a free run at least `size`
 * units long, or `None`. The caller marks the range and updates any
 * strategy bookkeeping (the Next Fit cursor) once it accepts the offset.
 *
 * Quick Fit selects the same offset as Best Fit (smallest qualifying run,
 * leftmost among equals), but resolves it through a size-classed
 * `FreeBlockIndex` rebuilt per query rather than a single scan.
 */

use super::free_list::FreeBlockIndex;
use super::state::MemoryState;
use crate::core::types::{Offset, Size};
use crate::memory::types::Strategy;

/// Inputs shared by every placement function
#[derive(Debug, Clone, Copy)]
pub struct ScanContext<'a> {
    pub state: &'a MemoryState,
    /// End offset of the last First/Next Fit placement
    pub cursor: Offset,
}

impl<'a> ScanContext<'a> {
    pub fn new(state: &'a MemoryState, cursor: Offset) -> Self {
        Self { state, cursor }
    }
}

/// Placement function signature, one per strategy tag
pub type PlacementFn = fn(&ScanContext<'_>, Size) -> Option<Offset>;

impl Strategy {
    /// Placement function for this tag
    pub fn placement_fn(&self) -> PlacementFn {
        match self {
            Strategy::FirstFit => first_fit,
            Strategy::NextFit => next_fit,
            Strategy::BestFit => best_fit,
            Strategy::QuickFit => quick_fit,
            Strategy::WorstFit => worst_fit,
        }
    }

    /// Find a start offset for `size` units
    pub fn find(&self, ctx: &ScanContext<'_>, size: Size) -> Option<Offset> {
        if size == 0 {
            return None;
        }
        (self.placement_fn())(ctx, size)
    }
}

/// Scan `[from, to)` for the first `size` consecutive free units.
///
/// A run is only counted within the window; it does not continue past `to`.
fn scan_window(state: &MemoryState, from: Offset, to: Offset, size: Size) -> Option<Offset> {
    let mut start = from;
    for current in from..to {
        if !state.is_free(current) {
            start = current + 1;
        } else if current + 1 - start == size {
            return Some(start);
        }
    }
    None
}

/// Leftmost free run whose prefix fits `size`
pub fn first_fit(ctx: &ScanContext<'_>, size: Size) -> Option<Offset> {
    scan_window(ctx.state, 0, ctx.state.len(), size)
}

/// First Fit starting at the cursor, wrapping to offset 0 once.
///
/// The run being accumulated is reset at the wrap, so a run never spans
/// the end of memory.
pub fn next_fit(ctx: &ScanContext<'_>, size: Size) -> Option<Offset> {
    let len = ctx.state.len();
    let cursor = ctx.cursor.min(len);
    scan_window(ctx.state, cursor, len, size).or_else(|| scan_window(ctx.state, 0, len, size))
}

/// Smallest free run that fits, leftmost among equal lengths
pub fn best_fit(ctx: &ScanContext<'_>, size: Size) -> Option<Offset> {
    let mut best: Option<(Size, Offset)> = None;
    for run in ctx.state.free_runs() {
        if run.len < size {
            continue;
        }
        match best {
            Some((best_len, _)) if run.len >= best_len => {}
            _ => best = Some((run.len, run.offset)),
        }
    }
    best.map(|(_, offset)| offset)
}

/// Smallest free run that fits, via the size-class index
pub fn quick_fit(ctx: &ScanContext<'_>, size: Size) -> Option<Offset> {
    let mut index = FreeBlockIndex::build(ctx.state);
    index.take_smallest_fit(size).map(|(_, offset)| offset)
}

/// Largest free run that fits, leftmost among equal lengths
pub fn worst_fit(ctx: &ScanContext<'_>, size: Size) -> Option<Offset> {
    let mut worst: Option<(Size, Offset)> = None;
    for run in ctx.state.free_runs() {
        if run.len < size {
            continue;
        }
        match worst {
            Some((worst_len, _)) if run.len <= worst_len => {}
            _ => worst = Some((run.len, run.offset)),
        }
    }
    worst.map(|(_, offset)| offset)
}
