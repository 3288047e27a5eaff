/*!
 * Memory State
 * Unit occupancy bitmap and free-run scanning
 */

use crate::core::types::{Offset, Size};

/// Maximal contiguous run of free units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreeRun {
    pub offset: Offset,
    pub len: Size,
}

/// Fixed-length array of allocation units (0 = free, 1 = used)
///
/// `free_count` always equals the number of zero units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryState {
    units: Vec<u8>,
    free_count: Size,
}

impl MemoryState {
    /// All-free state of `len` units
    pub fn new(len: Size) -> Self {
        Self {
            units: vec![0; len],
            free_count: len,
        }
    }

    /// State from explicit bits, any nonzero value counts as used
    pub fn from_bits(bits: &[u8]) -> Self {
        let units: Vec<u8> = bits.iter().map(|&b| u8::from(b != 0)).collect();
        let free_count = units.iter().filter(|&&b| b == 0).count();
        Self { units, free_count }
    }

    pub fn len(&self) -> Size {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn free_count(&self) -> Size {
        self.free_count
    }

    pub fn used_count(&self) -> Size {
        self.units.len() - self.free_count
    }

    pub fn is_free(&self, index: Offset) -> bool {
        self.units[index] == 0
    }

    pub fn bits(&self) -> &[u8] {
        &self.units
    }

    /// Mark `[offset, offset + size)` as used.
    ///
    /// The range must be entirely free; the caller owns that contract.
    pub fn mark(&mut self, offset: Offset, size: Size) {
        debug_assert!(
            self.units[offset..offset + size].iter().all(|&b| b == 0),
            "mark over used units at [{}, {})",
            offset,
            offset + size
        );
        self.units[offset..offset + size].fill(1);
        self.free_count -= size;
    }

    /// Return `[offset, offset + size)` to the free pool
    pub fn clear(&mut self, offset: Offset, size: Size) {
        debug_assert!(
            self.units[offset..offset + size].iter().all(|&b| b == 1),
            "clear over free units at [{}, {})",
            offset,
            offset + size
        );
        self.units[offset..offset + size].fill(0);
        self.free_count += size;
    }

    /// Maximal free runs, left to right
    pub fn free_runs(&self) -> FreeRuns<'_> {
        FreeRuns {
            units: &self.units,
            pos: 0,
        }
    }

    pub fn largest_free_run(&self) -> Size {
        self.free_runs().map(|run| run.len).max().unwrap_or(0)
    }
}

/// Iterator over maximal free runs
pub struct FreeRuns<'a> {
    units: &'a [u8],
    pos: Offset,
}

impl Iterator for FreeRuns<'_> {
    type Item = FreeRun;

    fn next(&mut self) -> Option<FreeRun> {
        while self.pos < self.units.len() && self.units[self.pos] != 0 {
            self.pos += 1;
        }
        if self.pos >= self.units.len() {
            return None;
        }

        let offset = self.pos;
        while self.pos < self.units.len() && self.units[self.pos] == 0 {
            self.pos += 1;
        }
        Some(FreeRun {
            offset,
            len: self.pos - offset,
        })
    }
}
