/*!
 * Memory Rendering
 * Text visualization of unit occupancy
 */

use super::MemoryManager;
use crate::core::limits::{FREE_GLYPH, USED_GLYPH};
use std::fmt::Write;

impl MemoryManager {
    /// Memory bar, one glyph per unit: `[▓▓░░]`
    pub fn render_bar(&self) -> String {
        let mut bar = String::with_capacity(self.state.len() * 3 + 2);
        bar.push('[');
        for &bit in self.state.bits() {
            bar.push(if bit == 0 { FREE_GLYPH } else { USED_GLYPH });
        }
        bar.push(']');
        bar
    }

    /// Memory bar followed by one legend line per placed process
    pub fn render(&self) -> String {
        let mut out = self.render_bar();

        let mut placed: Vec<_> = self.registry.placed().collect();
        placed.sort_by_key(|r| r.offset);
        for record in placed {
            if let Some(range) = record.range() {
                // Writing into a String cannot fail
                let _ = write!(
                    out,
                    "\n  {:>4} {:<16} [{}, {}) {} units, {}",
                    record.pid, record.name, range.start, range.end, record.size, record.strategy
                );
            }
        }
        out
    }
}
