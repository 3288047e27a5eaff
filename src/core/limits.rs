/*!
 * System Limits and Constants
 *
 * Centralized location for allocator defaults and thresholds.
 */

// =============================================================================
// MEMORY LIMITS
// =============================================================================

/// Default number of allocation units when none is configured
pub const DEFAULT_MEMORY_UNITS: usize = 64;

/// Upper bound accepted from configuration
/// Every strategy scan is linear in the unit count
pub const MAX_MEMORY_UNITS: usize = 1 << 24;

// =============================================================================
// MEMORY PRESSURE
// =============================================================================

/// Usage ratio at which pressure is reported as medium
pub const MEDIUM_PRESSURE_THRESHOLD: f64 = 0.60;

/// Usage ratio at which pressure is reported as high
pub const WARNING_PRESSURE_THRESHOLD: f64 = 0.80;

/// Usage ratio at which pressure is reported as critical
pub const CRITICAL_PRESSURE_THRESHOLD: f64 = 0.95;

// =============================================================================
// RENDERING
// =============================================================================

/// Glyph for a used unit in the memory bar
pub const USED_GLYPH: char = '\u{2593}';

/// Glyph for a free unit in the memory bar
pub const FREE_GLYPH: char = '\u{2591}';

// =============================================================================
// ENVIRONMENT
// =============================================================================

/// Total unit count override
pub const ENV_MEMORY_UNITS: &str = "VULCAN_MEMORY_UNITS";

/// Fragmentation policy override (`reject` | `keep-pending`)
pub const ENV_FRAGMENTATION_POLICY: &str = "VULCAN_FRAGMENTATION_POLICY";

/// Enables JSON log output when set to `1` or `true`
pub const ENV_TRACE_JSON: &str = "VULCAN_TRACE_JSON";
