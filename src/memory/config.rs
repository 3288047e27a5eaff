/*!
 * Allocator Configuration
 *
 * Unit count, fragmentation policy, and pressure thresholds.
 */

use super::types::{MemoryError, MemoryResult};
use crate::core::limits::*;
use crate::core::types::Size;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What happens to a process whose strategy finds no run long enough
/// even though enough units are free in total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FragmentationPolicy {
    /// Drop the record from the registry, as admission failures are
    #[default]
    Reject,
    /// Keep the record registered and re-queue it for the next dispatch
    KeepPending,
}

impl fmt::Display for FragmentationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FragmentationPolicy::Reject => f.write_str("reject"),
            FragmentationPolicy::KeepPending => f.write_str("keep-pending"),
        }
    }
}

impl FromStr for FragmentationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "reject" => Ok(FragmentationPolicy::Reject),
            "keep-pending" | "pending" | "keep" => Ok(FragmentationPolicy::KeepPending),
            other => Err(format!("unknown fragmentation policy '{}'", other)),
        }
    }
}

/// Allocator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocatorConfig {
    /// Number of allocation units, fixed for the lifetime of the manager
    pub total_units: Size,

    /// Policy for strategy failures caused by fragmentation
    pub fragmentation_policy: FragmentationPolicy,

    /// Usage ratio reported as high pressure (default: 0.80)
    pub warning_threshold: f64,

    /// Usage ratio reported as critical pressure (default: 0.95)
    pub critical_threshold: f64,
}

impl AllocatorConfig {
    /// Create default configuration
    pub fn new() -> Self {
        Self {
            total_units: DEFAULT_MEMORY_UNITS,
            fragmentation_policy: FragmentationPolicy::Reject,
            warning_threshold: WARNING_PRESSURE_THRESHOLD,
            critical_threshold: CRITICAL_PRESSURE_THRESHOLD,
        }
    }

    /// Default configuration with a custom unit count
    pub fn with_units(total_units: Size) -> Self {
        Self {
            total_units,
            ..Self::new()
        }
    }

    pub fn with_fragmentation_policy(mut self, policy: FragmentationPolicy) -> Self {
        self.fragmentation_policy = policy;
        self
    }

    /// Build configuration from the environment
    ///
    /// Environment variables:
    /// - VULCAN_MEMORY_UNITS: total unit count (default: 64)
    /// - VULCAN_FRAGMENTATION_POLICY: `reject` or `keep-pending` (default: reject)
    ///
    /// Unparseable values fall back to the defaults with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::new();

        if let Some(raw) = lookup(ENV_MEMORY_UNITS) {
            match raw.trim().parse::<Size>() {
                Ok(units) => config.total_units = units,
                Err(e) => warn!("Ignoring {}={:?}: {}", ENV_MEMORY_UNITS, raw, e),
            }
        }

        if let Some(raw) = lookup(ENV_FRAGMENTATION_POLICY) {
            match raw.parse::<FragmentationPolicy>() {
                Ok(policy) => config.fragmentation_policy = policy,
                Err(e) => warn!("Ignoring {}: {}", ENV_FRAGMENTATION_POLICY, e),
            }
        }

        config
    }

    /// Check the unit count and pressure thresholds are usable
    pub fn validate(&self) -> MemoryResult<()> {
        if self.total_units == 0 || self.total_units > MAX_MEMORY_UNITS {
            return Err(MemoryError::InvalidCapacity(self.total_units));
        }

        let ratio = |t: f64| t.is_finite() && t > 0.0 && t <= 1.0;
        if !ratio(self.warning_threshold) || !ratio(self.critical_threshold) {
            return Err(MemoryError::InvalidThresholds(format!(
                "warning {} and critical {} must be ratios in (0, 1]",
                self.warning_threshold, self.critical_threshold
            )));
        }
        if self.warning_threshold > self.critical_threshold {
            return Err(MemoryError::InvalidThresholds(format!(
                "warning {} exceeds critical {}",
                self.warning_threshold, self.critical_threshold
            )));
        }
        Ok(())
    }
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self::new()
    }
}
