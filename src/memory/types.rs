/*!
 * Memory Types
 * Common types for process placement
 */

use crate::core::types::{Offset, Pid, Size};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::str::FromStr;
use thiserror::Error;

/// Memory operation result
pub type MemoryResult<T> = Result<T, MemoryError>;

/// Memory errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum MemoryError {
    #[error("Process '{0}' is already registered")]
    #[diagnostic(
        code(memory::duplicate_name),
        help("Process names are unique. Free the existing process or pick another name.")
    )]
    DuplicateName(String),

    #[error("Process '{0}' not found")]
    #[diagnostic(
        code(memory::not_found),
        help("The process may have been freed, rejected, or never placed.")
    )]
    NotFound(String),

    #[error("Insufficient memory: requested {requested} units, only {available} free")]
    #[diagnostic(
        code(memory::insufficient_total),
        help("Free another process before retrying.")
    )]
    InsufficientTotalMemory { requested: Size, available: Size },

    #[error("No fit found: requested {requested} units, {available} free but largest run is {largest_run}")]
    #[diagnostic(
        code(memory::no_fit),
        help("Memory is fragmented. Free adjacent processes to open a longer run.")
    )]
    NoFitFound {
        requested: Size,
        available: Size,
        largest_run: Size,
    },

    #[error("Invalid process size: {0} (must be greater than zero)")]
    #[diagnostic(code(memory::invalid_size))]
    InvalidSize(Size),

    #[error("Invalid memory capacity: {0} (must be between 1 and {max})", max = crate::core::limits::MAX_MEMORY_UNITS)]
    #[diagnostic(code(memory::invalid_capacity))]
    InvalidCapacity(Size),

    #[error("Invalid pressure thresholds: {0}")]
    #[diagnostic(
        code(memory::invalid_thresholds),
        help("Thresholds are usage ratios with 0 < warning <= critical <= 1.")
    )]
    InvalidThresholds(String),

    #[error("Unknown allocation strategy: '{0}'")]
    #[diagnostic(
        code(memory::unknown_strategy),
        help("Use one of first-fit, next-fit, best-fit, quick-fit, worst-fit (or 1-5).")
    )]
    UnknownStrategy(String),
}

/// Placement algorithm carried on every process record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Leftmost run that fits
    FirstFit,
    /// First Fit resumed from the shared cursor, wrapping once
    NextFit,
    /// Smallest run that fits
    BestFit,
    /// Smallest run that fits, looked up through the size-class index
    QuickFit,
    /// Largest run that fits
    WorstFit,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::FirstFit,
        Strategy::NextFit,
        Strategy::BestFit,
        Strategy::QuickFit,
        Strategy::WorstFit,
    ];

    /// Human-readable strategy name
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::FirstFit => "First Fit",
            Strategy::NextFit => "Next Fit",
            Strategy::BestFit => "Best Fit",
            Strategy::QuickFit => "Quick Fit",
            Strategy::WorstFit => "Worst Fit",
        }
    }

    /// Whether a successful placement moves the shared Next Fit cursor
    pub fn advances_cursor(&self) -> bool {
        matches!(self, Strategy::FirstFit | Strategy::NextFit)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = MemoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "1" | "first-fit" | "first" | "ff" => Ok(Strategy::FirstFit),
            "2" | "next-fit" | "next" | "nf" => Ok(Strategy::NextFit),
            "3" | "best-fit" | "best" | "bf" => Ok(Strategy::BestFit),
            "4" | "quick-fit" | "quick" | "qf" => Ok(Strategy::QuickFit),
            "5" | "worst-fit" | "worst" | "wf" => Ok(Strategy::WorstFit),
            _ => Err(MemoryError::UnknownStrategy(s.to_string())),
        }
    }
}

/// Registered process awaiting or holding a placement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRecord {
    pub pid: Pid,
    pub name: String,
    pub size: Size,
    pub strategy: Strategy,
    /// Start offset, set once the process is placed
    pub offset: Option<Offset>,
}

impl ProcessRecord {
    pub fn new(pid: Pid, name: impl Into<String>, size: Size, strategy: Strategy) -> Self {
        Self {
            pid,
            name: name.into(),
            size,
            strategy,
            offset: None,
        }
    }

    pub fn is_placed(&self) -> bool {
        self.offset.is_some()
    }

    /// Owned unit range, if placed
    pub fn range(&self) -> Option<Range<Offset>> {
        self.offset.map(|offset| offset..offset + self.size)
    }
}

/// Why a dispatch did not place a process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RejectReason {
    /// Admission check: more units requested than are free in total
    InsufficientTotalMemory { requested: Size, available: Size },
    /// Enough units are free in total, but no single run is long enough
    NoFitFound {
        requested: Size,
        available: Size,
        largest_run: Size,
    },
}

impl From<RejectReason> for MemoryError {
    fn from(reason: RejectReason) -> Self {
        match reason {
            RejectReason::InsufficientTotalMemory {
                requested,
                available,
            } => MemoryError::InsufficientTotalMemory {
                requested,
                available,
            },
            RejectReason::NoFitFound {
                requested,
                available,
                largest_run,
            } => MemoryError::NoFitFound {
                requested,
                available,
                largest_run,
            },
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&MemoryError::from(*self), f)
    }
}

/// Result of dispatching one queued process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DispatchOutcome {
    /// Placed at `offset`
    Placed { offset: Offset },
    /// Dropped from the registry without occupying memory
    Rejected { reason: RejectReason },
    /// Left registered and re-queued for the next dispatch
    Deferred { reason: RejectReason },
}

impl DispatchOutcome {
    pub fn is_placed(&self) -> bool {
        matches!(self, DispatchOutcome::Placed { .. })
    }

    pub fn offset(&self) -> Option<Offset> {
        match self {
            DispatchOutcome::Placed { offset } => Some(*offset),
            _ => None,
        }
    }
}

/// One entry of a dispatch pass, reported in queue order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchReport {
    pub pid: Pid,
    pub name: String,
    pub size: Size,
    pub strategy: Strategy,
    pub outcome: DispatchOutcome,
}

impl fmt::Display for DispatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} units, {}): ",
            self.name, self.size, self.strategy
        )?;
        match self.outcome {
            DispatchOutcome::Placed { offset } => {
                write!(f, "placed at [{}, {})", offset, offset + self.size)
            }
            DispatchOutcome::Rejected { reason } => write!(f, "rejected, {}", reason),
            DispatchOutcome::Deferred { reason } => write!(f, "deferred, {}", reason),
        }
    }
}

/// Memory statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryStats {
    pub total_units: Size,
    pub used_units: Size,
    pub free_units: Size,
    pub usage_percentage: f64,
    pub placed_processes: usize,
    pub pending_processes: usize,
    pub free_runs: usize,
    pub largest_free_run: Size,
    /// `1 - largest_free_run / free_units`, zero when nothing is free
    pub external_fragmentation: f64,
    pub next_fit_cursor: Offset,
    /// Strategy scans invoked since creation
    pub scans: u64,
    pub pressure: MemoryPressure,
}

/// Memory pressure levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryPressure {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for MemoryPressure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MemoryPressure::Low => write!(f, "LOW"),
            MemoryPressure::Medium => write!(f, "MEDIUM"),
            MemoryPressure::High => write!(f, "HIGH"),
            MemoryPressure::Critical => write!(f, "CRITICAL"),
        }
    }
}
