/*!
 * Vulcan Kernel Library
 * Contiguous memory placement for named processes
 */

pub mod core;
pub mod memory;
pub mod monitoring;
pub mod shell;

// Re-exports
pub use memory::{
    AllocatorConfig, DispatchOutcome, DispatchReport, FragmentationPolicy, MemoryError,
    MemoryInfo, MemoryManager, MemoryResult, MemoryStats, ProcessAllocator, ProcessRecord,
    RejectReason, SharedMemoryManager, Strategy,
};
pub use monitoring::init_tracing;
pub use shell::Shell;
