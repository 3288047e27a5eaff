/*!
 * Memory Module
 * Process placement over a fixed unit array
 */

pub mod config;
pub mod manager;
pub mod shared;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use config::{AllocatorConfig, FragmentationPolicy};
pub use manager::{FreeBlockIndex, MemoryManager, MemoryState, ScanContext};
pub use shared::SharedMemoryManager;
pub use traits::*;
pub use types::*;
