/*!
 * Core Types
 * Common types used across the allocator
 */

/// Process ID type, assigned at declaration
pub type Pid = u32;

/// Offset of an allocation unit within the memory array
pub type Offset = usize;

/// Size type for memory operations, counted in allocation units
pub type Size = usize;
