//! Engine capacities.

use crate::error::ConfigError;
use crate::memory::DEFAULT_MEMORY_SIZE;
use crate::stack::{DEFAULT_CALL_STACK_SIZE, DEFAULT_STACK_SIZE};

/// Largest capacity for any resource: one past the highest `i32` address.
pub const MAX_CAPACITY: usize = 1 << 31;

/// Reject a capacity outside `1..=MAX_CAPACITY`.
pub(crate) fn check_capacity(resource: &'static str, capacity: usize) -> Result<(), ConfigError> {
    if capacity == 0 {
        return Err(ConfigError::ZeroCapacity { resource });
    }
    if capacity > MAX_CAPACITY {
        return Err(ConfigError::TooLarge {
            resource,
            max: MAX_CAPACITY,
        });
    }
    Ok(())
}

/// Sizes of the engine's bounded resources. Each must be in
/// `1..=MAX_CAPACITY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VmConfig {
    /// Data memory cells.
    pub memory_size: usize,
    /// Data stack slots (used by PSH/POP).
    pub stack_size: usize,
    /// Call stack slots. Reserved; no instruction uses it yet.
    pub call_stack_size: usize,
}

impl Default for VmConfig {
    fn default() -> Self {
        Self {
            memory_size: DEFAULT_MEMORY_SIZE,
            stack_size: DEFAULT_STACK_SIZE,
            call_stack_size: DEFAULT_CALL_STACK_SIZE,
        }
    }
}

impl VmConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_capacity("memory", self.memory_size)?;
        check_capacity("stack", self.stack_size)?;
        check_capacity("call stack", self.call_stack_size)
    }
}
