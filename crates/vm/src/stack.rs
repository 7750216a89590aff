//! Bounded circular stack.

use crate::config::check_capacity;
use crate::error::ConfigError;

/// Default data stack capacity.
pub const DEFAULT_STACK_SIZE: usize = 128;

/// Default call stack capacity.
pub const DEFAULT_CALL_STACK_SIZE: usize = 64;

/// A fixed-capacity ring of integer slots with a single pointer.
///
/// There is no occupancy tracking: push and pop never fail, the pointer
/// wraps instead. Popping more than was pushed reads stale or never-written
/// slots.
///
/// The push wrap threshold is `capacity - 1`, so a pointer that reaches the
/// last slot resets to 0 before anything is written there. Only a pop from
/// slot 0 moves the pointer onto the last slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircularStack {
    slots: Vec<i32>,
    pointer: usize,
}

impl CircularStack {
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        check_capacity("stack", capacity)?;
        Ok(Self::zeroed(capacity))
    }

    /// Callers guarantee `capacity >= 1`.
    pub(crate) fn zeroed(capacity: usize) -> Self {
        Self {
            slots: vec![0; capacity],
            pointer: 0,
        }
    }

    /// Write `value` at the pointer, then advance it.
    pub fn push(&mut self, value: i32) {
        self.slots[self.pointer] = value;
        self.pointer += 1;
        if self.pointer >= self.slots.len() - 1 {
            self.pointer = 0;
        }
    }

    /// Retreat the pointer, then read the slot it lands on.
    pub fn pop(&mut self) -> i32 {
        self.pointer = match self.pointer {
            0 => self.slots.len() - 1,
            p => p - 1,
        };
        self.slots[self.pointer]
    }

    /// Index of the next slot `push` will write.
    pub fn pointer(&self) -> usize {
        self.pointer
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Raw slot contents, regardless of the pointer.
    pub fn slot(&self, index: usize) -> Option<i32> {
        self.slots.get(index).copied()
    }
}

impl Default for CircularStack {
    fn default() -> Self {
        Self::zeroed(DEFAULT_STACK_SIZE)
    }
}
