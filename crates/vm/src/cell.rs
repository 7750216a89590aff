//! Storage cells: the unit of register and flag state.

/// A single mutable 32-bit signed integer.
///
/// Arithmetic wraps on overflow, matching two's-complement hardware.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cell(i32);

impl Cell {
    pub fn new(value: i32) -> Self {
        Self(value)
    }

    pub fn read(&self) -> i32 {
        self.0
    }

    pub fn write(&mut self, value: i32) {
        self.0 = value;
    }

    pub fn add(&mut self, value: i32) {
        self.0 = self.0.wrapping_add(value);
    }

    pub fn subtract(&mut self, value: i32) {
        self.0 = self.0.wrapping_sub(value);
    }

    pub fn multiply(&mut self, value: i32) {
        self.0 = self.0.wrapping_mul(value);
    }

    /// Divide in place, truncating toward zero.
    ///
    /// Returns `false` and leaves the cell unchanged when `value` is 0.
    /// `i32::MIN / -1` wraps to `i32::MIN`.
    pub fn divide(&mut self, value: i32) -> bool {
        if value == 0 {
            return false;
        }
        self.0 = self.0.wrapping_div(value);
        true
    }
}
