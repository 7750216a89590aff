//! Bounded linear data memory.

use crate::config::check_capacity;
use crate::error::{AddressError, ConfigError};

/// Default number of memory cells (64k).
pub const DEFAULT_MEMORY_SIZE: usize = 65536;

/// A fixed-size flat array of integer cells addressed `0..len`.
///
/// Addresses arrive as raw `i32` operands, so negative values are possible
/// and rejected alongside addresses past the end.
#[derive(Clone, PartialEq, Eq)]
pub struct Memory {
    cells: Vec<i32>,
}

impl Memory {
    /// Allocate `capacity` zeroed cells.
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        check_capacity("memory", capacity)?;
        Ok(Self {
            cells: vec![0; capacity],
        })
    }

    /// Number of addressable cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false; memory has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn read(&self, address: i32) -> Result<i32, AddressError> {
        let index = self.index(address)?;
        Ok(self.cells[index])
    }

    pub fn write(&mut self, address: i32, value: i32) -> Result<(), AddressError> {
        let index = self.index(address)?;
        self.cells[index] = value;
        Ok(())
    }

    fn index(&self, address: i32) -> Result<usize, AddressError> {
        usize::try_from(address)
            .ok()
            .filter(|&i| i < self.cells.len())
            .ok_or(AddressError {
                address,
                size: self.cells.len(),
            })
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self {
            cells: vec![0; DEFAULT_MEMORY_SIZE],
        }
    }
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Only show non-zero cells
        let nonzero: Vec<_> = self
            .cells
            .iter()
            .enumerate()
            .filter(|(_, v)| **v != 0)
            .collect();

        if nonzero.is_empty() {
            write!(f, "Memory{{{} cells, all zero}}", self.cells.len())
        } else {
            write!(f, "Memory{{")?;
            for (i, (addr, val)) in nonzero.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "[{addr}]={val}")?;
            }
            write!(f, "}}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_capacity_rejected() {
        assert_eq!(
            Memory::new(0),
            Err(ConfigError::ZeroCapacity { resource: "memory" })
        );
    }

    #[test]
    fn oversized_capacity_rejected_before_allocating() {
        assert_eq!(
            Memory::new(usize::MAX),
            Err(ConfigError::TooLarge {
                resource: "memory",
                max: crate::config::MAX_CAPACITY
            })
        );
    }

    #[test]
    fn starts_zeroed() {
        let mem = Memory::new(4).unwrap();
        for addr in 0..4 {
            assert_eq!(mem.read(addr), Ok(0));
        }
    }

    #[test]
    fn write_then_read() {
        let mut mem = Memory::new(16).unwrap();
        mem.write(0, 7).unwrap();
        mem.write(15, -3).unwrap();
        assert_eq!(mem.read(0), Ok(7));
        assert_eq!(mem.read(15), Ok(-3));
    }

    #[test]
    fn address_equal_to_size_is_illegal() {
        let mut mem = Memory::new(16).unwrap();
        let err = AddressError {
            address: 16,
            size: 16,
        };
        assert_eq!(mem.read(16), Err(err));
        assert_eq!(mem.write(16, 1), Err(err));
    }

    #[test]
    fn negative_address_is_illegal() {
        let mem = Memory::new(16).unwrap();
        assert_eq!(
            mem.read(-1),
            Err(AddressError {
                address: -1,
                size: 16
            })
        );
    }

    #[test]
    fn failed_write_changes_nothing() {
        let mut mem = Memory::new(2).unwrap();
        assert!(mem.write(2, 9).is_err());
        assert_eq!(mem, Memory::new(2).unwrap());
    }

    #[test]
    fn default_is_64k() {
        let mem = Memory::default();
        assert_eq!(mem.len(), DEFAULT_MEMORY_SIZE);
        assert_eq!(mem.read(65535), Ok(0));
        assert!(mem.read(65536).is_err());
    }

    #[test]
    fn debug_lists_nonzero_cells() {
        let mut mem = Memory::new(8).unwrap();
        assert_eq!(format!("{mem:?}"), "Memory{8 cells, all zero}");
        mem.write(3, 5).unwrap();
        assert_eq!(format!("{mem:?}"), "Memory{[3]=5}");
    }
}
