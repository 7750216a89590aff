//! Runtime and configuration errors for the regvm engine.
//!
//! Every runtime error is terminal: the run stops at the instruction where
//! the fault was detected and state written by earlier instructions stays
//! in place. Each variant includes the program-counter position (`at`) of
//! the faulting instruction.

use regvm_common::DecodeError;
use thiserror::Error;

/// Errors that abort a run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Memory access outside `[0, size)`.
    #[error(
        "illegal address {address} at instruction {at}, address must be between 0 and memory size ({size})"
    )]
    IllegalAddress { at: usize, address: i32, size: usize },

    /// Register operand outside the register bank.
    #[error("cannot find register with id {id} at instruction {at}")]
    InvalidRegister { at: usize, id: i32 },

    /// Fewer operand words remain than the decoded instruction needs.
    #[error("instruction at {at} was unfinished")]
    UnfinishedInstruction { at: usize },

    /// Opcode word not in the instruction table.
    #[error("unknown opcode {opcode} at instruction {at}")]
    UnknownOpcode { at: usize, opcode: i32 },
}

impl RuntimeError {
    /// Short name of the error kind, e.g. `"illegal memory address"`.
    pub fn kind(&self) -> &'static str {
        match self {
            RuntimeError::IllegalAddress { .. } => "illegal memory address",
            RuntimeError::InvalidRegister { .. } => "invalid register",
            RuntimeError::UnfinishedInstruction { .. } => "unfinished instruction",
            RuntimeError::UnknownOpcode { .. } => "unknown opcode",
        }
    }

    /// Program-counter position of the faulting instruction.
    pub fn at(&self) -> usize {
        match *self {
            RuntimeError::IllegalAddress { at, .. }
            | RuntimeError::InvalidRegister { at, .. }
            | RuntimeError::UnfinishedInstruction { at }
            | RuntimeError::UnknownOpcode { at, .. } => at,
        }
    }
}

impl From<DecodeError> for RuntimeError {
    fn from(e: DecodeError) -> Self {
        match e {
            DecodeError::UnknownOpcode { opcode, at } => RuntimeError::UnknownOpcode { at, opcode },
            DecodeError::UnfinishedInstruction { at } => RuntimeError::UnfinishedInstruction { at },
            DecodeError::InvalidRegister { id, at } => RuntimeError::InvalidRegister { at, id },
        }
    }
}

/// A memory access outside the addressable range.
///
/// Raised by [`crate::Memory`], which does not know the program counter; the
/// engine turns it into [`RuntimeError::IllegalAddress`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("illegal address {address}, address must be between 0 and memory size ({size})")]
pub struct AddressError {
    pub address: i32,
    pub size: usize,
}

impl AddressError {
    pub(crate) fn at(self, at: usize) -> RuntimeError {
        RuntimeError::IllegalAddress {
            at,
            address: self.address,
            size: self.size,
        }
    }
}

/// Invalid engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Memory, stack and call stack all need at least one cell.
    #[error("{resource} capacity must be at least 1")]
    ZeroCapacity { resource: &'static str },

    /// Capacity beyond what an `i32` operand can address.
    #[error("{resource} capacity must be at most {max}")]
    TooLarge { resource: &'static str, max: usize },
}
