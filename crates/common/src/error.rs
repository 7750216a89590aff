//! Decode errors for regvm program buffers.

use thiserror::Error;

/// Errors that occur while decoding one instruction from a program buffer.
///
/// Every variant carries `at`, the program-counter position of the opcode
/// being decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The word at `at` is not in the opcode table.
    #[error("unknown opcode {opcode} at position {at}")]
    UnknownOpcode { opcode: i32, at: usize },

    /// Fewer words remain in the buffer than the instruction's width.
    #[error("instruction at position {at} was unfinished")]
    UnfinishedInstruction { at: usize },

    /// A register operand lies outside `[0, MAX_REGISTERS)`.
    #[error("cannot find register with id {id} (instruction at position {at})")]
    InvalidRegister { id: i32, at: usize },
}

/// Errors from reading the binary program format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Byte stream length is not a multiple of 4.
    #[error("invalid byte stream length: {0} (must be multiple of 4)")]
    InvalidLength(usize),
}
