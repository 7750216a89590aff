//! Error types for the regvm assembler.

use thiserror::Error;

/// Errors produced while assembling text into a program buffer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
    /// An unrecognized opcode mnemonic was encountered.
    #[error("line {line}: unknown opcode '{token}'")]
    UnknownOpcode { line: usize, token: String },

    /// An opcode did not have enough arguments.
    #[error("line {line}: {opcode} expects {expected} argument(s)")]
    MissingArgument {
        line: usize,
        opcode: &'static str,
        expected: usize,
    },

    /// A numeric literal could not be parsed or does not fit in 32 bits.
    #[error("line {line}: invalid number '{token}'")]
    InvalidNumber { line: usize, token: String },

    /// A register operand is not `A`..`H` or `0`..`7`.
    #[error("line {line}: invalid register '{token}'")]
    InvalidRegister { line: usize, token: String },

    /// A token appeared where it was not expected.
    #[error("line {line}: unexpected token '{token}'")]
    UnexpectedToken { line: usize, token: String },
}
