//! regvm common types and program encoding.
//!
//! This crate provides the instruction set shared by the engine, the
//! assembler and the CLI:
//!
//! - [`Opcode`]: the nine opcodes and their operand counts
//! - [`Register`]: general-purpose register names `A`..`H`
//! - [`Instruction`]: decoded instructions with typed operands
//! - [`Program`]: a flat buffer of `i32` words
//! - [`DecodeError`] / [`FormatError`]: decode and file-format errors
//!
//! # Dependencies
//!
//! This crate uses `thiserror` and has no other dependencies.

pub mod error;
pub mod instruction;
pub mod opcode;
pub mod program;
pub mod register;

// Re-export commonly used types at the crate root.
pub use error::{DecodeError, FormatError};
pub use instruction::Instruction;
pub use opcode::Opcode;
pub use program::Program;
pub use register::{Register, MAX_REGISTERS};
