//! Disassembler: program buffer → canonical assembly text.
//!
//! Output format is flat text, one instruction per line, registers by
//! name and numbers in decimal. No indentation, no comments, no blank lines.

use std::fmt::Write;

use regvm_common::{DecodeError, Program};

/// Disassemble a program into canonical assembly text.
///
/// Stops at the first word sequence that does not decode.
pub fn disassemble(program: &Program) -> Result<String, DecodeError> {
    let mut text = String::new();
    for item in program.instructions() {
        let (_, instr) = item?;
        // Writing to a String cannot fail.
        let _ = writeln!(text, "{instr}");
    }
    Ok(text)
}

/// Disassemble with each line prefixed by the instruction's word position.
pub fn listing(program: &Program) -> Result<String, DecodeError> {
    let mut text = String::new();
    for item in program.instructions() {
        let (at, instr) = item?;
        let _ = writeln!(text, "{at:04}: {instr}");
    }
    Ok(text)
}
