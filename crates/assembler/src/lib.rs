//! regvm assembler: bidirectional text ↔ program buffer translation.
//!
//! The assembler is a mechanical 1:1 translation. No labels, no macros.
//!
//! # Usage
//!
//! ```
//! use regvm_assembler::{assemble, disassemble};
//!
//! let text = "LDI A 291\nOUT A\nHLT\n";
//! let program = assemble(text).unwrap();
//! assert_eq!(program.words(), &[4, 0, 291, 0, 0, 1]);
//! assert_eq!(disassemble(&program).unwrap(), text);
//! ```
//!
//! # Roundtrip Guarantee
//!
//! `assemble(disassemble(program)) == program` holds for every program that
//! decodes. The disassembler outputs canonical text; the assembler also
//! accepts hex literals, register indices, lowercase and commas.

pub mod error;

mod disassembler;
mod lexer;
mod parser;

pub use disassembler::{disassemble, listing};
pub use error::AsmError;

use lexer::tokenize_line;
use parser::parse_line;
use regvm_common::Program;

/// Assemble text into a program buffer.
///
/// Returns the first error encountered.
pub fn assemble(text: &str) -> Result<Program, AsmError> {
    let mut instructions = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line_num = idx + 1;
        let tokens = tokenize_line(line, line_num)?;
        if let Some(instr) = parse_line(&tokens, line_num)? {
            instructions.push(instr);
        }
    }

    Ok(Program::from_instructions(&instructions))
}
