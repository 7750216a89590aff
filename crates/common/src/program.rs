//! Program buffers.
//!
//! A program is a flat sequence of `i32` words, opcodes interleaved with
//! their operands. Binary files (.rvmb) are raw concatenations of
//! little-endian words with no header.

use crate::error::{DecodeError, FormatError};
use crate::instruction::Instruction;

/// An immutable program buffer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    words: Vec<i32>,
}

impl Program {
    /// Wrap a raw word buffer. No validation happens here; malformed
    /// instructions are reported when they are decoded.
    pub fn new(words: Vec<i32>) -> Self {
        Self { words }
    }

    /// Build a buffer by encoding each instruction in order.
    pub fn from_instructions(instructions: &[Instruction]) -> Self {
        let mut words = Vec::with_capacity(instructions.iter().map(Instruction::width).sum());
        for instr in instructions {
            instr.encode_into(&mut words);
        }
        Self { words }
    }

    /// The raw words.
    pub fn words(&self) -> &[i32] {
        &self.words
    }

    /// Number of words in the buffer.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if the buffer has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Decode the buffer front to back.
    ///
    /// Yields `(pc, instruction)` pairs. HLT does not stop the walk, so
    /// words after a HLT are still decoded. After the first error the
    /// iterator is exhausted.
    pub fn instructions(&self) -> Instructions<'_> {
        Instructions {
            words: &self.words,
            pc: 0,
            failed: false,
        }
    }

    /// Encode the buffer as little-endian bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.words.len() * 4);
        for word in &self.words {
            bytes.extend_from_slice(&word.to_le_bytes());
        }
        bytes
    }

    /// Decode little-endian bytes into a buffer.
    ///
    /// The length must be a multiple of 4.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FormatError> {
        if bytes.len() % 4 != 0 {
            return Err(FormatError::InvalidLength(bytes.len()));
        }

        let words = bytes
            .chunks_exact(4)
            .map(|chunk| i32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();

        Ok(Self { words })
    }
}

impl From<Vec<i32>> for Program {
    fn from(words: Vec<i32>) -> Self {
        Self::new(words)
    }
}

/// Iterator returned by [`Program::instructions`].
pub struct Instructions<'a> {
    words: &'a [i32],
    pc: usize,
    failed: bool,
}

impl Iterator for Instructions<'_> {
    type Item = Result<(usize, Instruction), DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pc >= self.words.len() {
            return None;
        }

        let pc = self.pc;
        match Instruction::decode(self.words, pc) {
            Ok(instr) => {
                self.pc += instr.width();
                Some(Ok((pc, instr)))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
