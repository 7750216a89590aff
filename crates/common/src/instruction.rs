//! Decoded instructions and the table-driven decoder.
//!
//! A program buffer is a flat sequence of `i32` words. Each instruction is
//! one opcode word followed by a fixed number of operand words:
//! ```text
//! OUT reg            [0, reg]
//! HLT                [1]
//! MOV src dst        [2, src, dst]
//! LDM reg addr       [3, reg, addr]
//! LDI reg literal    [4, reg, literal]
//! STV reg addr       [5, reg, addr]
//! POP reg            [6, reg]
//! PSH reg            [7, reg]
//! ADM reg addr       [8, reg, addr]
//! ```

use std::fmt;

use crate::error::DecodeError;
use crate::opcode::Opcode;
use crate::register::Register;

/// A single decoded instruction with typed operands.
///
/// Register operands are validated during decode, so a `Register` here is
/// always in range. Addresses are left raw; bounds depend on the memory the
/// instruction runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// Emit the value of `reg`.
    Out { reg: Register },
    /// Stop execution.
    Hlt,
    /// Copy `src` into `dst`.
    Mov { src: Register, dst: Register },
    /// Load `memory[addr]` into `reg`.
    Ldm { reg: Register, addr: i32 },
    /// Load `value` into `reg`.
    Ldi { reg: Register, value: i32 },
    /// Store `reg` into `memory[addr]`.
    Stv { reg: Register, addr: i32 },
    /// Pop the data stack into `reg`.
    Pop { reg: Register },
    /// Push `reg` onto the data stack.
    Psh { reg: Register },
    /// Add `memory[addr]` into `reg`.
    Adm { reg: Register, addr: i32 },
}

impl Instruction {
    /// Decode the instruction whose opcode sits at `words[pc]`.
    ///
    /// Checks run in a fixed order: the opcode must be known, the buffer
    /// must hold the full instruction width, then each register operand is
    /// validated left to right.
    pub fn decode(words: &[i32], pc: usize) -> Result<Self, DecodeError> {
        let word = *words
            .get(pc)
            .ok_or(DecodeError::UnfinishedInstruction { at: pc })?;
        let opcode =
            Opcode::try_from(word).map_err(|opcode| DecodeError::UnknownOpcode { opcode, at: pc })?;

        let operands = words
            .get(pc + 1..pc + opcode.width())
            .ok_or(DecodeError::UnfinishedInstruction { at: pc })?;

        let reg = |slot: usize| {
            Register::try_from(operands[slot]).map_err(|id| DecodeError::InvalidRegister { id, at: pc })
        };

        Ok(match opcode {
            Opcode::Out => Instruction::Out { reg: reg(0)? },
            Opcode::Hlt => Instruction::Hlt,
            Opcode::Mov => Instruction::Mov {
                src: reg(0)?,
                dst: reg(1)?,
            },
            Opcode::Ldm => Instruction::Ldm {
                reg: reg(0)?,
                addr: operands[1],
            },
            Opcode::Ldi => Instruction::Ldi {
                reg: reg(0)?,
                value: operands[1],
            },
            Opcode::Stv => Instruction::Stv {
                reg: reg(0)?,
                addr: operands[1],
            },
            Opcode::Pop => Instruction::Pop { reg: reg(0)? },
            Opcode::Psh => Instruction::Psh { reg: reg(0)? },
            Opcode::Adm => Instruction::Adm {
                reg: reg(0)?,
                addr: operands[1],
            },
        })
    }

    /// The opcode this instruction encodes to.
    pub fn opcode(&self) -> Opcode {
        match self {
            Instruction::Out { .. } => Opcode::Out,
            Instruction::Hlt => Opcode::Hlt,
            Instruction::Mov { .. } => Opcode::Mov,
            Instruction::Ldm { .. } => Opcode::Ldm,
            Instruction::Ldi { .. } => Opcode::Ldi,
            Instruction::Stv { .. } => Opcode::Stv,
            Instruction::Pop { .. } => Opcode::Pop,
            Instruction::Psh { .. } => Opcode::Psh,
            Instruction::Adm { .. } => Opcode::Adm,
        }
    }

    /// Encoded width in words.
    pub fn width(&self) -> usize {
        self.opcode().width()
    }

    /// Operand words in encoding order.
    pub fn operands(&self) -> Vec<i32> {
        match *self {
            Instruction::Hlt => vec![],
            Instruction::Out { reg } | Instruction::Pop { reg } | Instruction::Psh { reg } => {
                vec![reg.into()]
            }
            Instruction::Mov { src, dst } => vec![src.into(), dst.into()],
            Instruction::Ldm { reg, addr }
            | Instruction::Stv { reg, addr }
            | Instruction::Adm { reg, addr } => vec![reg.into(), addr],
            Instruction::Ldi { reg, value } => vec![reg.into(), value],
        }
    }

    /// Append the encoded words of this instruction to `out`.
    pub fn encode_into(&self, out: &mut Vec<i32>) {
        out.push(self.opcode().into());
        out.extend(self.operands());
    }

    /// Encode this instruction to its words.
    pub fn encode(&self) -> Vec<i32> {
        let mut words = Vec::with_capacity(self.width());
        self.encode_into(&mut words);
        words
    }
}

impl fmt::Display for Instruction {
    /// Canonical assembly form, e.g. `LDI A 291` or `MOV A B`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.opcode().mnemonic())?;
        match *self {
            Instruction::Hlt => Ok(()),
            Instruction::Out { reg } | Instruction::Pop { reg } | Instruction::Psh { reg } => {
                write!(f, " {reg}")
            }
            Instruction::Mov { src, dst } => write!(f, " {src} {dst}"),
            Instruction::Ldm { reg, addr }
            | Instruction::Stv { reg, addr }
            | Instruction::Adm { reg, addr } => write!(f, " {reg} {addr}"),
            Instruction::Ldi { reg, value } => write!(f, " {reg} {value}"),
        }
    }
}
