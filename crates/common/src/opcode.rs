//! Opcode table for the regvm instruction set.
//!
//! The numeric values are the program-buffer encoding. Inside the engine
//! instructions are handled as [`crate::Instruction`] variants; the integer
//! form only matters when reading or writing a buffer.

/// Identifies the operation to perform.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// Emit the value of a register.
    Out = 0,
    /// Stop execution.
    Hlt = 1,
    /// Copy one register into another.
    Mov = 2,
    /// Load a memory cell into a register.
    Ldm = 3,
    /// Load a literal into a register.
    Ldi = 4,
    /// Store a register into a memory cell.
    Stv = 5,
    /// Pop the data stack into a register.
    Pop = 6,
    /// Push a register onto the data stack.
    Psh = 7,
    /// Add a memory cell into a register.
    Adm = 8,
}

/// All valid opcodes, in encoding order.
pub const ALL_OPCODES: [Opcode; 9] = [
    Opcode::Out,
    Opcode::Hlt,
    Opcode::Mov,
    Opcode::Ldm,
    Opcode::Ldi,
    Opcode::Stv,
    Opcode::Pop,
    Opcode::Psh,
    Opcode::Adm,
];

impl TryFrom<i32> for Opcode {
    type Error = i32;

    /// Returns the unrecognised word on failure. The caller knows the
    /// program-counter position and builds the real error.
    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Opcode::Out),
            1 => Ok(Opcode::Hlt),
            2 => Ok(Opcode::Mov),
            3 => Ok(Opcode::Ldm),
            4 => Ok(Opcode::Ldi),
            5 => Ok(Opcode::Stv),
            6 => Ok(Opcode::Pop),
            7 => Ok(Opcode::Psh),
            8 => Ok(Opcode::Adm),
            other => Err(other),
        }
    }
}

impl From<Opcode> for i32 {
    fn from(op: Opcode) -> Self {
        op as u8 as i32
    }
}

impl Opcode {
    /// Number of operand words that follow this opcode in a program buffer.
    pub fn operand_count(&self) -> usize {
        match self {
            Opcode::Hlt => 0,
            Opcode::Out | Opcode::Pop | Opcode::Psh => 1,
            Opcode::Mov | Opcode::Ldm | Opcode::Ldi | Opcode::Stv | Opcode::Adm => 2,
        }
    }

    /// Total encoded width: the opcode word plus its operands.
    pub fn width(&self) -> usize {
        1 + self.operand_count()
    }

    /// Returns the assembly mnemonic for this opcode.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Opcode::Out => "OUT",
            Opcode::Hlt => "HLT",
            Opcode::Mov => "MOV",
            Opcode::Ldm => "LDM",
            Opcode::Ldi => "LDI",
            Opcode::Stv => "STV",
            Opcode::Pop => "POP",
            Opcode::Psh => "PSH",
            Opcode::Adm => "ADM",
        }
    }

    /// Looks up an opcode by its (uppercase) mnemonic.
    pub fn from_mnemonic(mnemonic: &str) -> Option<Opcode> {
        ALL_OPCODES
            .iter()
            .find(|op| op.mnemonic() == mnemonic)
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_opcodes_count() {
        assert_eq!(ALL_OPCODES.len(), 9);
    }

    #[test]
    fn roundtrip_all_valid_opcodes() {
        for &opcode in &ALL_OPCODES {
            let word = i32::from(opcode);
            assert_eq!(Opcode::try_from(word), Ok(opcode), "roundtrip failed for {opcode:?}");
        }
    }

    #[test]
    fn encoding_matches_table() {
        assert_eq!(i32::from(Opcode::Out), 0);
        assert_eq!(i32::from(Opcode::Hlt), 1);
        assert_eq!(i32::from(Opcode::Ldi), 4);
        assert_eq!(i32::from(Opcode::Adm), 8);
    }

    #[test]
    fn unknown_words_are_returned() {
        assert_eq!(Opcode::try_from(9), Err(9));
        assert_eq!(Opcode::try_from(-1), Err(-1));
        assert_eq!(Opcode::try_from(i32::MAX), Err(i32::MAX));
    }

    #[test]
    fn operand_counts() {
        assert_eq!(Opcode::Hlt.operand_count(), 0);
        assert_eq!(Opcode::Out.operand_count(), 1);
        assert_eq!(Opcode::Pop.operand_count(), 1);
        assert_eq!(Opcode::Psh.operand_count(), 1);
        for op in [Opcode::Mov, Opcode::Ldm, Opcode::Ldi, Opcode::Stv, Opcode::Adm] {
            assert_eq!(op.operand_count(), 2, "{op:?}");
            assert_eq!(op.width(), 3, "{op:?}");
        }
    }

    #[test]
    fn mnemonic_lookup() {
        for &opcode in &ALL_OPCODES {
            let m = opcode.mnemonic();
            assert_eq!(m, m.to_uppercase(), "mnemonic should be uppercase: {m}");
            assert_eq!(Opcode::from_mnemonic(m), Some(opcode));
        }
        assert_eq!(Opcode::from_mnemonic("JMP"), None);
    }
}
