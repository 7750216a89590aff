//! General-purpose register names.

use std::fmt;

/// Number of general-purpose registers.
pub const MAX_REGISTERS: usize = 8;

/// A general-purpose register, `A` through `H`.
///
/// The discriminant is the register's index in the register bank and its
/// encoding as an operand word.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Register {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

/// All registers, in index order.
pub const ALL_REGISTERS: [Register; MAX_REGISTERS] = [
    Register::A,
    Register::B,
    Register::C,
    Register::D,
    Register::E,
    Register::F,
    Register::G,
    Register::H,
];

impl Register {
    /// Index into the register bank.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Single-letter name used by the assembler.
    pub fn name(self) -> &'static str {
        match self {
            Register::A => "A",
            Register::B => "B",
            Register::C => "C",
            Register::D => "D",
            Register::E => "E",
            Register::F => "F",
            Register::G => "G",
            Register::H => "H",
        }
    }

    /// Looks up a register by its (uppercase) name.
    pub fn from_name(name: &str) -> Option<Register> {
        ALL_REGISTERS.iter().find(|r| r.name() == name).copied()
    }
}

impl TryFrom<i32> for Register {
    type Error = i32;

    /// Accepts exactly `[0, MAX_REGISTERS)`; returns the rejected id otherwise.
    fn try_from(id: i32) -> Result<Self, Self::Error> {
        usize::try_from(id)
            .ok()
            .and_then(|i| ALL_REGISTERS.get(i))
            .copied()
            .ok_or(id)
    }
}

impl From<Register> for i32 {
    fn from(reg: Register) -> Self {
        reg as u8 as i32
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_follow_names() {
        for (i, reg) in ALL_REGISTERS.iter().enumerate() {
            assert_eq!(reg.index(), i);
            assert_eq!(Register::try_from(i as i32), Ok(*reg));
        }
    }

    #[test]
    fn rejects_negative_ids() {
        assert_eq!(Register::try_from(-1), Err(-1));
        assert_eq!(Register::try_from(i32::MIN), Err(i32::MIN));
    }

    #[test]
    fn rejects_max_registers_itself() {
        // Index 8 is one past H. The bound is exclusive.
        assert_eq!(Register::try_from(8), Err(8));
        assert_eq!(Register::try_from(9), Err(9));
    }

    #[test]
    fn name_lookup() {
        assert_eq!(Register::from_name("C"), Some(Register::C));
        assert_eq!(Register::from_name("I"), None);
        assert_eq!(Register::H.to_string(), "H");
    }
}
