//! Parser for regvm assembly tokens → instructions.
//!
//! Dispatches on the opcode to its operand pattern: none, one register,
//! two registers, or a register followed by a 32-bit number.

use crate::error::AsmError;
use crate::lexer::Token;
use regvm_common::{Instruction, Opcode, Register};

/// Parse a sequence of tokens from a single line into an instruction.
///
/// Returns `Ok(None)` for blank lines (empty token list).
pub(crate) fn parse_line(tokens: &[Token], line_num: usize) -> Result<Option<Instruction>, AsmError> {
    let Some(first) = tokens.first() else {
        return Ok(None);
    };

    let mnemonic = match first {
        Token::Ident(s) => s.as_str(),
        Token::Number(n) => {
            return Err(AsmError::UnexpectedToken {
                line: line_num,
                token: n.to_string(),
            })
        }
    };

    let opcode = Opcode::from_mnemonic(mnemonic).ok_or_else(|| AsmError::UnknownOpcode {
        line: line_num,
        token: mnemonic.to_string(),
    })?;

    let args = &tokens[1..];
    let name = opcode.mnemonic();
    let expected = opcode.operand_count();

    let instr = match opcode {
        Opcode::Hlt => Instruction::Hlt,

        Opcode::Out | Opcode::Pop | Opcode::Psh => {
            let reg = expect_register(args, 0, line_num, name, expected)?;
            match opcode {
                Opcode::Out => Instruction::Out { reg },
                Opcode::Pop => Instruction::Pop { reg },
                _ => Instruction::Psh { reg },
            }
        }

        Opcode::Mov => Instruction::Mov {
            src: expect_register(args, 0, line_num, name, expected)?,
            dst: expect_register(args, 1, line_num, name, expected)?,
        },

        Opcode::Ldi => Instruction::Ldi {
            reg: expect_register(args, 0, line_num, name, expected)?,
            value: expect_word(args, 1, line_num, name, expected)?,
        },

        Opcode::Ldm | Opcode::Stv | Opcode::Adm => {
            let reg = expect_register(args, 0, line_num, name, expected)?;
            let addr = expect_word(args, 1, line_num, name, expected)?;
            match opcode {
                Opcode::Ldm => Instruction::Ldm { reg, addr },
                Opcode::Stv => Instruction::Stv { reg, addr },
                _ => Instruction::Adm { reg, addr },
            }
        }
    };

    expect_end(&args[expected.min(args.len())..], line_num)?;
    Ok(Some(instr))
}

/// Extract a register operand: a name `A`..`H` or an index `0`..`7`.
fn expect_register(
    args: &[Token],
    idx: usize,
    line: usize,
    opcode: &'static str,
    expected: usize,
) -> Result<Register, AsmError> {
    let invalid = |token: String| AsmError::InvalidRegister { line, token };
    match args.get(idx) {
        Some(Token::Ident(s)) => Register::from_name(s).ok_or_else(|| invalid(s.clone())),
        Some(Token::Number(n)) => i32::try_from(*n)
            .ok()
            .and_then(|id| Register::try_from(id).ok())
            .ok_or_else(|| invalid(n.to_string())),
        None => Err(AsmError::MissingArgument {
            line,
            opcode,
            expected,
        }),
    }
}

/// Extract a 32-bit number from the token at position `idx`.
fn expect_word(
    args: &[Token],
    idx: usize,
    line: usize,
    opcode: &'static str,
    expected: usize,
) -> Result<i32, AsmError> {
    match args.get(idx) {
        Some(Token::Number(n)) => i32::try_from(*n).map_err(|_| AsmError::InvalidNumber {
            line,
            token: n.to_string(),
        }),
        Some(Token::Ident(s)) => Err(AsmError::UnexpectedToken {
            line,
            token: s.clone(),
        }),
        None => Err(AsmError::MissingArgument {
            line,
            opcode,
            expected,
        }),
    }
}

/// Verify there are no remaining tokens.
fn expect_end(remaining: &[Token], line: usize) -> Result<(), AsmError> {
    match remaining.first() {
        None => Ok(()),
        Some(Token::Ident(s)) => Err(AsmError::UnexpectedToken {
            line,
            token: s.clone(),
        }),
        Some(Token::Number(n)) => Err(AsmError::UnexpectedToken {
            line,
            token: n.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize_line;

    fn parse(line: &str) -> Result<Option<Instruction>, AsmError> {
        let tokens = tokenize_line(line, 1)?;
        parse_line(&tokens, 1)
    }

    #[test]
    fn blank_line_is_none() {
        assert_eq!(parse("").unwrap(), None);
        assert_eq!(parse("  ; nothing").unwrap(), None);
    }

    #[test]
    fn no_operands() {
        assert_eq!(parse("HLT").unwrap(), Some(Instruction::Hlt));
    }

    #[test]
    fn single_register_patterns() {
        assert_eq!(
            parse("OUT C").unwrap(),
            Some(Instruction::Out { reg: Register::C })
        );
        assert_eq!(
            parse("pop h").unwrap(),
            Some(Instruction::Pop { reg: Register::H })
        );
        assert_eq!(
            parse("PSH 3").unwrap(),
            Some(Instruction::Psh { reg: Register::D })
        );
    }

    #[test]
    fn two_registers() {
        assert_eq!(
            parse("MOV A, B").unwrap(),
            Some(Instruction::Mov {
                src: Register::A,
                dst: Register::B
            })
        );
    }

    #[test]
    fn register_and_number() {
        assert_eq!(
            parse("LDI A 0x123").unwrap(),
            Some(Instruction::Ldi {
                reg: Register::A,
                value: 0x123
            })
        );
        assert_eq!(
            parse("LDM B 65535").unwrap(),
            Some(Instruction::Ldm {
                reg: Register::B,
                addr: 65535
            })
        );
        assert_eq!(
            parse("STV E -1").unwrap(),
            Some(Instruction::Stv {
                reg: Register::E,
                addr: -1
            })
        );
        assert_eq!(
            parse("ADM 7 0").unwrap(),
            Some(Instruction::Adm {
                reg: Register::H,
                addr: 0
            })
        );
    }

    #[test]
    fn unknown_opcode() {
        assert_eq!(
            parse("JMP 4").unwrap_err(),
            AsmError::UnknownOpcode {
                line: 1,
                token: "JMP".to_string()
            }
        );
    }

    #[test]
    fn number_in_opcode_position() {
        assert!(matches!(
            parse("42").unwrap_err(),
            AsmError::UnexpectedToken { line: 1, .. }
        ));
    }

    #[test]
    fn missing_arguments() {
        assert_eq!(
            parse("MOV A").unwrap_err(),
            AsmError::MissingArgument {
                line: 1,
                opcode: "MOV",
                expected: 2
            }
        );
        assert_eq!(
            parse("OUT").unwrap_err(),
            AsmError::MissingArgument {
                line: 1,
                opcode: "OUT",
                expected: 1
            }
        );
    }

    #[test]
    fn invalid_registers() {
        assert_eq!(
            parse("OUT I").unwrap_err(),
            AsmError::InvalidRegister {
                line: 1,
                token: "I".to_string()
            }
        );
        assert_eq!(
            parse("OUT 8").unwrap_err(),
            AsmError::InvalidRegister {
                line: 1,
                token: "8".to_string()
            }
        );
        assert_eq!(
            parse("OUT -1").unwrap_err(),
            AsmError::InvalidRegister {
                line: 1,
                token: "-1".to_string()
            }
        );
    }

    #[test]
    fn number_out_of_range() {
        assert_eq!(
            parse("LDI A 2147483648").unwrap_err(),
            AsmError::InvalidNumber {
                line: 1,
                token: "2147483648".to_string()
            }
        );
        assert_eq!(
            parse("LDI A -2147483648").unwrap(),
            Some(Instruction::Ldi {
                reg: Register::A,
                value: i32::MIN
            })
        );
    }

    #[test]
    fn register_where_number_expected() {
        assert_eq!(
            parse("LDI A B").unwrap_err(),
            AsmError::UnexpectedToken {
                line: 1,
                token: "B".to_string()
            }
        );
    }

    #[test]
    fn trailing_tokens() {
        assert_eq!(
            parse("HLT A").unwrap_err(),
            AsmError::UnexpectedToken {
                line: 1,
                token: "A".to_string()
            }
        );
        assert_eq!(
            parse("OUT A 5").unwrap_err(),
            AsmError::UnexpectedToken {
                line: 1,
                token: "5".to_string()
            }
        );
    }
}
