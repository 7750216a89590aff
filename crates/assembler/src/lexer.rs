//! Tokenizer for regvm assembly text.

use crate::error::AsmError;

/// A single token from an assembly line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    /// An identifier (opcode mnemonic, register name). Always uppercase.
    Ident(String),
    /// A numeric literal. Range-checked against 32 bits by the parser.
    Number(i64),
}

/// Tokenize a single line of assembly text.
///
/// Returns an empty Vec for blank lines and comment-only lines.
/// Comments start with `;` and extend to end of line. Commas separate
/// tokens just like whitespace.
pub(crate) fn tokenize_line(line: &str, line_num: usize) -> Result<Vec<Token>, AsmError> {
    // Strip comment
    let line = match line.find(';') {
        Some(pos) => &line[..pos],
        None => line,
    };

    let mut tokens = Vec::new();
    for word in line.split(|c: char| c.is_whitespace() || c == ',') {
        if word.is_empty() {
            continue;
        }
        let invalid = || AsmError::InvalidNumber {
            line: line_num,
            token: word.to_string(),
        };

        let token = if let Some(hex) = word.strip_prefix("0x").or_else(|| word.strip_prefix("0X")) {
            // Hex is a 32-bit pattern, so 0xFFFFFFFF reads as -1. No sign
            // after the prefix.
            if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(invalid());
            }
            let bits = u32::from_str_radix(hex, 16).map_err(|_| invalid())?;
            Token::Number(i64::from(bits as i32))
        } else if word
            .trim_start_matches('-')
            .as_bytes()
            .first()
            .is_some_and(|b| b.is_ascii_digit())
        {
            Token::Number(word.parse().map_err(|_| invalid())?)
        } else {
            Token::Ident(word.to_uppercase())
        };
        tokens.push(token);
    }

    Ok(tokens)
}
