//! Scanning pass - splits a source string into tokens

use crate::error::EngineError;
use crate::parser::tokens::{Op, Token};

/// Scan a source string into a token sequence
///
/// Whitespace is discarded. A maximal run of digits and dots starting
/// with a digit becomes one `Number` token (so `-33` lexes as a unary
/// minus followed by the constant `33`, and constants are non-negative
/// by construction). A single alphabetic character becomes a `Variable`
/// token, and each of `+ - * / ^ ( )` becomes punctuation. Anything
/// else fails the scan.
pub(crate) fn lex(input: &str) -> Result<Vec<Token>, EngineError> {
    let mut tokens = Vec::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c.is_ascii_digit() {
            // Read the whole number, dots included; the float parser
            // rejects malformed runs like "1..2"
            let mut literal = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_ascii_digit() || c == '.' {
                    literal.push(c);
                    chars.next();
                } else {
                    break;
                }
            }

            // Overflowing literals are rejected so constants stay finite
            let value = match literal.parse::<f64>() {
                Ok(value) if value.is_finite() => value,
                _ => return Err(EngineError::UnknownToken { token: literal }),
            };
            tokens.push(Token::Number(value));
        } else if c.is_ascii_alphabetic() {
            tokens.push(Token::Variable(c));
            chars.next();
        } else if let Some(op) = Op::from_char(c) {
            tokens.push(Token::Op(op));
            chars.next();
        } else {
            return Err(EngineError::UnknownToken {
                token: c.to_string(),
            });
        }
    }

    Ok(tokens)
}
