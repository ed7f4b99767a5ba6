//! Parser module - converts formula strings to expression trees

mod implicit_mul;
mod lexer;
mod shunting;
mod tokens;

pub use tokens::{Op, Token};

use crate::ast::Expr;
use crate::error::EngineError;

/// Tokenize a formula string
///
/// Two passes: a scan that produces numbers, single-letter variables and
/// punctuation, then an insertion pass that makes implied multiplication
/// explicit (`"3x+6"` becomes `3 * x + 6`).
///
/// # Errors
/// Returns [`EngineError::UnknownToken`] for characters outside the
/// grammar and for malformed numeric literals.
pub fn tokenize(input: &str) -> Result<Vec<Token>, EngineError> {
    let tokens = lexer::lex(input)?;
    Ok(implicit_mul::insert_implicit_multiplication(tokens))
}

/// Build an expression tree from a token sequence
///
/// See [`parse`] for the string-to-tree pipeline; this stage is exposed
/// separately so token-level behavior can be exercised directly.
pub fn build_expression(tokens: Vec<Token>) -> Result<Expr, EngineError> {
    shunting::build_expression(tokens)
}

/// Parse a formula string into an expression tree
///
/// # Example
/// ```
/// use symdiff::parser::parse;
///
/// let expr = parse("3x^2 + 1").unwrap();
/// assert_eq!(expr.to_string(), "3x^2+1");
/// ```
///
/// # Errors
/// Returns an [`EngineError`] if the input is empty, contains characters
/// outside the grammar, or is not a well-formed expression.
pub fn parse(input: &str) -> Result<Expr, EngineError> {
    build_expression(tokenize(input)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_inserts_implicit_multiplication() {
        let tokens = tokenize("3x+6").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Number(3.0),
                Token::Op(Op::Star),
                Token::Variable('x'),
                Token::Op(Op::Plus),
                Token::Number(6.0),
            ]
        );
    }

    #[test]
    fn test_tokenize_parenthesised_expression() {
        let tokens = tokenize("(a^b^(c/d/e-f)^(x*y-m*n))").unwrap();
        let rendered: String = tokens.iter().map(|t| t.to_string()).collect();
        assert_eq!(rendered, "(a^b^(c/d/e-f)^(x*y-m*n))");
    }

    #[test]
    fn test_parse_is_tokenize_then_build() {
        let via_parse = parse("3x+5").unwrap();
        let via_stages = build_expression(tokenize("3x+5").unwrap()).unwrap();
        assert_eq!(via_parse, via_stages);
    }

    #[test]
    fn test_lex_error_propagates() {
        assert!(matches!(
            parse("y#x"),
            Err(EngineError::UnknownToken { .. })
        ));
    }
}
