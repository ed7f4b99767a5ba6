//! Symbolic Differentiation Engine
//!
//! A small, focused engine that parses arithmetic expressions over
//! single-letter variables, computes symbolic derivatives, simplifies
//! the result, and prints it back in minimal notation.
//!
//! # Features
//! - Implicit multiplication (`3x`, `3(x+1)`, `xy`)
//! - Operator-precedence parsing with unary minus and
//!   right-associative exponentiation
//! - Structural differentiation rules with a converging simplifier
//! - Minimal-parentheses printing (`x*31` renders as `31x`)
//! - A deterministic numeric equivalence oracle for testing
//!
//! # Usage Examples
//!
//! ## String in, string out
//! ```
//! use symdiff::differentiate;
//!
//! let result = differentiate("3x^5", 'x').unwrap();
//! assert_eq!(result, "15x^4");
//! ```
//!
//! ## Working with trees
//! ```
//! use symdiff::parser::parse;
//!
//! let expr = parse("(x+1)/(x-1)").unwrap();
//! let derivative = expr.derivative('x').simplified();
//! println!("{}", derivative);
//! ```

mod ast;
mod derivative;
mod display;
mod equivalence;
mod error;
pub mod parser;
mod simplify;

#[cfg(test)]
mod tests;

// Re-export key types for easier usage
pub use ast::Expr;
pub use equivalence::numerically_equal;
pub use error::EngineError;

/// Differentiate a formula with respect to a variable
///
/// Tokenizes, parses, differentiates, simplifies, and prints. Lexer and
/// parser errors propagate to the caller; differentiation and
/// simplification themselves cannot fail.
///
/// # Example
/// ```
/// use symdiff::differentiate;
///
/// assert_eq!(differentiate("3x+5", 'x').unwrap(), "3");
/// assert!(differentiate("y++x", 'x').is_err());
/// ```
pub fn differentiate(formula: &str, wrt: char) -> Result<String, EngineError> {
    let expr = parser::parse(formula)?;
    let derivative = expr.derivative(wrt);
    let simplified = derivative.simplified();

    if simplify::trace_enabled() {
        eprintln!("[symdiff] parsed:     {}", expr);
        eprintln!("[symdiff] derivative: {}", derivative);
        eprintln!("[symdiff] simplified: {}", simplified);
    }

    Ok(simplified.to_string())
}

/// Simplify a formula without differentiating it
///
/// # Example
/// ```
/// use symdiff::simplify;
///
/// assert_eq!(simplify("3*x*4").unwrap(), "12x");
/// ```
pub fn simplify(formula: &str) -> Result<String, EngineError> {
    let expr = parser::parse(formula)?;
    let simplified = expr.simplified();

    if simplify::trace_enabled() {
        eprintln!("[symdiff] parsed:     {}", expr);
        eprintln!("[symdiff] simplified: {}", simplified);
    }

    Ok(simplified.to_string())
}
