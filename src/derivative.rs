//! Differentiation rules
//!
//! Each rule is purely structural: the result is the textbook tree for
//! the rule with no inline cleanup. `Expr::simplified` is responsible
//! for collapsing the `0` and `1` factors the rules leave behind.

use crate::ast::Expr;

impl Expr {
    /// Differentiate this expression with respect to a variable
    ///
    /// Always succeeds and returns a fresh tree; the input is not
    /// mutated.
    ///
    /// The power rule treats the exponent as constant with respect to
    /// the differentiation variable: `d/dx a^b = b * a' * a^(b-1)`. An
    /// exponent that depends on the variable (as in `x^x`) silently
    /// produces that same expression, which is then incorrect.
    ///
    /// # Example
    /// ```
    /// use symdiff::parser::parse;
    ///
    /// let expr = parse("3x^5").unwrap();
    /// assert_eq!(expr.derivative('x').simplified().to_string(), "15x^4");
    /// ```
    pub fn derivative(&self, wrt: char) -> Expr {
        match self {
            Expr::Const(_) => Expr::number(0.0),

            Expr::Var(letter) => Expr::number(if *letter == wrt { 1.0 } else { 0.0 }),

            // Sum rule: (a + b)' = a' + b'
            Expr::Add(l, r) => Expr::add(l.derivative(wrt), r.derivative(wrt)),

            // Difference rule: (a - b)' = a' - b'
            Expr::Sub(l, r) => Expr::sub(l.derivative(wrt), r.derivative(wrt)),

            // Product rule: (a * b)' = a * b' + b * a'
            Expr::Mul(l, r) => Expr::add(
                Expr::mul((**l).clone(), r.derivative(wrt)),
                Expr::mul((**r).clone(), l.derivative(wrt)),
            ),

            // Quotient rule: (a / b)' = (b * a' - a * b') / b^2
            Expr::Div(l, r) => Expr::div(
                Expr::sub(
                    Expr::mul((**r).clone(), l.derivative(wrt)),
                    Expr::mul((**l).clone(), r.derivative(wrt)),
                ),
                Expr::pow((**r).clone(), Expr::number(2.0)),
            ),

            // Power rule: (a^b)' = b * (a' * a^(b-1))
            Expr::Pow(base, exp) => Expr::mul(
                (**exp).clone(),
                Expr::mul(
                    base.derivative(wrt),
                    Expr::pow(
                        (**base).clone(),
                        Expr::sub((**exp).clone(), Expr::number(1.0)),
                    ),
                ),
            ),

            Expr::Neg(inner) => Expr::neg(inner.derivative(wrt)),
        }
    }
}
