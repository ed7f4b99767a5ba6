//! Expression tree for arithmetic formulas

use rustc_hash::{FxHashMap, FxHashSet};

/// A node in the symbolic expression tree
///
/// Every non-leaf node owns its children exclusively; cloning an
/// expression is a structural deep copy and transformations always
/// return fresh trees. Equality is structural: two expressions compare
/// equal iff they have the same variant and equal sub-fields, which is
/// not the same as mathematical equivalence (see
/// [`numerically_equal`](crate::numerically_equal) for that).
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Constant number (non-negative by construction; the parser wraps
    /// negative literals in [`Expr::Neg`])
    Const(f64),

    /// Single-letter variable (e.g. `x`, `a`)
    Var(char),

    /// Addition
    Add(Box<Expr>, Box<Expr>),

    /// Subtraction
    Sub(Box<Expr>, Box<Expr>),

    /// Multiplication
    Mul(Box<Expr>, Box<Expr>),

    /// Division
    Div(Box<Expr>, Box<Expr>),

    /// Exponentiation (base, exponent)
    Pow(Box<Expr>, Box<Expr>),

    /// Unary negation
    Neg(Box<Expr>),
}

impl Expr {
    // Convenience constructors

    /// Create a constant expression
    pub fn number(value: f64) -> Self {
        Expr::Const(value)
    }

    /// Create a variable expression
    pub fn variable(letter: char) -> Self {
        Expr::Var(letter)
    }

    /// Create an addition expression
    pub fn add(left: Expr, right: Expr) -> Self {
        Expr::Add(Box::new(left), Box::new(right))
    }

    /// Create a subtraction expression
    pub fn sub(left: Expr, right: Expr) -> Self {
        Expr::Sub(Box::new(left), Box::new(right))
    }

    /// Create a multiplication expression
    pub fn mul(left: Expr, right: Expr) -> Self {
        Expr::Mul(Box::new(left), Box::new(right))
    }

    /// Create a division expression
    pub fn div(left: Expr, right: Expr) -> Self {
        Expr::Div(Box::new(left), Box::new(right))
    }

    /// Create a power expression
    pub fn pow(base: Expr, exponent: Expr) -> Self {
        Expr::Pow(Box::new(base), Box::new(exponent))
    }

    /// Create a negation expression
    pub fn neg(inner: Expr) -> Self {
        Expr::Neg(Box::new(inner))
    }

    // Accessor methods

    /// Return the value if this expression is a constant
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Expr::Const(value) => Some(*value),
            _ => None,
        }
    }

    /// Check if this expression is the constant zero
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.as_number() == Some(0.0)
    }

    /// Check if this expression is the constant one
    #[inline]
    pub fn is_one(&self) -> bool {
        self.as_number() == Some(1.0)
    }

    /// Collect the set of variable letters appearing in the expression
    pub fn variables(&self) -> FxHashSet<char> {
        let mut vars = FxHashSet::default();
        self.collect_variables(&mut vars);
        vars
    }

    fn collect_variables(&self, vars: &mut FxHashSet<char>) {
        match self {
            Expr::Const(_) => {}
            Expr::Var(letter) => {
                vars.insert(*letter);
            }
            Expr::Add(l, r)
            | Expr::Sub(l, r)
            | Expr::Mul(l, r)
            | Expr::Div(l, r)
            | Expr::Pow(l, r) => {
                l.collect_variables(vars);
                r.collect_variables(vars);
            }
            Expr::Neg(inner) => inner.collect_variables(vars),
        }
    }

    /// Evaluate the expression numerically over an environment of
    /// variable bindings
    ///
    /// Returns `None` if any variable in the tree is unbound. Arithmetic
    /// follows IEEE-754 `f64` semantics: division by zero and power
    /// domain errors yield the IEEE infinity or NaN inside `Some`, not a
    /// failure.
    ///
    /// # Example
    /// ```
    /// use rustc_hash::FxHashMap;
    /// use symdiff::parser::parse;
    ///
    /// let expr = parse("3x^2").unwrap();
    /// let mut env = FxHashMap::default();
    /// env.insert('x', 2.0);
    /// assert_eq!(expr.evaluate(&env), Some(12.0));
    /// assert_eq!(expr.evaluate(&FxHashMap::default()), None);
    /// ```
    pub fn evaluate(&self, env: &FxHashMap<char, f64>) -> Option<f64> {
        match self {
            Expr::Const(value) => Some(*value),
            Expr::Var(letter) => env.get(letter).copied(),
            Expr::Add(l, r) => Some(l.evaluate(env)? + r.evaluate(env)?),
            Expr::Sub(l, r) => Some(l.evaluate(env)? - r.evaluate(env)?),
            Expr::Mul(l, r) => Some(l.evaluate(env)? * r.evaluate(env)?),
            Expr::Div(l, r) => Some(l.evaluate(env)? / r.evaluate(env)?),
            Expr::Pow(base, exp) => Some(base.evaluate(env)?.powf(exp.evaluate(env)?)),
            Expr::Neg(inner) => Some(-inner.evaluate(env)?),
        }
    }
}
