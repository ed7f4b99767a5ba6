//! One-pass post-order simplification
//!
//! Children are simplified first, then each node applies its own rules:
//! constant-flattening through same-operator chains, identity
//! eliminations, and numeric folding of variable-free subtrees. The
//! rewrite makes only local structural decisions and visits each node at
//! most twice (the flattening step re-simplifies the children once), so
//! it halts deterministically.

use std::sync::OnceLock;

use rustc_hash::FxHashMap;

use crate::ast::Expr;

/// Check if pipeline tracing is enabled via environment variable (cached)
pub(crate) fn trace_enabled() -> bool {
    static TRACE: OnceLock<bool> = OnceLock::new();
    *TRACE.get_or_init(|| {
        std::env::var("SYMDIFF_TRACE")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    })
}

impl Expr {
    /// Simplify the expression, returning a fresh canonical tree
    ///
    /// Addition and multiplication float all constant mass reachable
    /// through a chain of same-operator nodes into a single leaf
    /// (`3*x*4` → `12*x*1` → `12x`), identities against `0` and `1`
    /// collapse, and any variable-free subtree folds to a constant.
    /// The result is a fixed point: simplifying it again returns a
    /// structurally equal tree.
    ///
    /// # Example
    /// ```
    /// use symdiff::parser::parse;
    ///
    /// let expr = parse("3+x+4").unwrap();
    /// assert_eq!(expr.simplified().to_string(), "7+x");
    /// ```
    pub fn simplified(&self) -> Expr {
        match self {
            Expr::Const(_) | Expr::Var(_) => self.clone(),

            Expr::Add(l, r) => {
                let mut l = l.simplified();
                let mut r = r.simplified();

                // Gather every constant leaf on the Add chain into the
                // first one, zeroing the rest; the tree shape is kept
                let mut total = 0.0;
                sum_constants_through_adds(&l, &mut total);
                sum_constants_through_adds(&r, &mut total);
                let mut first = true;
                spread_constants_through_adds(&mut l, total, &mut first);
                spread_constants_through_adds(&mut r, total, &mut first);

                let l = l.simplified();
                let r = r.simplified();

                if l.is_zero() {
                    return r;
                }
                if r.is_zero() {
                    return l;
                }

                evaluate_if_constant(Expr::add(l, r))
            }

            Expr::Sub(l, r) => evaluate_if_constant(Expr::sub(l.simplified(), r.simplified())),

            Expr::Mul(l, r) => {
                let mut l = l.simplified();
                let mut r = r.simplified();

                // Same flattening as Add, with product and unit 1
                let mut total = 1.0;
                multiply_constants_through_muls(&l, &mut total);
                multiply_constants_through_muls(&r, &mut total);
                let mut first = true;
                spread_constants_through_muls(&mut l, total, &mut first);
                spread_constants_through_muls(&mut r, total, &mut first);

                let l = l.simplified();
                let r = r.simplified();

                if l.is_zero() || r.is_zero() {
                    return Expr::number(0.0);
                }
                if l.is_one() {
                    return r;
                }
                if r.is_one() {
                    return l;
                }

                evaluate_if_constant(Expr::mul(l, r))
            }

            Expr::Div(l, r) => evaluate_if_constant(Expr::div(l.simplified(), r.simplified())),

            Expr::Pow(base, exp) => {
                let base = base.simplified();
                let exp = exp.simplified();

                if base.is_one() {
                    return Expr::number(1.0);
                }
                if exp.is_one() {
                    return base;
                }

                evaluate_if_constant(Expr::pow(base, exp))
            }

            Expr::Neg(inner) => evaluate_if_constant(Expr::neg(inner.simplified())),
        }
    }
}

/// Replace a variable-free node with the constant it evaluates to
fn evaluate_if_constant(expr: Expr) -> Expr {
    match expr.evaluate(&FxHashMap::default()) {
        Some(value) => Expr::number(value),
        None => expr,
    }
}

fn sum_constants_through_adds(expr: &Expr, total: &mut f64) {
    match expr {
        Expr::Const(value) => *total += value,
        Expr::Add(l, r) => {
            sum_constants_through_adds(l, total);
            sum_constants_through_adds(r, total);
        }
        _ => {}
    }
}

fn spread_constants_through_adds(expr: &mut Expr, total: f64, first: &mut bool) {
    match expr {
        Expr::Const(value) => {
            *value = if *first { total } else { 0.0 };
            *first = false;
        }
        Expr::Add(l, r) => {
            spread_constants_through_adds(l, total, first);
            spread_constants_through_adds(r, total, first);
        }
        _ => {}
    }
}

fn multiply_constants_through_muls(expr: &Expr, total: &mut f64) {
    match expr {
        Expr::Const(value) => *total *= value,
        Expr::Mul(l, r) => {
            multiply_constants_through_muls(l, total);
            multiply_constants_through_muls(r, total);
        }
        _ => {}
    }
}

fn spread_constants_through_muls(expr: &mut Expr, total: f64, first: &mut bool) {
    match expr {
        Expr::Const(value) => {
            *value = if *first { total } else { 1.0 };
            *first = false;
        }
        Expr::Mul(l, r) => {
            spread_constants_through_muls(l, total, first);
            spread_constants_through_muls(r, total, first);
        }
        _ => {}
    }
}
