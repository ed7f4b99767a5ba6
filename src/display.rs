//! Display formatting with minimal parenthesisation

use std::fmt;

use crate::ast::Expr;

/// Fixed printing priority per variant; higher binds tighter
///
/// A negative constant only arises from numeric folding and prints with
/// a leading minus, so it takes the priority of a negation.
fn priority(expr: &Expr) -> u8 {
    match expr {
        Expr::Const(value) if *value < 0.0 => 3,
        Expr::Const(_) | Expr::Var(_) => 10,
        Expr::Pow(_, _) => 4,
        Expr::Neg(_) => 3,
        Expr::Mul(_, _) | Expr::Div(_, _) => 2,
        Expr::Add(_, _) | Expr::Sub(_, _) => 1,
    }
}

/// Check if an expression renders with a leading minus sign
///
/// Juxtaposed multiplication must parenthesise such an operand, or
/// `y * -x` would print as `y-x` and read back as subtraction.
fn renders_negated(expr: &Expr) -> bool {
    match expr {
        Expr::Neg(_) => true,
        Expr::Const(value) => *value < 0.0,
        _ => false,
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Const(n) => {
                if n.is_nan() {
                    write!(f, "NaN")
                } else if n.is_infinite() {
                    if *n > 0.0 {
                        write!(f, "Infinity")
                    } else {
                        write!(f, "-Infinity")
                    }
                } else if n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }

            Expr::Var(letter) => write!(f, "{}", letter),

            Expr::Neg(inner) => {
                if priority(inner) <= priority(self) {
                    write!(f, "-({})", inner)
                } else {
                    write!(f, "-{}", inner)
                }
            }

            Expr::Add(l, r) => write_binary(f, self, l, r, "+", false, true),
            Expr::Sub(l, r) => write_binary(f, self, l, r, "-", false, true),
            Expr::Div(l, r) => write_binary(f, self, l, r, "/", false, true),
            Expr::Pow(l, r) => write_binary(f, self, l, r, "^", false, false),

            Expr::Mul(l, r) => {
                // x*31 reads better as 31x
                let swap = matches!((&**l, &**r), (Expr::Var(_), Expr::Const(_)));
                write_binary(f, self, l, r, "", swap, true)
            }
        }
    }
}

/// Write a binary node, wrapping each child in parentheses only when its
/// priority demands it under the node's associativity
fn write_binary(
    f: &mut fmt::Formatter<'_>,
    parent: &Expr,
    left: &Expr,
    right: &Expr,
    op: &str,
    swap: bool,
    left_assoc: bool,
) -> fmt::Result {
    let (first, second) = if swap { (right, left) } else { (left, right) };
    let parent_priority = priority(parent);

    let wrap_first = if left_assoc {
        priority(first) < parent_priority
    } else {
        priority(first) <= parent_priority
    };
    let wrap_second = if left_assoc {
        priority(second) <= parent_priority
    } else {
        priority(second) < parent_priority
    } || (op.is_empty() && renders_negated(second));

    if wrap_first {
        write!(f, "({})", first)?;
    } else {
        write!(f, "{}", first)?;
    }

    write!(f, "{}", op)?;

    if wrap_second {
        write!(f, "({})", second)
    } else {
        write!(f, "{}", second)
    }
}
