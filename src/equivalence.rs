//! Numeric equivalence oracle
//!
//! Decides whether two expression trees represent the same function by
//! sampling variable assignments. Intended for testing: structural
//! equality is too strict (`x*31` and `31*x` are the same function) and
//! symbolic equality is out of scope.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};
use rustc_hash::FxHashMap;

use crate::ast::Expr;

/// Fixed seed so repeated runs draw identical samples
const SEED: u64 = 0;

/// Number of variable assignments to test
const SAMPLES: usize = 1000;

/// Relative tolerance for comparing evaluation results
const EPSILON: f64 = 1e-3;

/// Check whether two expressions agree numerically as functions
///
/// Structurally equal trees are equal outright. Trees over different
/// variable sets are unequal. Otherwise both sides are evaluated on
/// 1000 assignments drawn from a normal distribution with mean 0 and
/// standard deviation 10 (values near zero help numerical stability),
/// using a fixed-seed generator so the verdict is deterministic. Any
/// sample where the results differ beyond the relative tolerance, fail
/// to evaluate, or come out NaN makes the expressions unequal.
///
/// # Example
/// ```
/// use symdiff::{numerically_equal, parser::parse};
///
/// let a = parse("3ax^a").unwrap();
/// let b = parse("3(a(x^a))").unwrap();
/// assert!(numerically_equal(&a, &b));
/// ```
pub fn numerically_equal(lhs: &Expr, rhs: &Expr) -> bool {
    // Exact match saves us work
    if lhs == rhs {
        return true;
    }

    let lhs_vars = lhs.variables();
    if lhs_vars != rhs.variables() {
        return false;
    }

    // Sorted so the draw order does not depend on hash iteration
    let mut variables: Vec<char> = lhs_vars.into_iter().collect();
    variables.sort_unstable();

    let mut rng = StdRng::seed_from_u64(SEED);
    let normal = Normal::new(0.0, 10.0).expect("standard deviation is finite and positive");

    for _ in 0..SAMPLES {
        let mut env = FxHashMap::default();
        for &letter in &variables {
            env.insert(letter, normal.sample(&mut rng));
        }

        let (Some(a), Some(b)) = (lhs.evaluate(&env), rhs.evaluate(&env)) else {
            return false;
        };

        if !approximately_equal(a, b, EPSILON) {
            return false;
        }
    }

    true
}

/// Relative comparison; false for NaN on either side
fn approximately_equal(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() <= a.abs().max(b.abs()) * epsilon
}
