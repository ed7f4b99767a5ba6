//! End-to-end scenarios: the full tokenize → parse → derive →
//! simplify → print pipeline, evaluation, and derivative correctness
//! against central finite differences.

use rustc_hash::FxHashMap;

use crate::parser::parse;
use crate::{EngineError, differentiate, numerically_equal, simplify};

fn evaluate(formula: &str, bindings: &[(char, f64)]) -> Option<f64> {
    let env: FxHashMap<char, f64> = bindings.iter().copied().collect();
    parse(formula).unwrap().evaluate(&env)
}

#[test]
fn test_linear_derivative() {
    assert_eq!(differentiate("3x+5", 'x').unwrap(), "3");
}

#[test]
fn test_power_rule_derivative() {
    assert_eq!(differentiate("3x^5", 'x').unwrap(), "15x^4");
}

#[test]
fn test_chain_rule_derivative() {
    let actual = parse("3(x^2+2)^5").unwrap().derivative('x').simplified();
    let expected = parse("30x(x^2+2)^4").unwrap();
    assert!(numerically_equal(&actual, &expected));
}

#[test]
fn test_quotient_rule_derivative() {
    let actual = parse("(x+1)/(x-1)").unwrap().derivative('x').simplified();
    let expected = parse("-2/(x-1)^2").unwrap();
    assert!(numerically_equal(&actual, &expected));
}

#[test]
fn test_derivative_with_respect_to_other_variable() {
    // d/dy of 3x+5 is 0
    assert_eq!(differentiate("3x+5", 'y').unwrap(), "0");
}

#[test]
fn test_unary_minus_derivative() {
    let actual = parse("-x^2").unwrap().derivative('x').simplified();
    let expected = parse("-2x").unwrap();
    assert!(numerically_equal(&actual, &expected));
}

#[test]
fn test_lexer_error_propagates_through_entry_point() {
    assert!(matches!(
        differentiate("y#x", 'x'),
        Err(EngineError::UnknownToken { .. })
    ));
}

#[test]
fn test_parser_error_propagates_through_entry_point() {
    assert_eq!(
        differentiate("(x", 'x'),
        Err(EngineError::UnbalancedParenthesis)
    );
    assert_eq!(
        differentiate("y++x", 'x'),
        Err(EngineError::InvalidUnaryOperator { op: '+' })
    );
}

#[test]
fn test_simplify_entry_point() {
    assert_eq!(simplify("3*x*4").unwrap(), "12x");
    assert_eq!(simplify("2^3").unwrap(), "8");
    assert!(simplify("x)").is_err());
}

#[test]
fn test_evaluate_complex_expression() {
    let value = evaluate(
        "a^b^(32/d/e-f)^(x*31-m*n)",
        &[
            ('a', 2.0),
            ('b', 3.0),
            ('d', 8.0),
            ('e', 2.0),
            ('f', 1.0),
            ('x', 1.0 / 31.0),
            ('m', 0.5),
            ('n', 2.0),
        ],
    );
    assert_eq!(value, Some(8.0));
}

#[test]
fn test_evaluate_square_root() {
    assert_eq!(evaluate("2^0.5", &[]), Some(2.0_f64.sqrt()));
}

#[test]
fn test_evaluate_unbound_variable_is_none() {
    assert_eq!(evaluate("x", &[]), None);
}

#[test]
fn test_evaluate_implicit_multiplication_chain() {
    assert_eq!(evaluate("3ax^a", &[('x', 2.0), ('a', 3.0)]), Some(72.0));
}

#[test]
fn test_evaluate_with_unary_minus() {
    assert_eq!(evaluate("3a(-x)^a", &[('x', 2.0), ('a', 3.0)]), Some(-72.0));
}

/// Compare the simplified symbolic derivative against a central finite
/// difference of the original expression
fn assert_matches_finite_difference(formula: &str, points: &[f64]) {
    let expr = parse(formula).unwrap();
    let derivative = expr.derivative('x').simplified();
    let h = 1e-5;

    for &x in points {
        let at = |v: f64| {
            let mut env = FxHashMap::default();
            env.insert('x', v);
            expr.evaluate(&env).unwrap()
        };

        let numeric = (at(x + h) - at(x - h)) / (2.0 * h);

        let mut env = FxHashMap::default();
        env.insert('x', x);
        let symbolic = derivative.evaluate(&env).unwrap();

        let tolerance = 1e-3 * symbolic.abs().max(numeric.abs()).max(1.0);
        assert!(
            (symbolic - numeric).abs() <= tolerance,
            "{} at x={}: symbolic {} vs finite difference {}",
            formula,
            x,
            symbolic,
            numeric
        );
    }
}

#[test]
fn test_derivatives_match_finite_differences() {
    assert_matches_finite_difference("x^3+2x", &[-2.0, -0.5, 0.3, 1.7]);
    assert_matches_finite_difference("x/(x+3)", &[-1.0, 0.5, 2.0]);
    assert_matches_finite_difference("(x^2+1)^3", &[-1.2, 0.0, 0.9]);
    assert_matches_finite_difference("3x^5", &[-1.1, 0.4, 1.3]);
    assert_matches_finite_difference("-x^2+5x", &[-0.7, 1.9]);
    assert_matches_finite_difference("(x+1)/(x-1)", &[0.0, 2.5, -3.0]);
}

#[test]
fn test_repeated_calls_are_identical() {
    let first = differentiate("3(x^2+2)^5", 'x').unwrap();
    for _ in 0..3 {
        assert_eq!(differentiate("3(x^2+2)^5", 'x').unwrap(), first);
    }
}
