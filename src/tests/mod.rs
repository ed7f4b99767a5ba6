//! Cross-module integration and property tests

mod differentiation_tests;
