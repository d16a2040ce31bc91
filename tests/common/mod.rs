//! Common test utilities for scical integration tests

pub use scical::{evaluate, EvaluationError};

/// Tolerance for results that go through trigonometry or logarithms
pub const EPSILON: f64 = 1e-9;

/// Evaluate and unwrap, panicking with the input on failure
#[allow(dead_code)]
pub fn eval(input: &str) -> f64 {
    match evaluate(input) {
        Ok(v) => v,
        Err(e) => panic!("evaluate({:?}) failed: {}", input, e),
    }
}

/// Assert that `input` evaluates to `expected` within EPSILON
#[allow(dead_code)]
pub fn assert_close(input: &str, expected: f64) {
    let got = eval(input);
    assert!(
        (got - expected).abs() < EPSILON,
        "evaluate({:?}) = {}, expected {}",
        input,
        got,
        expected
    );
}

/// Error kind name for a failing input
#[allow(dead_code)]
pub fn error_kind(input: &str) -> &'static str {
    match evaluate(input) {
        Ok(v) => panic!("evaluate({:?}) unexpectedly returned {}", input, v),
        Err(e) => e.kind(),
    }
}
