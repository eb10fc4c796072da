//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;
pub mod mock_helpers;

/// Assert two floats are approximately equal
pub fn assert_float_eq(a: f64, b: f64, epsilon: f64) {
    assert!(
        (a - b).abs() < epsilon,
        "Expected {} to be approximately equal to {} (epsilon: {})",
        a,
        b,
        epsilon
    );
}

/// Index of the first local minimum of `values` after `start`
pub fn first_local_min(values: &[f64], start: usize) -> Option<usize> {
    (start + 1..values.len().saturating_sub(1))
        .find(|&i| values[i] <= values[i - 1] && values[i] <= values[i + 1])
}
