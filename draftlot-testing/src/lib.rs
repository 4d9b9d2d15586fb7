//! Assertions shared by the draftlot test suites.

use assert_float_eq::*;

/// Asserts that two slices agree element-wise to within an absolute `epsilon`. Probabilities are
/// compared this way since many cells sit close to zero, where relative error is meaningless.
pub fn assert_slice_f64_absolute(expected: &[f64], actual: &[f64], epsilon: f64) {
    assert_eq!(
        expected.len(),
        actual.len(),
        "lengths do not match: {} ≠ {}",
        expected.len(),
        actual.len()
    );
    for (index, (&expected, &actual)) in expected.iter().zip(actual).enumerate() {
        assert!(
            (expected - actual).abs() <= epsilon,
            "element {index}: expected {expected}, got {actual} (epsilon {epsilon})"
        );
    }
}

pub fn assert_slice_f64_relative(expected: &[f64], actual: &[f64], epsilon: f64) {
    assert_eq!(
        expected.len(),
        actual.len(),
        "lengths do not match: {} ≠ {}",
        expected.len(),
        actual.len()
    );
    for (&expected, &actual) in expected.iter().zip(actual) {
        if actual != expected {
            assert_float_relative_eq!(expected, actual, epsilon);
        }
    }
}

/// Asserts that `actual` is a permutation of `0..len`.
pub fn assert_permutation(len: usize, actual: &[usize]) {
    assert_eq!(len, actual.len(), "expected {len} elements in {actual:?}");
    let mut seen = vec![false; len];
    for &element in actual {
        assert!(element < len, "element {element} out of range in {actual:?}");
        assert!(!seen[element], "duplicate element {element} in {actual:?}");
        seen[element] = true;
    }
}
