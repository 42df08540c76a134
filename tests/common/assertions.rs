//! Assertion utilities for testing.
//!
//! Floating-point comparisons for color channels and data values.

use colorgrad::Color;

/// Default epsilon for floating-point comparisons
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Assert that two floating-point values are approximately equal.
///
/// # Panics
///
/// Panics if the absolute difference between `actual` and `expected` is greater than `epsilon`.
pub fn assert_approx_eq(actual: f64, expected: f64, epsilon: Option<f64>) {
    let epsilon = epsilon.unwrap_or(DEFAULT_EPSILON);
    let diff = (actual - expected).abs();

    assert!(
        diff <= epsilon,
        "Values not approximately equal: actual = {}, expected = {}, diff = {}, epsilon = {}",
        actual,
        expected,
        diff,
        epsilon
    );
}

/// Assert that the RGB channels of two colors are approximately equal
pub fn assert_color_approx_eq(actual: &Color, expected: &Color, epsilon: Option<f64>) {
    let channels = [
        ("r", actual.r, expected.r),
        ("g", actual.g, expected.g),
        ("b", actual.b, expected.b),
    ];
    for (name, a, e) in channels {
        let eps = epsilon.unwrap_or(DEFAULT_EPSILON);
        assert!(
            (a - e).abs() <= eps,
            "Channel {} differs: actual = {:?}, expected = {:?}",
            name,
            actual,
            expected
        );
    }
}

/// Assert that a string is a `#rrggbb` (or bare `rrggbb`) color code
pub fn assert_hex_code(code: &str) {
    let digits = code.strip_prefix('#').unwrap_or(code);
    assert!(
        digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit()),
        "Not a six digit hex code: {:?}",
        code
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_approx_eq() {
        assert_approx_eq(1.0, 1.0, None);
        assert_approx_eq(1.0, 1.0 + 1e-12, None);
        assert_approx_eq(1.0, 1.001, Some(0.01));
    }

    #[test]
    fn test_assert_hex_code() {
        assert_hex_code("#a0b1c2");
        assert_hex_code("A0B1C2");
    }
}
