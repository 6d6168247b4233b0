//! Common utilities for component calculations.

/// Smallest supply voltage magnitude used when converting power to current (V)
pub const EPSILON_VOLTAGE: f64 = 1e-3;

/// Replace a non-finite input signal with zero.
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Keep `value` at least `min_abs` away from zero, preserving its sign.
///
/// Zero maps to `+min_abs`.
pub fn regularize(value: f64, min_abs: f64) -> f64 {
    if value.abs() >= min_abs {
        value
    } else if value < 0.0 {
        -min_abs
    } else {
        min_abs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regularize() {
        assert_eq!(regularize(5.0, 1.0), 5.0);
        assert_eq!(regularize(-5.0, 1.0), -5.0);
        assert_eq!(regularize(0.5, 1.0), 1.0);
        assert_eq!(regularize(-0.5, 1.0), -1.0);
        assert_eq!(regularize(0.0, 1.0), 1.0);
    }

    #[test]
    fn test_finite_or_zero() {
        assert_eq!(finite_or_zero(3.0), 3.0);
        assert_eq!(finite_or_zero(f64::NAN), 0.0);
        assert_eq!(finite_or_zero(f64::NEG_INFINITY), 0.0);
    }
}
