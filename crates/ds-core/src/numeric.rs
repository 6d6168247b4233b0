use crate::DsError;

/// Floating point type used throughout system
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, DsError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(DsError::NonFinite { what, value: v })
    }
}

/// Finite and strictly greater than zero.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, DsError> {
    ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(DsError::OutOfRange {
            what,
            value: v,
            range: "> 0",
        })
    }
}

/// Finite and greater than or equal to zero.
pub fn ensure_non_negative(v: Real, what: &'static str) -> Result<Real, DsError> {
    ensure_finite(v, what)?;
    if v >= 0.0 {
        Ok(v)
    } else {
        Err(DsError::OutOfRange {
            what,
            value: v,
            range: ">= 0",
        })
    }
}

/// Finite and strictly inside `(lo, hi)`.
pub fn ensure_open_interval(
    v: Real,
    lo: Real,
    hi: Real,
    what: &'static str,
    range: &'static str,
) -> Result<Real, DsError> {
    ensure_finite(v, what)?;
    if v > lo && v < hi {
        Ok(v)
    } else {
        Err(DsError::OutOfRange { what, value: v, range })
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn open_interval_accepts_only_interior(v in -2.0f64..2.0) {
            let inside = v > 0.0 && v < 1.0;
            prop_assert_eq!(ensure_open_interval(v, 0.0, 1.0, "x", "(0, 1)").is_ok(), inside);
        }
    }
}
