//! Edge weight abstraction
//!
//! Weights may be any primitive integer or float. Every sum, difference
//! and comparison made by the solver stays in the tree's own weight type.

use std::cmp::Ordering;
use std::fmt;

use num_traits::Num;

/// Numeric type usable as an edge weight.
///
/// Blanket-implemented for every `Num + Copy + PartialOrd` type, so `u32`,
/// `i64`, `f64` and friends all qualify.
pub trait Weight: Num + Copy + PartialOrd + fmt::Debug + fmt::Display + Send + Sync + 'static {}

impl<T> Weight for T where T: Num + Copy + PartialOrd + fmt::Debug + fmt::Display + Send + Sync + 'static {}

/// Whether `w` can be used as an edge weight: comparable and not negative.
///
/// Rejects `NaN` for float weights.
#[inline]
pub fn is_admissible<W: Weight>(w: W) -> bool {
    matches!(
        w.partial_cmp(&W::zero()),
        Some(Ordering::Greater | Ordering::Equal)
    )
}

/// Total comparison over admissible weights.
///
/// Incomparable pairs compare equal; they cannot occur once every edge weight
/// passed [`is_admissible`].
#[inline]
pub fn compare<W: Weight>(a: &W, b: &W) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admissible_weights() {
        assert!(is_admissible(0u32));
        assert!(is_admissible(7i64));
        assert!(is_admissible(0.5f64));
        assert!(!is_admissible(-1i32));
        assert!(!is_admissible(-0.25f32));
        assert!(!is_admissible(f64::NAN));
    }

    #[test]
    fn test_compare_orders_floats() {
        let mut values = vec![3.5f64, 1.0, 2.25, 0.0];
        values.sort_by(compare);
        assert_eq!(values, vec![0.0, 1.0, 2.25, 3.5]);
        assert_eq!(compare(&f64::NAN, &1.0), Ordering::Equal);
    }
}
