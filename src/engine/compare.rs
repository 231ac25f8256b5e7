//! Comparison of two aggregates.

use crate::domain::{Comparison, Direction};

/// Compare aggregate `a` against baseline `b`.
///
/// `None` on either side (or a non-finite value) means there was no data in
/// the corresponding window; the result is `None` and the caller presents
/// "insufficient data" instead of a number. `pct` is relative to `b` and is
/// `None` when `b == 0` to avoid a division by zero.
pub fn compare(a: Option<f64>, b: Option<f64>) -> Option<Comparison> {
    let a = a.filter(|v| v.is_finite())?;
    let b = b.filter(|v| v.is_finite())?;

    let diff = a - b;
    let direction = if diff > 0.0 {
        Direction::Increase
    } else if diff < 0.0 {
        Direction::Decrease
    } else {
        Direction::Unchanged
    };
    let pct = if b != 0.0 {
        Some(diff / b * 100.0)
    } else {
        None
    };

    Some(Comparison {
        a,
        b,
        diff,
        pct,
        direction,
    })
}
