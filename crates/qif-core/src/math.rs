//! Math helpers for no_std compatibility.
//!
//! In no_std mode, f64 doesn't have transcendental methods like log2 or abs.
//! This module provides them through libm, together with the tolerance-based
//! comparisons used everywhere a probability is compared.

use crate::constants::EPS;

/// Base-2 logarithm.
#[inline]
pub fn log2(x: f64) -> f64 {
    libm::log2(x)
}

/// Absolute value.
#[inline]
pub fn abs(x: f64) -> f64 {
    libm::fabs(x)
}

/// `true` when `|a - b| <= eps`.
#[inline]
pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    abs(a - b) <= eps
}

/// `true` when `|a| <= eps`.
#[inline]
pub fn approx_zero(a: f64, eps: f64) -> bool {
    abs(a) <= eps
}

/// Entrywise [`approx_eq`] with the crate tolerance. Slices of different
/// lengths are never equal.
pub fn slices_approx_eq(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| approx_eq(*x, *y, EPS))
}

/// Largest element of a non-empty iterator, `None` when it is empty.
pub fn max_of<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
    values
        .into_iter()
        .fold(None, |best, v| match best {
            Some(b) if b >= v => Some(b),
            _ => Some(v),
        })
}

/// `-p log2 p`, with the convention that a zero probability contributes 0.
#[inline]
pub fn entropy_term(p: f64) -> f64 {
    if p > 0.0 {
        -p * log2(p)
    } else {
        0.0
    }
}
