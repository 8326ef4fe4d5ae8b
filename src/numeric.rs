//! Floating point comparison helpers, thin wrappers around the `approx` crate.

use approx::AbsDiffEq;

/// Absolute tolerance used when checking that the four population fractions of a
/// sample add up to one.
pub const FRACTION_EPSILON: f64 = 1e-9;

/// Compares if two floats are close via `approx::abs_diff_eq` using a maximum absolute difference
/// (epsilon) of `acc`.
#[must_use]
pub fn almost_eq(a: f64, b: f64, acc: f64) -> bool {
    if a.is_infinite() && b.is_infinite() {
        return a == b;
    }
    a.abs_diff_eq(&b, acc)
}
