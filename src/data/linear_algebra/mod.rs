//! # Linear algebra primitives
//!
//! Containers used to hand a constraint matrix to the solver, in either a dense or a sparse format.
use num_traits::{Float, One, Zero};

pub mod matrix;

/// Absolute tolerance below which a value is considered to be zero.
pub const EPSILON: f64 = 1e-10;

/// A column (or row) index combined with the value stored there.
pub type SparseTuple<F> = (usize, F);

/// Default tolerance for a float type.
///
/// This is `EPSILON`, unless that is too close to the machine precision of `F`; then a small
/// multiple of the machine precision is used instead.
pub fn default_epsilon<F: Float>() -> F {
    let configured = F::from(EPSILON).unwrap_or_else(F::epsilon);
    let floor = F::epsilon() * F::from(1_024).unwrap_or_else(F::one);

    configured.max(floor)
}

/// Snap a value to exact zero when its magnitude is below `epsilon`.
#[inline]
pub fn snap<F: Float>(value: F, epsilon: F) -> F {
    if value.abs() < epsilon {
        F::zero()
    } else {
        value
    }
}
