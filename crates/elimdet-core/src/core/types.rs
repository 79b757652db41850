//! Scalar trait shared by every kernel.

use nalgebra::{RealField, Scalar as NalgebraScalar};
use num_traits::{Float, FromPrimitive};
use std::fmt::{Debug, Display};

/// Trait for element types the kernels operate on (f32 or f64).
///
/// The thread-parallel kernel needs `Send + Sync`; conversion to and from
/// `nalgebra` matrices needs the `nalgebra` bounds.
pub trait Scalar:
    NalgebraScalar
    + RealField
    + Float
    + FromPrimitive
    + Display
    + Debug
    + Default
    + Copy
    + Send
    + Sync
    + 'static
{
    /// Relative tolerance used when comparing results of different variants.
    const AGREEMENT_TOLERANCE: Self;
}

impl Scalar for f32 {
    const AGREEMENT_TOLERANCE: Self = 1e-4;
}

impl Scalar for f64 {
    const AGREEMENT_TOLERANCE: Self = 1e-6;
}

/// Relative difference `|a - b| / max(|a|, |b|)`, zero when both are zero.
///
/// Non-finite inputs yield NaN unless they are bitwise-equal infinities.
pub fn relative_difference<T: Scalar>(a: T, b: T) -> T {
    if a == b {
        return T::zero();
    }
    let scale = Float::max(Float::abs(a), Float::abs(b));
    Float::abs(a - b) / scale
}

/// Whether two determinants agree within `T::AGREEMENT_TOLERANCE`.
pub fn agrees<T: Scalar>(a: T, b: T) -> bool {
    relative_difference(a, b) <= T::AGREEMENT_TOLERANCE
}
