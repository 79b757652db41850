//! Kernel abstraction shared by every execution strategy.
//!
//! This module defines the trait each elimination variant implements
//! (sequential, thread-parallel, device-parallel) so that a harness can time
//! them uniformly.

use crate::core::{error::Result, matrix::SquareMatrix, types::Scalar};
use std::fmt;

/// Execution strategy of an elimination kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KernelKind {
    /// Single thread of control.
    Sequential,
    /// Rows below each pivot distributed across CPU worker threads.
    ThreadParallel,
    /// One work-item per row index on an accelerator (or its host emulator).
    DeviceParallel,
}

impl KernelKind {
    /// All strategies in report column order.
    pub const ALL: [Self; 3] = [Self::Sequential, Self::ThreadParallel, Self::DeviceParallel];
}

impl fmt::Display for KernelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => write!(f, "sequential"),
            Self::ThreadParallel => write!(f, "thread-parallel"),
            Self::DeviceParallel => write!(f, "device-parallel"),
        }
    }
}

/// Trait for determinant kernels based on unpivoted Gaussian elimination.
///
/// The matrix is consumed: elimination is destructive, so callers must hand
/// each invocation its own copy. Implementations never validate pivots; a
/// zero pivot yields a non-finite determinant rather than an error.
pub trait EliminationKernel<T: Scalar>: Send + Sync {
    /// Backend name for identification.
    fn name(&self) -> &str;

    /// Execution strategy of this kernel.
    fn kind(&self) -> KernelKind;

    /// Eliminates `matrix` in place and returns the product of its pivots.
    fn determinant(&self, matrix: SquareMatrix<T>) -> Result<T>;
}

impl<T: Scalar, K: EliminationKernel<T> + ?Sized> EliminationKernel<T> for Box<K> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn kind(&self) -> KernelKind {
        (**self).kind()
    }

    fn determinant(&self, matrix: SquareMatrix<T>) -> Result<T> {
        (**self).determinant(matrix)
    }
}
