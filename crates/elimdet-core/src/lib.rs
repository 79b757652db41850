//! Determinant kernels based on unpivoted Gaussian elimination.
//!
//! This crate evaluates the determinant of a dense square matrix under three
//! execution strategies so that their costs can be compared on the same
//! input:
//!
//! - **Sequential**: a single thread of control ([`SequentialEliminator`]).
//! - **Thread-parallel**: rows below each pivot distributed over a Rayon pool
//!   ([`ParallelEliminator`]).
//! - **Device-parallel**: one work-item per row on an accelerator
//!   ([`gpu::DeviceEliminator`]).
//!
//! All three implement [`EliminationKernel`], consume their input matrix and
//! return the product of the pivots. No pivot selection, scaling or
//! singularity check is performed: a zero pivot produces a non-finite
//! determinant.
//!
//! # Modules
//!
//! - [`compute`]: the kernel trait and the CPU kernels
//! - [`core`]: matrix type, scalar trait and errors
//! - [`gpu`]: device program, backends and the device kernel

pub mod compute;
pub mod core;
pub mod gpu;

// Re-export commonly used items at the crate root
pub use crate::compute::{
    eliminate_parallel, eliminate_sequential, EliminationKernel, KernelKind, ParallelConfig,
    ParallelEliminator, SequentialEliminator,
};
pub use crate::core::{agrees, relative_difference, ComputeError, Result, Scalar, SquareMatrix};
pub use crate::gpu::{DeviceConfig, DeviceEliminator, DeviceError, DeviceSchedule, HostEmulator};

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use elimdet_core::prelude::*;
///
/// let m = SquareMatrix::from_rows(&[[4.0_f64, 1.0], [2.0, 3.0]]).unwrap();
/// let det = SequentialEliminator.determinant(m).unwrap();
/// assert!((det - 10.0).abs() < 1e-12);
/// ```
pub mod prelude {
    pub use crate::compute::{
        EliminationKernel, KernelKind, ParallelConfig, ParallelEliminator, SequentialEliminator,
    };
    pub use crate::core::{ComputeError, Result, Scalar, SquareMatrix};
    pub use crate::gpu::{
        DeviceBackend, DeviceConfig, DeviceEliminator, DeviceError, DeviceSchedule, HostEmulator,
    };
}
