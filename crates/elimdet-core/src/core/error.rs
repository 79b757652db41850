//! Error types for determinant computation.
//!
//! Numeric degeneracy (a zero or tiny pivot) is deliberately absent from this
//! taxonomy: it surfaces as a non-finite determinant, never as an error.

use crate::gpu::DeviceError;
use thiserror::Error;

/// Errors that can occur while building matrices or running a kernel.
#[derive(Debug, Clone, Error)]
pub enum ComputeError {
    /// A matrix with zero rows was requested.
    #[error("Matrix dimension must be at least 1")]
    EmptyMatrix,

    /// Buffer length does not match the declared dimension.
    ///
    /// This error occurs when a row-major buffer or a row slice has a
    /// different number of elements than the square shape requires.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected shape or length
        expected: String,
        /// Actual shape or length
        actual: String,
    },

    /// Input matrix is not square.
    #[error("Matrix is not square: {rows}x{cols}")]
    NotSquare {
        /// Number of rows
        rows: usize,
        /// Number of columns
        cols: usize,
    },

    /// The dedicated worker pool could not be created.
    #[error("Thread pool construction failed: {0}")]
    ThreadPool(String),

    /// Propagated device error.
    #[error("Device operation failed: {0}")]
    Device(#[from] DeviceError),
}

impl ComputeError {
    /// Create a DimensionMismatch error.
    pub fn dimension_mismatch<S1, S2>(expected: S1, actual: S2) -> Self
    where
        S1: std::fmt::Display,
        S2: std::fmt::Display,
    {
        Self::DimensionMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Create a NotSquare error.
    pub fn not_square(rows: usize, cols: usize) -> Self {
        Self::NotSquare { rows, cols }
    }

    /// Create a ThreadPool error from any displayable cause.
    pub fn thread_pool<E: std::fmt::Display>(cause: E) -> Self {
        Self::ThreadPool(cause.to_string())
    }
}

/// Result type alias for operations that can produce ComputeError.
pub type Result<T> = std::result::Result<T, ComputeError>;
