//! Sequential unpivoted Gaussian elimination.

use crate::compute::backend::{EliminationKernel, KernelKind};
use crate::core::{error::Result, matrix::SquareMatrix, types::Scalar};

/// Subtracts `ratio * pivot_row` from `row`, where
/// `ratio = row[pivot] / pivot_row[pivot]`.
///
/// Every column is updated, including those left of the pivot.
#[inline]
pub(crate) fn eliminate_row<T: Scalar>(pivot_row: &[T], row: &mut [T], pivot: usize) {
    let ratio = row[pivot] / pivot_row[pivot];
    for (x, &p) in row.iter_mut().zip(pivot_row) {
        *x = *x - ratio * p;
    }
}

/// Runs forward elimination over `matrix` and returns the product of the
/// pivots.
///
/// Step `i` reads row `i` only after steps `0..i` have finished writing it,
/// so the result is the exact determinant up to rounding whenever every pivot
/// is non-zero. Zero pivots are not detected.
pub fn eliminate_sequential<T: Scalar>(matrix: &mut SquareMatrix<T>) -> T {
    let n = matrix.dim();
    let data = matrix.as_mut_slice();
    let mut det = T::one();

    for i in 0..n {
        let (head, tail) = data.split_at_mut((i + 1) * n);
        let pivot_row = &head[i * n..];
        for row in tail.chunks_exact_mut(n) {
            eliminate_row(pivot_row, row, i);
        }
        det = det * pivot_row[i];
    }

    det
}

/// Single-threaded elimination kernel.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialEliminator;

impl SequentialEliminator {
    /// Creates the kernel.
    pub fn new() -> Self {
        Self
    }
}

impl<T: Scalar> EliminationKernel<T> for SequentialEliminator {
    fn name(&self) -> &str {
        "cpu"
    }

    fn kind(&self) -> KernelKind {
        KernelKind::Sequential
    }

    fn determinant(&self, mut matrix: SquareMatrix<T>) -> Result<T> {
        Ok(eliminate_sequential(&mut matrix))
    }
}
