//! Contiguous row-major square matrix.
//!
//! Every kernel consumes a [`SquareMatrix`] by value and mutates it in place,
//! so callers that want to reuse an input must clone it first. The buffer is a
//! single `Vec<T>` addressed with row stride `dim`.

use crate::core::error::{ComputeError, Result};
use crate::core::types::Scalar;
use nalgebra::DMatrix;
use std::ops::{Index, IndexMut};

/// Dense square matrix stored row-major in one owned buffer.
///
/// Invariant: `dim >= 1` and `data.len() == dim * dim`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SquareMatrix<T: Scalar> {
    dim: usize,
    data: Vec<T>,
}

impl<T: Scalar> SquareMatrix<T> {
    /// Wraps a row-major buffer of `dim * dim` elements.
    pub fn from_row_major(dim: usize, data: Vec<T>) -> Result<Self> {
        if dim == 0 {
            return Err(ComputeError::EmptyMatrix);
        }
        let expected = dim * dim;
        if data.len() != expected {
            return Err(ComputeError::dimension_mismatch(
                format!("{expected} elements ({dim}x{dim})"),
                format!("{} elements", data.len()),
            ));
        }
        Ok(Self { dim, data })
    }

    /// Builds a matrix from a slice of rows, each of length `rows.len()`.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self> {
        let dim = rows.len();
        if dim == 0 {
            return Err(ComputeError::EmptyMatrix);
        }
        let mut data = Vec::with_capacity(dim * dim);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != dim {
                return Err(ComputeError::dimension_mismatch(
                    format!("row {i} with {dim} elements"),
                    format!("{} elements", row.len()),
                ));
            }
            data.extend_from_slice(row);
        }
        Ok(Self { dim, data })
    }

    /// Builds a matrix whose entry `(i, j)` is `f(i, j)`.
    pub fn from_fn<F>(dim: usize, mut f: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> T,
    {
        if dim == 0 {
            return Err(ComputeError::EmptyMatrix);
        }
        let data = (0..dim * dim).map(|idx| f(idx / dim, idx % dim)).collect();
        Ok(Self { dim, data })
    }

    /// Identity matrix of the given dimension.
    pub fn identity(dim: usize) -> Result<Self> {
        Self::from_fn(dim, |i, j| if i == j { T::one() } else { T::zero() })
    }

    /// All-zero matrix of the given dimension.
    pub fn zeros(dim: usize) -> Result<Self> {
        Self::from_fn(dim, |_, _| T::zero())
    }

    /// Number of rows (and columns).
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Row `i` as a slice of length `dim`.
    #[inline]
    pub fn row(&self, i: usize) -> &[T] {
        &self.data[i * self.dim..(i + 1) * self.dim]
    }

    /// Row `i` as a mutable slice of length `dim`.
    #[inline]
    pub fn row_mut(&mut self, i: usize) -> &mut [T] {
        let dim = self.dim;
        &mut self.data[i * dim..(i + 1) * dim]
    }

    /// The whole buffer, row-major.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// The whole buffer, row-major, mutable.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consumes the matrix and returns its row-major buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Diagonal entries in row order.
    pub fn diagonal(&self) -> Vec<T> {
        (0..self.dim).map(|i| self[(i, i)]).collect()
    }

    /// Product of the diagonal entries, accumulated from row 0 downwards.
    pub fn diagonal_product(&self) -> T {
        (0..self.dim).fold(T::one(), |acc, i| acc * self[(i, i)])
    }

    /// Copies into a (column-major) `nalgebra` matrix.
    pub fn to_dmatrix(&self) -> DMatrix<T> {
        DMatrix::from_row_slice(self.dim, self.dim, &self.data)
    }
}

impl<T: Scalar> TryFrom<&DMatrix<T>> for SquareMatrix<T> {
    type Error = ComputeError;

    fn try_from(matrix: &DMatrix<T>) -> Result<Self> {
        let (rows, cols) = matrix.shape();
        if rows != cols {
            return Err(ComputeError::not_square(rows, cols));
        }
        Self::from_fn(rows, |i, j| matrix[(i, j)])
    }
}

impl<T: Scalar> Index<(usize, usize)> for SquareMatrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.data[row * self.dim + col]
    }
}

impl<T: Scalar> IndexMut<(usize, usize)> for SquareMatrix<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        &mut self.data[row * self.dim + col]
    }
}
