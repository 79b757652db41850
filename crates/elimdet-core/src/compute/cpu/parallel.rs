//! Thread-parallel elimination using Rayon.
//!
//! The pivot loop stays ordered: step `i` reads row `i` only after every
//! update from steps `0..i` has been joined. Within one step the rows below
//! the pivot are independent of each other and are distributed across the
//! pool. The join at the end of each step acts as the barrier between pivot
//! steps.
//!
//! After elimination the diagonal is combined with a multiplicative
//! reduction. Blocks of `reduction_block` entries are multiplied in parallel
//! and the partial products are folded in block order, so repeated calls on
//! the same input return bit-identical results.

use crate::compute::backend::{EliminationKernel, KernelKind};
use crate::compute::cpu::sequential::eliminate_row;
use crate::core::{
    error::{ComputeError, Result},
    matrix::SquareMatrix,
    types::Scalar,
};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::sync::Arc;

/// Configuration for parallel execution.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParallelConfig {
    /// Number of threads to use (None = use rayon default)
    pub num_threads: Option<usize>,
    /// Minimum number of rows below the pivot for a step to be distributed
    pub min_rows_for_parallel: usize,
    /// Minimum number of rows handed to one rayon task
    pub min_rows_per_task: usize,
    /// Number of diagonal entries per block in the final reduction
    pub reduction_block: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            num_threads: None,
            min_rows_for_parallel: 2,
            min_rows_per_task: 1,
            reduction_block: 64,
        }
    }
}

impl ParallelConfig {
    /// Create a new parallel configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of threads.
    pub fn with_num_threads(mut self, threads: usize) -> Self {
        self.num_threads = Some(threads);
        self
    }

    /// Set the minimum number of rows below the pivot for parallel execution.
    pub fn with_min_rows_for_parallel(mut self, rows: usize) -> Self {
        self.min_rows_for_parallel = rows;
        self
    }

    /// Set the minimum number of rows per rayon task.
    pub fn with_min_rows_per_task(mut self, rows: usize) -> Self {
        self.min_rows_per_task = rows.max(1);
        self
    }

    /// Set the block length of the multiplicative reduction.
    pub fn with_reduction_block(mut self, block: usize) -> Self {
        self.reduction_block = block.max(1);
        self
    }

    /// Check if a pivot step with `rows_below` rows should be distributed.
    pub fn should_parallelize(&self, rows_below: usize) -> bool {
        rows_below >= self.min_rows_for_parallel.max(2)
    }
}

/// Runs ordered-pivot elimination on the current rayon pool and returns the
/// product of the pivots.
pub fn eliminate_parallel<T: Scalar>(matrix: &mut SquareMatrix<T>, config: &ParallelConfig) -> T {
    let n = matrix.dim();
    let data = matrix.as_mut_slice();

    for i in 0..n {
        let (head, tail) = data.split_at_mut((i + 1) * n);
        let pivot_row = &head[i * n..];
        let rows_below = tail.len() / n;

        if config.should_parallelize(rows_below) {
            tail.par_chunks_exact_mut(n)
                .with_min_len(config.min_rows_per_task.max(1))
                .for_each(|row| eliminate_row(pivot_row, row, i));
        } else {
            for row in tail.chunks_exact_mut(n) {
                eliminate_row(pivot_row, row, i);
            }
        }
    }

    diagonal_product_parallel(matrix, config.reduction_block)
}

/// Multiplicative reduction over the diagonal in fixed-size blocks.
fn diagonal_product_parallel<T: Scalar>(matrix: &SquareMatrix<T>, block: usize) -> T {
    let n = matrix.dim();
    let block = block.max(1);
    let blocks = n.div_ceil(block);

    let partials: Vec<T> = (0..blocks)
        .into_par_iter()
        .map(|b| {
            let start = b * block;
            let end = (start + block).min(n);
            (start..end).fold(T::one(), |acc, i| acc * matrix[(i, i)])
        })
        .collect();

    partials.into_iter().fold(T::one(), |acc, p| acc * p)
}

/// Elimination kernel that distributes row updates across CPU threads.
#[derive(Debug, Clone)]
pub struct ParallelEliminator {
    config: ParallelConfig,
    pool: Option<Arc<ThreadPool>>,
}

impl ParallelEliminator {
    /// Creates a kernel on the global rayon pool, or on a dedicated pool when
    /// `config.num_threads` is set.
    pub fn new(config: ParallelConfig) -> Result<Self> {
        let pool = match config.num_threads {
            Some(threads) => {
                let pool = ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("elimdet-worker-{i}"))
                    .build()
                    .map_err(ComputeError::thread_pool)?;
                log::debug!("built dedicated elimination pool with {threads} threads");
                Some(Arc::new(pool))
            }
            None => None,
        };
        Ok(Self { config, pool })
    }

    /// The configuration this kernel was built with.
    pub fn config(&self) -> &ParallelConfig {
        &self.config
    }

    /// Number of worker threads the kernel runs on.
    pub fn num_threads(&self) -> usize {
        self.pool
            .as_ref()
            .map_or_else(rayon::current_num_threads, |pool| pool.current_num_threads())
    }
}

impl Default for ParallelEliminator {
    fn default() -> Self {
        Self {
            config: ParallelConfig::default(),
            pool: None,
        }
    }
}

impl<T: Scalar> EliminationKernel<T> for ParallelEliminator {
    fn name(&self) -> &str {
        "cpu-parallel"
    }

    fn kind(&self) -> KernelKind {
        KernelKind::ThreadParallel
    }

    fn determinant(&self, mut matrix: SquareMatrix<T>) -> Result<T> {
        let det = match &self.pool {
            Some(pool) => pool.install(|| eliminate_parallel(&mut matrix, &self.config)),
            None => eliminate_parallel(&mut matrix, &self.config),
        };
        Ok(det)
    }
}
