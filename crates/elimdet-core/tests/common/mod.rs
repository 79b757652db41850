//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use elimdet_core::gpu::cuda_eliminator;
use elimdet_core::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Every kernel that can run in this environment.
///
/// The CUDA kernel is included only when the crate is built with `cuda` and
/// a device can be opened.
pub fn all_kernels() -> Vec<Box<dyn EliminationKernel<f64>>> {
    let mut kernels: Vec<Box<dyn EliminationKernel<f64>>> = vec![
        Box::new(SequentialEliminator),
        Box::new(ParallelEliminator::default()),
        Box::new(
            ParallelEliminator::new(
                ParallelConfig::new()
                    .with_num_threads(3)
                    .with_reduction_block(7),
            )
            .unwrap(),
        ),
        Box::new(DeviceEliminator::host_emulator(DeviceSchedule::PivotOrdered)),
    ];
    if let Ok(cuda) = cuda_eliminator(&DeviceConfig::default()) {
        kernels.push(cuda);
    }
    kernels
}

/// Matrix with entries drawn uniformly from `[-1, 1)`.
pub fn random_matrix(dim: usize, seed: u64) -> SquareMatrix<f64> {
    let mut rng = SmallRng::seed_from_u64(seed);
    SquareMatrix::from_fn(dim, |_, _| rng.gen_range(-1.0..1.0)).unwrap()
}

/// `random_matrix` shifted by `dim` on the diagonal; every pivot stays large.
pub fn dominant_matrix(dim: usize, seed: u64) -> SquareMatrix<f64> {
    let mut m = random_matrix(dim, seed);
    for i in 0..dim {
        m[(i, i)] += dim as f64;
    }
    m
}

/// Determinant by Laplace expansion along the first row.
pub fn cofactor_determinant(rows: &[Vec<f64>]) -> f64 {
    let n = rows.len();
    if n == 1 {
        return rows[0][0];
    }
    (0..n)
        .map(|col| {
            let minor: Vec<Vec<f64>> = rows[1..]
                .iter()
                .map(|row| {
                    row.iter()
                        .enumerate()
                        .filter(|&(j, _)| j != col)
                        .map(|(_, &x)| x)
                        .collect()
                })
                .collect();
            let sign = if col % 2 == 0 { 1.0 } else { -1.0 };
            sign * rows[0][col] * cofactor_determinant(&minor)
        })
        .sum()
}
