//! Random input matrices.

use crate::error::{HarnessError, Result};
use elimdet_core::SquareMatrix;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Draws square matrices of uniform integers stored as `f64`.
#[derive(Debug, Clone)]
pub struct MatrixGenerator {
    rng: SmallRng,
    values: Uniform<i32>,
}

impl MatrixGenerator {
    /// Generator over `low..=high` seeded from entropy.
    pub fn new(low: i32, high: i32) -> Result<Self> {
        Self::build(low, high, SmallRng::from_entropy())
    }

    /// Generator over `low..=high` with a fixed seed.
    pub fn with_seed(low: i32, high: i32, seed: u64) -> Result<Self> {
        Self::build(low, high, SmallRng::seed_from_u64(seed))
    }

    /// Generator using `seed` when present and entropy otherwise.
    pub fn from_seed_option(low: i32, high: i32, seed: Option<u64>) -> Result<Self> {
        match seed {
            Some(seed) => Self::with_seed(low, high, seed),
            None => Self::new(low, high),
        }
    }

    fn build(low: i32, high: i32, rng: SmallRng) -> Result<Self> {
        if low > high {
            return Err(HarnessError::invalid_config(format!(
                "empty value range: {low}..={high}"
            )));
        }
        Ok(Self {
            rng,
            values: Uniform::new_inclusive(low, high),
        })
    }

    /// Fills a `dim x dim` matrix in row-major order.
    pub fn generate(&mut self, dim: usize) -> Result<SquareMatrix<f64>> {
        let data = (0..dim * dim)
            .map(|_| f64::from(self.values.sample(&mut self.rng)))
            .collect();
        Ok(SquareMatrix::from_row_major(dim, data)?)
    }
}
