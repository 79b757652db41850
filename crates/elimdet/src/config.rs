//! Sweep configuration for the timing harness.

use crate::error::{HarnessError, Result};
use elimdet_core::{DeviceConfig, ParallelConfig};
use std::path::PathBuf;

/// Inclusive range of matrix sizes visited with a fixed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SizeSweep {
    /// First size
    pub start: usize,
    /// Last size (inclusive)
    pub end: usize,
    /// Distance between consecutive sizes
    pub step: usize,
}

impl SizeSweep {
    /// Creates a sweep from `start` to `end` inclusive.
    pub fn new(start: usize, end: usize, step: usize) -> Self {
        Self { start, end, step }
    }

    /// Sizes visited by the sweep, in increasing order.
    ///
    /// Yields nothing for a zero step; call [`HarnessConfig::validate`] first.
    pub fn sizes(&self) -> impl Iterator<Item = usize> {
        let active = self.step != 0;
        (self.start..=self.end)
            .step_by(self.step.max(1))
            .take_while(move |_| active)
    }
}

impl Default for SizeSweep {
    fn default() -> Self {
        Self::new(100, 150, 10)
    }
}

/// Everything one harness run needs.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HarnessConfig {
    /// Matrix sizes to time
    pub sizes: SizeSweep,
    /// Inclusive range of the generated integer entries
    pub value_range: (i32, i32),
    /// Generator seed; `None` draws from entropy
    pub seed: Option<u64>,
    /// Where the binary writes the report
    pub output_path: PathBuf,
    /// Settings of the thread-parallel kernel
    pub parallel: ParallelConfig,
    /// Settings of the device kernel
    pub device: DeviceConfig,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            sizes: SizeSweep::default(),
            value_range: (-100, 100),
            seed: None,
            output_path: PathBuf::from("results.csv"),
            parallel: ParallelConfig::default(),
            device: DeviceConfig::default(),
        }
    }
}

impl HarnessConfig {
    /// Starts a builder from the default configuration.
    pub fn builder() -> HarnessConfigBuilder {
        HarnessConfigBuilder::new()
    }

    /// Checks that the sweep visits at least one size and that entries can be drawn.
    pub fn validate(&self) -> Result<()> {
        let SizeSweep { start, end, step } = self.sizes;
        if step == 0 {
            return Err(HarnessError::invalid_config("size step must be positive"));
        }
        if start == 0 {
            return Err(HarnessError::invalid_config(
                "matrix size must be at least 1",
            ));
        }
        if start > end {
            return Err(HarnessError::invalid_config(format!(
                "empty size sweep: start {start} exceeds end {end}"
            )));
        }
        let (low, high) = self.value_range;
        if low > high {
            return Err(HarnessError::invalid_config(format!(
                "empty value range: {low}..={high}"
            )));
        }
        Ok(())
    }
}

/// Builder for [`HarnessConfig`].
#[derive(Debug, Clone, Default)]
pub struct HarnessConfigBuilder {
    config: HarnessConfig,
}

impl HarnessConfigBuilder {
    /// Create a new builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the size sweep.
    pub fn sizes(mut self, start: usize, end: usize, step: usize) -> Self {
        self.config.sizes = SizeSweep::new(start, end, step);
        self
    }

    /// Set the inclusive range of generated entries.
    pub fn value_range(mut self, low: i32, high: i32) -> Self {
        self.config.value_range = (low, high);
        self
    }

    /// Fix the generator seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Set the report path.
    pub fn output_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.config.output_path = path.into();
        self
    }

    /// Set the thread-parallel kernel settings.
    pub fn parallel(mut self, parallel: ParallelConfig) -> Self {
        self.config.parallel = parallel;
        self
    }

    /// Set the device kernel settings.
    pub fn device(mut self, device: DeviceConfig) -> Self {
        self.config.device = device;
        self
    }

    /// Validates and returns the configuration.
    pub fn build(self) -> Result<HarnessConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_sweep() {
        let config = HarnessConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(
            config.sizes.sizes().collect::<Vec<_>>(),
            vec![100, 110, 120, 130, 140, 150]
        );
        assert_eq!(config.value_range, (-100, 100));
        assert_eq!(config.output_path, PathBuf::from("results.csv"));
    }

    #[test]
    fn test_sweep_end_not_on_step() {
        let sweep = SizeSweep::new(3, 10, 4);
        assert_eq!(sweep.sizes().collect::<Vec<_>>(), vec![3, 7]);
    }

    #[test]
    fn test_validate_rejects_bad_sweeps() {
        for (start, end, step) in [(10, 20, 0), (0, 20, 5), (30, 20, 5)] {
            let result = HarnessConfig::builder().sizes(start, end, step).build();
            assert!(
                matches!(result, Err(HarnessError::InvalidConfig { .. })),
                "{start}..={end} step {step}"
            );
        }
    }

    #[test]
    fn test_validate_rejects_empty_value_range() {
        let err = HarnessConfig::builder()
            .value_range(5, -5)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("empty value range"));
    }

    #[test]
    fn test_builder() {
        let config = HarnessConfig::builder()
            .sizes(2, 6, 2)
            .value_range(-3, 3)
            .seed(11)
            .output_path("out.csv")
            .parallel(ParallelConfig::new().with_num_threads(2))
            .build()
            .unwrap();

        assert_eq!(config.sizes, SizeSweep::new(2, 6, 2));
        assert_eq!(config.seed, Some(11));
        assert_eq!(config.parallel.num_threads, Some(2));
        assert_eq!(config.output_path, PathBuf::from("out.csv"));
    }
}
