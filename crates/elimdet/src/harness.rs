//! The timing sweep.

use crate::config::HarnessConfig;
use crate::error::Result;
use crate::generate::MatrixGenerator;
use crate::report::{Measurement, Report, ReportRow};
use elimdet_core::gpu::{cuda_available, cuda_eliminator};
use elimdet_core::{
    DeviceConfig, DeviceEliminator, DeviceError, EliminationKernel, ParallelEliminator,
    SequentialEliminator, SquareMatrix,
};
use log::{debug, info, warn};
use std::time::Instant;

/// Picks the device kernel for `config`.
///
/// Uses CUDA when the crate is built with the `cuda` feature and a device
/// opens; any failure after that point, including a program build failure,
/// is returned. Otherwise falls back to the host emulator.
pub fn select_device(config: &DeviceConfig) -> Result<Box<dyn EliminationKernel<f64>>> {
    let opened = cuda_available().then(|| cuda_eliminator(config));
    choose_device(config, opened)
}

/// `opened` is `None` when no device is present, otherwise the outcome of
/// initializing it.
fn choose_device(
    config: &DeviceConfig,
    opened: Option<std::result::Result<Box<dyn EliminationKernel<f64>>, DeviceError>>,
) -> Result<Box<dyn EliminationKernel<f64>>> {
    if let Some(kernel) = opened {
        let kernel = kernel?;
        info!("Using CUDA device {} ({} schedule)", config.ordinal, config.schedule);
        return Ok(kernel);
    }
    warn!(
        "No CUDA device available, device kernel runs on the host emulator ({} schedule)",
        config.schedule
    );
    Ok(Box::new(DeviceEliminator::host_emulator(config.schedule)))
}

/// Runs every kernel on the same input for each size of a sweep.
pub struct Harness {
    kernels: Vec<Box<dyn EliminationKernel<f64>>>,
}

impl Harness {
    /// Harness over an explicit list of kernels, timed in the given order.
    pub fn new(kernels: Vec<Box<dyn EliminationKernel<f64>>>) -> Self {
        Self { kernels }
    }

    /// Sequential and thread-parallel kernels followed by `device`.
    pub fn with_device(
        config: &HarnessConfig,
        device: Box<dyn EliminationKernel<f64>>,
    ) -> Result<Self> {
        let parallel = ParallelEliminator::new(config.parallel.clone())?;
        Ok(Self::new(vec![
            Box::new(SequentialEliminator),
            Box::new(parallel),
            device,
        ]))
    }

    /// Standard kernels with the device chosen by [`select_device`].
    pub fn from_config(config: &HarnessConfig) -> Result<Self> {
        let device = select_device(&config.device)?;
        Self::with_device(config, device)
    }

    /// Standard kernels with the device kernel on the host emulator.
    pub fn with_host_emulator(config: &HarnessConfig) -> Result<Self> {
        let device = DeviceEliminator::host_emulator(config.device.schedule);
        Self::with_device(config, Box::new(device))
    }

    /// Kernels in timing order.
    pub fn kernels(&self) -> &[Box<dyn EliminationKernel<f64>>] {
        &self.kernels
    }

    /// Generates one matrix per size and times every kernel on a copy of it.
    pub fn run(&self, config: &HarnessConfig) -> Result<Report> {
        config.validate()?;
        let (low, high) = config.value_range;
        let mut generator = MatrixGenerator::from_seed_option(low, high, config.seed)?;

        let mut report = Report::new();
        for size in config.sizes.sizes() {
            info!("Matrix size {size}");
            let matrix = generator.generate(size)?;
            let row = self.run_size(&matrix)?;
            if !row.variants_agree() {
                debug!("Kernels disagree at size {size}: {:?}", row.measurements);
            }
            report.push(row);
        }
        Ok(report)
    }

    /// Times every kernel on its own copy of `matrix`.
    pub fn run_size(&self, matrix: &SquareMatrix<f64>) -> Result<ReportRow> {
        let mut measurements = Vec::with_capacity(self.kernels.len());
        for kernel in &self.kernels {
            let input = matrix.clone();
            let start = Instant::now();
            let determinant = kernel.determinant(input)?;
            let seconds = start.elapsed().as_secs_f64();

            debug!(
                "{} (n = {}): {seconds:.6} s, determinant {determinant}",
                kernel.name(),
                matrix.dim()
            );
            measurements.push(Measurement {
                kind: kernel.kind(),
                kernel: kernel.name().to_string(),
                seconds,
                determinant,
            });
        }
        Ok(ReportRow {
            size: matrix.dim(),
            measurements,
        })
    }
}
