//! Device-parallel elimination.
//!
//! The elimination is expressed as a data-parallel program with one
//! work-item per row index (see [`kernels`]). A [`DeviceBackend`] owns the
//! transient device buffers for one dispatch and returns the `n` pivot slots;
//! the host multiplies them into the determinant.
//!
//! # Backends
//!
//! - `CudaBackend` (feature `cuda`): compiles the program with NVRTC and runs
//!   it through `cudarc`.
//! - [`HostEmulator`]: runs the same work-items serially on the host, in
//!   launch order. Always available.
//!
//! # Schedules
//!
//! Work-items for different pivot rows carry a true data dependency. The
//! default [`DeviceSchedule::PivotOrdered`] launches one step per pivot so
//! that successive launches on one stream order the steps.
//! [`DeviceSchedule::Unordered`] launches the whole elimination once, every
//! pivot row concurrently, with no synchronization between work-items. Its
//! result on real hardware is not guaranteed to match the sequential kernel.
//!
//! # Example
//!
//! ```rust
//! use elimdet_core::gpu::{DeviceEliminator, DeviceSchedule};
//! use elimdet_core::{EliminationKernel, SquareMatrix};
//!
//! let kernel = DeviceEliminator::host_emulator(DeviceSchedule::PivotOrdered);
//! let matrix = SquareMatrix::<f64>::identity(4).unwrap();
//! assert_eq!(kernel.determinant(matrix).unwrap(), 1.0);
//! ```

#[cfg(feature = "cuda")]
pub mod cuda;

pub mod emulator;
pub mod kernels;

pub use emulator::HostEmulator;

use crate::compute::backend::{EliminationKernel, KernelKind};
use crate::core::{error::Result, matrix::SquareMatrix};
use std::fmt;

/// Order in which the per-row work-items are launched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeviceSchedule {
    /// One launch per pivot step; stream order is the barrier between steps.
    #[default]
    PivotOrdered,
    /// A single launch with every pivot row in flight at once.
    ///
    /// Reproduces the racy outer-loop dispatch as measured; only the host
    /// emulator, which serializes work-items, is guaranteed to agree with the
    /// sequential kernel.
    Unordered,
}

impl fmt::Display for DeviceSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PivotOrdered => write!(f, "pivot-ordered"),
            Self::Unordered => write!(f, "unordered"),
        }
    }
}

/// Device selection and dispatch options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceConfig {
    /// Device ordinal
    pub ordinal: usize,
    /// Launch schedule
    pub schedule: DeviceSchedule,
}

impl DeviceConfig {
    /// Create a configuration for device 0 with the pivot-ordered schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a device by ordinal.
    pub fn with_ordinal(mut self, ordinal: usize) -> Self {
        self.ordinal = ordinal;
        self
    }

    /// Select the launch schedule.
    pub fn with_schedule(mut self, schedule: DeviceSchedule) -> Self {
        self.schedule = schedule;
        self
    }
}

/// Errors raised by device backends.
#[derive(thiserror::Error, Debug, Clone)]
pub enum DeviceError {
    /// No device, or the crate was built without device support.
    #[error("GPU not available")]
    NotAvailable,

    /// Device or compiler driver call failed.
    #[error("Driver error: {0}")]
    Driver(String),

    /// The device program failed to compile; `log` is the compiler output.
    #[error("Device program build failed:\n{log}")]
    Build {
        /// Full build log
        log: String,
    },

    /// The loaded module lacks an expected entry point.
    #[error("Entry point not found in device program: {0}")]
    MissingEntryPoint(String),

    /// A launch was rejected.
    #[error("Kernel launch failed: {0}")]
    Launch(String),

    /// Device allocation or host/device copy failed.
    #[error("Memory transfer failed: {0}")]
    Transfer(String),
}

impl DeviceError {
    /// Create a Build error carrying the compiler log.
    pub fn build_failure<S: Into<String>>(log: S) -> Self {
        Self::Build { log: log.into() }
    }
}

/// A device that can run the elimination program.
pub trait DeviceBackend: Send + Sync {
    /// Backend name for identification.
    fn name(&self) -> &str;

    /// Transfers `matrix` to the device, runs the program with `schedule`,
    /// and reads back the `dim` result slots (`result[i]` is pivot `i`).
    fn dispatch(
        &self,
        matrix: SquareMatrix<f64>,
        schedule: DeviceSchedule,
    ) -> std::result::Result<Vec<f64>, DeviceError>;
}

/// Elimination kernel that runs on a [`DeviceBackend`].
#[derive(Debug, Clone)]
pub struct DeviceEliminator<B> {
    backend: B,
    schedule: DeviceSchedule,
}

impl<B: DeviceBackend> DeviceEliminator<B> {
    /// Wraps a backend with the given schedule.
    pub fn new(backend: B, schedule: DeviceSchedule) -> Self {
        Self { backend, schedule }
    }

    /// The underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The launch schedule.
    pub fn schedule(&self) -> DeviceSchedule {
        self.schedule
    }
}

impl DeviceEliminator<HostEmulator> {
    /// Device kernel executed by the host emulator.
    pub fn host_emulator(schedule: DeviceSchedule) -> Self {
        Self::new(HostEmulator, schedule)
    }
}

impl<B: DeviceBackend> EliminationKernel<f64> for DeviceEliminator<B> {
    fn name(&self) -> &str {
        self.backend.name()
    }

    fn kind(&self) -> KernelKind {
        KernelKind::DeviceParallel
    }

    fn determinant(&self, matrix: SquareMatrix<f64>) -> Result<f64> {
        let dim = matrix.dim();
        log::debug!(
            "dispatching {dim}x{dim} elimination on {} ({})",
            self.backend.name(),
            self.schedule
        );
        let pivots = self.backend.dispatch(matrix, self.schedule)?;
        Ok(pivots.iter().product())
    }
}

/// Whether a CUDA device can be opened.
pub fn cuda_available() -> bool {
    #[cfg(feature = "cuda")]
    {
        cuda::CudaBackend::is_available()
    }
    #[cfg(not(feature = "cuda"))]
    {
        false
    }
}

/// Builds the CUDA device kernel described by `config`.
///
/// Without the `cuda` feature this always returns [`DeviceError::NotAvailable`].
pub fn cuda_eliminator(
    config: &DeviceConfig,
) -> std::result::Result<Box<dyn EliminationKernel<f64>>, DeviceError> {
    #[cfg(feature = "cuda")]
    {
        let backend = cuda::CudaBackend::initialize(config)?;
        Ok(Box::new(DeviceEliminator::new(backend, config.schedule)))
    }
    #[cfg(not(feature = "cuda"))]
    {
        let _ = config;
        Err(DeviceError::NotAvailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_config_builder() {
        let config = DeviceConfig::new()
            .with_ordinal(1)
            .with_schedule(DeviceSchedule::Unordered);
        assert_eq!(config.ordinal, 1);
        assert_eq!(config.schedule, DeviceSchedule::Unordered);
        assert_eq!(DeviceConfig::default().schedule, DeviceSchedule::PivotOrdered);
    }

    #[test]
    fn test_eliminator_accessors() {
        let kernel = DeviceEliminator::host_emulator(DeviceSchedule::Unordered);
        assert_eq!(kernel.schedule(), DeviceSchedule::Unordered);
        assert_eq!(kernel.backend().name(), "host-emulator");
        assert_eq!(EliminationKernel::name(&kernel), "host-emulator");
        assert_eq!(kernel.kind(), KernelKind::DeviceParallel);
    }

    #[test]
    fn test_build_error_carries_log() {
        let err = DeviceError::build_failure("kernel.cu(3): error: identifier \"x\" is undefined");
        let text = err.to_string();
        assert!(text.starts_with("Device program build failed"));
        assert!(text.contains("identifier \"x\" is undefined"));
    }

    #[test]
    fn test_cuda_availability() {
        #[cfg(feature = "cuda")]
        {
            println!("CUDA available: {}", cuda_available());
        }
        #[cfg(not(feature = "cuda"))]
        {
            assert!(!cuda_available());
            assert!(matches!(
                cuda_eliminator(&DeviceConfig::default()),
                Err(DeviceError::NotAvailable)
            ));
        }
    }
}
