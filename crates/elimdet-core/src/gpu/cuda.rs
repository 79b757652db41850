//! CUDA backend for the device-parallel kernel.
#![allow(unsafe_code)]

use super::kernels::{self, LaunchGeometry};
use super::{DeviceBackend, DeviceConfig, DeviceError, DeviceSchedule};
use crate::core::matrix::SquareMatrix;
use cudarc::driver::{CudaDevice, CudaFunction, LaunchAsync, LaunchConfig};
use cudarc::nvrtc::{compile_ptx, CompileError, Ptx};
use std::sync::Arc;

/// Compiles device program source, surfacing the NVRTC log on failure.
pub fn compile_program(source: &str) -> Result<Ptx, DeviceError> {
    compile_ptx(source).map_err(|err| match err {
        CompileError::CompileError { log, .. } => {
            DeviceError::build_failure(log.to_string_lossy())
        }
        other => DeviceError::Driver(format!("NVRTC failure: {other:?}")),
    })
}

/// CUDA backend holding a device context and the loaded entry points.
pub struct CudaBackend {
    device: Arc<CudaDevice>,
    unordered: CudaFunction,
    step: CudaFunction,
}

impl CudaBackend {
    /// Opens the device, compiles the elimination program and loads it.
    pub fn initialize(config: &DeviceConfig) -> Result<Self, DeviceError> {
        let device = CudaDevice::new(config.ordinal).map_err(|e| {
            DeviceError::Driver(format!("Failed to create device {}: {e}", config.ordinal))
        })?;

        let ptx = compile_program(kernels::ELIMINATION_SOURCE)?;
        device
            .load_ptx(ptx, kernels::MODULE_NAME, &kernels::ENTRY_POINTS)
            .map_err(|e| DeviceError::Driver(format!("Failed to load module: {e}")))?;

        let unordered = entry_point(&device, kernels::UNORDERED_ENTRY)?;
        let step = entry_point(&device, kernels::STEP_ENTRY)?;
        log::info!("CUDA device {} ready", device.ordinal());

        Ok(Self {
            device,
            unordered,
            step,
        })
    }

    /// Check if a CUDA device is present.
    pub fn is_available() -> bool {
        CudaDevice::new(0).is_ok()
    }

    /// Ordinal of the device this backend runs on.
    pub fn ordinal(&self) -> usize {
        self.device.ordinal()
    }
}

fn entry_point(device: &Arc<CudaDevice>, name: &str) -> Result<CudaFunction, DeviceError> {
    device
        .get_func(kernels::MODULE_NAME, name)
        .ok_or_else(|| DeviceError::MissingEntryPoint(name.to_string()))
}

impl DeviceBackend for CudaBackend {
    fn name(&self) -> &str {
        "cuda"
    }

    fn dispatch(
        &self,
        matrix: SquareMatrix<f64>,
        schedule: DeviceSchedule,
    ) -> Result<Vec<f64>, DeviceError> {
        let n = matrix.dim();
        let geometry = LaunchGeometry::for_rows(n)?;
        let dim = geometry.global_size as i32;
        let config = LaunchConfig {
            grid_dim: (geometry.groups(), 1, 1),
            block_dim: (geometry.local_size, 1, 1),
            shared_mem_bytes: 0,
        };

        let mut mat = self
            .device
            .htod_sync_copy(matrix.as_slice())
            .map_err(|e| DeviceError::Transfer(format!("H2D copy failed: {e}")))?;
        let mut result = self
            .device
            .alloc_zeros::<f64>(n)
            .map_err(|e| DeviceError::Transfer(format!("Failed to allocate result: {e}")))?;

        match schedule {
            DeviceSchedule::Unordered => {
                let launched = unsafe {
                    self.unordered
                        .clone()
                        .launch(config, (&mut mat, &mut result, dim))
                };
                launched.map_err(|e| DeviceError::Launch(e.to_string()))?;
            }
            DeviceSchedule::PivotOrdered => {
                for pivot in 0..dim {
                    let launched = unsafe {
                        self.step
                            .clone()
                            .launch(config, (&mut mat, &mut result, dim, pivot))
                    };
                    launched.map_err(|e| DeviceError::Launch(format!("pivot {pivot}: {e}")))?;
                }
            }
        }

        // Blocking read; waits for every launch queued above.
        self.device
            .dtoh_sync_copy(&result)
            .map_err(|e| DeviceError::Transfer(format!("D2H copy failed: {e}")))
    }
}
