//! Device program source and launch geometry.
//!
//! The program is CUDA C compiled at load time with NVRTC. Both entry points
//! use one work-item per row index; they differ in how the dependency between
//! pivot steps is honored (see [`super::DeviceSchedule`]).

use super::DeviceError;
use std::ops::Range;

/// Module name the program is loaded under.
pub const MODULE_NAME: &str = "elimdet";

/// Single-launch entry point: work-item `i` eliminates every row below pivot
/// row `i`, then writes `mat[i][i]` to `result[i]`.
///
/// Parameters: `(double* mat, double* result, int n)`.
pub const UNORDERED_ENTRY: &str = "determinant";

/// Per-step entry point: for a given `pivot`, work-item `j > pivot`
/// eliminates row `j` and work-item `j == pivot` writes `result[pivot]`.
///
/// Parameters: `(double* mat, double* result, int n, int pivot)`.
pub const STEP_ENTRY: &str = "determinant_step";

/// Every entry point exported by [`ELIMINATION_SOURCE`].
pub const ENTRY_POINTS: [&str; 2] = [UNORDERED_ENTRY, STEP_ENTRY];

/// Program text for both entry points.
pub const ELIMINATION_SOURCE: &str = r#"
extern "C" __global__ void determinant(double* mat, double* result, const int n) {
    const int i = blockIdx.x * blockDim.x + threadIdx.x;
    if (i >= n) {
        return;
    }

    for (int j = i + 1; j < n; ++j) {
        const double ratio = mat[j * n + i] / mat[i * n + i];
        for (int k = 0; k < n; ++k) {
            mat[j * n + k] -= ratio * mat[i * n + k];
        }
    }

    result[i] = mat[i * n + i];
}

extern "C" __global__ void determinant_step(double* mat, double* result, const int n, const int pivot) {
    const int j = blockIdx.x * blockDim.x + threadIdx.x;
    if (j >= n || j < pivot) {
        return;
    }

    if (j == pivot) {
        result[pivot] = mat[pivot * n + pivot];
        return;
    }

    const double ratio = mat[j * n + pivot] / mat[pivot * n + pivot];
    for (int k = 0; k < n; ++k) {
        mat[j * n + k] -= ratio * mat[pivot * n + k];
    }
}
"#;

/// Launch geometry: `global_size` work-items in groups of `local_size`.
///
/// Elimination uses one work-item per row and no work-group cooperation, so
/// the local size is always 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchGeometry {
    /// Total number of work-items
    pub global_size: u32,
    /// Work-items per group
    pub local_size: u32,
}

impl LaunchGeometry {
    /// One work-item per row of an `n x n` matrix.
    pub fn for_rows(n: usize) -> Result<Self, DeviceError> {
        let global_size = u32::try_from(n)
            .ok()
            .filter(|&size| i32::try_from(size).is_ok())
            .ok_or_else(|| DeviceError::Launch(format!("dimension {n} exceeds the device index range")))?;
        Ok(Self {
            global_size,
            local_size: 1,
        })
    }

    /// Number of work-groups.
    pub fn groups(&self) -> u32 {
        self.global_size.div_ceil(self.local_size)
    }

    /// Global ids of every work-item, in launch order.
    pub fn work_items(&self) -> Range<usize> {
        0..self.global_size as usize
    }
}
