//! Host execution of the device program.
//!
//! Each function below is the body of one work-item of the matching entry
//! point in [`super::kernels::ELIMINATION_SOURCE`]. The emulator runs the
//! work-items one at a time in global-id order, which is one legal
//! interleaving of a real launch.

use super::kernels::LaunchGeometry;
use super::{DeviceBackend, DeviceError, DeviceSchedule};
use crate::compute::cpu::sequential::eliminate_row;
use crate::core::matrix::SquareMatrix;

/// Body of one `determinant` work-item.
fn unordered_item(mat: &mut [f64], result: &mut [f64], n: usize, i: usize) {
    let (head, tail) = mat.split_at_mut((i + 1) * n);
    let pivot_row = &head[i * n..];
    for row in tail.chunks_exact_mut(n) {
        eliminate_row(pivot_row, row, i);
    }
    result[i] = pivot_row[i];
}

/// Body of one `determinant_step` work-item.
fn step_item(mat: &mut [f64], result: &mut [f64], n: usize, pivot: usize, j: usize) {
    if j < pivot {
        return;
    }
    if j == pivot {
        result[pivot] = mat[pivot * n + pivot];
        return;
    }
    let (head, tail) = mat.split_at_mut(j * n);
    let pivot_row = &head[pivot * n..(pivot + 1) * n];
    eliminate_row(pivot_row, &mut tail[..n], pivot);
}

/// Runs the device program serially on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostEmulator;

impl DeviceBackend for HostEmulator {
    fn name(&self) -> &str {
        "host-emulator"
    }

    fn dispatch(
        &self,
        mut matrix: SquareMatrix<f64>,
        schedule: DeviceSchedule,
    ) -> Result<Vec<f64>, DeviceError> {
        let n = matrix.dim();
        let geometry = LaunchGeometry::for_rows(n)?;
        let mat = matrix.as_mut_slice();
        let mut result = vec![0.0; n];

        match schedule {
            DeviceSchedule::Unordered => {
                for i in geometry.work_items() {
                    unordered_item(mat, &mut result, n, i);
                }
            }
            DeviceSchedule::PivotOrdered => {
                for pivot in 0..n {
                    for j in geometry.work_items() {
                        step_item(mat, &mut result, n, pivot, j);
                    }
                }
            }
        }

        Ok(result)
    }
}
