//! Cross-variant agreement.
//!
//! The thread-parallel kernel and the pivot-ordered device schedule keep the
//! pivot steps ordered, so they perform the same row updates as the
//! sequential kernel and must agree with it within 1e-6 relative error. The
//! unordered device schedule is only checked on the host emulator, which runs
//! its work-items one after another.

mod common;

use common::{all_kernels, dominant_matrix, random_matrix};
use elimdet_core::prelude::*;
use elimdet_core::{agrees, relative_difference};

#[test]
fn test_variants_agree_across_sizes() {
    let kernels = all_kernels();
    for n in (10..=150).step_by(10) {
        let m = random_matrix(n, n as u64);
        let baseline = SequentialEliminator.determinant(m.clone()).unwrap();
        assert!(baseline.is_finite(), "n = {n}: baseline {baseline}");

        for kernel in &kernels {
            let det = kernel.determinant(m.clone()).unwrap();
            assert!(
                agrees(baseline, det),
                "n = {n}: {} returned {det}, sequential {baseline} (rel diff {})",
                kernel.name(),
                relative_difference(baseline, det)
            );
        }
    }
}

#[test]
fn test_thread_counts_do_not_change_result() {
    let m = random_matrix(96, 11);
    let baseline = SequentialEliminator.determinant(m.clone()).unwrap();

    for threads in [1, 2, 4, 8] {
        for min_rows in [2, 16, 200] {
            let config = ParallelConfig::new()
                .with_num_threads(threads)
                .with_min_rows_for_parallel(min_rows);
            let kernel = ParallelEliminator::new(config).unwrap();
            let det = kernel.determinant(m.clone()).unwrap();
            assert!(
                agrees(baseline, det),
                "{threads} threads, min_rows {min_rows}: {det} vs {baseline}"
            );
        }
    }
}

#[test]
fn test_unordered_schedule_on_emulator() {
    let ordered = DeviceEliminator::host_emulator(DeviceSchedule::PivotOrdered);
    let unordered = DeviceEliminator::host_emulator(DeviceSchedule::Unordered);

    for n in [1, 2, 17, 64] {
        let m = dominant_matrix(n, 1000 + n as u64);
        assert_eq!(
            ordered.determinant(m.clone()).unwrap(),
            unordered.determinant(m.clone()).unwrap()
        );
        assert_eq!(
            unordered.determinant(m.clone()).unwrap(),
            SequentialEliminator.determinant(m).unwrap()
        );
    }
}

#[test]
fn test_sequential_matches_partial_pivoting_reference() {
    for n in [5, 10, 20, 40] {
        let m = dominant_matrix(n, 42 + n as u64);
        let reference = m.to_dmatrix().determinant();
        let det = SequentialEliminator.determinant(m).unwrap();
        assert!(agrees(reference, det), "n = {n}: {det} vs {reference}");
    }
}

#[test]
fn test_f32_kernels_agree() {
    let m = SquareMatrix::<f32>::from_fn(12, |i, j| {
        if i == j {
            40.0
        } else {
            ((i * 5 + j * 3) % 7) as f32 - 3.0
        }
    })
    .unwrap();

    let seq = SequentialEliminator.determinant(m.clone()).unwrap();
    let kernel = ParallelEliminator::new(ParallelConfig::new().with_reduction_block(5)).unwrap();
    let par = kernel.determinant(m).unwrap();
    assert!(agrees(seq, par), "{seq} vs {par}");
}
