//! End-to-end behaviour of the timing sweep.

use approx::assert_relative_eq;
use elimdet::{Harness, HarnessConfig, HarnessError, MatrixGenerator, CSV_HEADER};
use elimdet_core::prelude::*;
use pretty_assertions::assert_eq;
use std::sync::{Arc, Mutex};

/// Records the input it receives and then runs the sequential kernel on it.
struct Recorder {
    kind: KernelKind,
    seen: Arc<Mutex<Vec<SquareMatrix<f64>>>>,
}

impl EliminationKernel<f64> for Recorder {
    fn name(&self) -> &str {
        "recorder"
    }

    fn kind(&self) -> KernelKind {
        self.kind
    }

    fn determinant(&self, matrix: SquareMatrix<f64>) -> Result<f64> {
        self.seen.lock().unwrap().push(matrix.clone());
        SequentialEliminator.determinant(matrix)
    }
}

fn small_config() -> HarnessConfig {
    HarnessConfig::builder()
        .sizes(2, 12, 5)
        .value_range(-100, 100)
        .seed(2024)
        .build()
        .unwrap()
}

#[test]
fn test_report_has_one_row_per_size() {
    let config = small_config();
    let harness = Harness::with_host_emulator(&config).unwrap();
    let report = harness.run(&config).unwrap();

    let sizes: Vec<_> = report.rows().iter().map(|r| r.size).collect();
    assert_eq!(sizes, vec![2, 7, 12]);
    for row in report.rows() {
        assert_eq!(row.measurements.len(), 3);
        for kind in KernelKind::ALL {
            assert!(row.seconds(kind).is_some());
        }
    }
}

#[test]
fn test_csv_output() {
    let config = small_config();
    let harness = Harness::with_host_emulator(&config).unwrap();
    let report = harness.run(&config).unwrap();

    let mut out = Vec::new();
    report.write_csv(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<_> = text.lines().collect();

    assert_eq!(lines[0], CSV_HEADER);
    assert_eq!(lines[0], "Size;CPU;CPU_OpenMP;GPU_OpenCL");
    assert_eq!(lines.len(), 4);
    for (line, size) in lines[1..].iter().zip([2, 7, 12]) {
        let fields: Vec<_> = line.split(';').collect();
        assert_eq!(fields.len(), 4);
        assert_eq!(fields[0], size.to_string());
        for seconds in &fields[1..] {
            let value: f64 = seconds.parse().unwrap();
            assert!(value >= 0.0);
        }
    }
}

#[test]
fn test_each_kernel_gets_unmutated_copy() {
    let config = small_config();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let kernels: Vec<Box<dyn EliminationKernel<f64>>> = KernelKind::ALL
        .iter()
        .map(|&kind| {
            Box::new(Recorder {
                kind,
                seen: Arc::clone(&seen),
            }) as Box<dyn EliminationKernel<f64>>
        })
        .collect();
    let harness = Harness::new(kernels);
    harness.run(&config).unwrap();

    let (low, high) = config.value_range;
    let mut generator = MatrixGenerator::with_seed(low, high, 2024).unwrap();
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 9);
    for (chunk, size) in seen.chunks(3).zip(config.sizes.sizes()) {
        let expected = generator.generate(size).unwrap();
        for received in chunk {
            assert_eq!(received, &expected);
        }
    }
}

#[test]
fn test_kernels_agree_in_report() {
    let config = HarnessConfig::builder()
        .sizes(4, 20, 8)
        .value_range(1, 9)
        .seed(5)
        .build()
        .unwrap();
    let harness = Harness::with_host_emulator(&config).unwrap();
    let report = harness.run(&config).unwrap();

    for row in report.rows() {
        let reference = row.determinant(KernelKind::Sequential).unwrap();
        let parallel = row.determinant(KernelKind::ThreadParallel).unwrap();
        if reference.is_finite() {
            assert_relative_eq!(parallel, reference, max_relative = 1e-6);
            assert!(row.variants_agree(), "size {}", row.size);
        } else {
            // An exactly cancelling leading minor yields a zero pivot.
            assert!(!parallel.is_finite());
        }
    }
}

#[test]
fn test_run_rejects_invalid_config() {
    let config = HarnessConfig::builder().seed(1).build().unwrap();
    let harness = Harness::with_host_emulator(&config).unwrap();

    let mut bad = config.clone();
    bad.sizes.step = 0;
    assert!(matches!(
        harness.run(&bad),
        Err(HarnessError::InvalidConfig { .. })
    ));
}

#[test]
fn test_write_to_path() {
    let config = HarnessConfig::builder()
        .sizes(3, 3, 1)
        .seed(9)
        .build()
        .unwrap();
    let harness = Harness::with_host_emulator(&config).unwrap();
    let report = harness.run(&config).unwrap();

    let path = std::env::temp_dir().join(format!("elimdet-report-{}.csv", std::process::id()));
    report.write_to_path(&path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert!(text.starts_with("Size;CPU;CPU_OpenMP;GPU_OpenCL\n3;"));
    assert_eq!(text.lines().count(), 2);
}
