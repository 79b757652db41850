//! Timing report and its `;`-delimited text form.

use crate::error::Result;
use elimdet_core::{agrees, KernelKind};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Header line of the report; columns follow [`KernelKind::ALL`].
pub const CSV_HEADER: &str = "Size;CPU;CPU_OpenMP;GPU_OpenCL";

/// One timed kernel call.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Measurement {
    /// Execution strategy of the kernel
    pub kind: KernelKind,
    /// Kernel name as reported by the kernel
    pub kernel: String,
    /// Wall-clock seconds spent in the call
    pub seconds: f64,
    /// Value the kernel returned
    pub determinant: f64,
}

/// Measurements for one matrix size.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReportRow {
    /// Matrix dimension
    pub size: usize,
    /// One entry per kernel, in run order
    pub measurements: Vec<Measurement>,
}

impl ReportRow {
    /// Measurement taken for `kind`, if that kernel ran.
    pub fn measurement(&self, kind: KernelKind) -> Option<&Measurement> {
        self.measurements.iter().find(|m| m.kind == kind)
    }

    /// Elapsed seconds for `kind`.
    pub fn seconds(&self, kind: KernelKind) -> Option<f64> {
        self.measurement(kind).map(|m| m.seconds)
    }

    /// Determinant returned by `kind`.
    pub fn determinant(&self, kind: KernelKind) -> Option<f64> {
        self.measurement(kind).map(|m| m.determinant)
    }

    /// Whether every kernel agrees with the sequential result.
    pub fn variants_agree(&self) -> bool {
        match self.determinant(KernelKind::Sequential) {
            Some(reference) => self
                .measurements
                .iter()
                .all(|m| agrees(reference, m.determinant)),
            None => false,
        }
    }

    fn write_line<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        write!(out, "{}", self.size)?;
        for kind in KernelKind::ALL {
            match self.seconds(kind) {
                Some(seconds) => write!(out, ";{seconds}")?,
                None => write!(out, ";")?,
            }
        }
        writeln!(out)
    }
}

/// Result of a sweep: one row per matrix size.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Report {
    rows: Vec<ReportRow>,
}

impl Report {
    /// Empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a row.
    pub fn push(&mut self, row: ReportRow) {
        self.rows.push(row);
    }

    /// Rows in sweep order.
    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    /// Writes the header and one line per size.
    ///
    /// A kernel missing from a row leaves its column empty.
    pub fn write_csv<W: Write>(&self, mut out: W) -> Result<()> {
        writeln!(out, "{CSV_HEADER}")?;
        for row in &self.rows {
            row.write_line(&mut out)?;
        }
        out.flush()?;
        Ok(())
    }

    /// Creates (or truncates) `path` and writes the report to it.
    pub fn write_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.write_csv(BufWriter::new(file))
    }
}
