//! Timing harness for the elimination kernels of `elimdet-core`.
//!
//! For every matrix size in a sweep the harness generates one random integer
//! matrix, hands each kernel its own copy, times the call and collects the
//! elapsed seconds into a [`Report`] that is written as `;`-delimited text.
//!
//! ```
//! use elimdet::{Harness, HarnessConfig};
//!
//! let config = HarnessConfig::builder()
//!     .sizes(4, 8, 2)
//!     .seed(7)
//!     .build()
//!     .unwrap();
//! let harness = Harness::with_host_emulator(&config).unwrap();
//! let report = harness.run(&config).unwrap();
//! assert_eq!(report.rows().len(), 3);
//! ```

pub mod config;
pub mod error;
pub mod generate;
pub mod harness;
pub mod report;

pub use crate::config::{HarnessConfig, HarnessConfigBuilder, SizeSweep};
pub use crate::error::{HarnessError, Result};
pub use crate::generate::MatrixGenerator;
pub use crate::harness::{select_device, Harness};
pub use crate::report::{Measurement, Report, ReportRow, CSV_HEADER};
