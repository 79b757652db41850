//! Error type for the timing harness.

use elimdet_core::{ComputeError, DeviceError};
use thiserror::Error;

/// Errors raised while configuring or running a sweep.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// A kernel or backend failed.
    #[error(transparent)]
    Compute(#[from] ComputeError),

    /// Writing the report failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The sweep configuration cannot be run.
    #[error("Invalid harness configuration: {reason}")]
    InvalidConfig {
        /// What is wrong with the configuration
        reason: String,
    },
}

impl HarnessError {
    /// Create an InvalidConfig error with a custom reason.
    pub fn invalid_config<S: Into<String>>(reason: S) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}

impl From<DeviceError> for HarnessError {
    fn from(err: DeviceError) -> Self {
        Self::Compute(ComputeError::Device(err))
    }
}

/// Result type for harness operations.
pub type Result<T> = std::result::Result<T, HarnessError>;
