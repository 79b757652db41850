//! Core types: the square matrix, the scalar trait and errors.

pub mod error;
pub mod matrix;
pub mod types;

// Re-export core types
pub use error::*;
pub use matrix::*;
pub use types::*;
