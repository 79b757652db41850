//! CPU-based elimination kernels.

pub mod parallel;
pub mod sequential;

// Re-export all CPU kernels
pub use parallel::*;
pub use sequential::*;
