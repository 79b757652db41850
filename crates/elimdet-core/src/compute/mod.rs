//! Elimination kernels and the backend trait they share.

pub mod backend;
pub mod cpu;

pub use backend::*;
pub use cpu::*;
