//! Configuration and parameters
//!
//! Reference constants and the immutable solver settings built from them.

pub mod constants;
pub mod solver_params;

pub use constants::*;
pub use solver_params::*;
