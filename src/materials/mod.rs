//! Materials for MPM simulation
//!
//! A single weakly-compressible water model; `utils` holds the shared helpers.

pub mod utils;
pub mod water;

pub use water::WeaklyCompressible;
