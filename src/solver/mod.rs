//! The three transfer stages of an MPM step, in execution order.

pub mod g2p;
pub mod grid_update;
pub mod p2g;

pub use g2p::*;
pub use grid_update::*;
pub use p2g::*;
