//! # Vicinity Application Library
//!
//! Library surface of the Vicinity binary, exposed for integration
//! tests. The binary in `main.rs` wires these modules to the command
//! line.

pub mod cli;
pub mod neighbors;
pub mod rank;
