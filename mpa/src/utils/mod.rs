//! Utility functions and supporting infrastructure.
//!
//! Provides bit-level reading for header parsing and the error types shared
//! across the crate.

pub mod bitstream_io;
pub mod errors;
