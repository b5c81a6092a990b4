//! Data structures representing MPEG audio framing.
//!
//! Contains the unpacked frame header and the rate tables needed to turn its
//! indices into bitrates, sampling frequencies and frame durations.

pub mod header;
pub mod rates;
