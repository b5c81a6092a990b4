//! MPEG audio frame walking and private-bit data embedding.
//!
//! ## Technical Overview
//!
//! Every MPEG-1/2/2.5 Layer I–III frame starts with a 4-byte header whose
//! private bit is ignored by decoders. Chaining frames from a confirmed first
//! header yields one spare bit per frame, which this crate reads and writes
//! without touching any audio-bearing field.
//!
//! ### Stream Organization
//!
//! **Leading metadata**: an optional ID3v2 tag or ID3v1 block, skipped.
//! **Frames**: header, optional CRC, audio data. The frame length follows from
//! the header's bitrate, sampling frequency and padding fields.
//!
//! ## Quick Start
//!
//! 1. Load the file into memory and wrap it with [`process::channel::Mp3File`]
//! 2. Check [`capacity`](process::channel::Mp3File::capacity) (one bit per frame)
//! 3. [`embed`](process::channel::Mp3File::embed) a payload or
//!    [`extract`](process::channel::Mp3File::extract) it back
//!
//! ```rust,no_run
//! use mpa::process::channel::Mp3File;
//!
//! let mut file = Mp3File::from_bytes(std::fs::read("input.mp3")?)?;
//!
//! if file.capacity_bytes() >= 5 {
//!     file.embed(b"Stego")?;
//! }
//!
//! let hidden = file.extract();
//! println!("Hidden data: {hidden}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Frame chain processing.
///
/// 1. **Synchronization** ([`process::sync`]): skips leading tags and finds
///    the first confirmed frame header.
///
/// 2. **Walking** ([`process::walk`]): frame lengths and chain traversal.
///
/// 3. **Private-bit channel** ([`process::channel`]): capacity, embedding and
///    extraction.
///
/// 4. **Statistics** ([`process::stats`]): bitrate and duration summary.
pub mod process;

/// Data structures representing MPEG audio framing.
///
/// - **Frame Headers** ([`structs::header`]): header unpacking
/// - **Rate Tables** ([`structs::rates`]): bitrate and sampling frequency lookups
pub mod structs;

/// Utility functions and supporting infrastructure.
///
/// - **Bitstream I/O** ([`utils::bitstream_io`]): Bit-level reading
/// - **Error Handling** ([`utils::errors`]): Error types
pub mod utils;
