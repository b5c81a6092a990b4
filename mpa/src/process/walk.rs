use log::trace;

use crate::structs::header::{FrameHeader, HEADER_LEN, Layer, Version, parse_header};
use crate::structs::rates::{bitrate, sample_rate};
use crate::utils::errors::HeaderError;

/// Computes the length in bytes of the frame described by `header`,
/// header included.
pub fn frame_length(header: &FrameHeader) -> Result<usize, HeaderError> {
    header.validate()?;

    let bitrate = bitrate(header.version, header.layer, header.bitrate_index)? as usize;
    let sample_rate = sample_rate(header.version, header.sample_rate_index)? as usize;
    let padding = header.padding as usize;

    let len = match (header.layer, header.version) {
        (Layer::I, _) => (12 * bitrate / sample_rate + padding) * 4,
        (Layer::III, Version::Mpeg2 | Version::Mpeg25) => 72 * bitrate / sample_rate + padding,
        (Layer::II | Layer::III, _) => 144 * bitrate / sample_rate + padding,
        (Layer::Reserved, _) => return Err(HeaderError::ReservedLayer),
    };

    Ok(len)
}

/// Returns the offset of the frame following the one at `offset`.
///
/// `None` if the header at `offset` is missing or holds reserved values, or if
/// a header at the computed offset would not fit in `buffer`.
pub fn next_frame(buffer: &[u8], offset: usize) -> Option<usize> {
    let header = parse_header(buffer, offset)?;

    let len = match frame_length(&header) {
        Ok(len) => len,
        Err(e) => {
            trace!("Frame at {offset:#X} has no usable length: {e}");
            return None;
        }
    };

    offset
        .checked_add(len)
        .filter(|next| fits_header(buffer, *next))
}

/// Whether a full header starting at `offset` lies inside `buffer`.
#[inline(always)]
pub fn fits_header(buffer: &[u8], offset: usize) -> bool {
    offset
        .checked_add(HEADER_LEN)
        .is_some_and(|end| end <= buffer.len())
}

/// A frame of the chain: its start offset and unpacked header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub offset: usize,
    pub header: FrameHeader,
}

/// Iterates the chain of consecutive frames starting at a given offset.
///
/// A frame is yielded for every offset carrying a header with valid sync; the
/// chain ends at the first offset without one, or after a frame whose length
/// cannot be computed.
///
/// ```rust
/// use mpa::process::walk::FrameChain;
///
/// let mut stream = Vec::new();
/// for _ in 0..3 {
///     let mut frame = vec![0u8; 417];
///     frame[..4].copy_from_slice(&[0xFF, 0xFB, 0x90, 0x44]);
///     stream.extend(frame);
/// }
///
/// let offsets: Vec<usize> = FrameChain::new(&stream, 0).map(|f| f.offset).collect();
/// assert_eq!(offsets, [0, 417, 834]);
/// ```
#[derive(Debug, Clone)]
pub struct FrameChain<'a> {
    buffer: &'a [u8],
    next: Option<usize>,
}

impl<'a> FrameChain<'a> {
    pub fn new(buffer: &'a [u8], start: usize) -> Self {
        Self {
            buffer,
            next: Some(start),
        }
    }
}

impl Iterator for FrameChain<'_> {
    type Item = Frame;

    fn next(&mut self) -> Option<Self::Item> {
        let offset = self.next.take()?;

        if !fits_header(self.buffer, offset) {
            return None;
        }

        let header = parse_header(self.buffer, offset)?;
        self.next = next_frame(self.buffer, offset);

        Some(Frame { offset, header })
    }
}
