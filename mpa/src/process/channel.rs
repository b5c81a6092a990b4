use std::fmt::{Display, Formatter};

use log::{debug, warn};

use crate::process::sync::{ID3V1_LEN, find_first_frame};
use crate::process::walk::{FrameChain, fits_header, frame_length, next_frame};
use crate::structs::header::{HEADER_LEN, PRIVATE_BYTE, parse_header};
use crate::utils::errors::StegoError;

/// An MPEG audio file held in memory, with its private-bit channel located.
///
/// Each frame of the chain starting at the first confirmed header carries one
/// bit of hidden data in its private bit. Only that bit is ever modified.
///
/// # Example
///
/// ```rust,no_run
/// use mpa::process::channel::Mp3File;
///
/// let mut file = Mp3File::from_bytes(std::fs::read("song.mp3")?)?;
/// println!("{} bits available ({} bytes)", file.capacity(), file.capacity_bytes());
///
/// file.embed(b"watermark")?;
/// assert_eq!(file.extract().message(), b"watermark");
///
/// std::fs::write("marked.mp3", file.as_bytes())?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Mp3File {
    data: Vec<u8>,
    first_frame: usize,
    capacity: usize,
}

impl Mp3File {
    /// Takes ownership of the file contents and locates the frame chain.
    ///
    /// Fails with [`StegoError::NotAnMp3File`] when no confirmed frame header
    /// is found.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, StegoError> {
        let first_frame = find_first_frame(&data).ok_or(StegoError::NotAnMp3File)?;

        let mut capacity = 0;
        let mut chain_end = first_frame;
        for frame in FrameChain::new(&data, first_frame) {
            capacity += 1;
            chain_end = frame.offset + frame_length(&frame.header).unwrap_or(HEADER_LEN);
        }

        debug!("Frame chain {first_frame:#X}..{chain_end:#X}: {capacity} frames");

        let leftover = data.len().saturating_sub(chain_end);
        if leftover > ID3V1_LEN {
            warn!("Frame chain ends {leftover} bytes before the end of the file");
        }

        Ok(Self {
            data,
            first_frame,
            capacity,
        })
    }

    pub fn first_frame(&self) -> usize {
        self.first_frame
    }

    /// Number of private bits available, one per frame.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of whole payload bytes that fit in the channel.
    pub fn capacity_bytes(&self) -> usize {
        self.capacity >> 3
    }

    pub fn frames(&self) -> FrameChain<'_> {
        FrameChain::new(&self.data, self.first_frame)
    }

    /// Private bits of every frame, in chain order.
    pub fn private_bits(&self) -> impl Iterator<Item = bool> + '_ {
        self.frames().map(|frame| frame.header.private)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Writes `payload` into the private bits, most significant bit first.
    ///
    /// The private bits of frames past the payload are cleared. The capacity
    /// check happens before any write, so the buffer is left untouched on
    /// [`StegoError::InsufficientRoom`].
    pub fn embed(&mut self, payload: &[u8]) -> Result<(), StegoError> {
        let needed = payload.len() * 8;
        if needed > self.capacity {
            return Err(StegoError::InsufficientRoom {
                needed,
                available: self.capacity,
            });
        }

        debug!(
            "Embedding {needed} bits, clearing {} trailing bits",
            self.capacity - needed
        );

        let bits = payload
            .iter()
            .flat_map(|&byte| (0..8).rev().map(move |shift| (byte >> shift) & 1 != 0))
            .chain(std::iter::repeat(false))
            .take(self.capacity);

        let mut cursor = Some(self.first_frame);
        for (written, bit) in bits.enumerate() {
            let offset = cursor
                .filter(|&offset| fits_header(&self.data, offset))
                .filter(|&offset| parse_header(&self.data, offset).is_some())
                .ok_or(StegoError::InvalidData { written })?;

            self.set_private_bit(offset, bit);
            cursor = next_frame(&self.data, offset);
        }

        Ok(())
    }

    /// Clears every private bit of the chain.
    pub fn clear(&mut self) -> Result<(), StegoError> {
        self.embed(&[])
    }

    /// Reads the private bits back, packing them MSB first into whole bytes.
    ///
    /// Trailing bits that do not fill a byte are dropped.
    pub fn extract(&self) -> PrivateData {
        let mut bytes = Vec::with_capacity(self.capacity_bytes());
        let mut byte = 0u8;
        let mut bit_count = 0;

        for bit in self.private_bits() {
            byte = (byte << 1) | bit as u8;
            bit_count += 1;

            if bit_count == 8 {
                bytes.push(byte);
                byte = 0;
                bit_count = 0;
            }
        }

        PrivateData { bytes }
    }

    #[inline(always)]
    fn set_private_bit(&mut self, offset: usize, bit: bool) {
        let byte = &mut self.data[offset + PRIVATE_BYTE];
        *byte = (*byte & 0xFE) | bit as u8;
    }
}

/// Contents of the private-bit channel.
///
/// Holds every whole byte of the channel, so a payload shorter than the
/// capacity is followed by zero bytes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PrivateData {
    bytes: Vec<u8>,
}

impl PrivateData {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Bytes up to the first zero byte.
    ///
    /// This is how a text payload is read back; a payload containing zero
    /// bytes is cut at the first one.
    pub fn message(&self) -> &[u8] {
        let end = self
            .bytes
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(self.bytes.len());

        &self.bytes[..end]
    }
}

impl AsRef<[u8]> for PrivateData {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl Display for PrivateData {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&String::from_utf8_lossy(self.message()))
    }
}

/// Offsets of the frames whose private bit is set.
pub fn marked_frames(file: &Mp3File) -> impl Iterator<Item = usize> + '_ {
    file.frames()
        .filter(|frame| frame.header.private)
        .map(|frame| frame.offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::test_stream;
    use anyhow::Result;

    #[test]
    fn capacity_counts_frames() -> Result<()> {
        let file = Mp3File::from_bytes(test_stream(50))?;

        assert_eq!(file.first_frame(), 0);
        assert_eq!(file.capacity(), 50);
        assert_eq!(file.capacity_bytes(), 6);
        assert_eq!(file.frames().count(), 50);

        Ok(())
    }

    #[test]
    fn capacity_after_id3v2_tag() -> Result<()> {
        let mut data = vec![b'I', b'D', b'3', 4, 0, 0, 0, 0, 0, 20];
        data.resize(30, 0xFF);
        data.extend(test_stream(17));

        let file = Mp3File::from_bytes(data)?;
        assert_eq!(file.first_frame(), 30);
        assert_eq!(file.capacity(), 17);

        Ok(())
    }

    #[test]
    fn rejects_non_mpeg_data() {
        let err = Mp3File::from_bytes(vec![0x55; 10_000]).unwrap_err();
        assert!(matches!(err, StegoError::NotAnMp3File));
        assert_eq!(err.code(), 4);
    }

    #[test]
    fn embed_and_extract() -> Result<()> {
        let mut file = Mp3File::from_bytes(test_stream(50))?;

        file.embed(b"Stego")?;

        let data = file.extract();
        assert_eq!(data.as_bytes(), b"Stego\0");
        assert_eq!(data.message(), b"Stego");
        assert_eq!(data.to_string(), "Stego");
        assert_eq!(file.capacity(), 50);

        Ok(())
    }

    #[test]
    fn embed_writes_msb_first() -> Result<()> {
        let mut file = Mp3File::from_bytes(test_stream(16))?;

        file.embed(&[0b1000_0001, 0b0100_0000])?;

        let bits: Vec<bool> = file.private_bits().collect();
        let expected: Vec<bool> = [1, 0, 0, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 0, 0]
            .iter()
            .map(|&b| b == 1)
            .collect();
        assert_eq!(bits, expected);

        let marked: Vec<usize> = marked_frames(&file).collect();
        assert_eq!(marked, [0, 7 * 417, 9 * 417]);

        Ok(())
    }

    #[test]
    fn embed_fills_whole_capacity() -> Result<()> {
        let mut file = Mp3File::from_bytes(test_stream(24))?;

        file.embed(b"abc")?;
        assert_eq!(file.extract().as_bytes(), b"abc");

        Ok(())
    }

    #[test]
    fn embed_only_touches_private_bits() -> Result<()> {
        let original = test_stream(40);
        let mut file = Mp3File::from_bytes(original.clone())?;

        file.embed(b"\xFF\xFF\xFF\xFF\xFF")?;

        let changed: Vec<usize> = original
            .iter()
            .zip(file.as_bytes())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(|(i, (a, b))| {
                assert_eq!(a ^ b, 0x01);
                i
            })
            .collect();

        assert_eq!(changed.len(), 40);
        assert!(changed.iter().all(|i| i % 417 == PRIVATE_BYTE));

        Ok(())
    }

    #[test]
    fn insufficient_room_leaves_buffer_unchanged() -> Result<()> {
        let original = test_stream(50);
        let mut file = Mp3File::from_bytes(original.clone())?;

        let err = file.embed(b"Stego!!").unwrap_err();
        assert!(matches!(
            err,
            StegoError::InsufficientRoom {
                needed: 56,
                available: 50
            }
        ));
        assert_eq!(file.as_bytes(), original.as_slice());

        Ok(())
    }

    #[test]
    fn trailing_capacity_is_cleared() -> Result<()> {
        let mut file = Mp3File::from_bytes(test_stream(32))?;

        file.embed(b"long")?;
        file.embed(b"x")?;

        assert_eq!(file.extract().as_bytes(), b"x\0\0\0");
        assert_eq!(file.private_bits().skip(8).filter(|&b| b).count(), 0);

        Ok(())
    }

    #[test]
    fn clear_zeroes_every_bit() -> Result<()> {
        let mut file = Mp3File::from_bytes(test_stream(20))?;

        file.embed(b"hi")?;
        file.clear()?;

        assert!(file.private_bits().all(|b| !b));
        assert!(file.extract().message().is_empty());

        Ok(())
    }

    #[test]
    fn message_stops_at_zero_byte() -> Result<()> {
        let mut file = Mp3File::from_bytes(test_stream(40))?;

        file.embed(b"ab\0cd")?;

        let data = file.extract();
        assert_eq!(data.as_bytes(), b"ab\0cd");
        assert_eq!(data.message(), b"ab");
        assert_eq!(data.len(), 5);

        Ok(())
    }

    #[test]
    fn partial_byte_is_dropped() -> Result<()> {
        let mut data = test_stream(12);
        data[2] |= 1;
        data[11 * 417 + 2] |= 1;

        let file = Mp3File::from_bytes(data)?;
        assert_eq!(file.capacity(), 12);
        assert_eq!(file.extract().as_bytes(), [0x80]);

        Ok(())
    }

    #[test]
    fn capacity_is_independent_of_payload() -> Result<()> {
        let mut file = Mp3File::from_bytes(test_stream(30))?;
        let before = file.capacity();

        file.embed(b"abc")?;
        let reloaded = Mp3File::from_bytes(file.into_bytes())?;

        assert_eq!(reloaded.capacity(), before);
        assert_eq!(reloaded.extract().message(), b"abc");

        Ok(())
    }
}
