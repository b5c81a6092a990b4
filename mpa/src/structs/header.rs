//! MPEG audio frame header.
//!
//! A header is packed into 4 bytes, optionally followed by a 16-bit CRC:
//!
//! ```text
//! AAAAAAAA AAABBCCD EEEEFFGH IIJJKLMM
//! ```
//!
//! | Field | Bits | Meaning                                     |
//! |-------|------|---------------------------------------------|
//! | A     | 11   | Frame sync, all ones                        |
//! | B     | 2    | Version: 2.5, reserved, 2, 1                |
//! | C     | 2    | Layer: reserved, III, II, I                 |
//! | D     | 1    | Protection, 0 means a CRC follows           |
//! | E     | 4    | Bitrate index                               |
//! | F     | 2    | Sampling frequency index (3 is reserved)    |
//! | G     | 1    | Padding slot                                |
//! | H     | 1    | Private bit                                 |
//! | I     | 2    | Channel mode                                |
//! | J     | 2    | Mode extension (joint stereo)               |
//! | K     | 1    | Copyright                                   |
//! | L     | 1    | Original media                              |
//! | M     | 2    | Emphasis                                    |

use std::fmt::{Display, Formatter};
use std::io;

use crate::utils::bitstream_io::BsIoSliceReader;
use crate::utils::errors::HeaderError;

/// Size of the fixed part of a frame header.
pub const HEADER_LEN: usize = 4;

/// Size of the CRC word following a protected header.
pub const CRC_LEN: usize = 2;

/// Byte within the header that carries the private bit (bit 0).
pub const PRIVATE_BYTE: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Version {
    Mpeg25,
    Reserved,
    Mpeg2,
    Mpeg1,
}

impl From<u8> for Version {
    fn from(value: u8) -> Self {
        match value & 0b11 {
            0 => Version::Mpeg25,
            1 => Version::Reserved,
            2 => Version::Mpeg2,
            _ => Version::Mpeg1,
        }
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Version::Mpeg25 => "MPEG-2.5",
            Version::Reserved => "Reserved",
            Version::Mpeg2 => "MPEG-2",
            Version::Mpeg1 => "MPEG-1",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Reserved,
    III,
    II,
    I,
}

impl From<u8> for Layer {
    fn from(value: u8) -> Self {
        match value & 0b11 {
            0 => Layer::Reserved,
            1 => Layer::III,
            2 => Layer::II,
            _ => Layer::I,
        }
    }
}

impl Display for Layer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Layer::Reserved => "Reserved",
            Layer::III => "Layer III",
            Layer::II => "Layer II",
            Layer::I => "Layer I",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelMode {
    Stereo,
    JointStereo,
    DualChannel,
    Mono,
}

impl From<u8> for ChannelMode {
    fn from(value: u8) -> Self {
        match value & 0b11 {
            0 => ChannelMode::Stereo,
            1 => ChannelMode::JointStereo,
            2 => ChannelMode::DualChannel,
            _ => ChannelMode::Mono,
        }
    }
}

impl Display for ChannelMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ChannelMode::Stereo => "Stereo",
            ChannelMode::JointStereo => "Joint stereo",
            ChannelMode::DualChannel => "Dual channel",
            ChannelMode::Mono => "Mono",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    None,
    Ms50_15,
    Reserved,
    CcittJ17,
}

impl From<u8> for Emphasis {
    fn from(value: u8) -> Self {
        match value & 0b11 {
            0 => Emphasis::None,
            1 => Emphasis::Ms50_15,
            2 => Emphasis::Reserved,
            _ => Emphasis::CcittJ17,
        }
    }
}

impl Display for Emphasis {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Emphasis::None => "None",
            Emphasis::Ms50_15 => "50/15 ms",
            Emphasis::Reserved => "Reserved",
            Emphasis::CcittJ17 => "CCIT J.17",
        })
    }
}

/// Unpacked frame header.
///
/// Parsing only checks the sync pattern, so reserved values are representable;
/// use [`FrameHeader::validate`] before trusting the rate fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameHeader {
    pub version: Version,
    pub layer: Layer,
    /// Raw protection bit: `false` means the header is followed by a CRC.
    pub protection: bool,
    pub bitrate_index: u8,
    pub sample_rate_index: u8,
    pub padding: bool,
    pub private: bool,
    pub mode: ChannelMode,
    pub mode_extension: u8,
    pub copyright: bool,
    pub original: bool,
    pub emphasis: Emphasis,
    pub crc: Option<u16>,
}

impl FrameHeader {
    /// Unpacks the header at the start of `bytes`.
    ///
    /// Returns `None` if fewer than [`HEADER_LEN`] bytes are given or the
    /// frame sync is missing. The CRC word is only read for protected headers
    /// whose two CRC bytes are present.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < HEADER_LEN || bytes[0] != 0xFF || bytes[1] & 0xE0 != 0xE0 {
            return None;
        }

        Self::read(&mut BsIoSliceReader::from_slice(bytes)).ok()
    }

    fn read(reader: &mut BsIoSliceReader) -> io::Result<Self> {
        reader.skip_n(11)?;

        let mut header = Self {
            version: reader.get_n::<u8>(2)?.into(),
            layer: reader.get_n::<u8>(2)?.into(),
            protection: reader.get()?,
            bitrate_index: reader.get_n(4)?,
            sample_rate_index: reader.get_n(2)?,
            padding: reader.get()?,
            private: reader.get()?,
            mode: reader.get_n::<u8>(2)?.into(),
            mode_extension: reader.get_n(2)?,
            copyright: reader.get()?,
            original: reader.get()?,
            emphasis: reader.get_n::<u8>(2)?.into(),
            crc: None,
        };

        if !header.protection && reader.available()? >= (CRC_LEN as u64) << 3 {
            header.crc = Some(reader.get_n(16)?);
        }

        Ok(header)
    }

    /// Checks that no field holds a reserved value.
    pub fn validate(&self) -> Result<(), HeaderError> {
        if self.version == Version::Reserved {
            return Err(HeaderError::ReservedVersion);
        }
        if self.layer == Layer::Reserved {
            return Err(HeaderError::ReservedLayer);
        }
        if self.sample_rate_index == 3 {
            return Err(HeaderError::ReservedSampleRate(self.sample_rate_index));
        }
        if self.emphasis == Emphasis::Reserved {
            return Err(HeaderError::ReservedEmphasis);
        }

        Ok(())
    }

    pub fn is_protected(&self) -> bool {
        !self.protection
    }
}

/// Parses the header starting at `offset` in `buffer`.
pub fn parse_header(buffer: &[u8], offset: usize) -> Option<FrameHeader> {
    FrameHeader::parse(buffer.get(offset..)?)
}
