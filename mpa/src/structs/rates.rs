//! Bitrate, sampling frequency and frame duration lookups.

use crate::structs::header::{Layer, Version};
use crate::utils::errors::HeaderError;

/// Bitrates in bits per second, indexed by `[bitrate_index][version class][layer class]`.
///
/// Version classes are MPEG-1 and MPEG-2/2.5; layer classes are I, II and III.
/// Index 0 is the free format and index 15 is forbidden.
const BITRATES: [[[u32; 3]; 2]; 16] = [
    [[0, 0, 0], [0, 0, 0]],
    [[32_000, 32_000, 32_000], [32_000, 8_000, 8_000]],
    [[64_000, 48_000, 40_000], [48_000, 16_000, 16_000]],
    [[96_000, 56_000, 48_000], [56_000, 24_000, 24_000]],
    [[128_000, 64_000, 56_000], [64_000, 32_000, 32_000]],
    [[160_000, 80_000, 64_000], [80_000, 40_000, 40_000]],
    [[192_000, 96_000, 80_000], [96_000, 48_000, 48_000]],
    [[224_000, 112_000, 96_000], [112_000, 56_000, 56_000]],
    [[256_000, 128_000, 112_000], [128_000, 64_000, 64_000]],
    [[288_000, 160_000, 128_000], [144_000, 80_000, 80_000]],
    [[320_000, 192_000, 160_000], [160_000, 96_000, 96_000]],
    [[352_000, 224_000, 192_000], [176_000, 112_000, 112_000]],
    [[384_000, 256_000, 224_000], [192_000, 128_000, 128_000]],
    [[416_000, 320_000, 256_000], [224_000, 144_000, 144_000]],
    [[448_000, 384_000, 320_000], [256_000, 160_000, 160_000]],
    [[0, 0, 0], [0, 0, 0]],
];

/// Sampling frequencies in Hz, indexed by `[sample_rate_index][version class]`.
const SAMPLE_RATES: [[u32; 2]; 3] = [
    [44_100, 22_050],
    [48_000, 24_000],
    [32_000, 16_000],
];

fn version_class(version: Version) -> Result<usize, HeaderError> {
    match version {
        Version::Mpeg1 => Ok(0),
        Version::Mpeg2 | Version::Mpeg25 => Ok(1),
        Version::Reserved => Err(HeaderError::ReservedVersion),
    }
}

fn layer_class(layer: Layer) -> Result<usize, HeaderError> {
    match layer {
        Layer::I => Ok(0),
        Layer::II => Ok(1),
        Layer::III => Ok(2),
        Layer::Reserved => Err(HeaderError::ReservedLayer),
    }
}

/// Looks up the bitrate in bits per second.
///
/// [`HeaderError::FreeBitrate`] is returned for index 0, which is legal MPEG
/// but carries no usable frame length.
pub fn bitrate(version: Version, layer: Layer, index: u8) -> Result<u32, HeaderError> {
    let version = version_class(version)?;
    let layer = layer_class(layer)?;

    match index {
        0 => Err(HeaderError::FreeBitrate),
        1..=14 => Ok(BITRATES[index as usize][version][layer]),
        _ => Err(HeaderError::BadBitrate(index)),
    }
}

/// Looks up the sampling frequency in Hz.
///
/// MPEG-2.5 shares the MPEG-2 frequencies.
pub fn sample_rate(version: Version, index: u8) -> Result<u32, HeaderError> {
    let column = version_class(version)?;

    SAMPLE_RATES
        .get(index as usize)
        .map(|row| row[column])
        .ok_or(HeaderError::ReservedSampleRate(index))
}

/// Number of PCM samples per channel carried by one frame.
pub fn samples_per_frame(version: Version, layer: Layer) -> Result<u32, HeaderError> {
    match (version_class(version)?, layer) {
        (_, Layer::I) => Ok(384),
        (_, Layer::II) | (0, Layer::III) => Ok(1152),
        (_, Layer::III) => Ok(576),
        (_, Layer::Reserved) => Err(HeaderError::ReservedLayer),
    }
}

#[test]
fn bitrate_lookup() {
    assert_eq!(bitrate(Version::Mpeg1, Layer::III, 9), Ok(128_000));
    assert_eq!(bitrate(Version::Mpeg1, Layer::I, 14), Ok(448_000));
    assert_eq!(bitrate(Version::Mpeg1, Layer::II, 1), Ok(32_000));
    assert_eq!(bitrate(Version::Mpeg2, Layer::I, 12), Ok(192_000));
    assert_eq!(bitrate(Version::Mpeg2, Layer::III, 1), Ok(8_000));
    assert_eq!(
        bitrate(Version::Mpeg25, Layer::III, 14),
        bitrate(Version::Mpeg2, Layer::III, 14)
    );
}

#[test]
fn bitrate_rejects_free_and_reserved() {
    assert_eq!(
        bitrate(Version::Mpeg1, Layer::III, 0),
        Err(HeaderError::FreeBitrate)
    );
    assert_eq!(
        bitrate(Version::Mpeg1, Layer::III, 15),
        Err(HeaderError::BadBitrate(15))
    );
    assert_eq!(
        bitrate(Version::Mpeg1, Layer::III, 200),
        Err(HeaderError::BadBitrate(200))
    );
    assert_eq!(
        bitrate(Version::Reserved, Layer::III, 9),
        Err(HeaderError::ReservedVersion)
    );
    assert_eq!(
        bitrate(Version::Mpeg1, Layer::Reserved, 9),
        Err(HeaderError::ReservedLayer)
    );
}

#[test]
fn sample_rate_lookup() {
    assert_eq!(sample_rate(Version::Mpeg1, 0), Ok(44_100));
    assert_eq!(sample_rate(Version::Mpeg1, 2), Ok(32_000));
    assert_eq!(sample_rate(Version::Mpeg2, 1), Ok(24_000));
    assert_eq!(sample_rate(Version::Mpeg25, 0), Ok(22_050));
    for index in 0..3 {
        assert_eq!(
            sample_rate(Version::Mpeg25, index),
            sample_rate(Version::Mpeg2, index)
        );
    }
    assert_eq!(
        sample_rate(Version::Mpeg1, 3),
        Err(HeaderError::ReservedSampleRate(3))
    );
    assert_eq!(
        sample_rate(Version::Reserved, 0),
        Err(HeaderError::ReservedVersion)
    );
}

#[test]
fn frame_durations() {
    assert_eq!(samples_per_frame(Version::Mpeg1, Layer::I), Ok(384));
    assert_eq!(samples_per_frame(Version::Mpeg1, Layer::III), Ok(1152));
    assert_eq!(samples_per_frame(Version::Mpeg2, Layer::II), Ok(1152));
    assert_eq!(samples_per_frame(Version::Mpeg25, Layer::III), Ok(576));
}
