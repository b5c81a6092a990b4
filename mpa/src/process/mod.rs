/// Frame chain traversal.
///
/// Provides [`frame_length`](walk::frame_length), [`next_frame`](walk::next_frame)
/// and the [`FrameChain`](walk::FrameChain) iterator.
pub mod walk;

/// First-frame synchronization past leading ID3 tags.
pub mod sync;

/// The private-bit channel.
///
/// Provides [`Mp3File`](channel::Mp3File), which owns the file contents and
/// embeds or extracts [`PrivateData`](channel::PrivateData).
pub mod channel;

/// Frame chain statistics.
pub mod stats;

/// Default header of the synthetic test frames: MPEG-1 Layer III, 128 kbps,
/// 44.1 kHz, unprotected, no padding, joint stereo, original.
#[cfg(test)]
pub(crate) const TEST_HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0x44];

/// Builds `frames` consecutive 417-byte frames with zeroed bodies.
#[cfg(test)]
pub(crate) fn test_stream(frames: usize) -> Vec<u8> {
    let mut stream = vec![0u8; frames * 417];
    for frame in stream.chunks_exact_mut(417) {
        frame[..4].copy_from_slice(&TEST_HEADER);
    }

    stream
}

#[test]
fn test_stream_layout() {
    let stream = test_stream(2);

    assert_eq!(stream.len(), 834);
    assert_eq!(stream[417..421], TEST_HEADER);
    assert!(stream[4..417].iter().all(|&b| b == 0));
}
