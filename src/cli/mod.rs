pub mod command;
pub mod info;
pub mod stamp;

/// Builds `frames` consecutive MPEG-1 Layer III frames (128 kbps, 44.1 kHz,
/// 417 bytes each) with zeroed bodies.
#[cfg(test)]
pub(crate) fn test_stream(frames: usize) -> Vec<u8> {
    let mut stream = vec![0u8; frames * 417];
    for frame in stream.chunks_exact_mut(417) {
        frame[..4].copy_from_slice(&[0xFF, 0xFB, 0x90, 0x44]);
    }

    stream
}
