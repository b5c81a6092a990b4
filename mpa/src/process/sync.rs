//! Locating the first audio frame.
//!
//! Files may start with metadata: an ID3v2 tag (`"ID3"` followed by a
//! synchsafe size) or a leading ID3v1 block (`"TAG"`, 128 bytes), possibly
//! extended by a `"TAG+"` block of 227 bytes. These are skipped before
//! scanning for frame sync.
//!
//! A candidate is accepted only when its own length is computable and another
//! synced header sits exactly where it ends.

use log::{debug, trace};

use crate::process::walk::{fits_header, next_frame};
use crate::structs::header::parse_header;

pub const ID3V1_TAG: &[u8; 3] = b"TAG";
pub const ID3V1_LEN: usize = 128;
pub const ID3V1_EXTENDED_MARKER: u8 = b'+';
pub const ID3V1_EXTENDED_LEN: usize = 227;

pub const ID3V2_TAG: &[u8; 3] = b"ID3";
pub const ID3V2_HEADER_LEN: usize = 10;

/// Returns the offset at which frame scanning begins, past any leading tag.
pub fn audio_start(buffer: &[u8]) -> usize {
    if buffer.len() > ID3V1_LEN && buffer.starts_with(ID3V1_TAG) {
        let extended = buffer.len() > ID3V1_LEN + ID3V1_EXTENDED_LEN
            && buffer[3] == ID3V1_EXTENDED_MARKER
            && buffer[ID3V1_EXTENDED_LEN..].starts_with(ID3V1_TAG);

        let skip = if extended {
            ID3V1_LEN + ID3V1_EXTENDED_LEN
        } else {
            ID3V1_LEN
        };
        debug!(
            "Skipping {} ID3v1 tag ({skip} bytes)",
            if extended { "extended" } else { "plain" }
        );

        return skip;
    }

    if buffer.len() > 13 && buffer.starts_with(ID3V2_TAG) {
        if let Some(size) = synchsafe_u32(&buffer[6..10]) {
            let skip = ID3V2_HEADER_LEN + size as usize;
            debug!("Skipping ID3v2 tag ({skip} bytes)");

            return skip;
        }
    }

    0
}

/// Decodes a 4-byte synchsafe integer, `None` if any byte has its top bit set.
pub fn synchsafe_u32(bytes: &[u8]) -> Option<u32> {
    let bytes: &[u8; 4] = bytes.try_into().ok()?;

    if bytes.iter().any(|b| b & 0x80 != 0) {
        return None;
    }

    Some(bytes.iter().fold(0, |acc, &b| (acc << 7) | b as u32))
}

/// Finds the offset of the first confirmed frame header in `buffer`.
pub fn find_first_frame(buffer: &[u8]) -> Option<usize> {
    let start = audio_start(buffer);
    let mut offset = start;

    while fits_header(buffer, offset) {
        if parse_header(buffer, offset).is_some() {
            match next_frame(buffer, offset) {
                Some(next) if parse_header(buffer, next).is_some() => {
                    debug!(
                        "First frame header at {offset:#X} ({} bytes after tags)",
                        offset - start
                    );
                    return Some(offset);
                }
                _ => trace!("Rejected sync candidate at {offset:#X}"),
            }
        }

        offset += 1;
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::test_stream;

    #[test]
    fn untagged_stream_starts_at_zero() {
        let stream = test_stream(3);

        assert_eq!(audio_start(&stream), 0);
        assert_eq!(find_first_frame(&stream), Some(0));
    }

    #[test]
    fn skips_leading_garbage() {
        let mut buffer = vec![0x12, 0xFF, 0xFF, 0x00, 0xFF, 0xE0, 0x00];
        buffer.extend(test_stream(3));

        assert_eq!(find_first_frame(&buffer), Some(7));
    }

    #[test]
    fn single_sync_match_is_not_enough() {
        // A valid header whose length points into zeros.
        let mut buffer = vec![0u8; 600];
        buffer[..4].copy_from_slice(&[0xFF, 0xFB, 0x90, 0x44]);

        assert_eq!(find_first_frame(&buffer), None);
    }

    #[test]
    fn not_found_in_silence() {
        assert_eq!(find_first_frame(&[0u8; 4096]), None);
        assert_eq!(find_first_frame(&[]), None);
        assert_eq!(find_first_frame(&[0xFF, 0xFB, 0x90]), None);
    }

    #[test]
    fn skips_id3v1_block() {
        let mut buffer = vec![0u8; ID3V1_LEN];
        buffer[..3].copy_from_slice(ID3V1_TAG);
        buffer[10..14].copy_from_slice(&[0xFF, 0xFB, 0x90, 0x44]);
        buffer.extend(test_stream(3));

        assert_eq!(audio_start(&buffer), 128);
        assert_eq!(find_first_frame(&buffer), Some(128));
    }

    #[test]
    fn skips_extended_id3v1_block() {
        let mut buffer = vec![0u8; ID3V1_LEN + ID3V1_EXTENDED_LEN];
        buffer[..4].copy_from_slice(b"TAG+");
        buffer[227..230].copy_from_slice(ID3V1_TAG);
        buffer.extend(test_stream(3));

        assert_eq!(audio_start(&buffer), 355);
        assert_eq!(find_first_frame(&buffer), Some(355));
    }

    #[test]
    fn extended_marker_without_second_tag() {
        let mut buffer = vec![0u8; 400];
        buffer[..4].copy_from_slice(b"TAG+");

        assert_eq!(audio_start(&buffer), 128);
    }

    #[test]
    fn short_tag_is_not_skipped() {
        let mut buffer = b"TAG".to_vec();
        buffer.resize(ID3V1_LEN, 0);

        assert_eq!(audio_start(&buffer), 0);
    }

    #[test]
    fn skips_id3v2_tag() {
        let mut buffer = vec![0u8; 10 + 300];
        buffer[..10].copy_from_slice(&[b'I', b'D', b'3', 4, 0, 0, 0, 0, 0x02, 0x2C]);
        buffer[20..24].copy_from_slice(&[0xFF, 0xFB, 0x90, 0x44]);
        buffer.extend(test_stream(3));

        assert_eq!(synchsafe_u32(&[0, 0, 0x02, 0x2C]), Some(300));
        assert_eq!(audio_start(&buffer), 310);
        assert_eq!(find_first_frame(&buffer), Some(310));
    }

    #[test]
    fn id3v2_size_must_be_synchsafe() {
        let mut buffer = vec![0u8; 64];
        buffer[..10].copy_from_slice(&[b'I', b'D', b'3', 3, 0, 0, 0, 0, 0x80, 0x00]);

        assert_eq!(audio_start(&buffer), 0);
        assert_eq!(synchsafe_u32(&[0x7F, 0x7F, 0x7F, 0x7F]), Some(0x0FFF_FFFF));
        assert_eq!(synchsafe_u32(&[0, 0, 1]), None);
    }

    #[test]
    fn id3v2_size_past_end() {
        let mut buffer = vec![0u8; 64];
        buffer[..10].copy_from_slice(&[b'I', b'D', b'3', 4, 0, 0, 0x7F, 0, 0, 0]);

        assert_eq!(find_first_frame(&buffer), None);
    }
}
