use crate::process::channel::{Mp3File, marked_frames};
use crate::process::walk::frame_length;
use crate::structs::header::FrameHeader;
use crate::structs::rates::{bitrate, sample_rate, samples_per_frame};

/// Summary of the frame chain of an [`Mp3File`].
#[derive(Debug, Clone, PartialEq)]
pub struct StreamStats {
    pub first_frame: usize,
    pub first_header: FrameHeader,
    pub frames: usize,
    pub protected_frames: usize,
    pub marked_frames: usize,
    pub min_bitrate: u32,
    pub max_bitrate: u32,
    pub total_samples: u64,
    pub duration_secs: f64,
    /// Bytes from the first frame to the end of the last one.
    pub stream_bytes: usize,
}

impl StreamStats {
    pub fn collect(file: &Mp3File) -> Option<Self> {
        let mut frames = file.frames();
        let first = frames.next()?;

        let mut stats = Self {
            first_frame: first.offset,
            first_header: first.header.clone(),
            frames: 0,
            protected_frames: 0,
            marked_frames: marked_frames(file).count(),
            min_bitrate: u32::MAX,
            max_bitrate: 0,
            total_samples: 0,
            duration_secs: 0.0,
            stream_bytes: 0,
        };

        let mut end = first.offset;
        for frame in std::iter::once(first).chain(frames) {
            let header = &frame.header;

            stats.frames += 1;
            if header.is_protected() {
                stats.protected_frames += 1;
            }

            let Ok(rate) = bitrate(header.version, header.layer, header.bitrate_index) else {
                end = end.max(frame.offset);
                continue;
            };
            stats.min_bitrate = stats.min_bitrate.min(rate);
            stats.max_bitrate = stats.max_bitrate.max(rate);

            if let (Ok(samples), Ok(freq)) = (
                samples_per_frame(header.version, header.layer),
                sample_rate(header.version, header.sample_rate_index),
            ) {
                stats.total_samples += samples as u64;
                stats.duration_secs += samples as f64 / freq as f64;
            }

            end = frame_length(header)
                .map(|len| frame.offset + len)
                .unwrap_or(frame.offset);
        }

        if stats.min_bitrate > stats.max_bitrate {
            stats.min_bitrate = 0;
        }
        stats.stream_bytes = end.min(file.as_bytes().len()) - stats.first_frame;

        Some(stats)
    }

    /// Whether the bitrate changes along the chain.
    pub fn is_vbr(&self) -> bool {
        self.min_bitrate != self.max_bitrate
    }

    /// Average bitrate in bits per second, derived from stream size and duration.
    pub fn average_bitrate(&self) -> f64 {
        if self.duration_secs > 0.0 {
            self.stream_bytes as f64 * 8.0 / self.duration_secs
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::test_stream;
    use crate::structs::header::{Layer, Version};
    use anyhow::Result;

    #[test]
    fn cbr_stream() -> Result<()> {
        let file = Mp3File::from_bytes(test_stream(50))?;
        let stats = StreamStats::collect(&file).unwrap();

        assert_eq!(stats.first_frame, 0);
        assert_eq!(stats.first_header.version, Version::Mpeg1);
        assert_eq!(stats.first_header.layer, Layer::III);
        assert_eq!(stats.frames, 50);
        assert_eq!(stats.protected_frames, 0);
        assert_eq!(stats.marked_frames, 0);
        assert_eq!(stats.min_bitrate, 128_000);
        assert!(!stats.is_vbr());
        assert_eq!(stats.total_samples, 50 * 1152);
        assert!((stats.duration_secs - 50.0 * 1152.0 / 44_100.0).abs() < 1e-9);
        assert_eq!(stats.stream_bytes, 50 * 417);

        // 417-byte frames run slightly under the nominal 128 kbps.
        let average = stats.average_bitrate();
        assert!(average > 127_000.0 && average < 128_000.0);

        Ok(())
    }

    #[test]
    fn counts_marked_frames() -> Result<()> {
        let mut file = Mp3File::from_bytes(test_stream(16))?;
        file.embed(&[0xF0, 0x01])?;

        let stats = StreamStats::collect(&file).unwrap();
        assert_eq!(stats.marked_frames, 5);

        Ok(())
    }

    #[test]
    fn mixed_bitrates() -> Result<()> {
        let mut data = test_stream(3);

        // 320 kbps, 44.1 kHz: 1044 bytes
        let mut big = vec![0u8; 1044];
        big[..4].copy_from_slice(&[0xFF, 0xFB, 0xE0, 0x44]);
        data.extend(big);
        data.extend(test_stream(2));

        let file = Mp3File::from_bytes(data)?;
        let stats = StreamStats::collect(&file).unwrap();

        assert_eq!(stats.frames, 6);
        assert_eq!(stats.min_bitrate, 128_000);
        assert_eq!(stats.max_bitrate, 320_000);
        assert!(stats.is_vbr());
        assert_eq!(stats.stream_bytes, 5 * 417 + 1044);

        Ok(())
    }
}
