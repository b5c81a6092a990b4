use std::io;

/// Failures surfaced by loading, embedding and extracting.
///
/// The discriminants double as process exit codes; see [`StegoError::code`].
#[derive(thiserror::Error, Debug)]
pub enum StegoError {
    #[error("Can't read MP3 file: {0}")]
    FileRead(#[source] io::Error),

    #[error("Can't write to MP3 file: {0}")]
    FileWrite(#[source] io::Error),

    #[error("Out of memory: cannot allocate {0} bytes")]
    Memory(u64),

    #[error("Not an MP3 file")]
    NotAnMp3File,

    #[error("Insufficient space in file: payload needs {needed} bits, {available} available")]
    InsufficientRoom { needed: usize, available: usize },

    #[error("Invalid data in MP3 file: frame chain broke after {written} bits")]
    InvalidData { written: usize },

    #[error("No input file specified")]
    NoInputFile,
}

impl StegoError {
    /// Numeric error kind, `0` being reserved for success.
    pub fn code(&self) -> u8 {
        match self {
            StegoError::FileRead(_) => 1,
            StegoError::FileWrite(_) => 2,
            StegoError::Memory(_) => 3,
            StegoError::NotAnMp3File => 4,
            StegoError::InsufficientRoom { .. } => 5,
            StegoError::InvalidData { .. } => 6,
            StegoError::NoInputFile => 7,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderError {
    #[error("Reserved MPEG version")]
    ReservedVersion,

    #[error("Reserved layer")]
    ReservedLayer,

    #[error("Reserved sampling frequency index {0}")]
    ReservedSampleRate(u8),

    #[error("Reserved emphasis")]
    ReservedEmphasis,

    #[error("Free format bitrate is not supported")]
    FreeBitrate,

    #[error("Bad bitrate index {0}")]
    BadBitrate(u8),
}

#[test]
fn error_codes_follow_declaration_order() {
    let errors = [
        StegoError::FileRead(io::Error::from(io::ErrorKind::NotFound)),
        StegoError::FileWrite(io::Error::from(io::ErrorKind::PermissionDenied)),
        StegoError::Memory(1 << 40),
        StegoError::NotAnMp3File,
        StegoError::InsufficientRoom {
            needed: 48,
            available: 40,
        },
        StegoError::InvalidData { written: 3 },
        StegoError::NoInputFile,
    ];

    let codes: Vec<u8> = errors.iter().map(StegoError::code).collect();
    assert_eq!(codes, [1, 2, 3, 4, 5, 6, 7]);
}

#[test]
fn display_messages() {
    assert_eq!(StegoError::NotAnMp3File.to_string(), "Not an MP3 file");
    assert_eq!(
        StegoError::InsufficientRoom {
            needed: 48,
            available: 40
        }
        .to_string(),
        "Insufficient space in file: payload needs 48 bits, 40 available"
    );
    assert_eq!(HeaderError::BadBitrate(15).to_string(), "Bad bitrate index 15");
}
