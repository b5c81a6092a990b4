//! Bit-level reading over byte slices.
//!
//! Header fields are not byte aligned, so the header codec reads them
//! MSB-first through a big-endian [`BitReader`].

use std::io;

use bitstream_io::{BigEndian, BitRead, BitReader, UnsignedInteger};

#[derive(Debug)]
pub struct BitstreamIoReader<R: io::Read + io::Seek> {
    bs: BitReader<R, BigEndian>,
    len: u64,
}

pub type BsIoSliceReader<'a> = BitstreamIoReader<io::Cursor<&'a [u8]>>;

impl<R> BitstreamIoReader<R>
where
    R: io::Read + io::Seek,
{
    pub fn new(read: R, len_bytes: u64) -> Self {
        Self {
            bs: BitReader::new(read),
            len: len_bytes << 3,
        }
    }

    #[inline(always)]
    pub fn get(&mut self) -> io::Result<bool> {
        self.bs.read_bit()
    }

    #[inline(always)]
    pub fn get_n<I: UnsignedInteger>(&mut self, n: u32) -> io::Result<I> {
        match self.bs.read_unsigned_var(n) {
            Ok(val) => Ok(val),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "get_n({}): out of bounds bits at {}",
                    n,
                    self.bs.position_in_bits().unwrap_or(0)
                ),
            )),
            Err(e) => Err(e),
        }
    }

    pub fn skip_n(&mut self, n: u32) -> io::Result<()> {
        self.bs.skip(n)
    }

    pub fn position(&mut self) -> io::Result<u64> {
        self.bs.position_in_bits()
    }

    /// Bits left before the end of the underlying data.
    pub fn available(&mut self) -> io::Result<u64> {
        Ok(self.len.saturating_sub(self.position()?))
    }
}

impl<'a> BsIoSliceReader<'a> {
    pub fn from_slice(buf: &'a [u8]) -> Self {
        Self::new(io::Cursor::new(buf), buf.len() as u64)
    }
}

#[test]
fn reads_msb_first() -> io::Result<()> {
    let mut reader = BsIoSliceReader::from_slice(&[0b1011_0010, 0xFF]);

    assert!(reader.get()?);
    assert_eq!(reader.get_n::<u8>(3)?, 0b011);
    reader.skip_n(2)?;
    assert_eq!(reader.get_n::<u8>(2)?, 0b10);
    assert_eq!(reader.available()?, 8);
    assert_eq!(reader.get_n::<u16>(8)?, 0xFF);
    assert!(reader.get_n::<u8>(1).is_err());

    Ok(())
}
