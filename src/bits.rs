//! Bit-addressable views over byte streams, most significant bit first.

use crate::error::{CodecError, Result};
use std::io;

/// Reads single bits and fixed-width integers from a byte source.
pub struct BitReader<R> {
    bytes: io::Bytes<R>,
    buf: u32,
    bit_len: u8,
}

impl<R: io::Read> BitReader<R> {
    pub fn new(reader: R) -> BitReader<R> {
        BitReader {
            bytes: reader.bytes(),
            buf: 0,
            bit_len: 0,
        }
    }

    /// Buffers up to `want` bits and returns how many are available.
    ///
    /// A result below `want` means the source is exhausted.
    pub fn fill(&mut self, want: u8) -> io::Result<u8> {
        debug_assert!(want <= 16);
        while self.bit_len < want {
            match self.bytes.next() {
                Some(byte) => {
                    self.buf = (self.buf << 8) | byte? as u32;
                    self.bit_len += 8;
                    trace!("buf: {:0width$b}, bit_len: {}", self.buf, self.bit_len, width = self.bit_len as usize);
                }
                None => break,
            }
        }
        Ok(self.bit_len.min(want))
    }

    pub fn at_end(&mut self) -> io::Result<bool> {
        Ok(self.fill(1)? == 0)
    }

    pub fn read_bit(&mut self) -> Result<bool> {
        Ok(self.read_bits(1)? == 1)
    }

    pub fn read_bits(&mut self, width: u8) -> Result<u16> {
        let available = self.fill(width)?;
        if available < width {
            return Err(CodecError::TruncatedInput { available, width });
        }
        self.bit_len -= width;
        let value = (self.buf >> self.bit_len) & ((1 << width) - 1);
        self.buf &= (1 << self.bit_len) - 1;
        Ok(value as u16)
    }

    /// Whether the buffered bits can only be the zero padding of the last byte.
    pub fn is_padding(&self) -> bool {
        self.bit_len < 8 && self.buf == 0
    }
}

/// Writes bits into a byte sink, padding the last byte with zeros on close.
///
/// Dropping an unclosed writer closes it and discards any error; call
/// [`BitWriter::close`] to observe failures.
pub struct BitWriter<W: io::Write> {
    buf: u8,
    bit_len: u8,
    closed: bool,
    writer: W,
}

impl<W: io::Write> BitWriter<W> {
    pub fn new(writer: W) -> BitWriter<W> {
        BitWriter {
            buf: 0,
            bit_len: 0,
            closed: false,
            writer,
        }
    }

    #[inline(always)]
    pub fn write_bit(&mut self, bit: bool) -> io::Result<()> {
        debug_assert!(!self.closed);
        if bit {
            self.buf |= 1 << (7 - self.bit_len);
        }
        self.bit_len += 1;
        if self.bit_len == 8 {
            self.emit()?;
        }
        Ok(())
    }

    pub fn write_bits(&mut self, value: u16, width: u8) -> io::Result<()> {
        debug_assert!(width <= 16);
        debug_assert!(width == 16 || value >> width == 0);
        for shift in (0..width).rev() {
            self.write_bit((value >> shift) & 1 == 1)?;
        }
        Ok(())
    }

    /// Writes `count` copies of `bit`, whole bytes at a time where possible.
    pub fn write_run(&mut self, bit: bool, mut count: u64) -> io::Result<()> {
        while self.bit_len != 0 && count != 0 {
            self.write_bit(bit)?;
            count -= 1;
        }
        let fill = if bit { 0xFF } else { 0x00 };
        for _ in 0..count / 8 {
            trace!("write: 0x{fill:02X}");
            self.writer.write_all(&[fill])?;
        }
        for _ in 0..count % 8 {
            self.write_bit(bit)?;
        }
        Ok(())
    }

    #[inline(always)]
    fn emit(&mut self) -> io::Result<()> {
        trace!("write: 0x{:02X}", self.buf);
        let byte = self.buf;
        self.buf = 0;
        self.bit_len = 0;
        self.writer.write_all(&[byte])
    }

    /// Flushes the partial byte and the underlying writer. Only the first call has effect.
    pub fn close(&mut self) -> io::Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        if self.bit_len != 0 {
            trace!("pad {} bits", 8 - self.bit_len);
            self.emit()?;
        }
        self.writer.flush()
    }
}

impl<W: io::Write> Drop for BitWriter<W> {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::{BitReader, BitWriter};
    use crate::CodecError;
    use std::io;

    #[test]
    fn test_write_bits_msb_first() {
        let mut out = vec![];
        let mut writer = BitWriter::new(&mut out);
        writer.write_bits(0b101, 3).unwrap();
        writer.write_bits(0b11, 2).unwrap();
        writer.close().unwrap();
        drop(writer);
        assert_eq!(out, [0b1011_1000]);
    }

    #[test]
    fn test_write_run_spans_bytes() {
        let mut out = vec![];
        let mut writer = BitWriter::new(&mut out);
        writer.write_run(false, 4).unwrap();
        writer.write_run(true, 20).unwrap();
        writer.write_run(false, 3).unwrap();
        writer.close().unwrap();
        drop(writer);
        assert_eq!(hex::encode(out), "0fffff00");
    }

    #[test]
    fn test_drop_flushes_pending_byte() {
        let mut out = vec![];
        {
            let mut writer = BitWriter::new(&mut out);
            writer.write_bit(true).unwrap();
        }
        assert_eq!(out, [0x80]);
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut out = vec![];
        let mut writer = BitWriter::new(&mut out);
        writer.write_bit(true).unwrap();
        writer.close().unwrap();
        writer.close().unwrap();
        drop(writer);
        assert_eq!(out, [0x80]);
    }

    #[test]
    fn test_read_bits() {
        let input = [0b1011_0001u8, 0xF0];
        let mut reader = BitReader::new(&input[..]);
        assert!(reader.read_bit().unwrap());
        assert_eq!(reader.read_bits(3).unwrap(), 0b011);
        assert_eq!(reader.read_bits(8).unwrap(), 0b0001_1111);
        assert!(!reader.at_end().unwrap());
        assert_eq!(reader.read_bits(4).unwrap(), 0);
        assert!(reader.at_end().unwrap());
    }

    #[test]
    fn test_read_past_end() {
        let input = [0xABu8];
        let mut reader = BitReader::new(&input[..]);
        assert_eq!(reader.read_bits(5).unwrap(), 0b10101);
        assert!(matches!(
            reader.read_bits(5),
            Err(CodecError::TruncatedInput {
                available: 3,
                width: 5
            })
        ));
    }

    #[test]
    fn test_padding_detection() {
        let input = [0b1010_1000u8];
        let mut reader = BitReader::new(&input[..]);
        reader.read_bits(5).unwrap();
        assert_eq!(reader.fill(5).unwrap(), 3);
        assert!(reader.is_padding());

        let input = [0b1010_1001u8];
        let mut reader = BitReader::new(&input[..]);
        reader.read_bits(5).unwrap();
        assert!(!reader.is_padding());
    }

    struct Failing;

    impl io::Read for Failing {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "boom"))
        }
    }

    #[test]
    fn test_source_error_propagates() {
        let mut reader = BitReader::new(Failing);
        assert!(matches!(reader.read_bit(), Err(CodecError::Io(_))));
    }
}
