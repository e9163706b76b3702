use crate::bits::{BitReader, BitWriter};
use crate::error::{CodecError, Result};
use crate::polarity::Polarity;
use crate::{check_width, FIELD_WIDTH};
use std::io;

/// Rebuilds a bit sequence from run-length fields.
pub struct Decoder<W: io::Write> {
    expected: Polarity,
    width: u8,
    bits: u64,
    fields: u64,
    sink: BitWriter<W>,
}

impl<W: io::Write> Decoder<W> {
    pub fn new(writer: W) -> Self {
        Decoder::build(writer, FIELD_WIDTH)
    }

    pub fn with_width(writer: W, width: u8) -> Result<Self> {
        check_width(width)?;
        Ok(Decoder::build(writer, width))
    }

    fn build(writer: W, width: u8) -> Self {
        Decoder {
            expected: Polarity::FIRST,
            width,
            bits: 0,
            fields: 0,
            sink: BitWriter::new(writer),
        }
    }

    /// Writes one run of the expected bit and hands the turn to the other bit.
    ///
    /// The flip also happens for `run_length == 0`, which is how an escape
    /// resumes a run that overflowed its field.
    #[inline(always)]
    pub fn update(&mut self, run_length: u16) -> io::Result<()> {
        trace!("decode {run_length} x {:?}", self.expected);
        self.sink.write_run(self.expected.is_one(), run_length as u64)?;
        self.bits += run_length as u64;
        self.fields += 1;
        self.expected = self.expected.flip();
        Ok(())
    }

    /// Decodes fields until `reader` is exhausted and closes the sink.
    ///
    /// A trailing remainder shorter than a field is accepted only as the zero
    /// padding of the final byte; anything else is [`CodecError::TruncatedInput`].
    pub fn decode_all<R: io::Read>(mut self, reader: R) -> Result<()> {
        let mut source = BitReader::new(reader);
        loop {
            let available = source.fill(self.width)?;
            if available == 0 {
                break;
            }
            if available < self.width {
                if source.is_padding() {
                    trace!("skip {available} padding bits");
                    break;
                }
                return Err(CodecError::TruncatedInput {
                    available,
                    width: self.width,
                });
            }
            let run_length = source.read_bits(self.width)?;
            self.update(run_length)?;
        }
        self.finalize()?;
        Ok(())
    }

    pub fn finalize(mut self) -> io::Result<()> {
        debug!(
            "decoded {} fields of {} bits into {} bits",
            self.fields, self.width, self.bits
        );
        self.sink.close()
    }
}
