use crate::bits::{BitReader, BitWriter};
use crate::error::Result;
use crate::polarity::Polarity;
use crate::split::split;
use crate::{check_width, FIELD_WIDTH};
use std::fmt::Debug;
use std::{fmt, io};

/// Turns a bit sequence into a stream of run-length fields.
pub struct Encoder<W: io::Write> {
    status: RunStatus,
    width: u8,
    max_run: u16,
    bits: u64,
    fields: u64,
    sink: BitWriter<W>,
}

#[derive(Copy, Clone)]
enum RunStatus {
    Wait,
    Run { polarity: Polarity, counter: u64 },
}

impl<W: io::Write> Encoder<W> {
    pub fn new(writer: W) -> Self {
        Encoder::build(writer, FIELD_WIDTH, crate::max_run(FIELD_WIDTH))
    }

    pub fn with_width(writer: W, width: u8) -> Result<Self> {
        let max_run = check_width(width)?;
        Ok(Encoder::build(writer, width, max_run))
    }

    fn build(writer: W, width: u8, max_run: u16) -> Self {
        Encoder {
            status: RunStatus::Wait,
            width,
            max_run,
            bits: 0,
            fields: 0,
            sink: BitWriter::new(writer),
        }
    }

    #[inline(always)]
    pub fn update(&mut self, bit: bool) -> io::Result<()> {
        let bit = Polarity::from(bit);
        self.bits += 1;
        match self.status {
            RunStatus::Wait => {
                if bit != Polarity::FIRST {
                    trace!("input starts with {bit:?}, leading escape");
                    self.emit_field(0)?;
                }
                self.status = RunStatus::Run {
                    polarity: bit,
                    counter: 1,
                };
                trace!("transit to {:?}", self.status);
            }
            RunStatus::Run { polarity, counter } if polarity == bit => {
                self.status = RunStatus::Run {
                    polarity,
                    counter: counter + 1,
                };
            }
            RunStatus::Run { polarity, counter } => {
                self.emit_run(counter)?;
                self.status = RunStatus::Run {
                    polarity: polarity.flip(),
                    counter: 1,
                };
                trace!("transit to {:?}", self.status);
            }
        }
        Ok(())
    }

    /// Encodes every bit of `reader` and closes the sink.
    ///
    /// On a read failure the pending run is dropped; the sink is still closed
    /// when `self` goes out of scope.
    pub fn encode_all<R: io::Read>(mut self, reader: R) -> Result<()> {
        let mut source = BitReader::new(reader);
        while !source.at_end()? {
            let bit = source.read_bit()?;
            self.update(bit)?;
        }
        self.finalize()?;
        Ok(())
    }

    #[inline(always)]
    fn emit_run(&mut self, counter: u64) -> io::Result<()> {
        trace!("run of {counter} bits");
        for field in split(counter, self.max_run) {
            self.emit_field(field)?;
        }
        Ok(())
    }

    #[inline(always)]
    fn emit_field(&mut self, field: u16) -> io::Result<()> {
        debug_assert!(field <= self.max_run);
        trace!("encode field {field:0width$b}", width = self.width as usize);
        self.fields += 1;
        self.sink.write_bits(field, self.width)
    }

    pub fn finalize(mut self) -> io::Result<()> {
        trace!("last run: {:?}", self.status);
        if let RunStatus::Run { counter, .. } = self.status {
            self.emit_run(counter)?;
        }
        self.status = RunStatus::Wait;
        debug!(
            "encoded {} bits into {} fields of {} bits",
            self.bits, self.fields, self.width
        );
        self.sink.close()
    }
}

impl Debug for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::Run { polarity, counter } => f
                .debug_struct("Run")
                .field("polarity", &polarity)
                .field("counter", &counter)
                .finish(),
            RunStatus::Wait => f.write_str("Wait"),
        }
    }
}

/// Accepts raw bytes, most significant bit first.
impl<W: io::Write> io::Write for Encoder<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for byte in buf.iter() {
            trace!("update byte {byte:08b}");
            for shift in (0..8).rev() {
                self.update((byte >> shift) & 1 == 1)?;
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
