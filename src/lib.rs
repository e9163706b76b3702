//! # Bitmap Run-Length Encoding
//!
//! A bit sequence is cut into maximal runs of equal bits and each run length is
//! written as an unsigned field of `W` bits ([`FIELD_WIDTH`] by default).
//!
//! ```text
//!   bits    0000 0000 0000 1111 1110 0000
//!           └───── 12 ─────┘└─ 7 ─┘└ 5 ─┘
//!   fields  0000 1100   0000 0111   0000 0101
//! ```
//!
//! Run values are not stored. The first run is always a run of `0` and every
//! field after it switches to the other bit, so an input starting with `1`
//! begins with a zero-length field.
//!
//! A run longer than `2^W - 1` is split: a full field, a zero-length field of
//! the other bit, then the rest of the run.
//!
//! ```text
//!   256 zeros, W = 8   →   [255] [0] [1]
//! ```
//!
//! The stream has no header, no length and no checksum. Fields are packed most
//! significant bit first and the last byte is padded with zero bits. While
//! decoding, a trailing remainder shorter than a field is padding if it is
//! shorter than a byte and all zero, otherwise the input is truncated. Whole
//! padding fields (possible for `W < 8`) decode as zero-length runs.
//!
//! Encoder and decoder must agree on `W`; nothing in the stream records it.

#[macro_use]
extern crate log;

pub mod bitmap;
mod bits;
mod derle;
mod error;
mod polarity;
mod rle;
mod split;

pub use bits::{BitReader, BitWriter};
pub use derle::Decoder;
pub use error::{CodecError, Result};
pub use polarity::Polarity;
pub use rle::Encoder;
pub use split::{split, Split};

use std::io;
use std::str::FromStr;

/// Width of a run-length field on the wire.
pub const FIELD_WIDTH: u8 = 8;
pub const MAX_FIELD_WIDTH: u8 = 16;

/// Longest run a single field of `width` bits can hold.
const fn max_run(width: u8) -> u16 {
    ((1u32 << width) - 1) as u16
}

fn check_width(width: u8) -> Result<u16> {
    if width == 0 || width > MAX_FIELD_WIDTH {
        return Err(CodecError::InvalidWidth(width));
    }
    Ok(max_run(width))
}

/// Direction selected on the command line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    /// `-`: raw bits in, fields out.
    Compress,
    /// `+`: fields in, raw bits out.
    Expand,
}

impl FromStr for Mode {
    type Err = CodecError;

    fn from_str(arg: &str) -> Result<Self> {
        match arg {
            "-" => Ok(Mode::Compress),
            "+" => Ok(Mode::Expand),
            other => Err(CodecError::InvalidUsage(format!(
                "expected `-` (compress) or `+` (expand), got `{other}`"
            ))),
        }
    }
}

/// Runs `mode` over the whole of `reader` with [`FIELD_WIDTH`]-bit fields.
pub fn run<R: io::Read, W: io::Write>(mode: Mode, reader: R, writer: W) -> Result<()> {
    debug!("{mode:?} with {FIELD_WIDTH}-bit fields");
    match mode {
        Mode::Compress => Encoder::new(writer).encode_all(reader),
        Mode::Expand => Decoder::new(writer).decode_all(reader),
    }
}

#[cfg(test)]
const TEST_VECTOR: [(&str, &str); 15] = [
    ("", ""),
    ("00", "08"),
    ("ff", "0008"),
    ("0f", "0404"),
    ("f0", "000404"),
    ("55", "0101010101010101"),
    ("aa", "000101010101010101"),
    ("00000000000000000000000000000000000000000000000000000000000000", "f8"),
    ("0000000000000000000000000000000000000000000000000000000000000000", "ff0001"),
    ("ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff", "00ff0001"),
    (
        "00000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000",
        "ff00ff0002",
    ),
    ("0000ffff", "1010"),
    ("f0000001", "00041b01"),
    ("80", "000107"),
    (
        "ffff0000000000000000000000000000000000000000000000000000000000000000000000000000000001",
        "0010ff004801",
    ),
];
