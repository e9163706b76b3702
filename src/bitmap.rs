//! Monochrome images as bit sequences.
//!
//! Pixels are visited row by row. A pixel darker than the threshold is ink and
//! becomes a `1` bit; everything else is a `0` bit.

use crate::{CodecError, Decoder, Encoder, Result};
use image::{GrayImage, Luma};
use std::io;

/// Luma values below this count as ink.
pub const INK_THRESHOLD: u8 = 128;

const INK: Luma<u8> = Luma([0]);
const PAPER: Luma<u8> = Luma([255]);

pub fn bits(image: &GrayImage, threshold: u8) -> impl Iterator<Item = bool> + '_ {
    image.pixels().map(move |&Luma([luma])| luma < threshold)
}

pub fn encode_image<W: io::Write>(
    image: &GrayImage,
    threshold: u8,
    mut encoder: Encoder<W>,
) -> io::Result<()> {
    debug!("encode {}x{} bitmap", image.width(), image.height());
    for bit in bits(image, threshold) {
        encoder.update(bit)?;
    }
    encoder.finalize()
}

/// Decodes a `width` x `height` bitmap, ignoring bits past the last pixel.
pub fn decode_image<R: io::Read>(
    reader: R,
    width: u32,
    height: u32,
    field_width: u8,
) -> Result<GrayImage> {
    let mut raw = vec![];
    Decoder::with_width(&mut raw, field_width)?.decode_all(reader)?;

    let expected = width as u64 * height as u64;
    let actual = raw.len() as u64 * 8;
    if actual < expected {
        return Err(CodecError::ShortBitmap { expected, actual });
    }
    Ok(GrayImage::from_fn(width, height, |x, y| {
        let index = y as usize * width as usize + x as usize;
        if (raw[index / 8] >> (7 - index % 8)) & 1 == 1 {
            INK
        } else {
            PAPER
        }
    }))
}
