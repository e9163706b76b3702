use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid usage: {0}")]
    InvalidUsage(String),

    #[error("truncated input: {available} trailing bits cannot form a {width}-bit field")]
    TruncatedInput { available: u8, width: u8 },

    #[error("field width must be between 1 and 16 bits, got {0}")]
    InvalidWidth(u8),

    #[error("bitmap needs {expected} bits but only {actual} were decoded")]
    ShortBitmap { expected: u64, actual: u64 },
}

pub type Result<T> = std::result::Result<T, CodecError>;
