// error.rs
//
// Copyright (c) 2019-2025  Douglas Lau
//
use std::fmt;
use std::io;

/// Errors encountered while decoding
#[derive(Debug)]
pub enum Error {
    /// A wrapped I/O error.
    Io(io::Error),
    /// Read past the end of the buffer.
    BufferUnderrun,
    /// Decoded color index outside the active color table.
    IndexOutOfRange {
        /// Decoded index
        index: u8,
        /// Number of entries in the color table
        len: usize,
    },
    /// Missing color table for an image block.
    MissingColorTable,
    /// Invalid block code (signature).
    InvalidBlockCode(u8),
    /// LZW minimum code size too large.
    InvalidCodeSize(u8),
    /// Graphic control extension has invalid length.
    MalformedGraphicControlExtension,
    /// Image larger than specified by
    /// [max_image_sz](struct.Decoder.html#method.max_image_sz).
    TooLargeImage,
}

/// Gifdec result type
pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(err) => err.fmt(fmt),
            Error::IndexOutOfRange { index, len } => {
                write!(fmt, "color index {index} out of range ({len} entries)")
            }
            Error::InvalidBlockCode(code) => {
                write!(fmt, "invalid block code: {code:#04X}")
            }
            Error::InvalidCodeSize(sz) => {
                write!(fmt, "invalid LZW minimum code size: {sz}")
            }
            _ => fmt::Debug::fmt(self, fmt),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::Io(ref err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}
