/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! BMP errors that can occur during decoding and encoding

use alloc::string::String;
use core::fmt::{Debug, Display, Formatter};

use dibs_core::bytestream::ByteIoError;

use crate::common::BmpCompression;

/// Errors that can occur while pulling a BMP document apart
#[non_exhaustive]
pub enum BmpDecodeErrors {
    /// The two byte file tag is not in the recognized set
    InvalidMagicBytes(u16),
    /// The DIB header declares a byte length we know nothing about
    UnknownHeaderVariant(u32),
    /// The compression field holds a value outside the known set
    UnknownCompression(u32),
    /// The bit depth is not one the format defines
    UnsupportedBitDepth(u16),
    /// The stream ended before the declared number of palette
    /// entries could be read
    // expected entries, entries actually read
    TruncatedColorTable(usize, usize),
    /// The pixel stream ended before the whole grid was covered
    TruncatedPixelData(&'static str),
    /// A run length opcode or escape is malformed
    InvalidRleStream(&'static str),
    /// The output buffer is too small, expected at least
    /// a size but got another size
    TooSmallBuffer(usize, usize),
    /// Too large dimensions for a given width or
    /// height
    TooLargeDimensions(&'static str, usize, usize),
    /// Width or height is zero
    ZeroDimensions(&'static str),
    /// The declared pixel offset disagrees with where the headers
    /// actually end, reported as an error only in strict mode
    // declared offset, position the headers ended at
    OffsetMismatch(u32, u64),
    /// A pixel grid access was outside the grid
    // row, column
    OutOfBounds(usize, usize),
    /// A calculation overflowed
    OverFlowOccurred,
    /// Generic message
    GenericStatic(&'static str),
    /// Generic allocated message
    Generic(String),
    /// An underlying I/O error
    IoErrors(ByteIoError)
}

impl Debug for BmpDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidMagicBytes(tag) => {
                writeln!(f, "Invalid magic bytes {tag:#06x}, not a BMP file tag")
            }
            Self::UnknownHeaderVariant(size) => {
                writeln!(f, "Unknown DIB header size {size}, cannot pick a variant")
            }
            Self::UnknownCompression(value) => {
                writeln!(f, "Unknown compression value {value}")
            }
            Self::UnsupportedBitDepth(depth) => {
                writeln!(f, "Unsupported bit depth {depth}")
            }
            Self::TruncatedColorTable(expected, found) => {
                writeln!(
                    f,
                    "Color table ended early, expected {expected} entries but read {found}"
                )
            }
            Self::TruncatedPixelData(reason) => {
                writeln!(f, "Pixel data ended early: {reason}")
            }
            Self::InvalidRleStream(reason) => {
                writeln!(f, "Invalid run length stream: {reason}")
            }
            Self::TooSmallBuffer(expected, found) => {
                writeln!(
                    f,
                    "Too small of a buffer, expected {expected} but found {found}"
                )
            }
            Self::TooLargeDimensions(dimension, expected, found) => {
                writeln!(
                    f,
                    "Too large dimensions for {dimension}, {found} exceeds {expected}"
                )
            }
            Self::ZeroDimensions(dimension) => {
                writeln!(f, "Zero is not a valid {dimension}")
            }
            Self::OffsetMismatch(declared, actual) => {
                writeln!(
                    f,
                    "Declared pixel offset {declared} but headers end at {actual}"
                )
            }
            Self::OutOfBounds(row, col) => {
                writeln!(f, "Pixel access ({row}, {col}) is outside the grid")
            }
            Self::OverFlowOccurred => {
                writeln!(f, "Overflow occurred")
            }
            Self::GenericStatic(message) => {
                writeln!(f, "{}", message)
            }
            Self::Generic(message) => {
                writeln!(f, "{}", message)
            }
            Self::IoErrors(err) => {
                writeln!(f, "{:?}", err)
            }
        }
    }
}

impl Display for BmpDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BmpDecodeErrors {}

impl From<ByteIoError> for BmpDecodeErrors {
    fn from(value: ByteIoError) -> Self {
        BmpDecodeErrors::IoErrors(value)
    }
}

/// Errors that can occur when serializing a document back to bytes
#[non_exhaustive]
pub enum BmpEncodeErrors {
    /// The document's bit depth is not one the encoder writes
    UnsupportedBitDepth(u16),
    /// The document's compression scheme is not one the encoder writes
    UnsupportedCompression(BmpCompression),
    /// A grid color has no entry in the document's color table
    // red, green, blue of the unmatched color
    MissingPaletteEntry([u8; 3]),
    /// The document has neither a pixel grid nor an opaque payload
    NoPixels,
    /// Generic message
    GenericStatic(&'static str),
    /// An underlying I/O error
    IoErrors(ByteIoError)
}

impl Debug for BmpEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnsupportedBitDepth(depth) => {
                writeln!(f, "Cannot encode bit depth {depth}")
            }
            Self::UnsupportedCompression(compression) => {
                writeln!(f, "Cannot encode compression scheme {compression:?}")
            }
            Self::MissingPaletteEntry(color) => {
                writeln!(f, "Color {color:?} has no palette entry")
            }
            Self::NoPixels => {
                writeln!(f, "Document has no pixels or payload to encode")
            }
            Self::GenericStatic(message) => {
                writeln!(f, "{}", message)
            }
            Self::IoErrors(err) => {
                writeln!(f, "{:?}", err)
            }
        }
    }
}

impl Display for BmpEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BmpEncodeErrors {}

impl From<ByteIoError> for BmpEncodeErrors {
    fn from(value: ByteIoError) -> Self {
        BmpEncodeErrors::IoErrors(value)
    }
}
