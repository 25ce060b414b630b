/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! A BMP/DIB document parser, pixel decoder and round-trip encoder
//!
//! This crate parses the whole family of BMP headers into one
//! document model, decodes the pixel array into a normalized top-down
//! grid and can write a document back out as bytes
//!
//! # Features
//! - `no_std` by default with `alloc`
//! - All seven DIB header shapes, including the 16 byte OS/2
//!   truncation
//! - Paletted images (1, 2, 4 and 8 bits)
//! - RLE images (4 bit and 8 bit), with strict and lenient handling
//!   of malformed runs
//! - Masked images (16 bit and 32 bit bit fields)
//! - Embedded JPEG and PNG payloads carried through as raw bytes
//!
//! # Unsupported formats
//! - CMYK bitmaps, the headers parse but the pixels do not decode
//!
//! # Decoding
//!
//! ```no_run
//! use dibs_bmp::BmpDecoder;
//! use dibs_core::bytestream::ByteCursor;
//!
//! let file_contents = [0_u8; 100];
//! let mut decoder = BmpDecoder::new(ByteCursor::new(&file_contents));
//! let document = decoder.decode().unwrap();
//!
//! println!("{} x {}", document.width(), document.height());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![macro_use]
extern crate alloc;

pub use crate::common::{BmpCompression, BMP_FILE_TAGS};
pub use crate::decoder::{probe_bmp, BmpDecoder};
pub use crate::document::{BmpDocument, OffsetMismatch, OpaquePayload};
pub use crate::encoder::BmpEncoder;
pub use crate::errors::{BmpDecodeErrors, BmpEncodeErrors};
pub use crate::grid::PixelGrid;
pub use crate::headers::{
    BmpCoreHeader, BmpFileHeader, BmpInfoHeader, BmpOs22xHeader, BmpV2Header, BmpV3Header,
    BmpV4Header, BmpV5Header, CieXyz, CieXyzTriple, DibHeader, Fxpt2Dot30, DIB_HEADER_SIZES
};
pub use crate::palette::{ColorEntry, ColorTable};

mod common;
mod decoder;
mod document;
mod encoder;
mod errors;
mod grid;
mod headers;
mod palette;
mod utils;
