/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! A simple bytestream reader and writer with endian aware reads
//! and writes
//!
//! The readers and writers operate on anything implementing
//! [`ByteReaderTrait`] and [`ByteWriterTrait`] respectively, with
//! implementations provided for in-memory buffers and, under the
//! `std` feature, for the `std::io` buffered reader and writer.

mod reader;
mod traits;
mod writer;

pub use reader::byte_cursor::ByteCursor;
pub use reader::{ByteIoError, ByteReader, SeekFrom};
pub use traits::{ByteReaderTrait, ByteWriterTrait};
pub use writer::ByteWriter;
