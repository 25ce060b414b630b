/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Traits for reading and writing bitmap streams
//!
//!
//! This exposes the traits implemented by sources the decoders read
//! from and sinks the encoders write to.

use crate::bytestream::reader::{ByteIoError, SeekFrom};

/// The input trait implemented for readers.
///
/// This provides the basic functions needed for quick and sometimes
/// heap free I/O for the bitmap decoders with easy support for extending it
/// to multiple implementations.
///
/// # Considerations
///
/// If you have an in memory buffer, prefer [`ByteCursor`](crate::bytestream::ByteCursor)
/// over wrapping it in a [`BufReader`](std::io::BufReader); the cursor can answer
/// position and end-of-stream queries without extra seeks.
pub trait ByteReaderTrait {
    /// Read a single byte from the source and return
    /// `0` if we can't read the byte, e.g because of EOF
    ///
    /// The implementation should try to be as fast as possible as this is called
    /// from some hot loops where it may become the bottleneck
    fn read_byte_no_error(&mut self) -> u8;
    /// Read exact bytes required to fill `buf` or return an error if that isn't possible
    ///
    /// ## Arguments
    ///  - `buf`: Buffer to fill with bytes from the underlying reader
    /// ## Errors
    /// In case of an error, the implementation should not increment the internal position
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError>;

    /// Read exact bytes required to fill `buf` or return an error if that isn't possible
    ///
    /// This is the same as [`read_exact_bytes`](Self::read_exact_bytes) but implemented as a
    /// separate method to allow some implementations to optimize it to cost fewer instructions
    ///
    /// ## Arguments
    ///  - `buf`: Buffer to fill with bytes from the underlying reader
    /// ## Errors
    /// In case of an error, the implementation should not increment the internal position
    fn read_const_bytes<const N: usize>(&mut self, buf: &mut [u8; N]) -> Result<(), ByteIoError>;

    /// Read exact bytes required to fill `buf` or ignore `buf` entirely if the
    /// buffer cannot be filled completely
    ///
    /// ## Arguments
    ///  - `buf`: Buffer to fill with bytes from the underlying reader
    fn read_const_bytes_no_error<const N: usize>(&mut self, buf: &mut [u8; N]);

    /// Read bytes into `buf` returning how many bytes were read or an error if one occurred
    ///
    /// This doesn't guarantee that `buf` will be filled with bytes, for such a guarantee see
    /// [`read_exact_bytes`](Self::read_exact_bytes)
    ///
    /// ## Arguments
    /// - `buf`: The buffer to fill with bytes
    ///
    /// ## Returns
    ///  - `Ok(usize)` - Actual bytes read into the buffer
    ///  - `Err()` - The error encountered when reading bytes for which we couldn't recover
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ByteIoError>;
    /// Seek to a new position in the source
    ///
    /// This is similar to the [seek](std::io::Seek::seek) function in the [Seek](std::io::Seek)
    /// trait but implemented to work for no-std environments
    fn seek_bytes(&mut self, from: SeekFrom) -> Result<u64, ByteIoError>;
    /// Report whether we are at the end of a stream.
    ///
    /// ## Warning
    /// This may cause an additional syscall, e.g when we are reading from a file we must query
    /// the file to check whether we really are at the end, hence use it with care
    ///
    /// ## Returns
    /// - `Ok(bool)` - The answer to whether or not we are at the end of the stream
    /// - `Err()` - The error that occurred when we queried the underlying reader
    fn is_eof(&mut self) -> Result<bool, ByteIoError>;

    /// Return the current position of the inner cursor.
    ///
    /// This can be used to check the advancement of the cursor
    fn byte_position(&mut self) -> Result<u64, ByteIoError>;
    /// Read all bytes remaining in this input to `sink` until we hit eof
    ///
    /// ## Returns
    /// - `Ok(usize)` The actual number of bytes added to the sink
    /// - `Err()` An error that occurred when reading bytes
    fn read_remaining(&mut self, sink: &mut alloc::vec::Vec<u8>) -> Result<usize, ByteIoError>;
}

/// The writer trait implemented for the dibs library of encoders
///
/// Anything that implements this trait can be used as a sink
/// for writing encoded bitmaps
pub trait ByteWriterTrait {
    /// Write some bytes into the sink returning the number of bytes written or
    /// an error if something bad happened
    ///
    /// An implementation is free to write fewer bytes than are in `buf`, so full
    /// writes cannot be guaranteed
    fn write_bytes(&mut self, buf: &[u8]) -> Result<usize, ByteIoError>;
    /// Write all bytes to the sink or return an error if something occurred
    ///
    /// This will always write all bytes, if it can't it will
    /// error out
    fn write_all_bytes(&mut self, buf: &[u8]) -> Result<(), ByteIoError>;
    /// Write a fixed number of bytes and error out if we can't write the bytes
    ///
    /// This is provided to allow for optimized writes where possible (when the compiler
    /// can const fold them)
    fn write_const_bytes<const N: usize>(&mut self, buf: &[u8; N]) -> Result<(), ByteIoError>;
    /// Ensure bytes are written to the sink.
    ///
    /// Implementations backed by buffered storage should treat this like `fsync`
    /// and guarantee that all in-core data reaches the underlying storage
    fn flush_bytes(&mut self) -> Result<(), ByteIoError>;

    /// A hint to tell the implementation how big of a size we expect the output to be
    ///
    /// An implementation like an in memory `Vec` can use this to reserve additional memory
    /// to prevent reallocation when encoding
    ///
    /// This is just a hint, akin to calling `Vec::reserve` and should be treated as such.
    /// If your implementation doesn't support it, e.g files or mutable slices, it's okay to
    /// return `Ok(())`
    fn reserve_capacity(&mut self, size: usize) -> Result<(), ByteIoError>;
}
