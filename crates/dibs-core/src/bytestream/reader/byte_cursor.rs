/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec::Vec;

use crate::bytestream::reader::{ByteIoError, SeekFrom};
use crate::bytestream::ByteReaderTrait;

/// An in-memory cursor over anything that can be viewed as a slice
/// of bytes
///
/// This is the preferred byte source when the whole input sits in
/// memory; position and end-of-stream queries are simple integer
/// comparisons and never touch the operating system.
#[derive(Clone)]
pub struct ByteCursor<T: AsRef<[u8]>> {
    inner:    T,
    position: usize
}

impl<T: AsRef<[u8]>> ByteCursor<T> {
    /// Create a new cursor positioned at the start of `inner`
    pub fn new(inner: T) -> ByteCursor<T> {
        ByteCursor { inner, position: 0 }
    }

    /// Return the current byte offset from the start of the buffer
    pub fn position(&self) -> usize {
        self.position
    }

    /// Destroy the cursor, returning the wrapped buffer
    pub fn into_inner(self) -> T {
        self.inner
    }

    fn remaining_bytes(&self) -> usize {
        self.inner.as_ref().len().saturating_sub(self.position)
    }
}

impl<T: AsRef<[u8]>> ByteReaderTrait for ByteCursor<T> {
    #[inline(always)]
    fn read_byte_no_error(&mut self) -> u8 {
        let byte = self
            .inner
            .as_ref()
            .get(self.position)
            .copied()
            .unwrap_or(0);
        if self.position < self.inner.as_ref().len() {
            self.position += 1;
        }
        byte
    }

    #[inline(always)]
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError> {
        let end = self
            .position
            .checked_add(buf.len())
            .ok_or(ByteIoError::SeekError("read range overflow"))?;

        match self.inner.as_ref().get(self.position..end) {
            Some(bytes) => {
                buf.copy_from_slice(bytes);
                self.position = end;
                Ok(())
            }
            None => Err(ByteIoError::NotEnoughBytes(
                buf.len(),
                self.remaining_bytes()
            ))
        }
    }

    #[inline(always)]
    fn read_const_bytes<const N: usize>(&mut self, buf: &mut [u8; N]) -> Result<(), ByteIoError> {
        let end = self
            .position
            .checked_add(N)
            .ok_or(ByteIoError::SeekError("read range overflow"))?;

        match self.inner.as_ref().get(self.position..end) {
            Some(bytes) => {
                buf.copy_from_slice(bytes);
                self.position = end;
                Ok(())
            }
            None => Err(ByteIoError::NotEnoughBytes(N, self.remaining_bytes()))
        }
    }

    #[inline(always)]
    fn read_const_bytes_no_error<const N: usize>(&mut self, buf: &mut [u8; N]) {
        let _ = self.read_const_bytes(buf);
    }

    #[inline(always)]
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ByteIoError> {
        let source = self.inner.as_ref();
        let start = source.len().min(self.position);
        let amt = buf.len().min(source.len() - start);

        buf[..amt].copy_from_slice(&source[start..start + amt]);
        self.position += amt;
        Ok(amt)
    }

    fn seek_bytes(&mut self, from: SeekFrom) -> Result<u64, ByteIoError> {
        let new_position = match from {
            SeekFrom::Start(position) => i64::try_from(position)?,
            SeekFrom::End(offset) => i64::try_from(self.inner.as_ref().len())?
                .checked_add(offset)
                .ok_or(ByteIoError::SeekError("seek offset overflow"))?,
            SeekFrom::Current(offset) => i64::try_from(self.position)?
                .checked_add(offset)
                .ok_or(ByteIoError::SeekError("seek offset overflow"))?
        };

        if new_position < 0 {
            return Err(ByteIoError::SeekError(
                "cannot seek before the start of the buffer"
            ));
        }
        self.position = usize::try_from(new_position)?;

        Ok(self.position as u64)
    }

    #[inline(always)]
    fn is_eof(&mut self) -> Result<bool, ByteIoError> {
        Ok(self.position >= self.inner.as_ref().len())
    }

    #[inline(always)]
    fn byte_position(&mut self) -> Result<u64, ByteIoError> {
        Ok(self.position as u64)
    }

    fn read_remaining(&mut self, sink: &mut Vec<u8>) -> Result<usize, ByteIoError> {
        let source = self.inner.as_ref();
        let start = source.len().min(self.position);

        sink.extend_from_slice(&source[start..]);
        self.position = source.len();

        Ok(source.len() - start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_track_position() {
        let mut cursor = ByteCursor::new([1_u8, 2, 3]);

        assert_eq!(cursor.read_byte_no_error(), 1);
        assert_eq!(cursor.position(), 1);

        let mut two = [0_u8; 2];
        cursor.read_const_bytes(&mut two).unwrap();
        assert_eq!(two, [2, 3]);
        assert!(cursor.is_eof().unwrap());

        // exhausted cursor keeps handing out zeroes
        assert_eq!(cursor.read_byte_no_error(), 0);
        assert_eq!(cursor.position(), 3);
    }

    #[test]
    fn failed_read_leaves_position_untouched() {
        let mut cursor = ByteCursor::new([1_u8, 2]);
        cursor.read_byte_no_error();

        let mut buf = [0_u8; 4];
        assert!(cursor.read_exact_bytes(&mut buf).is_err());
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn seeking_past_the_end_is_allowed() {
        let mut cursor = ByteCursor::new([0_u8; 4]);

        let pos = cursor.seek_bytes(SeekFrom::Start(10)).unwrap();
        assert_eq!(pos, 10);
        assert!(cursor.is_eof().unwrap());

        let mut buf = [0xFF_u8; 2];
        assert_eq!(cursor.read_bytes(&mut buf).unwrap(), 0);
    }
}
