use crate::bytestream::reader::ByteIoError;
use crate::bytestream::ByteWriterTrait;

pub(crate) mod mem_writers;
pub(crate) mod std_writer;

/// An endian aware writer over anything implementing [`ByteWriterTrait`]
///
/// Tracks how many bytes have been handed to the sink so encoders can
/// report their output size without querying the sink itself.
pub struct ByteWriter<T: ByteWriterTrait> {
    inner:         T,
    bytes_written: usize
}

impl<T: ByteWriterTrait> ByteWriter<T> {
    /// Create a new writer that hands bytes to `sink`
    pub fn new(sink: T) -> ByteWriter<T> {
        ByteWriter {
            inner:         sink,
            bytes_written: 0
        }
    }

    /// Destroy this writer returning the underlying sink
    pub fn consume(self) -> T {
        self.inner
    }

    /// Number of bytes successfully handed to the sink so far
    pub fn bytes_written(&self) -> usize {
        self.bytes_written
    }

    /// Write as much of `buf` as the sink accepts, returning the number
    /// of bytes taken
    pub fn write(&mut self, buf: &[u8]) -> Result<usize, ByteIoError> {
        let written = self.inner.write_bytes(buf)?;
        self.bytes_written += written;
        Ok(written)
    }

    /// Write the whole of `buf` or error out
    pub fn write_all(&mut self, buf: &[u8]) -> Result<(), ByteIoError> {
        self.inner.write_all_bytes(buf)?;
        self.bytes_written += buf.len();
        Ok(())
    }

    /// Write a fixed size array or error out
    #[inline(always)]
    pub fn write_const_bytes<const N: usize>(&mut self, buf: &[u8; N]) -> Result<(), ByteIoError> {
        self.inner.write_const_bytes(buf)?;
        self.bytes_written += N;
        Ok(())
    }

    /// Write a single byte or error out
    #[inline(always)]
    pub fn write_u8(&mut self, byte: u8) -> Result<(), ByteIoError> {
        self.write_const_bytes(&[byte])
    }

    /// Hint to the sink how many bytes the encoder expects to produce
    pub fn reserve(&mut self, size: usize) -> Result<(), ByteIoError> {
        self.inner.reserve_capacity(size)
    }

    /// Ensure all written bytes reach the underlying storage
    pub fn flush(&mut self) -> Result<(), ByteIoError> {
        self.inner.flush_bytes()
    }
}

enum Mode {
    // Big endian
    BE,
    // Little Endian
    LE
}

macro_rules! write_single_type {
    ($name:tt,$name2:tt,$name3:tt,$int_type:tt) => {
        impl<T: ByteWriterTrait> ByteWriter<T> {
            #[inline(always)]
            fn $name(&mut self, value: $int_type, mode: Mode) -> Result<(), ByteIoError> {
                let bytes = match mode {
                    Mode::BE => value.to_be_bytes(),
                    Mode::LE => value.to_le_bytes()
                };
                self.write_const_bytes(&bytes)
            }

            #[doc=concat!("Write ",stringify!($int_type)," as a big endian integer")]
            #[doc=concat!("Returning an error if the underlying sink cannot take a ",stringify!($int_type)," write.")]
            #[inline]
            pub fn $name2(&mut self, value: $int_type) -> Result<(), ByteIoError> {
                self.$name(value, Mode::BE)
            }

            #[doc=concat!("Write ",stringify!($int_type)," as a little endian integer")]
            #[doc=concat!("Returning an error if the underlying sink cannot take a ",stringify!($int_type)," write.")]
            #[inline]
            pub fn $name3(&mut self, value: $int_type) -> Result<(), ByteIoError> {
                self.$name(value, Mode::LE)
            }
        }
    };
}

write_single_type!(write_u16_inner, write_u16_be, write_u16_le, u16);
write_single_type!(write_u32_inner, write_u32_be, write_u32_le, u32);

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use crate::bytestream::ByteWriter;

    #[test]
    fn vec_sink_grows() {
        let mut sink = Vec::new();
        let mut writer = ByteWriter::new(&mut sink);

        writer.write_u16_le(0x4D42).unwrap();
        writer.write_u32_le(0xAABBCCDD).unwrap();
        writer.write_u8(0x7F).unwrap();

        assert_eq!(writer.bytes_written(), 7);
        assert_eq!(sink, &[0x42, 0x4D, 0xDD, 0xCC, 0xBB, 0xAA, 0x7F]);
    }

    #[test]
    fn slice_sink_rejects_overflow() {
        let mut storage = [0_u8; 2];
        let mut writer = ByteWriter::new(&mut storage[..]);

        writer.write_u16_be(0x0102).unwrap();
        assert!(writer.write_u8(3).is_err());
        assert_eq!(writer.bytes_written(), 2);

        assert_eq!(storage, [1, 2]);
    }

    #[test]
    fn endianness_of_writes() {
        let mut sink = Vec::new();
        let mut writer = ByteWriter::new(&mut sink);

        writer.write_u32_be(0x01020304).unwrap();
        writer.write_u16_be(0x0506).unwrap();

        assert_eq!(sink, &[1, 2, 3, 4, 5, 6]);
    }
}
