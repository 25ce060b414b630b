/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The fixed file header and the seven DIB header shapes
//!
//! A BMP file starts with a 14 byte file header followed by one of
//! seven "device independent bitmap" headers distinguished only by
//! their declared byte length. Every header after the original 12 byte
//! core shape extends a previous one with new trailing fields, so the
//! shapes form a single chain and the registry below can dispatch on
//! the length alone.
//!
//! All header structs are plain data with public fields; behavior
//! (the common descriptor view) lives on the [`DibHeader`] sum type.

use dibs_core::bytestream::{ByteIoError, ByteReader, ByteReaderTrait, ByteWriter, ByteWriterTrait};

use crate::common::{is_bmp_file_tag, BmpCompression};
use crate::errors::BmpDecodeErrors;

/// Byte length of the fixed file header
pub const FILE_HEADER_SIZE: u32 = 14;

/// Every DIB header byte length the registry recognizes, in
/// ascending order
pub const DIB_HEADER_SIZES: [u32; 8] = [12, 16, 40, 52, 56, 64, 108, 124];

pub(crate) const CORE_SIZE: u32 = 12;
pub(crate) const OS22X_SHORT_SIZE: u32 = 16;
pub(crate) const INFO_SIZE: u32 = 40;
pub(crate) const V2_SIZE: u32 = 52;
pub(crate) const V3_SIZE: u32 = 56;
pub(crate) const OS22X_SIZE: u32 = 64;
pub(crate) const V4_SIZE: u32 = 108;
pub(crate) const V5_SIZE: u32 = 124;

/// The fixed 14 byte header that starts every BMP file
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BmpFileHeader {
    /// Two byte file tag, one of [`BMP_FILE_TAGS`](crate::common::BMP_FILE_TAGS)
    pub file_type:         u16,
    /// Whole file size in bytes. Informational only; real producers
    /// get this wrong often enough that it is never validated
    pub file_size:         u32,
    pub reserved1:         u16,
    pub reserved2:         u16,
    /// Offset from the start of the file to the pixel array
    pub pixel_data_offset: u32
}

impl BmpFileHeader {
    pub(crate) fn read_from<T: ByteReaderTrait>(
        reader: &mut ByteReader<T>
    ) -> Result<BmpFileHeader, BmpDecodeErrors> {
        let file_type = reader.get_u16_le_err()?;

        if !is_bmp_file_tag(file_type) {
            return Err(BmpDecodeErrors::InvalidMagicBytes(file_type));
        }

        Ok(BmpFileHeader {
            file_type,
            file_size: reader.get_u32_le_err()?,
            reserved1: reader.get_u16_le_err()?,
            reserved2: reader.get_u16_le_err()?,
            pixel_data_offset: reader.get_u32_le_err()?
        })
    }

    pub(crate) fn write_to<T: ByteWriterTrait>(
        &self, writer: &mut ByteWriter<T>
    ) -> Result<(), ByteIoError> {
        writer.write_u16_le(self.file_type)?;
        writer.write_u32_le(self.file_size)?;
        writer.write_u16_le(self.reserved1)?;
        writer.write_u16_le(self.reserved2)?;
        writer.write_u32_le(self.pixel_data_offset)
    }
}

/// A 32 bit fixed point number with 2 integer bits and 30 fractional
/// bits, the encoding the colorimetry endpoint fields use
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Fxpt2Dot30(pub i32);

impl Fxpt2Dot30 {
    /// View the fixed point value as a float
    pub fn to_f32(self) -> f32 {
        const ONE: f32 = (1_i64 << 30) as f32;

        self.0 as f32 / ONE
    }
}

/// A color endpoint in CIE XYZ space
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct CieXyz {
    pub x: Fxpt2Dot30,
    pub y: Fxpt2Dot30,
    pub z: Fxpt2Dot30
}

impl CieXyz {
    fn read_from<T: ByteReaderTrait>(reader: &mut ByteReader<T>) -> Result<CieXyz, ByteIoError> {
        Ok(CieXyz {
            x: Fxpt2Dot30(reader.get_u32_le_err()? as i32),
            y: Fxpt2Dot30(reader.get_u32_le_err()? as i32),
            z: Fxpt2Dot30(reader.get_u32_le_err()? as i32)
        })
    }

    fn write_to<T: ByteWriterTrait>(&self, writer: &mut ByteWriter<T>) -> Result<(), ByteIoError> {
        writer.write_u32_le(self.x.0 as u32)?;
        writer.write_u32_le(self.y.0 as u32)?;
        writer.write_u32_le(self.z.0 as u32)
    }
}

/// The red, green and blue endpoints a V4 or V5 header carries
///
/// Preserved for round-trips, never interpreted.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct CieXyzTriple {
    pub red:   CieXyz,
    pub green: CieXyz,
    pub blue:  CieXyz
}

impl CieXyzTriple {
    fn read_from<T: ByteReaderTrait>(
        reader: &mut ByteReader<T>
    ) -> Result<CieXyzTriple, ByteIoError> {
        Ok(CieXyzTriple {
            red:   CieXyz::read_from(reader)?,
            green: CieXyz::read_from(reader)?,
            blue:  CieXyz::read_from(reader)?
        })
    }

    fn write_to<T: ByteWriterTrait>(&self, writer: &mut ByteWriter<T>) -> Result<(), ByteIoError> {
        self.red.write_to(writer)?;
        self.green.write_to(writer)?;
        self.blue.write_to(writer)
    }
}

/// BITMAPCOREHEADER, the original 12 byte shape with 16 bit
/// dimensions and no compression field
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BmpCoreHeader {
    pub header_size:    u32,
    pub width:          u16,
    pub height:         u16,
    pub planes:         u16,
    pub bits_per_pixel: u16
}

impl BmpCoreHeader {
    fn read_from<T: ByteReaderTrait>(
        reader: &mut ByteReader<T>
    ) -> Result<BmpCoreHeader, BmpDecodeErrors> {
        Ok(BmpCoreHeader {
            header_size:    reader.get_u32_le_err()?,
            width:          reader.get_u16_le_err()?,
            height:         reader.get_u16_le_err()?,
            planes:         reader.get_u16_le_err()?,
            bits_per_pixel: reader.get_u16_le_err()?
        })
    }

    fn write_to<T: ByteWriterTrait>(&self, writer: &mut ByteWriter<T>) -> Result<(), ByteIoError> {
        writer.write_u32_le(self.header_size)?;
        writer.write_u16_le(self.width)?;
        writer.write_u16_le(self.height)?;
        writer.write_u16_le(self.planes)?;
        writer.write_u16_le(self.bits_per_pixel)
    }
}

/// BITMAPINFOHEADER, the ubiquitous 40 byte shape
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BmpInfoHeader {
    pub header_size:        u32,
    pub width:              i32,
    /// Negative height stores the rows top-down instead of the
    /// format's default bottom-up order
    pub height:             i32,
    pub planes:             u16,
    pub bits_per_pixel:     u16,
    pub compression:        BmpCompression,
    /// Size of the pixel array in bytes, 0 permitted when
    /// uncompressed
    pub image_size:         u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    /// Palette entries present, 0 meaning "derive from bit depth"
    pub colors_used:        u32,
    pub colors_important:   u32
}

impl BmpInfoHeader {
    /// A header for an uncompressed image of the given shape with
    /// every optional field zeroed
    pub fn with_dimensions(width: i32, height: i32, bits_per_pixel: u16) -> BmpInfoHeader {
        BmpInfoHeader {
            header_size: INFO_SIZE,
            width,
            height,
            planes: 1,
            bits_per_pixel,
            compression: BmpCompression::RGB,
            image_size: 0,
            x_pixels_per_meter: 0,
            y_pixels_per_meter: 0,
            colors_used: 0,
            colors_important: 0
        }
    }

    fn read_from<T: ByteReaderTrait>(
        reader: &mut ByteReader<T>
    ) -> Result<BmpInfoHeader, BmpDecodeErrors> {
        let header_size = reader.get_u32_le_err()?;
        let width = reader.get_u32_le_err()? as i32;
        let height = reader.get_u32_le_err()? as i32;
        let planes = reader.get_u16_le_err()?;
        let bits_per_pixel = reader.get_u16_le_err()?;
        let compression_value = reader.get_u32_le_err()?;
        let compression = BmpCompression::from_u32(compression_value)
            .ok_or(BmpDecodeErrors::UnknownCompression(compression_value))?;

        Ok(BmpInfoHeader {
            header_size,
            width,
            height,
            planes,
            bits_per_pixel,
            compression,
            image_size: reader.get_u32_le_err()?,
            x_pixels_per_meter: reader.get_u32_le_err()? as i32,
            y_pixels_per_meter: reader.get_u32_le_err()? as i32,
            colors_used: reader.get_u32_le_err()?,
            colors_important: reader.get_u32_le_err()?
        })
    }

    fn write_to<T: ByteWriterTrait>(&self, writer: &mut ByteWriter<T>) -> Result<(), ByteIoError> {
        writer.write_u32_le(self.header_size)?;
        writer.write_u32_le(self.width as u32)?;
        writer.write_u32_le(self.height as u32)?;
        writer.write_u16_le(self.planes)?;
        writer.write_u16_le(self.bits_per_pixel)?;
        writer.write_u32_le(self.compression.to_u32())?;
        writer.write_u32_le(self.image_size)?;
        writer.write_u32_le(self.x_pixels_per_meter as u32)?;
        writer.write_u32_le(self.y_pixels_per_meter as u32)?;
        writer.write_u32_le(self.colors_used)?;
        writer.write_u32_le(self.colors_important)
    }
}

/// The OS/2 2.x shape: every Info field plus OS/2 specific trailers
///
/// A declared length of 16 is a legal truncation carrying only the
/// dimension fields; everything after them then stays zero.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BmpOs22xHeader {
    pub header_size:        u32,
    pub width:              i32,
    pub height:             i32,
    pub planes:             u16,
    pub bits_per_pixel:     u16,
    pub compression:        BmpCompression,
    pub image_size:         u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    pub colors_used:        u32,
    pub colors_important:   u32,
    pub units:              u16,
    pub reserved:           u16,
    pub recording:          u16,
    pub rendering:          u16,
    pub size1:              u32,
    pub size2:              u32,
    pub color_encoding:     u32,
    pub identifier:         u32
}

impl BmpOs22xHeader {
    fn read_from<T: ByteReaderTrait>(
        reader: &mut ByteReader<T>
    ) -> Result<BmpOs22xHeader, BmpDecodeErrors> {
        let header_size = reader.get_u32_le_err()?;
        let width = reader.get_u32_le_err()? as i32;
        let height = reader.get_u32_le_err()? as i32;
        let planes = reader.get_u16_le_err()?;
        let bits_per_pixel = reader.get_u16_le_err()?;

        let mut header = BmpOs22xHeader {
            header_size,
            width,
            height,
            planes,
            bits_per_pixel,
            compression: BmpCompression::RGB,
            image_size: 0,
            x_pixels_per_meter: 0,
            y_pixels_per_meter: 0,
            colors_used: 0,
            colors_important: 0,
            units: 0,
            reserved: 0,
            recording: 0,
            rendering: 0,
            size1: 0,
            size2: 0,
            color_encoding: 0,
            identifier: 0
        };

        if header_size == OS22X_SHORT_SIZE {
            return Ok(header);
        }

        let compression_value = reader.get_u32_le_err()?;
        header.compression = BmpCompression::from_u32(compression_value)
            .ok_or(BmpDecodeErrors::UnknownCompression(compression_value))?;
        header.image_size = reader.get_u32_le_err()?;
        header.x_pixels_per_meter = reader.get_u32_le_err()? as i32;
        header.y_pixels_per_meter = reader.get_u32_le_err()? as i32;
        header.colors_used = reader.get_u32_le_err()?;
        header.colors_important = reader.get_u32_le_err()?;
        header.units = reader.get_u16_le_err()?;
        header.reserved = reader.get_u16_le_err()?;
        header.recording = reader.get_u16_le_err()?;
        header.rendering = reader.get_u16_le_err()?;
        header.size1 = reader.get_u32_le_err()?;
        header.size2 = reader.get_u32_le_err()?;
        header.color_encoding = reader.get_u32_le_err()?;
        header.identifier = reader.get_u32_le_err()?;

        Ok(header)
    }

    fn write_to<T: ByteWriterTrait>(&self, writer: &mut ByteWriter<T>) -> Result<(), ByteIoError> {
        writer.write_u32_le(self.header_size)?;
        writer.write_u32_le(self.width as u32)?;
        writer.write_u32_le(self.height as u32)?;
        writer.write_u16_le(self.planes)?;
        writer.write_u16_le(self.bits_per_pixel)?;

        if self.header_size == OS22X_SHORT_SIZE {
            return Ok(());
        }

        writer.write_u32_le(self.compression.to_u32())?;
        writer.write_u32_le(self.image_size)?;
        writer.write_u32_le(self.x_pixels_per_meter as u32)?;
        writer.write_u32_le(self.y_pixels_per_meter as u32)?;
        writer.write_u32_le(self.colors_used)?;
        writer.write_u32_le(self.colors_important)?;
        writer.write_u16_le(self.units)?;
        writer.write_u16_le(self.reserved)?;
        writer.write_u16_le(self.recording)?;
        writer.write_u16_le(self.rendering)?;
        writer.write_u32_le(self.size1)?;
        writer.write_u32_le(self.size2)?;
        writer.write_u32_le(self.color_encoding)?;
        writer.write_u32_le(self.identifier)
    }
}

/// The 52 byte shape: Info plus explicit red, green and blue channel
/// masks
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BmpV2Header {
    pub header_size:        u32,
    pub width:              i32,
    pub height:             i32,
    pub planes:             u16,
    pub bits_per_pixel:     u16,
    pub compression:        BmpCompression,
    pub image_size:         u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    pub colors_used:        u32,
    pub colors_important:   u32,
    pub red_mask:           u32,
    pub green_mask:         u32,
    pub blue_mask:          u32
}

impl BmpV2Header {
    fn read_from<T: ByteReaderTrait>(
        reader: &mut ByteReader<T>
    ) -> Result<BmpV2Header, BmpDecodeErrors> {
        let info = BmpInfoHeader::read_from(reader)?;

        Ok(BmpV2Header {
            header_size:        info.header_size,
            width:              info.width,
            height:             info.height,
            planes:             info.planes,
            bits_per_pixel:     info.bits_per_pixel,
            compression:        info.compression,
            image_size:         info.image_size,
            x_pixels_per_meter: info.x_pixels_per_meter,
            y_pixels_per_meter: info.y_pixels_per_meter,
            colors_used:        info.colors_used,
            colors_important:   info.colors_important,
            red_mask:           reader.get_u32_le_err()?,
            green_mask:         reader.get_u32_le_err()?,
            blue_mask:          reader.get_u32_le_err()?
        })
    }

    fn info_part(&self) -> BmpInfoHeader {
        BmpInfoHeader {
            header_size:        self.header_size,
            width:              self.width,
            height:             self.height,
            planes:             self.planes,
            bits_per_pixel:     self.bits_per_pixel,
            compression:        self.compression,
            image_size:         self.image_size,
            x_pixels_per_meter: self.x_pixels_per_meter,
            y_pixels_per_meter: self.y_pixels_per_meter,
            colors_used:        self.colors_used,
            colors_important:   self.colors_important
        }
    }

    fn write_to<T: ByteWriterTrait>(&self, writer: &mut ByteWriter<T>) -> Result<(), ByteIoError> {
        self.info_part().write_to(writer)?;
        writer.write_u32_le(self.red_mask)?;
        writer.write_u32_le(self.green_mask)?;
        writer.write_u32_le(self.blue_mask)
    }
}

/// The 56 byte shape: V2 plus an alpha channel mask
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BmpV3Header {
    pub header_size:        u32,
    pub width:              i32,
    pub height:             i32,
    pub planes:             u16,
    pub bits_per_pixel:     u16,
    pub compression:        BmpCompression,
    pub image_size:         u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    pub colors_used:        u32,
    pub colors_important:   u32,
    pub red_mask:           u32,
    pub green_mask:         u32,
    pub blue_mask:          u32,
    pub alpha_mask:         u32
}

impl BmpV3Header {
    fn read_from<T: ByteReaderTrait>(
        reader: &mut ByteReader<T>
    ) -> Result<BmpV3Header, BmpDecodeErrors> {
        let v2 = BmpV2Header::read_from(reader)?;

        Ok(BmpV3Header {
            header_size:        v2.header_size,
            width:              v2.width,
            height:             v2.height,
            planes:             v2.planes,
            bits_per_pixel:     v2.bits_per_pixel,
            compression:        v2.compression,
            image_size:         v2.image_size,
            x_pixels_per_meter: v2.x_pixels_per_meter,
            y_pixels_per_meter: v2.y_pixels_per_meter,
            colors_used:        v2.colors_used,
            colors_important:   v2.colors_important,
            red_mask:           v2.red_mask,
            green_mask:         v2.green_mask,
            blue_mask:          v2.blue_mask,
            alpha_mask:         reader.get_u32_le_err()?
        })
    }

    fn v2_part(&self) -> BmpV2Header {
        BmpV2Header {
            header_size:        self.header_size,
            width:              self.width,
            height:             self.height,
            planes:             self.planes,
            bits_per_pixel:     self.bits_per_pixel,
            compression:        self.compression,
            image_size:         self.image_size,
            x_pixels_per_meter: self.x_pixels_per_meter,
            y_pixels_per_meter: self.y_pixels_per_meter,
            colors_used:        self.colors_used,
            colors_important:   self.colors_important,
            red_mask:           self.red_mask,
            green_mask:         self.green_mask,
            blue_mask:          self.blue_mask
        }
    }

    fn write_to<T: ByteWriterTrait>(&self, writer: &mut ByteWriter<T>) -> Result<(), ByteIoError> {
        self.v2_part().write_to(writer)?;
        writer.write_u32_le(self.alpha_mask)
    }
}

/// The 108 byte shape: V3 plus colorspace type, CIE XYZ endpoints and
/// per channel gamma
///
/// The colorimetry fields are parsed and preserved, never
/// interpreted.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BmpV4Header {
    pub header_size:        u32,
    pub width:              i32,
    pub height:             i32,
    pub planes:             u16,
    pub bits_per_pixel:     u16,
    pub compression:        BmpCompression,
    pub image_size:         u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    pub colors_used:        u32,
    pub colors_important:   u32,
    pub red_mask:           u32,
    pub green_mask:         u32,
    pub blue_mask:          u32,
    pub alpha_mask:         u32,
    pub cs_type:            u32,
    pub endpoints:          CieXyzTriple,
    pub gamma_red:          u32,
    pub gamma_green:        u32,
    pub gamma_blue:         u32
}

impl BmpV4Header {
    fn read_from<T: ByteReaderTrait>(
        reader: &mut ByteReader<T>
    ) -> Result<BmpV4Header, BmpDecodeErrors> {
        let v3 = BmpV3Header::read_from(reader)?;

        Ok(BmpV4Header {
            header_size:        v3.header_size,
            width:              v3.width,
            height:             v3.height,
            planes:             v3.planes,
            bits_per_pixel:     v3.bits_per_pixel,
            compression:        v3.compression,
            image_size:         v3.image_size,
            x_pixels_per_meter: v3.x_pixels_per_meter,
            y_pixels_per_meter: v3.y_pixels_per_meter,
            colors_used:        v3.colors_used,
            colors_important:   v3.colors_important,
            red_mask:           v3.red_mask,
            green_mask:         v3.green_mask,
            blue_mask:          v3.blue_mask,
            alpha_mask:         v3.alpha_mask,
            cs_type:            reader.get_u32_le_err()?,
            endpoints:          CieXyzTriple::read_from(reader)?,
            gamma_red:          reader.get_u32_le_err()?,
            gamma_green:        reader.get_u32_le_err()?,
            gamma_blue:         reader.get_u32_le_err()?
        })
    }

    fn v3_part(&self) -> BmpV3Header {
        BmpV3Header {
            header_size:        self.header_size,
            width:              self.width,
            height:             self.height,
            planes:             self.planes,
            bits_per_pixel:     self.bits_per_pixel,
            compression:        self.compression,
            image_size:         self.image_size,
            x_pixels_per_meter: self.x_pixels_per_meter,
            y_pixels_per_meter: self.y_pixels_per_meter,
            colors_used:        self.colors_used,
            colors_important:   self.colors_important,
            red_mask:           self.red_mask,
            green_mask:         self.green_mask,
            blue_mask:          self.blue_mask,
            alpha_mask:         self.alpha_mask
        }
    }

    fn write_to<T: ByteWriterTrait>(&self, writer: &mut ByteWriter<T>) -> Result<(), ByteIoError> {
        self.v3_part().write_to(writer)?;
        writer.write_u32_le(self.cs_type)?;
        self.endpoints.write_to(writer)?;
        writer.write_u32_le(self.gamma_red)?;
        writer.write_u32_le(self.gamma_green)?;
        writer.write_u32_le(self.gamma_blue)
    }
}

/// The 124 byte shape: V4 plus rendering intent and an ICC profile
/// location
///
/// The profile bytes themselves are not read; only their offset and
/// size are kept.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BmpV5Header {
    pub header_size:        u32,
    pub width:              i32,
    pub height:             i32,
    pub planes:             u16,
    pub bits_per_pixel:     u16,
    pub compression:        BmpCompression,
    pub image_size:         u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    pub colors_used:        u32,
    pub colors_important:   u32,
    pub red_mask:           u32,
    pub green_mask:         u32,
    pub blue_mask:          u32,
    pub alpha_mask:         u32,
    pub cs_type:            u32,
    pub endpoints:          CieXyzTriple,
    pub gamma_red:          u32,
    pub gamma_green:        u32,
    pub gamma_blue:         u32,
    pub intent:             u32,
    pub profile_data:       u32,
    pub profile_size:       u32,
    pub reserved:           u32
}

impl BmpV5Header {
    fn read_from<T: ByteReaderTrait>(
        reader: &mut ByteReader<T>
    ) -> Result<BmpV5Header, BmpDecodeErrors> {
        let v4 = BmpV4Header::read_from(reader)?;

        Ok(BmpV5Header {
            header_size:        v4.header_size,
            width:              v4.width,
            height:             v4.height,
            planes:             v4.planes,
            bits_per_pixel:     v4.bits_per_pixel,
            compression:        v4.compression,
            image_size:         v4.image_size,
            x_pixels_per_meter: v4.x_pixels_per_meter,
            y_pixels_per_meter: v4.y_pixels_per_meter,
            colors_used:        v4.colors_used,
            colors_important:   v4.colors_important,
            red_mask:           v4.red_mask,
            green_mask:         v4.green_mask,
            blue_mask:          v4.blue_mask,
            alpha_mask:         v4.alpha_mask,
            cs_type:            v4.cs_type,
            endpoints:          v4.endpoints,
            gamma_red:          v4.gamma_red,
            gamma_green:        v4.gamma_green,
            gamma_blue:         v4.gamma_blue,
            intent:             reader.get_u32_le_err()?,
            profile_data:       reader.get_u32_le_err()?,
            profile_size:       reader.get_u32_le_err()?,
            reserved:           reader.get_u32_le_err()?
        })
    }

    fn v4_part(&self) -> BmpV4Header {
        BmpV4Header {
            header_size:        self.header_size,
            width:              self.width,
            height:             self.height,
            planes:             self.planes,
            bits_per_pixel:     self.bits_per_pixel,
            compression:        self.compression,
            image_size:         self.image_size,
            x_pixels_per_meter: self.x_pixels_per_meter,
            y_pixels_per_meter: self.y_pixels_per_meter,
            colors_used:        self.colors_used,
            colors_important:   self.colors_important,
            red_mask:           self.red_mask,
            green_mask:         self.green_mask,
            blue_mask:          self.blue_mask,
            alpha_mask:         self.alpha_mask,
            cs_type:            self.cs_type,
            endpoints:          self.endpoints,
            gamma_red:          self.gamma_red,
            gamma_green:        self.gamma_green,
            gamma_blue:         self.gamma_blue
        }
    }

    fn write_to<T: ByteWriterTrait>(&self, writer: &mut ByteWriter<T>) -> Result<(), ByteIoError> {
        self.v4_part().write_to(writer)?;
        writer.write_u32_le(self.intent)?;
        writer.write_u32_le(self.profile_data)?;
        writer.write_u32_le(self.profile_size)?;
        writer.write_u32_le(self.reserved)
    }
}

/// The seven DIB header shapes behind one sum type
///
/// Constructed by [`read_from`](DibHeader::read_from); the accessor
/// methods below project the attributes every shape can answer, with
/// the documented defaults where a shape lacks the field.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DibHeader {
    Core(BmpCoreHeader),
    Os22x(BmpOs22xHeader),
    Info(BmpInfoHeader),
    V2(BmpV2Header),
    V3(BmpV3Header),
    V4(BmpV4Header),
    V5(BmpV5Header)
}

impl DibHeader {
    /// Read the declared byte length, pick the matching shape and
    /// parse it
    ///
    /// The four length bytes are read once and the cursor moved back
    /// over them, so the shape reader consumes the whole declared
    /// length again and a successful return leaves the cursor exactly
    /// at `start + declared_length`.
    pub(crate) fn read_from<T: ByteReaderTrait>(
        reader: &mut ByteReader<T>
    ) -> Result<DibHeader, BmpDecodeErrors> {
        let header_size = reader.get_u32_le_err()?;
        reader.rewind(4)?;

        match header_size {
            CORE_SIZE => Ok(DibHeader::Core(BmpCoreHeader::read_from(reader)?)),
            OS22X_SHORT_SIZE | OS22X_SIZE => {
                Ok(DibHeader::Os22x(BmpOs22xHeader::read_from(reader)?))
            }
            INFO_SIZE => Ok(DibHeader::Info(BmpInfoHeader::read_from(reader)?)),
            V2_SIZE => Ok(DibHeader::V2(BmpV2Header::read_from(reader)?)),
            V3_SIZE => Ok(DibHeader::V3(BmpV3Header::read_from(reader)?)),
            V4_SIZE => Ok(DibHeader::V4(BmpV4Header::read_from(reader)?)),
            V5_SIZE => Ok(DibHeader::V5(BmpV5Header::read_from(reader)?)),
            _ => Err(BmpDecodeErrors::UnknownHeaderVariant(header_size))
        }
    }

    pub(crate) fn write_to<T: ByteWriterTrait>(
        &self, writer: &mut ByteWriter<T>
    ) -> Result<(), ByteIoError> {
        match self {
            DibHeader::Core(h) => h.write_to(writer),
            DibHeader::Os22x(h) => h.write_to(writer),
            DibHeader::Info(h) => h.write_to(writer),
            DibHeader::V2(h) => h.write_to(writer),
            DibHeader::V3(h) => h.write_to(writer),
            DibHeader::V4(h) => h.write_to(writer),
            DibHeader::V5(h) => h.write_to(writer)
        }
    }

    /// The byte length this header declared for itself. For the OS/2
    /// shape this distinguishes the 64 byte form from the 16 byte
    /// truncation
    pub const fn header_size(&self) -> u32 {
        match self {
            DibHeader::Core(h) => h.header_size,
            DibHeader::Os22x(h) => h.header_size,
            DibHeader::Info(h) => h.header_size,
            DibHeader::V2(h) => h.header_size,
            DibHeader::V3(h) => h.header_size,
            DibHeader::V4(h) => h.header_size,
            DibHeader::V5(h) => h.header_size
        }
    }

    /// Image width in pixels
    pub const fn width(&self) -> usize {
        match self {
            DibHeader::Core(h) => h.width as usize,
            DibHeader::Os22x(h) => h.width.unsigned_abs() as usize,
            DibHeader::Info(h) => h.width.unsigned_abs() as usize,
            DibHeader::V2(h) => h.width.unsigned_abs() as usize,
            DibHeader::V3(h) => h.width.unsigned_abs() as usize,
            DibHeader::V4(h) => h.width.unsigned_abs() as usize,
            DibHeader::V5(h) => h.width.unsigned_abs() as usize
        }
    }

    /// Image height in pixels, sign stripped
    pub const fn height(&self) -> usize {
        match self {
            DibHeader::Core(h) => h.height as usize,
            DibHeader::Os22x(h) => h.height.unsigned_abs() as usize,
            DibHeader::Info(h) => h.height.unsigned_abs() as usize,
            DibHeader::V2(h) => h.height.unsigned_abs() as usize,
            DibHeader::V3(h) => h.height.unsigned_abs() as usize,
            DibHeader::V4(h) => h.height.unsigned_abs() as usize,
            DibHeader::V5(h) => h.height.unsigned_abs() as usize
        }
    }

    /// Whether rows are stored top-down (negative declared height)
    pub const fn is_top_down(&self) -> bool {
        match self {
            DibHeader::Core(_) => false,
            DibHeader::Os22x(h) => h.height < 0,
            DibHeader::Info(h) => h.height < 0,
            DibHeader::V2(h) => h.height < 0,
            DibHeader::V3(h) => h.height < 0,
            DibHeader::V4(h) => h.height < 0,
            DibHeader::V5(h) => h.height < 0
        }
    }

    pub const fn bits_per_pixel(&self) -> u16 {
        match self {
            DibHeader::Core(h) => h.bits_per_pixel,
            DibHeader::Os22x(h) => h.bits_per_pixel,
            DibHeader::Info(h) => h.bits_per_pixel,
            DibHeader::V2(h) => h.bits_per_pixel,
            DibHeader::V3(h) => h.bits_per_pixel,
            DibHeader::V4(h) => h.bits_per_pixel,
            DibHeader::V5(h) => h.bits_per_pixel
        }
    }

    /// The compression scheme, `RGB` for the core shape which
    /// predates the field
    pub const fn compression(&self) -> BmpCompression {
        match self {
            DibHeader::Core(_) => BmpCompression::RGB,
            DibHeader::Os22x(h) => h.compression,
            DibHeader::Info(h) => h.compression,
            DibHeader::V2(h) => h.compression,
            DibHeader::V3(h) => h.compression,
            DibHeader::V4(h) => h.compression,
            DibHeader::V5(h) => h.compression
        }
    }

    /// Declared palette entry count, 0 meaning "derive from depth"
    pub const fn colors_used(&self) -> u32 {
        match self {
            DibHeader::Core(_) => 0,
            DibHeader::Os22x(h) => h.colors_used,
            DibHeader::Info(h) => h.colors_used,
            DibHeader::V2(h) => h.colors_used,
            DibHeader::V3(h) => h.colors_used,
            DibHeader::V4(h) => h.colors_used,
            DibHeader::V5(h) => h.colors_used
        }
    }

    /// Declared byte size of the pixel array, 0 permitted when
    /// uncompressed
    pub const fn image_size(&self) -> u32 {
        match self {
            DibHeader::Core(_) => 0,
            DibHeader::Os22x(h) => h.image_size,
            DibHeader::Info(h) => h.image_size,
            DibHeader::V2(h) => h.image_size,
            DibHeader::V3(h) => h.image_size,
            DibHeader::V4(h) => h.image_size,
            DibHeader::V5(h) => h.image_size
        }
    }

    /// Bytes per palette entry for this shape: the two OS/2 era
    /// shapes use bare triples, everything newer a fourth reserved
    /// byte
    pub const fn palette_entry_size(&self) -> usize {
        match self {
            DibHeader::Core(_) | DibHeader::Os22x(_) => 3,
            _ => 4
        }
    }

    /// Channel masks stored inside the header itself, in
    /// `[red, green, blue, alpha]` order
    ///
    /// `None` for the shapes that predate in-header masks; a plain
    /// `Info` header with bitfield compression carries its masks in a
    /// separate block after the header instead.
    pub const fn header_masks(&self) -> Option<[u32; 4]> {
        match self {
            DibHeader::V2(h) => Some([h.red_mask, h.green_mask, h.blue_mask, 0]),
            DibHeader::V3(h) => Some([h.red_mask, h.green_mask, h.blue_mask, h.alpha_mask]),
            DibHeader::V4(h) => Some([h.red_mask, h.green_mask, h.blue_mask, h.alpha_mask]),
            DibHeader::V5(h) => Some([h.red_mask, h.green_mask, h.blue_mask, h.alpha_mask]),
            _ => None
        }
    }
}
