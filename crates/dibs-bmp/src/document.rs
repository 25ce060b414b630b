/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The assembled document a full parse produces
//!
//! A document owns everything the file carried: the two headers, the
//! color table, and either a decoded pixel grid or, for the embedded
//! JPEG/PNG compressions, the untouched payload bytes. It is immutable
//! once built; the encoder consumes it by reference.

use alloc::vec::Vec;

use crate::common::{BmpCompression, BMP_FILE_TAGS};
use crate::errors::BmpEncodeErrors;
use crate::grid::PixelGrid;
use crate::headers::{BmpFileHeader, DibHeader, FILE_HEADER_SIZE};
use crate::palette::ColorTable;
use crate::utils::padded_row_size;

/// A disagreement between the declared pixel array offset and where
/// the header region actually ended
///
/// Recorded during parsing; the decoder trusts the declared offset
/// and keeps going unless strict mode is on.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct OffsetMismatch {
    /// The offset the file header declared
    pub declared: u32,
    /// The position the cursor reached after the header region
    pub actual:   u64
}

/// The untouched bytes of an embedded JPEG or PNG stream
///
/// These compressions wrap a whole foreign file; the bytes are carried
/// through without being decoded.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OpaquePayload {
    compression:   BmpCompression,
    offset:        u32,
    declared_size: u32,
    data:          Vec<u8>
}

impl OpaquePayload {
    pub(crate) fn new(
        compression: BmpCompression, offset: u32, declared_size: u32, data: Vec<u8>
    ) -> OpaquePayload {
        OpaquePayload {
            compression,
            offset,
            declared_size,
            data
        }
    }

    /// Which embedded codec the bytes belong to, `JPEG` or `PNG`
    pub const fn compression(&self) -> BmpCompression {
        self.compression
    }

    /// Where in the file the payload started
    pub const fn offset(&self) -> u32 {
        self.offset
    }

    /// The byte count the header declared, which may disagree with
    /// the bytes actually present
    pub const fn declared_size(&self) -> u32 {
        self.declared_size
    }

    /// The raw payload bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Destroy the payload returning its bytes
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

/// Everything one BMP file carried
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BmpDocument {
    file_header:     BmpFileHeader,
    dib_header:      DibHeader,
    color_table:     ColorTable,
    pixels:          Option<PixelGrid>,
    payload:         Option<OpaquePayload>,
    offset_mismatch: Option<OffsetMismatch>
}

impl BmpDocument {
    /// Assemble a document for an uncompressed image, computing the
    /// file header the way the encoder will lay the file out
    ///
    /// The grid shape must match the header dimensions. Compressed
    /// and mask based layouts cannot be built this way; parse them
    /// from bytes instead.
    pub fn new(
        dib_header: DibHeader, color_table: ColorTable, pixels: PixelGrid
    ) -> Result<BmpDocument, BmpEncodeErrors> {
        if pixels.width() != dib_header.width() || pixels.height() != dib_header.height() {
            return Err(BmpEncodeErrors::GenericStatic(
                "pixel grid shape disagrees with the header dimensions"
            ));
        }
        if dib_header.compression() != BmpCompression::RGB {
            return Err(BmpEncodeErrors::UnsupportedCompression(
                dib_header.compression()
            ));
        }

        let table_size = color_table.disk_size() as u32;
        let pixel_data_offset = FILE_HEADER_SIZE + dib_header.header_size() + table_size;

        let stride = padded_row_size(
            dib_header.width(),
            usize::from(dib_header.bits_per_pixel())
        );
        let file_size = pixel_data_offset + (stride * dib_header.height()) as u32;

        let file_header = BmpFileHeader {
            file_type: BMP_FILE_TAGS[0],
            file_size,
            reserved1: 0,
            reserved2: 0,
            pixel_data_offset
        };

        Ok(BmpDocument {
            file_header,
            dib_header,
            color_table,
            pixels: Some(pixels),
            payload: None,
            offset_mismatch: None
        })
    }

    /// Assembly path the decoder uses, fields already cross-checked
    pub(crate) fn from_parts(
        file_header: BmpFileHeader, dib_header: DibHeader, color_table: ColorTable,
        pixels: Option<PixelGrid>, payload: Option<OpaquePayload>,
        offset_mismatch: Option<OffsetMismatch>
    ) -> BmpDocument {
        BmpDocument {
            file_header,
            dib_header,
            color_table,
            pixels,
            payload,
            offset_mismatch
        }
    }

    /// The 14 byte header that started the file
    pub const fn file_header(&self) -> BmpFileHeader {
        self.file_header
    }

    /// The DIB header shape the file carried
    pub const fn dib_header(&self) -> &DibHeader {
        &self.dib_header
    }

    /// The color table, empty when the file carried none
    pub const fn color_table(&self) -> &ColorTable {
        &self.color_table
    }

    /// The decoded pixels, absent for the embedded JPEG/PNG
    /// compressions
    pub const fn pixels(&self) -> Option<&PixelGrid> {
        self.pixels.as_ref()
    }

    /// The embedded JPEG or PNG bytes, absent for everything else
    pub const fn payload(&self) -> Option<&OpaquePayload> {
        self.payload.as_ref()
    }

    /// The offset disagreement observed during parsing, if any
    pub const fn offset_mismatch(&self) -> Option<OffsetMismatch> {
        self.offset_mismatch
    }

    /// Width in pixels
    pub const fn width(&self) -> usize {
        self.dib_header.width()
    }

    /// Height in pixels
    pub const fn height(&self) -> usize {
        self.dib_header.height()
    }

    pub const fn bits_per_pixel(&self) -> u16 {
        self.dib_header.bits_per_pixel()
    }

    pub const fn compression(&self) -> BmpCompression {
        self.dib_header.compression()
    }

    /// The palette entry count the header declared
    pub const fn colors_used(&self) -> u32 {
        self.dib_header.colors_used()
    }
}
