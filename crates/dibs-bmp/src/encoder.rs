/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The BMP encoder
//!
//! Writes a document back into bytes, recomputing the file size and
//! pixel offset from the actual layout. Only the uncompressed layouts
//! are written; a document carrying an embedded JPEG/PNG payload has
//! its bytes passed through untouched.

use alloc::vec;

use dibs_core::bytestream::{ByteWriter, ByteWriterTrait};
use dibs_core::colorspace::ColorSpace;

use crate::common::BmpCompression;
use crate::document::BmpDocument;
use crate::errors::BmpEncodeErrors;
use crate::headers::{BmpFileHeader, FILE_HEADER_SIZE};
use crate::palette::ColorTable;
use crate::utils::{padded_row_size, unpadded_row_size};

/// Encodes a document into BMP bytes
///
/// ```
/// use dibs_bmp::{BmpDocument, BmpEncoder, BmpInfoHeader, ColorTable, DibHeader, PixelGrid};
/// use dibs_core::colorspace::ColorSpace;
///
/// let header = DibHeader::Info(BmpInfoHeader::with_dimensions(1, 1, 24));
/// let grid = PixelGrid::new(1, 1, ColorSpace::RGB, vec![10, 20, 30]).unwrap();
/// let document = BmpDocument::new(header, ColorTable::default(), grid).unwrap();
///
/// let mut sink = vec![];
/// let written = BmpEncoder::new(&document).encode(&mut sink).unwrap();
/// assert_eq!(written, sink.len());
/// ```
pub struct BmpEncoder<'a> {
    document: &'a BmpDocument
}

impl<'a> BmpEncoder<'a> {
    /// Create an encoder over a document
    pub const fn new(document: &'a BmpDocument) -> BmpEncoder<'a> {
        BmpEncoder { document }
    }

    /// Encode the document into `sink`, returning the number of bytes
    /// written
    pub fn encode<T: ByteWriterTrait>(&self, sink: T) -> Result<usize, BmpEncodeErrors> {
        let document = self.document;
        let dib_header = document.dib_header();
        let original = document.file_header();
        let table = document.color_table();
        let table_size = table.disk_size() as u32;

        let pixel_data_offset = FILE_HEADER_SIZE + dib_header.header_size() + table_size;

        let mut writer = ByteWriter::new(sink);

        if let Some(payload) = document.payload() {
            let file_size = pixel_data_offset + payload.data().len() as u32;

            writer.reserve(file_size as usize)?;
            write_file_header(&mut writer, &original, file_size, pixel_data_offset)?;
            dib_header.write_to(&mut writer)?;
            table.write_to(&mut writer)?;
            writer.write_all(payload.data())?;
            writer.flush()?;

            return Ok(writer.bytes_written());
        }

        if document.compression() != BmpCompression::RGB {
            return Err(BmpEncodeErrors::UnsupportedCompression(
                document.compression()
            ));
        }

        let pixels = document.pixels().ok_or(BmpEncodeErrors::NoPixels)?;
        let colorspace = pixels.colorspace();
        let components = colorspace.num_components();

        let width = document.width();
        let height = document.height();
        let depth = usize::from(document.bits_per_pixel());

        let row_bytes = unpadded_row_size(width, depth);
        let stride = padded_row_size(width, depth);
        let padding_len = stride - row_bytes;
        let padding = [0_u8; 3];

        let file_size = pixel_data_offset + (stride * height) as u32;

        writer.reserve(file_size as usize)?;
        write_file_header(&mut writer, &original, file_size, pixel_data_offset)?;
        dib_header.write_to(&mut writer)?;
        table.write_to(&mut writer)?;

        let top_down = dib_header.is_top_down();
        let mut packed = vec![0_u8; row_bytes];

        for output_y in 0..height {
            // positive heights store rows bottom-up
            let source_y = if top_down { output_y } else { height - 1 - output_y };
            let row = pixels.row(source_y);

            match depth {
                1 | 2 | 4 | 8 => {
                    packed.fill(0);

                    for (position, pixel) in row.chunks_exact(components).enumerate() {
                        let index = map_to_index(table, colorspace, depth, pixel)?;

                        if usize::from(index) >= (1_usize << depth) {
                            return Err(BmpEncodeErrors::GenericStatic(
                                "palette index does not fit the bit depth"
                            ));
                        }

                        let shift = 8 - depth - ((position * depth) % 8);
                        packed[position * depth / 8] |= index << shift;
                    }

                    writer.write_all(&packed)?;
                }
                16 => {
                    for pixel in row.chunks_exact(components) {
                        let rgba = pixel_rgba(colorspace, pixel);
                        let value = (u16::from(rgba[0] >> 3) << 10)
                            | (u16::from(rgba[1] >> 3) << 5)
                            | u16::from(rgba[2] >> 3);

                        writer.write_u16_le(value)?;
                    }
                }
                24 => {
                    for pixel in row.chunks_exact(components) {
                        let rgba = pixel_rgba(colorspace, pixel);

                        writer.write_const_bytes(&[rgba[2], rgba[1], rgba[0]])?;
                    }
                }
                32 => {
                    for pixel in row.chunks_exact(components) {
                        let rgba = pixel_rgba(colorspace, pixel);

                        writer.write_const_bytes(&[rgba[2], rgba[1], rgba[0], rgba[3]])?;
                    }
                }
                _ => return Err(BmpEncodeErrors::UnsupportedBitDepth(document.bits_per_pixel()))
            }

            writer.write_all(&padding[..padding_len])?;
        }

        writer.flush()?;

        Ok(writer.bytes_written())
    }
}

/// Write the 14 byte file header, keeping the parsed tag and reserved
/// words but replacing the size and offset with the actual layout
fn write_file_header<T: ByteWriterTrait>(
    writer: &mut ByteWriter<T>, original: &BmpFileHeader, file_size: u32, pixel_data_offset: u32
) -> Result<(), BmpEncodeErrors> {
    writer.write_u16_le(original.file_type)?;
    writer.write_u32_le(file_size)?;
    writer.write_u16_le(original.reserved1)?;
    writer.write_u16_le(original.reserved2)?;
    writer.write_u32_le(pixel_data_offset)?;

    Ok(())
}

/// View one grid pixel as `[red, green, blue, alpha]`
fn pixel_rgba(colorspace: ColorSpace, pixel: &[u8]) -> [u8; 4] {
    match colorspace {
        ColorSpace::RGB => [pixel[0], pixel[1], pixel[2], 255],
        ColorSpace::RGBA => [pixel[0], pixel[1], pixel[2], pixel[3]],
        ColorSpace::BGR => [pixel[2], pixel[1], pixel[0], 255],
        ColorSpace::BGRA => [pixel[2], pixel[1], pixel[0], pixel[3]],
        ColorSpace::Luma => [pixel[0], pixel[0], pixel[0], 255],
        ColorSpace::LumaA => [pixel[0], pixel[0], pixel[0], pixel[1]],
        _ => [0, 0, 0, 255]
    }
}

/// Map one pixel onto the palette index to store
///
/// With a table present the pixel's color must match an entry
/// exactly; without one the sample itself is stored, scaled down to
/// the bit depth as the exact inverse of the decoder's widening.
fn map_to_index(
    table: &ColorTable, colorspace: ColorSpace, depth: usize, pixel: &[u8]
) -> Result<u8, BmpEncodeErrors> {
    let rgba = pixel_rgba(colorspace, pixel);

    if table.is_empty() {
        return Ok(rgba[0] >> (8 - depth));
    }

    let rgb = [rgba[0], rgba[1], rgba[2]];

    table
        .find_color(rgb)
        .ok_or(BmpEncodeErrors::MissingPaletteEntry(rgb))
}
