/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The BMP decoder
//!
//! Parsing runs in fixed stages, file header, DIB header, channel
//! masks, color table, pixel array, each stage leaving its result on
//! the decoder so callers can still reach it when a later stage
//! fails. Pixel decoding always seeks to the offset the file header
//! declared, trusting it over where the header region happened to
//! end.

use alloc::vec;
use alloc::vec::Vec;

use dibs_core::bytestream::{ByteReader, ByteReaderTrait};
use dibs_core::colorspace::ColorSpace;
use dibs_core::log::{trace, warn};
use dibs_core::options::DecoderOptions;

use crate::common::{is_bmp_file_tag, BmpCompression};
use crate::document::{BmpDocument, OffsetMismatch, OpaquePayload};
use crate::errors::BmpDecodeErrors;
use crate::grid::PixelGrid;
use crate::headers::{BmpFileHeader, DibHeader, DIB_HEADER_SIZES};
use crate::palette::ColorTable;
use crate::utils::{expand_bits_to_byte, padded_row_size, unpadded_row_size};

/// Check whether the first bytes look like a BMP file
///
/// Requires a known file tag followed by a recognized DIB header
/// length, enough to tell BMP apart from other formats without
/// parsing anything.
pub fn probe_bmp(bytes: &[u8]) -> bool {
    if bytes.len() < 18 {
        return false;
    }

    let tag = u16::from_le_bytes([bytes[0], bytes[1]]);

    if !is_bmp_file_tag(tag) {
        return false;
    }

    let header_size = u32::from_le_bytes([bytes[14], bytes[15], bytes[16], bytes[17]]);

    DIB_HEADER_SIZES.contains(&header_size)
}

/// A BMP decoder over a seekable byte source
///
/// ```no_run
/// use dibs_bmp::BmpDecoder;
/// use dibs_core::bytestream::ByteCursor;
///
/// let file_contents = [0_u8; 100];
/// let mut decoder = BmpDecoder::new(ByteCursor::new(&file_contents));
/// let document = decoder.decode().unwrap();
/// ```
pub struct BmpDecoder<T>
where
    T: ByteReaderTrait
{
    bytes:           ByteReader<T>,
    options:         DecoderOptions,
    width:           usize,
    height:          usize,
    depth:           u16,
    compression:     BmpCompression,
    top_down:        bool,
    masks:           [u32; 4],
    file_header:     Option<BmpFileHeader>,
    dib_header:      Option<DibHeader>,
    color_table:     ColorTable,
    offset_mismatch: Option<OffsetMismatch>,
    decoded_headers: bool
}

impl<T> BmpDecoder<T>
where
    T: ByteReaderTrait
{
    /// Create a decoder reading from `source` with default options
    pub fn new(source: T) -> BmpDecoder<T> {
        BmpDecoder::new_with_options(source, DecoderOptions::default())
    }

    /// Create a decoder with custom limits and strictness
    pub fn new_with_options(source: T, options: DecoderOptions) -> BmpDecoder<T> {
        BmpDecoder {
            bytes: ByteReader::new(source),
            options,
            width: 0,
            height: 0,
            depth: 0,
            compression: BmpCompression::RGB,
            top_down: false,
            masks: [0; 4],
            file_header: None,
            dib_header: None,
            color_table: ColorTable::default(),
            offset_mismatch: None,
            decoded_headers: false
        }
    }

    /// Decode the file header, the DIB header, any channel masks and
    /// the color table
    ///
    /// A repeat call is a no-op. Results parsed before a failure stay
    /// accessible through the accessors, e.g the file header survives
    /// an unknown DIB length.
    pub fn decode_headers(&mut self) -> Result<(), BmpDecodeErrors> {
        if self.decoded_headers {
            return Ok(());
        }

        let file_header = BmpFileHeader::read_from(&mut self.bytes)?;
        self.file_header = Some(file_header);

        let dib_header = DibHeader::read_from(&mut self.bytes)?;
        self.dib_header = Some(dib_header);

        let width = dib_header.width();
        let height = dib_header.height();
        let depth = dib_header.bits_per_pixel();
        let compression = dib_header.compression();

        trace!("Header shape: {} bytes", dib_header.header_size());
        trace!("Width: {}", width);
        trace!("Height: {}", height);
        trace!("Bit depth: {}", depth);
        trace!("Compression: {:?}", compression);

        if width == 0 {
            return Err(BmpDecodeErrors::ZeroDimensions("width"));
        }
        if height == 0 {
            return Err(BmpDecodeErrors::ZeroDimensions("height"));
        }
        if width > self.options.max_width() {
            return Err(BmpDecodeErrors::TooLargeDimensions(
                "width",
                self.options.max_width(),
                width
            ));
        }
        if height > self.options.max_height() {
            return Err(BmpDecodeErrors::TooLargeDimensions(
                "height",
                self.options.max_height(),
                height
            ));
        }

        // the embedded codecs carry their own depth and usually leave
        // the field zero
        if !matches!(depth, 1 | 2 | 4 | 8 | 16 | 24 | 32)
            && !(depth == 0 && compression.is_opaque_payload())
        {
            return Err(BmpDecodeErrors::UnsupportedBitDepth(depth));
        }

        if compression == BmpCompression::RLE8 && depth != 8 {
            return Err(BmpDecodeErrors::GenericStatic(
                "RLE8 compression requires a bit depth of 8"
            ));
        }
        if compression == BmpCompression::RLE4 && depth != 4 {
            return Err(BmpDecodeErrors::GenericStatic(
                "RLE4 compression requires a bit depth of 4"
            ));
        }
        if compression.uses_masks() && !matches!(depth, 16 | 32) {
            return Err(BmpDecodeErrors::GenericStatic(
                "bit field compression requires a 16 or 32 bit depth"
            ));
        }

        let mut masks = [0_u32; 4];

        if compression.uses_masks() {
            if let Some(header_masks) = dib_header.header_masks() {
                masks = header_masks;
            } else if matches!(dib_header, DibHeader::Info(_)) {
                // a plain Info header stores its masks in a block of
                // their own between the header and the color table
                masks[0] = self.bytes.get_u32_le_err()?;
                masks[1] = self.bytes.get_u32_le_err()?;
                masks[2] = self.bytes.get_u32_le_err()?;

                if compression == BmpCompression::ALPHABITFIELDS {
                    masks[3] = self.bytes.get_u32_le_err()?;
                }
            } else {
                return Err(BmpDecodeErrors::GenericStatic(
                    "bit field compression on a header shape without masks"
                ));
            }
            trace!("Channel masks: {:08X?}", masks);
        }

        let table_entries = ColorTable::expected_entries(&dib_header);

        if table_entries != 0 {
            trace!("Color table entries: {}", table_entries);
            self.color_table = ColorTable::read_from(&mut self.bytes, &dib_header, table_entries)?;
        }

        let actual = self.bytes.position()?;
        let declared = file_header.pixel_data_offset;

        if u64::from(declared) != actual {
            warn!(
                "Declared pixel offset {} but the header region ended at {}",
                declared, actual
            );

            if self.options.strict_mode() {
                return Err(BmpDecodeErrors::OffsetMismatch(declared, actual));
            }
            self.offset_mismatch = Some(OffsetMismatch { declared, actual });
        }

        self.width = width;
        self.height = height;
        self.depth = depth;
        self.compression = compression;
        self.top_down = dib_header.is_top_down();
        self.masks = masks;
        self.decoded_headers = true;

        Ok(())
    }

    /// Decode the whole file into an owned document
    ///
    /// For the embedded JPEG/PNG compressions the document carries
    /// the untouched payload bytes instead of a pixel grid.
    pub fn decode(&mut self) -> Result<BmpDocument, BmpDecodeErrors> {
        self.decode_headers()?;

        let (file_header, dib_header) = self.parsed_headers()?;

        if self.compression.is_opaque_payload() {
            self.bytes
                .set_position(file_header.pixel_data_offset as usize)?;

            let mut data = Vec::new();
            self.bytes.read_remaining(&mut data)?;

            trace!("Embedded {:?} payload of {} bytes", self.compression, data.len());

            let payload = OpaquePayload::new(
                self.compression,
                file_header.pixel_data_offset,
                dib_header.image_size(),
                data
            );

            return Ok(BmpDocument::from_parts(
                file_header,
                dib_header,
                self.color_table.clone(),
                None,
                Some(payload),
                self.offset_mismatch
            ));
        }

        let output_size = self
            .output_buf_size()
            .ok_or(BmpDecodeErrors::OverFlowOccurred)?;
        let mut pixels = vec![0_u8; output_size];

        self.decode_pixels(&mut pixels)?;

        let grid = PixelGrid::new(self.width, self.height, self.output_colorspace(), pixels)?;

        Ok(BmpDocument::from_parts(
            file_header,
            dib_header,
            self.color_table.clone(),
            Some(grid),
            None,
            self.offset_mismatch
        ))
    }

    /// Decode pixels into a caller provided buffer
    ///
    /// The buffer must hold at least
    /// [`output_buf_size`](Self::output_buf_size) bytes. Headers are
    /// decoded first when that has not happened yet.
    pub fn decode_into(&mut self, output: &mut [u8]) -> Result<(), BmpDecodeErrors> {
        self.decode_headers()?;

        let expected = self.output_buf_size().ok_or(BmpDecodeErrors::GenericStatic(
            "no decodable pixel grid for this image"
        ))?;

        if output.len() < expected {
            return Err(BmpDecodeErrors::TooSmallBuffer(expected, output.len()));
        }

        self.decode_pixels(&mut output[..expected])
    }

    /// Number of bytes [`decode_into`](Self::decode_into) needs
    ///
    /// `None` before the headers are decoded, for the embedded
    /// JPEG/PNG compressions and when the computation would overflow.
    pub fn output_buf_size(&self) -> Option<usize> {
        if !self.decoded_headers || self.compression.is_opaque_payload() {
            return None;
        }

        let components = self.output_colorspace().num_components();

        self.width.checked_mul(self.height)?.checked_mul(components)
    }

    /// The image dimensions as `(width, height)`, present once the
    /// DIB header has been parsed
    pub fn dimensions(&self) -> Option<(usize, usize)> {
        self.dib_header
            .as_ref()
            .map(|header| (header.width(), header.height()))
    }

    /// The colorspace pixels decode into
    ///
    /// `None` before the headers are decoded and for the embedded
    /// JPEG/PNG compressions, which carry no decodable grid.
    pub fn colorspace(&self) -> Option<ColorSpace> {
        if !self.decoded_headers || self.compression.is_opaque_payload() {
            return None;
        }

        Some(self.output_colorspace())
    }

    /// The file header, present once it has been parsed even when a
    /// later stage failed
    pub const fn file_header(&self) -> Option<BmpFileHeader> {
        self.file_header
    }

    /// The DIB header, present once it has been parsed even when a
    /// later stage failed
    pub const fn dib_header(&self) -> Option<&DibHeader> {
        self.dib_header.as_ref()
    }

    /// The color table, empty before headers are decoded and for
    /// files that carry none
    pub fn color_table(&self) -> &ColorTable {
        &self.color_table
    }

    /// The pixel offset disagreement recorded during header decode,
    /// if one was observed
    pub const fn offset_mismatch(&self) -> Option<OffsetMismatch> {
        self.offset_mismatch
    }

    fn parsed_headers(&self) -> Result<(BmpFileHeader, DibHeader), BmpDecodeErrors> {
        match (self.file_header, self.dib_header) {
            (Some(file_header), Some(dib_header)) => Ok((file_header, dib_header)),
            _ => Err(BmpDecodeErrors::GenericStatic(
                "headers have not been decoded"
            ))
        }
    }

    /// The colorspace the pixel decode stage emits for this file
    fn output_colorspace(&self) -> ColorSpace {
        match self.depth {
            16 => {
                if self.masks[3] != 0 {
                    ColorSpace::RGBA
                } else {
                    ColorSpace::RGB
                }
            }
            24 => ColorSpace::RGB,
            32 => ColorSpace::RGBA,
            _ => {
                if self.color_table.is_empty() {
                    ColorSpace::Luma
                } else {
                    ColorSpace::RGB
                }
            }
        }
    }

    fn decode_pixels(&mut self, output: &mut [u8]) -> Result<(), BmpDecodeErrors> {
        let (file_header, _) = self.parsed_headers()?;

        // the declared offset wins over where the header region ended
        self.bytes
            .set_position(file_header.pixel_data_offset as usize)?;

        match self.compression {
            BmpCompression::RGB | BmpCompression::BITFIELDS | BmpCompression::ALPHABITFIELDS => {
                self.decode_rgb_grid(output)
            }
            BmpCompression::RLE8 | BmpCompression::RLE4 => self.decode_rle_grid(output),
            BmpCompression::JPEG | BmpCompression::PNG => Err(BmpDecodeErrors::GenericStatic(
                "embedded JPEG/PNG payloads have no pixel grid to decode"
            )),
            BmpCompression::CMYK | BmpCompression::CMYKRLE8 | BmpCompression::CMYKRLE4 => Err(
                BmpDecodeErrors::GenericStatic("CMYK bitmaps are not supported")
            )
        }
    }

    /// Decode the uncompressed and bit field layouts
    ///
    /// Rows arrive in stream order and are written straight to their
    /// normalized position, so no flip pass runs afterwards.
    fn decode_rgb_grid(&mut self, output: &mut [u8]) -> Result<(), BmpDecodeErrors> {
        let width = self.width;
        let height = self.height;
        let depth = usize::from(self.depth);

        let row_bytes = unpadded_row_size(width, depth);
        let padding = padded_row_size(width, depth) - row_bytes;

        let components = self.output_colorspace().num_components();
        let out_row_size = width * components;

        let mut masks = self.masks;

        if depth == 16 && masks == [0; 4] {
            // bare 16 bit files are 5-5-5 by definition
            masks = [0x7C00, 0x03E0, 0x001F, 0];
        }

        let palette_present = !self.color_table.is_empty();

        let mut source_row = vec![0_u8; row_bytes];
        let mut indices = vec![0_u8; if depth < 8 { width } else { 0 }];

        for source_y in 0..height {
            self.bytes
                .read_exact_bytes(&mut source_row)
                .map_err(|_| BmpDecodeErrors::TruncatedPixelData("source ended inside a pixel row"))?;

            if padding != 0 {
                self.bytes.skip(padding)?;
            }

            let dest_y = if self.top_down {
                source_y
            } else {
                height - 1 - source_y
            };
            let out_row = &mut output[dest_y * out_row_size..(dest_y + 1) * out_row_size];

            match depth {
                1 | 2 | 4 => {
                    expand_bits_to_byte(depth, palette_present, &source_row, &mut indices);

                    if palette_present {
                        for (out, index) in out_row.chunks_exact_mut(3).zip(&indices) {
                            out.copy_from_slice(&self.color_table.resolve(*index));
                        }
                    } else {
                        out_row.copy_from_slice(&indices);
                    }
                }
                8 => {
                    if palette_present {
                        for (out, index) in out_row.chunks_exact_mut(3).zip(&source_row) {
                            out.copy_from_slice(&self.color_table.resolve(*index));
                        }
                    } else {
                        out_row.copy_from_slice(&source_row);
                    }
                }
                16 => {
                    for (out, pixel) in out_row
                        .chunks_exact_mut(components)
                        .zip(source_row.chunks_exact(2))
                    {
                        let value = u32::from(u16::from_le_bytes([pixel[0], pixel[1]]));

                        out[0] = extract_channel(value, masks[0]);
                        out[1] = extract_channel(value, masks[1]);
                        out[2] = extract_channel(value, masks[2]);

                        if components == 4 {
                            out[3] = extract_channel(value, masks[3]);
                        }
                    }
                }
                24 => {
                    for (out, pixel) in out_row
                        .chunks_exact_mut(3)
                        .zip(source_row.chunks_exact(3))
                    {
                        out[0] = pixel[2];
                        out[1] = pixel[1];
                        out[2] = pixel[0];
                    }
                }
                32 => {
                    if masks == [0; 4] {
                        // plain BGRA with the fourth byte carried
                        // through as alpha
                        for (out, pixel) in out_row
                            .chunks_exact_mut(4)
                            .zip(source_row.chunks_exact(4))
                        {
                            out[0] = pixel[2];
                            out[1] = pixel[1];
                            out[2] = pixel[0];
                            out[3] = pixel[3];
                        }
                    } else {
                        for (out, pixel) in out_row
                            .chunks_exact_mut(4)
                            .zip(source_row.chunks_exact(4))
                        {
                            let value =
                                u32::from_le_bytes([pixel[0], pixel[1], pixel[2], pixel[3]]);

                            out[0] = extract_channel(value, masks[0]);
                            out[1] = extract_channel(value, masks[1]);
                            out[2] = extract_channel(value, masks[2]);
                            out[3] = if masks[3] == 0 {
                                255
                            } else {
                                extract_channel(value, masks[3])
                            };
                        }
                    }
                }
                _ => return Err(BmpDecodeErrors::UnsupportedBitDepth(self.depth))
            }
        }

        Ok(())
    }

    /// Decode the two run length layouts
    ///
    /// Runs land in an index plane kept in stream row order, skipped
    /// pixels staying at index zero, which is then resolved through
    /// the color table into normalized rows.
    fn decode_rle_grid(&mut self, output: &mut [u8]) -> Result<(), BmpDecodeErrors> {
        let width = self.width;
        let height = self.height;
        let rle8 = self.compression == BmpCompression::RLE8;
        let strict = self.options.strict_mode();

        let mut plane = vec![0_u8; width * height];
        let mut scratch = Vec::new();
        let mut row = 0_usize;
        let mut col = 0_usize;

        while row < height {
            let pair: [u8; 2] = self.bytes.read_fixed_bytes_or_error().map_err(|_| {
                BmpDecodeErrors::TruncatedPixelData(
                    "run length stream ended before its end of bitmap escape"
                )
            })?;

            match pair {
                [0, 0] => {
                    // end of line
                    row += 1;
                    col = 0;
                }
                [0, 1] => break,
                [0, 2] => {
                    let offsets: [u8; 2] = self.bytes.read_fixed_bytes_or_error().map_err(|_| {
                        BmpDecodeErrors::TruncatedPixelData(
                            "run length stream ended inside a delta escape"
                        )
                    })?;

                    let moved_col = col + usize::from(offsets[0]);
                    let moved_row = row + usize::from(offsets[1]);

                    if moved_col > width || moved_row > height {
                        return Err(BmpDecodeErrors::InvalidRleStream(
                            "delta escape moved outside the image"
                        ));
                    }
                    col = moved_col;
                    row = moved_row;
                }
                [0, count] => {
                    // absolute mode, literal pixels with the source
                    // padded to an even byte count
                    let count = usize::from(count);
                    let source_bytes = if rle8 { count } else { (count + 1) / 2 };
                    let padded = source_bytes + (source_bytes & 1);

                    scratch.clear();
                    scratch.resize(padded, 0);
                    self.bytes.read_exact_bytes(&mut scratch).map_err(|_| {
                        BmpDecodeErrors::TruncatedPixelData(
                            "run length stream ended inside an absolute run"
                        )
                    })?;

                    let written = clamped_run_length(count, width - col, row, strict)?;
                    let start = row * width + col;

                    if rle8 {
                        plane[start..start + written].copy_from_slice(&scratch[..written]);
                    } else {
                        for (position, slot) in
                            plane[start..start + written].iter_mut().enumerate()
                        {
                            let byte = scratch[position / 2];

                            *slot = if position & 1 == 0 { byte >> 4 } else { byte & 0xF };
                        }
                    }
                    col += written;
                }
                [count, value] => {
                    let count = usize::from(count);
                    let written = clamped_run_length(count, width - col, row, strict)?;
                    let start = row * width + col;

                    if rle8 {
                        plane[start..start + written].fill(value);
                    } else {
                        let high = value >> 4;
                        let low = value & 0xF;

                        for (position, slot) in
                            plane[start..start + written].iter_mut().enumerate()
                        {
                            *slot = if position & 1 == 0 { high } else { low };
                        }
                    }
                    col += written;
                }
            }
        }

        let palette_present = !self.color_table.is_empty();
        let components = self.output_colorspace().num_components();

        for stream_y in 0..height {
            let dest_y = if self.top_down {
                stream_y
            } else {
                height - 1 - stream_y
            };
            let src = &plane[stream_y * width..(stream_y + 1) * width];
            let dst =
                &mut output[dest_y * width * components..(dest_y + 1) * width * components];

            if palette_present {
                for (out, index) in dst.chunks_exact_mut(3).zip(src) {
                    out.copy_from_slice(&self.color_table.resolve(*index));
                }
            } else if rle8 {
                dst.copy_from_slice(src);
            } else {
                // nibble values widen to the full byte range
                for (out, value) in dst.iter_mut().zip(src) {
                    *out = *value * 0x11;
                }
            }
        }

        Ok(())
    }
}

/// Clamp a run that crosses the end of its row, or reject it when
/// strictness asks for that
fn clamped_run_length(
    count: usize, available: usize, row: usize, strict: bool
) -> Result<usize, BmpDecodeErrors> {
    if count <= available {
        return Ok(count);
    }
    if strict {
        return Err(BmpDecodeErrors::InvalidRleStream(
            "run crosses the end of its row"
        ));
    }

    warn!("Run of {} pixels crosses the end of row {}, clamping", count, row);

    Ok(available)
}

/// Extract the channel `mask` selects from a packed pixel and widen
/// it to the full eight bit range
///
/// The multiply-shift pair replicates the channel's bit pattern
/// across eight bits, so a five bit maximum becomes exactly 255
/// rather than 248.
fn extract_channel(value: u32, mask: u32) -> u8 {
    const MUL_TABLE: [u32; 9] = [0, 0xFF, 0x55, 0x49, 0x11, 0x21, 0x41, 0x81, 0x01];
    const SHIFT_TABLE: [u32; 9] = [0, 0, 0, 1, 0, 2, 4, 6, 0];

    let top_bit = 32 - mask.leading_zeros();
    let bits = mask.count_ones().min(8);
    let mut channel = value & mask;

    // align the channel's most significant bit onto bit 7
    if top_bit >= 8 {
        channel >>= top_bit - 8;
    } else {
        channel <<= 8 - top_bit;
    }
    channel >>= 8 - bits;

    ((channel.wrapping_mul(MUL_TABLE[bits as usize]) >> SHIFT_TABLE[bits as usize]) & 0xFF) as u8
}
