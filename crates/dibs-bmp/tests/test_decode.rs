/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Pixel decoding across depths, masks and row orders

use dibs_bmp::{BmpCompression, BmpDecodeErrors, BmpDecoder, BmpDocument};
use dibs_core::bytestream::ByteCursor;
use dibs_core::colorspace::ColorSpace;

/// A file using the 40 byte header; `between` carries whatever sits
/// between the header and the pixel rows, so a mask block or quad
/// palette entries go there verbatim
fn build_file(
    width: i32, height: i32, depth: u16, compression: u32, colors_used: u32, between: &[u8],
    rows: &[u8]
) -> Vec<u8> {
    let pixel_data_offset = 14 + 40 + between.len() as u32;

    let mut bytes = Vec::new();

    bytes.extend_from_slice(b"BM");
    bytes.extend_from_slice(&(pixel_data_offset + rows.len() as u32).to_le_bytes());
    bytes.extend_from_slice(&[0; 4]);
    bytes.extend_from_slice(&pixel_data_offset.to_le_bytes());

    bytes.extend_from_slice(&40_u32.to_le_bytes());
    bytes.extend_from_slice(&width.to_le_bytes());
    bytes.extend_from_slice(&height.to_le_bytes());
    bytes.extend_from_slice(&1_u16.to_le_bytes());
    bytes.extend_from_slice(&depth.to_le_bytes());
    bytes.extend_from_slice(&compression.to_le_bytes());
    bytes.extend_from_slice(&[0; 12]);
    bytes.extend_from_slice(&colors_used.to_le_bytes());
    bytes.extend_from_slice(&0_u32.to_le_bytes());

    bytes.extend_from_slice(between);
    bytes.extend_from_slice(rows);
    bytes
}

fn decode(bytes: Vec<u8>) -> BmpDocument {
    BmpDecoder::new(ByteCursor::new(bytes)).decode().unwrap()
}

/// A grayscale ramp quad table of `n` entries
fn gray_quads(n: u8) -> Vec<u8> {
    let mut palette = Vec::new();

    for i in 0..n {
        palette.extend_from_slice(&[i, i, i, 0]);
    }
    palette
}

#[test]
fn row_padding_is_skipped() {
    // three 24 bit pixels are nine bytes, padded to a twelve byte row
    let rows = [1, 2, 3, 4, 5, 6, 7, 8, 9, 0xAA, 0xBB, 0xCC];
    let document = decode(build_file(3, 1, 24, 0, 0, &[], &rows));

    let grid = document.pixels().unwrap();

    assert_eq!(grid.colorspace(), ColorSpace::RGB);
    assert_eq!(grid.data(), &[3, 2, 1, 6, 5, 4, 9, 8, 7]);
}

#[test]
fn bottom_up_and_top_down_agree() {
    // stored bottom-up: the blue row comes first in the stream
    let blue_then_red = [255, 0, 0, 0, 0, 0, 255, 0];
    let red_then_blue = [0, 0, 255, 0, 255, 0, 0, 0];

    let bottom_up = decode(build_file(1, 2, 24, 0, 0, &[], &blue_then_red));
    let top_down = decode(build_file(1, -2, 24, 0, 0, &[], &red_then_blue));

    assert_eq!(bottom_up.pixels(), top_down.pixels());
    // the top row is red either way
    assert_eq!(bottom_up.pixels().unwrap().get(0, 0).unwrap(), [255, 0, 0, 255]);
    assert_eq!(bottom_up.pixels().unwrap().get(1, 0).unwrap(), [0, 0, 255, 255]);
}

#[test]
fn bare_16_bit_defaults_to_five_five_five() {
    // red 31, green 16, blue 0 in 5-5-5
    let pixel = (31_u16 << 10) | (16 << 5);
    let mut rows = pixel.to_le_bytes().to_vec();
    rows.extend_from_slice(&[0, 0]); // row padding

    let document = decode(build_file(1, 1, 16, 0, 0, &[], &rows));
    let grid = document.pixels().unwrap();

    assert_eq!(grid.colorspace(), ColorSpace::RGB);
    // five bit channels widen so the maximum hits 255 exactly
    assert_eq!(grid.get(0, 0).unwrap(), [255, 132, 0, 255]);
}

#[test]
fn bitfields_decode_five_six_five() {
    let mut masks = Vec::new();
    masks.extend_from_slice(&0xF800_u32.to_le_bytes());
    masks.extend_from_slice(&0x07E0_u32.to_le_bytes());
    masks.extend_from_slice(&0x001F_u32.to_le_bytes());

    // green at its six bit maximum, red at 16
    let pixel = (16_u16 << 11) | 0x07E0;
    let mut rows = pixel.to_le_bytes().to_vec();
    rows.extend_from_slice(&[0, 0]);

    let document = decode(build_file(1, 1, 16, 3, 0, &masks, &rows));
    let grid = document.pixels().unwrap();

    assert_eq!(grid.colorspace(), ColorSpace::RGB);
    assert_eq!(grid.get(0, 0).unwrap(), [132, 255, 0, 255]);
}

#[test]
fn alpha_bitfields_gain_an_alpha_channel() {
    let mut masks = Vec::new();
    masks.extend_from_slice(&0x0F00_u32.to_le_bytes());
    masks.extend_from_slice(&0x00F0_u32.to_le_bytes());
    masks.extend_from_slice(&0x000F_u32.to_le_bytes());
    masks.extend_from_slice(&0xF000_u32.to_le_bytes());

    // alpha and green nibbles at their maximum
    let mut rows = 0xF0F0_u16.to_le_bytes().to_vec();
    rows.extend_from_slice(&[0, 0]);

    let mut decoder = BmpDecoder::new(ByteCursor::new(build_file(1, 1, 16, 6, 0, &masks, &rows)));
    let document = decoder.decode().unwrap();

    assert_eq!(decoder.colorspace(), Some(ColorSpace::RGBA));
    assert_eq!(document.pixels().unwrap().get(0, 0).unwrap(), [0, 255, 0, 255]);
}

#[test]
fn plain_32_bit_keeps_the_fourth_byte() {
    let rows = [1, 2, 3, 77];
    let document = decode(build_file(1, 1, 32, 0, 0, &[], &rows));
    let grid = document.pixels().unwrap();

    assert_eq!(grid.colorspace(), ColorSpace::RGBA);
    assert_eq!(grid.get(0, 0).unwrap(), [3, 2, 1, 77]);
}

#[test]
fn indexed_8_bit_resolves_through_the_table() {
    let mut palette = Vec::new();
    palette.extend_from_slice(&[10, 20, 30, 0]);
    palette.extend_from_slice(&[40, 50, 60, 0]);

    // the second index is out of range and resolves to black
    let rows = [1, 5, 0, 0];
    let document = decode(build_file(2, 1, 8, 0, 2, &palette, &rows));
    let grid = document.pixels().unwrap();

    assert_eq!(grid.colorspace(), ColorSpace::RGB);
    assert_eq!(grid.get(0, 0).unwrap(), [60, 50, 40, 255]);
    assert_eq!(grid.get(0, 1).unwrap(), [0, 0, 0, 255]);
}

#[test]
fn one_bit_pixels_unpack_most_significant_first() {
    let mut palette = Vec::new();
    palette.extend_from_slice(&[0, 0, 0, 0]);
    palette.extend_from_slice(&[255, 255, 255, 0]);

    // 0b1010_0000, three pixels wide
    let rows = [0xA0, 0, 0, 0];
    let document = decode(build_file(3, 1, 1, 0, 2, &palette, &rows));
    let grid = document.pixels().unwrap();

    assert_eq!(grid.get(0, 0).unwrap(), [255, 255, 255, 255]);
    assert_eq!(grid.get(0, 1).unwrap(), [0, 0, 0, 255]);
    assert_eq!(grid.get(0, 2).unwrap(), [255, 255, 255, 255]);
}

#[test]
fn four_bit_pixels_unpack_a_nibble_each() {
    let rows = [0x5A, 0xC0, 0, 0];
    let document = decode(build_file(3, 1, 4, 0, 16, &gray_quads(16), &rows));
    let grid = document.pixels().unwrap();

    assert_eq!(grid.get(0, 0).unwrap(), [5, 5, 5, 255]);
    assert_eq!(grid.get(0, 1).unwrap(), [10, 10, 10, 255]);
    assert_eq!(grid.get(0, 2).unwrap(), [12, 12, 12, 255]);
}

#[test]
fn grid_access_outside_the_image_fails() {
    let document = decode(build_file(2, 2, 24, 0, 0, &[], &[0; 16]));
    let grid = document.pixels().unwrap();

    assert!(grid.get(0, 0).is_ok());
    assert!(matches!(grid.get(0, 2), Err(BmpDecodeErrors::OutOfBounds(0, 2))));
    assert!(matches!(grid.get(2, 0), Err(BmpDecodeErrors::OutOfBounds(2, 0))));
}

#[test]
fn decode_into_checks_the_buffer_size() {
    let bytes = build_file(2, 2, 24, 0, 0, &[], &[9; 16]);
    let mut decoder = BmpDecoder::new(ByteCursor::new(bytes));

    decoder.decode_headers().unwrap();
    assert_eq!(decoder.output_buf_size(), Some(12));

    let mut short = [0_u8; 11];
    assert!(matches!(
        decoder.decode_into(&mut short),
        Err(BmpDecodeErrors::TooSmallBuffer(12, 11))
    ));

    let mut output = [0_u8; 12];
    decoder.decode_into(&mut output).unwrap();
    assert_eq!(output, [9; 12]);
}

#[test]
fn truncated_pixel_rows_error() {
    // the header promises two 24 bit rows, only five bytes follow
    let bytes = build_file(2, 2, 24, 0, 0, &[], &[1, 2, 3, 4, 5]);
    let mut decoder = BmpDecoder::new(ByteCursor::new(bytes));

    assert!(matches!(
        decoder.decode(),
        Err(BmpDecodeErrors::TruncatedPixelData(_))
    ));
    // the headers parsed fine and stay reachable
    assert_eq!(decoder.dimensions(), Some((2, 2)));
}

#[test]
fn cmyk_headers_parse_but_pixels_do_not() {
    let bytes = build_file(1, 1, 32, 11, 0, &[], &[0; 4]);
    let mut decoder = BmpDecoder::new(ByteCursor::new(bytes));

    decoder.decode_headers().unwrap();
    assert_eq!(
        decoder.dib_header().unwrap().compression(),
        BmpCompression::CMYK
    );

    assert!(matches!(
        decoder.decode(),
        Err(BmpDecodeErrors::GenericStatic(_))
    ));
}

#[test]
fn embedded_jpeg_is_carried_through_untouched() {
    let payload = [0xFF, 0xD8, 0xFF, 0xE0, 1, 2, 3];
    let mut bytes = build_file(1, 1, 0, 4, 0, &[], &payload);
    // declare the payload length as the image size
    bytes[34..38].copy_from_slice(&(payload.len() as u32).to_le_bytes());

    let mut decoder = BmpDecoder::new(ByteCursor::new(bytes));
    let document = decoder.decode().unwrap();

    assert!(decoder.colorspace().is_none());
    assert!(decoder.output_buf_size().is_none());
    assert!(document.pixels().is_none());

    let carried = document.payload().unwrap();
    assert_eq!(carried.compression(), BmpCompression::JPEG);
    assert_eq!(carried.offset(), 54);
    assert_eq!(carried.declared_size(), payload.len() as u32);
    assert_eq!(carried.data(), &payload);
}

#[test]
fn unknown_compression_value_is_rejected() {
    let bytes = build_file(1, 1, 24, 7, 0, &[], &[0; 4]);
    let mut decoder = BmpDecoder::new(ByteCursor::new(bytes));

    assert!(matches!(
        decoder.decode_headers(),
        Err(BmpDecodeErrors::UnknownCompression(7))
    ));
}
