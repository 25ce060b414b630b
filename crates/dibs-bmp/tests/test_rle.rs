/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Run length decoding, both the 8 and the 4 bit flavor

use dibs_bmp::{BmpDecodeErrors, BmpDecoder, BmpDocument};
use dibs_core::bytestream::ByteCursor;
use dibs_core::options::DecoderOptions;

/// An RLE file over a grayscale ramp table where entry `i` decodes
/// to `[i, i, i, 255]`
fn build_rle(width: i32, height: i32, rle4: bool, entries: u16, stream: &[u8]) -> Vec<u8> {
    let depth: u16 = if rle4 { 4 } else { 8 };
    let compression: u32 = if rle4 { 2 } else { 1 };

    let table_len = u32::from(entries) * 4;
    let pixel_data_offset = 14 + 40 + table_len;
    let mut bytes = Vec::new();

    bytes.extend_from_slice(b"BM");
    bytes.extend_from_slice(&(pixel_data_offset + stream.len() as u32).to_le_bytes());
    bytes.extend_from_slice(&[0; 4]);
    bytes.extend_from_slice(&pixel_data_offset.to_le_bytes());

    bytes.extend_from_slice(&40_u32.to_le_bytes());
    bytes.extend_from_slice(&width.to_le_bytes());
    bytes.extend_from_slice(&height.to_le_bytes());
    bytes.extend_from_slice(&1_u16.to_le_bytes());
    bytes.extend_from_slice(&depth.to_le_bytes());
    bytes.extend_from_slice(&compression.to_le_bytes());
    bytes.extend_from_slice(&(stream.len() as u32).to_le_bytes());
    bytes.extend_from_slice(&[0; 8]);
    bytes.extend_from_slice(&u32::from(entries).to_le_bytes());
    bytes.extend_from_slice(&0_u32.to_le_bytes());

    for i in 0..entries {
        let v = i as u8;
        bytes.extend_from_slice(&[v, v, v, 0]);
    }

    bytes.extend_from_slice(stream);
    bytes
}

fn decode(bytes: Vec<u8>) -> BmpDocument {
    BmpDecoder::new(ByteCursor::new(bytes)).decode().unwrap()
}

fn gray_at(document: &BmpDocument, row: usize, col: usize) -> u8 {
    let pixel = document.pixels().unwrap().get(row, col).unwrap();

    assert_eq!(pixel[0], pixel[1]);
    assert_eq!(pixel[1], pixel[2]);
    pixel[0]
}

#[test]
fn encoded_run_fills_and_the_rest_defaults() {
    // a run of three on a five pixel row, then end of line, end of
    // bitmap; the two untouched pixels stay at index zero
    let stream = [3, 0x7F, 0, 0, 0, 1];
    let document = decode(build_rle(5, 1, false, 128, &stream));

    for col in 0..3 {
        assert_eq!(gray_at(&document, 0, col), 0x7F);
    }
    for col in 3..5 {
        assert_eq!(gray_at(&document, 0, col), 0);
    }
}

#[test]
fn delta_escape_moves_the_cursor() {
    // one pixel, jump two right and one up, one more pixel; rows are
    // bottom-up so the second run lands on the display's top row
    let stream = [1, 1, 0, 2, 2, 1, 1, 2, 0, 0];
    let document = decode(build_rle(4, 2, false, 16, &stream));

    assert_eq!(gray_at(&document, 1, 0), 1);
    assert_eq!(gray_at(&document, 0, 3), 2);
    // everything skipped by the delta stays at zero
    assert_eq!(gray_at(&document, 1, 1), 0);
    assert_eq!(gray_at(&document, 0, 0), 0);
}

#[test]
fn absolute_run_pads_its_source_to_even() {
    // three literal bytes are followed by one pad byte
    let stream = [0, 3, 7, 8, 9, 0xEE, 0, 0, 0, 1];
    let document = decode(build_rle(5, 1, false, 16, &stream));

    assert_eq!(gray_at(&document, 0, 0), 7);
    assert_eq!(gray_at(&document, 0, 1), 8);
    assert_eq!(gray_at(&document, 0, 2), 9);
    assert_eq!(gray_at(&document, 0, 3), 0);
}

#[test]
fn rle4_runs_alternate_nibbles() {
    let stream = [5, 0xAB, 0, 0, 0, 1];
    let document = decode(build_rle(6, 1, true, 16, &stream));

    assert_eq!(gray_at(&document, 0, 0), 0xA);
    assert_eq!(gray_at(&document, 0, 1), 0xB);
    assert_eq!(gray_at(&document, 0, 2), 0xA);
    assert_eq!(gray_at(&document, 0, 3), 0xB);
    assert_eq!(gray_at(&document, 0, 4), 0xA);
    assert_eq!(gray_at(&document, 0, 5), 0);
}

#[test]
fn rle4_absolute_run_unpacks_nibbles() {
    // four literal pixels live in two source bytes, already even
    let stream = [0, 4, 0x12, 0x34, 0, 0, 0, 1];
    let document = decode(build_rle(6, 1, true, 16, &stream));

    assert_eq!(gray_at(&document, 0, 0), 1);
    assert_eq!(gray_at(&document, 0, 1), 2);
    assert_eq!(gray_at(&document, 0, 2), 3);
    assert_eq!(gray_at(&document, 0, 3), 4);
    assert_eq!(gray_at(&document, 0, 4), 0);
}

#[test]
fn overlong_run_clamps_by_default_and_errors_in_strict() {
    // a run of six on a four pixel row
    let stream = [6, 1, 0, 0, 0, 1];
    let bytes = build_rle(4, 1, false, 16, &stream);

    let document = decode(bytes.clone());
    for col in 0..4 {
        assert_eq!(gray_at(&document, 0, col), 1);
    }

    let options = DecoderOptions::default().set_strict_mode(true);
    let mut strict = BmpDecoder::new_with_options(ByteCursor::new(bytes), options);

    assert!(matches!(
        strict.decode(),
        Err(BmpDecodeErrors::InvalidRleStream(_))
    ));
}

#[test]
fn delta_outside_the_image_always_errors() {
    let stream = [0, 2, 200, 0, 0, 1];
    let mut decoder = BmpDecoder::new(ByteCursor::new(build_rle(4, 2, false, 16, &stream)));

    assert!(matches!(
        decoder.decode(),
        Err(BmpDecodeErrors::InvalidRleStream(_))
    ));
}

#[test]
fn stream_ending_early_is_a_truncation() {
    // one run, then silence where the next escape should be
    let stream = [3, 1];
    let mut decoder = BmpDecoder::new(ByteCursor::new(build_rle(4, 2, false, 16, &stream)));

    assert!(matches!(
        decoder.decode(),
        Err(BmpDecodeErrors::TruncatedPixelData(_))
    ));
}

#[test]
fn end_of_bitmap_leaves_later_rows_at_zero() {
    // the escape arrives after a single pixel of a two row image
    let stream = [1, 5, 0, 1];
    let document = decode(build_rle(2, 2, false, 16, &stream));

    assert_eq!(gray_at(&document, 1, 0), 5);
    assert_eq!(gray_at(&document, 1, 1), 0);
    assert_eq!(gray_at(&document, 0, 0), 0);
    assert_eq!(gray_at(&document, 0, 1), 0);
}
