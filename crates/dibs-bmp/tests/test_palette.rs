/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Color table sizing rules across header shapes

use dibs_bmp::{BmpDecodeErrors, BmpDecoder, ColorEntry};
use dibs_core::bytestream::ByteCursor;

fn file_header(bytes: &mut Vec<u8>, pixel_data_offset: u32) {
    bytes.extend_from_slice(b"BM");
    bytes.extend_from_slice(&0_u32.to_le_bytes());
    bytes.extend_from_slice(&[0; 4]);
    bytes.extend_from_slice(&pixel_data_offset.to_le_bytes());
}

fn info_header(bytes: &mut Vec<u8>, width: i32, depth: u16, colors_used: u32) {
    bytes.extend_from_slice(&40_u32.to_le_bytes());
    bytes.extend_from_slice(&width.to_le_bytes());
    bytes.extend_from_slice(&1_i32.to_le_bytes());
    bytes.extend_from_slice(&1_u16.to_le_bytes());
    bytes.extend_from_slice(&depth.to_le_bytes());
    bytes.extend_from_slice(&[0; 16]);
    bytes.extend_from_slice(&colors_used.to_le_bytes());
    bytes.extend_from_slice(&0_u32.to_le_bytes());
}

/// `n` grayscale quad entries
fn gray_quads(bytes: &mut Vec<u8>, n: u16) {
    for i in 0..n {
        let v = i as u8;
        bytes.extend_from_slice(&[v, v, v, 0]);
    }
}

#[test]
fn four_bit_defaults_to_sixteen_entries() {
    let mut bytes = Vec::new();

    file_header(&mut bytes, 14 + 40 + 64);
    info_header(&mut bytes, 1, 4, 0);
    gray_quads(&mut bytes, 16);
    bytes.extend_from_slice(&[0x50, 0, 0, 0]);

    let mut decoder = BmpDecoder::new(ByteCursor::new(bytes));
    let document = decoder.decode().unwrap();

    assert_eq!(decoder.color_table().len(), 16);
    assert_eq!(document.pixels().unwrap().get(0, 0).unwrap(), [5, 5, 5, 255]);
}

#[test]
fn declared_count_wins_at_any_depth() {
    // a 24 bit image normally has no table, but a declared count
    // still makes one
    let mut bytes = Vec::new();

    file_header(&mut bytes, 14 + 40 + 40);
    info_header(&mut bytes, 1, 24, 10);
    gray_quads(&mut bytes, 10);
    bytes.extend_from_slice(&[1, 2, 3, 0]);

    let mut decoder = BmpDecoder::new(ByteCursor::new(bytes));
    let document = decoder.decode().unwrap();

    assert_eq!(decoder.color_table().len(), 10);
    // the table never feeds a 24 bit decode
    assert_eq!(document.pixels().unwrap().get(0, 0).unwrap(), [3, 2, 1, 255]);
}

#[test]
fn oversized_declared_count_is_clamped() {
    // nine entries declared on a one bit image, clamped to the two
    // the depth can address
    let mut bytes = Vec::new();

    file_header(&mut bytes, 14 + 40 + 8);
    info_header(&mut bytes, 1, 1, 9);
    gray_quads(&mut bytes, 2);
    bytes.extend_from_slice(&[0x80, 0, 0, 0]);

    let mut decoder = BmpDecoder::new(ByteCursor::new(bytes));
    let document = decoder.decode().unwrap();

    assert_eq!(decoder.color_table().len(), 2);
    assert_eq!(document.pixels().unwrap().get(0, 0).unwrap(), [1, 1, 1, 255]);
}

#[test]
fn truncated_table_reports_the_shortfall() {
    // an 8 bit image with no declared count expects 256 entries,
    // only 10 are present
    let mut bytes = Vec::new();

    file_header(&mut bytes, 14 + 40 + 1024);
    info_header(&mut bytes, 1, 8, 0);
    gray_quads(&mut bytes, 10);

    let mut decoder = BmpDecoder::new(ByteCursor::new(bytes));
    let error = decoder.decode_headers().unwrap_err();

    assert!(matches!(
        error,
        BmpDecodeErrors::TruncatedColorTable(256, 10)
    ));
    // both headers parsed before the table failed
    assert!(decoder.file_header().is_some());
    assert!(decoder.dib_header().is_some());
}

#[test]
fn core_shape_reads_three_byte_entries() {
    let mut bytes = Vec::new();

    // 16 triples on a 4 bit core image
    file_header(&mut bytes, 14 + 12 + 48);
    bytes.extend_from_slice(&12_u32.to_le_bytes());
    bytes.extend_from_slice(&1_u16.to_le_bytes());
    bytes.extend_from_slice(&1_u16.to_le_bytes());
    bytes.extend_from_slice(&1_u16.to_le_bytes());
    bytes.extend_from_slice(&4_u16.to_le_bytes());

    for i in 0..16_u8 {
        bytes.extend_from_slice(&[i, i, i]);
    }
    bytes.extend_from_slice(&[0x30, 0, 0, 0]);

    let mut decoder = BmpDecoder::new(ByteCursor::new(bytes));
    let document = decoder.decode().unwrap();

    let table = decoder.color_table();
    assert_eq!(table.len(), 16);
    assert!(matches!(table.get(0).unwrap(), ColorEntry::Triple { .. }));

    // no mismatch, so exactly 3 bytes per entry were consumed
    assert!(document.offset_mismatch().is_none());
    assert_eq!(document.pixels().unwrap().get(0, 0).unwrap(), [3, 3, 3, 255]);
}

#[test]
fn indexed_files_cannot_skip_their_table() {
    // an indexed depth always implies a table, writing the pixels
    // where it should start is a truncation
    let mut bytes = Vec::new();

    file_header(&mut bytes, 14 + 40);
    info_header(&mut bytes, 2, 8, 0);
    bytes.extend_from_slice(&[7, 200, 0, 0]);

    let mut decoder = BmpDecoder::new(ByteCursor::new(bytes));
    let error = decoder.decode_headers().unwrap_err();

    assert!(matches!(error, BmpDecodeErrors::TruncatedColorTable(..)));
}
