/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Header registry and file header behavior

use dibs_bmp::{probe_bmp, BmpDecodeErrors, BmpDecoder, DibHeader, BMP_FILE_TAGS};
use dibs_core::bytestream::ByteCursor;
use dibs_core::options::DecoderOptions;

/// The 14 byte file header with an unchecked size field
fn file_header(bytes: &mut Vec<u8>, pixel_data_offset: u32) {
    bytes.extend_from_slice(b"BM");
    bytes.extend_from_slice(&0_u32.to_le_bytes());
    bytes.extend_from_slice(&[0; 4]);
    bytes.extend_from_slice(&pixel_data_offset.to_le_bytes());
}

/// A complete one pixel 24 bit file using a DIB header of the given
/// declared length, every optional field zeroed
fn one_pixel_file(header_size: u32) -> Vec<u8> {
    let mut bytes = Vec::new();

    file_header(&mut bytes, 14 + header_size);
    bytes.extend_from_slice(&header_size.to_le_bytes());

    if header_size == 12 {
        bytes.extend_from_slice(&1_u16.to_le_bytes());
        bytes.extend_from_slice(&1_u16.to_le_bytes());
        bytes.extend_from_slice(&1_u16.to_le_bytes());
        bytes.extend_from_slice(&24_u16.to_le_bytes());
    } else {
        bytes.extend_from_slice(&1_i32.to_le_bytes());
        bytes.extend_from_slice(&1_i32.to_le_bytes());
        bytes.extend_from_slice(&1_u16.to_le_bytes());
        bytes.extend_from_slice(&24_u16.to_le_bytes());
        bytes.resize(14 + header_size as usize, 0);
    }

    // one blue pixel and the row padding
    bytes.extend_from_slice(&[0xFF, 0, 0, 0]);
    bytes
}

#[test]
fn registry_selects_every_known_shape() {
    for header_size in [12_u32, 16, 40, 52, 56, 64, 108, 124] {
        let bytes = one_pixel_file(header_size);
        let mut decoder = BmpDecoder::new(ByteCursor::new(bytes));

        decoder.decode_headers().unwrap();

        let header = decoder.dib_header().unwrap();
        assert_eq!(header.header_size(), header_size);

        let shape_matches = match header_size {
            12 => matches!(header, DibHeader::Core(_)),
            16 | 64 => matches!(header, DibHeader::Os22x(_)),
            40 => matches!(header, DibHeader::Info(_)),
            52 => matches!(header, DibHeader::V2(_)),
            56 => matches!(header, DibHeader::V3(_)),
            108 => matches!(header, DibHeader::V4(_)),
            _ => matches!(header, DibHeader::V5(_))
        };
        assert!(shape_matches, "wrong shape for length {header_size}");

        // the parse consumed exactly the declared length, so the
        // cursor landed on the declared pixel offset
        assert!(decoder.offset_mismatch().is_none());

        let document = decoder.decode().unwrap();
        assert_eq!(document.pixels().unwrap().get(0, 0).unwrap(), [0, 0, 255, 255]);
    }
}

#[test]
fn unknown_header_length_fails_but_keeps_the_file_header() {
    let mut bytes = Vec::new();

    file_header(&mut bytes, 100);
    bytes.extend_from_slice(&33_u32.to_le_bytes());
    bytes.resize(100, 0);

    let mut decoder = BmpDecoder::new(ByteCursor::new(bytes));
    let error = decoder.decode_headers().unwrap_err();

    assert!(matches!(error, BmpDecodeErrors::UnknownHeaderVariant(33)));
    assert!(decoder.file_header().is_some());
    assert!(decoder.dib_header().is_none());
}

#[test]
fn every_known_file_tag_is_accepted() {
    for tag in BMP_FILE_TAGS {
        let mut bytes = one_pixel_file(40);
        bytes[0..2].copy_from_slice(&tag.to_le_bytes());

        let mut decoder = BmpDecoder::new(ByteCursor::new(bytes));
        decoder.decode_headers().unwrap();

        assert_eq!(decoder.file_header().unwrap().file_type, tag);
    }
}

#[test]
fn unknown_file_tag_is_rejected() {
    let mut bytes = one_pixel_file(40);
    bytes[0] = 0;
    bytes[1] = 0;

    let mut decoder = BmpDecoder::new(ByteCursor::new(bytes));
    let error = decoder.decode_headers().unwrap_err();

    assert!(matches!(error, BmpDecodeErrors::InvalidMagicBytes(0)));
}

#[test]
fn probe_checks_tag_and_header_length() {
    assert!(probe_bmp(&one_pixel_file(40)));
    assert!(probe_bmp(&one_pixel_file(12)));

    let mut wrong_tag = one_pixel_file(40);
    wrong_tag[0] = b'Q';
    assert!(!probe_bmp(&wrong_tag));

    let mut wrong_length = one_pixel_file(40);
    wrong_length[14..18].copy_from_slice(&33_u32.to_le_bytes());
    assert!(!probe_bmp(&wrong_length));

    assert!(!probe_bmp(b"BM"));
}

#[test]
fn os2_short_form_reads_only_the_dimensions() {
    let bytes = one_pixel_file(16);
    let mut decoder = BmpDecoder::new(ByteCursor::new(bytes));

    decoder.decode_headers().unwrap();

    let DibHeader::Os22x(header) = decoder.dib_header().unwrap() else {
        panic!("expected the OS/2 shape");
    };

    assert_eq!(header.header_size, 16);
    assert_eq!(header.width, 1);
    assert_eq!(header.height, 1);
    assert_eq!(header.bits_per_pixel, 24);
    // everything past the first 16 bytes stays zeroed
    assert_eq!(header.colors_used, 0);
    assert_eq!(header.units, 0);
    assert_eq!(header.identifier, 0);
}

#[test]
fn v5_colorimetry_fields_parse() {
    let mut bytes = Vec::new();

    file_header(&mut bytes, 14 + 124);
    bytes.extend_from_slice(&124_u32.to_le_bytes());
    bytes.extend_from_slice(&1_i32.to_le_bytes());
    bytes.extend_from_slice(&1_i32.to_le_bytes());
    bytes.extend_from_slice(&1_u16.to_le_bytes());
    bytes.extend_from_slice(&24_u16.to_le_bytes());
    bytes.extend_from_slice(&0_u32.to_le_bytes()); // uncompressed
    bytes.extend_from_slice(&[0; 20]); // sizes, resolution, colors
    bytes.extend_from_slice(&[0; 16]); // channel masks
    bytes.extend_from_slice(&0x7352_4742_u32.to_le_bytes()); // "sRGB"

    for endpoint in 1..=9_i32 {
        bytes.extend_from_slice(&(endpoint << 24).to_le_bytes());
    }
    bytes.extend_from_slice(&1000_u32.to_le_bytes()); // gamma red
    bytes.extend_from_slice(&2000_u32.to_le_bytes());
    bytes.extend_from_slice(&3000_u32.to_le_bytes());
    bytes.extend_from_slice(&4_u32.to_le_bytes()); // intent
    bytes.extend_from_slice(&0_u32.to_le_bytes());
    bytes.extend_from_slice(&0_u32.to_le_bytes());
    bytes.extend_from_slice(&0_u32.to_le_bytes());
    bytes.extend_from_slice(&[0xFF, 0, 0, 0]);

    let mut decoder = BmpDecoder::new(ByteCursor::new(bytes));
    decoder.decode_headers().unwrap();

    let DibHeader::V5(header) = decoder.dib_header().unwrap() else {
        panic!("expected the V5 shape");
    };

    assert_eq!(header.cs_type, 0x7352_4742);
    assert_eq!(header.endpoints.red.x.0, 1 << 24);
    assert_eq!(header.endpoints.blue.z.0, 9 << 24);
    // 2^24 over 2^30 in 2.30 fixed point
    assert!((header.endpoints.red.x.to_f32() - 0.015625).abs() < 1e-6);
    assert_eq!(header.gamma_green, 2000);
    assert_eq!(header.intent, 4);
}

#[test]
fn zero_dimensions_are_rejected() {
    let mut bytes = one_pixel_file(40);
    // zero out the width
    bytes[18..22].copy_from_slice(&0_u32.to_le_bytes());

    let mut decoder = BmpDecoder::new(ByteCursor::new(bytes));

    assert!(matches!(
        decoder.decode_headers(),
        Err(BmpDecodeErrors::ZeroDimensions("width"))
    ));
}

#[test]
fn dimensions_above_the_limits_are_rejected() {
    let mut bytes = one_pixel_file(40);
    bytes[18..22].copy_from_slice(&9_u32.to_le_bytes());

    let options = DecoderOptions::default().set_max_width(4);
    let mut decoder = BmpDecoder::new_with_options(ByteCursor::new(bytes), options);

    assert!(matches!(
        decoder.decode_headers(),
        Err(BmpDecodeErrors::TooLargeDimensions("width", 4, 9))
    ));
}

#[test]
fn offset_gap_is_recorded_in_default_mode() {
    // four junk bytes between the header region and the pixels
    let mut bytes = Vec::new();

    file_header(&mut bytes, 14 + 40 + 4);
    bytes.extend_from_slice(&40_u32.to_le_bytes());
    bytes.extend_from_slice(&1_i32.to_le_bytes());
    bytes.extend_from_slice(&1_i32.to_le_bytes());
    bytes.extend_from_slice(&1_u16.to_le_bytes());
    bytes.extend_from_slice(&24_u16.to_le_bytes());
    bytes.resize(54, 0);
    bytes.extend_from_slice(&[0xAA, 0xBB, 0xCC, 0xDD]); // the gap
    bytes.extend_from_slice(&[1, 2, 3, 0]);

    let mut decoder = BmpDecoder::new(ByteCursor::new(bytes.clone()));
    let document = decoder.decode().unwrap();

    let mismatch = document.offset_mismatch().unwrap();
    assert_eq!(mismatch.declared, 58);
    assert_eq!(mismatch.actual, 54);

    // the declared offset won, the junk was never read as pixels
    assert_eq!(document.pixels().unwrap().get(0, 0).unwrap(), [3, 2, 1, 255]);

    let options = DecoderOptions::default().set_strict_mode(true);
    let mut strict_decoder = BmpDecoder::new_with_options(ByteCursor::new(bytes), options);

    assert!(matches!(
        strict_decoder.decode(),
        Err(BmpDecodeErrors::OffsetMismatch(58, 54))
    ));
}

#[test]
fn accessors_answer_after_headers_alone() {
    let bytes = one_pixel_file(40);
    let mut decoder = BmpDecoder::new(ByteCursor::new(bytes));

    assert!(decoder.dimensions().is_none());
    assert!(decoder.output_buf_size().is_none());

    decoder.decode_headers().unwrap();

    assert_eq!(decoder.dimensions(), Some((1, 1)));
    assert_eq!(decoder.output_buf_size(), Some(3));
    assert!(decoder.color_table().is_empty());
}
