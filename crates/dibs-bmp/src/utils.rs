/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Row geometry and packed sample expansion

/// Number of bytes a row of `width` pixels at `depth` bits per pixel
/// occupies before padding
pub(crate) fn unpadded_row_size(width: usize, depth: usize) -> usize {
    (width * depth + 7) / 8
}

/// Number of bytes a row occupies on disk, padded up to the next four
/// byte boundary
pub(crate) fn padded_row_size(width: usize, depth: usize) -> usize {
    ((width * depth + 31) / 8) & !3
}

/// Expand packed 1, 2 or 4 bit samples into one byte per pixel
///
/// Samples are packed most significant bits first. With a palette
/// present the raw index is kept for a later table lookup, without one
/// the sample is scaled so its full range maps onto `0..=255`.
///
/// `input` must hold exactly the packed bytes for `output.len()`
/// samples, i.e. the unpadded row size.
pub(crate) fn expand_bits_to_byte(
    depth: usize, palette_present: bool, input: &[u8], output: &mut [u8]
) {
    match depth {
        1 => {
            let scale = if palette_present { 1 } else { 0xFF };
            let mut chunks = output.chunks_exact_mut(8);

            for (out, byte) in (&mut chunks).zip(input) {
                out[0] = ((byte >> 7) & 1) * scale;
                out[1] = ((byte >> 6) & 1) * scale;
                out[2] = ((byte >> 5) & 1) * scale;
                out[3] = ((byte >> 4) & 1) * scale;
                out[4] = ((byte >> 3) & 1) * scale;
                out[5] = ((byte >> 2) & 1) * scale;
                out[6] = ((byte >> 1) & 1) * scale;
                out[7] = (byte & 1) * scale;
            }

            let remainder = chunks.into_remainder();

            if !remainder.is_empty() {
                let byte = input[input.len() - 1];

                for (position, out) in remainder.iter_mut().enumerate() {
                    *out = ((byte >> (7 - position)) & 1) * scale;
                }
            }
        }
        2 => {
            let scale = if palette_present { 1 } else { 0x55 };
            let mut chunks = output.chunks_exact_mut(4);

            for (out, byte) in (&mut chunks).zip(input) {
                out[0] = ((byte >> 6) & 3) * scale;
                out[1] = ((byte >> 4) & 3) * scale;
                out[2] = ((byte >> 2) & 3) * scale;
                out[3] = (byte & 3) * scale;
            }

            let remainder = chunks.into_remainder();

            if !remainder.is_empty() {
                let byte = input[input.len() - 1];

                for (position, out) in remainder.iter_mut().enumerate() {
                    *out = ((byte >> (6 - 2 * position)) & 3) * scale;
                }
            }
        }
        4 => {
            let scale = if palette_present { 1 } else { 0x11 };
            let mut chunks = output.chunks_exact_mut(2);

            for (out, byte) in (&mut chunks).zip(input) {
                out[0] = (byte >> 4) * scale;
                out[1] = (byte & 0xF) * scale;
            }

            let remainder = chunks.into_remainder();

            if !remainder.is_empty() {
                remainder[0] = (input[input.len() - 1] >> 4) * scale;
            }
        }
        // depth 8 is already one byte per sample and the callers skip
        // the expansion for it
        _ => {}
    }
}
