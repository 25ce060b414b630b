/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Shared vocabulary for the BMP format: the file tag allow-list and
//! the compression scheme enumeration.

/// File tags a BMP stream may begin with, as little-endian u16 values.
///
/// `BM` is the Windows bitmap everybody produces; the rest are OS/2
/// bitmap arrays, color icons, color pointers, icons and pointers,
/// all of which share the same header layout after the tag.
pub const BMP_FILE_TAGS: [u16; 6] = [
    u16::from_le_bytes(*b"BM"),
    u16::from_le_bytes(*b"BA"),
    u16::from_le_bytes(*b"CI"),
    u16::from_le_bytes(*b"CP"),
    u16::from_le_bytes(*b"IC"),
    u16::from_le_bytes(*b"PT")
];

pub(crate) fn is_bmp_file_tag(tag: u16) -> bool {
    BMP_FILE_TAGS.contains(&tag)
}

/// Compression schemes a BMP pixel stream can use
///
/// `JPEG` and `PNG` mark an embedded stream in another format; the
/// decoder hands those back as an opaque payload instead of pixels.
#[allow(clippy::upper_case_acronyms)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BmpCompression {
    /// Uncompressed pixel rows
    RGB,
    /// Run length encoding for 8 bit indexed images
    RLE8,
    /// Run length encoding for 4 bit indexed images
    RLE4,
    /// Channels described by explicit bit masks
    BITFIELDS,
    /// Embedded JPEG stream, not decoded here
    JPEG,
    /// Embedded PNG stream, not decoded here
    PNG,
    /// Bit masks including an alpha mask
    ALPHABITFIELDS,
    /// CMYK, uncompressed
    CMYK,
    /// CMYK with 8 bit run length encoding
    CMYKRLE8,
    /// CMYK with 4 bit run length encoding
    CMYKRLE4
}

impl BmpCompression {
    /// Map the on-disk compression value to the enum, `None` for
    /// values outside the known set
    pub fn from_u32(num: u32) -> Option<BmpCompression> {
        match num {
            0 => Some(BmpCompression::RGB),
            1 => Some(BmpCompression::RLE8),
            2 => Some(BmpCompression::RLE4),
            3 => Some(BmpCompression::BITFIELDS),
            4 => Some(BmpCompression::JPEG),
            5 => Some(BmpCompression::PNG),
            6 => Some(BmpCompression::ALPHABITFIELDS),
            11 => Some(BmpCompression::CMYK),
            12 => Some(BmpCompression::CMYKRLE8),
            13 => Some(BmpCompression::CMYKRLE4),
            _ => None
        }
    }

    /// The on-disk value for this compression scheme
    pub const fn to_u32(self) -> u32 {
        match self {
            BmpCompression::RGB => 0,
            BmpCompression::RLE8 => 1,
            BmpCompression::RLE4 => 2,
            BmpCompression::BITFIELDS => 3,
            BmpCompression::JPEG => 4,
            BmpCompression::PNG => 5,
            BmpCompression::ALPHABITFIELDS => 6,
            BmpCompression::CMYK => 11,
            BmpCompression::CMYKRLE8 => 12,
            BmpCompression::CMYKRLE4 => 13
        }
    }

    /// True when the pixel stream is run length encoded
    pub const fn is_rle(self) -> bool {
        matches!(
            self,
            BmpCompression::RLE8
                | BmpCompression::RLE4
                | BmpCompression::CMYKRLE8
                | BmpCompression::CMYKRLE4
        )
    }

    /// True when the pixel data is an embedded stream in another
    /// format that we pass through untouched
    pub const fn is_opaque_payload(self) -> bool {
        matches!(self, BmpCompression::JPEG | BmpCompression::PNG)
    }

    /// True when channel layout comes from explicit bit masks
    pub const fn uses_masks(self) -> bool {
        matches!(
            self,
            BmpCompression::BITFIELDS | BmpCompression::ALPHABITFIELDS
        )
    }
}
