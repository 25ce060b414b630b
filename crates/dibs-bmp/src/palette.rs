/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The color table and its entry type
//!
//! Images with a bit depth of 8 or below index into a color table
//! stored between the headers and the pixel array. The two OS/2 era
//! header shapes store bare blue-green-red triples, every later shape
//! adds a fourth reserved byte; the entry type keeps the layouts
//! distinct so a rewrite emits exactly the bytes that were read.

use alloc::vec::Vec;

use dibs_core::bytestream::{ByteIoError, ByteReader, ByteReaderTrait, ByteWriter, ByteWriterTrait};
use dibs_core::log::warn;

use crate::errors::BmpDecodeErrors;
use crate::headers::DibHeader;

/// One color table entry, fields in on-disk order
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ColorEntry {
    /// The three byte layout of the core and OS/2 shapes
    Triple { blue: u8, green: u8, red: u8 },
    /// The four byte layout of every later shape
    Quad {
        blue:     u8,
        green:    u8,
        red:      u8,
        reserved: u8
    }
}

impl ColorEntry {
    /// The entry color in `[red, green, blue]` order
    pub const fn rgb(&self) -> [u8; 3] {
        match *self {
            ColorEntry::Triple { blue, green, red } => [red, green, blue],
            ColorEntry::Quad {
                blue, green, red, ..
            } => [red, green, blue]
        }
    }

    /// The entry color in `[red, green, blue, alpha]` order
    ///
    /// Alpha is always 255, the fourth byte of a quad entry is
    /// reserved and not an opacity.
    pub const fn rgba(&self) -> [u8; 4] {
        let [r, g, b] = self.rgb();

        [r, g, b, 255]
    }

    /// Bytes this entry occupies on disk
    pub const fn size(&self) -> usize {
        match self {
            ColorEntry::Triple { .. } => 3,
            ColorEntry::Quad { .. } => 4
        }
    }
}

/// The color table sitting between the headers and the pixel array
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ColorTable {
    entries: Vec<ColorEntry>
}

impl ColorTable {
    /// Wrap already built entries into a table
    pub fn new(entries: Vec<ColorEntry>) -> ColorTable {
        ColorTable { entries }
    }

    /// Number of entries in the table
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry at `index`, `None` when the index is past the table
    pub fn get(&self, index: usize) -> Option<ColorEntry> {
        self.entries.get(index).copied()
    }

    /// All entries in table order
    pub fn entries(&self) -> &[ColorEntry] {
        &self.entries
    }

    /// The color for a pixel index, black when the index is past the
    /// table
    ///
    /// Broken encoders emit indices beyond the entries they wrote and
    /// the usual renderer behavior is to show black rather than
    /// refuse the file.
    pub(crate) fn resolve(&self, index: u8) -> [u8; 3] {
        self.get(usize::from(index))
            .map_or([0, 0, 0], |entry| entry.rgb())
    }

    /// Number of entries a file with this header carries
    ///
    /// A nonzero declared count wins at every depth. When the count is
    /// absent, depths of 8 and below imply a full table and anything
    /// deeper implies none. A declared count an indexed depth cannot
    /// address is clamped with a warning.
    pub(crate) fn expected_entries(dib: &DibHeader) -> usize {
        let depth = usize::from(dib.bits_per_pixel());
        let declared = dib.colors_used() as usize;

        if declared != 0 {
            if (1..=8).contains(&depth) {
                let max_entries = 1_usize << depth;

                if declared > max_entries {
                    warn!(
                        "Color table declares {} entries but a {} bit image can only address {}, clamping",
                        declared, depth, max_entries
                    );
                    return max_entries;
                }
            }
            declared
        } else if (1..=8).contains(&depth) {
            1_usize << depth
        } else {
            0
        }
    }

    /// Read `count` entries of the entry width `dib` implies
    pub(crate) fn read_from<T: ByteReaderTrait>(
        reader: &mut ByteReader<T>, dib: &DibHeader, count: usize
    ) -> Result<ColorTable, BmpDecodeErrors> {
        let entry_size = dib.palette_entry_size();
        let mut entries = Vec::with_capacity(count);

        for entries_read in 0..count {
            let entry = if entry_size == 3 {
                let raw: [u8; 3] = reader
                    .read_fixed_bytes_or_error()
                    .map_err(|_| BmpDecodeErrors::TruncatedColorTable(count, entries_read))?;

                ColorEntry::Triple {
                    blue:  raw[0],
                    green: raw[1],
                    red:   raw[2]
                }
            } else {
                let raw: [u8; 4] = reader
                    .read_fixed_bytes_or_error()
                    .map_err(|_| BmpDecodeErrors::TruncatedColorTable(count, entries_read))?;

                ColorEntry::Quad {
                    blue:     raw[0],
                    green:    raw[1],
                    red:      raw[2],
                    reserved: raw[3]
                }
            };

            entries.push(entry);
        }

        Ok(ColorTable { entries })
    }

    /// Write every entry back in on-disk order
    pub(crate) fn write_to<T: ByteWriterTrait>(
        &self, writer: &mut ByteWriter<T>
    ) -> Result<(), ByteIoError> {
        for entry in &self.entries {
            match *entry {
                ColorEntry::Triple { blue, green, red } => {
                    writer.write_const_bytes(&[blue, green, red])?;
                }
                ColorEntry::Quad {
                    blue,
                    green,
                    red,
                    reserved
                } => {
                    writer.write_const_bytes(&[blue, green, red, reserved])?;
                }
            }
        }

        Ok(())
    }

    /// Bytes the table occupies on disk
    pub(crate) fn disk_size(&self) -> usize {
        self.entries.iter().map(|entry| entry.size()).sum()
    }

    /// First entry matching an `[red, green, blue]` color, used by
    /// the encoder to map grid colors back to indices
    ///
    /// Entries past index 255 cannot be addressed by any bit depth
    /// and are never matched.
    pub(crate) fn find_color(&self, rgb: [u8; 3]) -> Option<u8> {
        self.entries
            .iter()
            .position(|entry| entry.rgb() == rgb)
            .and_then(|position| u8::try_from(position).ok())
    }
}
