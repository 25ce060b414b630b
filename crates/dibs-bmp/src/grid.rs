/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The decoded pixel grid
//!
//! Rows are stored top to bottom regardless of the on-disk row order,
//! tightly packed with no stride padding. The per pixel layout is the
//! grid's colorspace, one byte per sample.

use alloc::vec::Vec;
use core::fmt;

use dibs_core::colorspace::ColorSpace;

use crate::errors::BmpDecodeErrors;

/// A rectangular block of decoded pixels
///
/// Built by the decoder, or by hand when assembling a document for
/// the encoder.
#[derive(Clone, Eq, PartialEq)]
pub struct PixelGrid {
    width:      usize,
    height:     usize,
    colorspace: ColorSpace,
    data:       Vec<u8>
}

impl fmt::Debug for PixelGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixelGrid")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("colorspace", &self.colorspace)
            .field("data", &format_args!("{} bytes", self.data.len()))
            .finish()
    }
}

impl PixelGrid {
    /// Wrap raw samples into a grid, checking that the byte length
    /// matches the shape
    pub fn new(
        width: usize, height: usize, colorspace: ColorSpace, data: Vec<u8>
    ) -> Result<PixelGrid, BmpDecodeErrors> {
        if width == 0 {
            return Err(BmpDecodeErrors::ZeroDimensions("width"));
        }
        if height == 0 {
            return Err(BmpDecodeErrors::ZeroDimensions("height"));
        }

        let components = colorspace.num_components();

        if components == 0 {
            return Err(BmpDecodeErrors::GenericStatic(
                "cannot build a grid over a colorspace with no known component count"
            ));
        }

        let expected = width
            .checked_mul(height)
            .and_then(|pixels| pixels.checked_mul(components))
            .ok_or(BmpDecodeErrors::OverFlowOccurred)?;

        if data.len() != expected {
            return Err(BmpDecodeErrors::TooSmallBuffer(expected, data.len()));
        }

        Ok(PixelGrid {
            width,
            height,
            colorspace,
            data
        })
    }

    /// Width in pixels
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels
    pub const fn height(&self) -> usize {
        self.height
    }

    pub const fn colorspace(&self) -> ColorSpace {
        self.colorspace
    }

    /// The raw samples, rows top to bottom
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Destroy the grid returning its samples
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Bytes one row occupies
    pub(crate) fn row_size(&self) -> usize {
        self.width * self.colorspace.num_components()
    }

    /// The samples of one row, top to bottom indexing
    pub(crate) fn row(&self, row: usize) -> &[u8] {
        let size = self.row_size();

        &self.data[row * size..(row + 1) * size]
    }

    /// The pixel at `(row, col)` as `[red, green, blue, alpha]`, row 0
    /// being the top of the image
    ///
    /// Alpha reads 255 when the grid has no alpha channel, luma grids
    /// replicate the single sample across the color channels.
    pub fn get(&self, row: usize, col: usize) -> Result<[u8; 4], BmpDecodeErrors> {
        if row >= self.height || col >= self.width {
            return Err(BmpDecodeErrors::OutOfBounds(row, col));
        }

        let components = self.colorspace.num_components();
        let start = (row * self.width + col) * components;
        let pixel = &self.data[start..start + components];

        match self.colorspace {
            ColorSpace::RGB => Ok([pixel[0], pixel[1], pixel[2], 255]),
            ColorSpace::RGBA => Ok([pixel[0], pixel[1], pixel[2], pixel[3]]),
            ColorSpace::Luma => Ok([pixel[0], pixel[0], pixel[0], 255]),
            ColorSpace::LumaA => Ok([pixel[0], pixel[0], pixel[0], pixel[1]]),
            _ => Err(BmpDecodeErrors::GenericStatic(
                "no RGBA view for this colorspace"
            ))
        }
    }
}
