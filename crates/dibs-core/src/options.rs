/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Decoder options
//!
//! Knobs shared by the bitmap decoders. The defaults are lenient
//! enough for real-world files while keeping a hostile file from
//! forcing huge allocations.

/// Options shared by the bitmap decoders
///
/// The struct is constructed with a builder pattern; setters consume
/// and return the options value.
///
/// ```
/// use dibs_core::options::DecoderOptions;
///
/// let options = DecoderOptions::default()
///     .set_max_width(1 << 20)
///     .set_strict_mode(true);
/// assert_eq!(options.max_width(), 1 << 20);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DecoderOptions {
    /// Maximum width for which decoders will not try to decode
    /// images larger than the specified width
    max_width:   usize,
    /// Maximum height for which decoders will not try to decode
    /// images larger than the specified height
    max_height:  usize,
    /// Whether the decoder should be extra strict with recoverable
    /// oddities in the file and treat them as errors
    strict_mode: bool
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            max_width:   1 << 14,
            max_height:  1 << 14,
            strict_mode: false
        }
    }
}

impl DecoderOptions {
    /// Get the maximum width configured for which the decoder
    /// can decode images
    pub const fn max_width(&self) -> usize {
        self.max_width
    }

    /// Get the maximum height configured for which the decoder
    /// can decode images
    pub const fn max_height(&self) -> usize {
        self.max_height
    }

    /// Whether recoverable oddities in a file are escalated
    /// to hard errors
    pub const fn strict_mode(&self) -> bool {
        self.strict_mode
    }

    /// Set the maximum image width the decoder accepts
    pub fn set_max_width(mut self, width: usize) -> Self {
        self.max_width = width;
        self
    }

    /// Set the maximum image height the decoder accepts
    pub fn set_max_height(mut self, height: usize) -> Self {
        self.max_height = height;
        self
    }

    /// Turn strict mode on or off
    pub fn set_strict_mode(mut self, yes: bool) -> Self {
        self.strict_mode = yes;
        self
    }
}
