#![cfg(feature = "serde")]
/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Serde serialization support for the vocabulary enums
//!
//! The enums serialize to their debug names, which is what the
//! inspection tooling around the crates expects.

use alloc::format;

use serde::ser::{Serialize, Serializer};

use crate::colorspace::ColorSpace;

impl Serialize for ColorSpace {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        serializer.serialize_str(&format!("{:?}", self))
    }
}
