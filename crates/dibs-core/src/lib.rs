//! Core routines shared by the dibs crates
//!
//! This crate provides the plumbing shared by the bitmap
//! decoders and encoders under the `dibs` umbrella
//!
//! It currently contains
//!
//! - A bytestream reader and writer with endian aware reads and writes
//! - Colorspace information shared by decoded images
//! - Decoder options
//! - A log facade that compiles to nothing when logging is disabled
//!
//! This library is `#[no_std]` with `alloc` needed for defining `Vec`
//! which we need for storing decoded bytes.
//!
//!
//! # Features
//!  - `std`: Unlocks the `std::io` reader and writer bridges.
//!
//!  - `log`: Routes the log facade to the `log` crate instead of
//!     the no-op shims.
//!
//!  - `serde`: Enables serializing of some of the data structures
//!     present in the crate
//!
#![cfg_attr(not(feature = "std"), no_std)]
#![macro_use]
extern crate alloc;

pub mod bytestream;
pub mod colorspace;
pub mod options;
pub mod serde;

#[cfg(feature = "log")]
pub use log;
#[cfg(not(feature = "log"))]
pub mod log;
