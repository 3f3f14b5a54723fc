#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Shared primitives for tessel schemas.
//!
//! - [`hash`]: the 32-bit name hash used on the wire
//! - [`StringTable`]: interned names with blob offsets
//! - [`TypeFlags`]: type capability flags
//! - [`Colors`]: terminal palette for human-readable output

mod colors;
mod flags;
mod hash;
mod string_table;

#[cfg(test)]
mod colors_tests;

pub use colors::Colors;
pub use flags::TypeFlags;
pub use hash::{hash, hash_bytes};
pub use string_table::{StringEntry, StringId, StringTable};
