//! Case-sensitive 32-bit string hash.
//!
//! Every name in a definition file is identified on the wire by this hash,
//! so the multiplier and wrapping behaviour are part of the format.

const MULTIPLIER: u32 = 387;

/// Hash raw bytes: `h = 387 * h + byte`, wrapping at 2^32.
#[inline]
pub fn hash_bytes(bytes: &[u8]) -> u32 {
    bytes.iter().fold(0u32, |h, &b| {
        h.wrapping_mul(MULTIPLIER).wrapping_add(u32::from(b))
    })
}

/// Hash a string by its UTF-8 bytes.
#[inline]
pub fn hash(text: &str) -> u32 {
    hash_bytes(text.as_bytes())
}
