#![expect(clippy::inline_always)]

//! Word-at-a-time ASCII tests shared by the encoder and decoder fast paths.
//!
//! Both directions spend most of their time on plain ASCII text (identifiers,
//! file names, key names). Instead of branching once per unit, the fast paths
//! fold several units into one `u32` and test a single mask.

/// Bits that must be clear in a pair of UTF-16 units packed as
/// `first | second << 16` for both units to be ASCII.
const UNIT_PAIR_NON_ASCII: u32 = 0xFF80_FF80;

/// Bits that must be clear in four UTF-8 bytes read as one word for all of
/// them to be ASCII. Byte order does not matter since the mask is symmetric.
const BYTE_QUAD_NON_ASCII: u32 = 0x8080_8080;

/// `true` when both UTF-16 units are below `0x80`.
#[inline(always)]
pub(crate) fn is_ascii_unit_pair(first: u16, second: u16) -> bool {
    let word = u32::from(first) | (u32::from(second) << 16);
    word & UNIT_PAIR_NON_ASCII == 0
}

/// `true` when none of the four bytes has its high bit set.
#[inline(always)]
pub(crate) fn is_ascii_quad(bytes: [u8; 4]) -> bool {
    u32::from_ne_bytes(bytes) & BYTE_QUAD_NON_ASCII == 0
}
