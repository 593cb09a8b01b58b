#![allow(clippy::cast_possible_truncation)]

//! UTF-16 → UTF-8.
//!
//! The encoder walks the source once, left to right, and appends to the
//! destination. All-ASCII unit pairs are copied two at a time; everything
//! else is encoded one code unit (or one surrogate pair) at a time.

use alloc::{vec, vec::Vec};

use crate::{
    ascii,
    error::{MalformedKind, TranscodeError},
    options::Validation,
};

/// `(0xD800 << 10) + 0xDC00 - 0x10000`: subtracting it from
/// `(high << 10) + low` yields the scalar value of a surrogate pair.
const SURROGATE_PAIR_OFFSET: u32 = 0x035F_DC00;

/// Worst-case number of UTF-8 bytes for `units` UTF-16 code units.
///
/// Every unit encodes to at most three bytes; a surrogate pair takes two
/// units and produces four.
#[must_use]
pub const fn utf8_len_bound(units: usize) -> usize {
    units.saturating_mul(3)
}

/// [`utf8_len_bound`] plus room for a terminator, `3 × (units + 1)`.
///
/// This is the size binding code traditionally reserves before appending a
/// NUL byte after the encoded text.
#[must_use]
pub const fn utf8_capacity_for(units: usize) -> usize {
    units.saturating_add(1).saturating_mul(3)
}

/// Encodes UTF-16 `src` into `dst` and returns the number of bytes written.
///
/// The destination is not NUL-terminated.
///
/// # Errors
///
/// - [`TranscodeError::BufferTooSmall`] if `dst` is shorter than
///   [`utf8_len_bound`]`(src.len())`. Nothing is written in that case.
/// - [`TranscodeError::MalformedInput`] in [`Validation::Strict`] mode when
///   `src` contains an unpaired surrogate. Bytes before the offending unit
///   have already been written.
///
/// # Examples
///
/// ```rust
/// use unibridge::{Validation, utf8_len_bound, utf16_to_utf8_into};
///
/// let src = [0x0063, 0x0061, 0x0066, 0x00E9];
/// let mut dst = vec![0; utf8_len_bound(src.len())];
/// let n = utf16_to_utf8_into(&src, &mut dst, Validation::Trusted).unwrap();
/// assert_eq!(&dst[..n], "café".as_bytes());
/// ```
pub fn utf16_to_utf8_into(
    src: &[u16],
    dst: &mut [u8],
    validation: Validation,
) -> Result<usize, TranscodeError> {
    let needed = utf8_len_bound(src.len());
    if dst.len() < needed {
        return Err(TranscodeError::BufferTooSmall {
            needed,
            available: dst.len(),
        });
    }
    encode::<true>(src, dst, validation)
}

/// Encodes UTF-16 `src` into a freshly allocated, exactly sized `Vec<u8>`.
///
/// An empty source returns an empty vector without allocating.
///
/// # Errors
///
/// [`TranscodeError::MalformedInput`] in [`Validation::Strict`] mode when
/// `src` contains an unpaired surrogate.
pub fn utf16_to_utf8(src: &[u16], validation: Validation) -> Result<Vec<u8>, TranscodeError> {
    utf16_to_utf8_with::<true>(src, validation)
}

pub(crate) fn utf16_to_utf8_with<const FAST_PATH: bool>(
    src: &[u16],
    validation: Validation,
) -> Result<Vec<u8>, TranscodeError> {
    if src.is_empty() {
        return Ok(Vec::new());
    }
    let mut out = vec![0; utf8_len_bound(src.len())];
    let written = encode::<FAST_PATH>(src, &mut out, validation)?;
    out.truncate(written);
    out.shrink_to_fit();
    Ok(out)
}

/// Core loop. `dst` must hold at least `utf8_len_bound(src.len())` bytes.
pub(crate) fn encode<const FAST_PATH: bool>(
    src: &[u16],
    dst: &mut [u8],
    validation: Validation,
) -> Result<usize, TranscodeError> {
    debug_assert!(dst.len() >= utf8_len_bound(src.len()));

    let mut read = 0;
    let mut written = 0;

    while read < src.len() {
        if FAST_PATH && read + 1 < src.len() && ascii::is_ascii_unit_pair(src[read], src[read + 1])
        {
            dst[written] = src[read] as u8;
            dst[written + 1] = src[read + 1] as u8;
            read += 2;
            written += 2;
            continue;
        }

        let unit = src[read];
        match unit {
            0..=0x7F => {
                dst[written] = unit as u8;
                written += 1;
            }
            0x80..=0x7FF => {
                dst[written] = 0xC0 | (unit >> 6) as u8;
                dst[written + 1] = 0x80 | (unit & 0x3F) as u8;
                written += 2;
            }
            0xD800..=0xDBFF => {
                if let Some(&low @ 0xDC00..=0xDFFF) = src.get(read + 1) {
                    let scalar = (u32::from(unit) << 10) + u32::from(low) - SURROGATE_PAIR_OFFSET;
                    written += write_four(&mut dst[written..], scalar);
                    read += 1;
                } else {
                    written += write_lone_surrogate(unit, read, &mut dst[written..], validation)?;
                }
            }
            0xDC00..=0xDFFF => {
                written += write_lone_surrogate(unit, read, &mut dst[written..], validation)?;
            }
            _ => {
                written += write_three(&mut dst[written..], unit);
            }
        }
        read += 1;
    }

    Ok(written)
}

#[inline]
fn write_three(dst: &mut [u8], unit: u16) -> usize {
    dst[0] = 0xE0 | (unit >> 12) as u8;
    dst[1] = 0x80 | ((unit >> 6) & 0x3F) as u8;
    dst[2] = 0x80 | (unit & 0x3F) as u8;
    3
}

#[inline]
fn write_four(dst: &mut [u8], scalar: u32) -> usize {
    debug_assert!((0x1_0000..=0x10_FFFF).contains(&scalar));
    dst[0] = 0xF0 | (scalar >> 18) as u8;
    dst[1] = 0x80 | ((scalar >> 12) & 0x3F) as u8;
    dst[2] = 0x80 | ((scalar >> 6) & 0x3F) as u8;
    dst[3] = 0x80 | (scalar & 0x3F) as u8;
    4
}

/// Trusted mode keeps the surrogate in its generalized 3-byte form and does
/// not consume the unit that follows it.
#[inline]
fn write_lone_surrogate(
    unit: u16,
    offset: usize,
    dst: &mut [u8],
    validation: Validation,
) -> Result<usize, TranscodeError> {
    if validation.is_strict() {
        return Err(TranscodeError::malformed(
            MalformedKind::UnpairedSurrogate(unit),
            offset,
        ));
    }
    Ok(write_three(dst, unit))
}
