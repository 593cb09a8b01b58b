#![allow(clippy::cast_possible_truncation)]

//! UTF-8 → UTF-16.
//!
//! Runs of four ASCII bytes are widened in one step. Any other lead byte
//! decodes a single sequence into a scalar, which is then written as one
//! UTF-16 unit or a surrogate pair.

use alloc::{vec, vec::Vec};

use crate::{
    ascii,
    error::{MalformedKind, TranscodeError},
    options::Validation,
};

const REPLACEMENT: u32 = 0xFFFD;

/// Worst-case number of UTF-16 units for `bytes` bytes of UTF-8.
///
/// Every sequence of `n` bytes produces at most `n` units (a 4-byte sequence
/// becomes a surrogate pair), so the byte count itself is the bound.
#[must_use]
pub const fn utf16_len_bound(bytes: usize) -> usize {
    bytes
}

/// Decodes UTF-8 `src` into a freshly allocated `Vec<u16>` of exact length.
///
/// An empty source returns an empty vector without allocating.
///
/// # Errors
///
/// [`TranscodeError::MalformedInput`] in [`Validation::Strict`] mode for any
/// input [`core::str::from_utf8`] would reject.
///
/// # Examples
///
/// ```rust
/// use unibridge::{Validation, utf8_to_utf16};
///
/// let units = utf8_to_utf16("A💡".as_bytes(), Validation::Strict).unwrap();
/// assert_eq!(units, [0x0041, 0xD83D, 0xDCA1]);
/// ```
pub fn utf8_to_utf16(src: &[u8], validation: Validation) -> Result<Vec<u16>, TranscodeError> {
    utf8_to_utf16_with::<true>(src, validation)
}

/// Decodes UTF-8 `src` into `dst` and returns the number of units written.
///
/// # Errors
///
/// - [`TranscodeError::BufferTooSmall`] if `dst` is shorter than
///   [`utf16_len_bound`]`(src.len())`. Nothing is written in that case.
/// - [`TranscodeError::MalformedInput`] in [`Validation::Strict`] mode, after
///   the units preceding the bad sequence have been written.
pub fn utf8_to_utf16_into(
    src: &[u8],
    dst: &mut [u16],
    validation: Validation,
) -> Result<usize, TranscodeError> {
    let needed = utf16_len_bound(src.len());
    if dst.len() < needed {
        return Err(TranscodeError::BufferTooSmall {
            needed,
            available: dst.len(),
        });
    }
    decode::<true>(src, dst, validation)
}

pub(crate) fn utf8_to_utf16_with<const FAST_PATH: bool>(
    src: &[u8],
    validation: Validation,
) -> Result<Vec<u16>, TranscodeError> {
    if src.is_empty() {
        return Ok(Vec::new());
    }
    let mut out = vec![0; src.len() + 1];
    let written = decode::<FAST_PATH>(src, &mut out, validation)?;
    out.truncate(written);
    out.shrink_to_fit();
    Ok(out)
}

/// Core loop. `dst` must hold at least `src.len()` units.
pub(crate) fn decode<const FAST_PATH: bool>(
    src: &[u8],
    dst: &mut [u16],
    validation: Validation,
) -> Result<usize, TranscodeError> {
    debug_assert!(dst.len() >= utf16_len_bound(src.len()));

    let mut read = 0;
    let mut written = 0;

    while read < src.len() {
        if FAST_PATH && src.len() - read >= 4 {
            let quad = [src[read], src[read + 1], src[read + 2], src[read + 3]];
            if ascii::is_ascii_quad(quad) {
                for (unit, byte) in dst[written..written + 4].iter_mut().zip(quad) {
                    *unit = u16::from(byte);
                }
                read += 4;
                written += 4;
                continue;
            }
        }

        let (scalar, consumed) = decode_sequence(src, read, validation)?;
        if scalar <= 0xFFFF {
            dst[written] = scalar as u16;
            written += 1;
        } else {
            let v = scalar - 0x1_0000;
            dst[written] = 0xD800 + (v >> 10) as u16;
            dst[written + 1] = 0xDC00 + (v & 0x3FF) as u16;
            written += 2;
        }
        read += consumed;
    }

    Ok(written)
}

/// Sequence length announced by a lead byte, `None` if it cannot lead.
#[inline]
fn sequence_width(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        _ if lead & 0xE0 == 0xC0 => Some(2),
        _ if lead & 0xF0 == 0xE0 => Some(3),
        _ if lead & 0xF8 == 0xF0 => Some(4),
        _ => None,
    }
}

/// Decodes the sequence starting at `at` into `(scalar, bytes consumed)`.
///
/// In trusted mode this never fails. Continuation bytes contribute their low
/// six bits whatever their marker, and a sequence the input cannot complete
/// becomes U+FFFD covering the rest of the input.
fn decode_sequence(
    src: &[u8],
    at: usize,
    validation: Validation,
) -> Result<(u32, usize), TranscodeError> {
    let lead = src[at];
    let Some(width) = sequence_width(lead) else {
        if validation.is_strict() {
            return Err(TranscodeError::malformed(
                MalformedKind::InvalidLeadByte(lead),
                at,
            ));
        }
        return Ok((REPLACEMENT, 1));
    };
    if width == 1 {
        return Ok((u32::from(lead), 1));
    }

    let available = &src[at..];
    if validation.is_strict() {
        // Report a bad continuation byte before blaming the end of input.
        let present = &available[..width.min(available.len())];
        if let Some(bad) = present[1..].iter().position(|&b| b & 0xC0 != 0x80) {
            return Err(TranscodeError::malformed(
                MalformedKind::InvalidContinuation {
                    sequence: present[..bad + 2].into(),
                },
                at,
            ));
        }
    }
    if available.len() < width {
        if validation.is_strict() {
            return Err(TranscodeError::malformed(
                MalformedKind::Truncated {
                    sequence: available.into(),
                    expected: width,
                },
                at,
            ));
        }
        return Ok((REPLACEMENT, available.len()));
    }

    let sequence = &available[..width];
    let lead_bits = u32::from(lead) & (0x7F >> width);
    let scalar = sequence[1..]
        .iter()
        .fold(lead_bits, |acc, &b| (acc << 6) | u32::from(b & 0x3F));

    if validation.is_strict() {
        check_scalar(scalar, width, at)?;
    }
    debug_assert!(width != 3 || scalar <= 0xFFFF);

    Ok((scalar, width))
}

fn check_scalar(scalar: u32, width: usize, at: usize) -> Result<(), TranscodeError> {
    let minimum = match width {
        2 => 0x80,
        3 => 0x800,
        _ => 0x1_0000,
    };
    let kind = if scalar < minimum {
        MalformedKind::Overlong { scalar, width }
    } else if (0xD800..=0xDFFF).contains(&scalar) {
        MalformedKind::EncodedSurrogate(scalar)
    } else if scalar > 0x10_FFFF {
        MalformedKind::OutOfRange(scalar)
    } else {
        return Ok(());
    };
    Err(TranscodeError::malformed(kind, at))
}
