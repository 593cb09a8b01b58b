//! Reusable, NUL-terminating conversion buffers for binding glue.
//!
//! Binding code converts many short strings (names, identifiers, error
//! messages) and hands each result to a C API expecting a terminator. Rather
//! than allocating per call, a [`ScratchBuffers`] keeps its storage and grows
//! it with a fixed slack whenever a request does not fit.
//!
//! There is no process-wide instance. Callers either own a `ScratchBuffers`
//! (for example inside a binding object) or borrow the calling thread's one
//! through [`with_scratch`].

use alloc::vec::Vec;
#[cfg(feature = "std")]
use core::cell::RefCell;

use crate::{
    decode::{self, utf16_len_bound},
    encode::{self, utf8_capacity_for},
    error::TranscodeError,
    options::Validation,
};

/// Extra units added on top of a request when a buffer grows.
const GROWTH_SLACK: usize = 32;

/// A set of conversion buffers reused across calls.
///
/// - the *primary* byte buffer receives UTF-8 output,
/// - the *secondary* byte buffer receives the second string of a pair, so
///   two conversions can be alive at once,
/// - the *wide* buffer receives UTF-16 output.
///
/// Results borrow the buffers and are NUL-terminated; the returned slice
/// includes the terminator, as [`core::ffi::CStr::to_bytes_with_nul`] does.
///
/// # Examples
///
/// ```rust
/// use unibridge::{ScratchBuffers, Validation};
///
/// let mut scratch = ScratchBuffers::new();
/// let name: Vec<u16> = "mixer".encode_utf16().collect();
/// let version: Vec<u16> = "2.0".encode_utf16().collect();
/// let (name, version) = scratch
///     .utf16_pair_to_utf8_nul(&name, &version, Validation::Strict)
///     .unwrap();
/// assert_eq!(name, b"mixer\0");
/// assert_eq!(version, b"2.0\0");
/// ```
#[derive(Debug, Default, Clone)]
pub struct ScratchBuffers {
    primary: Vec<u8>,
    secondary: Vec<u8>,
    wide: Vec<u16>,
}

/// Current sizes of the buffers held by a [`ScratchBuffers`], in code units.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScratchCapacities {
    /// Bytes in the primary UTF-8 buffer.
    pub primary: usize,
    /// Bytes in the secondary UTF-8 buffer.
    pub secondary: usize,
    /// `u16` units in the wide buffer.
    pub wide: usize,
}

impl ScratchBuffers {
    /// Creates empty buffers; nothing is allocated until first use.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            primary: Vec::new(),
            secondary: Vec::new(),
            wide: Vec::new(),
        }
    }

    /// Encodes `src` as NUL-terminated UTF-8 in the primary buffer.
    ///
    /// # Errors
    ///
    /// [`TranscodeError::MalformedInput`] in strict mode for unpaired
    /// surrogates.
    pub fn utf16_to_utf8_nul(
        &mut self,
        src: &[u16],
        validation: Validation,
    ) -> Result<&[u8], TranscodeError> {
        let len = encode_nul(&mut self.primary, "primary", src, validation)?;
        Ok(&self.primary[..len])
    }

    /// Encodes two strings at once, `first` into the primary buffer and
    /// `second` into the secondary buffer.
    ///
    /// # Errors
    ///
    /// [`TranscodeError::MalformedInput`] in strict mode if either string
    /// holds an unpaired surrogate.
    pub fn utf16_pair_to_utf8_nul(
        &mut self,
        first: &[u16],
        second: &[u16],
        validation: Validation,
    ) -> Result<(&[u8], &[u8]), TranscodeError> {
        let first_len = encode_nul(&mut self.primary, "primary", first, validation)?;
        let second_len = encode_nul(&mut self.secondary, "secondary", second, validation)?;
        Ok((&self.primary[..first_len], &self.secondary[..second_len]))
    }

    /// Decodes `src` as NUL-terminated UTF-16 in the wide buffer.
    ///
    /// # Errors
    ///
    /// [`TranscodeError::MalformedInput`] in strict mode for invalid UTF-8.
    pub fn utf8_to_utf16_nul(
        &mut self,
        src: &[u8],
        validation: Validation,
    ) -> Result<&[u16], TranscodeError> {
        grow(&mut self.wide, "wide", utf16_len_bound(src.len()) + 1);
        let written = decode::decode::<true>(src, &mut self.wide, validation)?;
        self.wide[written] = 0;
        Ok(&self.wide[..=written])
    }

    /// Reports how large each buffer currently is.
    #[must_use]
    pub fn capacities(&self) -> ScratchCapacities {
        ScratchCapacities {
            primary: self.primary.len(),
            secondary: self.secondary.len(),
            wide: self.wide.len(),
        }
    }
}

fn encode_nul(
    buf: &mut Vec<u8>,
    name: &'static str,
    src: &[u16],
    validation: Validation,
) -> Result<usize, TranscodeError> {
    grow(buf, name, utf8_capacity_for(src.len()));
    let written = encode::encode::<true>(src, buf, validation)?;
    buf[written] = 0;
    Ok(written + 1)
}

fn grow<T: Copy + Default>(buf: &mut Vec<T>, name: &'static str, needed: usize) {
    if buf.len() < needed {
        let to = needed + GROWTH_SLACK;
        tracing::trace!(buffer = name, from = buf.len(), to, "growing scratch buffer");
        buf.resize(to, T::default());
    }
}

#[cfg(feature = "std")]
std::thread_local! {
    static SCRATCH: RefCell<ScratchBuffers> = const { RefCell::new(ScratchBuffers::new()) };
}

/// Runs `f` with the calling thread's [`ScratchBuffers`].
///
/// A nested call on the same thread receives a temporary set of buffers
/// instead of the busy thread-local one.
///
/// # Examples
///
/// ```rust
/// use unibridge::{Validation, with_scratch};
///
/// let len = with_scratch(|scratch| {
///     scratch
///         .utf8_to_utf16_nul(b"window", Validation::Trusted)
///         .map(<[u16]>::len)
/// });
/// assert_eq!(len, Ok(7));
/// ```
#[cfg(feature = "std")]
pub fn with_scratch<R>(f: impl FnOnce(&mut ScratchBuffers) -> R) -> R {
    SCRATCH.with(|cell| match cell.try_borrow_mut() {
        Ok(mut scratch) => f(&mut scratch),
        Err(_) => {
            tracing::trace!("thread scratch buffers busy, using a temporary set");
            f(&mut ScratchBuffers::new())
        }
    })
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    fn units(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    #[test]
    fn starts_unallocated() {
        assert_eq!(ScratchBuffers::new().capacities(), ScratchCapacities::default());
    }

    #[test]
    fn grows_with_slack_and_is_reused() {
        let mut scratch = ScratchBuffers::new();

        let out = scratch
            .utf16_to_utf8_nul(&units("café"), Validation::Strict)
            .unwrap();
        assert_eq!(out, b"caf\xC3\xA9\0");
        assert_eq!(scratch.capacities().primary, utf8_capacity_for(4) + GROWTH_SLACK);

        // A shorter request fits in what is already there.
        let out = scratch.utf16_to_utf8_nul(&units("ab"), Validation::Strict).unwrap();
        assert_eq!(out, b"ab\0");
        assert_eq!(scratch.capacities().primary, utf8_capacity_for(4) + GROWTH_SLACK);

        let long = units("abcdefghijklmnopqrst");
        scratch.utf16_to_utf8_nul(&long, Validation::Strict).unwrap();
        assert_eq!(scratch.capacities().primary, utf8_capacity_for(20) + GROWTH_SLACK);
        assert_eq!(scratch.capacities().secondary, 0);
    }

    #[test]
    fn pair_uses_both_byte_buffers() {
        let mut scratch = ScratchBuffers::new();
        let (a, b) = scratch
            .utf16_pair_to_utf8_nul(&units("A💡"), &units(""), Validation::Trusted)
            .unwrap();
        assert_eq!(a, b"A\xF0\x9F\x92\xA1\0");
        assert_eq!(b, b"\0");

        let caps = scratch.capacities();
        assert!(caps.primary > 0);
        assert!(caps.secondary > 0);
        assert_eq!(caps.wide, 0);
    }

    #[test]
    fn wide_output_is_terminated() {
        let mut scratch = ScratchBuffers::new();
        let out = scratch
            .utf8_to_utf16_nul("A💡".as_bytes(), Validation::Strict)
            .unwrap();
        assert_eq!(out, [0x41, 0xD83D, 0xDCA1, 0]);
        assert_eq!(scratch.capacities().wide, 5 + 1 + GROWTH_SLACK);
    }

    #[test]
    fn strict_failure_is_reported() {
        let mut scratch = ScratchBuffers::new();
        assert!(
            scratch
                .utf16_pair_to_utf8_nul(&units("ok"), &[0xDC00], Validation::Strict)
                .is_err()
        );
        assert!(scratch.utf8_to_utf16_nul(b"\xFF", Validation::Strict).is_err());
    }

    #[cfg(feature = "std")]
    #[test]
    fn with_scratch_is_reentrant() {
        let nested = with_scratch(|outer| {
            let first = outer
                .utf16_to_utf8_nul(&units("outer"), Validation::Strict)
                .unwrap()
                .len();
            let second = with_scratch(|inner| {
                inner
                    .utf16_to_utf8_nul(&units("inner!"), Validation::Strict)
                    .unwrap()
                    .len()
            });
            (first, second)
        });
        assert_eq!(nested, (6, 7));
    }

    #[cfg(feature = "std")]
    #[test]
    fn with_scratch_keeps_buffers_per_thread() {
        with_scratch(|s| {
            s.utf16_to_utf8_nul(&units("warm up the buffer"), Validation::Trusted)
                .unwrap();
        });
        let here = with_scratch(|s| s.capacities().primary);
        assert!(here > 0);

        let there = std::thread::spawn(|| with_scratch(|s| s.capacities().primary))
            .join()
            .unwrap();
        assert_eq!(there, 0);
    }
}
