//! UTF-16 ⇄ UTF-8 transcoding for strings that cross a language boundary.
//!
//! Host runtimes and native libraries rarely agree on string encoding: one
//! side hands over UTF-16 code units, the other expects UTF-8 bytes (often
//! NUL-terminated). This crate provides the two single-pass transforms
//! needed to marshal text in either direction, plus reusable scratch
//! buffers for the glue code around them.
//!
//! - [`utf16_to_utf8`] / [`utf16_to_utf8_into`]: the encoder.
//! - [`utf8_to_utf16`] / [`utf8_to_utf16_into`]: the decoder.
//! - [`Validation`]: trusted (fast, never fails) or strict (rejects
//!   malformed input with a [`TranscodeError`]).
//! - [`ScratchBuffers`] and [`with_scratch`]: allocation reuse for repeated
//!   conversions.
//!
//! ```rust
//! use unibridge::{Validation, utf8_to_utf16, utf16_to_utf8};
//!
//! let units = [0x0041, 0xD83D, 0xDCA1]; // "A💡"
//! let bytes = utf16_to_utf8(&units, Validation::Strict).unwrap();
//! assert_eq!(bytes, [0x41, 0xF0, 0x9F, 0x92, 0xA1]);
//! assert_eq!(utf8_to_utf16(&bytes, Validation::Strict).unwrap(), units);
//! ```

#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod ascii;
mod decode;
mod encode;
mod error;
mod options;
mod scratch;

#[cfg(test)]
mod tests;

pub use decode::{utf8_to_utf16, utf8_to_utf16_into, utf16_len_bound};
pub use encode::{utf8_capacity_for, utf8_len_bound, utf16_to_utf8, utf16_to_utf8_into};
pub use error::{MalformedKind, TranscodeError};
pub use options::Validation;
#[cfg(feature = "std")]
pub use scratch::with_scratch;
pub use scratch::{ScratchBuffers, ScratchCapacities};

/// Entry points that bypass the ASCII fast paths, for differential fuzzing.
#[cfg(feature = "fuzzing")]
#[doc(hidden)]
pub mod fuzzing {
    use alloc::vec::Vec;

    use crate::{TranscodeError, Validation};

    /// [`crate::utf16_to_utf8`] with every unit taking the scalar path.
    ///
    /// # Errors
    ///
    /// As [`crate::utf16_to_utf8`].
    pub fn utf16_to_utf8_scalar_path(
        src: &[u16],
        validation: Validation,
    ) -> Result<Vec<u8>, TranscodeError> {
        crate::encode::utf16_to_utf8_with::<false>(src, validation)
    }

    /// [`crate::utf8_to_utf16`] with every byte taking the scalar path.
    ///
    /// # Errors
    ///
    /// As [`crate::utf8_to_utf16`].
    pub fn utf8_to_utf16_scalar_path(
        src: &[u8],
        validation: Validation,
    ) -> Result<Vec<u16>, TranscodeError> {
        crate::decode::utf8_to_utf16_with::<false>(src, validation)
    }
}
