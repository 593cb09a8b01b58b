/// How much the codec trusts its input.
///
/// Every entry point takes a `Validation` so that the tradeoff between speed
/// and safety against malformed text is visible at the call site.
///
/// # Examples
///
/// ```rust
/// use unibridge::{Validation, utf16_to_utf8};
///
/// // A lone high surrogate is passed through in trusted mode...
/// let lossy = utf16_to_utf8(&[0x0041, 0xD800], Validation::Trusted).unwrap();
/// assert_eq!(lossy, [0x41, 0xED, 0xA0, 0x80]);
///
/// // ...and rejected in strict mode.
/// assert!(utf16_to_utf8(&[0x0041, 0xD800], Validation::Strict).is_err());
/// ```
///
/// # Default
///
/// [`Validation::Trusted`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Validation {
    /// Input is assumed to be well formed, typically because it was produced
    /// by the same library that consumes it.
    ///
    /// Malformed input never fails and never panics, but the output for it
    /// is unspecified: lone surrogates are passed through in their 3-byte
    /// form, undecodable UTF-8 becomes U+FFFD, and continuation bytes are not
    /// checked.
    #[default]
    Trusted,

    /// Input is checked, and malformed input is reported as
    /// [`TranscodeError::MalformedInput`](crate::TranscodeError::MalformedInput).
    ///
    /// Strict UTF-8 decoding rejects exactly what [`core::str::from_utf8`]
    /// rejects; strict UTF-16 encoding rejects unpaired surrogates.
    Strict,
}

impl Validation {
    /// Returns `true` for [`Validation::Strict`].
    #[must_use]
    pub const fn is_strict(self) -> bool {
        matches!(self, Validation::Strict)
    }

    /// Maps a boolean flag (as found in binding signatures) to a mode.
    #[must_use]
    pub const fn from_strict(strict: bool) -> Self {
        if strict {
            Validation::Strict
        } else {
            Validation::Trusted
        }
    }
}
