use bstr::BString;
use thiserror::Error;

/// Failure of a transcoding call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TranscodeError {
    /// Strict validation rejected the input.
    ///
    /// `offset` indexes the first code unit of the offending sequence: a
    /// `u16` index when encoding, a byte index when decoding.
    #[error("malformed input at offset {offset}: {kind}")]
    MalformedInput {
        /// What was wrong with the sequence.
        kind: MalformedKind,
        /// Where the sequence starts in the source.
        offset: usize,
    },

    /// A caller-provided destination cannot hold the worst-case output.
    #[error("destination holds {available} code units but up to {needed} may be written")]
    BufferTooSmall {
        /// Worst-case number of code units for this source.
        needed: usize,
        /// Length of the destination that was passed in.
        available: usize,
    },
}

/// The ways a source sequence can be malformed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MalformedKind {
    /// A UTF-16 surrogate without its other half.
    #[error("unpaired surrogate U+{0:04X}")]
    UnpairedSurrogate(u16),

    /// A byte that cannot start a UTF-8 sequence.
    #[error("invalid lead byte 0x{0:02X}")]
    InvalidLeadByte(u8),

    /// A sequence whose trailing bytes are not all `10xxxxxx`.
    #[error("invalid continuation byte in {sequence:?}")]
    InvalidContinuation {
        /// The sequence up to and including the bad byte.
        sequence: BString,
    },

    /// A sequence cut short by the end of the input.
    #[error("truncated sequence {sequence:?}, expected {expected} bytes")]
    Truncated {
        /// The bytes that were available.
        sequence: BString,
        /// The length announced by the lead byte.
        expected: usize,
    },

    /// A scalar encoded with more bytes than necessary.
    #[error("overlong {width}-byte encoding of U+{scalar:04X}")]
    Overlong {
        /// The decoded value.
        scalar: u32,
        /// Number of bytes used to encode it.
        width: usize,
    },

    /// A surrogate code point encoded directly in UTF-8.
    #[error("encoded surrogate U+{0:04X}")]
    EncodedSurrogate(u32),

    /// A 4-byte sequence decoding above U+10FFFF.
    #[error("code point 0x{0:X} is above U+10FFFF")]
    OutOfRange(u32),
}

impl TranscodeError {
    pub(crate) fn malformed(kind: MalformedKind, offset: usize) -> Self {
        tracing::debug!(offset, %kind, "rejecting malformed input");
        TranscodeError::MalformedInput { kind, offset }
    }

    /// The malformation, if this is a validation failure.
    #[must_use]
    pub fn kind(&self) -> Option<&MalformedKind> {
        match self {
            TranscodeError::MalformedInput { kind, .. } => Some(kind),
            TranscodeError::BufferTooSmall { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::{MalformedKind, TranscodeError};

    #[test]
    fn messages_render_offending_bytes() {
        let err = TranscodeError::MalformedInput {
            kind: MalformedKind::InvalidContinuation {
                sequence: (&[0xE2_u8, 0x28][..]).into(),
            },
            offset: 3,
        };
        assert_eq!(
            err.to_string(),
            r#"malformed input at offset 3: invalid continuation byte in "\xe2(""#
        );
    }

    #[test]
    fn surrogate_message_is_padded() {
        let kind = MalformedKind::UnpairedSurrogate(0xD83D);
        assert_eq!(kind.to_string(), "unpaired surrogate U+D83D");
    }

    #[test]
    fn kind_is_absent_for_buffer_errors() {
        let err = TranscodeError::BufferTooSmall {
            needed: 9,
            available: 3,
        };
        assert!(err.kind().is_none());
        assert_eq!(
            err.to_string(),
            "destination holds 3 code units but up to 9 may be written"
        );
    }
}
