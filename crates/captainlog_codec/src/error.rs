//! Error types for the codec crate.

use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while encoding or decoding log entries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Failed to encode an entry to CBOR.
    #[error("encoding failed: {message}")]
    EncodingFailed {
        /// Description of the encoding error.
        message: String,
    },

    /// Failed to decode CBOR bytes into an entry.
    #[error("decoding failed: {message}")]
    DecodingFailed {
        /// Description of the decoding error.
        message: String,
    },

    /// Extra bytes followed a complete encoded entry.
    #[error("{count} trailing bytes after encoded entry")]
    TrailingBytes {
        /// Number of unread bytes.
        count: usize,
    },

    /// The entry was written by a newer (or unknown) format version.
    #[error("unsupported entry format version {found} (supported up to {supported})")]
    UnsupportedVersion {
        /// Version found in the encoded entry.
        found: u16,
        /// Highest version this codec understands.
        supported: u16,
    },

    /// A timestamp falls outside the range representable as a fixed-width key.
    #[error("timestamp out of range: {value}")]
    TimestampOutOfRange {
        /// The offending timestamp, as formatted by chrono.
        value: String,
    },

    /// A stored timestamp string is not a valid key-form timestamp.
    #[error("invalid timestamp '{value}': {message}")]
    InvalidTimestamp {
        /// The string that failed to parse.
        value: String,
        /// Description of the parse failure.
        message: String,
    },
}

impl CodecError {
    /// Create an encoding failed error.
    pub fn encoding_failed(message: impl Into<String>) -> Self {
        Self::EncodingFailed {
            message: message.into(),
        }
    }

    /// Create a decoding failed error.
    pub fn decoding_failed(message: impl Into<String>) -> Self {
        Self::DecodingFailed {
            message: message.into(),
        }
    }

    /// Create an invalid timestamp error.
    pub fn invalid_timestamp(value: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidTimestamp {
            value: value.into(),
            message: message.into(),
        }
    }
}
