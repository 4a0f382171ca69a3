//! Log entries and their stored representation.
//!
//! An entry is stored as a CBOR map:
//!
//! ```text
//! {
//!   "v":        1,                                  // format version
//!   "ts":       "2024-03-01T09:15:42.000123456Z",   // key-form timestamp
//!   "category": "work",
//!   "text":     "started sprint"
//! }
//! ```
//!
//! Unknown map fields are ignored when decoding, so later format versions
//! can add fields without breaking older readers of older data.

use crate::error::{CodecError, CodecResult};
use crate::key::{derive_key, EntryKey};
use crate::timestamp::Timestamp;
use crate::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::io::Cursor;

/// Current entry format version.
pub const FORMAT_VERSION: u16 = 1;

/// One timestamped, categorized text record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// When the entry was written.
    pub timestamp: Timestamp,
    /// The category the entry belongs to.
    pub category: String,
    /// The entry body.
    pub text: String,
}

impl Entry {
    /// Creates an entry.
    pub fn new(timestamp: Timestamp, category: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            timestamp,
            category: category.into(),
            text: text.into(),
        }
    }

    /// Returns the storage key for this entry.
    #[must_use]
    pub fn key(&self) -> EntryKey {
        derive_key(&self.timestamp)
    }
}

#[derive(Serialize)]
struct RecordRef<'a> {
    #[serde(rename = "v")]
    version: u16,
    #[serde(rename = "ts")]
    timestamp: &'a str,
    category: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct Record {
    #[serde(rename = "v")]
    version: u16,
    #[serde(rename = "ts")]
    timestamp: String,
    category: String,
    #[serde(default)]
    text: String,
}

/// Encodes an entry to its stored byte form.
///
/// # Errors
///
/// Returns [`CodecError::EncodingFailed`] if serialization fails.
pub fn encode(entry: &Entry) -> CodecResult<Vec<u8>> {
    let timestamp = entry.timestamp.to_key_string();
    let record = RecordRef {
        version: FORMAT_VERSION,
        timestamp: &timestamp,
        category: &entry.category,
        text: &entry.text,
    };

    let mut buffer = Vec::with_capacity(64 + entry.category.len() + entry.text.len());
    ciborium::into_writer(&record, &mut buffer)
        .map_err(|e| CodecError::encoding_failed(e.to_string()))?;
    Ok(buffer)
}

/// Decodes an entry from its stored byte form.
///
/// # Errors
///
/// - [`CodecError::DecodingFailed`] for malformed or truncated bytes
/// - [`CodecError::TrailingBytes`] if data follows the encoded entry
/// - [`CodecError::UnsupportedVersion`] for unknown format versions
/// - [`CodecError::InvalidTimestamp`] if the stored timestamp is malformed
pub fn decode(bytes: &[u8]) -> CodecResult<Entry> {
    let mut cursor = Cursor::new(bytes);
    let record: Record = ciborium::from_reader(&mut cursor)
        .map_err(|e| CodecError::decoding_failed(e.to_string()))?;

    #[allow(clippy::cast_possible_truncation)]
    let consumed = cursor.position() as usize;
    if consumed != bytes.len() {
        return Err(CodecError::TrailingBytes {
            count: bytes.len() - consumed,
        });
    }

    if record.version == 0 || record.version > FORMAT_VERSION {
        return Err(CodecError::UnsupportedVersion {
            found: record.version,
            supported: FORMAT_VERSION,
        });
    }

    let timestamp = Timestamp::parse_key(&record.timestamp)?;
    Ok(Entry {
        timestamp,
        category: record.category,
        text: record.text,
    })
}

impl Encode for Entry {
    fn encode(&self) -> CodecResult<Vec<u8>> {
        encode(self)
    }
}

impl Decode for Entry {
    fn decode(bytes: &[u8]) -> CodecResult<Self> {
        decode(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample() -> Entry {
        Entry::new(
            Timestamp::from_unix_nanos(1_700_000_000_123_456_789).unwrap(),
            "work",
            "started sprint",
        )
    }

    #[derive(Serialize)]
    struct FutureRecord<'a> {
        v: u16,
        ts: &'a str,
        category: &'a str,
        text: &'a str,
        mood: &'a str,
    }

    #[test]
    fn roundtrip() {
        let entry = sample();
        let bytes = encode(&entry).unwrap();
        assert_eq!(decode(&bytes).unwrap(), entry);
    }

    #[test]
    fn roundtrip_through_traits() {
        let entry = sample();
        let bytes = Encode::encode(&entry).unwrap();
        let decoded = <Entry as Decode>::decode(&bytes).unwrap();
        assert_eq!(decoded, entry);
    }

    #[test]
    fn encoding_is_deterministic() {
        let entry = sample();
        assert_eq!(encode(&entry).unwrap(), encode(&entry).unwrap());
    }

    #[test]
    fn empty_input_fails() {
        assert!(matches!(
            decode(&[]),
            Err(CodecError::DecodingFailed { .. })
        ));
    }

    #[test]
    fn truncated_input_fails() {
        let bytes = encode(&sample()).unwrap();
        for len in [1, bytes.len() / 2, bytes.len() - 1] {
            assert!(decode(&bytes[..len]).is_err(), "prefix of {len} bytes decoded");
        }
    }

    #[test]
    fn trailing_bytes_fail() {
        let mut bytes = encode(&sample()).unwrap();
        bytes.extend_from_slice(&[0x00, 0x01]);
        assert_eq!(decode(&bytes), Err(CodecError::TrailingBytes { count: 2 }));
    }

    #[test]
    fn wrong_shape_fails() {
        let mut bytes = Vec::new();
        ciborium::into_writer(&vec![1u8, 2, 3], &mut bytes).unwrap();
        assert!(matches!(
            decode(&bytes),
            Err(CodecError::DecodingFailed { .. })
        ));
    }

    #[test]
    fn newer_version_is_rejected() {
        let record = FutureRecord {
            v: FORMAT_VERSION + 1,
            ts: "2024-01-01T00:00:00.000000000Z",
            category: "work",
            text: "x",
            mood: "ok",
        };
        let mut bytes = Vec::new();
        ciborium::into_writer(&record, &mut bytes).unwrap();
        assert_eq!(
            decode(&bytes),
            Err(CodecError::UnsupportedVersion {
                found: FORMAT_VERSION + 1,
                supported: FORMAT_VERSION,
            })
        );
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let record = FutureRecord {
            v: FORMAT_VERSION,
            ts: "2024-01-01T00:00:00.000000000Z",
            category: "work",
            text: "x",
            mood: "ok",
        };
        let mut bytes = Vec::new();
        ciborium::into_writer(&record, &mut bytes).unwrap();
        let entry = decode(&bytes).unwrap();
        assert_eq!(entry.category, "work");
        assert_eq!(entry.text, "x");
    }

    #[test]
    fn malformed_timestamp_is_rejected() {
        let record = FutureRecord {
            v: FORMAT_VERSION,
            ts: "yesterday",
            category: "work",
            text: "x",
            mood: "ok",
        };
        let mut bytes = Vec::new();
        ciborium::into_writer(&record, &mut bytes).unwrap();
        assert!(matches!(
            decode(&bytes),
            Err(CodecError::InvalidTimestamp { .. })
        ));
    }

    #[test]
    fn key_matches_timestamp() {
        let entry = sample();
        assert_eq!(entry.key().as_str(), "2023-11-14T22:13:20.123456789Z");
    }

    proptest! {
        #[test]
        fn roundtrip_arbitrary(
            nanos in any::<i64>(),
            category in "[a-z][a-z0-9_-]{0,15}",
            text in any::<String>(),
        ) {
            let entry = Entry::new(Timestamp::from_unix_nanos(nanos).unwrap(), category, text);
            let bytes = encode(&entry).unwrap();
            prop_assert_eq!(decode(&bytes).unwrap(), entry);
        }
    }
}
