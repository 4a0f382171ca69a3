//! Sortable entry keys derived from timestamps.

use crate::error::{CodecError, CodecResult};
use crate::timestamp::{Timestamp, KEY_LEN};
use std::fmt;

/// Storage key of an entry within its category namespace.
///
/// A key is the [`KEY_LEN`]-byte key form of the entry timestamp. Because the
/// width is fixed and every field is zero-padded, comparing two keys byte by
/// byte gives the same answer as comparing their timestamps.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryKey(String);

impl EntryKey {
    /// Returns the key bytes as stored.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the key length in bytes (always [`KEY_LEN`]).
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `false`; keys are never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parses a stored key.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not UTF-8 or not a key-form
    /// timestamp.
    pub fn from_bytes(bytes: &[u8]) -> CodecResult<Self> {
        let value = std::str::from_utf8(bytes).map_err(|e| {
            CodecError::invalid_timestamp(String::from_utf8_lossy(bytes), e.to_string())
        })?;
        let timestamp = Timestamp::parse_key(value)?;
        Ok(derive_key(&timestamp))
    }

    /// Recovers the timestamp this key was derived from.
    ///
    /// # Errors
    ///
    /// Only fails if the key was built from a corrupt source.
    pub fn to_timestamp(&self) -> CodecResult<Timestamp> {
        Timestamp::parse_key(&self.0)
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derives the storage key for `timestamp`.
///
/// Equal timestamps yield equal keys, and `a < b` implies
/// `derive_key(a).as_bytes() < derive_key(b).as_bytes()`.
#[must_use]
pub fn derive_key(timestamp: &Timestamp) -> EntryKey {
    let key = timestamp.to_key_string();
    debug_assert_eq!(key.len(), KEY_LEN);
    EntryKey(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // Covers 0001-01-01 through 9999-12-31.
    const MIN_SECS: i64 = -62_135_596_800;
    const MAX_SECS: i64 = 253_402_300_799;

    fn timestamp_strategy() -> impl Strategy<Value = Timestamp> {
        (MIN_SECS..=MAX_SECS, 0u32..1_000_000_000).prop_map(|(secs, nanos)| {
            let dt = chrono::DateTime::from_timestamp(secs, nanos).unwrap();
            Timestamp::from_datetime(dt).unwrap()
        })
    }

    #[test]
    fn equal_timestamps_equal_keys() {
        let ts = Timestamp::from_unix_nanos(42).unwrap();
        let same = Timestamp::parse_key(&ts.to_key_string()).unwrap();
        assert_eq!(derive_key(&ts), derive_key(&same));
    }

    #[test]
    fn sub_second_difference_changes_key() {
        let a = Timestamp::from_unix_nanos(1_000_000_000).unwrap();
        let b = Timestamp::from_unix_nanos(1_000_000_001).unwrap();
        assert!(derive_key(&a).as_bytes() < derive_key(&b).as_bytes());
    }

    #[test]
    fn from_bytes_roundtrip() {
        let ts = Timestamp::from_unix_nanos(1_700_000_000_000_000_000).unwrap();
        let key = derive_key(&ts);
        let parsed = EntryKey::from_bytes(key.as_bytes()).unwrap();
        assert_eq!(parsed, key);
        assert_eq!(parsed.to_timestamp().unwrap(), ts);
    }

    #[test]
    fn from_bytes_rejects_garbage() {
        assert!(EntryKey::from_bytes(b"\xff\xfe").is_err());
        assert!(EntryKey::from_bytes(b"2024").is_err());
    }

    proptest! {
        #[test]
        fn key_order_matches_time_order(a in timestamp_strategy(), b in timestamp_strategy()) {
            let ka = derive_key(&a);
            let kb = derive_key(&b);
            prop_assert_eq!(ka.len(), KEY_LEN);
            prop_assert_eq!(a.cmp(&b), ka.as_bytes().cmp(kb.as_bytes()));
        }
    }
}
