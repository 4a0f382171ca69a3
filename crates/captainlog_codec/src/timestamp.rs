//! Entry timestamps and their fixed-width key form.

use crate::error::{CodecError, CodecResult};
use chrono::{DateTime, Datelike, NaiveDateTime, TimeDelta, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Length in bytes of a timestamp in key form.
pub const KEY_LEN: usize = 30;

/// chrono format string producing the key form, e.g.
/// `2024-03-01T09:15:42.000123456Z`.
const KEY_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.9fZ";

/// Lenient parse format; width is checked separately.
const PARSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

const MIN_YEAR: i32 = 0;
const MAX_YEAR: i32 = 9999;

/// An instant in time attached to a log entry.
///
/// Timestamps are held in UTC with nanosecond resolution and restricted to
/// the years `0000..=9999`. Inside that range the key form produced by
/// [`Timestamp::to_key_string`] is exactly [`KEY_LEN`] bytes wide, so byte
/// order of keys equals chronological order of timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Returns the current wall-clock time.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Converts a chrono datetime in any timezone to a timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::TimestampOutOfRange`] if the UTC year is
    /// outside `0000..=9999`.
    pub fn from_datetime<Tz: TimeZone>(datetime: DateTime<Tz>) -> CodecResult<Self> {
        let utc = datetime.with_timezone(&Utc);
        if !(MIN_YEAR..=MAX_YEAR).contains(&utc.year()) {
            return Err(CodecError::TimestampOutOfRange {
                value: utc.to_string(),
            });
        }
        Ok(Self(utc))
    }

    /// Builds a timestamp from nanoseconds since the Unix epoch.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::TimestampOutOfRange`] if chrono cannot
    /// represent the instant.
    pub fn from_unix_nanos(nanos: i64) -> CodecResult<Self> {
        let secs = nanos.div_euclid(1_000_000_000);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let subsec = nanos.rem_euclid(1_000_000_000) as u32;
        let datetime = DateTime::from_timestamp(secs, subsec).ok_or_else(|| {
            CodecError::TimestampOutOfRange {
                value: format!("{nanos}ns since epoch"),
            }
        })?;
        Self::from_datetime(datetime)
    }

    /// Parses a timestamp from its key form.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidTimestamp`] if `value` is not exactly
    /// [`KEY_LEN`] bytes or does not match the key format.
    pub fn parse_key(value: &str) -> CodecResult<Self> {
        if value.len() != KEY_LEN {
            return Err(CodecError::invalid_timestamp(
                value,
                format!("expected {KEY_LEN} bytes, got {}", value.len()),
            ));
        }
        let naive = NaiveDateTime::parse_from_str(value, PARSE_FORMAT)
            .map_err(|e| CodecError::invalid_timestamp(value, e.to_string()))?;
        Self::from_datetime(naive.and_utc())
    }

    /// Formats the timestamp in its fixed-width, sortable key form.
    #[must_use]
    pub fn to_key_string(&self) -> String {
        self.0.format(KEY_FORMAT).to_string()
    }

    /// Returns the underlying UTC datetime.
    #[must_use]
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Adds `delta`, returning `None` if the result leaves the supported range.
    #[must_use]
    pub fn checked_add(&self, delta: TimeDelta) -> Option<Self> {
        self.0
            .checked_add_signed(delta)
            .and_then(|dt| Self::from_datetime(dt).ok())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_key_string())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_key_string())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::parse_key(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn key_string_is_fixed_width() {
        let ts = Timestamp::from_unix_nanos(0).unwrap();
        assert_eq!(ts.to_key_string(), "1970-01-01T00:00:00.000000000Z");
        assert_eq!(ts.to_key_string().len(), KEY_LEN);

        let ts = Timestamp::from_unix_nanos(1_700_000_000_123_456_789).unwrap();
        assert_eq!(ts.to_key_string(), "2023-11-14T22:13:20.123456789Z");
    }

    #[test]
    fn offsets_are_normalized_to_utc() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let local = offset.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let ts = Timestamp::from_datetime(local).unwrap();
        assert_eq!(ts.to_key_string(), "2024-05-01T10:00:00.000000000Z");
    }

    #[test]
    fn years_outside_range_are_rejected() {
        let far = Utc.with_ymd_and_hms(10000, 1, 1, 0, 0, 0).unwrap();
        assert!(matches!(
            Timestamp::from_datetime(far),
            Err(CodecError::TimestampOutOfRange { .. })
        ));

        let early = Utc.with_ymd_and_hms(-1, 1, 1, 0, 0, 0).unwrap();
        assert!(Timestamp::from_datetime(early).is_err());
    }

    #[test]
    fn parse_key_roundtrip() {
        let ts = Timestamp::from_unix_nanos(1_234_567_890_000_000_001).unwrap();
        let parsed = Timestamp::parse_key(&ts.to_key_string()).unwrap();
        assert_eq!(parsed, ts);
    }

    #[test]
    fn parse_key_rejects_other_widths() {
        assert!(Timestamp::parse_key("2024-05-01T10:00:00Z").is_err());
        assert!(Timestamp::parse_key("2024-05-01T10:00:00.0000000000Z").is_err());
        assert!(Timestamp::parse_key("not a timestamp at all, really").is_err());
    }

    #[test]
    fn checked_add_stays_in_range() {
        let ts = Timestamp::from_unix_nanos(0).unwrap();
        let later = ts.checked_add(TimeDelta::seconds(1)).unwrap();
        assert!(later > ts);

        let max = Timestamp::parse_key("9999-12-31T23:59:59.999999999Z").unwrap();
        assert!(max.checked_add(TimeDelta::nanoseconds(1)).is_none());
    }
}
