//! Property-based test generators using proptest.
//!
//! Provides strategies for generating random test data
//! that maintains required invariants.

use captainlog_codec::{Entry, Timestamp};
use proptest::prelude::*;

/// Unix seconds of 0000-01-01T00:00:00Z, the earliest supported instant.
pub const MIN_UNIX_SECS: i64 = -62_167_219_200;

/// Unix seconds of 9999-12-31T23:59:59Z, the last supported second.
pub const MAX_UNIX_SECS: i64 = 253_402_300_799;

/// Strategy for timestamps anywhere in the supported range.
pub fn timestamp_strategy() -> impl Strategy<Value = Timestamp> {
    (MIN_UNIX_SECS..=MAX_UNIX_SECS, 0u32..1_000_000_000).prop_map(|(secs, nanos)| {
        let datetime = chrono::DateTime::from_timestamp(secs, nanos).expect("in chrono range");
        Timestamp::from_datetime(datetime).expect("in supported range")
    })
}

/// Strategy for valid category names.
pub fn category_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z][a-zA-Z0-9_-]{0,31}").expect("Invalid regex")
}

/// Strategy for non-empty entry text, including non-ASCII characters.
pub fn text_strategy() -> impl Strategy<Value = String> {
    any::<String>().prop_filter("text must not be empty", |s| !s.is_empty())
}

/// Strategy for complete entries.
pub fn entry_strategy() -> impl Strategy<Value = Entry> {
    (timestamp_strategy(), category_strategy(), text_strategy())
        .prop_map(|(timestamp, category, text)| Entry::new(timestamp, category, text))
}

/// Strategy for a write plan: distinct nanosecond offsets, each paired with
/// one of a handful of categories, in arbitrary order.
pub fn write_plan_strategy(max_writes: usize) -> impl Strategy<Value = Vec<(i64, String)>> {
    prop::collection::hash_set(0i64..1_000_000_000, 1..=max_writes.max(1))
        .prop_flat_map(|stamps| {
            let stamps: Vec<i64> = stamps.into_iter().collect();
            let len = stamps.len();
            (
                Just(stamps),
                prop::collection::vec(prop::sample::select(vec!["work", "home", "books"]), len),
            )
        })
        .prop_map(|(stamps, categories)| {
            stamps
                .into_iter()
                .zip(categories)
                .map(|(nanos, category)| (nanos, category.to_string()))
                .collect()
        })
        .prop_shuffle()
}

#[cfg(test)]
mod tests {
    use super::*;
    use captainlog_codec::KEY_LEN;

    proptest! {
        #[test]
        fn generated_timestamps_have_fixed_width_keys(ts in timestamp_strategy()) {
            prop_assert_eq!(ts.to_key_string().len(), KEY_LEN);
        }

        #[test]
        fn generated_categories_are_nonempty(name in category_strategy()) {
            prop_assert!(!name.is_empty());
            prop_assert!(name.len() <= 32);
        }

        #[test]
        fn write_plans_have_distinct_stamps(plan in write_plan_strategy(10)) {
            let mut stamps: Vec<i64> = plan.iter().map(|(n, _)| *n).collect();
            let len = stamps.len();
            stamps.sort_unstable();
            stamps.dedup();
            prop_assert_eq!(stamps.len(), len);
        }
    }
}
