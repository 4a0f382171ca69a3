//! Test fixtures and store helpers.
//!
//! Provides temporary stores and a controllable clock so tests can decide
//! exactly which timestamp each write receives.

use captainlog_codec::Timestamp;
use captainlog_core::{Clock, LogStore, StoreConfig};
use chrono::TimeDelta;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// A clock that only moves when told to.
///
/// Starts at the Unix epoch. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Timestamp>>,
}

impl ManualClock {
    /// Creates a clock set to `start`.
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    /// Sets the current time.
    pub fn set(&self, timestamp: Timestamp) {
        *self.now.lock().expect("clock lock poisoned") = timestamp;
    }

    /// Sets the current time in nanoseconds since the epoch.
    pub fn set_nanos(&self, nanos: i64) {
        self.set(Timestamp::from_unix_nanos(nanos).expect("nanos out of range"));
    }

    /// Moves the clock forward by `delta` and returns the new time.
    pub fn advance(&self, delta: TimeDelta) -> Timestamp {
        let mut now = self.now.lock().expect("clock lock poisoned");
        *now = now.checked_add(delta).expect("clock advanced out of range");
        *now
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Timestamp::from_unix_nanos(0).expect("epoch is in range"))
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.now.lock().expect("clock lock poisoned")
    }
}

/// A log store in a temporary directory, driven by a [`ManualClock`].
pub struct TestStore {
    /// The store instance.
    pub store: LogStore,
    /// The clock stamping new entries.
    pub clock: ManualClock,
    /// The temporary directory (kept alive to prevent cleanup).
    _temp_dir: TempDir,
}

impl TestStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let clock = ManualClock::default();
        let store = LogStore::open_with_clock(Self::config_in(temp_dir.path()), clock.clone())
            .expect("Failed to open store");
        Self {
            store,
            clock,
            _temp_dir: temp_dir,
        }
    }

    /// Returns the store file path.
    pub fn path(&self) -> PathBuf {
        self.store.path().to_path_buf()
    }

    /// Writes `text` to `category` at `nanos` since the epoch.
    pub fn write_at(&self, nanos: i64, category: &str, text: &str) {
        self.clock.set_nanos(nanos);
        self.store
            .write(category, text)
            .expect("Failed to write entry");
    }

    /// Closes and reopens the store on the same file, keeping the clock.
    pub fn reopen(self) -> Self {
        let Self {
            store,
            clock,
            _temp_dir: temp_dir,
        } = self;
        drop(store);
        let store = LogStore::open_with_clock(Self::config_in(temp_dir.path()), clock.clone())
            .expect("Failed to reopen store");
        Self {
            store,
            clock,
            _temp_dir: temp_dir,
        }
    }

    fn config_in(dir: &Path) -> StoreConfig {
        StoreConfig::new(dir.join("captainlog.redb"))
    }
}

impl Default for TestStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Deref for TestStore {
    type Target = LogStore;

    fn deref(&self) -> &Self::Target {
        &self.store
    }
}

/// Runs a test with a temporary store.
///
/// # Example
///
/// ```rust
/// use captainlog_testkit::with_temp_store;
///
/// with_temp_store(|store| {
///     store.write_at(1, "work", "started sprint");
///     assert_eq!(store.read_category("work").unwrap().len(), 1);
/// });
/// ```
pub fn with_temp_store<F, R>(f: F) -> R
where
    F: FnOnce(&TestStore) -> R,
{
    let store = TestStore::new();
    f(&store)
}

/// Test scenario helpers.
pub mod scenarios {
    use super::*;

    /// The three-entry work/home scenario: `work` at 1s, `home` at 2s,
    /// `work` at 3s.
    pub fn sprint_week() -> TestStore {
        let store = TestStore::new();
        store.write_at(1_000_000_000, "work", "started sprint");
        store.write_at(2_000_000_000, "home", "fixed sink");
        store.write_at(3_000_000_000, "work", "finished sprint");
        store
    }

    /// A store with `per_category` entries in each of `categories`
    /// categories, written round-robin one nanosecond apart.
    pub fn round_robin(categories: usize, per_category: usize) -> TestStore {
        let store = TestStore::new();
        let mut nanos = 0i64;
        for i in 0..per_category {
            for c in 0..categories {
                nanos += 1;
                store.write_at(nanos, &format!("category_{c}"), &format!("entry {i}"));
            }
        }
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_is_shared_between_clones() {
        let clock = ManualClock::default();
        let other = clock.clone();
        clock.set_nanos(42);
        assert_eq!(other.now(), Timestamp::from_unix_nanos(42).unwrap());
    }

    #[test]
    fn manual_clock_advances() {
        let clock = ManualClock::default();
        let later = clock.advance(TimeDelta::milliseconds(5));
        assert_eq!(later, Timestamp::from_unix_nanos(5_000_000).unwrap());
        assert_eq!(clock.now(), later);
    }

    #[test]
    fn test_store_writes_with_clock() {
        with_temp_store(|store| {
            store.write_at(7, "work", "x");
            let entries = store.read_category("work").unwrap();
            assert_eq!(entries[0].timestamp, Timestamp::from_unix_nanos(7).unwrap());
        });
    }

    #[test]
    fn reopen_keeps_file() {
        let store = TestStore::new();
        let path = store.path();
        store.write_at(1, "work", "x");
        let store = store.reopen();
        assert_eq!(store.path(), path);
        assert_eq!(store.read_category("work").unwrap().len(), 1);
    }

    #[test]
    fn round_robin_scenario() {
        let store = scenarios::round_robin(3, 4);
        assert_eq!(store.categories().unwrap().len(), 3);
        assert_eq!(store.read_all().unwrap().len(), 12);
    }
}
