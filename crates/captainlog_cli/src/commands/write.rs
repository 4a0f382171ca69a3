//! Write command implementation.

use captainlog_core::{CoreResult, LogStore};
use tracing::debug;

/// Runs the write command.
///
/// Empty text writes nothing and succeeds.
pub fn run(store: &LogStore, category: &str, text: &str) -> CoreResult<()> {
    match store.write(category, text)? {
        Some(entry) => debug!(category, key = %entry.key(), "entry written"),
        None => debug!(category, "nothing to write"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use captainlog_testkit::TestStore;

    #[test]
    fn writes_entry() {
        let store = TestStore::new();
        store.clock.set_nanos(1_000);

        run(&store, "work", "started sprint").unwrap();
        let entries = store.read_category("work").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "started sprint");
    }

    #[test]
    fn empty_text_succeeds_without_writing() {
        let store = TestStore::new();

        run(&store, "work", "").unwrap();
        assert!(store.categories().unwrap().is_empty());
    }
}
