//! Per-category entry namespaces.

use crate::error::{CoreError, CoreResult};
use crate::layout::namespace_table;
use captainlog_codec::{decode, Entry, EntryKey};
use redb::{ReadTransaction, ReadableTable, Table, TableError, WriteTransaction};
use tracing::{debug, warn};

/// An ordered `key -> encoded entry` table holding one category.
///
/// Wraps either a writable [`Table`] (inside a write transaction) or a
/// read-only table (inside a read transaction). Scans always run in key
/// order, which is chronological order.
pub struct CategoryStore<'c, T> {
    category: &'c str,
    table: T,
}

impl<'c, 'txn> CategoryStore<'c, Table<'txn, &'static [u8], &'static [u8]>> {
    /// Opens the namespace table `namespace` for writing, creating it if missing.
    pub fn open_or_create(
        txn: &'txn WriteTransaction,
        category: &'c str,
        namespace: &str,
    ) -> CoreResult<Self> {
        let table = txn
            .open_table(namespace_table(namespace))
            .map_err(|e| CoreError::storage(format!("open category '{category}'"), e))?;
        Ok(Self { category, table })
    }

    /// Stores `value` under `key`. An existing value with the same key is
    /// replaced.
    pub fn insert(&mut self, key: &EntryKey, value: &[u8]) -> CoreResult<()> {
        let previous = self
            .table
            .insert(key.as_bytes(), value)
            .map_err(|e| CoreError::storage(format!("write to category '{}'", self.category), e))?;
        if previous.is_some() {
            debug!(category = %self.category, key = %key, "replaced entry with identical timestamp");
        }
        Ok(())
    }
}

impl<'c> CategoryStore<'c, redb::ReadOnlyTable<&'static [u8], &'static [u8]>> {
    /// Opens an existing namespace table for reading.
    ///
    /// A namespace registered in the root table but absent on disk is
    /// reported as [`CoreError::CategoryNotFound`].
    pub fn open_read(txn: &ReadTransaction, category: &'c str, namespace: &str) -> CoreResult<Self> {
        match txn.open_table(namespace_table(namespace)) {
            Ok(table) => Ok(Self { category, table }),
            Err(TableError::TableDoesNotExist(_)) => {
                warn!(category, namespace, "registered category has no namespace table");
                Err(CoreError::category_not_found(category))
            }
            Err(e) => Err(CoreError::storage(format!("open category '{category}'"), e)),
        }
    }
}

impl<'c, T> CategoryStore<'c, T>
where
    T: ReadableTable<&'static [u8], &'static [u8]>,
{
    /// Returns the category name.
    #[must_use]
    pub fn category(&self) -> &str {
        self.category
    }

    /// Returns the number of stored entries, decodable or not.
    pub fn len(&self) -> CoreResult<u64> {
        self.table
            .len()
            .map_err(|e| CoreError::storage(format!("count category '{}'", self.category), e))
    }

    /// Returns true if the namespace holds no entries.
    pub fn is_empty(&self) -> CoreResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Decodes every entry in key order, appending them to `out`.
    ///
    /// Values that fail to decode, or that claim a different category, are
    /// logged and skipped. Returns the number of skipped values.
    pub fn scan_into(&self, out: &mut Vec<Entry>) -> CoreResult<usize> {
        let context = || format!("scan category '{}'", self.category);
        let mut skipped = 0;

        for item in self.table.iter().map_err(|e| CoreError::storage(context(), e))? {
            let (key, value) = item.map_err(|e| CoreError::storage(context(), e))?;
            match decode(value.value()) {
                Ok(entry) if entry.category == self.category => out.push(entry),
                Ok(entry) => {
                    skipped += 1;
                    warn!(
                        category = %self.category,
                        key = %String::from_utf8_lossy(key.value()),
                        found = %entry.category,
                        "skipping entry stored under the wrong category"
                    );
                }
                Err(err) => {
                    skipped += 1;
                    warn!(
                        category = %self.category,
                        key = %String::from_utf8_lossy(key.value()),
                        error = %err,
                        "skipping undecodable entry"
                    );
                }
            }
        }

        Ok(skipped)
    }

    /// Decodes every entry in key order.
    pub fn scan(&self) -> CoreResult<Vec<Entry>> {
        let mut entries = Vec::new();
        self.scan_into(&mut entries)?;
        Ok(entries)
    }
}
