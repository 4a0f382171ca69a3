//! The log store facade.

use crate::category::CategoryStore;
use crate::clock::{Clock, SystemClock};
use crate::config::StoreConfig;
use crate::error::{CoreError, CoreResult};
use crate::layout::{
    self, decode_format_version, CATEGORIZED, CONFIG, ENTRIES, FORMAT_VERSION_KEY,
    STORE_FORMAT_VERSION,
};
use captainlog_codec::{encode, Entry};
use redb::{Database, ReadOnlyTable, ReadTransaction, ReadableTable, TableError};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// A durable, category-partitioned log of timestamped text entries.
///
/// `LogStore` owns the database handle. It is constructed once and shared by
/// reference; every operation runs in a single storage transaction, so the
/// engine's single-writer / snapshot-reader semantics are the only locking.
///
/// # Example
///
/// ```rust,no_run
/// use captainlog_core::{LogStore, StoreConfig};
///
/// let store = LogStore::open(StoreConfig::new("captainlog.redb"))?;
/// store.write("work", "started sprint")?;
/// for entry in store.read_category("work")? {
///     println!("{} {}", entry.timestamp, entry.text);
/// }
/// # Ok::<(), captainlog_core::CoreError>(())
/// ```
pub struct LogStore {
    db: Database,
    path: PathBuf,
    clock: Box<dyn Clock>,
}

impl std::fmt::Debug for LogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogStore").field("path", &self.path).finish_non_exhaustive()
    }
}

impl LogStore {
    /// Opens or creates the store described by `config`, stamping entries
    /// with wall-clock time.
    ///
    /// # Errors
    ///
    /// - [`CoreError::StorageUnavailable`] if the file cannot be created,
    ///   opened or locked
    /// - [`CoreError::IncompatibleFormat`] if the file was written by a newer
    ///   store format
    /// - [`CoreError::CorruptStore`] if the stored format version is unreadable
    pub fn open(config: StoreConfig) -> CoreResult<Self> {
        Self::open_with_clock(config, SystemClock)
    }

    /// Opens the store at the per-user default location.
    ///
    /// # Errors
    ///
    /// As [`LogStore::open`], plus [`CoreError::NoHomeDirectory`].
    pub fn open_default() -> CoreResult<Self> {
        Self::open(StoreConfig::default_location()?)
    }

    /// Opens or creates a store that takes entry timestamps from `clock`.
    ///
    /// # Errors
    ///
    /// As [`LogStore::open`].
    #[instrument(skip(config, clock), fields(path = %config.path.display()))]
    pub fn open_with_clock(config: StoreConfig, clock: impl Clock + 'static) -> CoreResult<Self> {
        if config.create_dirs {
            if let Some(parent) = config.path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)
                        .map_err(|e| CoreError::filesystem("create store directory", e))?;
                }
            }
        }

        let existed = config.path.exists();
        let db = Database::create(&config.path).map_err(|e| CoreError::storage("open store", e))?;
        if !existed {
            restrict_permissions(&config.path)?;
        }

        let store = Self {
            db,
            path: config.path,
            clock: Box::new(clock),
        };
        store.init()?;

        info!(created = !existed, "opened log store");
        Ok(store)
    }

    /// Ensures the top-level namespaces exist and checks the format version.
    ///
    /// Idempotent: tables that already exist are left untouched.
    fn init(&self) -> CoreResult<()> {
        let txn = self
            .db
            .begin_write()
            .map_err(|e| CoreError::storage("initialize store", e))?;

        {
            let mut config = txn
                .open_table(CONFIG)
                .map_err(|e| CoreError::storage("initialize config namespace", e))?;
            txn.open_table(ENTRIES)
                .map_err(|e| CoreError::storage("initialize entries namespace", e))?;
            txn.open_table(CATEGORIZED)
                .map_err(|e| CoreError::storage("initialize categorized namespace", e))?;

            let stored = config
                .get(FORMAT_VERSION_KEY)
                .map_err(|e| CoreError::storage("read format version", e))?
                .map(|guard| guard.value().to_vec());

            match stored {
                Some(bytes) => {
                    let found = decode_format_version(&bytes).ok_or_else(|| {
                        CoreError::corrupt(format!(
                            "format version is {} bytes, expected 2",
                            bytes.len()
                        ))
                    })?;
                    if found > STORE_FORMAT_VERSION {
                        return Err(CoreError::IncompatibleFormat {
                            found,
                            supported: STORE_FORMAT_VERSION,
                        });
                    }
                }
                None => {
                    config
                        .insert(FORMAT_VERSION_KEY, STORE_FORMAT_VERSION.to_be_bytes().as_slice())
                        .map_err(|e| CoreError::storage("write format version", e))?;
                }
            }
        }

        txn.commit()
            .map_err(|e| CoreError::storage("initialize store", e))?;
        debug!("initialized store namespaces");
        Ok(())
    }

    /// Returns the path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `text` to `category`, stamped with the current time.
    ///
    /// Empty `text` is a no-op that returns `Ok(None)`. Otherwise the
    /// category is created if needed and the entry stored, all in one
    /// transaction, and the written entry is returned. An entry with an
    /// identical timestamp in the same category is replaced.
    ///
    /// # Errors
    ///
    /// - [`CoreError::InvalidCategory`] if `category` is not a valid name
    /// - [`CoreError::Codec`] if the entry cannot be encoded
    /// - [`CoreError::StorageUnavailable`] if the write fails
    pub fn write(&self, category: &str, text: &str) -> CoreResult<Option<Entry>> {
        if text.is_empty() {
            debug!(category, "ignoring empty entry");
            return Ok(None);
        }
        layout::validate_category(category)?;

        let entry = Entry::new(self.clock.now(), category, text);
        let key = entry.key();
        let value = encode(&entry)?;

        let context = || format!("write to category '{category}'");
        let txn = self
            .db
            .begin_write()
            .map_err(|e| CoreError::storage(context(), e))?;

        {
            let mut root = txn
                .open_table(ENTRIES)
                .map_err(|e| CoreError::storage(context(), e))?;
            let existing = root
                .get(category)
                .map_err(|e| CoreError::storage(context(), e))?
                .map(|guard| guard.value().to_string());

            let namespace = match existing {
                Some(namespace) => namespace,
                None => {
                    let namespace = layout::namespace_name(category);
                    root.insert(category, namespace.as_str())
                        .map_err(|e| CoreError::storage(context(), e))?;
                    debug!(category, namespace = %namespace, "created category");
                    namespace
                }
            };

            let mut table = CategoryStore::open_or_create(&txn, category, &namespace)?;
            table.insert(&key, &value)?;
        }

        txn.commit().map_err(|e| CoreError::storage(context(), e))?;
        debug!(category, key = %key, bytes = value.len(), "wrote entry");
        Ok(Some(entry))
    }

    /// Returns every entry in `category`, oldest first.
    ///
    /// Entries that fail to decode are logged and skipped.
    ///
    /// # Errors
    ///
    /// - [`CoreError::CategoryNotFound`] if nothing was ever written there
    /// - [`CoreError::StoreUninitialized`] if the root namespace is missing
    /// - [`CoreError::StorageUnavailable`] if the read fails
    pub fn read_category(&self, category: &str) -> CoreResult<Vec<Entry>> {
        let txn = self.begin_read(category)?;
        let table = self.open_category(&txn, category)?;
        let entries = table.scan()?;
        debug!(category, count = entries.len(), "read category");
        Ok(entries)
    }

    /// Returns every entry in every category, oldest first.
    ///
    /// Entries with identical timestamps are ordered by category name. A
    /// registered category whose namespace table is missing is logged and
    /// skipped like an undecodable entry.
    ///
    /// # Errors
    ///
    /// - [`CoreError::StoreUninitialized`] if the root namespace is missing
    /// - [`CoreError::StorageUnavailable`] if the read fails
    pub fn read_all(&self) -> CoreResult<Vec<Entry>> {
        let txn = self.begin_read("*")?;
        let root = open_root(&txn)?;

        let mut entries = Vec::new();
        let mut skipped = 0;
        for item in root.iter().map_err(|e| CoreError::storage("list categories", e))? {
            let (category, namespace) =
                item.map_err(|e| CoreError::storage("list categories", e))?;
            let category = category.value();
            let table = match CategoryStore::open_read(&txn, category, namespace.value()) {
                Ok(table) => table,
                Err(CoreError::CategoryNotFound { .. }) => {
                    skipped += 1;
                    continue;
                }
                Err(err) => return Err(err),
            };
            skipped += table.scan_into(&mut entries)?;
        }

        entries.sort_by(|a, b| {
            a.timestamp
                .cmp(&b.timestamp)
                .then_with(|| a.category.cmp(&b.category))
        });
        debug!(count = entries.len(), skipped, "read all categories");
        Ok(entries)
    }

    /// Returns the names of all categories, in ascending byte order.
    ///
    /// # Errors
    ///
    /// - [`CoreError::StoreUninitialized`] if the root namespace is missing
    /// - [`CoreError::StorageUnavailable`] if the read fails
    pub fn categories(&self) -> CoreResult<Vec<String>> {
        let txn = self.begin_read("*")?;
        let root = open_root(&txn)?;

        let mut names = Vec::new();
        for item in root.iter().map_err(|e| CoreError::storage("list categories", e))? {
            let (category, _) = item.map_err(|e| CoreError::storage("list categories", e))?;
            names.push(category.value().to_string());
        }
        Ok(names)
    }

    /// Returns the number of entries stored in `category`.
    ///
    /// # Errors
    ///
    /// As [`LogStore::read_category`].
    pub fn count(&self, category: &str) -> CoreResult<usize> {
        let txn = self.begin_read(category)?;
        let table = self.open_category(&txn, category)?;
        let len = table.len()?;
        Ok(usize::try_from(len).unwrap_or(usize::MAX))
    }

    fn begin_read(&self, category: &str) -> CoreResult<ReadTransaction> {
        self.db
            .begin_read()
            .map_err(|e| CoreError::storage(format!("read category '{category}'"), e))
    }

    fn open_category<'c>(
        &self,
        txn: &ReadTransaction,
        category: &'c str,
    ) -> CoreResult<CategoryStore<'c, ReadOnlyTable<&'static [u8], &'static [u8]>>> {
        let root = open_root(txn)?;
        let namespace = root
            .get(category)
            .map_err(|e| CoreError::storage(format!("read category '{category}'"), e))?
            .map(|guard| guard.value().to_string())
            .ok_or_else(|| CoreError::category_not_found(category))?;
        CategoryStore::open_read(txn, category, &namespace)
    }
}

fn open_root(txn: &ReadTransaction) -> CoreResult<ReadOnlyTable<&'static str, &'static str>> {
    match txn.open_table(ENTRIES) {
        Ok(table) => Ok(table),
        Err(TableError::TableDoesNotExist(_)) => Err(CoreError::StoreUninitialized),
        Err(e) => Err(CoreError::storage("open entries namespace", e)),
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> CoreResult<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
        .map_err(|e| CoreError::filesystem("restrict store permissions", e))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> CoreResult<()> {
    Ok(())
}
