//! Error types for the log store.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in log store operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The backing database could not be opened, read or written.
    #[error("storage unavailable ({context}): {source}")]
    StorageUnavailable {
        /// The operation (and category, if any) that failed.
        context: String,
        /// The underlying storage engine error.
        #[source]
        source: redb::Error,
    },

    /// No entry was ever written to the category.
    #[error("category not found: {name}")]
    CategoryNotFound {
        /// Name of the category.
        name: String,
    },

    /// The root entries namespace is missing from the store.
    #[error("store is not initialized: entries namespace missing")]
    StoreUninitialized,

    /// A category name cannot be used as a namespace.
    #[error("invalid category '{name}': {reason}")]
    InvalidCategory {
        /// The rejected name.
        name: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The store was created by an incompatible version.
    #[error("incompatible store format: found version {found}, supported up to {supported}")]
    IncompatibleFormat {
        /// Version recorded in the store.
        found: u16,
        /// Highest version this build understands.
        supported: u16,
    },

    /// Store metadata is present but unreadable.
    #[error("corrupt store: {reason}")]
    CorruptStore {
        /// What could not be read.
        reason: String,
    },

    /// Entry codec error.
    #[error("codec error: {0}")]
    Codec(#[from] captainlog_codec::CodecError),

    /// The user's home directory could not be determined.
    #[error("unable to determine home directory")]
    NoHomeDirectory,
}

impl CoreError {
    /// Wraps a storage engine error with the operation that failed.
    pub fn storage(context: impl Into<String>, source: impl Into<redb::Error>) -> Self {
        Self::StorageUnavailable {
            context: context.into(),
            source: source.into(),
        }
    }

    /// Wraps a filesystem error raised while preparing the store file.
    pub fn filesystem(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::storage(context, redb::StorageError::Io(source))
    }

    /// Creates a category not found error.
    pub fn category_not_found(name: impl Into<String>) -> Self {
        Self::CategoryNotFound { name: name.into() }
    }

    /// Creates an invalid category error.
    pub fn invalid_category(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidCategory {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Creates a corrupt store error.
    pub fn corrupt(reason: impl Into<String>) -> Self {
        Self::CorruptStore {
            reason: reason.into(),
        }
    }

    /// Returns true if this error means "nothing written here yet".
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::CategoryNotFound { .. })
    }
}
