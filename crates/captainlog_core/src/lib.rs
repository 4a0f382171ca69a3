//! # Captain's Log Core
//!
//! The storage layer of Captain's Log: a durable, category-partitioned log
//! of short timestamped text entries.
//!
//! This crate provides:
//! - [`LogStore`], the store facade (`open`, `write`, `read_category`, `read_all`)
//! - [`CategoryStore`], an ordered per-category entry namespace
//! - The on-disk [`layout`] of namespaces inside a single redb file
//! - [`StoreConfig`] and the [`Clock`] seam used to stamp new entries
//!
//! Entries are keyed by their timestamp in a fixed-width, sortable form, so
//! a key-ordered scan of a category yields its entries oldest first.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod category;
mod clock;
mod config;
mod error;
pub mod layout;
mod store;

pub use captainlog_codec::{Entry, EntryKey, Timestamp};
pub use category::CategoryStore;
pub use clock::{Clock, SystemClock};
pub use config::{StoreConfig, DEFAULT_FILE_NAME};
pub use error::{CoreError, CoreResult};
pub use store::LogStore;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
