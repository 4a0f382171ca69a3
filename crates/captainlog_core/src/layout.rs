//! On-disk namespace layout.
//!
//! A store is a single redb file holding these tables:
//!
//! ```text
//! config              &str  -> &[u8]   store metadata (format_version)
//! entries             &str  -> &str    category name -> namespace table name
//! categorized         &[u8] -> &[u8]   reserved
//! entries/<category>  &[u8] -> &[u8]   entry key -> encoded entry, one per category
//! ```
//!
//! redb tables cannot nest, so the two-level hierarchy is expressed by the
//! `entries` table acting as the parent: a category exists exactly when it is
//! registered there, and its entries live in the table it points to.

use crate::error::{CoreError, CoreResult};
use redb::TableDefinition;

/// Store metadata. Holds [`FORMAT_VERSION_KEY`].
pub const CONFIG: TableDefinition<&str, &[u8]> = TableDefinition::new("config");

/// Root namespace: category name to namespace table name.
pub const ENTRIES: TableDefinition<&str, &str> = TableDefinition::new("entries");

/// Reserved for a future categorization index.
pub const CATEGORIZED: TableDefinition<&[u8], &[u8]> = TableDefinition::new("categorized");

/// Key in [`CONFIG`] holding the store format version (big-endian `u16`).
pub const FORMAT_VERSION_KEY: &str = "format_version";

/// Store format version written by this build.
pub const STORE_FORMAT_VERSION: u16 = 1;

/// Longest accepted category name, in bytes.
pub const MAX_CATEGORY_LEN: usize = 128;

const NAMESPACE_PREFIX: &str = "entries/";

/// Definition of a per-category namespace table.
pub type NamespaceTable<'a> = TableDefinition<'a, &'static [u8], &'static [u8]>;

/// Returns the table name holding `category`'s entries.
#[must_use]
pub fn namespace_name(category: &str) -> String {
    format!("{NAMESPACE_PREFIX}{category}")
}

/// Returns the table definition for a namespace table name.
#[must_use]
pub fn namespace_table(name: &str) -> NamespaceTable<'_> {
    TableDefinition::new(name)
}

/// Checks that `name` is usable as a category.
///
/// # Errors
///
/// Returns [`CoreError::InvalidCategory`] if the name is empty, longer than
/// [`MAX_CATEGORY_LEN`] bytes, has surrounding whitespace or contains
/// control characters.
pub fn validate_category(name: &str) -> CoreResult<()> {
    if name.is_empty() {
        return Err(CoreError::invalid_category(name, "must not be empty"));
    }
    if name.len() > MAX_CATEGORY_LEN {
        return Err(CoreError::invalid_category(
            name,
            format!("longer than {MAX_CATEGORY_LEN} bytes"),
        ));
    }
    if name.trim() != name {
        return Err(CoreError::invalid_category(
            name,
            "leading or trailing whitespace",
        ));
    }
    if name.chars().any(char::is_control) {
        return Err(CoreError::invalid_category(name, "contains control characters"));
    }
    Ok(())
}

/// Decodes the stored format version.
pub(crate) fn decode_format_version(bytes: &[u8]) -> Option<u16> {
    <[u8; 2]>::try_from(bytes).ok().map(u16::from_be_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespace_names_are_prefixed() {
        assert_eq!(namespace_name("work"), "entries/work");
        assert_ne!(namespace_name("config"), "config");
        assert_ne!(namespace_name("entries"), "entries");
    }

    #[test]
    fn accepts_ordinary_names() {
        for name in ["default", "work", "home-improvement", "reading list", "日記"] {
            assert!(validate_category(name).is_ok(), "{name} rejected");
        }
    }

    #[test]
    fn rejects_bad_names() {
        let long = "x".repeat(MAX_CATEGORY_LEN + 1);
        for name in ["", " work", "work ", "a\nb", "tab\there", long.as_str()] {
            assert!(
                matches!(
                    validate_category(name),
                    Err(CoreError::InvalidCategory { .. })
                ),
                "{name:?} accepted"
            );
        }
    }

    #[test]
    fn max_length_is_inclusive() {
        assert!(validate_category(&"x".repeat(MAX_CATEGORY_LEN)).is_ok());
    }

    #[test]
    fn format_version_bytes() {
        let bytes = STORE_FORMAT_VERSION.to_be_bytes();
        assert_eq!(decode_format_version(&bytes), Some(STORE_FORMAT_VERSION));
        assert_eq!(decode_format_version(&[1, 2, 3]), None);
    }
}
