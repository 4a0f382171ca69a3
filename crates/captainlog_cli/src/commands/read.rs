//! Read command implementations.

use crate::render;
use captainlog_core::{CoreError, Entry, LogStore};
use chrono::Local;
use clap::ValueEnum;
use std::io::Write;

/// How entries are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned columns in local time
    Text,
    /// A JSON array of entries
    Json,
}

/// Runs the read command for a single category.
///
/// A category that was never written to is reported on `out` rather than
/// treated as a failure.
pub fn run(
    store: &LogStore,
    category: &str,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let entries = match store.read_category(category) {
        Ok(entries) => entries,
        Err(CoreError::CategoryNotFound { name }) => {
            writeln!(out, "no entries in category '{name}'")?;
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };
    print_entries(&entries, false, format, out)
}

/// Runs the read-all command.
pub fn run_all(
    store: &LogStore,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let entries = store.read_all()?;
    print_entries(&entries, true, format, out)
}

fn print_entries(
    entries: &[Entry],
    with_category: bool,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => writeln!(out, "{}", render::json(entries)?)?,
        OutputFormat::Text => write!(out, "{}", render::table(entries, with_category, &Local))?,
    }
    Ok(())
}
