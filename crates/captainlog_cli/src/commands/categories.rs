//! Categories command implementation.

use captainlog_core::LogStore;
use std::io::Write;

/// Runs the categories command, printing each category and its entry count.
pub fn run(store: &LogStore, out: &mut impl Write) -> Result<(), Box<dyn std::error::Error>> {
    let categories = store.categories()?;
    if categories.is_empty() {
        writeln!(out, "no categories yet")?;
        return Ok(());
    }

    let width = categories
        .iter()
        .map(|c| c.chars().count())
        .max()
        .unwrap_or(0);
    for category in &categories {
        let count = store.count(category)?;
        writeln!(out, "{category:<width$}    {count}")?;
    }
    Ok(())
}
