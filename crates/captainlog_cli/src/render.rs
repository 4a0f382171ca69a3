//! Output formatting for entries.

use captainlog_core::Entry;
use chrono::TimeZone;
use std::fmt::Display;

/// Display format for timestamps, e.g. `Mar  1 09:15:42`.
const STAMP_FORMAT: &str = "%b %e %H:%M:%S";

/// Spaces between table columns.
const COLUMN_GAP: usize = 4;

/// Renders entries as an aligned text table.
///
/// Timestamps are shown in `tz`. The category column is included only when
/// `with_category` is set.
pub fn table<Tz>(entries: &[Entry], with_category: bool, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut rows: Vec<Vec<String>> = Vec::with_capacity(entries.len() + 1);

    let mut header = vec!["timestamp".to_string(), "entry".to_string()];
    if with_category {
        header.push("category".to_string());
    }
    rows.push(header);

    for entry in entries {
        let stamp = entry
            .timestamp
            .as_datetime()
            .with_timezone(tz)
            .format(STAMP_FORMAT)
            .to_string();
        let mut row = vec![stamp, entry.text.clone()];
        if with_category {
            row.push(entry.category.clone());
        }
        rows.push(row);
    }

    let columns = rows[0].len();
    let widths: Vec<usize> = (0..columns)
        .map(|col| {
            rows.iter()
                .map(|row| row[col].chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    for row in &rows {
        let mut line = String::new();
        for (cell, width) in row.iter().zip(&widths) {
            line.push_str(cell);
            let pad = width - cell.chars().count() + COLUMN_GAP;
            line.extend(std::iter::repeat(' ').take(pad));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Renders entries as a JSON array.
pub fn json(entries: &[Entry]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(entries)
}
