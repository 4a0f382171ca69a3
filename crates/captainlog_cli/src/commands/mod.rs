//! CLI command implementations.

pub mod categories;
pub mod read;
pub mod write;
