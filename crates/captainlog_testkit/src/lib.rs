//! # Captain's Log Testkit
//!
//! Test utilities for Captain's Log.
//!
//! This crate provides:
//! - Temporary stores driven by a controllable clock
//! - Canned write scenarios
//! - Property-based test generators using proptest
//!
//! ## Usage
//!
//! ```rust
//! use captainlog_testkit::prelude::*;
//!
//! let store = scenarios::sprint_week();
//! let texts: Vec<String> = store
//!     .read_category("work")
//!     .unwrap()
//!     .into_iter()
//!     .map(|e| e.text)
//!     .collect();
//! assert_eq!(texts, ["started sprint", "finished sprint"]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
}

pub use fixtures::*;
pub use generators::*;
