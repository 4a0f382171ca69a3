//! # Captain's Log Codec
//!
//! Entry encoding and key derivation for Captain's Log.
//!
//! This crate owns the byte-level representation of a log entry:
//! - [`encode`] / [`decode`] turn an [`Entry`] into a versioned CBOR map and back
//! - [`derive_key`] maps a [`Timestamp`] to a fixed-width [`EntryKey`]
//!
//! ## Key Ordering
//!
//! Keys are UTC timestamps rendered as `YYYY-MM-DDTHH:MM:SS.nnnnnnnnnZ`.
//! Every field is zero-padded and the offset is always `Z`, so sorting keys
//! bytewise sorts entries chronologically. Storage layers can stream a
//! category in time order simply by scanning its keys.
//!
//! ## Usage
//!
//! ```
//! use captainlog_codec::{decode, derive_key, encode, Entry, Timestamp};
//!
//! let entry = Entry::new(Timestamp::now(), "work", "started sprint");
//! let bytes = encode(&entry).unwrap();
//! assert_eq!(decode(&bytes).unwrap(), entry);
//! assert_eq!(derive_key(&entry.timestamp), entry.key());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod entry;
mod error;
mod key;
mod timestamp;

pub use entry::{decode, encode, Entry, FORMAT_VERSION};
pub use error::{CodecError, CodecResult};
pub use key::{derive_key, EntryKey};
pub use timestamp::{Timestamp, KEY_LEN};

/// Trait for types that can be encoded to their stored byte form.
pub trait Encode {
    /// Encode this value to bytes.
    fn encode(&self) -> CodecResult<Vec<u8>>;
}

/// Trait for types that can be decoded from their stored byte form.
pub trait Decode: Sized {
    /// Decode this value from bytes.
    fn decode(bytes: &[u8]) -> CodecResult<Self>;
}
