//! Bencode decoding ([BEP-3]).
//!
//! Bencode is the serialization format used throughout BitTorrent for storing
//! and transmitting structured data, including `.torrent` files and tracker
//! responses.
//!
//! # Data Types
//!
//! Bencode supports four data types:
//!
//! | Type | Format | Example |
//! |------|--------|---------|
//! | Integer | `i<number>e` | `i42e` → 42 |
//! | Byte String | `<length>:<data>` | `4:spam` → "spam" |
//! | List | `l<items>e` | `l4:spami42ee` → ["spam", 42] |
//! | Dictionary | `d<key><value>...e` | `d3:foo3:bare` → {"foo": "bar"} |
//!
//! # Examples
//!
//! ```
//! use bentorrent::bencode::{decode, Value};
//!
//! // Decode an integer
//! let value = decode(b"i42e").unwrap();
//! assert_eq!(value.as_integer(), Some(42));
//!
//! // Decode a string
//! let value = decode(b"4:spam").unwrap();
//! assert_eq!(value.as_str(), Some("spam"));
//!
//! // Decode a list
//! let value = decode(b"l4:spami42ee").unwrap();
//! let list = value.as_list().unwrap();
//! assert_eq!(list.len(), 2);
//!
//! // Decode a dictionary
//! let value = decode(b"d3:foo3:bare").unwrap();
//! let foo = value.get(b"foo").unwrap();
//! assert_eq!(foo.as_str(), Some("bar"));
//! ```
//!
//! # Leniency
//!
//! The decoder accepts `i-0e`, does not require dictionary keys to be sorted,
//! and ignores bytes after the first complete value. It does reject duplicate
//! dictionary keys.
//!
//! # Error Handling
//!
//! Every grammar violation is a [`BencodeError::MalformedInput`] carrying the
//! byte offset and a [`Malformed`] cause. Asking a [`Value`] for the wrong
//! variant through one of the `try_*` accessors is a
//! [`BencodeError::TypeMismatch`].
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html

mod decode;
mod error;
mod value;

pub use decode::{decode, Decoder, DEFAULT_MAX_DEPTH};
pub use error::{BencodeError, Malformed};
pub use value::{Dict, Value, ValueKind};

#[cfg(test)]
mod tests;
