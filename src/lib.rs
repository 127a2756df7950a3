//! bentorrent - Bencode decoding and torrent metainfo extraction
//!
//! # Modules
//!
//! - [`bencode`] - BEP-3 Bencode decoding into a typed [`Value`] tree
//! - [`metainfo`] - BEP-3 torrent metainfo read from a decoded tree

pub mod bencode;
pub mod metainfo;

pub use bencode::{decode, BencodeError, Decoder, Dict, Malformed, Value, ValueKind};
pub use metainfo::{File, Info, Metainfo, MetainfoError};
