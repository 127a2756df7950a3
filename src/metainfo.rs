//! Torrent metainfo extraction ([BEP-3]).
//!
//! Reads the fields of a `.torrent` file out of a decoded bencode tree. No
//! parsing happens here beyond key lookups; all grammar checks belong to
//! [`crate::bencode`].
//!
//! # Example
//!
//! ```
//! use bentorrent::metainfo::Metainfo;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = b"d4:infod5:filesld6:lengthi3e4:pathl1:a1:beed6:lengthi4e4:pathl1:ceee\
//!              4:name3:dir12:piece lengthi16e6:pieces0:ee";
//! let torrent = Metainfo::from_bytes(data)?;
//!
//! for file in &torrent.info.files {
//!     println!("{} ({} bytes)", file.path, file.length);
//! }
//! assert_eq!(torrent.total_size(), 7);
//! # Ok(())
//! # }
//! ```
//!
//! # Torrent Structure
//!
//! - **info** - Core torrent metadata (required)
//!   - `name` - Suggested file/directory name
//!   - `piece length` - Size of each piece in bytes (required)
//!   - `pieces` - Concatenated SHA1 hashes of each piece (required)
//!   - `length` - Total size (single-file) OR `files` list (multi-file)
//!   - `private` - Restricts peer discovery to the listed trackers
//! - **announce** - Primary tracker URL
//! - **announce-list** - Additional tracker tiers (BEP-12)
//! - **creation date** - Unix timestamp when created
//! - **comment** - Optional comment
//! - **created by** - Client that created the torrent
//!
//! Malformed entries in a multi-file `files` list are skipped, not reported.
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html

mod error;
mod torrent;

pub use error::MetainfoError;
pub use torrent::{File, Info, Metainfo, PIECE_HASH_LEN};
