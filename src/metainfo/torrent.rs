use super::error::MetainfoError;
use crate::bencode::{decode, Dict, Value};
use bytes::Bytes;

/// Length in bytes of one SHA1 piece hash.
pub const PIECE_HASH_LEN: usize = 20;

/// A parsed torrent file.
///
/// Optional top-level fields that are absent (or of the wrong type) are left
/// at their defaults. Only the `info` dictionary and the fields it needs to
/// describe the content are required.
///
/// # Examples
///
/// ```
/// use bentorrent::metainfo::Metainfo;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let data = b"d8:announce3:foo4:infod6:lengthi10e4:name1:x\
///              12:piece lengthi5e6:pieces20:AAAAAAAAAAAAAAAAAAAAee";
/// let torrent = Metainfo::from_bytes(data)?;
///
/// assert_eq!(torrent.announce, "foo");
/// assert_eq!(torrent.info.name, "x");
/// assert_eq!(torrent.total_size(), 10);
/// assert!(torrent.is_single_file());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metainfo {
    /// The info dictionary containing file and piece information.
    pub info: Info,
    /// Primary tracker URL, empty when absent.
    pub announce: String,
    /// Multi-tier tracker list ([BEP-12](http://bittorrent.org/beps/bep_0012.html)).
    pub announce_list: Vec<Vec<String>>,
    /// Unix timestamp when the torrent was created.
    pub creation_date: Option<i64>,
    /// Optional comment about the torrent.
    pub comment: Option<String>,
    /// Name/version of the program that created the torrent.
    pub created_by: Option<String>,
}

/// The info dictionary from a torrent file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Info {
    /// Suggested name for the file or directory, empty when absent.
    pub name: String,
    /// Number of bytes per piece.
    pub piece_length: i64,
    /// One hash per piece, split out of the `pieces` string.
    pub pieces: Vec<Bytes>,
    /// Files in the torrent. A single-file torrent has exactly one entry.
    pub files: Vec<File>,
    /// Sum of the lengths of all files.
    pub total_size: i64,
    /// True when the torrent was described by `length` rather than `files`.
    pub single_file: bool,
    /// If true, clients should only use trackers in the metainfo (no DHT/PEX).
    pub private: bool,
}

/// A file within a torrent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    /// `/`-separated path relative to the torrent root. For single-file
    /// torrents this is the torrent name.
    pub path: String,
    /// Size of the file in bytes.
    pub length: i64,
}

impl Metainfo {
    /// Decodes and parses a torrent file from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The data is not valid bencode
    /// - The root value is not a dictionary
    /// - `info`, `piece length`, `pieces`, or both of `length`/`files` are
    ///   missing or of the wrong type
    pub fn from_bytes(data: &[u8]) -> Result<Self, MetainfoError> {
        let value = decode(data)?;
        Self::from_value(&value)
    }

    /// Extracts torrent metadata from an already decoded value.
    pub fn from_value(value: &Value) -> Result<Self, MetainfoError> {
        let dict = value.as_dict().ok_or(MetainfoError::InvalidRoot)?;

        let announce = text_field(dict, b"announce").unwrap_or_default();

        let announce_list = dict
            .get(b"announce-list".as_slice())
            .and_then(|v| v.as_list())
            .map(|list| {
                list.iter()
                    .filter_map(|tier| {
                        tier.as_list()
                            .map(|urls| urls.iter().filter_map(text).collect())
                    })
                    .collect()
            })
            .unwrap_or_default();

        let creation_date = dict
            .get(b"creation date".as_slice())
            .and_then(|v| v.as_integer());

        let comment = text_field(dict, b"comment");
        let created_by = text_field(dict, b"created by");

        let info_value = dict
            .get(b"info".as_slice())
            .ok_or(MetainfoError::MissingField("info"))?;
        let info = parse_info(info_value)?;

        tracing::debug!(
            name = %info.name,
            files = info.files.len(),
            pieces = info.pieces.len(),
            "parsed torrent metainfo"
        );

        Ok(Self {
            info,
            announce,
            announce_list,
            creation_date,
            comment,
            created_by,
        })
    }

    /// Returns all tracker URLs from both `announce` and `announce-list`.
    ///
    /// The primary tracker (from `announce`) comes first, followed by
    /// trackers from `announce-list`. Duplicates and empty URLs are removed.
    pub fn trackers(&self) -> Vec<String> {
        let mut trackers: Vec<String> = Vec::new();

        let tiers = self.announce_list.iter().flatten();
        for tracker in std::iter::once(&self.announce).chain(tiers) {
            if !tracker.is_empty() && !trackers.contains(tracker) {
                trackers.push(tracker.clone());
            }
        }

        trackers
    }

    pub fn total_size(&self) -> i64 {
        self.info.total_size
    }

    pub fn is_single_file(&self) -> bool {
        self.info.single_file
    }
}

impl Info {
    /// Returns the number of pieces.
    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_single_file(&self) -> bool {
        self.single_file
    }
}

fn parse_info(value: &Value) -> Result<Info, MetainfoError> {
    let dict = value.as_dict().ok_or(MetainfoError::InvalidField("info"))?;

    let piece_length = match dict.get(b"piece length".as_slice()) {
        Some(v) => v
            .as_integer()
            .ok_or(MetainfoError::InvalidField("piece length"))?,
        None => return Err(MetainfoError::MissingField("piece length")),
    };

    let pieces = match dict.get(b"pieces".as_slice()) {
        Some(v) => split_pieces(v.as_bytes().ok_or(MetainfoError::InvalidField("pieces"))?),
        None => return Err(MetainfoError::MissingField("pieces")),
    };

    let name = text_field(dict, b"name").unwrap_or_default();

    let private = dict
        .get(b"private".as_slice())
        .and_then(|v| v.as_integer())
        .map(|v| v == 1)
        .unwrap_or(false);

    let (files, single_file) =
        if let Some(length) = dict.get(b"length".as_slice()).and_then(|v| v.as_integer()) {
            let file = File {
                path: name.clone(),
                length,
            };
            (vec![file], true)
        } else if let Some(files_list) = dict.get(b"files".as_slice()).and_then(|v| v.as_list()) {
            (parse_files(files_list), false)
        } else {
            return Err(MetainfoError::MissingField("length or files"));
        };

    let total_size = files
        .iter()
        .fold(0i64, |total, file| total.saturating_add(file.length));

    Ok(Info {
        name,
        piece_length,
        pieces,
        files,
        total_size,
        single_file,
        private,
    })
}

/// Builds the file list of a multi-file torrent. Malformed entries are
/// skipped rather than failing the whole torrent.
fn parse_files(list: &[Value]) -> Vec<File> {
    let mut files = Vec::with_capacity(list.len());

    for (index, entry) in list.iter().enumerate() {
        let Some(entry) = entry.as_dict() else {
            tracing::debug!(index, "skipping file entry that is not a dictionary");
            continue;
        };

        let Some(length) = entry.get(b"length".as_slice()).and_then(|v| v.as_integer()) else {
            tracing::debug!(index, "skipping file entry without a valid length");
            continue;
        };

        let Some(components) = entry.get(b"path".as_slice()).and_then(|v| v.as_list()) else {
            tracing::debug!(index, "skipping file entry without a valid path");
            continue;
        };

        let path = components.iter().filter_map(text).collect::<Vec<_>>().join("/");

        files.push(File { path, length });
    }

    files
}

fn split_pieces(pieces: &Bytes) -> Vec<Bytes> {
    (0..pieces.len())
        .step_by(PIECE_HASH_LEN)
        .map(|start| pieces.slice(start..(start + PIECE_HASH_LEN).min(pieces.len())))
        .collect()
}

fn text(value: &Value) -> Option<String> {
    value
        .as_bytes()
        .map(|b| String::from_utf8_lossy(b).into_owned())
}

fn text_field(dict: &Dict, key: &[u8]) -> Option<String> {
    dict.get(key).and_then(text)
}
