use thiserror::Error;

use crate::bencode::BencodeError;

/// Errors that can occur when extracting torrent metadata.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetainfoError {
    /// The torrent data contains invalid bencode.
    #[error("bencode error: {0}")]
    Bencode(#[from] BencodeError),

    /// The top-level value is not a dictionary.
    #[error("invalid torrent file: root must be a dictionary")]
    InvalidRoot,

    /// A required field is missing from the torrent file.
    #[error("invalid torrent file: missing {0}")]
    MissingField(&'static str),

    /// A required field is present but has the wrong type.
    #[error("invalid torrent file: invalid {0}")]
    InvalidField(&'static str),
}
