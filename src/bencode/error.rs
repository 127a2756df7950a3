use thiserror::Error;

use super::value::ValueKind;

/// Errors produced by the bencode layer.
///
/// Malformed input and API misuse are kept apart: the former is a property of
/// the bytes being decoded, the latter of the code asking a [`Value`] for a
/// variant it does not hold.
///
/// [`Value`]: super::Value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BencodeError {
    /// The input violates the bencode grammar.
    #[error("malformed bencode at byte {offset}: {cause}")]
    MalformedInput {
        /// Byte offset where the violation was detected.
        offset: usize,
        /// The rule that was violated.
        cause: Malformed,
    },

    /// A typed accessor was called on a value of a different kind.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: ValueKind,
        found: ValueKind,
    },
}

impl BencodeError {
    pub(crate) fn malformed(offset: usize, cause: Malformed) -> Self {
        BencodeError::MalformedInput { offset, cause }
    }

    /// Returns the grammar violation, if this is a decode error.
    pub fn cause(&self) -> Option<&Malformed> {
        match self {
            BencodeError::MalformedInput { cause, .. } => Some(cause),
            BencodeError::TypeMismatch { .. } => None,
        }
    }

    /// Returns the byte offset of a decode error.
    pub fn offset(&self) -> Option<usize> {
        match self {
            BencodeError::MalformedInput { offset, .. } => Some(*offset),
            BencodeError::TypeMismatch { .. } => None,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, BencodeError::MalformedInput { .. })
    }

    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, BencodeError::TypeMismatch { .. })
    }
}

/// The specific grammar rule a malformed input broke.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Malformed {
    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("invalid value type marker '{}'", .0.escape_ascii())]
    InvalidMarker(u8),

    #[error("invalid integer: no digits")]
    IntegerNoDigits,

    #[error("invalid integer: leading zeros")]
    IntegerLeadingZeros,

    #[error("invalid integer: does not fit in 64 bits")]
    IntegerOverflow,

    #[error("invalid integer: missing 'e'")]
    IntegerMissingEnd,

    #[error("invalid string: missing colon")]
    MissingColon,

    #[error("invalid string length: leading zeros")]
    LengthLeadingZeros,

    #[error("invalid string length: non-digit character")]
    LengthNonDigit,

    #[error("invalid string length: too large")]
    LengthOverflow,

    #[error("invalid string: insufficient characters (need {needed}, have {available})")]
    InsufficientBytes { needed: usize, available: usize },

    #[error("invalid list: missing 'e'")]
    ListMissingEnd,

    #[error("invalid dictionary: missing 'e'")]
    DictMissingEnd,

    #[error("invalid dictionary: key must be a string")]
    KeyNotString,

    #[error("duplicate dictionary key '{0}'")]
    DuplicateKey(String),

    #[error("nesting deeper than {0} levels")]
    NestingTooDeep(usize),
}
