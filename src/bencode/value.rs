use bytes::Bytes;
use linked_hash_map::LinkedHashMap;
use std::fmt;

use super::error::BencodeError;

/// A bencode dictionary.
///
/// Keys are raw byte strings and iterate in the order they appeared in the
/// decoded input. The decoder rejects duplicate keys, so every key in a
/// decoded dictionary is unique.
pub type Dict = LinkedHashMap<Bytes, Value>;

/// A bencode value.
///
/// Bencode has four data types: integers, byte strings, lists, and dictionaries.
/// Compound variants own their children outright; a decoded tree is never
/// shared or aliased internally.
///
/// # Examples
///
/// ```
/// use bentorrent::bencode::Value;
///
/// // Creating values directly
/// let int = Value::Integer(42);
/// let string = Value::string("hello");
/// let list = Value::List(vec![Value::Integer(1), Value::Integer(2)]);
///
/// // Using From implementations
/// let int: Value = 42i64.into();
/// let string: Value = "hello".into();
///
/// // Querying and accessing values
/// assert!(int.is_integer());
/// assert_eq!(int.as_integer(), Some(42));
/// assert_eq!(string.as_str(), Some("hello"));
/// assert!(list.try_dict().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A signed 64-bit integer.
    Integer(i64),
    /// A byte string (may or may not be valid UTF-8).
    Bytes(Bytes),
    /// An ordered list of values.
    List(Vec<Value>),
    /// A dictionary with byte string keys, in order of appearance.
    Dict(Dict),
}

/// The variant tag of a [`Value`], used in type mismatch reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Integer,
    Bytes,
    List,
    Dict,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Integer => "integer",
            ValueKind::Bytes => "byte string",
            ValueKind::List => "list",
            ValueKind::Dict => "dictionary",
        };
        f.write_str(name)
    }
}

impl Value {
    /// Creates a byte string value from a UTF-8 string.
    ///
    /// # Examples
    ///
    /// ```
    /// use bentorrent::bencode::Value;
    ///
    /// let value = Value::string("hello");
    /// assert_eq!(value.as_str(), Some("hello"));
    /// ```
    pub fn string(s: &str) -> Self {
        Value::Bytes(Bytes::copy_from_slice(s.as_bytes()))
    }

    /// Returns the variant tag of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Integer(_) => ValueKind::Integer,
            Value::Bytes(_) => ValueKind::Bytes,
            Value::List(_) => ValueKind::List,
            Value::Dict(_) => ValueKind::Dict,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    pub fn is_bytes(&self) -> bool {
        matches!(self, Value::Bytes(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    pub fn is_dict(&self) -> bool {
        matches!(self, Value::Dict(_))
    }

    /// Returns the integer, or a [`BencodeError::TypeMismatch`] if this value
    /// holds another variant.
    ///
    /// # Examples
    ///
    /// ```
    /// use bentorrent::bencode::{BencodeError, Value};
    ///
    /// assert_eq!(Value::Integer(7).try_integer(), Ok(7));
    /// assert!(matches!(
    ///     Value::string("7").try_integer(),
    ///     Err(BencodeError::TypeMismatch { .. })
    /// ));
    /// ```
    pub fn try_integer(&self) -> Result<i64, BencodeError> {
        self.as_integer()
            .ok_or_else(|| self.mismatch(ValueKind::Integer))
    }

    /// Returns the byte string, or a [`BencodeError::TypeMismatch`].
    pub fn try_bytes(&self) -> Result<&Bytes, BencodeError> {
        self.as_bytes().ok_or_else(|| self.mismatch(ValueKind::Bytes))
    }

    /// Returns the list, or a [`BencodeError::TypeMismatch`].
    pub fn try_list(&self) -> Result<&[Value], BencodeError> {
        self.as_list().ok_or_else(|| self.mismatch(ValueKind::List))
    }

    /// Returns the dictionary, or a [`BencodeError::TypeMismatch`].
    pub fn try_dict(&self) -> Result<&Dict, BencodeError> {
        self.as_dict().ok_or_else(|| self.mismatch(ValueKind::Dict))
    }

    fn mismatch(&self, expected: ValueKind) -> BencodeError {
        BencodeError::TypeMismatch {
            expected,
            found: self.kind(),
        }
    }

    /// Returns the value as an integer, if it is one.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as a byte string, if it is one.
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the value as a UTF-8 string, if it is a valid UTF-8 byte string.
    ///
    /// Returns `None` if the value is not a byte string or if the bytes are not valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Bytes(b) => std::str::from_utf8(b).ok(),
            _ => None,
        }
    }

    /// Returns the value as a list, if it is one.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    /// Returns the value as a dictionary reference, if it is one.
    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Value::Dict(d) => Some(d),
            _ => None,
        }
    }

    /// Consumes the value and returns the dictionary, if it is one.
    pub fn into_dict(self) -> Option<Dict> {
        match self {
            Value::Dict(d) => Some(d),
            _ => None,
        }
    }

    /// Looks up a key in this value if it is a dictionary.
    ///
    /// Returns `None` if the value is not a dictionary or if the key is not present.
    ///
    /// # Examples
    ///
    /// ```
    /// use bentorrent::bencode::decode;
    ///
    /// let value = decode(b"d3:foo3:bare").unwrap();
    /// assert_eq!(value.get(b"foo").and_then(|v| v.as_str()), Some("bar"));
    /// assert_eq!(value.get(b"missing"), None);
    /// ```
    pub fn get(&self, key: &[u8]) -> Option<&Value> {
        self.as_dict()?.get(key)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::Bytes(Bytes::copy_from_slice(b))
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(Bytes::from(b))
    }
}

impl From<Bytes> for Value {
    fn from(b: Bytes) -> Self {
        Value::Bytes(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(l: Vec<Value>) -> Self {
        Value::List(l)
    }
}

impl From<Dict> for Value {
    fn from(d: Dict) -> Self {
        Value::Dict(d)
    }
}
