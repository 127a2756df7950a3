use super::error::{BencodeError, Malformed};
use super::value::{Dict, Value};
use bytes::Bytes;

/// Default limit on list/dictionary nesting accepted by [`Decoder`].
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Decodes the first bencode value in `data`.
///
/// Bytes following the value are ignored. Use [`Decoder`] directly to find out
/// where the value ended or to change the nesting limit.
///
/// # Errors
///
/// Returns [`BencodeError::MalformedInput`] at the first grammar violation.
/// There is no partial result.
///
/// # Examples
///
/// ```
/// use bentorrent::bencode::{decode, Value};
///
/// assert_eq!(decode(b"i42e").unwrap(), Value::Integer(42));
/// assert!(decode(b"i01e").is_err());
/// ```
pub fn decode(data: &[u8]) -> Result<Value, BencodeError> {
    Decoder::new(data).decode_next().inspect_err(|err| {
        tracing::trace!(offset = ?err.offset(), error = %err, "bencode decode failed");
    })
}

/// A single-pass recursive-descent bencode parser over a byte buffer.
///
/// The decoder holds one cursor. Every sub-parser leaves the cursor just past
/// the bytes it consumed, including the closing `e` of lists and dictionaries.
///
/// # Examples
///
/// ```
/// use bentorrent::bencode::{Decoder, Value};
///
/// let mut decoder = Decoder::new(b"i1e3:abc");
/// assert_eq!(decoder.decode_next().unwrap(), Value::Integer(1));
/// assert_eq!(decoder.position(), 3);
/// assert_eq!(decoder.decode_next().unwrap(), Value::string("abc"));
/// assert!(decoder.remaining().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    data: &'a [u8],
    pos: usize,
    max_depth: usize,
}

impl<'a> Decoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets how many levels of nested lists/dictionaries are accepted below
    /// the top-level value.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Byte offset of the cursor.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The input not yet consumed.
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos.min(self.data.len())..]
    }

    /// Decodes one value starting at the cursor.
    pub fn decode_next(&mut self) -> Result<Value, BencodeError> {
        self.decode_value(0)
    }

    fn decode_value(&mut self, depth: usize) -> Result<Value, BencodeError> {
        if depth > self.max_depth {
            return Err(self.error(Malformed::NestingTooDeep(self.max_depth)));
        }

        match self.peek() {
            None => Err(self.error(Malformed::UnexpectedEof)),
            Some(b'0'..=b'9') => self.decode_bytes().map(Value::Bytes),
            Some(b'i') => self.decode_integer().map(Value::Integer),
            Some(b'l') => self.decode_list(depth).map(Value::List),
            Some(b'd') => self.decode_dict(depth).map(Value::Dict),
            Some(c) => Err(self.error(Malformed::InvalidMarker(c))),
        }
    }

    fn decode_integer(&mut self) -> Result<i64, BencodeError> {
        self.expect(b'i', Malformed::InvalidMarker(b'i'))?;

        let negative = self.peek() == Some(b'-');
        if negative {
            self.pos += 1;
        }

        if !self.peek().is_some_and(|c| c.is_ascii_digit()) {
            return Err(self.error(Malformed::IntegerNoDigits));
        }

        // A lone `0` is fine; `0` followed by more digits is not.
        if self.peek() == Some(b'0')
            && self
                .data
                .get(self.pos + 1)
                .is_some_and(|c| c.is_ascii_digit())
        {
            return Err(self.error(Malformed::IntegerLeadingZeros));
        }

        // Accumulate toward the sign so that i64::MIN is representable.
        let mut value: i64 = 0;
        while let Some(c) = self.peek().filter(u8::is_ascii_digit) {
            let digit = i64::from(c - b'0');
            value = value
                .checked_mul(10)
                .and_then(|v| {
                    if negative {
                        v.checked_sub(digit)
                    } else {
                        v.checked_add(digit)
                    }
                })
                .ok_or_else(|| self.error(Malformed::IntegerOverflow))?;
            self.pos += 1;
        }

        self.expect(b'e', Malformed::IntegerMissingEnd)?;
        Ok(value)
    }

    fn decode_bytes(&mut self) -> Result<Bytes, BencodeError> {
        let colon = self.data[self.pos..]
            .iter()
            .position(|&c| c == b':')
            .map(|i| self.pos + i)
            .ok_or_else(|| self.error(Malformed::MissingColon))?;

        let prefix = &self.data[self.pos..colon];
        if prefix.len() > 1 && prefix[0] == b'0' {
            return Err(self.error(Malformed::LengthLeadingZeros));
        }

        let mut len: usize = 0;
        for &c in prefix {
            if !c.is_ascii_digit() {
                return Err(self.error(Malformed::LengthNonDigit));
            }
            len = len
                .checked_mul(10)
                .and_then(|l| l.checked_add(usize::from(c - b'0')))
                .ok_or_else(|| self.error(Malformed::LengthOverflow))?;
        }

        self.pos = colon + 1;

        let available = self.data.len() - self.pos;
        if len > available {
            return Err(self.error(Malformed::InsufficientBytes {
                needed: len,
                available,
            }));
        }

        let bytes = Bytes::copy_from_slice(&self.data[self.pos..self.pos + len]);
        self.pos += len;

        Ok(bytes)
    }

    fn decode_list(&mut self, depth: usize) -> Result<Vec<Value>, BencodeError> {
        self.expect(b'l', Malformed::InvalidMarker(b'l'))?;
        let mut list = Vec::new();

        while self.peek().is_some_and(|c| c != b'e') {
            list.push(self.decode_value(depth + 1)?);
        }

        self.expect(b'e', Malformed::ListMissingEnd)?;
        Ok(list)
    }

    fn decode_dict(&mut self, depth: usize) -> Result<Dict, BencodeError> {
        self.expect(b'd', Malformed::InvalidMarker(b'd'))?;
        let mut dict = Dict::new();

        while let Some(c) = self.peek().filter(|&c| c != b'e') {
            if !c.is_ascii_digit() {
                return Err(self.error(Malformed::KeyNotString));
            }

            let key_offset = self.pos;
            let key = self.decode_bytes()?;
            let value = self.decode_value(depth + 1)?;

            if dict.contains_key(&key) {
                let key = String::from_utf8_lossy(&key).into_owned();
                return Err(BencodeError::malformed(
                    key_offset,
                    Malformed::DuplicateKey(key),
                ));
            }
            dict.insert(key, value);
        }

        self.expect(b'e', Malformed::DictMissingEnd)?;
        Ok(dict)
    }

    fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    fn expect(&mut self, marker: u8, cause: Malformed) -> Result<(), BencodeError> {
        if self.peek() == Some(marker) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(cause))
        }
    }

    fn error(&self, cause: Malformed) -> BencodeError {
        BencodeError::malformed(self.pos, cause)
    }
}
