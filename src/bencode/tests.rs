use bytes::Bytes;
use proptest::prelude::*;

use super::*;

fn cause_of(data: &[u8]) -> Malformed {
    match decode(data) {
        Err(BencodeError::MalformedInput { cause, .. }) => cause,
        other => panic!("expected malformed input for {:?}, got {:?}", data, other),
    }
}

#[test]
fn test_decode_integer() {
    assert_eq!(decode(b"i42e").unwrap(), Value::Integer(42));
    assert_eq!(decode(b"i-42e").unwrap(), Value::Integer(-42));
    assert_eq!(decode(b"i0e").unwrap(), Value::Integer(0));
}

#[test]
fn test_decode_integer_negative_zero_accepted() {
    assert_eq!(decode(b"i-0e").unwrap(), Value::Integer(0));
}

#[test]
fn test_decode_integer_extremes() {
    assert_eq!(
        decode(b"i9223372036854775807e").unwrap(),
        Value::Integer(i64::MAX)
    );
    assert_eq!(
        decode(b"i-9223372036854775808e").unwrap(),
        Value::Integer(i64::MIN)
    );
    assert_eq!(cause_of(b"i9223372036854775808e"), Malformed::IntegerOverflow);
}

#[test]
fn test_decode_integer_invalid() {
    assert_eq!(cause_of(b"i01e"), Malformed::IntegerLeadingZeros);
    assert_eq!(cause_of(b"i00e"), Malformed::IntegerLeadingZeros);
    assert_eq!(cause_of(b"i-01e"), Malformed::IntegerLeadingZeros);
    assert_eq!(cause_of(b"i"), Malformed::IntegerNoDigits);
    assert_eq!(cause_of(b"ie"), Malformed::IntegerNoDigits);
    assert_eq!(cause_of(b"i-e"), Malformed::IntegerNoDigits);
    assert_eq!(cause_of(b"i12"), Malformed::IntegerMissingEnd);
    assert_eq!(cause_of(b"i12x"), Malformed::IntegerMissingEnd);
}

#[test]
fn test_decode_bytes() {
    assert_eq!(
        decode(b"4:spam").unwrap(),
        Value::Bytes(Bytes::from_static(b"spam"))
    );
    assert_eq!(
        decode(b"0:").unwrap(),
        Value::Bytes(Bytes::from_static(b""))
    );
}

#[test]
fn test_decode_bytes_binary_content() {
    let value = decode(b"4:\x00\xff\x00e").unwrap();
    assert_eq!(&value.as_bytes().unwrap()[..], b"\x00\xff\x00e");
    assert_eq!(value.as_str(), None);
}

#[test]
fn test_decode_bytes_invalid() {
    assert_eq!(cause_of(b"01:a"), Malformed::LengthLeadingZeros);
    assert_eq!(cause_of(b"4spam"), Malformed::MissingColon);
    assert_eq!(cause_of(b"4x:spam"), Malformed::LengthNonDigit);
    assert_eq!(
        cause_of(b"5:ab"),
        Malformed::InsufficientBytes {
            needed: 5,
            available: 2
        }
    );
    assert_eq!(
        cause_of(b"99999999999999999999999:a"),
        Malformed::LengthOverflow
    );
}

#[test]
fn test_decode_list() {
    assert_eq!(decode(b"le").unwrap(), Value::List(vec![]));
    assert_eq!(
        decode(b"li1ei2ei3ee").unwrap(),
        Value::List(vec![
            Value::Integer(1),
            Value::Integer(2),
            Value::Integer(3)
        ])
    );

    let result = decode(b"l4:spami42ee").unwrap();
    match result {
        Value::List(l) => {
            assert_eq!(l.len(), 2);
            assert_eq!(l[0], Value::Bytes(Bytes::from_static(b"spam")));
            assert_eq!(l[1], Value::Integer(42));
        }
        _ => panic!("expected list"),
    }
}

#[test]
fn test_decode_list_unterminated() {
    assert_eq!(cause_of(b"l"), Malformed::ListMissingEnd);
    assert_eq!(cause_of(b"li1e"), Malformed::ListMissingEnd);
    assert_eq!(cause_of(b"l4:spam"), Malformed::ListMissingEnd);
}

#[test]
fn test_decode_dict() {
    assert_eq!(decode(b"de").unwrap(), Value::Dict(Dict::new()));

    let result = decode(b"d3:foo3:bare").unwrap();
    assert_eq!(result.get(b"foo").and_then(|v| v.as_str()), Some("bar"));

    let result = decode(b"d3:cow3:moo4:spam4:eggse").unwrap();
    match result {
        Value::Dict(d) => {
            assert_eq!(d.len(), 2);
            assert_eq!(
                d.get(b"cow".as_slice()),
                Some(&Value::Bytes(Bytes::from_static(b"moo")))
            );
        }
        _ => panic!("expected dict"),
    }
}

#[test]
fn test_decode_dict_preserves_source_order() {
    let value = decode(b"d1:zi1e1:ai2e1:mi3ee").unwrap();
    let keys: Vec<&[u8]> = value
        .as_dict()
        .unwrap()
        .keys()
        .map(|k| &k[..])
        .collect();
    assert_eq!(keys, vec![b"z".as_slice(), b"a", b"m"]);
}

#[test]
fn test_decode_dict_duplicate_key() {
    let err = decode(b"d1:ai1e1:ai2ee").unwrap_err();
    assert_eq!(err.cause(), Some(&Malformed::DuplicateKey("a".into())));
    assert_eq!(err.offset(), Some(7));
    assert!(err.to_string().contains("duplicate dictionary key"));
}

#[test]
fn test_decode_dict_invalid() {
    assert_eq!(cause_of(b"di1ei2ee"), Malformed::KeyNotString);
    assert_eq!(cause_of(b"dle1:ae"), Malformed::KeyNotString);
    assert_eq!(cause_of(b"d1:a"), Malformed::UnexpectedEof);
    assert_eq!(cause_of(b"d1:ai1e"), Malformed::DictMissingEnd);
}

#[test]
fn test_decode_dispatch_errors() {
    assert_eq!(cause_of(b""), Malformed::UnexpectedEof);
    assert_eq!(cause_of(b"x"), Malformed::InvalidMarker(b'x'));
    assert_eq!(cause_of(b"e"), Malformed::InvalidMarker(b'e'));
    assert_eq!(cause_of(b"l-e"), Malformed::InvalidMarker(b'-'));
}

#[test]
fn test_error_offsets() {
    assert_eq!(decode(b"li1exe").unwrap_err().offset(), Some(4));
    assert_eq!(decode(b"i12x").unwrap_err().offset(), Some(3));
}

#[test]
fn test_trailing_data_ignored() {
    assert_eq!(decode(b"i42eextra").unwrap(), Value::Integer(42));
}

#[test]
fn test_decoder_sequential_values() {
    let mut decoder = Decoder::new(b"i1e4:spamle");
    assert_eq!(decoder.decode_next().unwrap(), Value::Integer(1));
    assert_eq!(decoder.decode_next().unwrap(), Value::string("spam"));
    assert_eq!(decoder.decode_next().unwrap(), Value::List(vec![]));
    assert_eq!(decoder.position(), 11);
    assert!(decoder.remaining().is_empty());
}

#[test]
fn test_nesting_limit() {
    let nested = |depth: usize| {
        let mut data = vec![b'l'; depth + 1];
        data.extend(std::iter::repeat(b'e').take(depth + 1));
        data
    };

    assert!(decode(&nested(DEFAULT_MAX_DEPTH)).is_ok());
    assert_eq!(
        cause_of(&nested(DEFAULT_MAX_DEPTH + 1)),
        Malformed::NestingTooDeep(DEFAULT_MAX_DEPTH)
    );

    let data = nested(3);
    assert!(Decoder::new(&data).with_max_depth(3).decode_next().is_ok());
    assert!(Decoder::new(&data).with_max_depth(2).decode_next().is_err());
}

#[test]
fn test_nested_structures() {
    let value = decode(b"d4:listl4:spami42ee4:dictd1:kleee").unwrap();
    let list = value.get(b"list").unwrap().try_list().unwrap();
    assert_eq!(list, &[Value::string("spam"), Value::Integer(42)]);
    let inner = value.get(b"dict").unwrap();
    assert_eq!(inner.get(b"k"), Some(&Value::List(vec![])));
}

#[test]
fn test_decode_deterministic() {
    let data = b"d8:announce15:http://test.com4:infod4:name4:test12:piece lengthi16384eee";
    assert_eq!(decode(data).unwrap(), decode(data).unwrap());
}

#[test]
fn test_value_accessors() {
    let value = Value::Integer(42);
    assert_eq!(value.as_integer(), Some(42));
    assert!(value.as_bytes().is_none());

    let value = Value::Bytes(Bytes::from_static(b"test"));
    assert_eq!(value.as_str(), Some("test"));
    assert!(value.as_integer().is_none());

    let value = Value::List(vec![]);
    assert!(value.as_list().is_some());
    assert!(value.as_dict().is_none());
}

#[test]
fn test_value_predicates() {
    let values = [
        Value::Integer(1),
        Value::string("a"),
        Value::List(vec![]),
        Value::Dict(Dict::new()),
    ];
    let flags: Vec<[bool; 4]> = values
        .iter()
        .map(|v| [v.is_integer(), v.is_bytes(), v.is_list(), v.is_dict()])
        .collect();

    for (i, row) in flags.iter().enumerate() {
        for (j, &flag) in row.iter().enumerate() {
            assert_eq!(flag, i == j);
        }
    }
}

#[test]
fn test_typed_accessor_mismatch() {
    let value = Value::string("text");
    assert_eq!(&value.try_bytes().unwrap()[..], b"text");

    let err = value.try_integer().unwrap_err();
    assert_eq!(
        err,
        BencodeError::TypeMismatch {
            expected: ValueKind::Integer,
            found: ValueKind::Bytes,
        }
    );
    assert!(err.is_type_mismatch());
    assert!(!err.is_malformed());
    assert_eq!(err.to_string(), "type mismatch: expected integer, found byte string");

    assert!(Value::Integer(1).try_list().is_err());
    assert!(Value::List(vec![]).try_dict().is_err());
    assert!(Value::Dict(Dict::new()).try_bytes().is_err());
}

#[test]
fn test_constructors() {
    let mut dict = Dict::new();
    dict.insert(Bytes::from_static(b"k"), Value::from(1i64));

    assert_eq!(Value::from(7i64), Value::Integer(7));
    assert_eq!(Value::from("ab"), Value::Bytes(Bytes::from_static(b"ab")));
    assert_eq!(Value::from(b"ab".as_slice()), Value::string("ab"));
    assert_eq!(Value::from(vec![0u8, 1]).try_bytes().unwrap().len(), 2);
    assert_eq!(Value::from(vec![Value::Integer(1)]).kind(), ValueKind::List);
    assert_eq!(Value::from(dict).kind(), ValueKind::Dict);
}

proptest! {
    #[test]
    fn prop_integer_decodes_exactly(n in any::<i64>()) {
        let encoded = format!("i{}e", n);
        prop_assert_eq!(decode(encoded.as_bytes()).unwrap(), Value::Integer(n));
    }

    #[test]
    fn prop_bytes_decode_verbatim(content in proptest::collection::vec(any::<u8>(), 0..256)) {
        let mut encoded = format!("{}:", content.len()).into_bytes();
        encoded.extend_from_slice(&content);
        let value = decode(&encoded).unwrap();
        prop_assert_eq!(&value.try_bytes().unwrap()[..], content.as_slice());
    }

    #[test]
    fn prop_truncated_bytes_rejected(content in proptest::collection::vec(any::<u8>(), 1..64)) {
        let mut encoded = format!("{}:", content.len() + 1).into_bytes();
        encoded.extend_from_slice(&content);
        prop_assert!(decode(&encoded).unwrap_err().is_malformed());
    }
}
