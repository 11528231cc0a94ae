//! The descriptor driven codec.
//!
//! This module implements encoding, decoding, copying, and releasing of
//! [`Value`]s for any type given by a [`TypeDesc`][crate::desc::TypeDesc].
//! The operations are available as methods on `TypeDesc`:
//!
//! * `encoded_len` returns the size of the encoding of a value,
//! * `encode` prepends the encoding of a value to a
//!   [`SliceTarget`][crate::encode::SliceTarget],
//! * `encode_to_vec` encodes a value into a new vec,
//! * `decode` decodes a value from the start of a slice,
//! * `copy` deeply copies a value, and
//! * `free` releases a value.
//!
//! All of them check that the value matches the descriptor and return an
//! [`Error::InvalidValue`][crate::Error::InvalidValue] if it doesn’t.

pub use self::value::{Choice, Value};

mod copy;
mod decode;
mod encode;
mod value;


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use bytes::Bytes;
    use crate::desc::{self, DefaultValue, FieldDesc, Kind, Scalar, TypeDesc};
    use crate::encode::SliceTarget;
    use crate::error::{Error, ErrorKind};
    use crate::mode::Mode;
    use crate::string::StringKind;
    use crate::tag::Tag;
    use super::*;

    static SMALL: TypeDesc = TypeDesc::new(
        "Small",
        Kind::Primitive(Tag::INTEGER, Scalar::Integer { min: 0, max: 10 })
    );

    static RECORD_FIELDS: [FieldDesc; 4] = [
        FieldDesc::new("id", &SMALL).explicit(0),
        FieldDesc::new("name", &desc::GENERAL_STRING).explicit(1).optional(),
        FieldDesc::new("flag", &desc::BOOLEAN).explicit(2)
            .with_default(DefaultValue::Boolean(false)),
        FieldDesc::new("tags", &NAMES).explicit(3).optional(),
    ];

    static RECORD: TypeDesc = TypeDesc::new(
        "Record", Kind::Sequence(Tag::SEQUENCE, &RECORD_FIELDS)
    );

    static APP_RECORD: TypeDesc = TypeDesc::new(
        "AppRecord", Kind::Explicit(Tag::application(5), &RECORD)
    );

    static NAMES: TypeDesc = TypeDesc::new(
        "Names", Kind::SequenceOf(Tag::SEQUENCE, &desc::IA5_STRING)
    );

    static IMPLICIT: TypeDesc = TypeDesc::new(
        "Implicit",
        Kind::Primitive(Tag::ctx(4), Scalar::String(StringKind::Utf8))
    );

    static EITHER_ALTERNATIVES: [FieldDesc; 2] = [
        FieldDesc::new("number", &desc::INTEGER),
        FieldDesc::new("record", &RECORD),
    ];

    static EITHER: TypeDesc = TypeDesc::new(
        "Either", Kind::Choice(&EITHER_ALTERNATIVES)
    );

    static NESTED_ALTERNATIVES: [FieldDesc; 2] = [
        FieldDesc::new("either", &EITHER),
        FieldDesc::new("flag", &desc::BOOLEAN),
    ];

    static NESTED: TypeDesc = TypeDesc::new(
        "Nested", Kind::Choice(&NESTED_ALTERNATIVES)
    );

    fn record(id: i64, name: Option<&str>, flag: bool) -> Value {
        Value::Sequence(vec![
            Some(Value::Integer(id)),
            name.map(|name| Value::string(name).unwrap()),
            Some(Value::Boolean(flag)),
            None,
        ])
    }

    fn round_trip(ty: &TypeDesc, value: &Value, expected: &[u8]) {
        let encoded = ty.encode_to_vec(value).unwrap();
        assert_eq!(encoded, expected);
        assert_eq!(ty.encoded_len(value).unwrap(), expected.len());
        let (decoded, len) = ty.decode(&encoded, Mode::Der).unwrap();
        assert_eq!(len, expected.len());
        assert_eq!(&decoded, value);
    }

    #[test]
    fn sequence_with_optional_and_default() {
        round_trip(
            &RECORD, &record(3, None, false),
            b"\x30\x05\xa0\x03\x02\x01\x03"
        );
        round_trip(
            &RECORD, &record(3, Some("A"), true),
            b"\x30\x0f\xa0\x03\x02\x01\x03\xa1\x03\x1b\x01A\
              \xa2\x03\x01\x01\xff"
        );
    }

    #[test]
    fn explicit_default_rejected_in_der() {
        let data = b"\x30\x0a\xa0\x03\x02\x01\x03\xa2\x03\x01\x01\x00";
        assert_eq!(
            RECORD.decode(data, Mode::Der).unwrap_err().kind(),
            ErrorKind::InvalidValue
        );
        let (value, _) = RECORD.decode(data, Mode::Ber).unwrap();
        assert_eq!(value, record(3, None, false));
    }

    #[test]
    fn default_slot_holds_a_value() {
        // Leaving out the default decodes back into the default.
        let value = record(3, None, false);
        let encoded = RECORD.encode_to_vec(&value).unwrap();
        assert_eq!(encoded, b"\x30\x05\xa0\x03\x02\x01\x03");
        let (decoded, _) = RECORD.decode(&encoded, Mode::Der).unwrap();
        assert_eq!(decoded, value);
        assert_eq!(decoded.field(2), Some(&Value::Boolean(false)));

        // An empty slot has no encoding that decodes back into it.
        let empty = Value::Sequence(vec![
            Some(Value::Integer(3)), None, None, None
        ]);
        assert_eq!(
            RECORD.encoded_len(&empty).unwrap_err().kind(),
            ErrorKind::InvalidValue
        );
        assert_eq!(
            RECORD.encode_to_vec(&empty).unwrap_err().kind(),
            ErrorKind::InvalidValue
        );
        assert_eq!(
            RECORD.copy(&empty).unwrap_err().kind(),
            ErrorKind::InvalidValue
        );
    }

    #[test]
    fn application_and_sequence_of() {
        let value = Value::Sequence(vec![
            Some(Value::Integer(1)),
            None,
            Some(Value::Boolean(false)),
            Some(Value::SequenceOf(vec![
                Value::string("a").unwrap(),
                Value::string("bc").unwrap(),
            ])),
        ]);
        round_trip(
            &APP_RECORD, &value,
            b"\x65\x12\x30\x10\xa0\x03\x02\x01\x01\
              \xa3\x09\x30\x07\x16\x01a\x16\x02bc"
        );

        let empty = Value::Sequence(vec![
            Some(Value::Integer(1)), None, Some(Value::Boolean(false)),
            Some(Value::SequenceOf(Vec::new())),
        ]);
        round_trip(
            &RECORD, &empty,
            b"\x30\x09\xa0\x03\x02\x01\x01\xa3\x02\x30\x00"
        );
    }

    #[test]
    fn implicit_tag() {
        round_trip(
            &IMPLICIT, &Value::string("ü").unwrap(), b"\x84\x02\xc3\xbc"
        );
    }

    #[test]
    fn choice() {
        round_trip(
            &EITHER, &Value::choice(0, Value::Integer(7)).unwrap(),
            b"\x02\x01\x07"
        );
        round_trip(
            &EITHER, &Value::choice(1, record(1, None, false)).unwrap(),
            b"\x30\x05\xa0\x03\x02\x01\x01"
        );
        let err = EITHER.decode(b"\x04\x01\x07", Mode::Der).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownChoice);
        assert!(EITHER.encode_to_vec(
            &Value::choice(2, Value::Integer(7)).unwrap()
        ).is_err());
    }

    #[test]
    fn untagged_choice_in_choice() {
        let inner = Value::choice(0, Value::Integer(7)).unwrap();
        round_trip(
            &NESTED, &Value::choice(0, inner).unwrap(), b"\x02\x01\x07"
        );
        round_trip(
            &NESTED, &Value::choice(1, Value::Boolean(true)).unwrap(),
            b"\x01\x01\xff"
        );
        let (value, _) = NESTED.decode(
            b"\x30\x05\xa0\x03\x02\x01\x01", Mode::Der
        ).unwrap();
        let outer = value.as_choice().unwrap();
        assert_eq!(outer.index(), 0);
        assert_eq!(outer.value().as_choice().unwrap().index(), 1);
        assert_eq!(
            NESTED.decode(b"\x04\x01\x07", Mode::Der).unwrap_err().kind(),
            ErrorKind::UnknownChoice
        );
    }

    #[test]
    fn integer_range() {
        assert_eq!(
            RECORD.decode(
                b"\x30\x05\xa0\x03\x02\x01\x0b", Mode::Der
            ).unwrap_err().kind(),
            ErrorKind::InvalidValue
        );
        assert_eq!(
            RECORD.encoded_len(&record(11, None, false)).unwrap_err().kind(),
            ErrorKind::InvalidValue
        );
    }

    #[test]
    fn missing_and_trailing() {
        // Required id missing.
        assert_eq!(
            RECORD.decode(b"\x30\x00", Mode::Der).unwrap_err().kind(),
            ErrorKind::InvalidValue
        );
        // Wrong tag for id.
        assert_eq!(
            RECORD.decode(
                b"\x30\x05\xa1\x03\x1b\x01A", Mode::Der
            ).unwrap_err().kind(),
            ErrorKind::UnexpectedTag
        );
        // Unknown field at the end.
        assert_eq!(
            RECORD.decode(
                b"\x30\x07\xa0\x03\x02\x01\x03\x05\x00", Mode::Der
            ).unwrap_err(),
            Error::invalid_at("trailing data", 7usize.into())
        );
        // Truncated input.
        assert_eq!(
            RECORD.decode(b"\x30\x05\xa0\x03\x02\x01", Mode::Der)
                .unwrap_err().kind(),
            ErrorKind::Truncated
        );
        // Trailing data after the value is left alone.
        let (_, len) = RECORD.decode(
            b"\x30\x05\xa0\x03\x02\x01\x03\xff", Mode::Der
        ).unwrap();
        assert_eq!(len, 7);
    }

    #[test]
    fn shape_mismatch() {
        let bad = [
            Value::Integer(1),
            Value::Sequence(vec![Some(Value::Integer(1))]),
            Value::Sequence(vec![None, None, None, None]),
            Value::Sequence(vec![
                Some(Value::Boolean(true)), None, None, None
            ]),
            Value::Sequence(vec![
                Some(Value::Integer(1)),
                Some(Value::String(Bytes::from_static(b"a\0"))),
                None, None
            ]),
        ];
        for value in &bad {
            assert_eq!(
                RECORD.encode_to_vec(value).unwrap_err().kind(),
                ErrorKind::InvalidValue
            );
            assert_eq!(
                RECORD.copy(value).unwrap_err().kind(),
                ErrorKind::InvalidValue
            );
        }
    }

    #[test]
    fn encode_is_atomic() {
        let value = record(3, Some("A"), true);
        let mut buf = [0u8; 10];
        let mut target = SliceTarget::new(&mut buf);
        assert_eq!(
            RECORD.encode(&value, &mut target),
            Err(Error::BufferFull { needed: 17, available: 10 })
        );
        assert_eq!(target.written(), 0);

        let mut buf = [0u8; 20];
        let mut target = SliceTarget::new(&mut buf);
        assert_eq!(
            RECORD.encode(&record(11, None, false), &mut target)
                .unwrap_err().kind(),
            ErrorKind::InvalidValue
        );
        assert_eq!(target.written(), 0);
        assert_eq!(RECORD.encode(&value, &mut target), Ok(17));
        assert_eq!(target.headroom(), 3);
    }

    #[test]
    fn copy_and_free() {
        let value = Value::choice(1, record(3, Some("A"), true)).unwrap();
        let copy = EITHER.copy(&value).unwrap();
        assert_eq!(copy, value);
        assert_eq!(
            EITHER.encode_to_vec(&copy).unwrap(),
            EITHER.encode_to_vec(&value).unwrap()
        );
        let original = value.as_choice().unwrap().value().field(1)
            .and_then(Value::as_slice).unwrap();
        let copied = copy.as_choice().unwrap().value().field(1)
            .and_then(Value::as_slice).unwrap();
        assert_ne!(original.as_ptr(), copied.as_ptr());
        EITHER.free(copy);
    }
}
