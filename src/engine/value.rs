//! The in-memory representation of values.
//!
//! This is a private module. Its public items are re-exported by the parent.

use bytes::Bytes;
use crate::decode;
use crate::error::Error;
use crate::oid::Oid;
use crate::string::BitString;
use crate::time::GeneralizedTime;


//------------ Value ---------------------------------------------------------

/// A value of some ASN.1 type.
///
/// Which variant is valid for a value depends on the
/// [`TypeDesc`][crate::desc::TypeDesc] it is used with. Values produced by
/// decoding always match their descriptor. Values built by hand are checked
/// when they are encoded or copied.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Value {
    Boolean(bool),
    Integer(i64),
    Null,
    OctetString(Bytes),

    /// The content octets of a restricted character string.
    String(Bytes),

    Oid(Oid),
    BitString(BitString),
    Time(GeneralizedTime),

    /// The fields of a SEQUENCE in declared order.
    ///
    /// There is exactly one slot per field. Absent optional fields are
    /// `None`. Fields with a default always hold a value: decoding fills
    /// in the default if the field was left out of the encoding.
    Sequence(Vec<Option<Value>>),

    /// The elements of a SEQUENCE OF.
    SequenceOf(Vec<Value>),

    /// The chosen alternative of a CHOICE.
    Choice(Choice),
}

impl Value {
    /// Creates a string value from a Rust string.
    ///
    /// Whether the content is valid for the string type is checked when
    /// the value is encoded.
    pub fn string(s: &str) -> Result<Self, Error> {
        decode::copy_bytes(s.as_bytes()).map(Value::String)
    }

    /// Creates a CHOICE value.
    pub fn choice(index: usize, value: Value) -> Result<Self, Error> {
        Choice::new(index, value).map(Value::Choice)
    }

    /// Returns a short name of the variant for diagnostics.
    pub fn variant_name(&self) -> &'static str {
        match *self {
            Value::Boolean(_) => "Boolean",
            Value::Integer(_) => "Integer",
            Value::Null => "Null",
            Value::OctetString(_) => "OctetString",
            Value::String(_) => "String",
            Value::Oid(_) => "Oid",
            Value::BitString(_) => "BitString",
            Value::Time(_) => "Time",
            Value::Sequence(_) => "Sequence",
            Value::SequenceOf(_) => "SequenceOf",
            Value::Choice(_) => "Choice",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Value::Boolean(value) => Some(value),
            _ => None
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::Integer(value) => Some(value),
            _ => None
        }
    }

    /// Returns the content of octet or character strings.
    pub fn as_slice(&self) -> Option<&[u8]> {
        match self {
            Value::OctetString(value) | Value::String(value) => {
                Some(value.as_ref())
            }
            _ => None
        }
    }

    /// Returns the field slots of a SEQUENCE value.
    pub fn as_fields(&self) -> Option<&[Option<Value>]> {
        match self {
            Value::Sequence(fields) => Some(fields),
            _ => None
        }
    }

    /// Returns a field of a SEQUENCE value if it is present.
    pub fn field(&self, index: usize) -> Option<&Value> {
        self.as_fields()?.get(index)?.as_ref()
    }

    /// Returns the elements of a SEQUENCE OF value.
    pub fn as_elements(&self) -> Option<&[Value]> {
        match self {
            Value::SequenceOf(items) => Some(items),
            _ => None
        }
    }

    pub fn as_choice(&self) -> Option<&Choice> {
        match self {
            Value::Choice(choice) => Some(choice),
            _ => None
        }
    }
}


//------------ Choice --------------------------------------------------------

/// A value of a CHOICE type.
///
/// Holds the index of the chosen alternative and its value. There is no
/// way to have no or more than one alternative.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Choice {
    index: usize,
    value: Box<[Value; 1]>,
}

impl Choice {
    /// Creates a new CHOICE value.
    ///
    /// The value is moved into an allocation of its own. If that fails,
    /// returns [`Error::OutOfMemory`].
    pub fn new(index: usize, value: Value) -> Result<Self, Error> {
        let mut slot = Vec::new();
        if slot.try_reserve_exact(1).is_err() {
            xerr!(return Err(Error::OutOfMemory))
        }
        slot.push(value);
        match Box::<[Value; 1]>::try_from(slot.into_boxed_slice()) {
            Ok(value) => Ok(Choice { index, value }),
            Err(_) => xerr!(Err(Error::invalid("empty CHOICE"))),
        }
    }

    /// Returns the index of the alternative in the type’s descriptor.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn value(&self) -> &Value {
        &self.value[0]
    }

    pub fn into_value(self) -> Value {
        let [value] = *self.value;
        value
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn accessors() {
        let value = Value::Sequence(vec![
            Some(Value::Integer(1)), None, Some(Value::string("x").unwrap())
        ]);
        assert_eq!(value.field(0).and_then(Value::as_i64), Some(1));
        assert_eq!(value.field(1), None);
        assert_eq!(
            value.field(2).and_then(Value::as_slice), Some(b"x".as_ref())
        );
        assert_eq!(value.field(3), None);
        assert_eq!(Value::Null.field(0), None);

        let choice = Value::choice(1, Value::Boolean(true)).unwrap();
        let inner = choice.as_choice().unwrap();
        assert_eq!(inner.index(), 1);
        assert_eq!(inner.value().as_bool(), Some(true));
        assert_eq!(choice.variant_name(), "Choice");

        let inner = choice.as_choice().unwrap().clone();
        assert_eq!(inner.into_value(), Value::Boolean(true));
    }
}
