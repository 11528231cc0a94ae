//! Encoding values via their descriptor.
//!
//! This is a private module. It only adds methods to `TypeDesc`.

use tracing::debug;
use crate::desc::{FieldDesc, Kind, Scalar, TypeDesc};
use crate::encode::{
    PrimitiveContent, SliceTarget, total_len, write_header
};
use crate::error::Error;
use crate::oid::Oid;
use crate::string::BitString;
use crate::time::GeneralizedTime;
use super::value::{Choice, Value};


//------------ TypeDesc ------------------------------------------------------

/// # Encoding
///
impl TypeDesc {
    /// Returns the length of the encoding of `value`.
    ///
    /// Fails if the value doesn’t match the descriptor.
    pub fn encoded_len(&self, value: &Value) -> Result<usize, Error> {
        let content = match self.kind() {
            Kind::Primitive(_, scalar) => {
                ScalarContent::from_value(scalar, value)?.encoded_len()
            }
            Kind::Sequence(_, fields) => {
                let slots = fields_of(value, fields)?;
                let mut len = 0;
                for (field, slot) in fields.iter().zip(slots) {
                    len += field_len(field, slot.as_ref())?;
                }
                len
            }
            Kind::SequenceOf(_, element) => {
                let mut len = 0;
                for item in elements_of(value)? {
                    len += element.encoded_len(item)?;
                }
                len
            }
            Kind::Choice(alternatives) => {
                let (alt, choice) = alternative_of(value, alternatives)?;
                return tagged_len(alt, choice.value())
            }
            Kind::Explicit(_, inner) => inner.encoded_len(value)?,
        };
        Ok(self.tag().map_or(content, |tag| total_len(tag, content)))
    }

    /// Prepends the encoding of `value` to `target`.
    ///
    /// Returns the number of octets written. If the value doesn’t fit into
    /// the target, returns [`Error::BufferFull`] with the complete length.
    /// Upon any error, the target is left unchanged.
    pub fn encode(
        &self, value: &Value, target: &mut SliceTarget
    ) -> Result<usize, Error> {
        let needed = match self.encoded_len(value) {
            Ok(needed) => needed,
            Err(err) => {
                debug!(ty = self.name(), %err, "value doesn’t match type");
                return Err(err)
            }
        };
        if needed > target.headroom() {
            debug!(
                ty = self.name(), needed, available = target.headroom(),
                "encoding target too small"
            );
            xerr!(return Err(Error::BufferFull {
                needed, available: target.headroom()
            }))
        }
        let mark = target.mark();
        match self.write_encoded(value, target) {
            Ok(len) => Ok(len),
            Err(err) => {
                target.rewind(mark);
                debug!(ty = self.name(), %err, "encoding failed, rewound");
                Err(err)
            }
        }
    }

    /// Encodes `value` into a new vec of exactly the right size.
    pub fn encode_to_vec(&self, value: &Value) -> Result<Vec<u8>, Error> {
        let len = self.encoded_len(value)?;
        let mut res = Vec::new();
        if res.try_reserve_exact(len).is_err() {
            xerr!(return Err(Error::OutOfMemory))
        }
        res.resize(len, 0);
        let mut target = SliceTarget::new(&mut res);
        self.encode(value, &mut target)?;
        Ok(res)
    }

    /// Prepends the encoding without the initial checks.
    fn write_encoded(
        &self, value: &Value, target: &mut SliceTarget
    ) -> Result<usize, Error> {
        let (len, constructed) = match self.kind() {
            Kind::Primitive(_, scalar) => {
                let content = ScalarContent::from_value(scalar, value)?;
                (content.write_encoded(target)?, false)
            }
            Kind::Sequence(_, fields) => {
                let slots = fields_of(value, fields)?;
                let mut len = 0;
                for (field, slot) in fields.iter().zip(slots).rev() {
                    len += write_field(field, slot.as_ref(), target)?;
                }
                (len, true)
            }
            Kind::SequenceOf(_, element) => {
                let mut len = 0;
                for item in elements_of(value)?.iter().rev() {
                    len += element.write_encoded(item, target)?;
                }
                (len, true)
            }
            Kind::Choice(alternatives) => {
                let (alt, choice) = alternative_of(value, alternatives)?;
                return write_tagged(alt, choice.value(), target)
            }
            Kind::Explicit(_, inner) => {
                (inner.write_encoded(value, target)?, true)
            }
        };
        match self.tag() {
            Some(tag) => {
                Ok(len + write_header(target, tag, constructed, len)?)
            }
            None => Ok(len),
        }
    }
}


//------------ Fields --------------------------------------------------------

/// Returns the value of a field that goes into the encoding.
///
/// Absent optional fields and fields equal to their default are left out.
fn encoded_value<'a>(
    field: &FieldDesc, value: Option<&'a Value>
) -> Result<Option<&'a Value>, Error> {
    match value {
        None if field.allows_none() => Ok(None),
        None => xerr!(Err(Error::invalid("missing field value"))),
        Some(value) => {
            match field.default() {
                Some(default) if default.matches(value) => Ok(None),
                _ => Ok(Some(value)),
            }
        }
    }
}

fn field_len(
    field: &FieldDesc, value: Option<&Value>
) -> Result<usize, Error> {
    match encoded_value(field, value)? {
        Some(value) => tagged_len(field, value),
        None => Ok(0),
    }
}

/// Returns the length of a field value including its explicit tag.
fn tagged_len(field: &FieldDesc, value: &Value) -> Result<usize, Error> {
    let len = field.ty().encoded_len(value)?;
    Ok(field.tag().map_or(len, |tag| total_len(tag, len)))
}

fn write_field(
    field: &FieldDesc, value: Option<&Value>, target: &mut SliceTarget
) -> Result<usize, Error> {
    match encoded_value(field, value)? {
        Some(value) => write_tagged(field, value, target),
        None => Ok(0),
    }
}

/// Prepends a field value including its explicit tag.
fn write_tagged(
    field: &FieldDesc, value: &Value, target: &mut SliceTarget
) -> Result<usize, Error> {
    let len = field.ty().write_encoded(value, target)?;
    match field.tag() {
        Some(tag) => Ok(len + write_header(target, tag, true, len)?),
        None => Ok(len),
    }
}


//------------ Shape Checks --------------------------------------------------

/// Returns the field slots of a SEQUENCE value.
pub(super) fn fields_of<'a>(
    value: &'a Value, fields: &[FieldDesc]
) -> Result<&'a [Option<Value>], Error> {
    match value {
        Value::Sequence(slots) if slots.len() == fields.len() => Ok(slots),
        Value::Sequence(_) => {
            xerr!(Err(Error::invalid("wrong number of fields")))
        }
        _ => xerr!(Err(Error::invalid("expected SEQUENCE value"))),
    }
}

/// Returns the elements of a SEQUENCE OF value.
pub(super) fn elements_of(value: &Value) -> Result<&[Value], Error> {
    match value {
        Value::SequenceOf(items) => Ok(items),
        _ => xerr!(Err(Error::invalid("expected SEQUENCE OF value"))),
    }
}

/// Returns the descriptor of the chosen alternative and the CHOICE value.
pub(super) fn alternative_of<'a>(
    value: &'a Value, alternatives: &'static [FieldDesc]
) -> Result<(&'static FieldDesc, &'a Choice), Error> {
    let choice = match value {
        Value::Choice(choice) => choice,
        _ => xerr!(return Err(Error::invalid("expected CHOICE value"))),
    };
    match alternatives.get(choice.index()) {
        Some(alt) => Ok((alt, choice)),
        None => xerr!(Err(Error::invalid("invalid CHOICE alternative"))),
    }
}


//------------ ScalarContent -------------------------------------------------

/// The content of a primitive value checked against its scalar type.
#[derive(Clone, Copy, Debug)]
pub(super) enum ScalarContent<'a> {
    Boolean(bool),
    Integer(i64),
    Null,
    Octets(&'a [u8]),
    Oid(&'a Oid),
    BitString(&'a BitString),
    Time(GeneralizedTime),
}

impl<'a> ScalarContent<'a> {
    /// Checks that `value` is a valid value of `scalar`.
    pub fn from_value(
        scalar: Scalar, value: &'a Value
    ) -> Result<Self, Error> {
        match (scalar, value) {
            (Scalar::Boolean, Value::Boolean(value)) => {
                Ok(ScalarContent::Boolean(*value))
            }
            (Scalar::Integer { min, max }, Value::Integer(value)) => {
                if *value < min || *value > max {
                    xerr!(return Err(Error::invalid("integer out of range")))
                }
                Ok(ScalarContent::Integer(*value))
            }
            (Scalar::Null, Value::Null) => Ok(ScalarContent::Null),
            (Scalar::OctetString, Value::OctetString(value)) => {
                Ok(ScalarContent::Octets(value.as_ref()))
            }
            (Scalar::String(kind), Value::String(value)) => {
                if !kind.check(value.as_ref()) {
                    xerr!(return Err(Error::invalid(
                        "invalid character string"
                    )))
                }
                Ok(ScalarContent::Octets(value.as_ref()))
            }
            (Scalar::Oid, Value::Oid(value)) => Ok(ScalarContent::Oid(value)),
            (Scalar::BitString, Value::BitString(value)) => {
                Ok(ScalarContent::BitString(value))
            }
            (Scalar::GeneralizedTime, Value::Time(value)) => {
                Ok(ScalarContent::Time(*value))
            }
            _ => {
                xerr!(Err(Error::invalid(
                    "value doesn’t match primitive type"
                )))
            }
        }
    }

    /// Returns the length of the content octets.
    pub fn encoded_len(self) -> usize {
        match self {
            ScalarContent::Boolean(value) => value.encoded_len(),
            ScalarContent::Integer(value) => value.encoded_len(),
            ScalarContent::Null => ().encoded_len(),
            ScalarContent::Octets(value) => value.encoded_len(),
            ScalarContent::Oid(value) => value.encoded_len(),
            ScalarContent::BitString(value) => value.encoded_len(),
            ScalarContent::Time(value) => value.encoded_len(),
        }
    }

    /// Prepends the content octets to the target.
    pub fn write_encoded(
        self, target: &mut SliceTarget
    ) -> Result<usize, Error> {
        match self {
            ScalarContent::Boolean(value) => value.write_encoded(target),
            ScalarContent::Integer(value) => value.write_encoded(target),
            ScalarContent::Null => ().write_encoded(target),
            ScalarContent::Octets(value) => value.write_encoded(target),
            ScalarContent::Oid(value) => value.write_encoded(target),
            ScalarContent::BitString(value) => value.write_encoded(target),
            ScalarContent::Time(value) => value.write_encoded(target),
        }
    }
}
