//! Decoding values via their descriptor.
//!
//! This is a private module. It only adds methods to `TypeDesc` and
//! `FieldDesc`.

use tracing::{debug, trace};
use crate::decode::{Constructed, Content, Primitive};
use crate::desc::{FieldDesc, Kind, Scalar, TypeDesc};
use crate::error::Error;
use crate::mode::Mode;
use crate::oid::Oid;
use crate::string::BitString;
use crate::time::GeneralizedTime;
use super::value::{Choice, Value};


//------------ TypeDesc ------------------------------------------------------

/// # Decoding
///
impl TypeDesc {
    /// Decodes a value from the beginning of `data`.
    ///
    /// Returns the value and the number of octets consumed. Anything
    /// following the value is left alone.
    pub fn decode(
        &self, data: &[u8], mode: Mode
    ) -> Result<(Value, usize), Error> {
        let res = Constructed::decode(data, mode, |cons| self.take_from(cons));
        if let Err(ref err) = res {
            debug!(ty = self.name(), %err, "decoding failed");
        }
        res
    }

    /// Takes a value of this type from constructed content.
    pub fn take_from(&self, cons: &mut Constructed) -> Result<Value, Error> {
        let tag = match self.kind() {
            Kind::Choice(alternatives) => {
                return take_choice(self, alternatives, cons)
            }
            Kind::Primitive(tag, _) => tag,
            Kind::Sequence(tag, _) => tag,
            Kind::SequenceOf(tag, _) => tag,
            Kind::Explicit(tag, _) => tag,
        };
        cons.take_value_if(tag, |content| self.from_content(content))
    }

    /// Takes a value of this type if the next value has a matching tag.
    pub fn take_opt_from(
        &self, cons: &mut Constructed
    ) -> Result<Option<Value>, Error> {
        match cons.peek_tag()? {
            Some(tag) if self.matches(tag) => self.take_from(cons).map(Some),
            _ => Ok(None)
        }
    }

    /// Decodes the content of a value of this type.
    fn from_content(&self, content: &mut Content) -> Result<Value, Error> {
        match self.kind() {
            Kind::Primitive(_, scalar) => {
                scalar_from_primitive(scalar, content.as_primitive()?)
            }
            Kind::Sequence(_, fields) => {
                take_fields(fields, content.as_constructed()?)
            }
            Kind::SequenceOf(_, element) => {
                take_elements(element, content.as_constructed()?)
            }
            Kind::Explicit(_, inner) => {
                inner.take_from(content.as_constructed()?)
            }
            Kind::Choice(_) => {
                xerr!(Err(Error::invalid("untagged CHOICE as content")))
            }
        }
    }
}


//------------ FieldDesc -----------------------------------------------------

impl FieldDesc {
    /// Takes the value of the field including its explicit tag.
    pub fn take_from(&self, cons: &mut Constructed) -> Result<Value, Error> {
        match self.tag() {
            Some(tag) => {
                cons.take_constructed_if(tag, |cons| self.ty().take_from(cons))
            }
            None => self.ty().take_from(cons)
        }
    }

    /// Returns the error for a required field that isn’t there.
    fn missing(&self, cons: &Constructed) -> Error {
        match (cons.peek_tag(), self.expected_tag()) {
            (Ok(Some(found)), Some(expected)) => Error::UnexpectedTag {
                expected, found, pos: cons.pos()
            },
            (Ok(Some(found)), None) => Error::UnknownChoice {
                found, pos: cons.pos()
            },
            (Ok(None), _) => cons.missing_value(),
            (Err(err), _) => err,
        }
    }
}


//------------ Helper Functions ----------------------------------------------

/// Decodes the fields of a SEQUENCE.
fn take_fields(
    fields: &'static [FieldDesc], cons: &mut Constructed
) -> Result<Value, Error> {
    let mut slots = Vec::new();
    if slots.try_reserve_exact(fields.len()).is_err() {
        xerr!(return Err(Error::OutOfMemory))
    }
    for field in fields {
        let pos = cons.pos();
        let present = match cons.peek_tag()? {
            Some(tag) => field.matches(tag),
            None => false,
        };
        if present {
            let value = field.take_from(cons)?;
            if let Some(default) = field.default() {
                if cons.mode().is_restricted() && default.matches(&value) {
                    xerr!(return Err(Error::invalid_at(
                        "explicitly encoded default value", pos
                    )))
                }
            }
            slots.push(Some(value));
        }
        else if let Some(default) = field.default() {
            trace!(field = field.name(), "using default value");
            slots.push(Some(default.to_value()));
        }
        else if field.is_optional() {
            trace!(field = field.name(), "optional field absent");
            slots.push(None);
        }
        else {
            xerr!(return Err(field.missing(cons)))
        }
    }
    Ok(Value::Sequence(slots))
}

/// Decodes the elements of a SEQUENCE OF until the content is exhausted.
fn take_elements(
    element: &TypeDesc, cons: &mut Constructed
) -> Result<Value, Error> {
    let mut items = Vec::new();
    while !cons.is_exhausted() {
        if items.try_reserve(1).is_err() {
            xerr!(return Err(Error::OutOfMemory))
        }
        items.push(element.take_from(cons)?);
    }
    Ok(Value::SequenceOf(items))
}

/// Decodes a CHOICE by dispatching on the tag of the next value.
fn take_choice(
    ty: &TypeDesc,
    alternatives: &'static [FieldDesc],
    cons: &mut Constructed
) -> Result<Value, Error> {
    let tag = match cons.peek_tag()? {
        Some(tag) => tag,
        None => xerr!(return Err(cons.missing_value())),
    };
    match alternatives.iter().position(|alt| alt.matches(tag)) {
        Some(index) => {
            let alt = &alternatives[index];
            trace!(
                ty = ty.name(), alternative = alt.name(), %tag,
                "CHOICE dispatch"
            );
            let value = alt.take_from(cons)?;
            Choice::new(index, value).map(Value::Choice)
        }
        None => {
            trace!(ty = ty.name(), %tag, "no CHOICE alternative");
            xerr!(Err(Error::UnknownChoice { found: tag, pos: cons.pos() }))
        }
    }
}

/// Decodes the content of a primitive value.
fn scalar_from_primitive(
    scalar: Scalar, prim: &mut Primitive
) -> Result<Value, Error> {
    match scalar {
        Scalar::Boolean => prim.to_bool().map(Value::Boolean),
        Scalar::Integer { min, max } => {
            let value = prim.to_i64()?;
            if value < min || value > max {
                xerr!(return Err(prim.content_err("integer out of range")))
            }
            Ok(Value::Integer(value))
        }
        Scalar::Null => prim.to_null().map(|_| Value::Null),
        Scalar::OctetString => prim.take_all().map(Value::OctetString),
        Scalar::String(kind) => kind.take_content(prim).map(Value::String),
        Scalar::Oid => Oid::from_primitive(prim).map(Value::Oid),
        Scalar::BitString => {
            BitString::from_primitive(prim).map(Value::BitString)
        }
        Scalar::GeneralizedTime => {
            GeneralizedTime::from_primitive(prim).map(Value::Time)
        }
    }
}
