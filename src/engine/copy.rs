//! Copying and releasing values via their descriptor.
//!
//! This is a private module. It only adds methods to `TypeDesc`.

use bytes::Bytes;
use tracing::trace;
use crate::decode::copy_bytes;
use crate::desc::{Kind, TypeDesc};
use crate::error::Error;
use super::encode::{alternative_of, elements_of, fields_of, ScalarContent};
use super::value::{Choice, Value};


/// # Copying and Releasing
///
impl TypeDesc {
    /// Creates a deep copy of `value`.
    ///
    /// The copy doesn’t share any memory with the original. All memory is
    /// allocated fallibly, resulting in [`Error::OutOfMemory`] if that
    /// fails. Whatever has been copied before an error is released again.
    pub fn copy(&self, value: &Value) -> Result<Value, Error> {
        match self.kind() {
            Kind::Primitive(_, scalar) => {
                ScalarContent::from_value(scalar, value)?;
                copy_scalar(value)
            }
            Kind::Sequence(_, fields) => {
                let slots = fields_of(value, fields)?;
                let mut res = Vec::new();
                if res.try_reserve_exact(slots.len()).is_err() {
                    xerr!(return Err(Error::OutOfMemory))
                }
                for (field, slot) in fields.iter().zip(slots) {
                    let slot = match slot {
                        Some(value) => Some(field.ty().copy(value)?),
                        None if field.allows_none() => None,
                        None => {
                            xerr!(return Err(Error::invalid(
                                "missing field value"
                            )))
                        }
                    };
                    res.push(slot);
                }
                Ok(Value::Sequence(res))
            }
            Kind::SequenceOf(_, element) => {
                let items = elements_of(value)?;
                let mut res = Vec::new();
                if res.try_reserve_exact(items.len()).is_err() {
                    xerr!(return Err(Error::OutOfMemory))
                }
                for item in items {
                    res.push(element.copy(item)?);
                }
                Ok(Value::SequenceOf(res))
            }
            Kind::Choice(alternatives) => {
                let (alt, choice) = alternative_of(value, alternatives)?;
                let inner = alt.ty().copy(choice.value())?;
                Choice::new(choice.index(), inner).map(Value::Choice)
            }
            Kind::Explicit(_, inner) => inner.copy(value),
        }
    }

    /// Releases `value` and everything it owns.
    pub fn free(&self, value: Value) {
        trace!(ty = self.name(), value = value.variant_name(), "releasing");
        drop(value)
    }
}

/// Copies a primitive value.
fn copy_scalar(value: &Value) -> Result<Value, Error> {
    let bytes = |bytes: &Bytes| copy_bytes(bytes.as_ref());
    Ok(match value {
        Value::OctetString(value) => Value::OctetString(bytes(value)?),
        Value::String(value) => Value::String(bytes(value)?),
        Value::Oid(value) => Value::Oid(value.try_clone()?),
        Value::BitString(value) => Value::BitString(value.try_clone()?),
        Value::Boolean(value) => Value::Boolean(*value),
        Value::Integer(value) => Value::Integer(*value),
        Value::Null => Value::Null,
        Value::Time(value) => Value::Time(*value),
        Value::Sequence(_) | Value::SequenceOf(_) | Value::Choice(_) => {
            xerr!(return Err(Error::invalid("expected primitive value")))
        }
    })
}
