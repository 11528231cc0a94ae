//! Typed bindings for protocol types.
//!
//! While the [`engine`][crate::engine] handles any type described by a
//! [`TypeDesc`] through the generic [`Value`][crate::engine::Value], most
//! code wants to deal with proper Rust types. These implement the
//! [`Asn1Type`] trait which provides the same operations as the engine:
//! encoding into a target, decoding from a slice, determining the encoded
//! length, copying, and releasing.
//!
//! A type implements the trait by providing its descriptor, a function
//! taking a value from constructed content, a fallible deep copy, and an
//! implementation of [`Values`]. The latter is usually done by defining an
//! `encode_ref` method returning a value encoder built from the types of
//! the [`encode`][crate::encode] module and forwarding to it. The
//! [`krb`][crate::krb] module is full of examples.

use tracing::debug;
use crate::decode::Constructed;
use crate::desc::TypeDesc;
use crate::encode::{SliceTarget, Values};
use crate::error::Error;
use crate::mode::Mode;


//------------ Asn1Type ------------------------------------------------------

/// A Rust type representing an ASN.1 type.
pub trait Asn1Type: Values + Sized {
    /// Returns the descriptor of the type.
    fn desc() -> &'static TypeDesc;

    /// Takes a value of the type from constructed content.
    fn take_from(cons: &mut Constructed) -> Result<Self, Error>;

    /// Creates a deep copy of the value using fallible allocations.
    fn copy(&self) -> Result<Self, Error>;


    //--- Provided methods

    /// Prepends the DER encoding of the value to `target`.
    ///
    /// Returns the number of octets written. On error, nothing is written.
    fn encode(&self, target: &mut SliceTarget) -> Result<usize, Error> {
        let res = self.encode_into(target);
        if let Err(ref err) = res {
            debug!(ty = Self::desc().name(), %err, "encoding failed");
        }
        res
    }

    /// Decodes a value from the beginning of `data`.
    ///
    /// Returns the value and the number of octets it occupied. Any data
    /// following the value is left alone.
    fn decode(data: &[u8], mode: Mode) -> Result<(Self, usize), Error> {
        let res = Constructed::decode(data, mode, Self::take_from);
        if let Err(ref err) = res {
            debug!(ty = Self::desc().name(), %err, "decoding failed");
        }
        res
    }

    /// Returns the length of the DER encoding of the value.
    fn length(&self) -> usize {
        self.encoded_len()
    }

    /// Releases the value and everything it owns.
    fn free(self) {
        drop(self)
    }
}


//------------ Helpers -------------------------------------------------------

/// Takes a SEQUENCE OF from constructed content.
///
/// The closure `op` is called for each element until the content of the
/// SEQUENCE is exhausted.
pub fn take_sequence_of<'s, T, F>(
    cons: &mut Constructed<'s>, mut op: F
) -> Result<Vec<T>, Error>
where F: FnMut(&mut Constructed<'s>) -> Result<T, Error> {
    cons.take_sequence(|cons| {
        let mut res = Vec::new();
        while !cons.is_exhausted() {
            if res.try_reserve(1).is_err() {
                xerr!(return Err(Error::OutOfMemory))
            }
            res.push(op(cons)?);
        }
        Ok(res)
    })
}

/// Copies a slice of values into a new vec.
pub fn copy_slice<T: Asn1Type>(items: &[T]) -> Result<Vec<T>, Error> {
    let mut res = Vec::new();
    if res.try_reserve_exact(items.len()).is_err() {
        xerr!(return Err(Error::OutOfMemory))
    }
    for item in items {
        res.push(item.copy()?);
    }
    Ok(res)
}
