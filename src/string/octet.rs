//! The OCTET STRING type.
//!
//! This is an internal module. Its public types are re-exported by the
//! parent.

use std::ops;
use bytes::Bytes;
use crate::decode::{self, Constructed, Primitive};
use crate::encode::{PrimitiveContent, SliceTarget};
use crate::error::Error;
use crate::tag::Tag;


//------------ OctetString ---------------------------------------------------

/// An octet string value.
///
/// An octet string is a sequence of octets, i.e., a glorified `[u8]`. In
/// DER, only the primitive form is allowed and since we never accept the
/// constructed form, the value simply wraps the content octets.
///
/// The type is used for the opaque parts of Kerberos messages such as
/// cipher text, checksums, and key material.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct OctetString(Bytes);

impl OctetString {
    /// Creates an octet string from a bytes value.
    pub fn new(bytes: Bytes) -> Self {
        OctetString(bytes)
    }

    /// Creates an octet string by copying a slice.
    pub fn from_slice(slice: &[u8]) -> Result<Self, Error> {
        decode::copy_bytes(slice).map(OctetString)
    }

    /// Returns the content as a slice.
    pub fn as_slice(&self) -> &[u8] {
        self.0.as_ref()
    }

    /// Returns a reference to the underlying bytes value.
    pub fn as_bytes(&self) -> &Bytes {
        &self.0
    }

    /// Converts the value into the underlying bytes value.
    pub fn into_bytes(self) -> Bytes {
        self.0
    }

    /// Returns the number of octets.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the string is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns a copy that doesn’t share memory with `self`.
    pub fn try_clone(&self) -> Result<Self, Error> {
        Self::from_slice(self.as_slice())
    }
}

/// # Decoding
///
impl OctetString {
    /// Takes a single octet string value from constructed content.
    pub fn take_from(cons: &mut Constructed) -> Result<Self, Error> {
        cons.take_primitive_if(Tag::OCTET_STRING, Self::from_primitive)
    }

    /// Takes an optional octet string value from constructed content.
    pub fn take_opt_from(
        cons: &mut Constructed
    ) -> Result<Option<Self>, Error> {
        cons.take_opt_primitive_if(Tag::OCTET_STRING, Self::from_primitive)
    }

    /// Takes the content of an implicitly tagged octet string.
    pub fn from_primitive(prim: &mut Primitive) -> Result<Self, Error> {
        prim.take_all().map(OctetString)
    }
}


//--- Deref and AsRef

impl ops::Deref for OctetString {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl AsRef<[u8]> for OctetString {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}


//--- From

impl From<Bytes> for OctetString {
    fn from(bytes: Bytes) -> Self {
        Self::new(bytes)
    }
}

impl From<&'static [u8]> for OctetString {
    fn from(slice: &'static [u8]) -> Self {
        Self::new(Bytes::from_static(slice))
    }
}


//--- PrimitiveContent

impl PrimitiveContent for &'_ OctetString {
    const TAG: Tag = Tag::OCTET_STRING;

    fn encoded_len(self) -> usize {
        self.0.len()
    }

    fn write_encoded(
        self,
        target: &mut SliceTarget
    ) -> Result<usize, Error> {
        target.prepend(self.0.as_ref())
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use crate::encode::Values;
    use crate::error::ErrorKind;
    use crate::mode::Mode;
    use super::*;

    #[test]
    fn decode_and_encode() {
        let data = b"\x04\x05hello";
        let (res, len) = Mode::Der.decode(
            data, OctetString::take_from
        ).unwrap();
        assert_eq!(len, 7);
        assert_eq!(res.as_slice(), b"hello");
        assert_eq!((&res).encode().to_vec().unwrap(), data);

        let (res, _) = Mode::Der.decode(
            b"\x04\x00", OctetString::take_from
        ).unwrap();
        assert!(res.is_empty());
    }

    #[test]
    fn constructed_form_is_rejected() {
        let data = b"\x24\x04\x04\x02ab";
        assert_eq!(
            Mode::Ber.decode(data, OctetString::take_from)
                .unwrap_err().kind(),
            ErrorKind::InvalidValue
        );
    }

    #[test]
    fn try_clone_is_deep() {
        let value = OctetString::from(&b"key"[..]);
        let copy = value.try_clone().unwrap();
        assert_eq!(value, copy);
        assert_ne!(value.as_slice().as_ptr(), copy.as_slice().as_ptr());
    }
}
