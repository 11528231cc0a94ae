//! ASN.1 Object Identifiers.
//!
//! This module contains the [`Oid`] type that implements object identifiers,
//! a construct used by ASN.1 to uniquely identify all sorts of things. The
//! type is also re-exported at the top-level.

use std::{fmt, str};
use bytes::Bytes;
use smallvec::SmallVec;
use crate::decode::{self, Constructed, Primitive};
use crate::encode::{PrimitiveContent, SliceTarget};
use crate::error::Error;
use crate::tag::Tag;


//------------ Oid -----------------------------------------------------------

/// An object identifier.
///
/// Object identifiers are globally unique, hierarchical values that are used
/// to identify objects or their type. When written, they are presented as a
/// sequence of integers separated by dots such as ‘1.2.840.113554.1.2.2’.
///
/// Values of this type keep a single object identifier in its encoded form,
/// i.e., the content octets of the DER value. They are always valid: each
/// sub-identifier is a minimally encoded base-128 number that fits into a
/// `u64`. You can create them by decoding, from dotted notation via
/// `FromStr`, or from a list of arcs via [`from_arcs`][Self::from_arcs].
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Oid(Bytes);

/// # Creation
///
impl Oid {
    /// Creates an object identifier from its content octets.
    pub fn from_content(content: Bytes) -> Result<Self, Error> {
        if !Self::check_content(content.as_ref()) {
            xerr!(return Err(Error::invalid("invalid object identifier")))
        }
        Ok(Oid(content))
    }

    /// Creates an object identifier from its arcs.
    ///
    /// There have to be at least two arcs, the first one can only be 0, 1,
    /// or 2, and if it is 0 or 1 the second one has to be less than 40.
    pub fn from_arcs(arcs: &[u64]) -> Result<Self, Error> {
        let (first, second, rest) = match arcs {
            [first, second, rest @ ..] => (*first, *second, rest),
            _ => xerr!(return Err(Error::invalid("too few arcs"))),
        };
        let head = match first {
            0 | 1 if second < 40 => first * 40 + second,
            2 => match second.checked_add(80) {
                Some(head) => head,
                None => xerr!(return Err(Error::invalid("arc too large"))),
            },
            _ => xerr!(return Err(Error::invalid("invalid first arcs"))),
        };
        let mut res: SmallVec<[u8; 32]> = SmallVec::new();
        push_subidentifier(&mut res, head);
        for &arc in rest {
            push_subidentifier(&mut res, arc);
        }
        decode::copy_bytes(&res).map(Oid)
    }

    /// Checks that content octets form a valid object identifier.
    fn check_content(content: &[u8]) -> bool {
        // The last octet has to end a sub-identifier.
        if content.last().map_or(true, |x| x & 0x80 != 0) {
            return false
        }
        // No leading zero digits and at most 64 bits per sub-identifier.
        content.split_inclusive(|x| x & 0x80 == 0).all(|group| {
            group[0] != 0x80
                && (group.len() < 10 || (group.len() == 10 && group[0] == 0x81))
        })
    }
}

/// # Decoding and Encoding
///
impl Oid {
    /// Takes an object identifier value from the source.
    pub fn take_from(cons: &mut Constructed) -> Result<Self, Error> {
        cons.take_primitive_if(Tag::OID, Self::from_primitive)
    }

    /// Takes an optional object identifier value from the source.
    pub fn take_opt_from(
        cons: &mut Constructed
    ) -> Result<Option<Self>, Error> {
        cons.take_opt_primitive_if(Tag::OID, Self::from_primitive)
    }

    /// Decodes the content of a primitive value.
    pub fn from_primitive(prim: &mut Primitive) -> Result<Self, Error> {
        let content = prim.slice_all()?;
        if !Self::check_content(content) {
            xerr!(return Err(prim.content_err("invalid object identifier")))
        }
        decode::copy_bytes(content).map(Oid)
    }

    /// Returns the content octets.
    pub fn as_slice(&self) -> &[u8] {
        self.0.as_ref()
    }

    /// Returns a copy that doesn’t share memory with `self`.
    pub fn try_clone(&self) -> Result<Self, Error> {
        decode::copy_bytes(self.0.as_ref()).map(Oid)
    }

    /// Returns an iterator over the arcs of the object identifier.
    pub fn iter(&self) -> Iter {
        Iter::new(self.0.as_ref())
    }
}

/// Appends a sub-identifier in base 128 to `target`.
fn push_subidentifier(target: &mut SmallVec<[u8; 32]>, value: u64) {
    let mut shift = (63 - value.max(1).leading_zeros()) / 7 * 7;
    loop {
        let octet = ((value >> shift) & 0x7F) as u8;
        if shift == 0 {
            target.push(octet);
            break
        }
        target.push(octet | 0x80);
        shift -= 7;
    }
}


//--- AsRef

impl AsRef<[u8]> for Oid {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}


//--- FromStr and Display

impl str::FromStr for Oid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut arcs: SmallVec<[u64; 16]> = SmallVec::new();
        for item in s.split('.') {
            match item.parse::<u64>() {
                Ok(arc) => arcs.push(arc),
                Err(_) => {
                    xerr!(return Err(Error::invalid("invalid arc")))
                }
            }
        }
        Self::from_arcs(&arcs)
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut first = true;
        for arc in self.iter() {
            if first {
                first = false;
            }
            else {
                f.write_str(".")?;
            }
            write!(f, "{}", arc)?;
        }
        Ok(())
    }
}


//--- PrimitiveContent

impl PrimitiveContent for &'_ Oid {
    const TAG: Tag = Tag::OID;

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


//------------ Iter ----------------------------------------------------------

/// An iterator over the arcs of an object identifier.
pub struct Iter<'a> {
    /// The remaining encoded sub-identifiers.
    slice: &'a [u8],

    /// The second arc if the first has been returned already.
    second: Option<u64>,

    /// Whether we are at the very start.
    start: bool,
}

impl<'a> Iter<'a> {
    fn new(slice: &'a [u8]) -> Self {
        Iter { slice, second: None, start: true }
    }

    /// Takes the next sub-identifier.
    fn next_subidentifier(&mut self) -> Option<u64> {
        let mut res = 0u64;
        for (i, &octet) in self.slice.iter().enumerate() {
            res = (res << 7) | u64::from(octet & 0x7F);
            if octet & 0x80 == 0 {
                self.slice = &self.slice[i + 1..];
                return Some(res)
            }
        }
        self.slice = b"";
        None
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = u64;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(second) = self.second.take() {
            return Some(second)
        }
        let value = self.next_subidentifier()?;
        if !self.start {
            return Some(value)
        }
        self.start = false;
        let (first, second) = match value {
            0..=39 => (0, value),
            40..=79 => (1, value - 40),
            _ => (2, value - 80),
        };
        self.second = Some(second);
        Some(first)
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use std::str::FromStr;
    use crate::encode::Values;
    use crate::mode::Mode;
    use super::*;

    /// The Kerberos V5 GSS-API mechanism.
    const KRB5: &[u8] = b"\x2a\x86\x48\x86\xf7\x12\x01\x02\x02";

    #[test]
    fn from_str_and_display() {
        let oid = Oid::from_str("1.2.840.113554.1.2.2").unwrap();
        assert_eq!(oid.as_slice(), KRB5);
        assert_eq!(oid.to_string(), "1.2.840.113554.1.2.2");
        assert_eq!(
            oid.iter().collect::<Vec<_>>(), [1, 2, 840, 113554, 1, 2, 2]
        );

        let oid = Oid::from_str("2.999.3").unwrap();
        assert_eq!(oid.as_slice(), b"\x88\x37\x03");
        assert_eq!(oid.to_string(), "2.999.3");

        let oid = Oid::from_arcs(&[0, 0]).unwrap();
        assert_eq!(oid.as_slice(), b"\x00");
        assert_eq!(oid.to_string(), "0.0");

        let oid = Oid::from_arcs(&[1, 3, u64::MAX]).unwrap();
        assert_eq!(oid.to_string(), format!("1.3.{}", u64::MAX));
        assert!(Oid::from_content(oid.0.clone()).is_ok());
    }

    #[test]
    fn bad_dotted() {
        assert!(Oid::from_str("1").is_err());
        assert!(Oid::from_str("3.1").is_err());
        assert!(Oid::from_str("1.40").is_err());
        assert!(Oid::from_str("1.2.x").is_err());
        assert!(Oid::from_str("").is_err());
    }

    #[test]
    fn decode() {
        let mut data = vec![0x06, KRB5.len() as u8];
        data.extend_from_slice(KRB5);
        let (oid, len) = Mode::Der.decode(&data, Oid::take_from).unwrap();
        assert_eq!(len, data.len());
        assert_eq!(oid.to_string(), "1.2.840.113554.1.2.2");
        assert_eq!((&oid).encode().to_vec().unwrap(), data);
    }

    #[test]
    fn bad_content() {
        let bad: [&[u8]; 4] = [
            b"\x06\x00",
            b"\x06\x02\x2a\x86",
            b"\x06\x02\x80\x01",
            b"\x06\x0b\x81\x81\x81\x81\x81\x81\x81\x81\x81\x81\x01",
        ];
        for data in bad {
            assert!(Mode::Ber.decode(data, Oid::take_from).is_err());
        }
    }
}
