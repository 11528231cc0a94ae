//! DER encoded bit strings.
//!
//! This is a private module. Its public items are re-exported by the parent.

use bytes::Bytes;
use crate::decode::{self, Constructed, Primitive};
use crate::encode::{PrimitiveContent, SliceTarget};
use crate::error::Error;
use crate::tag::Tag;


//------------ BitString -----------------------------------------------------

/// A bit string value.
///
/// Bit strings are a sequence of bits. Unlike
/// [`OctetString`][crate::string::OctetString]s, they do not need to contain
/// a multiple of eight bits. Kerberos uses them for flag fields where bit
/// zero is the most significant bit of the first octet.
///
/// # Encoding
///
/// The first octet of the content contains the number of unused bits in
/// the last octet and the following octets contain the bits with the first
/// bit in the most significant bit of the octet. If there are no further
/// octets, the number of unused bits has to be zero. In DER, the unused
/// bits have to be zero and only the primitive form is allowed.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct BitString {
    /// The number of unused bits in the last byte.
    unused: u8,

    /// The bytes of the bit string.
    bits: Bytes,
}

impl BitString {
    /// Creates a new bit string.
    ///
    /// Fails if `unused` is larger than 7 or if it isn’t zero for empty
    /// `bits`. Unused bits set in the last octet are cleared.
    pub fn new(unused: u8, bits: Bytes) -> Result<Self, Error> {
        Self::check(unused, bits.as_ref()).map_err(Error::invalid)?;
        let mask = Self::unused_mask(unused);
        match bits.last() {
            Some(&last) if last & mask != 0 => {
                let mut vec = Vec::new();
                if vec.try_reserve_exact(bits.len()).is_err() {
                    xerr!(return Err(Error::OutOfMemory))
                }
                vec.extend_from_slice(bits.as_ref());
                if let Some(last) = vec.last_mut() {
                    *last &= !mask;
                }
                Ok(BitString { unused, bits: vec.into() })
            }
            _ => Ok(BitString { unused, bits })
        }
    }

    /// Checks the unused count against the octets.
    fn check(unused: u8, bits: &[u8]) -> Result<(), &'static str> {
        if unused > 7 {
            Err("invalid bit string with large initial octet")
        }
        else if bits.is_empty() && unused != 0 {
            Err("invalid bit string (length 1 but unused is not zero)")
        }
        else {
            Ok(())
        }
    }

    /// Returns the mask covering the unused bits of the last octet.
    fn unused_mask(unused: u8) -> u8 {
        ((1u16 << unused) - 1) as u8
    }

    /// Returns the value of the given bit.
    ///
    /// Bits beyond the end of the string are `false`.
    pub fn bit(&self, bit: usize) -> bool {
        if bit >= self.bit_len() {
            return false
        }
        self.bits[bit >> 3] & (0x80 >> (bit & 7)) != 0
    }

    /// Returns the number of bits in the bit string.
    pub fn bit_len(&self) -> usize {
        (self.bits.len() << 3) - usize::from(self.unused)
    }

    /// Returns the number of unused bits in the last octet.
    pub fn unused(&self) -> u8 {
        self.unused
    }

    /// Returns the number of octets in the bit string.
    pub fn octet_len(&self) -> usize {
        self.bits.len()
    }

    /// Returns a slice of the octets in the bit string.
    pub fn octet_slice(&self) -> &[u8] {
        self.bits.as_ref()
    }

    /// Returns a copy that doesn’t share memory with `self`.
    pub fn try_clone(&self) -> Result<Self, Error> {
        Ok(BitString {
            unused: self.unused,
            bits: decode::copy_bytes(self.bits.as_ref())?,
        })
    }
}

/// # Decoding
///
impl BitString {
    /// Takes a single bit string value from constructed content.
    pub fn take_from(cons: &mut Constructed) -> Result<Self, Error> {
        cons.take_primitive_if(Tag::BIT_STRING, Self::from_primitive)
    }

    /// Takes an optional bit string value from constructed content.
    pub fn take_opt_from(
        cons: &mut Constructed
    ) -> Result<Option<Self>, Error> {
        cons.take_opt_primitive_if(Tag::BIT_STRING, Self::from_primitive)
    }

    /// Parses the content octets of a bit string value.
    pub fn from_primitive(prim: &mut Primitive) -> Result<Self, Error> {
        if prim.remaining() == 0 {
            xerr!(return Err(prim.content_err("empty bit string")))
        }
        let unused = prim.take_u8()?;
        let bits = prim.slice_all()?;
        if let Err(msg) = Self::check(unused, bits) {
            xerr!(return Err(prim.content_err(msg)))
        }
        if prim.mode().is_restricted() {
            if let Some(&last) = bits.last() {
                if last & Self::unused_mask(unused) != 0 {
                    xerr!(return Err(prim.content_err(
                        "non-zero unused bits in bit string"
                    )))
                }
            }
        }
        Ok(BitString { unused, bits: decode::copy_bytes(bits)? })
    }
}


//--- PrimitiveContent

impl PrimitiveContent for &'_ BitString {
    const TAG: Tag = Tag::BIT_STRING;

    fn encoded_len(self) -> usize {
        self.bits.len() + 1
    }

    fn write_encoded(
        self,
        target: &mut SliceTarget
    ) -> Result<usize, Error> {
        let len = target.prepend(self.bits.as_ref())?;
        Ok(len + target.prepend_u8(self.unused)?)
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
    fn bits() {
        let bits = BitString::new(
            4, Bytes::from_static(b"\x50\x10")
        ).unwrap();
        assert_eq!(bits.bit_len(), 12);
        assert!(!bits.bit(0));
        assert!(bits.bit(1));
        assert!(bits.bit(3));
        assert!(bits.bit(11));
        assert!(!bits.bit(12));
        assert!(!bits.bit(100));
    }

    #[test]
    fn new_clears_unused_bits() {
        let bits = BitString::new(3, Bytes::from_static(b"\xff")).unwrap();
        assert_eq!(bits.octet_slice(), b"\xf8");
        assert!(BitString::new(8, Bytes::from_static(b"\x00")).is_err());
        assert!(BitString::new(1, Bytes::new()).is_err());
    }

    #[test]
    fn decode() {
        let (bits, len) = Mode::Der.decode(
            b"\x03\x05\x00\x40\x81\x00\x10", BitString::take_from
        ).unwrap();
        assert_eq!(len, 7);
        assert_eq!(bits.bit_len(), 32);
        assert!(bits.bit(1));
        assert!(bits.bit(8));
        assert!(bits.bit(15));
        assert!(bits.bit(27));

        let (bits, _) = Mode::Der.decode(
            b"\x03\x01\x00", BitString::take_from
        ).unwrap();
        assert_eq!(bits.bit_len(), 0);
    }

    #[test]
    fn decode_unused_bits() {
        let data = b"\x03\x02\x04\xf1";
        assert_eq!(
            Mode::Der.decode(data, BitString::take_from)
                .unwrap_err().kind(),
            ErrorKind::InvalidValue
        );
        assert!(Mode::Ber.decode(data, BitString::take_from).is_ok());
        assert!(Mode::Ber.decode(b"\x03\x01\x01", BitString::take_from)
            .is_err());
        assert!(Mode::Ber.decode(b"\x03\x02\x08\x00", BitString::take_from)
            .is_err());
        assert_eq!(
            Mode::Ber.decode(b"\x03\x00", BitString::take_from)
                .unwrap_err().kind(),
            ErrorKind::InvalidValue
        );
    }

    #[test]
    fn encode() {
        let bits = BitString::new(
            0, Bytes::from_static(b"\x40\x81\x00\x10")
        ).unwrap();
        assert_eq!(
            (&bits).encode().to_vec().unwrap(),
            b"\x03\x05\x00\x40\x81\x00\x10"
        );
    }
}
