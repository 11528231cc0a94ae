//! The identifier octets of a DER encoded value.
//!
//! This is a private module. Its public items are re-exported by the parent.

use std::fmt;
use crate::decode::SliceSource;
use crate::encode::SliceTarget;
use crate::error::Error;


//------------ Tag -----------------------------------------------------------

/// The tag of a DER encoded value.
///
/// Each encoded value starts with a sequence of one or more octets called
/// the _identifier octets._ They encode both the tag of the value as well as
/// whether the value uses primitive or constructed encoding. The `Tag` type
/// represents the tag only. Whether a value is constructed is returned
/// separately by [`take_from`][Self::take_from] and given to
/// [`write_encoded`][Self::write_encoded].
///
/// The tag consists of two parts: the class and the number – the `Tag`
/// type includes both of them.
///
/// # Limitations
///
/// We keep up to four identifier octets. That is, we only support tag
/// numbers between 0 and 0x1f_ffff. Kerberos itself never goes beyond 30.
//
//  The tag is stored in its encoded form with the constructed bit cleared.
//  Unused trailing octets are zero.
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct Tag([u8; 4]);

/// # Constants for Often Used Tag Values
///
impl Tag {
    /// The mask for checking the class.
    const CLASS_MASK: u8 = 0xc0;

    /// The mask for checking whether the value is constructed.
    const CONSTRUCTED_MASK: u8 = 0x20;

    /// The mask for the tag number in the first octet.
    const SINGLEBYTE_DATA_MASK: u8 = 0x1f;

    /// The mask for tag number data in subsequent octets.
    const MULTIBYTE_DATA_MASK: u8 = 0x7f;

    /// The bit that is set in all but the last subsequent octet.
    const MORE_OCTETS_MASK: u8 = 0x80;

    /// The largest tag number that fits into the first octet.
    const MAX_SINGLE_OCTET: u32 = 0x1e;

    /// The largest tag number we can represent.
    pub const MAX_NUMBER: u32 = 0x001f_ffff;

    const UNIVERSAL: u8 = 0x00;
    const APPLICATION: u8 = 0x40;
    const CONTEXT_SPECIFIC: u8 = 0x80;
    const PRIVATE: u8 = 0xc0;

    //--- Universal Tags
    //
    // See clause 8.4 of X.690.

    /// The tag for the BOOLEAN type, UNIVERSAL 1.
    pub const BOOLEAN: Self = Tag([1, 0, 0, 0]);

    /// The tag for the INTEGER type, UNIVERSAL 2.
    pub const INTEGER: Self = Tag([2, 0, 0, 0]);

    /// The tag for the BIT STRING type, UNIVERSAL 3.
    pub const BIT_STRING: Self = Tag([3, 0, 0, 0]);

    /// The tag for the OCTET STRING type, UNIVERSAL 4.
    pub const OCTET_STRING: Self = Tag([4, 0, 0, 0]);

    /// The tag for the NULL type, UNIVERSAL 5.
    pub const NULL: Self = Tag([5, 0, 0, 0]);

    /// The tag for the OBJECT IDENTIFIER type, UNIVERSAL 6.
    pub const OID: Self = Tag([6, 0, 0, 0]);

    /// The tag for the ENUMERATED type, UNIVERSAL 10.
    pub const ENUMERATED: Self = Tag([10, 0, 0, 0]);

    /// The tag for the UTF8String type, UNIVERSAL 12.
    pub const UTF8_STRING: Self = Tag([12, 0, 0, 0]);

    /// The tag for the SEQUENCE and SEQUENCE OF types, UNIVERSAL 16.
    pub const SEQUENCE: Self = Tag([16, 0, 0, 0]);

    /// The tag for the SET and SET OF types, UNIVERSAL 17.
    pub const SET: Self = Tag([17, 0, 0, 0]);

    /// The tag for the PrintableString type, UNIVERSAL 19.
    pub const PRINTABLE_STRING: Self = Tag([19, 0, 0, 0]);

    /// The tag for the IA5String type, UNIVERSAL 22.
    pub const IA5_STRING: Self = Tag([22, 0, 0, 0]);

    /// The tag for the GeneralizedTime type, UNIVERSAL 24.
    pub const GENERALIZED_TIME: Self = Tag([24, 0, 0, 0]);

    /// The tag for the GeneralString type, UNIVERSAL 27.
    pub const GENERAL_STRING: Self = Tag([27, 0, 0, 0]);
}

/// # Creation and Access
///
impl Tag {
    /// Creates a tag from the class octet and the number.
    ///
    /// Numbers up to 30 go into the first octet. Larger numbers use the
    /// high tag number form: the first octet has all five number bits set
    /// and the number follows in base 128, most significant digit first,
    /// with the top bit set on every octet but the last.
    ///
    /// # Panics
    ///
    /// The function panics if `number` is greater than
    /// [`MAX_NUMBER`][Self::MAX_NUMBER].
    const fn new(class: u8, number: u32) -> Self {
        assert!(number <= Tag::MAX_NUMBER, "tag number too large");
        if number <= Tag::MAX_SINGLE_OCTET {
            Tag([class | number as u8, 0, 0, 0])
        }
        else if number <= 0x7f {
            Tag([class | Tag::SINGLEBYTE_DATA_MASK, number as u8, 0, 0])
        }
        else if number <= 0x3fff {
            Tag([
                class | Tag::SINGLEBYTE_DATA_MASK,
                (number >> 7) as u8 | Tag::MORE_OCTETS_MASK,
                number as u8 & Tag::MULTIBYTE_DATA_MASK,
                0
            ])
        }
        else {
            Tag([
                class | Tag::SINGLEBYTE_DATA_MASK,
                (number >> 14) as u8 | Tag::MORE_OCTETS_MASK,
                (number >> 7) as u8 | Tag::MORE_OCTETS_MASK,
                number as u8 & Tag::MULTIBYTE_DATA_MASK,
            ])
        }
    }

    /// Creates a new tag in the universal class with the given number.
    ///
    /// # Panics
    ///
    /// The function panics if `number` is greater than
    /// [`MAX_NUMBER`][Self::MAX_NUMBER].
    pub const fn universal(number: u32) -> Self {
        Tag::new(Tag::UNIVERSAL, number)
    }

    /// Creates a new tag in the application class with the given number.
    ///
    /// Kerberos messages use these for their outermost type.
    ///
    /// # Panics
    ///
    /// The function panics if `number` is greater than
    /// [`MAX_NUMBER`][Self::MAX_NUMBER].
    pub const fn application(number: u32) -> Self {
        Tag::new(Tag::APPLICATION, number)
    }

    /// Creates a new tag in the context specific class.
    ///
    /// # Panics
    ///
    /// The function panics if `number` is greater than
    /// [`MAX_NUMBER`][Self::MAX_NUMBER].
    pub const fn ctx(number: u32) -> Self {
        Tag::new(Tag::CONTEXT_SPECIFIC, number)
    }

    /// Creates a new tag in the private class with the given number.
    ///
    /// # Panics
    ///
    /// The function panics if `number` is greater than
    /// [`MAX_NUMBER`][Self::MAX_NUMBER].
    pub const fn private(number: u32) -> Self {
        Tag::new(Tag::PRIVATE, number)
    }

    /// Returns whether the tag is of the universal class.
    pub fn is_universal(self) -> bool {
        self.0[0] & Self::CLASS_MASK == Self::UNIVERSAL
    }

    /// Returns whether the tag is of the application class.
    pub fn is_application(self) -> bool {
        self.0[0] & Self::CLASS_MASK == Self::APPLICATION
    }

    /// Returns whether the tag is of the context specific class.
    pub fn is_context_specific(self) -> bool {
        self.0[0] & Self::CLASS_MASK == Self::CONTEXT_SPECIFIC
    }

    /// Returns whether the tag is of the private class.
    pub fn is_private(self) -> bool {
        self.0[0] & Self::CLASS_MASK == Self::PRIVATE
    }

    /// Returns the number of the tag.
    pub fn number(self) -> u32 {
        if self.0[0] & Tag::SINGLEBYTE_DATA_MASK != Tag::SINGLEBYTE_DATA_MASK {
            return u32::from(self.0[0] & Tag::SINGLEBYTE_DATA_MASK)
        }
        let mut res = 0;
        for &octet in &self.0[1..self.encoded_len()] {
            res = (res << 7) | u32::from(octet & Tag::MULTIBYTE_DATA_MASK);
        }
        res
    }
}

/// # Decoding and Encoding
///
impl Tag {
    /// Takes a tag from the beginning of a source.
    ///
    /// Upon success, returns both the tag and whether the value is
    /// constructed. The high tag number form has to be minimal in all
    /// modes since otherwise two encodings would produce different tags:
    /// numbers below 31 must use the single octet form and the first
    /// subsequent octet must not be 0x80.
    pub fn take_from(
        source: &mut SliceSource,
    ) -> Result<(Self, bool), Error> {
        let pos = source.pos();
        let first = source.take_u8()?;
        let constructed = first & Tag::CONSTRUCTED_MASK != 0;
        let mut data = [first & !Tag::CONSTRUCTED_MASK, 0, 0, 0];
        if data[0] & Tag::SINGLEBYTE_DATA_MASK != Tag::SINGLEBYTE_DATA_MASK {
            return Ok((Tag(data), constructed))
        }
        for i in 1..4 {
            let octet = source.take_u8()?;
            if i == 1 && octet == Tag::MORE_OCTETS_MASK {
                xerr!(return Err(Error::malformed_tag(
                    "leading zero in tag number", pos
                )))
            }
            data[i] = octet;
            if octet & Tag::MORE_OCTETS_MASK == 0 {
                let tag = Tag(data);
                if tag.number() <= Tag::MAX_SINGLE_OCTET {
                    xerr!(return Err(Error::malformed_tag(
                        "high tag number form for small number", pos
                    )))
                }
                return Ok((tag, constructed))
            }
        }
        xerr!(Err(Error::malformed_tag("tag number too large", pos)))
    }

    /// Returns the tag of the next value without consuming anything.
    ///
    /// Returns `Ok(None)` if the source is empty.
    pub fn peek(source: &SliceSource) -> Result<Option<Self>, Error> {
        if source.is_empty() {
            return Ok(None)
        }
        let mut source = *source;
        Tag::take_from(&mut source).map(|(tag, _)| Some(tag))
    }

    /// Returns the number of octets of the encoded form of the tag.
    pub fn encoded_len(self) -> usize {
        if self.0[0] & Tag::SINGLEBYTE_DATA_MASK != Tag::SINGLEBYTE_DATA_MASK {
            1
        }
        else if self.0[1] & Tag::MORE_OCTETS_MASK == 0 {
            2
        }
        else if self.0[2] & Tag::MORE_OCTETS_MASK == 0 {
            3
        }
        else {
            4
        }
    }

    /// Prepends the encoded tag to a target.
    ///
    /// If `constructed` is `true`, the encoded tag will signal a value in
    /// constructed encoding and primitive encoding otherwise. Returns the
    /// number of octets written.
    pub fn write_encoded(
        self,
        constructed: bool,
        target: &mut SliceTarget
    ) -> Result<usize, Error> {
        let mut buf = self.0;
        if constructed {
            buf[0] |= Tag::CONSTRUCTED_MASK
        }
        target.prepend(&buf[..self.encoded_len()])
    }
}


//--- Display and Debug

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Tag::BOOLEAN => f.write_str("BOOLEAN"),
            Tag::INTEGER => f.write_str("INTEGER"),
            Tag::BIT_STRING => f.write_str("BIT STRING"),
            Tag::OCTET_STRING => f.write_str("OCTET STRING"),
            Tag::NULL => f.write_str("NULL"),
            Tag::OID => f.write_str("OBJECT IDENTIFIER"),
            Tag::ENUMERATED => f.write_str("ENUMERATED"),
            Tag::UTF8_STRING => f.write_str("UTF8String"),
            Tag::SEQUENCE => f.write_str("SEQUENCE"),
            Tag::SET => f.write_str("SET"),
            Tag::PRINTABLE_STRING => f.write_str("PrintableString"),
            Tag::IA5_STRING => f.write_str("IA5String"),
            Tag::GENERALIZED_TIME => f.write_str("GeneralizedTime"),
            Tag::GENERAL_STRING => f.write_str("GeneralString"),
            tag => {
                match tag.0[0] & Tag::CLASS_MASK {
                    Tag::UNIVERSAL => write!(f, "[UNIVERSAL ")?,
                    Tag::APPLICATION => write!(f, "[APPLICATION ")?,
                    Tag::CONTEXT_SPECIFIC => write!(f, "[")?,
                    _ => write!(f, "[PRIVATE ")?,
                }
                write!(f, "{}]", tag.number())
            }
        }
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Tag({})", self)
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    const CLASSES: &[u8] = &[
        Tag::UNIVERSAL, Tag::APPLICATION, Tag::CONTEXT_SPECIFIC, Tag::PRIVATE
    ];

    fn encode(tag: Tag, constructed: bool) -> Vec<u8> {
        let mut buf = [0u8; 8];
        let mut target = SliceTarget::new(&mut buf);
        let len = tag.write_encoded(constructed, &mut target).unwrap();
        assert_eq!(len, tag.encoded_len());
        target.as_slice().to_vec()
    }

    fn decode(data: &[u8]) -> Result<(Tag, bool), Error> {
        let mut source = SliceSource::new(data);
        let res = Tag::take_from(&mut source)?;
        assert!(source.is_empty());
        Ok(res)
    }

    #[test]
    #[should_panic(expected = "tag number too large")]
    fn number_above_maximum() {
        let _ = Tag::ctx(Tag::MAX_NUMBER + 1);
    }

    #[test]
    fn numbers_round_trip() {
        let numbers = [
            0, 1, 5, 30, 31, 32, 0x7e, 0x7f, 0x80, 0x3ffe, 0x3fff,
            0x4000, Tag::MAX_NUMBER - 1, Tag::MAX_NUMBER
        ];
        for &class in CLASSES {
            for &number in &numbers {
                let tag = Tag::new(class, number);
                assert_eq!(tag.number(), number);
                for constructed in [false, true] {
                    let data = encode(tag, constructed);
                    assert_eq!(decode(&data), Ok((tag, constructed)));
                }
            }
        }
    }

    #[test]
    fn encoded_forms() {
        assert_eq!(encode(Tag::INTEGER, false), b"\x02");
        assert_eq!(encode(Tag::SEQUENCE, true), b"\x30");
        assert_eq!(encode(Tag::ctx(1), true), b"\xa1");
        assert_eq!(encode(Tag::application(30), true), b"\x7e");
        assert_eq!(encode(Tag::ctx(31), false), b"\x9f\x1f");
        assert_eq!(encode(Tag::ctx(201), false), b"\x9f\x81\x49");
        assert_eq!(
            encode(Tag::private(0x4000), false), b"\xdf\x81\x80\x00"
        );
    }

    #[test]
    fn class_predicates() {
        assert!(Tag::INTEGER.is_universal());
        assert!(Tag::application(1).is_application());
        assert!(Tag::ctx(200).is_context_specific());
        assert!(Tag::private(2).is_private());
        assert!(!Tag::ctx(2).is_private());
    }

    #[test]
    fn malformed_tags() {
        // Five identifier octets.
        assert_eq!(
            decode(b"\xff\x80\x80\x80\x80").unwrap_err().kind(),
            crate::ErrorKind::MalformedTag
        );
        // Leading zero digit.
        assert_eq!(
            decode(b"\x9f\x80\x20").unwrap_err().kind(),
            crate::ErrorKind::MalformedTag
        );
        // High form for a small number.
        assert_eq!(
            decode(b"\x9f\x05").unwrap_err().kind(),
            crate::ErrorKind::MalformedTag
        );
        // Cut short.
        assert_eq!(
            decode(b"\x9f\x81").unwrap_err().kind(),
            crate::ErrorKind::Truncated
        );
        assert_eq!(decode(b"").unwrap_err().kind(), crate::ErrorKind::Truncated);
    }

    #[test]
    fn peek_does_not_consume() {
        let source = SliceSource::new(b"\xa0\x03\x02\x01\x05");
        assert_eq!(Tag::peek(&source), Ok(Some(Tag::ctx(0))));
        assert_eq!(source.len(), 5);
        assert_eq!(Tag::peek(&SliceSource::new(b"")), Ok(None));
    }

    #[test]
    fn display() {
        assert_eq!(Tag::GENERAL_STRING.to_string(), "GeneralString");
        assert_eq!(Tag::ctx(3).to_string(), "[3]");
        assert_eq!(Tag::application(1).to_string(), "[APPLICATION 1]");
        assert_eq!(Tag::universal(7).to_string(), "[UNIVERSAL 7]");
        assert_eq!(format!("{:?}", Tag::private(9)), "Tag([PRIVATE 9])");
    }
}
