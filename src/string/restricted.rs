//! Restricted character strings.
//!
//! This is an internal module. Its public types are re-exported by the
//! parent.

use std::{fmt, hash, str};
use std::borrow::Cow;
use std::marker::PhantomData;
use bytes::Bytes;
use crate::decode::{self, Constructed, Primitive};
use crate::encode::{PrimitiveContent, SliceTarget};
use crate::error::Error;
use crate::tag::Tag;


//------------ StringKind ----------------------------------------------------

/// The restricted character string types known to the crate.
///
/// The kind determines both the natural tag of a string and which octets
/// it may contain. Type descriptors use it directly while the typed
/// [`RestrictedString`] picks it up via its [`CharSet`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum StringKind {
    /// GeneralString: any octet except NUL.
    General,

    /// PrintableString: letters, digits, space, and `'()+,-./:=?`.
    Printable,

    /// IA5String: 7 bit ASCII.
    Ia5,

    /// UTF8String: valid UTF-8.
    Utf8,
}

impl StringKind {
    /// Returns the natural tag of strings of this kind.
    pub const fn tag(self) -> Tag {
        match self {
            StringKind::General => Tag::GENERAL_STRING,
            StringKind::Printable => Tag::PRINTABLE_STRING,
            StringKind::Ia5 => Tag::IA5_STRING,
            StringKind::Utf8 => Tag::UTF8_STRING,
        }
    }

    /// Returns whether `content` is a valid string of this kind.
    pub fn check(self, content: &[u8]) -> bool {
        match self {
            StringKind::General => !content.contains(&0),
            StringKind::Printable => {
                content.iter().all(|&x| is_printable(x))
            }
            StringKind::Ia5 => content.is_ascii(),
            StringKind::Utf8 => str::from_utf8(content).is_ok(),
        }
    }

    /// Checks `content`, producing an error mentioning the kind if invalid.
    fn check_err(self, content: &[u8]) -> Result<(), &'static str> {
        if self.check(content) {
            return Ok(())
        }
        Err(match self {
            StringKind::General => "invalid GeneralString",
            StringKind::Printable => "invalid PrintableString",
            StringKind::Ia5 => "invalid IA5String",
            StringKind::Utf8 => "invalid UTF8String",
        })
    }

    /// Decodes the content of a primitive value as a string of this kind.
    pub fn take_content(self, prim: &mut Primitive) -> Result<Bytes, Error> {
        let content = prim.slice_all()?;
        if let Err(msg) = self.check_err(content) {
            xerr!(return Err(prim.content_err(msg)))
        }
        decode::copy_bytes(content)
    }
}

fn is_printable(x: u8) -> bool {
    x.is_ascii_alphanumeric() || matches!(
        x,
        b' ' | b'\'' | b'(' | b')' | b'+' | b',' | b'-' | b'.' | b'/'
        | b':' | b'=' | b'?'
    )
}


//------------ CharSet -------------------------------------------------------

/// The character set of a restricted character string type.
pub trait CharSet {
    /// The kind of string using this character set.
    const KIND: StringKind;
}

/// The character set of a GeneralString.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct GeneralCharSet;

impl CharSet for GeneralCharSet {
    const KIND: StringKind = StringKind::General;
}

/// The character set of a PrintableString.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct PrintableCharSet;

impl CharSet for PrintableCharSet {
    const KIND: StringKind = StringKind::Printable;
}

/// The character set of an IA5String.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Ia5CharSet;

impl CharSet for Ia5CharSet {
    const KIND: StringKind = StringKind::Ia5;
}

/// The character set of a UTF8String.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Utf8CharSet;

impl CharSet for Utf8CharSet {
    const KIND: StringKind = StringKind::Utf8;
}

/// A string of any octet but NUL. This is what Kerberos uses for names.
pub type GeneralString = RestrictedString<GeneralCharSet>;

/// A string of printable ASCII characters.
pub type PrintableString = RestrictedString<PrintableCharSet>;

/// An ASCII string.
pub type Ia5String = RestrictedString<Ia5CharSet>;

/// A UTF-8 string.
pub type Utf8String = RestrictedString<Utf8CharSet>;


//------------ RestrictedString ----------------------------------------------

/// A character string restricted to a certain character set.
///
/// Values of this type keep the encoded content octets and are guaranteed
/// to only contain octets allowed by the character set `L`. Since a
/// GeneralString may contain octets of any legacy encoding, the content is
/// not necessarily valid UTF-8. Use [`as_str`][Self::as_str] or
/// [`to_str_lossy`][Self::to_str_lossy] to get at it as text.
pub struct RestrictedString<L> {
    bytes: Bytes,
    marker: PhantomData<L>,
}

impl<L: CharSet> RestrictedString<L> {
    /// Creates a string from a bytes value if it contains valid content.
    pub fn new(bytes: Bytes) -> Result<Self, Error> {
        if let Err(msg) = L::KIND.check_err(bytes.as_ref()) {
            xerr!(return Err(Error::invalid(msg)))
        }
        Ok(Self::new_unchecked(bytes))
    }

    /// Creates a string by copying a slice.
    pub fn from_slice(slice: &[u8]) -> Result<Self, Error> {
        if let Err(msg) = L::KIND.check_err(slice) {
            xerr!(return Err(Error::invalid(msg)))
        }
        decode::copy_bytes(slice).map(Self::new_unchecked)
    }

    fn new_unchecked(bytes: Bytes) -> Self {
        RestrictedString { bytes, marker: PhantomData }
    }

    /// Returns the content octets.
    pub fn as_slice(&self) -> &[u8] {
        self.bytes.as_ref()
    }

    /// Returns a reference to the underlying bytes value.
    pub fn as_bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// Returns the content as a string slice if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        str::from_utf8(self.bytes.as_ref()).ok()
    }

    /// Returns the content as a string replacing invalid sequences.
    pub fn to_str_lossy(&self) -> Cow<str> {
        String::from_utf8_lossy(self.bytes.as_ref())
    }

    /// Returns the number of content octets.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns whether the string is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns a copy that doesn’t share memory with `self`.
    pub fn try_clone(&self) -> Result<Self, Error> {
        decode::copy_bytes(self.as_slice()).map(Self::new_unchecked)
    }
}

/// # Decoding
///
impl<L: CharSet> RestrictedString<L> {
    /// Takes a single string value from constructed content.
    pub fn take_from(cons: &mut Constructed) -> Result<Self, Error> {
        cons.take_primitive_if(L::KIND.tag(), Self::from_primitive)
    }

    /// Takes an optional string value from constructed content.
    pub fn take_opt_from(
        cons: &mut Constructed
    ) -> Result<Option<Self>, Error> {
        cons.take_opt_primitive_if(L::KIND.tag(), Self::from_primitive)
    }

    /// Takes the content of an implicitly tagged string.
    pub fn from_primitive(prim: &mut Primitive) -> Result<Self, Error> {
        L::KIND.take_content(prim).map(Self::new_unchecked)
    }
}


//--- FromStr

impl<L: CharSet> str::FromStr for RestrictedString<L> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slice(s.as_bytes())
    }
}


//--- Clone, PartialEq, Eq, Hash

impl<L> Clone for RestrictedString<L> {
    fn clone(&self) -> Self {
        RestrictedString { bytes: self.bytes.clone(), marker: PhantomData }
    }
}

impl<L, M> PartialEq<RestrictedString<M>> for RestrictedString<L> {
    fn eq(&self, other: &RestrictedString<M>) -> bool {
        self.bytes == other.bytes
    }
}

impl<L> Eq for RestrictedString<L> { }

impl<L> hash::Hash for RestrictedString<L> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.bytes.hash(state)
    }
}


//--- AsRef

impl<L> AsRef<[u8]> for RestrictedString<L> {
    fn as_ref(&self) -> &[u8] {
        self.bytes.as_ref()
    }
}


//--- Display and Debug

impl<L> fmt::Display for RestrictedString<L> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(self.bytes.as_ref()))
    }
}

impl<L: CharSet> fmt::Debug for RestrictedString<L> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}({:?})", L::KIND.tag(), self.to_str_lossy())
    }
}


//--- PrimitiveContent

impl<L: CharSet> PrimitiveContent for &'_ RestrictedString<L> {
    const TAG: Tag = L::KIND.tag();

    fn encoded_len(self) -> usize {
        self.bytes.len()
    }

    fn write_encoded(
        self,
        target: &mut SliceTarget
    ) -> Result<usize, Error> {
        target.prepend(self.bytes.as_ref())
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use std::str::FromStr;
    use crate::encode::Values;
    use crate::error::ErrorKind;
    use crate::mode::Mode;
    use super::*;

    #[test]
    fn char_sets() {
        assert!(StringKind::General.check(b"EXAMPLE.COM\xe4"));
        assert!(!StringKind::General.check(b"EXAMPLE\0COM"));
        assert!(StringKind::Printable.check(b"Hello, World (42)?"));
        assert!(!StringKind::Printable.check(b"a@b"));
        assert!(!StringKind::Printable.check(b"a*b"));
        assert!(StringKind::Ia5.check(b"user@EXAMPLE.COM"));
        assert!(!StringKind::Ia5.check(b"\x80"));
        assert!(StringKind::Utf8.check("Grüße".as_bytes()));
        assert!(!StringKind::Utf8.check(b"\xc3"));
        for kind in [
            StringKind::General, StringKind::Printable,
            StringKind::Ia5, StringKind::Utf8
        ] {
            assert!(kind.check(b""));
        }
    }

    #[test]
    fn general_string_realm() {
        let realm = GeneralString::from_str("EXAMPLE.COM").unwrap();
        let encoded = (&realm).encode().to_vec().unwrap();
        assert_eq!(encoded, b"\x1b\x0bEXAMPLE.COM");

        let (decoded, len) = Mode::Der.decode(
            &encoded, GeneralString::take_from
        ).unwrap();
        assert_eq!(len, 13);
        assert_eq!(decoded, realm);
        assert_eq!(decoded.as_str(), Some("EXAMPLE.COM"));
    }

    #[test]
    fn bad_content() {
        assert_eq!(
            Mode::Der.decode(
                b"\x13\x01@", PrintableString::take_from
            ).unwrap_err().kind(),
            ErrorKind::InvalidValue
        );
        assert_eq!(
            Mode::Der.decode(
                b"\x1b\x02a\0", GeneralString::take_from
            ).unwrap_err().kind(),
            ErrorKind::InvalidValue
        );
        assert!(Utf8String::from_slice(b"\xff").is_err());
        assert!(Ia5String::new(Bytes::from_static(b"caf\xe9")).is_err());
    }

    #[test]
    fn wrong_tag() {
        assert_eq!(
            Mode::Der.decode(
                b"\x16\x01a", GeneralString::take_from
            ).unwrap_err().kind(),
            ErrorKind::UnexpectedTag
        );
    }

    #[test]
    fn lossy_display() {
        let s = GeneralString::from_slice(b"M\xfcller").unwrap();
        assert_eq!(s.as_str(), None);
        assert_eq!(s.to_string(), "M\u{fffd}ller");
    }
}
