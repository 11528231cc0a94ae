//! DER encoding for various string types.
//!
//! There are two types of strings for binary data. [`OctetString`]s contain
//! an unrestricted sequence of octets while [`BitString`]s contain a
//! sequence of bits that does not need to be of a length divisible by eight.
//!
//! In addition, there are the restricted character strings used by the
//! Kerberos protocol, all implemented atop the generic [`RestrictedString`]:
//!
//! * [`GeneralString`] allows any octet except NUL,
//! * [`Ia5String`] contains ASCII characters only,
//! * [`PrintableString`] contains letters, digits, and a few symbols,
//! * [`Utf8String`] contains UTF-8 encoded Unicode text.
//!
//! Only the primitive form is supported for all of them.

pub use self::bit::BitString;
pub use self::octet::OctetString;
pub use self::restricted::{
    CharSet, RestrictedString, StringKind,
    GeneralString, Ia5String, PrintableString, Utf8String,
    GeneralCharSet, Ia5CharSet, PrintableCharSet, Utf8CharSet,
};

mod bit;
mod octet;
mod restricted;
