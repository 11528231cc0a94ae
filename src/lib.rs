//! A DER codec runtime for Kerberos protocol types.
//!
//! This crate encodes and decodes data in the Distinguished Encoding Rules
//! (DER) of ASN.1 as used by the Kerberos V5 protocol. It provides three
//! layers:
//!
//! * The [`decode`] and [`encode`] modules contain the low-level codec.
//!   Decoding runs closures over a cursor into a slice; encoding works
//!   backward into a fixed-size [`SliceTarget`][encode::SliceTarget], so
//!   that content is written before the header that announces its length.
//! * The [`desc`] and [`engine`] modules describe types through static
//!   [`TypeDesc`]s and encode, decode, copy, and free generic
//!   [`Value`]s for any such type.
//! * The [`binding`] module defines the [`Asn1Type`] trait for Rust types
//!   representing ASN.1 types, and [`krb`] implements it for the basic
//!   Kerberos types.
//!
//! All operations return a [`Result`] with the single [`Error`] type of the
//! crate. Decoding is strict DER by default. A lenient [`Mode::Ber`] accepts
//! non-minimal encodings but still rejects indefinite lengths.
//!
//! Errors are small values without any context. If you need to know where
//! exactly an error was raised, install a `tracing` subscriber and enable
//! the trace level for the `kder::error` target.

// The debug module needs to be first so the macro is available everywhere.
#[macro_use] mod debug;

pub use self::binding::Asn1Type;
pub use self::desc::TypeDesc;
pub use self::engine::Value;
pub use self::error::{Error, ErrorKind};
pub use self::mode::Mode;
pub use self::oid::Oid;
pub use self::string::{
    BitString, GeneralString, Ia5String, OctetString, PrintableString,
    Utf8String,
};
pub use self::tag::Tag;
pub use self::time::GeneralizedTime;

pub mod binding;
pub mod decode;
pub mod desc;
pub mod encode;
pub mod engine;
pub mod int;
pub mod krb;
pub mod oid;
pub mod string;
pub mod time;

mod error;
mod length;
mod mode;
mod tag;
