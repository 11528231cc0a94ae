//! Encoding data in DER.
//!
//! Encoding is done using helper types called _encoders_ that represent the
//! structure of the encoding. These types implement the trait [`Values`].
//! A type that can be encoded typically provides a method named `encode` (or
//! `encode_ref` if it isn’t `Copy`) that produces a value of its encoder
//! type representing the value’s encoding.  If necessary, they can also
//! provide a method `encode_as` that does the same thing but allows the
//! caller to provide a tag to use for encoding as is necessary for implicit
//! tagging.
//!
//! Encoders write into a [`SliceTarget`] from the back. Content is written
//! first so that its length is known when the header is prepended.
//!
//! The trait [`PrimitiveContent`] helps with producing encoders for types
//! that use the primitive encoding. Through this trait the types can declare
//! how their content is encoded and receive an automatic encoder type based
//! on that.

pub use self::primitive::{PrimitiveContent, Primitive};
pub use self::target::{Mark, SliceTarget};
pub use self::values::{
    Values,
    Constructed, Iter,
    iter, sequence, sequence_as, total_len, write_header,
};

mod primitive;
mod target;
mod values;
