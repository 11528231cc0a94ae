//! Parsing DER encoded data.
//!
//! Decoding works on a [`SliceSource`], a cursor over the input octets.
//! The entry point is [`Constructed::decode`] (or [`Mode::decode`]) which
//! hands the outermost level of the data to a closure. The closure then
//! takes the values it expects, descending into nested values through
//! further closures. When a closure returns, the caller checks that all
//! content has been consumed.
//!
//! Each level keeps only what it has successfully built so far. If a
//! closure fails, those partial results are dropped on the way out and
//! the error is returned.
//!
//! [`Mode::decode`]: crate::Mode::decode

pub use self::content::{Constructed, Content, MAX_DEPTH, Primitive};
pub use self::source::{Pos, SliceSource};

pub(crate) use self::content::copy_bytes;

mod content;
mod source;
