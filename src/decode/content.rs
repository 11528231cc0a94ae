//! Parsing DER encoded values.
//!
//! This is an internal module. Its public types are re-exported by the
//! parent.

use bytes::Bytes;
use crate::error::Error;
use crate::length::Length;
use crate::mode::Mode;
use crate::tag::Tag;
use super::source::{Pos, SliceSource};


//------------ Content -------------------------------------------------------

/// The content octets of an encoded value.
///
/// A value is either primitive, containing actual octets of an actual value,
/// or constructed, in which case its content contains additional encoded
/// values. This enum is useful for cases where a certain type may be encoded
/// as either a primitive value or a complex constructed value.
///
/// Note that this type represents the content octets only, i.e., it does not
/// contain the tag of the value.
pub enum Content<'s> {
    /// The value is a primitive value.
    Primitive(Primitive<'s>),

    /// The value is a constructed value.
    Constructed(Constructed<'s>),
}

impl<'s> Content<'s> {
    /// Checks that the content has been parsed completely.
    ///
    /// Returns an invalid value error if not.
    fn check_exhausted(&self) -> Result<(), Error> {
        match self {
            Content::Primitive(inner) => inner.check_exhausted(),
            Content::Constructed(inner) => inner.check_exhausted(),
        }
    }

    /// Returns the decoding mode used by the value.
    pub fn mode(&self) -> Mode {
        match self {
            Content::Primitive(inner) => inner.mode(),
            Content::Constructed(inner) => inner.mode(),
        }
    }

    /// Returns whether this value is a primitive value.
    pub fn is_primitive(&self) -> bool {
        matches!(self, Content::Primitive(_))
    }

    /// Returns whether this value is a constructed value.
    pub fn is_constructed(&self) -> bool {
        matches!(self, Content::Constructed(_))
    }

    /// Converts a reference into one to a primitive value or errors out.
    pub fn as_primitive(&mut self) -> Result<&mut Primitive<'s>, Error> {
        match self {
            Content::Primitive(inner) => Ok(inner),
            Content::Constructed(inner) => {
                xerr!(Err(Error::invalid_at(
                    "expected primitive value", inner.start
                )))
            }
        }
    }

    /// Converts a reference into one to a constructed value or errors out.
    pub fn as_constructed(
        &mut self
    ) -> Result<&mut Constructed<'s>, Error> {
        match self {
            Content::Primitive(inner) => {
                xerr!(Err(Error::invalid_at(
                    "expected constructed value", inner.start
                )))
            }
            Content::Constructed(inner) => Ok(inner),
        }
    }
}


//------------ Primitive -----------------------------------------------------

/// The content octets of a primitive value.
///
/// You will receive a reference to a value of this type through a closure,
/// possibly wrapped in a `Content` value. Your task will be to read out all
/// the octets of the value before returning from the closure or produce an
/// error if the value isn’t correctly encoded. If you read less octets than
/// are available, whoever called the closure will produce an error after
/// you returned. Thus, you can read as many octets as you expect and not
/// bother to check whether that was all available octets.
///
/// The most basic way to do this is through the primitive’s methods
/// [`take_u8`][Self::take_u8] and [`slice_all`][Self::slice_all]. There are
/// also a number of methods to convert the content into common types. These
/// are prefixed by `to_`.
///
/// All methods that decode data will honour the decoding mode and enforce
/// that data is encoded according to the mode.
#[derive(Debug)]
pub struct Primitive<'s> {
    /// The content octets not yet consumed.
    source: SliceSource<'s>,

    /// The position of the first content octet.
    start: Pos,

    /// The decoding mode to operate in.
    mode: Mode,
}

/// # Value Management
///
impl<'s> Primitive<'s> {
    /// Creates a new primitive from the given content and mode.
    fn new(source: SliceSource<'s>, mode: Mode) -> Self {
        Primitive { start: source.pos(), source, mode }
    }

    /// Returns the current decoding mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the position of the first content octet.
    pub fn start(&self) -> Pos {
        self.start
    }

    /// Returns an invalid value error for this value.
    pub fn content_err(&self, msg: &'static str) -> Error {
        Error::invalid_at(msg, self.start)
    }
}

/// # Low-level Access
///
impl<'s> Primitive<'s> {
    /// Returns the number of remaining octets.
    pub fn remaining(&self) -> usize {
        self.source.len()
    }

    /// Takes a single octet.
    pub fn take_u8(&mut self) -> Result<u8, Error> {
        self.source.take_u8()
    }

    /// Takes all remaining octets as a slice of the underlying data.
    pub fn slice_all(&mut self) -> Result<&'s [u8], Error> {
        self.source.take_slice(self.source.len())
    }

    /// Takes all remaining octets into a newly allocated bytes value.
    ///
    /// Returns [`Error::OutOfMemory`] if the allocation fails.
    pub fn take_all(&mut self) -> Result<Bytes, Error> {
        let slice = self.slice_all()?;
        copy_bytes(slice)
    }

    /// Skips over all remaining octets.
    pub fn skip_all(&mut self) -> Result<(), Error> {
        self.source.advance(self.source.len())
    }

    /// Checks that all content has been consumed.
    pub fn check_exhausted(&self) -> Result<(), Error> {
        if self.source.is_empty() {
            Ok(())
        }
        else {
            xerr!(Err(Error::invalid_at("trailing data", self.source.pos())))
        }
    }
}

/// # High-level Decoding
///
impl<'s> Primitive<'s> {
    /// Parses the primitive value as a BOOLEAN value.
    pub fn to_bool(&mut self) -> Result<bool, Error> {
        if self.remaining() != 1 {
            xerr!(return Err(self.content_err("invalid boolean length")))
        }
        let res = self.take_u8()?;
        if self.mode.is_restricted() {
            match res {
                0 => Ok(false),
                0xFF => Ok(true),
                _ => xerr!(Err(self.content_err("invalid boolean"))),
            }
        }
        else {
            Ok(res != 0)
        }
    }

    /// Parses the primitive value as a NULL value.
    pub fn to_null(&mut self) -> Result<(), Error> {
        if self.remaining() != 0 {
            xerr!(return Err(self.content_err("invalid null")))
        }
        Ok(())
    }

    /// Parses the primitive value as an INTEGER limited to a `i8`.
    pub fn to_i8(&mut self) -> Result<i8, Error> {
        crate::int::i8_from_primitive(self)
    }

    /// Parses the primitive value as an INTEGER limited to a `i16`.
    pub fn to_i16(&mut self) -> Result<i16, Error> {
        crate::int::i16_from_primitive(self)
    }

    /// Parses the primitive value as an INTEGER limited to a `i32`.
    pub fn to_i32(&mut self) -> Result<i32, Error> {
        crate::int::i32_from_primitive(self)
    }

    /// Parses the primitive value as an INTEGER limited to a `i64`.
    pub fn to_i64(&mut self) -> Result<i64, Error> {
        crate::int::i64_from_primitive(self)
    }

    /// Parses the primitive value as an INTEGER limited to a `u8`.
    pub fn to_u8(&mut self) -> Result<u8, Error> {
        crate::int::u8_from_primitive(self)
    }

    /// Parses the primitive value as an INTEGER limited to a `u16`.
    pub fn to_u16(&mut self) -> Result<u16, Error> {
        crate::int::u16_from_primitive(self)
    }

    /// Parses the primitive value as an INTEGER limited to a `u32`.
    pub fn to_u32(&mut self) -> Result<u32, Error> {
        crate::int::u32_from_primitive(self)
    }

    /// Parses the primitive value as an INTEGER limited to a `u64`.
    pub fn to_u64(&mut self) -> Result<u64, Error> {
        crate::int::u64_from_primitive(self)
    }
}

/// # Support for Testing
///
impl<'s> Primitive<'s> {
    /// Decode a bytes slice via a closure.
    ///
    /// This method can be used in testing code for decoding primitive
    /// values by providing a bytes slice with the content. For instance,
    /// decoding the `to_bool` method could be tested like this:
    ///
    /// ```
    /// use kder::Mode;
    /// use kder::decode::Primitive;
    ///
    /// assert_eq!(
    ///     Primitive::decode_slice(
    ///         b"\x00".as_ref(), Mode::Der,
    ///         |prim| prim.to_bool()
    ///     ).unwrap(),
    ///     false
    /// )
    /// ```
    pub fn decode_slice<F, T>(
        data: &'s [u8],
        mode: Mode,
        op: F
    ) -> Result<T, Error>
    where F: FnOnce(&mut Primitive<'s>) -> Result<T, Error> {
        let mut prim = Self::new(SliceSource::new(data), mode);
        let res = op(&mut prim)?;
        prim.check_exhausted()?;
        Ok(res)
    }
}


//------------ Constructed ---------------------------------------------------

/// The content octets of a constructed value.
///
/// You will only ever receive a mutable reference to a value of this type
/// as an argument to a closure provided to some function. The closure will
/// have to process all content of the constructed value.
///
/// Since constructed values consist of a sequence of values, the methods
/// allow you to process these values one by one. The most basic of these
/// are [`take_value`][Self::take_value] and
/// [`take_opt_value`][Self::take_opt_value] which process exactly one
/// value or up to one value. A number of convenience functions exists on
/// top of them for commonly encountered types and cases.
///
/// Because the caller of your closure checks whether all content has been
/// advanced over and raises an error if not, you only need to read as many
/// values as you expected to be present and can simply return when you think
/// you are done.
///
/// The outermost level created by [`decode`][Self::decode] is special: it
/// is not limited by a length and anything left after the closure returns
/// is simply not consumed.
#[derive(Debug)]
pub struct Constructed<'s> {
    /// The content octets not yet consumed.
    source: SliceSource<'s>,

    /// The position of the first content octet.
    start: Pos,

    /// The decoding mode to use.
    mode: Mode,

    /// The nesting level of this value, starting at zero.
    depth: usize,

    /// Whether the content is delimited by a length.
    bounded: bool,
}

/// The maximum nesting level of constructed values.
///
/// Input that nests deeper is rejected as an invalid value.
pub const MAX_DEPTH: usize = 64;

/// # General Management
///
impl<'s> Constructed<'s> {
    /// Creates a new constructed content value.
    fn new(
        source: SliceSource<'s>, mode: Mode, depth: usize, bounded: bool
    ) -> Self {
        Constructed { start: source.pos(), source, mode, depth, bounded }
    }

    /// Decodes values from the beginning of `data`.
    ///
    /// The function will start decoding of `data` in the given mode. It
    /// will pass a constructed content value to the closure `op` which
    /// has to take the values it wants to process.
    ///
    /// Returns the closure’s result and the number of octets it consumed.
    /// Octets left over are not an error.
    pub fn decode<F, T>(
        data: &'s [u8], mode: Mode, op: F
    ) -> Result<(T, usize), Error>
    where F: FnOnce(&mut Constructed<'s>) -> Result<T, Error> {
        let mut cons = Self::new(SliceSource::new(data), mode, 0, false);
        let res = op(&mut cons)?;
        Ok((res, data.len() - cons.source.len()))
    }

    /// Returns the decoding mode used by the value.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the position of the next octet.
    pub fn pos(&self) -> Pos {
        self.source.pos()
    }
}

/// # Fundamental Reading
///
impl<'s> Constructed<'s> {
    /// Checks whether all content has been advanced over.
    ///
    /// The outermost level never has trailing data.
    pub fn check_exhausted(&self) -> Result<(), Error> {
        if !self.bounded || self.source.is_empty() {
            Ok(())
        }
        else {
            xerr!(Err(Error::invalid_at("trailing data", self.source.pos())))
        }
    }

    /// Returns whether we have reached the end of the content.
    pub fn is_exhausted(&self) -> bool {
        self.source.is_empty()
    }

    /// Returns the tag of the next value without consuming it.
    ///
    /// Returns `Ok(None)` at the end of the content.
    pub fn peek_tag(&self) -> Result<Option<Tag>, Error> {
        Tag::peek(&self.source)
    }

    /// Returns the error for a value that should be there but isn’t.
    ///
    /// If a length limits our content, the encoding is short a value.
    /// Otherwise, the input simply ended too early.
    pub fn missing_value(&self) -> Error {
        if self.bounded {
            Error::invalid_at("missing value", self.source.pos())
        }
        else {
            Error::truncated(self.source.pos())
        }
    }

    /// Processes the next value.
    ///
    /// If `expected` is not `None`, the method will only process a value
    /// with the given tag and return `Ok(None)` if there isn’t another value
    /// or if the next value has a different tag.
    ///
    /// If `expected` is `None`, the method will process a value with any
    /// tag and only return `Ok(None)` if it reached the end of the value.
    ///
    /// The closure `op` receives both the tag and content for the next
    /// value. It must process the value, advancing the source to its end
    /// or return an error.
    fn process_next_value<F, T>(
        &mut self,
        expected: Option<Tag>,
        op: F
    ) -> Result<Option<T>, Error>
    where F: FnOnce(Tag, &mut Content<'s>) -> Result<T, Error> {
        if let Some(expected) = expected {
            if self.peek_tag()? != Some(expected) {
                return Ok(None)
            }
        }
        else if self.source.is_empty() {
            return Ok(None)
        }

        let (tag, constructed) = Tag::take_from(&mut self.source)?;
        let length = Length::take_from(&mut self.source, self.mode)?;
        let content = self.source.split_off(length.to_usize())?;

        let mut content = if constructed {
            if self.depth >= MAX_DEPTH {
                xerr!(return Err(Error::invalid_at(
                    "nesting too deep", content.pos()
                )))
            }
            Content::Constructed(
                Constructed::new(content, self.mode, self.depth + 1, true)
            )
        }
        else {
            Content::Primitive(Primitive::new(content, self.mode))
        };
        let res = op(tag, &mut content)?;
        content.check_exhausted()?;
        Ok(Some(res))
    }

    /// Returns the error for a value with the wrong tag.
    fn unexpected(&self, expected: Tag) -> Error {
        match self.peek_tag() {
            Ok(Some(found)) => Error::UnexpectedTag {
                expected, found, pos: self.source.pos()
            },
            Ok(None) => self.missing_value(),
            Err(err) => err,
        }
    }
}

/// # Processing Contained Values
///
/// The methods in this section each process one value of the constructed
/// value’s content.
impl<'s> Constructed<'s> {
    /// Process one value of content.
    ///
    /// The closure `op` receives the tag and content of the next value
    /// and must process it completely, advancing to the content’s end.
    ///
    /// Upon success, the method returns the closure’s return value. The
    /// method returns an error if there isn’t at least one more value
    /// available or if the closure returns one.
    pub fn take_value<F, T>(&mut self, op: F) -> Result<T, Error>
    where F: FnOnce(Tag, &mut Content<'s>) -> Result<T, Error> {
        match self.process_next_value(None, op)? {
            Some(res) => Ok(res),
            None => xerr!(Err(self.missing_value())),
        }
    }

    /// Processes an optional value.
    ///
    /// If there is at least one more value available, the closure `op` is
    /// given the tag and content of that value and must process it
    /// completely. If there are no more values available, the method
    /// returns `Ok(None)`.
    pub fn take_opt_value<F, T>(&mut self, op: F) -> Result<Option<T>, Error>
    where F: FnOnce(Tag, &mut Content<'s>) -> Result<T, Error> {
        self.process_next_value(None, op)
    }

    /// Processes a value with the given tag.
    ///
    /// If the next value has the tag `expected`, its content is being given
    /// to the closure which has to process it completely and return whatever
    /// is being returned upon success.
    ///
    /// The method will return [`Error::UnexpectedTag`] if it encounters any
    /// other tag and a missing value error at the end of the content.
    pub fn take_value_if<F, T>(
        &mut self,
        expected: Tag,
        op: F
    ) -> Result<T, Error>
    where F: FnOnce(&mut Content<'s>) -> Result<T, Error> {
        let res = self.process_next_value(Some(expected), |_, content| {
            op(content)
        })?;
        match res {
            Some(res) => Ok(res),
            None => xerr!(Err(self.unexpected(expected))),
        }
    }

    /// Processes an optional value with the given tag.
    ///
    /// If the next value has a different tag or if the end of the value has
    /// been reached, the method returns `Ok(None)`.
    pub fn take_opt_value_if<F, T>(
        &mut self,
        expected: Tag,
        op: F
    ) -> Result<Option<T>, Error>
    where F: FnOnce(&mut Content<'s>) -> Result<T, Error> {
        self.process_next_value(Some(expected), |_, content| op(content))
    }

    /// Processes a constructed value with the given tag.
    ///
    /// A primitive value with the right tag is an invalid value.
    pub fn take_constructed_if<F, T>(
        &mut self,
        expected: Tag,
        op: F
    ) -> Result<T, Error>
    where F: FnOnce(&mut Constructed<'s>) -> Result<T, Error> {
        self.take_value_if(expected, |content| {
            op(content.as_constructed()?)
        })
    }

    /// Processes an optional constructed value with the given tag.
    pub fn take_opt_constructed_if<F, T>(
        &mut self,
        expected: Tag,
        op: F
    ) -> Result<Option<T>, Error>
    where F: FnOnce(&mut Constructed<'s>) -> Result<T, Error> {
        self.take_opt_value_if(expected, |content| {
            op(content.as_constructed()?)
        })
    }

    /// Processes a primitive value with the given tag.
    ///
    /// A constructed value with the right tag is an invalid value.
    pub fn take_primitive_if<F, T>(
        &mut self,
        expected: Tag,
        op: F
    ) -> Result<T, Error>
    where F: FnOnce(&mut Primitive<'s>) -> Result<T, Error> {
        self.take_value_if(expected, |content| {
            op(content.as_primitive()?)
        })
    }

    /// Processes an optional primitive value with the given tag.
    pub fn take_opt_primitive_if<F, T>(
        &mut self,
        expected: Tag,
        op: F
    ) -> Result<Option<T>, Error>
    where F: FnOnce(&mut Primitive<'s>) -> Result<T, Error> {
        self.take_opt_value_if(expected, |content| {
            op(content.as_primitive()?)
        })
    }

    /// Skips over the next value whatever it is.
    ///
    /// Returns `Ok(None)` at the end of the content.
    pub fn skip_one(&mut self) -> Result<Option<()>, Error> {
        self.take_opt_value(|_, content| skip_content(content))
    }
}

/// # Processing Standard Values
///
/// These methods provide short-cuts for processing fundamental values in
/// their natural form.
impl<'s> Constructed<'s> {
    /// Processes and returns a mandatory boolean value.
    pub fn take_bool(&mut self) -> Result<bool, Error> {
        self.take_primitive_if(Tag::BOOLEAN, |prim| prim.to_bool())
    }

    /// Processes a mandatory NULL value.
    pub fn take_null(&mut self) -> Result<(), Error> {
        self.take_primitive_if(Tag::NULL, |prim| prim.to_null())
    }

    /// Processes a mandatory INTEGER limited to a `i32`.
    pub fn take_i32(&mut self) -> Result<i32, Error> {
        self.take_primitive_if(Tag::INTEGER, |prim| prim.to_i32())
    }

    /// Processes a mandatory INTEGER limited to a `u32`.
    pub fn take_u32(&mut self) -> Result<u32, Error> {
        self.take_primitive_if(Tag::INTEGER, |prim| prim.to_u32())
    }

    /// Processes a mandatory INTEGER limited to a `i64`.
    pub fn take_i64(&mut self) -> Result<i64, Error> {
        self.take_primitive_if(Tag::INTEGER, |prim| prim.to_i64())
    }

    /// Processes a mandatory SEQUENCE value.
    ///
    /// This is a shortcut for `self.take_constructed_if(Tag::SEQUENCE, op)`.
    pub fn take_sequence<F, T>(&mut self, op: F) -> Result<T, Error>
    where F: FnOnce(&mut Constructed<'s>) -> Result<T, Error> {
        self.take_constructed_if(Tag::SEQUENCE, op)
    }

    /// Processes an optional SEQUENCE value.
    pub fn take_opt_sequence<F, T>(
        &mut self, op: F
    ) -> Result<Option<T>, Error>
    where F: FnOnce(&mut Constructed<'s>) -> Result<T, Error> {
        self.take_opt_constructed_if(Tag::SEQUENCE, op)
    }
}


//------------ Helper Functions ----------------------------------------------

/// Skips over the content of a value and all values nested within.
fn skip_content(content: &mut Content) -> Result<(), Error> {
    match content {
        Content::Primitive(inner) => inner.skip_all(),
        Content::Constructed(inner) => {
            while inner.skip_one()?.is_some() { }
            Ok(())
        }
    }
}

/// Copies a slice into a bytes value with fallible allocation.
pub(crate) fn copy_bytes(slice: &[u8]) -> Result<Bytes, Error> {
    let mut vec = Vec::new();
    if vec.try_reserve_exact(slice.len()).is_err() {
        xerr!(return Err(Error::OutOfMemory))
    }
    vec.extend_from_slice(slice);
    Ok(vec.into())
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use crate::error::ErrorKind;
    use super::*;

    #[test]
    fn decode_reports_consumed() {
        let (res, len) = Mode::Der.decode(
            b"\x02\x01\x05\xff\xff", |cons| cons.take_i32()
        ).unwrap();
        assert_eq!(res, 5);
        assert_eq!(len, 3);
    }

    #[test]
    fn constructed_trailing_data() {
        let err = Mode::Der.decode(
            b"\x30\x06\x02\x01\x01\x02\x01\x02", |cons| {
                cons.take_sequence(|cons| cons.take_i32())
            }
        ).unwrap_err();
        assert_eq!(err, Error::invalid_at("trailing data", Pos::from(5)));
    }

    #[test]
    fn primitive_trailing_data() {
        let err = Mode::Der.decode(b"\x05\x01\x00", |cons| {
            cons.take_primitive_if(Tag::NULL, |prim| prim.skip_all())?;
            cons.take_null()
        }).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Truncated);

        let err = Mode::Der.decode(b"\x04\x02\x00\x00", |cons| {
            cons.take_primitive_if(Tag::OCTET_STRING, |prim| prim.take_u8())
        }).unwrap_err();
        assert_eq!(err, Error::invalid_at("trailing data", Pos::from(3)));
    }

    #[test]
    fn unexpected_and_missing() {
        let err = Mode::Der.decode(b"\x1b\x00", |cons| {
            cons.take_i32()
        }).unwrap_err();
        assert_eq!(
            err,
            Error::UnexpectedTag {
                expected: Tag::INTEGER, found: Tag::GENERAL_STRING,
                pos: Pos::from(0)
            }
        );

        // Top level: the input is simply too short.
        let err = Mode::Der.decode(b"", |cons| cons.take_i32()).unwrap_err();
        assert_eq!(err, Error::truncated(Pos::from(0)));

        // Within a sequence: the sequence is short a value.
        let err = Mode::Der.decode(b"\x30\x00", |cons| {
            cons.take_sequence(|cons| cons.take_i32())
        }).unwrap_err();
        assert_eq!(err, Error::invalid_at("missing value", Pos::from(2)));
    }

    #[test]
    fn wrong_form() {
        let err = Mode::Der.decode(b"\x22\x00", |cons| {
            cons.take_i32()
        }).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        let err = Mode::Der.decode(b"\x10\x00", |cons| {
            cons.take_sequence(|_| Ok(()))
        }).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn truncated_content() {
        let err = Mode::Der.decode(b"\x30\x05\x02\x01\x01", |cons| {
            cons.take_sequence(|cons| cons.take_i32())
        }).unwrap_err();
        assert_eq!(err, Error::truncated(Pos::from(2)));
    }

    #[test]
    fn optional_values() {
        let ((a, b, c), len) = Mode::Der.decode(b"\x30\x03\x02\x01\x07", |cons| {
            cons.take_sequence(|cons| {
                let a = cons.take_opt_primitive_if(
                    Tag::BOOLEAN, |prim| prim.to_bool()
                )?;
                let b = cons.take_opt_primitive_if(
                    Tag::INTEGER, |prim| prim.to_i32()
                )?;
                let c = cons.take_opt_value(|_, content| {
                    content.as_primitive()?.skip_all()
                })?;
                Ok((a, b, c))
            })
        }).unwrap();
        assert_eq!((a, b, c, len), (None, Some(7), None, 5));
    }

    #[test]
    fn nesting_limit() {
        fn nested(depth: usize) -> Vec<u8> {
            let mut res = Vec::new();
            for _ in 0..depth {
                let mut outer = vec![0x30];
                let len = Length::new(res.len());
                let mut buf = [0u8; 16];
                let mut target = crate::encode::SliceTarget::new(&mut buf);
                len.write_encoded(&mut target).unwrap();
                outer.extend_from_slice(target.as_slice());
                outer.extend_from_slice(&res);
                res = outer;
            }
            res
        }

        fn take_all(cons: &mut Constructed) -> Result<usize, Error> {
            match cons.take_opt_sequence(take_all)? {
                Some(depth) => Ok(depth + 1),
                None => Ok(0),
            }
        }

        let data = nested(MAX_DEPTH);
        assert_eq!(Mode::Der.decode(&data, take_all).unwrap().0, MAX_DEPTH);
        let data = nested(MAX_DEPTH + 1);
        assert_eq!(
            Mode::Der.decode(&data, take_all).unwrap_err().kind(),
            ErrorKind::InvalidValue
        );
    }

    #[test]
    fn skip_one() {
        let (count, len) = Mode::Der.decode(
            b"\x30\x03\x02\x01\x01\x04\x00", |cons| {
                let mut count = 0;
                while cons.skip_one()?.is_some() {
                    count += 1
                }
                Ok(count)
            }
        ).unwrap();
        assert_eq!((count, len), (2, 7));
    }

    #[test]
    fn bool_and_null() {
        assert_eq!(
            Primitive::decode_slice(b"\xff", Mode::Der, |p| p.to_bool()),
            Ok(true)
        );
        assert!(
            Primitive::decode_slice(b"\x01", Mode::Der, |p| p.to_bool())
                .is_err()
        );
        assert_eq!(
            Primitive::decode_slice(b"\x01", Mode::Ber, |p| p.to_bool()),
            Ok(true)
        );
        assert!(
            Primitive::decode_slice(b"", Mode::Ber, |p| p.to_bool()).is_err()
        );
        assert_eq!(
            Primitive::decode_slice(b"", Mode::Der, |p| p.to_null()),
            Ok(())
        );
        assert!(
            Primitive::decode_slice(b"\x00", Mode::Der, |p| p.to_null())
                .is_err()
        );
    }
}
