//! The source of data to decode from.
//!
//! This is a private module. Its public items are re-exported by the parent.

use std::fmt;
use crate::error::Error;


//------------ SliceSource ---------------------------------------------------

/// A forward cursor over a slice of octets.
///
/// The source keeps the part of the slice not yet consumed together with
/// the position of its first octet in the overall data. It never allocates
/// and never copies; values taken from it borrow from the underlying data.
///
/// All methods that consume data check the amount available first and
/// return [`Error::Truncated`] if there isn’t enough. In that case nothing
/// is consumed.
///
/// The type is `Copy`. Copying a source and working on the copy is the way
/// to look ahead without consuming anything.
#[derive(Clone, Copy, Debug)]
pub struct SliceSource<'s> {
    /// The data not yet consumed.
    data: &'s [u8],

    /// The position of the start of `data`.
    pos: usize,
}

impl<'s> SliceSource<'s> {
    /// Creates a new source atop the given data.
    pub fn new(data: &'s [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the position of the next octet.
    pub fn pos(&self) -> Pos {
        self.pos.into()
    }

    /// Returns the data not yet consumed.
    pub fn remaining(&self) -> &'s [u8] {
        self.data
    }

    /// Returns the number of octets not yet consumed.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns whether all data has been consumed.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the next octet without consuming it.
    pub fn peek_u8(&self) -> Option<u8> {
        self.data.first().copied()
    }

    /// Consumes `len` octets.
    pub fn advance(&mut self, len: usize) -> Result<(), Error> {
        self.take_slice(len).map(|_| ())
    }

    /// Takes a single octet from the source.
    pub fn take_u8(&mut self) -> Result<u8, Error> {
        match self.data.split_first() {
            Some((&head, tail)) => {
                self.data = tail;
                self.pos += 1;
                Ok(head)
            }
            None => xerr!(Err(Error::truncated(self.pos()))),
        }
    }

    /// Takes the next `len` octets from the source.
    pub fn take_slice(&mut self, len: usize) -> Result<&'s [u8], Error> {
        if len > self.data.len() {
            xerr!(return Err(Error::truncated(self.pos())))
        }
        let (head, tail) = self.data.split_at(len);
        self.data = tail;
        self.pos += len;
        Ok(head)
    }

    /// Splits off a source for the next `len` octets.
    ///
    /// The returned source covers exactly the next `len` octets and keeps
    /// reporting positions relative to the overall data. The octets are
    /// consumed from `self`.
    pub fn split_off(&mut self, len: usize) -> Result<Self, Error> {
        let pos = self.pos;
        let data = self.take_slice(len)?;
        Ok(SliceSource { data, pos })
    }
}


//------------ Pos -----------------------------------------------------------

/// The position of an octet in the data being decoded.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Pos(usize);

impl Pos {
    /// Returns the position as an offset from the start of the data.
    pub fn to_usize(self) -> usize {
        self.0
    }
}

impl From<usize> for Pos {
    fn from(pos: usize) -> Pos {
        Pos(pos)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use crate::error::ErrorKind;
    use super::*;

    #[test]
    fn take() {
        let mut source = SliceSource::new(b"\x01\x02\x03\x04\x05");
        assert_eq!(source.take_u8(), Ok(1));
        assert_eq!(source.take_slice(2), Ok(b"\x02\x03".as_ref()));
        assert_eq!(source.pos(), Pos::from(3));
        assert_eq!(source.peek_u8(), Some(4));
        assert_eq!(source.len(), 2);
        source.advance(2).unwrap();
        assert!(source.is_empty());
        assert_eq!(source.peek_u8(), None);
    }

    #[test]
    fn truncation_consumes_nothing() {
        let mut source = SliceSource::new(b"\x01\x02");
        let err = source.take_slice(3).unwrap_err();
        assert_eq!(err, Error::truncated(Pos::from(0)));
        assert_eq!(source.len(), 2);
        assert_eq!(source.advance(5).unwrap_err().kind(), ErrorKind::Truncated);
        source.advance(2).unwrap();
        assert_eq!(
            source.take_u8().unwrap_err(), Error::truncated(Pos::from(2))
        );
    }

    #[test]
    fn split_off() {
        let mut source = SliceSource::new(b"\x01\x02\x03\x04");
        source.advance(1).unwrap();
        let mut inner = source.split_off(2).unwrap();
        assert_eq!(inner.pos(), Pos::from(1));
        assert_eq!(inner.remaining(), b"\x02\x03");
        assert_eq!(source.remaining(), b"\x04");
        inner.advance(2).unwrap();
        assert_eq!(
            inner.take_u8().unwrap_err(), Error::truncated(Pos::from(3))
        );
        assert_eq!(
            source.split_off(2).unwrap_err(), Error::truncated(Pos::from(3))
        );
    }
}
