//! The target for encoding.
//!
//! This is a private module. The relevant items are re-exported by the
//! parent.

use crate::error::Error;


//------------ SliceTarget ---------------------------------------------------

/// A backward-growing cursor over a fixed-size buffer.
///
/// A DER header can only be written once the length of the content is
/// known. The target therefore fills its buffer from the end toward the
/// front: each encoder first writes its content and then prepends its
/// header. The octets written so far always form the tail of the buffer,
/// available via [`as_slice`][Self::as_slice].
///
/// Writing never allocates. If the space in front of the written data,
/// the headroom, is too small, [`Error::BufferFull`] is returned and
/// nothing is written.
#[derive(Debug)]
pub struct SliceTarget<'a> {
    /// The complete buffer.
    buf: &'a mut [u8],

    /// The index of the first written octet.
    start: usize,
}

impl<'a> SliceTarget<'a> {
    /// Creates a new, empty target writing into `buf`.
    pub fn new(buf: &'a mut [u8]) -> Self {
        let start = buf.len();
        SliceTarget { buf, start }
    }

    /// Returns the size of the underlying buffer.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Returns the number of octets that can still be written.
    pub fn headroom(&self) -> usize {
        self.start
    }

    /// Returns the number of octets written so far.
    pub fn written(&self) -> usize {
        self.buf.len() - self.start
    }

    /// Returns the octets written so far.
    pub fn as_slice(&self) -> &[u8] {
        &self.buf[self.start..]
    }

    /// Claims the `len` octets in front of the written data.
    ///
    /// Returns the claimed octets for the caller to fill in.
    pub fn retreat(&mut self, len: usize) -> Result<&mut [u8], Error> {
        if len > self.start {
            xerr!(return Err(Error::BufferFull {
                needed: len, available: self.start
            }))
        }
        self.start -= len;
        Ok(&mut self.buf[self.start..self.start + len])
    }

    /// Prepends `data` to the written data.
    ///
    /// Returns the number of octets written.
    pub fn prepend(&mut self, data: &[u8]) -> Result<usize, Error> {
        self.retreat(data.len())?.copy_from_slice(data);
        Ok(data.len())
    }

    /// Prepends a single octet to the written data.
    pub fn prepend_u8(&mut self, data: u8) -> Result<usize, Error> {
        self.prepend(&[data])
    }

    /// Returns a mark for the current amount of written data.
    pub fn mark(&self) -> Mark {
        Mark(self.start)
    }

    /// Discards everything written since `mark` was taken.
    ///
    /// Marks taken from a different target or after the current state
    /// are ignored.
    pub fn rewind(&mut self, mark: Mark) {
        if mark.0 >= self.start && mark.0 <= self.buf.len() {
            self.start = mark.0
        }
    }
}


//------------ Mark ----------------------------------------------------------

/// A position in a [`SliceTarget`] to rewind to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Mark(usize);


//============ Tests =========================================================
