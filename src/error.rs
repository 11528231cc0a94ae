//! Error handling.
//!
//! This is a private module. Its public items are re-exported by the parent.

use crate::decode::Pos;
use crate::tag::Tag;


//------------ Error ---------------------------------------------------------

/// An error happened while encoding, decoding or copying a value.
///
/// The same type is used for all directions. Each codec call returns the
/// first error it encountered and has already released whatever it had
/// built up to that point. Errors are final: nothing in this crate ever
/// retries an operation.
///
/// Variants produced during decoding carry the position in the input where
/// the problem was detected. Use [`kind`][Self::kind] if you only care
/// about the category.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// The input ended before a value declared by its header was complete.
    #[error("unexpected end of data at {pos}")]
    Truncated {
        /// Where the missing data should have started.
        pos: Pos,
    },

    /// The length octets of a value are invalid.
    ///
    /// This includes the indefinite form which is never accepted.
    #[error("malformed length at {pos}: {msg}")]
    MalformedLength {
        pos: Pos,
        msg: &'static str,
    },

    /// The identifier octets of a value are invalid.
    #[error("malformed identifier at {pos}: {msg}")]
    MalformedTag {
        pos: Pos,
        msg: &'static str,
    },

    /// A value had a different tag than the type required.
    #[error("expected {expected} but found {found} at {pos}")]
    UnexpectedTag {
        expected: Tag,
        found: Tag,
        pos: Pos,
    },

    /// None of the alternatives of a CHOICE matches the tag of the value.
    #[error("no alternative for {found} at {pos}")]
    UnknownChoice {
        found: Tag,
        pos: Pos,
    },

    /// The encoding does not fit into the target.
    #[error("encoding needs {needed} octets but only {available} are left")]
    BufferFull {
        needed: usize,
        available: usize,
    },

    /// Allocating memory for a value failed.
    #[error("out of memory")]
    OutOfMemory,

    /// A value violates the constraints of its type.
    ///
    /// When decoding, `pos` points to the value in question. When encoding
    /// or copying, there is no position.
    #[error(
        "invalid value{}: {msg}",
        .pos.map(|pos| format!(" at {}", pos)).unwrap_or_default()
    )]
    InvalidValue {
        msg: &'static str,
        pos: Option<Pos>,
    },
}

/// # Creation
///
impl Error {
    /// Creates a truncation error at the given position.
    pub fn truncated(pos: Pos) -> Self {
        Error::Truncated { pos }
    }

    /// Creates an invalid value error without a position.
    pub fn invalid(msg: &'static str) -> Self {
        Error::InvalidValue { msg, pos: None }
    }

    /// Creates an invalid value error for the given position.
    pub fn invalid_at(msg: &'static str, pos: Pos) -> Self {
        Error::InvalidValue { msg, pos: Some(pos) }
    }

    pub fn malformed_length(msg: &'static str, pos: Pos) -> Self {
        Error::MalformedLength { pos, msg }
    }

    pub fn malformed_tag(msg: &'static str, pos: Pos) -> Self {
        Error::MalformedTag { pos, msg }
    }
}

/// # Access
///
impl Error {
    /// Returns the category of the error.
    pub fn kind(&self) -> ErrorKind {
        match *self {
            Error::Truncated { .. } => ErrorKind::Truncated,
            Error::MalformedLength { .. } => ErrorKind::MalformedLength,
            Error::MalformedTag { .. } => ErrorKind::MalformedTag,
            Error::UnexpectedTag { .. } => ErrorKind::UnexpectedTag,
            Error::UnknownChoice { .. } => ErrorKind::UnknownChoice,
            Error::BufferFull { .. } => ErrorKind::BufferFull,
            Error::OutOfMemory => ErrorKind::OutOfMemory,
            Error::InvalidValue { .. } => ErrorKind::InvalidValue,
        }
    }

    /// Returns the input position of the error if there is one.
    pub fn pos(&self) -> Option<Pos> {
        match *self {
            Error::Truncated { pos }
            | Error::MalformedLength { pos, .. }
            | Error::MalformedTag { pos, .. }
            | Error::UnexpectedTag { pos, .. }
            | Error::UnknownChoice { pos, .. } => Some(pos),
            Error::InvalidValue { pos, .. } => pos,
            Error::BufferFull { .. } | Error::OutOfMemory => None,
        }
    }
}


//------------ ErrorKind -----------------------------------------------------

/// The category of an [`Error`] without any details.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, thiserror::Error)]
pub enum ErrorKind {
    #[error("truncated")]
    Truncated,
    #[error("malformed length")]
    MalformedLength,
    #[error("malformed identifier")]
    MalformedTag,
    #[error("unexpected tag")]
    UnexpectedTag,
    #[error("unknown choice")]
    UnknownChoice,
    #[error("buffer full")]
    BufferFull,
    #[error("out of memory")]
    OutOfMemory,
    #[error("invalid value")]
    InvalidValue,
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(
            Error::truncated(Pos::from(4)).to_string(),
            "unexpected end of data at 4"
        );
        assert_eq!(
            Error::invalid("integer out of range").to_string(),
            "invalid value: integer out of range"
        );
        assert_eq!(
            Error::invalid_at("trailing data", Pos::from(7)).to_string(),
            "invalid value at 7: trailing data"
        );
        assert_eq!(
            Error::UnexpectedTag {
                expected: Tag::INTEGER, found: Tag::GENERAL_STRING,
                pos: Pos::from(0),
            }.to_string(),
            "expected INTEGER but found GeneralString at 0"
        );
    }

    #[test]
    fn kind_and_pos() {
        let err = Error::malformed_length("indefinite length", 3.into());
        assert_eq!(err.kind(), ErrorKind::MalformedLength);
        assert_eq!(err.pos(), Some(Pos::from(3)));
        let err = Error::BufferFull { needed: 5, available: 2 };
        assert_eq!(err.kind(), ErrorKind::BufferFull);
        assert_eq!(err.pos(), None);
        assert_eq!(Error::invalid("x").pos(), None);
    }
}
