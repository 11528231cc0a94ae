//! The decoding mode.
//!
//! This is a private module. Its public items are re-exported by the parent.

use crate::decode::Constructed;
use crate::error::Error;


//------------ Mode ----------------------------------------------------------

/// The rules used when decoding data.
///
/// Encoding always produces DER. When decoding, the mode decides how
/// strictly the input is checked. Indefinite length values are rejected in
/// both modes.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Mode {
    /// Basic Encoding Rules restricted to definite lengths.
    ///
    /// Non-minimal lengths and integers as well as any non-zero octet as a
    /// BOOLEAN true are accepted.
    Ber,

    /// Distinguished Encoding Rules.
    ///
    /// Every value must be in its one canonical encoding. This is what
    /// Kerberos peers are supposed to send.
    #[default]
    Der,
}

impl Mode {
    /// Returns whether the mode demands canonical encodings.
    pub fn is_restricted(self) -> bool {
        matches!(self, Mode::Der)
    }

    /// Decodes a value from the beginning of `data` using this mode.
    ///
    /// The closure `op` receives the outermost level and has to take the
    /// values it wants from it. Returns the closure’s result together with
    /// the number of octets consumed. Anything left in `data` after that
    /// is ignored.
    ///
    /// This is identical to calling [`Constructed::decode`].
    pub fn decode<'s, F, T>(
        self, data: &'s [u8], op: F
    ) -> Result<(T, usize), Error>
    where F: FnOnce(&mut Constructed<'s>) -> Result<T, Error> {
        Constructed::decode(data, self, op)
    }
}
