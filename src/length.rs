//! The length octets.
//!
//! This is a private module. The [`Length`] defined herein is not
//! publicly exposed.

use crate::decode::SliceSource;
use crate::encode::SliceTarget;
use crate::error::Error;
use crate::mode::Mode;


//------------ Length --------------------------------------------------------

/// The length octets of an encoded value.
///
/// # Encoding
///
/// Which form is used is determined by the most significant bit of the
/// first octet. If it is not set, the length octets are one octet long and
/// the remaining bits provide the length. Thus, if the first octet is less
/// than 128, it is the length already.
///
/// If the most significant bit is set, the remaining bits of the first
/// octet give the number of octets that follow, which in turn are the
/// big-endian encoding of the length. If there are zero octets to follow,
/// i.e., the first octet is 0x80, the length is indefinite. We never accept
/// this form. The value 0xFF is reserved.
///
/// Under DER, a length must be encoded in the minimum number of octets.
/// In BER mode, we accept superfluous leading zeros and the long form for
/// small lengths.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Length(usize);

impl Length {
    /// The number of octets of a `usize`.
    const USIZE_LEN: usize = std::mem::size_of::<usize>();

    /// Creates a length value.
    pub fn new(len: usize) -> Self {
        Length(len)
    }

    /// Returns the length as a `usize`.
    pub fn to_usize(self) -> usize {
        self.0
    }

    /// Takes the length octets from the beginning of a source.
    pub fn take_from(
        source: &mut SliceSource, mode: Mode
    ) -> Result<Self, Error> {
        let pos = source.pos();
        let count = match source.take_u8()? {
            n if n & 0x80 == 0 => return Ok(Length(usize::from(n))),
            0x80 => {
                xerr!(return Err(Error::malformed_length(
                    "indefinite length", pos
                )))
            }
            0xFF => {
                xerr!(return Err(Error::malformed_length(
                    "reserved length octet", pos
                )))
            }
            n => usize::from(n & 0x7F),
        };
        let octets = source.take_slice(count)?;

        if mode.is_restricted() {
            // The first octet can’t be zero and a single octet can’t be
            // less than 0x80. In both cases, there is a shorter encoding.
            if octets[0] == 0 || (count == 1 && octets[0] < 0x80) {
                xerr!(return Err(Error::malformed_length(
                    "non-minimal length", pos
                )))
            }
        }

        let start = octets.iter().position(|&x| x != 0).unwrap_or(count);
        let octets = &octets[start..];
        if octets.len() > Self::USIZE_LEN {
            xerr!(return Err(Error::malformed_length(
                "excessive length", pos
            )))
        }
        Ok(Length(
            octets.iter().fold(0usize, |res, &x| (res << 8) | usize::from(x))
        ))
    }

    /// Returns the length of the encoded representation of the value.
    pub fn encoded_len(self) -> usize {
        if self.0 > 0x7F {
            Self::USIZE_LEN - self.encoded_start_idx() + 1
        }
        else {
            1
        }
    }

    /// Prepends the encoded length to a target.
    ///
    /// Returns the number of octets written.
    pub fn write_encoded(
        self, target: &mut SliceTarget
    ) -> Result<usize, Error> {
        if self.0 > 0x7F {
            let idx = self.encoded_start_idx();
            let octets = self.0.to_be_bytes();
            let len = target.prepend(&octets[idx..])?;

            // USIZE_LEN is never greater than 126, so this fits.
            Ok(len + target.prepend_u8(((Self::USIZE_LEN - idx) | 0x80) as u8)?)
        }
        else {
            target.prepend_u8(self.0 as u8)
        }
    }

    /// Returns the index of the first non-zero octet of the length.
    fn encoded_start_idx(self) -> usize {
        (self.0.leading_zeros() / 8) as usize
    }
}


//============ Tests =========================================================
