//! The GeneralizedTime type as profiled by Kerberos.
//!
//! Kerberos restricts GeneralizedTime to UTC without fractional seconds,
//! i.e., exactly the form `YYYYMMDDHHMMSSZ`. This is also the only form
//! that we accept when decoding, in both modes.

use std::fmt;
use crate::decode::{Constructed, Primitive};
use crate::encode::{PrimitiveContent, SliceTarget};
use crate::error::Error;
use crate::tag::Tag;


//------------ GeneralizedTime -----------------------------------------------

/// A point in time with a resolution of one second.
///
/// Values are always valid calendar dates between the years 0 and 9999.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct GeneralizedTime {
    year: u16,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
}

/// The length of the content octets.
const ENCODED_LEN: usize = 15;

impl GeneralizedTime {
    /// Creates a new time value from its components.
    pub fn new(
        year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8
    ) -> Result<Self, Error> {
        if year > 9999
            || !(1..=12).contains(&month)
            || day == 0 || day > days_in_month(year, month)
            || hour > 23 || minute > 59 || second > 59
        {
            xerr!(return Err(Error::invalid("invalid time")))
        }
        Ok(GeneralizedTime { year, month, day, hour, minute, second })
    }

    /// Creates a time value from seconds since the Unix epoch.
    pub fn from_unix(secs: i64) -> Result<Self, Error> {
        let days = secs.div_euclid(86400);
        let rem = secs.rem_euclid(86400);
        let (year, month, day) = civil_from_days(days);
        let year = match u16::try_from(year) {
            Ok(year) => year,
            Err(_) => xerr!(return Err(Error::invalid("time out of range"))),
        };
        Self::new(
            year, month, day,
            (rem / 3600) as u8, (rem / 60 % 60) as u8, (rem % 60) as u8
        )
    }

    /// Returns the seconds since the Unix epoch.
    pub fn to_unix(self) -> i64 {
        days_from_civil(i64::from(self.year), self.month, self.day) * 86400
            + i64::from(self.hour) * 3600
            + i64::from(self.minute) * 60
            + i64::from(self.second)
    }

    pub fn year(self) -> u16 {
        self.year
    }

    pub fn month(self) -> u8 {
        self.month
    }

    pub fn day(self) -> u8 {
        self.day
    }

    pub fn hour(self) -> u8 {
        self.hour
    }

    pub fn minute(self) -> u8 {
        self.minute
    }

    pub fn second(self) -> u8 {
        self.second
    }
}

/// # Decoding
///
impl GeneralizedTime {
    /// Takes a single time value from constructed content.
    pub fn take_from(cons: &mut Constructed) -> Result<Self, Error> {
        cons.take_primitive_if(Tag::GENERALIZED_TIME, Self::from_primitive)
    }

    /// Takes an optional time value from constructed content.
    pub fn take_opt_from(
        cons: &mut Constructed
    ) -> Result<Option<Self>, Error> {
        cons.take_opt_primitive_if(
            Tag::GENERALIZED_TIME, Self::from_primitive
        )
    }

    /// Parses the content octets of a time value.
    pub fn from_primitive(prim: &mut Primitive) -> Result<Self, Error> {
        let content = prim.slice_all()?;
        match Self::parse(content) {
            Some(res) => Ok(res),
            None => xerr!(Err(prim.content_err("invalid GeneralizedTime"))),
        }
    }

    fn parse(content: &[u8]) -> Option<Self> {
        if content.len() != ENCODED_LEN || content[14] != b'Z' {
            return None
        }
        let year = u16::from(digits(&content[0..2])?) * 100
            + u16::from(digits(&content[2..4])?);
        Self::new(
            year,
            digits(&content[4..6])?,
            digits(&content[6..8])?,
            digits(&content[8..10])?,
            digits(&content[10..12])?,
            digits(&content[12..14])?,
        ).ok()
    }

    /// Returns the content octets.
    fn to_content(self) -> [u8; ENCODED_LEN] {
        let mut res = *b"00000000000000Z";
        put_digits(&mut res[0..2], (self.year / 100) as u8);
        put_digits(&mut res[2..4], (self.year % 100) as u8);
        put_digits(&mut res[4..6], self.month);
        put_digits(&mut res[6..8], self.day);
        put_digits(&mut res[8..10], self.hour);
        put_digits(&mut res[10..12], self.minute);
        put_digits(&mut res[12..14], self.second);
        res
    }
}

/// Parses two ASCII digits.
fn digits(slice: &[u8]) -> Option<u8> {
    match *slice {
        [hi, lo] if hi.is_ascii_digit() && lo.is_ascii_digit() => {
            Some((hi - b'0') * 10 + (lo - b'0'))
        }
        _ => None
    }
}

fn put_digits(target: &mut [u8], value: u8) {
    target[0] = b'0' + value / 10;
    target[1] = b'0' + value % 10;
}

fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Returns the number of days since 1970-01-01 for a proleptic Gregorian
/// date.
fn days_from_civil(year: i64, month: u8, day: u8) -> i64 {
    let year = if month <= 2 { year - 1 } else { year };
    let era = year.div_euclid(400);
    let yoe = year.rem_euclid(400);
    let month = i64::from(month);
    let doy = (153 * (if month > 2 { month - 3 } else { month + 9 }) + 2) / 5
        + i64::from(day) - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146097 + doe - 719468
}

/// The inverse of `days_from_civil`.
fn civil_from_days(days: i64) -> (i64, u8, u8) {
    let days = days + 719468;
    let era = days.div_euclid(146097);
    let doe = days.rem_euclid(146097);
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u8;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}


//--- Display

impl fmt::Display for GeneralizedTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f, "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
            self.year, self.month, self.day,
            self.hour, self.minute, self.second
        )
    }
}


//--- PrimitiveContent

impl PrimitiveContent for GeneralizedTime {
    const TAG: Tag = Tag::GENERALIZED_TIME;

    fn encoded_len(self) -> usize {
        ENCODED_LEN
    }

    fn write_encoded(
        self,
        target: &mut SliceTarget
    ) -> Result<usize, Error> {
        target.prepend(&self.to_content())
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use crate::encode::Values;
    use crate::error::ErrorKind;
    use crate::mode::Mode;
    use super::*;

    #[test]
    fn encode_and_decode() {
        let time = GeneralizedTime::new(2037, 9, 13, 2, 48, 5).unwrap();
        let data = time.encode().to_vec().unwrap();
        assert_eq!(data, b"\x18\x0f20370913024805Z");
        assert_eq!(
            Mode::Der.decode(&data, GeneralizedTime::take_from),
            Ok((time, 17))
        );
        assert_eq!(time.to_string(), "2037-09-13T02:48:05Z");
    }

    #[test]
    fn reject_other_forms() {
        let bad: [&[u8]; 7] = [
            b"20370913024805",
            b"20370913024805.5Z",
            b"203709130248Z",
            b"20370913024805+0100",
            b"20371313024805Z",
            b"20230229000000Z",
            b"2037091302480aZ",
        ];
        for content in bad {
            let mut data = vec![0x18, content.len() as u8];
            data.extend_from_slice(content);
            assert_eq!(
                Mode::Ber.decode(&data, GeneralizedTime::take_from)
                    .unwrap_err().kind(),
                ErrorKind::InvalidValue
            );
        }
        assert!(Mode::Der.decode(
            b"\x18\x0f20240229235959Z", GeneralizedTime::take_from
        ).is_ok());
    }

    #[test]
    fn calendar() {
        assert!(GeneralizedTime::new(2000, 2, 29, 0, 0, 0).is_ok());
        assert!(GeneralizedTime::new(1900, 2, 29, 0, 0, 0).is_err());
        assert!(GeneralizedTime::new(2023, 4, 31, 0, 0, 0).is_err());
        assert!(GeneralizedTime::new(2023, 1, 1, 24, 0, 0).is_err());
        assert!(GeneralizedTime::new(2023, 1, 1, 0, 0, 60).is_err());
        assert!(GeneralizedTime::new(10000, 1, 1, 0, 0, 0).is_err());
    }

    #[test]
    fn unix_time() {
        let epoch = GeneralizedTime::from_unix(0).unwrap();
        assert_eq!(epoch, GeneralizedTime::new(1970, 1, 1, 0, 0, 0).unwrap());
        let time = GeneralizedTime::from_unix(2136595685).unwrap();
        assert_eq!(
            time, GeneralizedTime::new(2037, 9, 15, 2, 48, 5).unwrap()
        );
        assert_eq!(time.to_unix(), 2136595685);
        let before = GeneralizedTime::from_unix(-1).unwrap();
        assert_eq!(
            before, GeneralizedTime::new(1969, 12, 31, 23, 59, 59).unwrap()
        );
        assert!(GeneralizedTime::from_unix(i64::MAX / 2).is_err());
    }
}
