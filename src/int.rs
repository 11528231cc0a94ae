//! DER encoded integers.
//!
//! INTEGER content octets are a big-endian two’s complement number using as
//! few octets as possible. This module provides the decoding into Rust’s
//! built-in integer types, which the [`Primitive`] type exposes through its
//! `to_` methods, and the [`PrimitiveContent`] impls for these types.

use crate::decode::Primitive;
use crate::encode::{PrimitiveContent, SliceTarget};
use crate::error::Error;
use crate::tag::Tag;


//------------ Decoding ------------------------------------------------------

/// Takes the complete content of `prim` as an integer.
///
/// Anything that doesn’t fit into an `i128` is out of range for all the
/// built-in types we support.
fn take_i128(prim: &mut Primitive) -> Result<i128, Error> {
    let mut content = prim.slice_all()?;
    if content.is_empty() {
        xerr!(return Err(prim.content_err("empty integer")))
    }
    if is_redundant(content) {
        if prim.mode().is_restricted() {
            xerr!(return Err(prim.content_err("non-minimal integer")))
        }
        while is_redundant(content) {
            content = &content[1..];
        }
    }
    if content.len() > 16 {
        xerr!(return Err(prim.content_err("integer out of range")))
    }
    let init: i128 = if content[0] & 0x80 != 0 { -1 } else { 0 };
    Ok(content.iter().fold(init, |res, &x| (res << 8) | i128::from(x)))
}

/// Checks whether the first octet of integer content can be dropped.
///
/// This is the case if the first nine bits are all the same.
fn is_redundant(content: &[u8]) -> bool {
    match (content.first(), content.get(1)) {
        (Some(0), Some(x)) => x & 0x80 == 0,
        (Some(0xFF), Some(x)) => x & 0x80 != 0,
        _ => false
    }
}

macro_rules! from_primitive_impl {
    ( $( $fn:ident => $type:ident ),* ) => {
        $(
            /// Decodes the content of `prim` into the built-in type.
            ///
            /// Values that don’t fit are invalid.
            pub fn $fn(prim: &mut Primitive) -> Result<$type, Error> {
                let value = take_i128(prim)?;
                match $type::try_from(value) {
                    Ok(value) => Ok(value),
                    Err(_) => {
                        xerr!(Err(prim.content_err("integer out of range")))
                    }
                }
            }
        )*
    }
}

from_primitive_impl!(
    i8_from_primitive => i8,
    i16_from_primitive => i16,
    i32_from_primitive => i32,
    i64_from_primitive => i64,
    u8_from_primitive => u8,
    u16_from_primitive => u16,
    u32_from_primitive => u32,
    u64_from_primitive => u64
);


//------------ Encoding ------------------------------------------------------

/// Returns the two’s complement octets of `value` and the first one to use.
fn minimal_octets(value: i128) -> ([u8; 16], usize) {
    let octets = value.to_be_bytes();
    let mut start = 0;
    while is_redundant(&octets[start..]) {
        start += 1;
    }
    (octets, start)
}

macro_rules! content_impl {
    ( $( $type:ident ),* ) => {
        $(
            impl PrimitiveContent for $type {
                const TAG: Tag = Tag::INTEGER;

                fn encoded_len(self) -> usize {
                    let (octets, start) = minimal_octets(i128::from(self));
                    octets.len() - start
                }

                fn write_encoded(
                    self,
                    target: &mut SliceTarget
                ) -> Result<usize, Error> {
                    let (octets, start) = minimal_octets(i128::from(self));
                    target.prepend(&octets[start..])
                }
            }
        )*
    }
}

content_impl!(i8, i16, i32, i64, u8, u16, u32, u64);


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use crate::decode::Primitive;
    use crate::encode::Values;
    use crate::error::ErrorKind;
    use crate::mode::Mode;
    use super::*;

    fn invalid<T: std::fmt::Debug>(res: Result<T, Error>) {
        assert_eq!(res.unwrap_err().kind(), ErrorKind::InvalidValue)
    }

    #[test]
    fn decode_unsigned_builtins() {
        let der = |data: &'static [u8]| {
            Primitive::decode_slice(data, Mode::Der, |prim| prim.to_u16())
        };
        assert_eq!(der(b"\x00"), Ok(0));
        assert_eq!(der(b"\x7f"), Ok(0x7f));
        assert_eq!(der(b"\x00\x80"), Ok(0x80));
        assert_eq!(der(b"\x12\x34"), Ok(0x1234));
        assert_eq!(der(b"\x00\xA2\x34"), Ok(0xA234));
        invalid(der(b"\x80"));
        invalid(der(b"\xA2\x34"));
        invalid(der(b"\x00\x12\x34"));
        invalid(der(b"\x01\x00\x00"));
        invalid(der(b""));

        assert_eq!(
            Primitive::decode_slice(
                b"\x00\xff\xff\xff\xff\xff\xff\xff\xff", Mode::Der,
                |prim| prim.to_u64()
            ),
            Ok(u64::MAX)
        );
        assert_eq!(
            Primitive::decode_slice(
                b"\x00\xff\xff\xff\xff", Mode::Der, |prim| prim.to_u32()
            ),
            Ok(u32::MAX)
        );
        invalid(Primitive::decode_slice(
            b"\x01\x00", Mode::Der, |prim| prim.to_u8()
        ));
    }

    #[test]
    fn decode_signed_builtins() {
        let der = |data: &'static [u8]| {
            Primitive::decode_slice(data, Mode::Der, |prim| prim.to_i32())
        };
        assert_eq!(der(b"\x05"), Ok(5));
        assert_eq!(der(b"\x00"), Ok(0));
        assert_eq!(der(b"\xff"), Ok(-1));
        assert_eq!(der(b"\x80"), Ok(-128));
        assert_eq!(der(b"\xff\x7f"), Ok(-129));
        assert_eq!(der(b"\x00\x80"), Ok(128));
        assert_eq!(der(b"\x7f\xff\xff\xff"), Ok(i32::MAX));
        assert_eq!(der(b"\x80\x00\x00\x00"), Ok(i32::MIN));
        invalid(der(b"\x00\x7f\xff\xff\xff"));
        invalid(der(b"\x00\x80\x00\x00\x00"));
        invalid(der(b"\xff\x7f\xff\xff\xff"));
        invalid(der(b"\xff\x80"));
        invalid(der(b"\x00\x05"));

        assert_eq!(
            Primitive::decode_slice(
                b"\x80\x00\x00\x00\x00\x00\x00\x00", Mode::Der,
                |prim| prim.to_i64()
            ),
            Ok(i64::MIN)
        );
        assert_eq!(
            Primitive::decode_slice(b"\x80", Mode::Der, |prim| prim.to_i8()),
            Ok(i8::MIN)
        );
        invalid(Primitive::decode_slice(
            b"\x00\x80", Mode::Der, |prim| prim.to_i8()
        ));
    }

    #[test]
    fn ber_accepts_redundant_octets() {
        let ber = |data: &'static [u8]| {
            Primitive::decode_slice(data, Mode::Ber, |prim| prim.to_i16())
        };
        assert_eq!(ber(b"\x00\x05"), Ok(5));
        assert_eq!(ber(b"\xff\xff\xff"), Ok(-1));
        assert_eq!(
            ber(b"\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x01"),
            Ok(1)
        );
        invalid(ber(b"\x00\x01\x00\x00"));
        invalid(ber(b""));
    }

    #[test]
    fn encode_builtins() {
        fn step<P: PrimitiveContent>(value: P, content: &[u8]) {
            let res = value.encode().to_vec().unwrap();
            assert_eq!(res[0], 0x02);
            assert_eq!(usize::from(res[1]), content.len());
            assert_eq!(&res[2..], content);
            assert_eq!(value.encoded_len(), content.len());
        }

        step(5u8, b"\x05");
        step(0i32, b"\x00");
        step(127i32, b"\x7f");
        step(128i32, b"\x00\x80");
        step(256i32, b"\x01\x00");
        step(-1i32, b"\xff");
        step(-128i32, b"\x80");
        step(-129i32, b"\xff\x7f");
        step(i32::MIN, b"\x80\x00\x00\x00");
        step(u32::MAX, b"\x00\xff\xff\xff\xff");
        step(u64::MAX, b"\x00\xff\xff\xff\xff\xff\xff\xff\xff");
        step(i64::MIN, b"\x80\x00\x00\x00\x00\x00\x00\x00");
    }

    #[test]
    fn encode_decode_five() {
        assert_eq!(5i32.encode().to_vec().unwrap(), b"\x02\x01\x05");
        assert_eq!(
            Mode::Der.decode(b"\x02\x01\x05", |cons| cons.take_i32()),
            Ok((5, 3))
        );
    }
}
