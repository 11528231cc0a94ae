//! Everything related to the `Values` trait.
//!
//! This is an internal module. The relevant items are re-exported by the
//! parent.

use crate::error::Error;
use crate::length::Length;
use crate::tag::Tag;
use super::target::SliceTarget;


//------------ Values --------------------------------------------------------

/// A type that is a value encoder.
///
/// Value encoders know how to encode themselves into a sequence of DER
/// encoded values. While you can impl this trait for your type manually, in
/// practice it is often easier to define a method called `encode_ref` and
/// let it return some dedicated value encoder type constructed from the
/// types provided by this module.
///
/// Encoding happens backward: `write_encoded` has to prepend its octets to
/// the target, i.e., write the last value first and the first value last.
/// All the types in this module take care of that.
pub trait Values {
    /// Returns the length of the encoded values.
    fn encoded_len(&self) -> usize;

    /// Prepends the encoded values to `target`.
    ///
    /// Returns the number of octets written. This must be equal to what
    /// [`encoded_len`][Self::encoded_len] returns. On error, the target
    /// may contain partial data. Use [`encode_into`][Self::encode_into] if
    /// you need it to be left unchanged.
    fn write_encoded(
        &self, target: &mut SliceTarget
    ) -> Result<usize, Error>;


    //--- Provided methods

    /// Prepends the encoded values to `target` or nothing at all.
    ///
    /// If the values don’t fit, returns [`Error::BufferFull`] stating the
    /// complete length. If encoding fails for some other reason, the target
    /// is rewound to where it was before.
    fn encode_into(
        &self, target: &mut SliceTarget
    ) -> Result<usize, Error> {
        let needed = self.encoded_len();
        if needed > target.headroom() {
            xerr!(return Err(Error::BufferFull {
                needed, available: target.headroom()
            }))
        }
        let mark = target.mark();
        match self.write_encoded(target) {
            Ok(len) => Ok(len),
            Err(err) => {
                target.rewind(mark);
                Err(err)
            }
        }
    }

    /// Encodes the values into a new vec.
    ///
    /// The vec is allocated with exactly the encoded length. Returns
    /// [`Error::OutOfMemory`] if that fails.
    fn to_vec(&self) -> Result<Vec<u8>, Error> {
        let len = self.encoded_len();
        let mut res = Vec::new();
        if res.try_reserve_exact(len).is_err() {
            xerr!(return Err(Error::OutOfMemory))
        }
        res.resize(len, 0);
        let mut target = SliceTarget::new(&mut res);
        self.write_encoded(&mut target)?;
        debug_assert_eq!(target.headroom(), 0);
        Ok(res)
    }

    /// Converts the encoder into one with an explicit tag.
    ///
    /// For an explicit tag, the value is wrapped in a constructed value with
    /// the given tag.
    fn explicit(self, tag: Tag) -> Constructed<Self>
    where Self: Sized {
        Constructed::new(tag, self)
    }
}


//--- Blanket impls

impl<V: Values + ?Sized> Values for &'_ V {
    fn encoded_len(&self) -> usize {
        (*self).encoded_len()
    }

    fn write_encoded(
        &self, target: &mut SliceTarget
    ) -> Result<usize, Error> {
        (*self).write_encoded(target)
    }
}


//--- Impls for Tuples

/// Macro for implementing `Values` for tuples.
///
/// This macro implements `Values` for all tuples up to a certain degree.
/// It needs to be invoked as below. All the `Tx`s are the type parameters
/// of the elements the tuple, the numbers are the tuple element numbers.
/// The number need to be provided backwards ending in 0.
///
/// The `tuple` bit of the macro does the actual impl and invokes itself with
/// one less tuple element. The `write` bit below implements
/// `write_encoded` starting with the largest number, since the target is
/// filled from the back.
macro_rules! tupl_impl {
    // Termination: empty lists, do nothing.
    ( tuple > ) => { };

    // Impl values for the complete lists, then recurse to the lists without
    // their heads.
    ( tuple $t:ident $( $ttail:ident )* > $i:tt $( $itail:tt )* ) => {
        impl<$t: Values, $( $ttail: Values ),*> Values
                for ($t, $( $ttail ),*) {
            fn encoded_len(&self) -> usize {
                self.$i.encoded_len()
                $(
                    + self.$itail.encoded_len()
                )*
            }

            fn write_encoded(
                &self,
                target: &mut SliceTarget
            ) -> Result<usize, Error> {
                let mut len = 0;
                tupl_impl!( write self, target, len, $i $( $itail )* );
                Ok(len)
            }
        }

        tupl_impl!(
             tuple $($ttail)* > $($itail)*
        );
    };

    // Termination: empty lists, do nothing.
    ( write $self:expr, $target:expr, $len:ident, ) => { };

    // Write all elements of tuple $self to $target, last element first.
    ( write $self:expr, $target:expr, $len:ident, $i:tt $($itail:tt)*) => {
        $len += $self.$i.write_encoded($target)?;
        tupl_impl!( write $self, $target, $len, $($itail)* );
    }
}

// The standard library implements things for tuples up to twelve elements,
// so we do the same.
tupl_impl!(
    tuple T11 T10 T9 T8 T7 T6 T5 T4 T3 T2 T1 T0 > 11 10 9 8 7 6 5 4 3 2 1 0
);


//--- Impl for Option

/// Encoding of an optional value.
///
/// This implementation encodes `None` as nothing, i.e., as an OPTIONAL
/// in ASN.1 parlance.
impl<V: Values> Values for Option<V> {
    fn encoded_len(&self) -> usize {
        match self {
            Some(v) => v.encoded_len(),
            None => 0,
        }
    }

    fn write_encoded(
        &self, target: &mut SliceTarget
    ) -> Result<usize, Error> {
        match self {
            Some(v) => v.write_encoded(target),
            None => Ok(0)
        }
    }
}


//--- Impl for slice and Vec

impl<V: Values> Values for [V] {
    fn encoded_len(&self) -> usize {
        self.iter().map(Values::encoded_len).sum()
    }

    fn write_encoded(
        &self, target: &mut SliceTarget
    ) -> Result<usize, Error> {
        self.iter().rev().try_fold(0, |len, v| {
            Ok(len + v.write_encoded(target)?)
        })
    }
}

impl<V: Values> Values for Vec<V> {
    fn encoded_len(&self) -> usize {
        self.as_slice().encoded_len()
    }

    fn write_encoded(
        &self, target: &mut SliceTarget
    ) -> Result<usize, Error> {
        self.as_slice().write_encoded(target)
    }
}


//------------ Constructed ---------------------------------------------------

/// A value encoder for a single constructed value.
pub struct Constructed<V> {
    /// The tag of the value.
    tag: Tag,

    /// A value encoder for the content of the value.
    inner: V,
}

impl<V> Constructed<V> {
    /// Creates a new constructed value encoder from a tag and content.
    ///
    /// The returned value will encode as a single constructed value with
    /// the given tag and whatever `inner` encodes to as its content.
    pub fn new(tag: Tag, inner: V) -> Self {
        Constructed { tag, inner }
    }
}

impl<V: Values> Values for Constructed<V> {
    fn encoded_len(&self) -> usize {
        total_len(self.tag, self.inner.encoded_len())
    }

    fn write_encoded(
        &self, target: &mut SliceTarget
    ) -> Result<usize, Error> {
        let len = self.inner.write_encoded(target)?;
        Ok(len + write_header(target, self.tag, true, len)?)
    }
}


//--------------- Iter -------------------------------------------------------

/// A wrapper for an iterator of values.
///
/// The type wraps something that impls `IntoIterator`. It needs to be
/// `Clone`, because we need to be able to restart iterating at the
/// beginning, and the iterator has to be double-ended, because we write
/// the items last to first.
pub struct Iter<I>(pub I);

/// Wraps an iterator over value encoders into a value encoder.
pub fn iter<I>(iter: I) -> Iter<I> {
    Iter(iter)
}

impl<I> Values for Iter<I>
where
    I: Clone + IntoIterator,
    <I as IntoIterator>::IntoIter: DoubleEndedIterator,
    <I as IntoIterator>::Item: Values
{
    fn encoded_len(&self) -> usize {
        self.0.clone().into_iter().map(|item| item.encoded_len()).sum()
    }

    fn write_encoded(
        &self, target: &mut SliceTarget
    ) -> Result<usize, Error> {
        self.0.clone().into_iter().rev().try_fold(0, |len, item| {
            Ok(len + item.write_encoded(target)?)
        })
    }
}


//============ Standard Functions ============================================

/// Returns a value encoder for a SEQUENCE containing `inner`.
pub fn sequence<V: Values>(inner: V) -> impl Values {
    Constructed::new(Tag::SEQUENCE, inner)
}

/// Returns a value encoder for a SEQUENCE with the given tag.
///
/// This is identical to `Constructed::new(tag, inner)`. It merely provides a
/// more memorable name.
pub fn sequence_as<V: Values>(tag: Tag, inner: V) -> impl Values {
    Constructed::new(tag, inner)
}

/// Returns the length for a structure based on the tag and content length.
///
/// This is necessary because the length octets have a different length
/// depending on the content length.
pub fn total_len(tag: Tag, content_l: usize) -> usize {
    tag.encoded_len()
        + Length::new(content_l).encoded_len()
        + content_l
}

/// Prepends the header for a value.
///
/// The header in the sense of this function is the identifier octets and the
/// length octets. Since we are writing backward, the length octets go first.
/// Returns the number of octets written.
pub fn write_header(
    target: &mut SliceTarget,
    tag: Tag,
    constructed: bool,
    content_length: usize,
) -> Result<usize, Error> {
    let len = Length::new(content_length).write_encoded(target)?;
    Ok(len + tag.write_encoded(constructed, target)?)
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use crate::encode::PrimitiveContent;
    use super::*;

    fn encode(values: impl Values) -> Vec<u8> {
        let res = values.to_vec().unwrap();
        assert_eq!(res.len(), values.encoded_len());
        res
    }

    #[test]
    fn tuples_keep_order() {
        assert_eq!(
            encode((1u8.encode(), 2u8.encode(), 3u8.encode())),
            b"\x02\x01\x01\x02\x01\x02\x02\x01\x03"
        );
    }

    #[test]
    fn sequences() {
        assert_eq!(
            encode(sequence((true.encode(), ().encode()))),
            b"\x30\x05\x01\x01\xff\x05\x00"
        );
        assert_eq!(
            encode(sequence(Vec::<crate::encode::Primitive<u8>>::new())),
            b"\x30\x00"
        );
        assert_eq!(
            encode(sequence_as(Tag::application(1), 5u8.encode())),
            b"\x61\x03\x02\x01\x05"
        );
    }

    #[test]
    fn slices_keep_order() {
        let items = vec![1u8.encode(), 2u8.encode()];
        assert_eq!(encode(&items), b"\x02\x01\x01\x02\x01\x02");
        assert_eq!(
            encode(iter([3u8, 4].iter().map(|x| x.encode()))),
            b"\x02\x01\x03\x02\x01\x04"
        );
    }

    #[test]
    fn optional_and_explicit() {
        assert_eq!(
            encode(sequence((
                Some(1u8.encode()).explicit(Tag::ctx(0)),
                None::<crate::encode::Primitive<u8>>,
            ))),
            b"\x30\x05\xa0\x03\x02\x01\x01"
        );
    }

    #[test]
    fn long_content() {
        let items: Vec<_> = (0..100u8).map(|x| x.encode()).collect();
        let res = encode(sequence(&items));
        assert_eq!(&res[..4], b"\x30\x82\x01\x2c");
        assert_eq!(res.len(), 4 + 300);
    }

    #[test]
    fn encode_into_is_atomic() {
        let values = sequence((1u8.encode(), 2u8.encode()));
        let mut buf = [0u8; 7];
        let mut target = SliceTarget::new(&mut buf);
        target.prepend_u8(0xaa).unwrap();
        assert_eq!(
            values.encode_into(&mut target),
            Err(Error::BufferFull { needed: 8, available: 6 })
        );
        assert_eq!(target.as_slice(), b"\xaa");
    }
}
