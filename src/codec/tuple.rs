//! Pack/Unpack for tuples.
//!
//! A tuple of arity N is an array of N elements; decoding any other count
//! fails with `BadSize` before the first element is read.

use paste::paste;

use super::{Pack, Unpack};
use crate::error::Result;
use crate::format::decode::{self, expect_len};
use crate::format::encode;
use crate::sink::{Sink, Source};

macro_rules! impl_pack_for_tuple {
    ($($index:literal),*) => {
        paste! {
            impl<$( [<T $index>]: Pack ),*> Pack for ( $( [<T $index>], )* ) {
                #[inline]
                fn pack<S: Sink + ?Sized>(&self, out: &mut S) -> Result<()> {
                    const ARITY: usize = [$($index),*].len();
                    encode::write_array_len(out, ARITY)?;
                    $( self.$index.pack(out)?; )*
                    Ok(())
                }
            }

            impl<$( [<T $index>]: Unpack ),*> Unpack for ( $( [<T $index>], )* ) {
                #[inline]
                fn unpack_tagged<R: Source + ?Sized>(input: &mut R, tag: u8) -> Result<Self> {
                    const ARITY: usize = [$($index),*].len();
                    let len = decode::read_array_len(input, tag)?;
                    expect_len(Some(ARITY), len)?;
                    Ok(( $( [<T $index>]::unpack(input)?, )* ))
                }
            }
        }
    };
}

impl_pack_for_tuple!(0);
impl_pack_for_tuple!(0, 1);
impl_pack_for_tuple!(0, 1, 2);
impl_pack_for_tuple!(0, 1, 2, 3);
impl_pack_for_tuple!(0, 1, 2, 3, 4);
impl_pack_for_tuple!(0, 1, 2, 3, 4, 5);
impl_pack_for_tuple!(0, 1, 2, 3, 4, 5, 6);
impl_pack_for_tuple!(0, 1, 2, 3, 4, 5, 6, 7);
impl_pack_for_tuple!(0, 1, 2, 3, 4, 5, 6, 7, 8);
impl_pack_for_tuple!(0, 1, 2, 3, 4, 5, 6, 7, 8, 9);
impl_pack_for_tuple!(0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10);
impl_pack_for_tuple!(0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11);

#[cfg(test)]
mod tests {
    use crate::codec::{from_slice, to_vec};
    use crate::error::{ErrorKind, PackError};

    #[test]
    fn pair_is_two_element_array() {
        let bytes = to_vec(&(1u8, true)).unwrap();
        assert_eq!(bytes, vec![0x92, 0x01, 0xC3]);
        assert_eq!(from_slice::<(u8, bool)>(&bytes).unwrap(), (1, true));
    }

    #[test]
    fn single_element_tuple() {
        let bytes = to_vec(&("x",)).unwrap();
        assert_eq!(bytes, vec![0x91, 0xA1, b'x']);
        assert_eq!(from_slice::<(String,)>(&bytes).unwrap(), ("x".to_string(),));
    }

    #[test]
    fn mixed_tuple_round_trip() {
        let value = (1u16, None::<u32>, -3i64, vec![1u8, 2], 2.5f64);
        let bytes = to_vec(&value).unwrap();
        let decoded: (u16, Option<u32>, i64, Vec<u8>, f64) = from_slice(&bytes).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn twelve_elements() {
        let value = (0u8, 1u8, 2u8, 3u8, 4u8, 5u8, 6u8, 7u8, 8u8, 9u8, 10u8, 11u8);
        let bytes = to_vec(&value).unwrap();
        assert_eq!(bytes[0], 0x9C);
        assert_eq!(bytes.len(), 13);
    }

    #[test]
    fn arity_mismatch_is_bad_size() {
        let bytes = to_vec(&(1u8, 2u8, 3u8)).unwrap();
        let err = from_slice::<(u8, u8)>(&bytes).unwrap_err();
        assert!(matches!(err, PackError::BadSize { expected: 2, found: 3 }));
    }

    #[test]
    fn tuple_from_map_is_bad_format() {
        let err = from_slice::<(u8, u8)>(&[0x80]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadFormat);
    }
}
