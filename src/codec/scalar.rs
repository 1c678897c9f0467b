//! Pack/Unpack for scalars: nil, booleans, integers, floats, strings.

use bytes::Bytes;

use super::{Pack, Unpack};
use crate::error::Result;
use crate::format::decode::{self, expect_len};
use crate::format::encode;
use crate::sink::{Sink, Source};

impl Pack for () {
    fn pack<S: Sink + ?Sized>(&self, out: &mut S) -> Result<()> {
        encode::write_nil(out)
    }
}

impl Unpack for () {
    fn unpack_tagged<R: Source + ?Sized>(_input: &mut R, tag: u8) -> Result<Self> {
        decode::read_nil(tag)
    }
}

impl Pack for bool {
    fn pack<S: Sink + ?Sized>(&self, out: &mut S) -> Result<()> {
        encode::write_bool(out, *self)
    }
}

impl Unpack for bool {
    fn unpack_tagged<R: Source + ?Sized>(_input: &mut R, tag: u8) -> Result<Self> {
        decode::read_bool(tag)
    }
}

/// `None` is nil; `Some(v)` is `v` itself.
impl<T: Pack> Pack for Option<T> {
    fn pack<S: Sink + ?Sized>(&self, out: &mut S) -> Result<()> {
        match self {
            Some(v) => v.pack(out),
            None => encode::write_nil(out),
        }
    }
}

impl<T: Unpack> Unpack for Option<T> {
    fn unpack_tagged<R: Source + ?Sized>(input: &mut R, tag: u8) -> Result<Self> {
        if tag == crate::format::marker::NIL {
            Ok(None)
        } else {
            T::unpack_tagged(input, tag).map(Some)
        }
    }
}

macro_rules! impl_unsigned {
    ($($ty:ty),*) => {
        $(
            impl Pack for $ty {
                #[inline]
                fn pack<S: Sink + ?Sized>(&self, out: &mut S) -> Result<()> {
                    encode::write_uint(out, *self as u64)
                }
            }

            impl Unpack for $ty {
                #[inline]
                fn unpack_tagged<R: Source + ?Sized>(input: &mut R, tag: u8) -> Result<Self> {
                    decode::read_int(input, tag)?.convert(tag, stringify!($ty))
                }
            }
        )*
    };
}

macro_rules! impl_signed {
    ($($ty:ty),*) => {
        $(
            impl Pack for $ty {
                #[inline]
                fn pack<S: Sink + ?Sized>(&self, out: &mut S) -> Result<()> {
                    encode::write_sint(out, *self as i64)
                }
            }

            impl Unpack for $ty {
                #[inline]
                fn unpack_tagged<R: Source + ?Sized>(input: &mut R, tag: u8) -> Result<Self> {
                    decode::read_int(input, tag)?.convert(tag, stringify!($ty))
                }
            }
        )*
    };
}

impl_unsigned!(u16, u32, u64, usize);
impl_signed!(i8, i16, i32, i64, isize);

// `u8` sequences are byte strings: they travel as the binary family.
impl Pack for u8 {
    #[inline]
    fn pack<S: Sink + ?Sized>(&self, out: &mut S) -> Result<()> {
        encode::write_uint(out, u64::from(*self))
    }

    fn pack_slice<S: Sink + ?Sized>(items: &[Self], out: &mut S) -> Result<()> {
        encode::write_bin(out, items)
    }
}

impl Unpack for u8 {
    #[inline]
    fn unpack_tagged<R: Source + ?Sized>(input: &mut R, tag: u8) -> Result<Self> {
        decode::read_int(input, tag)?.convert(tag, "u8")
    }

    fn unpack_seq<R: Source + ?Sized>(
        input: &mut R,
        tag: u8,
        expected: Option<usize>,
    ) -> Result<Vec<Self>> {
        let len = decode::read_bin_len(input, tag)?;
        expect_len(expected, len)?;
        decode::read_payload(input, len)
    }
}

impl Pack for f32 {
    fn pack<S: Sink + ?Sized>(&self, out: &mut S) -> Result<()> {
        encode::write_f32(out, *self)
    }
}

impl Unpack for f32 {
    fn unpack_tagged<R: Source + ?Sized>(input: &mut R, tag: u8) -> Result<Self> {
        decode::read_f32(input, tag)
    }
}

impl Pack for f64 {
    fn pack<S: Sink + ?Sized>(&self, out: &mut S) -> Result<()> {
        encode::write_f64(out, *self)
    }
}

impl Unpack for f64 {
    fn unpack_tagged<R: Source + ?Sized>(input: &mut R, tag: u8) -> Result<Self> {
        decode::read_f64(input, tag)
    }
}

impl Pack for str {
    fn pack<S: Sink + ?Sized>(&self, out: &mut S) -> Result<()> {
        encode::write_str(out, self)
    }
}

impl Pack for String {
    fn pack<S: Sink + ?Sized>(&self, out: &mut S) -> Result<()> {
        encode::write_str(out, self)
    }
}

impl Unpack for String {
    fn unpack_tagged<R: Source + ?Sized>(input: &mut R, tag: u8) -> Result<Self> {
        decode::read_str(input, tag)
    }
}

/// `Bytes` is always binary.
impl Pack for Bytes {
    fn pack<S: Sink + ?Sized>(&self, out: &mut S) -> Result<()> {
        encode::write_bin(out, self)
    }
}

impl Unpack for Bytes {
    fn unpack_tagged<R: Source + ?Sized>(input: &mut R, tag: u8) -> Result<Self> {
        decode::read_bin(input, tag).map(Bytes::from)
    }
}

impl<T: Pack + ?Sized> Pack for &T {
    #[inline]
    fn pack<S: Sink + ?Sized>(&self, out: &mut S) -> Result<()> {
        (**self).pack(out)
    }
}

impl<T: Pack + ?Sized> Pack for Box<T> {
    #[inline]
    fn pack<S: Sink + ?Sized>(&self, out: &mut S) -> Result<()> {
        (**self).pack(out)
    }
}

impl<T: Unpack> Unpack for Box<T> {
    fn unpack_tagged<R: Source + ?Sized>(input: &mut R, tag: u8) -> Result<Self> {
        T::unpack_tagged(input, tag).map(Box::new)
    }
}
