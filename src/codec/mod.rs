//! Typed packing and unpacking.
//!
//! [`Pack`] and [`Unpack`] route a Rust type onto the MessagePack primitive
//! for its shape: scalars onto nil/bool/int/float/str, byte sequences onto
//! binary, other sequences and tuples onto arrays, associative containers onto
//! maps, and [`Record`]s onto either. Implementations recurse through element,
//! key, value and field types, so nested shapes need no extra code.

pub mod map;
pub mod record;
pub mod scalar;
pub mod seq;
pub mod tuple;

pub use record::{
    FieldReader, FieldWriter, Named, Record, RecordMode, pack_record, unpack_record,
    unpack_record_tagged,
};

use crate::error::Result;
use crate::format::decode::{self, capacity_hint, expect_len};
use crate::format::encode;
use crate::sink::{Sink, Source};

/// A value that can be written as MessagePack.
pub trait Pack {
    /// Writes this value to `out`.
    fn pack<S: Sink + ?Sized>(&self, out: &mut S) -> Result<()>;

    /// Writes a contiguous sequence of this type.
    ///
    /// Sequences become arrays by default. Byte-sized element types override
    /// this to produce the binary family instead.
    fn pack_slice<S: Sink + ?Sized>(items: &[Self], out: &mut S) -> Result<()>
    where
        Self: Sized,
    {
        encode::write_array_len(out, items.len())?;
        for item in items {
            item.pack(out)?;
        }
        Ok(())
    }
}

/// A value that can be read back from MessagePack.
pub trait Unpack: Sized {
    /// Reads one value from `input`.
    fn unpack<R: Source + ?Sized>(input: &mut R) -> Result<Self> {
        let tag = decode::read_tag(input)?;
        Self::unpack_tagged(input, tag)
    }

    /// Reads one value whose tag byte has already been consumed.
    fn unpack_tagged<R: Source + ?Sized>(input: &mut R, tag: u8) -> Result<Self>;

    /// Reads a sequence of this type whose tag byte has already been consumed.
    ///
    /// When `expected` is set, a different element count fails with `BadSize`
    /// before any element is decoded. The counterpart of [`Pack::pack_slice`].
    fn unpack_seq<R: Source + ?Sized>(
        input: &mut R,
        tag: u8,
        expected: Option<usize>,
    ) -> Result<Vec<Self>> {
        let len = decode::read_array_len(input, tag)?;
        expect_len(expected, len)?;
        let mut items = Vec::with_capacity(capacity_hint(input, len));
        for _ in 0..len {
            items.push(Self::unpack(input)?);
        }
        Ok(items)
    }
}

/// Packs a value into a new byte vector.
pub fn to_vec<T: Pack + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    value.pack(&mut out)?;
    Ok(out)
}

/// Unpacks one value from the front of `bytes`.
///
/// Bytes after the first complete value are ignored; use a [`Source`]
/// directly to read a stream of values.
pub fn from_slice<T: Unpack>(bytes: &[u8]) -> Result<T> {
    let mut input = bytes;
    T::unpack(&mut input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn to_vec_then_from_slice() {
        let bytes = to_vec(&(7u8, "seven")).unwrap();
        assert_eq!(bytes, vec![0x92, 0x07, 0xA5, b's', b'e', b'v', b'e', b'n']);
        let (n, s): (u8, String) = from_slice(&bytes).unwrap();
        assert_eq!((n, s.as_str()), (7, "seven"));
    }

    #[test]
    fn from_slice_stops_after_first_value() {
        let decoded: u32 = from_slice(&[0x01, 0x02]).unwrap();
        assert_eq!(decoded, 1);
    }

    #[test]
    fn from_slice_empty_input() {
        let err = from_slice::<bool>(&[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfData);
    }

    #[test]
    fn values_follow_each_other_in_one_source() {
        let mut buf = Vec::new();
        1u16.pack(&mut buf).unwrap();
        "two".pack(&mut buf).unwrap();
        3.0f64.pack(&mut buf).unwrap();

        let mut input: &[u8] = &buf;
        assert_eq!(u16::unpack(&mut input).unwrap(), 1);
        assert_eq!(String::unpack(&mut input).unwrap(), "two");
        assert_eq!(f64::unpack(&mut input).unwrap(), 3.0);
        assert!(input.is_empty());
    }
}
