//! Pack/Unpack for sequences: slices, vectors, fixed-size arrays.
//!
//! Element types decide the wire family through [`Pack::pack_slice`] and
//! [`Unpack::unpack_seq`]: `u8` sequences are binary, everything else is an
//! array of recursively packed elements.

use std::collections::VecDeque;

use super::{Pack, Unpack};
use crate::error::{PackError, Result};
use crate::format::{decode, encode};
use crate::sink::{Sink, Source};

impl<T: Pack> Pack for [T] {
    fn pack<S: Sink + ?Sized>(&self, out: &mut S) -> Result<()> {
        T::pack_slice(self, out)
    }
}

impl<T: Pack> Pack for Vec<T> {
    fn pack<S: Sink + ?Sized>(&self, out: &mut S) -> Result<()> {
        T::pack_slice(self, out)
    }
}

impl<T: Unpack> Unpack for Vec<T> {
    fn unpack_tagged<R: Source + ?Sized>(input: &mut R, tag: u8) -> Result<Self> {
        T::unpack_seq(input, tag, None)
    }
}

/// Fixed-size arrays require the decoded count to equal `N`.
impl<T: Pack, const N: usize> Pack for [T; N] {
    fn pack<S: Sink + ?Sized>(&self, out: &mut S) -> Result<()> {
        T::pack_slice(self, out)
    }
}

impl<T: Unpack, const N: usize> Unpack for [T; N] {
    fn unpack_tagged<R: Source + ?Sized>(input: &mut R, tag: u8) -> Result<Self> {
        let items = T::unpack_seq(input, tag, Some(N))?;
        items
            .try_into()
            .map_err(|items: Vec<T>| PackError::bad_size(N, items.len()))
    }
}

/// Deques are always arrays, whatever the element type.
impl<T: Pack> Pack for VecDeque<T> {
    fn pack<S: Sink + ?Sized>(&self, out: &mut S) -> Result<()> {
        encode::write_array_len(out, self.len())?;
        for item in self {
            item.pack(out)?;
        }
        Ok(())
    }
}

impl<T: Unpack> Unpack for VecDeque<T> {
    fn unpack_tagged<R: Source + ?Sized>(input: &mut R, tag: u8) -> Result<Self> {
        let len = decode::read_array_len(input, tag)?;
        let mut items = VecDeque::with_capacity(decode::capacity_hint(input, len));
        for _ in 0..len {
            items.push_back(T::unpack(input)?);
        }
        Ok(items)
    }
}
