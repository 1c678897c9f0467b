//! Structured records.
//!
//! A [`Record`] exposes its fields as an ordered list of names. It can be
//! written in two shapes:
//!
//! - **positional**: an array of field values in declared order;
//! - **named**: a map from field name to field value, in declared order.
//!
//! Decoding checks the field count in both modes, and in named mode also
//! checks that every key matches the field expected at that position.
//!
//! The [`record!`](crate::record) macro implements [`Record`] for a plain
//! struct together with positional [`Pack`]/[`Unpack`]; wrap a value in
//! [`Named`] to nest it in named form.

use super::{Pack, Unpack};
use crate::error::{PackError, Result};
use crate::format::decode::{self, expect_len};
use crate::format::encode;
use crate::sink::{Sink, Source};

/// Wire shape of a record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RecordMode {
    /// Array of field values.
    #[default]
    Positional,
    /// Map of field name to field value.
    Named,
}

/// A struct-like type with a fixed, ordered set of named fields.
pub trait Record: Sized {
    /// Field names in declared order.
    const FIELDS: &'static [&'static str];

    /// Writes every field, in [`FIELDS`](Self::FIELDS) order.
    fn pack_fields<S: Sink + ?Sized>(&self, fields: &mut FieldWriter<'_, S>) -> Result<()>;

    /// Reads every field, in [`FIELDS`](Self::FIELDS) order.
    fn unpack_fields<R: Source + ?Sized>(fields: &mut FieldReader<'_, R>) -> Result<Self>;
}

/// Writes the fields of one record.
pub struct FieldWriter<'a, S: ?Sized> {
    out: &'a mut S,
    mode: RecordMode,
    written: usize,
}

impl<'a, S: Sink + ?Sized> FieldWriter<'a, S> {
    /// Writes one field. The name is only emitted in named mode.
    pub fn field<T: Pack + ?Sized>(&mut self, name: &str, value: &T) -> Result<()> {
        if self.mode == RecordMode::Named {
            encode::write_str(self.out, name)?;
        }
        value.pack(self.out)?;
        self.written += 1;
        Ok(())
    }
}

/// Reads the fields of one record.
pub struct FieldReader<'a, R: ?Sized> {
    input: &'a mut R,
    mode: RecordMode,
}

impl<'a, R: Source + ?Sized> FieldReader<'a, R> {
    /// Reads one field, checking its key first in named mode.
    pub fn field<T: Unpack>(&mut self, name: &'static str) -> Result<T> {
        if self.mode == RecordMode::Named {
            let tag = decode::read_tag(self.input)?;
            let key = decode::read_str(self.input, tag)?;
            if key != name {
                tracing::trace!(expected = name, found = %key, "record field name mismatch");
                return Err(PackError::BadName {
                    expected: name,
                    found: key,
                });
            }
        }
        T::unpack(self.input)
    }
}

/// Writes `record` in the given shape.
pub fn pack_record<T, S>(record: &T, out: &mut S, mode: RecordMode) -> Result<()>
where
    T: Record,
    S: Sink + ?Sized,
{
    let len = T::FIELDS.len();
    match mode {
        RecordMode::Positional => encode::write_array_len(out, len)?,
        RecordMode::Named => encode::write_map_len(out, len)?,
    }
    let mut fields = FieldWriter {
        out,
        mode,
        written: 0,
    };
    record.pack_fields(&mut fields)?;
    if fields.written != len {
        return Err(PackError::bad_size(len, fields.written));
    }
    Ok(())
}

/// Reads a record of the given shape.
pub fn unpack_record<T, R>(input: &mut R, mode: RecordMode) -> Result<T>
where
    T: Record,
    R: Source + ?Sized,
{
    let tag = decode::read_tag(input)?;
    unpack_record_tagged(input, tag, mode)
}

/// Reads a record whose tag byte has already been consumed.
pub fn unpack_record_tagged<T, R>(input: &mut R, tag: u8, mode: RecordMode) -> Result<T>
where
    T: Record,
    R: Source + ?Sized,
{
    let len = match mode {
        RecordMode::Positional => decode::read_array_len(input, tag)?,
        RecordMode::Named => decode::read_map_len(input, tag)?,
    };
    expect_len(Some(T::FIELDS.len()), len)?;
    T::unpack_fields(&mut FieldReader { input, mode })
}

/// Packs and unpacks the wrapped record in named mode.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Named<T>(pub T);

impl<T: Record> Pack for Named<T> {
    fn pack<S: Sink + ?Sized>(&self, out: &mut S) -> Result<()> {
        pack_record(&self.0, out, RecordMode::Named)
    }
}

impl<T: Record> Unpack for Named<T> {
    fn unpack_tagged<R: Source + ?Sized>(input: &mut R, tag: u8) -> Result<Self> {
        unpack_record_tagged(input, tag, RecordMode::Named).map(Named)
    }
}

/// Implements [`Record`](crate::codec::Record) for a struct from its ordered
/// field list, plus positional [`Pack`](crate::codec::Pack) and
/// [`Unpack`](crate::codec::Unpack).
///
/// ```
/// #[derive(Debug, PartialEq)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// mpackr::record!(Point { x, y });
///
/// let bytes = mpackr::to_vec(&Point { x: 1, y: -1 }).unwrap();
/// assert_eq!(bytes, [0x92, 0x01, 0xFF]);
/// ```
#[macro_export]
macro_rules! record {
    ($ty:ty { $($field:ident),+ $(,)? }) => {
        impl $crate::codec::Record for $ty {
            const FIELDS: &'static [&'static str] = &[$(stringify!($field)),+];

            fn pack_fields<S: $crate::sink::Sink + ?Sized>(
                &self,
                fields: &mut $crate::codec::FieldWriter<'_, S>,
            ) -> $crate::error::Result<()> {
                $( fields.field(stringify!($field), &self.$field)?; )+
                Ok(())
            }

            fn unpack_fields<R: $crate::sink::Source + ?Sized>(
                fields: &mut $crate::codec::FieldReader<'_, R>,
            ) -> $crate::error::Result<Self> {
                Ok(Self {
                    $( $field: fields.field(stringify!($field))?, )+
                })
            }
        }

        impl $crate::codec::Pack for $ty {
            fn pack<S: $crate::sink::Sink + ?Sized>(&self, out: &mut S) -> $crate::error::Result<()> {
                $crate::codec::pack_record(self, out, $crate::codec::RecordMode::Positional)
            }
        }

        impl $crate::codec::Unpack for $ty {
            fn unpack_tagged<R: $crate::sink::Source + ?Sized>(
                input: &mut R,
                tag: u8,
            ) -> $crate::error::Result<Self> {
                $crate::codec::record::unpack_record_tagged(
                    input,
                    tag,
                    $crate::codec::RecordMode::Positional,
                )
            }
        }
    };
}
