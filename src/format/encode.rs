//! MessagePack encoding primitives.
//!
//! Every encoder picks the smallest tag that can represent its input.

use super::marker;
use crate::byteorder::{be16_bytes, be32_bytes, be64_bytes};
use crate::error::{PackError, Result};
use crate::sink::Sink;

pub fn write_nil<S: Sink + ?Sized>(out: &mut S) -> Result<()> {
    out.write(&[marker::NIL])
}

pub fn write_bool<S: Sink + ?Sized>(out: &mut S, value: bool) -> Result<()> {
    out.write(&[if value { marker::TRUE } else { marker::FALSE }])
}

/// Encodes an unsigned integer using the smallest possible representation.
pub fn write_uint<S: Sink + ?Sized>(out: &mut S, value: u64) -> Result<()> {
    if value <= u64::from(marker::FIXINT_POS_MAX) {
        // positive fixint
        out.write(&[value as u8])
    } else if value <= u64::from(u8::MAX) {
        out.write(&[marker::UINT_8, value as u8])
    } else if value <= u64::from(u16::MAX) {
        out.write(&[marker::UINT_16])?;
        out.write(&be16_bytes(value as u16))
    } else if value <= u64::from(u32::MAX) {
        out.write(&[marker::UINT_32])?;
        out.write(&be32_bytes(value as u32))
    } else {
        out.write(&[marker::UINT_64])?;
        out.write(&be64_bytes(value))
    }
}

/// Encodes a signed integer using the smallest possible representation.
///
/// Non-negative values share the unsigned ladder, so `5i64` and `5u64`
/// produce identical bytes.
pub fn write_sint<S: Sink + ?Sized>(out: &mut S, value: i64) -> Result<()> {
    if value >= 0 {
        write_uint(out, value as u64)
    } else if value >= -32 {
        // negative fixint
        out.write(&[value as i8 as u8])
    } else if value >= i64::from(i8::MIN) {
        out.write(&[marker::INT_8, value as i8 as u8])
    } else if value >= i64::from(i16::MIN) {
        out.write(&[marker::INT_16])?;
        out.write(&be16_bytes(value as i16 as u16))
    } else if value >= i64::from(i32::MIN) {
        out.write(&[marker::INT_32])?;
        out.write(&be32_bytes(value as i32 as u32))
    } else {
        out.write(&[marker::INT_64])?;
        out.write(&be64_bytes(value as u64))
    }
}

pub fn write_f32<S: Sink + ?Sized>(out: &mut S, value: f32) -> Result<()> {
    out.write(&[marker::FLOAT_32])?;
    out.write(&be32_bytes(value.to_bits()))
}

pub fn write_f64<S: Sink + ?Sized>(out: &mut S, value: f64) -> Result<()> {
    out.write(&[marker::FLOAT_64])?;
    out.write(&be64_bytes(value.to_bits()))
}

/// Encodes a string header for a payload of `len` bytes.
pub fn write_str_len<S: Sink + ?Sized>(out: &mut S, len: usize) -> Result<()> {
    let len = wire_len(len)?;
    if (len as usize) <= marker::FIXSTR_MAX_LEN {
        out.write(&[marker::FIXSTR_PREFIX | len as u8])
    } else if len <= u32::from(u8::MAX) {
        out.write(&[marker::STR_8, len as u8])
    } else if len <= u32::from(u16::MAX) {
        out.write(&[marker::STR_16])?;
        out.write(&be16_bytes(len as u16))
    } else {
        out.write(&[marker::STR_32])?;
        out.write(&be32_bytes(len))
    }
}

/// Encodes a string (size = byte length, not char count).
pub fn write_str<S: Sink + ?Sized>(out: &mut S, value: &str) -> Result<()> {
    write_str_len(out, value.len())?;
    out.write(value.as_bytes())
}

/// Encodes a binary header for a payload of `len` bytes.
pub fn write_bin_len<S: Sink + ?Sized>(out: &mut S, len: usize) -> Result<()> {
    let len = wire_len(len)?;
    if len <= u32::from(u8::MAX) {
        out.write(&[marker::BIN_8, len as u8])
    } else if len <= u32::from(u16::MAX) {
        out.write(&[marker::BIN_16])?;
        out.write(&be16_bytes(len as u16))
    } else {
        out.write(&[marker::BIN_32])?;
        out.write(&be32_bytes(len))
    }
}

pub fn write_bin<S: Sink + ?Sized>(out: &mut S, value: &[u8]) -> Result<()> {
    write_bin_len(out, value.len())?;
    out.write(value)
}

/// Encodes an array header announcing `len` elements.
pub fn write_array_len<S: Sink + ?Sized>(out: &mut S, len: usize) -> Result<()> {
    write_collection_len(out, len, marker::FIXARRAY_PREFIX, marker::ARRAY_16, marker::ARRAY_32)
}

/// Encodes a map header announcing `len` key/value pairs.
pub fn write_map_len<S: Sink + ?Sized>(out: &mut S, len: usize) -> Result<()> {
    write_collection_len(out, len, marker::FIXMAP_PREFIX, marker::MAP_16, marker::MAP_32)
}

fn write_collection_len<S: Sink + ?Sized>(
    out: &mut S,
    len: usize,
    fix_prefix: u8,
    tag16: u8,
    tag32: u8,
) -> Result<()> {
    let len = wire_len(len)?;
    if (len as usize) <= marker::FIXCOLLECTION_MAX_LEN {
        out.write(&[fix_prefix | len as u8])
    } else if len <= u32::from(u16::MAX) {
        out.write(&[tag16])?;
        out.write(&be16_bytes(len as u16))
    } else {
        out.write(&[tag32])?;
        out.write(&be32_bytes(len))
    }
}

/// Lengths travel as at most 32 bits on the wire.
fn wire_len(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| PackError::bad_size(u32::MAX as usize, len))
}
