//! MessagePack decoding primitives.
//!
//! Decoding always starts with [`read_tag`]. The family-specific readers take
//! the tag that was already consumed, so a caller can inspect it first and
//! then branch without reading it twice.

use super::marker;
use crate::byteorder::{from_be16_bytes, from_be32_bytes, from_be64_bytes};
use crate::error::{PackError, Result};
use crate::sink::Source;

/// Upper bound on speculative preallocation when a source cannot report
/// how many bytes remain.
const PREALLOC_LIMIT: usize = 4096;

/// An integer as it appeared on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Integer {
    /// Positive fixint or one of the `uint` tags.
    Unsigned(u64),
    /// Negative fixint or one of the `int` tags.
    Signed(i64),
}

impl Integer {
    /// Narrows the value into `T`, failing with `BadFormat` if it does not fit.
    pub fn convert<T>(self, tag: u8, expected: &'static str) -> Result<T>
    where
        T: TryFrom<u64> + TryFrom<i64>,
    {
        let converted = match self {
            Self::Unsigned(v) => <T as TryFrom<u64>>::try_from(v).ok(),
            Self::Signed(v) => <T as TryFrom<i64>>::try_from(v).ok(),
        };
        converted.ok_or_else(|| PackError::bad_format(tag, expected))
    }
}

/// Reads the tag byte that starts every encoded element.
pub fn read_tag<R: Source + ?Sized>(input: &mut R) -> Result<u8> {
    let mut tag = [0u8; 1];
    input.read(&mut tag)?;
    Ok(tag[0])
}

fn read_u8<R: Source + ?Sized>(input: &mut R) -> Result<u8> {
    read_tag(input)
}

fn read_u16<R: Source + ?Sized>(input: &mut R) -> Result<u16> {
    let mut b = [0u8; 2];
    input.read(&mut b)?;
    Ok(from_be16_bytes(b))
}

fn read_u32<R: Source + ?Sized>(input: &mut R) -> Result<u32> {
    let mut b = [0u8; 4];
    input.read(&mut b)?;
    Ok(from_be32_bytes(b))
}

fn read_u64<R: Source + ?Sized>(input: &mut R) -> Result<u64> {
    let mut b = [0u8; 8];
    input.read(&mut b)?;
    Ok(from_be64_bytes(b))
}

pub fn read_nil(tag: u8) -> Result<()> {
    if tag == marker::NIL {
        Ok(())
    } else {
        Err(PackError::bad_format(tag, "nil"))
    }
}

pub fn read_bool(tag: u8) -> Result<bool> {
    match tag {
        marker::FALSE => Ok(false),
        marker::TRUE => Ok(true),
        _ => Err(PackError::bad_format(tag, "bool")),
    }
}

/// Decodes the body of any integer tag.
pub fn read_int<R: Source + ?Sized>(input: &mut R, tag: u8) -> Result<Integer> {
    let value = match tag {
        // positive fixint
        _ if marker::is_fixint_pos(tag) => Integer::Unsigned(u64::from(tag)),
        // negative fixint: the tag byte is the two's-complement value
        _ if marker::is_fixint_neg(tag) => Integer::Signed(i64::from(tag as i8)),
        marker::UINT_8 => Integer::Unsigned(u64::from(read_u8(input)?)),
        marker::UINT_16 => Integer::Unsigned(u64::from(read_u16(input)?)),
        marker::UINT_32 => Integer::Unsigned(u64::from(read_u32(input)?)),
        marker::UINT_64 => Integer::Unsigned(read_u64(input)?),
        marker::INT_8 => Integer::Signed(i64::from(read_u8(input)? as i8)),
        marker::INT_16 => Integer::Signed(i64::from(read_u16(input)? as i16)),
        marker::INT_32 => Integer::Signed(i64::from(read_u32(input)? as i32)),
        marker::INT_64 => Integer::Signed(read_u64(input)? as i64),
        _ => return Err(PackError::bad_format(tag, "integer")),
    };
    Ok(value)
}

/// Decodes a float into single precision; a `float 64` body is narrowed.
pub fn read_f32<R: Source + ?Sized>(input: &mut R, tag: u8) -> Result<f32> {
    match tag {
        marker::FLOAT_32 => Ok(f32::from_bits(read_u32(input)?)),
        marker::FLOAT_64 => Ok(f64::from_bits(read_u64(input)?) as f32),
        _ => Err(PackError::bad_format(tag, "float")),
    }
}

/// Decodes a float into double precision; a `float 32` body is widened exactly.
pub fn read_f64<R: Source + ?Sized>(input: &mut R, tag: u8) -> Result<f64> {
    match tag {
        marker::FLOAT_32 => Ok(f64::from(f32::from_bits(read_u32(input)?))),
        marker::FLOAT_64 => Ok(f64::from_bits(read_u64(input)?)),
        _ => Err(PackError::bad_format(tag, "float")),
    }
}

/// Decodes a string header, returning the payload length in bytes.
pub fn read_str_len<R: Source + ?Sized>(input: &mut R, tag: u8) -> Result<usize> {
    let len = match tag {
        _ if marker::is_fixstr(tag) => u32::from(tag & !marker::FIX3_MASK),
        marker::STR_8 => u32::from(read_u8(input)?),
        marker::STR_16 => u32::from(read_u16(input)?),
        marker::STR_32 => read_u32(input)?,
        _ => return Err(PackError::bad_format(tag, "string")),
    };
    Ok(len as usize)
}

/// Decodes a UTF-8 string. Invalid UTF-8 is reported as `BadFormat`.
pub fn read_str<R: Source + ?Sized>(input: &mut R, tag: u8) -> Result<String> {
    let len = read_str_len(input, tag)?;
    let data = read_payload(input, len)?;
    String::from_utf8(data).map_err(|_| PackError::bad_format(tag, "UTF-8 string"))
}

/// Decodes a binary header, returning the payload length in bytes.
pub fn read_bin_len<R: Source + ?Sized>(input: &mut R, tag: u8) -> Result<usize> {
    let len = match tag {
        marker::BIN_8 => u32::from(read_u8(input)?),
        marker::BIN_16 => u32::from(read_u16(input)?),
        marker::BIN_32 => read_u32(input)?,
        _ => return Err(PackError::bad_format(tag, "binary")),
    };
    Ok(len as usize)
}

pub fn read_bin<R: Source + ?Sized>(input: &mut R, tag: u8) -> Result<Vec<u8>> {
    let len = read_bin_len(input, tag)?;
    read_payload(input, len)
}

/// Decodes an array header, returning the element count.
pub fn read_array_len<R: Source + ?Sized>(input: &mut R, tag: u8) -> Result<usize> {
    let len = match tag {
        _ if marker::is_fixarray(tag) => u32::from(tag & !marker::FIX4_MASK),
        marker::ARRAY_16 => u32::from(read_u16(input)?),
        marker::ARRAY_32 => read_u32(input)?,
        _ => return Err(PackError::bad_format(tag, "array")),
    };
    Ok(len as usize)
}

/// Decodes a map header, returning the key/value pair count.
pub fn read_map_len<R: Source + ?Sized>(input: &mut R, tag: u8) -> Result<usize> {
    let len = match tag {
        _ if marker::is_fixmap(tag) => u32::from(tag & !marker::FIX4_MASK),
        marker::MAP_16 => u32::from(read_u16(input)?),
        marker::MAP_32 => read_u32(input)?,
        _ => return Err(PackError::bad_format(tag, "map")),
    };
    Ok(len as usize)
}

/// Reads `len` raw bytes, refusing up front if the source knows it is short.
pub fn read_payload<R: Source + ?Sized>(input: &mut R, len: usize) -> Result<Vec<u8>> {
    if input.available().is_some_and(|n| n < len) {
        return Err(PackError::OutOfData);
    }
    if input.available().is_some() {
        let mut data = vec![0u8; len];
        input.read(&mut data)?;
        return Ok(data);
    }

    // Unknown length: grow as bytes actually arrive.
    let mut data = Vec::with_capacity(len.min(PREALLOC_LIMIT));
    let mut block = [0u8; PREALLOC_LIMIT];
    while data.len() < len {
        let step = (len - data.len()).min(PREALLOC_LIMIT);
        input.read(&mut block[..step])?;
        data.extend_from_slice(&block[..step]);
    }
    Ok(data)
}

/// Capacity to reserve for `len` elements that are still to be decoded.
///
/// Every element takes at least one byte, so a source that knows its length
/// bounds the reservation. Hostile headers cannot force large allocations.
pub fn capacity_hint<R: Source + ?Sized>(input: &R, len: usize) -> usize {
    len.min(input.available().unwrap_or(PREALLOC_LIMIT))
}

/// Fails with `BadSize` unless `found` matches the expected count.
pub fn expect_len(expected: Option<usize>, found: usize) -> Result<()> {
    match expected {
        Some(expected) if expected != found => Err(PackError::bad_size(expected, found)),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::format::encode;

    fn tagged(bytes: &[u8]) -> (u8, &[u8]) {
        let mut input = bytes;
        let tag = read_tag(&mut input).expect("missing tag");
        (tag, input)
    }

    #[test]
    fn decode_nil_and_bool() {
        assert!(read_nil(0xC0).is_ok());
        assert_eq!(read_nil(0xC2).unwrap_err().kind(), ErrorKind::BadFormat);
        assert!(read_bool(0xC3).unwrap());
        assert!(!read_bool(0xC2).unwrap());
        assert_eq!(read_bool(0xC0).unwrap_err().kind(), ErrorKind::BadFormat);
    }

    #[test]
    fn decode_fixints() {
        let (tag, mut rest) = tagged(&[0x7F]);
        assert_eq!(read_int(&mut rest, tag).unwrap(), Integer::Unsigned(127));

        let (tag, mut rest) = tagged(&[0xE0]);
        assert_eq!(read_int(&mut rest, tag).unwrap(), Integer::Signed(-32));

        let (tag, mut rest) = tagged(&[0xFF]);
        assert_eq!(read_int(&mut rest, tag).unwrap(), Integer::Signed(-1));
    }

    #[test]
    fn decode_explicit_integer_tags() {
        let cases: [(&[u8], Integer); 8] = [
            (&[0xCC, 0xFF], Integer::Unsigned(255)),
            (&[0xCD, 0x01, 0x00], Integer::Unsigned(256)),
            (&[0xCE, 0x00, 0x01, 0x00, 0x00], Integer::Unsigned(65536)),
            (&[0xCF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF], Integer::Unsigned(u64::MAX)),
            (&[0xD0, 0x80], Integer::Signed(-128)),
            (&[0xD1, 0xFF, 0x7F], Integer::Signed(-129)),
            (&[0xD2, 0x80, 0x00, 0x00, 0x00], Integer::Signed(i64::from(i32::MIN))),
            (&[0xD3, 0x80, 0, 0, 0, 0, 0, 0, 0], Integer::Signed(i64::MIN)),
        ];
        for (bytes, expected) in cases {
            let (tag, mut rest) = tagged(bytes);
            assert_eq!(read_int(&mut rest, tag).unwrap(), expected);
            assert!(rest.is_empty());
        }
    }

    #[test]
    fn decode_int_rejects_other_tags() {
        let mut empty: &[u8] = &[];
        for tag in [0xC0, 0xC3, 0xCA, 0xA0, 0x90, 0x80] {
            let err = read_int(&mut empty, tag).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::BadFormat, "tag 0x{tag:02X}");
        }
    }

    #[test]
    fn decode_truncated_int_is_out_of_data() {
        let (tag, mut rest) = tagged(&[0xCE, 0x00, 0x01]);
        assert_eq!(read_int(&mut rest, tag).unwrap_err().kind(), ErrorKind::OutOfData);
    }

    #[test]
    fn integer_convert_checks_range() {
        assert_eq!(Integer::Unsigned(200).convert::<u8>(0xCC, "u8").unwrap(), 200);
        assert_eq!(Integer::Signed(-5).convert::<i32>(0xFB, "i32").unwrap(), -5);
        assert_eq!(Integer::Signed(7).convert::<u16>(0xD0, "u16").unwrap(), 7);

        let err = Integer::Unsigned(300).convert::<u8>(0xCD, "u8").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadFormat);
        let err = Integer::Signed(-1).convert::<u64>(0xFF, "u64").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadFormat);
    }

    #[test]
    fn decode_floats() {
        let mut buf = Vec::new();
        encode::write_f32(&mut buf, 0.1).unwrap();
        encode::write_f64(&mut buf, 0.1).unwrap();
        let (tag, mut rest) = tagged(&buf);
        assert_eq!(read_f32(&mut rest, tag).unwrap().to_bits(), 0.1f32.to_bits());
        let tag = read_tag(&mut rest).unwrap();
        assert_eq!(read_f64(&mut rest, tag).unwrap().to_bits(), 0.1f64.to_bits());

        let (tag, mut rest) = tagged(&buf);
        assert_eq!(read_f64(&mut rest, tag).unwrap(), f64::from(0.1f32));

        let mut empty: &[u8] = &[];
        assert_eq!(read_f64(&mut empty, 0xA1).unwrap_err().kind(), ErrorKind::BadFormat);
    }

    #[test]
    fn decode_strings() {
        let (tag, mut rest) = tagged(&[0xA5, b'h', b'e', b'l', b'l', b'o']);
        assert_eq!(read_str(&mut rest, tag).unwrap(), "hello");

        let (tag, mut rest) = tagged(&[0xD9, 0x01, b'z']);
        assert_eq!(read_str(&mut rest, tag).unwrap(), "z");

        let (tag, mut rest) = tagged(&[0xA2, 0xC3, 0x28]);
        assert_eq!(read_str(&mut rest, tag).unwrap_err().kind(), ErrorKind::BadFormat);
    }

    #[test]
    fn decode_string_length_beyond_input() {
        let (tag, mut rest) = tagged(&[0xDB, 0xFF, 0xFF, 0xFF, 0xFF, b'a']);
        assert_eq!(read_str(&mut rest, tag).unwrap_err().kind(), ErrorKind::OutOfData);
    }

    #[test]
    fn decode_binary() {
        let (tag, mut rest) = tagged(&[0xC4, 0x02, 0xDE, 0xAD]);
        assert_eq!(read_bin(&mut rest, tag).unwrap(), vec![0xDE, 0xAD]);

        let (tag, mut rest) = tagged(&[0xA2, 0xDE, 0xAD]);
        assert_eq!(read_bin(&mut rest, tag).unwrap_err().kind(), ErrorKind::BadFormat);
    }

    #[test]
    fn decode_collection_headers() {
        let mut empty: &[u8] = &[];
        assert_eq!(read_array_len(&mut empty, 0x93).unwrap(), 3);
        assert_eq!(read_map_len(&mut empty, 0x8F).unwrap(), 15);

        let (tag, mut rest) = tagged(&[0xDC, 0x00, 0x10]);
        assert_eq!(read_array_len(&mut rest, tag).unwrap(), 16);

        let (tag, mut rest) = tagged(&[0xDF, 0x00, 0x01, 0x00, 0x00]);
        assert_eq!(read_map_len(&mut rest, tag).unwrap(), 65536);

        assert_eq!(read_array_len(&mut empty, 0x83).unwrap_err().kind(), ErrorKind::BadFormat);
        assert_eq!(read_map_len(&mut empty, 0x93).unwrap_err().kind(), ErrorKind::BadFormat);
    }

    #[test]
    fn capacity_hint_is_bounded_by_input() {
        let data = [0u8; 3];
        let input: &[u8] = &data;
        assert_eq!(capacity_hint(&input, 2), 2);
        assert_eq!(capacity_hint(&input, u32::MAX as usize), 3);
    }

    #[test]
    fn expect_len_reports_mismatch() {
        assert!(expect_len(None, 7).is_ok());
        assert!(expect_len(Some(7), 7).is_ok());
        let err = expect_len(Some(4), 5).unwrap_err();
        assert!(matches!(err, PackError::BadSize { expected: 4, found: 5 }));
    }
}
