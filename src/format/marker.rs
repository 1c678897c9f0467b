//! MessagePack tag byte constants and tag-family classification.

// Nil
pub const NIL: u8 = 0xC0;

// Boolean
pub const FALSE: u8 = 0xC2;
pub const TRUE: u8 = 0xC3;

// Float (IEEE 754, single and double precision)
pub const FLOAT_32: u8 = 0xCA;
pub const FLOAT_64: u8 = 0xCB;

// Unsigned integer (beyond positive fixint range)
pub const UINT_8: u8 = 0xCC;
pub const UINT_16: u8 = 0xCD;
pub const UINT_32: u8 = 0xCE;
pub const UINT_64: u8 = 0xCF;

// Signed integer (beyond negative fixint range)
pub const INT_8: u8 = 0xD0;
pub const INT_16: u8 = 0xD1;
pub const INT_32: u8 = 0xD2;
pub const INT_64: u8 = 0xD3;

// FIXINT: single byte
// Positive: 0x00..=0x7F (0..127)
// Negative: 0xE0..=0xFF (-32..-1)
pub const FIXINT_POS_MAX: u8 = 0x7F;
pub const FIXINT_NEG: u8 = 0xE0;

// String
// FIXSTR: 0xA0..=0xBF (top 3 bits 0b101, low 5 = byte length 0..31)
pub const STR_8: u8 = 0xD9;
pub const STR_16: u8 = 0xDA;
pub const STR_32: u8 = 0xDB;

// Binary
pub const BIN_8: u8 = 0xC4;
pub const BIN_16: u8 = 0xC5;
pub const BIN_32: u8 = 0xC6;

// Array
// FIXARRAY: 0x90..=0x9F (high nibble 0x9, low = element count 0..15)
pub const ARRAY_16: u8 = 0xDC;
pub const ARRAY_32: u8 = 0xDD;

// Map
// FIXMAP: 0x80..=0x8F (high nibble 0x8, low = pair count 0..15)
pub const MAP_16: u8 = 0xDE;
pub const MAP_32: u8 = 0xDF;

// Prefixes and masks for the fixed-size families.
pub const FIXSTR_PREFIX: u8 = 0xA0;
pub const FIXARRAY_PREFIX: u8 = 0x90;
pub const FIXMAP_PREFIX: u8 = 0x80;
pub const FIX3_MASK: u8 = 0b1110_0000;
pub const FIX4_MASK: u8 = 0b1111_0000;

// Largest lengths that still fit the fixed-size families.
pub const FIXSTR_MAX_LEN: usize = 31;
pub const FIXCOLLECTION_MAX_LEN: usize = 15;

#[inline]
pub const fn is_bool(tag: u8) -> bool {
    tag == FALSE || tag == TRUE
}

#[inline]
pub const fn is_float(tag: u8) -> bool {
    tag == FLOAT_32 || tag == FLOAT_64
}

#[inline]
pub const fn is_fixint_pos(tag: u8) -> bool {
    tag <= FIXINT_POS_MAX
}

#[inline]
pub const fn is_fixint_neg(tag: u8) -> bool {
    tag & FIX3_MASK == FIXINT_NEG
}

#[inline]
pub const fn is_uint(tag: u8) -> bool {
    is_fixint_pos(tag) || matches!(tag, UINT_8 | UINT_16 | UINT_32 | UINT_64)
}

#[inline]
pub const fn is_sint(tag: u8) -> bool {
    is_fixint_neg(tag) || matches!(tag, INT_8 | INT_16 | INT_32 | INT_64)
}

#[inline]
pub const fn is_fixstr(tag: u8) -> bool {
    tag & FIX3_MASK == FIXSTR_PREFIX
}

#[inline]
pub const fn is_str(tag: u8) -> bool {
    is_fixstr(tag) || matches!(tag, STR_8 | STR_16 | STR_32)
}

#[inline]
pub const fn is_bin(tag: u8) -> bool {
    matches!(tag, BIN_8 | BIN_16 | BIN_32)
}

#[inline]
pub const fn is_fixarray(tag: u8) -> bool {
    tag & FIX4_MASK == FIXARRAY_PREFIX
}

#[inline]
pub const fn is_array(tag: u8) -> bool {
    is_fixarray(tag) || matches!(tag, ARRAY_16 | ARRAY_32)
}

#[inline]
pub const fn is_fixmap(tag: u8) -> bool {
    tag & FIX4_MASK == FIXMAP_PREFIX
}

#[inline]
pub const fn is_map(tag: u8) -> bool {
    is_fixmap(tag) || matches!(tag, MAP_16 | MAP_32)
}

/// The top-level MessagePack type family a tag byte belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Nil,
    Bool,
    UInt,
    Int,
    Float,
    Str,
    Bin,
    Array,
    Map,
}

impl Family {
    /// Classifies a tag byte, or returns `None` for tags outside the
    /// supported families (0xC1, extension types).
    pub const fn of(tag: u8) -> Option<Self> {
        if tag == NIL {
            Some(Self::Nil)
        } else if is_bool(tag) {
            Some(Self::Bool)
        } else if is_float(tag) {
            Some(Self::Float)
        } else if is_uint(tag) {
            Some(Self::UInt)
        } else if is_sint(tag) {
            Some(Self::Int)
        } else if is_str(tag) {
            Some(Self::Str)
        } else if is_bin(tag) {
            Some(Self::Bin)
        } else if is_array(tag) {
            Some(Self::Array)
        } else if is_map(tag) {
            Some(Self::Map)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_ranges_classify() {
        assert_eq!(Family::of(0x00), Some(Family::UInt));
        assert_eq!(Family::of(0x7F), Some(Family::UInt));
        assert_eq!(Family::of(0x80), Some(Family::Map));
        assert_eq!(Family::of(0x8F), Some(Family::Map));
        assert_eq!(Family::of(0x90), Some(Family::Array));
        assert_eq!(Family::of(0x9F), Some(Family::Array));
        assert_eq!(Family::of(0xA0), Some(Family::Str));
        assert_eq!(Family::of(0xBF), Some(Family::Str));
        assert_eq!(Family::of(0xE0), Some(Family::Int));
        assert_eq!(Family::of(0xFF), Some(Family::Int));
    }

    #[test]
    fn explicit_tags_classify() {
        assert_eq!(Family::of(NIL), Some(Family::Nil));
        assert_eq!(Family::of(TRUE), Some(Family::Bool));
        assert_eq!(Family::of(FLOAT_32), Some(Family::Float));
        assert_eq!(Family::of(UINT_64), Some(Family::UInt));
        assert_eq!(Family::of(INT_8), Some(Family::Int));
        assert_eq!(Family::of(STR_32), Some(Family::Str));
        assert_eq!(Family::of(BIN_16), Some(Family::Bin));
        assert_eq!(Family::of(ARRAY_32), Some(Family::Array));
        assert_eq!(Family::of(MAP_16), Some(Family::Map));
    }

    #[test]
    fn unsupported_tags() {
        // Never used, and the extension family.
        for tag in [0xC1, 0xC7, 0xC8, 0xC9, 0xD4, 0xD5, 0xD6, 0xD7, 0xD8] {
            assert_eq!(Family::of(tag), None, "tag 0x{tag:02X}");
        }
    }

    #[test]
    fn every_tag_has_at_most_one_family() {
        for tag in 0..=u8::MAX {
            let hits = [
                tag == NIL,
                is_bool(tag),
                is_float(tag),
                is_uint(tag),
                is_sint(tag),
                is_str(tag),
                is_bin(tag),
                is_array(tag),
                is_map(tag),
            ]
            .iter()
            .filter(|&&hit| hit)
            .count();
            assert!(hits <= 1, "tag 0x{tag:02X} matched {hits} families");
        }
    }
}
