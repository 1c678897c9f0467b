//! Host ⇄ wire byte-order conversion.
//!
//! MessagePack stores every multi-byte number big-endian. Each function here
//! converts in both directions: applying it twice yields the original word.

#[inline]
pub const fn host_to_be16(v: u16) -> u16 {
    v.to_be()
}

#[inline]
pub const fn host_to_be32(v: u32) -> u32 {
    v.to_be()
}

#[inline]
pub const fn host_to_be64(v: u64) -> u64 {
    v.to_be()
}

/// Returns the big-endian wire bytes of a 16-bit word.
#[inline]
pub const fn be16_bytes(v: u16) -> [u8; 2] {
    host_to_be16(v).to_ne_bytes()
}

/// Returns the big-endian wire bytes of a 32-bit word.
#[inline]
pub const fn be32_bytes(v: u32) -> [u8; 4] {
    host_to_be32(v).to_ne_bytes()
}

/// Returns the big-endian wire bytes of a 64-bit word.
#[inline]
pub const fn be64_bytes(v: u64) -> [u8; 8] {
    host_to_be64(v).to_ne_bytes()
}

/// Reads a 16-bit word from big-endian wire bytes.
#[inline]
pub const fn from_be16_bytes(b: [u8; 2]) -> u16 {
    host_to_be16(u16::from_ne_bytes(b))
}

/// Reads a 32-bit word from big-endian wire bytes.
#[inline]
pub const fn from_be32_bytes(b: [u8; 4]) -> u32 {
    host_to_be32(u32::from_ne_bytes(b))
}

/// Reads a 64-bit word from big-endian wire bytes.
#[inline]
pub const fn from_be64_bytes(b: [u8; 8]) -> u64 {
    host_to_be64(u64::from_ne_bytes(b))
}
