//! The MessagePack wire format: tag table and primitive encoders/decoders.
//!
//! MessagePack is a self-describing binary format. Every element starts with
//! a tag byte that names its family and, for small values, carries the value
//! or length inline. Multi-byte numbers are big-endian.

pub mod decode;
pub mod encode;
pub mod marker;

pub use decode::{Integer, read_tag};
pub use marker::Family;
