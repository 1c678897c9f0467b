//! The I/O boundary of the codec: write-only sinks and read-only sources.
//!
//! Sinks and sources know nothing about the MessagePack format. The codec only
//! ever asks a sink to accept a run of bytes and a source to hand back exactly
//! the number of bytes requested (or the next byte, without consuming it).

pub mod memory;
pub mod stream;

pub use stream::{IoSink, IoSource};

use crate::error::Result;

/// A destination for encoded bytes.
pub trait Sink {
    /// Writes all of `bytes`, or fails.
    fn write(&mut self, bytes: &[u8]) -> Result<()>;
}

/// An origin of encoded bytes.
pub trait Source {
    /// Fills `buf` completely, failing with `OutOfData` if fewer bytes remain.
    fn read(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Returns the next byte without consuming it, failing with `OutOfData`
    /// if none remains.
    fn peek(&mut self) -> Result<u8>;

    /// Number of bytes left, when the source knows it.
    ///
    /// Decoders use this to reject length prefixes that cannot be satisfied
    /// before allocating for them.
    fn available(&self) -> Option<usize> {
        None
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    #[inline]
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        (**self).write(bytes)
    }
}

impl<R: Source + ?Sized> Source for &mut R {
    #[inline]
    fn read(&mut self, buf: &mut [u8]) -> Result<()> {
        (**self).read(buf)
    }

    #[inline]
    fn peek(&mut self) -> Result<u8> {
        (**self).peek()
    }

    #[inline]
    fn available(&self) -> Option<usize> {
        (**self).available()
    }
}
