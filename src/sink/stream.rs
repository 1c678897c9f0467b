//! Adapters between the codec and `std::io` streams.

use std::io::{BufRead, Write};

use super::{Sink, Source};
use crate::error::{PackError, Result};

/// Writes encoded bytes to any `std::io::Write`.
pub struct IoSink<W> {
    writer: W,
}

impl<W: Write> IoSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Flushes the underlying writer.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Sink for IoSink<W> {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer.write_all(bytes)?;
        Ok(())
    }
}

/// Reads encoded bytes from any `std::io::BufRead`.
///
/// The internal buffer of the reader provides the one-byte lookahead that
/// [`Source::peek`] needs. Wrap a plain `Read` in `std::io::BufReader` first.
pub struct IoSource<R> {
    reader: R,
}

impl<R: BufRead> IoSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: BufRead> Source for IoSource<R> {
    fn read(&mut self, buf: &mut [u8]) -> Result<()> {
        self.reader.read_exact(buf).map_err(PackError::from_read)
    }

    fn peek(&mut self) -> Result<u8> {
        let chunk = self.reader.fill_buf().map_err(PackError::from_read)?;
        chunk.first().copied().ok_or(PackError::OutOfData)
    }
}
