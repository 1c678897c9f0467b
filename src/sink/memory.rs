//! In-memory sinks and sources built on `bytes`.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use super::{Sink, Source};
use crate::error::{PackError, Result};

impl Sink for Vec<u8> {
    #[inline]
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

impl Sink for BytesMut {
    #[inline]
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.put_slice(bytes);
        Ok(())
    }
}

// Every `Buf` that owns or borrows contiguous memory reads the same way.
macro_rules! impl_buf_source {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Source for $ty {
                #[inline]
                fn read(&mut self, buf: &mut [u8]) -> Result<()> {
                    if Buf::remaining(self) < buf.len() {
                        return Err(PackError::OutOfData);
                    }
                    self.copy_to_slice(buf);
                    Ok(())
                }

                #[inline]
                fn peek(&mut self) -> Result<u8> {
                    self.chunk().first().copied().ok_or(PackError::OutOfData)
                }

                #[inline]
                fn available(&self) -> Option<usize> {
                    Some(Buf::remaining(self))
                }
            }
        )*
    };
}

impl_buf_source!(&[u8], Bytes, BytesMut);
