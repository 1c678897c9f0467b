//! Error types for MessagePack encoding and decoding.

/// Errors that can occur while packing or unpacking MessagePack data.
#[derive(Debug, thiserror::Error)]
pub enum PackError {
    #[error("ran out of data while deserializing")]
    OutOfData,

    #[error("bad format: tag 0x{tag:02X} is not a valid {expected}")]
    BadFormat { tag: u8, expected: &'static str },

    #[error("bad size: expected {expected}, found {found}")]
    BadSize { expected: usize, found: usize },

    #[error("bad name: expected field `{expected}`, found `{found}`")]
    BadName { expected: &'static str, found: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The category of a [`PackError`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    OutOfData,
    BadFormat,
    BadSize,
    BadName,
    Io,
}

impl PackError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::OutOfData => ErrorKind::OutOfData,
            Self::BadFormat { .. } => ErrorKind::BadFormat,
            Self::BadSize { .. } => ErrorKind::BadSize,
            Self::BadName { .. } => ErrorKind::BadName,
            Self::Io(_) => ErrorKind::Io,
        }
    }

    /// Builds a `BadFormat` error and records the offending tag.
    pub(crate) fn bad_format(tag: u8, expected: &'static str) -> Self {
        tracing::trace!(tag, expected, "unexpected MessagePack tag");
        Self::BadFormat { tag, expected }
    }

    /// Builds a `BadSize` error and records the mismatch.
    pub(crate) fn bad_size(expected: usize, found: usize) -> Self {
        tracing::trace!(expected, found, "MessagePack size mismatch");
        Self::BadSize { expected, found }
    }

    /// Maps a stream error, turning a premature end of stream into `OutOfData`.
    pub(crate) fn from_read(e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            Self::OutOfData
        } else {
            Self::Io(e)
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T, E = PackError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_match_variants() {
        assert_eq!(PackError::OutOfData.kind(), ErrorKind::OutOfData);
        assert_eq!(PackError::bad_format(0xC1, "bool").kind(), ErrorKind::BadFormat);
        assert_eq!(PackError::bad_size(4, 5).kind(), ErrorKind::BadSize);
        let e = PackError::BadName {
            expected: "x",
            found: "y".into(),
        };
        assert_eq!(e.kind(), ErrorKind::BadName);
    }

    #[test]
    fn unexpected_eof_is_out_of_data() {
        let eof = std::io::Error::from(std::io::ErrorKind::UnexpectedEof);
        assert_eq!(PackError::from_read(eof).kind(), ErrorKind::OutOfData);

        let broken = std::io::Error::from(std::io::ErrorKind::BrokenPipe);
        assert_eq!(PackError::from_read(broken).kind(), ErrorKind::Io);
    }

    #[test]
    fn display_includes_tag() {
        let e = PackError::BadFormat {
            tag: 0xC1,
            expected: "float",
        };
        assert_eq!(e.to_string(), "bad format: tag 0xC1 is not a valid float");
    }
}
