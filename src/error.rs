use alloc::string::String;

use thiserror::Error;

/// Broad category of a [`FrameError`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid options supplied while constructing a frame.
    Configuration,
    /// The bytes being decoded do not form a supported header.
    Decode,
    /// The buffer is too small for the requested read or write.
    Bounds,
}

/// Errors returned while constructing, decoding or encoding an Ethernet header.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    /// The symbolic protocol type has no known code.
    #[error("unsupported protocol type [{0}]")]
    UnsupportedType(String),
    /// The numeric protocol code given at construction has no known type.
    #[error("unsupported protocol type [{0:#06x}]")]
    UnsupportedTypeCode(u16),
    /// Only the plain header without VLAN tags is implemented.
    #[error("unsupported ethernet frame length [{0}]; must be 14 as only the untagged header is implemented")]
    UnsupportedLength(usize),
    /// A hardware address could not be parsed from its text form.
    #[error("invalid hardware address [{0}]")]
    InvalidAddress(String),
    /// The protocol code found on the wire has no known type.
    #[error("unsupported protocol type code [{0:#06x}]")]
    UnknownTypeCode(u16),
    /// The attached values are the requested offset, the number of bytes
    /// needed from it and the length of the buffer.
    #[error("buffer too short: need {needed} bytes at offset {offset}, buffer holds {available}")]
    BufferTooShort {
        offset: usize,
        needed: usize,
        available: usize,
    },
}

impl FrameError {
    /// Returns the category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FrameError::UnsupportedType(_)
            | FrameError::UnsupportedTypeCode(_)
            | FrameError::UnsupportedLength(_)
            | FrameError::InvalidAddress(_) => ErrorKind::Configuration,
            FrameError::UnknownTypeCode(_) => ErrorKind::Decode,
            FrameError::BufferTooShort { .. } => ErrorKind::Bounds,
        }
    }
}

/// Checks that `len` bytes starting at `offset` lie within a buffer of
/// `available` bytes.
pub(crate) fn check_bounds(available: usize, offset: usize, len: usize) -> Result<(), FrameError> {
    match offset.checked_add(len) {
        Some(end) if end <= available => Ok(()),
        _ => Err(FrameError::BufferTooShort {
            offset,
            needed: len,
            available,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_kinds() {
        assert_eq!(
            FrameError::UnsupportedType("foo".into()).kind(),
            ErrorKind::Configuration
        );
        assert_eq!(
            FrameError::UnsupportedLength(20).kind(),
            ErrorKind::Configuration
        );
        assert_eq!(FrameError::UnknownTypeCode(0x9999).kind(), ErrorKind::Decode);
        assert_eq!(
            FrameError::BufferTooShort {
                offset: 0,
                needed: 14,
                available: 3
            }
            .kind(),
            ErrorKind::Bounds
        );
    }

    #[test]
    fn test_messages_name_offender() {
        assert_eq!(
            FrameError::UnsupportedType("foo".into()).to_string(),
            "unsupported protocol type [foo]"
        );
        assert_eq!(
            FrameError::UnknownTypeCode(0x9999).to_string(),
            "unsupported protocol type code [0x9999]"
        );
        assert!(FrameError::UnsupportedLength(20)
            .to_string()
            .starts_with("unsupported ethernet frame length [20]"));
    }

    #[test]
    fn test_check_bounds() {
        assert!(check_bounds(14, 0, 14).is_ok());
        assert!(check_bounds(18, 4, 14).is_ok());
        assert_eq!(
            check_bounds(17, 4, 14),
            Err(FrameError::BufferTooShort {
                offset: 4,
                needed: 14,
                available: 17
            })
        );
        assert!(check_bounds(14, usize::MAX, 14).is_err());
    }
}
