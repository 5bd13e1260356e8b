//! Error types
//!
//! Every fallible operation in the crate returns one of the specific error
//! types below, which all convert into the crate-wide [`Error`].

use std::fmt;
use std::io;

pub use crate::client::endpoint::EndpointError;
pub use crate::registry::RegistryError;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Which text field of a message an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Nickname,
    Data,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Nickname => write!(f, "nickname"),
            Field::Data => write!(f, "data"),
        }
    }
}

/// Wire codec errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Frame length is outside the allowed bounds
    FrameSize { len: usize, min: usize, max: usize },
    /// No terminator within the field window, or the field is longer than allowed
    FieldTooLong { field: Field, max: usize },
    /// Field contains a zero byte or a non-ASCII byte
    InvalidField { field: Field, byte: u8 },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::FrameSize { len, min, max } => {
                write!(f, "Frame size {} outside [{}, {}]", len, min, max)
            }
            CodecError::FieldTooLong { field, max } => {
                write!(f, "Field {} longer than {} bytes", field, max)
            }
            CodecError::InvalidField { field, byte } => {
                write!(f, "Field {} contains invalid byte 0x{:02x}", field, byte)
            }
        }
    }
}

impl std::error::Error for CodecError {}

/// Transport errors
#[derive(Debug)]
pub enum TransportError {
    /// The binding was closed on purpose
    Closed,
    /// Any other socket failure
    Io(io::Error),
}

impl TransportError {
    /// Whether this error means the binding was shut down deliberately
    pub fn is_closed(&self) -> bool {
        matches!(self, TransportError::Closed)
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Closed => write!(f, "Binding closed"),
            TransportError::Io(e) => write!(f, "Transport I/O error: {}", e),
        }
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransportError::Io(e) => Some(e),
            TransportError::Closed => None,
        }
    }
}

impl From<io::Error> for TransportError {
    fn from(e: io::Error) -> Self {
        TransportError::Io(e)
    }
}

/// Crate-wide error type
#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    Codec(CodecError),
    Transport(TransportError),
    Endpoint(EndpointError),
    Registry(RegistryError),
    /// No datagram arrived before the deadline
    Timeout,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::Codec(e) => write!(f, "Codec error: {}", e),
            Error::Transport(e) => write!(f, "{}", e),
            Error::Endpoint(e) => write!(f, "Endpoint error: {}", e),
            Error::Registry(e) => write!(f, "Registry error: {}", e),
            Error::Timeout => write!(f, "Timed out"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Codec(e) => Some(e),
            Error::Transport(e) => Some(e),
            Error::Endpoint(e) => Some(e),
            Error::Registry(e) => Some(e),
            Error::Timeout => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<CodecError> for Error {
    fn from(e: CodecError) -> Self {
        Error::Codec(e)
    }
}

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        Error::Transport(e)
    }
}

impl From<EndpointError> for Error {
    fn from(e: EndpointError) -> Self {
        Error::Endpoint(e)
    }
}

impl From<RegistryError> for Error {
    fn from(e: RegistryError) -> Self {
        Error::Registry(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_error_display() {
        let err = CodecError::FrameSize {
            len: 3,
            min: 6,
            max: 2036,
        };
        assert_eq!(err.to_string(), "Frame size 3 outside [6, 2036]");

        let err = CodecError::InvalidField {
            field: Field::Data,
            byte: 0,
        };
        assert_eq!(err.to_string(), "Field data contains invalid byte 0x00");
    }

    #[test]
    fn test_transport_closed() {
        assert!(TransportError::Closed.is_closed());
        let io = TransportError::from(io::Error::new(io::ErrorKind::Other, "boom"));
        assert!(!io.is_closed());
    }

    #[test]
    fn test_error_from_codec() {
        let err: Error = CodecError::FieldTooLong {
            field: Field::Nickname,
            max: 30,
        }
        .into();
        assert!(matches!(err, Error::Codec(CodecError::FieldTooLong { .. })));
    }
}
