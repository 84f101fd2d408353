//! Error types for msbc-stream.

use thiserror::Error;

use crate::codec::CodecError;

/// Main error type for all transcoder operations.
///
/// Only hard failures surface through this type. Framing noise on the
/// receive path is recovered locally (the whole receive buffer is dropped
/// and resynchronization restarts on the next read), and a would-block
/// condition on the non-blocking transport is a normal outcome, not an
/// error.
#[derive(Debug, Error)]
pub enum TranscodeError {
    /// Hard I/O error on the SCO transport or the PCM channel.
    ///
    /// `ErrorKind::WouldBlock` never reaches this variant; the pumps
    /// swallow it and leave buffer state unchanged.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The codec rejected its input. Raised by the encode path only;
    /// decode failures are handled internally.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// The transport read returned end-of-stream: the peer hung up.
    #[error("transport closed")]
    TransportClosed,

    /// Session construction rejected its parameters.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias using TranscodeError.
pub type Result<T> = std::result::Result<T, TranscodeError>;
