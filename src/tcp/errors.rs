use std::io;
use nix::errno::Errno;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HandshakeError {
    #[error("Usage: {program} <port>")]
    Usage { program: String },

    #[error("{0}")]
    Io(#[from] io::Error), // Wrapper around std::io::Error

    #[error("Socket error: {0}")]
    Socket(#[from] Errno), // Wrapper around nix errno

    #[error("Invalid state")]
    InvalidState(u8),
}

impl HandshakeError {
    /// Attach a short context message to an OS error, in the manner of `perror`.
    pub fn context(context: &str, err: impl Into<HandshakeError>) -> HandshakeError {
        match err.into() {
            HandshakeError::Io(e) => HandshakeError::Io(io::Error::new(e.kind(), format!("{context}: {e}"))),
            HandshakeError::Socket(errno) => {
                HandshakeError::Io(io::Error::new(io::Error::from(errno).kind(), format!("{context}: {}", errno.desc())))
            }
            other => other,
        }
    }
}

// -- Unit tests --
