//! Error types for the QR fixture synthesizer

use thiserror::Error;

/// Result type alias for QR fixture operations
pub type Result<T> = std::result::Result<T, QrError>;

/// Error types that can occur while decoding, mutating or re-signing a QR payload
#[derive(Error, Debug)]
pub enum QrError {
    /// Malformed big-integer string or corrupt compressed stream
    #[error("Codec failure: {0}")]
    Codec(String),

    /// Splice bounds that do not fit the buffer. The input buffer is left untouched.
    #[error("Invalid byte range [{start}, {end}] for buffer of length {len}")]
    InvalidRange {
        start: usize,
        end: usize,
        len: usize,
    },

    /// Fewer sentinels in the record than the requested field needs
    #[error("Field not found: sentinel {index} requested, {found} present")]
    FieldNotFound { index: usize, found: usize },

    /// Timestamp or date string that does not match the fixed layout
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Cryptographic error
    #[error("Cryptographic operation failed: {0}")]
    Crypto(String),

    /// Signature verification failed
    #[error("Signature verification failed: {0}")]
    SignatureVerificationFailed(String),

    /// Unreadable private key, public key or certificate
    #[error("Invalid key material: {0}")]
    InvalidKey(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rsa::Error> for QrError {
    fn from(err: rsa::Error) -> Self {
        QrError::Crypto(err.to_string())
    }
}
