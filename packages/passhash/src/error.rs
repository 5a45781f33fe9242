//! Error handling for password hashing and key derivation

use thiserror::Error;

/// Errors produced while deriving, parsing or building credentials
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    /// Serialized credential text is malformed
    #[error("Invalid credential string: {0}")]
    InvalidString(String),

    /// Derivation input is unusable (empty password or salt, zero iterations, ...)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Requested PBKDF2 output exceeds `(2^32 - 1) * hLen` bytes
    #[error("Derived key too long: requested {requested} bytes, maximum is {max}")]
    DerivedKeyTooLong {
        /// Requested key length in bytes
        requested: usize,
        /// Largest key length the digest allows
        max: u64,
    },

    /// The HMAC backend rejected the key
    #[error("MAC initialization error: {0}")]
    MacInitialization(String),
}

impl CredentialError {
    /// Create an `invalid_string` error
    #[must_use]
    pub fn invalid_string(msg: impl Into<String>) -> Self {
        Self::InvalidString(msg.into())
    }

    /// Create an `invalid_input` error
    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// Result type for credential operations
pub type Result<T> = std::result::Result<T, CredentialError>;
