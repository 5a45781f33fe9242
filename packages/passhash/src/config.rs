//! Credential generation configuration
//!
//! Presets mirror the usual security/performance trade-offs. The struct is
//! serde-friendly so it can live in an application's config file:
//!
//! ```
//! use passhash::CredentialConfig;
//!
//! let config: CredentialConfig =
//!     serde_json::from_str(r#"{ "method": "pbkdf2_sha512_10000", "salt_length": 24 }"#)?;
//! assert_eq!(config.salt_length, 24);
//! # Ok::<(), serde_json::Error>(())
//! ```

use crate::digest::DigestAlgorithm;
use crate::method::HashMethod;
use crate::salt::{DEFAULT_SALT_LENGTH, LEGACY_SALT_LENGTH};
use serde::{Deserialize, Serialize};

/// Iteration count of the high-security preset
pub const HIGH_SECURITY_ITERATIONS: u32 = 600_000;

/// Parameters for generating new credentials
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialConfig {
    /// Method used to hash new passwords
    pub method: HashMethod,
    /// Number of salt characters to generate
    pub salt_length: usize,
}

impl CredentialConfig {
    /// `pbkdf2_sha256_4096` with a 30 character salt
    #[must_use]
    pub fn standard() -> Self {
        Self {
            method: HashMethod::default(),
            salt_length: DEFAULT_SALT_LENGTH,
        }
    }

    /// `pbkdf2_sha256_600000` with a 30 character salt
    #[must_use]
    pub fn high_security() -> Self {
        Self {
            method: HashMethod::Pbkdf2 {
                digest: DigestAlgorithm::Sha256,
                iterations: HIGH_SECURITY_ITERATIONS,
            },
            salt_length: DEFAULT_SALT_LENGTH,
        }
    }

    /// `hmac_sha1` with a 22 character salt, as produced by the first format
    #[must_use]
    pub fn legacy() -> Self {
        Self {
            method: HashMethod::Hmac(DigestAlgorithm::Sha1),
            salt_length: LEGACY_SALT_LENGTH,
        }
    }

    /// Replace the hash method
    #[must_use]
    pub fn with_method(mut self, method: HashMethod) -> Self {
        self.method = method;
        self
    }

    /// Replace the salt length
    #[must_use]
    pub fn with_salt_length(mut self, salt_length: usize) -> Self {
        self.salt_length = salt_length;
        self
    }
}

impl Default for CredentialConfig {
    fn default() -> Self {
        Self::standard()
    }
}
