//! Hash method selection and its textual form
//!
//! | Form | Example |
//! |------|---------|
//! | `hash_<digest>` | `hash_sha1` |
//! | `hmac_<digest>` | `hmac_sha256` |
//! | `pbkdf2_<digest>_<iterations>` | `pbkdf2_sha256_4096` |

use crate::digest::DigestAlgorithm;
use crate::error::{CredentialError, Result};
use crate::kdf;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use zeroize::Zeroizing;

/// Iteration count used by [`HashMethod::default`]
pub const DEFAULT_PBKDF2_ITERATIONS: u32 = 4096;

/// How a password and salt are turned into the stored hash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashMethod {
    /// `digest(salt ++ password)`
    DirectHash(DigestAlgorithm),
    /// `HMAC(key = salt, message = password)`
    Hmac(DigestAlgorithm),
    /// PBKDF2-HMAC with the password as key, output of the digest's length
    Pbkdf2 {
        /// Digest underlying the HMAC
        digest: DigestAlgorithm,
        /// Iteration count, must be positive
        iterations: u32,
    },
}

impl HashMethod {
    /// Underlying digest
    #[must_use]
    pub fn digest(&self) -> DigestAlgorithm {
        match *self {
            Self::DirectHash(digest) | Self::Hmac(digest) | Self::Pbkdf2 { digest, .. } => digest,
        }
    }

    /// Length in bytes of the hash this method produces
    #[must_use]
    pub fn output_len(&self) -> usize {
        self.digest().output_len()
    }

    /// Hash `password` with `salt`, returning lowercase hex
    ///
    /// # Errors
    ///
    /// Only the PBKDF2 variant can fail; see [`kdf::derive`].
    pub fn calculate(&self, password: &str, salt: &str) -> Result<String> {
        match *self {
            Self::DirectHash(digest) => {
                let mut message = Zeroizing::new(Vec::with_capacity(salt.len() + password.len()));
                message.extend_from_slice(salt.as_bytes());
                message.extend_from_slice(password.as_bytes());
                Ok(hex::encode(digest.hash(&message)))
            }
            Self::Hmac(digest) => {
                let mac = Zeroizing::new(digest.hmac(salt.as_bytes(), password.as_bytes())?);
                Ok(hex::encode(mac.as_slice()))
            }
            Self::Pbkdf2 { digest, iterations } => {
                let derived =
                    kdf::derive(password.as_bytes(), salt.as_bytes(), iterations, digest, None)?;
                Ok(hex::encode(derived.as_slice()))
            }
        }
    }
}

impl Default for HashMethod {
    fn default() -> Self {
        Self::Pbkdf2 {
            digest: DigestAlgorithm::Sha256,
            iterations: DEFAULT_PBKDF2_ITERATIONS,
        }
    }
}

impl fmt::Display for HashMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DirectHash(digest) => write!(f, "hash_{digest}"),
            Self::Hmac(digest) => write!(f, "hmac_{digest}"),
            Self::Pbkdf2 { digest, iterations } => write!(f, "pbkdf2_{digest}_{iterations}"),
        }
    }
}

impl FromStr for HashMethod {
    type Err = CredentialError;

    fn from_str(s: &str) -> Result<Self> {
        let fields: Vec<&str> = s.split('_').collect();
        match fields.as_slice() {
            ["hash", name] => Ok(Self::DirectHash(parse_digest(name)?)),
            ["hmac", name] => Ok(Self::Hmac(parse_digest(name)?)),
            ["pbkdf2", name, count] => {
                let digest = parse_digest(name)?;
                let iterations = parse_iterations(count).ok_or_else(|| {
                    CredentialError::invalid_string(format!(
                        "iteration count `{count}` is not a positive integer"
                    ))
                })?;
                Ok(Self::Pbkdf2 { digest, iterations })
            }
            _ => Err(CredentialError::invalid_string(format!(
                "unrecognised hash method `{s}`"
            ))),
        }
    }
}

fn parse_digest(name: &str) -> Result<DigestAlgorithm> {
    DigestAlgorithm::from_name(name)
        .ok_or_else(|| CredentialError::invalid_string(format!("unknown digest `{name}`")))
}

/// Canonical positive decimal: digits only, no sign, no leading zero, fits `u32`
fn parse_iterations(count: &str) -> Option<u32> {
    if count.is_empty() || count.starts_with('0') || !count.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    count.parse().ok()
}

impl Serialize for HashMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HashMethod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}
