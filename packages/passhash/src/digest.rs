//! Digest selection and HMAC dispatch
//!
//! Maps the closed set of supported digests onto the RustCrypto
//! implementations. Everything above this module works with
//! [`DigestAlgorithm`] values and byte slices only.

use crate::error::{CredentialError, Result};
use ::digest::Digest;
use hmac::{Hmac, Mac};
use md5::Md5;
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512};
use std::fmt;

/// Supported digest primitives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    /// MD5, 16 byte output
    Md5,
    /// SHA-1, 20 byte output
    Sha1,
    /// SHA-224, 28 byte output
    Sha224,
    /// SHA-256, 32 byte output
    Sha256,
    /// SHA-384, 48 byte output
    Sha384,
    /// SHA-512, 64 byte output
    Sha512,
}

impl DigestAlgorithm {
    /// Every supported digest, in canonical order
    pub const ALL: [Self; 6] = [
        Self::Md5,
        Self::Sha1,
        Self::Sha224,
        Self::Sha256,
        Self::Sha384,
        Self::Sha512,
    ];

    /// Look up a digest by its canonical lowercase name
    ///
    /// Matching is exact: `"SHA1"` and `"sha-1"` are not recognised.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "md5" => Some(Self::Md5),
            "sha1" => Some(Self::Sha1),
            "sha224" => Some(Self::Sha224),
            "sha256" => Some(Self::Sha256),
            "sha384" => Some(Self::Sha384),
            "sha512" => Some(Self::Sha512),
            _ => None,
        }
    }

    /// Canonical lowercase name used in serialized credentials
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha224 => "sha224",
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
        }
    }

    /// Output length in bytes
    #[must_use]
    pub fn output_len(self) -> usize {
        match self {
            Self::Md5 => 16,
            Self::Sha1 => 20,
            Self::Sha224 => 28,
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }

    /// Plain digest of `message`
    #[must_use]
    pub fn hash(self, message: &[u8]) -> Vec<u8> {
        match self {
            Self::Md5 => Md5::digest(message).to_vec(),
            Self::Sha1 => Sha1::digest(message).to_vec(),
            Self::Sha224 => Sha224::digest(message).to_vec(),
            Self::Sha256 => Sha256::digest(message).to_vec(),
            Self::Sha384 => Sha384::digest(message).to_vec(),
            Self::Sha512 => Sha512::digest(message).to_vec(),
        }
    }

    /// One-shot HMAC of `message` under `key`
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::MacInitialization`] if the backend rejects
    /// the key. HMAC accepts keys of any length, so this does not happen with
    /// the RustCrypto implementations.
    pub fn hmac(self, key: &[u8], message: &[u8]) -> Result<Vec<u8>> {
        Ok(KeyedMac::new(self, key)?.compute(message))
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// HMAC instance keyed once and reused for many messages
///
/// PBKDF2 calls the PRF `iterations * blocks` times with the same key, so the
/// key schedule is computed once here and the state cloned per message.
#[derive(Clone)]
pub(crate) enum KeyedMac {
    Md5(Hmac<Md5>),
    Sha1(Hmac<Sha1>),
    Sha224(Hmac<Sha224>),
    Sha256(Hmac<Sha256>),
    Sha384(Hmac<Sha384>),
    Sha512(Hmac<Sha512>),
}

impl KeyedMac {
    pub(crate) fn new(algorithm: DigestAlgorithm, key: &[u8]) -> Result<Self> {
        let keyed = match algorithm {
            DigestAlgorithm::Md5 => Hmac::<Md5>::new_from_slice(key).map(Self::Md5),
            DigestAlgorithm::Sha1 => Hmac::<Sha1>::new_from_slice(key).map(Self::Sha1),
            DigestAlgorithm::Sha224 => Hmac::<Sha224>::new_from_slice(key).map(Self::Sha224),
            DigestAlgorithm::Sha256 => Hmac::<Sha256>::new_from_slice(key).map(Self::Sha256),
            DigestAlgorithm::Sha384 => Hmac::<Sha384>::new_from_slice(key).map(Self::Sha384),
            DigestAlgorithm::Sha512 => Hmac::<Sha512>::new_from_slice(key).map(Self::Sha512),
        };
        keyed.map_err(|e| {
            CredentialError::MacInitialization(format!(
                "Failed to initialize {algorithm} HMAC: {e}"
            ))
        })
    }

    pub(crate) fn compute(&self, message: &[u8]) -> Vec<u8> {
        match self {
            Self::Md5(mac) => finalize_with(mac, message),
            Self::Sha1(mac) => finalize_with(mac, message),
            Self::Sha224(mac) => finalize_with(mac, message),
            Self::Sha256(mac) => finalize_with(mac, message),
            Self::Sha384(mac) => finalize_with(mac, message),
            Self::Sha512(mac) => finalize_with(mac, message),
        }
    }
}

fn finalize_with<M: Mac + Clone>(keyed: &M, message: &[u8]) -> Vec<u8> {
    let mut mac = keyed.clone();
    mac.update(message);
    mac.finalize().into_bytes().to_vec()
}
