//! PBKDF2 (RFC 8018, section 5.2) over HMAC
//!
//! `DK = T_1 || T_2 || ... || T_l`, truncated to the requested length, where
//! `T_i = U_1 ^ U_2 ^ ... ^ U_c`, `U_1 = PRF(P, S || INT(i))` and
//! `U_j = PRF(P, U_{j-1})`. The block index `i` starts at 1 and is encoded as
//! a big-endian `u32` appended to the salt.

use crate::digest::{DigestAlgorithm, KeyedMac};
use crate::error::{CredentialError, Result};
use tracing::debug;
use zeroize::Zeroizing;

/// Largest derived key PBKDF2 can produce with `digest`, in bytes
#[must_use]
pub fn max_key_length(digest: DigestAlgorithm) -> u64 {
    u64::from(u32::MAX) * digest.output_len() as u64
}

/// Derive a key from `password` and `salt`
///
/// `key_length` defaults to the digest's output length.
///
/// # Errors
///
/// - [`CredentialError::InvalidInput`] if `iterations` is zero, `password` or
///   `salt` is empty, or `key_length` is `Some(0)`
/// - [`CredentialError::DerivedKeyTooLong`] if `key_length` exceeds
///   [`max_key_length`]
pub fn derive(
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    digest: DigestAlgorithm,
    key_length: Option<usize>,
) -> Result<Zeroizing<Vec<u8>>> {
    if iterations == 0 {
        return Err(CredentialError::invalid_input(
            "PBKDF2 iterations must be non-zero",
        ));
    }
    if password.is_empty() {
        return Err(CredentialError::invalid_input("PBKDF2 password is empty"));
    }
    if salt.is_empty() {
        return Err(CredentialError::invalid_input("PBKDF2 salt is empty"));
    }

    let hash_len = digest.output_len();
    let key_length = key_length.unwrap_or(hash_len);
    if key_length == 0 {
        return Err(CredentialError::invalid_input(
            "PBKDF2 key length must be non-zero",
        ));
    }
    let max = max_key_length(digest);
    if key_length as u64 > max {
        return Err(CredentialError::DerivedKeyTooLong {
            requested: key_length,
            max,
        });
    }
    let num_blocks = u32::try_from(key_length.div_ceil(hash_len)).map_err(|_| {
        CredentialError::DerivedKeyTooLong {
            requested: key_length,
            max,
        }
    })?;

    debug!(%digest, iterations, key_length, num_blocks, "deriving PBKDF2 key");

    let prf = KeyedMac::new(digest, password)?;
    let mut output = Zeroizing::new(Vec::with_capacity(num_blocks as usize * hash_len));
    for index in 1..=num_blocks {
        let block = derive_block(&prf, salt, iterations, index);
        output.extend_from_slice(&block);
    }
    output.truncate(key_length);
    Ok(output)
}

/// Compute `T_index`
fn derive_block(prf: &KeyedMac, salt: &[u8], iterations: u32, index: u32) -> Zeroizing<Vec<u8>> {
    let mut seed = Zeroizing::new(Vec::with_capacity(salt.len() + 4));
    seed.extend_from_slice(salt);
    seed.extend_from_slice(&index.to_be_bytes());

    // U_1 is iteration 1; the loop adds the remaining iterations - 1.
    let mut u = Zeroizing::new(prf.compute(&seed));
    let mut block = u.clone();
    for _ in 1..iterations {
        u = Zeroizing::new(prf.compute(&u));
        block.iter_mut().zip(u.iter()).for_each(|(t, x)| *t ^= x);
    }
    block
}

/// Reusable PBKDF2 parameter set
///
/// Holds the digest, iteration count and output length so callers deriving
/// many keys with the same parameters only validate them once per call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pbkdf2 {
    digest: DigestAlgorithm,
    iterations: u32,
    key_length: Option<usize>,
}

impl Pbkdf2 {
    /// Create a context producing keys of the digest's native length
    #[must_use]
    pub fn new(digest: DigestAlgorithm, iterations: u32) -> Self {
        Self {
            digest,
            iterations,
            key_length: None,
        }
    }

    /// Request a specific output length in bytes
    #[must_use]
    pub fn with_key_length(mut self, key_length: usize) -> Self {
        self.key_length = Some(key_length);
        self
    }

    /// Underlying digest
    #[must_use]
    pub fn digest(&self) -> DigestAlgorithm {
        self.digest
    }

    /// Iteration count
    #[must_use]
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Output length in bytes
    #[must_use]
    pub fn key_length(&self) -> usize {
        self.key_length.unwrap_or(self.digest.output_len())
    }

    /// Derive a key with these parameters
    ///
    /// # Errors
    ///
    /// Same as [`derive`].
    pub fn derive(&self, password: &[u8], salt: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        derive(password, salt, self.iterations, self.digest, self.key_length)
    }
}
