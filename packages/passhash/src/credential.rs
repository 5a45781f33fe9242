//! Salted password credential and its `<hash>$<method>$<salt>` encoding

use crate::config::CredentialConfig;
use crate::error::{CredentialError, Result};
use crate::kdf::constant_time_compare;
use crate::method::HashMethod;
use crate::salt::generate_salt;
use passhash_common::LoggingTransformer;
use rand::RngCore;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Separator between the three serialized fields
pub const FIELD_SEPARATOR: char = '$';

/// A stored password hash: the hash, how it was computed, and its salt
///
/// Values are immutable. Build one from a plaintext password with
/// [`generate`](Self::generate), or from stored text with
/// [`parse`](Self::parse).
///
/// Equality compares `hash` and `salt` only. The method never takes part,
/// which is the comparison stored credentials have always been checked with.
#[derive(Debug, Clone)]
pub struct HashedCredential {
    hash: String,
    method: HashMethod,
    salt: String,
}

impl HashedCredential {
    /// Hash `password` with the standard configuration
    ///
    /// # Errors
    ///
    /// See [`generate`](Self::generate).
    pub fn new(password: &str) -> Result<Self> {
        Self::generate(password, &CredentialConfig::default())
    }

    /// Hash `password` with a fresh salt from the thread-local CSPRNG
    ///
    /// # Errors
    ///
    /// [`CredentialError::InvalidInput`] if the salt length is zero or the
    /// method rejects the input (PBKDF2 refuses an empty password).
    pub fn generate(password: &str, config: &CredentialConfig) -> Result<Self> {
        Self::generate_with_rng(password, config, &mut rand::rng())
    }

    /// Hash `password` with a salt drawn from `rng`
    ///
    /// # Errors
    ///
    /// Same as [`generate`](Self::generate).
    pub fn generate_with_rng<R: RngCore + ?Sized>(
        password: &str,
        config: &CredentialConfig,
        rng: &mut R,
    ) -> Result<Self> {
        if config.salt_length == 0 {
            return Err(CredentialError::invalid_input("salt length must be non-zero"));
        }
        let salt = generate_salt(rng, config.salt_length);
        let hash = config.method.calculate(password, &salt)?;
        LoggingTransformer::log_credential_generated(&config.method.to_string(), salt.as_bytes());
        Ok(Self {
            hash,
            method: config.method,
            salt,
        })
    }

    /// Assemble a credential from already computed parts
    ///
    /// No hashing is done. The hash is kept as given.
    ///
    /// # Errors
    ///
    /// [`CredentialError::InvalidInput`] if `hash` or `salt` is empty or
    /// contains the `$` separator, or if a PBKDF2 method has zero iterations.
    pub fn from_parts(
        hash: impl Into<String>,
        method: HashMethod,
        salt: impl Into<String>,
    ) -> Result<Self> {
        if let HashMethod::Pbkdf2 { iterations: 0, .. } = method {
            return Err(CredentialError::invalid_input(
                "PBKDF2 iterations must be non-zero",
            ));
        }
        let hash = hash.into();
        let salt = salt.into();
        for (field, value) in [("hash", &hash), ("salt", &salt)] {
            if value.is_empty() {
                return Err(CredentialError::invalid_input(format!("{field} is empty")));
            }
            if value.contains(FIELD_SEPARATOR) {
                return Err(CredentialError::invalid_input(format!(
                    "{field} contains `{FIELD_SEPARATOR}`"
                )));
            }
        }
        Ok(Self { hash, method, salt })
    }

    /// Parse `<hash>$<method>$<salt>`
    ///
    /// # Errors
    ///
    /// [`CredentialError::InvalidString`] unless the text has exactly three
    /// non-empty fields and a recognised method.
    pub fn parse(text: &str) -> Result<Self> {
        let fields: Vec<&str> = text.split(FIELD_SEPARATOR).collect();
        let [hash, method, salt] = fields.as_slice() else {
            return Err(CredentialError::invalid_string(format!(
                "expected 3 `{FIELD_SEPARATOR}`-separated fields, found {}",
                fields.len()
            )));
        };
        if hash.is_empty() || method.is_empty() || salt.is_empty() {
            return Err(CredentialError::invalid_string("credential field is empty"));
        }
        Ok(Self {
            hash: (*hash).to_string(),
            method: method.parse()?,
            salt: (*salt).to_string(),
        })
    }

    /// Encode as `<hash>$<method>$<salt>`
    #[must_use]
    pub fn serialize(&self) -> String {
        self.to_string()
    }

    /// Check `candidate` against the stored hash
    ///
    /// The comparison is constant-time and case-insensitive on the stored
    /// hash. A derivation failure counts as a mismatch.
    #[must_use]
    pub fn verify(&self, candidate: &str) -> bool {
        let matched = match self.method.calculate(candidate, &self.salt) {
            Ok(computed) => {
                let expected = self.hash.to_ascii_lowercase();
                constant_time_compare(computed.as_bytes(), expected.as_bytes())
            }
            Err(e) => {
                LoggingTransformer::log_crypto_error("password verification", &e);
                false
            }
        };
        LoggingTransformer::log_verification(&self.method.to_string(), matched);
        matched
    }

    /// Stored hash, hex encoded
    #[must_use]
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Method the hash was computed with
    #[must_use]
    pub fn method(&self) -> HashMethod {
        self.method
    }

    /// Salt the hash was computed with
    #[must_use]
    pub fn salt(&self) -> &str {
        &self.salt
    }
}

// Method deliberately excluded; see the type docs.
impl PartialEq for HashedCredential {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.salt == other.salt
    }
}

impl Eq for HashedCredential {}

impl Hash for HashedCredential {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash.hash(state);
        self.salt.hash(state);
    }
}

impl fmt::Display for HashedCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{}",
            self.hash, self.method, self.salt
        )
    }
}

impl FromStr for HashedCredential {
    type Err = CredentialError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for HashedCredential {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HashedCredential {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(de::Error::custom)
    }
}
