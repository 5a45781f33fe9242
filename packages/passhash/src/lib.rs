//! Salted password hashing with a compact text encoding
//!
//! A [`HashedCredential`] stores a hex hash, the [`HashMethod`] that produced
//! it and the salt, and encodes them as `<hash>$<method>$<salt>`:
//!
//! ```
//! use passhash::{CredentialConfig, DigestAlgorithm, HashMethod, HashedCredential};
//!
//! let config = CredentialConfig::standard().with_method(HashMethod::Pbkdf2 {
//!     digest: DigestAlgorithm::Sha256,
//!     iterations: 1000,
//! });
//! let credential = HashedCredential::generate("hunter2", &config)?;
//! let stored = credential.serialize();
//!
//! let restored = HashedCredential::parse(&stored)?;
//! assert!(restored.verify("hunter2"));
//! assert!(!restored.verify("hunter3"));
//! # Ok::<(), passhash::CredentialError>(())
//! ```
//!
//! PBKDF2 is implemented in [`kdf`] on top of the RustCrypto HMAC and digest
//! crates.

#![forbid(unsafe_code)]

pub mod config;
pub mod credential;
pub mod digest;
pub mod error;
pub mod kdf;
pub mod method;
pub mod salt;

pub use config::CredentialConfig;
pub use credential::HashedCredential;
pub use digest::DigestAlgorithm;
pub use error::{CredentialError, Result};
pub use kdf::Pbkdf2;
pub use method::HashMethod;
