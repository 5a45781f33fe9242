//! Structured logging infrastructure
//!
//! Provides env_logger-based logging that never writes credential material
//! (passwords, salts, digests) in clear. Values that must be correlated across
//! log lines are reduced to a short SHA-256 fingerprint first.

use log::{debug, info, warn};
use sha2::{Digest, Sha256};
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Number of hex characters kept from a fingerprint
const FINGERPRINT_LEN: usize = 12;

/// Logging entry points used across the passhash crates
pub struct LoggingTransformer;

impl LoggingTransformer {
    /// Initialize logging system (should be called once at application startup)
    ///
    /// Configure logging levels via the `RUST_LOG` environment variable:
    /// - `RUST_LOG=debug` - Enable all debug logs
    /// - `RUST_LOG=info` - Enable info and above
    /// - `RUST_LOG=passhash=debug` - Module-specific levels
    pub fn init() {
        INIT_LOGGER.call_once(|| {
            env_logger::Builder::from_default_env()
                .format_timestamp_micros()
                .init();

            info!("Structured logging initialized");
        });
    }

    /// Initialize logging for test environments
    ///
    /// Safe to call from every test; later calls are ignored.
    pub fn init_test() {
        let _ = env_logger::Builder::from_default_env()
            .is_test(true)
            .try_init();
    }

    /// Log a failed cryptographic operation
    ///
    /// Written at warn level with the operation name and the error message.
    /// Callers must not put credential material in either.
    pub fn log_crypto_error(operation: &str, error: &dyn std::error::Error) {
        warn!("Cryptographic operation failed: {operation} ({error})");
    }

    /// Log a newly generated credential
    ///
    /// The salt is reduced to its [`fingerprint`](Self::fingerprint).
    pub fn log_credential_generated(method: &str, salt: &[u8]) {
        debug!(
            "Generated credential (method: {method}, salt: {})",
            Self::fingerprint(salt)
        );
    }

    /// Log the outcome of a password verification
    ///
    /// `method` is the canonical method name, which carries no secret.
    pub fn log_verification(method: &str, matched: bool) {
        if matched {
            debug!("Password verification succeeded (method: {method})");
        } else {
            warn!("Password verification failed (method: {method})");
        }
    }

    /// Short, non-reversible fingerprint of a sensitive value
    ///
    /// Returns `#` followed by the first 12 hex characters of its SHA-256.
    #[must_use]
    pub fn fingerprint(value: &[u8]) -> String {
        let hash = Sha256::digest(value);
        let hex_hash = format!("{hash:x}");
        format!("#{}", &hex_hash[..FINGERPRINT_LEN])
    }
}
