//! Key derivation
//!
//! A from-scratch PBKDF2-HMAC over every [`DigestAlgorithm`](crate::DigestAlgorithm),
//! plus the constant-time comparison used when checking derived output.

pub mod pbkdf2;
pub mod utils;

pub use pbkdf2::{derive, max_key_length, Pbkdf2};
pub use utils::constant_time_compare;
