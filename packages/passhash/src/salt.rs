//! Random salt generation

use rand::Rng;

/// Characters a generated salt is drawn from
pub const SALT_ALPHABET: &[u8; 52] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Salt length used by the standard configuration
pub const DEFAULT_SALT_LENGTH: usize = 30;

/// Salt length of credentials written by the first, SHA-1 only format
pub const LEGACY_SALT_LENGTH: usize = 22;

/// Draw `length` characters uniformly from [`SALT_ALPHABET`]
///
/// Any `RngCore` works as the source; pass a seeded or fixed-sequence
/// generator for reproducible salts.
pub fn generate_salt<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| char::from(SALT_ALPHABET[rng.random_range(0..SALT_ALPHABET.len())]))
        .collect()
}
