//! Tests for the shared logging helpers

use passhash_common::LoggingTransformer;

#[test]
fn test_fingerprint_is_short_and_stable() {
    let first = LoggingTransformer::fingerprint(b"ALCKgWoguBGWikAqMErOIFmSmYlUVL");
    let second = LoggingTransformer::fingerprint(b"ALCKgWoguBGWikAqMErOIFmSmYlUVL");
    assert_eq!(first, second);
    assert_eq!(first.len(), 13);
    assert!(first.starts_with('#'));
    assert!(first[1..].chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn test_fingerprint_matches_sha256_prefix() {
    // SHA-256("abc") = ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad
    assert_eq!(LoggingTransformer::fingerprint(b"abc"), "#ba7816bf8f01");
}

#[test]
fn test_fingerprint_does_not_contain_input() {
    let fingerprint = LoggingTransformer::fingerprint(b"secret");
    assert!(!fingerprint.contains("secret"));
    assert_ne!(fingerprint, LoggingTransformer::fingerprint(b"secret2"));
}

#[test]
fn test_init_test_is_idempotent() {
    LoggingTransformer::init_test();
    LoggingTransformer::init_test();
    LoggingTransformer::log_verification("hash_sha1", true);
    LoggingTransformer::log_verification("hash_sha1", false);
}
