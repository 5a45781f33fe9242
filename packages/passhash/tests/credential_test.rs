//! HashedCredential parsing, generation and verification tests

use passhash::salt::{DEFAULT_SALT_LENGTH, LEGACY_SALT_LENGTH, SALT_ALPHABET};
use passhash::{CredentialConfig, CredentialError, DigestAlgorithm, HashMethod, HashedCredential};
use passhash_common::LoggingTransformer;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

const FIXTURE_SHA256: &str = "1293b6cf05902a0333ed1db991f296d36641491fb2afb83fca968e8a4a80b7cb\
                              $pbkdf2_sha256_4096$ALCKgWoguBGWikAqMErOIFmSmYlUVL";
const FIXTURE_SHA1: &str =
    "d500a1fb233ca92cfc960e0411e186a4f2e8d267$pbkdf2_sha1_1024$eXpncMALpDTGVasmeneBkA";
const FIXTURE_HASH: &str =
    "00b902718d496f07b86e4fc32df31083f2c82690$hash_sha1$WffQVliOqZkUORlHDlHPux";

/// Fixed-sequence generator: yields 0, 1, 2, ... as `u64`s
struct SequenceRng(u64);

impl RngCore for SequenceRng {
    fn next_u32(&mut self) -> u32 {
        self.next_u64() as u32
    }

    fn next_u64(&mut self) -> u64 {
        let value = self.0;
        self.0 = self.0.wrapping_add(0x9e37_79b9_7f4a_7c15);
        value
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

fn fast_config(method: HashMethod) -> CredentialConfig {
    CredentialConfig::standard().with_method(method)
}

// Legacy fixtures

#[test]
fn test_fixture_pbkdf2_sha256_verifies() {
    LoggingTransformer::init_test();
    let credential = HashedCredential::parse(FIXTURE_SHA256).expect("fixture should parse");
    assert_eq!(
        credential.method(),
        HashMethod::Pbkdf2 {
            digest: DigestAlgorithm::Sha256,
            iterations: 4096
        }
    );
    assert_eq!(credential.salt(), "ALCKgWoguBGWikAqMErOIFmSmYlUVL");
    assert!(credential.verify("test1"));
    assert!(!credential.verify("test2"));
}

#[test]
fn test_fixture_pbkdf2_sha1_verifies() {
    LoggingTransformer::init_test();
    let credential = HashedCredential::parse(FIXTURE_SHA1).expect("fixture should parse");
    assert!(credential.verify("test2"));
    assert!(!credential.verify("test1"));
}

#[test]
fn test_fixture_direct_hash_verifies() {
    LoggingTransformer::init_test();
    let credential = HashedCredential::parse(FIXTURE_HASH).expect("fixture should parse");
    assert_eq!(credential.method(), HashMethod::DirectHash(DigestAlgorithm::Sha1));
    assert!(credential.verify("test3"));
    assert!(!credential.verify("test3 "));
}

#[test]
fn test_fixtures_serialize_byte_for_byte() {
    for fixture in [FIXTURE_SHA256, FIXTURE_SHA1, FIXTURE_HASH] {
        let credential: HashedCredential = fixture.parse().expect("fixture should parse");
        assert_eq!(credential.serialize(), fixture);
        assert_eq!(credential.to_string(), fixture);
    }
}

#[test]
fn test_uppercase_stored_hash_still_verifies() {
    LoggingTransformer::init_test();
    let upper = FIXTURE_HASH.replacen(
        "00b902718d496f07b86e4fc32df31083f2c82690",
        "00B902718D496F07B86E4FC32DF31083F2C82690",
        1,
    );
    let credential = HashedCredential::parse(&upper).expect("fixture should parse");
    assert!(credential.verify("test3"));
    assert_eq!(credential.serialize(), upper);
}

// Parsing

#[test]
fn test_parse_rejects_malformed() {
    let malformed = [
        "",
        "abc",
        "abc$hash_sha1",
        "abc$hash_sha1$salt$extra",
        "$hash_sha1$salt",
        "abc$$salt",
        "abc$hash_sha1$",
        "abc$bogus_sha9$salt",
        "abc$hash_sha9$salt",
        "abc$pbkdf2_sha256_abc$salt",
        "abc$pbkdf2_sha256_0$salt",
        "abc$pbkdf2_sha256$salt",
    ];
    for text in malformed {
        let result = HashedCredential::parse(text);
        assert!(
            matches!(result, Err(CredentialError::InvalidString(_))),
            "`{text}` should be rejected, got {result:?}"
        );
    }
}

// Generation

#[test]
fn test_generate_then_verify_every_method() {
    LoggingTransformer::init_test();
    let methods = DigestAlgorithm::ALL.into_iter().flat_map(|digest| {
        [
            HashMethod::DirectHash(digest),
            HashMethod::Hmac(digest),
            HashMethod::Pbkdf2 {
                digest,
                iterations: 16,
            },
        ]
    });
    for method in methods {
        let credential = HashedCredential::generate("s3cret", &fast_config(method))
            .expect("generation should succeed");
        assert_eq!(credential.method(), method);
        assert_eq!(credential.hash().len(), method.output_len() * 2);
        assert!(credential.verify("s3cret"), "{method}");
        assert!(!credential.verify("s3cretx"), "{method}");
        assert!(!credential.verify(""), "{method}");
    }
}

#[test]
fn test_new_uses_standard_configuration() {
    let credential = HashedCredential::new("test1").expect("generation should succeed");
    assert_eq!(credential.method(), HashMethod::default());
    assert_eq!(credential.salt().len(), DEFAULT_SALT_LENGTH);
    assert!(credential.verify("test1"));
}

#[test]
fn test_generated_salt_uses_letter_alphabet() {
    let credential = HashedCredential::generate(
        "pw",
        &CredentialConfig::legacy(),
    )
    .expect("generation should succeed");
    assert_eq!(credential.salt().len(), LEGACY_SALT_LENGTH);
    assert!(credential
        .salt()
        .bytes()
        .all(|b| SALT_ALPHABET.contains(&b)));
    assert!(credential.salt().chars().all(|c| c.is_ascii_alphabetic()));
}

#[test]
fn test_fresh_salts_differ() {
    let config = fast_config(HashMethod::Hmac(DigestAlgorithm::Sha256));
    let first = HashedCredential::generate("pw", &config).expect("generation should succeed");
    let second = HashedCredential::generate("pw", &config).expect("generation should succeed");
    assert_ne!(first.salt(), second.salt());
    assert_ne!(first, second);
}

#[test]
fn test_injected_rng_gives_reproducible_credentials() {
    let config = fast_config(HashMethod::Pbkdf2 {
        digest: DigestAlgorithm::Sha1,
        iterations: 2,
    });
    let first = HashedCredential::generate_with_rng("pw", &config, &mut SequenceRng(0))
        .expect("generation should succeed");
    let second = HashedCredential::generate_with_rng("pw", &config, &mut SequenceRng(0))
        .expect("generation should succeed");
    assert_eq!(first.serialize(), second.serialize());

    let seeded_a =
        HashedCredential::generate_with_rng("pw", &config, &mut StdRng::seed_from_u64(7))
            .expect("generation should succeed");
    let seeded_b =
        HashedCredential::generate_with_rng("pw", &config, &mut StdRng::seed_from_u64(7))
            .expect("generation should succeed");
    assert_eq!(seeded_a, seeded_b);
    assert!(seeded_a.verify("pw"));
}

#[test]
fn test_zero_salt_length_is_invalid_input() {
    let config = CredentialConfig::standard().with_salt_length(0);
    let result = HashedCredential::generate("pw", &config);
    assert!(matches!(result, Err(CredentialError::InvalidInput(_))));
}

#[test]
fn test_pbkdf2_empty_password_fails_generation() {
    let result = HashedCredential::new("");
    assert!(matches!(result, Err(CredentialError::InvalidInput(_))));
}

#[test]
fn test_direct_hash_accepts_empty_password() {
    let config = fast_config(HashMethod::DirectHash(DigestAlgorithm::Sha256));
    let credential = HashedCredential::generate("", &config).expect("generation should succeed");
    assert!(credential.verify(""));
    assert!(!credential.verify("x"));
}

// Verification failures

#[test]
fn test_verify_reports_derivation_failure_as_mismatch() {
    LoggingTransformer::init_test();
    let credential = HashedCredential::parse(FIXTURE_SHA256).expect("fixture should parse");
    assert!(!credential.verify(""));
}

// Equality

#[test]
fn test_equality_ignores_method() {
    let a = HashedCredential::from_parts("abcd", HashMethod::DirectHash(DigestAlgorithm::Sha1), "salt")
        .expect("parts are well formed");
    let b = HashedCredential::from_parts(
        "abcd",
        HashMethod::Pbkdf2 {
            digest: DigestAlgorithm::Sha512,
            iterations: 9,
        },
        "salt",
    )
    .expect("parts are well formed");
    assert_eq!(a, b);

    let mut set = std::collections::HashSet::new();
    set.insert(a);
    assert!(set.contains(&b));
}

#[test]
fn test_equality_compares_hash_and_salt() {
    let method = HashMethod::Hmac(DigestAlgorithm::Sha1);
    let base = HashedCredential::from_parts("abcd", method, "salt").expect("parts are well formed");
    let other_hash =
        HashedCredential::from_parts("abce", method, "salt").expect("parts are well formed");
    let other_salt =
        HashedCredential::from_parts("abcd", method, "Salt").expect("parts are well formed");
    assert_ne!(base, other_hash);
    assert_ne!(base, other_salt);
}

// Construction from parts

#[test]
fn test_from_parts_rejects_separator_and_empty_fields() {
    let method = HashMethod::Hmac(DigestAlgorithm::Sha1);
    for (hash, salt) in [("", "salt"), ("abcd", ""), ("ab$cd", "salt"), ("abcd", "sa$lt")] {
        let result = HashedCredential::from_parts(hash, method, salt);
        assert!(
            matches!(result, Err(CredentialError::InvalidInput(_))),
            "({hash:?}, {salt:?}) should be rejected"
        );
    }
}

#[test]
fn test_from_parts_rejects_zero_iterations() {
    let zero = HashMethod::Pbkdf2 {
        digest: DigestAlgorithm::Sha256,
        iterations: 0,
    };
    let result = HashedCredential::from_parts("00", zero, "salt");
    assert!(matches!(result, Err(CredentialError::InvalidInput(_))));

    // Anything from_parts accepts must come back through parse
    let one = HashMethod::Pbkdf2 {
        digest: DigestAlgorithm::Sha256,
        iterations: 1,
    };
    let credential = HashedCredential::from_parts("00", one, "salt").expect("parts are well formed");
    let reparsed = HashedCredential::parse(&credential.serialize()).expect("serialized text should parse");
    assert_eq!(reparsed.method(), one);
    assert_eq!(reparsed.serialize(), "00$pbkdf2_sha256_1$salt");
}

#[test]
fn test_from_parts_round_trips_through_text() {
    let method = HashMethod::Pbkdf2 {
        digest: DigestAlgorithm::Sha1,
        iterations: 1024,
    };
    let credential = HashedCredential::from_parts(
        "d500a1fb233ca92cfc960e0411e186a4f2e8d267",
        method,
        "eXpncMALpDTGVasmeneBkA",
    )
    .expect("parts are well formed");
    assert_eq!(credential.serialize(), FIXTURE_SHA1);
    assert!(credential.verify("test2"));
}

// Serde

#[test]
fn test_serde_uses_canonical_string() {
    let credential = HashedCredential::parse(FIXTURE_HASH).expect("fixture should parse");
    let json = serde_json::to_string(&credential).expect("serialization should succeed");
    assert_eq!(json, format!("\"{FIXTURE_HASH}\""));

    let back: HashedCredential =
        serde_json::from_str(&json).expect("deserialization should succeed");
    assert_eq!(back, credential);
    assert_eq!(back.method(), credential.method());

    assert!(serde_json::from_str::<HashedCredential>("\"abc$bogus_sha9$salt\"").is_err());
}

#[test]
fn test_config_presets() {
    assert_eq!(CredentialConfig::default(), CredentialConfig::standard());
    assert_eq!(CredentialConfig::standard().salt_length, 30);
    assert_eq!(
        CredentialConfig::high_security().method.to_string(),
        "pbkdf2_sha256_600000"
    );
    assert_eq!(CredentialConfig::legacy().method.to_string(), "hmac_sha1");
    assert_eq!(CredentialConfig::legacy().salt_length, 22);
}

#[test]
fn test_config_deserializes_with_defaults() {
    let config: CredentialConfig =
        serde_json::from_str(r#"{ "salt_length": 16 }"#).expect("config should parse");
    assert_eq!(config.method, HashMethod::default());
    assert_eq!(config.salt_length, 16);

    let config: CredentialConfig =
        serde_json::from_str(r#"{ "method": "hmac_sha512" }"#).expect("config should parse");
    assert_eq!(config.method, HashMethod::Hmac(DigestAlgorithm::Sha512));
    assert_eq!(config.salt_length, DEFAULT_SALT_LENGTH);

    assert!(serde_json::from_str::<CredentialConfig>(r#"{ "method": "pbkdf2_sha1_0" }"#).is_err());
}
