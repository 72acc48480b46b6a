// tests/custom_cipher_tests.rs
mod common;
mod support;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use incountry_crypto::{
    CryptoManager, CustomCipher, CustomCipherConfig, CustomCipherError, Secret, SecretStore,
};
use support::{custom_store, password_store, xor_config, FailingCipher, LossyCipher, XorCipher, ENV_ID};

#[test]
fn test_current_custom_cipher_encrypts() {
    common::setup();
    let crypto = CryptoManager::new(ENV_ID, Some(custom_store()), vec![xor_config("xor").current()])
        .unwrap();
    assert_eq!(crypto.registry().active_code(), "ceG9y");

    let encrypted = crypto.encrypt("custom payload").unwrap();
    assert!(encrypted.envelope.starts_with("ceG9y:"), "{}", encrypted.envelope);
    assert_eq!(encrypted.secret_version, Some(1));
    assert_eq!(
        crypto
            .decrypt(&encrypted.envelope, encrypted.secret_version)
            .unwrap(),
        "custom payload"
    );
}

#[test]
fn test_non_current_custom_cipher_still_decrypts() {
    let writer = CryptoManager::new(ENV_ID, Some(custom_store()), vec![xor_config("xor").current()])
        .unwrap();
    let old = writer.encrypt("written with xor").unwrap();

    // Password v2 now current; xor stays registered for reading.
    let store = SecretStore::new(
        vec![
            Secret::custom_key(1, support::RAW_KEY.to_vec()).unwrap(),
            Secret::password(2, "new-password").unwrap(),
        ],
        2,
    )
    .unwrap();
    let reader = CryptoManager::new(ENV_ID, Some(store), vec![xor_config("xor")]).unwrap();
    assert_eq!(reader.registry().active_code(), "2");

    assert_eq!(reader.decrypt(&old.envelope, Some(1)).unwrap(), "written with xor");
    let fresh = reader.encrypt("aes again").unwrap();
    assert!(fresh.envelope.starts_with("2:"));
}

#[test]
fn test_custom_cipher_rejects_wrong_secret_kind() {
    let crypto = CryptoManager::new(ENV_ID, Some(custom_store()), vec![xor_config("xor").current()])
        .unwrap();
    let encrypted = crypto.encrypt("x").unwrap();

    // Version 0 is a password secret.
    let err = crypto.decrypt(&encrypted.envelope, Some(0)).unwrap_err();
    assert!(err.is_crypto());
    assert!(err.to_string().contains("wrong secret type for cipher"), "{err}");

    let store = SecretStore::new(
        vec![
            Secret::custom_key(1, "k").unwrap(),
            Secret::password(2, "pw").unwrap(),
        ],
        2,
    )
    .unwrap();
    let err = CryptoManager::new(ENV_ID, Some(store), vec![xor_config("xor").current()])
        .unwrap_err();
    assert!(err.is_config());
    assert!(err.to_string().contains("active cipher 'ceG9y' (xor)"), "{err}");
    assert!(err.to_string().contains("current secret is a password"), "{err}");
}

#[test]
fn test_current_custom_key_without_current_cipher_rejected() {
    let err = CryptoManager::new(ENV_ID, Some(custom_store()), vec![xor_config("xor")])
        .unwrap_err();
    assert!(err.is_config());
    assert!(err.to_string().contains("no custom cipher is current"), "{err}");
}

#[test]
fn test_lossy_cipher_blocks_construction() {
    let result = CryptoManager::new(
        ENV_ID,
        Some(custom_store()),
        vec![xor_config("good"), CustomCipherConfig::new("lossy", LossyCipher)],
    );

    let err = result.unwrap_err();
    assert!(err.is_crypto());
    assert!(err.to_string().contains("'lossy'"), "{err}");
    assert!(err.to_string().contains("does not match"), "{err}");
}

#[test]
fn test_failing_cipher_blocks_construction() {
    let result = CryptoManager::new(
        ENV_ID,
        Some(custom_store()),
        vec![CustomCipherConfig::new("hsm", FailingCipher).current()],
    );

    let err = result.unwrap_err();
    assert!(err.is_crypto());
    assert!(err.to_string().contains("'hsm'"), "{err}");
    assert!(err.to_string().contains("hardware module unavailable"), "{err}");
}

#[test]
fn test_custom_ciphers_need_a_custom_key() {
    let err = CryptoManager::new(ENV_ID, Some(password_store(1, "pw")), vec![xor_config("xor")])
        .unwrap_err();
    assert!(err.is_config());
    assert!(err.to_string().contains("custom encryption"), "{err}");
}

#[test]
fn test_custom_ciphers_need_secrets() {
    let err = CryptoManager::new(ENV_ID, None, vec![xor_config("xor")]).unwrap_err();
    assert!(err.is_config());
}

#[test]
fn test_duplicate_and_double_current_rejected() {
    let dup = CryptoManager::new(
        ENV_ID,
        Some(custom_store()),
        vec![xor_config("same"), CustomCipherConfig::new("same", XorCipher)],
    );
    assert!(dup.unwrap_err().is_config());

    let two_current = CryptoManager::new(
        ENV_ID,
        Some(custom_store()),
        vec![xor_config("a").current(), xor_config("b").current()],
    );
    assert!(two_current.unwrap_err().is_config());
}

/// Counts round trips to show validation happens once, at construction.
struct CountingCipher(Arc<AtomicUsize>);

impl CustomCipher for CountingCipher {
    fn encrypt(&self, plaintext: &str, key: &[u8], version: u32) -> Result<String, CustomCipherError> {
        self.0.fetch_add(1, Ordering::SeqCst);
        XorCipher.encrypt(plaintext, key, version)
    }

    fn decrypt(&self, ciphertext: &str, key: &[u8], version: u32) -> Result<String, CustomCipherError> {
        XorCipher.decrypt(ciphertext, key, version)
    }
}

#[test]
fn test_validation_runs_once_per_cipher() {
    let calls = Arc::new(AtomicUsize::new(0));
    let crypto = CryptoManager::new(
        ENV_ID,
        Some(custom_store()),
        vec![CustomCipherConfig::new("counting", CountingCipher(Arc::clone(&calls))).current()],
    )
    .unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    crypto.encrypt("one").unwrap();
    crypto.encrypt("two").unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}
