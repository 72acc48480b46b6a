// tests/support.rs
//! Test fixtures — secret stores and custom ciphers

#![allow(dead_code)]

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use incountry_crypto::{
    CryptoManager, CustomCipher, CustomCipherConfig, CustomCipherError, Secret, SecretStore,
};

pub const ENV_ID: &str = "env-7f3c";

/// 32 printable bytes, usable as a raw AES key or a custom-cipher key.
pub const RAW_KEY: &[u8; 32] = b"0123456789abcdef0123456789ABCDEF";

pub fn password_store(version: u32, password: &str) -> SecretStore {
    SecretStore::new(vec![Secret::password(version, password).unwrap()], version).unwrap()
}

pub fn raw_key_store(version: u32) -> SecretStore {
    SecretStore::new(vec![Secret::raw_key(version, RAW_KEY.to_vec()).unwrap()], version).unwrap()
}

/// Password v1 and v2, with `current` selecting the active one.
pub fn rotated_store(current: u32) -> SecretStore {
    SecretStore::new(
        vec![
            Secret::password(1, "first-password").unwrap(),
            Secret::password(2, "second-password").unwrap(),
        ],
        current,
    )
    .unwrap()
}

/// Custom key v1 (current) alongside password v0.
pub fn custom_store() -> SecretStore {
    SecretStore::new(
        vec![
            Secret::password(0, "legacy-password").unwrap(),
            Secret::custom_key(1, RAW_KEY.to_vec()).unwrap(),
        ],
        1,
    )
    .unwrap()
}

pub fn manager(secrets: Option<SecretStore>) -> CryptoManager {
    CryptoManager::new(ENV_ID, secrets, Vec::new()).unwrap()
}

/// XOR with the key (cycled), then base64.
pub struct XorCipher;

impl CustomCipher for XorCipher {
    fn encrypt(&self, plaintext: &str, key: &[u8], _version: u32) -> Result<String, CustomCipherError> {
        Ok(STANDARD.encode(xor(plaintext.as_bytes(), key)))
    }

    fn decrypt(&self, ciphertext: &str, key: &[u8], _version: u32) -> Result<String, CustomCipherError> {
        let bytes = STANDARD.decode(ciphertext)?;
        Ok(String::from_utf8(xor(&bytes, key))?)
    }
}

fn xor(data: &[u8], key: &[u8]) -> Vec<u8> {
    data.iter()
        .zip(key.iter().cycle())
        .map(|(d, k)| d ^ k)
        .collect()
}

/// Decrypt never returns the original text.
pub struct LossyCipher;

impl CustomCipher for LossyCipher {
    fn encrypt(&self, plaintext: &str, _key: &[u8], _version: u32) -> Result<String, CustomCipherError> {
        Ok(plaintext.to_uppercase())
    }

    fn decrypt(&self, ciphertext: &str, _key: &[u8], _version: u32) -> Result<String, CustomCipherError> {
        Ok(ciphertext.chars().rev().collect())
    }
}

/// Always errors.
pub struct FailingCipher;

impl CustomCipher for FailingCipher {
    fn encrypt(&self, _plaintext: &str, _key: &[u8], _version: u32) -> Result<String, CustomCipherError> {
        Err("hardware module unavailable".into())
    }

    fn decrypt(&self, _ciphertext: &str, _key: &[u8], _version: u32) -> Result<String, CustomCipherError> {
        Err("hardware module unavailable".into())
    }
}

pub fn xor_config(name: &str) -> CustomCipherConfig {
    CustomCipherConfig::new(name, XorCipher)
}
