// src/crypto/gcm.rs
//! AES-256-GCM with a per-message salt
//!
//! Packed layout (fixed offsets):
//! `[salt: 64 bytes][iv: 12 bytes][ciphertext + tag: N + 16 bytes]`.
//! The key comes from [`derive_key`] over the salt, so a password secret
//! yields a fresh key for every message.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use rand::RngCore;

use crate::consts::{IV_LEN, MIN_AES_PAYLOAD_LEN, SALT_LEN};
use crate::error::{CoreError, Result};
use crate::secrets::Secret;

use super::kdf::derive_key;

/// Encrypt `plaintext` and return `salt ‖ iv ‖ ciphertext‖tag`.
pub fn seal(plaintext: &[u8], secret: &Secret, iterations: u32) -> Result<Vec<u8>> {
    let mut salt = [0u8; SALT_LEN];
    let mut iv = [0u8; IV_LEN];
    let mut rng = rand::rng();
    rng.fill_bytes(&mut salt);
    rng.fill_bytes(&mut iv);

    let key = derive_key(secret, &salt, iterations)?;
    let cipher = Aes256Gcm::new((&*key).into());
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&iv), plaintext)
        .map_err(|e| CoreError::crypto(format!("AES-GCM encryption failed: {e}")))?;

    let mut packed = Vec::with_capacity(SALT_LEN + IV_LEN + ciphertext.len());
    packed.extend_from_slice(&salt);
    packed.extend_from_slice(&iv);
    packed.extend_from_slice(&ciphertext);
    Ok(packed)
}

/// Reverse [`seal`]. Rejects short input before deriving any key.
pub fn open(packed: &[u8], secret: &Secret, iterations: u32) -> Result<Vec<u8>> {
    if packed.len() < MIN_AES_PAYLOAD_LEN {
        return Err(CoreError::crypto(format!(
            "payload too short: {} bytes, need at least {MIN_AES_PAYLOAD_LEN}",
            packed.len()
        )));
    }

    let (salt, rest) = packed.split_at(SALT_LEN);
    let (iv, ciphertext) = rest.split_at(IV_LEN);

    let key = derive_key(secret, salt, iterations)?;
    let cipher = Aes256Gcm::new((&*key).into());
    cipher
        .decrypt(Nonce::from_slice(iv), ciphertext)
        .map_err(|_| CoreError::crypto("authentication failed (wrong secret or tampered data)"))
}
