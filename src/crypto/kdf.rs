// src/crypto/kdf.rs
//! PBKDF2-HMAC-SHA512 key derivation for password secrets

use pbkdf2::pbkdf2_hmac;
use sha2::Sha512;

use crate::aliases::AesKey32;
use crate::consts::AES_KEY_LEN;
use crate::enums::SecretKind;
use crate::error::{CoreError, Result};
use crate::secrets::Secret;

/// Turn a secret into a 256-bit AES key.
///
/// Raw keys are returned unchanged and `salt`/`iterations` are ignored.
/// Passwords go through PBKDF2-HMAC-SHA512. Custom-cipher keys are refused.
pub fn derive_key(secret: &Secret, salt: &[u8], iterations: u32) -> Result<AesKey32> {
    let mut key = AesKey32::new([0u8; AES_KEY_LEN]);
    match secret.kind() {
        SecretKind::RawKey => {
            let raw = secret.expose_secret();
            if raw.len() != AES_KEY_LEN {
                return Err(CoreError::crypto(format!(
                    "secret version {}: raw key has {} bytes, expected {AES_KEY_LEN}",
                    secret.version(),
                    raw.len()
                )));
            }
            key.copy_from_slice(raw);
        }
        SecretKind::Password => {
            if iterations == 0 {
                return Err(CoreError::config("PBKDF2 iteration count must be positive"));
            }
            pbkdf2_hmac::<Sha512>(secret.expose_secret(), salt, iterations, &mut key[..]);
        }
        SecretKind::CustomEncryptionKey => {
            return Err(CoreError::crypto(format!(
                "secret version {} is reserved for custom encryption and cannot derive an AES key",
                secret.version()
            )));
        }
    }
    Ok(key)
}
