// src/crypto/custom.rs
//! Caller-supplied ciphers

use std::fmt;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::consts::CUSTOM_CODE_PREFIX;

/// Error type custom ciphers may return; any error works.
pub type CustomCipherError = Box<dyn std::error::Error + Send + Sync>;

/// A user algorithm plugged into the envelope.
///
/// Implementations receive the bytes of a secret of kind
/// [`SecretKind::CustomEncryptionKey`](crate::enums::SecretKind) and its
/// version. The returned payload is stored after the `"c<base64 name>:"` tag
/// and handed back unchanged to [`decrypt`](Self::decrypt).
pub trait CustomCipher: Send + Sync {
    fn encrypt(
        &self,
        plaintext: &str,
        key: &[u8],
        secret_version: u32,
    ) -> Result<String, CustomCipherError>;

    fn decrypt(
        &self,
        ciphertext: &str,
        key: &[u8],
        secret_version: u32,
    ) -> Result<String, CustomCipherError>;
}

/// A custom cipher plus its registration data.
#[derive(Clone)]
pub struct CustomCipherConfig {
    name: String,
    is_current: bool,
    cipher: Arc<dyn CustomCipher>,
}

impl CustomCipherConfig {
    pub fn new(name: impl Into<String>, cipher: impl CustomCipher + 'static) -> Self {
        Self::from_arc(name, Arc::new(cipher))
    }

    pub fn from_arc(name: impl Into<String>, cipher: Arc<dyn CustomCipher>) -> Self {
        Self {
            name: name.into(),
            is_current: false,
            cipher,
        }
    }

    /// Mark this cipher as the one used for new encryptions.
    pub fn current(mut self) -> Self {
        self.is_current = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_current(&self) -> bool {
        self.is_current
    }

    pub fn code(&self) -> String {
        custom_cipher_code(&self.name)
    }

    pub(crate) fn cipher(&self) -> Arc<dyn CustomCipher> {
        Arc::clone(&self.cipher)
    }
}

impl fmt::Debug for CustomCipherConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomCipherConfig")
            .field("name", &self.name)
            .field("is_current", &self.is_current)
            .finish_non_exhaustive()
    }
}

/// Envelope code for a custom cipher name: `"c" + base64(name)`.
pub fn custom_cipher_code(name: &str) -> String {
    format!("{CUSTOM_CODE_PREFIX}{}", STANDARD.encode(name.as_bytes()))
}
