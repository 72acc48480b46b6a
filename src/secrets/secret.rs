// src/secrets/secret.rs
use std::fmt;

use crate::aliases::SecretBytes;
use crate::consts::AES_KEY_LEN;
use crate::enums::SecretKind;
use crate::error::{CoreError, Result};

/// One versioned credential. Immutable after construction.
#[derive(Clone)]
pub struct Secret {
    version: u32,
    bytes: SecretBytes,
    kind: SecretKind,
}

impl Secret {
    /// Build a secret of any kind, enforcing the per-kind length rules.
    pub fn new(version: u32, bytes: impl Into<Vec<u8>>, kind: SecretKind) -> Result<Self> {
        let bytes = SecretBytes::new(bytes.into());
        if bytes.is_empty() {
            return Err(CoreError::config(format!(
                "secret version {version} is empty"
            )));
        }
        if kind == SecretKind::RawKey && bytes.len() != AES_KEY_LEN {
            return Err(CoreError::config(format!(
                "secret version {version}: raw key must be {AES_KEY_LEN} bytes, got {}",
                bytes.len()
            )));
        }
        Ok(Self {
            version,
            bytes,
            kind,
        })
    }

    pub fn password(version: u32, password: impl Into<Vec<u8>>) -> Result<Self> {
        Self::new(version, password, SecretKind::Password)
    }

    pub fn raw_key(version: u32, key: impl Into<Vec<u8>>) -> Result<Self> {
        Self::new(version, key, SecretKind::RawKey)
    }

    pub fn custom_key(version: u32, key: impl Into<Vec<u8>>) -> Result<Self> {
        Self::new(version, key, SecretKind::CustomEncryptionKey)
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn kind(&self) -> SecretKind {
        self.kind
    }

    pub fn is_for_custom_encryption(&self) -> bool {
        self.kind == SecretKind::CustomEncryptionKey
    }

    /// The raw material. Keep exposure short-lived.
    pub fn expose_secret(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secret")
            .field("version", &self.version)
            .field("kind", &self.kind)
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}
