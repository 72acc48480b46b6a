// src/enums.rs
//! Public enum types used throughout the crate

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// What a [`Secret`](crate::secrets::Secret) holds and which ciphers accept it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SecretKind {
    /// Password fed through PBKDF2 before use
    #[default]
    Password,
    /// Ready-to-use 32-byte AES key
    RawKey,
    /// Key reserved for caller-supplied ciphers
    CustomEncryptionKey,
}

impl std::fmt::Display for SecretKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SecretKind::Password => "password",
            SecretKind::RawKey => "raw key",
            SecretKind::CustomEncryptionKey => "custom encryption key",
        };
        f.write_str(name)
    }
}

/// Text encoding of a packed `salt ‖ iv ‖ ciphertext` AES-GCM payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadEncoding {
    Hex,
    Base64,
}

impl PayloadEncoding {
    pub fn encode(self, packed: &[u8]) -> String {
        match self {
            PayloadEncoding::Hex => hex::encode(packed),
            PayloadEncoding::Base64 => STANDARD.encode(packed),
        }
    }

    pub fn decode(self, payload: &str) -> Result<Vec<u8>> {
        match self {
            PayloadEncoding::Hex => hex::decode(payload)
                .map_err(|e| CoreError::crypto(format!("malformed hex payload: {e}"))),
            PayloadEncoding::Base64 => STANDARD
                .decode(payload)
                .map_err(|e| CoreError::crypto(format!("malformed base64 payload: {e}"))),
        }
    }
}
