// src/crypto/plaintext.rs
//! The `"pt"` passthrough: base64 of the UTF-8 bytes, no key material

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{CoreError, Result};

pub fn encode(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

pub fn decode(payload: &str) -> Result<String> {
    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| CoreError::crypto(format!("malformed plaintext payload: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|_| CoreError::crypto("plaintext payload is not valid UTF-8"))
}
