//! Small utility functions used across the core module

use sha2::{Digest, Sha256};

/// Compute SHA-256 and return it as a lowercase hex string
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}
