// src/core/hash.rs
//! Deterministic search-key hashing
//!
//! Lookup keys are stored as `sha256_hex(value + ":" + environment_id)` so the
//! server can match them for equality without seeing them. Independent of
//! secrets and of whichever cipher protects the record body.

use super::util::sha256_hex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchKeyHasher {
    environment_id: String,
    normalize_keys: bool,
}

impl SearchKeyHasher {
    pub fn new(environment_id: impl Into<String>) -> Self {
        Self {
            environment_id: environment_id.into(),
            normalize_keys: false,
        }
    }

    /// Lower-case values before hashing, making lookups case-insensitive.
    pub fn with_normalized_keys(mut self, normalize: bool) -> Self {
        self.normalize_keys = normalize;
        self
    }

    pub fn environment_id(&self) -> &str {
        &self.environment_id
    }

    pub fn normalizes_keys(&self) -> bool {
        self.normalize_keys
    }

    pub fn hash(&self, value: Option<&str>) -> Option<String> {
        let value = value?;
        let input = if self.normalize_keys {
            format!("{}:{}", value.to_lowercase(), self.environment_id)
        } else {
            format!("{value}:{}", self.environment_id)
        };
        Some(sha256_hex(input.as_bytes()))
    }
}
