// src/secrets/store.rs
use std::collections::BTreeMap;

use crate::consts::PASSWORD_SECRET_VERSION;
use crate::error::{CoreError, Result};

use super::json::SecretsInput;
use super::Secret;

/// A non-empty set of secrets with exactly one marked current.
#[derive(Debug, Clone)]
pub struct SecretStore {
    secrets: BTreeMap<u32, Secret>,
    current_version: u32,
}

impl SecretStore {
    /// Validate and build. Fails fast on every invariant violation.
    pub fn new(secrets: Vec<Secret>, current_version: u32) -> Result<Self> {
        if secrets.is_empty() {
            return Err(CoreError::config("secrets list is empty"));
        }

        let mut by_version = BTreeMap::new();
        let mut duplicates = Vec::new();
        for secret in secrets {
            let version = secret.version();
            if by_version.insert(version, secret).is_some() {
                duplicates.push(version);
            }
        }
        if !duplicates.is_empty() {
            duplicates.sort_unstable();
            duplicates.dedup();
            let listed = duplicates
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            return Err(CoreError::config(format!(
                "secret versions must be unique, duplicated: {listed}"
            )));
        }

        if !by_version.contains_key(&current_version) {
            return Err(CoreError::config(format!(
                "current secret version {current_version} not found among secrets"
            )));
        }

        Ok(Self {
            secrets: by_version,
            current_version,
        })
    }

    /// A store holding one password secret, version 0.
    pub fn from_password(password: impl Into<Vec<u8>>) -> Result<Self> {
        let secret = Secret::password(PASSWORD_SECRET_VERSION, password)?;
        Self::new(vec![secret], PASSWORD_SECRET_VERSION)
    }

    /// Parse the SDK secrets format: a bare JSON string (password) or
    /// `{"secrets": [...], "currentVersion": N}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let input: SecretsInput = serde_json::from_str(json)
            .map_err(|e| CoreError::config(format!("invalid secrets JSON: {e}")))?;
        input.into_store()
    }

    /// `None` → the current secret. An unknown version is a decrypt-time
    /// failure, not a setup failure.
    pub fn get_secret(&self, version: Option<u32>) -> Result<&Secret> {
        let version = version.unwrap_or(self.current_version);
        self.secrets.get(&version).ok_or_else(|| {
            CoreError::crypto(format!("secret not found for version {version}"))
        })
    }

    pub fn current(&self) -> &Secret {
        // Presence checked in `new`; the map is never mutated afterwards.
        &self.secrets[&self.current_version]
    }

    pub fn current_version(&self) -> u32 {
        self.current_version
    }

    /// All versions, ascending.
    pub fn versions(&self) -> impl Iterator<Item = u32> + '_ {
        self.secrets.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.secrets.len()
    }

    /// Always false for a constructed store; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }

    /// Secret used to self-test custom ciphers: the current secret if it is a
    /// custom key, otherwise the highest-versioned custom key.
    pub fn custom_encryption_secret(&self) -> Option<&Secret> {
        let current = self.current();
        if current.is_for_custom_encryption() {
            return Some(current);
        }
        self.secrets
            .values()
            .rev()
            .find(|s| s.is_for_custom_encryption())
    }
}
