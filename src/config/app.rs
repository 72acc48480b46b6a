// src/config/app.rs
use std::fmt;
use std::path::Path;

use serde::Deserialize;

use super::defaults::*;
use crate::core::CryptoOptions;
use crate::enums::SecretKind;
use crate::error::{CoreError, Result};
use crate::secrets::{Secret, SecretStore};

#[derive(Clone, Deserialize)]
pub struct Config {
    pub environment_id: String,
    #[serde(default = "default_crypto")]
    pub crypto: CryptoSettings,
    /// Secrets in the SDK JSON format; exclusive with `[secrets]`.
    #[serde(default)]
    pub secrets_json: Option<String>,
    #[serde(default)]
    pub secrets: Option<SecretsSection>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CryptoSettings {
    #[serde(default = "default_pbkdf2_iterations")]
    pub pbkdf2_iterations: u32,
    #[serde(default)]
    pub normalize_keys: bool,
    #[serde(default)]
    pub active_cipher: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecretsSection {
    pub current_version: u32,
    #[serde(default)]
    pub entries: Vec<SecretEntry>,
}

#[derive(Clone, Deserialize)]
pub struct SecretEntry {
    pub version: u32,
    pub secret: String,
    #[serde(default)]
    pub kind: SecretKind,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("environment_id", &self.environment_id)
            .field("crypto", &self.crypto)
            .field("secrets_json", &self.secrets_json.as_ref().map(|_| "[REDACTED]"))
            .field("secrets", &self.secrets)
            .finish()
    }
}

impl fmt::Debug for SecretEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretEntry")
            .field("version", &self.version)
            .field("secret", &"[REDACTED]")
            .field("kind", &self.kind)
            .finish()
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| CoreError::config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Apply `INC_*` overrides. `lookup` maps a variable name to its value;
    /// [`load`] passes the process environment.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(id) = lookup(ENVIRONMENT_ID_ENV) {
            self.environment_id = id;
        }
        if let Some(json) = lookup(SECRETS_JSON_ENV) {
            self.secrets_json = Some(json);
            self.secrets = None;
        }
        if let Some(flag) = lookup(NORMALIZE_KEYS_ENV) {
            self.crypto.normalize_keys = parse_flag(NORMALIZE_KEYS_ENV, &flag)?;
        }
        if let Some(raw) = lookup(PBKDF2_ITERATIONS_ENV) {
            self.crypto.pbkdf2_iterations = raw.trim().parse().map_err(|e| {
                CoreError::config(format!("{PBKDF2_ITERATIONS_ENV}: invalid number '{raw}': {e}"))
            })?;
        }
        Ok(())
    }

    /// Build the secret store; `None` means plaintext mode.
    pub fn secret_store(&self) -> Result<Option<SecretStore>> {
        match (&self.secrets_json, &self.secrets) {
            (Some(_), Some(_)) => Err(CoreError::config(
                "configure secrets either as `secrets_json` or `[secrets]`, not both",
            )),
            (Some(json), None) => SecretStore::from_json(json).map(Some),
            (None, Some(section)) => {
                let secrets = section
                    .entries
                    .iter()
                    .map(|e| Secret::new(e.version, e.secret.as_bytes(), e.kind))
                    .collect::<Result<Vec<_>>>()?;
                SecretStore::new(secrets, section.current_version).map(Some)
            }
            (None, None) => Ok(None),
        }
    }

    pub fn crypto_options(&self) -> CryptoOptions {
        CryptoOptions {
            pbkdf2_iterations: self.crypto.pbkdf2_iterations,
            normalize_keys: self.crypto.normalize_keys,
            active_cipher: self.crypto.active_cipher.clone(),
        }
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(CoreError::config(format!("{name}: expected a boolean, got '{other}'"))),
    }
}

/// Load config from `INC_CONFIG` (default `incountry.toml`), falling back to
/// built-in dev defaults, then apply environment overrides.
pub fn load() -> Result<Config> {
    let config_path =
        std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    let mut conf = if Path::new(&config_path).exists() {
        Config::from_file(&config_path)?
    } else {
        #[cfg(feature = "logging")]
        tracing::warn!(path = %config_path, "config file not found, using built-in defaults");
        default_config()
    };

    conf.apply_overrides(|key| std::env::var(key).ok())?;
    Ok(conf)
}
