// src/config/defaults.rs
use crate::config::app::{Config, CryptoSettings};
use crate::consts::DEFAULT_PBKDF2_ITERATIONS;

pub const CONFIG_PATH_ENV: &str = "INC_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "incountry.toml";

pub const ENVIRONMENT_ID_ENV: &str = "INC_ENVIRONMENT_ID";
pub const SECRETS_JSON_ENV: &str = "INC_SECRETS_JSON";
pub const NORMALIZE_KEYS_ENV: &str = "INC_NORMALIZE_KEYS";
pub const PBKDF2_ITERATIONS_ENV: &str = "INC_PBKDF2_ITERATIONS";

pub const DEFAULT_ENVIRONMENT_ID: &str = "dev-environment";

pub fn default_pbkdf2_iterations() -> u32 {
    DEFAULT_PBKDF2_ITERATIONS
}

pub fn default_crypto() -> CryptoSettings {
    CryptoSettings {
        pbkdf2_iterations: default_pbkdf2_iterations(),
        normalize_keys: false,
        active_cipher: None,
    }
}

/// Dev fallback: no secrets, so plaintext mode.
pub fn default_config() -> Config {
    Config {
        environment_id: DEFAULT_ENVIRONMENT_ID.into(),
        crypto: default_crypto(),
        secrets_json: None,
        secrets: None,
    }
}
