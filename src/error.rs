// src/error.rs
//! Public error type for the entire crate
//!
//! Only two kinds exist. Neither is retried by this crate:
//! - [`CoreError::Config`] — the client was set up wrong; fix the setup.
//! - [`CoreError::Crypto`] — one encrypt/decrypt call failed.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Invalid client setup: duplicate versions, missing current secret,
    /// wrong key length, conflicting "current" flags, unknown cipher.
    #[error("client configuration error: {0}")]
    Config(String),

    /// A single encryption or decryption failed.
    #[error("crypto error: {0}")]
    Crypto(String),
}

impl CoreError {
    pub fn config(msg: impl Into<String>) -> Self {
        CoreError::Config(msg.into())
    }

    pub fn crypto(msg: impl Into<String>) -> Self {
        CoreError::Crypto(msg.into())
    }

    /// Prefix the message with `ctx`, keeping the error kind.
    pub fn context(self, ctx: impl std::fmt::Display) -> Self {
        match self {
            CoreError::Config(msg) => CoreError::Config(format!("{ctx}: {msg}")),
            CoreError::Crypto(msg) => CoreError::Crypto(format!("{ctx}: {msg}")),
        }
    }

    /// The message without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            CoreError::Config(msg) | CoreError::Crypto(msg) => msg,
        }
    }

    pub fn is_config(&self) -> bool {
        matches!(self, CoreError::Config(_))
    }

    pub fn is_crypto(&self) -> bool {
        matches!(self, CoreError::Crypto(_))
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Config(format!("invalid JSON: {err}"))
    }
}

impl From<toml::de::Error> for CoreError {
    fn from(err: toml::de::Error) -> Self {
        CoreError::Config(format!("invalid TOML: {err}"))
    }
}

impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        CoreError::Config(format!("IO error: {err}"))
    }
}
