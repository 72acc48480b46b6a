// src/config/mod.rs
//! Configuration system for incountry-crypto
//!
//! TOML file + env overrides, resolved once by the caller at startup.

pub use app::{load, Config, CryptoSettings, SecretEntry, SecretsSection};

mod app;
mod defaults;
