// src/lib.rs
//! incountry-crypto — record encryption envelopes for the InCountry API
//!
//! Features:
//! - Versioned secrets with eager validation and key rotation
//! - AES-256-GCM envelopes (`"2"`), legacy hex decrypt (`"1"`), plaintext mode (`"pt"`)
//! - Caller-supplied custom ciphers, self-tested at construction
//! - Deterministic SHA-256 search-key hashing pinned to the environment id

pub mod aliases;
pub mod config;
pub mod consts;
pub mod core;
pub mod crypto;
pub mod enums;
pub mod error;
pub mod secrets;

// Re-export everything users need at the crate root
pub use config::load as load_config;
pub use crate::core::{CryptoManager, CryptoOptions, Encrypted, SearchKeyHasher};
pub use crypto::{CustomCipher, CustomCipherConfig, CustomCipherError};
pub use enums::SecretKind;
pub use error::{CoreError, Result};
pub use secrets::{Secret, SecretStore};
