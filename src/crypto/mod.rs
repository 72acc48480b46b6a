// src/crypto/mod.rs
//! Pure cryptographic operations — no I/O, no shared mutable state
//!
//! Built-in ciphers are a closed set dispatched by envelope code; callers
//! extend it only through [`CustomCipher`].
pub mod gcm;
pub mod custom;
pub mod kdf;
pub mod plaintext;
pub mod registry;
pub mod validate;

pub use custom::{custom_cipher_code, CustomCipher, CustomCipherConfig, CustomCipherError};
pub use kdf::derive_key;
pub use registry::{CipherKind, CipherRegistry, RegisteredCipher};
pub use validate::validate_custom_ciphers;
