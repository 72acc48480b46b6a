// src/secrets/mod.rs
//! Versioned secrets and the store that serves them
//!
//! The store is built once at startup, validated eagerly, and only read
//! afterwards: "current" for every encrypt, "by version" for every decrypt.

mod json;
mod secret;
mod store;

pub use secret::Secret;
pub use store::SecretStore;
