// src/core/mod.rs
pub mod envelope;
pub mod hash;
pub mod util;

pub use envelope::{CryptoManager, CryptoOptions, Encrypted};
pub use hash::SearchKeyHasher;
pub use util::sha256_hex;
