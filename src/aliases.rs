// src/aliases.rs
//! Zeroizing wrappers for secret material
//!
//! These are the canonical types used throughout incountry-crypto. Anything
//! holding key or password bytes is wiped on drop.

pub use zeroize::Zeroizing;

use crate::consts::AES_KEY_LEN;

/// Raw secret bytes (password, raw key or custom-cipher key)
pub type SecretBytes = Zeroizing<Vec<u8>>;

/// 256-bit AES key, derived or raw
pub type AesKey32 = Zeroizing<[u8; AES_KEY_LEN]>;
