// src/consts.rs
//! Shared constants — envelope format and security parameters

/// AES-256 key length in bytes
pub const AES_KEY_LEN: usize = 32;

/// Random salt prepended to every AES-GCM payload (512 bits)
pub const SALT_LEN: usize = 64;

/// AES-GCM IV length (96 bits)
pub const IV_LEN: usize = 12;

/// AES-GCM authentication tag length (128 bits)
pub const TAG_LEN: usize = 16;

/// Shortest decoded AES payload accepted before touching the cipher
pub const MIN_AES_PAYLOAD_LEN: usize = SALT_LEN + IV_LEN;

/// PBKDF2-HMAC-SHA512 rounds for password secrets
pub const DEFAULT_PBKDF2_ITERATIONS: u32 = 10_000;

/// Legacy AES-GCM cipher with hex payload — decrypt only
pub const CODE_AES_GCM_HEX: &str = "1";

/// Current default AES-GCM cipher with base64 payload
pub const CODE_AES_GCM_BASE64: &str = "2";

/// Plaintext passthrough used when no secrets are configured
pub const CODE_PLAINTEXT: &str = "pt";

/// Prefix of every custom cipher code: `"c" + base64(name)`
pub const CUSTOM_CODE_PREFIX: &str = "c";

/// Cipher code used for new data unless configured otherwise
pub const DEFAULT_CIPHER_CODE: &str = CODE_AES_GCM_BASE64;

/// Separator between cipher code and payload
pub const ENVELOPE_SEPARATOR: char = ':';

/// Records written before version stamping carry no version; they used secret 0
pub const LEGACY_SECRET_VERSION: u32 = 0;

/// Version given to the single secret built from a bare password
pub const PASSWORD_SECRET_VERSION: u32 = 0;
