// src/crypto/registry.rs
//! Versioned table of ciphers keyed by envelope code
//!
//! Built once per client. `"1"`, `"2"` and `"pt"` are always present; custom
//! ciphers are added under `"c" + base64(name)`.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::consts::{CODE_AES_GCM_BASE64, CODE_AES_GCM_HEX, CODE_PLAINTEXT, DEFAULT_CIPHER_CODE};
use crate::enums::{PayloadEncoding, SecretKind};
use crate::error::{CoreError, Result};
use crate::secrets::Secret;

use super::custom::{CustomCipher, CustomCipherConfig};
use super::{gcm, plaintext};

/// The closed set of cipher behaviours.
#[derive(Clone)]
pub enum CipherKind {
    /// Legacy AES-GCM, hex payload, decrypt only (code `"1"`)
    AesGcmHex,
    /// AES-GCM, base64 payload (code `"2"`)
    AesGcmBase64,
    /// No encryption, base64 of the text (code `"pt"`)
    Plaintext,
    /// Caller-supplied algorithm
    Custom {
        name: String,
        cipher: Arc<dyn CustomCipher>,
    },
}

impl fmt::Debug for CipherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CipherKind::AesGcmHex => f.write_str("AesGcmHex"),
            CipherKind::AesGcmBase64 => f.write_str("AesGcmBase64"),
            CipherKind::Plaintext => f.write_str("Plaintext"),
            CipherKind::Custom { name, .. } => f.debug_tuple("Custom").field(name).finish(),
        }
    }
}

/// A cipher bound to its code and derivation settings.
#[derive(Debug, Clone)]
pub struct RegisteredCipher {
    code: String,
    kind: CipherKind,
    iterations: u32,
}

impl RegisteredCipher {
    fn new(code: impl Into<String>, kind: CipherKind, iterations: u32) -> Self {
        Self {
            code: code.into(),
            kind,
            iterations,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn kind(&self) -> &CipherKind {
        &self.kind
    }

    /// Custom cipher name, or a fixed label for built-ins.
    pub fn name(&self) -> &str {
        match &self.kind {
            CipherKind::AesGcmHex => "AES-256-GCM/PBKDF2 (hex)",
            CipherKind::AesGcmBase64 => "AES-256-GCM/PBKDF2 (base64)",
            CipherKind::Plaintext => "plaintext",
            CipherKind::Custom { name, .. } => name.as_str(),
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self.kind, CipherKind::Custom { .. })
    }

    /// Check that this cipher can encrypt under `secret` at all, so a client
    /// that could never write is rejected when it is built.
    pub fn check_encrypt_secret(&self, secret: Option<&Secret>) -> Result<()> {
        let kind = secret.map(Secret::kind);
        let mismatch = match (&self.kind, kind) {
            (CipherKind::Plaintext, _) => None,
            (CipherKind::AesGcmHex, _) => Some("cipher is decrypt only".to_owned()),
            (_, None) => Some("no secret provided".to_owned()),
            (CipherKind::AesGcmBase64, Some(SecretKind::CustomEncryptionKey)) => Some(
                "current secret is a custom encryption key, but no custom cipher is current"
                    .to_owned(),
            ),
            (CipherKind::AesGcmBase64, Some(_)) => None,
            (CipherKind::Custom { .. }, Some(SecretKind::CustomEncryptionKey)) => None,
            (CipherKind::Custom { .. }, Some(other)) => Some(format!(
                "current secret is a {other}, custom encryption key required"
            )),
        };

        match mismatch {
            None => Ok(()),
            Some(detail) => Err(CoreError::config(format!(
                "active cipher '{}' ({}) cannot encrypt: {detail}",
                self.code,
                self.name()
            ))),
        }
    }

    /// Encrypt and return the payload (without the `"<code>:"` tag).
    pub fn encrypt(&self, plaintext: &str, secret: Option<&Secret>) -> Result<String> {
        self.encrypt_inner(plaintext, secret)
            .map_err(|e| e.context(self.describe("encrypt", secret)))
    }

    /// Decrypt a payload (the part after the `"<code>:"` tag).
    pub fn decrypt(&self, payload: &str, secret: Option<&Secret>) -> Result<String> {
        self.decrypt_inner(payload, secret)
            .map_err(|e| e.context(self.describe("decrypt", secret)))
    }

    fn encrypt_inner(&self, text: &str, secret: Option<&Secret>) -> Result<String> {
        match &self.kind {
            CipherKind::Plaintext => Ok(plaintext::encode(text)),
            CipherKind::AesGcmHex => Err(CoreError::crypto(
                "encryption with this cipher is not supported (legacy, decrypt only)",
            )),
            CipherKind::AesGcmBase64 => {
                let secret = self.aes_secret(secret)?;
                let packed = gcm::seal(text.as_bytes(), secret, self.iterations)?;
                Ok(PayloadEncoding::Base64.encode(&packed))
            }
            CipherKind::Custom { cipher, .. } => {
                let secret = self.custom_secret(secret)?;
                cipher
                    .encrypt(text, secret.expose_secret(), secret.version())
                    .map_err(|e| CoreError::crypto(e.to_string()))
            }
        }
    }

    fn decrypt_inner(&self, payload: &str, secret: Option<&Secret>) -> Result<String> {
        match &self.kind {
            CipherKind::Plaintext => plaintext::decode(payload),
            CipherKind::AesGcmHex => self.open_aes(PayloadEncoding::Hex, payload, secret),
            CipherKind::AesGcmBase64 => self.open_aes(PayloadEncoding::Base64, payload, secret),
            CipherKind::Custom { cipher, .. } => {
                let secret = self.custom_secret(secret)?;
                cipher
                    .decrypt(payload, secret.expose_secret(), secret.version())
                    .map_err(|e| CoreError::crypto(e.to_string()))
            }
        }
    }

    fn open_aes(
        &self,
        encoding: PayloadEncoding,
        payload: &str,
        secret: Option<&Secret>,
    ) -> Result<String> {
        let secret = self.aes_secret(secret)?;
        let packed = encoding.decode(payload)?;
        let bytes = gcm::open(&packed, secret, self.iterations)?;
        String::from_utf8(bytes).map_err(|_| CoreError::crypto("decrypted data is not valid UTF-8"))
    }

    fn aes_secret<'a>(&self, secret: Option<&'a Secret>) -> Result<&'a Secret> {
        let secret = secret.ok_or_else(|| CoreError::crypto("no secret provided"))?;
        if secret.kind() == SecretKind::CustomEncryptionKey {
            return Err(CoreError::crypto(format!(
                "wrong secret type for cipher: {} given",
                secret.kind()
            )));
        }
        Ok(secret)
    }

    fn custom_secret<'a>(&self, secret: Option<&'a Secret>) -> Result<&'a Secret> {
        let secret = secret.ok_or_else(|| CoreError::crypto("no secret provided"))?;
        if secret.kind() != SecretKind::CustomEncryptionKey {
            return Err(CoreError::crypto(format!(
                "wrong secret type for cipher: {} given, custom encryption key required",
                secret.kind()
            )));
        }
        Ok(secret)
    }

    fn describe(&self, op: &str, secret: Option<&Secret>) -> String {
        match secret {
            Some(s) => format!(
                "{op} with cipher '{}' ({}), secret version {}",
                self.code,
                self.name(),
                s.version()
            ),
            None => format!("{op} with cipher '{}' ({})", self.code, self.name()),
        }
    }
}

/// Code → cipher table plus the code used for new encryptions.
#[derive(Debug, Clone)]
pub struct CipherRegistry {
    ciphers: HashMap<String, RegisteredCipher>,
    active: String,
}

impl CipherRegistry {
    /// Register the built-ins and `custom`, then resolve the active cipher.
    ///
    /// Active cipher: `"pt"` in plaintext mode, else the current custom
    /// cipher, else `active_override`, else `"2"`.
    pub fn new(
        custom: &[CustomCipherConfig],
        plaintext_mode: bool,
        active_override: Option<&str>,
        iterations: u32,
    ) -> Result<Self> {
        if iterations == 0 {
            return Err(CoreError::config("PBKDF2 iteration count must be positive"));
        }

        let mut ciphers = HashMap::new();
        for builtin in [
            RegisteredCipher::new(CODE_AES_GCM_HEX, CipherKind::AesGcmHex, iterations),
            RegisteredCipher::new(CODE_AES_GCM_BASE64, CipherKind::AesGcmBase64, iterations),
            RegisteredCipher::new(CODE_PLAINTEXT, CipherKind::Plaintext, iterations),
        ] {
            register(&mut ciphers, builtin)?;
        }

        for config in custom {
            if config.name().is_empty() {
                return Err(CoreError::config("custom cipher name must not be empty"));
            }
            let kind = CipherKind::Custom {
                name: config.name().to_owned(),
                cipher: config.cipher(),
            };
            register(&mut ciphers, RegisteredCipher::new(config.code(), kind, iterations))?;
        }

        let currents: Vec<&CustomCipherConfig> = custom.iter().filter(|c| c.is_current()).collect();
        if currents.len() > 1 {
            let names = currents
                .iter()
                .map(|c| format!("'{}'", c.name()))
                .collect::<Vec<_>>()
                .join(", ");
            return Err(CoreError::config(format!(
                "at most one custom cipher may be current, found: {names}"
            )));
        }

        let active = resolve_active(&ciphers, currents.first().copied(), plaintext_mode, active_override)?;

        Ok(Self { ciphers, active })
    }

    pub fn get(&self, code: &str) -> Option<&RegisteredCipher> {
        self.ciphers.get(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.ciphers.contains_key(code)
    }

    /// Cipher used for new encryptions.
    pub fn active(&self) -> &RegisteredCipher {
        // `active` is resolved against the map in `new` and never changes.
        &self.ciphers[&self.active]
    }

    pub fn active_code(&self) -> &str {
        &self.active
    }

    /// All registered codes, sorted.
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.ciphers.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    pub fn custom_ciphers(&self) -> impl Iterator<Item = &RegisteredCipher> {
        self.ciphers.values().filter(|c| c.is_custom())
    }
}

fn register(map: &mut HashMap<String, RegisteredCipher>, cipher: RegisteredCipher) -> Result<()> {
    if map.contains_key(cipher.code()) {
        return Err(CoreError::config(format!(
            "cipher code '{}' ({}) is registered more than once",
            cipher.code(),
            cipher.name()
        )));
    }
    map.insert(cipher.code().to_owned(), cipher);
    Ok(())
}

fn resolve_active(
    ciphers: &HashMap<String, RegisteredCipher>,
    current_custom: Option<&CustomCipherConfig>,
    plaintext_mode: bool,
    active_override: Option<&str>,
) -> Result<String> {
    if plaintext_mode {
        if let Some(code) = active_override.filter(|c| *c != CODE_PLAINTEXT) {
            return Err(CoreError::config(format!(
                "cipher '{code}' requires secrets, but none are configured"
            )));
        }
        return Ok(CODE_PLAINTEXT.to_owned());
    }

    if let Some(code) = active_override {
        if !ciphers.contains_key(code) {
            return Err(CoreError::config(format!("unregistered cipher requested: '{code}'")));
        }
        if code == CODE_PLAINTEXT {
            return Err(CoreError::config(
                "plaintext cipher cannot be active while secrets are configured",
            ));
        }
        if let Some(current) = current_custom {
            if current.code() != code {
                return Err(CoreError::config(format!(
                    "active cipher '{code}' conflicts with current custom cipher '{}'",
                    current.name()
                )));
            }
        }
        return Ok(code.to_owned());
    }

    Ok(current_custom
        .map(CustomCipherConfig::code)
        .unwrap_or_else(|| DEFAULT_CIPHER_CODE.to_owned()))
}
