// src/core/envelope.rs
//! The envelope codec — the beating heart of incountry-crypto
//!
//! Every stored value looks like `"<cipher code>:<payload>"`. The secret
//! version that encrypted it travels out of band (in record metadata) and is
//! handed back on decrypt, which is what lets old records survive rotation.

use crate::config::Config;
use crate::consts::{
    CODE_PLAINTEXT, DEFAULT_PBKDF2_ITERATIONS, ENVELOPE_SEPARATOR, LEGACY_SECRET_VERSION,
};
use crate::crypto::{plaintext, validate_custom_ciphers, CipherRegistry, CustomCipherConfig};
use crate::error::{CoreError, Result};
use crate::secrets::SecretStore;

use super::hash::SearchKeyHasher;

/// Tunables fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CryptoOptions {
    pub pbkdf2_iterations: u32,
    pub normalize_keys: bool,
    /// Code to encrypt with instead of the default; must be registered.
    pub active_cipher: Option<String>,
}

impl Default for CryptoOptions {
    fn default() -> Self {
        Self {
            pbkdf2_iterations: DEFAULT_PBKDF2_ITERATIONS,
            normalize_keys: false,
            active_cipher: None,
        }
    }
}

/// Output of [`CryptoManager::encrypt`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encrypted {
    /// `"<code>:<payload>"`, stored verbatim.
    pub envelope: String,
    /// Version of the secret used; `None` in plaintext mode.
    pub secret_version: Option<u32>,
}

/// Immutable, shareable encrypt/decrypt/hash service for one client.
#[derive(Debug, Clone)]
pub struct CryptoManager {
    secrets: Option<SecretStore>,
    registry: CipherRegistry,
    hasher: SearchKeyHasher,
}

impl CryptoManager {
    /// `secrets: None` selects plaintext mode.
    pub fn new(
        environment_id: impl Into<String>,
        secrets: Option<SecretStore>,
        custom_ciphers: Vec<CustomCipherConfig>,
    ) -> Result<Self> {
        Self::with_options(environment_id, secrets, custom_ciphers, CryptoOptions::default())
    }

    pub fn with_options(
        environment_id: impl Into<String>,
        secrets: Option<SecretStore>,
        custom_ciphers: Vec<CustomCipherConfig>,
        options: CryptoOptions,
    ) -> Result<Self> {
        let environment_id = environment_id.into();
        if environment_id.trim().is_empty() {
            return Err(CoreError::config("environment id must not be empty"));
        }
        if secrets.is_none() && !custom_ciphers.is_empty() {
            return Err(CoreError::config(
                "custom ciphers are configured but no secrets were provided",
            ));
        }

        let registry = CipherRegistry::new(
            &custom_ciphers,
            secrets.is_none(),
            options.active_cipher.as_deref(),
            options.pbkdf2_iterations,
        )?;
        validate_custom_ciphers(&registry, secrets.as_ref())?;
        registry
            .active()
            .check_encrypt_secret(secrets.as_ref().map(SecretStore::current))?;

        #[cfg(feature = "logging")]
        tracing::info!(
            active_cipher = registry.active_code(),
            current_secret_version = secrets.as_ref().map(SecretStore::current_version),
            custom_ciphers = custom_ciphers.len(),
            "crypto manager initialized"
        );

        Ok(Self {
            secrets,
            registry,
            hasher: SearchKeyHasher::new(environment_id)
                .with_normalized_keys(options.normalize_keys),
        })
    }

    /// Build from loaded configuration. Custom ciphers are code, not config,
    /// so they are passed separately.
    pub fn from_config(config: &Config, custom_ciphers: Vec<CustomCipherConfig>) -> Result<Self> {
        Self::with_options(
            config.environment_id.clone(),
            config.secret_store()?,
            custom_ciphers,
            config.crypto_options(),
        )
    }

    /// Encrypt with the current secret and active cipher.
    pub fn encrypt(&self, plaintext: &str) -> Result<Encrypted> {
        let cipher = self.registry.active();
        let secret = self.secrets.as_ref().map(SecretStore::current);
        let payload = cipher.encrypt(plaintext, secret)?;
        Ok(Encrypted {
            envelope: format!("{}{ENVELOPE_SEPARATOR}{payload}", cipher.code()),
            secret_version: secret.map(|s| s.version()),
        })
    }

    /// Decrypt an envelope written under `secret_version` (absent → 0).
    pub fn decrypt(&self, envelope: &str, secret_version: Option<u32>) -> Result<String> {
        let (code, payload) = envelope.split_once(ENVELOPE_SEPARATOR).ok_or_else(|| {
            CoreError::crypto(
                "malformed envelope: missing cipher code \
                 (untagged legacy envelopes are not supported)",
            )
        })?;

        if code == CODE_PLAINTEXT {
            return plaintext::decode(payload);
        }

        let context = || format!("decrypt with cipher '{code}'");
        let secrets = self.secrets.as_ref().ok_or_else(|| {
            CoreError::crypto("no secret provided, cannot decrypt").context(context())
        })?;
        let cipher = self.registry.get(code).ok_or_else(|| {
            CoreError::crypto(format!("illegal decryption version '{code}'")).context(context())
        })?;
        let version = secret_version.unwrap_or(LEGACY_SECRET_VERSION);
        let secret = secrets
            .get_secret(Some(version))
            .map_err(|e| e.context(context()))?;

        cipher.decrypt(payload, Some(secret))
    }

    /// Decrypt under the recorded version and encrypt again with the current
    /// secret and active cipher.
    pub fn reencrypt(&self, envelope: &str, secret_version: Option<u32>) -> Result<Encrypted> {
        let plaintext = self.decrypt(envelope, secret_version)?;
        let fresh = self.encrypt(&plaintext)?;

        #[cfg(feature = "logging")]
        tracing::debug!(
            from_version = ?secret_version,
            to_version = ?fresh.secret_version,
            "record re-encrypted"
        );

        Ok(fresh)
    }

    /// Whether a record stamped with `secret_version` was written under a
    /// secret other than the current one.
    pub fn needs_reencryption(&self, secret_version: Option<u32>) -> bool {
        match &self.secrets {
            Some(store) => secret_version.unwrap_or(LEGACY_SECRET_VERSION) != store.current_version(),
            None => false,
        }
    }

    /// Version to stamp on outgoing records; `None` in plaintext mode.
    pub fn current_secret_version(&self) -> Option<u32> {
        self.secrets.as_ref().map(SecretStore::current_version)
    }

    /// Search-key hash; `None` in, `None` out.
    pub fn hash(&self, value: Option<&str>) -> Option<String> {
        self.hasher.hash(value)
    }

    pub fn environment_id(&self) -> &str {
        self.hasher.environment_id()
    }

    pub fn is_plaintext_mode(&self) -> bool {
        self.secrets.is_none()
    }

    pub fn registry(&self) -> &CipherRegistry {
        &self.registry
    }

    pub fn secrets(&self) -> Option<&SecretStore> {
        self.secrets.as_ref()
    }
}
