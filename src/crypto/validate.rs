// src/crypto/validate.rs
//! Construction-time self-test of custom ciphers
//!
//! Each custom cipher must round-trip a random probe with the store's
//! custom-encryption secret. One failure rejects the whole client.

use uuid::Uuid;

use crate::error::{CoreError, Result};
use crate::secrets::SecretStore;

use super::registry::CipherRegistry;

/// Round-trip a UUID probe through every custom cipher in `registry`.
pub fn validate_custom_ciphers(registry: &CipherRegistry, secrets: Option<&SecretStore>) -> Result<()> {
    let mut custom = registry.custom_ciphers().peekable();
    if custom.peek().is_none() {
        return Ok(());
    }

    let secrets = secrets.ok_or_else(|| {
        CoreError::config("custom ciphers are configured but no secrets were provided")
    })?;
    let secret = secrets.custom_encryption_secret().ok_or_else(|| {
        CoreError::config("custom ciphers are configured but no secret is marked for custom encryption")
    })?;

    for cipher in custom {
        let probe = Uuid::new_v4().to_string();
        let failed = |detail: String| {
            CoreError::crypto(format!(
                "validation of custom cipher '{}' failed: {detail}",
                cipher.name()
            ))
        };

        let encrypted = cipher
            .encrypt(&probe, Some(secret))
            .map_err(|e| failed(e.message().to_owned()))?;
        let decrypted = cipher
            .decrypt(&encrypted, Some(secret))
            .map_err(|e| failed(e.message().to_owned()))?;
        if decrypted != probe {
            return Err(failed("decrypted text does not match the original".into()));
        }

        #[cfg(feature = "logging")]
        tracing::debug!(cipher = cipher.name(), code = cipher.code(), "custom cipher validated");
    }

    Ok(())
}
