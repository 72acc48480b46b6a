// src/secrets/json.rs
//! JSON secrets factory (the format the platform SDKs share)

use serde::Deserialize;

use crate::enums::SecretKind;
use crate::error::{CoreError, Result};

use super::{Secret, SecretStore};

#[derive(Deserialize)]
#[serde(untagged)]
pub(super) enum SecretsInput {
    Password(String),
    Data(SecretsData),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SecretsData {
    secrets: Vec<SecretKeyJson>,
    current_version: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SecretKeyJson {
    secret: String,
    version: u32,
    #[serde(default)]
    is_key: bool,
    #[serde(default)]
    is_for_custom_encryption: bool,
}

impl SecretKeyJson {
    fn kind(&self) -> Result<SecretKind> {
        match (self.is_key, self.is_for_custom_encryption) {
            (false, false) => Ok(SecretKind::Password),
            (true, false) => Ok(SecretKind::RawKey),
            (false, true) => Ok(SecretKind::CustomEncryptionKey),
            (true, true) => Err(CoreError::config(format!(
                "secret version {}: isKey and isForCustomEncryption are mutually exclusive",
                self.version
            ))),
        }
    }
}

impl SecretsInput {
    pub(super) fn into_store(self) -> Result<SecretStore> {
        match self {
            SecretsInput::Password(password) => SecretStore::from_password(password),
            SecretsInput::Data(data) => {
                let secrets = data
                    .secrets
                    .into_iter()
                    .map(|entry| {
                        let kind = entry.kind()?;
                        Secret::new(entry.version, entry.secret.into_bytes(), kind)
                    })
                    .collect::<Result<Vec<_>>>()?;
                SecretStore::new(secrets, data.current_version)
            }
        }
    }
}
