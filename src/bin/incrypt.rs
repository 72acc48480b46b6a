// src/bin/incrypt.rs
//! incrypt — encrypt, decrypt and hash single values with the configured secrets

use anyhow::{bail, Context, Result};
use incountry_crypto::{load_config, CryptoManager};
use tracing::info;

const USAGE: &str = "usage: incrypt encrypt <text> | decrypt <envelope> [version] | hash <value>";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = load_config().context("failed to load configuration — is INC_CONFIG set?")?;
    let manager =
        CryptoManager::from_config(&config, Vec::new()).context("invalid crypto configuration")?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["encrypt", text] => {
            let encrypted = manager.encrypt(text)?;
            info!(secret_version = ?encrypted.secret_version, "encrypted");
            println!("{}", encrypted.envelope);
            if let Some(version) = encrypted.secret_version {
                println!("version: {version}");
            }
        }
        ["decrypt", envelope] => println!("{}", manager.decrypt(envelope, None)?),
        ["decrypt", envelope, version] => {
            let version: u32 = version
                .parse()
                .with_context(|| format!("invalid secret version '{version}'"))?;
            println!("{}", manager.decrypt(envelope, Some(version))?);
        }
        ["hash", value] => {
            if let Some(digest) = manager.hash(Some(value)) {
                println!("{digest}");
            }
        }
        _ => bail!(USAGE),
    }

    Ok(())
}
