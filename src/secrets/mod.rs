//! Named secret lookup.
//!
//! Every backend answers `None` (after logging the cause) when a secret
//! cannot be resolved; callers decide whether that is fatal.

mod directory;
mod environment;
mod key_vault;

use crate::configuration::{SecretProviderKind, SecretSettings};
use async_trait::async_trait;
pub use directory::DirectorySecrets;
pub use environment::EnvironmentSecrets;
pub use key_vault::KeyVaultSecrets;
use secrecy::Secret;

#[async_trait]
pub trait SecretProvider: Send + Sync {
    async fn fetch_secret(&self, name: &str) -> Result<Secret<String>, anyhow::Error>;

    async fn get_secret(&self, name: &str) -> Option<Secret<String>> {
        match self.fetch_secret(name).await {
            Ok(secret) => Some(secret),
            Err(error) => {
                tracing::error!(
                    error.cause_chain = ?error,
                    secret_name = %name,
                    "Error fetching secret"
                );
                None
            }
        }
    }
}

#[derive(thiserror::Error, Debug)]
#[error("The key_vault secret provider requires `secrets.vault_url` to be set.")]
pub struct MissingVaultUrl;

pub fn from_settings(
    settings: &SecretSettings,
) -> Result<Box<dyn SecretProvider>, anyhow::Error> {
    let provider: Box<dyn SecretProvider> = match settings.provider {
        SecretProviderKind::Environment => {
            Box::new(EnvironmentSecrets::new(settings.env_prefix.clone()))
        }
        SecretProviderKind::Directory => {
            Box::new(DirectorySecrets::new(settings.directory.clone()))
        }
        SecretProviderKind::KeyVault => {
            let vault_url = settings.vault_url.clone().ok_or(MissingVaultUrl)?;
            Box::new(KeyVaultSecrets::new(
                vault_url,
                settings.token_url.clone(),
                settings.timeout(),
            )?)
        }
    };
    Ok(provider)
}
