use crate::secrets::SecretProvider;
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use std::time::Duration;
use tokio::sync::OnceCell;

const KEY_VAULT_RESOURCE: &str = "https://vault.azure.net";
const TOKEN_API_VERSION: &str = "2018-02-01";
const SECRETS_API_VERSION: &str = "7.4";

/// Azure Key Vault over its REST API, authenticated with a managed identity.
pub struct KeyVaultSecrets {
    http_client: Client,
    vault_url: String,
    token_url: String,
    access_token: OnceCell<Secret<String>>,
}

#[derive(serde::Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(serde::Deserialize)]
struct SecretBundle {
    value: String,
}

impl KeyVaultSecrets {
    pub fn new(vault_url: String, token_url: String, timeout: Duration) -> anyhow::Result<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build the Key Vault HTTP client.")?;
        Ok(Self {
            http_client,
            vault_url,
            token_url,
            access_token: OnceCell::new(),
        })
    }

    #[tracing::instrument(name = "Acquire a Key Vault access token", skip(self))]
    async fn request_access_token(&self) -> anyhow::Result<Secret<String>> {
        let response = self
            .http_client
            .get(&self.token_url)
            .query(&[
                ("api-version", TOKEN_API_VERSION),
                ("resource", KEY_VAULT_RESOURCE),
            ])
            .header("Metadata", "true")
            .send()
            .await
            .context("Failed to reach the managed identity endpoint.")?
            .error_for_status()
            .context("The managed identity endpoint refused to issue a token.")?
            .json::<TokenResponse>()
            .await
            .context("The managed identity endpoint returned an unexpected body.")?;
        Ok(Secret::new(response.access_token))
    }
}

#[async_trait]
impl SecretProvider for KeyVaultSecrets {
    #[tracing::instrument(name = "Fetch a secret from Key Vault", skip(self))]
    async fn fetch_secret(&self, name: &str) -> Result<Secret<String>, anyhow::Error> {
        let access_token = self
            .access_token
            .get_or_try_init(|| self.request_access_token())
            .await?;
        let url = format!("{}/secrets/{}", self.vault_url.trim_end_matches('/'), name);
        let bundle = self
            .http_client
            .get(&url)
            .query(&[("api-version", SECRETS_API_VERSION)])
            .bearer_auth(access_token.expose_secret())
            .send()
            .await
            .context("Failed to reach Key Vault.")?
            .error_for_status()
            .context("Key Vault refused to return the secret.")?
            .json::<SecretBundle>()
            .await
            .context("Key Vault returned an unexpected body.")?;
        Ok(Secret::new(bundle.value))
    }
}
