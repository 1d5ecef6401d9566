use crate::secrets::SecretProvider;
use anyhow::Context;
use async_trait::async_trait;
use secrecy::Secret;

/// Reads `db-host` from `<prefix>DB_HOST`.
pub struct EnvironmentSecrets {
    prefix: String,
}

impl EnvironmentSecrets {
    pub fn new(prefix: String) -> Self {
        Self { prefix }
    }

    pub fn variable_name(&self, secret_name: &str) -> String {
        format!(
            "{}{}",
            self.prefix,
            secret_name.to_uppercase().replace('-', "_")
        )
    }
}

#[async_trait]
impl SecretProvider for EnvironmentSecrets {
    async fn fetch_secret(&self, name: &str) -> Result<Secret<String>, anyhow::Error> {
        let variable = self.variable_name(name);
        let value = std::env::var(&variable)
            .with_context(|| format!("Environment variable {} is not set.", variable))?;
        Ok(Secret::new(value))
    }
}
