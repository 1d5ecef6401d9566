use crate::secrets::SecretProvider;
use anyhow::Context;
use async_trait::async_trait;
use secrecy::Secret;
use std::path::PathBuf;

/// One file per secret, as mounted by Docker or Kubernetes.
pub struct DirectorySecrets {
    directory: PathBuf,
}

impl DirectorySecrets {
    pub fn new(directory: PathBuf) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl SecretProvider for DirectorySecrets {
    async fn fetch_secret(&self, name: &str) -> Result<Secret<String>, anyhow::Error> {
        let path = self.directory.join(name);
        let contents = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read secret file {}.", path.display()))?;
        Ok(Secret::new(contents.trim().to_string()))
    }
}
