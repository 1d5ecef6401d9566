//! The data access adapter: resolved credentials, one database connection
//! per request, and best-effort email dispatch.

use crate::configuration::{EmailProvider, Settings};
use crate::domain::EmailAddress;
use crate::email::{Email, SendGridEmailClient, SesEmailClient};
use crate::routes::ApiError;
use crate::secrets::SecretProvider;
use anyhow::Context;
use diesel::result::ConnectionError;
use diesel::{Connection, PgConnection};
use secrecy::{ExposeSecret, Secret};
use std::sync::Arc;

#[derive(thiserror::Error, Debug)]
pub enum ConfigurationError {
    #[error("One or more database secrets are missing: {}", .0.join(", "))]
    MissingDatabaseSecrets(Vec<String>),
}

#[derive(Clone)]
pub struct DatabaseCredentials {
    pub host: String,
    pub port: u16,
    pub database_name: String,
    pub username: String,
    pub password: Secret<String>,
    pub require_ssl: bool,
    pub connect_timeout_seconds: u64,
}

impl DatabaseCredentials {
    /// A libpq keyword/value connection string.
    pub fn connection_string(&self) -> Secret<String> {
        Secret::new(format!(
            "host={} port={} dbname={} user={} password={} sslmode={} connect_timeout={}",
            quote(&self.host),
            self.port,
            quote(&self.database_name),
            quote(&self.username),
            quote(self.password.expose_secret()),
            ssl_mode(self.require_ssl),
            self.connect_timeout_seconds
        ))
    }

    pub fn with_database(&self, database_name: &str) -> Self {
        Self {
            database_name: database_name.to_string(),
            ..self.clone()
        }
    }
}

fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

fn ssl_mode(require_ssl: bool) -> &'static str {
    match require_ssl {
        true => "require",
        false => "prefer",
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailStatus {
    Sent,
    Failed(String),
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReport {
    pub recipient: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

pub struct EmailMessage {
    pub subject: String,
    pub html_content: String,
    pub text_content: String,
}

pub struct Adapter {
    database: DatabaseCredentials,
    email_client: Option<Arc<dyn Email>>,
}

impl Adapter {
    pub fn new(database: DatabaseCredentials, email_client: Option<Arc<dyn Email>>) -> Self {
        Self {
            database,
            email_client,
        }
    }

    /// Resolves every credential once. Missing database secrets are fatal,
    /// missing email secrets only disable delivery.
    #[tracing::instrument(name = "Build the data access adapter", skip_all)]
    pub async fn build(
        settings: &Settings,
        secrets: &dyn SecretProvider,
    ) -> Result<Self, ConfigurationError> {
        let names = &settings.secrets.names;
        let host = secrets.get_secret(&names.db_host).await;
        let database_name = secrets.get_secret(&names.db_name).await;
        let username = secrets.get_secret(&names.db_user).await;
        let password = secrets.get_secret(&names.db_password).await;

        let (host, database_name, username, password) =
            match (host, database_name, username, password) {
                (Some(host), Some(database_name), Some(username), Some(password)) => {
                    (host, database_name, username, password)
                }
                (host, database_name, username, password) => {
                    let missing = [
                        (&names.db_host, host.is_none()),
                        (&names.db_name, database_name.is_none()),
                        (&names.db_user, username.is_none()),
                        (&names.db_password, password.is_none()),
                    ]
                    .into_iter()
                    .filter(|(_, absent)| *absent)
                    .map(|(name, _)| name.clone())
                    .collect();
                    return Err(ConfigurationError::MissingDatabaseSecrets(missing));
                }
            };

        let database = DatabaseCredentials {
            host: host.expose_secret().clone(),
            port: settings.database.port,
            database_name: database_name.expose_secret().clone(),
            username: username.expose_secret().clone(),
            password,
            require_ssl: settings.database.require_ssl,
            connect_timeout_seconds: settings.database.connect_timeout_seconds,
        };

        let email_client = match build_email_client(settings, secrets).await {
            Ok(client) => Some(client),
            Err(error) => {
                tracing::warn!(
                    error.cause_chain = ?error,
                    "Email delivery is disabled"
                );
                None
            }
        };

        Ok(Self::new(database, email_client))
    }

    pub fn connect(&self) -> Result<PgConnection, ConnectionError> {
        PgConnection::establish(self.database.connection_string().expose_secret()).map_err(|e| {
            tracing::error!(error.cause_chain = ?e, "Database connection failed");
            e
        })
    }

    /// Runs `f` against a fresh connection on a blocking thread. The
    /// connection is closed when `f` returns, whatever the outcome.
    pub async fn run<F, R>(&self, f: F) -> Result<R, ApiError>
    where
        F: FnOnce(&mut PgConnection) -> Result<R, ApiError> + Send + 'static,
        R: Send + 'static,
    {
        let adapter = Adapter::new(self.database.clone(), None);
        tokio::task::spawn_blocking(move || {
            let mut conn = adapter.connect().map_err(ApiError::Connection)?;
            f(&mut conn)
        })
        .await
        .context("The database task was cancelled or panicked.")?
    }

    #[tracing::instrument(name = "Send an email", skip(self, subject, html_content, text_content))]
    pub async fn send_email(
        &self,
        recipient: &str,
        subject: &str,
        html_content: &str,
        text_content: &str,
    ) -> EmailStatus {
        let result = match (&self.email_client, EmailAddress::parse(recipient.to_string())) {
            (None, _) => Err(anyhow::anyhow!("Email delivery is not configured.")),
            (_, Err(e)) => Err(anyhow::anyhow!(e)),
            (Some(client), Ok(recipient)) => {
                client
                    .send_email(&recipient, subject, html_content, text_content)
                    .await
            }
        };
        match result {
            Ok(()) => {
                tracing::info!("Email sent");
                EmailStatus::Sent
            }
            Err(error) => {
                tracing::error!(error.cause_chain = ?error, "Failed to send email");
                EmailStatus::Failed(format!("{:#}", error))
            }
        }
    }

    /// One attempt per recipient, in order. Failures are recorded in the
    /// report and do not stop the batch.
    #[tracing::instrument(name = "Send an email batch", skip(self, recipients, message), fields(recipients = recipients.len()))]
    pub async fn send_email_batch(
        &self,
        recipients: &[String],
        message: &EmailMessage,
    ) -> Vec<DeliveryReport> {
        let mut reports = Vec::with_capacity(recipients.len());
        for recipient in recipients {
            let status = self
                .send_email(
                    recipient,
                    &message.subject,
                    &message.html_content,
                    &message.text_content,
                )
                .await;
            reports.push(match status {
                EmailStatus::Sent => DeliveryReport {
                    recipient: recipient.clone(),
                    status: "sent".into(),
                    error: None,
                },
                EmailStatus::Failed(error) => DeliveryReport {
                    recipient: recipient.clone(),
                    status: "failed".into(),
                    error: Some(error),
                },
            });
        }
        let failed = reports.iter().filter(|r| r.error.is_some()).count();
        tracing::info!(failed, "Email batch finished");
        reports
    }
}

async fn build_email_client(
    settings: &Settings,
    secrets: &dyn SecretProvider,
) -> anyhow::Result<Arc<dyn Email>> {
    let names = &settings.secrets.names;
    let sender = secrets
        .get_secret(&names.email_sender)
        .await
        .context("The email sender secret is missing.")?;
    let sender = EmailAddress::parse(sender.expose_secret().clone()).map_err(anyhow::Error::msg)?;
    let settings = &settings.email_client;

    let client: Arc<dyn Email> = match settings.provider {
        EmailProvider::Sendgrid => {
            let api_key = secrets
                .get_secret(&names.email_api_key)
                .await
                .context("The email API key secret is missing.")?;
            Arc::new(SendGridEmailClient::new(
                settings.base_url.clone(),
                sender,
                api_key,
                settings.timeout(),
            )?)
        }
        EmailProvider::Ses => Arc::new(SesEmailClient::from_settings(settings, sender).await),
    };
    Ok(client)
}
