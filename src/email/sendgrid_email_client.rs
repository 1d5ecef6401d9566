use crate::domain::EmailAddress;
use crate::email::Email;
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use std::time::Duration;

pub struct SendGridEmailClient {
    http_client: Client,
    base_url: String,
    sender: EmailAddress,
    api_key: Secret<String>,
}

impl SendGridEmailClient {
    pub fn new(
        base_url: String,
        sender: EmailAddress,
        api_key: Secret<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build the SendGrid HTTP client.")?;
        Ok(Self {
            http_client,
            base_url,
            sender,
            api_key,
        })
    }
}

#[derive(serde::Serialize)]
struct SendEmailRequest<'a> {
    personalizations: [Personalization<'a>; 1],
    from: Address<'a>,
    subject: &'a str,
    content: [ContentPart<'a>; 2],
}

#[derive(serde::Serialize)]
struct Personalization<'a> {
    to: [Address<'a>; 1],
}

#[derive(serde::Serialize)]
struct Address<'a> {
    email: &'a str,
}

#[derive(serde::Serialize)]
struct ContentPart<'a> {
    #[serde(rename = "type")]
    mime_type: &'a str,
    value: &'a str,
}

#[async_trait]
impl Email for SendGridEmailClient {
    #[tracing::instrument(
        name = "Send email through SendGrid",
        skip(self, html_content, text_content)
    )]
    async fn send_email(
        &self,
        recipient: &EmailAddress,
        subject: &str,
        html_content: &str,
        text_content: &str,
    ) -> anyhow::Result<()> {
        let url = format!("{}/v3/mail/send", self.base_url.trim_end_matches('/'));
        // SendGrid requires text/plain to precede text/html.
        let request_body = SendEmailRequest {
            personalizations: [Personalization {
                to: [Address {
                    email: recipient.as_ref(),
                }],
            }],
            from: Address {
                email: self.sender.as_ref(),
            },
            subject,
            content: [
                ContentPart {
                    mime_type: "text/plain",
                    value: text_content,
                },
                ContentPart {
                    mime_type: "text/html",
                    value: html_content,
                },
            ],
        };
        self.http_client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&request_body)
            .send()
            .await
            .context("Failed to reach SendGrid.")?
            .error_for_status()
            .context("SendGrid rejected the email.")?;
        Ok(())
    }
}
