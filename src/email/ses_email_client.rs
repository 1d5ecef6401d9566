use crate::configuration::EmailClientSettings;
use crate::domain::EmailAddress;
use crate::email::Email;
use anyhow::Context;
use async_trait::async_trait;
use aws_config::timeout::TimeoutConfig;
use aws_config::BehaviorVersion;
use aws_sdk_sesv2 as ses;
use aws_sdk_sesv2::config::Region;
use aws_sdk_sesv2::types::{Body, Content, Destination, EmailContent, Message};

pub struct SesEmailClient {
    ses_client: ses::Client,
    sender: EmailAddress,
}

impl SesEmailClient {
    pub fn new(ses_client: ses::Client, sender: EmailAddress) -> Self {
        Self { ses_client, sender }
    }

    /// Build a client from the ambient AWS credential chain.
    pub async fn from_settings(settings: &EmailClientSettings, sender: EmailAddress) -> Self {
        let timeout_config = TimeoutConfig::builder()
            .operation_timeout(settings.timeout())
            .build();
        let mut loader = aws_config::defaults(BehaviorVersion::latest()).timeout_config(timeout_config);
        if let Some(region) = &settings.aws_region {
            loader = loader.region(Region::new(region.clone()));
        }
        let shared_config = loader.load().await;
        Self::new(ses::Client::new(&shared_config), sender)
    }
}

fn utf8_content(data: &str) -> anyhow::Result<Content> {
    Content::builder()
        .data(data)
        .charset("UTF-8")
        .build()
        .context("Failed to build SES content.")
}

#[async_trait]
impl Email for SesEmailClient {
    #[tracing::instrument(name = "Send email through SES", skip(self, html_content, text_content))]
    async fn send_email(
        &self,
        recipient: &EmailAddress,
        subject: &str,
        html_content: &str,
        text_content: &str,
    ) -> anyhow::Result<()> {
        let body = Body::builder()
            .html(utf8_content(html_content)?)
            .text(utf8_content(text_content)?)
            .build();
        let message = Message::builder()
            .subject(utf8_content(subject)?)
            .body(body)
            .build();
        let content = EmailContent::builder().simple(message).build();
        let destination = Destination::builder()
            .to_addresses(recipient.as_ref())
            .build();

        self.ses_client
            .send_email()
            .from_email_address(self.sender.as_ref())
            .destination(destination)
            .content(content)
            .send()
            .await
            .context("SES rejected the SendEmail request.")?;
        Ok(())
    }
}
