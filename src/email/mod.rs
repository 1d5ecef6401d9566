mod sendgrid_email_client;
mod ses_email_client;

use crate::domain::EmailAddress;
use async_trait::async_trait;
pub use sendgrid_email_client::SendGridEmailClient;
pub use ses_email_client::SesEmailClient;

#[async_trait]
pub trait Email: Send + Sync {
    async fn send_email(
        &self,
        recipient: &EmailAddress,
        subject: &str,
        html_content: &str,
        text_content: &str,
    ) -> Result<(), anyhow::Error>;
}
