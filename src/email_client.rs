use std::time::Duration;

use anyhow::Context;
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::domain::SubscriberEmail;

/// Rendered message shared by every recipient of one fan-out.
#[derive(Debug, Clone)]
pub struct EmailContent {
    pub subject: String,
    pub html: String,
}

#[derive(thiserror::Error, Debug)]
pub enum EmailError {
    #[error("Failed to reach the email provider.")]
    Transport(#[source] reqwest::Error),
    #[error("The email provider rejected the message with status {status}: {body}")]
    Rejected {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// Anything able to deliver one message to one recipient.
#[async_trait::async_trait]
pub trait EmailSender: Send + Sync {
    async fn send_email(
        &self,
        recipient: &SubscriberEmail,
        content: &EmailContent,
    ) -> Result<(), EmailError>;
}

/// Client for a Resend-compatible transactional email API.
#[derive(Clone)]
pub struct EmailClient {
    http_client: Client,
    endpoint: Url,
    sender: String,
    reply_to: SubscriberEmail,
    auth_token: SecretString,
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
    reply_to: &'a str,
}

impl EmailClient {
    pub fn new(
        base_url: &str,
        sender: String,
        reply_to: SubscriberEmail,
        auth_token: SecretString,
        timeout: Duration,
    ) -> Result<Self, anyhow::Error> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build the email http client.")?;
        let endpoint = Url::parse(base_url)
            .and_then(|url| url.join("emails"))
            .with_context(|| format!("Failed parsing base email api url {base_url}."))?;

        Ok(Self {
            http_client,
            endpoint,
            sender,
            reply_to,
            auth_token,
        })
    }
}

#[async_trait::async_trait]
impl EmailSender for EmailClient {
    #[tracing::instrument(
        name = "Sending an email",
        skip(self, content),
        fields(recipient = %recipient, subject = %content.subject)
    )]
    async fn send_email(
        &self,
        recipient: &SubscriberEmail,
        content: &EmailContent,
    ) -> Result<(), EmailError> {
        let body = SendEmailRequest {
            from: &self.sender,
            to: [recipient.as_ref()],
            subject: &content.subject,
            html: &content.html,
            reply_to: self.reply_to.as_ref(),
        };

        let response = self
            .http_client
            .post(self.endpoint.clone())
            .bearer_auth(self.auth_token.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(EmailError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmailError::Rejected { status, body });
        }

        Ok(())
    }
}
