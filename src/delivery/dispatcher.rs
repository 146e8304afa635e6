use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::Instrument;

use crate::domain::SubscriberEmail;
use crate::email_client::{EmailContent, EmailSender};

/// Per-invocation delivery counts. `successful + failed == total` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct DispatchSummary {
    pub successful: usize,
    pub failed: usize,
    pub total: usize,
}

/// Sends one message per recipient and waits for every send to settle.
#[derive(Clone)]
pub struct EmailDispatcher {
    sender: Arc<dyn EmailSender>,
}

impl EmailDispatcher {
    pub fn new(sender: Arc<dyn EmailSender>) -> Self {
        Self { sender }
    }

    /// All sends run concurrently. A failing recipient never stops the
    /// others, and no error escapes: failures are logged and counted.
    ///
    /// The sends run on a detached task, so dropping this future (client
    /// disconnect, shutdown) does not cancel deliveries already under way.
    #[tracing::instrument(
        name = "Dispatching emails",
        skip_all,
        fields(subject = %content.subject, total = recipients.len())
    )]
    pub async fn dispatch(&self, recipients: Vec<String>, content: EmailContent) -> DispatchSummary {
        let total = recipients.len();
        let settling = tokio::spawn(
            settle_all(Arc::clone(&self.sender), recipients, content).in_current_span(),
        );

        let summary = match settling.await {
            Ok(summary) => summary,
            Err(err) => {
                tracing::error!(
                    error.cause_chain = ?err,
                    error.message = %err,
                    "Email dispatch task failed to complete"
                );
                DispatchSummary {
                    successful: 0,
                    failed: total,
                    total,
                }
            }
        };

        tracing::info!(
            successful = summary.successful,
            failed = summary.failed,
            total = summary.total,
            "Email dispatch settled"
        );
        summary
    }
}

async fn settle_all(
    sender: Arc<dyn EmailSender>,
    recipients: Vec<String>,
    content: EmailContent,
) -> DispatchSummary {
    let mut summary = DispatchSummary {
        total: recipients.len(),
        ..Default::default()
    };
    let content = Arc::new(content);
    let mut sends = JoinSet::new();

    for recipient in recipients {
        let email = match SubscriberEmail::parse(recipient) {
            Ok(email) => email,
            Err(err) => {
                tracing::warn!(
                    error.message = %err,
                    "Skipping the recipient. The stored contact details are invalid."
                );
                summary.failed += 1;
                continue;
            }
        };

        let sender = Arc::clone(&sender);
        let content = Arc::clone(&content);
        sends.spawn(
            async move {
                let outcome = sender.send_email(&email, &content).await;
                (email, outcome)
            }
            .in_current_span(),
        );
    }

    while let Some(settled) = sends.join_next().await {
        match settled {
            Ok((_, Ok(()))) => summary.successful += 1,
            Ok((email, Err(err))) => {
                tracing::error!(
                    error.cause_chain = ?err,
                    error.message = %err,
                    recipient = %email,
                    "Failed to deliver email"
                );
                summary.failed += 1;
            }
            Err(err) => {
                tracing::error!(
                    error.cause_chain = ?err,
                    error.message = %err,
                    "Email delivery task failed to complete"
                );
                summary.failed += 1;
            }
        }
    }

    summary
}
