use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::Instrument;

use super::{EmailDispatcher, FanoutOutcome, notify_active_subscribers};
use crate::domain::NotificationRequest;
use crate::store::ContentStore;
use crate::templates::EmailTemplates;

/// Fires a notification without making the caller wait for it.
///
/// At-most-once and best-effort: nothing is retried and failures are only
/// logged, so whatever triggered the event succeeds regardless.
pub fn spawn_notification(
    store: Arc<dyn ContentStore>,
    dispatcher: EmailDispatcher,
    templates: Arc<EmailTemplates>,
    request: NotificationRequest,
) -> JoinHandle<()> {
    let span = tracing::info_span!(
        "Background notification",
        kind = request.kind.as_str(),
        title = %request.title
    );

    tokio::spawn(
        async move {
            let content = match templates.notification(&request) {
                Ok(content) => content,
                Err(err) => {
                    tracing::error!(
                        error.cause_chain = ?err,
                        error.message = %err,
                        "Failed to render notification email"
                    );
                    return;
                }
            };

            match notify_active_subscribers(store.as_ref(), &dispatcher, content).await {
                Ok(FanoutOutcome::NoSubscribers) => {}
                Ok(FanoutOutcome::Dispatched(summary)) => {
                    tracing::info!(
                        successful = summary.successful,
                        failed = summary.failed,
                        total = summary.total,
                        "Background notification finished"
                    );
                }
                Err(err) => {
                    tracing::error!(
                        error.cause_chain = ?err,
                        error.message = %err,
                        "Background notification aborted"
                    );
                }
            }
        }
        .instrument(span),
    )
}
