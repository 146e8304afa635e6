//! Resolving what to send, to whom, and fanning it out.

mod background;
mod dispatcher;
mod recipients;
mod resolver;

pub use background::spawn_notification;
pub use dispatcher::{DispatchSummary, EmailDispatcher};
pub use recipients::{Recipients, active_recipients};
pub use resolver::{ResolveError, ResolvedDevotional, resolve_devotional};

use crate::email_client::EmailContent;
use crate::store::{ContentStore, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanoutOutcome {
    NoSubscribers,
    Dispatched(DispatchSummary),
}

/// Sends `content` to every active subscriber.
///
/// Store failures abort before anything is sent. Individual send failures
/// only show up in the returned counts.
#[tracing::instrument(name = "Fanning out to active subscribers", skip_all, fields(subject = %content.subject))]
pub async fn notify_active_subscribers(
    store: &dyn ContentStore,
    dispatcher: &EmailDispatcher,
    content: EmailContent,
) -> Result<FanoutOutcome, StoreError> {
    match active_recipients(store).await? {
        Recipients::None => {
            tracing::info!("No active subscribers found, nothing dispatched");
            Ok(FanoutOutcome::NoSubscribers)
        }
        Recipients::Active(emails) => {
            let summary = dispatcher.dispatch(emails, content).await;
            Ok(FanoutOutcome::Dispatched(summary))
        }
    }
}
