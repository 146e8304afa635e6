use actix_web::{HttpResponse, web};
use anyhow::Context;

use super::types::{BodySchema, NotificationsSent};
use crate::delivery::{EmailDispatcher, FanoutOutcome, notify_active_subscribers};
use crate::domain::NotificationRequest;
use crate::routes::errors::ApiError;
use crate::routes::helpers::{no_subscribers, parse_json};
use crate::store::ContentStore;
use crate::templates::EmailTemplates;

#[tracing::instrument(
    name = "Send notification",
    skip_all,
    fields(kind = tracing::field::Empty, title = tracing::field::Empty)
)]
pub async fn send_notification(
    body: web::Bytes,
    store: web::Data<dyn ContentStore>,
    dispatcher: web::Data<EmailDispatcher>,
    templates: web::Data<EmailTemplates>,
) -> Result<HttpResponse, ApiError> {
    let body: BodySchema = parse_json(&body)?;
    let request: NotificationRequest = body.try_into().map_err(ApiError::ValidationError)?;
    tracing::Span::current()
        .record("kind", request.kind.as_str())
        .record("title", tracing::field::display(&request.title));

    let content = templates
        .notification(&request)
        .context("Failed to render the notification email")?;

    match notify_active_subscribers(store.get_ref(), &dispatcher, content).await? {
        FanoutOutcome::NoSubscribers => Ok(no_subscribers()),
        FanoutOutcome::Dispatched(summary) => Ok(HttpResponse::Ok().json(NotificationsSent {
            message: "Notification emails sent",
            summary,
        })),
    }
}
