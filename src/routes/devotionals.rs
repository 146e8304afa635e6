use actix_web::{HttpResponse, web};
use anyhow::Context;
use chrono::{NaiveDate, Utc};

use super::errors::ApiError;
use super::helpers::{message, no_subscribers, parse_json_or_default};
use crate::delivery::{
    DispatchSummary, EmailDispatcher, FanoutOutcome, ResolvedDevotional, notify_active_subscribers,
    resolve_devotional,
};
use crate::store::ContentStore;
use crate::templates::EmailTemplates;

#[derive(serde::Deserialize, Debug, Default)]
pub struct SendDevotionalRequest {
    pub devotional_id: Option<String>,
    /// Accepted for compatibility, every send goes to all active subscribers.
    #[serde(default)]
    pub send_to_all: bool,
}

#[derive(serde::Serialize)]
struct DevotionalSent {
    message: &'static str,
    #[serde(flatten)]
    summary: DispatchSummary,
    devotional_title: String,
    date: NaiveDate,
}

#[tracing::instrument(
    name = "Send daily devotional",
    skip_all,
    fields(
        send_to_all = tracing::field::Empty,
        devotional_id = tracing::field::Empty,
        devotional_title = tracing::field::Empty
    )
)]
pub async fn send_daily_devotional(
    body: web::Bytes,
    store: web::Data<dyn ContentStore>,
    dispatcher: web::Data<EmailDispatcher>,
    templates: web::Data<EmailTemplates>,
) -> Result<HttpResponse, ApiError> {
    let request: SendDevotionalRequest = parse_json_or_default(&body)?;
    tracing::Span::current().record("send_to_all", request.send_to_all);
    let today = Utc::now().date_naive();

    let devotional =
        match resolve_devotional(store.get_ref(), request.devotional_id.as_deref(), today).await? {
            ResolvedDevotional::Found(devotional) => devotional,
            ResolvedDevotional::NothingToSend => {
                tracing::info!(%today, "No devotional published for today");
                return Ok(message("No devotional available for today"));
            }
        };
    tracing::Span::current()
        .record("devotional_id", tracing::field::display(&devotional.id))
        .record("devotional_title", tracing::field::display(&devotional.title));

    let content = templates
        .devotional(&devotional)
        .context("Failed to render the devotional email")?;

    match notify_active_subscribers(store.get_ref(), &dispatcher, content).await? {
        FanoutOutcome::NoSubscribers => Ok(no_subscribers()),
        FanoutOutcome::Dispatched(summary) => Ok(HttpResponse::Ok().json(DevotionalSent {
            message: "Daily devotional emails sent",
            summary,
            devotional_title: devotional.title,
            date: devotional.date,
        })),
    }
}
