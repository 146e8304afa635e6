use actix_web::{HttpResponse, web};
use anyhow::Context;

use super::types::{BodySchema, NewsletterIssue, NewsletterSent};
use crate::delivery::EmailDispatcher;
use crate::routes::errors::ApiError;
use crate::routes::helpers::parse_json;
use crate::templates::EmailTemplates;

/// Sends an admin-written issue to the addresses listed in the request.
#[tracing::instrument(name = "Send newsletter", skip_all, fields(subject = tracing::field::Empty))]
pub async fn send_newsletter(
    body: web::Bytes,
    dispatcher: web::Data<EmailDispatcher>,
    templates: web::Data<EmailTemplates>,
) -> Result<HttpResponse, ApiError> {
    let body: BodySchema = parse_json(&body)?;
    let issue: NewsletterIssue = body.try_into().map_err(ApiError::ValidationError)?;
    tracing::Span::current().record("subject", tracing::field::display(&issue.subject));

    let content = templates
        .newsletter(&issue.subject, &issue.content)
        .context("Failed to render the newsletter email")?;

    let summary = dispatcher.dispatch(issue.subscribers, content).await;
    tracing::info!(
        sent = summary.successful,
        failed = summary.failed,
        "Newsletter sent"
    );

    Ok(HttpResponse::Ok().json(NewsletterSent {
        success: true,
        sent: summary.successful,
        failed: summary.failed,
        total: summary.total,
    }))
}
