use actix_web::{HttpResponse, web};

use super::types::BodySchema;
use crate::delivery::{EmailDispatcher, spawn_notification};
use crate::domain::NotificationRequest;
use crate::routes::errors::ApiError;
use crate::routes::helpers::parse_json;
use crate::store::ContentStore;
use crate::templates::EmailTemplates;

/// Side-channel for publishing flows: the fan-out runs after the response
/// is sent and its outcome is only logged.
#[tracing::instrument(name = "Content published event", skip_all)]
pub async fn content_published(
    body: web::Bytes,
    store: web::Data<dyn ContentStore>,
    dispatcher: web::Data<EmailDispatcher>,
    templates: web::Data<EmailTemplates>,
) -> Result<HttpResponse, ApiError> {
    let body: BodySchema = parse_json(&body)?;
    let request: NotificationRequest = body.try_into().map_err(ApiError::ValidationError)?;

    spawn_notification(
        store.into_inner(),
        dispatcher.get_ref().clone(),
        templates.into_inner(),
        request,
    );

    Ok(HttpResponse::Accepted().json(serde_json::json!({ "message": "Notification scheduled" })))
}
