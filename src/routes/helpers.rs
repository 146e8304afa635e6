use std::error::Error;

use actix_web::HttpResponse;
use serde::de::DeserializeOwned;

use super::errors::ApiError;

pub fn error_chain_fmt(e: &impl Error, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    writeln!(f, "{e}\n")?;
    let mut current = e.source();

    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{cause}")?;
        current = cause.source();
    }

    Ok(())
}

pub fn parse_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body)
        .map_err(|e| ApiError::ValidationError(format!("Invalid request body: {e}")))
}

/// Like [`parse_json`], but an empty body stands for `{}`.
pub fn parse_json_or_default<T: DeserializeOwned + Default>(body: &[u8]) -> Result<T, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    parse_json(body)
}

pub fn message(text: &str) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "message": text }))
}

pub fn no_subscribers() -> HttpResponse {
    message("No active subscribers found")
}

/// CORS pre-flight: headers only, empty body.
pub async fn preflight() -> HttpResponse {
    HttpResponse::Ok().finish()
}
