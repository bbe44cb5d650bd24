//! API utility functions
//!
//! Pure, stateless helpers shared by the JSON handlers.

use axum::http::HeaderMap;
use http_body_util::{BodyExt, LengthLimitError, Limited};
use serde::de::DeserializeOwned;

use crate::api::error::ApiError;

/// Parses and validates Content-Type header for application/json
///
/// Accepts `application/json`, optionally with a charset parameter.
/// Rejects `application/jsonp`, `text/json` and malformed media types.
pub fn parse_content_type(content_type: &str) -> Result<mime::Mime, ApiError> {
    let media_type: mime::Mime = content_type.parse().map_err(|_| {
        ApiError::InvalidPayload(format!("invalid Content-Type: {}", content_type))
    })?;

    if media_type.type_() != mime::APPLICATION || media_type.subtype() != mime::JSON {
        return Err(ApiError::InvalidPayload(format!(
            "Content-Type must be application/json, got: {}/{}",
            media_type.type_(),
            media_type.subtype()
        )));
    }

    Ok(media_type)
}

/// Reads a JSON request body: checks Content-Type, enforces `max_size`,
/// then deserializes.
///
/// The limit applies while the body streams in, after
/// `RequestDecompressionLayer` has inflated it, so nothing beyond
/// `max_size` bytes is ever buffered.
pub async fn read_json<T: DeserializeOwned>(
    headers: &HeaderMap,
    body: axum::body::Body,
    max_size: usize,
) -> Result<T, ApiError> {
    let content_type = headers
        .get(axum::http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::InvalidPayload("missing Content-Type header".into()))?;
    parse_content_type(content_type)?;

    let data = Limited::new(body, max_size)
        .collect()
        .await
        .map_err(|err| {
            if err.downcast_ref::<LengthLimitError>().is_some() {
                ApiError::PayloadTooLarge(max_size)
            } else {
                ApiError::Internal(err.to_string())
            }
        })?
        .to_bytes();

    Ok(serde_json::from_slice(&data)?)
}
