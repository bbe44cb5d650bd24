use axum::{Json, http::StatusCode, response::IntoResponse};
use thiserror::Error;

use super::models::ErrorResponse;
use crate::print_jobs::LifecycleError;
use crate::qr::QrError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("payload invalid: {0}")]
    InvalidPayload(String),
    #[error("payload exceeds {0} bytes")]
    PayloadTooLarge(usize),
    #[error("print job not found or expired: {0}")]
    JobUnavailable(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::JobUnavailable(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidPayload(_) => "INVALID_PAYLOAD",
            ApiError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            ApiError::JobUnavailable(_) => "JOB_NOT_FOUND",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let body = ErrorResponse {
            code: self.code(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(value: serde_json::Error) -> Self {
        ApiError::InvalidPayload(value.to_string())
    }
}

impl From<LifecycleError> for ApiError {
    fn from(value: LifecycleError) -> Self {
        match value {
            LifecycleError::Validation(message) => ApiError::InvalidPayload(message),
            LifecycleError::NotFound(id) => ApiError::JobUnavailable(id),
            LifecycleError::Store(err) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<QrError> for ApiError {
    fn from(value: QrError) -> Self {
        // Encoder details stay in the logs
        tracing::error!(error = %value, "QR generation failed");
        ApiError::Internal("failed to generate QR code".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_errors_map_to_status() {
        let validation: ApiError = LifecycleError::Validation("labels data is required".into()).into();
        assert_eq!(validation.status_code(), StatusCode::BAD_REQUEST);

        let missing: ApiError = LifecycleError::NotFound("abc".into()).into();
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(missing.to_string(), "print job not found or expired: abc");
    }

    #[test]
    fn test_qr_error_hides_detail() {
        let err: ApiError = QrError::Encode("data too long".into()).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.to_string().contains("data too long"));
    }
}
