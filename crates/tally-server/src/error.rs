//! Wire error envelope: `{code, message, error}` with the HTTP status
//! mirroring `code`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::signature::SignatureError;
use tally_core::StoreError;

/// A handler failure rendered in the wire envelope.
#[derive(Debug)]
pub struct ApiError {
    pub code: u16,
    pub message: String,
    pub error: String,
}

impl ApiError {
    pub fn internal(message: impl Into<String>, error: impl std::fmt::Display) -> Self {
        Self {
            code: 500,
            message: message.into(),
            error: error.to_string(),
        }
    }

    pub fn unauthorized(message: impl Into<String>, error: impl std::fmt::Display) -> Self {
        Self {
            code: 401,
            message: message.into(),
            error: error.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = Json(json!({
            "code": self.code,
            "message": self.message,
            "error": self.error,
        }));
        (status, body).into_response()
    }
}

impl From<SignatureError> for ApiError {
    fn from(err: SignatureError) -> Self {
        ApiError::unauthorized("Invalid signature", err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::internal("storage failure", err)
    }
}
