//! API error type and its HTTP rendering

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::error;
use voicelog_application::{
    AiFailure, AskAiError, ProcessCommandError, SessionLifecycleError, TranscriptError,
};

/// Per-field validation messages, keyed by request field name.
pub type FieldErrors = BTreeMap<&'static str, Vec<String>>;

pub const SESSION_NOT_FOUND: &str = "Session not found";
pub const INTERNAL_ERROR: &str = "Internal server error";

/// Errors returned by the HTTP handlers.
///
/// Every variant renders as JSON with an `error` field. Internal causes are
/// logged where they are converted and never reach the response body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request data")]
    Validation(FieldErrors),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),

    /// AI boundary failure on the ask path, carrying the fallback answer.
    #[error("{error}")]
    Ai {
        status: StatusCode,
        response: &'static str,
        error: &'static str,
    },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Ai { status, .. } => *status,
        }
    }

    pub fn session_not_found() -> Self {
        ApiError::NotFound(SESSION_NOT_FOUND.to_string())
    }

    pub fn internal() -> Self {
        ApiError::Internal(INTERNAL_ERROR.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation(details) => {
                json!({ "error": "Invalid request data", "details": details })
            }
            ApiError::BadRequest(message)
            | ApiError::NotFound(message)
            | ApiError::Internal(message) => json!({ "error": message }),
            ApiError::Ai {
                response, error, ..
            } => json!({ "response": response, "error": error }),
        };
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let mut details = FieldErrors::new();
        details.insert("body", vec![rejection.body_text()]);
        ApiError::Validation(details)
    }
}

impl From<ProcessCommandError> for ApiError {
    fn from(err: ProcessCommandError) -> Self {
        let message = err.to_string();
        match err {
            ProcessCommandError::SessionNotFound(_) => ApiError::session_not_found(),
            ProcessCommandError::SessionEnded(_) | ProcessCommandError::EmptyCommand => {
                ApiError::BadRequest(message)
            }
            ProcessCommandError::Storage(e) => {
                error!("Storage failure while processing command: {}", e);
                ApiError::internal()
            }
        }
    }
}

impl From<SessionLifecycleError> for ApiError {
    fn from(err: SessionLifecycleError) -> Self {
        match err {
            SessionLifecycleError::NotFound(_) => ApiError::session_not_found(),
            SessionLifecycleError::Storage(e) => {
                error!("Error loading session: {}", e);
                ApiError::internal()
            }
        }
    }
}

impl From<TranscriptError> for ApiError {
    fn from(err: TranscriptError) -> Self {
        match err {
            TranscriptError::NotFound(_) => ApiError::session_not_found(),
            TranscriptError::Storage(e) => {
                error!("Error getting transcript: {}", e);
                ApiError::internal()
            }
        }
    }
}

impl From<AskAiError> for ApiError {
    fn from(err: AskAiError) -> Self {
        let response = err.fallback_message();
        let message = err.to_string();
        match err {
            AskAiError::EmptyInput => ApiError::BadRequest(message),
            AskAiError::Ai(failure) => {
                let (status, error) = ai_status(&failure);
                ApiError::Ai {
                    status,
                    response,
                    error,
                }
            }
        }
    }
}

/// Status and short label for each AI failure kind.
fn ai_status(failure: &AiFailure) -> (StatusCode, &'static str) {
    match failure {
        AiFailure::NotConfigured => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "AI service not configured",
        ),
        AiFailure::AuthFailed(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Authentication failed"),
        AiFailure::RateLimited(_) => (StatusCode::TOO_MANY_REQUESTS, "Rate limit exceeded"),
        AiFailure::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "Invalid request"),
        AiFailure::ServiceError(_) => (StatusCode::SERVICE_UNAVAILABLE, "API error"),
    }
}
