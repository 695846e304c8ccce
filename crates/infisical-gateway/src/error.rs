//! HTTP error types for the gateway.
//!
//! Maps [`InfisicalError`] into HTTP responses. Every variant produces a JSON
//! body with a machine-readable `error` field and a human-readable `message`.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use infisical_client::InfisicalError;
use serde::Serialize;

/// Application-level error returned from HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Client sent invalid input.
    #[error("{0}")]
    BadRequest(String),
    /// Requested resource not found upstream.
    #[error("{0}")]
    NotFound(String),
    /// Upstream rejected the call; its status is passed through.
    #[error("{message}")]
    Upstream {
        /// Status returned by Infisical.
        status: StatusCode,
        /// Message returned by Infisical.
        message: String,
    },
    /// Upstream unreachable or sent something undecodable.
    #[error("{0}")]
    BadGateway(String),
    /// Upstream did not answer in time.
    #[error("upstream request timed out")]
    GatewayTimeout,
    /// The gateway cannot serve requests right now.
    #[error("{0}")]
    Unavailable(String),
    /// Internal server error. The detail is logged, never returned.
    #[error("{0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            Self::Upstream { status, message } => (status, upstream_error_type(status), message),
            Self::BadGateway(msg) => {
                tracing::warn!(error = %msg, "upstream call failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "bad_gateway",
                    "upstream request failed".to_owned(),
                )
            }
            Self::GatewayTimeout => (
                StatusCode::GATEWAY_TIMEOUT,
                "gateway_timeout",
                "upstream request timed out".to_owned(),
            ),
            Self::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, "unavailable", msg),
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "internal server error".to_owned(),
                )
            }
        };

        let body = ErrorBody {
            error: error_type,
            message,
        };

        (status, axum::Json(body)).into_response()
    }
}

fn upstream_error_type(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => "bad_request",
        StatusCode::UNAUTHORIZED => "unauthorized",
        StatusCode::FORBIDDEN => "forbidden",
        StatusCode::CONFLICT => "conflict",
        StatusCode::TOO_MANY_REQUESTS => "rate_limited",
        s if s.is_server_error() => "upstream_error",
        _ => "upstream_rejected",
    }
}

impl From<InfisicalError> for AppError {
    fn from(err: InfisicalError) -> Self {
        match err {
            InfisicalError::InvalidInput(msg) => Self::BadRequest(msg),
            InfisicalError::NotFound(msg) => Self::NotFound(msg),
            InfisicalError::Auth {
                status_code,
                message,
            }
            | InfisicalError::Api {
                status_code,
                message,
            } => match StatusCode::from_u16(status_code) {
                Ok(status) if status.is_client_error() || status.is_server_error() => {
                    Self::Upstream { status, message }
                }
                _ => Self::BadGateway(format!("unexpected upstream status {status_code}")),
            },
            InfisicalError::Timeout => Self::GatewayTimeout,
            InfisicalError::Network(_) | InfisicalError::Json(_) => {
                Self::BadGateway(err.to_string())
            }
            InfisicalError::Config(_) => Self::Internal(err.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}
