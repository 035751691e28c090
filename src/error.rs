//! Typed errors and HTTP mapping.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {var}: '{value}'")]
    InvalidValue { var: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("password hashing: {0}")]
    Password(String),
    #[error("request timed out")]
    Timeout,
    #[error("request body too large")]
    PayloadTooLarge,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub message: String,
    pub code: &'static str,
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Db(_) => (StatusCode::INTERNAL_SERVER_ERROR, "database_error"),
            AppError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
            AppError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "unauthorized"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::Password(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
            AppError::Timeout => (StatusCode::REQUEST_TIMEOUT, "timeout"),
            AppError::PayloadTooLarge => (StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        // Server-side failures keep their detail in the log only.
        let message = if status.is_server_error() {
            tracing::error!(error = %self, code, "request failed");
            "Server error".to_string()
        } else {
            self.to_string()
        };
        (status, Json(ErrorBody { message, code })).into_response()
    }
}

/// Replace the bodies middleware writes on its own (timeout, body limit) with the JSON error shape.
pub async fn json_middleware_errors(resp: Response) -> Response {
    let is_json = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"));
    if is_json {
        return resp;
    }
    match resp.status() {
        StatusCode::REQUEST_TIMEOUT => AppError::Timeout.into_response(),
        StatusCode::PAYLOAD_TOO_LARGE => AppError::PayloadTooLarge.into_response(),
        _ => resp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn db_error_hides_detail() {
        let resp = AppError::Db(sqlx::Error::PoolTimedOut).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(resp).await;
        assert_eq!(body["message"], "Server error");
        assert_eq!(body["code"], "database_error");
    }

    #[tokio::test]
    async fn unauthorized_keeps_message() {
        let resp = AppError::Unauthorized("Incorrect email or password".into()).into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(resp).await;
        assert_eq!(body["message"], "Incorrect email or password");
    }

    #[tokio::test]
    async fn plain_timeout_becomes_json() {
        let plain = StatusCode::REQUEST_TIMEOUT.into_response();
        let resp = json_middleware_errors(plain).await;
        assert_eq!(resp.status(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(body_json(resp).await["code"], "timeout");
    }

    #[tokio::test]
    async fn json_bodies_pass_through() {
        let resp = json_middleware_errors(AppError::BadRequest("x".into()).into_response()).await;
        assert_eq!(body_json(resp).await["message"], "bad request: x");
    }

    #[test]
    fn bad_request_maps_to_400() {
        let (status, code) = AppError::BadRequest("invalid id".into()).status_and_code();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "bad_request");
    }
}
