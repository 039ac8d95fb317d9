//! 统一的 API 错误类型：始终以 `{success: false, message}` 响应。

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::provider::ProviderError;
use crate::session::SessionError;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    Conflict(String),
    BadGateway(String),
    GatewayTimeout(String),
    Internal(String),
}

impl ApiError {
    fn status_and_message(self) -> (StatusCode, String) {
        match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
            ApiError::GatewayTimeout(msg) => (StatusCode::GATEWAY_TIMEOUT, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (status, Json(json!({ "success": false, "message": message }))).into_response()
    }
}

impl From<SessionError> for ApiError {
    fn from(error: SessionError) -> Self {
        let message = error.to_string();
        match error {
            SessionError::MalformedInput(_) => ApiError::BadRequest(message),
            SessionError::InvalidCredentials | SessionError::NotLoggedIn => {
                ApiError::Unauthorized(message)
            }
            SessionError::NotInitialized => ApiError::Conflict(message),
            SessionError::Provider(ProviderError::Timeout) => ApiError::GatewayTimeout(message),
            SessionError::ProviderUnavailable
            | SessionError::CreationFailed
            | SessionError::Provider(_) => ApiError::BadGateway(message),
            SessionError::QrRender(_) => ApiError::Internal(message),
        }
    }
}
