// rest_api/src/errors.rs

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    extract::{FromRequest, FromRequestParts},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use models::errors::{ErrorKind, HostelError};
use security::AuthError;

#[derive(Debug, Error)]
pub enum RestApiError {
    #[error(transparent)]
    Hostel(#[from] HostelError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("No route for {0}")]
    RouteNotFound(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("JSON serialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}

impl RestApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RestApiError::Hostel(e) => e.kind(),
            RestApiError::Auth(e) => e.kind(),
            RestApiError::InvalidInput(_) => ErrorKind::Validation,
            RestApiError::RouteNotFound(_) => ErrorKind::NotFound,
            RestApiError::Config(_) | RestApiError::SerdeJson(_) => ErrorKind::Server,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Authentication => StatusCode::UNAUTHORIZED,
            ErrorKind::Authorization => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Server => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for RestApiError {
    fn from(rejection: JsonRejection) -> Self {
        RestApiError::InvalidInput(rejection.body_text())
    }
}

impl From<QueryRejection> for RestApiError {
    fn from(rejection: QueryRejection) -> Self {
        RestApiError::InvalidInput(rejection.body_text())
    }
}

impl From<PathRejection> for RestApiError {
    fn from(rejection: PathRejection) -> Self {
        RestApiError::InvalidInput(rejection.body_text())
    }
}

impl IntoResponse for RestApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            error!("Request failed with an internal error: {}", self);
            "Internal server error".to_string()
        } else {
            self.to_string()
        };
        (status, Json(json!({ "ok": false, "error": message }))).into_response()
    }
}

/// `axum::Json` whose rejections render in the error envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(RestApiError))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Query` whose rejections render in the error envelope.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(RestApiError))]
pub struct ApiQuery<T>(pub T);

/// `axum::extract::Path` whose rejections render in the error envelope.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(RestApiError))]
pub struct ApiPath<T>(pub T);
