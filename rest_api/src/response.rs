// rest_api/src/response.rs
//
// Success half of the `{ "ok": ... }` envelope. Failures are rendered by
// `RestApiError`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{Map, Value};

use models::errors::HostelError;

use crate::errors::RestApiError;

#[derive(Debug)]
pub struct ApiResponse<T> {
    status: StatusCode,
    key: Option<&'static str>,
    payload: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// `{ "ok": true, "<key>": payload }` with 200.
    pub fn ok(key: &'static str, payload: T) -> Self {
        Self { status: StatusCode::OK, key: Some(key), payload }
    }

    /// `{ "ok": true, "<key>": payload }` with 201.
    pub fn created(key: &'static str, payload: T) -> Self {
        Self { status: StatusCode::CREATED, key: Some(key), payload }
    }

    /// Merges the fields of `payload`, which must serialize to an object,
    /// next to `"ok": true`.
    pub fn fields(payload: T) -> Self {
        Self { status: StatusCode::OK, key: None, payload }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    fn into_body(self) -> Result<Map<String, Value>, RestApiError> {
        let mut body = Map::new();
        body.insert("ok".to_string(), Value::Bool(true));
        let payload = serde_json::to_value(&self.payload)?;
        match (self.key, payload) {
            (Some(key), value) => {
                body.insert(key.to_string(), value);
            }
            (None, Value::Object(fields)) => body.extend(fields),
            (None, other) => {
                return Err(HostelError::InternalError(format!("response payload must be an object, got {}", other)).into())
            }
        }
        Ok(body)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status;
        match self.into_body() {
            Ok(body) => (status, Json(Value::Object(body))).into_response(),
            Err(e) => e.into_response(),
        }
    }
}
