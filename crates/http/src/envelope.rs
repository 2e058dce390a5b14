//! The JSON envelope every gateway endpoint answers with.
//!
//! ```json
//! { "code": 200, "message": "OK", "data": { ... } }
//! { "code": 500, "message": "error creating book", "error": "..." }
//! ```

use std::fmt::Display;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Response envelope; exactly one of `data` or `error` is populated.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    #[serde(skip)]
    status: StatusCode,
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    /// Wrap a successful payload.
    pub fn success(status: StatusCode, message: impl Into<String>, data: T) -> Self {
        Self {
            status,
            code: status.as_u16(),
            message: message.into(),
            data: Some(data),
            error: None,
        }
    }
}

impl Envelope<()> {
    /// Wrap an error; its `Display` output becomes the `error` field.
    pub fn failure(status: StatusCode, message: impl Into<String>, err: impl Display) -> Self {
        Self {
            status,
            code: status.as_u16(),
            message: message.into(),
            data: None,
            error: Some(err.to_string()),
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}
