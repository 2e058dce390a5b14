//! Error handling for the gateway HTTP layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use uuid::Uuid;

use crate::envelope::Envelope;

/// Failures a handler can end a request with.
///
/// `message` is the operation-level text placed in the envelope; `detail` is
/// the underlying error, forwarded to the caller unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// A path or query parameter could not be parsed.
    ///
    /// Answered with 500 rather than 400 to keep the established API contract.
    #[error("{message}: {detail}")]
    Parse { message: String, detail: String },

    /// The request body could not be decoded into the expected shape.
    #[error("{message}: {detail}")]
    Decode { message: String, detail: String },

    /// The catalog service call failed.
    #[error("{message}: {detail}")]
    Remote { message: String, detail: String },
}

impl GatewayError {
    pub fn parse(message: impl Into<String>, err: impl ToString) -> Self {
        Self::Parse {
            message: message.into(),
            detail: err.to_string(),
        }
    }

    pub fn decode(message: impl Into<String>, err: impl ToString) -> Self {
        Self::Decode {
            message: message.into(),
            detail: err.to_string(),
        }
    }

    pub fn remote(message: impl Into<String>, err: impl ToString) -> Self {
        Self::Remote {
            message: message.into(),
            detail: err.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::Parse { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::Decode { .. } => StatusCode::BAD_REQUEST,
            GatewayError::Remote { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            GatewayError::Parse { .. } => "parse",
            GatewayError::Decode { .. } => "decode",
            GatewayError::Remote { .. } => "remote",
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let error_id = Uuid::new_v4();
        let status = self.status();
        let kind = self.kind();

        let (message, detail) = match self {
            GatewayError::Parse { message, detail }
            | GatewayError::Decode { message, detail }
            | GatewayError::Remote { message, detail } => (message, detail),
        };

        if status.is_server_error() {
            tracing::error!(
                error_id = %error_id,
                kind,
                status_code = status.as_u16(),
                %detail,
                "{message}"
            );
        } else {
            tracing::warn!(
                error_id = %error_id,
                kind,
                status_code = status.as_u16(),
                %detail,
                "{message}"
            );
        }

        Envelope::failure(status, message, detail).into_response()
    }
}
