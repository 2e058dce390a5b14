use thiserror::Error;

pub type RpcResult<T> = Result<T, RpcError>;

/// Failures of a call against the catalog service.
///
/// `Remote` carries the backend's own message untouched; callers decide how
/// much of it to expose.
#[derive(Error, Debug)]
pub enum RpcError {
    #[error("cannot reach catalog service at {addr}: {reason}")]
    Connect { addr: String, reason: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("catalog service answered with HTTP {status}")]
    Status { status: u16 },

    #[error("{message}")]
    Remote { code: i64, message: String },

    #[error("malformed response from catalog service: {0}")]
    Protocol(String),
}

impl RpcError {
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol(message.into())
    }
}
