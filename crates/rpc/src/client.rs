//! JSON-RPC client for the catalog service.
//!
//! # Responsibilities
//! - Verify the service is reachable once, at startup
//! - Map each catalog operation onto a JSON-RPC method call
//! - Surface transport, status, and remote errors without interpreting them
//!
//! The underlying `reqwest::Client` pools connections, so one `RpcClient`
//! serves every in-flight request concurrently.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::error::{RpcError, RpcResult};
use crate::protocol::{methods, RpcRequest, RpcResponse};
use crate::service::CatalogService;
use crate::types::{Book, Category, Id, ListQuery};

/// Path the catalog service accepts JSON-RPC posts on.
pub const RPC_PATH: &str = "/rpc";

/// Handle to the catalog service, cheap to clone.
#[derive(Clone, Debug)]
pub struct RpcClient {
    http: reqwest::Client,
    endpoint: String,
    next_id: Arc<AtomicU64>,
}

impl RpcClient {
    /// Probe `addr` and build a client for it.
    ///
    /// Fails when no TCP connection can be opened within `connect_timeout`;
    /// the gateway has no degraded mode, so callers treat this as fatal.
    pub async fn connect(addr: &str, connect_timeout: Duration) -> RpcResult<Self> {
        match timeout(connect_timeout, TcpStream::connect(addr)).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => {
                return Err(RpcError::Connect {
                    addr: addr.to_string(),
                    reason: e.to_string(),
                })
            }
            Err(_) => {
                return Err(RpcError::Connect {
                    addr: addr.to_string(),
                    reason: format!("timed out after {}ms", connect_timeout.as_millis()),
                })
            }
        }

        let client = Self::new(addr, connect_timeout)?;
        tracing::info!(endpoint = %client.endpoint, "catalog service reachable");
        Ok(client)
    }

    /// Build a client without probing the service.
    pub fn new(addr: &str, connect_timeout: Duration) -> RpcResult<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .build()?;

        Ok(Self {
            http,
            endpoint: format!("http://{addr}{RPC_PATH}"),
            next_id: Arc::new(AtomicU64::new(1)),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn call<P, R>(&self, method: &'static str, params: P) -> RpcResult<R>
    where
        P: Serialize + Send + Sync,
        R: DeserializeOwned,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(method, id, "calling catalog service");

        let response = self
            .http
            .post(&self.endpoint)
            .json(&RpcRequest::new(id, method, params))
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;

        let envelope: RpcResponse = match serde_json::from_slice(&body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                return Err(RpcError::Status {
                    status: status.as_u16(),
                })
            }
            Err(e) => return Err(RpcError::protocol(format!("invalid JSON-RPC body: {e}"))),
        };

        if let Some(error) = envelope.error {
            tracing::debug!(method, id, code = error.code, "catalog service returned an error");
            return Err(RpcError::Remote {
                code: error.code,
                message: error.message,
            });
        }
        if envelope.id != Some(id) {
            return Err(RpcError::protocol(format!(
                "response id {:?} does not match request id {id}",
                envelope.id
            )));
        }

        let result = envelope
            .result
            .ok_or_else(|| RpcError::protocol("response carries neither result nor error"))?;
        serde_json::from_value(result)
            .map_err(|e| RpcError::protocol(format!("cannot decode {method} result: {e}")))
    }
}

#[async_trait]
impl CatalogService for RpcClient {
    async fn list_books(&self, query: ListQuery) -> RpcResult<Vec<Book>> {
        self.call(methods::LIST_BOOKS, query).await
    }

    async fn get_book(&self, id: Id) -> RpcResult<Book> {
        self.call(methods::GET_BOOK, id).await
    }

    async fn create_book(&self, book: Book) -> RpcResult<Book> {
        self.call(methods::CREATE_BOOK, book).await
    }

    async fn update_book(&self, book: Book) -> RpcResult<Book> {
        self.call(methods::UPDATE_BOOK, book).await
    }

    async fn delete_book(&self, id: Id) -> RpcResult<Id> {
        self.call(methods::DELETE_BOOK, id).await
    }

    async fn list_categories(&self, query: ListQuery) -> RpcResult<Vec<Category>> {
        self.call(methods::LIST_CATEGORIES, query).await
    }

    async fn get_category(&self, id: Id) -> RpcResult<Category> {
        self.call(methods::GET_CATEGORY, id).await
    }

    async fn create_category(&self, category: Category) -> RpcResult<Category> {
        self.call(methods::CREATE_CATEGORY, category).await
    }

    async fn update_category(&self, category: Category) -> RpcResult<Category> {
        self.call(methods::UPDATE_CATEGORY, category).await
    }

    async fn delete_category(&self, id: Id) -> RpcResult<Id> {
        self.call(methods::DELETE_CATEGORY, id).await
    }
}
