//! Client adapter for the remote catalog service.
//!
//! [`CatalogService`] is the seam the HTTP layer talks to; [`RpcClient`] is
//! the production implementation speaking JSON-RPC 2.0 over HTTP.

pub mod client;
pub mod error;
pub mod protocol;
pub mod service;
pub mod types;

pub use client::RpcClient;
pub use error::{RpcError, RpcResult};
pub use service::CatalogService;
pub use types::{Book, Category, Id, ListQuery};
