//! JSON-RPC 2.0 wire types used to talk to the catalog service.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const JSONRPC_VERSION: &str = "2.0";

/// Remote method names, one per catalog operation.
pub mod methods {
    pub const LIST_BOOKS: &str = "books.list";
    pub const GET_BOOK: &str = "books.get";
    pub const CREATE_BOOK: &str = "books.create";
    pub const UPDATE_BOOK: &str = "books.update";
    pub const DELETE_BOOK: &str = "books.delete";

    pub const LIST_CATEGORIES: &str = "categories.list";
    pub const GET_CATEGORY: &str = "categories.get";
    pub const CREATE_CATEGORY: &str = "categories.create";
    pub const UPDATE_CATEGORY: &str = "categories.update";
    pub const DELETE_CATEGORY: &str = "categories.delete";
}

/// JSON-RPC 2.0 request
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest<P> {
    pub jsonrpc: String,
    pub id: u64,
    pub method: String,
    pub params: P,
}

impl<P> RpcRequest<P> {
    pub fn new(id: u64, method: &str, params: P) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            method: method.to_string(),
            params,
        }
    }
}

/// JSON-RPC 2.0 response; exactly one of `result` or `error` is set.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorObject>,
}

impl RpcResponse {
    pub fn success(id: u64, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: Some(id),
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: u64, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: Some(id),
            result: None,
            error: Some(ErrorObject {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }
}

/// JSON-RPC 2.0 error object
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}
