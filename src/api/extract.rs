//! Extractors that reject with a gateway envelope.
//!
//! Rejection happens before the handler body runs, so a request that fails
//! here never reaches the catalog service.

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
};
use gateway_http::GatewayError;
use gateway_rpc::{Id, ListQuery};
use serde::de::DeserializeOwned;

use super::params::{first_values, parse_int_param, parse_list_query};

pub const ID_PARSE_FAILED: &str = "error while getting id";
pub const QUERY_PARSE_FAILED: &str = "error while parsing query params";
pub const BODY_DECODE_FAILED: &str = "error while binding json";

/// The `{id}` path segment as an [`Id`].
#[derive(Debug, Clone, Copy)]
pub struct PathId(pub Id);

impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = GatewayError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| GatewayError::parse(ID_PARSE_FAILED, rejection.body_text()))?;

        let id = parse_int_param(&raw, "id").map_err(|e| GatewayError::parse(ID_PARSE_FAILED, e))?;
        Ok(PathId(Id::from(id)))
    }
}

/// `search`, `limit` and `offset` query parameters as a [`ListQuery`]. A key
/// given more than once takes its first value.
#[derive(Debug, Clone)]
pub struct ListParams(pub ListQuery);

impl<S> FromRequestParts<S> for ListParams
where
    S: Send + Sync,
{
    type Rejection = GatewayError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| GatewayError::parse(QUERY_PARSE_FAILED, rejection.body_text()))?;

        let query = parse_list_query(&first_values(pairs))
            .map_err(|e| GatewayError::parse(QUERY_PARSE_FAILED, e))?;
        Ok(ListParams(query))
    }
}

/// A JSON request body decoded into `T`.
///
/// Unlike `axum::Json` this does not insist on a `Content-Type` header; any
/// body that fails to decode, including one missing required fields, is a
/// 400.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = GatewayError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| GatewayError::decode(BODY_DECODE_FAILED, rejection.body_text()))?;

        let value =
            serde_json::from_slice(&bytes).map_err(|e| GatewayError::decode(BODY_DECODE_FAILED, e))?;
        Ok(JsonBody(value))
    }
}
