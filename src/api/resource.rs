//! One set of handlers shared by every catalog entity.
//!
//! An entity opts in by implementing [`Resource`], which names it and binds
//! each operation to the matching [`CatalogService`] method.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{extract::State, http::StatusCode, routing::get, Router};
use gateway_http::{Envelope, GatewayError};
use gateway_kernel::settings::Settings;
use gateway_rpc::{Book, CatalogService, Category, Id, ListQuery, RpcResult};
use serde::{de::DeserializeOwned, Serialize};

use super::extract::{JsonBody, ListParams, PathId};

/// Shared handle to the catalog service.
pub type SharedService = Arc<dyn CatalogService>;

/// Router state for every resource: the catalog handle plus the deadline a
/// single call against it may take.
#[derive(Clone)]
pub struct Catalog {
    service: SharedService,
    deadline: Duration,
}

impl Catalog {
    pub fn new(service: SharedService, deadline: Duration) -> Self {
        Self { service, deadline }
    }

    /// Deadline taken from `REQUEST_TIMEOUT_MS`.
    pub fn from_settings(service: SharedService, settings: &Settings) -> Self {
        Self::new(service, Duration::from_millis(settings.request_timeout_ms))
    }

    pub fn service(&self) -> &dyn CatalogService {
        self.service.as_ref()
    }

    /// Await a catalog call under the deadline and wrap its outcome in an
    /// envelope. An expired deadline drops `call`, cancelling the remote
    /// exchange, and is reported like any other failed call.
    async fn forward<R, T, F>(&self, operation: Operation, call: F) -> Result<Envelope<T>, GatewayError>
    where
        R: Resource,
        F: Future<Output = RpcResult<T>>,
    {
        tracing::debug!(resource = R::PLURAL, operation = operation.as_str(), "forwarding to catalog service");

        match tokio::time::timeout(self.deadline, call).await {
            Ok(Ok(data)) => Ok(Envelope::success(
                StatusCode::OK,
                operation.success_message(),
                data,
            )),
            Ok(Err(e)) => Err(GatewayError::remote(operation.failure_message::<R>(), e)),
            Err(elapsed) => {
                tracing::warn!(
                    resource = R::PLURAL,
                    operation = operation.as_str(),
                    deadline_ms = self.deadline.as_millis() as u64,
                    "catalog call timed out"
                );
                Err(GatewayError::remote(operation.failure_message::<R>(), elapsed))
            }
        }
    }
}

/// A catalog entity exposed over REST.
#[async_trait]
pub trait Resource: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Singular noun used in error messages, e.g. `book`
    const SINGULAR: &'static str;
    /// Plural noun, also used as the mount path, e.g. `books`
    const PLURAL: &'static str;

    async fn list(service: &dyn CatalogService, query: ListQuery) -> RpcResult<Vec<Self>>;
    async fn get(service: &dyn CatalogService, id: Id) -> RpcResult<Self>;
    async fn create(service: &dyn CatalogService, entity: Self) -> RpcResult<Self>;
    async fn update(service: &dyn CatalogService, entity: Self) -> RpcResult<Self>;
    async fn delete(service: &dyn CatalogService, id: Id) -> RpcResult<Id>;
}

#[async_trait]
impl Resource for Book {
    const SINGULAR: &'static str = "book";
    const PLURAL: &'static str = "books";

    async fn list(service: &dyn CatalogService, query: ListQuery) -> RpcResult<Vec<Self>> {
        service.list_books(query).await
    }

    async fn get(service: &dyn CatalogService, id: Id) -> RpcResult<Self> {
        service.get_book(id).await
    }

    async fn create(service: &dyn CatalogService, entity: Self) -> RpcResult<Self> {
        service.create_book(entity).await
    }

    async fn update(service: &dyn CatalogService, entity: Self) -> RpcResult<Self> {
        service.update_book(entity).await
    }

    async fn delete(service: &dyn CatalogService, id: Id) -> RpcResult<Id> {
        service.delete_book(id).await
    }
}

#[async_trait]
impl Resource for Category {
    const SINGULAR: &'static str = "category";
    const PLURAL: &'static str = "categories";

    async fn list(service: &dyn CatalogService, query: ListQuery) -> RpcResult<Vec<Self>> {
        service.list_categories(query).await
    }

    async fn get(service: &dyn CatalogService, id: Id) -> RpcResult<Self> {
        service.get_category(id).await
    }

    async fn create(service: &dyn CatalogService, entity: Self) -> RpcResult<Self> {
        service.create_category(entity).await
    }

    async fn update(service: &dyn CatalogService, entity: Self) -> RpcResult<Self> {
        service.update_category(entity).await
    }

    async fn delete(service: &dyn CatalogService, id: Id) -> RpcResult<Id> {
        service.delete_category(id).await
    }
}

/// The five REST operations every resource supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Get => "get",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }

    /// Envelope message on success: `OK` for reads and create, `ok` otherwise.
    pub fn success_message(self) -> &'static str {
        match self {
            Operation::List | Operation::Get | Operation::Create => "OK",
            Operation::Update | Operation::Delete => "ok",
        }
    }

    /// Envelope message when the catalog call fails.
    pub fn failure_message<R: Resource>(self) -> String {
        match self {
            Operation::List => format!("error getting all {}", R::PLURAL),
            Operation::Get => format!("error getting {} by id", R::SINGULAR),
            Operation::Create => format!("error creating {}", R::SINGULAR),
            Operation::Update => format!("error while updating {}", R::SINGULAR),
            Operation::Delete => format!("error while deleting {}", R::SINGULAR),
        }
    }
}

async fn list<R: Resource>(
    State(catalog): State<Catalog>,
    ListParams(query): ListParams,
) -> Result<Envelope<Vec<R>>, GatewayError> {
    catalog
        .forward::<R, _, _>(Operation::List, R::list(catalog.service(), query))
        .await
}

async fn get_by_id<R: Resource>(
    State(catalog): State<Catalog>,
    PathId(id): PathId,
) -> Result<Envelope<R>, GatewayError> {
    catalog
        .forward::<R, _, _>(Operation::Get, R::get(catalog.service(), id))
        .await
}

async fn create<R: Resource>(
    State(catalog): State<Catalog>,
    JsonBody(entity): JsonBody<R>,
) -> Result<Envelope<R>, GatewayError> {
    catalog
        .forward::<R, _, _>(Operation::Create, R::create(catalog.service(), entity))
        .await
}

async fn update<R: Resource>(
    State(catalog): State<Catalog>,
    JsonBody(entity): JsonBody<R>,
) -> Result<Envelope<R>, GatewayError> {
    catalog
        .forward::<R, _, _>(Operation::Update, R::update(catalog.service(), entity))
        .await
}

async fn delete<R: Resource>(
    State(catalog): State<Catalog>,
    PathId(id): PathId,
) -> Result<Envelope<Id>, GatewayError> {
    catalog
        .forward::<R, _, _>(Operation::Delete, R::delete(catalog.service(), id))
        .await
}

/// Routes for one resource, relative to its mount point.
///
/// | Method | Path   | Operation |
/// |--------|--------|-----------|
/// | GET    | `/`     | list      |
/// | POST   | `/`     | create    |
/// | PUT    | `/`     | update    |
/// | GET    | `/{id}` | get       |
/// | DELETE | `/{id}` | delete    |
///
/// Only the exact paths match: `/v1/books/` is a 404, not a redirect.
pub fn router<R: Resource>(catalog: Catalog) -> Router {
    Router::new()
        .route("/", get(list::<R>).post(create::<R>).put(update::<R>))
        .route("/{id}", get(get_by_id::<R>).delete(delete::<R>))
        .with_state(catalog)
}
