use async_trait::async_trait;

use crate::error::RpcResult;
use crate::types::{Book, Category, Id, ListQuery};

/// Operations exposed by the remote catalog service.
///
/// Implementations must be safe to share across concurrent requests. A call
/// is cancelled by dropping its future; implementations must not keep work
/// running in the background once that happens.
#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn list_books(&self, query: ListQuery) -> RpcResult<Vec<Book>>;
    async fn get_book(&self, id: Id) -> RpcResult<Book>;
    async fn create_book(&self, book: Book) -> RpcResult<Book>;
    async fn update_book(&self, book: Book) -> RpcResult<Book>;
    async fn delete_book(&self, id: Id) -> RpcResult<Id>;

    async fn list_categories(&self, query: ListQuery) -> RpcResult<Vec<Category>>;
    async fn get_category(&self, id: Id) -> RpcResult<Category>;
    async fn create_category(&self, category: Category) -> RpcResult<Category>;
    async fn update_category(&self, category: Category) -> RpcResult<Category>;
    async fn delete_category(&self, id: Id) -> RpcResult<Id>;
}
