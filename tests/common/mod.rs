//! Call-counting in-memory stand-in for the catalog service.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, Response},
    Router,
};
use catalog_gateway::api::resource::SharedService;
use gateway_kernel::settings::Settings;
use gateway_rpc::{Book, CatalogService, Category, Id, ListQuery, RpcError, RpcResult};
use serde_json::Value;

#[derive(Default)]
struct State {
    next_id: i32,
    books: BTreeMap<i32, Book>,
    categories: BTreeMap<i32, Category>,
    last_query: Option<ListQuery>,
}

/// Sets its flag when dropped, i.e. when the call future is abandoned.
struct CancelGuard<'a>(&'a AtomicBool);

impl Drop for CancelGuard<'_> {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct StubCatalog {
    calls: AtomicUsize,
    cancelled: AtomicBool,
    hang: bool,
    panic: bool,
    failure: Option<String>,
    state: Mutex<State>,
}

impl StubCatalog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Every call fails with a remote error carrying `message`.
    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            failure: Some(message.to_string()),
            ..Self::default()
        })
    }

    /// Every call blocks forever until its future is dropped.
    pub fn hanging() -> Arc<Self> {
        Arc::new(Self {
            hang: true,
            ..Self::default()
        })
    }

    /// Every call panics.
    pub fn panicking() -> Arc<Self> {
        Arc::new(Self {
            panic: true,
            ..Self::default()
        })
    }

    pub fn with_books(books: Vec<Book>) -> Arc<Self> {
        let stub = Self::default();
        {
            let mut state = stub.state.lock().unwrap();
            for book in books {
                state.next_id = state.next_id.max(book.id);
                state.books.insert(book.id, book);
            }
        }
        Arc::new(stub)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn was_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<ListQuery> {
        self.state.lock().unwrap().last_query.clone()
    }

    async fn enter(&self) -> RpcResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.hang {
            let _guard = CancelGuard(&self.cancelled);
            std::future::pending::<()>().await;
        }
        if self.panic {
            panic!("catalog stub exploded");
        }
        match &self.failure {
            Some(message) => Err(RpcError::Remote {
                code: 404,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

fn not_found(kind: &str, id: i32) -> RpcError {
    RpcError::Remote {
        code: 404,
        message: format!("{kind} {id} not found"),
    }
}

fn page<T: Clone>(items: &BTreeMap<i32, T>, query: &ListQuery) -> Vec<T> {
    items
        .values()
        .skip(query.offset.max(0) as usize)
        .take(query.limit.max(0) as usize)
        .cloned()
        .collect()
}

#[async_trait]
impl CatalogService for StubCatalog {
    async fn list_books(&self, query: ListQuery) -> RpcResult<Vec<Book>> {
        self.enter().await?;
        let mut state = self.state.lock().unwrap();
        let books = state
            .books
            .values()
            .filter(|b| b.title.contains(&query.search))
            .skip(query.offset.max(0) as usize)
            .take(query.limit.max(0) as usize)
            .cloned()
            .collect();
        state.last_query = Some(query);
        Ok(books)
    }

    async fn get_book(&self, id: Id) -> RpcResult<Book> {
        self.enter().await?;
        let state = self.state.lock().unwrap();
        state.books.get(&id.id).cloned().ok_or_else(|| not_found("book", id.id))
    }

    async fn create_book(&self, mut book: Book) -> RpcResult<Book> {
        self.enter().await?;
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        book.id = state.next_id;
        state.books.insert(book.id, book.clone());
        Ok(book)
    }

    async fn update_book(&self, book: Book) -> RpcResult<Book> {
        self.enter().await?;
        let mut state = self.state.lock().unwrap();
        if !state.books.contains_key(&book.id) {
            return Err(not_found("book", book.id));
        }
        state.books.insert(book.id, book.clone());
        Ok(book)
    }

    async fn delete_book(&self, id: Id) -> RpcResult<Id> {
        self.enter().await?;
        let mut state = self.state.lock().unwrap();
        state.books.remove(&id.id).map(|_| id).ok_or_else(|| not_found("book", id.id))
    }

    async fn list_categories(&self, query: ListQuery) -> RpcResult<Vec<Category>> {
        self.enter().await?;
        let mut state = self.state.lock().unwrap();
        let categories = page(&state.categories, &query);
        state.last_query = Some(query);
        Ok(categories)
    }

    async fn get_category(&self, id: Id) -> RpcResult<Category> {
        self.enter().await?;
        let state = self.state.lock().unwrap();
        state
            .categories
            .get(&id.id)
            .cloned()
            .ok_or_else(|| not_found("category", id.id))
    }

    async fn create_category(&self, mut category: Category) -> RpcResult<Category> {
        self.enter().await?;
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        category.id = state.next_id;
        state.categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn update_category(&self, category: Category) -> RpcResult<Category> {
        self.enter().await?;
        let mut state = self.state.lock().unwrap();
        if !state.categories.contains_key(&category.id) {
            return Err(not_found("category", category.id));
        }
        state.categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn delete_category(&self, id: Id) -> RpcResult<Id> {
        self.enter().await?;
        let mut state = self.state.lock().unwrap();
        state
            .categories
            .remove(&id.id)
            .map(|_| id)
            .ok_or_else(|| not_found("category", id.id))
    }
}

pub fn book(id: i32, title: &str) -> Book {
    Book {
        id,
        title: title.to_string(),
        author: "Frank Herbert".to_string(),
        category_id: 1,
        description: String::new(),
    }
}

pub fn gateway(stub: &Arc<StubCatalog>) -> Router {
    gateway_with(stub, &Settings::default())
}

pub fn gateway_with(stub: &Arc<StubCatalog>, settings: &Settings) -> Router {
    let service: SharedService = stub.clone();
    catalog_gateway::gateway_router(service, settings).unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn with_body(method: &str, uri: &str, body: impl Into<String>) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.into()))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
