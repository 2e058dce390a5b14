//! Drives `RpcClient` against an in-process JSON-RPC catalog backend.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use gateway_rpc::protocol::{methods, RpcRequest, RpcResponse};
use gateway_rpc::{Book, CatalogService, Category, Id, ListQuery, RpcClient, RpcError};
use serde_json::{json, Value};

#[derive(Default)]
struct Store {
    next_id: i32,
    books: BTreeMap<i32, Book>,
    categories: BTreeMap<i32, Category>,
}

type SharedStore = Arc<Mutex<Store>>;

fn not_found(id: u64, kind: &str, key: i32) -> RpcResponse {
    RpcResponse::failure(id, 404, format!("{kind} {key} not found"))
}

fn dispatch(store: &SharedStore, request: RpcRequest<Value>) -> RpcResponse {
    let mut store = store.lock().unwrap();
    let id = request.id;
    let params = request.params;

    match request.method.as_str() {
        methods::LIST_BOOKS => {
            let query: ListQuery = serde_json::from_value(params).unwrap();
            let books: Vec<&Book> = store
                .books
                .values()
                .filter(|b| b.title.contains(&query.search))
                .skip(query.offset as usize)
                .take(query.limit as usize)
                .collect();
            RpcResponse::success(id, json!(books))
        }
        methods::GET_BOOK => {
            let key: Id = serde_json::from_value(params).unwrap();
            match store.books.get(&key.id) {
                Some(book) => RpcResponse::success(id, json!(book)),
                None => not_found(id, "book", key.id),
            }
        }
        methods::CREATE_BOOK => {
            let mut book: Book = serde_json::from_value(params).unwrap();
            store.next_id += 1;
            book.id = store.next_id;
            store.books.insert(book.id, book.clone());
            RpcResponse::success(id, json!(book))
        }
        methods::DELETE_BOOK => {
            let key: Id = serde_json::from_value(params).unwrap();
            match store.books.remove(&key.id) {
                Some(_) => RpcResponse::success(id, json!(key)),
                None => not_found(id, "book", key.id),
            }
        }
        methods::CREATE_CATEGORY => {
            let mut category: Category = serde_json::from_value(params).unwrap();
            store.next_id += 1;
            category.id = store.next_id;
            store.categories.insert(category.id, category.clone());
            RpcResponse::success(id, json!(category))
        }
        methods::UPDATE_CATEGORY => {
            let category: Category = serde_json::from_value(params).unwrap();
            if !store.categories.contains_key(&category.id) {
                return not_found(id, "category", category.id);
            }
            store.categories.insert(category.id, category.clone());
            RpcResponse::success(id, json!(category))
        }
        other => RpcResponse::failure(id, -32601, format!("method {other} not found")),
    }
}

async fn rpc(State(store): State<SharedStore>, Json(request): Json<RpcRequest<Value>>) -> Json<RpcResponse> {
    Json(dispatch(&store, request))
}

async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

async fn catalog_client() -> RpcClient {
    let store = SharedStore::default();
    let router = Router::new().route("/rpc", post(rpc)).with_state(store);
    let addr = spawn_backend(router).await;
    RpcClient::connect(&addr, Duration::from_secs(2)).await.unwrap()
}

fn dune() -> Book {
    Book {
        id: 0,
        title: "Dune".to_string(),
        author: "Frank Herbert".to_string(),
        category_id: 1,
        description: "Desert planet".to_string(),
    }
}

#[tokio::test]
async fn created_book_can_be_fetched_by_returned_id() {
    let client = catalog_client().await;

    let created = client.create_book(dune()).await.unwrap();
    assert_ne!(created.id, 0);

    let fetched = client.get_book(Id::from(created.id)).await.unwrap();
    assert_eq!(fetched, Book { id: created.id, ..dune() });
}

#[tokio::test]
async fn list_passes_search_and_pagination_through() {
    let client = catalog_client().await;
    for title in ["Dune", "Dune Messiah", "Children of Dune", "Hyperion"] {
        client
            .create_book(Book {
                title: title.to_string(),
                ..dune()
            })
            .await
            .unwrap();
    }

    let page = client
        .list_books(ListQuery {
            search: "Dune".to_string(),
            limit: 2,
            offset: 1,
        })
        .await
        .unwrap();

    let titles: Vec<_> = page.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["Dune Messiah", "Children of Dune"]);
}

#[tokio::test]
async fn remote_error_message_is_passed_through() {
    let client = catalog_client().await;

    let err = client.delete_book(Id::from(42)).await.unwrap_err();
    match err {
        RpcError::Remote { code, message } => {
            assert_eq!(code, 404);
            assert_eq!(message, "book 42 not found");
        }
        other => panic!("expected remote error, got {other:?}"),
    }
}

#[tokio::test]
async fn delete_returns_the_identifier() {
    let client = catalog_client().await;
    let created = client.create_book(dune()).await.unwrap();

    let deleted = client.delete_book(Id::from(created.id)).await.unwrap();
    assert_eq!(deleted.id, created.id);
    assert!(client.get_book(deleted).await.is_err());
}

#[tokio::test]
async fn category_update_round_trips() {
    let client = catalog_client().await;
    let created = client
        .create_category(Category {
            id: 0,
            name: "Sci-Fi".to_string(),
            description: String::new(),
        })
        .await
        .unwrap();

    let renamed = Category {
        name: "Science Fiction".to_string(),
        ..created
    };
    let first = client.update_category(renamed.clone()).await.unwrap();
    let second = client.update_category(renamed.clone()).await.unwrap();
    assert_eq!(first, renamed);
    assert_eq!(first, second);
}

#[tokio::test]
async fn concurrent_calls_share_one_client() {
    let client = catalog_client().await;

    let handles: Vec<_> = (0..16)
        .map(|n| {
            let client = client.clone();
            tokio::spawn(async move {
                client
                    .create_book(Book {
                        title: format!("Volume {n}"),
                        ..dune()
                    })
                    .await
            })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap().unwrap().id);
    }
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 16);
}

#[tokio::test]
async fn non_json_failure_maps_to_status_error() {
    let router = Router::new().route(
        "/rpc",
        post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
    );
    let addr = spawn_backend(router).await;
    let client = RpcClient::connect(&addr, Duration::from_secs(2)).await.unwrap();

    let err = client.list_categories(ListQuery::default()).await.unwrap_err();
    assert!(matches!(err, RpcError::Status { status: 503 }), "got {err:?}");
}

#[tokio::test]
async fn mismatched_response_id_is_a_protocol_error() {
    let router = Router::new().route(
        "/rpc",
        post(|| async { Json(RpcResponse::success(999_999, json!({"id": 1}))) }),
    );
    let addr = spawn_backend(router).await;
    let client = RpcClient::connect(&addr, Duration::from_secs(2)).await.unwrap();

    let err = client.get_category(Id::from(1)).await.unwrap_err();
    assert!(matches!(err, RpcError::Protocol(_)), "got {err:?}");
}
