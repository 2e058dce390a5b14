use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use gateway_kernel::{InitCtx, Module};
use gateway_rpc::Book;
use serde_json::json;

use crate::api::resource::{self, Catalog};
use crate::modules::openapi;

/// Books module: REST surface for catalog books
pub struct BooksModule {
    catalog: Catalog,
}

impl BooksModule {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ctx.settings.environment.as_str(),
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        resource::router::<Book>(self.catalog.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(openapi::resource_fragment::<Book>(
            "Books",
            "Book",
            json!({
                "type": "object",
                "properties": {
                    "id": {
                        "type": "integer",
                        "format": "int32",
                        "description": "Server-assigned identifier; omit or send 0 on create"
                    },
                    "title": {
                        "type": "string",
                        "description": "Title of the book"
                    },
                    "author": {
                        "type": "string",
                        "description": "Author of the book"
                    },
                    "category_id": {
                        "type": "integer",
                        "format": "int32",
                        "description": "Category the book is filed under"
                    },
                    "description": {
                        "type": "string"
                    }
                },
                "required": ["title", "author", "category_id"]
            }),
        ))
    }
}

/// Create a new instance of the books module
pub fn create_module(catalog: Catalog) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(catalog))
}
