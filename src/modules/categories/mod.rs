use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use gateway_kernel::{InitCtx, Module};
use gateway_rpc::Category;
use serde_json::json;

use crate::api::resource::{self, Catalog};
use crate::modules::openapi;

/// Categories module: REST surface for catalog categories
pub struct CategoriesModule {
    catalog: Catalog,
}

impl CategoriesModule {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl Module for CategoriesModule {
    fn name(&self) -> &'static str {
        "categories"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ctx.settings.environment.as_str(),
            "categories module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        resource::router::<Category>(self.catalog.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(openapi::resource_fragment::<Category>(
            "Categories",
            "Category",
            json!({
                "type": "object",
                "properties": {
                    "id": {
                        "type": "integer",
                        "format": "int32"
                    },
                    "name": {
                        "type": "string",
                        "description": "Display name of the category"
                    },
                    "description": {
                        "type": "string"
                    }
                },
                "required": ["name"]
            }),
        ))
    }
}

pub fn create_module(catalog: Catalog) -> Arc<dyn Module> {
    Arc::new(CategoriesModule::new(catalog))
}
