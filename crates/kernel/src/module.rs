use async_trait::async_trait;
use axum::Router;

/// Context provided to modules during initialization
pub struct InitCtx<'a> {
    pub settings: &'a crate::settings::Settings,
}

/// A unit of the gateway that contributes routes and API documentation.
///
/// Dependencies such as the backend client are handed to a module when it is
/// constructed, so the trait itself stays free of domain types.
#[async_trait]
pub trait Module: Sync + Send {
    /// Unique name for this module, also the path segment it is mounted under
    fn name(&self) -> &'static str;

    /// Initialize the module with the provided context
    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Return the Axum router for this module's routes
    /// Routes will be mounted under `/v1/{module_name}`
    fn routes(&self) -> Router {
        Router::new()
    }

    /// Return OpenAPI specification fragment for this module as JSON
    /// Will be merged with other modules' specs
    fn openapi(&self) -> Option<serde_json::Value> {
        None
    }

    /// Called once the HTTP listener is about to accept connections
    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Called during graceful shutdown
    async fn stop(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
