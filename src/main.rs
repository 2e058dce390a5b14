use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use catalog_gateway::api::resource::{Catalog, SharedService};
use gateway_kernel::{settings::Settings, InitCtx};
use gateway_rpc::RpcClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("failed to load gateway settings")?;
    gateway_telemetry::init(&settings)?;

    tracing::info!(
        env = settings.environment.as_str(),
        service = %settings.service_addr(),
        "catalog-gateway bootstrap starting"
    );

    // No degraded mode: an unreachable backend aborts startup.
    let client = RpcClient::connect(
        &settings.service_addr(),
        Duration::from_millis(settings.connect_timeout_ms),
    )
    .await
    .context("failed to connect to catalog service")?;
    let service: SharedService = Arc::new(client);

    let registry = catalog_gateway::registry(Catalog::from_settings(service, &settings))?;
    let ctx = InitCtx {
        settings: &settings,
    };
    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    tracing::info!("catalog-gateway bootstrap complete");

    let served = gateway_http::start_server(&registry, &settings, shutdown_signal()).await;
    registry.stop_modules().await?;
    served
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
