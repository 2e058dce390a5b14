//! Catalog gateway application library
//!
//! Wires the catalog service adapter into resource modules and exposes the
//! assembled router so it can be driven without a network listener.

#![recursion_limit = "256"]

pub mod api;
pub mod modules;

use anyhow::Context;
use axum::Router;
use gateway_kernel::{settings::Settings, ModuleRegistry};

use crate::api::resource::{Catalog, SharedService};

/// Build a registry holding every catalog module.
pub fn registry(catalog: Catalog) -> anyhow::Result<ModuleRegistry> {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, catalog).context("failed to register modules")?;
    Ok(registry)
}

/// The full gateway router for `service`.
pub fn gateway_router(service: SharedService, settings: &Settings) -> anyhow::Result<Router> {
    let registry = registry(Catalog::from_settings(service, settings))?;
    Ok(gateway_http::build_router(&registry))
}
