pub mod books;
pub mod categories;
pub mod openapi;

use gateway_kernel::ModuleRegistry;

use crate::api::resource::Catalog;

/// Register the catalog modules, all sharing one backend handle
pub fn register_all(registry: &mut ModuleRegistry, catalog: Catalog) -> anyhow::Result<()> {
    registry.register(books::create_module(catalog.clone()))?;
    registry.register(categories::create_module(catalog))?;
    Ok(())
}
