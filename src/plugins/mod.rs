//! Chart plugin contract, registry, and the built-in chart modes.
//!
//! Plugins declare their modes through a [`PluginManifest`], render scenes
//! from a [`RenderContext`] snapshot, and are admitted to a
//! [`PluginRegistry`] through structural validation. A process-wide default
//! registry is available for hosts that do not manage their own.

pub mod builtin;
mod context;
mod manifest;
mod registry;

pub use builtin::{
    HIERARCHY_LIST_MODE, HierarchyListPlugin, SCATTER_ALL_MODE, SCATTER_DENSITY_MODE,
    ScatterPlugin, TREEMAP_MODE, TreemapPlugin,
};
pub use context::{ChartPlugin, RenderContext};
pub use manifest::{ChartMode, ModeAvailability, PluginManifest};
pub use registry::PluginRegistry;

use std::sync::{Arc, Mutex, Once, OnceLock, PoisonError};

use tracing::warn;

use crate::error::VizResult;

/// Registers the built-in plugins in presentation order: scatter, treemap,
/// hierarchy list.
pub fn register_builtins(registry: &mut PluginRegistry) -> VizResult<()> {
    registry.register(Arc::new(ScatterPlugin))?;
    registry.register(Arc::new(TreemapPlugin))?;
    registry.register(Arc::new(HierarchyListPlugin))?;
    Ok(())
}

static DEFAULT_REGISTRY: OnceLock<Mutex<PluginRegistry>> = OnceLock::new();
static LOAD_BUILTINS: Once = Once::new();

/// Process-wide lenient registry. Starts empty; call
/// [`ensure_builtins_loaded`] to populate it with the built-in plugins.
#[must_use]
pub fn default_registry() -> &'static Mutex<PluginRegistry> {
    DEFAULT_REGISTRY.get_or_init(|| Mutex::new(PluginRegistry::new()))
}

/// Loads the built-in plugins into the default registry exactly once, no
/// matter how many threads race here.
pub fn ensure_builtins_loaded() {
    LOAD_BUILTINS.call_once(|| {
        let mut registry = default_registry()
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Err(err) = register_builtins(&mut registry) {
            warn!(error = %err, "builtin plugin registration failed");
        }
    });
}
