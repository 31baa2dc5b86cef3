use std::sync::Arc;

use indexmap::IndexMap;
use tracing::warn;

use crate::error::{VizError, VizResult};
use crate::plugins::{ChartMode, ChartPlugin};
use crate::validation::validate_plugin;

/// Registry of chart plugins keyed by plugin id, with a mode index on top.
///
/// Iteration order is registration order for both plugins and modes. A
/// re-registered plugin id overwrites the previous entry; a mode id claimed
/// by a second plugin is remapped to the newcomer. Both cases log, neither
/// fails.
#[derive(Clone, Default)]
pub struct PluginRegistry {
    plugins: IndexMap<String, Arc<dyn ChartPlugin>>,
    modes: IndexMap<String, String>,
    strict: bool,
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("plugins", &self.plugins.keys().collect::<Vec<_>>())
            .field("modes", &self.modes)
            .field("strict", &self.strict)
            .finish()
    }
}

impl PluginRegistry {
    /// Lenient registry: invalid plugins are admitted with a logged warning.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Strict registry: invalid plugins are rejected at registration.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }

    /// Validates and registers a plugin under its manifest id.
    ///
    /// Validation warnings are logged in both policies. Errors reject the
    /// plugin in strict mode and leave the registry untouched; in lenient
    /// mode the plugin is admitted anyway so a single bad manifest cannot
    /// take the chart picker down.
    pub fn register(&mut self, plugin: Arc<dyn ChartPlugin>) -> VizResult<()> {
        let manifest = plugin.manifest();
        let report = validate_plugin(plugin.as_ref());

        for issue in &report.warnings {
            warn!(
                plugin_id = %manifest.id,
                code = %issue.code,
                "plugin validation warning: {}",
                issue.message
            );
        }

        if !report.is_valid() {
            if self.strict {
                return Err(VizError::PluginRejected {
                    plugin_id: manifest.id,
                    details: report.format(),
                });
            }
            warn!(
                plugin_id = %manifest.id,
                "registering plugin despite validation errors:\n{}",
                report.format()
            );
        }

        if let Some(previous) = self
            .plugins
            .insert(manifest.id.clone(), Arc::clone(&plugin))
        {
            warn!(
                plugin_id = %manifest.id,
                previous_version = %previous.manifest().version,
                new_version = %manifest.version,
                "plugin id re-registered; previous entry replaced"
            );
            // Modes the new version no longer declares must stop routing here.
            self.modes.retain(|_, owner| owner != &manifest.id);
        }

        for mode in &manifest.modes {
            if mode.id.trim().is_empty() {
                continue;
            }
            if let Some(previous_owner) = self
                .modes
                .insert(mode.id.clone(), manifest.id.clone())
            {
                if previous_owner != manifest.id {
                    warn!(
                        mode_id = %mode.id,
                        previous_plugin = %previous_owner,
                        new_plugin = %manifest.id,
                        "chart mode remapped to a newer plugin"
                    );
                }
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn get(&self, plugin_id: &str) -> Option<Arc<dyn ChartPlugin>> {
        self.plugins.get(plugin_id).cloned()
    }

    #[must_use]
    pub fn get_by_mode(&self, mode_id: &str) -> Option<Arc<dyn ChartPlugin>> {
        let plugin_id = self.modes.get(mode_id)?;
        self.plugins.get(plugin_id).cloned()
    }

    /// Registered plugins in registration order.
    #[must_use]
    pub fn all(&self) -> Vec<Arc<dyn ChartPlugin>> {
        self.plugins.values().cloned().collect()
    }

    /// Mode ids in registration order.
    #[must_use]
    pub fn mode_ids(&self) -> Vec<String> {
        self.modes.keys().cloned().collect()
    }

    /// Every registered mode declaration, in registration order.
    #[must_use]
    pub fn all_modes(&self) -> Vec<ChartMode> {
        self.modes
            .keys()
            .filter_map(|mode_id| self.mode(mode_id))
            .collect()
    }

    /// Resolves a mode declaration through its owning plugin's manifest.
    #[must_use]
    pub fn mode(&self, mode_id: &str) -> Option<ChartMode> {
        let plugin = self.get_by_mode(mode_id)?;
        plugin.manifest().mode(mode_id).cloned()
    }

    #[must_use]
    pub fn has_mode(&self, mode_id: &str) -> bool {
        self.modes.contains_key(mode_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    pub fn clear(&mut self) {
        self.plugins.clear();
        self.modes.clear();
    }
}
