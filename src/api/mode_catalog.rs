use tracing::warn;

use crate::plugins::PluginRegistry;

use super::ChartView;

/// Catalog entry describing one selectable chart mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeStatus {
    pub id: String,
    pub label: String,
    pub icon: String,
    pub enabled: bool,
    pub tooltip: Option<String>,
    pub selected: bool,
}

impl ChartView {
    /// Catalog of the view's enabled modes with per-result availability.
    ///
    /// A mode whose plugin has vanished from the registry stays listed but
    /// disabled, so stored configs keep rendering a stable picker.
    #[must_use]
    pub fn mode_catalog(&self, registry: &PluginRegistry) -> Vec<ModeStatus> {
        self.enabled_modes
            .iter()
            .map(|mode_id| match registry.mode(mode_id) {
                Some(mode) => {
                    let disabled = mode.is_disabled(&self.result);
                    ModeStatus {
                        id: mode.id.clone(),
                        label: mode.label.clone(),
                        icon: mode.icon.clone(),
                        enabled: !disabled,
                        tooltip: disabled
                            .then(|| mode.disabled_tooltip().map(str::to_owned))
                            .flatten(),
                        selected: *mode_id == self.selected_mode,
                    }
                }
                None => {
                    warn!(mode_id = %mode_id, "enabled mode has no registered plugin");
                    ModeStatus {
                        id: mode_id.clone(),
                        label: mode_id.clone(),
                        icon: String::new(),
                        enabled: false,
                        tooltip: Some("No plugin serves this chart mode".to_owned()),
                        selected: *mode_id == self.selected_mode,
                    }
                }
            })
            .collect()
    }

    /// Selects a mode from the enabled lineup. Unknown ids are ignored with
    /// a logged warning and leave the selection unchanged.
    pub fn select_mode(&mut self, mode_id: &str) -> bool {
        if self.enabled_modes.iter().any(|mode| mode == mode_id) {
            self.selected_mode = mode_id.to_owned();
            true
        } else {
            warn!(mode_id, "ignoring selection of unknown chart mode");
            false
        }
    }
}
