use std::fmt;
use std::sync::Arc;

use tracing::warn;

use crate::core::AnalysisResult;
use crate::error::VizResult;

/// Decides whether a chart mode is offered for the loaded result.
///
/// The conditional predicate answers "must this mode be disabled?" and may
/// fail; a failed probe disables the mode rather than surfacing a broken
/// entry in the mode catalog.
#[derive(Clone)]
pub enum ModeAvailability {
    AlwaysEnabled,
    ConditionallyDisabled {
        predicate: Arc<dyn Fn(&AnalysisResult) -> VizResult<bool> + Send + Sync>,
        tooltip: Option<String>,
    },
}

impl ModeAvailability {
    #[must_use]
    pub fn conditionally_disabled(
        predicate: impl Fn(&AnalysisResult) -> VizResult<bool> + Send + Sync + 'static,
        tooltip: impl Into<String>,
    ) -> Self {
        Self::ConditionallyDisabled {
            predicate: Arc::new(predicate),
            tooltip: Some(tooltip.into()),
        }
    }
}

impl fmt::Debug for ModeAvailability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlwaysEnabled => f.write_str("AlwaysEnabled"),
            Self::ConditionallyDisabled { tooltip, .. } => f
                .debug_struct("ConditionallyDisabled")
                .field("predicate", &"<fn>")
                .field("tooltip", tooltip)
                .finish(),
        }
    }
}

/// One selectable chart mode a plugin serves.
#[derive(Debug, Clone)]
pub struct ChartMode {
    pub id: String,
    pub label: String,
    pub icon: String,
    pub availability: ModeAvailability,
}

impl ChartMode {
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            icon: icon.into(),
            availability: ModeAvailability::AlwaysEnabled,
        }
    }

    #[must_use]
    pub fn with_availability(mut self, availability: ModeAvailability) -> Self {
        self.availability = availability;
        self
    }

    /// Evaluates availability against a result.
    ///
    /// A failed predicate logs and reports the mode as disabled.
    #[must_use]
    pub fn is_disabled(&self, result: &AnalysisResult) -> bool {
        match &self.availability {
            ModeAvailability::AlwaysEnabled => false,
            ModeAvailability::ConditionallyDisabled { predicate, .. } => {
                match predicate(result) {
                    Ok(disabled) => disabled,
                    Err(err) => {
                        warn!(mode_id = %self.id, error = %err, "availability predicate failed; disabling mode");
                        true
                    }
                }
            }
        }
    }

    #[must_use]
    pub fn disabled_tooltip(&self) -> Option<&str> {
        match &self.availability {
            ModeAvailability::AlwaysEnabled => None,
            ModeAvailability::ConditionallyDisabled { tooltip, .. } => tooltip.as_deref(),
        }
    }
}

/// Static identity and capability declaration of a plugin.
#[derive(Debug, Clone)]
pub struct PluginManifest {
    pub id: String,
    pub name: String,
    pub description: String,
    pub version: String,
    pub icon: String,
    pub modes: Vec<ChartMode>,
}

impl PluginManifest {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            version: version.into(),
            icon: icon.into(),
            modes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: ChartMode) -> Self {
        self.modes.push(mode);
        self
    }

    #[must_use]
    pub fn mode(&self, mode_id: &str) -> Option<&ChartMode> {
        self.modes.iter().find(|mode| mode.id == mode_id)
    }
}
