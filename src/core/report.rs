use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{VizError, VizResult};

pub type ArgumentId = String;
pub type ClusterId = String;

/// Free-form attribute payload attached to an argument.
///
/// The analysis pipeline emits attributes as raw JSON scalars; categorical
/// filtering compares display forms, numeric filtering parses them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Number(f64),
    Bool(bool),
    Text(String),
}

impl AttributeValue {
    /// Display form used for categorical comparison and labels.
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Text(value) => value.clone(),
            Self::Bool(value) => value.to_string(),
            Self::Number(value) => format_attribute_number(*value),
        }
    }

    /// Numeric interpretation, `None` for blank or non-numeric content.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => value.is_finite().then_some(*value),
            Self::Text(value) => value.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            Self::Bool(_) => None,
        }
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(value) if value.trim().is_empty())
    }
}

fn format_attribute_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// One extracted opinion, plotted at `(x, y)` and assigned to one cluster per
/// hierarchy level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    pub arg_id: ArgumentId,
    #[serde(rename = "argument")]
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub cluster_ids: Vec<ClusterId>,
    #[serde(default)]
    pub attributes: IndexMap<String, AttributeValue>,
}

impl Argument {
    #[must_use]
    pub fn new(
        arg_id: impl Into<ArgumentId>,
        text: impl Into<String>,
        x: f64,
        y: f64,
        cluster_ids: Vec<ClusterId>,
    ) -> Self {
        Self {
            arg_id: arg_id.into(),
            text: text.into(),
            x,
            y,
            cluster_ids,
            attributes: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: AttributeValue) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }
}

/// A labeled group of arguments at one hierarchy level.
///
/// `parent` links to the cluster one level up; roots (level 1) have none.
/// `density_rank_percentile` is only meaningful at the deepest level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub id: ClusterId,
    pub level: u32,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub parent: Option<ClusterId>,
    pub label: String,
    #[serde(default)]
    pub takeaway: String,
    pub value: f64,
    #[serde(default)]
    pub density_rank_percentile: f64,
}

impl Cluster {
    #[must_use]
    pub fn new(id: impl Into<ClusterId>, level: u32, label: impl Into<String>, value: f64) -> Self {
        Self {
            id: id.into(),
            level,
            parent: None,
            label: label.into(),
            takeaway: String::new(),
            value,
            density_rank_percentile: 0.0,
        }
    }

    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<ClusterId>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    #[must_use]
    pub fn with_takeaway(mut self, takeaway: impl Into<String>) -> Self {
        self.takeaway = takeaway.into();
        self
    }

    #[must_use]
    pub fn with_density_rank(mut self, percentile: f64) -> Self {
        self.density_rank_percentile = percentile;
        self
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

// The upstream pipeline encodes "no parent" as an empty string.
fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<ClusterId>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|id| !id.is_empty()))
}

/// Chart selection supplied by the report configuration collaborator.
///
/// References modes by id; validated against the live plugin registry before
/// use, with a fixed fallback when invalid or absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisualizationConfig {
    #[serde(default)]
    pub enabled_charts: Vec<String>,
    #[serde(default)]
    pub default_chart: Option<String>,
    #[serde(default)]
    pub chart_order: Option<Vec<String>>,
    /// Opaque per-mode parameters, passed through to the owning plugin.
    #[serde(default)]
    pub chart_params: IndexMap<String, serde_json::Value>,
}

/// Report metadata attached to an analysis result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub visualization: Option<VisualizationConfig>,
}

/// Full analysis payload for one report view session.
///
/// Owned by the external analysis pipeline and treated as immutable input;
/// all derived values (filters, hulls, scenes) are recomputed from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub arguments: Vec<Argument>,
    pub clusters: Vec<Cluster>,
    #[serde(default)]
    pub config: ReportConfig,
}

impl AnalysisResult {
    #[must_use]
    pub fn new(arguments: Vec<Argument>, clusters: Vec<Cluster>) -> Self {
        Self {
            arguments,
            clusters,
            config: ReportConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: ReportConfig) -> Self {
        self.config = config;
        self
    }

    pub fn from_json_str(input: &str) -> VizResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| VizError::InvalidData(format!("failed to parse analysis result: {e}")))
    }

    #[must_use]
    pub fn cluster(&self, id: &str) -> Option<&Cluster> {
        self.clusters.iter().find(|cluster| cluster.id == id)
    }

    /// Deepest `level` present in the cluster set, `None` when empty.
    #[must_use]
    pub fn deepest_level(&self) -> Option<u32> {
        self.clusters.iter().map(|cluster| cluster.level).max()
    }

    pub fn clusters_at_level(&self, level: u32) -> impl Iterator<Item = &Cluster> {
        self.clusters
            .iter()
            .filter(move |cluster| cluster.level == level)
    }

    pub fn children_of<'a>(&'a self, parent_id: &'a str) -> impl Iterator<Item = &'a Cluster> {
        self.clusters
            .iter()
            .filter(move |cluster| cluster.parent.as_deref() == Some(parent_id))
    }
}
