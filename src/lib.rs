//! clustermap-rs: visualization core for hierarchical opinion clustering.
//!
//! This crate turns clustered opinion-analysis results into renderable chart
//! scenes through a validated plugin system: a registry of chart modes, a
//! recompute-from-scratch filtering engine, density-based cluster selection,
//! and convex-hull boundary geometry, fronted by the [`ChartView`] facade.

pub mod api;
pub mod core;
pub mod error;
pub mod plugins;
pub mod render;
pub mod telemetry;
pub mod validation;

pub use api::{ChartView, ModeStatus};
pub use error::{VizError, VizResult};
