use serde::{Deserialize, Serialize};

use crate::error::VizResult;
use crate::render::{CellMark, LabelMark, PointMark, PolygonMark};

/// Backend-agnostic scene for one chart draw pass.
///
/// Plugins materialize every mark deterministically so drawing code stays
/// isolated from the domain, filtering, and geometry logic that produced it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartScene {
    pub mode_id: String,
    pub points: Vec<PointMark>,
    pub polygons: Vec<PolygonMark>,
    pub cells: Vec<CellMark>,
    pub labels: Vec<LabelMark>,
}

impl ChartScene {
    #[must_use]
    pub fn new(mode_id: impl Into<String>) -> Self {
        Self {
            mode_id: mode_id.into(),
            points: Vec::new(),
            polygons: Vec::new(),
            cells: Vec::new(),
            labels: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_point(mut self, point: PointMark) -> Self {
        self.points.push(point);
        self
    }

    #[must_use]
    pub fn with_polygon(mut self, polygon: PolygonMark) -> Self {
        self.polygons.push(polygon);
        self
    }

    #[must_use]
    pub fn with_cell(mut self, cell: CellMark) -> Self {
        self.cells.push(cell);
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: LabelMark) -> Self {
        self.labels.push(label);
        self
    }

    pub fn validate(&self) -> VizResult<()> {
        for point in &self.points {
            point.validate()?;
        }
        for polygon in &self.polygons {
            polygon.validate()?;
        }
        for cell in &self.cells {
            cell.validate()?;
        }
        for label in &self.labels {
            label.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
            && self.polygons.is_empty()
            && self.cells.is_empty()
            && self.labels.is_empty()
    }

    #[must_use]
    pub fn mark_count(&self) -> usize {
        self.points.len() + self.polygons.len() + self.cells.len() + self.labels.len()
    }
}
