use serde::{Deserialize, Serialize};

use crate::core::hull::Point;
use crate::core::report::{ArgumentId, ClusterId};
use crate::error::{VizError, VizResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    #[must_use]
    pub const fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn validate(self) -> VizResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(VizError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Categorical palette for cluster coloring, assigned by stable index so the
/// same cluster keeps its color across re-renders.
pub const CLUSTER_PALETTE: [Color; 12] = [
    Color::rgb(0.121, 0.466, 0.705),
    Color::rgb(1.000, 0.498, 0.054),
    Color::rgb(0.172, 0.627, 0.172),
    Color::rgb(0.839, 0.152, 0.156),
    Color::rgb(0.580, 0.403, 0.741),
    Color::rgb(0.549, 0.337, 0.294),
    Color::rgb(0.890, 0.466, 0.760),
    Color::rgb(0.498, 0.498, 0.498),
    Color::rgb(0.737, 0.741, 0.133),
    Color::rgb(0.090, 0.745, 0.811),
    Color::rgb(0.682, 0.780, 0.909),
    Color::rgb(1.000, 0.733, 0.470),
];

#[must_use]
pub fn cluster_color(index: usize) -> Color {
    CLUSTER_PALETTE[index % CLUSTER_PALETTE.len()]
}

/// One argument dot in normalized scene space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointMark {
    pub x: f64,
    pub y: f64,
    pub radius_px: f64,
    pub color: Color,
    /// Dimmed marks stay visible at reduced opacity when filtered out.
    pub dimmed: bool,
    pub argument_id: ArgumentId,
}

impl PointMark {
    pub fn validate(&self) -> VizResult<()> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(VizError::InvalidData(
                "point mark coordinates must be finite".to_owned(),
            ));
        }
        if !self.radius_px.is_finite() || self.radius_px <= 0.0 {
            return Err(VizError::InvalidData(
                "point mark radius must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Closed cluster boundary, vertices in draw order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonMark {
    pub points: Vec<Point>,
    pub stroke_width_px: f64,
    pub color: Color,
    pub fill_alpha: f64,
    pub cluster_id: ClusterId,
}

impl PolygonMark {
    pub fn validate(&self) -> VizResult<()> {
        if self.points.len() < 3 {
            return Err(VizError::InvalidData(
                "polygon mark needs at least 3 vertices".to_owned(),
            ));
        }
        for point in &self.points {
            if !point.x.is_finite() || !point.y.is_finite() {
                return Err(VizError::InvalidData(
                    "polygon mark vertices must be finite".to_owned(),
                ));
            }
        }
        if !self.stroke_width_px.is_finite() || self.stroke_width_px <= 0.0 {
            return Err(VizError::InvalidData(
                "polygon mark stroke width must be finite and > 0".to_owned(),
            ));
        }
        if !self.fill_alpha.is_finite() || !(0.0..=1.0).contains(&self.fill_alpha) {
            return Err(VizError::InvalidData(
                "polygon mark fill alpha must be finite and in [0, 1]".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// One treemap rectangle or list row background.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellMark {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: Color,
    pub dimmed: bool,
    pub cluster_id: ClusterId,
    pub label: Option<String>,
}

impl CellMark {
    pub fn validate(&self) -> VizResult<()> {
        for (name, value) in [
            ("x", self.x),
            ("y", self.y),
            ("width", self.width),
            ("height", self.height),
        ] {
            if !value.is_finite() {
                return Err(VizError::InvalidData(format!(
                    "cell mark `{name}` must be finite"
                )));
            }
        }
        // Zero-area cells are legal: a cluster with value 0 still occupies a slot.
        if self.width < 0.0 || self.height < 0.0 {
            return Err(VizError::InvalidData(
                "cell mark extent must be >= 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// One text label in scene space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelMark {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub dimmed: bool,
}

impl LabelMark {
    pub fn validate(&self) -> VizResult<()> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(VizError::InvalidData(
                "label mark position must be finite".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(VizError::InvalidData(
                "label mark font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}
