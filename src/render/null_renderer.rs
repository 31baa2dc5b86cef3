use crate::error::VizResult;
use crate::render::{ChartScene, SceneRenderer};

/// No-op renderer used by tests and headless view usage.
///
/// It still validates scene content so tests can catch invalid geometry before
/// a real backend is introduced.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_point_count: usize,
    pub last_polygon_count: usize,
    pub last_cell_count: usize,
    pub last_label_count: usize,
}

impl SceneRenderer for NullRenderer {
    fn render(&mut self, scene: &ChartScene) -> VizResult<()> {
        scene.validate()?;
        self.last_point_count = scene.points.len();
        self.last_polygon_count = scene.polygons.len();
        self.last_cell_count = scene.cells.len();
        self.last_label_count = scene.labels.len();
        Ok(())
    }
}
