use crate::core::{BarGeometry, BarLayout, ProjectedPoint, RangeBand, project_range_band};
use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

use super::ChartEditor;

impl<R: Renderer> ChartEditor<R> {
    /// Projects the bars of `field`; only valid on bar charts.
    pub fn project_bars(&self, field: &str) -> ChartResult<Vec<BarGeometry>> {
        let layout = self.bar_layout(field)?;
        self.model.project_bars(field, layout)
    }

    /// Projects the draggable handles of `field`.
    ///
    /// On bar charts the handle sits at the center of each bar's free end.
    pub fn project_points(&self, field: &str) -> ChartResult<Vec<ProjectedPoint>> {
        if self.config.kind.is_bar() {
            return Ok(self
                .project_bars(field)?
                .into_iter()
                .map(|bar| ProjectedPoint {
                    row: bar.row,
                    x: bar.handle_x,
                    y: bar.handle_y,
                    value: bar.value,
                })
                .collect());
        }
        self.model.project_points(field)
    }

    /// Pixel position of the handle at `[row, field]`, `None` for empty cells.
    pub fn point_position(&self, field: &str, row: usize) -> ChartResult<Option<(f64, f64)>> {
        if row >= self.model.rows().len() {
            return Err(ChartError::RowOutOfRange {
                row,
                len: self.model.rows().len(),
            });
        }
        Ok(self
            .project_points(field)?
            .into_iter()
            .find(|point| point.row == row)
            .map(|point| (point.x, point.y)))
    }

    /// Band between the value and open fields of a range-area series.
    pub fn project_range_band(&self, field: &str) -> ChartResult<RangeBand> {
        let (_, adapter) = self
            .series_for_field(field)
            .ok_or_else(|| ChartError::UnknownField(field.to_owned()))?;
        let Some(open_field) = adapter.open_field.as_deref() else {
            return Err(ChartError::InvalidData(format!(
                "series `{field}` has no open field"
            )));
        };
        let upper = self.model.project_points(&adapter.field)?;
        let lower = self.model.project_points(open_field)?;
        Ok(project_range_band(&upper, &lower))
    }

    /// Trend curve of `field` in pixel space.
    pub fn project_trend(&self, field: &str) -> ChartResult<Vec<(f64, f64)>> {
        let Some(trend) = self.trend(field) else {
            return Ok(Vec::new());
        };
        trend
            .points()
            .iter()
            .map(|point| {
                Ok(self.model.oriented(
                    self.model.coordinate_to_pixel(point.x)?,
                    self.model.value_to_pixel(point.y)?,
                ))
            })
            .collect()
    }

    fn bar_layout(&self, field: &str) -> ChartResult<BarLayout> {
        let orientation = self.config.kind.bar_orientation().ok_or_else(|| {
            ChartError::InvalidData(format!("{:?} charts have no bars", self.config.kind))
        })?;
        let (slot, adapter) = self
            .series_for_field(field)
            .ok_or_else(|| ChartError::UnknownField(field.to_owned()))?;
        Ok(BarLayout {
            orientation,
            band_ratio: self.config.column_width,
            slot,
            slots: self.series.len(),
            corner_radius: adapter.corner_radius,
        })
    }
}
