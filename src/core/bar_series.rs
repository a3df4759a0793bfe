use serde::{Deserialize, Serialize};

use crate::core::{AxisDirection, CategoryScale, LinearScale, PlotArea};
use crate::error::{ChartError, ChartResult};

/// Direction bars grow in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BarOrientation {
    /// Columns growing up from a horizontal baseline.
    Vertical,
    /// Bars growing right from a vertical baseline.
    Horizontal,
}

impl BarOrientation {
    /// Axis carrying the bar values.
    #[must_use]
    pub fn value_direction(self) -> AxisDirection {
        match self {
            Self::Vertical => AxisDirection::Vertical,
            Self::Horizontal => AxisDirection::Horizontal,
        }
    }
}

/// Per-corner radii of a bar rectangle, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CornerRadii {
    pub top_left: f64,
    pub top_right: f64,
    pub bottom_right: f64,
    pub bottom_left: f64,
}

impl CornerRadii {
    #[must_use]
    pub fn uniform(radius: f64) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_right: radius,
            bottom_left: radius,
        }
    }

    #[must_use]
    pub fn max(self) -> f64 {
        self.top_left
            .max(self.top_right)
            .max(self.bottom_right)
            .max(self.bottom_left)
    }
}

/// Rounds the corners at the free end of a bar.
///
/// Positive values round the far end (top for columns, right for horizontal
/// bars); zero and negative values round the opposite end.
#[must_use]
pub fn bar_corner_radii(value: f64, radius: f64, orientation: BarOrientation) -> CornerRadii {
    let radius = if radius.is_finite() { radius.max(0.0) } else { 0.0 };
    let positive = value > 0.0;
    match (orientation, positive) {
        (BarOrientation::Vertical, true) => CornerRadii {
            top_left: radius,
            top_right: radius,
            ..CornerRadii::default()
        },
        (BarOrientation::Vertical, false) => CornerRadii {
            bottom_left: radius,
            bottom_right: radius,
            ..CornerRadii::default()
        },
        (BarOrientation::Horizontal, true) => CornerRadii {
            top_right: radius,
            bottom_right: radius,
            ..CornerRadii::default()
        },
        (BarOrientation::Horizontal, false) => CornerRadii {
            top_left: radius,
            bottom_left: radius,
            ..CornerRadii::default()
        },
    }
}

/// Bar placement within a category band when several fields are clustered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarLayout {
    pub orientation: BarOrientation,
    /// Share of the category band covered by the whole cluster.
    pub band_ratio: f64,
    pub slot: usize,
    pub slots: usize,
    pub corner_radius: f64,
}

impl BarLayout {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.band_ratio.is_finite() || self.band_ratio <= 0.0 || self.band_ratio > 1.0 {
            return Err(ChartError::InvalidData(
                "bar band ratio must be finite and in (0, 1]".to_owned(),
            ));
        }
        if self.slots == 0 || self.slot >= self.slots {
            return Err(ChartError::InvalidData(format!(
                "bar slot {} is outside {} slots",
                self.slot, self.slots
            )));
        }
        Ok(self)
    }

    /// Offset and thickness of this slot relative to its band start.
    #[must_use]
    pub fn slot_span(self, band_width: f64) -> (f64, f64) {
        let cluster = band_width * self.band_ratio;
        let thickness = cluster / self.slots as f64;
        let offset = (band_width - cluster) * 0.5 + thickness * self.slot as f64;
        (offset, thickness)
    }
}

/// Deterministic bar geometry in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarGeometry {
    pub row: usize,
    pub value: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub corners: CornerRadii,
    /// Pixel position of the free end's center, where the drag handle sits.
    pub handle_x: f64,
    pub handle_y: f64,
}

impl BarGeometry {
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// Projects one field's values into bars, one per category band.
///
/// Bars grow from zero, or from the nearest domain edge when zero lies
/// outside the value domain. Rows without a value produce no bar.
pub fn project_bars(
    values: &[Option<f64>],
    categories: &CategoryScale,
    value_scale: LinearScale,
    area: PlotArea,
    layout: BarLayout,
) -> ChartResult<Vec<BarGeometry>> {
    let layout = layout.validate()?;
    let value_direction = layout.orientation.value_direction();
    let band_direction = value_direction.cross();
    let band_width = categories.band_width(area, band_direction);
    let (offset, thickness) = layout.slot_span(band_width);
    let baseline = value_scale.domain_to_pixel(value_scale.clamp(0.0), area, value_direction)?;

    let mut projected = Vec::with_capacity(values.len());
    for (row, value) in values.iter().enumerate() {
        let Some(value) = *value else {
            continue;
        };
        if row >= categories.len() {
            break;
        }
        let band_start = categories.band_start(row, area, band_direction)?;
        let tip = value_scale.domain_to_pixel(value, area, value_direction)?;
        let corners = bar_corner_radii(value, layout.corner_radius, layout.orientation);
        let cross_start = band_start + offset;
        let cross_center = cross_start + thickness * 0.5;

        let geometry = match layout.orientation {
            BarOrientation::Vertical => BarGeometry {
                row,
                value,
                x: cross_start,
                y: tip.min(baseline),
                width: thickness,
                height: (tip - baseline).abs(),
                corners,
                handle_x: cross_center,
                handle_y: tip,
            },
            BarOrientation::Horizontal => BarGeometry {
                row,
                value,
                x: tip.min(baseline),
                y: cross_start,
                width: (tip - baseline).abs(),
                height: thickness,
                corners,
                handle_x: tip,
                handle_y: cross_center,
            },
        };
        projected.push(geometry);
    }

    Ok(projected)
}
