use serde::{Deserialize, Serialize};

use crate::core::types::PlotArea;
use crate::error::{ChartError, ChartResult};

/// Screen direction an axis runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisDirection {
    /// Left to right, smallest value on the left edge.
    Horizontal,
    /// Bottom to top, smallest value on the bottom edge.
    Vertical,
}

impl AxisDirection {
    #[must_use]
    pub fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    /// Start pixel and length of the area along this direction.
    #[must_use]
    pub fn extent(self, area: PlotArea) -> (f64, f64) {
        match self {
            Self::Horizontal => (area.left, area.width),
            Self::Vertical => (area.top, area.height),
        }
    }
}

/// Padding applied when a value axis is fitted from data.
pub const DEFAULT_AUTOSCALE_PADDING_RATIO: f64 = 0.10;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
        })
    }

    /// Fits a domain around finite `values`, padded on both sides.
    ///
    /// A constant series gets a unit span so the scale stays invertible.
    pub fn from_values(
        values: impl IntoIterator<Item = f64>,
        padding_ratio: f64,
    ) -> ChartResult<Self> {
        if !padding_ratio.is_finite() || padding_ratio < 0.0 {
            return Err(ChartError::InvalidData(
                "scale padding ratio must be finite and >= 0".to_owned(),
            ));
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for value in values.into_iter().filter(|value| value.is_finite()) {
            min = min.min(value);
            max = max.max(value);
        }
        if !min.is_finite() || !max.is_finite() {
            return Err(ChartError::InvalidData(
                "cannot fit a scale without finite values".to_owned(),
            ));
        }

        if min == max {
            return Self::new(min - 0.5, max + 0.5);
        }

        let padding = (max - min) * padding_ratio;
        Self::new(min - padding, max + padding)
    }

    /// Replaces one or both domain bounds with explicit values.
    pub fn with_bounds(self, min: Option<f64>, max: Option<f64>) -> ChartResult<Self> {
        Self::new(
            min.unwrap_or(self.domain_start),
            max.unwrap_or(self.domain_end),
        )
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn clamp(self, value: f64) -> f64 {
        let (low, high) = if self.domain_start <= self.domain_end {
            (self.domain_start, self.domain_end)
        } else {
            (self.domain_end, self.domain_start)
        };
        value.clamp(low, high)
    }

    pub fn domain_to_pixel(
        self,
        value: f64,
        area: PlotArea,
        direction: AxisDirection,
    ) -> ChartResult<f64> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        let (start, length) = direction.extent(area);
        let span = self.domain_end - self.domain_start;
        let normalized = (value - self.domain_start) / span;
        Ok(match direction {
            AxisDirection::Horizontal => start + normalized * length,
            AxisDirection::Vertical => start + (1.0 - normalized) * length,
        })
    }

    pub fn pixel_to_domain(
        self,
        pixel: f64,
        area: PlotArea,
        direction: AxisDirection,
    ) -> ChartResult<f64> {
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }

        let (start, length) = direction.extent(area);
        let span = self.domain_end - self.domain_start;
        let normalized = match direction {
            AxisDirection::Horizontal => (pixel - start) / length,
            AxisDirection::Vertical => 1.0 - (pixel - start) / length,
        };
        Ok(self.domain_start + normalized * span)
    }
}
