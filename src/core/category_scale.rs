use serde::{Deserialize, Serialize};

use crate::core::scale::AxisDirection;
use crate::core::types::PlotArea;
use crate::error::{ChartError, ChartResult};

/// Band scale placing categories in equal slots along one axis.
///
/// Slots follow row order, so repeated category labels get their own band.
///
/// Horizontal axes run left to right; vertical axes run top to bottom so the
/// first category sits at the top of a horizontal bar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScale {
    categories: Vec<String>,
}

impl CategoryScale {
    pub fn new(categories: impl IntoIterator<Item = String>) -> ChartResult<Self> {
        let categories: Vec<String> = categories.into_iter().collect();
        if categories.is_empty() {
            return Err(ChartError::InvalidData(
                "category scale needs at least one category".to_owned(),
            ));
        }
        Ok(Self { categories })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        self.categories.iter().map(String::as_str).collect()
    }

    #[must_use]
    pub fn index_of(&self, category: &str) -> Option<usize> {
        self.categories.iter().position(|entry| entry == category)
    }

    #[must_use]
    pub fn band_width(&self, area: PlotArea, direction: AxisDirection) -> f64 {
        let (_, length) = direction.extent(area);
        length / self.categories.len() as f64
    }

    /// Leading pixel edge of the band at `index`.
    pub fn band_start(
        &self,
        index: usize,
        area: PlotArea,
        direction: AxisDirection,
    ) -> ChartResult<f64> {
        if index >= self.categories.len() {
            return Err(ChartError::InvalidData(format!(
                "category index {index} is outside {} categories",
                self.categories.len()
            )));
        }
        let (start, _) = direction.extent(area);
        Ok(start + index as f64 * self.band_width(area, direction))
    }

    pub fn band_center(
        &self,
        index: usize,
        area: PlotArea,
        direction: AxisDirection,
    ) -> ChartResult<f64> {
        Ok(self.band_start(index, area, direction)? + self.band_width(area, direction) * 0.5)
    }

    /// Category index under `pixel`, if any.
    #[must_use]
    pub fn index_at_pixel(
        &self,
        pixel: f64,
        area: PlotArea,
        direction: AxisDirection,
    ) -> Option<usize> {
        let (start, length) = direction.extent(area);
        if !pixel.is_finite() || pixel < start || pixel > start + length {
            return None;
        }
        let index = ((pixel - start) / self.band_width(area, direction)).floor() as usize;
        Some(index.min(self.categories.len() - 1))
    }
}
