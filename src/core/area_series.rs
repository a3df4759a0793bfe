use serde::{Deserialize, Serialize};

use crate::core::ProjectedPoint;

/// Closed band between an upper and a lower boundary, in pixel space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeBand {
    pub upper: Vec<(f64, f64)>,
    pub lower: Vec<(f64, f64)>,
}

impl RangeBand {
    /// Polygon outline: upper boundary forward, lower boundary backward.
    #[must_use]
    pub fn outline(&self) -> Vec<(f64, f64)> {
        self.upper
            .iter()
            .copied()
            .chain(self.lower.iter().rev().copied())
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.upper.is_empty() || self.lower.is_empty()
    }
}

/// Builds the band from matched boundary points.
///
/// Rows missing on either boundary are skipped on both.
#[must_use]
pub fn project_range_band(upper: &[ProjectedPoint], lower: &[ProjectedPoint]) -> RangeBand {
    let mut band = RangeBand {
        upper: Vec::with_capacity(upper.len()),
        lower: Vec::with_capacity(lower.len()),
    };
    for top in upper {
        if let Some(bottom) = lower.iter().find(|point| point.row == top.row) {
            band.upper.push((top.x, top.y));
            band.lower.push((bottom.x, bottom.y));
        }
    }
    band
}
