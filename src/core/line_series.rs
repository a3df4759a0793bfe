use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Data point already placed in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPoint {
    pub row: usize,
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

/// Projected line segment in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Joins consecutive projected points into segments.
///
/// The function is deterministic and side-effect free so both rendering and
/// tests can consume the exact same geometry output.
#[must_use]
pub fn project_line_segments(points: &[(f64, f64)]) -> Vec<LineSegment> {
    points
        .windows(2)
        .map(|pair| LineSegment {
            x1: pair[0].0,
            y1: pair[0].1,
            x2: pair[1].0,
            y2: pair[1].1,
        })
        .collect()
}

/// Cardinal-spline resampling of a polyline.
///
/// `tension` follows the chart convention: `1.0` keeps straight segments,
/// lower values bend the curve through the same vertices. Each original
/// segment is split into `steps` pieces.
pub fn smooth_polyline(
    points: &[(f64, f64)],
    tension: f64,
    steps: usize,
) -> ChartResult<Vec<(f64, f64)>> {
    if !tension.is_finite() || !(0.0..=1.0).contains(&tension) {
        return Err(ChartError::InvalidData(
            "line tension must be finite and in [0, 1]".to_owned(),
        ));
    }
    if points.len() < 3 || tension >= 1.0 || steps < 2 {
        return Ok(points.to_vec());
    }

    let strength = (1.0 - tension) * 0.5;
    let last = points.len() - 1;
    let mut curve = Vec::with_capacity(last * steps + 1);
    for index in 0..last {
        let p0 = points[index.saturating_sub(1)];
        let p1 = points[index];
        let p2 = points[index + 1];
        let p3 = points[(index + 2).min(last)];
        let m1 = ((p2.0 - p0.0) * strength, (p2.1 - p0.1) * strength);
        let m2 = ((p3.0 - p1.0) * strength, (p3.1 - p1.1) * strength);

        for step in 0..steps {
            let t = step as f64 / steps as f64;
            let t2 = t * t;
            let t3 = t2 * t;
            let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
            let h10 = t3 - 2.0 * t2 + t;
            let h01 = -2.0 * t3 + 3.0 * t2;
            let h11 = t3 - t2;
            curve.push((
                h00 * p1.0 + h10 * m1.0 + h01 * p2.0 + h11 * m2.0,
                h00 * p1.1 + h10 * m1.1 + h01 * p2.1 + h11 * m2.1,
            ));
        }
    }
    curve.push(points[last]);

    Ok(curve)
}
