use std::collections::BTreeSet;

use ordered_float::OrderedFloat;
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::types::DataPoint;
use crate::error::{ChartError, ChartResult};

/// Significant digits kept for coefficients and fitted values.
pub const TREND_PRECISION_DIGITS: u32 = 15;

/// Highest polynomial order accepted for a trend.
pub const MAX_TREND_ORDER: usize = 10;

const SINGULAR_PIVOT_ABS: f64 = 1e-12;

/// Rounds `value` to `digits` significant digits.
///
/// Values inside the decimal range go through `rust_decimal`; the rest fall
/// back to scientific formatting with the same precision.
#[must_use]
pub fn round_significant(value: f64, digits: u32) -> f64 {
    if !value.is_finite() || value == 0.0 || digits == 0 {
        return value;
    }

    let magnitude = value.abs();
    if (1e-9..1e15).contains(&magnitude) {
        if let Some(rounded) = Decimal::from_f64(value)
            .and_then(|decimal| decimal.round_sf(digits))
            .and_then(|decimal| decimal.to_f64())
        {
            return rounded;
        }
    }

    let precision = digits.saturating_sub(1) as usize;
    format!("{value:.precision$e}").parse().unwrap_or(value)
}

/// Least-squares polynomial over one series.
///
/// The polynomial is expressed in the normalized variable
/// `t = (x - center) / scale`, which keeps the normal equations well
/// conditioned for timestamp-sized x values.
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialFit {
    requested_order: usize,
    center: f64,
    scale: f64,
    coefficients: SmallVec<[f64; 8]>,
}

impl PolynomialFit {
    /// Fits a polynomial of `order` to the finite points in `points`.
    ///
    /// With fewer distinct x values than `order + 1` the order drops to what
    /// the data can determine; an empty input fits the zero polynomial.
    pub fn fit(points: &[DataPoint], order: usize) -> ChartResult<Self> {
        if order > MAX_TREND_ORDER {
            return Err(ChartError::InvalidData(format!(
                "trend order must be <= {MAX_TREND_ORDER}, got {order}"
            )));
        }

        let finite: Vec<DataPoint> = points.iter().copied().filter(|p| p.is_finite()).collect();
        let distinct: BTreeSet<OrderedFloat<f64>> =
            finite.iter().map(|p| OrderedFloat(p.x)).collect();
        if distinct.is_empty() {
            return Ok(Self {
                requested_order: order,
                center: 0.0,
                scale: 1.0,
                coefficients: SmallVec::from_elem(0.0, 1),
            });
        }

        let center = finite.iter().map(|p| p.x).sum::<f64>() / finite.len() as f64;
        let spread = finite
            .iter()
            .map(|p| (p.x - center).abs())
            .fold(0.0_f64, f64::max);
        let scale = if spread > 0.0 { spread } else { 1.0 };
        let normalized: Vec<(f64, f64)> = finite
            .iter()
            .map(|p| ((p.x - center) / scale, p.y))
            .collect();

        let mut effective = order.min(distinct.len() - 1);
        let coefficients = loop {
            if let Some(solution) = solve_normal_equations(&normalized, effective) {
                break solution;
            }
            if effective == 0 {
                return Err(ChartError::InvalidData(
                    "trend normal equations are singular".to_owned(),
                ));
            }
            effective -= 1;
        };

        let coefficients = coefficients
            .into_iter()
            .map(|c| round_significant(c, TREND_PRECISION_DIGITS))
            .collect();

        Ok(Self {
            requested_order: order,
            center,
            scale,
            coefficients,
        })
    }

    #[must_use]
    pub fn requested_order(&self) -> usize {
        self.requested_order
    }

    /// Order actually fitted.
    #[must_use]
    pub fn order(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// Coefficients in ascending powers of the normalized variable.
    #[must_use]
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    #[must_use]
    pub fn normalization(&self) -> (f64, f64) {
        (self.center, self.scale)
    }

    #[must_use]
    pub fn evaluate(&self, x: f64) -> f64 {
        let t = (x - self.center) / self.scale;
        let value = self
            .coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, coefficient| acc * t + coefficient);
        round_significant(value, TREND_PRECISION_DIGITS)
    }
}

fn solve_normal_equations(points: &[(f64, f64)], order: usize) -> Option<Vec<f64>> {
    let size = order + 1;
    let mut power_sums = vec![0.0; 2 * order + 1];
    let mut rhs = vec![0.0; size];
    for &(t, y) in points {
        let mut power = 1.0;
        for (k, sum) in power_sums.iter_mut().enumerate() {
            *sum += power;
            if k < size {
                rhs[k] += power * y;
            }
            power *= t;
        }
    }

    let mut matrix: Vec<Vec<f64>> = (0..size)
        .map(|row| {
            let mut entries: Vec<f64> = power_sums[row..row + size].to_vec();
            entries.push(rhs[row]);
            entries
        })
        .collect();

    for column in 0..size {
        let pivot_row = (column..size).max_by(|&a, &b| {
            matrix[a][column]
                .abs()
                .total_cmp(&matrix[b][column].abs())
        })?;
        if matrix[pivot_row][column].abs() < SINGULAR_PIVOT_ABS {
            return None;
        }
        matrix.swap(column, pivot_row);

        for row in column + 1..size {
            let factor = matrix[row][column] / matrix[column][column];
            if factor == 0.0 {
                continue;
            }
            for k in column..=size {
                let delta = factor * matrix[column][k];
                matrix[row][k] -= delta;
            }
        }
    }

    let mut solution = vec![0.0; size];
    for row in (0..size).rev() {
        let tail: f64 = (row + 1..size)
            .map(|k| matrix[row][k] * solution[k])
            .sum();
        solution[row] = (matrix[row][size] - tail) / matrix[row][row];
    }

    solution.iter().all(|c| c.is_finite()).then_some(solution)
}

/// Trend curve overlaid on one series.
///
/// Point x positions are fixed when the series is created; refits only
/// rewrite the y values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSeries {
    field: String,
    order: usize,
    points: Vec<DataPoint>,
}

impl TrendSeries {
    /// Creates a trend sampled at the sorted distinct x values of `source`.
    pub fn from_source(
        field: impl Into<String>,
        order: usize,
        source: &[DataPoint],
    ) -> ChartResult<Self> {
        let positions: BTreeSet<OrderedFloat<f64>> = source
            .iter()
            .filter(|p| p.is_finite())
            .map(|p| OrderedFloat(p.x))
            .collect();
        let mut series = Self {
            field: field.into(),
            order,
            points: positions
                .into_iter()
                .map(|x| DataPoint::new(x.into_inner(), 0.0))
                .collect(),
        };
        series.refit(source)?;
        Ok(series)
    }

    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    #[must_use]
    pub fn order(&self) -> usize {
        self.order
    }

    #[must_use]
    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    /// Refits against `source` and overwrites the curve in place.
    pub fn refit(&mut self, source: &[DataPoint]) -> ChartResult<PolynomialFit> {
        let fit = PolynomialFit::fit(source, self.order)?;
        for point in &mut self.points {
            point.y = fit.evaluate(point.x);
        }
        Ok(fit)
    }
}
