use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{
    AxisDirection, BarGeometry, BarLayout, CategoryScale, DEFAULT_AUTOSCALE_PADDING_RATIO,
    LinearScale, PlotArea, PlotInsets, ProjectedPoint, datetime_to_unix_seconds, parse_date,
    project_bars,
};
use crate::error::{ChartError, ChartResult};

use super::{ChartConfig, ChartKind, XKind};

const X_AXIS_PADDING_RATIO: f64 = 0.05;

/// X position of a plotted row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlotX {
    Category(String),
    Number(f64),
    Date(NaiveDateTime),
}

impl PlotX {
    /// Numeric coordinate used for scaling and regression.
    ///
    /// Dates map to Unix seconds; categories have no coordinate.
    #[must_use]
    pub fn coordinate(&self) -> Option<f64> {
        match self {
            Self::Category(_) => None,
            Self::Number(value) => Some(*value),
            Self::Date(time) => Some(datetime_to_unix_seconds(*time)),
        }
    }
}

/// Engine-side copy of one row: parsed x plus the plotted numeric values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotRow {
    pub x: PlotX,
    pub values: IndexMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum XAxis {
    Category(CategoryScale),
    Linear(LinearScale),
}

/// Plotted rows and the scales that place them.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotModel {
    kind: ChartKind,
    area: PlotArea,
    rows: Vec<PlotRow>,
    x_axis: XAxis,
    value_scale: LinearScale,
}

impl PlotModel {
    /// Parses host rows and fits both axes.
    ///
    /// Date x values are parsed here, before any geometry is built.
    pub fn build(config: &ChartConfig) -> ChartResult<Self> {
        let x_kind = config.effective_x_kind();
        let fields = config.series_fields();
        let mut rows = Vec::with_capacity(config.data.len());
        for (index, row) in config.data.rows().iter().enumerate() {
            let cell = row.get(&config.x_field).ok_or_else(|| {
                ChartError::InvalidConfig(format!(
                    "row {index} has no `{}` field",
                    config.x_field
                ))
            })?;
            let x = match x_kind {
                XKind::Category => PlotX::Category(cell.display()),
                XKind::Number => PlotX::Number(cell.as_f64().ok_or_else(|| {
                    ChartError::InvalidData(format!("x value at row {index} must be numeric"))
                })?),
                XKind::Date => {
                    let text = cell.as_text().ok_or_else(|| {
                        ChartError::InvalidData(format!(
                            "date value at row {index} must be a string"
                        ))
                    })?;
                    PlotX::Date(parse_date(text, config.date_format.as_deref())?)
                }
            };

            let values = fields
                .iter()
                .filter_map(|field| {
                    row.get(*field)
                        .and_then(|cell| cell.as_f64())
                        .map(|value| ((*field).to_owned(), value))
                })
                .collect();
            rows.push(PlotRow { x, values });
        }

        let x_axis = match x_kind {
            XKind::Category => XAxis::Category(CategoryScale::new(rows.iter().map(|row| {
                match &row.x {
                    PlotX::Category(name) => name.clone(),
                    other => other.coordinate().map(|c| c.to_string()).unwrap_or_default(),
                }
            }))?),
            XKind::Number | XKind::Date => {
                let fitted = LinearScale::from_values(
                    rows.iter().filter_map(|row| row.x.coordinate()),
                    X_AXIS_PADDING_RATIO,
                )?;
                XAxis::Linear(checked_bounds(
                    "x",
                    fitted,
                    config.x_axis.min,
                    config.x_axis.max,
                )?)
            }
        };

        let baseline = config.kind.is_bar().then_some(0.0);
        let fitted_values = LinearScale::from_values(
            rows.iter()
                .flat_map(|row| row.values.values().copied())
                .chain(baseline),
            DEFAULT_AUTOSCALE_PADDING_RATIO,
        )?;
        let value_scale = checked_bounds(
            "value",
            fitted_values,
            config.value_axis.min,
            config.value_axis.max,
        )?;

        Ok(Self {
            kind: config.kind,
            area: PlotArea::from_viewport(config.viewport, PlotInsets::default())?,
            rows,
            x_axis,
            value_scale,
        })
    }

    #[must_use]
    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    #[must_use]
    pub fn area(&self) -> PlotArea {
        self.area
    }

    #[must_use]
    pub fn rows(&self) -> &[PlotRow] {
        &self.rows
    }

    #[must_use]
    pub fn x_axis(&self) -> &XAxis {
        &self.x_axis
    }

    #[must_use]
    pub fn value_scale(&self) -> LinearScale {
        self.value_scale
    }

    pub fn value(&self, row: usize, field: &str) -> ChartResult<Option<f64>> {
        let entry = self.rows.get(row).ok_or(ChartError::RowOutOfRange {
            row,
            len: self.rows.len(),
        })?;
        Ok(entry.values.get(field).copied())
    }

    pub fn set_value(&mut self, row: usize, field: &str, value: Option<f64>) -> ChartResult<()> {
        let len = self.rows.len();
        let entry = self
            .rows
            .get_mut(row)
            .ok_or(ChartError::RowOutOfRange { row, len })?;
        match value {
            Some(value) if value.is_finite() => {
                entry.values.insert(field.to_owned(), value);
            }
            Some(_) => {
                return Err(ChartError::InvalidData(format!(
                    "value for `{field}` must be finite"
                )));
            }
            None => {
                entry.values.shift_remove(field);
            }
        }
        Ok(())
    }

    /// Values of `field` in row order.
    #[must_use]
    pub fn column(&self, field: &str) -> Vec<Option<f64>> {
        self.rows
            .iter()
            .map(|row| row.values.get(field).copied())
            .collect()
    }

    pub fn value_to_pixel(&self, value: f64) -> ChartResult<f64> {
        self.value_scale
            .domain_to_pixel(value, self.area, self.kind.value_direction())
    }

    pub fn pixel_to_value(&self, pixel: f64) -> ChartResult<f64> {
        self.value_scale
            .pixel_to_domain(pixel, self.area, self.kind.value_direction())
    }

    /// Pixel position of an x coordinate on a linear x axis.
    pub fn coordinate_to_pixel(&self, coordinate: f64) -> ChartResult<f64> {
        match &self.x_axis {
            XAxis::Linear(scale) => {
                scale.domain_to_pixel(coordinate, self.area, self.kind.x_direction())
            }
            XAxis::Category(_) => Err(ChartError::InvalidData(
                "category axes have no numeric coordinates".to_owned(),
            )),
        }
    }

    /// Screen point for an (x pixel, value pixel) pair.
    #[must_use]
    pub fn oriented(&self, x_pixel: f64, value_pixel: f64) -> (f64, f64) {
        match self.kind.value_direction() {
            AxisDirection::Vertical => (x_pixel, value_pixel),
            AxisDirection::Horizontal => (value_pixel, x_pixel),
        }
    }

    /// Pixel range the value axis spans, as `(start, end)`.
    #[must_use]
    pub fn value_extent(&self) -> (f64, f64) {
        let (start, length) = self.kind.value_direction().extent(self.area);
        (start, start + length)
    }

    /// Points of `field` placed on a linear x axis, rows without values skipped.
    pub fn project_points(&self, field: &str) -> ChartResult<Vec<ProjectedPoint>> {
        let mut points = Vec::with_capacity(self.rows.len());
        for (row, entry) in self.rows.iter().enumerate() {
            let (Some(value), Some(coordinate)) = (entry.values.get(field), entry.x.coordinate())
            else {
                continue;
            };
            let (x, y) = self.oriented(
                self.coordinate_to_pixel(coordinate)?,
                self.value_to_pixel(*value)?,
            );
            points.push(ProjectedPoint {
                row,
                x,
                y,
                value: *value,
            });
        }
        Ok(points)
    }

    /// Bars of `field` on a category axis.
    pub fn project_bars(&self, field: &str, layout: BarLayout) -> ChartResult<Vec<BarGeometry>> {
        match &self.x_axis {
            XAxis::Category(categories) => project_bars(
                &self.column(field),
                categories,
                self.value_scale,
                self.area,
                layout,
            ),
            XAxis::Linear(_) => Err(ChartError::InvalidData(
                "bars need a category axis".to_owned(),
            )),
        }
    }
}

fn checked_bounds(
    axis: &str,
    fitted: LinearScale,
    min: Option<f64>,
    max: Option<f64>,
) -> ChartResult<LinearScale> {
    let scale = fitted
        .with_bounds(min, max)
        .map_err(|err| ChartError::InvalidConfig(format!("{axis} axis: {err}")))?;
    let (start, end) = scale.domain();
    if start >= end {
        return Err(ChartError::InvalidConfig(format!(
            "{axis} axis minimum must be below its maximum"
        )));
    }
    Ok(scale)
}
