//! Declarative mapping from host configuration to series adapters.
//!
//! Each chart kind has one row in `KIND_DEFAULTS`; per-field styles in the
//! configuration override the row. Nothing here touches a renderer, so the
//! mapping is testable on its own.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ChartError, ChartResult};
use crate::render::Color;

use super::{ChartConfig, ChartKind, FieldStyle};

/// Visual form of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeriesShape {
    Column,
    Bar,
    Line,
    Bullet,
    RangeArea,
}

/// Styling and behavior defaults of one chart kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindDefaults {
    pub kind: ChartKind,
    pub shape: SeriesShape,
    pub stroke_width: f64,
    pub corner_radius: f64,
    pub tension: f64,
    pub bullet_radius: f64,
    pub fill_opacity: f64,
    /// Draw bullets on fields that are not draggable.
    pub static_bullets: bool,
    pub tooltip_template: &'static str,
}

pub const KIND_DEFAULTS: [KindDefaults; 5] = [
    KindDefaults {
        kind: ChartKind::VerticalBar,
        shape: SeriesShape::Column,
        stroke_width: 0.0,
        corner_radius: 8.0,
        tension: 1.0,
        bullet_radius: 6.0,
        fill_opacity: 1.0,
        static_bullets: false,
        tooltip_template: "{name}: {value}",
    },
    KindDefaults {
        kind: ChartKind::HorizontalBar,
        shape: SeriesShape::Bar,
        stroke_width: 0.0,
        corner_radius: 8.0,
        tension: 1.0,
        bullet_radius: 6.0,
        fill_opacity: 1.0,
        static_bullets: false,
        tooltip_template: "{name}: {value}",
    },
    KindDefaults {
        kind: ChartKind::Line,
        shape: SeriesShape::Line,
        stroke_width: 2.0,
        corner_radius: 0.0,
        tension: 0.8,
        bullet_radius: 6.0,
        fill_opacity: 0.0,
        static_bullets: true,
        tooltip_template: "{name}\nx: {x}\ny: {value}",
    },
    KindDefaults {
        kind: ChartKind::Scatter,
        shape: SeriesShape::Bullet,
        stroke_width: 1.0,
        corner_radius: 0.0,
        tension: 1.0,
        bullet_radius: 6.0,
        fill_opacity: 1.0,
        static_bullets: true,
        tooltip_template: "{name}\nx: {x}\ny: {value}",
    },
    KindDefaults {
        kind: ChartKind::RangeArea,
        shape: SeriesShape::RangeArea,
        stroke_width: 2.0,
        corner_radius: 0.0,
        tension: 0.8,
        bullet_radius: 6.0,
        fill_opacity: 0.3,
        static_bullets: true,
        tooltip_template: "{name}\nx: {x}\nlow: {openValue}\nhigh: {value}",
    },
];

#[must_use]
pub fn kind_defaults(kind: ChartKind) -> &'static KindDefaults {
    let index = match kind {
        ChartKind::VerticalBar => 0,
        ChartKind::HorizontalBar => 1,
        ChartKind::Line => 2,
        ChartKind::Scatter => 3,
        ChartKind::RangeArea => 4,
    };
    &KIND_DEFAULTS[index]
}

/// Fully resolved styling and behavior of one plotted series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesAdapter {
    pub field: String,
    /// Lower boundary field of a range area.
    pub open_field: Option<String>,
    pub name: String,
    pub shape: SeriesShape,
    pub color: Color,
    pub stroke_color: Color,
    pub stroke_width: f64,
    pub corner_radius: f64,
    pub dash: Vec<f64>,
    pub tension: f64,
    pub bullet_radius: f64,
    pub fill_opacity: f64,
    pub draggable: bool,
    pub open_draggable: bool,
    pub static_bullets: bool,
    pub tooltip_template: String,
}

impl SeriesAdapter {
    /// Whether the series' `field` accepts drags.
    #[must_use]
    pub fn is_field_draggable(&self, field: &str) -> bool {
        if field == self.field {
            self.draggable
        } else {
            self.open_field.as_deref() == Some(field) && self.open_draggable
        }
    }

    #[must_use]
    pub fn owns_field(&self, field: &str) -> bool {
        self.field == field || self.open_field.as_deref() == Some(field)
    }
}

/// Resolved trend overlay for one field.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendAdapter {
    pub field: String,
    pub order: usize,
    pub color: Color,
    pub width: f64,
    pub dash: Vec<f64>,
}

/// Parses a comma separated dash pattern such as `"4,2"`.
pub fn parse_dash(input: &str) -> ChartResult<Vec<f64>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    trimmed
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .ok()
                .filter(|length| length.is_finite() && *length >= 0.0)
                .ok_or_else(|| {
                    ChartError::InvalidConfig(format!("`{input}` is not a dash pattern"))
                })
        })
        .collect()
}

fn resolve_color(value: Option<&str>, fallback: &str) -> ChartResult<Color> {
    Color::from_hex(value.unwrap_or(fallback))
        .map_err(|err| ChartError::InvalidConfig(err.to_string()))
}

fn non_negative(value: Option<f64>, fallback: f64, what: &str) -> ChartResult<f64> {
    match value {
        None => Ok(fallback),
        Some(value) if value.is_finite() && value >= 0.0 => Ok(value),
        Some(_) => Err(ChartError::InvalidConfig(format!(
            "{what} must be finite and >= 0"
        ))),
    }
}

fn unit_interval(value: Option<f64>, fallback: f64, what: &str) -> ChartResult<f64> {
    match value {
        None => Ok(fallback),
        Some(value) if value.is_finite() && (0.0..=1.0).contains(&value) => Ok(value),
        Some(_) => Err(ChartError::InvalidConfig(format!(
            "{what} must be finite and in [0, 1]"
        ))),
    }
}

/// Builds one adapter per configured series.
pub fn build_series_adapters(config: &ChartConfig) -> ChartResult<Vec<SeriesAdapter>> {
    let defaults = kind_defaults(config.kind);
    let no_style = FieldStyle::default();

    config
        .value_fields
        .iter()
        .enumerate()
        .map(|(index, spec)| {
            let style = config.style.get(&spec.field).unwrap_or(&no_style);
            let palette_color = config.theme.series_color(index);
            let color = resolve_color(style.color.as_deref(), palette_color)?;
            let stroke_color = match style.stroke_color.as_deref() {
                Some(value) => resolve_color(Some(value), palette_color)?,
                None => color,
            };
            let template = config
                .tooltip
                .get(&spec.field)
                .cloned()
                .unwrap_or_else(|| defaults.tooltip_template.to_owned());

            Ok(SeriesAdapter {
                field: spec.field.clone(),
                open_field: spec.open_field.clone(),
                name: config.display_name(&spec.field).to_owned(),
                shape: defaults.shape,
                color,
                stroke_color,
                stroke_width: non_negative(
                    style.stroke_width,
                    defaults.stroke_width,
                    "stroke width",
                )?,
                corner_radius: non_negative(
                    style.corner_radius,
                    defaults.corner_radius,
                    "corner radius",
                )?,
                dash: style
                    .dash
                    .as_deref()
                    .map(parse_dash)
                    .transpose()?
                    .unwrap_or_default(),
                tension: unit_interval(style.tension, defaults.tension, "tension")?,
                bullet_radius: non_negative(
                    style.bullet_radius,
                    defaults.bullet_radius,
                    "bullet radius",
                )?,
                fill_opacity: unit_interval(
                    style.fill_opacity,
                    defaults.fill_opacity,
                    "fill opacity",
                )?,
                draggable: config.is_draggable(&spec.field),
                open_draggable: spec
                    .open_field
                    .as_deref()
                    .is_some_and(|field| config.is_draggable(field)),
                static_bullets: defaults.static_bullets,
                tooltip_template: template,
            })
        })
        .collect()
}

/// Builds trend overlays for plotted fields.
///
/// Entries for fields that are not plotted, and every entry on bar charts,
/// are ignored with a warning.
pub fn build_trend_adapters(
    config: &ChartConfig,
    series: &[SeriesAdapter],
) -> ChartResult<Vec<TrendAdapter>> {
    let mut trends = Vec::new();
    for (field, trend) in &config.trend {
        if !config.kind.supports_trend() {
            warn!(field = %field, kind = ?config.kind, "ignoring trend on a categorical chart");
            continue;
        }
        let Some(owner) = series.iter().find(|adapter| adapter.owns_field(field)) else {
            warn!(field = %field, "ignoring trend for a field that is not plotted");
            continue;
        };

        let color = match trend.color.as_deref() {
            Some(value) => resolve_color(Some(value), "#000000")?,
            None => owner.color,
        };
        trends.push(TrendAdapter {
            field: field.clone(),
            order: trend.order,
            color,
            width: non_negative(trend.width, 2.0, "trend width")?,
            dash: trend
                .dash
                .as_deref()
                .map(parse_dash)
                .transpose()?
                .unwrap_or_else(|| vec![6.0, 3.0]),
        });
    }
    Ok(trends)
}
