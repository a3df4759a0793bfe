use crate::core::{CellValue, MAX_TREND_ORDER};
use crate::error::{ChartError, ChartResult};

use super::{ChartConfig, ChartKind};

/// Checks the load-bearing parts of a configuration.
///
/// Optional entries are not validated beyond what mount needs to stay
/// well-defined; they are defaulted instead.
pub(crate) fn validate_chart_config(config: &ChartConfig) -> ChartResult<()> {
    if config.element_id.trim().is_empty() {
        return Err(ChartError::InvalidConfig(
            "element id must not be empty".to_owned(),
        ));
    }
    if config.x_field.trim().is_empty() {
        return Err(ChartError::InvalidConfig(
            "x/category field must not be empty".to_owned(),
        ));
    }
    if config.data.is_empty() {
        return Err(ChartError::InvalidConfig(
            "data must contain at least one row".to_owned(),
        ));
    }
    if config.value_fields.is_empty() {
        return Err(ChartError::InvalidConfig(
            "at least one value field is required".to_owned(),
        ));
    }
    if !config.viewport.is_valid() {
        return Err(ChartError::InvalidViewport {
            width: config.viewport.width,
            height: config.viewport.height,
        });
    }

    let x_kind = config.effective_x_kind();
    if !config.kind.accepts_x_kind(x_kind) {
        return Err(ChartError::InvalidConfig(format!(
            "{:?} charts cannot use a {:?} x field",
            config.kind, x_kind
        )));
    }

    for spec in &config.value_fields {
        match (config.kind, spec.open_field.as_deref()) {
            (ChartKind::RangeArea, None) => {
                return Err(ChartError::InvalidConfig(format!(
                    "range area series `{}` needs an open field",
                    spec.field
                )));
            }
            (ChartKind::RangeArea, Some(_)) => {}
            (_, Some(open_field)) => {
                return Err(ChartError::InvalidConfig(format!(
                    "open field `{open_field}` is only valid for range areas"
                )));
            }
            (_, None) => {}
        }
    }

    let fields = config.series_fields();
    for (index, field) in fields.iter().enumerate() {
        if field.trim().is_empty() {
            return Err(ChartError::InvalidConfig(
                "value field names must not be empty".to_owned(),
            ));
        }
        if *field == config.x_field || fields[..index].contains(field) {
            return Err(ChartError::InvalidConfig(format!(
                "field `{field}` is plotted more than once"
            )));
        }
    }

    for (row, cells) in config.data.rows().iter().enumerate() {
        for field in &fields {
            if let Some(CellValue::Text(text)) = cells.get(*field) {
                return Err(ChartError::InvalidData(format!(
                    "value `{text}` for `{field}` at row {row} is not numeric"
                )));
            }
        }
    }

    if let (Some(min), Some(max)) = (config.value_axis.min, config.value_axis.max) {
        validate_axis_bounds("value", min, max)?;
    }
    if let (Some(min), Some(max)) = (config.x_axis.min, config.x_axis.max) {
        validate_axis_bounds("x", min, max)?;
    }

    if !config.column_width.is_finite() || config.column_width <= 0.0 || config.column_width > 1.0
    {
        return Err(ChartError::InvalidConfig(
            "column width must be finite and in (0, 1]".to_owned(),
        ));
    }
    if config.number_format.is_empty() {
        return Err(ChartError::InvalidConfig(
            "number format must not be empty".to_owned(),
        ));
    }

    for (field, trend) in &config.trend {
        if trend.order > MAX_TREND_ORDER {
            return Err(ChartError::InvalidConfig(format!(
                "trend order for `{field}` must be <= {MAX_TREND_ORDER}"
            )));
        }
    }

    if let Some(alternate) = &config.alternate_data {
        if alternate.len() != config.data.len() {
            return Err(ChartError::InvalidConfig(format!(
                "alternate data has {} rows, expected {}",
                alternate.len(),
                config.data.len()
            )));
        }
    }

    Ok(())
}

fn validate_axis_bounds(axis: &str, min: f64, max: f64) -> ChartResult<()> {
    if !min.is_finite() || !max.is_finite() || min >= max {
        return Err(ChartError::InvalidConfig(format!(
            "{axis} axis bounds must be finite with min < max"
        )));
    }
    Ok(())
}
