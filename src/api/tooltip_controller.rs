use crate::error::{ChartError, ChartResult};
use crate::interaction::DragTarget;
use crate::render::Renderer;

use super::label_format::{DEFAULT_DATE_FORMAT, format_date, format_number, render_template};
use super::{ChartEditor, PlotX};

/// Gap between a bullet's edge and its tooltip anchor.
const TOOLTIP_OFFSET_PX: f64 = 4.0;

impl<R: Renderer> ChartEditor<R> {
    /// Tooltip text for `[row, field]` from the owning series' template.
    ///
    /// Supported placeholders: `{name}`, `{field}`, `{value}`, `{openValue}`,
    /// `{x}`, `{category}`, and any column of the row by name.
    pub fn tooltip_text(&self, target: &DragTarget) -> ChartResult<String> {
        let (_, adapter) = self
            .series_for_field(&target.field)
            .ok_or_else(|| ChartError::UnknownField(target.field.clone()))?;
        let plotted = self
            .model
            .rows()
            .get(target.row)
            .ok_or(ChartError::RowOutOfRange {
                row: target.row,
                len: self.model.rows().len(),
            })?;
        let number = |value: f64| format_number(value, &self.config.number_format);
        let x_label = self.x_label(&plotted.x);

        Ok(render_template(&adapter.tooltip_template, |key| match key {
            "name" => Some(adapter.name.clone()),
            "field" => Some(target.field.clone()),
            "value" => plotted.values.get(&adapter.field).map(|v| number(*v)),
            "openValue" => adapter
                .open_field
                .as_ref()
                .and_then(|open| plotted.values.get(open))
                .map(|v| number(*v)),
            "x" | "category" => Some(x_label.clone()),
            column => {
                let cell = self.local.cell(target.row, column).ok()?;
                match cell.as_f64() {
                    Some(value) => Some(number(value)),
                    None => cell.as_text().map(str::to_owned),
                }
            }
        }))
    }

    /// Display label of an x position.
    #[must_use]
    pub fn x_label(&self, x: &PlotX) -> String {
        match x {
            PlotX::Category(name) => name.clone(),
            PlotX::Number(value) => format_number(
                *value,
                self.config
                    .x_axis
                    .label_format
                    .as_deref()
                    .unwrap_or(self.config.number_format.as_str()),
            ),
            PlotX::Date(time) => format_date(
                *time,
                self.config
                    .x_axis
                    .label_format
                    .as_deref()
                    .unwrap_or(DEFAULT_DATE_FORMAT),
            ),
        }
    }

    /// Updates hover and tooltip for the idle pointer at `(x, y)`.
    pub(super) fn update_hover(&mut self, x: f64, y: f64) -> ChartResult<()> {
        let hit = self.hit_test(x, y, false)?;
        let changed = self.interaction.hovered() != hit.as_ref();
        match &hit {
            Some(target) => {
                let text = self.tooltip_text(target)?;
                let radius = self
                    .series_for_field(&target.field)
                    .map_or(0.0, |(_, adapter)| adapter.bullet_radius);
                let (anchor_x, anchor_y) = self
                    .point_position(&target.field, target.row)?
                    .unwrap_or((x, y));
                self.interaction.show_tooltip(
                    text,
                    anchor_x,
                    anchor_y - radius - TOOLTIP_OFFSET_PX,
                );
            }
            None => self.interaction.hide_tooltip(),
        }
        self.interaction.set_hovered(hit);
        if changed {
            self.render()?;
        }
        Ok(())
    }
}
