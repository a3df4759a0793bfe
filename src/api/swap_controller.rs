use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::core::CellValue;
use crate::error::{ChartError, ChartResult};
use crate::host::HostMessage;
use crate::render::Renderer;

use super::ChartEditor;
use super::trend_controller::TrendSource;

const BUTTON_HEIGHT_PX: f64 = 26.0;
const BUTTON_MARGIN_PX: f64 = 8.0;
const BUTTON_MIN_WIDTH_PX: f64 = 80.0;
const BUTTON_CHAR_WIDTH_PX: f64 = 7.0;

/// Pixel box of the swap button.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ButtonBounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ButtonBounds {
    #[must_use]
    pub fn contains(self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

impl<R: Renderer> ChartEditor<R> {
    #[must_use]
    pub fn has_alternate_data(&self) -> bool {
        self.config.alternate_data.is_some()
    }

    /// Swap button placement, top right; `None` unless a button label and an
    /// alternate dataset are both configured.
    #[must_use]
    pub fn swap_button_bounds(&self) -> Option<ButtonBounds> {
        let button = self.config.button.as_ref()?;
        self.config.alternate_data.as_ref()?;
        let width = (button.label.chars().count() as f64 * BUTTON_CHAR_WIDTH_PX
            + 2.0 * BUTTON_MARGIN_PX)
            .max(BUTTON_MIN_WIDTH_PX);
        Some(ButtonBounds {
            x: f64::from(self.config.viewport.width) - width - BUTTON_MARGIN_PX,
            y: BUTTON_MARGIN_PX,
            width,
            height: BUTTON_HEIGHT_PX,
        })
    }

    /// Replaces every configured value with the alternate dataset's.
    ///
    /// Plotted rows and the local copy change together, trends refit from
    /// the alternate data, then the host receives the full dataset followed
    /// by a `null` change. An active drag is cancelled first.
    pub fn swap(&mut self) -> ChartResult<()> {
        let alternate = self
            .config
            .alternate_data
            .as_ref()
            .ok_or_else(|| ChartError::InvalidData("no alternate dataset to swap in".to_owned()))?;
        if alternate.len() != self.local.len() {
            return Err(ChartError::InvalidData(format!(
                "alternate data has {} rows, expected {}",
                alternate.len(),
                self.local.len()
            )));
        }

        let fields: Vec<String> = self
            .config
            .series_fields()
            .into_iter()
            .map(str::to_owned)
            .collect();
        let mut updates: Vec<(usize, String, CellValue)> =
            Vec::with_capacity(alternate.len() * fields.len());
        for row in 0..alternate.len() {
            for field in &fields {
                let cell = alternate.cell(row, field)?.clone();
                if let CellValue::Text(text) = &cell {
                    return Err(ChartError::InvalidData(format!(
                        "alternate value `{text}` for `{field}` at row {row} is not numeric"
                    )));
                }
                updates.push((row, field.clone(), cell));
            }
        }

        self.cancel_drag()?;
        for (row, field, cell) in updates {
            self.model.set_value(row, &field, cell.as_f64())?;
            self.local.set_cell(row, &field, cell)?;
        }
        self.refit_all_trends(TrendSource::Alternate)?;
        self.render()?;

        self.send_dataframe();
        self.sink
            .send(HostMessage::new(self.keys.change(), Value::Null));
        self.last_change = None;
        debug!(
            id = self.keys.base(),
            rows = self.local.len(),
            fields = fields.len(),
            "swapped in alternate data"
        );
        Ok(())
    }
}
