use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(640, 400)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Space reserved around the plot for titles, axes and controls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotInsets {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for PlotInsets {
    fn default() -> Self {
        Self {
            top: 40.0,
            right: 20.0,
            bottom: 30.0,
            left: 50.0,
        }
    }
}

/// Pixel rectangle in which series are drawn and dragged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> ChartResult<Self> {
        if !left.is_finite() || !top.is_finite() {
            return Err(ChartError::InvalidData(
                "plot area origin must be finite".to_owned(),
            ));
        }
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(ChartError::InvalidData(
                "plot area size must be finite and > 0".to_owned(),
            ));
        }
        Ok(Self {
            left,
            top,
            width,
            height,
        })
    }

    pub fn from_viewport(viewport: Viewport, insets: PlotInsets) -> ChartResult<Self> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        Self::new(
            insets.left,
            insets.top,
            f64::from(viewport.width) - insets.left - insets.right,
            f64::from(viewport.height) - insets.top - insets.bottom,
        )
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    #[must_use]
    pub fn contains(self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right() && y >= self.top && y <= self.bottom()
    }
}

/// One cell of a host-supplied table.
///
/// Untagged so host JSON maps onto it directly: numbers, strings and `null`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Null,
    Number(f64),
    Text(String),
}

impl CellValue {
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) if value.is_finite() => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Text used for categories and tooltip interpolation.
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Number(value) => value.to_string(),
            Self::Text(text) => text.clone(),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Ordered field name to value mapping for one observation.
pub type DataRow = IndexMap<String, CellValue>;

/// Row-ordered table exchanged with the host.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataTable {
    rows: Vec<DataRow>,
}

impl DataTable {
    #[must_use]
    pub fn new(rows: Vec<DataRow>) -> Self {
        Self { rows }
    }

    #[must_use]
    pub fn rows(&self) -> &[DataRow] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, row: usize) -> ChartResult<&DataRow> {
        self.rows.get(row).ok_or(ChartError::RowOutOfRange {
            row,
            len: self.rows.len(),
        })
    }

    /// Returns the cell at `[row, field]`; absent fields read as `Null`.
    pub fn cell(&self, row: usize, field: &str) -> ChartResult<&CellValue> {
        static NULL: CellValue = CellValue::Null;
        Ok(self.row(row)?.get(field).unwrap_or(&NULL))
    }

    pub fn number(&self, row: usize, field: &str) -> ChartResult<Option<f64>> {
        Ok(self.cell(row, field)?.as_f64())
    }

    pub fn set_number(&mut self, row: usize, field: &str, value: f64) -> ChartResult<()> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData(format!(
                "value for `{field}` must be finite"
            )));
        }
        self.set_cell(row, field, CellValue::Number(value))
    }

    pub fn set_cell(&mut self, row: usize, field: &str, value: CellValue) -> ChartResult<()> {
        let len = self.rows.len();
        let entry = self
            .rows
            .get_mut(row)
            .ok_or(ChartError::RowOutOfRange { row, len })?;
        entry.insert(field.to_owned(), value);
        Ok(())
    }

    /// Numeric column; non-numeric cells read as `None`.
    #[must_use]
    pub fn column_numbers(&self, field: &str) -> Vec<Option<f64>> {
        self.rows
            .iter()
            .map(|row| row.get(field).and_then(CellValue::as_f64))
            .collect()
    }

    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.rows.iter().any(|row| row.contains_key(field))
    }

    /// Keeps only `fields`, in the given order, for every row.
    #[must_use]
    pub fn project(&self, fields: &[&str]) -> Self {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                fields
                    .iter()
                    .filter_map(|field| {
                        row.get(*field)
                            .map(|value| ((*field).to_owned(), value.clone()))
                    })
                    .collect()
            })
            .collect();
        Self { rows }
    }
}

impl From<Vec<DataRow>> for DataTable {
    fn from(rows: Vec<DataRow>) -> Self {
        Self::new(rows)
    }
}
