use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{DataTable, Viewport};
use crate::error::{ChartError, ChartResult};

use super::{ChartKind, Theme, XKind};

pub const DEFAULT_NUMBER_FORMAT: &str = "#.##";
pub const DEFAULT_COLUMN_WIDTH: f64 = 0.8;

fn default_number_format() -> String {
    DEFAULT_NUMBER_FORMAT.to_owned()
}

fn default_column_width() -> f64 {
    DEFAULT_COLUMN_WIDTH
}

fn default_trend_order() -> usize {
    1
}

/// One plotted series: a value field, plus the lower field for range areas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "SeriesSpecInput")]
pub struct SeriesSpec {
    pub field: String,
    pub open_field: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SeriesSpecInput {
    Field(String),
    Spec {
        field: String,
        #[serde(default, rename = "openField")]
        open_field: Option<String>,
    },
}

impl From<SeriesSpecInput> for SeriesSpec {
    fn from(input: SeriesSpecInput) -> Self {
        match input {
            SeriesSpecInput::Field(field) => Self::single(field),
            SeriesSpecInput::Spec { field, open_field } => Self { field, open_field },
        }
    }
}

impl SeriesSpec {
    #[must_use]
    pub fn single(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            open_field: None,
        }
    }

    #[must_use]
    pub fn range(field: impl Into<String>, open_field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            open_field: Some(open_field.into()),
        }
    }

    /// Value field first, then the open field when present.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.field.as_str()).chain(self.open_field.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisConfig {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub title: Option<String>,
    /// Number or strftime pattern for tick labels.
    #[serde(default)]
    pub label_format: Option<String>,
}

/// Per-field styling; unset entries fall back to the chart kind defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldStyle {
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub stroke_color: Option<String>,
    #[serde(default)]
    pub stroke_width: Option<f64>,
    #[serde(default)]
    pub corner_radius: Option<f64>,
    /// Comma separated dash/gap lengths, e.g. `"4,2"`.
    #[serde(default)]
    pub dash: Option<String>,
    #[serde(default)]
    pub tension: Option<f64>,
    #[serde(default)]
    pub bullet_radius: Option<f64>,
    #[serde(default)]
    pub fill_opacity: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendConfig {
    #[serde(default = "default_trend_order")]
    pub order: usize,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub dash: Option<String>,
}

impl TrendConfig {
    #[must_use]
    pub fn with_order(order: usize) -> Self {
        Self {
            order,
            color: None,
            width: None,
            dash: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageConfig {
    pub href: String,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
}

/// Swap control shown when an alternate dataset is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonConfig {
    pub label: String,
    #[serde(default)]
    pub color: Option<String>,
}

/// Host-supplied configuration for one chart instance.
///
/// `kind`, `elementId`, `data`, `xField` (alias `categoryField`) and
/// `valueFields` are required; every other entry has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    pub kind: ChartKind,
    pub element_id: String,
    #[serde(default)]
    pub shiny_id: Option<String>,
    pub data: DataTable,
    #[serde(default, rename = "data2")]
    pub alternate_data: Option<DataTable>,
    #[serde(alias = "categoryField")]
    pub x_field: String,
    #[serde(default)]
    pub x_kind: Option<XKind>,
    pub value_fields: Vec<SeriesSpec>,
    #[serde(default)]
    pub value_names: IndexMap<String, String>,
    #[serde(default)]
    pub value_axis: AxisConfig,
    #[serde(default)]
    pub x_axis: AxisConfig,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub style: IndexMap<String, FieldStyle>,
    #[serde(default)]
    pub draggable: IndexMap<String, bool>,
    #[serde(default)]
    pub tooltip: IndexMap<String, String>,
    #[serde(default)]
    pub trend: IndexMap<String, TrendConfig>,
    #[serde(default)]
    pub legend: bool,
    #[serde(default)]
    pub scrollbar_x: bool,
    #[serde(default)]
    pub scrollbar_y: bool,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub image: Option<ImageConfig>,
    #[serde(default)]
    pub button: Option<ButtonConfig>,
    #[serde(default = "default_number_format")]
    pub number_format: String,
    #[serde(default)]
    pub date_format: Option<String>,
    #[serde(default = "default_column_width")]
    pub column_width: f64,
    #[serde(default)]
    pub viewport: Viewport,
}

impl ChartConfig {
    #[must_use]
    pub fn new(
        kind: ChartKind,
        element_id: impl Into<String>,
        x_field: impl Into<String>,
        data: DataTable,
    ) -> Self {
        Self {
            kind,
            element_id: element_id.into(),
            shiny_id: None,
            data,
            alternate_data: None,
            x_field: x_field.into(),
            x_kind: None,
            value_fields: Vec::new(),
            value_names: IndexMap::new(),
            value_axis: AxisConfig::default(),
            x_axis: AxisConfig::default(),
            theme: Theme::default(),
            style: IndexMap::new(),
            draggable: IndexMap::new(),
            tooltip: IndexMap::new(),
            trend: IndexMap::new(),
            legend: false,
            scrollbar_x: false,
            scrollbar_y: false,
            title: None,
            caption: None,
            image: None,
            button: None,
            number_format: default_number_format(),
            date_format: None,
            column_width: DEFAULT_COLUMN_WIDTH,
            viewport: Viewport::default(),
        }
    }

    /// Parses the host's JSON configuration.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse chart config: {e}")))
    }

    #[must_use]
    pub fn with_value_field(mut self, field: impl Into<String>) -> Self {
        self.value_fields.push(SeriesSpec::single(field));
        self
    }

    #[must_use]
    pub fn with_range_fields(
        mut self,
        field: impl Into<String>,
        open_field: impl Into<String>,
    ) -> Self {
        self.value_fields.push(SeriesSpec::range(field, open_field));
        self
    }

    #[must_use]
    pub fn with_value_name(mut self, field: impl Into<String>, name: impl Into<String>) -> Self {
        self.value_names.insert(field.into(), name.into());
        self
    }

    #[must_use]
    pub fn with_alternate_data(mut self, data: DataTable) -> Self {
        self.alternate_data = Some(data);
        self
    }

    #[must_use]
    pub fn with_shiny_id(mut self, id: impl Into<String>) -> Self {
        self.shiny_id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_x_kind(mut self, x_kind: XKind) -> Self {
        self.x_kind = Some(x_kind);
        self
    }

    #[must_use]
    pub fn with_value_axis(mut self, min: f64, max: f64) -> Self {
        self.value_axis.min = Some(min);
        self.value_axis.max = Some(max);
        self
    }

    #[must_use]
    pub fn with_x_axis(mut self, min: f64, max: f64) -> Self {
        self.x_axis.min = Some(min);
        self.x_axis.max = Some(max);
        self
    }

    #[must_use]
    pub fn with_draggable(mut self, field: impl Into<String>, draggable: bool) -> Self {
        self.draggable.insert(field.into(), draggable);
        self
    }

    #[must_use]
    pub fn with_style(mut self, field: impl Into<String>, style: FieldStyle) -> Self {
        self.style.insert(field.into(), style);
        self
    }

    #[must_use]
    pub fn with_tooltip(mut self, field: impl Into<String>, template: impl Into<String>) -> Self {
        self.tooltip.insert(field.into(), template.into());
        self
    }

    #[must_use]
    pub fn with_trend(mut self, field: impl Into<String>, order: usize) -> Self {
        self.trend
            .insert(field.into(), TrendConfig::with_order(order));
        self
    }

    #[must_use]
    pub fn with_button(mut self, label: impl Into<String>) -> Self {
        self.button = Some(ButtonConfig {
            label: label.into(),
            color: None,
        });
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_number_format(mut self, format: impl Into<String>) -> Self {
        self.number_format = format.into();
        self
    }

    #[must_use]
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = Some(format.into());
        self
    }

    #[must_use]
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    /// Identifier used to key host messages.
    #[must_use]
    pub fn host_id(&self) -> &str {
        self.shiny_id.as_deref().unwrap_or(&self.element_id)
    }

    #[must_use]
    pub fn effective_x_kind(&self) -> XKind {
        self.x_kind.unwrap_or_else(|| self.kind.default_x_kind())
    }

    /// Every plotted field, value fields before their open fields.
    #[must_use]
    pub fn series_fields(&self) -> Vec<&str> {
        self.value_fields.iter().flat_map(SeriesSpec::fields).collect()
    }

    #[must_use]
    pub fn is_draggable(&self, field: &str) -> bool {
        self.draggable.get(field).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn display_name<'a>(&'a self, field: &'a str) -> &'a str {
        self.value_names.get(field).map_or(field, String::as_str)
    }
}
