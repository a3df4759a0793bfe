//! Host-facing chart editor.
//!
//! `ChartEditor` is split across controller files, each adding one concern
//! (drag, swap, trend refit, tooltip, projection, rendering, snapshots) as
//! another `impl` block on the same type.

pub mod adapter;
mod axis_ticks;
mod chart_kind;
mod config;
mod drag_controller;
mod editor;
mod editor_snapshot;
mod json_contract;
pub mod label_format;
mod plot_model;
mod render_frame_builder;
mod series_projection;
mod snapshot_controller;
mod swap_controller;
mod theme;
mod tooltip_controller;
mod trend_controller;
mod validation;

pub use adapter::{
    KIND_DEFAULTS, KindDefaults, SeriesAdapter, SeriesShape, TrendAdapter, build_series_adapters,
    build_trend_adapters, kind_defaults, parse_dash,
};
pub use chart_kind::{ChartKind, XKind};
pub use config::{
    AxisConfig, ButtonConfig, ChartConfig, DEFAULT_COLUMN_WIDTH, DEFAULT_NUMBER_FORMAT,
    FieldStyle, ImageConfig, SeriesSpec, TrendConfig,
};
pub use drag_controller::{HIT_TOLERANCE_PX, PointerOutcome};
pub use editor::ChartEditor;
pub use editor_snapshot::EditorSnapshot;
pub use json_contract::{EDITOR_SNAPSHOT_JSON_SCHEMA_V1, EditorSnapshotJsonContractV1};
pub use label_format::{DEFAULT_DATE_FORMAT, format_date, format_number, render_template};
pub use plot_model::{PlotModel, PlotRow, PlotX, XAxis};
pub use swap_controller::ButtonBounds;
pub use theme::Theme;
