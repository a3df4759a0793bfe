//! chart-editor: interactive chart value editor.
//!
//! Renders bar, line, scatter and range-area charts from a host-supplied
//! table, lets users drag data points to new values, keeps polynomial trend
//! overlays in step with edits and reports every change back to the host
//! through an injected notification sink.

pub mod api;
pub mod core;
pub mod error;
pub mod host;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartConfig, ChartEditor, ChartKind, PointerOutcome};
pub use error::{ChartError, ChartResult};
