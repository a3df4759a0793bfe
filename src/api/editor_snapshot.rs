use serde::{Deserialize, Serialize};

use crate::core::{PlotArea, TrendSeries, Viewport};
use crate::host::ChangeRecord;
use crate::interaction::{DragTarget, InteractionMode, TooltipState};

use super::{ChartKind, PlotRow};

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorSnapshot {
    pub kind: ChartKind,
    pub host_id: String,
    pub viewport: Viewport,
    pub plot_area: PlotArea,
    pub value_domain: (f64, f64),
    /// Linear x domain; `None` on category axes.
    pub x_domain: Option<(f64, f64)>,
    /// Category names in row order; `None` on linear axes.
    pub categories: Option<Vec<String>>,
    pub rows: Vec<PlotRow>,
    pub trends: Vec<TrendSeries>,
    pub interaction_mode: InteractionMode,
    pub drag_target: Option<DragTarget>,
    pub hovered: Option<DragTarget>,
    pub tooltip: TooltipState,
    pub last_change: Option<ChangeRecord>,
}
