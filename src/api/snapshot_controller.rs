use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

use super::{ChartEditor, EditorSnapshot, XAxis};

impl<R: Renderer> ChartEditor<R> {
    /// Builds a deterministic snapshot useful for regression tests.
    #[must_use]
    pub fn snapshot(&self) -> EditorSnapshot {
        let (x_domain, categories) = match self.model.x_axis() {
            XAxis::Linear(scale) => (Some(scale.domain()), None),
            XAxis::Category(scale) => (
                None,
                Some(
                    scale
                        .categories()
                        .into_iter()
                        .map(str::to_owned)
                        .collect(),
                ),
            ),
        };
        EditorSnapshot {
            kind: self.config.kind,
            host_id: self.keys.base().to_owned(),
            viewport: self.config.viewport,
            plot_area: self.model.area(),
            value_domain: self.model.value_scale().domain(),
            x_domain,
            categories,
            rows: self.model.rows().to_vec(),
            trends: self.trends.clone(),
            interaction_mode: self.interaction.mode(),
            drag_target: self.interaction.drag_target().cloned(),
            hovered: self.interaction.hovered().cloned(),
            tooltip: self.interaction.tooltip().clone(),
            last_change: self.last_change.clone(),
        }
    }

    /// Serializes snapshot as pretty JSON for fixture-based regression checks.
    pub fn snapshot_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }
}
