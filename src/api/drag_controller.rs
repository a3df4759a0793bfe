use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{AxisDirection, TREND_PRECISION_DIGITS, round_significant};
use crate::error::{ChartError, ChartResult};
use crate::host::{ChangeRecord, HostMessage};
use crate::interaction::{DragBounds, DragTarget, InteractionMode};
use crate::render::Renderer;

use super::ChartEditor;
use super::trend_controller::TrendSource;

/// Extra pixels around a bullet that still count as a hit.
pub const HIT_TOLERANCE_PX: f64 = 2.0;

/// Result of a pointer press.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerOutcome {
    Ignored,
    DragStarted(DragTarget),
    SwapActivated,
}

impl<R: Renderer> ChartEditor<R> {
    /// Handles a pointer press at pixel `(x, y)`.
    ///
    /// The swap button wins over data points; otherwise the closest
    /// draggable bullet (or, on bar charts, the bar under the pointer)
    /// starts a drag. The handle keeps its offset from the press point, so a
    /// drag started on a bar body moves the bar end with the pointer.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> ChartResult<PointerOutcome> {
        if self.interaction.mode() == InteractionMode::Dragging {
            return Ok(PointerOutcome::Ignored);
        }
        if self
            .swap_button_bounds()
            .is_some_and(|bounds| bounds.contains(x, y))
        {
            self.swap()?;
            return Ok(PointerOutcome::SwapActivated);
        }
        let Some(target) = self.hit_test(x, y, true)? else {
            return Ok(PointerOutcome::Ignored);
        };
        self.begin_drag(&target.field, target.row)?;
        if let Some((handle_x, handle_y)) = self.point_position(&target.field, target.row)? {
            self.interaction.set_grab_offset(x - handle_x, y - handle_y);
        }
        self.interaction.on_pointer_move(x, y);
        Ok(PointerOutcome::DragStarted(target))
    }

    /// Starts dragging `[row, field]` without hit-testing.
    pub fn begin_drag(&mut self, field: &str, row: usize) -> ChartResult<DragTarget> {
        let (_, adapter) = self
            .series_for_field(field)
            .ok_or_else(|| ChartError::UnknownField(field.to_owned()))?;
        if !adapter.is_field_draggable(field) {
            return Err(ChartError::InvalidData(format!(
                "field `{field}` is not draggable"
            )));
        }
        let value = self.model.value(row, field)?.ok_or_else(|| {
            ChartError::InvalidData(format!("row {row} has no value for `{field}`"))
        })?;

        let target = DragTarget::new(field, row);
        let bounds = self.drag_bounds_for(&target)?;
        if !self.interaction.on_drag_start(target.clone(), bounds, value) {
            return Err(ChartError::InvalidData(
                "a drag is already in progress".to_owned(),
            ));
        }
        trace!(field, row, value, "drag started");
        self.render()?;
        Ok(target)
    }

    /// Moves the pointer.
    ///
    /// While dragging, the pointer is clamped to the target's drag box and
    /// the value under it is written into the plotted row; the live value is
    /// returned. While idle, hover and tooltip follow the pointer.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> ChartResult<Option<f64>> {
        let Some(target) = self.interaction.drag_target().cloned() else {
            self.interaction.on_pointer_move(x, y);
            self.update_hover(x, y)?;
            return Ok(None);
        };

        let (clamped_x, clamped_y) = self.interaction.on_pointer_move(x, y);
        let pixel = match self.config.kind.value_direction() {
            AxisDirection::Vertical => clamped_y,
            AxisDirection::Horizontal => clamped_x,
        };
        let scale = self.model.value_scale();
        let value = round_significant(
            scale.clamp(self.model.pixel_to_value(pixel)?),
            TREND_PRECISION_DIGITS,
        );
        self.model.set_value(target.row, &target.field, Some(value))?;
        self.interaction.set_live_value(value);
        let bounds = self.drag_bounds_for(&target)?;
        self.interaction.set_drag_bounds(bounds);
        trace!(field = %target.field, row = target.row, value, "drag step");
        self.render()?;
        Ok(Some(value))
    }

    /// Ends the drag, commits the value and notifies the host.
    ///
    /// Returns `None` when no drag was active.
    pub fn pointer_up(&mut self) -> ChartResult<Option<ChangeRecord>> {
        let Some((target, value)) = self.interaction.on_drag_end() else {
            return Ok(None);
        };
        self.model.set_value(target.row, &target.field, Some(value))?;
        self.local.set_number(target.row, &target.field, value)?;
        self.refit_trend(&target.field, TrendSource::Local)?;

        let record = ChangeRecord {
            index: target.row,
            x_key: self.config.kind.change_x_key(),
            x: self.local.cell(target.row, &self.config.x_field)?.clone(),
            field: target.field,
            value,
        };
        self.sink
            .send(HostMessage::new(self.keys.change(), record.to_payload()));
        debug!(
            index = record.index,
            field = %record.field,
            value = record.value,
            "committed drag"
        );
        self.last_change = Some(record.clone());
        self.render()?;
        Ok(Some(record))
    }

    /// Aborts the drag and restores the value it started from.
    ///
    /// Nothing is sent to the host. Returns `false` when no drag was active.
    pub fn cancel_drag(&mut self) -> ChartResult<bool> {
        let Some((target, start_value)) = self.interaction.on_drag_cancel() else {
            return Ok(false);
        };
        self.model
            .set_value(target.row, &target.field, Some(start_value))?;
        trace!(field = %target.field, row = target.row, "drag cancelled");
        self.render()?;
        Ok(true)
    }

    /// Pointer left the chart: clears hover and tooltip. An active drag
    /// keeps going until `pointer_up` or `cancel_drag`.
    pub fn pointer_leave(&mut self) -> ChartResult<()> {
        self.interaction.on_pointer_leave();
        self.render()
    }

    /// Clamp box for dragging `target`: pinned at the handle's cross-axis
    /// position and spanning the whole value axis.
    pub fn drag_bounds_for(&self, target: &DragTarget) -> ChartResult<DragBounds> {
        let (x, y) = self
            .point_position(&target.field, target.row)?
            .ok_or_else(|| {
                ChartError::InvalidData(format!(
                    "row {} has no value for `{}`",
                    target.row, target.field
                ))
            })?;
        let motion = self.config.kind.value_direction();
        let anchor = match motion {
            AxisDirection::Vertical => x,
            AxisDirection::Horizontal => y,
        };
        let (start, end) = self.model.value_extent();
        Ok(DragBounds::locked(motion, anchor, start, end))
    }

    /// Finds the data cell under `(x, y)`.
    ///
    /// Bullets are matched by distance, closest first; bar charts fall back
    /// to the bar rectangle under the pointer.
    pub fn hit_test(
        &self,
        x: f64,
        y: f64,
        draggable_only: bool,
    ) -> ChartResult<Option<DragTarget>> {
        let mut best: Option<(f64, DragTarget)> = None;
        for adapter in self.series.iter().rev() {
            let fields =
                std::iter::once(adapter.field.as_str()).chain(adapter.open_field.as_deref());
            for field in fields {
                if draggable_only && !adapter.is_field_draggable(field) {
                    continue;
                }
                let reach = adapter.bullet_radius + HIT_TOLERANCE_PX;
                for point in self.project_points(field)? {
                    let distance = (point.x - x).hypot(point.y - y);
                    if distance <= reach && best.as_ref().is_none_or(|(d, _)| distance < *d) {
                        best = Some((distance, DragTarget::new(field, point.row)));
                    }
                }
            }
        }
        if let Some((_, target)) = best {
            return Ok(Some(target));
        }

        if self.config.kind.is_bar() {
            for adapter in self.series.iter().rev() {
                if draggable_only && !adapter.draggable {
                    continue;
                }
                if let Some(bar) = self
                    .project_bars(&adapter.field)?
                    .into_iter()
                    .find(|bar| bar.contains(x, y))
                {
                    return Ok(Some(DragTarget::new(adapter.field.clone(), bar.row)));
                }
            }
        }
        Ok(None)
    }
}
