use serde::{Deserialize, Serialize};

use crate::core::AxisDirection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    Dragging,
}

/// Data cell addressed by a drag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DragTarget {
    pub field: String,
    pub row: usize,
}

impl DragTarget {
    #[must_use]
    pub fn new(field: impl Into<String>, row: usize) -> Self {
        Self {
            field: field.into(),
            row,
        }
    }
}

/// Box the pointer is clamped into while dragging.
///
/// Locked boxes are degenerate along the cross axis, so a point only moves
/// along its value axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragBounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl DragBounds {
    /// Builds a box spanning `[start, end]` along `motion` and pinned at
    /// `anchor` on the other axis.
    #[must_use]
    pub fn locked(motion: AxisDirection, anchor: f64, start: f64, end: f64) -> Self {
        let (low, high) = if start <= end {
            (start, end)
        } else {
            (end, start)
        };
        match motion {
            AxisDirection::Vertical => Self {
                left: anchor,
                top: low,
                right: anchor,
                bottom: high,
            },
            AxisDirection::Horizontal => Self {
                left: low,
                top: anchor,
                right: high,
                bottom: anchor,
            },
        }
    }

    #[must_use]
    pub fn clamp(self, x: f64, y: f64) -> (f64, f64) {
        (x.clamp(self.left, self.right), y.clamp(self.top, self.bottom))
    }
}

/// Tooltip shown for the hovered point while idle.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TooltipState {
    pub visible: bool,
    pub text: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ActiveDrag {
    target: DragTarget,
    bounds: DragBounds,
    start_value: f64,
    live_value: f64,
    grab_offset: (f64, f64),
}

/// Pointer-driven `Idle -> Dragging -> Idle` state machine.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionState {
    cursor_x: f64,
    cursor_y: f64,
    drag: Option<ActiveDrag>,
    hovered: Option<DragTarget>,
    tooltip: TooltipState,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            cursor_x: 0.0,
            cursor_y: 0.0,
            drag: None,
            hovered: None,
            tooltip: TooltipState::default(),
        }
    }
}

impl InteractionState {
    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        if self.drag.is_some() {
            InteractionMode::Dragging
        } else {
            InteractionMode::Idle
        }
    }

    #[must_use]
    pub fn cursor(&self) -> (f64, f64) {
        (self.cursor_x, self.cursor_y)
    }

    #[must_use]
    pub fn drag_target(&self) -> Option<&DragTarget> {
        self.drag.as_ref().map(|drag| &drag.target)
    }

    #[must_use]
    pub fn drag_bounds(&self) -> Option<DragBounds> {
        self.drag.as_ref().map(|drag| drag.bounds)
    }

    #[must_use]
    pub fn live_value(&self) -> Option<f64> {
        self.drag.as_ref().map(|drag| drag.live_value)
    }

    #[must_use]
    pub fn hovered(&self) -> Option<&DragTarget> {
        self.hovered.as_ref()
    }

    #[must_use]
    pub fn tooltip(&self) -> &TooltipState {
        &self.tooltip
    }

    /// Enters `Dragging`, hiding any tooltip. Returns `false` when a drag is
    /// already active.
    pub fn on_drag_start(&mut self, target: DragTarget, bounds: DragBounds, value: f64) -> bool {
        if self.drag.is_some() {
            return false;
        }
        self.hovered = Some(target.clone());
        self.hide_tooltip();
        self.drag = Some(ActiveDrag {
            target,
            bounds,
            start_value: value,
            live_value: value,
            grab_offset: (0.0, 0.0),
        });
        true
    }

    /// Re-pins the drag box after the dragged point moved on screen.
    pub fn set_drag_bounds(&mut self, bounds: DragBounds) {
        if let Some(drag) = self.drag.as_mut() {
            drag.bounds = bounds;
        }
    }

    /// Distance from the dragged handle to the point where the press landed.
    ///
    /// Subtracted from every later pointer position so the handle keeps its
    /// distance to the pointer instead of jumping under it.
    pub fn set_grab_offset(&mut self, dx: f64, dy: f64) {
        if let Some(drag) = self.drag.as_mut() {
            drag.grab_offset = (dx, dy);
        }
    }

    /// Records the pointer and returns the handle position it implies,
    /// clamped into the drag box.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) -> (f64, f64) {
        self.cursor_x = x;
        self.cursor_y = y;
        match self.drag.as_ref() {
            Some(drag) => drag
                .bounds
                .clamp(x - drag.grab_offset.0, y - drag.grab_offset.1),
            None => (x, y),
        }
    }

    pub fn set_live_value(&mut self, value: f64) {
        if let Some(drag) = self.drag.as_mut() {
            drag.live_value = value;
        }
    }

    /// Leaves `Dragging`, returning the target and its final value.
    pub fn on_drag_end(&mut self) -> Option<(DragTarget, f64)> {
        let drag = self.drag.take()?;
        self.hovered = None;
        Some((drag.target, drag.live_value))
    }

    /// Leaves `Dragging`, returning the target and the value it started at.
    pub fn on_drag_cancel(&mut self) -> Option<(DragTarget, f64)> {
        let drag = self.drag.take()?;
        self.hovered = None;
        Some((drag.target, drag.start_value))
    }

    pub fn set_hovered(&mut self, target: Option<DragTarget>) {
        if self.drag.is_none() {
            self.hovered = target;
        }
    }

    /// Shows a tooltip unless a drag is active.
    pub fn show_tooltip(&mut self, text: String, x: f64, y: f64) -> bool {
        if self.tooltip_suppressed() {
            return false;
        }
        self.tooltip = TooltipState {
            visible: true,
            text,
            x,
            y,
        };
        true
    }

    pub fn hide_tooltip(&mut self) {
        self.tooltip = TooltipState::default();
    }

    #[must_use]
    pub fn tooltip_suppressed(&self) -> bool {
        self.drag.is_some()
    }

    pub fn on_pointer_leave(&mut self) {
        self.set_hovered(None);
        self.hide_tooltip();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertical_bounds() -> DragBounds {
        DragBounds::locked(AxisDirection::Vertical, 120.0, 300.0, 40.0)
    }

    #[test]
    fn locked_bounds_pin_the_cross_axis() {
        let bounds = vertical_bounds();
        assert_eq!(bounds.clamp(500.0, 100.0), (120.0, 100.0));
        assert_eq!(bounds.clamp(-5.0, 10.0), (120.0, 40.0));
        assert_eq!(bounds.clamp(0.0, 900.0), (120.0, 300.0));
    }

    #[test]
    fn drag_cycle_returns_to_idle() {
        let mut state = InteractionState::default();
        assert!(state.on_drag_start(DragTarget::new("v", 0), vertical_bounds(), 10.0));
        assert_eq!(state.mode(), InteractionMode::Dragging);
        assert!(!state.on_drag_start(DragTarget::new("v", 1), vertical_bounds(), 3.0));

        state.set_live_value(12.5);
        let (target, value) = state.on_drag_end().expect("active drag");
        assert_eq!(target, DragTarget::new("v", 0));
        assert_eq!(value, 12.5);
        assert_eq!(state.mode(), InteractionMode::Idle);
        assert!(state.on_drag_end().is_none());
    }

    #[test]
    fn tooltips_are_suppressed_while_dragging() {
        let mut state = InteractionState::default();
        assert!(state.show_tooltip("A: 10".to_owned(), 1.0, 2.0));
        state.on_drag_start(DragTarget::new("v", 0), vertical_bounds(), 10.0);
        assert!(!state.tooltip().visible);
        assert!(!state.show_tooltip("A: 11".to_owned(), 1.0, 2.0));
    }

    #[test]
    fn grab_offset_shifts_the_clamped_pointer() {
        let mut state = InteractionState::default();
        state.on_drag_start(DragTarget::new("v", 0), vertical_bounds(), 10.0);
        state.set_grab_offset(3.0, 50.0);
        assert_eq!(state.on_pointer_move(123.0, 149.0), (120.0, 99.0));
        assert_eq!(state.cursor(), (123.0, 149.0));
        assert_eq!(state.on_pointer_move(120.0, 60.0), (120.0, 40.0));
    }

    #[test]
    fn cancel_reports_the_start_value() {
        let mut state = InteractionState::default();
        state.on_drag_start(DragTarget::new("v", 2), vertical_bounds(), -4.0);
        state.set_live_value(8.0);
        assert_eq!(
            state.on_drag_cancel(),
            Some((DragTarget::new("v", 2), -4.0))
        );
    }
}
