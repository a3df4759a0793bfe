use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless hosts.
///
/// It still validates frame content and keeps the last frame so tests can
/// inspect geometry without a drawing backend.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub render_count: usize,
    pub last_frame: Option<RenderFrame>,
}

impl NullRenderer {
    #[must_use]
    pub fn last_rect_count(&self) -> usize {
        self.last_frame.as_ref().map_or(0, |frame| frame.rects.len())
    }

    #[must_use]
    pub fn last_circle_count(&self) -> usize {
        self.last_frame.as_ref().map_or(0, |frame| frame.circles.len())
    }
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.render_count += 1;
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}
