use crate::core::{
    AxisDirection, CornerRadii, project_line_segments, smooth_polyline, unix_seconds_to_datetime,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    CirclePrimitive, Color, LinePrimitive, PolygonPrimitive, RectPrimitive, RenderFrame, Renderer,
    TextHAlign, TextPrimitive,
};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

use super::axis_ticks::{
    AXIS_VALUE_TARGET_SPACING_PX, AXIS_X_TARGET_SPACING_PX, axis_tick_target_count, axis_ticks,
};
use super::label_format::format_number;
use super::{ChartEditor, PlotX, SeriesAdapter, SeriesShape, XAxis};

const LABEL_FONT_PX: f64 = 11.0;
const TITLE_FONT_PX: f64 = 16.0;
const SMOOTHING_STEPS: usize = 8;
const HOVER_BULLET_SCALE: f64 = 1.25;
const HOVER_BORDER_WIDTH_PX: f64 = 2.0;
const GRID_ALPHA: f64 = 0.15;
const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

impl<R: Renderer> ChartEditor<R> {
    /// Builds and submits the current frame.
    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_render_frame()?;
        self.renderer.render(&frame)
    }

    /// Renders the frame into an external cairo context.
    ///
    /// Used by toolkit draw callbacks while keeping the renderer decoupled
    /// from toolkit-specific APIs.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> ChartResult<()>
    where
        R: CairoContextRenderer,
    {
        let frame = self.build_render_frame()?;
        self.renderer.render_on_cairo_context(context, &frame)
    }

    /// Scene for the current state: axes, series, trends, bullets, then
    /// decorations and the tooltip on top.
    pub fn build_render_frame(&self) -> ChartResult<RenderFrame> {
        let mut frame = RenderFrame::new(self.config.viewport);
        let foreground = Color::from_hex(self.config.theme.foreground())?;

        self.append_axis_primitives(&mut frame, foreground)?;
        for adapter in &self.series {
            match adapter.shape {
                SeriesShape::Column | SeriesShape::Bar => {
                    self.append_bar_primitives(&mut frame, adapter)?;
                }
                SeriesShape::Line => {
                    self.append_curve_primitives(&mut frame, adapter, &adapter.field)?;
                }
                SeriesShape::Bullet => {}
                SeriesShape::RangeArea => {
                    self.append_range_area_primitives(&mut frame, adapter)?;
                }
            }
        }
        self.append_trend_primitives(&mut frame)?;
        for adapter in &self.series {
            self.append_bullet_primitives(&mut frame, adapter)?;
        }
        self.append_decoration_primitives(&mut frame, foreground)?;
        self.append_tooltip_primitives(&mut frame, foreground);
        Ok(frame)
    }

    fn is_series_hovered(&self, adapter: &SeriesAdapter) -> bool {
        self.interaction
            .hovered()
            .is_some_and(|target| adapter.owns_field(&target.field))
    }

    fn append_axis_primitives(
        &self,
        frame: &mut RenderFrame,
        foreground: Color,
    ) -> ChartResult<()> {
        let area = self.model.area();
        let grid = foreground.with_alpha(GRID_ALPHA);
        let value_direction = self.config.kind.value_direction();
        let (_, value_span) = value_direction.extent(area);
        let value_format = self
            .config
            .value_axis
            .label_format
            .as_deref()
            .unwrap_or(self.config.number_format.as_str());

        let tick_count = axis_tick_target_count(value_span, AXIS_VALUE_TARGET_SPACING_PX, 2, 11);
        for tick in axis_ticks(self.model.value_scale().domain(), tick_count) {
            let pixel = self.model.value_to_pixel(tick)?;
            let label = format_number(tick, value_format);
            match value_direction {
                AxisDirection::Vertical => {
                    frame.lines.push(LinePrimitive::new(
                        area.left,
                        pixel,
                        area.right(),
                        pixel,
                        1.0,
                        grid,
                    ));
                    frame.texts.push(TextPrimitive::new(
                        label,
                        area.left - 6.0,
                        pixel - LABEL_FONT_PX * 0.5,
                        LABEL_FONT_PX,
                        foreground,
                        TextHAlign::Right,
                    ));
                }
                AxisDirection::Horizontal => {
                    frame.lines.push(LinePrimitive::new(
                        pixel,
                        area.top,
                        pixel,
                        area.bottom(),
                        1.0,
                        grid,
                    ));
                    frame.texts.push(TextPrimitive::new(
                        label,
                        pixel,
                        area.bottom() + 4.0,
                        LABEL_FONT_PX,
                        foreground,
                        TextHAlign::Center,
                    ));
                }
            }
        }

        let x_direction = self.config.kind.x_direction();
        let mut x_labels: Vec<(f64, String)> = Vec::new();
        match self.model.x_axis() {
            XAxis::Category(categories) => {
                for (index, name) in categories.categories().into_iter().enumerate() {
                    if name.is_empty() {
                        continue;
                    }
                    let center = categories.band_center(index, area, x_direction)?;
                    x_labels.push((center, name.to_owned()));
                }
            }
            XAxis::Linear(scale) => {
                let (_, x_span) = x_direction.extent(area);
                let count = axis_tick_target_count(x_span, AXIS_X_TARGET_SPACING_PX, 2, 8);
                for tick in axis_ticks(scale.domain(), count) {
                    let pixel = scale.domain_to_pixel(tick, area, x_direction)?;
                    let label = self.x_tick_label(tick);
                    x_labels.push((pixel, label));
                }
            }
        }
        for (pixel, label) in x_labels {
            let text = match x_direction {
                AxisDirection::Horizontal => TextPrimitive::new(
                    label,
                    pixel,
                    area.bottom() + 4.0,
                    LABEL_FONT_PX,
                    foreground,
                    TextHAlign::Center,
                ),
                AxisDirection::Vertical => TextPrimitive::new(
                    label,
                    area.left - 6.0,
                    pixel - LABEL_FONT_PX * 0.5,
                    LABEL_FONT_PX,
                    foreground,
                    TextHAlign::Right,
                ),
            };
            frame.texts.push(text);
        }

        frame.lines.push(LinePrimitive::new(
            area.left,
            area.bottom(),
            area.right(),
            area.bottom(),
            1.0,
            foreground,
        ));
        frame.lines.push(LinePrimitive::new(
            area.left,
            area.top,
            area.left,
            area.bottom(),
            1.0,
            foreground,
        ));
        Ok(())
    }

    fn x_tick_label(&self, coordinate: f64) -> String {
        match self.date_field() {
            Some(_) => match unix_seconds_to_datetime(coordinate) {
                Ok(time) => self.x_label(&PlotX::Date(time)),
                Err(_) => format_number(coordinate, &self.config.number_format),
            },
            None => self.x_label(&PlotX::Number(coordinate)),
        }
    }

    fn append_bar_primitives(
        &self,
        frame: &mut RenderFrame,
        adapter: &SeriesAdapter,
    ) -> ChartResult<()> {
        let hovered_row = self
            .interaction
            .hovered()
            .filter(|target| target.field == adapter.field)
            .map(|target| target.row);
        let fill = adapter.color.with_alpha(adapter.fill_opacity);
        for bar in self.project_bars(&adapter.field)? {
            let mut rect = RectPrimitive::new(bar.x, bar.y, bar.width, bar.height, fill)
                .with_corners(bar.corners);
            if hovered_row == Some(bar.row) {
                rect = rect.with_border(
                    adapter.stroke_color,
                    adapter.stroke_width.max(HOVER_BORDER_WIDTH_PX),
                );
            } else if adapter.stroke_width > 0.0 {
                rect = rect.with_border(adapter.stroke_color, adapter.stroke_width);
            }
            frame.rects.push(rect);
        }
        Ok(())
    }

    fn append_curve_primitives(
        &self,
        frame: &mut RenderFrame,
        adapter: &SeriesAdapter,
        field: &str,
    ) -> ChartResult<()> {
        let width = if self.is_series_hovered(adapter) {
            adapter.stroke_width + 1.0
        } else {
            adapter.stroke_width
        };
        if width <= 0.0 {
            return Ok(());
        }
        let vertices: Vec<(f64, f64)> = self
            .model
            .project_points(field)?
            .into_iter()
            .map(|point| (point.x, point.y))
            .collect();
        let curve = smooth_polyline(&vertices, adapter.tension, SMOOTHING_STEPS)?;
        for segment in project_line_segments(&curve) {
            frame.lines.push(
                LinePrimitive::new(
                    segment.x1,
                    segment.y1,
                    segment.x2,
                    segment.y2,
                    width,
                    adapter.stroke_color,
                )
                .with_dash(adapter.dash.clone()),
            );
        }
        Ok(())
    }

    fn append_range_area_primitives(
        &self,
        frame: &mut RenderFrame,
        adapter: &SeriesAdapter,
    ) -> ChartResult<()> {
        let open_field = adapter.open_field.as_deref().ok_or_else(|| {
            ChartError::InvalidData(format!("series `{}` has no open field", adapter.field))
        })?;
        let band = self.project_range_band(&adapter.field)?;
        let outline = band.outline();
        if adapter.fill_opacity > 0.0 && outline.len() >= 3 {
            frame.polygons.push(PolygonPrimitive::new(
                outline,
                adapter.color.with_alpha(adapter.fill_opacity),
            ));
        }
        self.append_curve_primitives(frame, adapter, &adapter.field)?;
        self.append_curve_primitives(frame, adapter, open_field)
    }

    fn append_trend_primitives(&self, frame: &mut RenderFrame) -> ChartResult<()> {
        for style in &self.trend_styles {
            if style.width <= 0.0 {
                continue;
            }
            let curve = self.project_trend(&style.field)?;
            for segment in project_line_segments(&curve) {
                frame.lines.push(
                    LinePrimitive::new(
                        segment.x1,
                        segment.y1,
                        segment.x2,
                        segment.y2,
                        style.width,
                        style.color,
                    )
                    .with_dash(style.dash.clone()),
                );
            }
        }
        Ok(())
    }

    fn append_bullet_primitives(
        &self,
        frame: &mut RenderFrame,
        adapter: &SeriesAdapter,
    ) -> ChartResult<()> {
        if adapter.bullet_radius <= 0.0 {
            return Ok(());
        }
        let hovered = self.interaction.hovered();
        let fields = std::iter::once(adapter.field.as_str()).chain(adapter.open_field.as_deref());
        for field in fields {
            let draggable = adapter.is_field_draggable(field);
            if !draggable && !adapter.static_bullets {
                continue;
            }
            for point in self.project_points(field)? {
                let is_hovered =
                    hovered.is_some_and(|target| target.field == field && target.row == point.row);
                let radius = if is_hovered {
                    adapter.bullet_radius * HOVER_BULLET_SCALE
                } else {
                    adapter.bullet_radius
                };
                let bullet = if draggable {
                    CirclePrimitive::new(point.x, point.y, radius, adapter.color)
                        .with_stroke(WHITE, 2.0)
                } else {
                    CirclePrimitive::new(point.x, point.y, radius, adapter.color)
                        .with_stroke(adapter.stroke_color, adapter.stroke_width)
                };
                frame.circles.push(bullet);
            }
        }
        Ok(())
    }

    fn append_decoration_primitives(
        &self,
        frame: &mut RenderFrame,
        foreground: Color,
    ) -> ChartResult<()> {
        let area = self.model.area();
        let width = f64::from(self.config.viewport.width);
        let height = f64::from(self.config.viewport.height);

        if let Some(title) = self.config.title.as_deref().filter(|t| !t.is_empty()) {
            frame.texts.push(TextPrimitive::new(
                title,
                width * 0.5,
                8.0,
                TITLE_FONT_PX,
                foreground,
                TextHAlign::Center,
            ));
        }
        if let Some(caption) = self.config.caption.as_deref().filter(|c| !c.is_empty()) {
            frame.texts.push(TextPrimitive::new(
                caption,
                width - 8.0,
                height - LABEL_FONT_PX - 2.0,
                LABEL_FONT_PX,
                foreground,
                TextHAlign::Right,
            ));
        }
        if let Some(title) = self
            .config
            .value_axis
            .title
            .as_deref()
            .filter(|t| !t.is_empty())
        {
            frame.texts.push(TextPrimitive::new(
                title,
                area.left,
                area.top - LABEL_FONT_PX - 4.0,
                LABEL_FONT_PX,
                foreground,
                TextHAlign::Left,
            ));
        }
        if let Some(title) = self.config.x_axis.title.as_deref().filter(|t| !t.is_empty()) {
            frame.texts.push(TextPrimitive::new(
                title,
                area.right(),
                area.bottom() + LABEL_FONT_PX + 4.0,
                LABEL_FONT_PX,
                foreground,
                TextHAlign::Right,
            ));
        }

        if self.config.legend {
            let mut x = area.left;
            for adapter in &self.series {
                frame.rects.push(RectPrimitive::new(
                    x,
                    area.top - 22.0,
                    10.0,
                    10.0,
                    adapter.color,
                ));
                frame.texts.push(TextPrimitive::new(
                    adapter.name.clone(),
                    x + 14.0,
                    area.top - 24.0,
                    LABEL_FONT_PX,
                    foreground,
                    TextHAlign::Left,
                ));
                x += 14.0 + adapter.name.chars().count() as f64 * 7.0 + 12.0;
            }
        }

        if let (Some(bounds), Some(button)) = (self.swap_button_bounds(), &self.config.button) {
            let fill = match button.color.as_deref() {
                Some(hex) => Color::from_hex(hex)?,
                None => Color::from_hex(self.config.theme.series_color(0))?,
            };
            frame.rects.push(
                RectPrimitive::new(bounds.x, bounds.y, bounds.width, bounds.height, fill)
                    .with_corners(CornerRadii::uniform(4.0)),
            );
            if !button.label.is_empty() {
                frame.texts.push(TextPrimitive::new(
                    button.label.clone(),
                    bounds.x + bounds.width * 0.5,
                    bounds.y + (bounds.height - LABEL_FONT_PX) * 0.5,
                    LABEL_FONT_PX,
                    WHITE,
                    TextHAlign::Center,
                ));
            }
        }
        Ok(())
    }

    fn append_tooltip_primitives(&self, frame: &mut RenderFrame, foreground: Color) {
        let tooltip = self.interaction.tooltip();
        if !tooltip.visible || self.interaction.tooltip_suppressed() {
            return;
        }
        for (line, text) in tooltip.text.lines().enumerate() {
            if text.is_empty() {
                continue;
            }
            let lines_above = tooltip.text.lines().count() - line;
            frame.texts.push(TextPrimitive::new(
                text,
                tooltip.x,
                tooltip.y - lines_above as f64 * (LABEL_FONT_PX + 2.0),
                LABEL_FONT_PX,
                foreground,
                TextHAlign::Center,
            ));
        }
    }
}
