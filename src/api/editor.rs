use tracing::debug;

use crate::core::{DataTable, PlotArea, TrendSeries, Viewport};
use crate::error::ChartResult;
use crate::host::{ChangeRecord, ChannelKeys, HostMessage, HostSink, dataframe_payload};
use crate::interaction::{DragTarget, InteractionMode, InteractionState, TooltipState};
use crate::render::Renderer;

use super::adapter::{build_series_adapters, build_trend_adapters};
use super::validation::validate_chart_config;
use super::{ChartConfig, ChartKind, PlotModel, PlotRow, SeriesAdapter, TrendAdapter, XKind};

/// Interactive chart bound to one host configuration.
///
/// `ChartEditor` owns the plotted model, the local copy reported back to the
/// host, the drag state machine and the renderer. Every mutation path keeps
/// the plotted values and the local copy equal for all configured fields.
pub struct ChartEditor<R: Renderer> {
    pub(super) renderer: R,
    pub(super) sink: Box<dyn HostSink>,
    pub(super) config: ChartConfig,
    pub(super) series: Vec<SeriesAdapter>,
    pub(super) trend_styles: Vec<TrendAdapter>,
    pub(super) keys: ChannelKeys,
    pub(super) model: PlotModel,
    pub(super) local: DataTable,
    pub(super) trends: Vec<TrendSeries>,
    pub(super) interaction: InteractionState,
    pub(super) last_change: Option<ChangeRecord>,
}

impl<R: Renderer> ChartEditor<R> {
    /// Validates `config`, builds the chart and sends the initial dataset.
    ///
    /// Missing required entries fail with `ChartError::InvalidConfig` before
    /// anything is sent to the host. The dataset goes out only after the
    /// first frame rendered.
    pub fn mount(
        config: ChartConfig,
        renderer: R,
        sink: impl HostSink + 'static,
    ) -> ChartResult<Self> {
        validate_chart_config(&config)?;
        let series = build_series_adapters(&config)?;
        let trend_styles = build_trend_adapters(&config, &series)?;
        let model = PlotModel::build(&config)?;

        let mut projected = vec![config.x_field.as_str()];
        projected.extend(config.series_fields());
        let local = config.data.project(&projected);
        let keys = ChannelKeys::new(config.host_id());

        let mut editor = Self {
            renderer,
            sink: Box::new(sink),
            config,
            series,
            trend_styles,
            keys,
            model,
            local,
            trends: Vec::new(),
            interaction: InteractionState::default(),
            last_change: None,
        };
        editor.trends = editor.build_trends()?;
        editor.render()?;
        editor.send_dataframe();
        debug!(
            kind = ?editor.config.kind,
            id = editor.keys.base(),
            rows = editor.local.len(),
            series = editor.series.len(),
            trends = editor.trends.len(),
            "mounted chart editor"
        );
        Ok(editor)
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn kind(&self) -> ChartKind {
        self.config.kind
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.config.viewport
    }

    #[must_use]
    pub fn plot_area(&self) -> PlotArea {
        self.model.area()
    }

    #[must_use]
    pub fn channel_keys(&self) -> &ChannelKeys {
        &self.keys
    }

    #[must_use]
    pub fn series(&self) -> &[SeriesAdapter] {
        &self.series
    }

    #[must_use]
    pub fn model(&self) -> &PlotModel {
        &self.model
    }

    #[must_use]
    pub fn plotted_rows(&self) -> &[PlotRow] {
        self.model.rows()
    }

    /// Local copy of the host data, projected onto the configured fields.
    #[must_use]
    pub fn local_data(&self) -> &DataTable {
        &self.local
    }

    #[must_use]
    pub fn value_domain(&self) -> (f64, f64) {
        self.model.value_scale().domain()
    }

    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.interaction.mode()
    }

    #[must_use]
    pub fn drag_target(&self) -> Option<&DragTarget> {
        self.interaction.drag_target()
    }

    #[must_use]
    pub fn hovered(&self) -> Option<&DragTarget> {
        self.interaction.hovered()
    }

    #[must_use]
    pub fn tooltip(&self) -> &TooltipState {
        self.interaction.tooltip()
    }

    /// Last change reported to the host; cleared by a swap.
    #[must_use]
    pub fn last_change(&self) -> Option<&ChangeRecord> {
        self.last_change.as_ref()
    }

    /// Whether plotted values and the local copy agree on every configured
    /// field of every row.
    #[must_use]
    pub fn is_synchronized(&self) -> bool {
        let fields = self.config.series_fields();
        self.model.rows().len() == self.local.len()
            && self.model.rows().iter().enumerate().all(|(row, plotted)| {
                fields.iter().all(|field| {
                    let local = self.local.number(row, field).ok().flatten();
                    plotted.values.get(*field).copied() == local
                })
            })
    }

    /// Pixel position of a value on the value axis.
    pub fn value_to_pixel(&self, value: f64) -> ChartResult<f64> {
        self.model.value_to_pixel(value)
    }

    /// Value at a pixel position on the value axis.
    pub fn pixel_to_value(&self, pixel: f64) -> ChartResult<f64> {
        self.model.pixel_to_value(pixel)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Tears the chart down and hands the renderer back.
    #[must_use]
    pub fn dispose(self) -> R {
        debug!(id = self.keys.base(), "disposed chart editor");
        self.renderer
    }

    pub(super) fn date_field(&self) -> Option<&str> {
        (self.config.effective_x_kind() == XKind::Date).then_some(self.config.x_field.as_str())
    }

    /// Sends the full local copy to the host.
    pub(super) fn send_dataframe(&mut self) {
        let date_field = self.date_field();
        let key = if date_field.is_some() {
            self.keys.dataframe_with_date()
        } else {
            self.keys.dataframe()
        };
        let payload = dataframe_payload(&self.local, date_field);
        self.sink.send(HostMessage::new(key, payload));
    }

    pub(super) fn series_for_field(&self, field: &str) -> Option<(usize, &SeriesAdapter)> {
        self.series
            .iter()
            .enumerate()
            .find(|(_, adapter)| adapter.owns_field(field))
    }
}
