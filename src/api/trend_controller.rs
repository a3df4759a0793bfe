use tracing::trace;

use crate::core::{DataPoint, DataTable, PolynomialFit, TrendSeries};
use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

use super::ChartEditor;

/// Table trend fits regress against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum TrendSource {
    Local,
    Alternate,
}

impl<R: Renderer> ChartEditor<R> {
    #[must_use]
    pub fn trends(&self) -> &[TrendSeries] {
        &self.trends
    }

    #[must_use]
    pub fn trend(&self, field: &str) -> Option<&TrendSeries> {
        self.trends.iter().find(|trend| trend.field() == field)
    }

    /// Fits the trend configured for `field` against the current local copy.
    ///
    /// Returns `None` when no trend is configured for the field.
    pub fn trend_fit(&self, field: &str) -> ChartResult<Option<PolynomialFit>> {
        let Some(trend) = self.trend(field) else {
            return Ok(None);
        };
        let source = self.regression_points(&self.local, field)?;
        PolynomialFit::fit(&source, trend.order()).map(Some)
    }

    pub(super) fn build_trends(&self) -> ChartResult<Vec<TrendSeries>> {
        self.trend_styles
            .iter()
            .map(|style| {
                let source = self.regression_points(&self.local, &style.field)?;
                TrendSeries::from_source(style.field.clone(), style.order, &source)
            })
            .collect()
    }

    /// Refits the trend configured for `field`, if any.
    pub(super) fn refit_trend(&mut self, field: &str, source: TrendSource) -> ChartResult<()> {
        let Some(index) = self.trends.iter().position(|trend| trend.field() == field) else {
            return Ok(());
        };
        let points = self.regression_points(self.source_table(source)?, field)?;
        let fit = self.trends[index].refit(&points)?;
        trace!(
            field,
            order = fit.order(),
            samples = points.len(),
            "refit trend"
        );
        Ok(())
    }

    pub(super) fn refit_all_trends(&mut self, source: TrendSource) -> ChartResult<()> {
        let fields: Vec<String> = self
            .trends
            .iter()
            .map(|trend| trend.field().to_owned())
            .collect();
        for field in fields {
            self.refit_trend(&field, source)?;
        }
        Ok(())
    }

    fn source_table(&self, source: TrendSource) -> ChartResult<&DataTable> {
        match source {
            TrendSource::Local => Ok(&self.local),
            TrendSource::Alternate => self.config.alternate_data.as_ref().ok_or_else(|| {
                ChartError::InvalidData("no alternate dataset configured".to_owned())
            }),
        }
    }

    /// `(x, y)` pairs with x from the plotted rows and y from `table`.
    ///
    /// Rows whose x has no numeric coordinate or whose cell is empty are
    /// skipped.
    fn regression_points(&self, table: &DataTable, field: &str) -> ChartResult<Vec<DataPoint>> {
        let mut points = Vec::with_capacity(self.model.rows().len());
        for (row, plotted) in self.model.rows().iter().enumerate() {
            let (Some(x), Some(y)) = (plotted.x.coordinate(), table.number(row, field)?) else {
                continue;
            };
            points.push(DataPoint::new(x, y));
        }
        Ok(points)
    }
}
