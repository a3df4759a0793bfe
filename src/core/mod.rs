pub mod area_series;
pub mod bar_series;
pub mod category_scale;
pub mod date;
pub mod line_series;
pub mod scale;
pub mod trend;
pub mod types;

pub use area_series::{RangeBand, project_range_band};
pub use bar_series::{
    BarGeometry, BarLayout, BarOrientation, CornerRadii, bar_corner_radii, project_bars,
};
pub use category_scale::CategoryScale;
pub use date::{datetime_to_unix_seconds, parse_date, unix_seconds_to_datetime};
pub use line_series::{LineSegment, ProjectedPoint, project_line_segments, smooth_polyline};
pub use scale::{AxisDirection, DEFAULT_AUTOSCALE_PADDING_RATIO, LinearScale};
pub use trend::{
    MAX_TREND_ORDER, PolynomialFit, TREND_PRECISION_DIGITS, TrendSeries, round_significant,
};
pub use types::{CellValue, DataPoint, DataRow, DataTable, PlotArea, PlotInsets, Viewport};
