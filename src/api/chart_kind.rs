use serde::{Deserialize, Serialize};

use crate::core::{AxisDirection, BarOrientation};
use crate::host::ChangeXKey;

/// Chart variant driving axis orientation and series shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    VerticalBar,
    HorizontalBar,
    Line,
    Scatter,
    RangeArea,
}

/// How the x/category field is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum XKind {
    Category,
    Number,
    Date,
}

impl ChartKind {
    pub const ALL: [Self; 5] = [
        Self::VerticalBar,
        Self::HorizontalBar,
        Self::Line,
        Self::Scatter,
        Self::RangeArea,
    ];

    #[must_use]
    pub fn is_bar(self) -> bool {
        matches!(self, Self::VerticalBar | Self::HorizontalBar)
    }

    #[must_use]
    pub fn bar_orientation(self) -> Option<BarOrientation> {
        match self {
            Self::VerticalBar => Some(BarOrientation::Vertical),
            Self::HorizontalBar => Some(BarOrientation::Horizontal),
            Self::Line | Self::Scatter | Self::RangeArea => None,
        }
    }

    /// Screen direction of the value axis; drags move along it.
    #[must_use]
    pub fn value_direction(self) -> AxisDirection {
        match self {
            Self::HorizontalBar => AxisDirection::Horizontal,
            Self::VerticalBar | Self::Line | Self::Scatter | Self::RangeArea => {
                AxisDirection::Vertical
            }
        }
    }

    /// Screen direction of the x/category axis.
    #[must_use]
    pub fn x_direction(self) -> AxisDirection {
        self.value_direction().cross()
    }

    #[must_use]
    pub fn default_x_kind(self) -> XKind {
        match self {
            Self::VerticalBar | Self::HorizontalBar => XKind::Category,
            Self::Line | Self::Scatter | Self::RangeArea => XKind::Number,
        }
    }

    #[must_use]
    pub fn accepts_x_kind(self, x_kind: XKind) -> bool {
        match self {
            Self::VerticalBar | Self::HorizontalBar => x_kind == XKind::Category,
            Self::Line | Self::Scatter | Self::RangeArea => x_kind != XKind::Category,
        }
    }

    #[must_use]
    pub fn supports_trend(self) -> bool {
        !self.is_bar()
    }

    #[must_use]
    pub fn change_x_key(self) -> ChangeXKey {
        if self.is_bar() {
            ChangeXKey::Category
        } else {
            ChangeXKey::X
        }
    }
}
