use serde::{Deserialize, Serialize};

/// Named theme; supplies the default series palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Default,
    Dark,
    Dataviz,
    Frozen,
    Kelly,
    Material,
    Microchart,
    Moonrisekingdom,
    Patterns,
    Spiritedaway,
}

impl Theme {
    pub const ALL: [Self; 10] = [
        Self::Default,
        Self::Dark,
        Self::Dataviz,
        Self::Frozen,
        Self::Kelly,
        Self::Material,
        Self::Microchart,
        Self::Moonrisekingdom,
        Self::Patterns,
        Self::Spiritedaway,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Dark => "dark",
            Self::Dataviz => "dataviz",
            Self::Frozen => "frozen",
            Self::Kelly => "kelly",
            Self::Material => "material",
            Self::Microchart => "microchart",
            Self::Moonrisekingdom => "moonrisekingdom",
            Self::Patterns => "patterns",
            Self::Spiritedaway => "spiritedaway",
        }
    }

    #[must_use]
    pub fn palette(self) -> &'static [&'static str] {
        match self {
            Self::Default | Self::Patterns => &[
                "#67b7dc", "#6794dc", "#6771dc", "#8067dc", "#a367dc", "#c767dc", "#dc67ce",
                "#dc67ab",
            ],
            Self::Dark => &[
                "#3f51b5", "#2196f3", "#03a9f4", "#00bcd4", "#009688", "#4caf50", "#8bc34a",
                "#cddc39",
            ],
            Self::Dataviz => &["#283250", "#902c2d", "#d5433d", "#f05440", "#7a7a7a"],
            Self::Frozen => &[
                "#bec4f8", "#a5abee", "#6a6dde", "#4d42cf", "#713e8d", "#a160a0", "#eb6eb0",
                "#f597bb",
            ],
            Self::Kelly => &[
                "#f3c300", "#875692", "#f38400", "#a1caf1", "#be0032", "#c2b280", "#848482",
                "#008856",
            ],
            Self::Material => &[
                "#f44336", "#e91e63", "#9c27b0", "#673ab7", "#3f51b5", "#2196f3", "#03a9f4",
                "#00bcd4",
            ],
            Self::Microchart => &["#000000"],
            Self::Moonrisekingdom => &[
                "#3a1302", "#601205", "#8a2b0d", "#c75e24", "#c79f59", "#a4956a", "#868569",
                "#756f61",
            ],
            Self::Spiritedaway => &[
                "#65738e", "#766c91", "#78566f", "#523b58", "#813b3d", "#bc5e52", "#ee8b78",
                "#f9c885",
            ],
        }
    }

    /// Palette color for the series at `index`, cycling past the end.
    #[must_use]
    pub fn series_color(self, index: usize) -> &'static str {
        let palette = self.palette();
        palette[index % palette.len()]
    }

    /// Text and axis color matching the theme background.
    #[must_use]
    pub fn foreground(self) -> &'static str {
        match self {
            Self::Dark => "#ffffff",
            _ => "#000000",
        }
    }
}
