use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Chart family tag stored with a configuration.
///
/// The registry treats the tag as opaque. Unknown tags decode into
/// [`ChartType::Other`] and serialize back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChartType {
    Column,
    StackedColumn,
    Bar,
    StackedBar,
    Line,
    Area,
    StackedArea,
    Pie,
    Donut,
    Scatter,
    Bubble,
    Histogram,
    Combo,
    Other(String),
}

impl ChartType {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Column => "column",
            Self::StackedColumn => "stacked-column",
            Self::Bar => "bar",
            Self::StackedBar => "stacked-bar",
            Self::Line => "line",
            Self::Area => "area",
            Self::StackedArea => "stacked-area",
            Self::Pie => "pie",
            Self::Donut => "donut",
            Self::Scatter => "scatter",
            Self::Bubble => "bubble",
            Self::Histogram => "histogram",
            Self::Combo => "combo",
            Self::Other(tag) => tag,
        }
    }

    /// Parses a tag, falling back to [`ChartType::Other`] for unknown values.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "column" => Self::Column,
            "stacked-column" => Self::StackedColumn,
            "bar" => Self::Bar,
            "stacked-bar" => Self::StackedBar,
            "line" => Self::Line,
            "area" => Self::Area,
            "stacked-area" => Self::StackedArea,
            "pie" => Self::Pie,
            "donut" => Self::Donut,
            "scatter" => Self::Scatter,
            "bubble" => Self::Bubble,
            "histogram" => Self::Histogram,
            "combo" => Self::Combo,
            other => Self::Other(other.to_owned()),
        }
    }

    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ChartType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ChartType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::from_tag(&tag))
    }
}
