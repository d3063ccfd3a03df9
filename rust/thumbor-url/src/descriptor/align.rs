use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::CompositionError;

/// Horizontal alignment used when cropping to the requested size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlign {
    /// Keep the left edge.
    Left,
    /// Keep the center (default, never emitted).
    #[default]
    Center,
    /// Keep the right edge.
    Right,
}

impl HorizontalAlign {
    /// The path token for this alignment.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

impl FromStr for HorizontalAlign {
    type Err = CompositionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "left" => Ok(Self::Left),
            "center" => Ok(Self::Center),
            "right" => Ok(Self::Right),
            other => Err(CompositionError::invalid(format!(
                "unknown horizontal alignment {other:?}, expected left, center or right"
            ))),
        }
    }
}

impl fmt::Display for HorizontalAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vertical alignment used when cropping to the requested size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    /// Keep the top edge.
    Top,
    /// Keep the middle (default, never emitted).
    #[default]
    Middle,
    /// Keep the bottom edge.
    Bottom,
}

impl VerticalAlign {
    /// The path token for this alignment.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Middle => "middle",
            Self::Bottom => "bottom",
        }
    }
}

impl FromStr for VerticalAlign {
    type Err = CompositionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "top" => Ok(Self::Top),
            "middle" => Ok(Self::Middle),
            "bottom" => Ok(Self::Bottom),
            other => Err(CompositionError::invalid(format!(
                "unknown vertical alignment {other:?}, expected top, middle or bottom"
            ))),
        }
    }
}

impl fmt::Display for VerticalAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
