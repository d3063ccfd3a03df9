use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::CompositionError;

/// Manual crop region, given as the top-left and bottom-right corners.
///
/// Ordering of the corners (`left < right`, `top < bottom`) is left to the
/// consuming service; a crop only has to carry all four coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Crop {
    /// Left edge.
    pub left: u32,
    /// Top edge.
    pub top: u32,
    /// Right edge.
    pub right: u32,
    /// Bottom edge.
    pub bottom: u32,
}

impl Crop {
    /// Create a crop region from its four coordinates.
    pub fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Build a crop region from individually optional coordinates.
    ///
    /// Returns `Ok(None)` when no coordinate is given and `Ok(Some(_))` when
    /// all four are. Anything in between is an
    /// [`InvalidDescriptor`](CompositionError::InvalidDescriptor).
    pub fn from_coordinates(
        left: Option<u32>,
        top: Option<u32>,
        right: Option<u32>,
        bottom: Option<u32>,
    ) -> Result<Option<Self>, CompositionError> {
        match (left, top, right, bottom) {
            (Some(left), Some(top), Some(right), Some(bottom)) => {
                Ok(Some(Self::new(left, top, right, bottom)))
            }
            (None, None, None, None) => Ok(None),
            partial => {
                let given = [partial.0, partial.1, partial.2, partial.3]
                    .iter()
                    .filter(|coordinate| coordinate.is_some())
                    .count();
                Err(CompositionError::invalid(format!(
                    "crop requires all four coordinates, got {given}"
                )))
            }
        }
    }
}

fn parse_corner(corner: &str, input: &str) -> Result<(u32, u32), CompositionError> {
    let malformed = || {
        CompositionError::invalid(format!(
            "malformed crop {input:?}, expected leftxtop:rightxbottom"
        ))
    };

    let (x, y) = corner.split_once('x').ok_or_else(malformed)?;
    let x = x.parse().map_err(|_| malformed())?;
    let y = y.parse().map_err(|_| malformed())?;
    Ok((x, y))
}

impl FromStr for Crop {
    type Err = CompositionError;

    /// Parse the `LxT:RxB` form, e.g. `100x200:400x500`.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let (top_left, bottom_right) = input.split_once(':').ok_or_else(|| {
            CompositionError::invalid(format!(
                "malformed crop {input:?}, expected leftxtop:rightxbottom"
            ))
        })?;

        let (left, top) = parse_corner(top_left, input)?;
        let (right, bottom) = parse_corner(bottom_right, input)?;
        Ok(Self::new(left, top, right, bottom))
    }
}

impl fmt::Display for Crop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{}:{}x{}",
            self.left, self.top, self.right, self.bottom
        )
    }
}
