use serde::{Deserialize, Serialize};

/// How the image should be fitted into the requested dimensions.
///
/// Exactly one mode is selected per request. The mode is derived from three
/// independent switches with [`FitMode::from_flags`]; `full` and `adaptive`
/// only take effect together with `fit_in`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FitMode {
    /// Regular resize-and-crop.
    #[default]
    None,
    /// Fit the image inside the box.
    FitIn,
    /// Fit the image so that it fully covers the box.
    FullFitIn,
    /// Fit inside the box, swapping the box orientation to match the image.
    AdaptiveFitIn,
    /// Combination of adaptive and full fit-in.
    AdaptiveFullFitIn,
}

impl FitMode {
    /// Derive the mode from the `fit_in`, `full` and `adaptive` switches.
    pub fn from_flags(fit_in: bool, full: bool, adaptive: bool) -> Self {
        match (fit_in, full, adaptive) {
            (true, true, true) => Self::AdaptiveFullFitIn,
            (true, true, false) => Self::FullFitIn,
            (true, false, true) => Self::AdaptiveFitIn,
            (true, false, false) => Self::FitIn,
            (false, _, _) => Self::None,
        }
    }

    /// The path segment for this mode, or `None` when nothing is emitted.
    pub fn token(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::FitIn => Some("fit-in"),
            Self::FullFitIn => Some("full-fit-in"),
            Self::AdaptiveFitIn => Some("adaptive-fit-in"),
            Self::AdaptiveFullFitIn => Some("adaptive-full-fit-in"),
        }
    }
}
