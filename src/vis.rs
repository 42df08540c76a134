//! Visualization parameters and color source resolution.
//!
//! [`VisParams`] mirrors the imagery service's visualization dictionary
//! (`min`, `max`, `opacity`, `palette`, `bands`) with static types. The
//! palette may arrive either as a JSON list or as a single comma-joined
//! string; both deserialize to the same ordered list.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{CartoeeError, Result};

/// Default lower data bound
pub const DEFAULT_MIN: f64 = 0.0;
/// Default upper data bound
pub const DEFAULT_MAX: f64 = 1.0;
/// Default opacity
pub const DEFAULT_OPACITY: f64 = 1.0;

/// Visualization parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisParams {
    /// Lower data bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    /// Upper data bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    /// Layer opacity in [0, 1]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,

    /// Explicit ordered colors
    #[serde(
        default,
        deserialize_with = "deserialize_palette",
        skip_serializing_if = "Option::is_none"
    )]
    pub palette: Option<Vec<String>>,

    /// Band label, shown as the legend title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bands: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PaletteRepr {
    Joined(String),
    List(Vec<String>),
}

fn deserialize_palette<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let repr = Option::<PaletteRepr>::deserialize(deserializer)?;
    Ok(repr.map(|repr| match repr {
        PaletteRepr::Joined(joined) => split_palette(&joined),
        PaletteRepr::List(list) => list,
    }))
}

/// Split a comma-joined palette string, dropping empty entries
pub fn split_palette(joined: &str) -> Vec<String> {
    joined
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl VisParams {
    /// Parse visualization parameters from a JSON object
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    pub fn with_palette<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.palette = Some(colors.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn with_bands(mut self, bands: impl Into<String>) -> Self {
        self.bands = Some(bands.into());
        self
    }

    /// Resolve `(vmin, vmax)`, applying defaults.
    ///
    /// An inverted range is allowed; only non-finite bounds are rejected.
    pub fn range(&self) -> Result<(f64, f64)> {
        let vmin = self.min.unwrap_or(DEFAULT_MIN);
        let vmax = self.max.unwrap_or(DEFAULT_MAX);

        if !vmin.is_finite() {
            return Err(CartoeeError::InvalidRange {
                message: format!("min value {} is not a finite number", vmin),
            });
        }
        if !vmax.is_finite() {
            return Err(CartoeeError::InvalidRange {
                message: format!("max value {} is not a finite number", vmax),
            });
        }

        Ok((vmin, vmax))
    }

    /// Resolve the opacity, applying the default
    pub fn alpha(&self) -> Result<f64> {
        let alpha = self.opacity.unwrap_or(DEFAULT_OPACITY);
        if !(0.0..=1.0).contains(&alpha) {
            return Err(CartoeeError::invalid_parameter(
                "opacity",
                format!("{} is outside [0, 1]", alpha),
            ));
        }
        Ok(alpha)
    }
}

/// Where a legend's colors come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorSource {
    /// Explicit ordered colors, unnormalized
    Palette(Vec<String>),
    /// A named continuous scale from the registry
    Scale(String),
}

impl ColorSource {
    /// Pick the single color source from an explicit palette and a named scale
    pub fn resolve(palette: Option<&[String]>, scale: Option<&str>) -> Result<Self> {
        match (palette, scale) {
            (Some(palette), Some(scale)) => Err(CartoeeError::AmbiguousColorSource {
                palette: palette.to_vec(),
                scale: scale.to_string(),
            }),
            (Some([]), None) => Err(CartoeeError::MissingColorSource),
            (Some(palette), None) => Ok(ColorSource::Palette(palette.to_vec())),
            (None, Some(scale)) => Ok(ColorSource::Scale(scale.to_string())),
            (None, None) => Err(CartoeeError::MissingColorSource),
        }
    }

    pub fn is_palette(&self) -> bool {
        matches!(self, ColorSource::Palette(_))
    }
}
