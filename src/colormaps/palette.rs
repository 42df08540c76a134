//! Palette Builder: sample a continuous scale into hex color codes.

use serde::Serialize;
use tracing::debug;

use super::color::format_hex;
use super::registry::{get_scale, ColorScale};
use crate::error::{CartoeeError, Result};

/// Number of samples taken when no count is given
pub const DEFAULT_SAMPLE_COUNT: usize = 256;

/// Ordered `#rrggbb` samples of a color scale, position 0.0 first
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Palette {
    colors: Vec<String>,
}

impl Palette {
    /// The hex codes, each `#`-prefixed
    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn into_colors(self) -> Vec<String> {
        self.colors
    }

    /// Comma-joined codes without the leading `#`, as the imagery service
    /// expects them in its `palette` field
    pub fn query_value(&self) -> String {
        self.colors
            .iter()
            .map(|c| c.trim_start_matches('#'))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Positions `i / (n - 1)` for `i` in `0..n`; a single sample sits at 0.0
fn sample_positions(n: usize) -> impl Iterator<Item = f64> {
    let last = n.saturating_sub(1);
    (0..n).map(move |i| if last == 0 { 0.0 } else { i as f64 / last as f64 })
}

/// Sample any color scale at `sample_count` evenly spaced positions
pub fn sample_scale(scale: &dyn ColorScale, sample_count: usize) -> Result<Palette> {
    if sample_count < 1 {
        return Err(CartoeeError::InvalidSampleCount {
            count: sample_count,
        });
    }

    let colors = sample_positions(sample_count)
        .map(|t| format_hex(&scale.at(t)))
        .collect();

    Ok(Palette { colors })
}

/// Build a palette of `sample_count` hex codes from a named scale
pub fn build_palette(scale_name: &str, sample_count: usize) -> Result<Palette> {
    if sample_count < 1 {
        return Err(CartoeeError::InvalidSampleCount {
            count: sample_count,
        });
    }
    let scale = get_scale(scale_name)?;

    debug!(
        scale = scale.name(),
        sample_count = sample_count,
        "Building palette"
    );

    sample_scale(&scale, sample_count)
}
