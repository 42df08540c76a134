//! Legend Normalizer.
//!
//! Builds the value-to-color mapping drawn as a colorbar. Explicit palettes
//! can be rendered as discrete bins or as a continuous ramp; named scales are
//! always continuous.

use colorgrad::Color;
use tracing::{debug, warn};

use crate::colormaps::{
    build_palette, format_hex, lerp_color, parse_color_code, rgba8, DEFAULT_SAMPLE_COUNT,
};
use crate::error::Result;
use crate::vis::{ColorSource, VisParams};

/// Non-fatal conditions noticed while building a legend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LegendWarning {
    /// A discrete legend was requested for a named scale; a continuous one
    /// was built instead
    DiscreteWithoutPalette { scale: String },
}

impl std::fmt::Display for LegendWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LegendWarning::DiscreteWithoutPalette { scale } => write!(
                f,
                "discrete legend requested without an explicit palette (scale '{}'), \
                 creating a continuous legend",
                scale
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Mapping {
    /// K flat bins; `boundaries` has K + 1 edges from vmin to vmax
    Discrete {
        colors: Vec<Color>,
        boundaries: Vec<f64>,
    },
    /// K stops evenly spaced over [vmin, vmax]
    Continuous { stops: Vec<Color> },
}

/// Options for [`build_legend_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegendOptions {
    /// Samples taken from a named scale
    pub sample_count: usize,
}

impl Default for LegendOptions {
    fn default() -> Self {
        Self {
            sample_count: DEFAULT_SAMPLE_COUNT,
        }
    }
}

/// A value-to-color mapping plus the display metadata of a colorbar
#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    vmin: f64,
    vmax: f64,
    alpha: f64,
    label: Option<String>,
    mapping: Mapping,
    warnings: Vec<LegendWarning>,
}

/// Build a legend from visualization parameters and an optional named scale
pub fn build_legend(params: &VisParams, scale: Option<&str>, discrete: bool) -> Result<Legend> {
    build_legend_with(params, scale, discrete, LegendOptions::default())
}

/// [`build_legend`] with an explicit sample count for named scales
pub fn build_legend_with(
    params: &VisParams,
    scale: Option<&str>,
    discrete: bool,
    options: LegendOptions,
) -> Result<Legend> {
    let (vmin, vmax) = params.range()?;
    let alpha = params.alpha()?;
    let source = ColorSource::resolve(params.palette.as_deref(), scale)?;

    let mut warnings = Vec::new();

    let mapping = match source {
        ColorSource::Palette(codes) => {
            let colors = codes
                .iter()
                .map(|code| parse_color_code(code))
                .collect::<Result<Vec<_>>>()?;

            if discrete {
                let boundaries = bin_boundaries(vmin, vmax, colors.len());
                Mapping::Discrete { colors, boundaries }
            } else {
                Mapping::Continuous { stops: colors }
            }
        }
        ColorSource::Scale(name) => {
            let palette = build_palette(&name, options.sample_count)?;
            if discrete {
                let warning = LegendWarning::DiscreteWithoutPalette { scale: name };
                warn!(warning = %warning, "Legend advisory");
                warnings.push(warning);
            }
            let stops = palette
                .colors()
                .iter()
                .map(|code| parse_color_code(code))
                .collect::<Result<Vec<_>>>()?;
            Mapping::Continuous { stops }
        }
    };

    let legend = Legend {
        vmin,
        vmax,
        alpha,
        label: params.bands.clone(),
        mapping,
        warnings,
    };

    debug!(
        vmin = vmin,
        vmax = vmax,
        alpha = alpha,
        discrete = legend.is_discrete(),
        colors = legend.colors().len(),
        "Built legend"
    );

    Ok(legend)
}

/// Edges `vmin + i * (vmax - vmin) / k` for `i` in `0..=k`.
///
/// Worked on halved bounds so that `vmax - vmin` cannot overflow to infinity
/// for finite bounds of opposite sign.
fn bin_boundaries(vmin: f64, vmax: f64, k: usize) -> Vec<f64> {
    let half_span = vmax / 2.0 - vmin / 2.0;
    (0..=k)
        .map(|i| match i {
            0 => vmin,
            i if i == k => vmax,
            i => 2.0 * (vmin / 2.0 + (i as f64 / k as f64) * half_span),
        })
        .collect()
}

impl Legend {
    /// Map a data value to a color (alpha of the color itself is untouched).
    ///
    /// Out-of-range values clamp to the end colors; NaN maps to transparent black.
    pub fn color_at(&self, value: f64) -> Color {
        if value.is_nan() {
            return Color::new(0.0, 0.0, 0.0, 0.0);
        }

        match &self.mapping {
            Mapping::Discrete { colors, boundaries } => {
                colors[self.bin_index(value, boundaries, colors.len())].clone()
            }
            Mapping::Continuous { stops } => self.interpolate(value, stops),
        }
    }

    /// Map a data value to `#rrggbb`
    pub fn hex_at(&self, value: f64) -> String {
        format_hex(&self.color_at(value))
    }

    /// Map a data value to RGBA bytes with the legend's alpha applied
    pub fn rgba8_at(&self, value: f64) -> [u8; 4] {
        let color = self.color_at(value);
        rgba8(&Color::new(color.r, color.g, color.b, color.a * self.alpha))
    }

    /// Inner boundaries map to the higher bin; vmax maps to the last bin
    fn bin_index(&self, value: f64, boundaries: &[f64], k: usize) -> usize {
        let inner = &boundaries[1..k];
        let passed = if self.vmax >= self.vmin {
            inner.iter().filter(|b| value >= **b).count()
        } else {
            inner.iter().filter(|b| value <= **b).count()
        };
        passed.min(k - 1)
    }

    fn interpolate(&self, value: f64, stops: &[Color]) -> Color {
        let k = stops.len();
        if k == 1 {
            return stops[0].clone();
        }

        let t = self.normalize(value);
        let position = t * (k - 1) as f64;
        let index = (position.floor() as usize).min(k - 2);
        let frac = position - index as f64;

        lerp_color(&stops[index], &stops[index + 1], frac)
    }

    /// Position of `value` within [vmin, vmax] as a fraction in [0, 1]
    pub fn normalize(&self, value: f64) -> f64 {
        let half_span = self.vmax / 2.0 - self.vmin / 2.0;
        if half_span == 0.0 {
            return if value < self.vmin { 0.0 } else { 1.0 };
        }
        ((value / 2.0 - self.vmin / 2.0) / half_span).clamp(0.0, 1.0)
    }

    /// The colors (discrete bins or continuous stops) in order
    pub fn colors(&self) -> &[Color] {
        match &self.mapping {
            Mapping::Discrete { colors, .. } => colors,
            Mapping::Continuous { stops } => stops,
        }
    }

    /// Bin edges of a discrete legend, `None` for continuous legends
    pub fn boundaries(&self) -> Option<&[f64]> {
        match &self.mapping {
            Mapping::Discrete { boundaries, .. } => Some(boundaries),
            Mapping::Continuous { .. } => None,
        }
    }

    pub fn range(&self) -> (f64, f64) {
        (self.vmin, self.vmax)
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn is_discrete(&self) -> bool {
        matches!(self.mapping, Mapping::Discrete { .. })
    }

    pub fn warnings(&self) -> &[LegendWarning] {
        &self.warnings
    }
}
