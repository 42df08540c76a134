//! Color-scale registry.
//!
//! Resolves matplotlib-style scale names ("viridis", "RdBu", "YlOrRd", ...) to
//! continuous `colorgrad` gradients over `[0, 1]`.

use colorgrad::{Color, Gradient};
use once_cell::sync::Lazy;
use std::collections::BTreeMap;

use crate::error::{CartoeeError, Result};

type ScaleFn = fn() -> Gradient;

static REGISTRY: Lazy<BTreeMap<&'static str, ScaleFn>> = Lazy::new(|| {
    let entries: [(&'static str, ScaleFn); 38] = [
        // Perceptually uniform
        ("viridis", colorgrad::viridis),
        ("plasma", colorgrad::plasma),
        ("inferno", colorgrad::inferno),
        ("magma", colorgrad::magma),
        ("cividis", colorgrad::cividis),
        ("turbo", colorgrad::turbo),
        // Cyclical / rainbow
        ("rainbow", colorgrad::rainbow),
        ("sinebow", colorgrad::sinebow),
        ("cubehelix", colorgrad::cubehelix_default),
        ("warm", colorgrad::warm),
        ("cool", colorgrad::cool),
        // Diverging
        ("brbg", colorgrad::br_bg),
        ("prgn", colorgrad::pr_gn),
        ("piyg", colorgrad::pi_yg),
        ("puor", colorgrad::pu_or),
        ("rdbu", colorgrad::rd_bu),
        ("rdgy", colorgrad::rd_gy),
        ("rdylbu", colorgrad::rd_yl_bu),
        ("rdylgn", colorgrad::rd_yl_gn),
        ("spectral", colorgrad::spectral),
        // Sequential, single hue
        ("blues", colorgrad::blues),
        ("greens", colorgrad::greens),
        ("greys", colorgrad::greys),
        ("oranges", colorgrad::oranges),
        ("purples", colorgrad::purples),
        ("reds", colorgrad::reds),
        // Sequential, multi hue
        ("bugn", colorgrad::bu_gn),
        ("bupu", colorgrad::bu_pu),
        ("gnbu", colorgrad::gn_bu),
        ("orrd", colorgrad::or_rd),
        ("pubugn", colorgrad::pu_bu_gn),
        ("pubu", colorgrad::pu_bu),
        ("purd", colorgrad::pu_rd),
        ("rdpu", colorgrad::rd_pu),
        ("ylgnbu", colorgrad::yl_gn_bu),
        ("ylgn", colorgrad::yl_gn),
        ("ylorbr", colorgrad::yl_or_br),
        ("ylorrd", colorgrad::yl_or_rd),
    ];
    entries.into_iter().collect()
});

/// A continuous color function over `[0, 1]`
pub trait ColorScale {
    /// Evaluate the scale at `position`; values outside `[0, 1]` are clamped
    fn at(&self, position: f64) -> Color;

    /// Get the name of this scale
    fn name(&self) -> &str;
}

/// A scale resolved from the registry
pub struct NamedScale {
    name: String,
    gradient: Gradient,
}

impl ColorScale for NamedScale {
    fn at(&self, position: f64) -> Color {
        self.gradient.at(position.clamp(0.0, 1.0))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for NamedScale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NamedScale").field("name", &self.name).finish()
    }
}

fn registry_key(name: &str) -> String {
    name.trim()
        .chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Get a color scale by name (case-insensitive, `_`/`-` ignored)
pub fn get_scale(name: &str) -> Result<NamedScale> {
    let key = registry_key(name);

    match REGISTRY.get(key.as_str()) {
        Some(build) => Ok(NamedScale {
            name: key,
            gradient: build(),
        }),
        None => Err(CartoeeError::UnknownScale {
            name: name.to_string(),
        }),
    }
}

/// Names of every scale the registry can resolve, sorted
pub fn available_scales() -> Vec<&'static str> {
    REGISTRY.keys().copied().collect()
}
