//! Configuration management for cartoee.
//!
//! This module handles the layered configuration system with the following precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::colorbar::{ColorbarLocation, Orientation};
use crate::colormaps::{get_scale, DEFAULT_SAMPLE_COUNT};
use crate::error::{CartoeeError, Result};

/// Command-line arguments for cartoee
#[derive(Parser, Debug)]
#[command(name = "cartoee")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to JSON configuration file
    #[arg(short, long, global = true, env = "CARTOEE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "CARTOEE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Samples taken from a named color scale
    #[arg(short = 'n', long, global = true, env = "CARTOEE_SAMPLE_COUNT")]
    pub sample_count: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print a palette sampled from a named color scale
    Palette {
        /// Color scale name (e.g. viridis, RdBu); defaults to the configured scale
        scale: Option<String>,

        /// Print codes with a leading '#' instead of the service's query form
        #[arg(long)]
        hash: bool,
    },

    /// List the color scales the registry knows
    Scales,

    /// Render a colorbar to a PNG file
    Colorbar(ColorbarArgs),

    /// Print the thumbnail query parameters as JSON
    Query(QueryArgs),
}

/// Visualization options shared by subcommands
#[derive(Args, Debug, Clone)]
pub struct VisArgs {
    /// Lower data bound
    #[arg(long, allow_hyphen_values = true)]
    pub min: Option<f64>,

    /// Upper data bound
    #[arg(long, allow_hyphen_values = true)]
    pub max: Option<f64>,

    /// Opacity in [0, 1]
    #[arg(long)]
    pub opacity: Option<f64>,

    /// Comma-separated hex colors, e.g. "ff0000,00ff00,0000ff"
    #[arg(long, conflicts_with = "scale")]
    pub palette: Option<String>,

    /// Named color scale to use instead of a palette
    #[arg(long)]
    pub scale: Option<String>,

    /// Band label shown as the legend title
    #[arg(long)]
    pub bands: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ColorbarArgs {
    #[command(flatten)]
    pub vis: VisArgs,

    /// Render hard steps between palette colors
    #[arg(long)]
    pub discrete: bool,

    /// Colorbar location (left, right, bottom, top)
    #[arg(long)]
    pub location: Option<String>,

    /// Output PNG path
    #[arg(short, long)]
    pub output: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    #[command(flatten)]
    pub vis: VisArgs,

    /// Region as "west,south,east,north"
    #[arg(long, allow_hyphen_values = true)]
    pub region: Option<String>,

    /// Dimensions as "N" or "WIDTHxHEIGHT"
    #[arg(long)]
    pub dimensions: Option<String>,
}

/// Palette configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteConfig {
    /// Samples taken from a named color scale
    #[serde(default = "default_sample_count")]
    pub sample_count: usize,

    /// Scale used when none is named
    #[serde(default = "default_scale")]
    pub default_scale: String,
}

/// Colorbar rendering configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorbarConfig {
    /// Pixels along the value axis
    #[serde(default = "default_colorbar_length")]
    pub length: u32,

    /// Pixels across the value axis
    #[serde(default = "default_colorbar_thickness")]
    pub thickness: u32,

    /// Default location
    #[serde(default = "default_colorbar_location")]
    pub location: ColorbarLocation,
}

impl ColorbarConfig {
    /// `(width, height)` for a colorbar drawn with the given orientation
    pub fn size_for(&self, orientation: Orientation) -> (u32, u32) {
        match orientation {
            Orientation::Horizontal => (self.length, self.thickness),
            Orientation::Vertical => (self.thickness, self.length),
        }
    }
}

/// Complete configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Palette configuration
    #[serde(default)]
    pub palette: PaletteConfig,

    /// Colorbar configuration
    #[serde(default)]
    pub colorbar: ColorbarConfig,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Load configuration from all sources with proper precedence
    pub fn load(cli: &Cli) -> Result<Self> {
        // Start with defaults
        let mut config = Config::default();

        // Load from JSON file if provided
        if let Some(config_path) = &cli.config {
            let json_config = Self::load_from_file(config_path)?;
            config.merge(json_config);
        }

        // Override with command-line arguments (clap folds in the environment)
        if let Some(log_level) = &cli.log_level {
            config.log_level = log_level.clone();
        }
        if let Some(sample_count) = cli.sample_count {
            config.palette.sample_count = sample_count;
        }

        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        self.palette = other.palette;
        self.colorbar = other.colorbar;
        self.log_level = other.log_level;
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.palette.sample_count == 0 {
            return Err(CartoeeError::Config {
                message: "Palette sample count must be at least 1".to_string(),
            });
        }

        if get_scale(&self.palette.default_scale).is_err() {
            return Err(CartoeeError::Config {
                message: format!("Unknown default scale: {}", self.palette.default_scale),
            });
        }

        if self.colorbar.length == 0 || self.colorbar.thickness == 0 {
            return Err(CartoeeError::Config {
                message: format!(
                    "Colorbar size must be non-zero, got {}x{}",
                    self.colorbar.length, self.colorbar.thickness
                ),
            });
        }

        // Validate log level
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(CartoeeError::Config {
                    message: format!(
                        "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                        self.log_level
                    ),
                });
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            palette: PaletteConfig::default(),
            colorbar: ColorbarConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            sample_count: default_sample_count(),
            default_scale: default_scale(),
        }
    }
}

impl Default for ColorbarConfig {
    fn default() -> Self {
        Self {
            length: default_colorbar_length(),
            thickness: default_colorbar_thickness(),
            location: default_colorbar_location(),
        }
    }
}

// Default value functions for serde
fn default_sample_count() -> usize {
    DEFAULT_SAMPLE_COUNT
}

fn default_scale() -> String {
    "viridis".to_string()
}

fn default_colorbar_length() -> u32 {
    512
}

fn default_colorbar_thickness() -> u32 {
    24
}

fn default_colorbar_location() -> ColorbarLocation {
    ColorbarLocation::Right
}

fn default_log_level() -> String {
    "info".to_string()
}
