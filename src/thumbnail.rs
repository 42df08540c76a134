//! Thumbnail requests for the imagery service.
//!
//! Translates a bounding region, pixel dimensions and visualization parameters
//! into the ordered query parameters of a thumbnail request, and a region into
//! the view extent used when placing the returned raster on a map.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::colormaps::{build_palette, normalize_color_code, DEFAULT_SAMPLE_COUNT};
use crate::error::{CartoeeError, Result};
use crate::vis::{ColorSource, VisParams};

/// Output format requested from the imagery service
pub const THUMBNAIL_FORMAT: &str = "png";

/// A geographic bounding box in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

/// Map extent as `(x_min, x_max, y_min, y_max)`, the order plotting surfaces use
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewExtent {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Region {
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Result<Self> {
        for (name, value) in [("west", west), ("south", south), ("east", east), ("north", north)] {
            if !value.is_finite() {
                return Err(CartoeeError::invalid_parameter(
                    "region",
                    format!("{} ({}) is not a finite number", name, value),
                ));
            }
        }

        if south > north {
            return Err(CartoeeError::invalid_parameter(
                "region",
                format!("south ({}) must be <= north ({})", south, north),
            ));
        }

        // Latitude must be in the range -90 to 90
        if !(-90.0..=90.0).contains(&south) || !(-90.0..=90.0).contains(&north) {
            return Err(CartoeeError::invalid_parameter(
                "region",
                "Latitude must be in the range -90 to 90",
            ));
        }

        Ok(Self {
            west,
            south,
            east,
            north,
        })
    }

    /// The whole globe
    pub fn global() -> Self {
        Self {
            west: -180.0,
            south: -90.0,
            east: 180.0,
            north: 90.0,
        }
    }

    pub fn view_extent(&self) -> ViewExtent {
        ViewExtent {
            x_min: self.west,
            x_max: self.east,
            y_min: self.south,
            y_max: self.north,
        }
    }

    /// Closed counter-clockwise ring of the rectangle's corners
    pub fn rectangle_coordinates(&self) -> Vec<[f64; 2]> {
        vec![
            [self.west, self.south],
            [self.east, self.south],
            [self.east, self.north],
            [self.west, self.north],
            [self.west, self.south],
        ]
    }

    /// Bounding box of a set of `[lon, lat]` points
    pub fn from_points(points: &[[f64; 2]]) -> Result<Self> {
        if points.is_empty() {
            return Err(CartoeeError::invalid_parameter(
                "region",
                "cannot compute bounds of an empty footprint",
            ));
        }
        let (mut west, mut south) = (f64::INFINITY, f64::INFINITY);
        let (mut east, mut north) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for [x, y] in points {
            west = west.min(*x);
            east = east.max(*x);
            south = south.min(*y);
            north = north.max(*y);
        }
        Self::new(west, south, east, north)
    }
}

impl FromStr for Region {
    type Err = CartoeeError;

    /// Parse `"west,south,east,north"`
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(CartoeeError::invalid_parameter(
                "region",
                "Region must be in format 'west,south,east,north'",
            ));
        }

        let mut values = [0.0; 4];
        for (slot, (name, part)) in values
            .iter_mut()
            .zip(["west", "south", "east", "north"].iter().zip(parts))
        {
            *slot = part.parse::<f64>().map_err(|_| {
                CartoeeError::invalid_parameter("region", format!("Invalid {}: {}", name, part))
            })?;
        }

        Region::new(values[0], values[1], values[2], values[3])
    }
}

/// Requested raster size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimensions {
    /// Longest side; the other is scaled proportionally by the service
    Max(u32),
    Exact { width: u32, height: u32 },
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimensions::Max(side) => write!(f, "{}", side),
            Dimensions::Exact { width, height } => write!(f, "{}x{}", width, height),
        }
    }
}

impl FromStr for Dimensions {
    type Err = CartoeeError;

    /// Parse `"N"` or `"WxH"`
    fn from_str(s: &str) -> Result<Self> {
        let parse = |part: &str| {
            part.trim()
                .parse::<u32>()
                .ok()
                .filter(|v| *v > 0)
                .ok_or_else(|| {
                    CartoeeError::invalid_parameter(
                        "dimensions",
                        format!("'{}' is not a positive pixel count", part),
                    )
                })
        };

        match s.to_lowercase().split_once('x') {
            Some((w, h)) => Ok(Dimensions::Exact {
                width: parse(w)?,
                height: parse(h)?,
            }),
            None => Ok(Dimensions::Max(parse(s)?)),
        }
    }
}

/// Everything needed to ask the imagery service for one thumbnail
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThumbnailRequest {
    pub region: Option<Region>,
    pub dimensions: Option<Dimensions>,
    pub vis: VisParams,
    /// Samples taken when a named scale is expanded into a palette
    pub sample_count: Option<usize>,
}

impl ThumbnailRequest {
    pub fn new(vis: VisParams) -> Self {
        Self {
            vis,
            ..Default::default()
        }
    }

    pub fn with_region(mut self, region: Region) -> Self {
        self.region = Some(region);
        self
    }

    pub fn with_dimensions(mut self, dimensions: Dimensions) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    /// Ordered query parameters for the thumbnail URL.
    ///
    /// A named `scale` is expanded into the `palette` field; giving one
    /// together with an explicit palette is an error.
    pub fn query_params(&self, scale: Option<&str>) -> Result<Vec<(String, String)>> {
        let mut params = vec![("format".to_string(), THUMBNAIL_FORMAT.to_string())];

        if let Some(region) = &self.region {
            let ring = serde_json::to_string(&[region.rectangle_coordinates()])?;
            params.push(("region".to_string(), ring));
        }
        if let Some(dimensions) = &self.dimensions {
            params.push(("dimensions".to_string(), dimensions.to_string()));
        }

        let vis = &self.vis;
        // Only explicitly set bounds are sent, but both must be usable numbers
        let (vmin, vmax) = vis.range()?;
        if vis.min.is_some() {
            params.push(("min".to_string(), vmin.to_string()));
        }
        if vis.max.is_some() {
            params.push(("max".to_string(), vmax.to_string()));
        }
        if vis.opacity.is_some() {
            params.push(("opacity".to_string(), vis.alpha()?.to_string()));
        }
        if let Some(bands) = &vis.bands {
            params.push(("bands".to_string(), bands.clone()));
        }

        let palette = match (vis.palette.as_deref(), scale) {
            (None, None) => None,
            (palette, scale) => Some(ColorSource::resolve(palette, scale)?),
        };
        match palette {
            Some(ColorSource::Palette(codes)) => {
                let codes = codes
                    .iter()
                    .map(|code| normalize_color_code(code).map(|c| c[1..].to_string()))
                    .collect::<Result<Vec<_>>>()?;
                params.push(("palette".to_string(), codes.join(",")));
            }
            Some(ColorSource::Scale(name)) => {
                let n = self.sample_count.unwrap_or(DEFAULT_SAMPLE_COUNT);
                params.push(("palette".to_string(), build_palette(&name, n)?.query_value()));
            }
            None => {}
        }

        Ok(params)
    }
}
