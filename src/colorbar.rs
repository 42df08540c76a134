//! Colorbar placement and rasterisation.

use image::{ImageBuffer, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use std::str::FromStr;

use crate::error::{CartoeeError, Result};
use crate::legend::Legend;

/// Where a colorbar sits relative to the map axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorbarLocation {
    Left,
    Right,
    Bottom,
    Top,
}

/// Direction in which a colorbar's values increase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Values increase left to right
    Horizontal,
    /// Values increase bottom to top
    Vertical,
}

/// Colorbar axes rectangle as figure fractions `[left, bottom, width, height]`
pub type AxesRect = [f64; 4];

impl ColorbarLocation {
    pub fn axes_rect(&self) -> AxesRect {
        match self {
            ColorbarLocation::Left => [0.01, 0.25, 0.02, 0.5],
            ColorbarLocation::Right => [0.88, 0.25, 0.02, 0.5],
            ColorbarLocation::Bottom => [0.25, 0.15, 0.5, 0.02],
            ColorbarLocation::Top => [0.25, 0.88, 0.5, 0.02],
        }
    }

    /// Figure margin to move so the map does not overlap a side colorbar
    pub fn subplot_adjust(&self) -> Option<MarginAdjust> {
        match self {
            ColorbarLocation::Left => Some(MarginAdjust::Left(0.18)),
            ColorbarLocation::Right => Some(MarginAdjust::Right(0.85)),
            ColorbarLocation::Bottom | ColorbarLocation::Top => None,
        }
    }

    pub fn default_orientation(&self) -> Orientation {
        match self {
            ColorbarLocation::Left | ColorbarLocation::Right => Orientation::Vertical,
            ColorbarLocation::Bottom | ColorbarLocation::Top => Orientation::Horizontal,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorbarLocation::Left => "left",
            ColorbarLocation::Right => "right",
            ColorbarLocation::Bottom => "bottom",
            ColorbarLocation::Top => "top",
        }
    }
}

impl FromStr for ColorbarLocation {
    type Err = CartoeeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "left" => Ok(ColorbarLocation::Left),
            "right" => Ok(ColorbarLocation::Right),
            "bottom" => Ok(ColorbarLocation::Bottom),
            "top" => Ok(ColorbarLocation::Top),
            _ => Err(CartoeeError::invalid_parameter(
                "location",
                format!(
                    "Unknown colorbar location: {}. Must be one of: left, right, bottom, top",
                    s
                ),
            )),
        }
    }
}

/// New position of a figure edge, as a figure fraction
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarginAdjust {
    /// Map axes start this far from the left edge
    Left(f64),
    /// Map axes end this far from the left edge
    Right(f64),
}

/// Where the colorbar axes come from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// One of the predefined positions around the map
    Location(ColorbarLocation),
    /// Axes rectangle chosen by the caller
    Axes(AxesRect),
}

/// A legend placed beside the map
#[derive(Debug, Clone, PartialEq)]
pub struct Colorbar {
    pub legend: Legend,
    pub placement: Placement,
    pub orientation: Orientation,
}

impl Colorbar {
    pub fn new(legend: Legend, location: ColorbarLocation) -> Self {
        Self {
            legend,
            orientation: location.default_orientation(),
            placement: Placement::Location(location),
        }
    }

    /// Place the colorbar in caller-supplied axes `[left, bottom, width, height]`
    pub fn in_axes(legend: Legend, rect: AxesRect, orientation: Orientation) -> Result<Self> {
        let [left, bottom, width, height] = rect;
        let valid = rect.iter().all(|v| v.is_finite())
            && left >= 0.0
            && bottom >= 0.0
            && width > 0.0
            && height > 0.0
            && left + width <= 1.0
            && bottom + height <= 1.0;
        if !valid {
            return Err(CartoeeError::invalid_parameter(
                "axes",
                format!("{:?} is not a non-empty rectangle inside the figure", rect),
            ));
        }

        Ok(Self {
            legend,
            placement: Placement::Axes(rect),
            orientation,
        })
    }

    pub fn axes_rect(&self) -> AxesRect {
        match self.placement {
            Placement::Location(location) => location.axes_rect(),
            Placement::Axes(rect) => rect,
        }
    }

    /// Margin change the surface should apply; caller-supplied axes never move the map
    pub fn margin_adjust(&self) -> Option<MarginAdjust> {
        match self.placement {
            Placement::Location(location) => location.subplot_adjust(),
            Placement::Axes(_) => None,
        }
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Rasterise the colorbar. Each pixel line along the bar shows the color
    /// of the value at its center, so the first and last lines show the end
    /// colors.
    pub fn render(&self, width: u32, height: u32) -> Result<RgbaImage> {
        if width == 0 || height == 0 {
            return Err(CartoeeError::invalid_parameter(
                "size",
                format!("colorbar must be at least 1x1 pixels, got {}x{}", width, height),
            ));
        }

        let (vmin, vmax) = self.legend.range();
        let length = match self.orientation {
            Orientation::Horizontal => width,
            Orientation::Vertical => height,
        };

        let line_colors: Vec<Rgba<u8>> = (0..length)
            .map(|i| {
                let t = if length == 1 {
                    0.0
                } else {
                    i as f64 / (length - 1) as f64
                };
                Rgba(self.legend.rgba8_at(vmin + t * (vmax - vmin)))
            })
            .collect();

        let img = ImageBuffer::from_fn(width, height, |x, y| match self.orientation {
            Orientation::Horizontal => line_colors[x as usize],
            // Image row 0 is the top, which holds vmax
            Orientation::Vertical => line_colors[(height - 1 - y) as usize],
        });

        Ok(img)
    }

    /// Render and encode as PNG bytes
    pub fn encode_png(&self, width: u32, height: u32) -> Result<Vec<u8>> {
        let img = self.render(width, height)?;
        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, image::ImageFormat::Png)?;
        Ok(buffer.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::legend::build_legend;
    use crate::vis::VisParams;

    fn colorbar(location: ColorbarLocation, discrete: bool) -> Colorbar {
        let params = VisParams::default()
            .with_range(0.0, 100.0)
            .with_palette(["ff0000", "00ff00", "0000ff"]);
        Colorbar::new(build_legend(&params, None, discrete).unwrap(), location)
    }

    #[test]
    fn test_parse_location() {
        assert_eq!("Left".parse::<ColorbarLocation>().unwrap(), ColorbarLocation::Left);
        assert_eq!("top".parse::<ColorbarLocation>().unwrap(), ColorbarLocation::Top);
        assert!("center".parse::<ColorbarLocation>().is_err());
    }

    #[test]
    fn test_default_orientation() {
        assert_eq!(colorbar(ColorbarLocation::Right, false).orientation, Orientation::Vertical);
        assert_eq!(
            colorbar(ColorbarLocation::Bottom, false).orientation,
            Orientation::Horizontal
        );
    }

    #[test]
    fn test_axes_rects_fit_in_figure() {
        for location in [
            ColorbarLocation::Left,
            ColorbarLocation::Right,
            ColorbarLocation::Bottom,
            ColorbarLocation::Top,
        ] {
            let [left, bottom, width, height] = location.axes_rect();
            assert!(left + width <= 1.0 && bottom + height <= 1.0);
        }
    }

    #[test]
    fn test_side_locations_adjust_margins() {
        assert_eq!(
            colorbar(ColorbarLocation::Left, false).margin_adjust(),
            Some(MarginAdjust::Left(0.18))
        );
        assert_eq!(
            colorbar(ColorbarLocation::Right, false).margin_adjust(),
            Some(MarginAdjust::Right(0.85))
        );
        assert_eq!(colorbar(ColorbarLocation::Bottom, false).margin_adjust(), None);
        assert_eq!(colorbar(ColorbarLocation::Top, false).margin_adjust(), None);
    }

    #[test]
    fn test_caller_supplied_axes() {
        let legend = colorbar(ColorbarLocation::Top, false).legend;
        let rect = [0.1, 0.05, 0.8, 0.03];

        let bar = Colorbar::in_axes(legend.clone(), rect, Orientation::Horizontal).unwrap();
        assert_eq!(bar.axes_rect(), rect);
        assert_eq!(bar.margin_adjust(), None);
        assert_eq!(bar.render(10, 2).unwrap().get_pixel(0, 0).0, [255, 0, 0, 255]);

        for bad in [
            [0.5, 0.5, 0.6, 0.1],
            [0.1, 0.1, 0.0, 0.1],
            [-0.1, 0.1, 0.2, 0.1],
            [0.1, f64::NAN, 0.2, 0.1],
        ] {
            assert!(Colorbar::in_axes(legend.clone(), bad, Orientation::Vertical).is_err());
        }
    }

    #[test]
    fn test_render_horizontal() {
        let img = colorbar(ColorbarLocation::Bottom, false).render(101, 4).unwrap();
        assert_eq!(img.dimensions(), (101, 4));
        assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(img.get_pixel(50, 3).0, [0, 255, 0, 255]);
        assert_eq!(img.get_pixel(100, 2).0, [0, 0, 255, 255]);
    }

    #[test]
    fn test_render_vertical_puts_max_on_top() {
        let img = colorbar(ColorbarLocation::Left, true).render(3, 30).unwrap();
        assert_eq!(img.get_pixel(1, 0).0, [0, 0, 255, 255]);
        assert_eq!(img.get_pixel(1, 29).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_render_rejects_empty_size() {
        assert!(colorbar(ColorbarLocation::Top, false).render(0, 10).is_err());
    }

    #[test]
    fn test_encode_png() {
        let bytes = colorbar(ColorbarLocation::Top, false).encode_png(16, 2).unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), image::ImageFormat::Png);
    }
}
