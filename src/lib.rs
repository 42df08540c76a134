//! # cartoee
//!
//! Plot satellite-imagery thumbnails on map axes, with palettes and colorbars.
//!
//! The imagery service renders the pixels and a plotting surface draws them;
//! this crate builds what passes between the two.
//!
//! ## Key Features
//!
//! - **Palettes**: sample named color scales into hex palettes the imagery
//!   service accepts
//! - **Legends**: discrete or continuous value-to-color mappings with opacity
//!   and a band label
//! - **Colorbars**: placement beside the map and rasterisation to RGBA
//! - **Thumbnail requests**: region, dimensions and visualization parameters
//!   translated into query parameters
//!
//! ## Example
//!
//! ```
//! use cartoee::{build_legend, VisParams};
//!
//! let params = VisParams::default()
//!     .with_range(0.0, 100.0)
//!     .with_palette(["ff0000", "00ff00", "0000ff"]);
//! let legend = build_legend(&params, None, true).unwrap();
//! assert_eq!(legend.hex_at(50.0), "#00ff00");
//! ```

pub mod colorbar;
pub mod colormaps;
pub mod config;
pub mod error;
pub mod legend;
pub mod logging;
pub mod map;
pub mod thumbnail;
pub mod vis;

pub use colorbar::{Colorbar, ColorbarLocation, MarginAdjust, Orientation, Placement};
pub use colormaps::{available_scales, build_palette, get_scale, ColorScale, Palette};
pub use config::Config;
pub use error::{CartoeeError, Result};
pub use legend::{build_legend, build_legend_with, Legend, LegendOptions, LegendWarning};
pub use logging::{init_tracing, log_error, log_timed_operation};
pub use map::{
    add_colorbar, add_colorbar_in_axes, add_layer, decode_thumbnail, get_map, ImageSource,
    PlotSurface, Session,
};
pub use thumbnail::{Dimensions, Region, ThumbnailRequest, ViewExtent};
pub use vis::{ColorSource, VisParams};
