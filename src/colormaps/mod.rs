//! Color scales and palettes.
//!
//! Named scales come from the `colorgrad` presets and are sampled into hex
//! palettes the imagery service understands.

pub mod color;
pub mod palette;
pub mod registry;

pub use color::{format_hex, lerp_color, normalize_color_code, parse_color_code, rgba8};
pub use palette::{build_palette, sample_scale, Palette, DEFAULT_SAMPLE_COUNT};
pub use registry::{available_scales, get_scale, ColorScale, NamedScale};
