//! Hex color codes and channel arithmetic.

use colorgrad::Color;

use crate::error::{CartoeeError, Result};

/// Normalize a palette entry to `#rrggbb` form.
///
/// Leading/trailing whitespace is ignored and a missing `#` is prepended.
/// Anything other than exactly six hex digits afterwards is rejected.
pub fn normalize_color_code(code: &str) -> Result<String> {
    let trimmed = code.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(CartoeeError::InvalidColorCode {
            code: code.to_string(),
        });
    }

    Ok(format!("#{}", digits.to_ascii_lowercase()))
}

/// Parse a palette entry (with or without `#`) into an opaque color
pub fn parse_color_code(code: &str) -> Result<Color> {
    let normalized = normalize_color_code(code)?;
    Color::from_html(&normalized).map_err(|_| CartoeeError::InvalidColorCode {
        code: code.to_string(),
    })
}

/// Quantize a color to RGBA bytes, rounding each channel to the nearest step
pub fn rgba8(color: &Color) -> [u8; 4] {
    let quantize = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    [
        quantize(color.r),
        quantize(color.g),
        quantize(color.b),
        quantize(color.a),
    ]
}

/// Encode the RGB channels of a color as `#rrggbb`, dropping alpha
pub fn format_hex(color: &Color) -> String {
    let opaque = Color::new(
        color.r.clamp(0.0, 1.0),
        color.g.clamp(0.0, 1.0),
        color.b.clamp(0.0, 1.0),
        1.0,
    );
    opaque.to_hex_string()
}

/// Linear interpolation between two colors, channel by channel.
///
/// `t = 0` returns `c1` and `t = 1` returns `c2` exactly.
pub fn lerp_color(c1: &Color, c2: &Color, t: f64) -> Color {
    let mix = |a: f64, b: f64| a * (1.0 - t) + b * t;
    Color::new(mix(c1.r, c2.r), mix(c1.g, c2.g), mix(c1.b, c2.b), mix(c1.a, c2.a))
}
