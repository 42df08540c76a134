//! Image utilities for testing.

use image::{ImageBuffer, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

/// A raster filled with a single color
pub fn solid_raster(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
    ImageBuffer::from_pixel(width, height, Rgba(color))
}

/// Encode a raster as PNG bytes, the way the imagery service returns it
pub fn encode_png(img: &RgbaImage) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, ImageFormat::Png)
        .expect("PNG encoding of an in-memory buffer");
    buffer.into_inner()
}

/// Check that every pixel of an image equals `color`
pub fn assert_uniform(img: &RgbaImage, color: [u8; 4]) -> Result<(), String> {
    for (x, y, pixel) in img.enumerate_pixels() {
        if pixel.0 != color {
            return Err(format!(
                "Pixel ({}, {}) is {:?}, expected {:?}",
                x, y, pixel.0, color
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_roundtrip() {
        let img = solid_raster(2, 2, [1, 2, 3, 255]);
        let bytes = encode_png(&img);
        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Png);
    }

    #[test]
    fn test_assert_uniform() {
        let mut img = solid_raster(3, 3, [0, 0, 0, 255]);
        assert!(assert_uniform(&img, [0, 0, 0, 255]).is_ok());

        img.put_pixel(1, 1, Rgba([0, 0, 1, 255]));
        assert!(assert_uniform(&img, [0, 0, 0, 255]).is_err());
    }
}
