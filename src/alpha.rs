//! Conversions between straight and premultiplied alpha.
//!
//! Resampling filters must run on premultiplied pixels, otherwise fully
//! transparent neighbours (stored as black) darken the colour of edge pixels.

use image::{Rgba, Rgba32FImage, RgbaImage};

/// Unpremultiplies a premultiplied alpha pixel.
pub fn unpremultiply(r: u8, g: u8, b: u8, a: u8) -> Rgba<u8> {
    if a == 0 {
        return Rgba([0, 0, 0, 0]);
    }
    let a_f = a as f32 / 255.0;
    let channel = |c: u8| (c as f32 / a_f).round().min(255.0) as u8;
    Rgba([channel(r), channel(g), channel(b), a])
}

/// Converts a straight-alpha image to premultiplied `f32` pixels in `0.0..=1.0`.
pub fn premultiplied(img: &RgbaImage) -> Rgba32FImage {
    Rgba32FImage::from_fn(img.width(), img.height(), |x, y| {
        let [r, g, b, a] = img.get_pixel(x, y).0.map(|c| c as f32 / 255.0);
        Rgba([r * a, g * a, b * a, a])
    })
}

/// Converts premultiplied `f32` pixels back to straight 8-bit RGBA.
///
/// Values pushed out of range by filter overshoot are clamped.
pub fn unpremultiplied(img: &Rgba32FImage) -> RgbaImage {
    RgbaImage::from_fn(img.width(), img.height(), |x, y| {
        let [r, g, b, a] = img.get_pixel(x, y).0;
        let alpha = (a.clamp(0.0, 1.0) * 255.0).round() as u8;
        if alpha == 0 {
            return Rgba([0, 0, 0, 0]);
        }
        let a = a.clamp(0.0, 1.0);
        let channel = |c: f32| ((c / a).clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgba([channel(r), channel(g), channel(b), alpha])
    })
}
