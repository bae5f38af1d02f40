//! Crisp rasterization of rounded rectangles.
//!
//! Shapes are filled without antialiasing and without blending: each covered
//! pixel is overwritten with the fill color, alpha included. Small favicons
//! stay sharp this way, and the output depends only on integer geometry.

use image::{Rgba, RgbaImage};

use crate::icon::RectPx;

/// Returns true if pixel `(x, y)` is covered by `rect` with corner `radius`.
///
/// Inside a corner square of side `radius`, a pixel is covered when it lies
/// within `radius` of the corner circle's center. The radius is clamped to
/// half the shorter side.
pub fn covers(rect: &RectPx, radius: u32, x: u32, y: u32) -> bool {
    if !rect.contains(x, y) {
        return false;
    }
    let r = clamp_radius(rect, radius);
    if r == 0 {
        return true;
    }

    let corner_center = |v: u32, lo: u32, hi: u32| {
        if v < lo + r {
            Some(lo + r)
        } else if v > hi - r {
            Some(hi - r)
        } else {
            None
        }
    };

    match (
        corner_center(x, rect.x1, rect.x2),
        corner_center(y, rect.y1, rect.y2),
    ) {
        (Some(cx), Some(cy)) => {
            let dx = u64::from(x.abs_diff(cx));
            let dy = u64::from(y.abs_diff(cy));
            let r = u64::from(r);
            dx * dx + dy * dy <= r * r
        }
        _ => true,
    }
}

/// Fills a rounded rectangle, replacing the covered pixels with `color`.
///
/// Parts of `rect` outside the image are skipped.
pub fn fill_rounded_rect(img: &mut RgbaImage, rect: RectPx, radius: u32, color: Rgba<u8>) {
    if img.width() == 0 || img.height() == 0 {
        return;
    }
    let x_end = rect.x2.min(img.width() - 1);
    let y_end = rect.y2.min(img.height() - 1);

    for y in rect.y1..=y_end {
        for x in rect.x1..=x_end {
            if covers(&rect, radius, x, y) {
                img.put_pixel(x, y, color);
            }
        }
    }
}

fn clamp_radius(rect: &RectPx, radius: u32) -> u32 {
    radius.min(rect.width().min(rect.height()) / 2)
}
