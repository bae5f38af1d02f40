//! SVG rendering utilities using resvg/usvg.
//!
//! Used by the smooth render mode: the layout is turned into an SVG document
//! and rasterized with antialiasing at the requested size.

use image::{Rgba, RgbaImage};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree};

use crate::alpha::unpremultiply;
use crate::error::{FaviconError, Result};

/// Renders an SVG string to an RGBA image at the specified size.
///
/// The SVG is scaled to fit within `size x size` pixels while preserving
/// aspect ratio (the larger dimension will be `size`).
pub fn render_svg(svg_data: &str, size: u32) -> Result<RgbaImage> {
    let opts = Options::default();
    let tree = Tree::from_str(svg_data, &opts).map_err(|e| FaviconError::Svg(e.to_string()))?;

    // Calculate scale to fit within size x size
    let svg_size = tree.size();
    let scale = (size as f32) / svg_size.width().max(svg_size.height());
    let width = ((svg_size.width() * scale).ceil() as u32).min(size);
    let height = ((svg_size.height() * scale).ceil() as u32).min(size);

    let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
        FaviconError::Svg(format!("cannot allocate a {width}x{height} pixmap"))
    })?;
    let transform = Transform::from_scale(scale, scale);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    Ok(pixmap_to_rgba_image(&pixmap))
}

/// Converts a tiny_skia Pixmap to an image::RgbaImage.
fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    RgbaImage::from_fn(pixmap.width(), pixmap.height(), |x, y| {
        // tiny_skia uses premultiplied alpha, we need to unpremultiply
        pixmap
            .pixel(x, y)
            .map(|p| unpremultiply(p.red(), p.green(), p.blue(), p.alpha()))
            .unwrap_or(Rgba([0, 0, 0, 0]))
    })
}
