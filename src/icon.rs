//! Raster icon types.
//!
//! This module provides the pixel-space side of the crate: rectangles in
//! pixel coordinates and the rendered frames that end up in an icon file.

use image::RgbaImage;

/// An axis-aligned rectangle in pixel coordinates, with inclusive corners.
///
/// `(x1, y1)` is the top-left pixel and `(x2, y2)` the bottom-right pixel,
/// both painted. This matches how the layout's grid rectangles are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RectPx {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl RectPx {
    /// Creates a rectangle from its inclusive corners.
    ///
    /// Corners given in the wrong order are swapped.
    pub fn new(x1: u32, y1: u32, x2: u32, y2: u32) -> Self {
        Self {
            x1: x1.min(x2),
            y1: y1.min(y2),
            x2: x1.max(x2),
            y2: y1.max(y2),
        }
    }

    /// The rectangle covering a whole `size x size` canvas.
    ///
    /// A zero size degenerates to the origin pixel.
    pub fn full(size: u32) -> Self {
        let last = size.saturating_sub(1);
        Self::new(0, 0, last, last)
    }

    /// Number of painted columns.
    pub fn width(&self) -> u32 {
        self.x2 - self.x1 + 1
    }

    /// Number of painted rows.
    pub fn height(&self) -> u32 {
        self.y2 - self.y1 + 1
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x1 && x <= self.x2 && y >= self.y1 && y <= self.y2
    }

    /// Returns true if every pixel of the rectangle lies inside `[0, size)`.
    pub fn fits_within(&self, size: u32) -> bool {
        self.x2 < size && self.y2 < size
    }
}

/// A 2D size in pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizePx {
    pub width: u32,
    pub height: u32,
}

impl SizePx {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns true if width equals height.
    pub fn is_square(&self) -> bool {
        self.width == self.height
    }
}

impl std::fmt::Display for SizePx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A single rendered icon frame.
#[derive(Debug, Clone, PartialEq)]
pub struct IconImage {
    /// The image data in straight-alpha RGBA format.
    pub data: RgbaImage,
}

impl IconImage {
    pub fn new(data: RgbaImage) -> Self {
        Self { data }
    }

    /// Returns the pixel dimensions of the image.
    pub fn dimensions(&self) -> SizePx {
        SizePx::new(self.data.width(), self.data.height())
    }

    /// The edge length for square frames, or the larger edge otherwise.
    pub fn size(&self) -> u32 {
        self.data.width().max(self.data.height())
    }

    /// Raw RGBA bytes, row-major.
    pub fn as_raw(&self) -> &[u8] {
        self.data.as_raw()
    }
}

/// The frames of one icon at several resolutions, smallest first.
///
/// Icon containers pick a frame by display context, so an `IconSet` keeps
/// at most one frame per size.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IconSet {
    images: Vec<IconImage>,
}

impl IconSet {
    /// Creates a new empty icon set.
    pub fn new() -> Self {
        Self { images: Vec::new() }
    }

    /// Creates an icon set from a vector of images.
    pub fn from_images(images: Vec<IconImage>) -> Self {
        let mut set = Self::new();
        for image in images {
            set.add_image(image);
        }
        set
    }

    /// Adds a frame, replacing any existing frame of the same size.
    pub fn add_image(&mut self, image: IconImage) {
        let size = image.size();
        match self.images.binary_search_by_key(&size, IconImage::size) {
            Ok(idx) => self.images[idx] = image,
            Err(idx) => self.images.insert(idx, image),
        }
    }

    /// Returns the number of images in the set.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Returns true if the icon set contains no images.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Finds the frame whose size is closest to `target_size`.
    pub fn find_by_size(&self, target_size: u32) -> Option<&IconImage> {
        self.images
            .iter()
            .min_by_key(|img| img.size().abs_diff(target_size))
    }

    /// Frame sizes in ascending order.
    pub fn sizes(&self) -> Vec<u32> {
        self.images.iter().map(IconImage::size).collect()
    }

    /// Returns an iterator over the icon images.
    pub fn iter(&self) -> impl Iterator<Item = &IconImage> {
        self.images.iter()
    }
}

impl IntoIterator for IconSet {
    type Item = IconImage;
    type IntoIter = std::vec::IntoIter<IconImage>;

    fn into_iter(self) -> Self::IntoIter {
        self.images.into_iter()
    }
}

impl<'a> IntoIterator for &'a IconSet {
    type Item = &'a IconImage;
    type IntoIter = std::slice::Iter<'a, IconImage>;

    fn into_iter(self) -> Self::IntoIter {
        self.images.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_px_new() {
        let rect = RectPx::new(10, 20, 4, 2);
        assert_eq!(rect, RectPx { x1: 4, y1: 2, x2: 10, y2: 20 });
        assert_eq!(rect.width(), 7);
        assert_eq!(rect.height(), 19);
        assert!(rect.contains(4, 20));
        assert!(!rect.contains(11, 20));
    }

    #[test]
    fn rect_px_full_fits() {
        let rect = RectPx::full(16);
        assert_eq!(rect.width(), 16);
        assert!(rect.fits_within(16));
        assert!(!rect.fits_within(15));
    }

    #[test]
    fn rect_px_full_of_zero_does_not_underflow() {
        let rect = RectPx::full(0);
        assert_eq!(rect, RectPx::new(0, 0, 0, 0));
        assert!(!rect.fits_within(0));
    }

    #[test]
    fn size_px_is_square() {
        assert!(SizePx::new(100, 100).is_square());
        assert!(!SizePx::new(100, 200).is_square());
        assert_eq!(SizePx::new(48, 48).to_string(), "48x48");
    }

    #[test]
    fn icon_set_orders_and_dedupes() {
        let mut set = IconSet::new();
        assert!(set.is_empty());

        set.add_image(IconImage::new(RgbaImage::new(48, 48)));
        set.add_image(IconImage::new(RgbaImage::new(16, 16)));
        set.add_image(IconImage::new(RgbaImage::new(32, 32)));
        set.add_image(IconImage::new(RgbaImage::new(16, 16)));

        assert_eq!(set.len(), 3);
        assert_eq!(set.sizes(), vec![16, 32, 48]);
    }

    #[test]
    fn icon_set_find_closest() {
        let set = IconSet::from_images(vec![
            IconImage::new(RgbaImage::new(16, 16)),
            IconImage::new(RgbaImage::new(32, 32)),
        ]);

        // |16-20| < |32-20|
        let found = set.find_by_size(20).unwrap();
        assert_eq!(found.dimensions().width, 16);
        assert!(IconSet::new().find_by_size(20).is_none());
    }
}
