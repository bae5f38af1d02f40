//! Rendering of layouts into icon frames.

use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::alpha::{premultiplied, unpremultiplied};
use crate::error::{FaviconError, Result};
use crate::icon::{IconImage, IconSet};
use crate::layout::IconLayout;
use crate::raster::fill_rounded_rect;
use crate::svg::render_svg;

/// How shapes are turned into pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Hard-edged shapes on integer pixel corners. Card pixels replace the
    /// background, keeping the card's own alpha.
    #[default]
    Crisp,
    /// Antialiased vector rendering; cards are blended over the background.
    Smooth,
}

/// How the frames of an [`IconSet`] are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameStrategy {
    /// Render once at the largest size and resize down (Lanczos3).
    #[default]
    Downsample,
    /// Render every size directly from the grid description.
    Native,
}

/// Renders [`IconLayout`]s at arbitrary pixel sizes.
///
/// # Example
///
/// ```
/// use kanban_favicon::{IconLayout, IconRenderer};
///
/// let renderer = IconRenderer::new();
/// let frame = renderer.render(32, &IconLayout::two_column()).unwrap();
/// assert_eq!(frame.data.get_pixel(16, 16).0, [16, 185, 129, 255]);
///
/// let set = renderer.render_set(&[16, 32, 48], &IconLayout::two_column()).unwrap();
/// assert_eq!(set.sizes(), vec![16, 32, 48]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct IconRenderer {
    pub mode: RenderMode,
    pub strategy: FrameStrategy,
}

impl IconRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_strategy(mut self, strategy: FrameStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Renders `layout` onto a fresh transparent `size x size` canvas.
    pub fn render(&self, size: u32, layout: &IconLayout) -> Result<IconImage> {
        if size == 0 {
            return Err(FaviconError::InvalidSize {
                size,
                reason: "size must be positive",
            });
        }
        log::debug!("rendering {:?} layout {:?} at {size}px", self.mode, layout.name);

        let data = match self.mode {
            RenderMode::Crisp => render_crisp(size, layout),
            RenderMode::Smooth => render_svg(&layout.to_svg(), size)?,
        };
        Ok(IconImage::new(data))
    }

    /// Renders one frame per distinct size in `sizes`.
    pub fn render_set(&self, sizes: &[u32], layout: &IconLayout) -> Result<IconSet> {
        let mut set = IconSet::new();
        let Some(&largest) = sizes.iter().max() else {
            return Ok(set);
        };

        match self.strategy {
            FrameStrategy::Native => {
                for &size in sizes {
                    set.add_image(self.render(size, layout)?);
                }
            }
            FrameStrategy::Downsample => {
                let master = self.render(largest, layout)?;
                for &size in sizes.iter().filter(|&&s| s != largest) {
                    set.add_image(downsample(&master, size)?);
                }
                set.add_image(master);
            }
        }
        Ok(set)
    }
}

/// Resizes a square frame to `size x size` with a Lanczos3 filter.
///
/// Filtering runs on premultiplied alpha so transparent corners do not
/// darken the antialiased edge.
pub fn downsample(image: &IconImage, size: u32) -> Result<IconImage> {
    if size == 0 {
        return Err(FaviconError::InvalidSize {
            size,
            reason: "size must be positive",
        });
    }
    log::debug!("resampling {}px frame to {size}px", image.size());
    let premul = premultiplied(&image.data);
    let resized = imageops::resize(&premul, size, size, FilterType::Lanczos3);
    Ok(IconImage::new(unpremultiplied(&resized)))
}

fn render_crisp(size: u32, layout: &IconLayout) -> RgbaImage {
    let mut img = RgbaImage::new(size, size);

    let canvas = layout.canvas(size);
    fill_rounded_rect(
        &mut img,
        canvas.bounds(),
        canvas.corner_radius,
        canvas.background.to_rgba(),
    );

    for card in &layout.cards {
        fill_rounded_rect(
            &mut img,
            card.pixel_bounds(size),
            card.pixel_radius(size),
            card.fill.to_rgba(),
        );
    }
    img
}
