//! kanban-favicon: a procedurally drawn kanban board icon.
//!
//! The icon is an emerald rounded square holding white cards arranged in
//! columns. Layouts are described once on a 32x32 grid and rasterized at
//! whatever pixel sizes are requested, then packed into a single
//! multi-resolution ICO file.
//!
//! # Example
//!
//! ```
//! use kanban_favicon::{encode_ico, frame_sizes, IconLayout, IconRenderer, LayoutPreset};
//!
//! let layout = IconLayout::preset(LayoutPreset::TwoColumn);
//! let frames = IconRenderer::new().render_set(&[16, 32, 48], &layout).unwrap();
//!
//! let ico = encode_ico(&frames).unwrap();
//! let sizes: Vec<String> = frame_sizes(&ico).unwrap().iter().map(|s| s.to_string()).collect();
//! assert_eq!(sizes, ["16x16", "32x32", "48x48"]);
//! ```

mod alpha;
mod color;
mod error;
mod export;
mod icon;
mod layout;
mod raster;
mod renderer;
mod svg;

pub use color::Color;
pub use error::{FaviconError, Result};
pub use export::{
    DEFAULT_SIZES, MAX_ICO_SIZE, check_ico_size, encode_ico, frame_sizes, read_frame_sizes,
    write_ico, write_svg,
};
pub use icon::{IconImage, IconSet, RectPx, SizePx};
pub use layout::{CanvasSpec, CardSpec, GRID_UNITS, GridRect, IconLayout, LayoutPreset, scale_factor};
pub use raster::{covers, fill_rounded_rect};
pub use renderer::{FrameStrategy, IconRenderer, RenderMode, downsample};
pub use svg::render_svg;
