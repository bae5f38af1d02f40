//! Resolution-independent icon layouts.
//!
//! Every coordinate and radius in this module is expressed in grid units on
//! a 32x32 reference design. Layouts are scaled to pixels only at render
//! time, which is what lets a single description serve 16, 32 and 48 pixel
//! frames without per-size artwork.
//!
//! # Example
//!
//! ```
//! use kanban_favicon::{IconLayout, LayoutPreset};
//!
//! let layout = IconLayout::preset(LayoutPreset::TwoColumn);
//! assert_eq!(layout.cards.len(), 5);
//!
//! // Layouts are plain JSON, so custom boards can be loaded from a file.
//! let json = layout.to_json_pretty().unwrap();
//! let restored = IconLayout::from_json(&json).unwrap();
//! assert_eq!(restored, layout);
//! ```
//!
//! # JSON Format
//!
//! ```json
//! {
//!   "name": "two-column",
//!   "background": "#10b981",
//!   "backgroundRadius": 6.0,
//!   "cards": [
//!     { "bounds": { "x1": 4.0, "y1": 4.0, "x2": 14.5, "y2": 13.0 }, "radius": 1.5, "fill": "#ffffffeb" }
//!   ]
//! }
//! ```

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{FaviconError, Result};
use crate::icon::RectPx;

/// Edge length of the reference design, in grid units.
pub const GRID_UNITS: f32 = 32.0;

/// Pixels per grid unit at the given output size.
pub fn scale_factor(size: u32) -> f32 {
    size as f32 / GRID_UNITS
}

// ============================================================================
// GridRect
// ============================================================================

/// An axis-aligned rectangle in grid units, with inclusive corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct GridRect {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl GridRect {
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }

    /// Scales to pixel corners for a `size x size` canvas.
    ///
    /// Coordinates are truncated toward zero and clamped to the last pixel,
    /// so the result always lies within `[0, size)`.
    pub fn to_pixels(&self, size: u32) -> RectPx {
        let s = scale_factor(size);
        let last = size.saturating_sub(1);
        let px = |v: f32| ((v * s) as u32).min(last);
        RectPx::new(px(self.x1), px(self.y1), px(self.x2), px(self.y2))
    }

    fn validate(&self) -> std::result::Result<(), String> {
        let coords = [self.x1, self.y1, self.x2, self.y2];
        if coords.iter().any(|c| !c.is_finite()) {
            return Err(format!("{self:?} has a non-finite coordinate"));
        }
        if coords.iter().any(|c| !(0.0..=GRID_UNITS).contains(c)) {
            return Err(format!("{self:?} extends outside the 0..{GRID_UNITS} grid"));
        }
        if self.x2 < self.x1 || self.y2 < self.y1 {
            return Err(format!("{self:?} has its corners reversed"));
        }
        Ok(())
    }
}

// ============================================================================
// CanvasSpec / CardSpec
// ============================================================================

/// The background square for one render, already scaled to pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSpec {
    pub size: u32,
    pub background: Color,
    /// Corner radius in pixels, linear in `size`.
    pub corner_radius: u32,
}

impl CanvasSpec {
    /// Scales a grid-unit corner radius to `size` pixels.
    pub fn new(size: u32, background: Color, radius_units: f32) -> Self {
        Self {
            size,
            background,
            corner_radius: (radius_units * scale_factor(size)).round() as u32,
        }
    }

    /// The painted area: the whole canvas, inset by one pixel on the far edges.
    pub fn bounds(&self) -> RectPx {
        RectPx::full(self.size)
    }
}

/// A single card on the board.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct CardSpec {
    pub bounds: GridRect,

    /// Corner radius in grid units.
    #[serde(default = "default_card_radius")]
    pub radius: f32,

    #[serde(default = "default_card_fill")]
    pub fill: Color,
}

impl CardSpec {
    pub const fn new(bounds: GridRect, radius: f32, fill: Color) -> Self {
        Self {
            bounds,
            radius,
            fill,
        }
    }

    pub fn pixel_bounds(&self, size: u32) -> RectPx {
        self.bounds.to_pixels(size)
    }

    /// Corner radius in pixels; never below one pixel.
    pub fn pixel_radius(&self, size: u32) -> u32 {
        ((self.radius * scale_factor(size)).round() as u32).max(1)
    }
}

fn default_card_radius() -> f32 {
    1.5
}

fn default_card_fill() -> Color {
    Color::CARD
}

fn default_background() -> Color {
    Color::EMERALD
}

fn default_background_radius() -> f32 {
    6.0
}

// ============================================================================
// LayoutPreset
// ============================================================================

/// The built-in board arrangements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum LayoutPreset {
    /// Two columns of irregular-height cards (3 + 2). Shipped favicon.
    #[default]
    TwoColumn,
    /// Three columns holding 3, 2 and 1 equal cards.
    ThreeColumn,
}

impl LayoutPreset {
    pub const ALL: [Self; 2] = [Self::TwoColumn, Self::ThreeColumn];

    pub fn name(&self) -> &'static str {
        match self {
            Self::TwoColumn => "two-column",
            Self::ThreeColumn => "three-column",
        }
    }
}

// ============================================================================
// IconLayout
// ============================================================================

/// An ordered list of cards on a rounded background, in grid units.
///
/// Cards are painted in order, so later cards win where they overlap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct IconLayout {
    #[serde(default)]
    pub name: String,

    #[serde(default = "default_background")]
    pub background: Color,

    /// Background corner radius in grid units.
    #[serde(default = "default_background_radius")]
    pub background_radius: f32,

    pub cards: Vec<CardSpec>,
}

impl IconLayout {
    /// Builds one of the built-in layouts.
    pub fn preset(preset: LayoutPreset) -> Self {
        match preset {
            LayoutPreset::TwoColumn => Self::two_column(),
            LayoutPreset::ThreeColumn => Self::three_column(),
        }
    }

    /// Column 1 holds cards of height 9, 5.5 and 6; column 2 of 6.5 and 10.
    pub fn two_column() -> Self {
        const R: f32 = 1.5;
        let bounds = [
            GridRect::new(4.0, 4.0, 14.5, 13.0),
            GridRect::new(4.0, 15.0, 14.5, 20.5),
            GridRect::new(4.0, 22.5, 14.5, 28.5),
            GridRect::new(17.5, 4.0, 28.0, 10.5),
            GridRect::new(17.5, 12.5, 28.0, 22.5),
        ];
        Self::from_bounds(LayoutPreset::TwoColumn, R, &bounds)
    }

    /// Columns of 3, 2 and 1 cards, all 6x6 units with 2-3 unit gutters.
    pub fn three_column() -> Self {
        const R: f32 = 1.2;
        const COLUMNS: [(f32, f32); 3] = [(4.0, 10.0), (13.0, 19.0), (22.0, 28.0)];
        static ROWS: [(f32, f32); 3] = [(4.0, 10.0), (12.0, 18.0), (20.0, 26.0)];

        let bounds: Vec<GridRect> = COLUMNS
            .iter()
            .zip([3usize, 2, 1])
            .flat_map(|(&(x1, x2), count)| {
                ROWS[..count]
                    .iter()
                    .map(move |&(y1, y2)| GridRect::new(x1, y1, x2, y2))
            })
            .collect();
        Self::from_bounds(LayoutPreset::ThreeColumn, R, &bounds)
    }

    fn from_bounds(preset: LayoutPreset, card_radius: f32, bounds: &[GridRect]) -> Self {
        Self {
            name: preset.name().to_string(),
            background: Color::EMERALD,
            background_radius: default_background_radius(),
            cards: bounds
                .iter()
                .map(|&b| CardSpec::new(b, card_radius, Color::CARD))
                .collect(),
        }
    }

    /// Replaces the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Replaces the fill of every card.
    pub fn with_card_fill(mut self, color: Color) -> Self {
        for card in &mut self.cards {
            card.fill = color;
        }
        self
    }

    /// The scaled background for a `size x size` render.
    pub fn canvas(&self, size: u32) -> CanvasSpec {
        CanvasSpec::new(size, self.background, self.background_radius)
    }

    /// Checks that every card fits on the grid and all radii are usable.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| {
            let label = if self.name.is_empty() { "layout" } else { self.name.as_str() };
            FaviconError::InvalidLayout(format!("{label}: {msg}"))
        };

        if !self.background_radius.is_finite() || self.background_radius < 0.0 {
            return Err(invalid(format!(
                "background radius {} must be a non-negative number",
                self.background_radius
            )));
        }
        for (i, card) in self.cards.iter().enumerate() {
            card.bounds
                .validate()
                .map_err(|msg| invalid(format!("card {i}: {msg}")))?;
            if !card.radius.is_finite() || card.radius < 0.0 {
                return Err(invalid(format!(
                    "card {i}: radius {} must be a non-negative number",
                    card.radius
                )));
            }
        }
        Ok(())
    }

    /// Renders the layout as a 32x32-unit SVG document.
    ///
    /// Card opacity is expressed with `fill-opacity`, so a vector renderer
    /// blends cards over the background.
    pub fn to_svg(&self) -> String {
        let mut svg = String::new();
        let _ = write!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{g}" height="{g}" viewBox="0 0 {g} {g}">"#,
            g = GRID_UNITS
        );
        push_svg_rect(
            &mut svg,
            &GridRect::new(0.0, 0.0, GRID_UNITS, GRID_UNITS),
            self.background_radius,
            self.background,
        );
        for card in &self.cards {
            push_svg_rect(&mut svg, &card.bounds, card.radius, card.fill);
        }
        svg.push_str("</svg>");
        svg
    }

    /// Serializes the layout to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the layout to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parses and validates a layout.
    pub fn from_json(json: &str) -> Result<Self> {
        let layout: Self = serde_json::from_str(json)?;
        layout.validate()?;
        Ok(layout)
    }
}

impl Default for IconLayout {
    fn default() -> Self {
        Self::preset(LayoutPreset::default())
    }
}

impl From<LayoutPreset> for IconLayout {
    fn from(preset: LayoutPreset) -> Self {
        Self::preset(preset)
    }
}

fn push_svg_rect(svg: &mut String, rect: &GridRect, radius: f32, fill: Color) {
    let _ = write!(
        svg,
        r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{radius}" fill="{}""#,
        rect.x1,
        rect.y1,
        rect.width(),
        rect.height(),
        fill.rgb_hex(),
    );
    if !fill.is_opaque() {
        let _ = write!(svg, r#" fill-opacity="{:.4}""#, fill.opacity());
    }
    svg.push_str("/>");
}

// ============================================================================
// Tests
// ============================================================================
