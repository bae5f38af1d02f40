//! Error type shared by rendering, layout loading and export.

use std::path::PathBuf;

/// Errors produced while building, rendering or exporting an icon.
#[derive(Debug, thiserror::Error)]
pub enum FaviconError {
    /// A requested pixel size is zero or not representable in an ICO frame.
    #[error("invalid icon size {size}: {reason}")]
    InvalidSize { size: u32, reason: &'static str },

    /// An icon file needs at least one frame.
    #[error("icon set has no frames")]
    EmptyIconSet,

    /// A color string could not be parsed as `#rrggbb` or `#rrggbbaa`.
    #[error("invalid color {0:?}: expected #rrggbb or #rrggbbaa")]
    InvalidColor(String),

    /// A layout failed validation.
    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    /// A layout file is not valid JSON for [`IconLayout`](crate::IconLayout).
    #[error("failed to parse layout: {0}")]
    Layout(#[from] serde_json::Error),

    #[error("failed to render svg: {0}")]
    Svg(String),

    #[error("malformed icon file: {0}")]
    Ico(#[source] std::io::Error),

    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FaviconError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = FaviconError> = std::result::Result<T, E>;
