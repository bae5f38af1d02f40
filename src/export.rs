//! ICO container encoding and file output.
//!
//! Every frame is stored as a PNG-compressed 32-bit RGBA image, one
//! directory entry per size. Files are encoded fully in memory and written
//! with a single call, so an encoding failure never leaves a partial file.

use std::io::Cursor;
use std::path::Path;

use image::ExtendedColorType;
use image::codecs::ico::{IcoEncoder, IcoFrame};

use crate::error::{FaviconError, Result};
use crate::icon::{IconSet, SizePx};
use crate::layout::IconLayout;

/// Largest edge an ICO directory entry can describe.
pub const MAX_ICO_SIZE: u32 = 256;

/// The frame sizes written when nothing else is requested.
pub const DEFAULT_SIZES: [u32; 3] = [16, 32, 48];

/// Checks that `size` can be stored in an ICO file.
pub fn check_ico_size(size: u32) -> Result<()> {
    match size {
        0 => Err(FaviconError::InvalidSize {
            size,
            reason: "size must be positive",
        }),
        s if s > MAX_ICO_SIZE => Err(FaviconError::InvalidSize {
            size,
            reason: "ico frames are at most 256 pixels",
        }),
        _ => Ok(()),
    }
}

/// Encodes every frame of `set` into an ICO container.
pub fn encode_ico(set: &IconSet) -> Result<Vec<u8>> {
    if set.is_empty() {
        return Err(FaviconError::EmptyIconSet);
    }

    let frames = set
        .iter()
        .map(|image| {
            let dims = image.dimensions();
            if !dims.is_square() {
                return Err(FaviconError::InvalidSize {
                    size: image.size(),
                    reason: "ico frames must be square",
                });
            }
            check_ico_size(dims.width)?;
            Ok(IcoFrame::as_png(
                image.as_raw(),
                dims.width,
                dims.height,
                ExtendedColorType::Rgba8,
            )?)
        })
        .collect::<Result<Vec<_>>>()?;

    let mut bytes = Vec::new();
    IcoEncoder::new(&mut bytes).encode_images(&frames)?;
    log::debug!("encoded {} ico frames into {} bytes", frames.len(), bytes.len());
    Ok(bytes)
}

/// Encodes `set` and writes it to `path`, replacing any existing file.
///
/// Returns the number of bytes written. The parent directory must exist.
pub fn write_ico(path: impl AsRef<Path>, set: &IconSet) -> Result<usize> {
    let path = path.as_ref();
    let bytes = encode_ico(set)?;
    std::fs::write(path, &bytes).map_err(|e| FaviconError::io(path, e))?;
    log::debug!("wrote {}", path.display());
    Ok(bytes.len())
}

/// Writes the layout as a standalone SVG document.
pub fn write_svg(path: impl AsRef<Path>, layout: &IconLayout) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, layout.to_svg()).map_err(|e| FaviconError::io(path, e))
}

/// Reads the directory of an ICO file and returns the declared frame sizes.
pub fn frame_sizes(ico_bytes: &[u8]) -> Result<Vec<SizePx>> {
    let dir = ico::IconDir::read(Cursor::new(ico_bytes)).map_err(FaviconError::Ico)?;
    Ok(dir
        .entries()
        .iter()
        .map(|entry| SizePx::new(entry.width(), entry.height()))
        .collect())
}

/// Like [`frame_sizes`], reading the file at `path`.
pub fn read_frame_sizes(path: impl AsRef<Path>) -> Result<Vec<SizePx>> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| FaviconError::io(path, e))?;
    frame_sizes(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon::IconImage;
    use crate::renderer::IconRenderer;
    use image::RgbaImage;
    use std::path::PathBuf;

    fn default_set() -> IconSet {
        IconRenderer::new()
            .render_set(&DEFAULT_SIZES, &IconLayout::default())
            .unwrap()
    }

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("kanban-favicon-{}-{name}", std::process::id()))
    }

    #[test]
    fn check_ico_size_bounds() {
        assert!(check_ico_size(1).is_ok());
        assert!(check_ico_size(256).is_ok());
        assert!(check_ico_size(0).is_err());
        assert!(matches!(
            check_ico_size(257),
            Err(FaviconError::InvalidSize { size: 257, .. })
        ));
    }

    #[test]
    fn encoded_directory_lists_every_size() {
        let bytes = encode_ico(&default_set()).unwrap();
        let sizes = frame_sizes(&bytes).unwrap();
        assert_eq!(
            sizes,
            vec![SizePx::new(16, 16), SizePx::new(32, 32), SizePx::new(48, 48)]
        );
    }

    #[test]
    fn frames_decode_back_to_rgba() {
        let set = default_set();
        let bytes = encode_ico(&set).unwrap();
        let dir = ico::IconDir::read(Cursor::new(&bytes)).unwrap();

        let entry = dir.entries().iter().find(|e| e.width() == 48).unwrap();
        assert!(entry.is_png());
        let decoded = entry.decode().unwrap();
        assert_eq!(decoded.rgba_data(), set.find_by_size(48).unwrap().as_raw());
    }

    #[test]
    fn encoding_is_deterministic() {
        assert_eq!(
            encode_ico(&default_set()).unwrap(),
            encode_ico(&default_set()).unwrap()
        );
    }

    #[test]
    fn rejects_empty_and_oversized_sets() {
        assert!(matches!(
            encode_ico(&IconSet::new()),
            Err(FaviconError::EmptyIconSet)
        ));

        let big = IconSet::from_images(vec![IconImage::new(RgbaImage::new(300, 300))]);
        assert!(matches!(
            encode_ico(&big),
            Err(FaviconError::InvalidSize { size: 300, .. })
        ));

        let wide = IconSet::from_images(vec![IconImage::new(RgbaImage::new(32, 16))]);
        assert!(encode_ico(&wide).is_err());
    }

    #[test]
    fn write_and_reload() {
        let path = scratch_path("roundtrip.ico");
        let written = write_ico(&path, &default_set()).unwrap();
        assert_eq!(std::fs::metadata(&path).unwrap().len() as usize, written);

        // Overwrites in place.
        write_ico(&path, &default_set()).unwrap();
        let sizes = read_frame_sizes(&path).unwrap();
        assert_eq!(sizes.len(), 3);
        assert!(sizes.iter().all(SizePx::is_square));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let path = scratch_path("no-such-dir").join("favicon.ico");
        let err = write_ico(&path, &default_set()).unwrap_err();
        match err {
            FaviconError::Io { path: p, .. } => assert_eq!(p, path),
            other => panic!("expected io error, got {other:?}"),
        }
        assert!(!path.exists());
    }

    #[test]
    fn svg_export_writes_document() {
        let path = scratch_path("layout.svg");
        write_svg(&path, &IconLayout::three_column()).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert_eq!(svg, IconLayout::three_column().to_svg());
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn garbage_is_not_an_icon() {
        assert!(matches!(
            frame_sizes(b"definitely not an ico"),
            Err(FaviconError::Ico(_))
        ));
    }
}
