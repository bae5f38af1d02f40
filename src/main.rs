use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;
use simple_logger::SimpleLogger;

use kanban_favicon::{
    Color, DEFAULT_SIZES, FaviconError, FrameStrategy, IconLayout, IconRenderer, IconSet,
    LayoutPreset, MAX_ICO_SIZE, RenderMode, Result, write_ico, write_svg,
};

/// Draws the kanban board favicon and saves it as a multi-size ICO file.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Opts {
    /// Output icon path.
    #[arg(short, long, default_value = "src/app/favicon.ico")]
    output: PathBuf,

    /// Comma separated frame sizes.
    #[arg(
        short,
        long,
        value_delimiter = ',',
        default_values_t = DEFAULT_SIZES,
        value_parser = clap::value_parser!(u32).range(1..=MAX_ICO_SIZE as i64)
    )]
    sizes: Vec<u32>,

    /// Built-in board arrangement.
    #[arg(short, long, value_enum, default_value_t = LayoutPreset::TwoColumn)]
    layout: LayoutPreset,

    /// JSON layout file; takes precedence over --layout.
    #[arg(long)]
    layout_file: Option<PathBuf>,

    /// Background color override (#rrggbb or #rrggbbaa).
    #[arg(long)]
    background: Option<Color>,

    /// Card color override (#rrggbb or #rrggbbaa).
    #[arg(long)]
    card: Option<Color>,

    /// Antialiased rendering instead of crisp pixel edges.
    #[arg(long)]
    smooth: bool,

    /// Render every size from the layout instead of downsampling the largest.
    #[arg(long)]
    native: bool,

    /// Also write the layout as an SVG document.
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Print the effective layout as JSON and exit.
    #[arg(long)]
    dump_layout: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let opts = Opts::parse();

    let level = if opts.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Err(e) = SimpleLogger::new().with_level(level).init() {
        eprintln!("warning: logger unavailable: {e}");
    }

    report(run(&opts))
}

fn report(result: Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(opts: &Opts) -> Result<()> {
    let mut layout = match &opts.layout_file {
        Some(path) => load_layout(path)?,
        None => IconLayout::preset(opts.layout),
    };
    if let Some(color) = opts.background {
        layout = layout.with_background(color);
    }
    if let Some(color) = opts.card {
        layout = layout.with_card_fill(color);
    }

    if opts.dump_layout {
        println!("{}", layout.to_json_pretty()?);
        return Ok(());
    }

    let renderer = IconRenderer::new()
        .with_mode(if opts.smooth {
            RenderMode::Smooth
        } else {
            RenderMode::Crisp
        })
        .with_strategy(if opts.native {
            FrameStrategy::Native
        } else {
            FrameStrategy::Downsample
        });
    log::debug!("{renderer:?} sizes={:?}", opts.sizes);

    let frames = renderer.render_set(&opts.sizes, &layout)?;
    let written = write_ico(&opts.output, &frames)?;
    log::info!("{} bytes written to {}", written, opts.output.display());

    if let Some(path) = &opts.svg {
        write_svg(path, &layout)?;
        log::info!("layout svg written to {}", path.display());
    }

    println!("{}", confirmation_line(&opts.output, &frames));
    Ok(())
}

fn confirmation_line(path: &Path, frames: &IconSet) -> String {
    let sizes: Vec<String> = frames.sizes().iter().map(|s| format!("{s}x{s}")).collect();
    format!("✓ Favicon saved to {}  ({})", path.display(), sizes.join(", "))
}

fn load_layout(path: &Path) -> Result<IconLayout> {
    let json = std::fs::read_to_string(path).map_err(|source| FaviconError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("loaded layout from {}", path.display());
    IconLayout::from_json(&json)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> std::result::Result<Opts, clap::Error> {
        Opts::try_parse_from(std::iter::once("kanban-favicon").chain(args.iter().copied()))
    }

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("kanban-favicon-cli-{}-{name}", std::process::id()))
    }

    #[test]
    fn no_arguments_reproduce_the_shipped_favicon() {
        let opts = parse(&[]).unwrap();
        assert_eq!(opts.layout, LayoutPreset::TwoColumn);
        assert_eq!(opts.sizes, vec![16, 32, 48]);
        assert_eq!(opts.output, PathBuf::from("src/app/favicon.ico"));
        assert!(opts.layout_file.is_none());
        assert!(!opts.smooth && !opts.native && !opts.dump_layout);
    }

    #[test]
    fn sizes_outside_ico_range_are_rejected() {
        assert!(parse(&["--sizes", "0"]).is_err());
        assert!(parse(&["--sizes", "16,257"]).is_err());
        assert_eq!(parse(&["-s", "48,16"]).unwrap().sizes, vec![48, 16]);
    }

    #[test]
    fn colors_and_presets_parse() {
        let opts = parse(&["-l", "three-column", "--background", "#112233", "--card", "#ffffff80"])
            .unwrap();
        assert_eq!(opts.layout, LayoutPreset::ThreeColumn);
        assert_eq!(opts.background, Some(Color::opaque(0x11, 0x22, 0x33)));
        assert_eq!(opts.card, Some(Color::new(255, 255, 255, 0x80)));
        assert!(parse(&["--card", "white"]).is_err());
    }

    #[test]
    fn confirmation_line_lists_written_sizes() {
        let frames = IconRenderer::new()
            .render_set(&DEFAULT_SIZES, &IconLayout::default())
            .unwrap();
        assert_eq!(
            confirmation_line(Path::new("src/app/favicon.ico"), &frames),
            "✓ Favicon saved to src/app/favicon.ico  (16x16, 32x32, 48x48)"
        );
    }

    #[test]
    fn run_writes_the_icon() {
        let path = scratch_path("favicon.ico");
        let mut opts = parse(&[]).unwrap();
        opts.output = path.clone();

        assert_eq!(report(run(&opts)), ExitCode::SUCCESS);
        let sizes = kanban_favicon::read_frame_sizes(&path).unwrap();
        assert_eq!(sizes.len(), 3);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn dump_layout_writes_nothing() {
        let path = scratch_path("dump.ico");
        let mut opts = parse(&["--dump-layout"]).unwrap();
        opts.output = path.clone();

        assert!(run(&opts).is_ok());
        assert!(!path.exists());
    }

    #[test]
    fn unwritable_output_fails_with_exit_status_one() {
        let path = scratch_path("missing-dir").join("favicon.ico");
        let mut opts = parse(&[]).unwrap();
        opts.output = path.clone();

        let result = run(&opts);
        assert!(matches!(result, Err(FaviconError::Io { path: ref p, .. }) if *p == path));
        assert_eq!(report(result), ExitCode::FAILURE);
        assert_eq!(report(Ok(())), ExitCode::SUCCESS);
    }

    #[test]
    fn invalid_layout_file_is_reported() {
        let path = scratch_path("bad-layout.json");
        std::fs::write(&path, r#"{ "cards": [ { "bounds": { "x1": 0, "y1": 0, "x2": 40, "y2": 4 } } ] }"#)
            .unwrap();
        let err = load_layout(&path).unwrap_err();
        assert!(matches!(err, FaviconError::InvalidLayout(_)));
        std::fs::remove_file(&path).unwrap();
    }
}
