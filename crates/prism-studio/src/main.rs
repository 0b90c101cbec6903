use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use clap::builder::RangedU64ValueParser;

use prism_engine::logging::{LoggingConfig, init_logging};
use prism_ui::{Application, AtlasSource};

/// Action raised by the default panel's button.
const SPAWN_ACTION: &str = "SpawnObject";

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let args = StudioArgs::parse();
    let atlas = match (&args.font, &args.atlas) {
        (_, Some(png)) => AtlasSource::Png(png.clone()),
        (Some(ttf), None) => AtlasSource::Font(
            std::fs::read(ttf).with_context(|| format!("reading font {}", ttf.display()))?,
        ),
        (None, None) => match load_system_font() {
            Some(bytes) => AtlasSource::Font(bytes),
            None => {
                log::warn!("no monospace system font found, glyphs will be placeholders");
                AtlasSource::Blank
            }
        },
    };

    let mut app = Application::new()
        .title("Prism Studio")
        .size(1280.0, 720.0)
        .atlas(atlas)
        .render_item("box")
        .on_action(SPAWN_ACTION, |ctx| {
            match ctx.scene.spawn_in_front_of_camera(0) {
                Some(i) => log::info!("'{}' spawned box #{i}", ctx.click.name),
                None => log::warn!("'{}' could not spawn a box", ctx.click.name),
            }
        });
    if let Some(frames) = args.frames {
        app = app.frames(frames);
    }
    app.run()
}

#[derive(Debug, Default, PartialEq, Parser)]
#[command(name = "prism-studio", about = "Editor overlay over a fenced frame ring")]
struct StudioArgs {
    /// TrueType/OpenType font rasterised into the glyph atlas
    #[arg(long, value_name = "TTF")]
    font: Option<PathBuf>,
    /// Pre-baked glyph grid image, used instead of a font
    #[arg(long, value_name = "PNG", conflicts_with = "font")]
    atlas: Option<PathBuf>,
    /// Frame resources in flight
    #[arg(long, value_name = "N", value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    frames: Option<usize>,
}

fn load_system_font() -> Option<Vec<u8>> {
    [
        "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
        "/usr/share/fonts/dejavu/DejaVuSansMono.ttf",
        "/usr/share/fonts/liberation/LiberationMono-Regular.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
        "/System/Library/Fonts/Menlo.ttc",
        "C:\\Windows\\Fonts\\consola.ttf",
    ]
    .iter()
    .find_map(|p| std::fs::read(p).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<StudioArgs, clap::Error> {
        StudioArgs::try_parse_from(std::iter::once("prism-studio").chain(args.iter().copied()))
    }

    #[test]
    fn no_args_is_default() {
        assert_eq!(parse(&[]).unwrap(), StudioArgs::default());
    }

    #[test]
    fn reads_all_flags() {
        let args = parse(&["--font", "a.ttf", "--frames", "2"]).unwrap();
        assert_eq!(args.font, Some(PathBuf::from("a.ttf")));
        assert_eq!(args.frames, Some(2));

        let args = parse(&["--atlas", "grid.png"]).unwrap();
        assert_eq!(args.atlas, Some(PathBuf::from("grid.png")));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse(&["--frames"]).is_err());
        assert!(parse(&["--frames", "zero"]).is_err());
        assert!(parse(&["--frames", "0"]).is_err());
        assert!(parse(&["--verbose"]).is_err());
        assert!(parse(&["--font", "a.ttf", "--atlas", "grid.png"]).is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        StudioArgs::command().debug_assert();
    }
}
