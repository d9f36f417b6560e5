// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use clap::{Args, Parser, Subcommand};

use crate::segmentation::SegmentationType;

/// CLI arguments parser.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(after_help = r#"Render Options:
    --image, -i <IMAGE>        Frame to draw on
    --scene, -s <SCENE>        Scene description (JSON)
    --output, -o <OUTPUT>      Output file [default: runs/render/<image name>]
    --segmentation <STYLE>     Segmentation style (none, black, win-style) [default: none]
    --font <FONT>              TrueType font for labels [default: downloaded Arial.ttf]
    --show                     Display the result and report clicked persons
    --verbose                  Show verbose output

Examples:
    tracking-overlay render --image frame.png --scene scene.json
    tracking-overlay render -i frame.jpg -s scene.json --segmentation black -o out.png
    tracking-overlay render -i frame.png -s scene.json --show"#)]
pub struct Cli {
    #[command(subcommand)]
    /// Subcommand to execute.
    pub command: Commands,
}

/// Commands for the CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Draw a scene's tracking overlays onto a frame
    Render(RenderArgs),
}

/// Arguments for the render command.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Frame to draw on
    #[arg(short, long)]
    pub image: String,

    /// Scene description (JSON)
    #[arg(short, long)]
    pub scene: String,

    /// Output file
    #[arg(short, long)]
    pub output: Option<String>,

    /// Segmentation style (none, black, win-style)
    #[arg(long, default_value = "none")]
    pub segmentation: SegmentationType,

    /// TrueType font for labels
    #[arg(long)]
    pub font: Option<String>,

    /// Display the result and report clicked persons
    #[arg(long, default_value_t = false)]
    pub show: bool,

    /// Show verbose output
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_render_args_defaults() {
        let args = Cli::parse_from(["app", "render", "--image", "f.png", "--scene", "s.json"]);
        match args.command {
            Commands::Render(render_args) => {
                assert_eq!(render_args.image, "f.png");
                assert_eq!(render_args.scene, "s.json");
                assert_eq!(render_args.segmentation, SegmentationType::None);
                assert!(render_args.output.is_none());
                assert!(render_args.font.is_none());
                assert!(!render_args.show);
                assert!(render_args.verbose);
            }
        }
    }

    #[test]
    fn test_render_args_custom() {
        let args = Cli::parse_from([
            "app",
            "render",
            "-i",
            "frame.jpg",
            "-s",
            "scene.json",
            "-o",
            "out.png",
            "--segmentation",
            "win-style",
            "--verbose",
            "false",
        ]);
        match args.command {
            Commands::Render(render_args) => {
                assert_eq!(render_args.output, Some("out.png".to_string()));
                assert_eq!(render_args.segmentation, SegmentationType::WinStyle);
                assert!(!render_args.verbose);
            }
        }
    }

    #[test]
    fn test_render_args_reject_unknown_segmentation() {
        let result = Cli::try_parse_from([
            "app",
            "render",
            "-i",
            "f.png",
            "-s",
            "s.json",
            "--segmentation",
            "sepia",
        ]);
        assert!(result.is_err());
    }
}
