// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! `tracking-overlay` command-line entry point.

use clap::Parser;
use tracking_overlay::cli::args::{Cli, Commands};
use tracking_overlay::cli::render::run_render;

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render(args) => run_render(args),
    }
}
