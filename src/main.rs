//! svgthumb - SVG thumbnail renderer.

mod cli;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use svgthumb::config::ThumbConfig;
use svgthumb::logger;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = ThumbConfig::load(&cli.config)
        .with_context(|| format!("failed to load `{}`", cli.config.display()))?;

    match &cli.command {
        Commands::Render { args } => cli::render::run_render(args, &config),
    }
}
