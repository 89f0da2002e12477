//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// SVG thumbnail renderer CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: svgthumb.toml)
    #[arg(short = 'C', long, global = true, default_value = "svgthumb.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Print debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Render thumbnail markup for an SVG, rewriting it when needed
    #[command(visible_alias = "r")]
    Render {
        #[command(flatten)]
        args: RenderArgs,
    },
}

/// Render command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct RenderArgs {
    /// Source SVG (or SVGZ) file
    #[arg(value_name = "SVG", value_hint = clap::ValueHint::FilePath)]
    pub svg: PathBuf,

    /// Requested thumbnail width
    #[arg(long)]
    pub width: u32,

    /// Requested thumbnail height
    #[arg(long)]
    pub height: u32,

    /// Intrinsic width of the source
    #[arg(long)]
    pub source_width: u32,

    /// Intrinsic height of the source
    #[arg(long)]
    pub source_height: u32,

    /// Public URL of the source SVG (default: the file path)
    #[arg(long)]
    pub url: Option<String>,

    /// Raster fallback URL (default: the SVG URL)
    #[arg(long)]
    pub raster_url: Option<String>,

    /// Link target baked into the thumbnail
    #[arg(short, long)]
    pub link: Option<String>,

    /// Link title
    #[arg(short, long)]
    pub title: Option<String>,

    /// Link to the file itself when no --link is given
    #[arg(long)]
    pub file_link: bool,

    /// Image alt text
    #[arg(long, default_value = "")]
    pub alt: String,

    /// CSS class of the image
    #[arg(long)]
    pub class: Option<String>,

    /// Vertical alignment of the image
    #[arg(long)]
    pub valign: Option<String>,

    /// Reuse a cached rewrite while it is newer than the source
    #[arg(long)]
    pub later: bool,
}
