//! Render command implementation.
//!
//! Drives one render against the local filesystem: the source is read from
//! disk, rewrites land in `storage.thumb_dir`, markup goes to stdout.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::RenderArgs;
use svgthumb::cache::get_mtime;
use svgthumb::config::ThumbConfig;
use svgthumb::log;
use svgthumb::render::{
    self, LinkOptions, PlanState, RenderContext, RenderEnv, RenderOutcome, RenderParams, SourceFile,
};
use svgthumb::source::FsSourceReader;
use svgthumb::storage::{FsStorage, StoragePublisher, ThumbPaths};

/// Run `svgthumb render` and print the markup.
pub fn run_render(args: &RenderArgs, config: &ThumbConfig) -> Result<()> {
    let outcome = render_markup(args, config)?;

    match (&outcome.state, &outcome.skipped) {
        (PlanState::SkipRewrite, Some(reason)) => {
            log!("error"; "rewrite skipped, serving original: {reason}")
        }
        (PlanState::Rewritten, _) => log!("render"; "{}", outcome.svg_url),
        _ => {}
    }

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", outcome.html)?;
    Ok(())
}

fn render_markup(args: &RenderArgs, config: &ThumbConfig) -> Result<RenderOutcome> {
    let storage = FsStorage::new(&config.storage.thumb_dir, &config.storage.thumb_url);
    let reader = FsSourceReader::new(config.storage.max_decompressed_bytes());

    let mut render_config = config.render.clone();
    render_config.later |= args.later;

    let source = source_file(args, &storage)?;
    let params = RenderParams {
        width: args.width,
        height: args.height,
        alt: args.alt.clone(),
        css_class: args.class.clone(),
        valign: args.valign.clone(),
    };
    let link = LinkOptions {
        custom_url: args.link.clone(),
        file_link: args.file_link,
        title: args.title.clone(),
        ..Default::default()
    };

    let env = RenderEnv {
        reader: &reader,
        storage: &storage,
        config: &render_config,
    };
    let outcome = render::render(&mut RenderContext::new(), &env, &source, &params, &link)
        .with_context(|| format!("failed to render `{}`", args.svg.display()))?;
    Ok(outcome)
}

/// Describe the SVG on disk. Rewrites go to `{thumb_dir}/{file name}/`.
fn source_file(args: &RenderArgs, storage: &FsStorage) -> Result<SourceFile> {
    let name = file_name(&args.svg)
        .with_context(|| format!("`{}` has no file name", args.svg.display()))?;
    let svg_url = args
        .url
        .clone()
        .unwrap_or_else(|| args.svg.display().to_string());

    let base_path = storage.root.join(&name);
    let base_url = storage.resolve_url(&base_path);

    Ok(SourceFile {
        raster_url: args.raster_url.clone().unwrap_or_else(|| svg_url.clone()),
        file_url: svg_url.clone(),
        desc_url: svg_url.clone(),
        svg_url,
        width: args.source_width,
        height: args.source_height,
        svg_path: args.svg.clone(),
        thumbs: ThumbPaths::new(base_path, base_url),
        modified: get_mtime(&args.svg),
        name,
    })
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().into_owned())
}
