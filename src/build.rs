//! Site building orchestration.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── prepare_output()     clean / create the output directory
//!     │
//!     ├── DataLoader::load()   four documents, fail-fast
//!     │
//!     └── rayon ───┬── *.html ──► bootstrap ─► settle ─► render ─► minify ─► write
//!                  └── other  ──► copy as-is
//! ```
//!
//! A failed load still writes every page (showing the error panel) before the
//! build reports the failure.

use crate::{
    config::SiteConfig,
    data::{DataLoader, LoadError, PageData},
    interact::theme::Theme,
    lifecycle, log,
    render::RenderOptions,
};
use anyhow::{Context, Result, anyhow};
use rayon::prelude::*;
use std::{
    borrow::Cow,
    fs,
    path::{Path, PathBuf},
    sync::atomic::{AtomicBool, Ordering},
};
use walkdir::WalkDir;

/// Load the data and render every template into the output directory.
pub async fn build_site(config: &SiteConfig) -> Result<()> {
    prepare_output(&config.build.output, config.build.clean)?;

    let loader = DataLoader::from_config(config)?;
    log!("data"; "loading from {}", loader.location());
    let loaded = loader.load().await;
    if let Err(err) = &loaded {
        log!("error"; "{}", err.user_message());
    }

    let mut options = RenderOptions::from_config(config);
    options.theme = Theme::load(&config.theme_state_path(), config.site.theme);
    options.controls = false;

    let files = collect_files(&config.build.templates);
    log!("build"; "rendering {} files", files.len());
    render_all(&files, loaded.as_ref(), &options, config)?;

    match loaded {
        Ok(_) => {
            log!("build"; "done");
            Ok(())
        }
        Err(err) => Err(anyhow::Error::new(err).context("Build wrote error pages only")),
    }
}

/// Render templates and copy other files in parallel; the first failure is reported.
fn render_all(
    files: &[PathBuf],
    data: Result<&PageData, &LoadError>,
    options: &RenderOptions,
    config: &SiteConfig,
) -> Result<()> {
    let has_error = AtomicBool::new(false);
    files.par_iter().try_for_each(|path| {
        if has_error.load(Ordering::Relaxed) {
            return Err(anyhow!("Aborted"));
        }
        let result = if is_template(path) {
            render_template(path, data, options, config)
        } else {
            copy_asset(path, config)
        };
        if let Err(e) = result {
            if !has_error.swap(true, Ordering::Relaxed) {
                log!("error"; "{}: {:#}", path.display(), e);
            }
            return Err(anyhow!("Build failed"));
        }
        Ok(())
    })
}

fn render_template(
    path: &Path,
    data: Result<&PageData, &LoadError>,
    options: &RenderOptions,
    config: &SiteConfig,
) -> Result<()> {
    let template = fs::read_to_string(path)
        .with_context(|| format!("Failed to read template {}", path.display()))?;
    let mut page = lifecycle::bootstrap(&template, data, options)?;
    page.settle();
    let html = page.render()?;
    let html = minify(html.as_bytes(), config.build.minify);

    let dest = output_path(path, config)?;
    write_file(&dest, &html)
}

fn copy_asset(path: &Path, config: &SiteConfig) -> Result<()> {
    let dest = output_path(path, config)?;
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(path, &dest)
        .with_context(|| format!("Failed to copy {} to {}", path.display(), dest.display()))?;
    Ok(())
}

fn output_path(path: &Path, config: &SiteConfig) -> Result<PathBuf> {
    let relative = path
        .strip_prefix(&config.build.templates)
        .with_context(|| format!("{} is outside the templates directory", path.display()))?;
    Ok(config.build.output.join(relative))
}

fn write_file(dest: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(dest, content).with_context(|| format!("Failed to write {}", dest.display()))
}

fn is_template(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "html" || ext == "htm")
}

/// Every visible file under `dir`, in a stable order.
fn collect_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'))
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .collect()
}

/// Create the output directory, removing everything in it first when `clean`.
fn prepare_output(output: &Path, clean: bool) -> Result<()> {
    if clean && output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("Failed to clear output directory: {}", output.display()))?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))
}

/// Minify HTML with `minify_html` when enabled.
fn minify(html: &[u8], enabled: bool) -> Cow<'_, [u8]> {
    if !enabled {
        return Cow::Borrowed(html);
    }
    let mut cfg = minify_html::Cfg::new();
    cfg.keep_closing_tags = true;
    cfg.keep_html_and_head_opening_tags = true;
    cfg.keep_comments = false;
    cfg.minify_css = true;
    cfg.minify_js = true;
    cfg.remove_bangs = true;
    cfg.remove_processing_instructions = true;
    Cow::Owned(minify_html::minify(html, &cfg))
}
