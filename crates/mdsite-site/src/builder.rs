//! Static site builder.

use std::fs;
use std::path::{Path, PathBuf};

use mdsite_renderer::{RenderError, render_document};
use rayon::prelude::*;

use crate::copy::copy_dir_recursive;
use crate::scanner::{PageRef, Scanner};
use crate::template::Template;

/// Configuration for static site building.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory of Markdown documents.
    pub content_dir: PathBuf,
    /// Directory copied verbatim into the output.
    pub static_dir: PathBuf,
    /// Page template path.
    pub template: PathBuf,
    /// Directory the site is generated into.
    pub output_dir: PathBuf,
    /// Remove the output directory before building.
    pub clean: bool,
    /// Worker threads for page generation; `None` uses the global rayon pool.
    pub jobs: Option<usize>,
}

/// Error returned by the static site builder.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Content directory not found: {}", .0.display())]
    ContentNotFound(PathBuf),
    #[error("Template not found: {}", .0.display())]
    TemplateNotFound(PathBuf),
    #[error("Failed to render {}: {source}", .path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: RenderError,
    },
    #[error("Failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl BuildError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Summary of a finished build.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Number of static files copied.
    pub static_files: usize,
    /// Generated page paths, in source path order.
    pub pages: Vec<PathBuf>,
}

/// Builds a static site from a content directory, a static directory and a template.
pub struct SiteBuilder {
    config: BuildConfig,
}

impl SiteBuilder {
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    /// Run the build.
    ///
    /// Steps: check the content directory, clean the output directory, copy
    /// static files, load the template, then generate every page in
    /// parallel. Any failing page fails the whole build.
    pub fn build(&self) -> Result<BuildReport, BuildError> {
        let config = &self.config;

        if !config.content_dir.is_dir() {
            return Err(BuildError::ContentNotFound(config.content_dir.clone()));
        }

        if config.clean && config.output_dir.exists() {
            tracing::info!(path = %config.output_dir.display(), "Removing output directory");
            fs::remove_dir_all(&config.output_dir)
                .map_err(|e| BuildError::io(&config.output_dir, e))?;
        }
        fs::create_dir_all(&config.output_dir)
            .map_err(|e| BuildError::io(&config.output_dir, e))?;

        let static_files = if config.static_dir.is_dir() {
            let copied = copy_dir_recursive(&config.static_dir, &config.output_dir)?;
            tracing::info!(files = copied, "Copied static files");
            copied
        } else {
            tracing::warn!(path = %config.static_dir.display(), "Static directory not found, skipping");
            0
        };

        let template = Template::load(&config.template)?;

        let pages = Scanner::new(config.content_dir.clone(), config.output_dir.clone()).scan()?;

        let pages = match config.jobs {
            Some(jobs) => rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build()?
                .install(|| generate_all(&pages, &template))?,
            None => generate_all(&pages, &template)?,
        };
        tracing::info!(pages = pages.len(), "Generated pages");

        Ok(BuildReport {
            static_files,
            pages,
        })
    }
}

fn generate_all(pages: &[PageRef], template: &Template) -> Result<Vec<PathBuf>, BuildError> {
    pages
        .par_iter()
        .map(|page| {
            generate_page(&page.source, template, &page.dest)?;
            Ok(page.dest.clone())
        })
        .collect()
}

/// Render one Markdown file through the template and write it to `dest`.
///
/// Parent directories of `dest` are created as needed.
pub fn generate_page(source: &Path, template: &Template, dest: &Path) -> Result<(), BuildError> {
    tracing::debug!(from = %source.display(), to = %dest.display(), "Generating page");

    let markdown = fs::read_to_string(source).map_err(|e| BuildError::io(source, e))?;
    let document = render_document(&markdown).map_err(|source_err| BuildError::Render {
        path: source.to_path_buf(),
        source: source_err,
    })?;
    let page = template.render(&document.title, &document.html);

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|e| BuildError::io(parent, e))?;
    }
    fs::write(dest, page).map_err(|e| BuildError::io(dest, e))
}
