//! Site building.
//!
//! ```text
//! build(target)
//!     │
//!     ├── pages/ must exist
//!     │
//!     ├── assets/ ──► target/assets/ (replaced wholesale)
//!     │
//!     └── pages/**/* ──► Renderer ──► target/<output dir>/index.html
//! ```
//!
//! Pages are rendered one at a time in lexical order. The first failing page
//! aborts the build; pages written before it stay on disk.

use crate::{
    log,
    render::{RenderError, Renderer, context::ASSETS_DIR},
    utils::{
        fs::{collect_all_files, copy_dir_all},
        path::PagePaths,
    },
};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Pages directory name, relative to the site root.
pub const PAGES_DIR: &str = "pages";

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("no `pages` directory found in site directory")]
    MissingPagesDirectory,

    #[error(transparent)]
    Renderer(#[from] RenderError),

    #[error("failed to render `{path}`")]
    Page {
        path: PathBuf,
        #[source]
        source: RenderError,
    },

    #[error("failed to walk pages directory")]
    Walk(#[from] walkdir::Error),

    #[error("IO error at `{0}`")]
    Io(PathBuf, #[source] io::Error),
}

/// Renders every page of a site directory into a target directory.
pub struct Builder<'a> {
    source: PathBuf,
    renderer: &'a Renderer,
}

impl<'a> Builder<'a> {
    pub fn new(source: impl Into<PathBuf>, renderer: &'a Renderer) -> Self {
        Self {
            source: source.into(),
            renderer,
        }
    }

    /// Build the site into `target`, returning the number of pages written.
    pub fn build(&self, target: &Path) -> Result<usize, BuildError> {
        log!("build"; "{} -> {}", self.source.display(), target.display());

        let pages = self.source.join(PAGES_DIR);
        if !pages.is_dir() {
            return Err(BuildError::MissingPagesDirectory);
        }

        fs::create_dir_all(target).map_err(|err| BuildError::Io(target.to_path_buf(), err))?;
        self.copy_assets(target)?;

        let files = collect_all_files(&pages)?;
        for file in &files {
            self.build_page(&pages, file, target)?;
        }

        log!("build"; "done, {} pages", files.len());
        Ok(files.len())
    }

    /// Replace `target/assets` with a fresh copy of the site's assets.
    /// A site without assets has nothing to copy.
    fn copy_assets(&self, target: &Path) -> Result<(), BuildError> {
        let source = self.source.join(ASSETS_DIR);
        if !source.is_dir() {
            return Ok(());
        }

        let dest = target.join(ASSETS_DIR);
        if dest.exists() {
            fs::remove_dir_all(&dest).map_err(|err| BuildError::Io(dest.clone(), err))?;
        }

        let copied = copy_dir_all(&source, &dest).map_err(|err| BuildError::Io(source, err))?;
        log!("assets"; "copied {copied} files");
        Ok(())
    }

    fn build_page(&self, pages: &Path, file: &Path, target: &Path) -> Result<(), BuildError> {
        let relative = file.strip_prefix(pages).unwrap_or(file);
        let paths = PagePaths::from_relative(relative);

        let html = self
            .renderer
            .render(file, &paths.uri)
            .map_err(|source| BuildError::Page {
                path: relative.to_path_buf(),
                source,
            })?;

        let output = paths.html_file(target);
        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent).map_err(|err| BuildError::Io(parent.to_path_buf(), err))?;
        }
        fs::write(&output, html).map_err(|err| BuildError::Io(output.clone(), err))?;

        log!("render"; "{} -> {}", relative.display(), paths.uri);
        Ok(())
    }
}

/// Load the renderer for `source` and build into `target`.
pub fn build_site(source: &Path, target: &Path) -> Result<usize, BuildError> {
    let renderer = Renderer::new(source)?;
    Builder::new(source, &renderer).build(target)
}
