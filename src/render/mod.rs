//! Page rendering shared by `build` and `serve`.
//!
//! # Pipeline
//!
//! ```text
//! render(file, uri)
//!     │
//!     ├── PageContext { site, page (no content), data }
//!     │
//!     ├── dispatch on extension
//!     │       ├── .md / .markdown ──► markdown → HTML (no template pass)
//!     │       └── .html ────────────► template pass with the context
//!     │
//!     └── layout.html ──► template pass with page.content = page HTML
//! ```
//!
//! Site layout consumed here:
//!
//! ```text
//! site/
//! ├── site.yaml      # or site.yml
//! ├── layout.html    # required
//! └── templates/     # optional, include-able templates
//! ```

pub mod context;
pub mod loader;
pub mod markdown;

use crate::config::{ConfigError, SiteConfig};
use crate::utils::path::page_title;
use context::PageContext;
use loader::MarkdownLoader;
use minijinja::{AutoEscape, Environment, Output, State, Value, value::ValueKind};
use std::{
    fmt::Write,
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Layout file name, relative to the site root.
pub const LAYOUT_FILE: &str = "layout.html";

/// Include-able templates directory, relative to the site root.
pub const TEMPLATES_DIR: &str = "templates";

/// Page file extensions understood by the renderer.
pub const PAGE_EXTENSIONS: &[&str] = &["html", "markdown", "md"];

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("no `layout.html` found in site directory")]
    MissingLayoutTemplate,

    #[error("unrecognized template `{0}`")]
    UnrecognizedTemplate(String),

    #[error("template error")]
    Template(#[from] minijinja::Error),

    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] io::Error),
}

impl RenderError {
    /// Whether the error means "nothing to render here" rather than a failure.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::UnrecognizedTemplate(_) => true,
            Self::Io(_, err) => err.kind() == io::ErrorKind::NotFound,
            Self::Template(err) => err.kind() == minijinja::ErrorKind::TemplateNotFound,
            _ => false,
        }
    }
}

/// Renders page files into complete HTML documents.
///
/// Built once per build or serve session and read-only afterwards, so one
/// instance can be shared by concurrent request handlers.
pub struct Renderer {
    config: SiteConfig,
    env: Environment<'static>,
}

impl Renderer {
    /// Load `site.yaml`, `layout.html` and the optional templates directory
    /// of a site.
    pub fn new(source: &Path) -> Result<Self, RenderError> {
        let config = SiteConfig::from_root(source)?;

        let layout_path = source.join(LAYOUT_FILE);
        let layout = fs::read_to_string(&layout_path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => RenderError::MissingLayoutTemplate,
            _ => RenderError::Io(layout_path, err),
        })?;

        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_keep_trailing_newline(true);
        env.set_formatter(format_value);

        let templates = source.join(TEMPLATES_DIR);
        if templates.is_dir() {
            loader::attach(&mut env, MarkdownLoader::new(templates));
        }

        env.add_template_owned(LAYOUT_FILE, layout)?;

        Ok(Self { config, env })
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Render a page file served at `uri` and wrap it in the layout.
    pub fn render(&self, file: &Path, uri: &str) -> Result<String, RenderError> {
        let file_name = file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let ext = file
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let stem = file
            .file_stem()
            .map(|s| s.to_string_lossy())
            .unwrap_or_default();

        let context = PageContext::new(&self.config, page_title(&stem, uri), uri);

        let content = match ext.as_str() {
            "markdown" | "md" => markdown::to_html(&self.read(file)?),
            "html" => self.env.render_str(&self.read(file)?, &context)?,
            _ => return Err(RenderError::UnrecognizedTemplate(file_name)),
        };

        let layout = self.env.get_template(LAYOUT_FILE)?;
        Ok(layout.render(context.with_content(content))?)
    }

    fn read(&self, file: &Path) -> Result<String, RenderError> {
        fs::read_to_string(file).map_err(|err| RenderError::Io(file.to_path_buf(), err))
    }
}

/// Print booleans as `true`/`false`; everything else as the engine does.
fn format_value(
    out: &mut Output<'_>,
    state: &State<'_, '_>,
    value: &Value,
) -> Result<(), minijinja::Error> {
    if value.kind() == ValueKind::Bool {
        write!(out, "{}", value.is_true())?;
        return Ok(());
    }
    minijinja::escape_formatter(out, state, value)
}
