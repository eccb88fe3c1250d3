//! Page path resolution.
//!
//! Maps a page source (relative to `pages/`) to its output directory and URI,
//! and derives the `../` prefix that lets a page link back to the site root
//! with relative paths only.

use std::path::{Component, Path, PathBuf};

/// Base name that maps a page onto its containing directory.
const INDEX_STEM: &str = "index";

/// Computed output location for a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagePaths {
    /// Output directory relative to the output root (empty for the site root).
    pub output_dir: PathBuf,

    /// URI the page is served at, without trailing slash.
    pub uri: String,
}

impl PagePaths {
    /// Resolve paths for a page source given relative to the pages root.
    ///
    /// | Source              | `output_dir` | `uri`        |
    /// |---------------------|--------------|--------------|
    /// | `index.html`        | ``           | `/`          |
    /// | `about.md`          | `about`      | `/about`     |
    /// | `sub/page.html`     | `sub/page`   | `/sub/page`  |
    /// | `sub/index.html`    | `sub`        | `/sub`       |
    pub fn from_relative(relative: &Path) -> Self {
        let parent = relative.parent().unwrap_or(Path::new(""));
        let output_dir = match relative.file_stem() {
            Some(stem) if stem.to_string_lossy() != INDEX_STEM => parent.join(stem),
            _ => parent.to_path_buf(),
        };
        let uri = uri_for(&output_dir);

        Self { output_dir, uri }
    }

    /// `index.html` inside the output directory under `output_root`.
    pub fn html_file(&self, output_root: &Path) -> PathBuf {
        output_root.join(&self.output_dir).join("index.html")
    }
}

/// `/` followed by the `/`-joined components of `dir`.
fn uri_for(dir: &Path) -> String {
    let segments: Vec<_> = dir
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy()),
            _ => None,
        })
        .collect();
    format!("/{}", segments.join("/"))
}

/// Root-relative prefix for a URI.
///
/// `./` for the root URI, otherwise one `../` per `/` in the URI.
pub fn root_prefix(uri: &str) -> String {
    if uri == "/" {
        return "./".to_owned();
    }
    "../".repeat(uri.matches('/').count())
}

/// Default page title.
///
/// The file stem when it is not `index`; otherwise the last URI segment,
/// or `Index` at the site root.
pub fn page_title(stem: &str, uri: &str) -> String {
    if stem != INDEX_STEM {
        return titleize(stem);
    }
    match uri.trim_end_matches('/').rsplit('/').next() {
        Some(segment) if !segment.is_empty() => titleize(segment),
        _ => "Index".to_owned(),
    }
}

/// Replace underscores with spaces and capitalize each word. Words start
/// after whitespace or `-`.
///
/// `"what tHE_fudge"` → `"What The Fudge"`
pub fn titleize(text: &str) -> String {
    let mut title = String::with_capacity(text.len());
    let mut word_start = true;
    for c in text.chars() {
        let c = if c == '_' { ' ' } else { c };
        if c.is_alphanumeric() {
            if word_start {
                title.extend(c.to_uppercase());
            } else {
                title.extend(c.to_lowercase());
            }
            word_start = false;
        } else {
            title.push(c);
            word_start = c.is_whitespace() || c == '-';
        }
    }
    title
}

/// Whether a relative path stays inside its root (no `..`, no absolute parts).
pub fn is_contained(path: &Path) -> bool {
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
