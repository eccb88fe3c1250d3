//! Include resolution for the template engine.
//!
//! Templates referenced by name (`{% include "nav.md" %}`) are looked up under
//! the site's `templates/` directory. Markdown templates are converted to HTML
//! first, so the engine only ever sees HTML plus template syntax.

use super::markdown;
use crate::utils::path::is_contained;
use minijinja::{Environment, ErrorKind};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Errors raised while resolving a template by name.
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("template `{0}` does not exist")]
    TemplateNotFound(String),

    #[error("IO error when reading template `{0}`")]
    Io(PathBuf, #[source] io::Error),
}

/// Resolves a template name to the source handed to the template engine.
pub trait TemplateResolver: Send + Sync {
    fn resolve(&self, name: &str) -> Result<String, LoaderError>;
}

/// Filesystem resolver that passes markdown templates through the markdown
/// converter.
#[derive(Debug, Clone)]
pub struct MarkdownLoader {
    root: PathBuf,
}

impl MarkdownLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl TemplateResolver for MarkdownLoader {
    fn resolve(&self, name: &str) -> Result<String, LoaderError> {
        let not_found = || LoaderError::TemplateNotFound(name.to_owned());

        if !is_contained(Path::new(name)) {
            return Err(not_found());
        }
        let path = self.root.join(name);
        if !path.is_file() {
            return Err(not_found());
        }

        let content = fs::read_to_string(&path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => not_found(),
            _ => LoaderError::Io(path.clone(), err),
        })?;

        let is_markdown = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(markdown::is_markdown);

        Ok(if is_markdown {
            markdown::to_html(&content)
        } else {
            content
        })
    }
}

/// Route the engine's "load template by name" calls through `resolver`.
///
/// A missing template is reported back as "not found" so the engine raises
/// its own `TemplateNotFound` error at render time.
pub fn attach<R>(env: &mut Environment<'static>, resolver: R)
where
    R: TemplateResolver + 'static,
{
    env.set_loader(move |name| match resolver.resolve(name) {
        Ok(source) => Ok(Some(source)),
        Err(LoaderError::TemplateNotFound(_)) => Ok(None),
        Err(err) => Err(minijinja::Error::new(
            ErrorKind::InvalidOperation,
            "failed to load template",
        )
        .with_source(err)),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn loader_with(files: &[(&str, &str)]) -> (TempDir, MarkdownLoader) {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            let path = dir.path().join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        let loader = MarkdownLoader::new(dir.path());
        (dir, loader)
    }

    #[test]
    fn test_resolve_markdown() {
        let (_dir, loader) = loader_with(&[("test.md", "This is a **test**.")]);
        assert_eq!(
            loader.resolve("test.md").unwrap(),
            "<p>This is a <strong>test</strong>.</p>\n"
        );
    }

    #[test]
    fn test_resolve_markdown_long_extension() {
        let (_dir, loader) = loader_with(&[("test.markdown", "This is a ~~dumb~~ test.")]);
        assert_eq!(
            loader.resolve("test.markdown").unwrap(),
            "<p>This is a <del>dumb</del> test.</p>\n"
        );
    }

    #[test]
    fn test_resolve_regular_is_unmodified() {
        let (_dir, loader) = loader_with(&[("test.html", "This is a test <a href=>link</a>.")]);
        assert_eq!(
            loader.resolve("test.html").unwrap(),
            "This is a test <a href=>link</a>."
        );
    }

    #[test]
    fn test_resolve_subdirectory() {
        let (_dir, loader) = loader_with(&[("one/two/three/test.md", "This is _another_ test.")]);
        assert_eq!(
            loader.resolve("one/two/three/test.md").unwrap(),
            "<p>This is <em>another</em> test.</p>\n"
        );
    }

    #[test]
    fn test_resolve_missing() {
        let (_dir, loader) = loader_with(&[]);
        let err = loader.resolve("test.md").unwrap_err();
        assert!(matches!(err, LoaderError::TemplateNotFound(ref name) if name == "test.md"));
        assert_eq!(err.to_string(), "template `test.md` does not exist");
    }

    #[test]
    fn test_resolve_rejects_escaping_names() {
        let (dir, loader) = loader_with(&[("inner/ok.html", "ok")]);
        fs::write(dir.path().join("secret.html"), "secret").unwrap();
        let nested = MarkdownLoader::new(dir.path().join("inner"));

        assert!(matches!(
            nested.resolve("../secret.html"),
            Err(LoaderError::TemplateNotFound(_))
        ));
        assert_eq!(loader.resolve("inner/ok.html").unwrap(), "ok");
    }

    #[test]
    fn test_attached_loader_renders_include() {
        let (_dir, loader) = loader_with(&[("nav.md", "*home*")]);
        let mut env = Environment::new();
        attach(&mut env, loader);

        let html = env
            .render_str("<nav>{% include \"nav.md\" %}</nav>", ())
            .unwrap();
        // a fresh environment strips the single trailing newline of a template
        assert_eq!(html, "<nav><p><em>home</em></p></nav>");
    }

    #[test]
    fn test_attached_loader_missing_include() {
        let (_dir, loader) = loader_with(&[]);
        let mut env = Environment::new();
        attach(&mut env, loader);

        let err = env.render_str("{% include \"nope.html\" %}", ()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TemplateNotFound);
    }
}
