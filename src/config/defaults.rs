//! Default values for tool settings.
//!
//! Used by `educe` derived `Default` impls and by clap default values.

// ============================================================================
// Site Layout
// ============================================================================

pub mod site {
    use std::path::PathBuf;

    pub fn root() -> PathBuf {
        ".".into()
    }

    /// Build output, relative to the site directory.
    pub fn output() -> PathBuf {
        "public".into()
    }
}

// ============================================================================
// Serve Defaults
// ============================================================================

pub mod serve {
    pub fn interface() -> String {
        "127.0.0.1".into()
    }

    pub fn port() -> u16 {
        8080
    }

    /// Page extensions tried for a request path, in priority order.
    pub fn extensions() -> Vec<String> {
        crate::render::PAGE_EXTENSIONS
            .iter()
            .map(|ext| (*ext).to_owned())
            .collect()
    }
}
