//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while locating or loading `site.yaml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no `site.yaml` or `site.yml` found in site directory")]
    MissingSiteConfig,

    #[error("site config has no `title`")]
    MissingTitle,

    #[error("unable to convert site data: {0}")]
    Conversion(String),

    #[error("site config parsing error")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_config_error_display() {
        let io_err = ConfigError::Io(
            PathBuf::from("site.yaml"),
            Error::new(ErrorKind::PermissionDenied, "denied"),
        );
        let display = format!("{io_err}");
        assert!(display.contains("IO error"));
        assert!(display.contains("site.yaml"));

        let display = format!("{}", ConfigError::Conversion("unable to convert null".into()));
        assert!(display.contains("unable to convert null"));
    }
}
