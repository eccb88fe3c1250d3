//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use crate::config::{ServeConfig, defaults};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("site directory `{0}` does not exist")]
    MissingSiteDirectory(PathBuf),
}

/// Quire static site generator CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Render every page of the site into the output directory
    Build {
        /// Site directory containing `site.yaml`, `layout.html` and `pages/`
        #[arg(default_value_os_t = defaults::site::root())]
        site: PathBuf,

        /// Output directory (default: `<SITE>/public`)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Serve the site, rendering pages on each request
    Serve {
        /// Site directory containing `site.yaml`, `layout.html` and `pages/`
        #[arg(default_value_os_t = defaults::site::root())]
        site: PathBuf,

        /// Interface to bind on
        #[arg(short, long)]
        interface: Option<String>,

        /// The port you should provide
        #[arg(short, long)]
        port: Option<u16>,

        /// Page extensions tried for a request path, in priority order
        #[arg(long, value_delimiter = ',')]
        extensions: Option<Vec<String>>,
    },
}

impl Commands {
    /// Site directory argument, with `~` expanded.
    pub fn site_dir(&self) -> Result<PathBuf, CliError> {
        let (Self::Build { site, .. } | Self::Serve { site, .. }) = self;
        let dir = expand(site);
        if !dir.is_dir() {
            return Err(CliError::MissingSiteDirectory(dir));
        }
        Ok(dir)
    }
}

/// Resolve the build output directory for `site`.
pub fn output_dir(site: &Path, output: Option<&Path>) -> PathBuf {
    output.map_or_else(|| site.join(defaults::site::output()), expand)
}

/// Overlay serve flags on top of the defaults.
pub fn serve_config(
    interface: Option<&str>,
    port: Option<u16>,
    extensions: Option<&[String]>,
) -> ServeConfig {
    let mut config = ServeConfig::default();
    if let Some(interface) = interface {
        config.interface = interface.to_owned();
    }
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(extensions) = extensions {
        config.extensions = extensions
            .iter()
            .map(|ext| ext.trim().trim_start_matches('.').to_owned())
            .filter(|ext| !ext.is_empty())
            .collect();
    }
    config
}

fn expand(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(&raw).as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_build_defaults() {
        let cli = Cli::parse_from(["quire", "build"]);
        let Commands::Build { site, output } = cli.command else {
            panic!("expected build");
        };
        assert_eq!(site, PathBuf::from("."));
        assert_eq!(output, None);
        assert_eq!(output_dir(&site, None), PathBuf::from("./public"));
    }

    #[test]
    fn test_build_output_flag() {
        let cli = Cli::parse_from(["quire", "build", "site", "-o", "out"]);
        let Commands::Build { site, output } = cli.command else {
            panic!("expected build");
        };
        assert_eq!(site, PathBuf::from("site"));
        assert_eq!(output_dir(&site, output.as_deref()), PathBuf::from("out"));
    }

    #[test]
    fn test_serve_flags() {
        let cli = Cli::parse_from([
            "quire", "serve", "site", "-i", "0.0.0.0", "-p", "9000", "--extensions", "md,.html",
        ]);
        let Commands::Serve { interface, port, extensions, .. } = cli.command else {
            panic!("expected serve");
        };

        let config = serve_config(interface.as_deref(), port, extensions.as_deref());
        assert_eq!(config.address(), "0.0.0.0:9000");
        assert_eq!(config.extensions, ["md", "html"]);
    }

    #[test]
    fn test_serve_defaults() {
        let config = serve_config(None, None, None);
        assert_eq!(config.address(), "127.0.0.1:8080");
        assert_eq!(config.extensions, ["html", "markdown", "md"]);
    }

    #[test]
    fn test_missing_site_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        let command = Commands::Build {
            site: missing.clone(),
            output: None,
        };

        assert!(matches!(
            command.site_dir(),
            Err(CliError::MissingSiteDirectory(path)) if path == missing
        ));
    }

    #[test]
    fn test_existing_site_directory() {
        let dir = TempDir::new().unwrap();
        let command = Commands::Serve {
            site: dir.path().to_path_buf(),
            interface: None,
            port: None,
            extensions: None,
        };
        assert_eq!(command.site_dir().unwrap(), dir.path());
    }
}
