//! Quire - A static site generator for YAML configured, template driven sites.

mod build;
mod cli;
mod config;
mod logger;
mod render;
mod serve;
mod utils;

use anyhow::{Context, Result};
use build::build_site;
use clap::Parser;
use cli::{Cli, Commands, output_dir, serve_config};
use serve::serve_site;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let site = cli.command.site_dir()?;

    match &cli.command {
        Commands::Build { output, .. } => {
            let target = output_dir(&site, output.as_deref());
            build_site(&site, &target)
                .with_context(|| format!("failed to build `{}`", site.display()))?;
        }
        Commands::Serve {
            interface,
            port,
            extensions,
            ..
        } => {
            let config = serve_config(interface.as_deref(), *port, extensions.as_deref());
            serve_site(&site, config)
                .with_context(|| format!("failed to serve `{}`", site.display()))?;
        }
    }

    Ok(())
}
