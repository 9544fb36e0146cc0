//! inkpost - post-build sitemap, rss, bundle chunk and meta tag generation
//! for a personal blog.

mod build;
mod chunk;
mod cli;
mod config;
mod generator;
mod logger;
mod meta;
mod registry;

use anyhow::{Result, bail};
use build::{build_artifacts, load_registry, meta_fragment};
use clap::Parser;
use cli::{Cli, Commands};
use config::SiteConfig;
use std::io::{self, Write};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Build { build_args } => {
            let config = load_config(&cli)?;
            let registry = load_registry(&config)?;
            let today = registry::resolve_today(build_args.today.as_deref())?;
            build_artifacts(&config, &registry, &today)
        }
        Commands::Chunk { ids, rules } => {
            let stdout = io::stdout().lock();
            if *rules {
                chunk::write_rules(stdout)?;
            } else if ids.is_empty() {
                chunk::classify_lines(io::stdin().lock(), stdout)?;
            } else {
                classify_ids(ids, stdout)?;
            }
            Ok(())
        }
        Commands::Meta { route } => {
            let config = load_config(&cli)?;
            println!("{}", meta_fragment(&config, route.as_deref())?);
            Ok(())
        }
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &Cli) -> Result<SiteConfig> {
    debug_assert!(cli.needs_config());
    let root = cli.root.as_deref().unwrap_or(std::path::Path::new("./"));
    let config_path = root.join(&cli.config);

    if !config_path.exists() {
        bail!("Config file not found: {}", config_path.display());
    }

    let mut config = SiteConfig::from_path(&config_path)?;
    config.update_with_cli(cli);
    config.validate()?;

    Ok(config)
}

/// Print `<id>\t<chunk>` for each id given on the command line.
fn classify_ids(ids: &[String], mut writer: impl Write) -> io::Result<()> {
    for id in ids {
        writeln!(writer, "{id}\t{}", chunk::classify(id))?;
    }
    writer.flush()
}
