//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// inkpost post-build generator CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Output directory path (relative to project root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Post registry file (relative to project root)
    #[arg(short, long)]
    pub posts: Option<PathBuf>,

    /// Config file name (default: inkpost.toml)
    #[arg(short = 'C', long, default_value = "inkpost.toml")]
    pub config: PathBuf,

    /// Override base URL for the site.
    ///
    /// Useful for CI/CD deployments where the production URL differs from local development.
    #[arg(long = "base-url", global = true)]
    pub base_url: Option<String>,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments for the post-build generators
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// enable rss feed generation
    #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub rss: Option<bool>,

    /// enable sitemap generation
    #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub sitemap: Option<bool>,

    /// Date stamped on the home page entry (YYYY-MM-DD, default: today in UTC)
    #[arg(long)]
    pub today: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate sitemap and rss feed from the post registry
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Print the output chunk for each module identifier
    Chunk {
        /// Module identifiers; read from stdin (one per line) when omitted
        ids: Vec<String>,

        /// Print the rule table instead of classifying
        #[arg(long)]
        rules: bool,
    },

    /// Print the `<head>` meta tags for a route
    Meta {
        /// Post route such as `/blog/hello`; the home page when omitted
        route: Option<String>,
    },
}

impl Cli {
    /// Whether this command reads `inkpost.toml`.
    pub const fn needs_config(&self) -> bool {
        !matches!(self.command, Commands::Chunk { .. })
    }

    pub const fn build_args(&self) -> Option<&BuildArgs> {
        match &self.command {
            Commands::Build { build_args } => Some(build_args),
            _ => None,
        }
    }
}
