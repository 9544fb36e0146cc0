//! Site configuration management for `inkpost.toml`.
//!
//! # Sections
//!
//! | Section           | Purpose                                   |
//! |-------------------|-------------------------------------------|
//! | `[base]`          | Site metadata (title, author, url)        |
//! | `[build]`         | Output directory and post registry        |
//! | `[build.sitemap]` | Sitemap toggle and file name              |
//! | `[build.rss]`     | RSS feed toggle and file name             |
//! | `[meta]`          | Defaults for per-page SEO meta tags       |
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "My Blog"
//! description = "A personal blog"
//! url = "https://example.com"
//!
//! [build]
//! output = "dist"
//! posts = "posts.toml"
//!
//! [build.rss]
//! path = "rss.xml"
//!
//! [meta]
//! twitter_creator = "@alice"
//! ```

mod base;
mod build;
pub mod defaults;
mod error;
mod meta;

pub use error::ConfigError;

use base::BaseConfig;
use build::BuildConfig;
use meta::MetaConfig;

use crate::cli::Cli;
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing inkpost.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Basic site information
    #[serde(default)]
    pub base: BaseConfig,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Meta tag defaults
    #[serde(default)]
    pub meta: MetaConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let mut config = Self::from_str(&content)?;
        config.config_path = path.to_path_buf();
        Ok(config)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Absolute location of the generated sitemap.
    pub fn sitemap_path(&self) -> PathBuf {
        self.build.output.join(&self.build.sitemap.path)
    }

    /// Absolute location of the generated rss feed.
    pub fn rss_path(&self) -> PathBuf {
        self.build.output.join(&self.build.rss.path)
    }

    /// `og:site_name`, falling back to the site title.
    pub fn site_name(&self) -> &str {
        self.meta.site_name.as_deref().unwrap_or(&self.base.title)
    }

    /// Update configuration with CLI arguments.
    ///
    /// Paths in the config are resolved against the root directory.
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = cli
            .root
            .as_ref()
            .cloned()
            .unwrap_or_else(|| self.get_root().to_owned());
        self.set_root(&root);

        Self::update_option(&mut self.build.output, cli.output.as_ref());
        Self::update_option(&mut self.build.posts, cli.posts.as_ref());
        if let Some(url) = &cli.base_url {
            self.base.url = Some(url.clone());
        }

        if let Some(args) = cli.build_args() {
            Self::update_option(&mut self.build.rss.enable, args.rss.as_ref());
            Self::update_option(&mut self.build.sitemap.enable, args.sitemap.as_ref());
        }

        self.config_path = root.join(&cli.config);
        self.build.output = root.join(&self.build.output);
        self.build.posts = root.join(&self.build.posts);
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Validate configuration before running generators.
    pub fn validate(&self) -> Result<()> {
        let Some(url) = &self.base.url else {
            bail!(ConfigError::Validation(
                "[base.url] is required for sitemap, rss and meta generation".into()
            ));
        };

        if !(url.starts_with("http://") || url.starts_with("https://")) {
            bail!(ConfigError::Validation(
                "[base.url] must start with http:// or https://".into()
            ));
        }

        if self.build.sitemap.path.as_os_str().is_empty() {
            bail!(ConfigError::Validation(
                "[build.sitemap.path] must not be empty".into()
            ));
        }

        if self.build.rss.path.as_os_str().is_empty() {
            bail!(ConfigError::Validation(
                "[build.rss.path] must not be empty".into()
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
