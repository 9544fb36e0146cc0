//! Post-build orchestration.
//!
//! ```text
//! build_artifacts()
//!     │
//!     ├── Registry::from_path() + validate()
//!     │
//!     ├── build_sitemap()  ──► <output>/sitemap.xml
//!     │
//!     └── build_rss()      ──► <output>/rss.xml
//! ```
//!
//! The registry is validated before anything is written, so a malformed post
//! never leaves a half-generated output directory behind.

use crate::{
    config::SiteConfig,
    generator::{rss::build_rss, sitemap::build_sitemap},
    log,
    meta::MetaTags,
    registry::Registry,
};
use anyhow::{Context, Result, anyhow};

/// Load the post registry named in config and validate it.
pub fn load_registry(config: &SiteConfig) -> Result<Registry> {
    let path = &config.build.posts;
    let registry = Registry::from_path(path)
        .with_context(|| format!("Failed to load post registry {}", path.display()))?;
    registry
        .validate()
        .with_context(|| format!("Invalid post registry {}", path.display()))?;
    Ok(registry)
}

/// Run every enabled generator against the registry, sequentially.
pub fn build_artifacts(config: &SiteConfig, registry: &Registry, today: &str) -> Result<()> {
    if registry.is_empty() {
        log!("build"; "post registry is empty, sitemap lists the home page only");
    } else {
        log!("build"; "{} posts, today is {today}", registry.len());
    }

    build_sitemap(config, registry, today)?;
    build_rss(config, registry, today)?;

    Ok(())
}

/// Render the `<head>` meta fragment for a route.
///
/// The home page (`None` or `/`) only needs config; the registry is read for
/// post routes alone.
pub fn meta_fragment(config: &SiteConfig, route: Option<&str>) -> Result<String> {
    let tags = match route {
        None | Some("/") => MetaTags::for_home(config),
        Some(route) => {
            let registry = load_registry(config)?;
            let post = registry
                .find(route)
                .ok_or_else(|| anyhow!("no post with route `{route}` in the registry"))?;
            MetaTags::for_post(post, config)
        }
    };
    Ok(tags.build())
}
