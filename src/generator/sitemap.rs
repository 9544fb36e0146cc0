//! Sitemap generation.
//!
//! Generates a sitemap.xml file listing the home page and every post for
//! search engine indexing.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//! <url><loc>https://example.com</loc><lastmod>2024-06-01</lastmod></url>
//! <url><loc>https://example.com/blog/a</loc><lastmod>2024-01-02</lastmod></url>
//! </urlset>
//! ```

use super::{escape_xml, write_artifact};
use crate::{config::SiteConfig, registry::Registry};
use anyhow::Result;
use std::fmt::Write;

// ============================================================================
// Constants
// ============================================================================

/// XML namespace for sitemap
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

// ============================================================================
// Public API
// ============================================================================

/// Build sitemap if enabled in config.
pub fn build_sitemap(config: &SiteConfig, registry: &Registry, today: &str) -> Result<()> {
    if config.build.sitemap.enable {
        let sitemap = Sitemap::from_registry(config.base.base_url(), registry, today);
        write_artifact("sitemap", &config.sitemap_path(), &sitemap.into_xml())?;
    }
    Ok(())
}

// ============================================================================
// Sitemap Implementation
// ============================================================================

/// Sitemap data structure
pub struct Sitemap<'a> {
    /// URL entries, home page first
    urls: Vec<UrlEntry<'a>>,
}

/// Single URL entry in the sitemap
struct UrlEntry<'a> {
    /// Full URL location
    loc: String,
    /// Last modification date, emitted as given
    lastmod: &'a str,
}

impl<'a> Sitemap<'a> {
    /// One entry for the site root stamped with `today`, then one per post in
    /// registry order stamped with its publish date.
    pub fn from_registry(base_url: &str, registry: &'a Registry, today: &'a str) -> Self {
        let home = UrlEntry {
            loc: base_url.to_owned(),
            lastmod: today,
        };

        let posts = registry.iter().map(|post| UrlEntry {
            loc: format!("{base_url}{}", post.path),
            lastmod: &post.date,
        });

        Self {
            urls: std::iter::once(home).chain(posts).collect(),
        }
    }

    /// Generate sitemap XML string.
    pub fn into_xml(self) -> String {
        let mut xml = String::with_capacity(128 + self.urls.len() * 96);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        // Writing into a String cannot fail
        let _ = writeln!(xml, r#"<urlset xmlns="{SITEMAP_NS}">"#);

        for entry in self.urls {
            let _ = writeln!(
                xml,
                "<url><loc>{}</loc><lastmod>{}</lastmod></url>",
                escape_xml(&entry.loc),
                entry.lastmod
            );
        }

        xml.push_str("</urlset>\n");
        xml
    }
}

// ============================================================================
// Tests
// ============================================================================
