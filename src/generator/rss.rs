//! rss feed generation.
//!
//! Builds an RSS 2.0 channel with one item per post, in registry order.

use super::write_artifact;
use crate::{
    config::SiteConfig,
    registry::{PostRecord, Registry, parse_date},
};
use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use regex::Regex;
use rss::{ChannelBuilder, GuidBuilder, ItemBuilder, validation::Validate};
use std::sync::LazyLock;

// ============================================================================
// Public API
// ============================================================================

/// Build rss feed if enabled in config.
pub fn build_rss(config: &SiteConfig, registry: &Registry, today: &str) -> Result<()> {
    if config.build.rss.enable {
        let xml = RssFeed::new(config, registry, today).into_xml()?;
        write_artifact("rss", &config.rss_path(), &xml)?;
    }
    Ok(())
}

// ============================================================================
// RssFeed Implementation
// ============================================================================

/// rss feed builder
pub struct RssFeed<'a> {
    config: &'a SiteConfig,
    registry: &'a Registry,
    today: &'a str,
}

impl<'a> RssFeed<'a> {
    pub fn new(config: &'a SiteConfig, registry: &'a Registry, today: &'a str) -> Self {
        Self {
            config,
            registry,
            today,
        }
    }

    /// Generate rss xml string
    pub fn into_xml(self) -> Result<String> {
        let base_url = self.config.base.base_url();
        let items: Vec<_> = self
            .registry
            .iter()
            .map(|post| post_to_rss_item(post, base_url, self.config))
            .collect::<Result<Vec<_>>>()?;

        let last_build_date = parse_date(self.today)
            .map(to_rfc2822)
            .ok_or_else(|| anyhow!("build date `{}` is not a valid YYYY-MM-DD date", self.today))?;

        let channel = ChannelBuilder::default()
            .title(&self.config.base.title)
            .link(base_url)
            .description(&self.config.base.description)
            .language(Some(self.config.base.language.clone()))
            .generator(Some("inkpost".to_string()))
            .last_build_date(Some(last_build_date))
            .items(items)
            .build();

        channel
            .validate()
            .map_err(|e| anyhow!("rss validation failed: {e}"))?;
        Ok(channel.to_string())
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Convert a post to an rss item.
fn post_to_rss_item(post: &PostRecord, base_url: &str, config: &SiteConfig) -> Result<rss::Item> {
    let pub_date = post
        .published()
        .map(to_rfc2822)
        .ok_or_else(|| anyhow!("post `{}` has invalid date `{}`", post.path, post.date))?;
    let link = format!("{base_url}{}", post.path);
    let author = normalize_rss_author(post.author.as_ref(), config);

    Ok(ItemBuilder::default()
        .title(Some(post.title.clone()))
        .link(Some(link.clone()))
        .guid(Some(GuidBuilder::default().permalink(true).value(link).build()))
        .description(post.summary.clone())
        .pub_date(Some(pub_date))
        .author(author)
        .build())
}

/// Midnight UTC of `date` in RFC 2822 form.
fn to_rfc2822(date: NaiveDate) -> String {
    date.and_time(chrono::NaiveTime::MIN).and_utc().to_rfc2822()
}

/// Normalize author field to rss format: "email@example.com (Name)"
///
/// Priority:
/// 1. Post author if already in valid format
/// 2. Site config author if in valid format
/// 3. Combine site config email and author
fn normalize_rss_author(author: Option<&String>, config: &SiteConfig) -> Option<String> {
    static RE_VALID_AUTHOR: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}[ \t]*\([^)]+\)$").unwrap()
    });

    let author = author?;

    if RE_VALID_AUTHOR.is_match(author) {
        return Some(author.clone());
    }

    let site_author = &config.base.author;
    if RE_VALID_AUTHOR.is_match(site_author) {
        return Some(site_author.clone());
    }

    Some(format!("{} ({})", config.base.email, site_author))
}
