//! `[meta]` section configuration.
//!
//! Site-wide defaults for per-page SEO meta tags.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[meta]` section in inkpost.toml.
///
/// # Example
/// ```toml
/// [meta]
/// image = "https://example.com/og.png"
/// keywords = ["rust", "blog"]
/// twitter_creator = "@alice"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct MetaConfig {
    /// Default social preview image URL.
    #[serde(default)]
    pub image: String,

    /// Default keywords, used when a post has none.
    #[serde(default)]
    pub keywords: Vec<String>,

    /// `og:type` of the home page.
    #[serde(default = "defaults::meta::r#type")]
    #[educe(Default = defaults::meta::r#type())]
    pub r#type: String,

    /// `og:type` of post pages.
    #[serde(default = "defaults::meta::post_type")]
    #[educe(Default = defaults::meta::post_type())]
    pub post_type: String,

    /// `og:site_name`; falls back to `[base].title`.
    #[serde(default)]
    pub site_name: Option<String>,

    /// `twitter:creator` handle, omitted from output when unset.
    #[serde(default)]
    pub twitter_creator: Option<String>,
}
