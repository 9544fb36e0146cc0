//! SEO meta tags for a page `<head>`.
//!
//! [`MetaTags::build`] renders a fixed sequence of tags, one per line:
//!
//! ```html
//! <title>…</title>
//! <meta name="description" content="…">
//! <meta name="keywords" content="…">
//! <meta property="og:title" content="…">
//! <meta property="og:description" content="…">
//! <meta property="og:image" content="…">
//! <meta property="og:url" content="…">
//! <meta property="og:type" content="…">
//! <meta property="og:site_name" content="…">
//! <meta name="twitter:card" content="summary_large_image">
//! <meta name="twitter:creator" content="…">   (only when set)
//! ```

use crate::{config::SiteConfig, registry::PostRecord};

/// Meta tag values for one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetaTags {
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub image: String,
    pub url: String,
    /// `og:type`, e.g. `website` or `article`
    pub r#type: String,
    pub site_name: String,
    pub twitter_creator: Option<String>,
}

impl MetaTags {
    /// Tags for the site root.
    pub fn for_home(config: &SiteConfig) -> Self {
        Self {
            title: config.base.title.clone(),
            description: config.base.description.clone(),
            keywords: config.meta.keywords.join(", "),
            image: config.meta.image.clone(),
            url: config.base.base_url().to_owned(),
            r#type: config.meta.r#type.clone(),
            site_name: config.site_name().to_owned(),
            twitter_creator: config.meta.twitter_creator.clone(),
        }
    }

    /// Tags for a post page.
    ///
    /// Keywords and image fall back to the `[meta]` defaults when the post
    /// has none.
    pub fn for_post(post: &PostRecord, config: &SiteConfig) -> Self {
        let keywords = if post.keywords.is_empty() {
            &config.meta.keywords
        } else {
            &post.keywords
        };

        Self {
            title: post.title.clone(),
            description: post.summary.clone().unwrap_or_default(),
            keywords: keywords.join(", "),
            image: post.image.clone().unwrap_or_else(|| config.meta.image.clone()),
            url: format!("{}{}", config.base.base_url(), post.path),
            r#type: config.meta.post_type.clone(),
            site_name: config.site_name().to_owned(),
            twitter_creator: config.meta.twitter_creator.clone(),
        }
    }

    /// Render the tags as an HTML fragment.
    ///
    /// Tags are formatted directly rather than through an XML writer: this is
    /// HTML, and [`escape`] emits `&#39;` where an XML writer would emit `&apos;`.
    pub fn build(&self) -> String {
        let title = escape(Some(&self.title));
        let description = escape(Some(&self.description));

        let mut tags = vec![
            format!("<title>{title}</title>"),
            named("description", &description),
            named("keywords", &escape(Some(&self.keywords))),
            property("og:title", &title),
            property("og:description", &description),
            property("og:image", &escape(Some(&self.image))),
            property("og:url", &escape(Some(&self.url))),
            property("og:type", &escape(Some(&self.r#type))),
            property("og:site_name", &escape(Some(&self.site_name))),
            named("twitter:card", "summary_large_image"),
        ];

        if let Some(creator) = &self.twitter_creator {
            tags.push(named("twitter:creator", &escape(Some(creator))));
        }

        tags.join("\n")
    }
}

/// Escape HTML-sensitive characters; `None` becomes an empty string.
///
/// `&` is replaced first so entities produced by later replacements are not
/// escaped twice.
pub fn escape(value: Option<&str>) -> String {
    let Some(value) = value else {
        return String::new();
    };

    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// `<meta name=… content=…>` with an already escaped content value.
fn named(name: &str, content: &str) -> String {
    format!(r#"<meta name="{name}" content="{content}">"#)
}

/// `<meta property=… content=…>` with an already escaped content value.
fn property(property: &str, content: &str) -> String {
    format!(r#"<meta property="{property}" content="{content}">"#)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::tests::post;

    fn decode(s: &str) -> String {
        s.replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&amp;", "&")
    }

    fn site_config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.base.title = "Blog".into();
        config.base.description = "Notes on Rust".into();
        config.base.url = Some("https://example.com/".into());
        config.meta.image = "https://example.com/og.png".into();
        config.meta.keywords = vec!["rust".into(), "blog".into()];
        config
    }

    #[test]
    fn test_escape_none_is_empty() {
        assert_eq!(escape(None), "");
    }

    #[test]
    fn test_escape_all_sensitive_chars() {
        assert_eq!(
            escape(Some(r#"<a href="x">Tom & 'Jerry'</a>"#)),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_does_not_double_escape() {
        assert_eq!(escape(Some("<")), "&lt;");
        assert_eq!(escape(Some("&lt;")), "&amp;lt;");
    }

    #[test]
    fn test_escape_plain_text_unchanged() {
        for s in ["", "hello world", "Rust 2024 ünïcödé 🦀", "a/b?c=d"] {
            assert_eq!(escape(Some(s)), s);
            assert_eq!(escape(Some(&escape(Some(s)))), s);
        }
    }

    #[test]
    fn test_escape_decodes_back() {
        for s in ["A & B", "<script>alert('x')</script>", "\"&amp;\"", "&&<<>>"] {
            let escaped = escape(Some(s));
            assert!(!escaped.contains(['<', '>', '"', '\'']));
            assert_eq!(decode(&escaped), s);
        }
    }

    #[test]
    fn test_build_escapes_title() {
        let tags = MetaTags {
            title: "A & B".into(),
            ..Default::default()
        };
        let html = tags.build();

        assert!(html.starts_with("<title>A &amp; B</title>"));
        assert!(html.contains(r#"<meta property="og:title" content="A &amp; B">"#));
    }

    #[test]
    fn test_build_fixed_order() {
        let tags = MetaTags {
            twitter_creator: Some("@alice".into()),
            ..Default::default()
        };
        let html = tags.build();

        let kinds: Vec<_> = html
            .lines()
            .map(|line| line.split('"').nth(1).unwrap_or("title"))
            .collect();
        assert_eq!(
            kinds,
            [
                "title",
                "description",
                "keywords",
                "og:title",
                "og:description",
                "og:image",
                "og:url",
                "og:type",
                "og:site_name",
                "twitter:card",
                "twitter:creator",
            ]
        );
    }

    #[test]
    fn test_build_omits_twitter_creator_when_unset() {
        let html = MetaTags::default().build();
        assert!(!html.contains("twitter:creator"));
        assert_eq!(html.lines().count(), 10);
    }

    #[test]
    fn test_build_escapes_every_field() {
        let tags = MetaTags {
            title: "<t>".into(),
            description: "<d>".into(),
            keywords: "<k>".into(),
            image: "<i>".into(),
            url: "<u>".into(),
            r#type: "<y>".into(),
            site_name: "<s>".into(),
            twitter_creator: Some("<c>".into()),
        };
        let html = tags.build();

        for field in ["t", "d", "k", "i", "u", "y", "s", "c"] {
            assert!(html.contains(&format!("&lt;{field}&gt;")));
            assert!(!html.contains(&format!("<{field}>")));
        }
    }

    #[test]
    fn test_for_home() {
        let config = site_config();
        let tags = MetaTags::for_home(&config);

        assert_eq!(tags.title, "Blog");
        assert_eq!(tags.url, "https://example.com");
        assert_eq!(tags.keywords, "rust, blog");
        assert_eq!(tags.r#type, "website");
        assert_eq!(tags.site_name, "Blog");
        assert_eq!(tags.twitter_creator, None);
    }

    #[test]
    fn test_for_post_uses_post_fields() {
        let mut config = site_config();
        config.meta.twitter_creator = Some("@alice".into());
        let mut record = post("/blog/a", "2024-01-02");
        record.summary = Some("First".into());
        record.keywords = vec!["serde".into()];
        record.image = Some("https://example.com/a.png".into());

        let tags = MetaTags::for_post(&record, &config);
        assert_eq!(tags.title, "Title of /blog/a");
        assert_eq!(tags.description, "First");
        assert_eq!(tags.keywords, "serde");
        assert_eq!(tags.image, "https://example.com/a.png");
        assert_eq!(tags.url, "https://example.com/blog/a");
        assert_eq!(tags.r#type, "article");
        assert_eq!(tags.twitter_creator.as_deref(), Some("@alice"));
    }

    #[test]
    fn test_for_post_falls_back_to_site_defaults() {
        let config = site_config();
        let tags = MetaTags::for_post(&post("/blog/a", "2024-01-02"), &config);

        assert_eq!(tags.description, "");
        assert_eq!(tags.keywords, "rust, blog");
        assert_eq!(tags.image, "https://example.com/og.png");
    }
}
