//! Post registry: the ordered list of published posts.
//!
//! The registry is read from a TOML file of `[[posts]]` tables and is never
//! mutated afterwards. Every generator walks it in insertion order.
//!
//! ```toml
//! [[posts]]
//! path = "/blog/hello"
//! date = "2024-01-02"
//! title = "Hello"
//! summary = "First post"
//! ```

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use thiserror::Error;

/// Calendar date format used by post records and `--today`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Registry validation errors
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("IO error when reading `{0}`")]
    Io(std::path::PathBuf, #[source] std::io::Error),

    #[error("Post registry parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("post path `{0}` must start with `/`")]
    RelativePath(String),

    #[error("post `{path}` has invalid date `{date}`, expected YYYY-MM-DD")]
    InvalidDate { path: String, date: String },

    #[error("post path `{0}` is listed more than once")]
    DuplicatePath(String),
}

/// One published article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PostRecord {
    /// Route, unique within the registry, starting with `/`.
    pub path: String,
    /// Publish date (`YYYY-MM-DD`), emitted verbatim as sitemap `lastmod`.
    pub date: String,
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    /// Either a plain name or `email (Name)`.
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Social preview image URL.
    #[serde(default)]
    pub image: Option<String>,
}

impl PostRecord {
    /// Publish date as a calendar date.
    pub fn published(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }
}

/// Ordered, read-only sequence of posts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Registry {
    #[serde(default)]
    posts: Vec<PostRecord>,
}

impl Registry {
    #[cfg(test)]
    pub fn new(posts: Vec<PostRecord>) -> Self {
        Self { posts }
    }

    /// Parse a registry from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let registry: Registry = toml::from_str(content).map_err(RegistryError::from)?;
        Ok(registry)
    }

    /// Load a registry from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| RegistryError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Check every record before anything is written.
    ///
    /// Fails on the first record with a relative path, an unparseable date,
    /// or a path already seen earlier in the registry.
    pub fn validate(&self) -> Result<(), RegistryError> {
        let mut seen = FxHashSet::default();

        for post in &self.posts {
            if !post.path.starts_with('/') {
                return Err(RegistryError::RelativePath(post.path.clone()));
            }
            if post.published().is_none() {
                return Err(RegistryError::InvalidDate {
                    path: post.path.clone(),
                    date: post.date.clone(),
                });
            }
            if !seen.insert(post.path.as_str()) {
                return Err(RegistryError::DuplicatePath(post.path.clone()));
            }
        }

        Ok(())
    }

    /// Look up a post by route.
    pub fn find(&self, path: &str) -> Option<&PostRecord> {
        self.posts.iter().find(|post| post.path == path)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PostRecord> {
        self.posts.iter()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a PostRecord;
    type IntoIter = std::slice::Iter<'a, PostRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.posts.iter()
    }
}

/// Parse a strict `YYYY-MM-DD` date.
///
/// chrono tolerates blank padding, unpadded fields and signed years; the value
/// is emitted verbatim, so only four digits, `-`, two digits, `-`, two digits
/// are accepted before handing it to chrono for calendar validation.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    if !is_ymd_shape(s.as_bytes()) {
        return None;
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

/// `DDDD-DD-DD` where every `D` is an ASCII digit.
#[inline]
fn is_ymd_shape(bytes: &[u8]) -> bool {
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Resolve the build date: the override if given, else today in UTC.
pub fn resolve_today(today: Option<&str>) -> Result<String> {
    match today {
        Some(date) => {
            anyhow::ensure!(
                parse_date(date).is_some(),
                "--today `{date}` is not a valid YYYY-MM-DD date"
            );
            Ok(date.to_owned())
        }
        None => Ok(Utc::now().date_naive().format(DATE_FORMAT).to_string()),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn post(path: &str, date: &str) -> PostRecord {
        PostRecord {
            path: path.to_string(),
            date: date.to_string(),
            title: format!("Title of {path}"),
            ..Default::default()
        }
    }

    #[test]
    fn test_from_str_preserves_order() {
        let registry = Registry::from_str(
            r#"
            [[posts]]
            path = "/blog/b"
            date = "2024-03-01"
            title = "B"

            [[posts]]
            path = "/blog/a"
            date = "2024-01-02"
            title = "A"
            summary = "first"
            keywords = ["rust"]
            "#,
        )
        .unwrap();

        let paths: Vec<_> = registry.iter().map(|p| p.path.as_str()).collect();
        assert_eq!(paths, ["/blog/b", "/blog/a"]);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.find("/blog/a").unwrap().summary.as_deref(), Some("first"));
        assert!(registry.find("/blog/c").is_none());
    }

    #[test]
    fn test_from_str_empty() {
        let registry = Registry::from_str("").unwrap();
        assert!(registry.is_empty());
        assert!(registry.validate().is_ok());
    }

    #[test]
    fn test_from_str_rejects_unknown_field() {
        let result = Registry::from_str(
            r#"
            [[posts]]
            path = "/a"
            date = "2024-01-01"
            title = "A"
            draft = true
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_relative_path() {
        let registry = Registry::new(vec![post("blog/a", "2024-01-02")]);
        assert!(matches!(
            registry.validate(),
            Err(RegistryError::RelativePath(p)) if p == "blog/a"
        ));
    }

    #[test]
    fn test_validate_invalid_dates() {
        for date in [
            "2024-02-30",
            "2024-13-01",
            "2024-1-2",
            "yesterday",
            "",
            "2024-01- 2",
            " 2024-1-02",
            "2024- 1-02",
            "+024-01-02",
            "2024/01/02",
            "2024-01-02 ",
        ] {
            let registry = Registry::new(vec![post("/a", date)]);
            assert!(
                matches!(registry.validate(), Err(RegistryError::InvalidDate { .. })),
                "{date} should be rejected"
            );
        }
    }

    #[test]
    fn test_validate_duplicate_path() {
        let registry = Registry::new(vec![
            post("/a", "2024-01-01"),
            post("/b", "2024-01-02"),
            post("/a", "2024-01-03"),
        ]);
        let err = registry.validate().unwrap_err();
        assert!(matches!(err, RegistryError::DuplicatePath(ref p) if p == "/a"));
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_parse_date_requires_ymd_shape() {
        assert_eq!(parse_date("2024-01-02"), NaiveDate::from_ymd_opt(2024, 1, 2));
        assert_eq!(parse_date("0024-01-02"), NaiveDate::from_ymd_opt(24, 1, 2));
        assert!(parse_date("+024-01-02").is_none());
        assert!(parse_date("2024-01- 2").is_none());
        assert!(parse_date("2024-0a-02").is_none());
        assert!(parse_date("２０２４-01-02").is_none());
    }

    #[test]
    fn test_parse_date_leap_year() {
        assert!(parse_date("2024-02-29").is_some());
        assert!(parse_date("2023-02-29").is_none());
    }

    #[test]
    fn test_resolve_today() {
        assert_eq!(resolve_today(Some("2024-06-01")).unwrap(), "2024-06-01");
        assert!(resolve_today(Some("06/01/2024")).is_err());
        assert!(resolve_today(Some("2024-06- 1")).is_err());

        let today = resolve_today(None).unwrap();
        assert!(parse_date(&today).is_some());
    }
}
