//! Post-build artifact generators.
//!
//! Each generator is a pure `registry -> String` transform; [`write_artifact`]
//! is the only place that touches the filesystem.

pub mod rss;
pub mod sitemap;

use crate::log;
use anyhow::{Context, Result};
use std::{fs, path::Path};

/// Write a generated document, replacing any previous contents.
///
/// Missing parent directories are created. Any I/O failure is returned with
/// the target path attached.
pub fn write_artifact(module: &str, path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    fs::write(path, contents)
        .with_context(|| format!("Failed to write {module} to {}", path.display()))?;

    log!(module; "{}", path.file_name().unwrap_or_default().to_string_lossy());
    Ok(())
}

/// Escape special XML characters.
pub(crate) fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("hello"), "hello");
        assert_eq!(escape_xml("<test>"), "&lt;test&gt;");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml("it's \"x\""), "it&apos;s &quot;x&quot;");
    }

    #[test]
    fn test_write_artifact_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dist/feed/rss.xml");

        write_artifact("rss", &path, "<rss/>").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<rss/>");
    }

    #[test]
    fn test_write_artifact_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sitemap.xml");
        fs::write(&path, "old contents that are longer").unwrap();

        write_artifact("sitemap", &path, "new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_write_artifact_reports_path_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where a directory is expected
        let blocker = dir.path().join("dist");
        fs::write(&blocker, "").unwrap();

        let err = write_artifact("sitemap", &blocker.join("sitemap.xml"), "x").unwrap_err();
        assert!(format!("{err:#}").contains("dist"));
    }
}
