//! Bundle chunk classification.
//!
//! Maps a bundler module identifier to the name of the output chunk it is
//! grouped into, so framework code and application code land in separately
//! cacheable bundles.
//!
//! # Rule Table
//!
//! | Priority | Matches (substring)                                                    | Chunk          |
//! |----------|------------------------------------------------------------------------|----------------|
//! | 1        | `react-router`, `@remix-run/router`                                    | `router`       |
//! | 2        | `react-dom`, `/react/`, `scheduler`                                    | `react-vendor` |
//! | 3        | `react-markdown`, `remark`, `rehype`, `micromark`, `mdast`, `hast`, `unified` | `markdown` |
//! | 4        | `highlight.js`, `prismjs`, `shiki`                                     | `highlight`    |
//! | 5        | `node_modules`                                                         | `vendor`       |
//! | 6        | everything else                                                        | `app`          |
//!
//! Needles are plain substrings of the identifier, so pre-bundled ids such as
//! `/node_modules/.vite/deps/react-dom.js` and bare ids such as `react-dom`
//! classify like the package they name. Rules are tried top to bottom and the
//! first match wins, so `react-router` must sit above the generic react rule.

use std::{
    borrow::Cow,
    fmt,
    io::{self, BufRead, Write},
};

/// Chunk for identifiers no other rule claims.
pub const FALLBACK_CHUNK: &str = "app";

/// Predicate over a normalized module identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// Identifier contains any of the needles.
    ContainsAny(&'static [&'static str]),
    /// Matches every identifier.
    Always,
}

impl Matcher {
    #[inline]
    pub fn matches(&self, module_id: &str) -> bool {
        match self {
            Self::ContainsAny(needles) => needles.iter().any(|n| module_id.contains(n)),
            Self::Always => true,
        }
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContainsAny(needles) => f.write_str(&needles.join(" | ")),
            Self::Always => f.write_str("*"),
        }
    }
}

/// A `(predicate, chunk name)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkRule {
    pub matcher: Matcher,
    pub name: &'static str,
}

impl ChunkRule {
    pub const fn new(matcher: Matcher, name: &'static str) -> Self {
        Self { matcher, name }
    }
}

/// The bundler's chunk table, in priority order.
pub const RULES: &[ChunkRule] = &[
    ChunkRule::new(
        Matcher::ContainsAny(&["react-router", "@remix-run/router"]),
        "router",
    ),
    ChunkRule::new(
        Matcher::ContainsAny(&["react-dom", "/react/", "scheduler"]),
        "react-vendor",
    ),
    ChunkRule::new(
        Matcher::ContainsAny(&[
            "react-markdown",
            "remark",
            "rehype",
            "micromark",
            "mdast",
            "hast",
            "unified",
        ]),
        "markdown",
    ),
    ChunkRule::new(
        Matcher::ContainsAny(&["highlight.js", "prismjs", "shiki"]),
        "highlight",
    ),
    ChunkRule::new(Matcher::ContainsAny(&["node_modules"]), "vendor"),
    ChunkRule::new(Matcher::Always, FALLBACK_CHUNK),
];

// The last rule must match everything so classification is total.
const _: () = {
    assert!(!RULES.is_empty());
    assert!(matches!(RULES[RULES.len() - 1].matcher, Matcher::Always));
};

/// Classify a module identifier with the bundler's chunk table.
///
/// # Example
/// ```ignore
/// assert_eq!(classify("node_modules/react-dom/index.js"), "react-vendor");
/// assert_eq!(classify("src/pages/Home.tsx"), "app");
/// ```
pub fn classify(module_id: &str) -> &'static str {
    classify_with(RULES, module_id)
}

/// Classify against an arbitrary rule table.
///
/// Returns [`FALLBACK_CHUNK`] if no rule matches.
pub fn classify_with(rules: &[ChunkRule], module_id: &str) -> &'static str {
    let module_id = normalize_module_id(module_id);
    rules
        .iter()
        .find(|rule| rule.matcher.matches(&module_id))
        .map_or(FALLBACK_CHUNK, |rule| rule.name)
}

/// Write `<id>\t<chunk>` for every non-blank line of `reader`.
///
/// Lines are trimmed before classification and echoed trimmed.
pub fn classify_lines(reader: impl BufRead, mut writer: impl Write) -> io::Result<()> {
    for line in reader.lines() {
        let line = line?;
        let id = line.trim();
        if !id.is_empty() {
            writeln!(writer, "{id}\t{}", classify(id))?;
        }
    }
    writer.flush()
}

/// Write the chunk table as `<priority>\t<chunk>\t<matcher>` lines.
pub fn write_rules(mut writer: impl Write) -> io::Result<()> {
    for (priority, rule) in RULES.iter().enumerate() {
        writeln!(writer, "{}\t{}\t{}", priority + 1, rule.name, rule.matcher)?;
    }
    writer.flush()
}

/// Unify separators and anchor relative ids with a leading `/`.
///
/// `react/index.js` and `C:\app\node_modules\react\index.js` both gain the
/// `/react/` segment the react rule looks for.
fn normalize_module_id(module_id: &str) -> Cow<'_, str> {
    let needs_slashes = module_id.contains('\\');
    let needs_anchor = !module_id.starts_with(['/', '\\']);

    if !needs_slashes && !needs_anchor {
        return Cow::Borrowed(module_id);
    }

    let mut normalized = String::with_capacity(module_id.len() + 1);
    if needs_anchor {
        normalized.push('/');
    }
    normalized.extend(module_id.chars().map(|c| if c == '\\' { '/' } else { c }));
    Cow::Owned(normalized)
}
