//! Page inventory extraction from a navigation file.
//!
//! The navigation file (`_navbar.md` in a typical docs site) is never parsed
//! as markdown. Pages are found by scanning the raw text for file-name-like
//! tokens, so anything that looks like `name.md` counts as a page.

use std::path::Path;
use std::sync::LazyLock;

use navmap_config::MatchMode;
use regex::Regex;

use crate::error::GenerateError;

/// Word characters, one character that is not a line terminator, then `md`.
///
/// `\w` is spelled out as an ASCII class so Unicode letters do not extend
/// a match, and only `md` is case-insensitive. The wildcard excludes `\r`,
/// U+2028 and U+2029 as well as `\n`.
static LOOSE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9A-Z_a-z]+[^\n\r\x{2028}\x{2029}](?i:md)").expect("invalid loose page regex")
});

/// Word characters followed by a literal `.md`.
static STRICT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9A-Z_a-z]+\.(?i:md)").expect("invalid strict page regex"));

/// Suffix removed from every match.
const MD_SUFFIX: &str = ".md";

/// Ordered list of page identifiers found in a navigation file.
///
/// The last identifier is always the empty string, standing for the site
/// root. Duplicates are kept in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInventory {
    ids: Vec<String>,
}

impl PageInventory {
    /// Scan navigation text for page identifiers.
    #[must_use]
    pub fn parse(text: &str, mode: MatchMode) -> Self {
        let pattern = match mode {
            MatchMode::Loose => &*LOOSE_PATTERN,
            MatchMode::Strict => &*STRICT_PATTERN,
        };

        let mut ids: Vec<String> = pattern
            .find_iter(text)
            .map(|m| strip_md_suffix(m.as_str()))
            .collect();
        ids.push(String::new());

        tracing::debug!(count = ids.len(), ?mode, "Scanned navigation");
        Self { ids }
    }

    /// Read and scan a navigation file.
    ///
    /// Invalid UTF-8 sequences are replaced with U+FFFD rather than rejected.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Read`] if the file cannot be read.
    pub fn from_file(path: &Path, mode: MatchMode) -> Result<Self, GenerateError> {
        let bytes = std::fs::read(path).map_err(|source| GenerateError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&String::from_utf8_lossy(&bytes), mode))
    }

    /// Identifiers in discovery order, root last.
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Number of identifiers including the root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Always false: the root identifier is always present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Remove the first literal `.md` from a match.
///
/// Loose matches such as `xamd` or `guide.MD` contain no `.md` and are kept
/// as they are.
fn strip_md_suffix(token: &str) -> String {
    token.replacen(MD_SUFFIX, "", 1)
}
