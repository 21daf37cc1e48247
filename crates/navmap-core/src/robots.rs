//! Robots directive pointing crawlers at the sitemap.

/// Build the single-line robots file: `Sitemap: {host}/{sitemap_name}`.
///
/// The content does not depend on the discovered pages.
#[must_use]
pub fn robots_directive(host: &str, sitemap_name: &str) -> String {
    format!("Sitemap: {host}/{sitemap_name}")
}
