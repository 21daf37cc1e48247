//! Artifact generation: one navigation scan feeding routes, sitemap and robots.

use std::fmt;
use std::path::{Path, PathBuf};

use navmap_config::{ChangeFreq, Config, ConfigError, MatchMode};

use crate::error::{GenerateError, WriteFailure};
use crate::navigation::PageInventory;
use crate::robots::robots_directive;
use crate::routes::{build_routes, render_routes_json};
use crate::sitemap::{SitemapWriter, sitemap_paths};

/// Everything the generator needs for one run.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Navigation file to scan.
    pub nav_path: PathBuf,
    /// Public URL prefix without trailing slash.
    pub host: String,
    /// Routes JSON output path.
    pub routes_path: PathBuf,
    /// Sitemap XML output path.
    pub sitemap_path: PathBuf,
    /// Robots text output path.
    pub robots_path: PathBuf,
    /// How navigation links are recognized.
    pub match_mode: MatchMode,
    /// Optional `<changefreq>` for sitemap entries.
    pub changefreq: Option<ChangeFreq>,
}

impl GeneratorConfig {
    /// Public file name of the sitemap, as referenced from the robots file.
    fn sitemap_name(&self) -> String {
        self.sitemap_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Build a [`GeneratorConfig`] from loaded navmap configuration.
///
/// # Errors
///
/// Returns `ConfigError::Validation` if no host is configured.
pub fn generator_config_from_config(config: &Config) -> Result<GeneratorConfig, ConfigError> {
    Ok(GeneratorConfig {
        nav_path: config.navigation_resolved.path.clone(),
        host: config.require_host()?.to_owned(),
        routes_path: config.output_resolved.routes_path(),
        sitemap_path: config.output_resolved.sitemap_path(),
        robots_path: config.output_resolved.robots_path(),
        match_mode: config.navigation_resolved.match_mode,
        changefreq: config.sitemap.changefreq,
    })
}

/// Kind of generated artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Routes,
    Sitemap,
    Robots,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Routes => "routes",
            Self::Sitemap => "sitemap",
            Self::Robots => "robots",
        })
    }
}

/// Rendered artifacts, not yet written.
#[derive(Debug, Clone)]
pub struct Artifacts {
    /// Identifiers all three artifacts were derived from.
    pub pages: PageInventory,
    /// Routes JSON.
    pub routes_json: Vec<u8>,
    /// Sitemap XML.
    pub sitemap_xml: Vec<u8>,
    /// Robots file content.
    pub robots_txt: String,
}

/// A successfully written artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenArtifact {
    pub kind: ArtifactKind,
    pub path: PathBuf,
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct GenerateReport {
    /// Identifiers the artifacts were derived from.
    pub pages: PageInventory,
    /// Written files in write order.
    pub written: Vec<WrittenArtifact>,
}

/// Derives routes, sitemap and robots files from a navigation file.
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    #[must_use]
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Scan the navigation file once and render all artifacts in memory.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Read`] if the navigation file is unreadable.
    pub fn render(&self) -> Result<Artifacts, GenerateError> {
        let pages = PageInventory::from_file(&self.config.nav_path, self.config.match_mode)?;

        let routes_json = render_routes_json(&build_routes(pages.ids()))?;
        let sitemap_xml = SitemapWriter::new(self.config.host.as_str())
            .with_changefreq(self.config.changefreq)
            .render(sitemap_paths(pages.ids()))
            .map_err(GenerateError::Render)?;
        let robots_txt = robots_directive(&self.config.host, &self.config.sitemap_name());

        Ok(Artifacts {
            pages,
            routes_json,
            sitemap_xml,
            robots_txt,
        })
    }

    /// Render and write routes, sitemap and robots files, in that order.
    ///
    /// A failed write does not stop the remaining ones; all failures are
    /// reported together.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Read`] before anything is written if the
    /// navigation file is unreadable, or [`GenerateError::Write`] listing
    /// every output that could not be written.
    pub fn run(&self) -> Result<GenerateReport, GenerateError> {
        let artifacts = self.render()?;

        let outputs: [(ArtifactKind, &Path, &[u8]); 3] = [
            (
                ArtifactKind::Routes,
                &self.config.routes_path,
                &artifacts.routes_json,
            ),
            (
                ArtifactKind::Sitemap,
                &self.config.sitemap_path,
                &artifacts.sitemap_xml,
            ),
            (
                ArtifactKind::Robots,
                &self.config.robots_path,
                artifacts.robots_txt.as_bytes(),
            ),
        ];

        let mut written = Vec::with_capacity(outputs.len());
        let mut failures = Vec::new();

        for (kind, path, content) in outputs {
            match write_artifact(path, content) {
                Ok(()) => {
                    tracing::info!(%kind, path = %path.display(), "Wrote artifact");
                    written.push(WrittenArtifact {
                        kind,
                        path: path.to_path_buf(),
                    });
                }
                Err(source) => {
                    tracing::warn!(%kind, path = %path.display(), error = %source, "Failed to write artifact");
                    failures.push(WriteFailure {
                        path: path.to_path_buf(),
                        source,
                    });
                }
            }
        }

        if !failures.is_empty() {
            return Err(GenerateError::Write { failures });
        }

        Ok(GenerateReport {
            pages: artifacts.pages,
            written,
        })
    }
}

/// Write one artifact, creating its parent directory if needed.
fn write_artifact(path: &Path, content: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)
}
