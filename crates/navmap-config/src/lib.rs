//! Configuration management for navmap.
//!
//! Parses `navmap.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.host`
//! - `navigation.path`
//! - `output.dir`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "navmap.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override public host name.
    pub host: Option<String>,
    /// Override navigation file path.
    pub nav_path: Option<PathBuf>,
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
    /// Override page match mode.
    pub match_mode: Option<MatchMode>,
    /// Override sitemap change frequency.
    pub changefreq: Option<ChangeFreq>,
}

/// How navigation links are recognized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Word characters, any single character, then `md`.
    ///
    /// Matches `guide.md` but also text such as `xamd`.
    #[default]
    Loose,
    /// Word characters followed by a literal `.md`.
    Strict,
}

/// Sitemap `<changefreq>` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFreq {
    /// Value as written into the sitemap.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site configuration.
    pub site: SiteConfig,
    /// Navigation configuration (paths are relative strings from TOML).
    navigation: NavigationConfigRaw,
    /// Output configuration (paths are relative strings from TOML).
    output: OutputConfigRaw,
    /// Sitemap rendering configuration.
    pub sitemap: SitemapConfig,

    /// Resolved navigation configuration (set after loading).
    #[serde(skip)]
    pub navigation_resolved: NavigationConfig,
    /// Resolved output configuration (set after loading).
    #[serde(skip)]
    pub output_resolved: OutputConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Site configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Public URL prefix, e.g. `https://docs.example.com`.
    pub host: Option<String>,
}

/// Raw navigation configuration as parsed from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct NavigationConfigRaw {
    path: Option<String>,
    match_mode: Option<MatchMode>,
}

/// Resolved navigation configuration with absolute paths.
#[derive(Debug, Default)]
pub struct NavigationConfig {
    /// Navigation file to scan.
    pub path: PathBuf,
    /// How links are recognized.
    pub match_mode: MatchMode,
}

/// Raw output configuration as parsed from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OutputConfigRaw {
    dir: Option<String>,
    routes: Option<String>,
    sitemap: Option<String>,
    robots: Option<String>,
}

/// Resolved output configuration.
#[derive(Debug, Default)]
pub struct OutputConfig {
    /// Directory all artifacts are written to.
    pub dir: PathBuf,
    /// Routes file name.
    pub routes: String,
    /// Sitemap file name, also its public name under the host.
    pub sitemap: String,
    /// Robots file name.
    pub robots: String,
}

impl OutputConfig {
    #[must_use]
    pub fn routes_path(&self) -> PathBuf {
        self.dir.join(&self.routes)
    }

    #[must_use]
    pub fn sitemap_path(&self) -> PathBuf {
        self.dir.join(&self.sitemap)
    }

    #[must_use]
    pub fn robots_path(&self) -> PathBuf {
        self.dir.join(&self.robots)
    }
}

/// Sitemap rendering configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    /// Change frequency hint added to every entry.
    pub changefreq: Option<ChangeFreq>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.host`").
        field: String,
        /// Error message (e.g., "${`DOCS_HOST`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

/// Require an output name to be a bare file name.
fn require_file_name(name: &str, field: &str) -> Result<(), ConfigError> {
    require_non_empty(name, field)?;
    if name.contains(['/', '\\']) {
        return Err(ConfigError::Validation(format!(
            "{field} must be a file name, not a path"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `navmap.toml` in current directory and parents.
    ///
    /// CLI settings are applied after path resolution and the result is
    /// validated, so a host given only on the command line is accepted.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the final configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.normalize_host();
        config.validate()?;

        Ok(config)
    }

    /// Public host, e.g. `https://docs.example.com`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if no host is configured.
    pub fn require_host(&self) -> Result<&str, ConfigError> {
        self.site.host.as_deref().ok_or_else(|| {
            ConfigError::Validation(
                "site.host must be set in config or with --host".to_owned(),
            )
        })
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let host = self.require_host()?;
        require_non_empty(host, "site.host")?;
        require_http_url(host, "site.host")?;

        require_file_name(&self.output_resolved.routes, "output.routes")?;
        require_file_name(&self.output_resolved.sitemap, "output.sitemap")?;
        require_file_name(&self.output_resolved.robots, "output.robots")?;

        Ok(())
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.site.host = Some(host.clone());
        }
        if let Some(nav_path) = &settings.nav_path {
            self.navigation_resolved.path.clone_from(nav_path);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.output_resolved.dir.clone_from(output_dir);
        }
        if let Some(match_mode) = settings.match_mode {
            self.navigation_resolved.match_mode = match_mode;
        }
        if let Some(changefreq) = settings.changefreq {
            self.sitemap.changefreq = Some(changefreq);
        }
    }

    /// Strip trailing slashes so `{host}/{path}` never doubles the separator.
    fn normalize_host(&mut self) {
        if let Some(host) = &mut self.site.host {
            let trimmed = host.trim_end_matches('/').len();
            host.truncate(trimmed);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        let mut config = Self {
            site: SiteConfig::default(),
            navigation: NavigationConfigRaw::default(),
            output: OutputConfigRaw::default(),
            sitemap: SitemapConfig::default(),
            navigation_resolved: NavigationConfig::default(),
            output_resolved: OutputConfig::default(),
            config_path: None,
        };
        config.resolve_paths(base);
        config
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref host) = self.site.host {
            self.site.host = Some(expand::expand_env(host, "site.host")?);
        }
        if let Some(ref path) = self.navigation.path {
            self.navigation.path = Some(expand::expand_env(path, "navigation.path")?);
        }
        if let Some(ref dir) = self.output.dir {
            self.output.dir = Some(expand::expand_env(dir, "output.dir")?);
        }
        Ok(())
    }

    /// Resolve relative paths against the config directory and fill defaults.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.navigation_resolved = NavigationConfig {
            path: resolve(self.navigation.path.as_deref(), "docs/_navbar.md"),
            match_mode: self.navigation.match_mode.unwrap_or_default(),
        };

        let name = |name: Option<&str>, default: &str| name.unwrap_or(default).to_owned();
        self.output_resolved = OutputConfig {
            dir: resolve(self.output.dir.as_deref(), "."),
            routes: name(self.output.routes.as_deref(), "routes.json"),
            sitemap: name(self.output.sitemap.as_deref(), "sitemap.xml"),
            robots: name(self.output.robots.as_deref(), "robots.txt"),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config_with_host(host: &str) -> Config {
        let mut config = Config::default_with_base(Path::new("/site"));
        config.site.host = Some(host.to_owned());
        config
    }

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/site"));
        assert_eq!(config.site.host, None);
        assert_eq!(
            config.navigation_resolved.path,
            PathBuf::from("/site/docs/_navbar.md")
        );
        assert_eq!(config.navigation_resolved.match_mode, MatchMode::Loose);
        assert_eq!(
            config.output_resolved.routes_path(),
            PathBuf::from("/site/./routes.json")
        );
        assert_eq!(config.output_resolved.sitemap, "sitemap.xml");
        assert_eq!(config.output_resolved.robots, "robots.txt");
        assert_eq!(config.sitemap.changefreq, None);
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.site.host.is_none());
        assert!(config.navigation.path.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[site]
host = "https://docs.example.com"

[navigation]
path = "content/_navbar.md"
match_mode = "strict"

[output]
dir = "public"
routes = "prerender.json"
sitemap = "map.xml"
robots = "robots.txt"

[sitemap]
changefreq = "weekly"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.site.host.as_deref(), Some("https://docs.example.com"));
        assert_eq!(
            config.navigation_resolved.path,
            PathBuf::from("/project/content/_navbar.md")
        );
        assert_eq!(config.navigation_resolved.match_mode, MatchMode::Strict);
        assert_eq!(
            config.output_resolved.routes_path(),
            PathBuf::from("/project/public/prerender.json")
        );
        assert_eq!(
            config.output_resolved.sitemap_path(),
            PathBuf::from("/project/public/map.xml")
        );
        assert_eq!(config.sitemap.changefreq, Some(ChangeFreq::Weekly));
    }

    #[test]
    fn test_parse_unknown_match_mode_fails() {
        let toml = r#"
[navigation]
match_mode = "fuzzy"
"#;
        assert!(toml::from_str::<Config>(toml).is_err());
    }

    #[test]
    fn test_changefreq_as_str() {
        assert_eq!(ChangeFreq::Daily.as_str(), "daily");
        assert_eq!(ChangeFreq::Never.as_str(), "never");
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = config_with_host("https://old.example.com");
        let overrides = CliSettings {
            host: Some("https://new.example.com".to_owned()),
            output_dir: Some(PathBuf::from("/out")),
            match_mode: Some(MatchMode::Strict),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.site.host.as_deref(), Some("https://new.example.com"));
        assert_eq!(config.output_resolved.dir, PathBuf::from("/out"));
        assert_eq!(config.navigation_resolved.match_mode, MatchMode::Strict);
        assert_eq!(
            config.navigation_resolved.path,
            PathBuf::from("/site/docs/_navbar.md")
        ); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = config_with_host("https://example.com");
        config.apply_cli_settings(&CliSettings::default());
        assert_eq!(config.site.host.as_deref(), Some("https://example.com"));
        assert_eq!(config.output_resolved.dir, PathBuf::from("/site/."));
    }

    #[test]
    fn test_normalize_host_trims_trailing_slashes() {
        let mut config = config_with_host("https://example.com//");
        config.normalize_host();
        assert_eq!(config.require_host().unwrap(), "https://example.com");
    }

    #[test]
    fn test_expand_env_vars_host() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("NAVMAP_CONFIG_TEST_HOST", "https://env.example.com");
        }
        let toml = r#"
[site]
host = "${NAVMAP_CONFIG_TEST_HOST}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();
        assert_eq!(config.site.host.as_deref(), Some("https://env.example.com"));
        unsafe {
            std::env::remove_var("NAVMAP_CONFIG_TEST_HOST");
        }
    }

    #[test]
    fn test_load_from_file_resolves_relative_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            "[site]\nhost = \"https://example.com/\"\n\n[output]\ndir = \"dist\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.require_host().unwrap(), "https://example.com");
        assert_eq!(config.output_resolved.dir, dir.path().join("dist"));
        assert_eq!(
            config.navigation_resolved.path,
            dir.path().join("docs/_navbar.md")
        );
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let err = Config::load(Some(Path::new("/nonexistent/navmap.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_with_cli_host_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "").unwrap();

        let settings = CliSettings {
            host: Some("https://cli.example.com".to_owned()),
            ..Default::default()
        };
        let config = Config::load(Some(&path), Some(&settings)).unwrap();

        assert_eq!(config.require_host().unwrap(), "https://cli.example.com");
    }

    // Validation tests

    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(
                msg.contains(s),
                "Expected error to contain '{s}', got: {msg}"
            );
        }
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(config_with_host("https://example.com").validate().is_ok());
    }

    #[test]
    fn test_validate_missing_host() {
        let config = Config::default_with_base(Path::new("/site"));
        assert_validation_error(&config, &["site.host", "--host"]);
    }

    #[test]
    fn test_validate_empty_host() {
        let config = config_with_host("");
        assert_validation_error(&config, &["site.host", "empty"]);
    }

    #[test]
    fn test_validate_host_scheme() {
        let config = config_with_host("example.com");
        assert_validation_error(&config, &["site.host", "http"]);
    }

    #[test]
    fn test_validate_output_name_is_not_path() {
        let mut config = config_with_host("https://example.com");
        config.output_resolved.sitemap = "maps/sitemap.xml".to_owned();
        assert_validation_error(&config, &["output.sitemap", "file name"]);
    }

    #[test]
    fn test_validate_output_name_empty() {
        let mut config = config_with_host("https://example.com");
        config.output_resolved.robots = String::new();
        assert_validation_error(&config, &["output.robots", "empty"]);
    }
}
