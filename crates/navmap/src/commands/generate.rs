//! `navmap generate` command implementation.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use navmap_config::{ChangeFreq, CliSettings, Config, MatchMode};
use navmap_core::{GenerateReport, Generator, generator_config_from_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the generate command.
#[derive(Args)]
pub(crate) struct GenerateArgs {
    /// Path to configuration file (default: auto-discover navmap.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Navigation file to scan (overrides config).
    #[arg(short, long)]
    nav: Option<PathBuf>,

    /// Public host, e.g. https://docs.example.com (overrides config).
    #[arg(long, env = "NAVMAP_HOST")]
    host: Option<String>,

    /// Directory to write artifacts to (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Only treat `name.md` tokens as pages.
    #[arg(long)]
    strict: bool,

    /// Sitemap change frequency hint (overrides config).
    #[arg(long, value_enum)]
    changefreq: Option<ChangeFreqArg>,

    /// Print the artifacts instead of writing them.
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Command-line spelling of [`ChangeFreq`].
#[derive(Clone, Copy, ValueEnum)]
enum ChangeFreqArg {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl From<ChangeFreqArg> for ChangeFreq {
    fn from(arg: ChangeFreqArg) -> Self {
        match arg {
            ChangeFreqArg::Always => Self::Always,
            ChangeFreqArg::Hourly => Self::Hourly,
            ChangeFreqArg::Daily => Self::Daily,
            ChangeFreqArg::Weekly => Self::Weekly,
            ChangeFreqArg::Monthly => Self::Monthly,
            ChangeFreqArg::Yearly => Self::Yearly,
            ChangeFreqArg::Never => Self::Never,
        }
    }
}

impl GenerateArgs {
    /// Execute the generate command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the navigation file cannot be
    /// read, or any artifact cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            nav_path: self.nav,
            output_dir: self.output_dir,
            match_mode: self.strict.then_some(MatchMode::Strict),
            changefreq: self.changefreq.map(ChangeFreq::from),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let generator = Generator::new(generator_config_from_config(&config)?);

        output.info(&format!(
            "Navigation: {}",
            generator.config().nav_path.display()
        ));

        if self.dry_run {
            let artifacts = generator.render()?;
            let generator_config = generator.config();
            for (path, content) in [
                (
                    &generator_config.routes_path,
                    String::from_utf8_lossy(&artifacts.routes_json),
                ),
                (
                    &generator_config.sitemap_path,
                    String::from_utf8_lossy(&artifacts.sitemap_xml),
                ),
                (
                    &generator_config.robots_path,
                    artifacts.robots_txt.as_str().into(),
                ),
            ] {
                output.highlight(&format!("--- {}", path.display()));
                output.info(content.trim_end());
            }
            return Ok(());
        }

        let report = generator.run()?;
        for line in progress_lines(&report) {
            output.info(&line);
        }
        output.success(&format!(
            "Generated artifacts for {} pages",
            report.pages.len()
        ));

        Ok(())
    }
}

/// One line per written artifact, in write order.
fn progress_lines(report: &GenerateReport) -> Vec<String> {
    report
        .written
        .iter()
        .map(|written| format!("Wrote {}: {}", written.kind, written.path.display()))
        .collect()
}
