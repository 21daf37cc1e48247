//! Error types for artifact generation.

use std::fmt;
use std::path::PathBuf;

/// Error from reading the navigation file or writing artifacts.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// Navigation file could not be read.
    #[error("failed to read navigation file {}: {source}", path.display())]
    Read {
        /// Navigation file path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// One or more artifacts could not be written.
    ///
    /// Every write is attempted; this lists all that failed.
    #[error("failed to write {}", WriteFailures(.failures))]
    Write {
        /// Failed writes in attempt order.
        failures: Vec<WriteFailure>,
    },

    /// Routes could not be serialized to JSON.
    #[error("JSON error")]
    Serialize(#[from] serde_json::Error),

    /// Sitemap XML could not be rendered.
    #[error("sitemap rendering error")]
    Render(#[source] std::io::Error),
}

/// A single failed artifact write.
#[derive(Debug)]
pub struct WriteFailure {
    /// Output path that could not be written.
    pub path: PathBuf,
    /// Underlying I/O error.
    pub source: std::io::Error,
}

impl fmt::Display for WriteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.source)
    }
}

/// Joins failures as `a: err; b: err`.
struct WriteFailures<'a>(&'a [WriteFailure]);

impl fmt::Display for WriteFailures<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, failure) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{failure}")?;
        }
        Ok(())
    }
}
