//! Route, sitemap and robots generation for documentation sites.
//!
//! Scans a navigation file (such as `docs/_navbar.md`) for page links once
//! and derives three artifacts from the same page list:
//!
//! - `routes.json`: hash-fragment routes (`/#/guide`) for SPA prerendering
//! - `sitemap.xml`: path URLs (`https://host/guide`) for search engines
//! - `robots.txt`: a `Sitemap:` directive pointing at the sitemap
//!
//! # Example
//!
//! ```no_run
//! use navmap_config::Config;
//! use navmap_core::{Generator, generator_config_from_config};
//!
//! let config = Config::load(None, None)?;
//! let report = Generator::new(generator_config_from_config(&config)?).run()?;
//! println!("{} pages", report.pages.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod generator;
mod navigation;
mod robots;
mod routes;
mod sitemap;

pub use error::{GenerateError, WriteFailure};
pub use generator::{
    ArtifactKind, Artifacts, GenerateReport, Generator, GeneratorConfig, WrittenArtifact,
    generator_config_from_config,
};
pub use navigation::PageInventory;
pub use robots::robots_directive;
pub use routes::{build_routes, render_routes_json};
pub use sitemap::{SitemapWriter, sitemap_paths};
