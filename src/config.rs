//! Run configuration.
//!
//! Defaults are built in, `SKUFETCH_*` environment variables override them,
//! and CLI flags override both (applied by the binary after parsing).

use config::{Config, Environment};
use serde::Deserialize;
use std::path::PathBuf;

/// Sent on every outbound request; the search provider serves a different
/// page (without the token) to unknown agents.
pub const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Debug, Deserialize)]
pub struct Settings {
    /// Path to the product spreadsheet (xlsx or csv).
    pub input: PathBuf,
    /// Directory downloaded images are written into.
    pub output_dir: PathBuf,
    /// How many top image results to review per product.
    pub max_results: usize,
}

impl Settings {
    pub fn new() -> Result<Self, config::ConfigError> {
        Config::builder()
            .set_default("input", "products.xlsx")?
            .set_default("output_dir", "downloaded_images")?
            .set_default("max_results", 5)?
            .add_source(Environment::with_prefix("SKUFETCH"))
            .build()?
            .try_deserialize()
    }
}
