//! Per-row orchestration: extract fields, search, prompt, download.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::download::{download_image, safe_filename};
use crate::error::{ConfigError, RowError};
use crate::search::{ImageResult, SearchClient};
use crate::select::{self, Confirm};
use crate::sheet::{RowSource, find_column};

/// Accepted header spellings, in priority order, lower-cased.
const SKU_COLUMNS: &[&str] = &["sku", "item sku", "item_sku"];
const NAME_COLUMNS: &[&str] = &["name", "product name", "product_name", "title"];

/// Network seam for the per-row loop, mirroring the [`Confirm`] seam for the
/// prompt: search for candidates, download an accepted one. Implemented by
/// [`SearchClient`]; tests drive the loop with a scripted double.
pub trait ImageProvider {
    fn image_results(&self, query: &str, max_results: usize) -> Result<Vec<ImageResult>, RowError>;
    fn download(&self, url: &str, output_dir: &Path, stem: &str) -> Result<PathBuf, RowError>;
}

impl ImageProvider for SearchClient {
    fn image_results(&self, query: &str, max_results: usize) -> Result<Vec<ImageResult>, RowError> {
        SearchClient::image_results(self, query, max_results)
    }

    fn download(&self, url: &str, output_dir: &Path, stem: &str) -> Result<PathBuf, RowError> {
        download_image(self.http(), url, output_dir, stem)
    }
}

/// Run the whole pipeline once.
///
/// Returns `Err` only for fatal setup problems (missing input, unresolvable
/// columns, output directory, HTTP client). Everything that goes wrong for a
/// single product is logged to stdout and the loop moves on; per-row
/// failures never fail the run.
pub fn run(settings: &Settings, confirm: &mut dyn Confirm) -> Result<(), ConfigError> {
    if !settings.input.exists() {
        return Err(ConfigError::InputNotFound(settings.input.clone()));
    }

    let source = RowSource::open(&settings.input)?;
    let headers = source.headers().to_vec();
    let sku_index = find_column(&headers, SKU_COLUMNS);
    let name_index = find_column(&headers, NAME_COLUMNS);
    let (Some(sku_index), Some(name_index)) = (sku_index, name_index) else {
        return Err(ConfigError::ColumnsUnresolved(headers));
    };

    fs::create_dir_all(&settings.output_dir).map_err(ConfigError::OutputDir)?;
    let client = SearchClient::new()?;

    process_rows(
        source,
        sku_index,
        name_index,
        &settings.output_dir,
        settings.max_results,
        &client,
        confirm,
    );
    Ok(())
}

/// The state machine over data rows. Row 1 is the header, so data rows are
/// numbered from 2.
fn process_rows(
    rows: impl Iterator<Item = Result<Vec<String>, RowError>>,
    sku_index: usize,
    name_index: usize,
    output_dir: &Path,
    max_results: usize,
    provider: &dyn ImageProvider,
    confirm: &mut dyn Confirm,
) {
    for (offset, row) in rows.enumerate() {
        let row_number = offset + 2;
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                println!("Skipping row {}: {}", row_number, e);
                continue;
            }
        };
        let Some((sku, name)) = row_fields(&row, sku_index, name_index) else {
            println!("Skipping row {}: missing SKU or name.", row_number);
            continue;
        };

        println!("\nSearching images for SKU {}: {}", sku, name);
        let results = match provider.image_results(&name, max_results) {
            Ok(results) => results,
            Err(e) => {
                println!("Failed to fetch results for {}: {}", sku, e);
                continue;
            }
        };
        if results.is_empty() {
            println!("No image results found.");
            continue;
        }

        match select::choose(&results, confirm) {
            Some(url) => {
                let stem = safe_filename(&sku);
                match provider.download(url, output_dir, &stem) {
                    Ok(path) => println!("Saved: {}", path.display()),
                    Err(e) => println!("Failed to download image: {}", e),
                }
            }
            None => println!("No image selected for this SKU."),
        }
    }
}

/// Pull the trimmed SKU and name out of a row. `None` when either cell is
/// absent or empty; such rows are skipped before any network call.
fn row_fields(row: &[String], sku_index: usize, name_index: usize) -> Option<(String, String)> {
    let sku = row.get(sku_index)?.trim();
    let name = row.get(name_index)?.trim();
    if sku.is_empty() || name.is_empty() {
        return None;
    }
    Some((sku.to_string(), name.to_string()))
}
