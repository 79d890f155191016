//! Interactive product-image fetcher.
//!
//! Reads a spreadsheet of products (SKU + name columns), searches the image
//! provider for each product name, lets a human operator accept one of the top
//! results, and downloads the accepted image as `<sanitized SKU><ext>` in the
//! output directory. One linear pass over the rows; nothing is retried or
//! remembered across runs.

pub mod config;
pub mod download;
pub mod driver;
pub mod error;
pub mod search;
pub mod select;
pub mod sheet;

pub use config::Settings;
pub use error::{ConfigError, RowError};
