//! Image-search client for the provider's scrape endpoints.
//!
//! Every query is two sequential calls on the shared session: the root page
//! to obtain a fresh vqd token, then the JSON image endpoint. The token is
//! tied to the query text, so it cannot be cached across products.

pub mod images;
pub mod token;

use std::time::Duration;

use crate::config::USER_AGENT;
use crate::error::{ConfigError, RowError};

pub use images::ImageResult;

const HOMEPAGE_URL: &str = "https://duckduckgo.com/";
const IMAGES_URL: &str = "https://duckduckgo.com/i.js";
const SEARCH_TIMEOUT: Duration = Duration::from_secs(30);

/// One HTTP session for the whole run: cookie jar and connection reuse
/// across token fetches, image queries, and downloads.
pub struct SearchClient {
    http: reqwest::blocking::Client,
}

impl SearchClient {
    pub fn new() -> Result<Self, ConfigError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .build()
            .map_err(ConfigError::Client)?;
        Ok(Self { http })
    }

    /// The underlying session, for callers that fetch arbitrary URLs
    /// (the downloader).
    pub fn http(&self) -> &reqwest::blocking::Client {
        &self.http
    }

    fn vqd_token(&self, query: &str) -> Result<String, RowError> {
        let body = self
            .http
            .get(HOMEPAGE_URL)
            .query(&[("q", query)])
            .timeout(SEARCH_TIMEOUT)
            .send()?
            .error_for_status()?
            .text()?;
        token::extract_vqd(&body).ok_or(RowError::TokenNotFound)
    }

    /// Run one image search, returning at most `max_results` candidates.
    pub fn image_results(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<ImageResult>, RowError> {
        let vqd = self.vqd_token(query)?;
        log::debug!("got vqd token for query {:?}", query);
        let body = self
            .http
            .get(IMAGES_URL)
            .query(&[
                ("l", "us-en"),
                ("o", "json"),
                ("q", query),
                ("vqd", &vqd),
                ("f", ",,,"),
                ("p", "1"),
            ])
            .timeout(SEARCH_TIMEOUT)
            .send()?
            .error_for_status()?
            .text()?;
        let results = images::parse_results(&body, max_results)?;
        log::debug!("query {:?} returned {} candidates", query, results.len());
        Ok(results)
    }
}
