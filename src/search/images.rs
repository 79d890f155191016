use serde::Deserialize;

/// One image-search candidate as returned by the provider.
///
/// The provider occasionally returns entries without an image URL; those are
/// kept here (they count toward the displayed total) and skipped by the
/// selector.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageResult {
    #[serde(rename = "image")]
    pub image_url: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
}

impl ImageResult {
    /// Display line for the operator: the result title, falling back to the
    /// source page URL.
    pub fn source(&self) -> Option<&str> {
        self.title
            .as_deref()
            .filter(|title| !title.is_empty())
            .or(self.url.as_deref())
    }
}

#[derive(Deserialize)]
struct SearchPage {
    #[serde(default)]
    results: Vec<ImageResult>,
}

/// Parse the image endpoint's JSON body and truncate to `max_results`.
pub fn parse_results(
    body: &str,
    max_results: usize,
) -> Result<Vec<ImageResult>, serde_json::Error> {
    let page: SearchPage = serde_json::from_str(body)?;
    let mut results = page.results;
    results.truncate(max_results);
    Ok(results)
}
