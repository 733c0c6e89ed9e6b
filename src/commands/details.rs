//! Product detail page scraping.

use crate::amazon::{DetailRecord, PageFetcher, Parser};
use crate::error::FetchError;
use tracing::{debug, error, warn};
use url::Url;

/// Resolves a product link; links not starting with `http` are joined onto `base_url`.
pub fn resolve_product_url(url: &str, base_url: &Url) -> Result<Url, FetchError> {
    let resolved = if url.starts_with("http") { Url::parse(url) } else { base_url.join(url) };
    resolved.map_err(|source| FetchError::InvalidUrl { url: url.to_string(), source })
}

/// Fetches a product page and extracts its detail fields.
///
/// Returns `None` when the page cannot be fetched. The failure is logged and
/// never propagated, so one bad product does not stop a scrape.
pub async fn fetch_details(
    client: &impl PageFetcher,
    url: &str,
    base_url: &Url,
) -> Option<DetailRecord> {
    let result = match resolve_product_url(url, base_url) {
        Ok(resolved) => client.get(&resolved).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(html) => {
            let details = Parser::new(base_url.clone()).parse_detail(&html);
            debug!("Details for {}: asin={:?}", url, details.asin);
            Some(details)
        }
        Err(e) if e.is_network() => {
            error!("An error occurred while making the request: {}", e);
            None
        }
        Err(e) => {
            warn!("Skipping product {}: {}", url, e);
            None
        }
    }
}
