//! Paginated search results scraping.

use crate::amazon::{ListingRecord, PageFetcher, Parser};
use crate::config::Config;
use anyhow::{Context, Result};
use rand::Rng;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Pause taken after each listing page.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pacing {
    delay: Duration,
    jitter_ms: u64,
}

impl Pacing {
    pub fn new(delay: Duration, jitter_ms: u64) -> Self {
        Self { delay, jitter_ms }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.request_delay(), config.delay_jitter_ms)
    }

    /// No pause at all.
    pub fn none() -> Self {
        Self::default()
    }

    /// Sleeps for the fixed delay plus a random jitter.
    pub async fn wait(&self) {
        let jitter = if self.jitter_ms > 0 {
            rand::rng().random_range(0..=self.jitter_ms)
        } else {
            0
        };

        let total = self.delay + Duration::from_millis(jitter);
        if total.is_zero() {
            return;
        }

        debug!("Delaying {}ms", total.as_millis());
        tokio::time::sleep(total).await;
    }
}

/// Builds the URL of a results page by appending `page=<n>` to the search URL.
pub fn page_url(base_url: &Url, page: u32) -> Url {
    let mut url = base_url.clone();
    url.query_pairs_mut().append_pair("page", &page.to_string());
    url
}

/// Fetches up to `num_pages` results pages, collecting at most `max_products` records.
///
/// A failed page fetch aborts the whole scrape.
pub async fn fetch_listings(
    client: &impl PageFetcher,
    base_url: &Url,
    num_pages: u32,
    max_products: usize,
    pacing: Pacing,
) -> Result<Vec<ListingRecord>> {
    let parser = Parser::new(base_url.clone());

    let mut records: Vec<ListingRecord> = Vec::new();
    let mut page = 1;

    while records.len() < max_products && page <= num_pages {
        let url = page_url(base_url, page);
        info!("Fetching listing page {}", page);

        let html = client
            .get(&url)
            .await
            .with_context(|| format!("Failed to fetch listing page {}", page))?;

        let mut page_records = parser.parse_listing(&html);
        let num_products = (max_products - records.len()).min(page_records.len());
        page_records.truncate(num_products);

        debug!("Page {} contributed {} products", page, num_products);
        records.extend(page_records);

        page += 1;
        pacing.wait().await;
    }

    info!("Collected {} listings from {} pages", records.len(), page - 1);
    Ok(records)
}
