//! Full scrape: listings, then details for every listed product, written row by row.

use crate::amazon::{AmazonClient, DetailRecord, OutputRow, PageFetcher};
use crate::commands::{fetch_details, fetch_listings, Pacing};
use crate::config::Config;
use crate::format::RowWriter;
use anyhow::{Context, Result};
use std::fmt;
use std::path::PathBuf;
use tracing::{info, warn};

/// Outcome of a scrape run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeSummary {
    pub rows_written: usize,
    /// Products whose detail page could not be fetched
    pub detail_failures: usize,
    pub output_path: PathBuf,
}

impl fmt::Display for ScrapeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Scraped data has been saved to {} ({} rows",
            self.output_path.display(),
            self.rows_written
        )?;
        if self.detail_failures > 0 {
            write!(f, ", {} without details", self.detail_failures)?;
        }
        write!(f, ")")
    }
}

/// Executes a full scrape.
pub struct ScrapeCommand {
    config: Config,
}

impl ScrapeCommand {
    /// Creates a new scrape command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs the scrape against Amazon.
    pub async fn execute(&self) -> Result<ScrapeSummary> {
        let client = AmazonClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_client(&client).await
    }

    /// Runs the scrape with a provided client (for testing).
    pub async fn execute_with_client(&self, client: &impl PageFetcher) -> Result<ScrapeSummary> {
        let base_url = self.config.base_url()?;

        info!(
            "Scraping up to {} products from {} pages of {}",
            self.config.max_products, self.config.num_pages, base_url
        );

        let listings = fetch_listings(
            client,
            &base_url,
            self.config.num_pages,
            self.config.max_products,
            Pacing::from_config(&self.config),
        )
        .await?;

        let output_path = self.config.output_path.clone();
        let mut writer = RowWriter::create(&output_path, self.config.format)?;
        let mut detail_failures = 0;

        for listing in listings {
            let details = match fetch_details(client, &listing.product_url, &base_url).await {
                Some(details) => details,
                None => {
                    detail_failures += 1;
                    DetailRecord::default()
                }
            };

            let row = OutputRow::new(listing, details);
            let missing = row.missing_fields();
            if !missing.is_empty() {
                warn!("{} has no value for: {}", row.product_url, missing.join(", "));
            }

            writer.write_row(&row)?;
        }

        let rows_written = writer.rows();
        writer.finish()?;

        Ok(ScrapeSummary { rows_written, detail_failures, output_path })
    }
}
