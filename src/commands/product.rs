//! Single product lookup.

use crate::amazon::{AmazonClient, PageFetcher};
use crate::commands::{fetch_details, resolve_product_url};
use crate::config::Config;
use crate::format::format_details;
use anyhow::{Context, Result};
use tracing::info;

/// Fetches the detail fields of one product page.
pub struct ProductCommand {
    config: Config,
}

impl ProductCommand {
    /// Creates a new product command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Fetches a product and returns formatted output.
    pub async fn execute(&self, url: &str, json: bool) -> Result<String> {
        let client = AmazonClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_client(&client, url, json).await
    }

    /// Fetches a product with a provided client (for testing).
    pub async fn execute_with_client(
        &self,
        client: &impl PageFetcher,
        url: &str,
        json: bool,
    ) -> Result<String> {
        let base_url = self.config.base_url()?;
        let resolved = resolve_product_url(url.trim(), &base_url)?;

        info!("Looking up product: {}", resolved);

        let details = fetch_details(client, resolved.as_str(), &base_url)
            .await
            .with_context(|| format!("Failed to fetch product details from {}", resolved))?;

        Ok(format_details(resolved.as_str(), &details, json))
    }
}
