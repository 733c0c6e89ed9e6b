//! Records extracted from listing and detail pages.

use serde::{Deserialize, Serialize};

/// Column names of an output row, in order.
pub const HEADER: [&str; 9] = [
    "Product URL",
    "Product Name",
    "Product Price",
    "Rating",
    "Number of Reviews",
    "Description",
    "ASIN",
    "Product Description",
    "Manufacturer",
];

/// One product card from a search results page.
///
/// All fields are raw page text. A field missing from the card is an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRecord {
    /// Absolute product URL
    pub product_url: String,
    /// Product title
    pub product_name: String,
    /// Whole price as shown, e.g. "1,299"
    pub product_price: String,
    /// Rating text, e.g. "4.5 out of 5 stars"
    pub rating: String,
    /// Review count text, e.g. "12,345"
    pub review_count: String,
}

impl ListingRecord {
    /// Names of the columns this record has no value for.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            (HEADER[0], &self.product_url),
            (HEADER[1], &self.product_name),
            (HEADER[2], &self.product_price),
            (HEADER[3], &self.rating),
            (HEADER[4], &self.review_count),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Fields from a product detail page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailRecord {
    pub description: String,
    pub asin: String,
    pub product_description: String,
    pub manufacturer: String,
}

impl DetailRecord {
    /// Field values in column order.
    pub fn values(&self) -> [&str; 4] {
        [
            self.description.as_str(),
            self.asin.as_str(),
            self.product_description.as_str(),
            self.manufacturer.as_str(),
        ]
    }

    /// Returns true if no field was found on the page.
    pub fn is_empty(&self) -> bool {
        self.values().iter().all(|v| v.is_empty())
    }
}

/// A listing record joined with its detail record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRow {
    #[serde(rename = "Product URL")]
    pub product_url: String,
    #[serde(rename = "Product Name")]
    pub product_name: String,
    #[serde(rename = "Product Price")]
    pub product_price: String,
    #[serde(rename = "Rating")]
    pub rating: String,
    #[serde(rename = "Number of Reviews")]
    pub review_count: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "ASIN")]
    pub asin: String,
    #[serde(rename = "Product Description")]
    pub product_description: String,
    #[serde(rename = "Manufacturer")]
    pub manufacturer: String,
}

impl OutputRow {
    /// Joins a listing with its details.
    pub fn new(listing: ListingRecord, details: DetailRecord) -> Self {
        Self {
            product_url: listing.product_url,
            product_name: listing.product_name,
            product_price: listing.product_price,
            rating: listing.rating,
            review_count: listing.review_count,
            description: details.description,
            asin: details.asin,
            product_description: details.product_description,
            manufacturer: details.manufacturer,
        }
    }

    /// Cell values in column order.
    pub fn values(&self) -> [&str; 9] {
        [
            self.product_url.as_str(),
            self.product_name.as_str(),
            self.product_price.as_str(),
            self.rating.as_str(),
            self.review_count.as_str(),
            self.description.as_str(),
            self.asin.as_str(),
            self.product_description.as_str(),
            self.manufacturer.as_str(),
        ]
    }

    /// Names of the columns left empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        HEADER
            .iter()
            .zip(self.values())
            .filter(|(_, value)| value.is_empty())
            .map(|(name, _)| *name)
            .collect()
    }
}
