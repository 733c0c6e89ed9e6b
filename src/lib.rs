//! amz-listing-scraper - Scrape Amazon search listings and product details into a CSV file
//!
//! Fetches search results page by page, visits every listed product's detail
//! page, and writes one row per product.

pub mod amazon;
pub mod commands;
pub mod config;
pub mod error;
pub mod format;

pub use amazon::models::{DetailRecord, ListingRecord, OutputRow};
pub use commands::{fetch_details, fetch_listings};
pub use config::Config;
pub use error::FetchError;
