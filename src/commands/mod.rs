//! Scraping routines and CLI command implementations.

pub mod details;
pub mod listing;
pub mod product;
pub mod scrape;

pub use details::{fetch_details, resolve_product_url};
pub use listing::{fetch_listings, page_url, Pacing};
pub use product::ProductCommand;
pub use scrape::{ScrapeCommand, ScrapeSummary};
