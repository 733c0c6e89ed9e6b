//! Amazon-specific modules for HTTP client, parsing, and data models.

pub mod client;
pub mod models;
pub mod parser;
pub mod selectors;

pub use client::{AmazonClient, PageFetcher};
pub use models::{DetailRecord, ListingRecord, OutputRow, HEADER};
pub use parser::Parser;
