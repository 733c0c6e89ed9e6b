//! HTML parser for Amazon search results and product pages.

use crate::amazon::models::{DetailRecord, ListingRecord};
use crate::amazon::selectors::{detail, errors, listing};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, trace, warn};
use url::Url;

/// Parser for Amazon HTML pages.
pub struct Parser {
    base_url: Url,
}

impl Parser {
    /// Creates a parser that resolves relative links against `base_url`.
    pub fn new(base_url: Url) -> Self {
        Self { base_url }
    }

    /// Parses a search results page into one record per product card.
    ///
    /// Cards without a product link are skipped. Every other field falls back
    /// to an empty string when the card does not carry it.
    pub fn parse_listing(&self, html: &str) -> Vec<ListingRecord> {
        let document = Html::parse_document(html);

        if let Some(reason) = self.blocked_reason(&document) {
            warn!("Listing page looks blocked: {}", reason);
        }

        let mut records = Vec::new();
        for card in document.select(&listing::RESULT) {
            match self.parse_card(card) {
                Some(record) => {
                    trace!("Parsed listing: {}", record.product_url);
                    records.push(record);
                }
                None => trace!("Skipping result card without a product link"),
            }
        }

        debug!("Parsed {} product cards", records.len());
        records
    }

    /// Parses a product detail page.
    pub fn parse_detail(&self, html: &str) -> DetailRecord {
        let document = Html::parse_document(html);

        if let Some(reason) = self.blocked_reason(&document) {
            warn!("Detail page looks blocked: {}", reason);
        }

        let description = first_text(&document.root_element(), &detail::DESCRIPTION);

        DetailRecord {
            product_description: description.clone(),
            description,
            asin: self.parse_asin(&document),
            manufacturer: first_text(&document.root_element(), &detail::BYLINE),
        }
    }

    /// Extracts all fields from a single result card.
    fn parse_card(&self, card: ElementRef) -> Option<ListingRecord> {
        let href = card.select(&listing::PRODUCT_LINK).next()?.value().attr("href")?;

        let product_url = match self.base_url.join(href) {
            Ok(url) => url.to_string(),
            Err(e) => {
                debug!("Could not resolve product link {}: {}", href, e);
                return None;
            }
        };

        let record = ListingRecord {
            product_url,
            product_name: first_text(&card, &listing::NAME),
            product_price: first_text(&card, &listing::PRICE_WHOLE),
            rating: first_text(&card, &listing::RATING),
            review_count: first_non_empty(
                &card,
                &[&*listing::REVIEW_COUNT, &*listing::REVIEW_COUNT_FALLBACK],
            ),
        };

        let missing = record.missing_fields();
        if !missing.is_empty() {
            debug!("{} is missing: {}", record.product_url, missing.join(", "));
        }

        Some(record)
    }

    /// Reads the data cell next to the "ASIN" header of the specification table.
    fn parse_asin(&self, document: &Html) -> String {
        document
            .select(&detail::SPEC_HEADER)
            .find(|th| element_text(th) == detail::ASIN_LABEL)
            .and_then(|th| {
                th.next_siblings()
                    .filter_map(ElementRef::wrap)
                    .find(|sibling| sibling.value().name() == "td")
            })
            .map(|td| element_text(&td))
            .unwrap_or_default()
    }

    /// Detects CAPTCHA or error pages.
    fn blocked_reason(&self, document: &Html) -> Option<&'static str> {
        if document.select(&errors::CAPTCHA).next().is_some() {
            return Some("CAPTCHA detected. Try using a proxy or increasing the delay.");
        }

        if document.select(&errors::DOG_PAGE).next().is_some() {
            return Some("Amazon error page detected (503).");
        }

        None
    }
}

/// Trimmed text of the first element matching `selector`, or an empty string.
fn first_text(scope: &ElementRef, selector: &Selector) -> String {
    scope.select(selector).next().map(|e| element_text(&e)).unwrap_or_default()
}

/// Text of the first selector that yields a non-empty value, tried in order.
fn first_non_empty(scope: &ElementRef, selectors: &[&Selector]) -> String {
    selectors
        .iter()
        .map(|selector| first_text(scope, selector))
        .find(|text| !text.is_empty())
        .unwrap_or_default()
}

fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}
