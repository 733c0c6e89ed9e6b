//! CSS selectors for Amazon HTML parsing.
//!
//! This file contains all CSS selectors used for parsing Amazon pages.
//! Update this file when Amazon changes their HTML structure.
//!
//! **Update process**: When parsing fails, capture HTML sample,
//! update selectors, and add a test case.

use scraper::Selector;
use std::sync::LazyLock;

/// Selectors for search results pages. Field selectors are applied inside a result card.
pub mod listing {
    use super::*;

    /// Product card container - main search result item.
    pub static RESULT: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("[data-component-type='s-search-result']").unwrap());

    /// Link to the product detail page.
    pub static PRODUCT_LINK: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            ".a-link-normal.a-text-normal[href], \
             h2 a.a-link-normal[href]",
        )
        .unwrap()
    });

    /// Product title text.
    pub static NAME: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            ".a-size-medium.a-color-base.a-text-normal, \
             .a-size-base-plus.a-color-base.a-text-normal",
        )
        .unwrap()
    });

    /// Whole price (rupees/dollars part).
    pub static PRICE_WHOLE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(".a-price-whole").unwrap());

    /// Star rating text ("4.5 out of 5 stars").
    pub static RATING: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(".a-icon-alt").unwrap());

    /// Review count.
    pub static REVIEW_COUNT: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("span.a-size-base.s-underline-text").unwrap());

    /// Review count inside the link to the reviews section, for cards without the underlined span.
    pub static REVIEW_COUNT_FALLBACK: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse("a[href*='customerReviews'] .a-size-base").unwrap()
    });
}

/// Selectors for product detail pages.
pub mod detail {
    use super::*;

    /// Description container.
    pub static DESCRIPTION: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div#productDescription").unwrap());

    /// Manufacturer / brand byline.
    pub static BYLINE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("a#bylineInfo").unwrap());

    /// Specification table header cells.
    pub static SPEC_HEADER: LazyLock<Selector> = LazyLock::new(|| Selector::parse("th").unwrap());

    /// Header text of the ASIN row in the specification table.
    pub const ASIN_LABEL: &str = "ASIN";
}

/// Selectors for detecting error/captcha pages.
pub mod errors {
    use super::*;

    /// CAPTCHA form.
    pub static CAPTCHA: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            "form[action*='validateCaptcha'], \
             img[src*='captcha']",
        )
        .unwrap()
    });

    /// Dog page (Amazon's error page).
    pub static DOG_PAGE: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            "img[alt*='dog'], \
             .a-box-inner a[href='/ref=cs_503_link']",
        )
        .unwrap()
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_selectors_compile() {
        // Force evaluation of all lazy selectors to ensure they compile
        let _ = &*listing::RESULT;
        let _ = &*listing::PRODUCT_LINK;
        let _ = &*listing::NAME;
        let _ = &*listing::PRICE_WHOLE;
        let _ = &*listing::RATING;
        let _ = &*listing::REVIEW_COUNT;
        let _ = &*listing::REVIEW_COUNT_FALLBACK;
        let _ = &*detail::DESCRIPTION;
        let _ = &*detail::BYLINE;
        let _ = &*detail::SPEC_HEADER;
        let _ = &*errors::CAPTCHA;
        let _ = &*errors::DOG_PAGE;
    }

    #[test]
    fn test_basic_selector_matching() {
        let html = Html::parse_document(
            r#"<div data-component-type="s-search-result" data-asin="B123">
                <h2><a class="a-link-normal a-text-normal" href="/dp/B123">
                    <span class="a-size-medium a-color-base a-text-normal">Test Product</span>
                </a></h2>
            </div>"#,
        );

        let results: Vec<_> = html.select(&listing::RESULT).collect();
        assert_eq!(results.len(), 1);

        let link = results[0].select(&listing::PRODUCT_LINK).next().unwrap();
        assert_eq!(link.value().attr("href"), Some("/dp/B123"));
        assert!(results[0].select(&listing::NAME).next().is_some());
    }

    #[test]
    fn test_detail_selectors_need_matching_tag() {
        let html = Html::parse_document(
            r#"<span id="productDescription">not a div</span>
               <span id="bylineInfo">not a link</span>"#,
        );
        assert!(html.select(&detail::DESCRIPTION).next().is_none());
        assert!(html.select(&detail::BYLINE).next().is_none());
    }
}
