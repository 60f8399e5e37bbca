// ABOUTME: Site platform classification from raw HTML and domain markers.
// ABOUTME: Ordered marker checks with early return; falls back to SiteType::Custom.

//! Site-type classification.
//!
//! Classification is a pure function over one HTML document: ordered checks,
//! first match wins. Matching is case-insensitive substring search over the
//! raw document plus a generator meta-tag lookup. There is no confidence
//! scoring; presence of any marker is sufficient.

use scraper::{Html, Selector};

use crate::record::SiteType;

/// Returns the content of the `<meta name="generator">` tag, lowercased.
fn generator_meta(doc: &Html) -> Option<String> {
    let sel = Selector::parse("meta[name=generator]").ok()?;
    for el in doc.select(&sel) {
        if let Some(content) = el.value().attr("content") {
            let trimmed = content.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_lowercase());
            }
        }
    }
    None
}

/// Classifies a site from its landing-page HTML and domain.
///
/// Checks are mutually exclusive by early return, so a document matching two
/// markers is classified by whichever check comes first. Never fails; any
/// unrecognized markup is `Custom`.
pub fn classify(html: &str, domain: &str) -> SiteType {
    let _ = domain;
    let html_lower = html.to_lowercase();
    let doc = Html::parse_document(html);
    let generator = generator_meta(&doc).unwrap_or_default();

    if generator.contains("wordpress")
        || html_lower.contains("wp-content")
        || html_lower.contains("wordpress")
    {
        return SiteType::Wordpress;
    }

    if html_lower.contains("wix.com") || generator.contains("wix") {
        return SiteType::Wix;
    }

    if html_lower.contains("shopify") || generator.contains("shopify") {
        return SiteType::Shopify;
    }

    if html_lower.contains("squarespace") || generator.contains("squarespace") {
        return SiteType::Squarespace;
    }

    if html_lower.contains("bookmytour") || html_lower.contains("tourradar") {
        return SiteType::TravelPlatform;
    }

    SiteType::Custom
}
