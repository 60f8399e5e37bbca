// ABOUTME: Duration extraction: selector cascade with a days/nights qualifier, then ordered regex fallback.
// ABOUTME: Regex-tier results return the whole matched substring verbatim (e.g. "5D4N").

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;

use super::select::first_text_matching;

/// Qualifier for selector-tier hits: a number attached to days/nights wording.
static DURATION_QUALIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\d+\s*(?:days?|nights?|D\s*\d*N)").expect("duration qualifier"));

/// Extracts a trip duration from the page.
///
/// Tier one probes duration-labelled selectors and returns the first element
/// text containing days/nights wording. Tier two runs the ordered pattern
/// list over the raw HTML; the first matching pattern's whole match is
/// returned trimmed, exactly as written in the source document.
pub fn extract_duration(
    doc: &Html,
    html: &str,
    selectors: &[String],
    patterns: &[Regex],
) -> Option<String> {
    if let Some(text) = first_text_matching(doc, selectors, &DURATION_QUALIFIER) {
        return Some(text);
    }

    for pattern in patterns {
        if let Some(m) = pattern.find(html) {
            let matched = m.as_str().trim();
            if !matched.is_empty() {
                return Some(matched.to_string());
            }
        }
    }

    None
}
