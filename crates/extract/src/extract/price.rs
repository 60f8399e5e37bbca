// ABOUTME: Price extraction: selector cascade with a currency qualifier, then whole-document regex fallback.
// ABOUTME: Regex-tier matches are normalized to a ₹-prefixed digit string regardless of source currency.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;

use super::select::first_text_matching;

/// Qualifier for selector-tier hits: currency symbol plus digits.
static CURRENCY_QUALIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[₹$€£]\s*\d+|Rs\.?\s*\d+|\d+\s*(?:INR|USD|EUR)").expect("currency qualifier")
});

/// Normalizes a captured amount to a `₹<digits>` string.
///
/// Commas are stripped and only the leading digit run is kept, so
/// "12,499" becomes "₹12499" and "12499.50" becomes "₹12499".
///
/// NOTE: the currency symbol of the matched text is deliberately not
/// preserved; a matched "$120" also becomes "₹120". This mirrors the
/// upstream behavior. Revisit if per-currency output is ever needed.
fn normalize_amount(amount: &str) -> Option<String> {
    let stripped: String = amount.chars().filter(|c| *c != ',').collect();
    let digits: String = stripped.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        None
    } else {
        Some(format!("₹{}", digits))
    }
}

/// Extracts a price from the page.
///
/// Tier one probes the price-labelled selector cascade and returns the first
/// element text containing a currency-plus-digits pattern, verbatim. Tier two
/// searches the entire raw HTML with the ordered currency pattern list; the
/// first pattern's first match wins and is normalized to `₹<digits>`.
pub fn extract_price(
    doc: &Html,
    html: &str,
    selectors: &[String],
    patterns: &[Regex],
) -> Option<String> {
    if let Some(text) = first_text_matching(doc, selectors, &CURRENCY_QUALIFIER) {
        return Some(text);
    }

    for pattern in patterns {
        if let Some(caps) = pattern.captures(html) {
            if let Some(amount) = caps.get(1) {
                if let Some(normalized) = normalize_amount(amount.as_str()) {
                    return Some(normalized);
                }
            }
        }
    }

    None
}
