// ABOUTME: Destination extraction: labelled selectors, then title regex patterns, then URL path segments.
// ABOUTME: Title matches have trip-type suffixes stripped; URL fallback title-cases the first plausible segment.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;
use url::Url;

use super::select::first_text;

/// Trailing trip-type suffixes stripped from title-derived destinations.
static SUFFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s*(?:Tour|Trip|Package|Holiday)s?\s*$").expect("suffix pattern")
});

/// Path segments that never name a destination.
const NON_DESTINATION_SEGMENTS: &[&str] = &[
    "tour",
    "tours",
    "package",
    "packages",
    "trip",
    "trips",
    "destination",
    "destinations",
];

/// Title-cases a string: first letter of each word uppercased, rest lowered.
fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Derives a destination from the page title using place patterns.
fn from_title(title: &str, patterns: &[Regex]) -> Option<String> {
    for pattern in patterns {
        if let Some(caps) = pattern.captures(title) {
            if let Some(place) = caps.get(1) {
                let cleaned = SUFFIX_RE.replace(place.as_str().trim(), "").trim().to_string();
                if !cleaned.is_empty() {
                    return Some(cleaned);
                }
            }
        }
    }
    None
}

/// Derives a destination from the URL path.
///
/// Iterates path segments, skipping common non-destination tokens, and
/// returns the first alphabetic segment longer than three characters,
/// title-cased with dashes and underscores turned into spaces.
fn from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    for segment in parsed.path_segments()? {
        if segment.is_empty() || NON_DESTINATION_SEGMENTS.contains(&segment.to_lowercase().as_str())
        {
            continue;
        }
        let cleaned = title_case(&segment.replace(['-', '_'], " "));
        let letters_only: String = cleaned.chars().filter(|c| *c != ' ').collect();
        if cleaned.len() > 3 && !letters_only.is_empty() && letters_only.chars().all(|c| c.is_alphabetic()) {
            return Some(cleaned);
        }
    }
    None
}

/// Extracts a destination for the package.
///
/// Cascade: location-labelled selectors, then regex extraction from the
/// already-extracted title, then the URL path fallback.
pub fn extract_destination(
    doc: &Html,
    title: Option<&str>,
    url: &str,
    selectors: &[String],
    title_patterns: &[Regex],
) -> Option<String> {
    if let Some(text) = first_text(doc, selectors) {
        return Some(text);
    }

    if let Some(title) = title {
        if let Some(place) = from_title(title, title_patterns) {
            return Some(place);
        }
    }

    from_url(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristics::{compile_patterns, load_builtin_heuristics};
    use pretty_assertions::assert_eq;

    fn extract(html: &str, title: Option<&str>, url: &str) -> Option<String> {
        let h = load_builtin_heuristics();
        let patterns = compile_patterns(&h.destination_title_patterns);
        let doc = Html::parse_document(html);
        extract_destination(&doc, title, url, &h.destination_selectors, &patterns)
    }

    #[test]
    fn labelled_selector_wins() {
        let html = r#"<html><body>
            <span class="destination">Andaman Islands</span>
        </body></html>"#;
        assert_eq!(
            extract(html, Some("Trip to Goa"), "https://example.com/x"),
            Some("Andaman Islands".to_string())
        );
    }

    #[test]
    fn place_after_to_in_title() {
        let result = extract(
            "<html></html>",
            Some("7 Day Trip to Spiti Valley"),
            "https://example.com/x",
        );
        assert_eq!(result, Some("Spiti Valley".to_string()));
    }

    #[test]
    fn leading_place_with_tour_suffix() {
        let result = extract(
            "<html></html>",
            Some("Rajasthan Tour Package"),
            "https://example.com/x",
        );
        assert_eq!(result, Some("Rajasthan".to_string()));
    }

    #[test]
    fn url_fallback_skips_common_tokens() {
        let result = extract(
            "<html></html>",
            None,
            "https://example.com/tours/kerala-backwaters",
        );
        assert_eq!(result, Some("Kerala Backwaters".to_string()));
    }

    #[test]
    fn url_fallback_rejects_numeric_segments() {
        let result = extract("<html></html>", None, "https://example.com/packages/12345");
        assert_eq!(result, None);
    }

    #[test]
    fn url_fallback_rejects_short_segments() {
        let result = extract("<html></html>", None, "https://example.com/tours/goa");
        assert_eq!(result, None);
    }

    #[test]
    fn nothing_found_yields_none() {
        assert_eq!(extract("<html></html>", None, "https://example.com/"), None);
    }

    #[test]
    fn title_case_handles_underscores() {
        let result = extract(
            "<html></html>",
            None,
            "https://example.com/trips/himachal_pradesh",
        );
        assert_eq!(result, Some("Himachal Pradesh".to_string()));
    }
}
