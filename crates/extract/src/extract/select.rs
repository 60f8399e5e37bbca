// ABOUTME: Selector-cascade helpers shared by the per-field extractors.
// ABOUTME: Selectors are tried in order, first non-empty result wins, invalid selectors are skipped.

//! Selector-cascade primitives.
//!
//! Key behaviors:
//! - Selectors are tried in order; the first selector yielding a qualifying
//!   result wins.
//! - Text extraction joins inner text with spaces and normalizes whitespace.
//! - Empty strings are treated as no match.
//! - Invalid selectors are skipped silently: the tables are tunable data
//!   and one bad entry must not break the cascade.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

/// Normalizes whitespace in a string by collapsing runs of whitespace into single spaces.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Inner text of an element, whitespace-normalized.
pub fn element_text(el: &ElementRef) -> String {
    normalize_whitespace(&el.text().collect::<Vec<_>>().join(" "))
}

/// Extracts text from the first selector that yields a non-empty match.
pub fn first_text(doc: &Html, selectors: &[String]) -> Option<String> {
    for sel_str in selectors {
        let sel = match Selector::parse(sel_str) {
            Ok(s) => s,
            Err(_) => continue,
        };
        for el in doc.select(&sel) {
            let text = element_text(&el);
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    None
}

/// Extracts text from the first element, across the selector cascade, whose
/// text matches the qualifying pattern.
///
/// Unlike [`first_text`], a selector that matches elements without qualifying
/// text does not stop the cascade; every element of every selector is probed
/// until one qualifies.
pub fn first_text_matching(doc: &Html, selectors: &[String], qualifier: &Regex) -> Option<String> {
    for sel_str in selectors {
        let sel = match Selector::parse(sel_str) {
            Ok(s) => s,
            Err(_) => continue,
        };
        for el in doc.select(&sel) {
            let text = element_text(&el);
            if !text.is_empty() && qualifier.is_match(&text) {
                return Some(text);
            }
        }
    }
    None
}

/// Extracts the `content` attribute from the first matching meta tag.
pub fn meta_content(doc: &Html, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    for el in doc.select(&sel) {
        if let Some(content) = el.value().attr("content") {
            let trimmed = content.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
    }
    None
}

/// Concatenates the text of the first `n` elements matching a selector.
///
/// Returns `None` when the selector is invalid or matches nothing.
pub fn join_first_n(doc: &Html, selector: &str, n: usize) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    let joined = doc
        .select(&sel)
        .take(n)
        .map(|el| element_text(&el))
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}
