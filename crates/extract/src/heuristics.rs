// ABOUTME: Tunable heuristic tables: keyword vocabularies, selector cascades, and regex pattern lists.
// ABOUTME: Loaded from embedded JSON so the tables can be revised without touching the extraction algorithms.

//! Heuristic configuration for link discovery and field extraction.
//!
//! The keyword vocabulary, selector cascades, and regex pattern lists are
//! data, not logic: they are embedded as JSON and deserialized at load time.
//! Order within each list is significant: cascades are evaluated front to
//! back with early exit on the first qualifying result.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Embedded JSON containing the default heuristic tables.
const BUILTIN_HEURISTICS_JSON: &str = include_str!("../data/heuristics.json");

/// The full set of tunable tables driving discovery and extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Heuristics {
    /// Trip/package vocabulary matched against anchor text during discovery.
    pub package_keywords: Vec<String>,
    /// Path-indicator keywords matched against candidate URLs and raw hrefs.
    pub url_indicators: Vec<String>,
    /// Navigation-container selectors for the low-recall secondary pass.
    pub nav_selectors: Vec<String>,
    pub title_selectors: Vec<String>,
    pub description_selectors: Vec<String>,
    pub price_selectors: Vec<String>,
    /// Ordered currency patterns for the whole-document price fallback.
    /// Capture group 1 holds the numeric amount.
    pub price_patterns: Vec<String>,
    pub duration_selectors: Vec<String>,
    /// Ordered duration patterns; the whole match is returned verbatim.
    pub duration_patterns: Vec<String>,
    pub destination_selectors: Vec<String>,
    /// Patterns applied to the extracted title; capture group 1 is the place.
    pub destination_title_patterns: Vec<String>,
    pub itinerary_selectors: Vec<String>,
    /// Day-number patterns matched against heading-like elements.
    pub day_patterns: Vec<String>,
    pub inclusion_keywords: Vec<String>,
    pub exclusion_keywords: Vec<String>,
    pub highlight_keywords: Vec<String>,
    pub image_selectors: Vec<String>,
    /// User agents rotated by the HTTP fetcher.
    pub user_agents: Vec<String>,
}

impl Default for Heuristics {
    fn default() -> Self {
        load_builtin_heuristics()
    }
}

/// Loads the builtin heuristic tables from embedded JSON.
///
/// # Panics
///
/// Panics if the embedded JSON is malformed or cannot be deserialized.
pub fn load_builtin_heuristics() -> Heuristics {
    serde_json::from_str(BUILTIN_HEURISTICS_JSON).expect("failed to parse builtin heuristics")
}

/// Compiles a list of regex pattern strings, preserving order.
///
/// Invalid patterns are skipped with a warning rather than aborting: a bad
/// entry in a tunable table must not take down the whole cascade.
pub fn compile_patterns(patterns: &[String]) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|p| match Regex::new(p) {
            Ok(re) => Some(re),
            Err(e) => {
                tracing::warn!(pattern = %p, error = %e, "skipping invalid heuristic pattern");
                None
            }
        })
        .collect()
}
