// ABOUTME: PackageExtractor: assembles one PackageRecord from a package page via per-field cascades.
// ABOUTME: Each field is extracted independently; a miss leaves the field null/empty and never aborts the rest.

//! Per-page structured field extraction.
//!
//! Every field follows the same shape: an ordered list of strategies,
//! evaluated in sequence, first qualifying result wins. The strategies are
//! explicit functions driven by the tunable tables in
//! [`crate::heuristics::Heuristics`], not polymorphic dispatch.

pub mod destination;
pub mod duration;
pub mod images;
pub mod itinerary;
pub mod lists;
pub mod price;
pub mod select;

use std::sync::Arc;

use regex::Regex;
use scraper::Html;

use crate::heuristics::{compile_patterns, Heuristics};
use crate::record::{PackageRecord, SiteType};
use select::{first_text, join_first_n, meta_content};

/// Minimum length for a description to be considered substantial.
const MIN_DESCRIPTION_LEN: usize = 50;

/// Heading fallback when none of the title selectors match.
const ANY_HEADING: &str = "h1, h2, h3, h4, h5, h6";

/// Extracts structured package fields from arbitrary package-page HTML.
///
/// Construction compiles the regex pattern tables once; extraction itself is
/// pure and infallible: absence of a field is represented as `None` or an
/// empty list.
pub struct PackageExtractor {
    heuristics: Arc<Heuristics>,
    price_patterns: Vec<Regex>,
    duration_patterns: Vec<Regex>,
    destination_patterns: Vec<Regex>,
    day_patterns: Vec<Regex>,
}

impl PackageExtractor {
    /// Builds an extractor over the given heuristic tables.
    pub fn new(heuristics: Arc<Heuristics>) -> Self {
        let price_patterns = compile_patterns(&heuristics.price_patterns);
        let duration_patterns = compile_patterns(&heuristics.duration_patterns);
        let destination_patterns = compile_patterns(&heuristics.destination_title_patterns);
        let day_patterns = compile_patterns(&heuristics.day_patterns);
        Self {
            heuristics,
            price_patterns,
            duration_patterns,
            destination_patterns,
            day_patterns,
        }
    }

    /// Extracts a [`PackageRecord`] from one package page.
    ///
    /// The site type is carried as metadata only; the cascades do not branch
    /// on it.
    pub fn extract(&self, html: &str, url: &str, _site_type: SiteType) -> PackageRecord {
        let doc = Html::parse_document(html);
        let mut record = PackageRecord::new(url);

        record.title = self.extract_title(&doc);
        record.description = self.extract_description(&doc);
        record.price = price::extract_price(
            &doc,
            html,
            &self.heuristics.price_selectors,
            &self.price_patterns,
        );
        record.duration = duration::extract_duration(
            &doc,
            html,
            &self.heuristics.duration_selectors,
            &self.duration_patterns,
        );
        record.destination = destination::extract_destination(
            &doc,
            record.title.as_deref(),
            url,
            &self.heuristics.destination_selectors,
            &self.destination_patterns,
        );
        record.itinerary = itinerary::extract_itinerary(
            &doc,
            &self.heuristics.itinerary_selectors,
            &self.day_patterns,
        );
        record.inclusions = lists::extract_list_items(&doc, &self.heuristics.inclusion_keywords);
        record.exclusions = lists::extract_list_items(&doc, &self.heuristics.exclusion_keywords);
        record.highlights = lists::extract_list_items(&doc, &self.heuristics.highlight_keywords);
        record.images = images::extract_images(&doc, url, &self.heuristics.image_selectors);

        tracing::debug!(
            url,
            title = record.title.as_deref().unwrap_or(""),
            images = record.images.len(),
            "extracted package fields"
        );
        record
    }

    /// Title cascade: specific selectors first, then the first heading of
    /// any level anywhere in the document.
    fn extract_title(&self, doc: &Html) -> Option<String> {
        first_text(doc, &self.heuristics.title_selectors)
            .or_else(|| first_text(doc, &[ANY_HEADING.to_string()]))
    }

    /// Description cascade: meta description preferred; when absent or short,
    /// content selectors are probed, concatenating the first two matching
    /// elements. A cascade result must reach the length threshold; a short
    /// meta description is kept only when the cascade finds nothing better.
    fn extract_description(&self, doc: &Html) -> Option<String> {
        let meta = meta_content(doc, "meta[name=description]");
        if let Some(ref text) = meta {
            if text.len() >= MIN_DESCRIPTION_LEN {
                return meta;
            }
        }

        for selector in &self.heuristics.description_selectors {
            if let Some(text) = join_first_n(doc, selector, 2) {
                if text.len() >= MIN_DESCRIPTION_LEN {
                    return Some(text);
                }
            }
        }

        meta
    }
}
