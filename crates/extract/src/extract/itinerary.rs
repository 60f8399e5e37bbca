// ABOUTME: Day-wise itinerary extraction scoped to itinerary-labelled container sections.
// ABOUTME: Day headings are matched by pattern; the following sibling element supplies the description.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::select::element_text;
use crate::record::ItineraryDay;

/// Tags that qualify as a day-heading carrier inside an itinerary section.
const DAY_HEADING_SELECTOR: &str = "h3, h4, h5, strong, b";

/// Tags accepted as a description following a day heading.
const DESCRIPTION_TAGS: &[&str] = &["p", "div", "span"];

/// Text of the first element sibling after a day heading, when it is a
/// text-bearing tag; empty otherwise.
fn following_description(el: &ElementRef) -> String {
    for sibling in el.next_siblings() {
        if let Some(sib_el) = ElementRef::wrap(sibling) {
            if DESCRIPTION_TAGS.contains(&sib_el.value().name()) {
                return element_text(&sib_el);
            }
            return String::new();
        }
    }
    String::new()
}

/// Extracts a day-wise itinerary from the page.
///
/// Only itinerary-labelled containers are scanned; a page without such a
/// container yields an empty list, with no whole-document fallback. "Day N"
/// text elsewhere on a page is too often unrelated for a global scan to be
/// safe. Scanning stops after the first selector whose containers produce at
/// least one entry.
pub fn extract_itinerary(
    doc: &Html,
    selectors: &[String],
    day_patterns: &[Regex],
) -> Vec<ItineraryDay> {
    let heading_sel = match Selector::parse(DAY_HEADING_SELECTOR) {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    for sel_str in selectors {
        let sel = match Selector::parse(sel_str) {
            Ok(s) => s,
            Err(_) => continue,
        };

        let mut days = Vec::new();
        for section in doc.select(&sel) {
            for heading in section.select(&heading_sel) {
                let day_text = element_text(&heading);
                if day_text.is_empty() {
                    continue;
                }
                if day_patterns.iter().any(|p| p.is_match(&day_text)) {
                    days.push(ItineraryDay {
                        day: day_text,
                        description: following_description(&heading),
                    });
                }
            }
        }

        if !days.is_empty() {
            return days;
        }
    }

    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristics::{compile_patterns, load_builtin_heuristics};
    use pretty_assertions::assert_eq;

    fn extract(html: &str) -> Vec<ItineraryDay> {
        let h = load_builtin_heuristics();
        let patterns = compile_patterns(&h.day_patterns);
        let doc = Html::parse_document(html);
        extract_itinerary(&doc, &h.itinerary_selectors, &patterns)
    }

    #[test]
    fn extracts_day_headings_with_descriptions() {
        let html = r#"<html><body>
            <div class="itinerary">
                <h4>Day 1: Arrival</h4>
                <p>Airport pickup and hotel check-in.</p>
                <h4>Day 2: Sightseeing</h4>
                <p>Old town walking tour.</p>
            </div>
        </body></html>"#;
        let days = extract(html);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].day, "Day 1: Arrival");
        assert_eq!(days[0].description, "Airport pickup and hotel check-in.");
        assert_eq!(days[1].day, "Day 2: Sightseeing");
        assert_eq!(days[1].description, "Old town walking tour.");
    }

    #[test]
    fn ordinal_day_form_matches() {
        let html = r#"<html><body>
            <div class="tour-plan">
                <strong>1st Day</strong>
                <span>Drive to base camp.</span>
            </div>
        </body></html>"#;
        let days = extract(html);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].day, "1st Day");
        assert_eq!(days[0].description, "Drive to base camp.");
    }

    #[test]
    fn heading_without_text_sibling_gets_empty_description() {
        let html = r#"<html><body>
            <div class="itinerary">
                <h4>Day 1</h4>
                <table><tr><td>grid</td></tr></table>
            </div>
        </body></html>"#;
        let days = extract(html);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].description, "");
    }

    #[test]
    fn no_container_means_no_itinerary() {
        // "Day 3" appears in prose, but outside any itinerary container.
        let html = r#"<html><body>
            <p>On Day 3 we saw elephants.</p>
            <h4>Day 4 highlights</h4>
        </body></html>"#;
        assert!(extract(html).is_empty());
    }

    #[test]
    fn headings_without_day_pattern_are_ignored() {
        let html = r#"<html><body>
            <div class="itinerary">
                <h4>What to pack</h4>
                <p>Sunscreen.</p>
            </div>
        </body></html>"#;
        assert!(extract(html).is_empty());
    }

    #[test]
    fn stops_after_first_producing_selector() {
        // ".itinerary" produces entries; the ".schedule" container further
        // down must not contribute.
        let html = r#"<html><body>
            <div class="itinerary">
                <h4>Day 1</h4><p>Beach.</p>
            </div>
            <div class="schedule">
                <h4>Day 9</h4><p>Unrelated calendar.</p>
            </div>
        </body></html>"#;
        let days = extract(html);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].day, "Day 1");
    }
}
