// ABOUTME: Keyword-driven list extraction for inclusions, exclusions, and highlights.
// ABOUTME: Generates selector variants per keyword; first section yielding any items wins.

use scraper::{ElementRef, Html, Selector};

use super::select::element_text;

/// Maximum list items collected per package field.
const MAX_ITEMS: usize = 10;

/// Minimum text length for a list item to count.
const MIN_ITEM_LEN: usize = 6;

/// Collects list-item or paragraph children near a matched section.
///
/// When the section is itself a heading, its parent becomes the scope so the
/// list that follows the heading is picked up.
fn collect_items(section: &ElementRef) -> Vec<String> {
    let scope = if matches!(section.value().name(), "h3" | "h4" | "h5") {
        section
            .parent()
            .and_then(ElementRef::wrap)
            .unwrap_or(*section)
    } else {
        *section
    };

    let item_sel = match Selector::parse("li, p") {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    let mut items = Vec::new();
    for item in scope.select(&item_sel).take(MAX_ITEMS) {
        let text = element_text(&item);
        if text.len() >= MIN_ITEM_LEN && !items.contains(&text) {
            items.push(text);
        }
    }
    items
}

/// Extracts list items (inclusions, exclusions, highlights) for a keyword set.
///
/// For each keyword, selector variants are probed in order: class, id,
/// attribute-contains, then headings whose text contains the keyword. The
/// first section producing any items ends the search; remaining variants
/// are not tried once a non-empty result exists. Returns an empty list when
/// nothing matches.
pub fn extract_list_items(doc: &Html, keywords: &[String]) -> Vec<String> {
    for keyword in keywords {
        let variants = [
            format!(".{}", keyword),
            format!("#{}", keyword),
            format!("[class*=\"{}\"]", keyword),
        ];

        for variant in &variants {
            // Keywords with spaces produce unparseable class/id selectors;
            // those variants are skipped, not errors.
            let sel = match Selector::parse(variant) {
                Ok(s) => s,
                Err(_) => continue,
            };
            for section in doc.select(&sel) {
                let items = collect_items(&section);
                if !items.is_empty() {
                    return items;
                }
            }
        }

        // Heading-text-contains variant, done by scanning since CSS has no
        // :contains().
        let heading_sel = match Selector::parse("h3, h4") {
            Ok(s) => s,
            Err(_) => continue,
        };
        let keyword_lower = keyword.to_lowercase();
        for heading in doc.select(&heading_sel) {
            if element_text(&heading).to_lowercase().contains(&keyword_lower) {
                let items = collect_items(&heading);
                if !items.is_empty() {
                    return items;
                }
            }
        }
    }

    Vec::new()
}
