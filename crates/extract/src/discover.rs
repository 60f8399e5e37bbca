// ABOUTME: Package-link discovery on a site's landing page via keyword-matched anchors.
// ABOUTME: Same-host filtering, URL/text keyword tests, nav secondary pass, sorted dedup output.

//! Candidate package-link discovery.
//!
//! Scans every anchor on the landing page, resolves hrefs against the base
//! URL, and keeps same-host links whose URL path or visible text suggests a
//! travel-package detail page. When direct matches are scarce, a secondary
//! pass restricted to navigation containers raises recall on minimal markup
//! without over-triggering on prose links.
//!
//! The output is deduplicated and sorted lexically. The sort is a determinism
//! contract (identical input yields identical iteration order across runs),
//! not a relevance ranking.

use std::collections::BTreeSet;

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::heuristics::Heuristics;

/// Hrefs with these prefixes can never lead to a package page.
const SKIP_PREFIXES: &[&str] = &["#", "mailto:", "tel:", "javascript:", "whatsapp:"];

/// Resolves an href against the base URL, keeping only same-host HTTP links.
fn resolve_same_host(base: &Url, href: &str) -> Option<Url> {
    let resolved = base.join(href).ok()?;
    match resolved.scheme() {
        "http" | "https" => {}
        _ => return None,
    }
    if resolved.host_str() != base.host_str() {
        return None;
    }
    Some(resolved)
}

/// Visible anchor text, lowercased with whitespace collapsed.
fn anchor_text(el: &ElementRef) -> String {
    el.text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Discovers candidate package-page URLs on a landing page.
///
/// Never fails; returns an empty list when nothing qualifies or the base URL
/// is unparseable. The result contains no duplicates, no cross-host links,
/// and is sorted lexically.
pub fn discover(html: &str, base_url: &str, heuristics: &Heuristics) -> Vec<String> {
    let base = match Url::parse(base_url) {
        Ok(u) => u,
        Err(_) => return Vec::new(),
    };

    let doc = Html::parse_document(html);
    let mut candidates: BTreeSet<String> = BTreeSet::new();

    let anchor_sel = match Selector::parse("a[href]") {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    for el in doc.select(&anchor_sel) {
        let href = el.value().attr("href").unwrap_or("").trim();
        if href.is_empty() || SKIP_PREFIXES.iter().any(|p| href.starts_with(p)) {
            continue;
        }

        let resolved = match resolve_same_host(&base, href) {
            Some(u) => u,
            None => continue,
        };

        let url_lower = resolved.as_str().to_lowercase();
        let href_lower = href.to_lowercase();

        // Direct package indicators in the URL or raw href.
        if heuristics
            .url_indicators
            .iter()
            .any(|ind| url_lower.contains(ind) || href_lower.contains(ind))
        {
            candidates.insert(resolved.into());
            continue;
        }

        // Trip/package vocabulary in the visible anchor text.
        let text = anchor_text(&el);
        if heuristics.package_keywords.iter().any(|kw| text.contains(kw)) {
            candidates.insert(resolved.into());
        }
    }

    // Secondary pass over navigation containers when direct matches are
    // scarce. Only the text-keyword test applies here.
    if candidates.len() < 3 {
        for nav_sel in &heuristics.nav_selectors {
            let sel = match Selector::parse(nav_sel) {
                Ok(s) => s,
                Err(_) => continue,
            };
            for el in doc.select(&sel) {
                let href = el.value().attr("href").unwrap_or("").trim();
                if href.is_empty() || SKIP_PREFIXES.iter().any(|p| href.starts_with(p)) {
                    continue;
                }
                let text = anchor_text(&el);
                if !heuristics.package_keywords.iter().any(|kw| text.contains(kw)) {
                    continue;
                }
                if let Some(resolved) = resolve_same_host(&base, href) {
                    candidates.insert(resolved.into());
                }
            }
        }
    }

    candidates.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristics::load_builtin_heuristics;
    use pretty_assertions::assert_eq;

    fn discover_with_builtin(html: &str, base: &str) -> Vec<String> {
        let heuristics = load_builtin_heuristics();
        discover(html, base, &heuristics)
    }

    #[test]
    fn finds_links_with_url_indicators() {
        let html = r#"<html><body>
            <a href="/tours/goa-beach">Goa</a>
            <a href="/about-us">About</a>
            <a href="/packages/kerala">Kerala</a>
        </body></html>"#;
        let links = discover_with_builtin(html, "https://example.com");
        assert_eq!(
            links,
            vec![
                "https://example.com/packages/kerala",
                "https://example.com/tours/goa-beach"
            ]
        );
    }

    #[test]
    fn finds_links_by_anchor_text_keywords() {
        let html = r#"<html><body>
            <a href="/offers/summer">Summer Holiday Specials</a>
            <a href="/contact">Contact</a>
        </body></html>"#;
        let links = discover_with_builtin(html, "https://example.com");
        assert_eq!(links, vec!["https://example.com/offers/summer"]);
    }

    #[test]
    fn never_returns_cross_host_links() {
        let html = r#"<html><body>
            <a href="https://other.com/tours/goa">Goa tour</a>
            <a href="https://example.com/tours/goa">Goa tour</a>
        </body></html>"#;
        let links = discover_with_builtin(html, "https://example.com");
        assert_eq!(links, vec!["https://example.com/tours/goa"]);
        assert!(links.iter().all(|l| l.starts_with("https://example.com")));
    }

    #[test]
    fn skips_fragment_and_messaging_schemes() {
        let html = r##"<html><body>
            <a href="#itinerary">Itinerary</a>
            <a href="mailto:hi@example.com">package enquiries</a>
            <a href="tel:+911234567890">trip hotline</a>
            <a href="javascript:void(0)">tour popup</a>
            <a href="whatsapp:send?text=tour">tour chat</a>
        </body></html>"##;
        let links = discover_with_builtin(html, "https://example.com");
        assert!(links.is_empty());
    }

    #[test]
    fn output_is_deduplicated_and_sorted() {
        let html = r#"<html><body>
            <a href="/tours/zanskar">Zanskar</a>
            <a href="/tours/alleppey">Alleppey</a>
            <a href="/tours/zanskar">Zanskar again</a>
        </body></html>"#;
        let links = discover_with_builtin(html, "https://example.com");
        assert_eq!(
            links,
            vec![
                "https://example.com/tours/alleppey",
                "https://example.com/tours/zanskar"
            ]
        );
        let mut sorted = links.clone();
        sorted.sort();
        assert_eq!(links, sorted);
    }

    #[test]
    fn menu_links_with_keyword_text_are_discovered() {
        // No URL indicator in the href; the link text carries the vocabulary.
        let html = r#"<html><body>
            <nav>
                <a href="/destinations-menu">Our Holiday Packages</a>
                <a href="/blog">Blog</a>
            </nav>
            <a href="/careers">Careers</a>
        </body></html>"#;
        let links = discover_with_builtin(html, "https://example.com");
        assert!(links.contains(&"https://example.com/destinations-menu".to_string()));
        assert!(!links.contains(&"https://example.com/blog".to_string()));
    }

    #[test]
    fn non_keyword_nav_links_are_never_added() {
        let html = r#"<html><body>
            <a href="/tours/a">A</a>
            <a href="/tours/b">B</a>
            <nav><a href="/plain-page">Seasonal deals</a></nav>
        </body></html>"#;
        let links = discover_with_builtin(html, "https://example.com");
        assert!(!links.contains(&"https://example.com/plain-page".to_string()));
        assert_eq!(links.len(), 2);
    }

    #[test]
    fn empty_page_yields_empty_list() {
        assert!(discover_with_builtin("<html></html>", "https://example.com").is_empty());
    }

    #[test]
    fn unparseable_base_url_yields_empty_list() {
        assert!(discover_with_builtin("<a href='/tours/x'>x</a>", "not a url").is_empty());
    }
}
