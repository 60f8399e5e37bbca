// ABOUTME: Image URL extraction from gallery and content containers.
// ABOUTME: Additive across selectors with src/data-src/data-lazy-src priority, data-URI skip, and a 10-image cap.

use scraper::{Html, Selector};
use url::Url;

/// Maximum images collected per package.
const MAX_IMAGES: usize = 10;

/// Attributes probed for an image source, in priority order.
const SRC_ATTRS: &[&str] = &["src", "data-src", "data-lazy-src"];

/// Extracts image URLs for the package.
///
/// Unlike the text fields, image extraction is additive: every selector in
/// the table contributes, up to the cap. Relative paths are resolved against
/// the page URL; inline data-URIs are skipped; duplicates (by resolved
/// absolute URL) are collapsed.
pub fn extract_images(doc: &Html, page_url: &str, selectors: &[String]) -> Vec<String> {
    let base = Url::parse(page_url).ok();
    let mut images: Vec<String> = Vec::new();

    for sel_str in selectors {
        let sel = match Selector::parse(sel_str) {
            Ok(s) => s,
            Err(_) => continue,
        };

        for img in doc.select(&sel).take(MAX_IMAGES) {
            let src = SRC_ATTRS
                .iter()
                .find_map(|attr| img.value().attr(attr))
                .map(str::trim)
                .unwrap_or("");
            if src.is_empty() || src.starts_with("data:") {
                continue;
            }

            let resolved = match &base {
                Some(b) => match b.join(src) {
                    Ok(u) => u.to_string(),
                    Err(_) => continue,
                },
                None => src.to_string(),
            };

            if !images.contains(&resolved) {
                images.push(resolved);
                if images.len() >= MAX_IMAGES {
                    return images;
                }
            }
        }
    }

    images
}
