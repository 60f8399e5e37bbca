// ABOUTME: ResultStore: domain-keyed accumulator for website records with JSON persistence.
// ABOUTME: Last-write-wins per domain; save_json pretty-prints UTF-8 and overwrites prior content.

//! Result accumulation and persistence.
//!
//! The store is an explicit, passed-in accumulator owned by the orchestrator,
//! not process-wide state. Records are keyed by domain; re-scraping the same
//! domain overwrites its prior record with no merge. The core treats
//! persistence as write-only: serialize the whole collection, overwrite the
//! file.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::ScrapeError;
use crate::record::WebsiteRecord;

/// Domain-keyed collection of website records.
#[derive(Debug, Default, Clone)]
pub struct ResultStore {
    records: BTreeMap<String, WebsiteRecord>,
}

impl ResultStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record under its domain, replacing any prior record.
    pub fn insert(&mut self, record: WebsiteRecord) {
        self.records.insert(record.domain.clone(), record);
    }

    /// Looks up a record by domain.
    pub fn get(&self, domain: &str) -> Option<&WebsiteRecord> {
        self.records.get(domain)
    }

    /// Iterates records in domain order.
    pub fn records(&self) -> impl Iterator<Item = &WebsiteRecord> {
        self.records.values()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no records are stored.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Serializes the collection as pretty-printed JSON to `path`,
    /// overwriting prior content. Non-ASCII characters are preserved as-is.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<(), ScrapeError> {
        let json = serde_json::to_string_pretty(&self.records)
            .map_err(|e| ScrapeError::store("SaveJson", Some(e.into())))?;
        fs::write(path.as_ref(), json)
            .map_err(|e| ScrapeError::store("SaveJson", Some(e.into())))?;
        tracing::info!(path = %path.as_ref().display(), records = self.len(), "results saved");
        Ok(())
    }

    /// Loads a previously saved collection from `path`.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ScrapeError> {
        let data = fs::read_to_string(path.as_ref())
            .map_err(|e| ScrapeError::store("LoadJson", Some(e.into())))?;
        let records: BTreeMap<String, WebsiteRecord> = serde_json::from_str(&data)
            .map_err(|e| ScrapeError::store("LoadJson", Some(e.into())))?;
        Ok(Self { records })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::PackageRecord;
    use pretty_assertions::assert_eq;

    fn record_for(domain: &str) -> WebsiteRecord {
        WebsiteRecord::new(format!("https://{}", domain), domain)
    }

    #[test]
    fn insert_keys_by_domain_last_write_wins() {
        let mut store = ResultStore::new();
        store.insert(record_for("example.com"));

        let mut second = record_for("example.com");
        second.packages.push(PackageRecord {
            url: "https://example.com/tours/goa".to_string(),
            title: Some("Goa".to_string()),
            ..Default::default()
        });
        store.insert(second);

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("example.com").unwrap().packages.len(), 1);
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("packages.json");

        let mut store = ResultStore::new();
        let mut record = record_for("example.com");
        record.packages.push(PackageRecord {
            url: "https://example.com/tours/goa".to_string(),
            title: Some("Goa Getaway".to_string()),
            price: Some("₹12499".to_string()),
            ..Default::default()
        });
        store.insert(record);
        store.save_json(&path).unwrap();

        let loaded = ResultStore::load_json(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        let rec = loaded.get("example.com").unwrap();
        assert_eq!(rec.packages[0].price.as_deref(), Some("₹12499"));
    }

    #[test]
    fn save_preserves_non_ascii() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("packages.json");

        let mut store = ResultStore::new();
        let mut record = record_for("example.com");
        record.packages.push(PackageRecord {
            url: "https://example.com/t".to_string(),
            title: Some("यात्रा".to_string()),
            price: Some("₹999".to_string()),
            ..Default::default()
        });
        store.insert(record);
        store.save_json(&path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("₹999"));
        assert!(raw.contains("यात्रा"));
    }

    #[test]
    fn save_overwrites_prior_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("packages.json");

        let mut store = ResultStore::new();
        store.insert(record_for("aaa.com"));
        store.insert(record_for("bbb.com"));
        store.save_json(&path).unwrap();

        let mut smaller = ResultStore::new();
        smaller.insert(record_for("ccc.com"));
        smaller.save_json(&path).unwrap();

        let loaded = ResultStore::load_json(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert!(loaded.get("ccc.com").is_some());
        assert!(loaded.get("aaa.com").is_none());
    }

    #[test]
    fn load_missing_file_is_a_store_error() {
        let err = ResultStore::load_json("/definitely/not/here.json").unwrap_err();
        assert!(err.is_store());
    }
}
