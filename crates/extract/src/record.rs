// ABOUTME: Data model for scraped travel packages: WebsiteRecord, PackageRecord, ItineraryDay.
// ABOUTME: Includes SiteType platform classification and usefulness predicates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Coarse platform classification for a scraped site.
///
/// Used only as extracted metadata, not as a control-flow switch for the
/// extraction cascades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SiteType {
    Wordpress,
    Wix,
    Shopify,
    Squarespace,
    TravelPlatform,
    #[default]
    Custom,
}

impl std::fmt::Display for SiteType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SiteType::Wordpress => "wordpress",
            SiteType::Wix => "wix",
            SiteType::Shopify => "shopify",
            SiteType::Squarespace => "squarespace",
            SiteType::TravelPlatform => "travel_platform",
            SiteType::Custom => "custom",
        };
        write!(f, "{}", s)
    }
}

/// One day of a package itinerary: the day heading and its description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItineraryDay {
    pub day: String,
    pub description: String,
}

/// A single travel package extracted from one page.
///
/// Every field except `url` is optional; absence is an expected outcome for
/// heterogeneous sites, never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PackageRecord {
    pub url: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub destination: Option<String>,
    pub duration: Option<String>,
    pub price: Option<String>,
    pub inclusions: Vec<String>,
    pub exclusions: Vec<String>,
    pub itinerary: Vec<ItineraryDay>,
    pub images: Vec<String>,
    pub highlights: Vec<String>,
}

impl PackageRecord {
    /// Creates an empty record for the given page URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// A record is useful only if it carries a title or a description.
    /// Useless records are discarded by the pipeline before assembly.
    pub fn is_useful(&self) -> bool {
        self.title.as_ref().map_or(false, |t| !t.is_empty())
            || self.description.as_ref().map_or(false, |d| !d.is_empty())
    }
}

/// The result of processing one website: metadata plus its extracted packages.
///
/// Created fresh per pipeline invocation, fully populated synchronously, and
/// never mutated after being returned. Keyed by `domain` in the persisted
/// result collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebsiteRecord {
    pub url: String,
    pub domain: String,
    pub scraped_at: DateTime<Utc>,
    pub site_type: Option<SiteType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub packages: Vec<PackageRecord>,
    pub error: Option<String>,
}

impl WebsiteRecord {
    /// Creates an empty record for a site, stamped with the current time.
    pub fn new(url: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            domain: domain.into(),
            scraped_at: Utc::now(),
            site_type: None,
            company_name: None,
            category: None,
            packages: Vec::new(),
            error: None,
        }
    }

    /// Creates a record that only carries an error message.
    pub fn with_error(
        url: impl Into<String>,
        domain: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        let mut record = Self::new(url, domain);
        record.error = Some(error.into());
        record
    }

    /// Returns true if the site yielded no packages.
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}
