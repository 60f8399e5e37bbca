// ABOUTME: Main library entry point for the tripharvest travel-package extraction core.
// ABOUTME: Re-exports the public API: pipeline, extractor, classifier, discoverer, records, store.

//! tripharvest - structured travel-package extraction from arbitrary
//! travel-agency marketing pages.
//!
//! The crate turns unstructured HTML into [`WebsiteRecord`]s: it classifies
//! a site's platform, discovers candidate package-detail links on the
//! landing page, and extracts structured fields (title, price, duration,
//! destination, itinerary, inclusions, images) from each package page via
//! ordered heuristic cascades with graceful degradation to nulls.
//!
//! # Example
//!
//! ```no_run
//! use tripharvest_extract::WebsiteExtractionPipeline;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pipeline = WebsiteExtractionPipeline::builder().build()?;
//!     let record = pipeline.run("https://www.example-travel.in").await;
//!     println!("{} packages from {}", record.packages.len(), record.domain);
//!     Ok(())
//! }
//! ```

pub mod classify;
pub mod discover;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod heuristics;
pub mod options;
pub mod pipeline;
pub mod record;
pub mod store;

pub use crate::classify::classify;
pub use crate::discover::discover;
pub use crate::error::{ErrorCode, ScrapeError};
pub use crate::extract::PackageExtractor;
pub use crate::fetch::{HttpFetcher, PageFetcher};
pub use crate::heuristics::{load_builtin_heuristics, Heuristics};
pub use crate::options::{Options, PipelineBuilder, MAX_PACKAGES_PER_WEBSITE};
pub use crate::pipeline::WebsiteExtractionPipeline;
pub use crate::record::{ItineraryDay, PackageRecord, SiteType, WebsiteRecord};
pub use crate::store::ResultStore;
