// ABOUTME: WebsiteExtractionPipeline: classify, discover, and extract packages for one website.
// ABOUTME: Strictly sequential and paced; all failures are captured into the record, never propagated.

//! Per-website orchestration.
//!
//! One website is processed fully before the next begins: classify the
//! landing page, discover candidate links, then fetch and extract each
//! candidate one at a time in discovery order, with a jittered pacing delay
//! between fetches. The delay is politeness toward the target site, not a
//! correctness mechanism.
//!
//! `run` never returns an error: transport failures and unexpected internal
//! failures are both captured into [`WebsiteRecord::error`], so a single
//! site's total failure can never prevent other sites from being processed.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use url::Url;

use crate::classify::classify;
use crate::discover::discover;
use crate::error::ScrapeError;
use crate::extract::PackageExtractor;
use crate::fetch::{HttpFetcher, PageFetcher};
use crate::heuristics::Heuristics;
use crate::options::{Options, PipelineBuilder};
use crate::record::WebsiteRecord;

/// Orchestrates extraction for one website at a time.
pub struct WebsiteExtractionPipeline<F: PageFetcher> {
    fetcher: F,
    extractor: PackageExtractor,
    heuristics: Arc<Heuristics>,
    opts: Options,
}

/// Prepends `https://` when the URL carries no scheme.
fn normalize_url(raw: &str) -> String {
    if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_string()
    } else {
        format!("https://{}", raw)
    }
}

impl WebsiteExtractionPipeline<HttpFetcher> {
    /// Returns a builder with default options.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }
}

impl<F: PageFetcher> WebsiteExtractionPipeline<F> {
    /// Creates a pipeline from its parts; most callers use [`Self::builder`].
    pub fn new(fetcher: F, heuristics: Heuristics, opts: Options) -> Self {
        let heuristics = Arc::new(heuristics);
        let extractor = PackageExtractor::new(Arc::clone(&heuristics));
        Self {
            fetcher,
            extractor,
            heuristics,
            opts,
        }
    }

    /// The fetcher collaborator this pipeline was built around.
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Processes one website and returns its record.
    ///
    /// Never fails: any error surfaces in the record's `error` field.
    pub async fn run(&self, landing_url: &str) -> WebsiteRecord {
        let normalized = normalize_url(landing_url.trim());
        match self.try_run(landing_url).await {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(url = %normalized, error = %e, "site processing failed");
                let domain = Url::parse(&normalized)
                    .ok()
                    .and_then(|u| u.host_str().map(str::to_string))
                    .unwrap_or_default();
                WebsiteRecord::with_error(normalized, domain, e.to_string())
            }
        }
    }

    async fn try_run(&self, landing_url: &str) -> Result<WebsiteRecord, ScrapeError> {
        let trimmed = landing_url.trim();
        if trimmed.is_empty() {
            tracing::warn!("empty URL provided");
            return Ok(WebsiteRecord::with_error("", "", "empty URL provided"));
        }

        let normalized = normalize_url(trimmed);
        let parsed = Url::parse(&normalized)
            .map_err(|e| ScrapeError::invalid_url(&normalized, "Run", Some(e.into())))?;
        let domain = parsed
            .host_str()
            .ok_or_else(|| ScrapeError::invalid_url(&normalized, "Run", None))?
            .to_string();

        let mut record = WebsiteRecord::new(normalized.clone(), domain.clone());

        tracing::info!(url = %normalized, "fetching landing page");
        let landing_html = match self.fetcher.fetch(&normalized).await {
            Some(html) => html,
            None => {
                tracing::warn!(url = %normalized, "could not fetch landing page");
                record.error = Some("could not fetch website content".to_string());
                return Ok(record);
            }
        };

        let site_type = classify(&landing_html, &domain);
        record.site_type = Some(site_type);
        tracing::info!(%domain, %site_type, "classified site");

        let candidates = discover(&landing_html, &normalized, &self.heuristics);
        tracing::info!(%domain, count = candidates.len(), "discovered candidate links");

        if candidates.is_empty() {
            // The landing page itself may be the package page.
            let package = self
                .extractor
                .extract(&landing_html, &normalized, site_type);
            if package.is_useful() {
                record.packages.push(package);
            }
            return Ok(record);
        }

        let cap = self.opts.package_cap();
        let total = candidates.len().min(cap);
        for (i, candidate) in candidates.iter().take(cap).enumerate() {
            tracing::info!(url = %candidate, n = i + 1, total, "extracting package page");
            if let Some(html) = self.fetcher.fetch(candidate).await {
                let package = self.extractor.extract(&html, candidate, site_type);
                if package.is_useful() {
                    record.packages.push(package);
                }
            }
            if i + 1 < total {
                self.pace().await;
            }
        }

        Ok(record)
    }

    /// Sleeps for a jittered interval drawn from the configured bounds.
    async fn pace(&self) {
        if !self.opts.pacing || self.opts.delay_max.is_zero() {
            return;
        }
        let min_ms = self.opts.delay_min.as_millis() as u64;
        let max_ms = self.opts.delay_max.as_millis() as u64;
        let jitter = {
            let mut rng = rand::thread_rng();
            rng.gen_range(min_ms..=max_ms.max(min_ms))
        };
        tracing::debug!(ms = jitter, "pacing delay");
        tokio::time::sleep(Duration::from_millis(jitter)).await;
    }
}
