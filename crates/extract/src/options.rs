// ABOUTME: Pipeline configuration: Options struct and fluent PipelineBuilder.
// ABOUTME: Defaults mirror polite-scraping settings: 30s timeout, 3 retries, 2-5s pacing jitter, 10-package cap.

use std::time::Duration;

use crate::error::ScrapeError;
use crate::fetch::{HttpFetcher, PageFetcher};
use crate::heuristics::{load_builtin_heuristics, Heuristics};
use crate::pipeline::WebsiteExtractionPipeline;

/// Hard ceiling on packages per website; the cap is a data-model invariant.
pub const MAX_PACKAGES_PER_WEBSITE: usize = 10;

/// Configuration options for the extraction pipeline.
#[derive(Debug, Clone)]
pub struct Options {
    pub timeout: Duration,
    pub max_retries: u32,
    pub max_packages: usize,
    /// Lower bound of the jittered pacing delay between package fetches.
    pub delay_min: Duration,
    /// Upper bound of the jittered pacing delay.
    pub delay_max: Duration,
    /// Disable to skip pacing delays entirely (tests, local fixtures).
    pub pacing: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_retries: 3,
            max_packages: MAX_PACKAGES_PER_WEBSITE,
            delay_min: Duration::from_secs(2),
            delay_max: Duration::from_secs(5),
            pacing: true,
        }
    }
}

impl Options {
    /// Effective per-site package cap, clamped to the invariant ceiling.
    pub fn package_cap(&self) -> usize {
        self.max_packages.min(MAX_PACKAGES_PER_WEBSITE)
    }
}

/// Builder for constructing pipelines with custom configuration.
#[derive(Debug, Clone, Default)]
pub struct PipelineBuilder {
    opts: Options,
    heuristics: Option<Heuristics>,
}

impl PipelineBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.opts.timeout = timeout;
        self
    }

    /// Set the per-page retry cap.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.opts.max_retries = retries;
        self
    }

    /// Set the per-site package cap (clamped to 10).
    pub fn max_packages(mut self, cap: usize) -> Self {
        self.opts.max_packages = cap;
        self
    }

    /// Set the pacing-delay jitter bounds.
    pub fn delay(mut self, min: Duration, max: Duration) -> Self {
        self.opts.delay_min = min;
        self.opts.delay_max = max.max(min);
        self
    }

    /// Enable or disable pacing delays.
    pub fn pacing(mut self, pacing: bool) -> Self {
        self.opts.pacing = pacing;
        self
    }

    /// Replace the builtin heuristic tables.
    pub fn heuristics(mut self, heuristics: Heuristics) -> Self {
        self.heuristics = Some(heuristics);
        self
    }

    /// Build a pipeline with the production HTTP fetcher.
    pub fn build(self) -> Result<WebsiteExtractionPipeline<HttpFetcher>, ScrapeError> {
        let heuristics = self.heuristics.unwrap_or_else(load_builtin_heuristics);
        let fetcher = HttpFetcher::new(
            self.opts.timeout,
            heuristics.user_agents.clone(),
            self.opts.max_retries,
        )?;
        Ok(WebsiteExtractionPipeline::new(fetcher, heuristics, self.opts))
    }

    /// Build a pipeline around a caller-supplied fetcher.
    pub fn build_with_fetcher<F: PageFetcher>(self, fetcher: F) -> WebsiteExtractionPipeline<F> {
        let heuristics = self.heuristics.unwrap_or_else(load_builtin_heuristics);
        WebsiteExtractionPipeline::new(fetcher, heuristics, self.opts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_are_polite() {
        let opts = Options::default();
        assert_eq!(opts.timeout, Duration::from_secs(30));
        assert_eq!(opts.max_retries, 3);
        assert_eq!(opts.max_packages, 10);
        assert!(opts.pacing);
    }

    #[test]
    fn package_cap_is_clamped_to_ten() {
        let opts = Options {
            max_packages: 25,
            ..Default::default()
        };
        assert_eq!(opts.package_cap(), 10);

        let opts = Options {
            max_packages: 3,
            ..Default::default()
        };
        assert_eq!(opts.package_cap(), 3);
    }

    #[test]
    fn delay_upper_bound_never_below_lower() {
        let builder = PipelineBuilder::new().delay(Duration::from_secs(4), Duration::from_secs(1));
        assert_eq!(builder.opts.delay_min, Duration::from_secs(4));
        assert_eq!(builder.opts.delay_max, Duration::from_secs(4));
    }
}
