// ABOUTME: Page Fetcher collaborator: trait seam plus a reqwest-backed production implementation.
// ABOUTME: Soft-failure contract: a page that cannot be fetched yields None, never an error.

//! Page fetching.
//!
//! The pipeline consumes fetching through the [`PageFetcher`] trait: given a
//! URL it gets back rendered HTML or `None`. `None` is a soft failure; the
//! caller records it and moves on. Retry and backoff live entirely here, not
//! in the pipeline.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

use crate::error::ScrapeError;

/// The fetching seam between the pipeline and the network.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches a page and returns its HTML, or `None` on any failure.
    async fn fetch(&self, url: &str) -> Option<String>;
}

/// Production fetcher: plain HTTP GET with a rotating User-Agent and
/// bounded retries with exponential backoff.
pub struct HttpFetcher {
    client: reqwest::Client,
    user_agents: Vec<String>,
    max_retries: u32,
}

impl HttpFetcher {
    /// Builds a fetcher with the given timeout, UA vocabulary, and retry cap.
    pub fn new(
        timeout: Duration,
        user_agents: Vec<String>,
        max_retries: u32,
    ) -> Result<Self, ScrapeError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ScrapeError::fetch("", "BuildClient", Some(e.into())))?;
        Ok(Self {
            client,
            user_agents,
            max_retries: max_retries.max(1),
        })
    }

    /// Picks a random User-Agent from the vocabulary.
    fn pick_user_agent(&self) -> &str {
        if self.user_agents.is_empty() {
            return "tripharvest/0.1";
        }
        let idx = rand::thread_rng().gen_range(0..self.user_agents.len());
        &self.user_agents[idx]
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Option<String> {
        for attempt in 0..self.max_retries {
            if attempt > 0 {
                // 500ms, 1s, 2s, ...
                let backoff = Duration::from_millis(500 * (1 << (attempt - 1)));
                tokio::time::sleep(backoff).await;
            }

            let user_agent = self.pick_user_agent().to_string();
            tracing::debug!(url, attempt, "fetching page");

            let response = self
                .client
                .get(url)
                .header(reqwest::header::USER_AGENT, user_agent)
                .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
                .header(
                    reqwest::header::ACCEPT,
                    "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
                )
                .send()
                .await;

            match response {
                Ok(resp) => {
                    let status = resp.status();
                    if status.is_success() {
                        match resp.text().await {
                            Ok(body) => return Some(body),
                            Err(e) => {
                                tracing::warn!(url, error = %e, "failed to read response body");
                                continue;
                            }
                        }
                    }
                    // Retry on throttling and server errors; other statuses
                    // will not improve on retry.
                    if status.as_u16() == 429 || status.is_server_error() {
                        tracing::warn!(url, status = %status, "retryable status");
                        continue;
                    }
                    tracing::warn!(url, status = %status, "fetch failed");
                    return None;
                }
                Err(e) => {
                    tracing::warn!(url, error = %e, "transport error");
                    continue;
                }
            }
        }

        tracing::warn!(url, retries = self.max_retries, "giving up on page");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetcher_builds_with_defaults() {
        let fetcher = HttpFetcher::new(Duration::from_secs(30), vec![], 3);
        assert!(fetcher.is_ok());
    }

    #[test]
    fn empty_ua_vocabulary_falls_back() {
        let fetcher = HttpFetcher::new(Duration::from_secs(30), vec![], 3).unwrap();
        assert_eq!(fetcher.pick_user_agent(), "tripharvest/0.1");
    }

    #[test]
    fn user_agent_comes_from_vocabulary() {
        let agents = vec!["agent-a".to_string(), "agent-b".to_string()];
        let fetcher = HttpFetcher::new(Duration::from_secs(30), agents.clone(), 3).unwrap();
        for _ in 0..10 {
            assert!(agents.contains(&fetcher.pick_user_agent().to_string()));
        }
    }

    #[tokio::test]
    async fn unroutable_url_returns_none() {
        let fetcher = HttpFetcher::new(Duration::from_millis(200), vec![], 1).unwrap();
        let result = fetcher.fetch("http://127.0.0.1:1/nothing-here").await;
        assert!(result.is_none());
    }
}
