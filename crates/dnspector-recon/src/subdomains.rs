//! Passive subdomain aggregation.
//!
//! Every source is fetched on its own task. Results flow back to the caller's
//! task through a [`JoinSet`] and are merged there, so no set is shared
//! between tasks.

use std::collections::BTreeSet;
use std::sync::Arc;

use dnspector_client::{default_sources, HttpFetcher, PassiveClient};
use dnspector_core::{validate_domain, DnspectorError, SourceDescriptor, SourceReport};
use regex::{Regex, RegexBuilder};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::error::{ReconError, ReconResult};

/// Progress notification sent after each source completes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumerationProgress {
    /// Source that just finished
    pub source: String,
    /// Sources finished so far
    pub completed: usize,
    /// Total sources
    pub total: usize,
    /// Names this source produced
    pub found: usize,
    /// Size of the merged set so far
    pub unique: usize,
    /// Failure reason if the source contributed nothing
    pub error: Option<String>,
}

/// Merged result of an enumeration run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enumeration {
    /// Unique subdomains, sorted
    pub subdomains: BTreeSet<String>,
    /// Per-source contribution in completion order
    pub sources: Vec<SourceReport>,
}

/// Queries every passive source concurrently and unions the results
pub struct SubdomainAggregator<F> {
    fetcher: Arc<F>,
    sources: Vec<SourceDescriptor>,
}

impl SubdomainAggregator<PassiveClient> {
    /// Aggregator over the built-in sources with a default HTTP client
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(PassiveClient::new(), default_sources())
    }
}

impl<F: HttpFetcher + 'static> SubdomainAggregator<F> {
    /// Create an aggregator from a fetcher and a source table
    pub fn new(fetcher: F, sources: Vec<SourceDescriptor>) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            sources,
        }
    }

    /// Configured sources
    pub fn sources(&self) -> &[SourceDescriptor] {
        &self.sources
    }

    /// Collect subdomains of `domain` from all sources
    pub async fn enumerate(&self, domain: &str) -> ReconResult<BTreeSet<String>> {
        Ok(self.enumerate_with_progress(domain, |_| {}).await?.subdomains)
    }

    /// Collect subdomains, reporting to `on_progress` after each source.
    ///
    /// Source failures are reported and logged but never fail the run.
    /// Dropping the returned future aborts any fetch still in flight.
    pub async fn enumerate_with_progress<P>(
        &self,
        domain: &str,
        mut on_progress: P,
    ) -> ReconResult<Enumeration>
    where
        P: FnMut(&EnumerationProgress),
    {
        if !validate_domain(domain) {
            return Err(ReconError::InvalidDomain(domain.to_string()));
        }
        let pattern = Arc::new(subdomain_pattern(domain));

        let mut tasks = JoinSet::new();
        for source in &self.sources {
            let fetcher = Arc::clone(&self.fetcher);
            let pattern = Arc::clone(&pattern);
            let name = source.name.clone();
            let url = source.url_for(domain);

            tasks.spawn(async move {
                debug!(source = %name, url = %url, "querying passive source");
                let result = fetcher
                    .fetch(&url)
                    .await
                    .map(|body| extract_with(&pattern, &body));
                (name, result)
            });
        }

        let total = self.sources.len();
        let mut merged = Enumeration::default();

        while let Some(joined) = tasks.join_next().await {
            let (source, result) = match joined {
                Ok(pair) => pair,
                Err(e) => {
                    warn!(error = %e, "source task failed");
                    ("unknown".to_string(), Err(DnspectorError::Internal(e.to_string())))
                }
            };

            let report = match result {
                Ok(found) => {
                    debug!(source = %source, found = found.len(), "source completed");
                    let report = SourceReport {
                        source,
                        found: found.len(),
                        error: None,
                    };
                    merged.subdomains.extend(found);
                    report
                }
                Err(e) => {
                    info!(source = %source, error = %e, "source unavailable");
                    SourceReport {
                        source,
                        found: 0,
                        error: Some(e.to_string()),
                    }
                }
            };

            on_progress(&EnumerationProgress {
                source: report.source.clone(),
                completed: merged.sources.len() + 1,
                total,
                found: report.found,
                unique: merged.subdomains.len(),
                error: report.error.clone(),
            });
            merged.sources.push(report);
        }

        Ok(merged)
    }
}

/// Build the extraction pattern for `domain`.
///
/// Matches a single label directly under the target, with the domain text
/// escaped so its dots are literal.
fn subdomain_pattern(domain: &str) -> Regex {
    let pattern = format!(
        r"[A-Za-z0-9_](?:[A-Za-z0-9_-]*[A-Za-z0-9_])?\.{}\b",
        regex::escape(domain)
    );
    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .expect("escaped domain is a valid pattern")
}

fn extract_with(pattern: &Regex, body: &str) -> BTreeSet<String> {
    pattern
        .find_iter(body)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// Extract subdomain names of `domain` from arbitrary text
#[must_use]
pub fn extract_subdomains(body: &str, domain: &str) -> BTreeSet<String> {
    extract_with(&subdomain_pattern(domain), body)
}
