use anyhow::Result;
use async_trait::async_trait;
use tracing::warn;

/// Fetches one search-result page.
///
/// The driver injects this so tests can script page bodies; the real
/// implementation is [`crate::scrapers::HttpFetcher`]. A failed fetch is
/// reported and skipped, it never aborts a run.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Hook invoked when a page fetch fails.
///
/// Stand-in for the mail alert the original workflow wanted; how (and
/// whether) the failure leaves the process is up to the implementation.
pub trait FailureNotifier: Send + Sync {
    fn page_failed(&self, page: u32, url: &str, error: &anyhow::Error);
}

/// Default notifier: writes the failure to the log and nothing else.
pub struct LogNotifier;

impl FailureNotifier for LogNotifier {
    fn page_failed(&self, page: u32, url: &str, error: &anyhow::Error) {
        warn!("fetch failed for page {} ({}): {:#}", page, url, error);
    }
}
