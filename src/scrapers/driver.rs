use anyhow::{Context, Result};
use chrono::Local;
use scraper::Html;
use std::path::{Path, PathBuf};
use tokio::time::{sleep, Duration};
use tracing::{debug, info, warn};

use crate::models::{Dataset, ListingRecord, ListingType, PageStats};
use crate::scrapers::extract;
use crate::scrapers::traits::{FailureNotifier, PageFetcher};
use crate::scrapers::types::SearchQuery;
use crate::scrapers::url::build_page_url;

/// Run settings that are not part of the search itself.
#[derive(Debug, Default, Clone)]
pub struct RunOptions {
    /// Save every fetched page into this directory for later re-parsing.
    pub raw_dir: Option<PathBuf>,
    /// Pause between page fetches.
    pub delay_ms: u64,
}

/// Outcome of one run: the accumulated records plus per-page diagnostics.
#[derive(Debug)]
pub struct RunReport {
    pub dataset: Dataset,
    pub pages: Vec<PageStats>,
}

impl RunReport {
    pub fn failed_pages(&self) -> usize {
        self.pages.iter().filter(|s| !s.fetched).count()
    }

    pub fn ragged_pages(&self) -> usize {
        self.pages.iter().filter(|s| s.ragged).count()
    }
}

/// Walk result pages 1 through `page_count` in order, one at a time.
///
/// Page N+1 is not fetched before page N is fully processed. A failed
/// fetch goes to the notifier and is skipped; a page past the last real
/// result page simply contributes nothing. The run itself only fails on
/// broken plumbing (e.g. an unwritable raw-page directory is logged, not
/// fatal).
pub async fn run(
    query: &SearchQuery,
    page_count: u32,
    fetcher: &dyn PageFetcher,
    notifier: &dyn FailureNotifier,
    options: &RunOptions,
) -> Result<RunReport> {
    let run_stamp = Local::now().format("%Y%m%d_%H%M").to_string();
    let mut dataset = Dataset::new();
    let mut pages = Vec::with_capacity(page_count as usize);

    for page in 1..=page_count {
        let url = build_page_url(query, page);
        debug!("fetching page {}: {}", page, url);

        let body = match fetcher.fetch(&url).await {
            Ok(body) => body,
            Err(error) => {
                notifier.page_failed(page, &url, &error);
                pages.push(PageStats { page, fetched: false, records: 0, ragged: false });
                continue;
            }
        };

        if let Some(dir) = &options.raw_dir {
            if let Err(error) = save_raw_page(dir, &run_stamp, page, &body).await {
                warn!("could not save raw page {}: {:#}", page, error);
            }
        }

        let (records, ragged) = extract_page(&body, query.listing_type);
        if ragged {
            warn!("page {}: uneven field columns, rows padded with blanks", page);
        }
        pages.push(PageStats { page, fetched: true, records: records.len(), ragged });
        dataset.append_page(records);

        if options.delay_ms > 0 && page < page_count {
            sleep(Duration::from_millis(options.delay_ms)).await;
        }
    }

    info!("run finished: {} records from {} pages", dataset.len(), page_count);
    Ok(RunReport { dataset, pages })
}

/// Re-run extraction over previously saved result pages, in filename
/// order. A file that cannot be read or decoded is logged and skipped;
/// the remaining files still contribute.
pub async fn reparse_saved(dir: &Path, listing_type: ListingType) -> Result<RunReport> {
    let mut files = Vec::new();
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .with_context(|| format!("cannot read {}", dir.display()))?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) == Some("html") {
            files.push(path);
        }
    }
    // Saved filenames end in resultPage{N}; a plain lexicographic sort
    // would put page 10 between pages 1 and 2.
    files.sort_by_key(|path| (page_index(path), path.clone()));

    let mut dataset = Dataset::new();
    let mut pages = Vec::with_capacity(files.len());

    for (index, path) in files.iter().enumerate() {
        let page = index as u32 + 1;

        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(error) => {
                warn!("skipping {}: {}", path.display(), error);
                pages.push(PageStats { page, fetched: false, records: 0, ragged: false });
                continue;
            }
        };
        let body = match String::from_utf8(bytes) {
            Ok(body) => body,
            Err(error) => {
                warn!("skipping {}: not valid UTF-8 ({})", path.display(), error);
                pages.push(PageStats { page, fetched: false, records: 0, ragged: false });
                continue;
            }
        };

        let (records, ragged) = extract_page(&body, listing_type);
        if ragged {
            warn!("{}: uneven field columns, rows padded with blanks", path.display());
        }
        pages.push(PageStats { page, fetched: true, records: records.len(), ragged });
        dataset.append_page(records);
    }

    info!("re-parsed {} files into {} records", files.len(), dataset.len());
    Ok(RunReport { dataset, pages })
}

// Trailing digits of the file stem, i.e. the N of resultPage{N}. Files
// without one sort first, by name.
fn page_index(path: &Path) -> Option<u32> {
    let stem = path.file_stem()?.to_str()?;
    let end = stem.trim_end_matches(|c: char| !c.is_ascii_digit()).len();
    let start = stem[..end]
        .rfind(|c: char| !c.is_ascii_digit())
        .map_or(0, |i| i + 1);
    stem[start..end].parse().ok()
}

// Parses and drops the document in one scope; Html is not Send.
fn extract_page(body: &str, listing_type: ListingType) -> (Vec<ListingRecord>, bool) {
    let document = Html::parse_document(body);
    let columns = extract::extract_fields(&document, listing_type);
    let ragged = columns.is_ragged();
    (columns.into_records(), ragged)
}

async fn save_raw_page(dir: &Path, stamp: &str, page: u32, body: &str) -> Result<()> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("cannot create {}", dir.display()))?;
    let path = dir.join(format!("immoscout_{stamp}_resultPage{page}.html"));
    tokio::fs::write(&path, body)
        .await
        .with_context(|| format!("cannot write {}", path.display()))?;
    Ok(())
}
