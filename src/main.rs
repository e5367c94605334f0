use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use immoradar::cli::{Cli, Commands};
use immoradar::export;
use immoradar::models::ListingType;
use immoradar::scrapers::driver::{self, RunOptions, RunReport};
use immoradar::scrapers::{HttpFetcher, LogNotifier};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scrape { search, out, raw_dir, delay_ms } => {
            let pages = search.pages;
            let query = search.into_query();
            let fetcher = HttpFetcher::new()?;
            let options = RunOptions { raw_dir, delay_ms };

            info!(
                "scraping {} pages of {} in {}/{}",
                pages,
                query.listing_type.url_segment(),
                query.region,
                query.city
            );
            let report = driver::run(&query, pages, &fetcher, &LogNotifier, &options).await?;
            summarize(&report);

            export::write_dataset(&out, &report.dataset, query.listing_type)?;
            info!("wrote {} records to {}", report.dataset.len(), out.display());
        }

        Commands::Reparse { dir, listing_type, out } => {
            let listing_type: ListingType = listing_type.into();

            info!("re-parsing saved pages in {}", dir.display());
            let report = driver::reparse_saved(&dir, listing_type).await?;
            summarize(&report);

            export::write_dataset(&out, &report.dataset, listing_type)?;
            info!("wrote {} records to {}", report.dataset.len(), out.display());
        }
    }

    Ok(())
}

fn summarize(report: &RunReport) {
    for stats in &report.pages {
        if !stats.fetched {
            warn!("page {}: no contribution (fetch/decode failed)", stats.page);
        } else if stats.ragged {
            warn!("page {}: {} records, columns were uneven", stats.page, stats.records);
        } else {
            info!("page {}: {} records", stats.page, stats.records);
        }
    }
    if report.failed_pages() > 0 || report.ragged_pages() > 0 {
        warn!(
            "{} of {} pages failed, {} had mismatched selectors",
            report.failed_pages(),
            report.pages.len(),
            report.ragged_pages()
        );
    }
}
