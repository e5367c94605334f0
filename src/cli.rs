use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::models::ListingType;
use crate::scrapers::types::{RangeFilter, SearchQuery};

#[derive(Parser, Debug)]
#[command(
    name = "immoradar",
    about = "Scrape ImmobilienScout24 search-result pages into a CSV file"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch search-result pages and export the listings as CSV
    Scrape {
        #[command(flatten)]
        search: SearchArgs,

        /// Output CSV path
        #[arg(long, default_value = "webData.csv")]
        out: PathBuf,

        /// Save every fetched page into this directory
        #[arg(long)]
        raw_dir: Option<PathBuf>,

        /// Pause between page fetches, in milliseconds
        #[arg(long, default_value_t = 250)]
        delay_ms: u64,
    },

    /// Re-run extraction over previously saved result pages
    Reparse {
        /// Directory containing saved .html result pages
        dir: PathBuf,

        #[arg(long, value_enum, default_value = "rental")]
        listing_type: ListingTypeArg,

        /// Output CSV path
        #[arg(long, default_value = "webData.csv")]
        out: PathBuf,
    },
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    #[arg(long, value_enum, default_value = "rental")]
    pub listing_type: ListingTypeArg,

    /// Bundesland as spelled in the URL, e.g. Nordrhein-Westfalen
    #[arg(long, default_value = "Nordrhein-Westfalen")]
    pub region: String,

    /// City as spelled in the URL, e.g. Koeln
    #[arg(long, default_value = "Koeln")]
    pub city: String,

    /// Number of result pages to walk (no last-page detection)
    #[arg(long, default_value_t = 5)]
    pub pages: u32,

    /// Room count filter, MIN-MAX with either side optional (2-5, -3, 2-)
    #[arg(long, value_parser = parse_range, allow_hyphen_values = true)]
    pub rooms: Option<RangeFilter>,

    /// Living area filter in square meters, MIN-MAX
    #[arg(long, value_parser = parse_range, allow_hyphen_values = true)]
    pub size: Option<RangeFilter>,

    /// Price filter in euros, MIN-MAX
    #[arg(long, value_parser = parse_range, allow_hyphen_values = true)]
    pub price: Option<RangeFilter>,
}

impl SearchArgs {
    pub fn into_query(self) -> SearchQuery {
        SearchQuery {
            listing_type: self.listing_type.into(),
            region: self.region,
            city: self.city,
            rooms: self.rooms,
            size: self.size,
            price: self.price,
        }
    }
}

/// clap-facing mirror of [`ListingType`] so models stay clap-free.
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ListingTypeArg {
    Rental,
    ForSale,
}

impl From<ListingTypeArg> for ListingType {
    fn from(value: ListingTypeArg) -> Self {
        match value {
            ListingTypeArg::Rental => ListingType::Rental,
            ListingTypeArg::ForSale => ListingType::ForSale,
        }
    }
}

fn parse_range(value: &str) -> Result<RangeFilter, String> {
    let (min, max) = value
        .split_once('-')
        .ok_or_else(|| "expected MIN-MAX, e.g. 2-5 or -1000".to_string())?;

    let parse_bound = |text: &str| -> Result<Option<u32>, String> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        text.parse()
            .map(Some)
            .map_err(|_| format!("not a number: {text}"))
    };

    let filter = RangeFilter { min: parse_bound(min)?, max: parse_bound(max)? };
    if filter.min.is_none() && filter.max.is_none() {
        return Err("at least one bound is required".to_string());
    }
    Ok(filter)
}
