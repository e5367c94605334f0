use serde::{Deserialize, Serialize};

/// Kind of listing a search targets. The variant selects both the URL
/// path segment and the selector set used for extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListingType {
    /// Wohnung zur Miete (rental apartment)
    Rental,
    /// Haus zum Kauf (house for sale)
    ForSale,
}

impl ListingType {
    /// Path segment in the search URL.
    pub fn url_segment(&self) -> &'static str {
        match self {
            ListingType::Rental => "Wohnung-Miete",
            ListingType::ForSale => "Haus-Kauf",
        }
    }

    /// Header of the price column in the CSV export.
    pub fn price_column(&self) -> &'static str {
        match self {
            ListingType::Rental => "Kaltmiete",
            ListingType::ForSale => "Preis",
        }
    }
}

/// One candidate listing from one result page.
///
/// All fields hold the raw text found in the markup; values like
/// "3 - 5 Zimmer" stay as ranges, nothing is parsed to a number here.
/// A `None` marks a field the page did not yield for this row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub address: Option<String>,
    pub price: Option<String>,
    pub rooms: Option<String>,
    pub area: Option<String>,
}

/// All records of one run, in page order and listing order within a page.
/// Duplicates across overlapping result pages are kept as-is.
#[derive(Debug, Default)]
pub struct Dataset {
    pub records: Vec<ListingRecord>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one page's records in extraction order.
    pub fn append_page(&mut self, mut records: Vec<ListingRecord>) {
        self.records.append(&mut records);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Per-page extraction diagnostics. Reported at the end of a run, never
/// turns into an error.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PageStats {
    pub page: u32,
    pub fetched: bool,
    pub records: usize,
    /// The four field columns came back with differing lengths.
    pub ragged: bool,
}
