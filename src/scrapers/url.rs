use crate::scrapers::types::{RangeFilter, SearchQuery};

const BASE_URL: &str = "https://www.immobilienscout24.de/Suche/S-T";

/// Build the URL of one result page.
///
/// Pure string templating: the same query and page number always yield
/// the same URL, and the page number only appears in the `P-{n}` segment.
/// Without numeric filters the URL ends at the city; with any filter
/// present the site expects the full segment chain, unset filters
/// rendered as `-` (compare `/-/-/-/EURO--1000,00` in real search links).
pub fn build_page_url(query: &SearchQuery, page: u32) -> String {
    let head = format!(
        "{}/P-{}/{}/{}/{}",
        BASE_URL,
        page,
        query.listing_type.url_segment(),
        query.region,
        query.city
    );

    if !query.has_filters() {
        return head;
    }

    // The segment after the city is unused for this search type but must
    // be present once filters follow.
    format!(
        "{}/-/{}/{}/{}",
        head,
        segment(query.rooms),
        segment(query.size),
        price_segment(query.price)
    )
}

fn segment(range: Option<RangeFilter>) -> String {
    match range {
        Some(range) => range.url_segment(),
        None => "-".to_string(),
    }
}

fn price_segment(range: Option<RangeFilter>) -> String {
    match range {
        Some(range) => format!("EURO-{}", range.url_segment()),
        None => "-".to_string(),
    }
}
