use scraper::{ElementRef, Html, Selector};

use crate::models::{ListingRecord, ListingType};

// Selector strings are tied to the site's current markup and silently
// stop matching when it changes; keep them all in one place.
const RENTAL_ADDRESS_SELECTOR: &str = "div > button div";
const RENTAL_CRITERIA_SELECTOR: &str = ".font-nowrap.font-line-xs";
const SALE_ADDRESS_SELECTOR: &str = "div.result-list-entry__address";
const SALE_CRITERIA_SELECTOR: &str = "div.result-list-entry__criteria";
const SALE_VALUE_SELECTOR: &str = "dd";

/// The four field columns of one result page, in listing order.
///
/// Columns may have different lengths; [`FieldColumns::into_records`]
/// reconciles them.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct FieldColumns {
    pub addresses: Vec<String>,
    pub prices: Vec<String>,
    pub rooms: Vec<String>,
    pub areas: Vec<String>,
}

impl FieldColumns {
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
            && self.prices.is_empty()
            && self.rooms.is_empty()
            && self.areas.is_empty()
    }

    /// True when the columns disagree about how many listings the page
    /// has, usually a sign of a listing with a missing sub-field.
    pub fn is_ragged(&self) -> bool {
        let len = self.addresses.len();
        self.prices.len() != len || self.rooms.len() != len || self.areas.len() != len
    }

    /// Reconcile the columns into one record per row.
    ///
    /// Shorter columns are padded with `None` up to the longest one, so
    /// no extracted value is dropped. This mirrors the right-padding
    /// table constructor of the original export.
    pub fn into_records(self) -> Vec<ListingRecord> {
        let len = self
            .addresses
            .len()
            .max(self.prices.len())
            .max(self.rooms.len())
            .max(self.areas.len());

        let mut addresses = self.addresses.into_iter();
        let mut prices = self.prices.into_iter();
        let mut rooms = self.rooms.into_iter();
        let mut areas = self.areas.into_iter();

        (0..len)
            .map(|_| ListingRecord {
                address: addresses.next(),
                price: prices.next(),
                rooms: rooms.next(),
                area: areas.next(),
            })
            .collect()
    }
}

/// Extract the four field columns from one parsed result page.
///
/// Pure function of its inputs. A page with no matching nodes yields
/// empty columns; absence of listings is normal, not an error.
pub fn extract_fields(document: &Html, listing_type: ListingType) -> FieldColumns {
    match listing_type {
        ListingType::Rental => extract_rental(document),
        ListingType::ForSale => extract_for_sale(document),
    }
}

/// Split the flat criteria-node sequence into price, rooms and area
/// columns.
///
/// Precondition: exactly three nodes per listing, in the order the
/// result list renders them. With a 1-based position `p`, `p % 3 == 0`
/// is a price, `(p + 2) % 3 == 0` a room count and `(p + 1) % 3 == 0`
/// an area. A listing missing one of its three nodes shifts every later
/// value into the wrong column; the only signal callers get is uneven
/// column lengths.
pub fn decode_stride(texts: &[String]) -> (Vec<String>, Vec<String>, Vec<String>) {
    let mut prices = Vec::new();
    let mut rooms = Vec::new();
    let mut areas = Vec::new();

    for (i, text) in texts.iter().enumerate() {
        let p = i + 1;
        if p % 3 == 0 {
            prices.push(text.clone());
        } else if (p + 2) % 3 == 0 {
            rooms.push(text.clone());
        } else {
            areas.push(text.clone());
        }
    }

    (prices, rooms, areas)
}

fn extract_rental(document: &Html) -> FieldColumns {
    let address_selector = Selector::parse(RENTAL_ADDRESS_SELECTOR).unwrap();
    let criteria_selector = Selector::parse(RENTAL_CRITERIA_SELECTOR).unwrap();

    // The nesting around the result list makes the address selector
    // produce one spurious leading match; drop it, then drop empties.
    let addresses = document
        .select(&address_selector)
        .map(node_text)
        .skip(1)
        .filter(|text| !text.is_empty())
        .collect();

    let texts: Vec<String> = document.select(&criteria_selector).map(node_text).collect();
    let (prices, rooms, areas) = decode_stride(&texts);

    FieldColumns { addresses, prices, rooms, areas }
}

fn extract_for_sale(document: &Html) -> FieldColumns {
    let address_selector = Selector::parse(SALE_ADDRESS_SELECTOR).unwrap();
    let criteria_selector = Selector::parse(SALE_CRITERIA_SELECTOR).unwrap();
    let value_selector = Selector::parse(SALE_VALUE_SELECTOR).unwrap();

    let addresses = document
        .select(&address_selector)
        .map(node_text)
        .filter(|text| !text.is_empty())
        .collect();

    let mut prices = Vec::new();
    let mut areas = Vec::new();
    let mut rooms = Vec::new();

    // Sale entries carry one criteria block per listing; its dd values
    // render as price, area, rooms. Values like "335.000 €" are reduced
    // to their leading token.
    for block in document.select(&criteria_selector) {
        let mut values = block.select(&value_selector).map(node_text);
        if let Some(value) = values.next() {
            prices.push(first_token(&value));
        }
        if let Some(value) = values.next() {
            areas.push(first_token(&value));
        }
        if let Some(value) = values.next() {
            rooms.push(first_token(&value));
        }
    }

    FieldColumns { addresses, prices, rooms, areas }
}

fn node_text(node: ElementRef) -> String {
    node.text().collect::<String>().trim().to_string()
}

fn first_token(text: &str) -> String {
    text.split_whitespace().next().unwrap_or("").to_string()
}
