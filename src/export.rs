use anyhow::{Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use std::path::Path;

use crate::models::{Dataset, ListingRecord, ListingType};

/// Column order kept from the original exports for compatibility. The
/// price column is `Kaltmiete` for rentals and `Preis` for sales.
fn headers(listing_type: ListingType) -> [&'static str; 4] {
    ["Quadratmeter", "Zimmerzahl", listing_type.price_column(), "Adresse"]
}

/// Write the dataset as one flat CSV file, overwriting any existing
/// file. Missing fields become empty cells.
pub fn write_dataset(path: &Path, dataset: &Dataset, listing_type: ListingType) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("cannot create {}", path.display()))?;

    writer.write_record(headers(listing_type))?;
    for record in &dataset.records {
        // Column order follows the header; None serializes as an empty
        // cell.
        writer.serialize((
            record.area.as_deref(),
            record.rooms.as_deref(),
            record.price.as_deref(),
            record.address.as_deref(),
        ))?;
    }
    writer.flush()?;

    Ok(())
}

/// Read a previously written dataset back: the header row plus one
/// record per data row, empty cells turned back into `None`.
pub fn read_dataset(path: &Path) -> Result<(Vec<String>, Vec<ListingRecord>)> {
    let mut reader = ReaderBuilder::new()
        .from_path(path)
        .with_context(|| format!("cannot open {}", path.display()))?;

    let headers = reader.headers()?.iter().map(str::to_string).collect();

    type Row = (Option<String>, Option<String>, Option<String>, Option<String>);

    let mut records = Vec::new();
    for row in reader.deserialize() {
        let (area, rooms, price, address): Row = row?;
        records.push(ListingRecord { address, price, rooms, area });
    }

    Ok((headers, records))
}
