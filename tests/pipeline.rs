// End-to-end: scripted pages through the pagination driver, out to CSV
// and back.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use immoradar::export;
use immoradar::models::ListingType;
use immoradar::scrapers::driver::{run, RunOptions};
use immoradar::scrapers::types::SearchQuery;
use immoradar::scrapers::url::build_page_url;
use immoradar::scrapers::{LogNotifier, PageFetcher};

struct MapFetcher {
    bodies: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
}

#[async_trait]
impl PageFetcher for MapFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.calls.lock().unwrap().push(url.to_string());
        self.bodies
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("unexpected status 404"))
    }
}

fn rental_page(listings: &[(&str, &str, &str, &str)]) -> String {
    let mut html = String::from("<html><body><div><button><div>Merken</div></button></div>");
    for (address, rooms, area, price) in listings {
        html.push_str(&format!("<div><button><div>{address}</div></button></div>"));
        for value in [rooms, area, price] {
            html.push_str(&format!(
                "<span class=\"font-nowrap font-line-xs\">{value}</span>"
            ));
        }
    }
    html.push_str("</body></html>");
    html
}

fn koeln_rentals() -> SearchQuery {
    SearchQuery {
        listing_type: ListingType::Rental,
        region: "Nordrhein-Westfalen".to_string(),
        city: "Koeln".to_string(),
        rooms: None,
        size: None,
        price: None,
    }
}

#[tokio::test]
async fn scrape_two_pages_and_round_trip_csv() {
    let query = koeln_rentals();
    let mut bodies = HashMap::new();
    bodies.insert(
        build_page_url(&query, 1),
        rental_page(&[
            ("Ehrenfeld, Köln", "2", "54 m²", "615 €"),
            ("Nippes, Köln", "3", "78 m²", "890 €"),
        ]),
    );
    bodies.insert(
        build_page_url(&query, 2),
        rental_page(&[("Deutz, Köln", "1", "32 m²", "480 €")]),
    );
    let fetcher = MapFetcher { bodies, calls: Mutex::new(Vec::new()) };

    let report = run(&query, 2, &fetcher, &LogNotifier, &RunOptions::default())
        .await
        .unwrap();

    assert_eq!(
        *fetcher.calls.lock().unwrap(),
        vec![build_page_url(&query, 1), build_page_url(&query, 2)]
    );
    assert_eq!(report.dataset.len(), 3);

    let addresses: Vec<_> = report
        .dataset
        .records
        .iter()
        .map(|r| r.address.as_deref().unwrap())
        .collect();
    assert_eq!(addresses, ["Ehrenfeld, Köln", "Nippes, Köln", "Deutz, Köln"]);

    let path = std::env::temp_dir().join(format!("immoradar-pipeline-{}.csv", std::process::id()));
    export::write_dataset(&path, &report.dataset, query.listing_type).unwrap();
    let (headers, records) = export::read_dataset(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(headers, ["Quadratmeter", "Zimmerzahl", "Kaltmiete", "Adresse"]);
    assert_eq!(records, report.dataset.records);
}

#[tokio::test]
async fn page_past_the_last_results_is_not_an_error() {
    let query = koeln_rentals();
    let mut bodies = HashMap::new();
    bodies.insert(
        build_page_url(&query, 1),
        rental_page(&[("Südstadt, Köln", "2", "60 m²", "700 €")]),
    );
    // Page 2 is not scripted: the fetcher fails it, like a dead page.
    let fetcher = MapFetcher { bodies, calls: Mutex::new(Vec::new()) };

    let report = run(&query, 2, &fetcher, &LogNotifier, &RunOptions::default())
        .await
        .unwrap();

    assert_eq!(report.dataset.len(), 1);
    assert_eq!(report.failed_pages(), 1);
}
