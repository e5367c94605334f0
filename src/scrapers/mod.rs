pub mod driver;
pub mod extract;
pub mod fetcher;
pub mod traits;
pub mod types;
pub mod url;

pub use fetcher::HttpFetcher;
pub use traits::{FailureNotifier, LogNotifier, PageFetcher};
