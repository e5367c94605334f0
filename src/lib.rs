pub mod cli;
pub mod export;
pub mod models;
pub mod scrapers;
