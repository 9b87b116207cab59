pub mod sheet_fetcher;
