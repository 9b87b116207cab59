pub mod feed_fetcher;
