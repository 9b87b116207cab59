use std::sync::Arc;

use sheets_feed_core::{
    adapters::{config::app_config::AppConfig, sheets::feed_fetcher::GoogleSheetsFeedFetcher},
    application::SheetDataHandler,
    ports::sheet_fetcher::SheetFetcher,
};

pub struct HandlerFactory;

impl HandlerFactory {
    pub fn create(config: &AppConfig) -> Arc<SheetDataHandler> {
        let fetcher: Arc<dyn SheetFetcher> =
            Arc::new(GoogleSheetsFeedFetcher::new(config.feed.clone()));
        Arc::new(SheetDataHandler::new(fetcher))
    }
}
