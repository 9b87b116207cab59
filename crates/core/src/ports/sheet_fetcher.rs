use thiserror::Error;

use crate::domain::sheets::SheetsFeedResponse;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedFetchError {
    #[error("HTTP request failed")]
    HttpError,
    #[error("HTTP status error: {0}")]
    HttpStatusError(u16),
    #[error("Failed to read response body")]
    BodyError,
    #[error("JSON parsing failed")]
    JsonError,
}

#[async_trait::async_trait]
pub trait SheetFetcher: Send + Sync {
    /// Fetches and decodes the published list feed of `sheet_id`.
    ///
    /// Callers are expected to reject empty ids before getting here.
    async fn fetch(
        &self,
        sheet_id: &str,
    ) -> error_stack::Result<SheetsFeedResponse, FeedFetchError>;
}
