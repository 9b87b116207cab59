use async_trait::async_trait;
use error_stack::{report, ResultExt};
use reqwest::Client;
use tracing::{event, instrument, Level};

use crate::adapters::config::feed_config::FeedConfig;
use crate::domain::sheets::SheetsFeedResponse;
use crate::ports::sheet_fetcher::{FeedFetchError, SheetFetcher};

/// Reads the public JSON list feed Google publishes for a sheet.
///
/// No auth, no retries, no timeout beyond the client defaults.
#[derive(Debug, Clone)]
pub struct GoogleSheetsFeedFetcher {
    client: Client,
    config: FeedConfig,
}

impl GoogleSheetsFeedFetcher {
    pub fn new(config: FeedConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl SheetFetcher for GoogleSheetsFeedFetcher {
    #[instrument(skip(self))]
    async fn fetch(
        &self,
        sheet_id: &str,
    ) -> error_stack::Result<SheetsFeedResponse, FeedFetchError> {
        let url = self.config.feed_url(sheet_id);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .change_context(FeedFetchError::HttpError)
            .attach_printable_lazy(|| format!("GET {url}"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(report!(FeedFetchError::HttpStatusError(status.as_u16()))
                .attach_printable(format!("GET {url}")));
        }

        let text = response
            .text()
            .await
            .change_context(FeedFetchError::BodyError)?;

        tracing::debug!(bytes = text.len(), "Response OK 200");

        let feed: SheetsFeedResponse =
            serde_json::from_str(text.as_str()).change_context(FeedFetchError::JsonError)?;

        event!(Level::DEBUG, rows = feed.rows().len(), "Feed decoded");

        Ok(feed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::Path,
        http::{header::CONTENT_TYPE, StatusCode},
        response::{IntoResponse, Response},
        routing::get,
        Router,
    };

    const CITIES_FEED: &str = r#"{
        "version": "1.0",
        "encoding": "UTF-8",
        "feed": {
            "title": { "type": "text", "$t": "Sheet1" },
            "entry": [
                {
                    "id": { "$t": "row-1" },
                    "gsx$city": { "$t": "Sydney" },
                    "gsx$population": { "$t": "5,131,326" }
                },
                {
                    "id": { "$t": "row-2" },
                    "gsx$city": { "$t": "Melbourne" },
                    "gsx$population": { "$t": "4,725,316" }
                }
            ]
        }
    }"#;

    async fn feed(Path(sheet_id): Path<String>) -> Response {
        match sheet_id.as_str() {
            "cities" => ([(CONTENT_TYPE, "application/json")], CITIES_FEED).into_response(),
            "html" => (StatusCode::OK, "<html><body>Moved</body></html>").into_response(),
            _ => (
                StatusCode::BAD_REQUEST,
                "Sorry, unable to open the file at this time.",
            )
                .into_response(),
        }
    }

    /// Serves a fake feed on an ephemeral port and returns the matching template.
    async fn spawn_feed_server() -> String {
        let router = Router::new().route("/feeds/list/:sheet_id/od6/public/values", get(feed));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/feeds/list/{{sheet_id}}/od6/public/values?alt=json")
    }

    fn fetcher(url_template: String) -> GoogleSheetsFeedFetcher {
        GoogleSheetsFeedFetcher::new(FeedConfig { url_template })
    }

    #[tokio::test]
    async fn test_fetch_decodes_feed() {
        let fetcher = fetcher(spawn_feed_server().await);

        let feed = fetcher.fetch("cities").await.unwrap();

        assert_eq!(feed.version, "1.0");
        assert_eq!(feed.feed.title.text, "Sheet1");
        assert_eq!(feed.rows().len(), 2);
        assert_eq!(
            feed.rows()[1].get("gsx$city"),
            Some(&serde_json::json!({ "$t": "Melbourne" }))
        );
    }

    #[tokio::test]
    async fn test_fetch_rejects_error_status() {
        let fetcher = fetcher(spawn_feed_server().await);

        let report = fetcher.fetch("1234").await.unwrap_err();

        assert_eq!(
            report.current_context(),
            &FeedFetchError::HttpStatusError(400)
        );
    }

    #[tokio::test]
    async fn test_fetch_rejects_non_json_body() {
        let fetcher = fetcher(spawn_feed_server().await);

        let report = fetcher.fetch("html").await.unwrap_err();

        assert_eq!(report.current_context(), &FeedFetchError::JsonError);
    }

    #[tokio::test]
    async fn test_fetch_reports_unreachable_host() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let fetcher = fetcher(format!("http://{addr}/feeds/list/{{sheet_id}}"));

        let report = fetcher.fetch("cities").await.unwrap_err();

        assert_eq!(report.current_context(), &FeedFetchError::HttpError);
    }
}
