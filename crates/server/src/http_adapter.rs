use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use sheets_feed_core::application::{SheetDataHandler, SheetRequest, SheetResponse};
use tower_http::trace::TraceLayer;
use tracing::{error, instrument, warn};

pub fn router(handler: Arc<SheetDataHandler>) -> Router {
    Router::new()
        .route("/", get(sheet_data))
        .route("/data", get(sheet_data))
        .route("/healthz", get(healthz))
        .with_state(handler)
        .layer(TraceLayer::new_for_http())
}

pub async fn healthz() -> &'static str {
    "OK"
}

#[instrument(skip(handler))]
pub async fn sheet_data(
    State(handler): State<Arc<SheetDataHandler>>,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> Response {
    // An unreadable query string is answered like a missing `sheet`.
    let query_parameters = match query {
        Ok(Query(query_parameters)) => query_parameters,
        Err(rejection) => {
            warn!(%rejection, "Unreadable query string");
            HashMap::new()
        }
    };

    let outcome = handler.handle(&SheetRequest::new(query_parameters)).await;

    if let Some(report) = &outcome.error {
        error!("❌ {:?}", report);
    } else if outcome.response.status_code != 200 {
        warn!(status = outcome.response.status_code, body = %outcome.response.body, "Request rejected");
    }

    into_http_response(outcome.response)
}

fn into_http_response(response: SheetResponse) -> Response {
    let status =
        StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut http_response = (status, response.body).into_response();

    let headers = http_response.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    for (name, value) in response.headers {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(&value),
        ) {
            (Ok(name), Ok(value)) => {
                headers.insert(name, value);
            }
            _ => warn!(header = name, "Skipping invalid response header"),
        }
    }

    http_response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use error_stack::report;
    use sheets_feed_core::domain::sheets::SheetsFeedResponse;
    use sheets_feed_core::ports::sheet_fetcher::{FeedFetchError, SheetFetcher};
    use tower::ServiceExt;

    struct CitiesFetcher;

    #[async_trait::async_trait]
    impl SheetFetcher for CitiesFetcher {
        async fn fetch(
            &self,
            sheet_id: &str,
        ) -> error_stack::Result<SheetsFeedResponse, FeedFetchError> {
            if sheet_id != "cities" {
                return Err(report!(FeedFetchError::HttpStatusError(400)));
            }
            Ok(serde_json::from_value(serde_json::json!({
                "feed": {
                    "entry": [
                        { "id": { "$t": "a" }, "gsx$city": { "$t": "Sydney" }, "gsx$population": { "$t": "5,131,326" } },
                        { "id": { "$t": "b" }, "gsx$city": { "$t": "Melbourne" }, "gsx$population": { "$t": "4,725,316" } }
                    ]
                }
            }))
            .unwrap())
        }
    }

    async fn send_get(uri: &str) -> (StatusCode, axum::http::HeaderMap, String) {
        let handler = Arc::new(SheetDataHandler::new(Arc::new(CitiesFetcher)));
        let response = router(handler)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, headers, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_missing_sheet() {
        let (status, headers, body) = send_get("/data").await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(headers["access-control-allow-origin"], "*");
        assert_eq!(
            body,
            r#"{"error":{"message":"Required query parameter 'sheet' is missing"}}"#
        );
    }

    #[tokio::test]
    async fn test_empty_sheet() {
        let (status, _, _) = send_get("/data?sheet=").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_unknown_sheet() {
        let (status, headers, body) = send_get("/data?sheet=1234").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(headers["access-control-allow-origin"], "*");
        assert_eq!(
            body,
            r#"{"error":{"message":"There was an error retrieving data from sheet"}}"#
        );
    }

    #[tokio::test]
    async fn test_sheet_rows() {
        let (status, headers, body) = send_get("/data?sheet=cities").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers["access-control-allow-origin"], "*");
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert_eq!(
            body,
            r#"[{"city":"Sydney","population":"5,131,326"},{"city":"Melbourne","population":"4,725,316"}]"#
        );
    }

    #[tokio::test]
    async fn test_root_path_serves_sheet_data() {
        let (status, _, body) = send_get("/?sheet=cities").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.starts_with(r#"[{"city":"Sydney""#));
    }

    #[tokio::test]
    async fn test_healthz() {
        let (status, _, body) = send_get("/healthz").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");
    }

    #[test]
    fn test_into_http_response_copies_headers() {
        let response = into_http_response(SheetResponse::ok("[]".to_string()));

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
    }
}
