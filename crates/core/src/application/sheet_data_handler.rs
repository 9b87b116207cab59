use std::sync::Arc;

use error_stack::{report, Report, ResultExt};

use crate::domain::sheets::map_rows;
use crate::ports::sheet_fetcher::SheetFetcher;

use super::sheet_data_error::SheetDataError;
use super::sheet_request::{SheetRequest, SheetResponse};

/// The response to send back, plus the report the host should see when the
/// failure is ours rather than the caller's or Google's.
#[derive(Debug)]
pub struct HandlerOutcome {
    pub response: SheetResponse,
    pub error: Option<Report<SheetDataError>>,
}

impl HandlerOutcome {
    fn from_report(report: Report<SheetDataError>) -> Self {
        let error = *report.current_context();
        Self {
            response: SheetResponse::from_error(&error),
            error: error.propagates().then_some(report),
        }
    }
}

/// Turns `?sheet=<id>` into the sheet's rows as a JSON array.
///
/// Stateless apart from the fetcher; one instance serves every request.
pub struct SheetDataHandler {
    fetcher: Arc<dyn SheetFetcher>,
}

impl std::fmt::Debug for SheetDataHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetDataHandler")
            .field("fetcher", &"<SheetFetcher>")
            .finish()
    }
}

impl SheetDataHandler {
    pub fn new(fetcher: Arc<dyn SheetFetcher>) -> Self {
        Self { fetcher }
    }

    pub async fn handle(&self, request: &SheetRequest) -> HandlerOutcome {
        match self.sheet_rows_json(request).await {
            Ok(body) => HandlerOutcome {
                response: SheetResponse::ok(body),
                error: None,
            },
            Err(report) => HandlerOutcome::from_report(report),
        }
    }

    async fn sheet_rows_json(
        &self,
        request: &SheetRequest,
    ) -> error_stack::Result<String, SheetDataError> {
        let sheet_id = request
            .sheet_id()
            .ok_or_else(|| report!(SheetDataError::MissingSheetParameter))?;

        let feed = self
            .fetcher
            .fetch(sheet_id)
            .await
            .change_context(SheetDataError::FetchFailed)?;

        let rows = map_rows(feed.rows());

        serde_json::to_string(&rows)
            .change_context(SheetDataError::ParseFailed)
            .attach_printable_lazy(|| format!("{} rows from sheet {sheet_id}", rows.len()))
    }
}
