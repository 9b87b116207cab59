use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::sheet_data_error::SheetDataError;

pub const SHEET_QUERY_PARAMETER: &str = "sheet";
pub const ALLOW_ORIGIN_HEADER: &str = "Access-Control-Allow-Origin";

/// What the handler needs from an inbound call: its query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetRequest {
    pub query_parameters: HashMap<String, String>,
}

impl SheetRequest {
    pub fn new(query_parameters: HashMap<String, String>) -> Self {
        Self { query_parameters }
    }

    pub fn for_sheet(sheet_id: impl Into<String>) -> Self {
        Self::new(HashMap::from([(
            SHEET_QUERY_PARAMETER.to_string(),
            sheet_id.into(),
        )]))
    }

    /// `None` when the parameter is missing or empty.
    pub fn sheet_id(&self) -> Option<&str> {
        self.query_parameters
            .get(SHEET_QUERY_PARAMETER)
            .map(String::as_str)
            .filter(|sheet_id| !sheet_id.is_empty())
    }
}

/// Host-agnostic HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetResponse {
    pub status_code: u16,
    pub headers: BTreeMap<&'static str, String>,
    pub body: String,
}

impl SheetResponse {
    fn with_body(status_code: u16, body: String) -> Self {
        Self {
            status_code,
            headers: BTreeMap::from([(ALLOW_ORIGIN_HEADER, "*".to_string())]),
            body,
        }
    }

    pub fn ok(body: String) -> Self {
        Self::with_body(200, body)
    }

    pub fn from_error(error: &SheetDataError) -> Self {
        Self::with_body(error.status_code(), ErrorResponse::from(error).to_json())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub message: String,
}

/// `{"error":{"message":"..."}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorMessage,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: ErrorMessage {
                message: message.into(),
            },
        }
    }

    pub fn to_json(&self) -> String {
        // Plain strings only, so this never fails.
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl From<&SheetDataError> for ErrorResponse {
    fn from(error: &SheetDataError) -> Self {
        ErrorResponse::new(error.to_string())
    }
}
