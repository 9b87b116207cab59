use thiserror::Error;

/// Every way a sheet request can fail. The `Display` text is what the caller
/// sees in the error body.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetDataError {
    #[error("Required query parameter 'sheet' is missing")]
    MissingSheetParameter,
    #[error("There was an error retrieving data from sheet")]
    FetchFailed,
    #[error("There was an error parsing data from sheet")]
    ParseFailed,
}

impl SheetDataError {
    pub fn status_code(&self) -> u16 {
        match self {
            SheetDataError::MissingSheetParameter => 422,
            SheetDataError::FetchFailed | SheetDataError::ParseFailed => 400,
        }
    }

    /// Whether the hosting layer gets the underlying report along with the
    /// response.
    pub fn propagates(&self) -> bool {
        matches!(self, SheetDataError::ParseFailed)
    }
}
