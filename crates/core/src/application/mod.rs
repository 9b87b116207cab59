pub mod sheet_data_error;
pub mod sheet_data_handler;
pub mod sheet_request;

pub use sheet_data_error::SheetDataError;
pub use sheet_data_handler::{HandlerOutcome, SheetDataHandler};
pub use sheet_request::{ErrorResponse, SheetRequest, SheetResponse};
