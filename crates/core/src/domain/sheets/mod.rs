pub mod feed;
pub mod row_mapper;

pub use feed::{RawRow, SheetsFeedResponse};
pub use row_mapper::{map_row, map_rows, FlatRow, COLUMN_PREFIX};
