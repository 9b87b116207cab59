use std::collections::BTreeMap;

use serde_json::Value;

use super::feed::RawRow;

/// Literal Google prepends to every column-derived field name.
pub const COLUMN_PREFIX: &str = "gsx$";

/// Field of a cell record that holds its text.
const CELL_TEXT_FIELD: &str = "$t";

/// A row reduced to `column -> cell text`. Sorted by column name.
pub type FlatRow = BTreeMap<String, String>;

/// Maps every row, keeping feed order.
pub fn map_rows(rows: &[RawRow]) -> Vec<FlatRow> {
    rows.iter().map(map_row).collect()
}

/// Keeps the `gsx$` fields of `row` whose cell holds a value, renamed to the
/// bare column name. Everything else is dropped.
pub fn map_row(row: &RawRow) -> FlatRow {
    row.iter()
        .filter(|(field, _)| field.contains(COLUMN_PREFIX))
        .filter_map(|(field, cell)| {
            let text = cell_text(cell)?;
            Some((field.replace(COLUMN_PREFIX, ""), text))
        })
        .collect()
}

/// Reads `$t` out of a cell record.
///
/// Anything that isn't a record with a scalar `$t` counts as an empty cell.
fn cell_text(cell: &Value) -> Option<String> {
    match cell.get(CELL_TEXT_FIELD)? {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
