use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single row of the list feed, kept as raw JSON.
///
/// Metadata fields (`id`, `updated`, `link`, ...) and column fields
/// (`gsx$<column>`) live side by side, so the values are not decoded until
/// [`crate::domain::sheets::row_mapper::map_row`] looks at them.
pub type RawRow = Map<String, Value>;

/// `{"$t": "..."}`, the envelope Google wraps around every text node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedText {
    #[serde(rename = "$t", default)]
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedTitle {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(rename = "$t", default)]
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetsFeed {
    #[serde(default)]
    pub id: FeedText,
    #[serde(default)]
    pub updated: FeedText,
    #[serde(default)]
    pub title: FeedTitle,
    /// Google leaves `entry` out entirely when the worksheet has no rows.
    #[serde(default)]
    pub entry: Vec<RawRow>,
}

/// Body of `GET .../feeds/list/{sheet}/od6/public/values?alt=json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetsFeedResponse {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub encoding: String,
    #[serde(default)]
    pub feed: SheetsFeed,
}

impl SheetsFeedResponse {
    pub fn rows(&self) -> &[RawRow] {
        &self.feed.entry
    }
}
