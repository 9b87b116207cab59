use serde::Deserialize;

/// Public list feed of the first worksheet (`od6`).
pub const DEFAULT_FEED_URL_TEMPLATE: &str =
    "https://spreadsheets.google.com/feeds/list/{sheet_id}/od6/public/values?alt=json";

pub const SHEET_ID_PLACEHOLDER: &str = "{sheet_id}";

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct FeedConfig {
    pub url_template: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url_template: DEFAULT_FEED_URL_TEMPLATE.to_string(),
        }
    }
}

impl FeedConfig {
    /// The sheet id is substituted verbatim; it is opaque to us.
    pub fn feed_url(&self, sheet_id: &str) -> String {
        self.url_template.replace(SHEET_ID_PLACEHOLDER, sheet_id)
    }
}
