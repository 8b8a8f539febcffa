//! Wire types for the read API and their mapping into cache rows.
//!
//! One page is `{ "items": [ { "properties": {...} }, ... ] }`. Every
//! property is a JSON array; `content` entries are either a plain string or
//! an object carrying an `html` field. Normalization to plain strings
//! happens here, at the ingestion boundary, so nothing downstream sees the
//! union.

use mublog_store::PostRecord;
use serde::Deserialize;

use crate::error::{ClientError, ClientResult};

/// One page of the read API.
#[derive(Debug, Deserialize)]
pub struct QueryPage {
    /// Page entries. An empty array signals the end of pagination.
    #[serde(default)]
    pub items: Vec<RemoteItem>,
}

/// One page entry.
#[derive(Debug, Deserialize)]
pub struct RemoteItem {
    /// The entry's property bag.
    #[serde(default)]
    pub properties: RemoteProperties,
}

/// Property bag of a remote post. Absent properties default to empty.
#[derive(Debug, Default, Deserialize)]
pub struct RemoteProperties {
    /// Post content, plain or HTML-wrapped.
    #[serde(default)]
    pub content: Vec<RemoteContent>,
    /// Publication timestamp.
    #[serde(default)]
    pub published: Vec<String>,
    /// Canonical permalink. Required: its absence is a data error.
    #[serde(default)]
    pub url: Vec<String>,
    /// Server-assigned stable identifier.
    #[serde(default)]
    pub uid: Vec<String>,
    /// Post title.
    #[serde(default)]
    pub name: Vec<String>,
    /// Tag names.
    #[serde(default)]
    pub category: Vec<String>,
}

/// A content entry: either `{"html": "..."}` or a bare string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RemoteContent {
    /// Structured form carrying rendered HTML.
    Html {
        /// The rendered HTML.
        html: String,
    },
    /// Bare string form.
    Text(String),
}

impl RemoteContent {
    /// The contained text, whichever form it arrived in.
    pub fn into_text(self) -> String {
        match self {
            RemoteContent::Html { html } => html,
            RemoteContent::Text(text) => text,
        }
    }
}

/// Parses one page body. A malformed body is a data error, fatal for the
/// sync run; pages are never silently skipped.
pub fn parse_page(body: &str) -> ClientResult<QueryPage> {
    serde_json::from_str(body).map_err(|e| ClientError::data(format!("malformed page: {e}")))
}

impl RemoteItem {
    /// Maps this entry into a cache row.
    ///
    /// Identifier resolution: the `uid` property when present, otherwise
    /// the permalink. An entry without a permalink cannot be cached and
    /// aborts the run.
    pub fn into_record(self) -> ClientResult<PostRecord> {
        let props = self.properties;

        let url = props
            .url
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::data("item has no url property"))?;

        let id = props.uid.into_iter().next().unwrap_or_else(|| url.clone());

        Ok(PostRecord {
            id,
            date_published: props.published.into_iter().next().unwrap_or_default(),
            content_html: props
                .content
                .into_iter()
                .next()
                .map(RemoteContent::into_text)
                .unwrap_or_default(),
            url,
            title: props.name.into_iter().next().unwrap_or_default(),
            categories: props.category.join(", "),
        })
    }
}
