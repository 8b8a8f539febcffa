//! Row types persisted in the local cache.

use serde::{Deserialize, Serialize};

/// One cached post, mirroring what the remote service last told us.
///
/// `categories` is a comma-and-space-joined rendering of the tag set. This
/// is a deliberate denormalization that keeps the store single-table; the
/// set form is recovered on demand by [`crate::known_categories`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostRecord {
    /// Stable identifier: the server-assigned uid, or the canonical URL
    /// when no uid is issued.
    pub id: String,
    /// Server-supplied publication timestamp, ISO-8601-like. Used for
    /// ordering and truncated-to-date display.
    pub date_published: String,
    /// Rendered HTML content. May be empty.
    pub content_html: String,
    /// Canonical permalink. Empty only for rows the server has not yet
    /// confirmed published.
    pub url: String,
    /// Post title. May be empty.
    pub title: String,
    /// Comma-and-space-joined tag names. May be empty.
    pub categories: String,
}
