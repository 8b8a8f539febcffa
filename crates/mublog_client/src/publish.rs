//! Publish engine: create/update submission and cache reconciliation.
//!
//! One edit session is consumed by exactly one submit. A create posts an
//! h-entry and re-syncs the cache to pick up the server-assigned id, url,
//! and date; an update posts a replace action and applies an optimistic
//! local update without re-fetching.

use mublog_store::Database;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;
use crate::sync::{SyncEngine, SyncOutcome};

/// HTTP statuses the write endpoint may answer with on success.
pub const SUCCESS_STATUSES: [u16; 4] = [200, 201, 202, 204];

/// What a submit should do.
///
/// The tag is explicit: a post with a known id but a missing URL is
/// unrepresentable as an update, rather than being mis-inferred from a
/// nullable field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostAction {
    /// Publish a new post.
    Create,
    /// Edit an existing post.
    Update {
        /// Cache row to reconcile after a successful submit.
        post_id: String,
        /// Canonical URL the server knows the post by.
        post_url: String,
    },
}

/// One in-flight compose or edit, owned by the caller until submitted.
#[derive(Debug, Clone)]
pub struct EditSession {
    /// Create or update.
    pub action: PostAction,
    /// Post title. Empty means untitled.
    pub title: String,
    /// Raw comma-separated category text, as typed.
    pub categories: String,
    /// Raw markup body.
    pub body: String,
}

/// Result of a successful submit.
#[derive(Debug)]
pub enum PublishOutcome {
    /// A new post was accepted; the cache was refreshed by a full sync.
    Created {
        /// Outcome of the follow-up sync run.
        sync: SyncOutcome,
    },
    /// An existing post was accepted; the cache row was updated in place.
    Updated {
        /// Id of the reconciled cache row.
        post_id: String,
    },
}

/// Splits raw category text into trimmed, non-empty tag names.
pub fn parse_categories(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Serialize)]
struct EntryProperties {
    content: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct CreateEntry {
    #[serde(rename = "type")]
    entry_type: [&'static str; 1],
    properties: EntryProperties,
}

#[derive(Debug, Serialize)]
struct UpdateEntry {
    action: &'static str,
    url: String,
    replace: EntryProperties,
}

fn entry_properties(session: &EditSession, tags: &[String]) -> EntryProperties {
    EntryProperties {
        content: vec![session.body.clone()],
        name: (!session.title.is_empty()).then(|| vec![session.title.clone()]),
        category: (!tags.is_empty()).then(|| tags.to_vec()),
    }
}

/// Builds the JSON payload for a session. `name` and `category` appear
/// only when non-empty.
fn build_payload(session: &EditSession, tags: &[String]) -> ClientResult<serde_json::Value> {
    match &session.action {
        PostAction::Create => serde_json::to_value(CreateEntry {
            entry_type: ["h-entry"],
            properties: entry_properties(session, tags),
        }),
        PostAction::Update { post_url, .. } => serde_json::to_value(UpdateEntry {
            action: "update",
            url: post_url.clone(),
            replace: entry_properties(session, tags),
        }),
    }
    .map_err(|e| ClientError::data(format!("could not encode payload: {e}")))
}

/// Submits edit sessions and reconciles the cache with the result.
pub struct PublishEngine<'a, C: HttpClient> {
    config: &'a ClientConfig,
    client: &'a C,
}

impl<'a, C: HttpClient> PublishEngine<'a, C> {
    /// Creates a publish engine over the given configuration and transport.
    pub fn new(config: &'a ClientConfig, client: &'a C) -> Self {
        Self { config, client }
    }

    /// Submits one session.
    ///
    /// Any status outside [`SUCCESS_STATUSES`] is terminal for the session:
    /// the response body is surfaced verbatim, the cache is left untouched,
    /// and no retry is attempted. Retrying is a fresh caller-initiated
    /// submit.
    pub fn submit(&self, session: EditSession, db: &mut Database) -> ClientResult<PublishOutcome> {
        let token = self.config.require_token()?.to_string();

        let tags = parse_categories(&session.categories);
        let payload = build_payload(&session, &tags)?;

        let response = self
            .client
            .post_json(&self.config.publish_url(), &token, &payload)
            .map_err(ClientError::Transport)?;

        if !SUCCESS_STATUSES.contains(&response.status) {
            tracing::warn!(status = response.status, "publish rejected");
            return Err(ClientError::Protocol {
                status: response.status,
                body: response.body,
            });
        }

        match session.action {
            PostAction::Create => {
                // The server assigned the id, url, and date; a full walk is
                // the only way this client learns them.
                tracing::info!(status = response.status, "post created, refreshing cache");
                let sync = SyncEngine::new(self.config, self.client).sync(db)?;
                Ok(PublishOutcome::Created { sync })
            }
            PostAction::Update { post_id, .. } => {
                tracing::info!(status = response.status, post_id, "post updated");
                db.update_post_fields(&post_id, &session.title, &session.body, &tags.join(", "))?;
                Ok(PublishOutcome::Updated { post_id })
            }
        }
    }
}
