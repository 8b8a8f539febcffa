//! # mublog Store
//!
//! Local post cache for the mublog client.
//!
//! The store is a single SQLite table keyed by post id, holding the cached
//! fields of every post the remote service has returned. It is the only
//! on-disk artifact the client owns. Engines open the store per operation
//! and release it before returning; there is never more than one writer.
//!
//! ## Key Invariants
//!
//! - `id` is the primary key; re-ingesting the same id replaces the row
//! - Multi-step writes run inside one transaction via [`Database::with_transaction`]
//! - The schema is versioned with `PRAGMA user_version` and migrated on open

mod database;
mod error;
mod migrations;
mod models;
mod posts;

pub use database::Database;
pub use error::{StoreError, StoreResult};
pub use models::PostRecord;
pub use posts::{
    clear_posts, get_post, known_categories, list_posts, search_posts, update_post_fields,
    upsert_post,
};
