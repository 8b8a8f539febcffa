//! # mublog Client
//!
//! Sync, publish, and media-upload engines for the mublog offline-first
//! micro-blogging client.
//!
//! This crate provides:
//! - Paginated sync of the remote post history into the local cache
//! - Create/update submission with response-driven cache reconciliation
//! - Multipart media upload with `Location`-header result recovery
//! - Compose-document parsing at the editor boundary
//! - HTTP transport abstraction with a scripted mock for tests
//!
//! ## Architecture
//!
//! Every engine borrows a [`ClientConfig`] and a [`HttpClient`]
//! implementation and operates on a [`mublog_store::Database`] opened by
//! the caller. Calls are synchronous and blocking end to end; there is
//! never more than one in-flight request.
//!
//! ## Key Invariants
//!
//! - A sync walk terminates only on the first empty page, and commits as
//!   one transaction
//! - A create re-syncs to learn the server-assigned identity; an update
//!   reconciles the cache optimistically
//! - Precondition failures are caught before any network call
//! - Failures never leave a partial cache update behind

mod compose;
mod config;
mod error;
mod http;
mod media;
mod publish;
mod remote;
mod sync;

pub use compose::EditDocument;
pub use config::{ClientConfig, DEFAULT_PAGE_SIZE};
pub use error::{ClientError, ClientResult};
pub use http::{AttoClient, HttpClient, HttpResponse, MockClient, RecordedRequest};
pub use media::{image_markup, MediaEngine};
pub use publish::{
    parse_categories, EditSession, PostAction, PublishEngine, PublishOutcome, SUCCESS_STATUSES,
};
pub use remote::{QueryPage, RemoteContent, RemoteItem, RemoteProperties};
pub use sync::{SyncEngine, SyncOutcome};
