//! Paginated sync engine.
//!
//! Walks the read API page by page and makes the local cache reflect every
//! post the API returns. The walk terminates on the first empty page; a
//! short but non-empty page does not stop it, so the engine always issues
//! one more request after every non-empty page. All upserts from all pages
//! commit as one transaction.

use mublog_store::{clear_posts, upsert_post, Database, StoreError};
use rusqlite::Transaction;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;
use crate::remote;

/// Result of a completed sync run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncOutcome {
    /// Pages fetched, including the final empty one.
    pub pages_fetched: u32,
    /// Records written to the cache.
    pub records_written: u64,
}

/// Pulls the complete remote post history into the local cache.
pub struct SyncEngine<'a, C: HttpClient> {
    config: &'a ClientConfig,
    client: &'a C,
}

impl<'a, C: HttpClient> SyncEngine<'a, C> {
    /// Creates a sync engine over the given configuration and transport.
    pub fn new(config: &'a ClientConfig, client: &'a C) -> Self {
        Self { config, client }
    }

    /// Runs a full walk, committing every page's rows together.
    ///
    /// On any failure the transaction rolls back, the cache is left
    /// unchanged, and the error is surfaced with the progress reached in
    /// the log.
    pub fn sync(&self, db: &mut Database) -> ClientResult<SyncOutcome> {
        self.run(db, false)
    }

    /// Runs a full walk after wiping the cache.
    ///
    /// The wipe and the walk share one transaction, so posts the remote
    /// no longer returns disappear, and a mid-walk failure still leaves
    /// the previous cache contents in place.
    pub fn sync_with_reset(&self, db: &mut Database) -> ClientResult<SyncOutcome> {
        self.run(db, true)
    }

    fn run(&self, db: &mut Database, reset: bool) -> ClientResult<SyncOutcome> {
        let token = self.config.require_token()?.to_string();

        let tx = db.conn_mut().transaction().map_err(StoreError::from)?;
        if reset {
            tracing::info!("resetting cache before walk");
            clear_posts(&tx)?;
        }

        let mut progress = SyncOutcome::default();
        match self.walk(&tx, &token, &mut progress) {
            Ok(()) => {
                tx.commit().map_err(StoreError::from)?;
                tracing::info!(
                    pages = progress.pages_fetched,
                    records = progress.records_written,
                    "sync complete"
                );
                Ok(progress)
            }
            Err(e) => {
                // Dropping the transaction rolls everything back.
                tracing::warn!(
                    pages = progress.pages_fetched,
                    records = progress.records_written,
                    kind = e.kind(),
                    error = %e,
                    "sync aborted, cache left unchanged"
                );
                Err(e)
            }
        }
    }

    fn walk(
        &self,
        tx: &Transaction<'_>,
        token: &str,
        progress: &mut SyncOutcome,
    ) -> ClientResult<()> {
        let page_size = self.config.page_size;
        let mut offset = 0u32;

        loop {
            let url = self.config.query_url(page_size, offset);
            tracing::debug!(offset, "fetching page");

            let response = self
                .client
                .get(&url, token)
                .map_err(ClientError::Transport)?;

            if !response.is_success() {
                return Err(ClientError::Protocol {
                    status: response.status,
                    body: response.body,
                });
            }

            let page = remote::parse_page(&response.body)?;
            progress.pages_fetched += 1;

            if page.items.is_empty() {
                return Ok(());
            }

            for item in page.items {
                let record = item.into_record()?;
                upsert_post(tx, &record)?;
                progress.records_written += 1;
            }

            offset += page_size;
        }
    }
}
